use std::str::FromStr;

use chrono::{DateTime, Utc};
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReviewKind {
    Host,
    Accommodation,
}

impl ReviewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewKind::Host => "Host",
            ReviewKind::Accommodation => "Accommodation",
        }
    }
}

impl FromStr for ReviewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Host" => Ok(ReviewKind::Host),
            "Accommodation" => Ok(ReviewKind::Accommodation),
            other => Err(format!("{} is not a valid review kind", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(i16);

impl Rating {
    pub fn parse(value: i16) -> Result<Rating, String> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err("Invalid review rating parameter".to_string())
        }
    }

    pub fn as_i16(&self) -> i16 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct ReviewComment(String);

impl ReviewComment {
    // Rejected rather than truncated.
    pub fn parse(s: String) -> Result<ReviewComment, String> {
        if s.graphemes(true).count() > 2048 {
            Err("Review comment is too long".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ReviewComment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub enum ReviewTarget {
    Accommodation { entity_id: String },
    Host { host_username: String },
}

// Fields are optional so that validation, not deserialization, reports what
// is missing.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    #[serde(rename = "type")]
    pub kind: Option<ReviewKind>,
    pub entity_id: Option<String>,
    pub host_username: Option<String>,
    pub comment: Option<String>,
    pub rating: Option<i16>,
}

#[derive(Debug)]
pub struct NewReview {
    pub target: ReviewTarget,
    pub comment: Option<ReviewComment>,
    pub rating: Rating,
    pub reviewer_username: String,
}

impl NewReview {
    pub fn parse(payload: ReviewPayload, reviewer_username: String) -> Result<NewReview, String> {
        let kind = payload
            .kind
            .ok_or_else(|| "Missing review type parameter".to_string())?;
        let target = match kind {
            ReviewKind::Accommodation => {
                let entity_id = payload
                    .entity_id
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| "Missing review entityId parameter".to_string())?;
                ReviewTarget::Accommodation { entity_id }
            }
            ReviewKind::Host => {
                let host_username = payload
                    .host_username
                    .filter(|username| !username.is_empty())
                    .ok_or_else(|| "Missing review hostUsername parameter".to_string())?;
                ReviewTarget::Host { host_username }
            }
        };
        let rating = payload
            .rating
            .ok_or_else(|| "Missing review rating parameter".to_string())?;
        let rating = Rating::parse(rating)?;
        let comment = payload.comment.map(ReviewComment::parse).transpose()?;

        Ok(NewReview {
            target,
            comment,
            rating,
            reviewer_username,
        })
    }

    pub fn kind(&self) -> ReviewKind {
        match self.target {
            ReviewTarget::Accommodation { .. } => ReviewKind::Accommodation,
            ReviewTarget::Host { .. } => ReviewKind::Host,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ReviewKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub rating: i16,
    pub reviewer_username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub entity_id: Option<String>,
    pub host_username: Option<String>,
}

impl SearchQuery {
    // Values are truncated at the first `/`.
    pub fn sanitized(self) -> SearchQuery {
        let truncate = |value: String| match value.split('/').next() {
            Some(head) if !head.is_empty() => Some(head.to_string()),
            _ => None,
        };
        SearchQuery {
            entity_id: self.entity_id.and_then(truncate),
            host_username: self.host_username.and_then(truncate),
        }
    }
}
