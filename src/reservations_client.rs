use reqwest::Client;

/// HTTP client for the reservations service's review-permission endpoints.
#[derive(Clone)]
pub struct ReservationsClient {
    http_client: Client,
    base_url: String,
}

impl ReservationsClient {
    pub fn new(base_url: String, timeout: std::time::Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: Client::builder().timeout(timeout).build()?,
            base_url,
        })
    }

    #[tracing::instrument(name = "Checking accommodation review permission", skip(self))]
    pub async fn check_accommodation_review(
        &self,
        accommodation_id: &str,
        reviewer_username: &str,
    ) -> Result<bool, reqwest::Error> {
        let url = format!("{}/review/accommodation", self.base_url);
        let body = AccommodationReviewCheck {
            accommodation_id,
            reviewer_username,
        };
        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        response.json::<bool>().await
    }

    #[tracing::instrument(name = "Checking host review permission", skip(self))]
    pub async fn check_host_review(
        &self,
        host_username: &str,
        reviewer_username: &str,
    ) -> Result<bool, reqwest::Error> {
        let url = format!("{}/review/host", self.base_url);
        let body = HostReviewCheck {
            host_username,
            reviewer_username,
        };
        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        response.json::<bool>().await
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct AccommodationReviewCheck<'a> {
    accommodation_id: &'a str,
    reviewer_username: &'a str,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct HostReviewCheck<'a> {
    host_username: &'a str,
    reviewer_username: &'a str,
}
