mod health;
mod reviews;

pub use health::*;
pub use reviews::*;
