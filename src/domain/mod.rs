mod review;
mod user;

pub use review::*;
pub use user::*;
