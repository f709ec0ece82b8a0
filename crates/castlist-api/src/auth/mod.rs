pub mod client;
pub mod error;

pub use client::{AuthClient, Session};
pub use error::AuthError;
