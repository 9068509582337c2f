//! OAuth2 client-credentials tokens and their on-disk cache

pub mod cache;
pub mod token;

pub use cache::{CacheError, CredentialCache};
pub use token::{AUDIENCE, AuthConfig, TokenRecord, TokenSource};
