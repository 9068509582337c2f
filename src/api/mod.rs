//! ReSim REST API access
//!
//! Every call goes through [`ApiClient`], which attaches a bearer token from
//! the token source and validates the response status before any payload
//! is read. Commands that take a name instead of a UUID resolve it with
//! [`resolve::find_id_by_name`].

pub mod branches;
pub mod builds;
pub mod client;
pub mod constants;
pub mod error;
pub mod logs;
pub mod metrics;
pub mod models;
pub mod projects;
pub mod resolve;
pub mod validate;

pub use client::ApiClient;
pub use error::ApiError;
pub use logs::JobRef;
pub use resolve::{PAGE_SIZE, Page, find_id_by_name};
