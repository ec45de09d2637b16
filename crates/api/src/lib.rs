#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod vault;

pub use client::ChefsApi;
pub use error::ApiError;
pub use http::HttpApi;
pub use memory::InMemoryApi;
pub use vault::{SessionVault, VaultError};
