//! Back-office API client module

mod client;
mod error;
mod traits;

pub use client::ApiClient;
pub use error::ApiError;
pub use traits::ApiClientTrait;

#[cfg(test)]
pub use traits::MockApiClientTrait;
