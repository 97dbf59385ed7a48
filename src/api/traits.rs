//! Trait abstraction for the API client to enable mocking in tests

use super::error::ApiError;
use crate::state::onboarding::OrganizationPayload;
use crate::state::{ReturnOrderPage, ReturnStateUpdate};
use async_trait::async_trait;

/// Back-office API operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    /// Create an organization (provider) together with its first user
    async fn create_organization(&self, payload: &OrganizationPayload) -> Result<(), ApiError>;

    /// Fetch one page of return requests
    async fn list_return_orders(
        &self,
        page: usize,
        rows_per_page: usize,
    ) -> Result<ReturnOrderPage, ApiError>;

    /// Record a decision on a returned order item
    async fn update_return_state(
        &self,
        order_id: &str,
        update: &ReturnStateUpdate,
    ) -> Result<(), ApiError>;
}
