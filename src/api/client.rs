//! HTTP client for the seller back-office API
//!
//! JSON over HTTP with reqwest. Failed responses are turned into
//! [`ApiError::Server`] carrying the server's `error` message when present.

use super::error::ApiError;
use super::traits::ApiClientTrait;
use crate::config::ConsoleConfig;
use crate::state::onboarding::OrganizationPayload;
use crate::state::{ReturnOrderPage, ReturnStateUpdate};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const ORGANIZATIONS_PATH: &str = "/api/v1/organizations";
const RETURN_REQUESTS_PATH: &str = "/api/v1/orders/return/request";

/// Client for the back-office REST API
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client from the console configuration
    pub fn new(config: &ConsoleConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url(),
            token: config.auth_token(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let request = self.authorize(self.http.post(self.url(path)).json(body));
        let response = request.send().await?;
        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.http.get(self.url(path)).query(query));
        let response = check_status(request.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pass through 2xx responses, turn anything else into a server error
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status.as_u16(), &body))
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn return_item_path(order_id: &str) -> String {
    format!("/api/v1/orders/{order_id}/item/return")
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn create_organization(&self, payload: &OrganizationPayload) -> Result<(), ApiError> {
        self.post_json(ORGANIZATIONS_PATH, payload).await?;
        Ok(())
    }

    async fn list_return_orders(
        &self,
        page: usize,
        rows_per_page: usize,
    ) -> Result<ReturnOrderPage, ApiError> {
        let query = [
            ("limit", rows_per_page.to_string()),
            ("offset", page.to_string()),
        ];
        self.get_json(RETURN_REQUESTS_PATH, &query).await
    }

    async fn update_return_state(
        &self,
        order_id: &str,
        update: &ReturnStateUpdate,
    ) -> Result<(), ApiError> {
        self.post_json(&return_item_path(order_id), update).await?;
        Ok(())
    }
}
