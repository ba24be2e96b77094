//! REST client for the menu backend.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::model::{Category, CategoryId, CategoryName, Food, FoodId, FoodPatch, NewFood};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Non-2xx reply. The message is the body text, or `HTTP <code>` when the
    /// body was empty.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Encode(String),
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body.to_string()
        };
        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Everything the menu screen needs from the backend. One round trip per call,
/// no retries.
#[async_trait(?Send)]
pub trait MenuApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
    async fn add_category(&self, name: &str) -> Result<Category, ApiError>;
    async fn rename_category(&self, id: CategoryId, name: &str) -> Result<Category, ApiError>;
    async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError>;
    async fn add_food(&self, category: CategoryId, food: &NewFood) -> Result<Food, ApiError>;
    async fn update_food(&self, id: FoodId, patch: &FoodPatch) -> Result<Food, ApiError>;
    async fn delete_food(&self, id: FoodId) -> Result<(), ApiError>;
}

pub mod paths {
    use crate::model::{CategoryId, FoodId};

    pub const LIST_CATEGORIES: &str = "/api/categories/show";
    pub const ADD_CATEGORY: &str = "/api/categories/add";

    pub fn category(id: CategoryId) -> String {
        format!("/api/categories/{}", id)
    }

    pub fn category_foods(id: CategoryId) -> String {
        format!("/api/categories/{}/foods", id)
    }

    pub fn food(id: FoodId) -> String {
        format!("/api/foods/{}", id)
    }
}

/// The category listing is trusted only as far as its shape: anything but a
/// JSON array is read as an empty menu.
pub fn categories_from_body(body: &str) -> Result<Vec<Category>, ApiError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !value.is_array() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: Option<String>) -> Result<T, ApiError> {
    let body = body.ok_or_else(|| ApiError::Decode("empty response body".to_string()))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn send(builder: RequestBuilder) -> Result<Option<String>, ApiError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::handle(resp).await
    }

    async fn send_json<B: Serialize>(
        builder: RequestBuilder,
        body: &B,
    ) -> Result<Option<String>, ApiError> {
        // `json` also sets `Content-Type: application/json`.
        let request = builder
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::handle(resp).await
    }

    async fn handle(resp: Response) -> Result<Option<String>, ApiError> {
        let (ok, status) = (resp.ok(), resp.status());
        let body = if !ok {
            Some(resp.text().await.unwrap_or_default())
        } else if status == NO_CONTENT {
            None
        } else {
            Some(
                resp.text()
                    .await
                    .map_err(|e| ApiError::Decode(e.to_string()))?,
            )
        };
        interpret(ok, status, body)
    }
}

const NO_CONTENT: u16 = 204;

/// Shared reply rules: a failure carries the body text (or `HTTP <code>`),
/// a 204 has no value, anything else hands its body on for decoding.
fn interpret(ok: bool, status: u16, body: Option<String>) -> Result<Option<String>, ApiError> {
    if !ok {
        return Err(ApiError::from_status(status, body.as_deref().unwrap_or("")));
    }
    if status == NO_CONTENT {
        return Ok(None);
    }
    Ok(body)
}

/// A listing with no body at all counts as an empty menu.
fn categories_from_reply(body: Option<String>) -> Result<Vec<Category>, ApiError> {
    match body {
        Some(text) => categories_from_body(&text),
        None => Ok(Vec::new()),
    }
}

#[async_trait(?Send)]
impl MenuApi for ApiClient {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let body = Self::send(Request::get(&self.url(paths::LIST_CATEGORIES))).await?;
        categories_from_reply(body)
    }

    async fn add_category(&self, name: &str) -> Result<Category, ApiError> {
        let payload = CategoryName {
            name: name.to_string(),
        };
        let body =
            Self::send_json(Request::post(&self.url(paths::ADD_CATEGORY)), &payload).await?;
        decode(body)
    }

    async fn rename_category(&self, id: CategoryId, name: &str) -> Result<Category, ApiError> {
        let payload = CategoryName {
            name: name.to_string(),
        };
        let body = Self::send_json(Request::put(&self.url(&paths::category(id))), &payload).await?;
        decode(body)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        Self::send(Request::delete(&self.url(&paths::category(id)))).await?;
        Ok(())
    }

    async fn add_food(&self, category: CategoryId, food: &NewFood) -> Result<Food, ApiError> {
        let url = self.url(&paths::category_foods(category));
        let body = Self::send_json(Request::post(&url), food).await?;
        decode(body)
    }

    async fn update_food(&self, id: FoodId, patch: &FoodPatch) -> Result<Food, ApiError> {
        let body = Self::send_json(Request::put(&self.url(&paths::food(id))), patch).await?;
        decode(body)
    }

    async fn delete_food(&self, id: FoodId) -> Result<(), ApiError> {
        Self::send(Request::delete(&self.url(&paths::food(id)))).await?;
        Ok(())
    }
}
