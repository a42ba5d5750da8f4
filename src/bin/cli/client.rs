use lostfound::dto::{CreateLostItemDto, LostItemQueryDto, UpdateLostItemDto};
use lostfound::models::LostItem;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Error type for CLI client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server returned an error status with a message body
    #[error("Server error ({}): {message}", status.as_u16())]
    Server { status: StatusCode, message: String },
    /// Network/connection/request error
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Turns error responses into `ClientError::Server`, keeping the server's message
trait ResponseExt {
    async fn check(self) -> Result<reqwest::Response, ClientError>;
}

impl ResponseExt for reqwest::Response {
    async fn check(self) -> Result<reqwest::Response, ClientError> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }
        let message = match self.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => format!("HTTP {}", status),
        };
        Err(ClientError::Server { status, message })
    }
}

/// HTTP client for the lostfound server
pub struct LostFoundClient {
    /// Base URL of the server, e.g. "http://localhost:3000"
    base_url: String,
    client: Client,
}

impl LostFoundClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/lost_items/{}", self.base_url, id)
    }

    /// Lists lost items matching `query`
    pub async fn list_lost_items(&self, query: &LostItemQueryDto) -> Result<Vec<LostItem>, ClientError> {
        let url = format!("{}/lost_items", self.base_url);
        let response = self.client.get(&url).query(query).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Registers a new lost item
    pub async fn create_lost_item(&self, dto: &CreateLostItemDto) -> Result<LostItem, ClientError> {
        let url = format!("{}/lost_items", self.base_url);
        let response = self.client.post(&url).json(dto).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Fetches a lost item; `None` when the server has no item with that ID
    pub async fn get_lost_item(&self, id: i64) -> Result<Option<LostItem>, ClientError> {
        let response = self.client.get(self.item_url(id)).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Applies a partial update to a lost item
    pub async fn update_lost_item(&self, id: i64, dto: &UpdateLostItemDto) -> Result<LostItem, ClientError> {
        let response = self.client.patch(self.item_url(id)).json(dto).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Deletes a lost item
    pub async fn delete_lost_item(&self, id: i64) -> Result<(), ClientError> {
        self.client.delete(self.item_url(id)).send().await?.check().await?;
        Ok(())
    }
}
