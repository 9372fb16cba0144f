use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{UploadedAsset, VkResponse, WallPostResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, error, info};

const USER_AGENT: &str = "vkpost/0.1";
pub const API_VERSION: &str = "5.199";

pub struct VkClient {
    pub(super) http_client: Client,
    api_url: String,
    owner_id: String,
    token: String,
}

impl VkClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = Client::builder().user_agent(USER_AGENT).build()?;

        debug!("VK client for app {} and owner {}", config.app_id(), config.owner_id());

        Ok(VkClient {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            owner_id: config.owner_id().to_string(),
            token: config.token().to_string(),
        })
    }

    /// ID сообщества без знака минус: методы загрузки ждут group_id без знака
    pub(super) fn group_id(&self) -> String {
        self.owner_id.replacen('-', "", 1)
    }

    pub(super) fn token(&self) -> &str {
        &self.token
    }

    /// Вызывает метод VK API и разбирает конверт ответа
    pub(super) async fn call_method<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        debug!("Calling VK method {}", method);

        let response = self
            .http_client
            .get(format!("{}/{}", self.api_url, method))
            .query(params)
            .query(&[("v", API_VERSION)])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!("Request to {} failed: {}", method, e);
                AppError::Transport(e)
            })?;

        let body = response.text().await?;
        let parsed: VkResponse<T> = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse {} response: {}", method, e);
            AppError::from(e)
        })?;

        parsed.into_result(method)
    }

    async fn post_to_wall(
        &self,
        message: &str,
        attachments: &str,
        donut_paid_duration: Option<&str>,
    ) -> AppResult<i64> {
        let mut params = vec![
            ("access_token", self.token.clone()),
            ("owner_id", self.owner_id.clone()),
            ("message", message.to_string()),
            ("attachments", attachments.to_string()),
            ("from_group", "1".to_string()),
        ];

        if let Some(duration) = donut_paid_duration.filter(|d| !d.is_empty()) {
            params.push(("donut_paid_duration", duration.to_string()));
        }

        let result: WallPostResult = self.call_method("wall.post", &params).await?;

        info!("Posted successfully to wall, post ID: {}", result.post_id);
        Ok(result.post_id)
    }
}

#[async_trait]
impl super::WallApi for VkClient {
    async fn upload_photo(&self, path: &Path) -> AppResult<UploadedAsset> {
        self.upload_wall_photo(path).await
    }

    async fn upload_video(&self, path: &Path) -> AppResult<UploadedAsset> {
        self.upload_group_video(path).await
    }

    async fn wall_post(
        &self,
        message: &str,
        attachments: &str,
        donut_paid_duration: Option<&str>,
    ) -> AppResult<i64> {
        self.post_to_wall(message, attachments, donut_paid_duration)
            .await
    }
}
