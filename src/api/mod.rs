pub mod upload;
pub mod vk;

#[cfg(test)]
pub(crate) mod test_server;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::UploadedAsset;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Абстрактный интерфейс к стене социальной сети
#[async_trait]
pub trait WallApi: Send + Sync {
    /// Загружает фото для стены и возвращает его (owner_id, id)
    async fn upload_photo(&self, path: &Path) -> AppResult<UploadedAsset>;

    /// Загружает видео и возвращает его (owner_id, id)
    async fn upload_video(&self, path: &Path) -> AppResult<UploadedAsset>;

    /// Публикует пост от имени сообщества, возвращает ID поста
    async fn wall_post(
        &self,
        message: &str,
        attachments: &str,
        donut_paid_duration: Option<&str>,
    ) -> AppResult<i64>;
}

/// Фабрика для создания API клиента на основе конфигурации
pub fn create_api_client(config: &Config) -> AppResult<Arc<dyn WallApi>> {
    Ok(Arc::new(vk::VkClient::new(config)?))
}
