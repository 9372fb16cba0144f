// api/upload.rs - трёхшаговые протоколы загрузки фото и видео в VK

use super::vk::VkClient;
use crate::error::{AppError, AppResult};
use crate::models::{
    MediaKind, PhotoUploadResult, SavedPhoto, UploadedAsset, VideoSaveResult, VideoUploadResult,
    WallUploadServer,
};
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use std::path::Path;
use tokio_util::io::ReaderStream;
use tracing::{debug, error, info};

impl VkClient {
    /// Загружает фото на стену: сервер загрузки → файл → saveWallPhoto
    pub async fn upload_wall_photo(&self, path: &Path) -> AppResult<UploadedAsset> {
        // Шаг 1: получаем сервер загрузки
        let server = self.get_wall_upload_server().await?;
        debug!(
            "Got upload URL for photo (album {}, user {}): {}",
            server.album_id, server.user_id, server.upload_url
        );

        // Шаг 2: отправляем файл
        let body = self.upload_file(&server.upload_url, "photo", path).await?;
        let uploaded: PhotoUploadResult = serde_json::from_str(&body)?;
        if uploaded.photo.is_empty() || uploaded.photo == "[]" {
            return Err(AppError::UploadRejected(format!(
                "no photo data returned for {}",
                path.display()
            )));
        }
        debug!("Uploaded photo to server: server={}", uploaded.server);

        // Шаг 3: сохраняем фото на стене
        let saved = self.save_wall_photo(&uploaded).await?;
        info!(
            "Saved wall photo: owner={}, id={}, album={}",
            saved.owner_id, saved.id, saved.album_id
        );

        Ok(UploadedAsset {
            owner_id: saved.owner_id,
            id: saved.id,
            kind: MediaKind::Photo,
        })
    }

    /// Загружает видео в сообщество: video.save → файл (ответ уже содержит ID)
    pub async fn upload_group_video(&self, path: &Path) -> AppResult<UploadedAsset> {
        let intent = self.video_save().await?;
        debug!(
            "Got video upload URL (owner {}, video {}): {}",
            intent.owner_id, intent.video_id, intent.upload_url
        );

        let body = self.upload_file(&intent.upload_url, "video_file", path).await?;
        let uploaded: VideoUploadResult = serde_json::from_str(&body)?;

        if let Some(err) = uploaded.error.filter(|e| !e.is_empty()) {
            error!("Video upload rejected for {}: {}", path.display(), err);
            return Err(AppError::UploadRejected(err));
        }

        info!(
            "Uploaded video to server: owner={}, id={}, size={}",
            uploaded.owner_id, uploaded.video_id, uploaded.size
        );

        Ok(UploadedAsset {
            owner_id: uploaded.owner_id,
            id: uploaded.video_id,
            kind: MediaKind::Video,
        })
    }

    async fn get_wall_upload_server(&self) -> AppResult<WallUploadServer> {
        let params = [
            ("group_id", self.group_id()),
            ("access_token", self.token().to_string()),
        ];
        self.call_method("photos.getWallUploadServer", &params).await
    }

    async fn save_wall_photo(&self, uploaded: &PhotoUploadResult) -> AppResult<SavedPhoto> {
        let params = [
            ("group_id", self.group_id()),
            ("access_token", self.token().to_string()),
            ("photo", uploaded.photo.clone()),
            ("server", uploaded.server.to_string()),
            ("hash", uploaded.hash.clone()),
        ];

        let saved: Vec<SavedPhoto> = self.call_method("photos.saveWallPhoto", &params).await?;
        saved
            .into_iter()
            .next()
            .ok_or(AppError::EmptyResult("photos.saveWallPhoto"))
    }

    async fn video_save(&self) -> AppResult<VideoSaveResult> {
        let params = [
            ("group_id", self.group_id()),
            ("access_token", self.token().to_string()),
        ];
        self.call_method("video.save", &params).await
    }

    /// Отправляет файл как multipart/form-data, возвращает тело ответа
    async fn upload_file(
        &self,
        upload_url: &str,
        field: &'static str,
        path: &Path,
    ) -> AppResult<String> {
        let file = tokio::fs::File::open(path).await?;
        let size = file.metadata().await?.len();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| field.to_string());

        debug!("Uploading {} ({} bytes)", filename, size);

        // Файл читается потоком, целиком в память не загружается
        let body = Body::wrap_stream(ReaderStream::new(file));
        let form = Form::new().part(field, Part::stream_with_length(body, size).file_name(filename));

        let response = self
            .http_client
            .post(upload_url)
            .multipart(form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!("Failed to upload {}: {}", path.display(), e);
                AppError::Transport(e)
            })?;

        Ok(response.text().await?)
    }
}
