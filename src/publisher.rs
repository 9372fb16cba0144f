use crate::api::WallApi;
use crate::error::AppResult;
use crate::models::{MediaFile, MediaKind, PublishedPost, Selection, UploadedAsset};
use tracing::{info, warn};

/// Последовательно загружает выбранные файлы: сначала фото, затем видео.
/// Ошибка загрузки одного файла логируется, файл пропускается.
pub async fn upload_all(
    api: &dyn WallApi,
    selection: &Selection,
) -> Vec<(MediaFile, UploadedAsset)> {
    let mut uploaded = Vec::with_capacity(selection.len());

    for file in selection.photos.iter().chain(&selection.videos) {
        info!("Uploading {}: {}", file.kind, file.path.display());

        let result = match file.kind {
            MediaKind::Photo => api.upload_photo(&file.path).await,
            MediaKind::Video => api.upload_video(&file.path).await,
        };

        match result {
            Ok(asset) => uploaded.push((file.clone(), asset)),
            Err(e) => warn!("Failed to upload {} {}: {}", file.kind, file.path.display(), e),
        }
    }

    uploaded
}

pub fn compose_attachments<'a>(assets: impl IntoIterator<Item = &'a UploadedAsset>) -> String {
    assets
        .into_iter()
        .map(UploadedAsset::attachment_token)
        .collect::<Vec<_>>()
        .join(",")
}

/// Загружает медиа и публикует пост на стене
pub async fn publish(
    api: &dyn WallApi,
    message: &str,
    selection: &Selection,
    donut_paid_duration: Option<&str>,
) -> AppResult<PublishedPost> {
    let uploaded = upload_all(api, selection).await;
    let attachments = compose_attachments(uploaded.iter().map(|(_, asset)| asset));

    info!("Posting to wall with attachments: {}", attachments);
    let post_id = api
        .wall_post(message, &attachments, donut_paid_duration.filter(|d| !d.is_empty()))
        .await?;

    Ok(PublishedPost {
        post_id,
        attachments,
        included: uploaded.into_iter().map(|(file, _)| file).collect(),
    })
}
