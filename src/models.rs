use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Video,
}

/// Поддерживаемые расширения файлов и тип медиа для каждого из них
pub const SUPPORTED_EXTENSIONS: &[(&str, MediaKind)] = &[
    // Изображения
    ("jpg", MediaKind::Photo),
    ("jpeg", MediaKind::Photo),
    ("png", MediaKind::Photo),
    ("gif", MediaKind::Photo),
    // Видео
    ("mp4", MediaKind::Video),
    ("mov", MediaKind::Video),
    ("avi", MediaKind::Video),
];

impl MediaKind {
    /// Определяет тип медиа по расширению файла (без учёта регистра)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        SUPPORTED_EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, kind)| *kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub kind: MediaKind,
}

/// Результат сканирования каталога: фото и видео для одного поста
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub photos: Vec<MediaFile>,
    pub videos: Vec<MediaFile>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty() && self.videos.is_empty()
    }

    pub fn len(&self) -> usize {
        self.photos.len() + self.videos.len()
    }
}

/// Загруженный в VK медиафайл
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadedAsset {
    pub owner_id: i64,
    pub id: i64,
    pub kind: MediaKind,
}

impl UploadedAsset {
    pub fn attachment_token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for UploadedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}_{}", self.kind, self.owner_id, self.id)
    }
}

#[derive(Debug, Clone)]
pub struct PublishedPost {
    pub post_id: i64,
    pub attachments: String,
    pub included: Vec<MediaFile>,
}

// Ответы VK API

#[derive(Debug, Clone, Deserialize)]
pub struct VkApiError {
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: String,
}

/// Конверт ответа метода VK API: либо `response`, либо `error`
#[derive(Debug, Clone, Deserialize)]
pub struct VkResponse<T> {
    pub response: Option<T>,
    pub error: Option<VkApiError>,
}

impl<T> VkResponse<T> {
    pub fn into_result(self, method: &str) -> AppResult<T> {
        if let Some(err) = self.error {
            if err.error_code != 0 {
                return Err(AppError::RemoteApi {
                    code: err.error_code,
                    message: err.error_msg,
                });
            }
        }

        self.response
            .ok_or_else(|| AppError::MalformedResponse(format!("{} returned no response", method)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WallUploadServer {
    pub upload_url: String,
    #[serde(default)]
    pub album_id: i64,
    #[serde(default)]
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoUploadResult {
    pub server: i64,
    pub photo: String,
    pub hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedPhoto {
    pub id: i64,
    pub owner_id: i64,
    #[serde(default)]
    pub album_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoSaveResult {
    pub upload_url: String,
    #[serde(default)]
    pub owner_id: i64,
    #[serde(default)]
    pub video_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoUploadResult {
    #[serde(default)]
    pub owner_id: i64,
    #[serde(default)]
    pub video_id: i64,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WallPostResult {
    pub post_id: i64,
}
