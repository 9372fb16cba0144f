use crate::error::{AppError, AppResult};
use crate::models::{MediaFile, MediaKind, Selection};
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct ContentScanner {
    content_dir: PathBuf,
    items_per_post: usize,
}

impl ContentScanner {
    pub fn new(content_dir: impl Into<PathBuf>, items_per_post: usize) -> Self {
        ContentScanner {
            content_dir: content_dir.into(),
            items_per_post,
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Сканирует каталог и выбирает случайные фото и видео для поста
    pub async fn scan(&self) -> AppResult<Selection> {
        let unreadable = |source| AppError::DirectoryUnreadable {
            path: self.content_dir.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.content_dir)
            .await
            .map_err(unreadable)?;

        let mut seen_entries = 0usize;
        let mut photos = Vec::new();
        let mut videos = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
            seen_entries += 1;

            match entry.file_type().await {
                Ok(ft) if ft.is_dir() => continue,
                Ok(_) => {}
                Err(e) => {
                    warn!("Cannot stat {}: {}", entry.path().display(), e);
                    continue;
                }
            }

            let path = self.content_dir.join(entry.file_name());
            match MediaKind::from_path(&path) {
                Some(MediaKind::Photo) => photos.push(MediaFile { path, kind: MediaKind::Photo }),
                Some(MediaKind::Video) => videos.push(MediaFile { path, kind: MediaKind::Video }),
                None => debug!("Skipping unsupported file: {}", path.display()),
            }
        }

        if seen_entries == 0 {
            return Err(AppError::EmptyDirectory(self.content_dir.clone()));
        }

        debug!(
            "Found {} photos and {} videos in {}",
            photos.len(),
            videos.len(),
            self.content_dir.display()
        );

        // Перемешиваем, чтобы не брать всегда одни и те же файлы
        {
            let mut rng = rand::thread_rng();
            photos.shuffle(&mut rng);
            videos.shuffle(&mut rng);
        }

        Ok(select(photos, videos, self.items_per_post))
    }
}

/// Оставляет не более `cap` файлов: сначала фото, остаток мест отдаётся видео
pub fn select(mut photos: Vec<MediaFile>, mut videos: Vec<MediaFile>, cap: usize) -> Selection {
    photos.truncate(cap);
    videos.truncate(cap - photos.len());
    Selection { photos, videos }
}

/// Удаляет опубликованные файлы, возвращает ошибки удаления
pub async fn delete_used_content(files: &[MediaFile]) -> Vec<AppError> {
    let mut errors = Vec::new();

    for file in files {
        if let Err(source) = tokio::fs::remove_file(&file.path).await {
            errors.push(AppError::DeleteFailed {
                path: file.path.clone(),
                source,
            });
        }
    }

    errors
}
