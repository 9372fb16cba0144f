use crate::api::WallApi;
use crate::config::Config;
use crate::content::{delete_used_content, CadenceTracker, ContentScanner};
use crate::publisher;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// Итог одного цикла публикации
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    ScanFailed,
    NoMedia,
    PublishFailed,
    Posted {
        post_id: i64,
        donut: bool,
        deleted: usize,
        delete_errors: usize,
    },
}

pub struct Scheduler {
    api: Arc<dyn WallApi>,
    scanner: ContentScanner,
    cadence: CadenceTracker,
    interval: Duration,
}

impl Scheduler {
    pub fn new(config: &Config, api: Arc<dyn WallApi>) -> Self {
        Scheduler {
            api,
            scanner: ContentScanner::new(&config.content_dir, config.items_per_post()),
            cadence: CadenceTracker::new(config.donut_frequency(), config.donut_duration.clone()),
            interval: config.post_interval(),
        }
    }

    /// Публикует сразу при старте, затем с фиксированным интервалом. Не завершается.
    pub async fn run(&self) {
        info!(
            "Starting automatic posting service with {} hour intervals",
            self.interval.as_secs() / 3600
        );
        info!(
            "Donut posts will appear every {} regular posts",
            self.cadence.donut_frequency()
        );
        info!("Monitoring content directory: {}", self.scanner.content_dir().display());

        // Первый tick срабатывает сразу
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let outcome = self.make_post().await;
            info!(
                "Cycle finished: {:?} ({} posts attempted so far)",
                outcome,
                self.posts_made()
            );

            if let Ok(next) = chrono::Duration::from_std(self.interval) {
                info!("Next post scheduled at {}", chrono::Local::now() + next);
            }
        }
    }

    /// Один цикл: сканирование → решение о донате → публикация → удаление файлов
    pub async fn make_post(&self) -> CycleOutcome {
        let selection = match self.scanner.scan().await {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Failed to scan content: {}", e);
                return CycleOutcome::ScanFailed;
            }
        };

        if selection.is_empty() {
            info!("No media content found. Skipping this post cycle.");
            return CycleOutcome::NoMedia;
        }

        // Счётчик увеличивается до публикации: неудачный пост тоже занимает слот
        let decision = self.cadence.next();
        if decision.is_donut {
            info!("Creating a donut post...");
        }

        // TODO: генерировать текст поста; пока публикуется пустое сообщение
        let message = "";

        let post = match publisher::publish(
            self.api.as_ref(),
            message,
            &selection,
            Some(decision.duration.as_str()),
        )
        .await
        {
            Ok(post) => post,
            Err(e) => {
                error!("Failed to post to wall: {}", e);
                return CycleOutcome::PublishFailed;
            }
        };

        info!("Post successful! post_id={}", post.post_id);

        let errors = delete_used_content(&post.included).await;
        for e in &errors {
            warn!("{}", e);
        }

        CycleOutcome::Posted {
            post_id: post.post_id,
            donut: decision.is_donut,
            deleted: post.included.len() - errors.len(),
            delete_errors: errors.len(),
        }
    }

    pub fn posts_made(&self) -> u64 {
        self.cadence.posts_made()
    }
}
