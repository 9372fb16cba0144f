use crate::error::{AppError, AppResult};
use clap::Parser;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "https://api.vk.com/method";

const DEFAULT_DONUT_FREQUENCY: u32 = 5;
const DEFAULT_POST_INTERVAL_HOURS: u32 = 3;
const DEFAULT_CONTENT_PER_POST: u32 = 5;

#[derive(Parser, Debug, Clone)]
#[command(name = "vkpost")]
#[command(author = "Dabe Vlohn")]
#[command(version = "0.1.0")]
#[command(about = "Scheduled VK wall auto-poster")]
pub struct Config {
    /// Токен доступа к VK API
    /// env: VK_ACCOUNT_TOKEN (ОБЯЗАТЕЛЕН)
    #[arg(long, env = "VK_ACCOUNT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// ID приложения VK
    /// env: appID (ОБЯЗАТЕЛЕН)
    #[arg(long, env = "appID")]
    pub app_id: Option<String>,

    /// ID владельца стены (для сообщества со знаком минус, например -12345)
    /// env: ownerID (ОБЯЗАТЕЛЕН)
    #[arg(long, env = "ownerID", allow_hyphen_values = true)]
    pub owner_id: Option<String>,

    /// Каталог с контентом для публикации
    /// env: CONTENT_DIR
    #[arg(long, env = "CONTENT_DIR", default_value = "./content")]
    pub content_dir: PathBuf,

    /// Каждый N-й пост публикуется как донатный (по умолчанию 5)
    /// env: DONUT_FREQUENCY
    #[arg(long, env = "DONUT_FREQUENCY", allow_hyphen_values = true)]
    pub donut_frequency: Option<String>,

    /// Интервал между постами в часах (по умолчанию 3)
    /// env: POST_INTERVAL_HOURS
    #[arg(long, env = "POST_INTERVAL_HOURS", allow_hyphen_values = true)]
    pub post_interval_hours: Option<String>,

    /// Длительность донатного поста в днях (-1 = бессрочно)
    /// env: DONUT_DURATION
    #[arg(long, env = "DONUT_DURATION", default_value = "-1", allow_hyphen_values = true)]
    pub donut_duration: String,

    /// Максимум медиафайлов в одном посте (по умолчанию 5)
    /// env: CONTENT_PER_POST
    #[arg(long, env = "CONTENT_PER_POST", allow_hyphen_values = true)]
    pub content_per_post: Option<String>,

    /// Базовый URL методов VK API
    /// env: VK_API_URL
    #[arg(long, env = "VK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

impl Config {
    /// Валидирует конфигурацию при запуске
    pub fn validate(&self) -> AppResult<()> {
        require("VK_ACCOUNT_TOKEN", &self.token)?;
        require("appID", &self.app_id)?;
        let owner_id = require("ownerID", &self.owner_id)?;

        if owner_id.trim().parse::<i64>().is_err() {
            return Err(AppError::Config(format!(
                "ownerID must be an integer, got {:?}",
                owner_id
            )));
        }

        Ok(())
    }

    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }

    pub fn app_id(&self) -> &str {
        self.app_id.as_deref().unwrap_or_default()
    }

    pub fn owner_id(&self) -> &str {
        self.owner_id.as_deref().map(str::trim).unwrap_or_default()
    }

    pub fn donut_frequency(&self) -> NonZeroU32 {
        positive_or_default("DONUT_FREQUENCY", &self.donut_frequency, DEFAULT_DONUT_FREQUENCY)
    }

    pub fn post_interval(&self) -> Duration {
        let hours = positive_or_default(
            "POST_INTERVAL_HOURS",
            &self.post_interval_hours,
            DEFAULT_POST_INTERVAL_HOURS,
        );
        Duration::from_secs(u64::from(hours.get()) * 3600)
    }

    pub fn items_per_post(&self) -> usize {
        positive_or_default("CONTENT_PER_POST", &self.content_per_post, DEFAULT_CONTENT_PER_POST)
            .get() as usize
    }
}

/// Числовые настройки не роняют процесс: неверное или неположительное значение
/// заменяется значением по умолчанию
fn positive_or_default(name: &str, value: &Option<String>, default: u32) -> NonZeroU32 {
    let default = NonZeroU32::new(default).unwrap_or(NonZeroU32::MIN);

    let Some(raw) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };

    match raw.parse::<u32>().ok().and_then(NonZeroU32::new) {
        Some(parsed) => parsed,
        None => {
            warn!("Invalid {} value {:?}, using default {}", name, raw, default);
            default
        }
    }
}

fn require<'a>(name: &str, value: &'a Option<String>) -> AppResult<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::ConfigurationMissing(format!(
            "{} is not set",
            name
        ))),
    }
}
