use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod content;
mod error;
mod models;
mod publisher;
mod scheduler;

use config::Config;
use error::AppResult;
use scheduler::Scheduler;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Подхватываем .env, если он есть
    let _ = dotenvy::dotenv();

    // Инициализируем логирование
    init_tracing()?;

    // Парсим конфигурацию из CLI и env
    let config = Config::parse();

    // Без токена и ID владельца работать нельзя
    if let Err(e) = config.validate() {
        error!("Failed to load configuration: {}", e);
        return Err(e);
    }

    info!(
        "Starting vkpost - app {}, owner {}, {} items per post",
        config.app_id(),
        config.owner_id(),
        config.items_per_post()
    );

    let api = api::create_api_client(&config)?;
    let scheduler = Scheduler::new(&config, api);

    // Работает до внешнего сигнала
    scheduler.run().await;

    Ok(())
}

/// Инициализирует систему логирования с использованием tracing
fn init_tracing() -> AppResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .init();

    info!("Tracing initialized");
    Ok(())
}
