mod handlers;
mod server;

use std::env;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wolf_scheduler_core::prelude::Scheduler;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wolf_scheduler_server=info,wolf_scheduler_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 课程记录文件
    let catalog_path = env::var("CATALOG_PATH")
        .map_err(|_| anyhow::anyhow!("CATALOG_PATH environment variable is required"))?;

    let mut scheduler = Scheduler::from_record_file(&catalog_path)
        .with_context(|| format!("Failed to load course records from {catalog_path}"))?;

    if let Ok(title) = env::var("SCHEDULE_TITLE") {
        scheduler.set_title(title);
    }

    // 启动服务器
    server::start_server(scheduler).await
}
