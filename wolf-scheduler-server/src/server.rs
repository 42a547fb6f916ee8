use std::{env, net::SocketAddr};

use anyhow::Result;
use tokio::net::TcpListener;
use wolf_scheduler_core::prelude::Scheduler;

use crate::handlers::create_app;

pub async fn start_server(scheduler: Scheduler) -> Result<()> {
    let app = create_app(scheduler);

    // 从环境变量获取端口，默认为3000
    let port = env::var("PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(3000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("Wolf Scheduler Server starting on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
