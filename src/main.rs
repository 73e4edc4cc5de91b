use std::io;

use anyhow::Context;
use engine::{engine::JanggiEngine, GameConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

// 调试时可以用 JANGGI_FREE_MOVE=1 放开走棋方限制
fn free_movement_from_env() -> bool {
    std::env::var("JANGGI_FREE_MOVE")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

fn main() -> anyhow::Result<()> {
    // 日志写到 stderr，stdout 只留给协议应答
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = GameConfig {
        free_movement: free_movement_from_env(),
    };
    info!(?config, "janggi engine started");

    let stdin = io::stdin();
    let mut engine = JanggiEngine::new(config);
    engine
        .start(stdin.lock(), io::stdout())
        .context("protocol loop failed")?;
    Ok(())
}
