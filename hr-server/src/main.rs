use hr_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenv::dotenv();

    let config = Config::from_env()?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logger(&config.log_level, config.log_dir.as_deref())?;
    if config.generated_secret {
        tracing::warn!("JWT_SECRET not set, generated a temporary development key");
    }

    print_banner();
    tracing::info!(environment = %config.environment, "HR server starting...");

    let state = ServerState::in_memory(&config);
    let server = Server::new(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
