use anyhow::Context;
use clap::Parser;
use data_validator::app::server::run_server;
use data_validator::utils::{logger, validation::Validate};
use data_validator::{build_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    // 設定檔需在初始化日誌前套用，才能決定日誌格式
    let config = match config.load_file_overrides() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.debug, config.json_logs);

    tracing::info!("Starting data-validator");
    if config.debug {
        tracing::debug!("Server config: {:?}", config);
    }

    // 驗證配置，缺少金鑰直接結束
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let state = AppState::from_config(&config).context("failed to build upstream client")?;
    tracing::info!(
        max_concurrency = config.max_concurrency,
        timeout_seconds = config.timeout_seconds,
        model = %config.model,
        price = ?config.response_price(),
        "Upstream session ready"
    );

    let router = build_router(state);
    run_server(router, &config.bind_addr())
        .await
        .with_context(|| format!("server on {} failed", config.bind_addr()))?;

    tracing::info!("🛑 Server shut down.");
    Ok(())
}
