use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 未設定時使用的過濾字串
pub fn default_filter(level: &str) -> String {
    format!("sixty_days={},tower_http={}", level, level)
}

pub fn init_cli_logger(verbose: bool) {
    init_cli_logger_with_level(if verbose { "debug" } else { "info" });
}

/// 精簡格式輸出，`level` 來自 `[logging] level` 或 `--verbose`
pub fn init_cli_logger_with_level(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 伺服器模式的 JSON 日誌，`level` 來自 `[logging] level`
pub fn init_json_logger(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
