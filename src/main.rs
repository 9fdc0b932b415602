use lingo_sync::core::config::Config;
use lingo_sync::core::error::Result;
use lingo_sync::server::ServerInstance;
use lingo_sync::ui::terminal::install_panic_hook;

#[tokio::main]
async fn main() -> Result<()> {
    let mode = std::env::args().nth(1).unwrap_or_default();
    let config = Config::load().await?;

    match mode.as_str() {
        "serve" => {
            init_logger(&config, env_logger::Target::Stderr)?;
            serve(config).await
        }
        "client" => {
            init_logger(&config, log_file_target(&config)?)?;
            install_panic_hook();
            lingo_sync::run_client(config).await
        }
        "" => {
            // The TUI owns the terminal, so logs go to a file.
            init_logger(&config, log_file_target(&config)?)?;
            install_panic_hook();
            lingo_sync::run(config).await
        }
        other => {
            eprintln!("Unknown mode: {}", other);
            eprintln!("Usage: lingo-sync [serve|client]");
            std::process::exit(2);
        }
    }
}

/// Headless backend; stops on Ctrl-C.
async fn serve(config: Config) -> Result<()> {
    let mut instance = ServerInstance::new(config.server.clone());
    instance.start().await?;

    tokio::signal::ctrl_c().await?;
    log::info!("Ctrl-C received, shutting down");
    instance.stop().await;
    Ok(())
}

fn init_logger(config: &Config, target: env_logger::Target) -> Result<()> {
    env_logger::Builder::new()
        .parse_filters(&config.general.log_level)
        .target(target)
        .try_init()
        .map_err(|e| lingo_sync::AppError::Config(format!("Logger init failed: {}", e)))?;
    Ok(())
}

fn log_file_target(config: &Config) -> Result<env_logger::Target> {
    let path = config.log_file_path();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    Ok(env_logger::Target::Pipe(Box::new(file)))
}
