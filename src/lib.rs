#[macro_export]
macro_rules! impl_default {
    ($type:ty, $body:expr) => {
        impl Default for $type {
            fn default() -> Self {
                $body
            }
        }
    };
}

// Module definitions
pub mod client;
pub mod content;
pub mod core;
pub mod lang;
pub mod server;
pub mod ui;

// Essential re-exports
pub use client::LanguageService;
pub use content::{ContentRecord, ContentStore};
pub use core::config::Config;
pub use core::error::{AppError, Result};
pub use lang::LanguageCode;
pub use server::ServerInstance;
pub use ui::ScreenManager;

/// Starts the backend and runs the terminal client against it.
pub async fn run(config: Config) -> Result<()> {
    let mut instance = ServerInstance::new(config.server.clone());
    let addr = instance.start().await?;

    let service = LanguageService::new(&format!("http://{}", addr))?;
    let mut screen = ScreenManager::new(service)?;
    let result = screen.run().await;

    instance.stop().await;
    result
}

/// Runs the terminal client against an already-running backend.
pub async fn run_client(config: Config) -> Result<()> {
    let service = LanguageService::new(&config.client.api_base_url)?;
    let mut screen = ScreenManager::new(service)?;
    screen.run().await
}
