use crate::content;
use crate::core::config::ServerConfig;
use crate::core::error::{AppError, Result};
use crate::server::{json_config, routes};
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::{Condition, Logger};
use actix_web::{App, HttpServer};
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// Single actix-web server instance with graceful shutdown.
pub struct ServerInstance {
    config: ServerConfig,
    local_addr: Option<SocketAddr>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_handle: Option<actix_web::dev::ServerHandle>,
}

impl ServerInstance {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            local_addr: None,
            shutdown_tx: None,
            server_handle: None,
        }
    }

    /// Binds and starts the server, returning the bound address. Port 0 in
    /// the config picks a free port.
    pub async fn start(&mut self) -> Result<SocketAddr> {
        // Asset problems surface here instead of on the first request.
        content::init()?;

        let bind_addr = self.config.bind_address();
        let config = self.config.clone();

        log::info!("Starting Actix-Web server on {}", bind_addr);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let server = HttpServer::new(move || {
            let cors = Cors::default()
                .allowed_origin(&config.client_origin)
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
                .supports_credentials();

            App::new()
                .app_data(json_config())
                .wrap(Condition::new(config.debug_logs, Logger::default()))
                .wrap(cors)
                .configure(routes::register)
        })
        .disable_signals()
        .bind(&bind_addr)?;

        let local_addr = server
            .addrs()
            .first()
            .copied()
            .ok_or_else(|| AppError::Validation(format!("No bound address for {}", bind_addr)))?;
        self.local_addr = Some(local_addr);

        let server = server.run();
        let server_handle = server.handle();
        self.server_handle = Some(server_handle.clone());

        tokio::spawn(async move {
            tokio::select! {
                _ = server => {
                    log::info!("Server stopped");
                }
                _ = shutdown_rx => {
                    log::info!("Server shutdown requested");
                    server_handle.stop(true).await;
                }
            }
        });

        log::info!("Server running on http://{}", local_addr);
        log::info!(
            "Supported languages: {}",
            crate::lang::LanguageCode::supported_codes().join(", ")
        );
        log::info!("CORS enabled for {}", self.config.client_origin);

        Ok(local_addr)
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.server_handle.is_some()
    }

    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        } else if let Some(handle) = self.server_handle.take() {
            handle.stop(true).await;
        }
        self.server_handle = None;
        self.local_addr = None;
    }
}
