pub mod instance;
pub mod routes;
pub mod types;

pub use instance::ServerInstance;

use crate::core::error::AppError;
use crate::lang::LanguageCode;
use crate::server::types::InvalidLanguageResponse;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde_json::json;

/// Catch-all for faults that escape a handler: a generic 500 with a message,
/// never a crashed process.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("Unhandled server fault: {}", self);
        HttpResponse::InternalServerError().json(json!({
            "error": "Something went wrong!",
            "message": self.to_string(),
        }))
    }
}

/// Malformed JSON bodies get the same 400 shape as an unsupported code.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(InvalidLanguageResponse {
            error: "Invalid language".into(),
            supported: LanguageCode::ALL.to_vec(),
        });
        actix_web::error::InternalError::from_response(err, response).into()
    })
}
