use crate::content;
use crate::core::constants::{LANG_COOKIE, LANG_COOKIE_MAX_AGE_DAYS, SERVICE_NAME, VERSION};
use crate::core::error::AppError;
use crate::lang::LanguageCode;
use crate::server::types::{
    ContentResponse, CurrentLanguageResponse, InvalidLanguageResponse, SetLanguageRequest,
    SetLanguageResponse,
};
use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

/// Registers the API routes; shared between the running server and the
/// endpoint tests.
pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/current-language",
        web::get().to(current_language_handler),
    )
    .route("/api/language", web::post().to(set_language_handler))
    .route("/api/content", web::get().to(content_handler))
    .route("/api/health", web::get().to(health_handler));
}

fn cookie_language(req: &HttpRequest) -> LanguageCode {
    let value = req.cookie(LANG_COOKIE);
    LanguageCode::parse_or_default(value.as_ref().map(|c| c.value()))
}

/// Preference cookie: readable by the client, lax same-site, root path, one
/// year lifetime.
fn build_lang_cookie(lang: LanguageCode) -> Cookie<'static> {
    Cookie::build(LANG_COOKIE, lang.as_str())
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(LANG_COOKIE_MAX_AGE_DAYS))
        .finish()
}

pub async fn current_language_handler(req: HttpRequest) -> ActixResult<HttpResponse> {
    let language = cookie_language(&req);
    log::info!("Current language requested: {}", language);

    Ok(HttpResponse::Ok().json(CurrentLanguageResponse {
        language,
        supported: LanguageCode::ALL.to_vec(),
        default_language: LanguageCode::DEFAULT,
    }))
}

pub async fn set_language_handler(
    body: web::Json<SetLanguageRequest>,
) -> ActixResult<HttpResponse> {
    let language = match LanguageCode::parse(&body.language) {
        Ok(lang) => lang,
        Err(_) => {
            log::warn!("Rejected unsupported language: {}", body.language);
            return Ok(HttpResponse::BadRequest().json(InvalidLanguageResponse {
                error: "Invalid language".into(),
                supported: LanguageCode::ALL.to_vec(),
            }));
        }
    };

    log::info!("Language set to: {}", language);

    Ok(HttpResponse::Ok()
        .cookie(build_lang_cookie(language))
        .json(SetLanguageResponse {
            success: true,
            language,
            message: format!("Language preference set to {}", language),
        }))
}

pub async fn content_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let language = cookie_language(&req);
    log::info!("Content requested for language: {}", language);

    // Missing entries fall back to the default-language record of the same
    // loaded store.
    let record = content::store()?.get(language);

    Ok(HttpResponse::Ok().json(ContentResponse {
        language,
        content: record.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn health_handler() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
