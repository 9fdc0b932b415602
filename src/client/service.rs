use crate::core::error::{AppError, Result};
use crate::lang::LanguageCode;
use crate::server::types::{
    ContentResponse, CurrentLanguageResponse, InvalidLanguageResponse, SetLanguageRequest,
    SetLanguageResponse,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tokio::sync::watch;

/// Monotonic token so only the latest in-flight request may apply its
/// response; a superseded response is discarded instead of overwriting
/// newer state.
#[derive(Debug, Default)]
pub struct RequestSequence(AtomicU64);

impl RequestSequence {
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}

/// Client-side mirror of the server's language state.
///
/// Current language and loading flag live behind `watch` channels:
/// continuously readable, one notification per actual change. The reqwest
/// cookie jar carries the preference cookie across calls. Language updates
/// are applied only after server confirmation; a failed change leaves prior
/// state intact.
pub struct LanguageService {
    http: reqwest::Client,
    api_base: String,
    language_tx: watch::Sender<LanguageCode>,
    language_rx: watch::Receiver<LanguageCode>,
    loading_tx: watch::Sender<bool>,
    loading_rx: watch::Receiver<bool>,
    supported: RwLock<Vec<LanguageCode>>,
    change_seq: RequestSequence,
}

impl LanguageService {
    pub fn new(api_base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        let (language_tx, language_rx) = watch::channel(LanguageCode::DEFAULT);
        let (loading_tx, loading_rx) = watch::channel(false);

        Ok(Self {
            http,
            api_base: api_base_url.trim_end_matches('/').to_string(),
            language_tx,
            language_rx,
            loading_tx,
            loading_rx,
            supported: RwLock::new(LanguageCode::ALL.to_vec()),
            change_seq: RequestSequence::default(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.api_base, path)
    }

    fn set_language_state(&self, lang: LanguageCode) {
        self.language_tx.send_if_modified(|current| {
            if *current != lang {
                *current = lang;
                true
            } else {
                false
            }
        });
    }

    fn set_loading(&self, loading: bool) {
        self.loading_tx.send_if_modified(|current| {
            if *current != loading {
                *current = loading;
                true
            } else {
                false
            }
        });
    }

    /// Seeds current and supported languages from the server. A failure
    /// keeps the defaults and is reported to the caller.
    pub async fn init(&self) -> Result<()> {
        self.set_loading(true);
        let result = self.fetch_current_language().await;
        self.set_loading(false);

        let response = result?;
        if !response.supported.is_empty() {
            if let Ok(mut supported) = self.supported.write() {
                *supported = response.supported;
            }
        }
        self.set_language_state(response.language);
        Ok(())
    }

    async fn fetch_current_language(&self) -> Result<CurrentLanguageResponse> {
        let response = self
            .http
            .get(self.url("current-language"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Changes the language on the server, applying it locally only after
    /// confirmation. A response that is no longer the latest is discarded.
    pub async fn change_language(&self, code: &str) -> Result<LanguageCode> {
        let lang = LanguageCode::parse(code)?;
        let supported = self
            .supported
            .read()
            .map(|s| s.contains(&lang))
            .unwrap_or(false);
        if !supported {
            return Err(AppError::Validation(format!(
                "Unsupported language: {}",
                code
            )));
        }

        let token = self.change_seq.begin();
        self.set_loading(true);

        let result = self.post_language(lang).await;

        if !self.change_seq.is_current(token) {
            log::debug!("Discarding stale language-change response for {}", lang);
            return result.map(|r| r.language);
        }

        self.set_loading(false);
        let confirmed = result?;
        self.set_language_state(confirmed.language);
        Ok(confirmed.language)
    }

    async fn post_language(&self, lang: LanguageCode) -> Result<SetLanguageResponse> {
        let response = self
            .http
            .post(self.url("language"))
            .json(&SetLanguageRequest {
                language: lang.as_str().to_string(),
            })
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(response.json().await?);
        }

        let status = response.status();
        let message = match response.json::<InvalidLanguageResponse>().await {
            Ok(body) => format!(
                "{} (supported: {})",
                body.error,
                body.supported
                    .iter()
                    .map(|l| l.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Err(_) => format!("Server returned {}", status),
        };
        Err(AppError::Http(message))
    }

    /// Fetches the localized content for the cookie's current language.
    pub async fn fetch_content(&self) -> Result<ContentResponse> {
        let response = self
            .http
            .get(self.url("content"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub fn current_language(&self) -> LanguageCode {
        *self.language_rx.borrow()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading_rx.borrow()
    }

    pub fn supported_languages(&self) -> Vec<LanguageCode> {
        self.supported
            .read()
            .map(|s| s.clone())
            .unwrap_or_else(|_| LanguageCode::ALL.to_vec())
    }

    pub fn subscribe_language(&self) -> watch::Receiver<LanguageCode> {
        self.language_tx.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    /// Fixed display-name dictionary for the selector.
    pub fn language_names() -> [(LanguageCode, &'static str); 6] {
        [
            (LanguageCode::It, LanguageCode::It.display_name()),
            (LanguageCode::En, LanguageCode::En.display_name()),
            (LanguageCode::De, LanguageCode::De.display_name()),
            (LanguageCode::Fr, LanguageCode::Fr.display_name()),
            (LanguageCode::Es, LanguageCode::Es.display_name()),
            (LanguageCode::Pt, LanguageCode::Pt.display_name()),
        ]
    }
}
