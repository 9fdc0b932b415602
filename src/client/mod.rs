pub mod service;

pub use service::LanguageService;
