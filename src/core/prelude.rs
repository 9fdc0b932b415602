// Core essentials used across every module.
pub use crate::core::config::Config;
pub use crate::core::error::{AppError, Result};
pub use crate::lang::LanguageCode;

pub use std::time::{Duration, Instant};
