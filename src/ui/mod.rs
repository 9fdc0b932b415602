pub mod screen;
pub mod terminal;

pub use screen::ScreenManager;
