pub mod config;
pub mod error;
pub mod snap;
pub mod theme;
pub mod article;
pub mod gallery;

pub use config::{AppConfig, SnapConfig};
pub use error::{Error, Result};
pub use snap::{Controller, Phase, SnapHost};
pub use theme::ThemeSideEffect;
