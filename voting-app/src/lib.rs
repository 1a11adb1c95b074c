pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(feature = "ssr")]
mod app_context;

#[cfg(feature = "ssr")]
pub use app_context::{AppConfig, AppContext, OAuthConfig};
