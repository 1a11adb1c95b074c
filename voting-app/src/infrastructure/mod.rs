pub mod memory;

#[cfg(feature = "ssr")]
pub mod security;

#[cfg(feature = "ssr")]
pub mod db;

#[cfg(feature = "ssr")]
pub mod auth;
