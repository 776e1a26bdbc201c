//! Configuration management.

mod endpoint;
mod xdg;

pub use endpoint::parse_endpoint;
pub use xdg::XdgDirs;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported endpoint `{0}`: expected a ws:// URL")]
    UnsupportedScheme(String),
    #[error("Endpoint `{0}` has no host")]
    MissingHost(String),
}
