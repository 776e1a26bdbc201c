//! Service endpoint parsing.

use super::ConfigError;

/// Validate a service endpoint given on the command line.
///
/// Only plain `ws://` URLs with a host are accepted.
pub fn parse_endpoint(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let rest = trimmed
        .strip_prefix("ws://")
        .ok_or_else(|| ConfigError::UnsupportedScheme(trimmed.to_string()))?;

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() {
        return Err(ConfigError::MissingHost(trimmed.to_string()));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DEFAULT_ENDPOINT;

    #[test]
    fn test_default_endpoint_is_valid() {
        assert_eq!(parse_endpoint(DEFAULT_ENDPOINT).unwrap(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            parse_endpoint("  ws://10.0.0.5:9000/agent ").unwrap(),
            "ws://10.0.0.5:9000/agent"
        );
    }

    #[test]
    fn test_rejects_other_schemes() {
        for raw in ["http://localhost:8000/ws", "wss://example.com/ws", "localhost:8000"] {
            assert!(
                matches!(parse_endpoint(raw), Err(ConfigError::UnsupportedScheme(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_missing_host() {
        assert!(matches!(
            parse_endpoint("ws:///ws"),
            Err(ConfigError::MissingHost(_))
        ));
        assert!(matches!(
            parse_endpoint("ws://"),
            Err(ConfigError::MissingHost(_))
        ));
    }
}
