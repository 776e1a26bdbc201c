//! XDG Base Directory support.

use std::path::PathBuf;

const APP_DIR: &str = "trade-console";

/// XDG directory paths for the console.
#[derive(Debug, Clone)]
pub struct XdgDirs {
    /// State directory (~/.local/state/trade-console or XDG_STATE_HOME/trade-console)
    pub state: PathBuf,
}

impl XdgDirs {
    /// Get XDG directories, respecting environment variables.
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            state: std::env::var_os("XDG_STATE_HOME")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join(".local/state"))
                .join(APP_DIR),
        }
    }

    /// Ensure the state directory exists.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.state)
    }

    /// Default log file location.
    pub fn log_file(&self) -> PathBuf {
        self.state.join("trade-console.log")
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_state_home_respected() {
        let tmp = tempfile::tempdir().unwrap();
        let previous = std::env::var_os("XDG_STATE_HOME");
        std::env::set_var("XDG_STATE_HOME", tmp.path());

        let dirs = XdgDirs::new();
        assert_eq!(dirs.state, tmp.path().join("trade-console"));
        assert_eq!(
            dirs.log_file(),
            tmp.path().join("trade-console").join("trade-console.log")
        );

        dirs.ensure_dirs().unwrap();
        assert!(dirs.state.is_dir());

        match previous {
            Some(v) => std::env::set_var("XDG_STATE_HOME", v),
            None => std::env::remove_var("XDG_STATE_HOME"),
        }
    }

    #[test]
    #[serial]
    fn test_empty_state_home_falls_back() {
        let previous = std::env::var_os("XDG_STATE_HOME");
        std::env::set_var("XDG_STATE_HOME", "");

        let dirs = XdgDirs::new();
        assert!(dirs.state.ends_with(".local/state/trade-console"));

        match previous {
            Some(v) => std::env::set_var("XDG_STATE_HOME", v),
            None => std::env::remove_var("XDG_STATE_HOME"),
        }
    }
}
