//! XDG Base Directory support.

use std::path::PathBuf;

/// Application directory name used under every XDG base directory.
pub const APP_DIR: &str = "chat-settings";

/// XDG directory paths for chat-settings.
pub struct XdgDirs {
    /// Config directory (~/.config/chat-settings or XDG_CONFIG_HOME/chat-settings)
    pub config: PathBuf,
    /// Data directory (~/.local/share/chat-settings or XDG_DATA_HOME/chat-settings)
    pub data: PathBuf,
    /// Cache directory (~/.cache/chat-settings or XDG_CACHE_HOME/chat-settings)
    pub cache: PathBuf,
    /// State directory (~/.local/state/chat-settings or XDG_STATE_HOME/chat-settings)
    pub state: PathBuf,
}

impl XdgDirs {
    /// Get XDG directories, respecting environment variables.
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            config: env_dir("XDG_CONFIG_HOME", || home.join(".config")),
            data: env_dir("XDG_DATA_HOME", || home.join(".local/share")),
            cache: env_dir("XDG_CACHE_HOME", || home.join(".cache")),
            state: env_dir("XDG_STATE_HOME", || home.join(".local/state")),
        }
    }

    /// Ensure all directories exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.config, &self.data, &self.cache, &self.state] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Default location of the settings database.
    pub fn database_path(&self) -> PathBuf {
        self.data.join("settings.db")
    }

    /// Log file written by the terminal UI.
    pub fn log_path(&self) -> PathBuf {
        self.state.join("chat-settings.log")
    }

    /// Directory exported settings files are written to by default.
    ///
    /// Uses the platform download directory, falling back to the current
    /// working directory.
    pub fn export_dir() -> PathBuf {
        dirs::download_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

fn env_dir(var: &str, fallback: impl FnOnce() -> PathBuf) -> PathBuf {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(fallback)
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_live_under_app_dir() {
        let dirs = XdgDirs::new();
        assert!(dirs.database_path().starts_with(&dirs.data));
        assert!(dirs.log_path().starts_with(&dirs.state));
        assert!(dirs.data.ends_with(APP_DIR));
        assert_eq!(
            dirs.database_path().file_name().and_then(|n| n.to_str()),
            Some("settings.db")
        );
    }
}
