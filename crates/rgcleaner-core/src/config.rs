//! Engine configuration resolved from flags and environment

use crate::orchestrator::DEFAULT_PACING;
use crate::pattern::ExclusionList;
use std::path::PathBuf;
use std::time::Duration;

pub const EXCLUDE_LIST_ENV: &str = "EXCLUDE_LIST_PATH";
pub const EXCLUDE_LIST_FILE: &str = "exclude-list.txt";

/// Runtime settings shared by every front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanerConfig {
    /// Exclusion list location. The file need not exist.
    pub exclude_list: PathBuf,

    /// Delay between successive destructive calls
    pub pacing: Duration,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            exclude_list: PathBuf::from(EXCLUDE_LIST_FILE),
            pacing: DEFAULT_PACING,
        }
    }
}

impl CleanerConfig {
    pub fn with_exclude_list(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude_list = path.into();
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn exclusion_list(&self) -> ExclusionList {
        ExclusionList::new(&self.exclude_list)
    }
}

/// Locate the exclusion list
///
/// Resolution order:
/// 1. explicit path (command-line flag)
/// 2. `EXCLUDE_LIST_PATH`
/// 3. `./exclude-list.txt`
/// 4. `~/.config/rgcleaner/exclude-list.txt`
///
/// An explicit or environment path is returned even if it does not exist.
/// Otherwise the first existing candidate wins, falling back to
/// `./exclude-list.txt`.
pub fn find_exclusion_list(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    match std::env::var(EXCLUDE_LIST_ENV) {
        Ok(path) if !path.trim().is_empty() => return PathBuf::from(path),
        _ => {}
    }

    let local = std::env::current_dir()
        .map(|dir| dir.join(EXCLUDE_LIST_FILE))
        .unwrap_or_else(|_| PathBuf::from(EXCLUDE_LIST_FILE));
    if local.exists() {
        return local;
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join("rgcleaner").join(EXCLUDE_LIST_FILE);
        if global.exists() {
            return global;
        }
    }

    local
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_explicit_path_wins() {
        temp_env::with_var(EXCLUDE_LIST_ENV, Some("/from/env.txt"), || {
            let path = find_exclusion_list(Some(PathBuf::from("/explicit.txt")));
            assert_eq!(path, PathBuf::from("/explicit.txt"));
        });
    }

    #[test]
    #[serial]
    fn test_env_path_used_even_if_missing() {
        temp_env::with_var(EXCLUDE_LIST_ENV, Some("/nonexistent/exclude.txt"), || {
            assert_eq!(
                find_exclusion_list(None),
                PathBuf::from("/nonexistent/exclude.txt")
            );
        });
    }

    #[test]
    #[serial]
    fn test_local_file_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::fs::write(temp_dir.path().join(EXCLUDE_LIST_FILE), "^rg-prod$\n").unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();
        let path = temp_env::with_var_unset(EXCLUDE_LIST_ENV, || find_exclusion_list(None));
        std::env::set_current_dir(original_dir).unwrap();

        assert!(path.ends_with(EXCLUDE_LIST_FILE));
        assert!(path.exists());
    }

    #[test]
    fn test_default_pacing() {
        assert_eq!(CleanerConfig::default().pacing, Duration::from_millis(500));
    }
}
