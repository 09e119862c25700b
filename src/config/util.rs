//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/assets/fonts/  ← cwd
/// /home/user/site/fontface.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    find_upward(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
fn find_upward(start: &Path, config_name: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_upward() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("assets").join("fonts");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("fontface.toml"), "").unwrap();

        assert_eq!(
            find_upward(&nested, Path::new("fontface.toml")),
            Some(dir.path().join("fontface.toml"))
        );
        assert_eq!(find_upward(&nested, Path::new("other-name-xyz.toml")), None);
    }

    #[test]
    fn test_find_absolute_missing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_config_file(&dir.path().join("fontface.toml")), None);
    }
}
