//! Path and environment helpers.

use std::path::PathBuf;

/// Expand a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```
/// use costar_core::util::paths::expand_tilde;
///
/// assert_eq!(expand_tilde("/data/credits.csv").to_str(), Some("/data/credits.csv"));
/// ```
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Convert a project name to an environment variable prefix.
///
/// - "costar" → "COSTAR"
/// - "episode-credits" → "EPISODE_CREDITS"
pub fn env_prefix(project_name: &str) -> String {
    project_name.to_uppercase().replace(['-', ' '], "_")
}

/// Build the environment variable name for a project and suffix.
///
/// # Examples
///
/// ```
/// use costar_core::util::paths::env_var;
///
/// assert_eq!(env_var("costar", "CONFIG"), "COSTAR_CONFIG");
/// ```
pub fn env_var(project_name: &str, suffix: &str) -> String {
    format!("{}_{}", env_prefix(project_name), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_home() {
        let expanded = expand_tilde("~/credits.csv");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("credits.csv"));
        }
    }

    #[test]
    fn test_expand_tilde_absolute_untouched() {
        assert_eq!(expand_tilde("/tmp/x.csv"), PathBuf::from("/tmp/x.csv"));
    }

    #[test]
    fn test_env_prefix() {
        assert_eq!(env_prefix("costar"), "COSTAR");
        assert_eq!(env_prefix("episode-credits"), "EPISODE_CREDITS");
        assert_eq!(env_prefix("my project"), "MY_PROJECT");
    }

    #[test]
    fn test_env_var() {
        assert_eq!(env_var("costar", "CONFIG"), "COSTAR_CONFIG");
    }
}
