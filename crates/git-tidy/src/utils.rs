use std::{env, path::PathBuf};

/// Expand a leading `~` in a filesystem path using the `HOME` environment variable.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~")
        && let Ok(home) = env::var("HOME")
    {
        return PathBuf::from(path.replacen("~", &home, 1));
    }
    PathBuf::from(path)
}

/// Pick the CLI flag, then the environment variable `var`. Empty values count
/// as unset.
pub fn flag_or_env(flag: Option<&str>, var: &str) -> Option<String> {
    flag.map(str::to_string)
        .or_else(|| env::var(var).ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_plain_path() {
        assert_eq!(expand_tilde("/tmp/repo"), PathBuf::from("/tmp/repo"));
        assert_eq!(expand_tilde("repo~1"), PathBuf::from("repo~1"));
    }

    #[test]
    fn test_flag_wins_over_env() {
        // PATH is always set, so only the flag can win here.
        assert_eq!(
            flag_or_env(Some("origin"), "PATH"),
            Some("origin".to_string())
        );
        assert_eq!(flag_or_env(Some(""), "GIT_TIDY_TEST_UNSET_VARIABLE"), None);
        assert_eq!(flag_or_env(None, "GIT_TIDY_TEST_UNSET_VARIABLE"), None);
    }
}
