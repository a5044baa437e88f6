//! Sandbox path mapping.

use std::path::{Path, PathBuf};

const HOST_ROOT: &str = "/host";

/// Directory for the trace file: `/host/.local/share/zellij/haulboard`.
///
/// `/host` is the folder Zellij was started from, normally the user's home,
/// so on the host this is `~/.local/share/zellij/haulboard`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    Path::new(HOST_ROOT).join(".local/share/zellij").join("haulboard")
}

/// Maps `~` and `~/...` onto the sandbox's `/host` mount.
///
/// ```
/// use haulboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_lives_under_host_share() {
        assert_eq!(get_data_dir(), PathBuf::from("/host/.local/share/zellij/haulboard"));
    }

    #[test]
    fn tilde_expands_only_as_a_home_prefix() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("~/a"), "/host/a");
        assert_eq!(expand_tilde("~user/a"), "~user/a");
        assert_eq!(expand_tilde("relative/~"), "relative/~");
    }
}
