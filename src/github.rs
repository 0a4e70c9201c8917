use std::process::Command;
use tracing::warn;

/// How many characters of a commit id to show people
pub const HASH_LEN: usize = 8;

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

/// Abbreviate a commit id for display
pub fn short(revision: &str) -> &str {
    &revision[..revision.len().min(HASH_LEN)]
}

/// The GitHub compare view between what an environment runs and what is
/// about to be pushed
pub fn compare_url(repo: &str, env_revision: &str, new_revision: &str) -> String {
    format!(
        "https://github.com/{}/compare/{}...{}",
        repo,
        short(env_revision),
        short(new_revision)
    )
}

/// Open a URL in the default browser, best effort
pub fn open(url: &str) {
    match Command::new(OPENER).arg(url).status() {
        Ok(status) if status.success() => (),
        Ok(status) => warn!(%status, opener = OPENER, "browser opener exited abnormally"),
        Err(error) => warn!(%error, opener = OPENER, "failed to launch a browser"),
    }
}

#[cfg(test)]
mod tests {
    use super::{compare_url, short};

    #[test]
    fn compare_url_truncates_revisions() {
        let url = compare_url(
            "bobloblaw/lawblog",
            "fa0594dc16df3be505592b6346412c0a03cfe5bf",
            "b27dde9f3be505592b6346412c0a03cfe5bf0594",
        );
        assert_eq!(
            "https://github.com/bobloblaw/lawblog/compare/fa0594dc...b27dde9f",
            url
        );
    }

    #[test]
    fn short_input_passes_through() {
        assert_eq!("b27dde9", short("b27dde9"));
        assert_eq!("fa0594dc", short("fa0594dc16df3be505592b6346412c0a03cfe5bf"));
    }
}
