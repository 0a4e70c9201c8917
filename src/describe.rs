//! Summarize what a deploy actually ships
//!
//! The description ends up in the deploy notification, not in the
//! confirmation flow the engineer sees.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;
use std::collections::BTreeSet;

static BUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bbug (\d+)\b").expect("bug pattern must compile"));

const NO_BUGFIX_DESCRIPTIONS: &[&str] = &[
    "No bugfixes--must be adding infinite loops.",
    "No bugfixes--must be removing infinite loops.",
    "No bugfixes--must be demonstrating our elite push technology.",
    "No bugfixes--must be making the blinkenlichten flash.",
];

/// Extract the bug numbers mentioned in one-line commit summaries
///
/// Deduplicated and sorted ascending as strings, matching how the bug
/// tracker has always received them.
pub fn extract_bugs<'l>(changelog: impl IntoIterator<Item = &'l str>) -> Vec<String> {
    let mut bugs = BTreeSet::new();
    for line in changelog {
        for capture in BUG_PATTERN.captures_iter(line) {
            bugs.insert(capture[1].to_owned());
        }
    }

    bugs.into_iter().collect()
}

/// Figure out a good description based on what is being pushed out
pub fn generate_desc(from_commit: &str, to_commit: &str, changelog: &str) -> String {
    if from_commit.starts_with(to_commit) {
        return format!("Pushing {} again", to_commit);
    }

    let bugs = extract_bugs(changelog.lines());
    if bugs.is_empty() {
        let mut rng = rand::thread_rng();
        (*NO_BUGFIX_DESCRIPTIONS
            .choose(&mut rng)
            .expect("descriptions must be non-empty"))
        .to_owned()
    } else {
        let bugs = bugs
            .iter()
            .map(|bug| format!("bug #{}", bug))
            .collect::<Vec<_>>();
        format!("Fixing: {}", bugs.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_bugs, generate_desc};

    #[test]
    fn extract_bugs_duplicates() {
        let bugs = extract_bugs([
            "a230011 [bug 933068] Add Uruguay",
            "45ab721 [bug 933068] Add Peru and Mexico",
        ]);
        assert_eq!(vec!["933068"], bugs);
    }

    #[test]
    fn extract_bugs_sorted_ascending() {
        let bugs = extract_bugs([
            "45ab721 [bug 933068] Add Peru and Mexico",
            "2d2566e [bug 918959] Strip that whitespace!",
        ]);
        assert_eq!(vec!["918959", "933068"], bugs);
    }

    #[test]
    fn extract_bugs_case_insensitive() {
        let bugs = extract_bugs(["ab12cd3 BUG 1234: do the thing"]);
        assert_eq!(vec!["1234"], bugs);
    }

    #[test]
    fn extract_bugs_none() {
        let bugs = extract_bugs(["deadbee Refactor the frobnicator"]);
        assert!(bugs.is_empty());
    }

    #[test]
    fn desc_same_commit() {
        let desc = generate_desc("b27dde9", "b27dde9", "irrelevant [bug 1] text");
        assert_eq!("Pushing b27dde9 again", desc);
    }

    #[test]
    fn desc_abbreviated_target() {
        // A short target id against the full id it resolves to still counts
        // as a redeploy
        let desc = generate_desc("b27dde9f3be505592b6346412c0a03cfe5bf0594", "b27dde9", "");
        assert_eq!("Pushing b27dde9 again", desc);
    }

    #[test]
    fn desc_with_bugs() {
        let desc = generate_desc(
            "2d2566e",
            "45ab721",
            "45ab721 [bug 933068] Add Peru and Mexico\n2d2566e [bug 754615] Strip that whitespace!",
        );
        assert_eq!("Fixing: bug #754615, bug #933068", desc);
    }

    #[test]
    fn desc_without_bugs() {
        let desc = generate_desc("2d2566e", "45ab721", "45ab721 Add Peru and Mexico");
        assert!(desc.starts_with("No bugfixes"));
    }
}
