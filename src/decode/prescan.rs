use std::collections::{HashMap, HashSet};

use memchr::memchr;

use crate::constants::{ASSIGN_CHAR, COMMENT_CHAR};

/// First pass over the raw lines: per scope, the set of keys that appear more
/// than once. The main parser treats those keys as arrays even in the bare
/// repeated-key form.
///
/// The scope is the full text inside the last seen `[...]` header, so a
/// per-object entry scopes its keys under `"Name Type"`. Keys are the raw
/// text before the first `=`; `Foo[0]` and `Foo[1]` are distinct raw keys,
/// indexed arrays are detected per-line by the main parser instead.
///
/// Malformed lines are ignored, never flagged.
pub(crate) fn duplicate_keys<'a, I>(lines: I) -> HashMap<String, HashSet<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashMap<String, HashSet<String>> = HashMap::new();
    let mut duplicates: HashMap<String, HashSet<String>> = HashMap::new();
    let mut scope = String::new();

    for line in lines {
        if line.starts_with(COMMENT_CHAR) || line.trim().is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            scope = line[1..line.len() - 1].to_string();
            continue;
        }

        if scope.is_empty() {
            continue;
        }

        let Some(assign_idx) = memchr(ASSIGN_CHAR, line.as_bytes()) else {
            continue;
        };
        let key = &line[..assign_idx];

        if !seen.entry(scope.clone()).or_default().insert(key.to_string()) {
            duplicates
                .entry(scope.clone())
                .or_default()
                .insert(key.to_string());
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> HashMap<String, HashSet<String>> {
        duplicate_keys(text.lines())
    }

    #[rstest::rstest]
    fn test_repeated_key_is_reported_once() {
        let dup = scan("[Maps]\nMap=DM-Rankin\nMap=DM-Antalus\nMap=DM-Asbestos\nTitle=x\n");
        assert!(dup["Maps"].contains("Map"));
        assert!(!dup["Maps"].contains("Title"));
        assert_eq!(dup["Maps"].len(), 1);
    }

    #[rstest::rstest]
    fn test_sections_are_tracked_independently() {
        let dup = scan("[A]\nKey=1\n[B]\nKey=1\nKey=2\n");
        assert!(!dup.contains_key("A"));
        assert!(dup["B"].contains("Key"));
    }

    #[rstest::rstest]
    fn test_indexed_keys_are_distinct_raw_keys() {
        let dup = scan("[A]\nMap[0]=x\nMap[1]=y\n");
        assert!(dup.is_empty());
    }

    #[rstest::rstest]
    fn test_per_object_header_scopes_by_full_name() {
        let dup = scan("[Invasion WaveSetup]\nWave=1\nWave=2\n");
        assert!(dup["Invasion WaveSetup"].contains("Wave"));
    }

    #[rstest::rstest]
    fn test_comments_blanks_and_orphan_lines_skipped() {
        let dup = scan(";Key=1\n\nKey=2\nKey=3\n[A]\n;Key=4\nKey=5\n");
        assert!(dup.is_empty());
    }

    #[rstest::rstest]
    fn test_case_sensitive_keys() {
        let dup = scan("[A]\nkey=1\nKey=2\n");
        assert!(dup.is_empty());
    }
}
