use regex::Regex;
use tracing::debug;

use crate::core::{
    BinderError,
    CollectorNumbered,
};

/// Decides which printings are kept as the primary entry for a collector number.
///
/// The default rule keeps plain numbers and `a` suffixes (front faces) and drops
/// anything whose collector number ends in `b` through `z`, which in practice are
/// back faces and alternate variant prints. Catalogs that number things
/// differently can swap in a pattern or disable exclusion entirely.
#[derive(Debug, Clone, Default)]
pub enum VariantPolicy {
    #[default]
    SuffixLetter,
    /// Excludes every collector number the pattern matches.
    Pattern(Regex),
    KeepAll,
}

impl VariantPolicy {
    pub fn custom(pattern: &str) -> Result<Self, BinderError> {
        Ok(VariantPolicy::Pattern(Regex::new(pattern)?))
    }

    /// Parses the `variant_policy` config value.
    pub fn from_setting(setting: &str) -> Result<Self, BinderError> {
        match setting.trim() {
            "" | "suffix" => Ok(VariantPolicy::SuffixLetter),
            "keep_all" => Ok(VariantPolicy::KeepAll),
            pattern => Self::custom(pattern),
        }
    }

    pub fn is_excluded(&self, collector_number: &str) -> bool {
        match self {
            VariantPolicy::SuffixLetter => has_variant_suffix(collector_number),
            VariantPolicy::Pattern(re) => re.is_match(collector_number),
            VariantPolicy::KeepAll => false,
        }
    }

    /// Order-preserving subsequence of `items` that survive the policy.
    pub fn filter<T: CollectorNumbered>(&self, items: Vec<T>) -> Vec<T> {
        let before = items.len();
        let kept: Vec<T> = items
            .into_iter()
            .filter(|item| {
                let excluded = self.is_excluded(item.collector_number());
                if excluded {
                    debug!(collector_number = item.collector_number(), "Excluding variant printing");
                }
                !excluded
            })
            .collect();
        debug!(kept = kept.len(), excluded = before - kept.len(), "Applied variant policy");
        kept
    }
}

fn has_variant_suffix(collector_number: &str) -> bool {
    match collector_number.chars().last() {
        Some(c) => c.is_ascii_alphabetic() && !c.eq_ignore_ascii_case(&'a'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Number(&'static str);

    impl CollectorNumbered for Number {
        fn collector_number(&self) -> &str {
            self.0
        }
    }

    fn kept(policy: &VariantPolicy, input: &[&'static str]) -> Vec<&'static str> {
        policy.filter(input.iter().map(|&n| Number(n)).collect()).into_iter().map(|n| n.0).collect()
    }

    #[test]
    fn test_default_policy_drops_b_through_z() {
        let policy = VariantPolicy::default();
        assert_eq!(kept(&policy, &["10", "10a", "10b", "11c"]), vec!["10", "10a"]);
        assert_eq!(kept(&policy, &["99", "99b", "100A", "100B", "7z", "7Z"]), vec!["99", "100A"]);
    }

    #[test]
    fn test_default_policy_edge_cases() {
        let policy = VariantPolicy::default();
        // Multi-character suffixes are judged by their final character.
        assert!(policy.is_excluded("12ab"));
        assert!(!policy.is_excluded("12ba"));
        // Non-letter suffixes and empty numbers are kept.
        assert!(!policy.is_excluded("5★"));
        assert!(!policy.is_excluded("A-10"));
        assert!(!policy.is_excluded(""));
        assert!(!policy.is_excluded("é"));
    }

    #[test]
    fn test_custom_and_keep_all() {
        let only_stars = VariantPolicy::custom("★$").unwrap();
        assert_eq!(kept(&only_stars, &["1", "1b", "1★"]), vec!["1", "1b"]);

        let keep_all = VariantPolicy::from_setting("keep_all").unwrap();
        assert_eq!(kept(&keep_all, &["1", "1b", "1z"]), vec!["1", "1b", "1z"]);

        assert!(matches!(VariantPolicy::from_setting("suffix").unwrap(), VariantPolicy::SuffixLetter));
        assert!(VariantPolicy::from_setting("(").is_err());
    }
}
