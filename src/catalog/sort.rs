use std::cmp::Ordering;

use crate::core::CollectorNumbered;

/// Value of the leading digit run of a collector number, `None` when it has none.
///
/// Overlong runs saturate rather than wrap.
pub fn numeric_key(collector_number: &str) -> Option<u64> {
    let digits = collector_number.bytes().take_while(u8::is_ascii_digit);
    let mut value: Option<u64> = None;
    for digit in digits {
        let current = value.unwrap_or(0);
        value = Some(current.saturating_mul(10).saturating_add(u64::from(digit - b'0')));
    }
    value
}

/// Collector order: numeric prefix first (numbers without one go last), then the
/// full string byte by byte, so `"99"` precedes `"99a"`.
pub fn compare_collector_numbers(lhs: &str, rhs: &str) -> Ordering {
    let by_number = match (numeric_key(lhs), numeric_key(rhs)) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_number.then_with(|| lhs.cmp(rhs))
}

pub fn sort_by_collector_number<T: CollectorNumbered>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by(|a, b| compare_collector_numbers(a.collector_number(), b.collector_number()));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Number(&'static str);

    impl CollectorNumbered for Number {
        fn collector_number(&self) -> &str {
            self.0
        }
    }

    fn sorted(input: &[&'static str]) -> Vec<&'static str> {
        sort_by_collector_number(input.iter().map(|&n| Number(n)).collect())
            .into_iter()
            .map(|n| n.0)
            .collect()
    }

    #[test]
    fn test_numeric_key() {
        assert_eq!(numeric_key("99a"), Some(99));
        assert_eq!(numeric_key("007"), Some(7));
        assert_eq!(numeric_key("0"), Some(0));
        assert_eq!(numeric_key("A-12"), None);
        assert_eq!(numeric_key(""), None);
        assert_eq!(numeric_key("99999999999999999999999"), Some(u64::MAX));
    }

    #[test]
    fn test_numeric_then_ordinal_order() {
        assert_eq!(
            sorted(&["100", "99a", "2", "99", "10", "★1", "1"]),
            vec!["1", "2", "10", "99", "99a", "100", "★1"]
        );
        assert_eq!(sorted(&["10", "010", "9"]), vec!["9", "010", "10"]);
        assert_eq!(sorted(&["B", "A-1", "3"]), vec!["3", "A-1", "B"]);
    }

    #[test]
    fn test_order_is_independent_of_input_order() {
        let forward = sorted(&["5", "3a", "3", "12", "X", "1"]);
        let reversed = sorted(&["1", "X", "12", "3", "3a", "5"]);
        assert_eq!(forward, reversed);

        let keys: Vec<Option<u64>> = forward.iter().map(|n| numeric_key(n)).collect();
        let mut expected = keys.clone();
        expected.sort_by(|a, b| match (a, b) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        assert_eq!(keys, expected);
    }
}
