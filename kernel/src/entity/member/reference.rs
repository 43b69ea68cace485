use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use vodca::{AsRefln, Fromln};

/// Sequential reference number of a member within its area.
///
/// Kept as text because legacy records hold values such as `"12A"`. Ordering
/// is numeric-aware: digit runs compare by value, so `"2" < "10"`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct ReferenceNumber(String);

impl ReferenceNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn numeric(&self) -> Option<u64> {
        self.0.trim().parse::<u64>().ok()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// One past the largest numeric reference number, or `"1"` when none of
    /// `existing` is numeric.
    pub fn next_after<'a, I>(existing: I) -> Self
    where
        I: IntoIterator<Item = &'a ReferenceNumber>,
    {
        existing
            .into_iter()
            .filter_map(ReferenceNumber::numeric)
            .max()
            .map(|max| Self::new(max.saturating_add(1).to_string()))
            .unwrap_or_else(|| Self::new("1"))
    }
}

impl Ord for ReferenceNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for ReferenceNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

impl<'a> Run<'a> {
    fn new(run: &'a str, digits: bool) -> Self {
        if digits {
            Run::Digits(run)
        } else {
            Run::Text(run)
        }
    }
}

fn split_runs(value: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut previous = None;
    for (index, ch) in value.char_indices() {
        let digit = ch.is_ascii_digit();
        if let Some(was_digit) = previous {
            if was_digit != digit {
                runs.push(Run::new(&value[start..index], was_digit));
                start = index;
            }
        }
        previous = Some(digit);
    }
    if let Some(was_digit) = previous {
        runs.push(Run::new(&value[start..], was_digit));
    }
    runs
}

fn compare_digits(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn compare_text(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
}

pub(crate) fn natural_cmp(left: &str, right: &str) -> Ordering {
    let left_runs = split_runs(left);
    let right_runs = split_runs(right);
    for (l, r) in left_runs.iter().zip(right_runs.iter()) {
        let ordering = match (l, r) {
            (Run::Digits(l), Run::Digits(r)) => compare_digits(l, r),
            (Run::Text(l), Run::Text(r)) => compare_text(l, r),
            (Run::Digits(_), Run::Text(_)) => Ordering::Less,
            (Run::Text(_), Run::Digits(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left_runs
        .len()
        .cmp(&right_runs.len())
        .then_with(|| left.cmp(right))
}

#[cfg(test)]
mod test {
    use rand::seq::SliceRandom;

    use super::ReferenceNumber;

    fn refs(values: &[&str]) -> Vec<ReferenceNumber> {
        values.iter().map(|v| ReferenceNumber::new(*v)).collect()
    }

    #[test]
    fn next_after_existing_numbers() {
        let existing = refs(&["1", "2", "5"]);
        assert_eq!(
            ReferenceNumber::next_after(&existing),
            ReferenceNumber::new("6")
        );
    }

    #[test]
    fn next_after_nothing_is_one() {
        assert_eq!(
            ReferenceNumber::next_after(&Vec::new()),
            ReferenceNumber::new("1")
        );
    }

    #[test]
    fn next_after_ignores_non_numeric() {
        let existing = refs(&["A1", "", "3B"]);
        assert_eq!(
            ReferenceNumber::next_after(&existing),
            ReferenceNumber::new("1")
        );

        let existing = refs(&["A1", "9", " 10 "]);
        assert_eq!(
            ReferenceNumber::next_after(&existing),
            ReferenceNumber::new("11")
        );
    }

    #[test]
    fn ten_sorts_after_two() {
        assert!(ReferenceNumber::new("10") > ReferenceNumber::new("2"));
        assert!(ReferenceNumber::new("A10") > ReferenceNumber::new("a2"));
        assert!(ReferenceNumber::new("9") < ReferenceNumber::new("9a"));
    }

    #[test]
    fn leading_zeros_only_break_ties() {
        assert!(ReferenceNumber::new("007") < ReferenceNumber::new("8"));
        assert_ne!(
            ReferenceNumber::new("07").cmp(&ReferenceNumber::new("7")),
            std::cmp::Ordering::Equal
        );
    }

    #[test]
    fn shuffled_references_sort_numerically() {
        let expected = refs(&["1", "2", "3", "10", "11", "20", "100", "101"]);
        let mut shuffled = expected.clone();
        shuffled.shuffle(&mut rand::thread_rng());
        shuffled.sort();
        assert_eq!(shuffled, expected);
    }
}
