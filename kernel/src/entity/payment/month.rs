use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use vodca::{AsRefln, Fromln};

/// Three-letter month label as stored on payments (`JAN` .. `DEC`).
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MonthLabel {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl MonthLabel {
    pub const ALL: [MonthLabel; 12] = [
        MonthLabel::Jan,
        MonthLabel::Feb,
        MonthLabel::Mar,
        MonthLabel::Apr,
        MonthLabel::May,
        MonthLabel::Jun,
        MonthLabel::Jul,
        MonthLabel::Aug,
        MonthLabel::Sep,
        MonthLabel::Oct,
        MonthLabel::Nov,
        MonthLabel::Dec,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            MonthLabel::Jan => "JAN",
            MonthLabel::Feb => "FEB",
            MonthLabel::Mar => "MAR",
            MonthLabel::Apr => "APR",
            MonthLabel::May => "MAY",
            MonthLabel::Jun => "JUN",
            MonthLabel::Jul => "JUL",
            MonthLabel::Aug => "AUG",
            MonthLabel::Sep => "SEP",
            MonthLabel::Oct => "OCT",
            MonthLabel::Nov => "NOV",
            MonthLabel::Dec => "DEC",
        }
    }

    /// Zero-based index, January = 0.
    pub fn index(&self) -> usize {
        match self {
            MonthLabel::Jan => 0,
            MonthLabel::Feb => 1,
            MonthLabel::Mar => 2,
            MonthLabel::Apr => 3,
            MonthLabel::May => 4,
            MonthLabel::Jun => 5,
            MonthLabel::Jul => 6,
            MonthLabel::Aug => 7,
            MonthLabel::Sep => 8,
            MonthLabel::Oct => 9,
            MonthLabel::Nov => 10,
            MonthLabel::Dec => 11,
        }
    }

    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }
}

impl From<time::Month> for MonthLabel {
    fn from(month: time::Month) -> Self {
        match month {
            time::Month::January => MonthLabel::Jan,
            time::Month::February => MonthLabel::Feb,
            time::Month::March => MonthLabel::Mar,
            time::Month::April => MonthLabel::Apr,
            time::Month::May => MonthLabel::May,
            time::Month::June => MonthLabel::Jun,
            time::Month::July => MonthLabel::Jul,
            time::Month::August => MonthLabel::Aug,
            time::Month::September => MonthLabel::Sep,
            time::Month::October => MonthLabel::Oct,
            time::Month::November => MonthLabel::Nov,
            time::Month::December => MonthLabel::Dec,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UnknownMonthLabel(pub String);

impl Display for UnknownMonthLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown month label `{}`", self.0)
    }
}

impl std::error::Error for UnknownMonthLabel {}

impl FromStr for MonthLabel {
    type Err = UnknownMonthLabel;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|label| label.code() == upper)
            .ok_or_else(|| UnknownMonthLabel(s.to_string()))
    }
}

impl Display for MonthLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The set of months one payment covers, in the order they were selected.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CoveredMonths(Vec<MonthLabel>);

impl CoveredMonths {
    pub fn new(months: impl IntoIterator<Item = MonthLabel>) -> Self {
        let mut unique = Vec::new();
        for month in months {
            if !unique.contains(&month) {
                unique.push(month);
            }
        }
        Self(unique)
    }

    pub fn contains(&self, month: MonthLabel) -> bool {
        self.0.contains(&month)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthLabel> {
        self.0.iter()
    }

    pub fn codes(&self) -> Vec<String> {
        self.0.iter().map(|month| month.code().to_string()).collect()
    }

    /// Labels joined with `,`, the form payment searches match against.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(MonthLabel::code)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Zero-based month index of when a payment was received. Legacy records
/// may hold values outside `0..12`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PaymentMonth(i32);

impl PaymentMonth {
    pub fn new(index: impl Into<i32>) -> Self {
        Self(index.into())
    }

    pub fn label(&self) -> Option<MonthLabel> {
        MonthLabel::from_index(self.0)
    }
}
