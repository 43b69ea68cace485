use time::Date;

use kernel::prelude::report::MonthlyCollection;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DailyCollectionDto {
    pub date: Date,
    pub total: i64,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MonthlyCollectionDto {
    pub month: String,
    pub year: i32,
    pub total: i64,
}

impl From<MonthlyCollection> for MonthlyCollectionDto {
    fn from(value: MonthlyCollection) -> Self {
        Self {
            month: value.month().code().to_string(),
            year: (*value.year()).into(),
            total: (*value.total()).into(),
        }
    }
}

pub struct GetYearlyHistoryDto {
    pub year: i32,
}
