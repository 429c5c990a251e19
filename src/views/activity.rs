use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::data::model::Record;

/// A calendar month. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Month {
    pub year: i32,
    /// 1–12
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Months since year 0, used as the x coordinate of the activity chart.
    pub fn ordinal(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_ordinal(ordinal: i64) -> Self {
        Month {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub month: Month,
    pub count: usize,
}

/// Publications per month, oldest first. Records without a publication
/// date are ignored; months with no publications are absent.
pub fn build(view: &[&Record]) -> Vec<MonthlyCount> {
    let mut by_month: BTreeMap<Month, usize> = BTreeMap::new();
    for date in view.iter().filter_map(|r| r.publication_date) {
        *by_month.entry(Month::of(date)).or_default() += 1;
    }
    by_month
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}
