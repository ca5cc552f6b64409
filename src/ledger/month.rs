use std::fmt;

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::PlanError;

/// A calendar month, the aggregation bucket for all projections.
///
/// Canonical text form is `YYYY-MM`, which is also how the key serializes.
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<MonthKey> {
        if (1..=12).contains(&month) {
            Some(MonthKey { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> MonthKey {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Zero-based month count since year 0; consecutive months differ by 1.
    pub fn index(&self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }

    pub fn from_index(index: i32) -> MonthKey {
        MonthKey {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn plus(&self, months: i32) -> MonthKey {
        MonthKey::from_index(self.index() + months)
    }

    /// First day of the month.
    pub fn start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// Last day of the month.
    pub fn end(&self) -> NaiveDate {
        self.plus(1).start() - Duration::days(1)
    }

    /// Canonical `YYYY-MM` form.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn parse(raw: &str) -> Option<MonthKey> {
        let (year, month) = raw.split_once('-')?;
        MonthKey::new(year.parse().ok()?, month.parse().ok()?)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        MonthKey::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid month key `{}`", raw)))
    }
}

/// Shifts a date by whole months, clamping the day to the target month length.
pub(crate) fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let target = MonthKey::from_date(date).plus(months);
    let day = date.day().min(month_length(target));
    NaiveDate::from_ymd_opt(target.year, target.month, day).unwrap()
}

pub(crate) fn month_length(month: MonthKey) -> u32 {
    month.end().day()
}

/// An ordered, contiguous run of months. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    months: Vec<MonthKey>,
}

impl MonthWindow {
    /// Builds the window starting `offset` months from the anchor's month
    /// (negative offsets reach into the past), `count` months long.
    pub fn anchored(anchor: NaiveDate, offset: i32, count: usize) -> Result<MonthWindow, PlanError> {
        if count == 0 {
            return Err(PlanError::InvalidWindow(
                "window must span at least one month".into(),
            ));
        }
        let first = MonthKey::from_date(anchor).plus(offset);
        let months = (0..count as i32).map(|step| first.plus(step)).collect();
        Ok(MonthWindow { months })
    }

    /// Same as [`MonthWindow::anchored`], anchored on today's local date.
    pub fn current(offset: i32, count: usize) -> Result<MonthWindow, PlanError> {
        MonthWindow::anchored(Local::now().date_naive(), offset, count)
    }

    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    pub fn first(&self) -> MonthKey {
        self.months[0]
    }

    pub fn last(&self) -> MonthKey {
        self.months[self.months.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn contains(&self, month: MonthKey) -> bool {
        self.position(month).is_some()
    }

    pub fn position(&self, month: MonthKey) -> Option<usize> {
        let offset = month.index() - self.first().index();
        if offset >= 0 && (offset as usize) < self.months.len() {
            Some(offset as usize)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.months.iter().copied()
    }
}
