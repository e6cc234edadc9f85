use chrono::{Datelike, Duration, Month, NaiveDate};
use num_traits::FromPrimitive;

/// Year of the same 400 year Gregorian cycle position, well inside chrono's range.
fn cycle_year(year: i32) -> i32 {
    2000 + year.rem_euclid(400)
}

pub fn days_of_month(month: Month, year: i32) -> u32 {
    let year = cycle_year(year);
    let number = month.number_from_month();

    let first = NaiveDate::from_ymd_opt(year, number, 1);
    let first_next = if number == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, number + 1, 1)
    };

    match (first, first_next) {
        (Some(first), Some(first_next)) => {
            first_next.signed_duration_since(first).num_days() as u32
        }
        _ => unreachable!("first days of {}-{} exist", year, number),
    }
}

/// First day of the month `date` belongs to.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Monday of the ISO week `date` belongs to, `None` before the first representable Monday.
pub fn monday_of_week(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(
        date.weekday().num_days_from_monday() as i64,
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    pub fn days(&self) -> u32 {
        days_of_month(self.index, self.year)
    }

    pub fn prev(&self) -> Self {
        let prev_month = self.index.pred();

        MonthIndex {
            index: prev_month,
            year: if prev_month == Month::December {
                self.year - 1
            } else {
                self.year
            },
        }
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        let index = Month::from_u32(m.month()).expect("Datelike::month() is within 1..=12");
        MonthIndex::new(index, m.year())
    }
}
