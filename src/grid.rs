use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

use crate::error::{Error, ErrorKind, Result};
use crate::month::{self, MonthIndex};

/// Maximum number of week rows a month view spans.
pub const MAX_ROWS: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub day: u32,
    pub highlighted: bool,
}

/// One Monday to Sunday row of the grid.
///
/// Day numbers are unique within a row, so the row doubles as a map from day of month to its
/// highlight flag. Entries are kept in calendar order, e.g. `28 29 30 31 1 2 3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    week: u32,
    days: Vec<DayEntry>,
}

impl WeekRow {
    fn with_week(week: u32) -> Self {
        WeekRow {
            week,
            days: Vec::with_capacity(DAYS_PER_WEEK),
        }
    }

    fn insert(&mut self, day: u32, highlighted: bool) {
        match self.days.iter_mut().find(|entry| entry.day == day) {
            Some(entry) => entry.highlighted = highlighted,
            None => self.days.push(DayEntry { day, highlighted }),
        }
    }

    /// ISO week number of the row's Monday.
    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn days(&self) -> &[DayEntry] {
        &self.days
    }

    pub fn day_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.iter().map(|entry| entry.day)
    }

    /// Highlight flag of `day`, `None` if the day is not part of this row.
    pub fn get(&self, day: u32) -> Option<bool> {
        self.days
            .iter()
            .find(|entry| entry.day == day)
            .map(|entry| entry.highlighted)
    }

    pub fn contains(&self, day: u32) -> bool {
        self.get(day).is_some()
    }

    pub fn is_highlighted(&self) -> bool {
        self.days.iter().any(|entry| entry.highlighted)
    }
}

/// Week rows of a month view keyed by ISO week number, in chronological order.
///
/// Around new year the week keys wrap (`..., 52, 1`), so rows are stored in insertion order
/// rather than sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Grid {
    weeks: Vec<WeekRow>,
}

impl Grid {
    fn insert(&mut self, row: WeekRow) {
        match self.weeks.iter_mut().find(|r| r.week == row.week) {
            Some(existing) => *existing = row,
            None => self.weeks.push(row),
        }
    }

    pub fn weeks(&self) -> &[WeekRow] {
        &self.weeks
    }

    pub fn week_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.weeks.iter().map(WeekRow::week)
    }

    pub fn get(&self, week: u32) -> Option<&WeekRow> {
        self.weeks.iter().find(|row| row.week == week)
    }

    pub fn highlighted_week(&self) -> Option<&WeekRow> {
        self.weeks.iter().find(|row| row.is_highlighted())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeekRow> {
        self.weeks.iter()
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a WeekRow;
    type IntoIter = std::slice::Iter<'a, WeekRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.weeks.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarGridBuilder {
    reference: NaiveDate,
}

impl CalendarGridBuilder {
    pub fn new(reference: NaiveDate) -> Self {
        CalendarGridBuilder { reference }
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::new)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidArgument,
                    &format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day),
                )
            })
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn day_of_month(&self) -> u32 {
        self.reference.day()
    }

    /// ISO weekday, 1 = Monday.
    pub fn weekday(&self) -> u32 {
        self.reference.weekday().number_from_monday()
    }

    pub fn first_weekday_of_month(&self) -> u32 {
        month::first_of_month(self.reference)
            .weekday()
            .number_from_monday()
    }

    /// ISO week number containing the 1st of the month. March 2024 starts in week 9.
    pub fn first_week_of_month(&self) -> u32 {
        month::first_of_month(self.reference).iso_week().week()
    }

    pub fn days_in_month(&self) -> u32 {
        MonthIndex::from(self.reference).days()
    }

    pub fn days_in_previous_month(&self) -> u32 {
        MonthIndex::from(self.reference).prev().days()
    }

    /// Builds the month grid, highlighting rows relative to the week containing `today`.
    ///
    /// A row is highlighted when its Monday lies exactly one week before the Monday of
    /// `today`'s week. Leading and trailing rows starting outside the month are dropped unless
    /// the month has begun by the end of the row. Days beyond chrono's date range are left out.
    pub fn build_grid(&self, today: NaiveDate) -> Grid {
        let first = month::first_of_month(self.reference);
        let lead = self.first_weekday_of_month() as i64 - 1;
        let day_at = |offset: i64| first.checked_add_signed(Duration::days(offset));

        let selected_week = month::monday_of_week(today);
        let reference_month = self.reference.month();

        log::debug!(
            "building grid for {}-{:02} from {:?} (selected week {:?})",
            self.reference.year(),
            reference_month,
            day_at(-lead),
            selected_week
        );

        let mut grid = Grid::default();
        for row_index in 0..MAX_ROWS as i64 {
            let start = row_index * DAYS_PER_WEEK as i64 - lead;
            let monday = day_at(start);
            if monday.is_none() && start > 0 {
                log::trace!("date range ends before row {}", row_index);
                break;
            }

            let highlighted = match (monday, selected_week) {
                (Some(monday), Some(selected)) => {
                    monday < selected && (selected - monday).num_days() == 7
                }
                _ => false,
            };
            let hidden = monday.map_or(true, |monday| monday.month() != reference_month);

            let days: Vec<NaiveDate> = (start..start + DAYS_PER_WEEK as i64)
                .filter_map(day_at)
                .collect();
            let week = match monday.or_else(|| days.first().copied()) {
                Some(day) => day.iso_week().week(),
                None => break,
            };

            let mut row = WeekRow::with_week(week);
            for day in days {
                row.insert(day.day(), highlighted);
            }

            let next_monday = day_at(start + DAYS_PER_WEEK as i64);
            if hidden && next_monday.map_or(true, |next| next.month() != reference_month) {
                log::trace!("skipping padding week {}", row.week());
                continue;
            }
            grid.insert(row);
        }

        grid
    }

    /// Same as [`build_grid`](Self::build_grid) with today's local date.
    pub fn build_grid_now(&self) -> Grid {
        self.build_grid(Local::now().date_naive())
    }
}

impl From<NaiveDate> for CalendarGridBuilder {
    fn from(reference: NaiveDate) -> Self {
        Self::new(reference)
    }
}
