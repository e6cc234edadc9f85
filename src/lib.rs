//! Month view calendar grids.
//!
//! [`CalendarGridBuilder`] turns a reference date into the Monday to Sunday week rows needed
//! to display its month, keyed by ISO week number.

pub mod config;
pub mod error;
pub mod grid;
pub mod month;

pub use error::{Error, ErrorKind, Result};
pub use grid::{CalendarGridBuilder, DayEntry, Grid, WeekRow};
