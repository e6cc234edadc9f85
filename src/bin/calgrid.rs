extern crate calgrid as lib;

use chrono::{Datelike, Local};
use flexi_logger::{FileSpec, Logger};
use lib::CalendarGridBuilder;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "calgrid",
    about = "Print the week rows of a month view calendar."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(short = "y", long = "year", help = "year of the reference date")]
    pub year: Option<i32>,

    #[structopt(short = "m", long = "month", help = "month of the reference date (1-12)")]
    pub month: Option<u32>,

    #[structopt(
        short = "d",
        long = "day",
        help = "day of the reference date, defaults to 1 if year or month is given"
    )]
    pub day: Option<u32>,
}

impl Args {
    fn reference(&self, today: chrono::NaiveDate) -> lib::Result<CalendarGridBuilder> {
        if self.year.is_none() && self.month.is_none() && self.day.is_none() {
            return Ok(CalendarGridBuilder::new(today));
        }

        CalendarGridBuilder::from_ymd(
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
            self.day.unwrap_or(1),
        )
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let mut logger =
        Logger::try_with_env_or_str(config.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL))?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    let today = Local::now().date_naive();
    let builder = args.reference(today)?;
    let selected = config.today.unwrap_or(today);

    log::info!(
        "reference date {}, selected week of {}",
        builder.reference(),
        selected
    );

    let grid = builder.build_grid(selected);
    print!("{}", toml::to_string_pretty(&grid)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn args(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Args {
        Args {
            configfile: None,
            log_file: None,
            year,
            month,
            day,
        }
    }

    #[test]
    fn reference_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        let builder = args(None, None, None).reference(today).unwrap();
        assert_eq!(builder.reference(), today);
    }

    #[test]
    fn reference_from_partial_arguments() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();

        let builder = args(None, Some(12), None).reference(today).unwrap();
        assert_eq!(builder.reference(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());

        let builder = args(Some(2027), Some(1), Some(10)).reference(today).unwrap();
        assert_eq!(builder.reference(), NaiveDate::from_ymd_opt(2027, 1, 10).unwrap());
    }

    #[test]
    fn reference_rejects_invalid_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        let err = args(Some(2023), Some(2), Some(29))
            .reference(today)
            .unwrap_err();
        assert!(matches!(err.kind, lib::ErrorKind::InvalidArgument));
    }
}
