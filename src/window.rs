use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::VdsError;

pub const DAILY_STEP_SECS: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl RunWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> RunWindow {
        RunWindow { start, end }
    }

    pub fn from_date(date: &str) -> Result<RunWindow, VdsError> {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| VdsError::InvalidDate(date.to_string()))?;
        let start = day.and_time(NaiveTime::MIN);
        Ok(RunWindow { start, end: start })
    }

    // Inclusive of both endpoints: a window of N whole steps yields N + 1
    // entries, a zero-length window yields one.
    pub fn date_range(&self, step_secs: i64) -> Vec<NaiveDateTime> {
        let span = (self.end - self.start).num_seconds();
        let count = (span + step_secs).div_euclid(step_secs);
        (0..count)
            .map(|i| self.start + Duration::seconds(step_secs * i))
            .collect()
    }

    pub fn timesteps(&self, step_secs: i64) -> i64 {
        let span = self.end - self.start;
        if step_secs < DAILY_STEP_SECS {
            span.num_seconds() / step_secs + 1
        } else {
            span.num_days() + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_time(time.parse().unwrap())
    }

    #[test]
    fn degenerate_window_yields_single_entry() {
        let window = RunWindow::from_date("2018-03-04").unwrap();
        assert_eq!(window.date_range(DAILY_STEP_SECS), vec![at("2018-03-04", "00:00:00")]);
    }

    #[test]
    fn one_day_window_yields_both_endpoints() {
        let window = RunWindow::new(at("2018-03-04", "00:00:00"), at("2018-03-05", "00:00:00"));
        let range = window.date_range(DAILY_STEP_SECS);
        assert_eq!(range.len(), 2);
        assert_eq!(range[0], window.start);
        assert_eq!(range[1], window.end);
    }

    #[test]
    fn partial_trailing_step_is_dropped() {
        let window = RunWindow::new(at("2018-03-04", "00:00:00"), at("2018-03-04", "01:30:00"));
        let range = window.date_range(3_600);
        assert_eq!(range.len(), 2);
        assert_eq!(range[1], at("2018-03-04", "01:00:00"));
    }

    #[test]
    fn reversed_window_is_empty() {
        let window = RunWindow::new(at("2018-03-05", "00:00:00"), at("2018-03-03", "00:00:00"));
        assert!(window.date_range(DAILY_STEP_SECS).is_empty());
    }

    #[test]
    fn from_date_rejects_garbage() {
        assert!(matches!(
            RunWindow::from_date("04-03-2018"),
            Err(VdsError::InvalidDate(_))
        ));
    }

    #[test]
    fn timesteps_counts_inclusively() {
        let window = RunWindow::new(at("2018-03-04", "00:00:00"), at("2018-03-06", "00:00:00"));
        assert_eq!(window.timesteps(DAILY_STEP_SECS), 3);
        assert_eq!(window.timesteps(3_600), 49);
    }
}
