use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// a time window sampled at a fixed interval. each timestamp produced by
/// [`Period::timeline`] marks the end of one sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// sampling interval in seconds
    pub interval: u32,
}

impl Period {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, interval: u32) -> Period {
        Period {
            start,
            end,
            interval,
        }
    }

    /// timestamps start+interval, start+2·interval, ... up to and including end.
    pub fn timeline(&self) -> PeriodIter {
        PeriodIter {
            current: self.start,
            end: self.end,
            step: Duration::seconds(self.interval as i64),
        }
    }

    /// number of timestamps in the timeline
    pub fn len(&self) -> usize {
        if self.interval == 0 || self.end <= self.start {
            return 0;
        }
        let secs = (self.end - self.start).num_seconds();
        (secs / self.interval as i64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn interval_hours(&self) -> f64 {
        self.interval as f64 / 3600.0
    }

    pub fn extend_end_hours(&self, hours: u32) -> Period {
        Period {
            end: self.end + Duration::hours(hours as i64),
            ..*self
        }
    }

    pub fn contains(&self, time: &NaiveDateTime) -> bool {
        self.start <= *time && *time <= self.end
    }

    /// splits a multi-day period into one period per calendar day, keeping the
    /// same time-of-day window on each day.
    pub fn daily_periods(&self) -> Vec<Period> {
        let start_time = self.start.time();
        let end_time = self.end.time();
        let mut result = vec![];
        let mut day: NaiveDate = self.start.date();
        while day <= self.end.date() {
            let day_end_date = if end_time <= start_time {
                day.succ_opt().unwrap_or(day)
            } else {
                day
            };
            let p = Period::new(
                NaiveDateTime::new(day, start_time),
                NaiveDateTime::new(day_end_date, end_time),
                self.interval,
            );
            if p.end <= self.end {
                result.push(p);
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        result
    }

    pub fn start_of_day(&self) -> NaiveDateTime {
        NaiveDateTime::new(self.start.date(), NaiveTime::MIN)
    }
}

/// finite iterator over a [`Period`] timeline. `Clone` gives a restart point.
#[derive(Debug, Clone)]
pub struct PeriodIter {
    current: NaiveDateTime,
    end: NaiveDateTime,
    step: Duration,
}

impl Iterator for PeriodIter {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step <= Duration::zero() {
            return None; // prevent unbounded iteration with a zero interval
        }
        let next = self.current + self.step;
        if next > self.end {
            return None;
        }
        self.current = next;
        Some(next)
    }
}
