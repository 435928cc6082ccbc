use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// a scheduled event drawing traffic to a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialEvent {
    pub id: u64,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub attendance: u32,
}

impl SpecialEvent {
    /// `[start - minutes_before, start]`
    pub fn arrival_window(&self, minutes_before: i64) -> (NaiveDateTime, NaiveDateTime) {
        (self.start - Duration::minutes(minutes_before), self.start)
    }

    /// `[d1, d1 + length]` where `d1` is `offset` minutes after the start, or
    /// the end of the event if that comes first.
    pub fn departure_window(&self, offset: i64, length: i64) -> (NaiveDateTime, NaiveDateTime) {
        let d1 = std::cmp::min(self.start + Duration::minutes(offset), self.end);
        (d1, d1 + Duration::minutes(length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("test invariant failed")
    }

    #[test]
    fn test_windows() {
        let event = SpecialEvent {
            id: 1,
            name: String::from("game"),
            start: dt("2024-05-01 19:00"),
            end: dt("2024-05-01 22:00"),
            lat: 44.97,
            lon: -93.25,
            attendance: 40000,
        };
        assert_eq!(
            event.arrival_window(150),
            (dt("2024-05-01 16:30"), dt("2024-05-01 19:00"))
        );
        assert_eq!(
            event.departure_window(120, 150),
            (dt("2024-05-01 21:00"), dt("2024-05-01 23:30"))
        );

        let short = SpecialEvent {
            end: dt("2024-05-01 20:00"),
            ..event
        };
        assert_eq!(short.departure_window(120, 150).0, dt("2024-05-01 20:00"));
    }
}
