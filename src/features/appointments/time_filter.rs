use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Date window for a doctor's appointment list, on UTC day boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentTimeFilter {
    /// Before today 00:00
    Past,
    /// From today 00:00 up to tomorrow 00:00
    Today,
    /// From tomorrow 00:00
    Future,
    All,
}

impl AppointmentTimeFilter {
    /// Parse the `filter` query value; absent or unknown values mean `All`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("past") => Self::Past,
            Some("today") => Self::Today,
            Some("future") => Self::Future,
            _ => Self::All,
        }
    }

    /// Lower (inclusive) and upper (exclusive) bounds relative to `now`
    pub fn bounds(&self, now: DateTime<Utc>) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let tomorrow = today + Duration::days(1);

        match self {
            Self::Past => (None, Some(today)),
            Self::Today => (Some(today), Some(tomorrow)),
            Self::Future => (Some(tomorrow), None),
            Self::All => (None, None),
        }
    }
}
