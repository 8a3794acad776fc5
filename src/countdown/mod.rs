//! 마감 시각까지 남은 시간 계산과 표시 문자열 생성.
//!
//! 마감 시각은 시간대 표기가 없는 ISO 8601 문자열이며 실행 환경의 로컬 시간대로 해석한다.
//! 해석할 수 없는 마감 시각은 이미 마감된 것으로 취급한다.

// region:    --- Imports
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

// endregion: --- Imports

pub mod ticker;

pub use ticker::CountdownTicker;

/// 마감된 경매에 표시하는 문구
pub const CLOSED_LABEL: &str = "Closed";

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = MS_PER_SECOND * 60;
const MS_PER_HOUR: i64 = MS_PER_MINUTE * 60;
const MS_PER_DAY: i64 = MS_PER_HOUR * 24;

const LOCAL_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

// region:    --- Deadline Parsing
/// 마감 시각 문자열 해석
///
/// - 오프셋이 있는 RFC 3339 문자열은 그 오프셋을 따른다.
/// - `YYYY-MM-DDTHH:MM[:SS[.fff]]` 는 로컬 시간이다. 존재하지 않는 로컬 시각(DST 공백)은 실패.
/// - 날짜만 있는 `YYYY-MM-DD` 는 UTC 자정이다.
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
// endregion: --- Deadline Parsing

// region:    --- Countdown
/// 남은 시간. 0 이하이면 `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Closed,
    Open {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
}

impl Countdown {
    /// 밀리초 단위 남은 시간을 일/시/분/초로 분해
    pub fn from_millis(distance: i64) -> Self {
        if distance <= 0 {
            return Countdown::Closed;
        }
        Countdown::Open {
            days: distance / MS_PER_DAY,
            hours: (distance % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Countdown::Closed)
    }

    /// 남은 전체 초. 마감이면 None.
    pub fn total_seconds(&self) -> Option<i64> {
        match *self {
            Countdown::Closed => None,
            Countdown::Open {
                days,
                hours,
                minutes,
                seconds,
            } => Some(((days * 24 + hours) * 60 + minutes) * 60 + seconds),
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Countdown::Closed => f.write_str(CLOSED_LABEL),
            Countdown::Open {
                days,
                hours,
                minutes,
                seconds,
            } if days > 0 => write!(f, "{days}:{hours:02}:{minutes:02}:{seconds:02}"),
            Countdown::Open {
                hours,
                minutes,
                seconds,
                ..
            } => write!(f, "{hours:02}:{minutes:02}:{seconds:02}"),
        }
    }
}

/// `deadline - now` 로 남은 시간 계산
pub fn remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    Countdown::from_millis(deadline.timestamp_millis() - now.timestamp_millis())
}

/// 마감 시각 문자열 기준 남은 시간. 해석 실패는 마감으로 본다.
pub fn countdown_for(raw_deadline: &str, now: DateTime<Utc>) -> Countdown {
    parse_deadline(raw_deadline)
        .map(|deadline| remaining(deadline, now))
        .unwrap_or(Countdown::Closed)
}

/// 화면에 표시할 카운트다운 문자열
pub fn render_countdown(raw_deadline: &str, now: DateTime<Utc>) -> String {
    countdown_for(raw_deadline, now).to_string()
}
// endregion: --- Countdown
