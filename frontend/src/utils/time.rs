use chrono::{DateTime, Datelike, Utc};

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub fn current_year() -> i32 {
    now_utc().year()
}

/// Seconds since the epoch, as carried in a JWT `exp` claim.
pub fn now_epoch_seconds() -> i64 {
    now_utc().timestamp()
}
