//! carefinder-schedule
//!
//! Lifecycle status and display labels for scheduled records. Every function
//! takes `now` from the caller; nothing here reads a clock.

use std::cmp::Ordering;

use chrono::{Days, NaiveDateTime};

use carefinder_core::types::{DateLabel, Locale, Status};

/// Compares calendar dates only, so a record stays `Active` for its whole day.
pub fn derive_status(scheduled_at: NaiveDateTime, now: NaiveDateTime) -> Status {
    match scheduled_at.date().cmp(&now.date()) {
        Ordering::Greater => Status::Upcoming,
        Ordering::Equal => Status::Active,
        Ordering::Less => Status::Completed,
    }
}

pub fn date_label(scheduled_at: NaiveDateTime, now: NaiveDateTime, locale: Locale) -> DateLabel {
    let date = scheduled_at.date();
    let today = now.date();
    if date == today {
        DateLabel::Today
    } else if today.checked_add_days(Days::new(1)) == Some(date) {
        DateLabel::Tomorrow
    } else {
        DateLabel::On(locale.format_date(date))
    }
}

/// Status and label for an optional schedule. Unscheduled records are always
/// available and get neither.
pub fn annotate(
    scheduled_at: Option<NaiveDateTime>,
    now: NaiveDateTime,
    locale: Locale,
) -> (Option<Status>, Option<DateLabel>) {
    match scheduled_at {
        Some(at) => (Some(derive_status(at, now)), Some(date_label(at, now, locale))),
        None => (None, None),
    }
}
