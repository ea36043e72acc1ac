use chrono::{Duration, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::database::models::{Reservation, ReservationStatus};

/// Outcome of checking a requested slot against existing bookings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictCheck {
    NoConflict,
    ConflictingWith(Uuid),
}

impl ConflictCheck {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ConflictCheck::ConflictingWith(_))
    }
}

/// Minimum-separation rule for confirmed reservations on one table.
///
/// Only confirmed, non-deleted reservations on the same table and the same
/// calendar date are compared. Times are compared as plain times of day, so a
/// 23:30 booking never blocks 00:15 on the following date.
#[derive(Debug, Clone, Copy)]
pub struct ReservationConflictChecker {
    min_separation: Duration,
}

impl Default for ReservationConflictChecker {
    fn default() -> Self {
        Self {
            min_separation: Duration::hours(2),
        }
    }
}

impl ReservationConflictChecker {
    pub fn new(min_separation: Duration) -> Self {
        Self { min_separation }
    }

    pub fn from_minutes(minutes: i64) -> Self {
        Self::new(Duration::minutes(minutes))
    }

    /// First existing reservation that blocks the requested slot, if any
    pub fn check<'a, I>(&self, table_id: Uuid, date: NaiveDate, time: NaiveTime, existing: I) -> ConflictCheck
    where
        I: IntoIterator<Item = &'a Reservation>,
    {
        existing
            .into_iter()
            .find(|r| r.table_id == table_id && self.blocks(r, date, time))
            .map_or(ConflictCheck::NoConflict, |r| ConflictCheck::ConflictingWith(r.id))
    }

    fn blocks(&self, existing: &Reservation, date: NaiveDate, time: NaiveTime) -> bool {
        if existing.deleted || existing.status != ReservationStatus::Confirmed {
            return false;
        }
        if existing.reservation_date != date {
            return false;
        }
        time_gap(existing.reservation_time, time) < self.min_separation
    }

    /// Message returned to the client when a slot is rejected
    pub fn conflict_message(&self) -> String {
        let minutes = self.min_separation.num_minutes();
        let window = if minutes % 60 == 0 {
            let hours = minutes / 60;
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        } else {
            format!("{} minutes", minutes)
        };
        format!("cannot book within {} of an existing confirmed reservation", window)
    }
}

fn time_gap(a: NaiveTime, b: NaiveTime) -> Duration {
    let gap = a.signed_duration_since(b);
    if gap < Duration::zero() {
        -gap
    } else {
        gap
    }
}
