use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{FieldErrors, Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Canceled,
}

impl ReservationStatus {
    pub const ALL: [&'static str; 3] = ["pending", "confirmed", "canceled"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ReservationStatus::Pending),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "canceled" => Some(ReservationStatus::Canceled),
            _ => None,
        }
    }

    /// pending -> confirmed -> canceled, or pending -> canceled
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!((self, next), (Pending, Confirmed) | (Pending, Canceled) | (Confirmed, Canceled))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub table_id: Uuid,
    pub user_id: Uuid,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub guest_count: i32,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// POST /api/reservations body
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateReservationInput {
    pub table_id: Option<Uuid>,
    pub reservation_date: String,
    pub reservation_time: String,
    pub guest_count: Option<i32>,
}

/// Checked reservation request ready for the conflict check
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub table_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guest_count: i32,
}

impl Validate for CreateReservationInput {
    type Valid = NewReservation;

    fn validate(self) -> Result<NewReservation, ValidationErrors> {
        let mut errors = FieldErrors::default();
        let table_id = errors.required_some("table_id", self.table_id);
        let date = errors.date("reservation_date", &self.reservation_date);
        let time = errors.time("reservation_time", &self.reservation_time);
        let guest_count = errors.required_some("guest_count", self.guest_count);
        if let Some(count) = guest_count {
            errors.at_least("guest_count", count, 1);
        }
        errors.finish()?;

        match (table_id, date, time, guest_count) {
            (Some(table_id), Some(date), Some(time), Some(guest_count)) => Ok(NewReservation {
                table_id,
                date,
                time,
                guest_count,
            }),
            _ => Err(ValidationErrors::single("reservation", "Incomplete reservation")),
        }
    }
}

/// PUT /api/reservations/:id body; absent fields keep their value
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateReservationInput {
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    pub guest_count: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationChanges {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub guest_count: Option<i32>,
}

impl ReservationChanges {
    pub fn moves_slot(&self) -> bool {
        self.date.is_some() || self.time.is_some()
    }
}

impl Validate for UpdateReservationInput {
    type Valid = ReservationChanges;

    fn validate(self) -> Result<ReservationChanges, ValidationErrors> {
        let mut errors = FieldErrors::default();
        let date = self
            .reservation_date
            .as_deref()
            .and_then(|v| errors.date("reservation_date", v));
        let time = self
            .reservation_time
            .as_deref()
            .and_then(|v| errors.time("reservation_time", v));
        if let Some(count) = self.guest_count {
            errors.at_least("guest_count", count, 1);
        }
        if self.reservation_date.is_none() && self.reservation_time.is_none() && self.guest_count.is_none() {
            errors.add("reservation", "At least one field must be provided");
        }
        errors.finish()?;

        Ok(ReservationChanges {
            date,
            time,
            guest_count: self.guest_count,
        })
    }
}

/// PATCH /api/reservations/:id/status body
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusChangeInput {
    pub status: String,
}

impl Validate for StatusChangeInput {
    type Valid = ReservationStatus;

    fn validate(self) -> Result<ReservationStatus, ValidationErrors> {
        let mut errors = FieldErrors::default();
        if errors.required("status", &self.status) {
            errors.one_of("status", &self.status, &ReservationStatus::ALL);
        }
        errors.finish()?;
        ReservationStatus::parse(&self.status)
            .ok_or_else(|| ValidationErrors::single("status", "Unknown status"))
    }
}

/// GET /api/reservations query string
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReservationQuery {
    pub table_id: Option<Uuid>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub include_deleted: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationFilter {
    pub table_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
    pub user_id: Option<Uuid>,
    pub include_deleted: bool,
}

impl Validate for ReservationQuery {
    type Valid = ReservationFilter;

    fn validate(self) -> Result<ReservationFilter, ValidationErrors> {
        let mut errors = FieldErrors::default();
        let date = self.date.as_deref().and_then(|v| errors.date("date", v));
        if let Some(status) = self.status.as_deref() {
            errors.one_of("status", status, &ReservationStatus::ALL);
        }
        errors.finish()?;

        Ok(ReservationFilter {
            table_id: self.table_id,
            date,
            status: self.status.as_deref().and_then(ReservationStatus::parse),
            user_id: None,
            include_deleted: self.include_deleted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_input_parses_date_and_time() {
        let table_id = Uuid::new_v4();
        let input = CreateReservationInput {
            table_id: Some(table_id),
            reservation_date: "2024-06-01".into(),
            reservation_time: "18:00:00".into(),
            guest_count: Some(4),
        };
        let valid = input.validate().unwrap();
        assert_eq!(valid.table_id, table_id);
        assert_eq!(valid.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(valid.time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn create_input_reports_every_bad_field() {
        let input = CreateReservationInput {
            table_id: None,
            reservation_date: "06/01/2024".into(),
            reservation_time: "6pm".into(),
            guest_count: Some(0),
        };
        let err = input.validate().unwrap_err();
        for field in ["table_id", "reservation_date", "reservation_time", "guest_count"] {
            assert!(err.field_errors.contains_key(field), "missing error for {}", field);
        }
    }

    #[test]
    fn status_transitions() {
        use ReservationStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Canceled));
        assert!(Confirmed.can_transition_to(Canceled));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Canceled.can_transition_to(Confirmed));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn status_input_rejects_unknown_values() {
        let err = StatusChangeInput { status: "seated".into() }.validate().unwrap_err();
        assert!(err.field_errors["status"].contains("pending"));
        let ok = StatusChangeInput { status: "confirmed".into() }.validate().unwrap();
        assert_eq!(ok, ReservationStatus::Confirmed);
    }

    #[test]
    fn empty_update_is_rejected() {
        let err = UpdateReservationInput::default().validate().unwrap_err();
        assert!(err.field_errors.contains_key("reservation"));
    }
}
