use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::config::ReservationConfig;
use crate::database::models::{
    NewReservation, Reservation, ReservationChanges, ReservationFilter, ReservationStatus,
};
use crate::database::repository::{reservation, table};
use crate::database::{DatabaseError, UnitOfWork};
use crate::domain::{ConflictCheck, DomainError, ReservationConflictChecker};
use crate::validation::ValidationErrors;

/// Data access needed by reservation use-cases
#[async_trait]
pub trait ReservationStore: Send {
    /// Lock the table for the current transaction; false when it does not exist
    async fn lock_table(&mut self, table_id: Uuid) -> Result<bool, DatabaseError>;
    async fn confirmed_for_table_on(&mut self, table_id: Uuid, date: NaiveDate) -> Result<Vec<Reservation>, DatabaseError>;
    async fn insert_reservation(&mut self, user_id: Uuid, new: &NewReservation) -> Result<Reservation, DatabaseError>;
    async fn find_reservation(&mut self, id: Uuid) -> Result<Option<Reservation>, DatabaseError>;
    async fn find_deleted_reservation(&mut self, id: Uuid) -> Result<Option<Reservation>, DatabaseError>;
    async fn list_reservations(&mut self, filter: &ReservationFilter) -> Result<Vec<Reservation>, DatabaseError>;
    async fn update_reservation(&mut self, id: Uuid, changes: &ReservationChanges) -> Result<Reservation, DatabaseError>;
    async fn set_reservation_status(&mut self, id: Uuid, status: ReservationStatus) -> Result<Reservation, DatabaseError>;
    async fn delete_reservation(&mut self, id: Uuid) -> Result<Reservation, DatabaseError>;
    async fn restore_reservation(&mut self, id: Uuid) -> Result<Reservation, DatabaseError>;
}

#[async_trait]
impl ReservationStore for UnitOfWork {
    async fn lock_table(&mut self, table_id: Uuid) -> Result<bool, DatabaseError> {
        table::lock(self.conn(), table_id).await
    }

    async fn confirmed_for_table_on(&mut self, table_id: Uuid, date: NaiveDate) -> Result<Vec<Reservation>, DatabaseError> {
        reservation::confirmed_for_table_on(self.conn(), table_id, date).await
    }

    async fn insert_reservation(&mut self, user_id: Uuid, new: &NewReservation) -> Result<Reservation, DatabaseError> {
        reservation::insert(self.conn(), user_id, new).await
    }

    async fn find_reservation(&mut self, id: Uuid) -> Result<Option<Reservation>, DatabaseError> {
        reservation::find_for_update(self.conn(), id).await
    }

    async fn find_deleted_reservation(&mut self, id: Uuid) -> Result<Option<Reservation>, DatabaseError> {
        reservation::find_deleted_for_update(self.conn(), id).await
    }

    async fn list_reservations(&mut self, filter: &ReservationFilter) -> Result<Vec<Reservation>, DatabaseError> {
        reservation::list(self.conn(), filter).await
    }

    async fn update_reservation(&mut self, id: Uuid, changes: &ReservationChanges) -> Result<Reservation, DatabaseError> {
        reservation::update(self.conn(), id, changes).await
    }

    async fn set_reservation_status(&mut self, id: Uuid, status: ReservationStatus) -> Result<Reservation, DatabaseError> {
        reservation::set_status(self.conn(), id, status).await
    }

    async fn delete_reservation(&mut self, id: Uuid) -> Result<Reservation, DatabaseError> {
        reservation::RESERVATIONS.soft_delete(self.conn(), id).await
    }

    async fn restore_reservation(&mut self, id: Uuid) -> Result<Reservation, DatabaseError> {
        reservation::RESERVATIONS.restore(self.conn(), id).await
    }
}

/// Reservation use-cases: booking, changes, status transitions
#[derive(Debug, Clone)]
pub struct ReservationService {
    checker: ReservationConflictChecker,
    max_guests: i32,
}

impl ReservationService {
    pub fn new(config: &ReservationConfig) -> Self {
        Self {
            checker: ReservationConflictChecker::from_minutes(config.min_separation_minutes),
            max_guests: config.max_guests,
        }
    }

    /// Book a table. The new reservation starts as `pending`.
    pub async fn create<S>(&self, store: &mut S, user_id: Uuid, new: NewReservation) -> Result<Reservation, DomainError>
    where
        S: ReservationStore + ?Sized,
    {
        self.check_guest_count(new.guest_count)?;

        if !store.lock_table(new.table_id).await? {
            return Err(DomainError::not_found("table", new.table_id));
        }

        let existing = store.confirmed_for_table_on(new.table_id, new.date).await?;
        if let ConflictCheck::ConflictingWith(blocking) = self.checker.check(new.table_id, new.date, new.time, &existing) {
            warn!(
                "Reservation rejected: table {} on {} at {} conflicts with {}",
                new.table_id, new.date, new.time, blocking
            );
            return Err(DomainError::Conflict(self.checker.conflict_message()));
        }

        let created = store.insert_reservation(user_id, &new).await?;
        info!("Reservation {} created for table {} on {} at {}", created.id, created.table_id, created.reservation_date, created.reservation_time);
        Ok(created)
    }

    pub async fn get<S>(&self, store: &mut S, actor: &AuthUser, id: Uuid) -> Result<Reservation, DomainError>
    where
        S: ReservationStore + ?Sized,
    {
        let found = self.load(store, id).await?;
        authorize(actor, &found)?;
        Ok(found)
    }

    /// Customers only ever see their own reservations
    pub async fn list<S>(&self, store: &mut S, actor: &AuthUser, mut filter: ReservationFilter) -> Result<Vec<Reservation>, DomainError>
    where
        S: ReservationStore + ?Sized,
    {
        if !actor.is_staff() {
            filter.user_id = Some(actor.user_id);
            filter.include_deleted = false;
        }
        Ok(store.list_reservations(&filter).await?)
    }

    /// Change guest count, date or time. Moving a confirmed reservation
    /// re-runs the conflict check against the other confirmed bookings.
    pub async fn update<S>(
        &self,
        store: &mut S,
        actor: &AuthUser,
        id: Uuid,
        changes: ReservationChanges,
    ) -> Result<Reservation, DomainError>
    where
        S: ReservationStore + ?Sized,
    {
        let current = self.load(store, id).await?;
        authorize(actor, &current)?;

        if current.status == ReservationStatus::Canceled {
            return Err(DomainError::Conflict("canceled reservations cannot be changed".to_string()));
        }
        if let Some(count) = changes.guest_count {
            self.check_guest_count(count)?;
        }

        if current.status == ReservationStatus::Confirmed && changes.moves_slot() {
            let date = changes.date.unwrap_or(current.reservation_date);
            let time = changes.time.unwrap_or(current.reservation_time);
            self.ensure_slot_free(store, &current, date, time).await?;
        }

        Ok(store.update_reservation(id, &changes).await?)
    }

    /// Staff status transition; confirming re-runs the conflict check
    pub async fn change_status<S>(&self, store: &mut S, id: Uuid, status: ReservationStatus) -> Result<Reservation, DomainError>
    where
        S: ReservationStore + ?Sized,
    {
        let current = self.load(store, id).await?;

        if !current.status.can_transition_to(status) {
            return Err(ValidationErrors::single(
                "status",
                format!("Cannot change status from {:?} to {:?}", current.status, status).to_lowercase(),
            )
            .into());
        }

        if status == ReservationStatus::Confirmed {
            self.ensure_slot_free(store, &current, current.reservation_date, current.reservation_time)
                .await?;
        }

        let updated = store.set_reservation_status(id, status).await?;
        info!("Reservation {} is now {:?}", updated.id, updated.status);
        Ok(updated)
    }

    pub async fn delete<S>(&self, store: &mut S, id: Uuid) -> Result<Reservation, DomainError>
    where
        S: ReservationStore + ?Sized,
    {
        Ok(store.delete_reservation(id).await?)
    }

    /// Bring back a soft-deleted reservation. A confirmed one must still fit
    /// around the confirmed bookings made while it was gone.
    pub async fn restore<S>(&self, store: &mut S, id: Uuid) -> Result<Reservation, DomainError>
    where
        S: ReservationStore + ?Sized,
    {
        let deleted = store
            .find_deleted_reservation(id)
            .await?
            .ok_or_else(|| DomainError::not_found("deleted reservation", id))?;

        if deleted.status == ReservationStatus::Confirmed {
            self.ensure_slot_free(store, &deleted, deleted.reservation_date, deleted.reservation_time)
                .await?;
        }

        let restored = store.restore_reservation(id).await?;
        info!("Reservation {} restored", restored.id);
        Ok(restored)
    }

    async fn load<S>(&self, store: &mut S, id: Uuid) -> Result<Reservation, DomainError>
    where
        S: ReservationStore + ?Sized,
    {
        store
            .find_reservation(id)
            .await?
            .ok_or_else(|| DomainError::not_found("reservation", id))
    }

    async fn ensure_slot_free<S>(
        &self,
        store: &mut S,
        current: &Reservation,
        date: NaiveDate,
        time: chrono::NaiveTime,
    ) -> Result<(), DomainError>
    where
        S: ReservationStore + ?Sized,
    {
        if !store.lock_table(current.table_id).await? {
            return Err(DomainError::not_found("table", current.table_id));
        }

        let existing = store.confirmed_for_table_on(current.table_id, date).await?;
        let others = existing.iter().filter(|r| r.id != current.id);
        match self.checker.check(current.table_id, date, time, others) {
            ConflictCheck::NoConflict => {
                debug!("Slot {} {} free for reservation {}", date, time, current.id);
                Ok(())
            }
            ConflictCheck::ConflictingWith(blocking) => {
                warn!("Reservation {} blocked by {} on {} at {}", current.id, blocking, date, time);
                Err(DomainError::Conflict(self.checker.conflict_message()))
            }
        }
    }

    fn check_guest_count(&self, count: i32) -> Result<(), DomainError> {
        if count < 1 || count > self.max_guests {
            return Err(ValidationErrors::single(
                "guest_count",
                format!("Must be between 1 and {}", self.max_guests),
            )
            .into());
        }
        Ok(())
    }
}

fn authorize(actor: &AuthUser, reservation: &Reservation) -> Result<(), DomainError> {
    if actor.is_staff() || reservation.user_id == actor.user_id {
        Ok(())
    } else {
        Err(DomainError::Forbidden("reservation belongs to another user".to_string()))
    }
}
