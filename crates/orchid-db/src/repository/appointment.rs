//! # Appointment Repository
//!
//! Database operations for the booking calendar.
//!
//! ## Key Operations
//! - List one day's appointments ordered by start time (the calendar view)
//! - CRUD with hard delete (a cancelled booking keeps its row via status;
//!   delete is for bookings entered in error)
//! - Status updates (scheduled / completed / cancelled / no_show)

use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use orchid_core::{Appointment, AppointmentStatus};

const SELECT_COLUMNS: &str = r#"
    id, customer_id, staff_id, service_id,
    appointment_date, appointment_time, duration_minutes,
    status, notes, created_at, updated_at
"#;

/// Fields accepted when booking or rebooking an appointment.
///
/// The repository owns id, status, and timestamps; new bookings always
/// start out `scheduled`.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub customer_id: String,
    pub staff_id: String,
    pub service_id: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub duration_minutes: i64,
    pub notes: Option<String>,
}

impl NewAppointment {
    fn validate(&self) -> Result<(), DbError> {
        if self.duration_minutes <= 0 {
            return Err(DbError::InvalidInput(
                "duration_minutes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Repository for appointment database operations.
#[derive(Debug, Clone)]
pub struct AppointmentRepository {
    pool: SqlitePool,
}

impl AppointmentRepository {
    /// Creates a new AppointmentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AppointmentRepository { pool }
    }

    /// Lists all appointments on a calendar day, ordered by start time.
    pub async fn list_for_date(&self, date: NaiveDate) -> DbResult<Vec<Appointment>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM appointments \
             WHERE appointment_date = ?1 ORDER BY appointment_time"
        );
        let appointments = sqlx::query_as::<_, Appointment>(&sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;

        debug!(date = %date, count = appointments.len(), "Listed appointments");
        Ok(appointments)
    }

    /// Gets an appointment by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Appointment>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM appointments WHERE id = ?1");
        let appointment = sqlx::query_as::<_, Appointment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(appointment)
    }

    /// Books an appointment and returns it. New bookings start `scheduled`.
    pub async fn create(&self, new: NewAppointment) -> DbResult<Appointment> {
        new.validate()?;

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            customer_id: new.customer_id,
            staff_id: new.staff_id,
            service_id: new.service_id,
            appointment_date: new.appointment_date,
            appointment_time: new.appointment_time,
            duration_minutes: new.duration_minutes,
            status: AppointmentStatus::Scheduled,
            notes: new.notes.and_then(|n| {
                let n = n.trim().to_string();
                if n.is_empty() {
                    None
                } else {
                    Some(n)
                }
            }),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %appointment.id, date = %appointment.appointment_date, "Booking appointment");

        sqlx::query(
            r#"
            INSERT INTO appointments (
                id, customer_id, staff_id, service_id,
                appointment_date, appointment_time, duration_minutes,
                status, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&appointment.id)
        .bind(&appointment.customer_id)
        .bind(&appointment.staff_id)
        .bind(&appointment.service_id)
        .bind(appointment.appointment_date)
        .bind(appointment.appointment_time)
        .bind(appointment.duration_minutes)
        .bind(appointment.status)
        .bind(&appointment.notes)
        .bind(appointment.created_at)
        .bind(appointment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(appointment)
    }

    /// Rebooks an appointment: who, what, and when. Status is untouched;
    /// use [`set_status`](Self::set_status) for lifecycle changes.
    pub async fn update(&self, id: &str, fields: NewAppointment) -> DbResult<()> {
        fields.validate()?;

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE appointments SET
                customer_id = ?2,
                staff_id = ?3,
                service_id = ?4,
                appointment_date = ?5,
                appointment_time = ?6,
                duration_minutes = ?7,
                notes = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&fields.customer_id)
        .bind(&fields.staff_id)
        .bind(&fields.service_id)
        .bind(fields.appointment_date)
        .bind(fields.appointment_time)
        .bind(fields.duration_minutes)
        .bind(&fields.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Appointment", id));
        }

        Ok(())
    }

    /// Sets the lifecycle status of an appointment.
    pub async fn set_status(&self, id: &str, status: AppointmentStatus) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE appointments SET status = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Appointment", id));
        }

        debug!(id = %id, status = ?status, "Appointment status updated");
        Ok(())
    }

    /// Deletes an appointment outright (for bookings entered in error).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Appointment", id));
        }

        debug!(id = %id, "Appointment deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::catalog::NewCatalogItem;

    struct Fixture {
        db: Database,
        customer_id: String,
        staff_id: String,
        service_id: String,
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let customer = db
            .directory()
            .add_customer("Sam Taylor", None)
            .await
            .unwrap();
        let staff = db.directory().add_staff("Priya").await.unwrap();
        let service = db
            .catalog()
            .create(NewCatalogItem {
                name: "Dry Cut".to_string(),
                price_pence: 2500,
                icon: None,
                sku: None,
                barcode: None,
                category: Some("Services".to_string()),
                track_inventory: false,
                stock_quantity: 0,
            })
            .await
            .unwrap();

        Fixture {
            db,
            customer_id: customer.id,
            staff_id: staff.id,
            service_id: service.id,
        }
    }

    fn booking(f: &Fixture, date: &str, time: &str) -> NewAppointment {
        NewAppointment {
            customer_id: f.customer_id.clone(),
            staff_id: f.staff_id.clone(),
            service_id: f.service_id.clone(),
            appointment_date: date.parse().unwrap(),
            appointment_time: time.parse().unwrap(),
            duration_minutes: 30,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_book_and_list_day_ordered_by_time() {
        let f = fixture().await;
        let repo = f.db.appointments();

        repo.create(booking(&f, "2026-09-01", "14:00:00")).await.unwrap();
        repo.create(booking(&f, "2026-09-01", "09:00:00")).await.unwrap();
        repo.create(booking(&f, "2026-09-02", "10:00:00")).await.unwrap();

        let day = repo
            .list_for_date("2026-09-01".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(day.len(), 2);
        assert!(day[0].appointment_time < day[1].appointment_time);
        assert_eq!(day[0].status, AppointmentStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_status_lifecycle() {
        let f = fixture().await;
        let repo = f.db.appointments();

        let booked = repo.create(booking(&f, "2026-09-01", "09:00:00")).await.unwrap();
        repo.set_status(&booked.id, AppointmentStatus::NoShow)
            .await
            .unwrap();

        let fetched = repo.get_by_id(&booked.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, AppointmentStatus::NoShow);
    }

    #[tokio::test]
    async fn test_rebook_moves_slot_without_touching_status() {
        let f = fixture().await;
        let repo = f.db.appointments();

        let booked = repo.create(booking(&f, "2026-09-01", "09:00:00")).await.unwrap();
        repo.set_status(&booked.id, AppointmentStatus::Completed)
            .await
            .unwrap();

        let mut fields = booking(&f, "2026-09-03", "11:00:00");
        fields.notes = Some("  moved twice  ".to_string());
        repo.update(&booked.id, fields).await.unwrap();

        let fetched = repo.get_by_id(&booked.id).await.unwrap().unwrap();
        assert_eq!(fetched.appointment_date, "2026-09-03".parse().unwrap());
        assert_eq!(fetched.status, AppointmentStatus::Completed);
    }

    #[tokio::test]
    async fn test_delete_removes_booking() {
        let f = fixture().await;
        let repo = f.db.appointments();

        let booked = repo.create(booking(&f, "2026-09-01", "09:00:00")).await.unwrap();
        repo.delete(&booked.id).await.unwrap();

        assert!(repo.get_by_id(&booked.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&booked.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_booking_unknown_customer_is_rejected() {
        let f = fixture().await;
        let repo = f.db.appointments();

        let mut fields = booking(&f, "2026-09-01", "09:00:00");
        fields.customer_id = "ghost-customer".to_string();

        assert!(repo.create(fields).await.is_err());
        let day = repo
            .list_for_date("2026-09-01".parse().unwrap())
            .await
            .unwrap();
        assert!(day.is_empty());
    }

    #[tokio::test]
    async fn test_zero_duration_is_invalid() {
        let f = fixture().await;
        let repo = f.db.appointments();

        let mut fields = booking(&f, "2026-09-01", "09:00:00");
        fields.duration_minutes = 0;

        assert!(matches!(
            repo.create(fields).await,
            Err(DbError::InvalidInput(_))
        ));
    }
}
