use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{event::CreateBooking, Booking},
    id::{BookingId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::booking::BookingRow, ConnectionPool};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        // The existence check only decides between "unknown workspace" and
        // "slot taken"; slot exclusivity itself rests on the unique
        // constraint over (workspace_id, booked_on, slot_time), so two
        // racing inserts cannot both succeed.
        {
            let workspace: Option<(uuid::Uuid,)> = sqlx::query_as(
                r#"
                    SELECT workspace_id
                    FROM workspaces
                    WHERE workspace_id = $1
                "#,
            )
            .bind(event.workspace_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if workspace.is_none() {
                return Err(AppError::EntityNotFound(format!(
                    "workspace ({}) was not found",
                    event.workspace_id
                )));
            }
        }

        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings
                (booking_id, workspace_id, user_id, booked_on, slot_time,
                contact_name, contact_phone, contact_email)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking_id)
        .bind(event.workspace_id)
        .bind(event.booked_by)
        .bind(event.booked_on)
        .bind(event.slot_time)
        .bind(&event.contact_name)
        .bind(&event.contact_phone)
        .bind(&event.contact_email)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                AppError::SlotTaken(format!(
                    "workspace ({}) is already booked for {} at {}",
                    event.workspace_id,
                    event.booked_on,
                    event.slot_time.format("%H:%M")
                ))
            }
            e => AppError::SpecificOperationError(e),
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no booking record has been created".into(),
            ));
        }

        // The caller gets the persisted booking with the workspace name and
        // location attached.
        let row: BookingRow = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.workspace_id,
                    b.user_id,
                    b.booked_on,
                    b.slot_time,
                    b.contact_name,
                    b.contact_phone,
                    b.contact_email,
                    b.created_at,
                    w.name AS workspace_name,
                    w.location AS workspace_location
                FROM bookings AS b
                INNER JOIN workspaces AS w ON b.workspace_id = w.workspace_id
                WHERE b.booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(row.into())
    }

    async fn find_all_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.workspace_id,
                    b.user_id,
                    b.booked_on,
                    b.slot_time,
                    b.contact_name,
                    b.contact_phone,
                    b.contact_email,
                    b.created_at,
                    w.name AS workspace_name,
                    w.location AS workspace_location
                FROM bookings AS b
                INNER JOIN workspaces AS w ON b.workspace_id = w.workspace_id
                WHERE b.user_id = $1
                ORDER BY b.booked_on ASC, b.slot_time ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveTime};
    use kernel::model::id::WorkspaceId;

    use super::*;

    async fn insert_user(pool: &sqlx::PgPool, email: &str) -> anyhow::Result<UserId> {
        let user_id = UserId::new();
        sqlx::query(
            "INSERT INTO users (user_id, email, password_hash, role) VALUES ($1, $2, $3, 'user')",
        )
        .bind(user_id)
        .bind(email)
        .bind("not-a-real-hash")
        .execute(pool)
        .await?;
        Ok(user_id)
    }

    async fn insert_workspace(pool: &sqlx::PgPool, created_by: UserId) -> anyhow::Result<WorkspaceId> {
        let workspace_id = WorkspaceId::new();
        sqlx::query(
            "INSERT INTO workspaces (workspace_id, name, location, capacity, created_by) \
             VALUES ($1, 'Room A', 'Floor 1', 10, $2)",
        )
        .bind(workspace_id)
        .bind(created_by)
        .execute(pool)
        .await?;
        Ok(workspace_id)
    }

    fn booking_event(
        workspace_id: WorkspaceId,
        booked_by: UserId,
        contact_email: &str,
    ) -> CreateBooking {
        CreateBooking::new(
            workspace_id,
            booked_by,
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            "Taro Yamada".into(),
            "1234567890".into(),
            contact_email.into(),
        )
    }

    #[sqlx::test]
    async fn admits_a_free_slot(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let user_id = insert_user(&pool, "user@example.com").await?;
        let workspace_id = insert_workspace(&pool, user_id).await?;
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        let booking = repo
            .create(booking_event(workspace_id, user_id, "user@example.com"))
            .await?;

        assert_eq!(booking.booked_by, user_id);
        assert_eq!(booking.workspace.workspace_id, workspace_id);
        assert_eq!(booking.workspace.name, "Room A");
        assert_eq!(booking.workspace.location, "Floor 1");
        assert_eq!(booking.slot_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());

        let own = repo.find_all_by_user_id(user_id).await?;
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].booking_id, booking.booking_id);
        Ok(())
    }

    #[sqlx::test]
    async fn rejects_a_taken_slot(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let first = insert_user(&pool, "first@example.com").await?;
        let second = insert_user(&pool, "second@example.com").await?;
        let workspace_id = insert_workspace(&pool, first).await?;
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(booking_event(workspace_id, first, "first@example.com"))
            .await?;
        let err = repo
            .create(booking_event(workspace_id, second, "second@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::SlotTaken(_)));
        Ok(())
    }

    #[sqlx::test]
    async fn rejects_an_unknown_workspace(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let user_id = insert_user(&pool, "user@example.com").await?;
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        let err = repo
            .create(booking_event(WorkspaceId::new(), user_id, "user@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EntityNotFound(_)));
        Ok(())
    }

    #[sqlx::test]
    async fn concurrent_admissions_yield_a_single_success(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let first = insert_user(&pool, "first@example.com").await?;
        let second = insert_user(&pool, "second@example.com").await?;
        let workspace_id = insert_workspace(&pool, first).await?;
        let repo = Arc::new(BookingRepositoryImpl::new(ConnectionPool::new(pool)));

        let attempts = 8;
        let mut handles = Vec::with_capacity(attempts);
        for n in 0..attempts {
            let repo = Arc::clone(&repo);
            let booked_by = if n % 2 == 0 { first } else { second };
            handles.push(tokio::spawn(async move {
                repo.create(booking_event(
                    workspace_id,
                    booked_by,
                    &format!("caller{n}@example.com"),
                ))
                .await
            }));
        }

        let mut admitted = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await? {
                Ok(_) => admitted += 1,
                Err(AppError::SlotTaken(_)) => rejected += 1,
                Err(e) => return Err(e.into()),
            }
        }

        assert_eq!(admitted, 1);
        assert_eq!(rejected, attempts - 1);
        Ok(())
    }
}
