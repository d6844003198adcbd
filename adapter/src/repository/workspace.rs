use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::WorkspaceId,
    workspace::{event::CreateWorkspace, Workspace},
};
use kernel::repository::workspace::WorkspaceRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::workspace::WorkspaceRow, ConnectionPool};

#[derive(new)]
pub struct WorkspaceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl WorkspaceRepository for WorkspaceRepositoryImpl {
    async fn create(&self, event: CreateWorkspace) -> AppResult<Workspace> {
        let workspace_id = WorkspaceId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO workspaces (workspace_id, name, location, capacity, created_by)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(workspace_id)
        .bind(&event.name)
        .bind(&event.location)
        .bind(event.capacity)
        .bind(event.created_by)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no workspace record has been created".into(),
            ));
        }

        let row: WorkspaceRow = sqlx::query_as(
            r#"
                SELECT
                    w.workspace_id,
                    w.name,
                    w.location,
                    w.capacity,
                    w.created_by,
                    u.email AS owner_email,
                    w.created_at
                FROM workspaces AS w
                INNER JOIN users AS u ON w.created_by = u.user_id
                WHERE w.workspace_id = $1
            "#,
        )
        .bind(workspace_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.into())
    }

    async fn find_all(&self) -> AppResult<Vec<Workspace>> {
        let rows: Vec<WorkspaceRow> = sqlx::query_as(
            r#"
                SELECT
                    w.workspace_id,
                    w.name,
                    w.location,
                    w.capacity,
                    w.created_by,
                    u.email AS owner_email,
                    w.created_at
                FROM workspaces AS w
                INNER JOIN users AS u ON w.created_by = u.user_id
                ORDER BY w.created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Workspace::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::id::UserId;

    async fn insert_admin(pool: &sqlx::PgPool) -> anyhow::Result<UserId> {
        let user_id = UserId::new();
        sqlx::query(
            "INSERT INTO users (user_id, email, password_hash, role) VALUES ($1, $2, $3, 'admin')",
        )
        .bind(user_id)
        .bind("admin@example.com")
        .bind("not-a-real-hash")
        .execute(pool)
        .await?;
        Ok(user_id)
    }

    #[sqlx::test]
    async fn test_register_workspace(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let admin_id = insert_admin(&pool).await?;
        let repo = WorkspaceRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo
            .create(CreateWorkspace::new(
                "Room A".into(),
                "Floor 1".into(),
                10,
                admin_id,
            ))
            .await?;

        assert_eq!(created.name, "Room A");
        assert_eq!(created.location, "Floor 1");
        assert_eq!(created.capacity, 10);
        assert_eq!(created.owner.owner_id, admin_id);
        assert_eq!(created.owner.email, "admin@example.com");

        let all = repo.find_all().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].workspace_id, created.workspace_id);
        Ok(())
    }
}
