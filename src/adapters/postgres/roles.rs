//! PostgreSQL `user_roles` table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::role::UserRole;
use crate::ports::RoleRepository;

pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_role(&self, user: &UserId) -> Result<Option<UserRole>, DomainError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT role FROM user_roles WHERE email = $1")
            .bind(user.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch role", e))?;

        row.map(|(role,)| {
            role.parse::<UserRole>().map_err(|_| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid role value: {}", role),
                )
            })
        })
        .transpose()
    }

    async fn upsert_role(&self, user: &UserId, role: UserRole) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_roles (email, role, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role, updated_at = NOW()
            "#,
        )
        .bind(user.as_str())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save role", e))?;
        Ok(())
    }

    async fn delete_role(&self, user: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM user_roles WHERE email = $1")
            .bind(user.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete role", e))?;
        Ok(result.rows_affected() > 0)
    }
}
