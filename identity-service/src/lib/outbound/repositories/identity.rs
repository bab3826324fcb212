use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::PersonName;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityStore;
use crate::identity::errors::IdentityError;

/// Postgres-backed identity store.
///
/// Uniqueness is enforced by a unique index on `LOWER(username)`, so
/// concurrent creates of the same username are resolved by the database:
/// at most one insert commits, the rest surface as `DuplicateUsername`.
/// All queries are parameterized.
pub struct PostgresIdentityStore {
    pool: PgPool,
}

impl PostgresIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> IdentityError {
    IdentityError::Database(e.to_string())
}

fn identity_from_row(row: &PgRow) -> Result<Identity, IdentityError> {
    let id: uuid::Uuid = row.try_get("id").map_err(database_error)?;
    let username: String = row.try_get("username").map_err(database_error)?;
    let name: String = row.try_get("name").map_err(database_error)?;
    let surname: String = row.try_get("surname").map_err(database_error)?;

    Ok(Identity {
        id: IdentityId(id),
        username: Username::new(username)?,
        name: PersonName::new(name)?,
        surname: PersonName::new(surname)?,
        password_hash: row.try_get("password_hash").map_err(database_error)?,
        created_at: row.try_get("created_at").map_err(database_error)?,
    })
}

#[async_trait]
impl IdentityStore for PostgresIdentityStore {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO identities (id, username, name, surname, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.username.as_str())
        .bind(identity.name.as_str())
        .bind(identity.surname.as_str())
        .bind(&identity.password_hash)
        .bind(identity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("identities_username_key")
                {
                    return IdentityError::DuplicateUsername(
                        identity.username.as_str().to_string(),
                    );
                }
            }
            IdentityError::Database(e.to_string())
        })?;

        Ok(identity)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, name, surname, password_hash, created_at
            FROM identities
            WHERE LOWER(username) = $1
            "#,
        )
        .bind(username.normalized())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(r) => Ok(Some(identity_from_row(&r)?)),
            None => Ok(None),
        }
    }

    async fn update_password_hash(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<(), IdentityError> {
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET password_hash = $2
            WHERE LOWER(username) = $1
            "#,
        )
        .bind(username.normalized())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(username.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, username: &Username) -> Result<(), IdentityError> {
        let result = sqlx::query(
            r#"
            DELETE FROM identities
            WHERE LOWER(username) = $1
            "#,
        )
        .bind(username.normalized())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(username.to_string()));
        }

        Ok(())
    }
}
