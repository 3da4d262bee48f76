use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::{UserData, UserEmail, UserName};
use crate::usecases::{RepositoryError, UserRepository};

pub struct PostgresUserRepository {
    db_pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(name = "Looking up user in the database", skip(self))]
    async fn find_user_by_email(
        &self,
        email: &UserEmail,
    ) -> Result<Option<UserData>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT name, email
            FROM mailing_list
            WHERE email = $1
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(&self.db_pool)
        .await
        .context("Failed to query the mailing list by email")?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let name: String = row.try_get("name").context("Failed to read stored name")?;
        let email: String = row.try_get("email").context("Failed to read stored email")?;

        // Rows only enter the table through the use case, so a failure here
        // means the table was modified behind our back.
        let user = UserData::new(
            UserName::parse(name).map_err(|err| anyhow!(err))?,
            UserEmail::parse(Some(email)).map_err(|err| anyhow!(err))?,
        );
        Ok(Some(user))
    }

    #[tracing::instrument(name = "Saving new user details in the database", skip(self, user))]
    async fn save(&self, user: UserData) -> Result<UserData, RepositoryError> {
        let inserted_rows = sqlx::query(
            r#"
            INSERT INTO mailing_list (id, name, email, registered_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.name.as_ref())
        .bind(user.email.as_ref())
        .bind(Utc::now())
        .execute(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })
        .context("Failed to insert new user in the mailing list")?
        .rows_affected();

        if inserted_rows == 0 {
            Err(RepositoryError::DuplicateEmail(user.email))
        } else {
            Ok(user)
        }
    }
}
