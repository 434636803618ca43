use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User,
  errors::AuthError,
  ports::UserRepository,
  value_objects::Email,
};

/// PostgreSQL implementation of the UserRepository trait
///
/// The unique index on `users.email` is the authority for the email
/// uniqueness invariant; concurrent inserts for the same email resolve to
/// exactly one success and one duplicate-key violation.
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  username: String,
  email: String,
  password_hash: String,
  created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.username,
      row.email,
      row.password_hash,
      row.created_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, created_at
            "#,
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await;

    match result {
      Ok(Some(row)) => Ok(Some(row.into())),
      Ok(None) => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await;

    match result {
      Ok(Some(row)) => Ok(Some(row.into())),
      Ok(None) => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  async fn find_all(&self) -> Result<Vec<User>, AuthError> {
    let rows = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            "#,
    )
    .fetch_all(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to list users: {}", e);
      AuthError::from(e)
    })?;

    Ok(rows.into_iter().map(Into::into).collect())
  }
}
