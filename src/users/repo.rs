use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// One row in `users`, keyed by the identity provider's subject ID.
///
/// `balance` and `transactions` are seeded at registration and never
/// maintained afterwards; they ride along for schema compatibility with the
/// mobile client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub uid: String,
    pub username: String,
    pub email: String,
    pub fcm_token: Option<String>,
    pub device_id: Option<String>,
    pub public_address: Option<String>,
    pub balance: i64,
    pub transactions: serde_json::Value,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_uid(db: &PgPool, uid: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT uid, username, email, fcm_token, device_id, public_address,
                   balance, transactions, created_at
            FROM users
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by their (already lowercased) username.
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT uid, username, email, fcm_token, device_id, public_address,
                   balance, transactions, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Any row already bound to this device, regardless of owner.
    pub async fn find_by_device(db: &PgPool, device_id: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT uid, username, email, fcm_token, device_id, public_address,
                   balance, transactions, created_at
            FROM users
            WHERE device_id = $1
            "#,
        )
        .bind(device_id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a fresh registration. Uniqueness of uid/username/email is
    /// enforced by the table constraints; duplicates surface as errors.
    pub async fn create(
        db: &PgPool,
        uid: &str,
        username: &str,
        email: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (uid, username, email, balance, transactions)
            VALUES ($1, $2, $3, 0, '[]'::jsonb)
            RETURNING uid, username, email, fcm_token, device_id, public_address,
                      balance, transactions, created_at
            "#,
        )
        .bind(uid)
        .bind(username)
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn username_of(db: &PgPool, uid: &str) -> anyhow::Result<Option<String>> {
        let username =
            sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE uid = $1")
                .bind(uid)
                .fetch_optional(db)
                .await?;
        Ok(username)
    }

    pub async fn all_usernames(db: &PgPool) -> anyhow::Result<Vec<String>> {
        let usernames = sqlx::query_scalar::<_, String>("SELECT username FROM users")
            .fetch_all(db)
            .await?;
        Ok(usernames)
    }

    pub async fn set_fcm_token(db: &PgPool, uid: &str, fcm_token: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET fcm_token = $1 WHERE uid = $2")
            .bind(fcm_token)
            .bind(uid)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Record the wallet address and device for the caller's row.
    pub async fn bind_address(
        db: &PgPool,
        uid: &str,
        public_address: &str,
        device_id: &str,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET public_address = $1, device_id = $2 WHERE uid = $3")
            .bind(public_address)
            .bind(device_id)
            .bind(uid)
            .execute(db)
            .await?;
        Ok(())
    }
}
