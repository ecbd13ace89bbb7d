//! User and profile repositories
//!
//! Users are identity records; authentication lives upstream. Deleting a
//! user cascades to the profile and to every ad the user authored.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::DbError;

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Profile record from database, one per user
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub phone: String,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get or create a user by username (idempotent).
    pub async fn ensure(&self, username: &str) -> Result<User, DbError> {
        let user = sqlx::query_as(
            r#"
            INSERT INTO users (username) VALUES ($1)
            ON CONFLICT (username) DO UPDATE SET username = EXCLUDED.username
            RETURNING id, username, created_at
            "#,
        )
        .bind(username)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Look up a user by username.
    pub async fn get_by_username(&self, username: &str) -> Result<User, DbError> {
        sqlx::query_as("SELECT id, username, created_at FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "user",
                id: username.to_string(),
            })
    }

    /// Delete a user. The profile and authored ads cascade.
    pub async fn delete(&self, username: &str) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "user",
                id: username.to_string(),
            });
        }
        Ok(())
    }
}

/// Profile repository
pub struct ProfileRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the profile for a username.
    pub async fn get(&self, username: &str) -> Result<Profile, DbError> {
        sqlx::query_as(
            r#"
            SELECT p.id, p.user_id, p.phone
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE u.username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "profile",
            id: username.to_string(),
        })
    }

    /// Create or update the profile for a user (one per user).
    ///
    /// Phone validation happens in the handler's validation pass, not here.
    pub async fn set_phone(&self, user_id: i64, phone: &str) -> Result<Profile, DbError> {
        let profile = sqlx::query_as(
            r#"
            INSERT INTO profiles (user_id, phone)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET phone = EXCLUDED.phone
            RETURNING id, user_id, phone
            "#,
        )
        .bind(user_id)
        .bind(phone)
        .fetch_one(self.pool)
        .await?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::db::repos::AdRepo;
    use crate::models::{NewAd, Pagination};

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_is_idempotent() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let a = repo.ensure("cascade-test-user").await.unwrap();
        let b = repo.ensure("cascade-test-user").await.unwrap();
        assert_eq!(a.id, b.id);

        repo.delete("cascade-test-user").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_cascades_to_profile_and_ads() {
        let pool = test_pool().await;
        let users = UserRepo::new(&pool);
        let profiles = ProfileRepo::new(&pool);
        let ads = AdRepo::new(&pool);

        let user = users.ensure("cascade-test-author").await.unwrap();
        profiles.set_phone(user.id, "+7 912 345-67-89").await.unwrap();
        let ad = ads
            .insert(
                &NewAd {
                    title: "Selling my bike".to_string(),
                    content: "Barely used, great condition".to_string(),
                    price: 150.0,
                    rubric_id: None,
                },
                Some(user.id),
            )
            .await
            .unwrap();

        users.delete("cascade-test-author").await.unwrap();

        let err = profiles.get("cascade-test-author").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "profile", .. }));

        let err = ads.get(ad.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "ad", .. }));

        let listed = ads.list(Pagination::default()).await.unwrap();
        assert!(!listed.items.iter().any(|a| a.id == ad.id));
    }
}
