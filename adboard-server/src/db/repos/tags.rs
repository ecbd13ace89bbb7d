//! Tag repository
//!
//! Tag names are globally unique; deleting a tag sweeps its ad links.

use sqlx::error::ErrorKind;
use sqlx::{FromRow, PgPool, Row};

use crate::models::{Paginated, Pagination};

use super::{error_kind, DbError};

/// Tag record from database
#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// Tag repository
pub struct TagRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TagRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a tag. Duplicate names are rejected by the unique constraint.
    pub async fn create(&self, name: &str, color: &str) -> Result<Tag, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO tags (name, color)
            VALUES ($1, $2)
            RETURNING id, name, color
            "#,
        )
        .bind(name)
        .bind(color)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match error_kind(&e) {
            Some(ErrorKind::UniqueViolation) => DbError::Duplicate {
                resource: "tag",
                id: name.to_string(),
            },
            _ => DbError::Sqlx(e),
        })
    }

    /// List tags ordered by name.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<Tag>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, color, COUNT(*) OVER() AS total
            FROM tags
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        let items = rows
            .into_iter()
            .map(|r| Tag {
                id: r.get("id"),
                name: r.get("name"),
                color: r.get("color"),
            })
            .collect();

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Delete a tag. Ad links cascade.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "tag",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_name_rejected() {
        let pool = test_pool().await;
        let repo = TagRepo::new(&pool);

        let tag = repo.create("unique-name-test", "red").await.unwrap();
        let err = repo.create("unique-name-test", "blue").await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate { resource: "tag", .. }));

        repo.delete(tag.id).await.unwrap();
    }
}
