//! Rubric repository
//!
//! Rubric deletion is RESTRICT-protected: as long as any ad references the
//! rubric, the delete fails at the database and surfaces as
//! `DbError::StillReferenced`, never as a validation error.

use sqlx::error::ErrorKind;
use sqlx::{FromRow, PgPool, Row};

use crate::models::{Paginated, Pagination};

use super::{error_kind, DbError};

/// Rubric record from database
#[derive(Debug, Clone, FromRow)]
pub struct Rubric {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Rubric with ad count for list display
#[derive(Debug, Clone)]
pub struct RubricWithCount {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub ad_count: i64,
}

/// Rubric repository
pub struct RubricRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RubricRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a rubric. Names are not unique at the schema level.
    pub async fn create(&self, name: &str, description: &str) -> Result<Rubric, DbError> {
        let rubric = sqlx::query_as(
            r#"
            INSERT INTO rubrics (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(self.pool)
        .await?;

        Ok(rubric)
    }

    /// List rubrics ordered by name, with ad counts in a single query.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<RubricWithCount>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                r.id,
                r.name,
                r.description,
                COUNT(a.id) AS ad_count,
                COUNT(*) OVER() AS total
            FROM rubrics r
            LEFT JOIN ads a ON a.rubric_id = r.id
            GROUP BY r.id, r.name, r.description
            ORDER BY r.name
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
            .map(|r| RubricWithCount {
                id: r.get("id"),
                name: r.get("name"),
                description: r.get("description"),
                ad_count: r.get("ad_count"),
            })
            .collect();

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Get a single rubric by id.
    pub async fn get(&self, id: i64) -> Result<Rubric, DbError> {
        sqlx::query_as("SELECT id, name, description FROM rubrics WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "rubric",
                id: id.to_string(),
            })
    }

    /// Delete a rubric. Fails while ads still reference it.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM rubrics WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| match error_kind(&e) {
                Some(ErrorKind::ForeignKeyViolation) => DbError::StillReferenced {
                    resource: "rubric",
                    id: id.to_string(),
                },
                _ => DbError::Sqlx(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "rubric",
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
    use crate::db::repos::AdRepo;
    use crate::models::NewAd;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_blocked_while_referenced() {
        let pool = test_pool().await;
        let rubrics = RubricRepo::new(&pool);
        let ads = AdRepo::new(&pool);

        let rubric = rubrics.create("Транспорт", "").await.unwrap();
        let ad = ads
            .insert(
                &NewAd {
                    title: "Selling my bike".to_string(),
                    content: "Barely used, great condition".to_string(),
                    price: 150.0,
                    rubric_id: Some(rubric.id),
                },
                None,
            )
            .await
            .unwrap();

        let err = rubrics.delete(rubric.id).await.unwrap_err();
        assert!(matches!(err, DbError::StillReferenced { resource: "rubric", .. }));

        // After the ad is gone the rubric can be deleted
        ads.delete(ad.id).await.unwrap();
        rubrics.delete(rubric.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_missing_is_not_found() {
        let pool = test_pool().await;
        let err = RubricRepo::new(&pool).delete(-1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "rubric", .. }));
    }
}
