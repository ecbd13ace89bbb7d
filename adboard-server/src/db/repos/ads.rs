//! Ad repository
//!
//! `insert` is a raw write: validators do not run here, and an unvalidated
//! draft is checked only by the schema constraints. "Published" is a
//! read-side filter (price > 0), never a stored flag.

use chrono::{DateTime, Utc};
use sqlx::error::ErrorKind;
use sqlx::{FromRow, PgPool, Row};

use crate::models::{NewAd, Paginated, Pagination};

use super::{constraint_name, error_kind, DbError};

/// Ad record from database
#[derive(Debug, Clone, FromRow)]
pub struct Ad {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub price: f64,
    /// Creation timestamp, stamped by the database and never mutated
    pub published: DateTime<Utc>,
    pub rubric_id: Option<i64>,
    pub author_id: Option<i64>,
}

/// Weighted ad-tag link record
#[derive(Debug, Clone, FromRow)]
pub struct AdTag {
    pub id: i64,
    pub ad_id: i64,
    pub tag_id: i64,
    pub weight: i16,
}

/// Tag attached to an ad, with its link weight
#[derive(Debug, Clone, FromRow)]
pub struct TagWithWeight {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub weight: i16,
}

/// Ad repository
pub struct AdRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AdRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an ad. `published` is stamped by the database.
    ///
    /// This does NOT run the field validators; callers that want the
    /// app-level rules enforced must call `NewAd::validate` first. The
    /// `price >= 0` check constraint still applies either way.
    pub async fn insert(&self, ad: &NewAd, author_id: Option<i64>) -> Result<Ad, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO ads (title, content, price, rubric_id, author_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, content, price, published, rubric_id, author_id
            "#,
        )
        .bind(&ad.title)
        .bind(&ad.content)
        .bind(ad.price)
        .bind(ad.rubric_id)
        .bind(author_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match error_kind(&e) {
            Some(ErrorKind::CheckViolation) => DbError::CheckViolation {
                constraint: constraint_name(&e).unwrap_or_else(|| "check".to_string()),
            },
            Some(ErrorKind::ForeignKeyViolation) => DbError::NotFound {
                resource: "rubric",
                id: ad.rubric_id.map(|id| id.to_string()).unwrap_or_default(),
            },
            _ => DbError::Sqlx(e),
        })
    }

    /// List all ads, newest first.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<Ad>, DbError> {
        self.list_where("", page).await
    }

    /// List ads considered published: price strictly greater than 0.
    ///
    /// A zero-priced ad is storable (the constraint only rejects negatives)
    /// but never shows up here.
    pub async fn published(&self, page: Pagination) -> Result<Paginated<Ad>, DbError> {
        self.list_where("WHERE price > 0", page).await
    }

    async fn list_where(&self, filter: &str, page: Pagination) -> Result<Paginated<Ad>, DbError> {
        // `filter` is a static fragment chosen above, never user input
        let query = format!(
            r#"
            SELECT id, title, content, price, published, rubric_id, author_id,
                   COUNT(*) OVER() AS total
            FROM ads
            {}
            ORDER BY published DESC
            LIMIT $1 OFFSET $2
            "#,
            filter
        );

        let rows = sqlx::query(&query)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(self.pool)
            .await?;

        Ok(collect_ads(rows, page))
    }

    /// List ads filed under a rubric, newest first.
    pub async fn list_by_rubric(
        &self,
        rubric_id: i64,
        page: Pagination,
    ) -> Result<Paginated<Ad>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, price, published, rubric_id, author_id,
                   COUNT(*) OVER() AS total
            FROM ads
            WHERE rubric_id = $1
            ORDER BY published DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(rubric_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(collect_ads(rows, page))
    }

    /// Get a single ad by id.
    pub async fn get(&self, id: i64) -> Result<Ad, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, title, content, price, published, rubric_id, author_id
            FROM ads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "ad",
            id: id.to_string(),
        })
    }

    /// Delete an ad. Join rows cascade.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "ad",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Attach a tag to an ad with the given weight (default 1).
    ///
    /// The (ad, tag) pair is unique; re-attaching updates the weight.
    pub async fn attach_tag(
        &self,
        ad_id: i64,
        tag_id: i64,
        weight: Option<i16>,
    ) -> Result<AdTag, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO ad_tags (ad_id, tag_id, weight)
            VALUES ($1, $2, $3)
            ON CONFLICT (ad_id, tag_id) DO UPDATE SET weight = EXCLUDED.weight
            RETURNING id, ad_id, tag_id, weight
            "#,
        )
        .bind(ad_id)
        .bind(tag_id)
        .bind(weight.unwrap_or(1))
        .fetch_one(self.pool)
        .await
        .map_err(|e| match error_kind(&e) {
            Some(ErrorKind::ForeignKeyViolation) => DbError::NotFound {
                resource: "ad or tag",
                id: format!("{}/{}", ad_id, tag_id),
            },
            Some(ErrorKind::CheckViolation) => DbError::CheckViolation {
                constraint: constraint_name(&e).unwrap_or_else(|| "check".to_string()),
            },
            _ => DbError::Sqlx(e),
        })
    }

    /// Tags attached to an ad, heaviest first.
    pub async fn tags_for(&self, ad_id: i64) -> Result<Vec<TagWithWeight>, DbError> {
        let tags = sqlx::query_as(
            r#"
            SELECT t.id, t.name, t.color, at.weight
            FROM ad_tags at
            JOIN tags t ON t.id = at.tag_id
            WHERE at.ad_id = $1
            ORDER BY at.weight DESC, t.name
            "#,
        )
        .bind(ad_id)
        .fetch_all(self.pool)
        .await?;

        Ok(tags)
    }
}

fn collect_ads(rows: Vec<sqlx::postgres::PgRow>, page: Pagination) -> Paginated<Ad> {
    let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
    let items = rows
        .into_iter()
        .map(|r| Ad {
            id: r.get("id"),
            title: r.get("title"),
            content: r.get("content"),
            price: r.get("price"),
            published: r.get("published"),
            rubric_id: r.get("rubric_id"),
            author_id: r.get("author_id"),
        })
        .collect();

    Paginated {
        items,
        total,
        page: page.page,
        per_page: page.per_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::models::NewAd;

    // Integration tests - run with DATABASE_URL set:
    // cargo test -p adboard-server -- --ignored

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    fn draft(title: &str, price: f64) -> NewAd {
        NewAd {
            title: title.to_string(),
            content: "Barely used, great condition".to_string(),
            price,
            rubric_id: None,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_appears_in_published() {
        let pool = test_pool().await;
        let repo = AdRepo::new(&pool);

        let ad = repo
            .insert(&draft("Selling my bike", 150.0), None)
            .await
            .expect("insert failed");

        let listed = repo.published(Pagination::default()).await.expect("list failed");
        assert!(listed.items.iter().any(|a| a.id == ad.id));

        repo.delete(ad.id).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn negative_price_rejected_by_check() {
        let pool = test_pool().await;
        let repo = AdRepo::new(&pool);

        let err = repo
            .insert(&draft("Selling my bike", -5.0), None)
            .await
            .unwrap_err();
        assert!(
            matches!(err, DbError::CheckViolation { ref constraint } if constraint == "price_non_negative")
        );
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn zero_price_stored_but_not_published() {
        // The validator rejects 0, the constraint does not; a raw write
        // lands in storage yet stays out of the published view.
        let pool = test_pool().await;
        let repo = AdRepo::new(&pool);

        let ad = repo
            .insert(&draft("Free bike", 0.0), None)
            .await
            .expect("insert failed");

        let listed = repo.published(Pagination::default()).await.expect("list failed");
        assert!(!listed.items.iter().any(|a| a.id == ad.id));

        let all = repo.list(Pagination::default()).await.expect("list failed");
        assert!(all.items.iter().any(|a| a.id == ad.id));

        repo.delete(ad.id).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn attach_tag_upserts_weight() {
        let pool = test_pool().await;
        let repo = AdRepo::new(&pool);
        let tags = crate::db::repos::TagRepo::new(&pool);

        let ad = repo.insert(&draft("Selling my bike", 10.0), None).await.unwrap();
        let tag = tags.create("bikes-test", "").await.unwrap();

        let link = repo.attach_tag(ad.id, tag.id, None).await.unwrap();
        assert_eq!(link.weight, 1);

        let link = repo.attach_tag(ad.id, tag.id, Some(5)).await.unwrap();
        assert_eq!(link.weight, 5);

        let attached = repo.tags_for(ad.id).await.unwrap();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].weight, 5);

        repo.delete(ad.id).await.unwrap();
        tags.delete(tag.id).await.unwrap();
    }
}
