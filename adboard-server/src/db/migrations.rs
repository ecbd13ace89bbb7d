//! Database migrations for the classified-ads tables
//!
//! Idempotent DDL run at startup. Deletion behavior lives in the foreign
//! keys: rubric deletion is blocked while ads reference it (RESTRICT),
//! user deletion takes the profile and authored ads with it (CASCADE), and
//! ad/tag deletion sweeps the join rows.

use sqlx::PgPool;

use crate::Result;

/// Run all migrations
pub async fn run(pool: &PgPool) -> Result<()> {
    tracing::info!("Running adboard migrations...");

    // Users are identity records only; authentication is handled upstream
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One profile per user
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            phone TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Rubric names are unique in practice but not constrained
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rubrics (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            color TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    // `published` is stamped once at insert and never updated.
    // App-level validation requires price > 0; the constraint only rejects
    // negatives, so a zero price can be stored.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ads (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            published TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            rubric_id BIGINT REFERENCES rubrics(id) ON DELETE RESTRICT,
            author_id BIGINT REFERENCES users(id) ON DELETE CASCADE,
            CONSTRAINT price_non_negative CHECK (price >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Weighted ad-tag links, one row per (ad, tag) pair
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ad_tags (
            id BIGSERIAL PRIMARY KEY,
            ad_id BIGINT NOT NULL REFERENCES ads(id) ON DELETE CASCADE,
            tag_id BIGINT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            weight SMALLINT NOT NULL DEFAULT 1 CHECK (weight >= 0),
            UNIQUE (ad_id, tag_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("adboard migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<()> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_rubrics_name ON rubrics(name)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_ads_published ON ads(published DESC)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_ads_rubric ON ads(rubric_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_ads_author ON ads(author_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_ad_tags_tag ON ad_tags(tag_id)")
        .execute(pool)
        .await?;

    Ok(())
}
