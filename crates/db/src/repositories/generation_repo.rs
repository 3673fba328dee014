//! Repository for the `generations` table.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::generation::{CreateGeneration, Generation, ListGenerations};

/// Column list for generations queries.
const COLUMNS: &str =
    "id, type AS gen_type, prompt, style, page_count, image_urls, image_keys, created_at";

/// Provides CRUD operations for generation records.
pub struct GenerationRepo;

impl GenerationRepo {
    /// Insert a new generation record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateGeneration) -> Result<Generation, sqlx::Error> {
        let query = format!(
            "INSERT INTO generations (type, prompt, style, page_count)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Generation>(&query)
            .bind(&input.gen_type)
            .bind(&input.prompt)
            .bind(&input.style)
            .bind(input.page_count)
            .fetch_one(pool)
            .await
    }

    /// Store the artifact URLs and object keys for a generation.
    /// Returns the updated row, or `None` if the id does not exist.
    pub async fn update_images(
        pool: &PgPool,
        id: Uuid,
        image_urls: &[String],
        image_keys: &[String],
    ) -> Result<Option<Generation>, sqlx::Error> {
        let query = format!(
            "UPDATE generations
             SET image_urls = $1, image_keys = $2
             WHERE id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Generation>(&query)
            .bind(Json(image_urls))
            .bind(Json(image_keys))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace only the presigned URLs (signed-URL refresh).
    /// Returns `true` if a row was updated.
    pub async fn update_urls(
        pool: &PgPool,
        id: Uuid,
        image_urls: &[String],
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE generations SET image_urls = $1 WHERE id = $2")
            .bind(Json(image_urls))
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a generation by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Generation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generations WHERE id = $1");
        sqlx::query_as::<_, Generation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List generations newest first, optionally filtered by type.
    pub async fn list(
        pool: &PgPool,
        params: &ListGenerations,
    ) -> Result<Vec<Generation>, sqlx::Error> {
        if let Some(gen_type) = &params.gen_type {
            let query = format!(
                "SELECT {COLUMNS} FROM generations
                 WHERE type = $1
                 ORDER BY created_at DESC
                 LIMIT $2 OFFSET $3"
            );
            sqlx::query_as::<_, Generation>(&query)
                .bind(gen_type)
                .bind(params.limit)
                .bind(params.offset)
                .fetch_all(pool)
                .await
        } else {
            let query = format!(
                "SELECT {COLUMNS} FROM generations
                 ORDER BY created_at DESC
                 LIMIT $1 OFFSET $2"
            );
            sqlx::query_as::<_, Generation>(&query)
                .bind(params.limit)
                .bind(params.offset)
                .fetch_all(pool)
                .await
        }
    }
}
