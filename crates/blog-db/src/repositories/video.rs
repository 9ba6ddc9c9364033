//! PostgreSQL implementation of VideoRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::Video;
use blog_core::traits::{RepoResult, VideoRepository};

use crate::models::VideoModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[instrument(skip(self))]
    async fn list_popular(&self) -> RepoResult<Vec<Video>> {
        let rows = sqlx::query_as::<_, VideoModel>(
            r"
            SELECT id, slug, title, thumbnail, is_popular, created_at
            FROM videos
            WHERE is_popular
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Video::from).collect())
    }

    #[instrument(skip(self, video), fields(slug = %video.slug))]
    async fn create(&self, video: &Video) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO videos (id, slug, title, thumbnail, is_popular, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(video.id.into_inner())
        .bind(&video.slug)
        .bind(&video.title)
        .bind(video.thumbnail.as_deref())
        .bind(video.is_popular)
        .bind(video.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
