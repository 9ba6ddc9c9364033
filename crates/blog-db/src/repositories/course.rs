//! PostgreSQL implementation of CourseRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::{Course, CourseTrack};
use blog_core::traits::{CourseRepository, RepoResult};

use crate::models::CourseModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    #[instrument(skip(self))]
    async fn list_by_track(&self, track: CourseTrack) -> RepoResult<Vec<Course>> {
        let column = match track {
            CourseTrack::FrontEnd => "role_fe",
            CourseTrack::BackEnd => "role_be",
        };
        let sql = format!(
            "SELECT id, slug, title, image, student_count, role_fe, role_be, created_at \
             FROM courses WHERE {column} = $1 ORDER BY created_at"
        );

        let rows = sqlx::query_as::<_, CourseModel>(&sql)
            .bind(track.label())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    #[instrument(skip(self, course), fields(slug = %course.slug))]
    async fn create(&self, course: &Course) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO courses (id, slug, title, image, student_count, role_fe, role_be, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(course.id.into_inner())
        .bind(&course.slug)
        .bind(&course.title)
        .bind(course.image.as_deref())
        .bind(course.student_count)
        .bind(course.role.front_end.as_deref())
        .bind(course.role.back_end.as_deref())
        .bind(course.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
