//! PostgreSQL implementation of BlogRepository
//!
//! Comment-tree mutations rewrite `blogs.comments` in a single `UPDATE`.
//! The target comment is located by `elem->>'id'`, and the containment guard
//! `comments @> [{"id": ...}]` turns a missing (blog, comment) pair into zero
//! affected rows instead of a silent no-op write.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::{Blog, Comment, Reaction, Reply};
use blog_core::traits::{BlogLikes, BlogLink, BlogRepository, PendingSchedule, RepoResult};
use blog_core::value_objects::Snowflake;
use blog_core::DomainError;

use crate::mappers::{comments_from_documents, BlogInsert};
use crate::models::{
    BlogLikesModel, BlogLinkModel, BlogModel, CommentDocument, ReactionDocument, ReplyDocument,
};

use super::error::{map_db_error, map_unique_violation};

const BLOG_COLUMNS: &str = "id, slug, title, title_display, content, image, reading_time, \
     author_id, tags, is_posted, is_verified, is_popular, schedule, likes, comments, \
     created_at, updated_at";

/// Visibility filter for list, tag and homepage reads
const PUBLIC: &str = "deleted_at IS NULL AND schedule IS NULL AND is_verified AND is_posted";

/// Visibility filter for slug reads, the popular sidebar and related posts
const READABLE: &str = "deleted_at IS NULL AND schedule IS NULL AND is_posted";

const HAS_COMMENT: &str = "comments @> jsonb_build_array(jsonb_build_object('id', $2::text))";

fn select_blogs(filter: &str, tail: &str) -> String {
    format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE {filter} {tail}")
}

/// `UPDATE` that replaces the comment whose id is `$2` with `replacement`
fn rewrite_comment(replacement: &str) -> String {
    format!(
        r"
        UPDATE blogs
        SET comments = (
                SELECT jsonb_agg(
                    CASE WHEN elem->>'id' = $2::text THEN {replacement} ELSE elem END
                    ORDER BY ord
                )
                FROM jsonb_array_elements(comments) WITH ORDINALITY AS t(elem, ord)
            ),
            updated_at = NOW()
        WHERE id = $1 AND deleted_at IS NULL AND {HAS_COMMENT}
        RETURNING comments
        "
    )
}

/// PostgreSQL implementation of BlogRepository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_blogs(&self, sql: &str, bind: Option<&str>) -> RepoResult<Vec<Blog>> {
        let mut query = sqlx::query_as::<_, BlogModel>(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool).await.map_err(map_db_error)?;
        Ok(rows.into_iter().map(Blog::from).collect())
    }

    async fn fetch_blog(&self, sql: &str, bind: Binding<'_>) -> RepoResult<Option<Blog>> {
        let query = sqlx::query_as::<_, BlogModel>(sql);
        let query = match bind {
            Binding::Id(id) => query.bind(id.into_inner()),
            Binding::Text(text) => query.bind(text),
        };
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(Blog::from))
    }

    async fn fetch_comments<'q>(
        &self,
        query: sqlx::query::QueryScalar<
            'q,
            sqlx::Postgres,
            Json<Vec<CommentDocument>>,
            sqlx::postgres::PgArguments,
        >,
    ) -> RepoResult<Option<Vec<Comment>>> {
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(|Json(docs)| comments_from_documents(docs)))
    }
}

enum Binding<'a> {
    Id(Snowflake),
    Text(&'a str),
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Blog>> {
        let sql = select_blogs("id = $1 AND deleted_at IS NULL", "");
        self.fetch_blog(&sql, Binding::Id(id)).await
    }

    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Blog>> {
        let sql = select_blogs("slug = $1 AND deleted_at IS NULL", "");
        self.fetch_blog(&sql, Binding::Text(slug)).await
    }

    #[instrument(skip(self))]
    async fn find_readable_by_slug(&self, slug: &str) -> RepoResult<Option<Blog>> {
        let sql = select_blogs(&format!("slug = $1 AND {READABLE}"), "");
        self.fetch_blog(&sql, Binding::Text(slug)).await
    }

    #[instrument(skip(self))]
    async fn slug_exists(&self, slug: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM blogs WHERE slug = $1 AND deleted_at IS NULL)",
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, blog), fields(blog_id = %blog.id, slug = %blog.slug))]
    async fn create(&self, blog: &Blog) -> RepoResult<()> {
        let insert = BlogInsert::new(blog);

        sqlx::query(
            r"
            INSERT INTO blogs (
                id, slug, title, title_display, content, image, reading_time, author_id,
                tags, is_posted, is_verified, is_popular, schedule, likes, comments,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ",
        )
        .bind(insert.id)
        .bind(&blog.slug)
        .bind(&blog.title)
        .bind(&blog.title_display)
        .bind(&blog.content)
        .bind(blog.image.as_deref())
        .bind(blog.reading_time)
        .bind(insert.author_id)
        .bind(&blog.tags)
        .bind(blog.is_posted)
        .bind(blog.is_verified)
        .bind(blog.is_popular)
        .bind(blog.schedule)
        .bind(&insert.likes)
        .bind(&insert.comments)
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugAlreadyExists(blog.slug.clone())))?;

        Ok(())
    }

    #[instrument(skip(self, content))]
    async fn update_content(&self, id: Snowflake, title: &str, content: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE blogs
            SET title = $2, content = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(title)
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE blogs
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_public(&self) -> RepoResult<Vec<Blog>> {
        let sql = select_blogs(PUBLIC, "ORDER BY created_at DESC");
        self.fetch_blogs(&sql, None).await
    }

    #[instrument(skip(self))]
    async fn list_public_by_tag(&self, tag: &str) -> RepoResult<Vec<Blog>> {
        let sql = select_blogs(
            &format!("$1 = ANY(tags) AND {PUBLIC}"),
            "ORDER BY created_at DESC",
        );
        self.fetch_blogs(&sql, Some(tag)).await
    }

    #[instrument(skip(self))]
    async fn list_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Blog>> {
        let sql = select_blogs(
            "author_id = $1 AND deleted_at IS NULL",
            "ORDER BY created_at DESC",
        );
        let rows = sqlx::query_as::<_, BlogModel>(&sql)
            .bind(author_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_popular(&self, limit: Option<i64>) -> RepoResult<Vec<Blog>> {
        let sql = select_blogs(
            &format!("is_popular AND {READABLE}"),
            // LIMIT NULL returns every row
            "ORDER BY created_at DESC LIMIT $1",
        );
        let rows = sqlx::query_as::<_, BlogModel>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_popular_public(&self, limit: Option<i64>) -> RepoResult<Vec<Blog>> {
        let sql = select_blogs(
            &format!("is_popular AND {PUBLIC}"),
            "ORDER BY created_at DESC LIMIT $1",
        );
        let rows = sqlx::query_as::<_, BlogModel>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_related(
        &self,
        author_id: Snowflake,
        exclude: Snowflake,
    ) -> RepoResult<Vec<BlogLink>> {
        let sql = format!(
            "SELECT id, slug, title_display FROM blogs \
             WHERE author_id = $1 AND id <> $2 AND {READABLE} \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, BlogLinkModel>(&sql)
            .bind(author_id.into_inner())
            .bind(exclude.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(BlogLink::from).collect())
    }

    #[instrument(skip(self))]
    async fn toggle_like(
        &self,
        blog_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<BlogLikes>> {
        let row = sqlx::query_as::<_, BlogLikesModel>(
            r"
            UPDATE blogs
            SET likes = CASE
                    WHEN $2::bigint = ANY(likes) THEN array_remove(likes, $2::bigint)
                    ELSE array_prepend($2::bigint, likes)
                END
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, slug, author_id, likes
            ",
        )
        .bind(blog_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(BlogLikes::from))
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn add_comment(
        &self,
        blog_id: Snowflake,
        comment: &Comment,
    ) -> RepoResult<Option<Vec<Comment>>> {
        let query = sqlx::query_scalar::<_, Json<Vec<CommentDocument>>>(
            r"
            UPDATE blogs
            SET comments = jsonb_build_array($2::jsonb) || comments,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING comments
            ",
        )
        .bind(blog_id.into_inner())
        .bind(Json(CommentDocument::from(comment)));

        self.fetch_comments(query).await
    }

    #[instrument(skip(self, reply), fields(reply_id = %reply.id))]
    async fn add_reply(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
        reply: &Reply,
    ) -> RepoResult<Option<Vec<Reply>>> {
        let sql = rewrite_comment(
            "jsonb_set(elem, '{replies}', \
             jsonb_build_array($3::jsonb) || COALESCE(elem->'replies', '[]'::jsonb))",
        );
        let query = sqlx::query_scalar::<_, Json<Vec<CommentDocument>>>(&sql)
            .bind(blog_id.into_inner())
            .bind(comment_id.to_string())
            .bind(Json(ReplyDocument::from(reply)));

        let comments = self.fetch_comments(query).await?;
        Ok(comments.and_then(|comments| {
            comments
                .into_iter()
                .find(|c| c.id == comment_id)
                .map(|c| c.replies)
        }))
    }

    #[instrument(skip(self, reaction), fields(emoji = %reaction.emoji))]
    async fn add_reaction(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
        reaction: &Reaction,
    ) -> RepoResult<Option<Vec<Comment>>> {
        let sql = rewrite_comment(
            "jsonb_set(elem, '{reactions}', \
             COALESCE(elem->'reactions', '[]'::jsonb) || jsonb_build_array($3::jsonb))",
        );
        let query = sqlx::query_scalar::<_, Json<Vec<CommentDocument>>>(&sql)
            .bind(blog_id.into_inner())
            .bind(comment_id.to_string())
            .bind(Json(ReactionDocument::from(reaction)));

        self.fetch_comments(query).await
    }

    #[instrument(skip(self, content))]
    async fn update_comment(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
        content: &str,
        is_code: bool,
    ) -> RepoResult<Option<Vec<Comment>>> {
        let sql =
            rewrite_comment("elem || jsonb_build_object('content', $3::text, 'is_code', $4::boolean)");
        let query = sqlx::query_scalar::<_, Json<Vec<CommentDocument>>>(&sql)
            .bind(blog_id.into_inner())
            .bind(comment_id.to_string())
            .bind(content)
            .bind(is_code);

        self.fetch_comments(query).await
    }

    #[instrument(skip(self))]
    async fn remove_comment(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
    ) -> RepoResult<Option<Vec<Comment>>> {
        let sql = format!(
            r"
            UPDATE blogs
            SET comments = COALESCE(
                    (
                        SELECT jsonb_agg(elem ORDER BY ord)
                        FROM jsonb_array_elements(comments) WITH ORDINALITY AS t(elem, ord)
                        WHERE elem->>'id' <> $2::text
                    ),
                    '[]'::jsonb
                ),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL AND {HAS_COMMENT}
            RETURNING comments
            "
        );
        let query = sqlx::query_scalar::<_, Json<Vec<CommentDocument>>>(&sql)
            .bind(blog_id.into_inner())
            .bind(comment_id.to_string());

        self.fetch_comments(query).await
    }

    #[instrument(skip(self))]
    async fn clear_schedule(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE blogs
            SET schedule = NULL, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn pending_schedules(&self) -> RepoResult<Vec<PendingSchedule>> {
        let rows = sqlx::query_as::<_, (i64, chrono::DateTime<chrono::Utc>)>(
            r"
            SELECT id, schedule
            FROM blogs
            WHERE schedule IS NOT NULL AND deleted_at IS NULL
            ORDER BY schedule
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, at)| PendingSchedule {
                blog_id: Snowflake::new(id),
                at,
            })
            .collect())
    }
}
