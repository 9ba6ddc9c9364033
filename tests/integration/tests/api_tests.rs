//! API Integration Tests
//!
//! Each test spawns the full HTTP stack on an ephemeral port over in-memory
//! repositories, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use chrono::Utc;
use integration_tests::{assert_json, assert_status, fixtures::*, TestServer, TestUser};
use reqwest::StatusCode;

async fn publish(server: &TestServer, author: &TestUser, request: &NewPostRequest) -> BlogBody {
    let response = server
        .post_auth("/new-post", &author.token, request)
        .await
        .unwrap();
    let created: CreatePostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(created.success);
    created.blog
}

async fn listed_ids(server: &TestServer) -> Vec<String> {
    let response = server.get("/blog").await.unwrap();
    let blogs: Vec<BlogBody> = assert_json(response, StatusCode::OK).await.unwrap();
    blogs.into_iter().map(|b| b.id).collect()
}

async fn comment(server: &TestServer, user: &TestUser, blog_id: &str, text: &str) -> CommentsBody {
    let response = server
        .put_auth("/comment", &user.token, &CommentBody::text(blog_id, text))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_without_dependencies() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "disabled");
    assert_eq!(body["checks"]["redis"], "disabled");
}

// ============================================================================
// Publishing and Reading
// ============================================================================

#[tokio::test]
async fn test_create_blog_envelope() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();

    let request = NewPostRequest::unique();
    let response = server.post_auth("/new-post", &ada.token, &request).await.unwrap();
    let created: CreatePostResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(created.message, "Post blog successfully!");
    assert_eq!(created.blog.title, request.title);
    assert_eq!(Some(created.blog.slug), request.slug);
    assert_eq!(created.blog.posted_by, serde_json::json!(ada.id.to_string()));
    assert!(created.blog.is_verified);
    assert!(created.blog.comments.is_empty());
}

#[tokio::test]
async fn test_duplicate_slug_conflicts() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();

    let request = NewPostRequest::unique();
    publish(&server, &ada, &request).await;

    let response = server.post_auth("/new-post", &ada.token, &request).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert!(!error.success);
    assert_eq!(error.code, "SLUG_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_list_expands_author() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;

    let response = server.get("/blog").await.unwrap();
    let blogs: Vec<BlogBody> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(blogs.len(), 1);
    assert_eq!(blogs[0].id, blog.id);
    assert_eq!(blogs[0].posted_by["fullName"], "Ada");
    assert_eq!(blogs[0].posted_by["bio"], "Ada writes here");
}

#[tokio::test]
async fn test_list_by_tag() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();

    let tagged = publish(&server, &ada, &NewPostRequest::unique()).await;
    let mut untagged = NewPostRequest::unique();
    untagged.tags = vec!["go".to_string()];
    publish(&server, &ada, &untagged).await;

    let response = server.get("/blog/tag/rust").await.unwrap();
    let blogs: Vec<BlogBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<_> = blogs.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec![tagged.id.as_str()]);
}

#[tokio::test]
async fn test_unverified_blogs_stay_out_of_lists() {
    let server = TestServer::start_with_settings(blog_common::BlogSettings::default())
        .await
        .unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;
    assert!(!blog.is_verified);

    assert!(listed_ids(&server).await.is_empty());

    // Still readable by slug
    let response = server.get(&format!("/blog/{}", blog.slug)).await.unwrap();
    let body: BlogSlugBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.blog_slug.map(|b| b.id), Some(blog.id));
}

#[tokio::test]
async fn test_scheduled_blog_appears_after_timer_fires() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();

    let a = publish(&server, &ada, &NewPostRequest::unique()).await;
    let at = Utc::now() + chrono::Duration::milliseconds(300);
    let b = publish(&server, &ada, &NewPostRequest::scheduled(at)).await;
    assert!(b.schedule.is_some());

    assert_eq!(listed_ids(&server).await, vec![a.id.clone()]);
    let response = server.get(&format!("/blog/{}", b.slug)).await.unwrap();
    let body: BlogSlugBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.blog_slug.is_none());

    tokio::time::sleep(Duration::from_millis(900)).await;

    let listed = listed_ids(&server).await;
    assert!(listed.contains(&a.id));
    assert!(listed.contains(&b.id));
}

#[tokio::test]
async fn test_get_by_slug_with_sidebar() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let grace = server.user(2, "Grace").await.unwrap();

    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;
    let popular = publish(&server, &ada, &NewPostRequest::unique()).await;
    server.blogs.set_flags(popular.id.parse().unwrap(), true, true);
    comment(&server, &grace, &blog.id, "Nice").await;

    let response = server.get(&format!("/blog/{}", blog.slug)).await.unwrap();
    let body: BlogSlugBody = assert_json(response, StatusCode::OK).await.unwrap();

    let found = body.blog_slug.unwrap();
    assert_eq!(found.posted_by["fullName"], "Ada");
    assert_eq!(found.comments[0].posted_by["fullName"], "Grace");

    let highlight: Vec<_> = body.blog_highlight.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(highlight, vec![popular.id.as_str()]);
}

#[tokio::test]
async fn test_unknown_slug_is_null() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/blog/nothing-here").await.unwrap();
    let body: BlogSlugBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.blog_slug.is_none());
    assert!(body.blog_highlight.is_empty());
}

#[tokio::test]
async fn test_related_blogs() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();

    let first = publish(&server, &ada, &NewPostRequest::unique()).await;
    let second = publish(&server, &ada, &NewPostRequest::unique()).await;

    let response = server
        .get(&format!("/blog/{}/{}", first.id, ada.id))
        .await
        .unwrap();
    let related: Vec<RelatedBody> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, second.id);
    assert_eq!(related[0].slug, second.slug);
    assert_eq!(related[0].title_display, second.title);
}

// ============================================================================
// Editing and Deleting
// ============================================================================

#[tokio::test]
async fn test_edit_blog() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;

    let edit = EditPostRequest {
        title: "Retitled".to_string(),
        content: "Rewritten".to_string(),
    };
    let response = server
        .put_auth(&format!("/blog/edit-blog/{}", blog.id), &ada.token, &edit)
        .await
        .unwrap();
    let body: SuccessBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);
    assert_eq!(body.message, "Edit blog successfully!");

    let response = server
        .get_auth(&format!("/blog/edit-blog/{}", blog.slug), &ada.token)
        .await
        .unwrap();
    let stored: BlogBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stored.title, "Retitled");
    assert_eq!(stored.content, "Rewritten");
    assert_eq!(stored.slug, blog.slug);
}

#[tokio::test]
async fn test_edit_by_other_user_is_forbidden() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let mallory = server.user(2, "Mallory").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;

    let edit = EditPostRequest {
        title: "Mine now".to_string(),
        content: "...".to_string(),
    };
    let response = server
        .put_auth(&format!("/blog/edit-blog/{}", blog.id), &mallory.token, &edit)
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.code, "NOT_BLOG_AUTHOR");

    let response = server
        .get_auth(&format!("/blog/edit-blog/{}", blog.slug), &mallory.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_delete_blog() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let kept = publish(&server, &ada, &NewPostRequest::unique()).await;
    let doomed = publish(&server, &ada, &NewPostRequest::unique()).await;

    let response = server
        .delete_auth(&format!("/blog/delete-blog/{}", doomed.id), &ada.token)
        .await
        .unwrap();
    let remaining: Vec<BlogBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<_> = remaining.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec![kept.id.as_str()]);

    let response = server.get(&format!("/blog/{}", doomed.slug)).await.unwrap();
    let body: BlogSlugBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.blog_slug.is_none());
    assert_eq!(listed_ids(&server).await, vec![kept.id]);
}

#[tokio::test]
async fn test_delete_scheduled_blog_never_publishes() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();

    let at = Utc::now() + chrono::Duration::milliseconds(200);
    let scheduled = publish(&server, &ada, &NewPostRequest::scheduled(at)).await;

    let response = server
        .delete_auth(&format!("/blog/delete-blog/{}", scheduled.id), &ada.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(listed_ids(&server).await.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_blog() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();

    let response = server
        .delete_auth("/blog/delete-blog/424242", &ada.token)
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.code, "UNKNOWN_BLOG");
}

// ============================================================================
// Likes
// ============================================================================

#[tokio::test]
async fn test_toggle_like_is_an_involution() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let grace = server.user(2, "Grace").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;

    let body = BlogIdBody {
        blog_id: blog.id.clone(),
    };

    let response = server.patch_auth("/blog/like", &grace.token, &body).await.unwrap();
    let liked: LikesBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked.id, blog.id);
    assert_eq!(liked.slug, blog.slug);
    assert_eq!(liked.posted_by, ada.id.to_string());
    assert_eq!(liked.likes, vec![grace.id.to_string()]);

    let response = server.patch_auth("/blog/like", &grace.token, &body).await.unwrap();
    let unliked: LikesBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(unliked.likes.is_empty());
}

#[tokio::test]
async fn test_like_unknown_blog() {
    let server = TestServer::start().await.unwrap();
    let grace = server.user(2, "Grace").await.unwrap();

    let body = BlogIdBody {
        blog_id: "999".to_string(),
    };
    let response = server.patch_auth("/blog/like", &grace.token, &body).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.code, "UNKNOWN_BLOG");
}

// ============================================================================
// Comments, Replies and Reactions
// ============================================================================

#[tokio::test]
async fn test_comments_newest_first() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let grace = server.user(2, "Grace").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;

    comment(&server, &grace, &blog.id, "C1").await;
    let after = comment(&server, &ada, &blog.id, "C2").await;

    assert_eq!(after.id, blog.id);
    let contents: Vec<_> = after.comments.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["C2", "C1"]);
    assert_eq!(after.comments[0].posted_by["fullName"], "Ada");
    assert_eq!(after.comments[1].posted_by["fullName"], "Grace");
}

#[tokio::test]
async fn test_replies_newest_first() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let grace = server.user(2, "Grace").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;
    let comment_id = comment(&server, &grace, &blog.id, "Question").await.comments[0]
        .id
        .clone();

    for text in ["R1", "R2"] {
        let reply = ReplyBody {
            blog_id: blog.id.clone(),
            comment_id: comment_id.clone(),
            content: text.to_string(),
            is_code: false,
        };
        let response = server.put_auth("/reply", &ada.token, &reply).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let target = CommentTargetBody {
        blog_id: blog.id.clone(),
        comment_id: comment_id.clone(),
    };
    let response = server.post_auth("/get-reply", &grace.token, &target).await.unwrap();
    let body: RepliesBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body.blog_id, blog.id);
    assert_eq!(body.comment_id, comment_id);
    let contents: Vec<_> = body.replies.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents, vec!["R2", "R1"]);
    assert_eq!(body.replies[0].posted_by["fullName"], "Ada");
}

#[tokio::test]
async fn test_reply_to_unknown_comment() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;

    let reply = ReplyBody {
        blog_id: blog.id.clone(),
        comment_id: "12345".to_string(),
        content: "Hello?".to_string(),
        is_code: false,
    };
    let response = server.put_auth("/reply", &ada.token, &reply).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.code, "UNKNOWN_COMMENT");
}

#[tokio::test]
async fn test_reactions_append() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let grace = server.user(2, "Grace").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;
    let comment_id = comment(&server, &ada, &blog.id, "Hi").await.comments[0].id.clone();

    for (user, emoji) in [(&ada, "👍"), (&grace, "🎉"), (&ada, "👍")] {
        let react = ReactBody {
            blog_id: blog.id.clone(),
            comment_id: comment_id.clone(),
            emoji: emoji.to_string(),
        };
        let response = server.put_auth("/comment/react", &user.token, &react).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server.get(&format!("/blog/{}", blog.slug)).await.unwrap();
    let body: BlogSlugBody = assert_json(response, StatusCode::OK).await.unwrap();
    let reacts = &body.blog_slug.unwrap().comments[0].reacts;

    let emojis: Vec<_> = reacts.iter().map(|r| r.emoji.as_str()).collect();
    assert_eq!(emojis, vec!["👍", "🎉", "👍"]);
    assert_eq!(reacts[1].reacted_by["fullName"], "Grace");
}

#[tokio::test]
async fn test_edit_comment() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let grace = server.user(2, "Grace").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;
    let comment_id = comment(&server, &grace, &blog.id, "Typo").await.comments[0]
        .id
        .clone();

    let edit = EditCommentBody {
        blog_id: blog.id.clone(),
        comment_id: comment_id.clone(),
        content: "Fixed".to_string(),
        is_code: true,
    };

    // The blog author cannot edit someone else's comment
    let response = server.put_auth("/comment/edit", &ada.token, &edit).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.code, "NOT_COMMENT_AUTHOR");

    let response = server.put_auth("/comment/edit", &grace.token, &edit).await.unwrap();
    let body: CommentsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.comments[0].content, "Fixed");
}

#[tokio::test]
async fn test_delete_comment_permissions() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let grace = server.user(2, "Grace").await.unwrap();
    let mallory = server.user(3, "Mallory").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;

    comment(&server, &grace, &blog.id, "First").await;
    let comments = comment(&server, &grace, &blog.id, "Second").await.comments;
    let second = comments[0].id.clone();
    let first = comments[1].id.clone();

    let target = |comment_id: &str| CommentTargetBody {
        blog_id: blog.id.clone(),
        comment_id: comment_id.to_string(),
    };

    let response = server
        .put_auth("/comment/delete", &mallory.token, &target(&first))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Comment author
    let response = server
        .put_auth("/comment/delete", &grace.token, &target(&second))
        .await
        .unwrap();
    let body: CommentsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.comments.len(), 1);

    // Blog author
    let response = server
        .put_auth("/comment/delete", &ada.token, &target(&first))
        .await
        .unwrap();
    let body: CommentsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.comments.is_empty());
}

#[tokio::test]
async fn test_empty_comment_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;

    let response = server
        .put_auth("/comment", &ada.token, &CommentBody::text(&blog.id, ""))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_deleted_commenter_renders_null() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();
    let ghost = server.user(2, "Ghost").await.unwrap();
    let blog = publish(&server, &ada, &NewPostRequest::unique()).await;
    comment(&server, &ghost, &blog.id, "Boo").await;

    server.users.remove(ghost.id);

    let response = server.get(&format!("/blog/{}", blog.slug)).await.unwrap();
    let body: BlogSlugBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.blog_slug.unwrap().comments[0].posted_by.is_null());
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_missing_token() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/new-post", &NewPostRequest::unique())
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert!(!error.success);
    assert_eq!(error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_invalid_token() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_auth("/new-post", "not-a-jwt", &NewPostRequest::unique())
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.code, "INVALID_TOKEN");
}

// ============================================================================
// Homepage
// ============================================================================

#[tokio::test]
async fn test_homepage() {
    let server = TestServer::start().await.unwrap();
    let ada = server.user(1, "Ada").await.unwrap();

    let shown = publish(&server, &ada, &NewPostRequest::unique()).await;
    publish(&server, &ada, &NewPostRequest::unique()).await;
    server.blogs.set_flags(shown.id.parse().unwrap(), true, true);

    let response = server.get("/").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["courseFE"], serde_json::json!([]));
    assert_eq!(body["courseBE"], serde_json::json!([]));
    assert_eq!(body["videos"], serde_json::json!([]));

    let blogs = body["blogs"].as_array().unwrap();
    assert_eq!(blogs.len(), 1);
    assert_eq!(blogs[0]["id"], shown.id.as_str());
    assert_eq!(blogs[0]["postedBy"]["fullName"], "Ada");
}
