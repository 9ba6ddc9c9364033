//! Test helpers for integration tests
//!
//! Provides a test server over in-memory repositories, authenticated request
//! helpers, and response assertions.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use blog_api::{create_app, AppState};
use blog_common::{AppConfig, BlogSettings, JwtService};
use blog_core::traits::UserRepository;
use blog_core::{Snowflake, SnowflakeGenerator, User};
use blog_db::{
    MemoryBlogRepository, MemoryCourseRepository, MemoryUserRepository, MemoryVideoRepository,
};
use blog_service::ServiceContextBuilder;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub blogs: Arc<MemoryBlogRepository>,
    pub users: Arc<MemoryUserRepository>,
    pub courses: Arc<MemoryCourseRepository>,
    pub videos: Arc<MemoryVideoRepository>,
    jwt: Arc<JwtService>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server that verifies new blogs on creation
    pub async fn start() -> Result<Self> {
        Self::start_with_settings(BlogSettings {
            auto_verify: true,
            ..BlogSettings::default()
        })
        .await
    }

    pub async fn start_with_settings(settings: BlogSettings) -> Result<Self> {
        let config = test_config()?;

        let blogs = Arc::new(MemoryBlogRepository::new());
        let users = Arc::new(MemoryUserRepository::new());
        let courses = Arc::new(MemoryCourseRepository::new());
        let videos = Arc::new(MemoryVideoRepository::new());
        let jwt = Arc::new(JwtService::new(TEST_JWT_SECRET, 900));

        let ctx = ServiceContextBuilder::new()
            .blog_repo(blogs.clone())
            .user_repo(users.clone())
            .course_repo(courses.clone())
            .video_repo(videos.clone())
            .jwt_service(jwt.clone())
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(7)))
            .settings(settings)
            .build()?;

        let app = create_app(AppState::new(ctx, config));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            blogs,
            users,
            courses,
            videos,
            jwt,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Store a user and mint an access token for them
    pub async fn user(&self, id: i64, full_name: &str) -> Result<TestUser> {
        let id = Snowflake::new(id);
        let mut user = User::new(id, full_name.to_string(), format!("{id}@example.com"));
        user.bio = Some(format!("{full_name} writes here"));
        self.users.create(&user).await?;

        Ok(TestUser {
            id,
            token: self.jwt.issue_access_token(id)?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn authed(request: RequestBuilder, token: &str) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {token}"))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.get(self.url(path)), token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body and no token
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.put(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.patch(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.delete(self.url(path)), token)
            .send()
            .await?)
    }
}

/// A stored user with a valid access token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Snowflake,
    pub token: String,
}

/// Configuration for the test server. Rate limits are high enough that
/// tests never trip them.
pub fn test_config() -> Result<AppConfig> {
    let config = AppConfig::from_lookup(|key| {
        let value = match key {
            "DATABASE_URL" => "postgres://localhost/unused",
            "JWT_SECRET" => TEST_JWT_SECRET,
            "RATE_LIMIT_REQUESTS_PER_SECOND" => "1000",
            "RATE_LIMIT_BURST" => "1000",
            _ => return None,
        };
        Some(value.to_string())
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
