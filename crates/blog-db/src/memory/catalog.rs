//! In-memory CourseRepository and VideoRepository

use async_trait::async_trait;
use parking_lot::RwLock;

use blog_core::entities::{Course, CourseTrack, Video};
use blog_core::traits::{CourseRepository, RepoResult, VideoRepository};

/// Courses in insertion order
#[derive(Debug, Default)]
pub struct MemoryCourseRepository {
    courses: RwLock<Vec<Course>>,
}

impl MemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for MemoryCourseRepository {
    async fn list_by_track(&self, track: CourseTrack) -> RepoResult<Vec<Course>> {
        Ok(self
            .courses
            .read()
            .iter()
            .filter(|c| c.is_on_track(track))
            .cloned()
            .collect())
    }

    async fn create(&self, course: &Course) -> RepoResult<()> {
        self.courses.write().push(course.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryVideoRepository {
    videos: RwLock<Vec<Video>>,
}

impl MemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for MemoryVideoRepository {
    async fn list_popular(&self) -> RepoResult<Vec<Video>> {
        let mut videos: Vec<Video> = self
            .videos
            .read()
            .iter()
            .filter(|v| v.is_popular)
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }

    async fn create(&self, video: &Video) -> RepoResult<()> {
        self.videos.write().push(video.clone());
        Ok(())
    }
}
