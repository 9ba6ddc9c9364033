//! Video entity <-> model mapper

use blog_core::entities::Video;
use blog_core::value_objects::Snowflake;

use crate::models::VideoModel;

impl From<VideoModel> for Video {
    fn from(model: VideoModel) -> Self {
        Video {
            id: Snowflake::new(model.id),
            slug: model.slug,
            title: model.title,
            thumbnail: model.thumbnail,
            is_popular: model.is_popular,
            created_at: model.created_at,
        }
    }
}
