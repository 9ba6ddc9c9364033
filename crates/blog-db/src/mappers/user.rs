//! User entity <-> model mapper

use blog_core::entities::User;
use blog_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            full_name: model.full_name,
            email: model.email,
            bio: model.bio,
            photo_url: model.photo_url,
            created_at: model.created_at,
        }
    }
}
