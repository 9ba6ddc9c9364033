//! Course entity <-> model mapper

use blog_core::entities::{Course, CourseRole};
use blog_core::value_objects::Snowflake;

use crate::models::CourseModel;

impl From<CourseModel> for Course {
    fn from(model: CourseModel) -> Self {
        Course {
            id: Snowflake::new(model.id),
            slug: model.slug,
            title: model.title,
            image: model.image,
            student_count: model.student_count,
            role: CourseRole {
                front_end: model.role_fe,
                back_end: model.role_be,
            },
            created_at: model.created_at,
        }
    }
}
