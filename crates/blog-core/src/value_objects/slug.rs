//! URL slug of a blog

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 6;
const MAX_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,
    #[error("slug is longer than {MAX_LEN} characters")]
    TooLong,
    #[error("slug may only contain lowercase letters, digits and single dashes")]
    InvalidCharacters,
}

/// Lowercase ASCII words joined by single dashes, e.g. `intro-to-rust-x3k9ab`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate a client-supplied slug
    pub fn parse(value: &str) -> Result<Self, SlugError> {
        if value.is_empty() {
            return Err(SlugError::Empty);
        }
        if value.len() > MAX_LEN {
            return Err(SlugError::TooLong);
        }
        let well_formed = value.split('-').all(|word| {
            !word.is_empty()
                && word
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        });
        if !well_formed {
            return Err(SlugError::InvalidCharacters);
        }
        Ok(Self(value.to_string()))
    }

    /// Derive a slug from a title, followed by a short random suffix so that
    /// equal titles still get distinct slugs
    pub fn from_title(title: &str) -> Self {
        let base: Vec<String> = title
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();

        let mut slug = base.join("-");
        slug.truncate(MAX_LEN - SUFFIX_LEN - 1);
        let slug = slug.trim_end_matches('-');

        let suffix = random_suffix();
        if slug.is_empty() {
            Self(suffix)
        } else {
            Self(format!("{slug}-{suffix}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Slug::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}
