use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// How a school's image is stored.
///
/// `Hosted` carries a durable URL on the external image host; `Inline` is the
/// self-contained fallback, a `data:` URL embedded in the record itself. The
/// two are incompatible downstream (a hosted URL can be hot-linked, an inline
/// image cannot), so consumers must branch on the tag rather than sniff
/// string prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchoolImage {
    Hosted { url: String },
    Inline { data: String },
}

impl SchoolImage {
    pub fn kind(&self) -> &'static str {
        match self {
            SchoolImage::Hosted { .. } => "hosted",
            SchoolImage::Inline { .. } => "inline",
        }
    }

    /// The stored text value, independent of kind.
    pub fn value(&self) -> &str {
        match self {
            SchoolImage::Hosted { url } => url,
            SchoolImage::Inline { data } => data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image: SchoolImage,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String, example = "2025-08-01T12:00:00Z")]
    pub created_at: OffsetDateTime,
}

/// A validated school ready for insertion. `id` and `created_at` do not exist
/// yet; the repository assigns both.
#[derive(Debug, Clone)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image: SchoolImage,
}

#[async_trait]
pub trait SchoolRepository: Send + Sync {
    async fn create(&self, new_school: NewSchool) -> Result<School, anyhow::Error>;
    /// All records ordered by `created_at` descending, most recent first.
    async fn find_all_newest_first(&self) -> Result<Vec<School>, anyhow::Error>;
}
