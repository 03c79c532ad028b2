use crate::domain::schools::{School, SchoolImage};
use anyhow::bail;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Row shape of the `schools` table. The image is stored as an explicit
/// kind/value pair; mapping back to the domain enum fails loudly on a kind
/// this version does not know.
#[derive(Debug, Clone, FromRow)]
pub struct SchoolRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image_kind: String,
    pub image_value: String,
    pub created_at: OffsetDateTime,
}

impl TryFrom<SchoolRow> for School {
    type Error = anyhow::Error;

    fn try_from(row: SchoolRow) -> Result<Self, Self::Error> {
        let image = match row.image_kind.as_str() {
            "hosted" => SchoolImage::Hosted {
                url: row.image_value,
            },
            "inline" => SchoolImage::Inline {
                data: row.image_value,
            },
            other => bail!("unknown image kind {other:?} for school {}", row.id),
        };

        Ok(School {
            id: row.id,
            name: row.name,
            address: row.address,
            city: row.city,
            state: row.state,
            contact: row.contact,
            email_id: row.email_id,
            image,
            created_at: row.created_at,
        })
    }
}
