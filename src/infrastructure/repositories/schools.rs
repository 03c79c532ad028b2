use crate::domain::schools::{NewSchool, School, SchoolRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::schools::SchoolRow;
use async_trait::async_trait;

#[derive(Clone)]
pub struct PostgresSchoolRepository {
    pool: DbPool,
}

impl PostgresSchoolRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchoolRepository for PostgresSchoolRepository {
    async fn create(&self, new_school: NewSchool) -> Result<School, anyhow::Error> {
        let row = sqlx::query_as::<_, SchoolRow>(
            r#"
            INSERT INTO schools (name, address, city, state, contact, email_id, image_kind, image_value)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, address, city, state, contact, email_id, image_kind, image_value, created_at
            "#,
        )
        .bind(new_school.name)
        .bind(new_school.address)
        .bind(new_school.city)
        .bind(new_school.state)
        .bind(new_school.contact)
        .bind(new_school.email_id)
        .bind(new_school.image.kind())
        .bind(new_school.image.value().to_string())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_all_newest_first(&self) -> Result<Vec<School>, anyhow::Error> {
        let rows = sqlx::query_as::<_, SchoolRow>(
            r#"
            SELECT id, name, address, city, state, contact, email_id, image_kind, image_value, created_at
            FROM schools
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(School::try_from).collect()
    }
}
