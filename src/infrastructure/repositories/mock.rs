use crate::domain::images::{ImageHosting, ImageIngestionError, ImageUpload};
use crate::domain::schools::{NewSchool, School, SchoolRepository};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use time::{Duration, OffsetDateTime};

/// In-memory repository for tests. Ids are sequential; each record gets a
/// strictly later `created_at` than the one before so ordering assertions
/// are deterministic.
#[derive(Clone, Default)]
pub struct MockSchoolRepository {
    schools: Arc<Mutex<Vec<School>>>,
}

impl MockSchoolRepository {
    pub fn len(&self) -> usize {
        self.schools.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a fully-formed record, bypassing id/timestamp assignment.
    pub fn push(&self, school: School) {
        self.schools.lock().unwrap().push(school);
    }
}

#[async_trait]
impl SchoolRepository for MockSchoolRepository {
    async fn create(&self, new_school: NewSchool) -> Result<School, anyhow::Error> {
        let mut schools = self.schools.lock().unwrap();
        let id = schools.len() as i64 + 1;
        let school = School {
            id,
            name: new_school.name,
            address: new_school.address,
            city: new_school.city,
            state: new_school.state,
            contact: new_school.contact,
            email_id: new_school.email_id,
            image: new_school.image,
            created_at: OffsetDateTime::now_utc() + Duration::seconds(id),
        };
        schools.push(school.clone());
        Ok(school)
    }

    async fn find_all_newest_first(&self) -> Result<Vec<School>, anyhow::Error> {
        let mut schools = self.schools.lock().unwrap().clone();
        schools.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(schools)
    }
}

/// Image host double: records every upload and hands back a deterministic
/// URL in the shape the real host would.
#[derive(Clone, Default)]
pub struct MockImageHost {
    uploads: Arc<Mutex<Vec<ImageUpload>>>,
}

impl MockImageHost {
    pub fn uploads(&self) -> Vec<ImageUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageHosting for MockImageHost {
    async fn upload(&self, upload: ImageUpload) -> Result<String, ImageIngestionError> {
        let url = format!("https://img.example.com/{}/{}", upload.folder, upload.public_id);
        self.uploads.lock().unwrap().push(upload);
        Ok(url)
    }
}
