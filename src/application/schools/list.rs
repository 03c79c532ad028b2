use crate::domain::schools::{School, SchoolRepository};
use crate::shared::error::AppError;
use std::sync::Arc;

/// Returns every stored record, most recent first, verbatim. No pagination
/// and no server-side filtering; narrowing happens in the display layer.
pub struct ListSchoolsUseCase {
    repo: Arc<dyn SchoolRepository>,
}

impl ListSchoolsUseCase {
    pub fn new(repo: Arc<dyn SchoolRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> Result<Vec<School>, AppError> {
        self.repo
            .find_all_newest_first()
            .await
            .map_err(AppError::Persistence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schools::NewSchool;
    use crate::domain::schools::SchoolImage;
    use crate::infrastructure::repositories::mock::MockSchoolRepository;

    fn new_school(name: &str) -> NewSchool {
        NewSchool {
            name: name.to_string(),
            address: "12 Park Lane, near city hall".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            contact: "0123456789".to_string(),
            email_id: format!("{}@example.com", name.to_lowercase()),
            image: SchoolImage::Hosted {
                url: "https://img.example.com/schoolImages/x".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn returns_records_newest_first() {
        let repo = Arc::new(MockSchoolRepository::default());
        for name in ["First", "Second", "Third"] {
            repo.create(new_school(name)).await.unwrap();
        }

        let schools = ListSchoolsUseCase::new(repo).execute().await.unwrap();

        assert_eq!(schools.len(), 3);
        assert_eq!(schools[0].name, "Third");
        assert_eq!(schools[2].name, "First");
        for pair in schools.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn empty_repository_yields_an_empty_list() {
        let repo = Arc::new(MockSchoolRepository::default());
        let schools = ListSchoolsUseCase::new(repo).execute().await.unwrap();
        assert!(schools.is_empty());
    }
}
