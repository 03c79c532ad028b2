use crate::application::images::ingest::{ImagePayload, IngestImageUseCase};
use crate::domain::images::ImageIngestionError;
use crate::domain::schools::{NewSchool, School, SchoolImage, SchoolRepository};
use crate::shared::error::AppError;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, LazyLock};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

static CONTACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[0-9\s\-()]{10,15}$").expect("contact pattern"));

/// Untyped wire payload for a submission. Every field is optional here so the
/// presence check can report exactly which ones are missing instead of
/// failing at deserialization.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SchoolSubmission {
    #[schema(example = "Lotus School")]
    pub name: Option<String>,
    #[schema(example = "12 Park Lane, near city hall")]
    pub address: Option<String>,
    #[schema(example = "Springfield")]
    pub city: Option<String>,
    #[schema(example = "IL")]
    pub state: Option<String>,
    #[schema(example = "+1-555-123-4567")]
    pub contact: Option<String>,
    #[schema(example = "admin@lotus.edu")]
    pub email_id: Option<String>,
    /// Self-contained `data:<mime>;base64,...` URL (JSON submissions).
    pub image_base64: Option<String>,
    /// Raw upload from the multipart path.
    #[serde(skip)]
    pub image: Option<ImagePayload>,
}

impl SchoolSubmission {
    /// Names of mandatory fields that are absent or blank, in display order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        fn absent(value: &Option<String>) -> bool {
            value.as_deref().is_none_or(|s| s.trim().is_empty())
        }

        let mut missing = Vec::new();
        for (field, value) in [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("contact", &self.contact),
            ("email_id", &self.email_id),
        ] {
            if absent(value) {
                missing.push(field);
            }
        }
        if self.image_payload().is_none() {
            missing.push("image");
        }
        missing
    }

    /// The image from whichever path carried it; the raw upload wins when
    /// both are somehow present.
    pub fn image_payload(&self) -> Option<ImagePayload> {
        if let Some(payload) = &self.image {
            return Some(payload.clone());
        }
        self.image_base64
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| ImagePayload::DataUrl(s.to_string()))
    }
}

/// Normalized candidate record carrying the validation rules. Built from a
/// submission by trimming every field and lowercasing the email; validation
/// runs on the normalized values.
#[derive(Debug, Validate)]
pub struct SchoolDraft {
    #[validate(length(
        min = 2,
        max = 100,
        message = "School name must be between 2 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(
        min = 10,
        max = 500,
        message = "Address must be between 10 and 500 characters"
    ))]
    pub address: String,
    #[validate(length(min = 2, max = 50, message = "City must be between 2 and 50 characters"))]
    pub city: String,
    #[validate(length(min = 2, max = 50, message = "State must be between 2 and 50 characters"))]
    pub state: String,
    #[validate(
        length(
            min = 10,
            max = 15,
            message = "Contact number must be between 10 and 15 characters"
        ),
        regex(path = *CONTACT_RE, message = "Please enter a valid phone number")
    )]
    pub contact: String,
    #[validate(
        email(message = "Please enter a valid email address"),
        length(max = 255, message = "Email must be less than 255 characters")
    )]
    pub email_id: String,
}

impl SchoolDraft {
    pub fn from_submission(submission: &SchoolSubmission) -> Self {
        fn trimmed(value: &Option<String>) -> String {
            value.as_deref().unwrap_or("").trim().to_string()
        }

        Self {
            name: trimmed(&submission.name),
            address: trimmed(&submission.address),
            city: trimmed(&submission.city),
            state: trimmed(&submission.state),
            contact: trimmed(&submission.contact),
            email_id: trimmed(&submission.email_id).to_lowercase(),
        }
    }
}

/// Per-field violation messages, sorted by field name so responses are
/// stable.
fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let mut fields: Vec<(String, Vec<serde_json::Value>)> = errors
        .field_errors()
        .iter()
        .map(|(field, violations)| {
            let messages = violations
                .iter()
                .map(|v| {
                    v.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| v.code.to_string())
                        .into()
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    serde_json::Value::Object(
        fields
            .into_iter()
            .map(|(field, messages)| (field, serde_json::Value::Array(messages)))
            .collect(),
    )
}

/// One-shot submission flow: presence check, validation, image ingestion,
/// then a single insert. Any failure is terminal for the request and leaves
/// no record behind; resubmitting an identical payload creates a duplicate.
pub struct CreateSchoolUseCase {
    repo: Arc<dyn SchoolRepository>,
    images: IngestImageUseCase,
}

impl CreateSchoolUseCase {
    pub fn new(repo: Arc<dyn SchoolRepository>, images: IngestImageUseCase) -> Self {
        Self { repo, images }
    }

    #[tracing::instrument(skip(self, submission))]
    pub async fn execute(&self, submission: SchoolSubmission) -> Result<School, AppError> {
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::validation_with_details(
                format!("Missing required fields: {}", missing.join(", ")),
                json!({ "missing": missing }),
            ));
        }

        let draft = SchoolDraft::from_submission(&submission);
        if let Err(errors) = draft.validate() {
            return Err(AppError::validation_with_details(
                "Validation failed".to_string(),
                validation_details(&errors),
            ));
        }

        // The record references the image, so ingestion must finish first.
        let payload = submission
            .image_payload()
            .ok_or(ImageIngestionError::Missing)?;
        let image = self.images.execute(payload).await?;

        let new_school = NewSchool {
            name: draft.name,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            contact: draft.contact,
            email_id: draft.email_id,
            image: image.clone(),
        };

        match self.repo.create(new_school).await {
            Ok(school) => {
                tracing::info!(id = school.id, "school created");
                Ok(school)
            }
            Err(e) => {
                // No compensating delete exists; the warning records the
                // orphaned URL.
                if let SchoolImage::Hosted { url } = &image {
                    tracing::warn!(%url, "insert failed after image upload; hosted image is orphaned");
                }
                Err(AppError::Persistence(e))
            }
        }
    }
}
