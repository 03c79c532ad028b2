use crate::application::images::ingest::{ImagePayload, IngestImageUseCase};
use crate::application::schools::create::{CreateSchoolUseCase, SchoolSubmission};
use crate::application::schools::list::ListSchoolsUseCase;
use crate::domain::schools::School;
use crate::infrastructure::repositories::schools::PostgresSchoolRepository;
use crate::infrastructure::state::AppState;
use crate::shared::error::{AppError, ErrorBody};
use crate::shared::response::ApiResponse;
use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

/// Create a school record.
///
/// Accepts either a multipart form (six text fields plus an `image` file
/// part) or a JSON body with `image_base64` carrying a data URL.
#[utoipa::path(
    post,
    path = "/api/v1/schools",
    tag = "schools",
    request_body = SchoolSubmission,
    responses(
        (status = 201, description = "School created", body = ApiResponse<School>),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody),
        (status = 500, description = "Image ingestion or persistence failure", body = ErrorBody),
    )
)]
pub async fn create_school(
    State(state): State<AppState>,
    req: Request,
) -> Result<impl IntoResponse, AppError> {
    let submission = extract_submission(req).await?;

    let repo = Arc::new(PostgresSchoolRepository::new(state.pool.clone()));
    let images = IngestImageUseCase::new(state.image_host.clone(), state.image_settings.clone());
    let use_case = CreateSchoolUseCase::new(repo, images);

    let school = use_case.execute(submission).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(school))))
}

/// List all schools, most recently created first.
#[utoipa::path(
    get,
    path = "/api/v1/schools",
    tag = "schools",
    responses(
        (status = 200, description = "All schools, newest first", body = ApiResponse<Vec<School>>),
        (status = 500, description = "Retrieval failure", body = ErrorBody),
    )
)]
pub async fn list_schools(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let repo = Arc::new(PostgresSchoolRepository::new(state.pool.clone()));
    let use_case = ListSchoolsUseCase::new(repo);

    let schools = use_case.execute().await?;

    Ok(Json(ApiResponse::new(schools)))
}

/// Pull a submission out of whichever wire format the client chose.
async fn extract_submission(req: Request) -> Result<SchoolSubmission, AppError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AppError::validation(e.to_string()))?;
        submission_from_multipart(multipart).await
    } else {
        let Json(submission) = Json::<SchoolSubmission>::from_request(req, &())
            .await
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
        Ok(submission)
    }
}

async fn submission_from_multipart(
    mut multipart: Multipart,
) -> Result<SchoolSubmission, AppError> {
    let mut submission = SchoolSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => submission.name = Some(text(field).await?),
            "address" => submission.address = Some(text(field).await?),
            "city" => submission.city = Some(text(field).await?),
            "state" => submission.state = Some(text(field).await?),
            "contact" => submission.contact = Some(text(field).await?),
            "email_id" => submission.email_id = Some(text(field).await?),
            "image" => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(e.to_string()))?;
                submission.image = Some(ImagePayload::Raw {
                    bytes: bytes.to_vec(),
                    filename,
                    content_type,
                });
            }
            // Unknown parts are ignored rather than rejected.
            _ => {}
        }
    }

    Ok(submission)
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(e.to_string()))
}
