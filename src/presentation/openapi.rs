use crate::application::schools::create::SchoolSubmission;
use crate::domain::schools::{School, SchoolImage};
use crate::shared::error::ErrorBody;
use crate::shared::response::ApiResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skolr School Directory API",
        version = "0.1.0",
        description = "Submit school records with an image and list them newest-first.\n\nEvery response is wrapped in a `{ success, data | error }` envelope."
    ),
    paths(
        crate::presentation::handlers::schools::create_school,
        crate::presentation::handlers::schools::list_schools,
    ),
    components(
        schemas(
            School,
            SchoolImage,
            SchoolSubmission,
            ApiResponse<School>,
            ApiResponse<Vec<School>>,
            ErrorBody,
        )
    ),
    tags(
        (name = "schools", description = "School record submission and listing")
    )
)]
pub struct ApiDoc;
