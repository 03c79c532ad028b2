use skolr::application::images::ingest::{ImagePayload, ImageSettings, IngestImageUseCase};
use skolr::application::schools::create::{CreateSchoolUseCase, SchoolSubmission};
use skolr::application::schools::list::ListSchoolsUseCase;
use skolr::domain::schools::{School, SchoolImage};
use skolr::infrastructure::repositories::mock::{MockImageHost, MockSchoolRepository};
use std::sync::Arc;
use time::OffsetDateTime;

fn lotus_submission(image: ImagePayload) -> SchoolSubmission {
    SchoolSubmission {
        name: Some("Lotus School".to_string()),
        address: Some("12 Park Lane, near city hall".to_string()),
        city: Some("Springfield".to_string()),
        state: Some("IL".to_string()),
        contact: Some("+1-555-123-4567".to_string()),
        email_id: Some("Admin@Lotus.Edu".to_string()),
        image_base64: None,
        image: Some(image),
    }
}

#[tokio::test]
async fn two_megabyte_jpeg_submission_round_trips() {
    let repo = Arc::new(MockSchoolRepository::default());
    let host = Arc::new(MockImageHost::default());
    let create = CreateSchoolUseCase::new(
        repo.clone(),
        IngestImageUseCase::new(host.clone(), ImageSettings::default()),
    );

    let image = ImagePayload::Raw {
        bytes: vec![0xFF; 2 * 1024 * 1024],
        filename: Some("lotus-front.jpg".to_string()),
        content_type: Some("image/jpeg".to_string()),
    };
    let created = create.execute(lotus_submission(image)).await.unwrap();

    assert_eq!(created.email_id, "admin@lotus.edu");
    assert_eq!(created.state, "IL");
    assert!(matches!(created.image, SchoolImage::Hosted { .. }));

    let listed = ListSchoolsUseCase::new(repo).execute().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(host.uploads().len(), 1);
    assert_eq!(host.uploads()[0].bytes.len(), 2 * 1024 * 1024);
}

fn school_at(id: i64, name: &str, created_at: OffsetDateTime) -> School {
    School {
        id,
        name: name.to_string(),
        address: "12 Park Lane, near city hall".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        contact: "0123456789".to_string(),
        email_id: format!("school{id}@example.com"),
        image: SchoolImage::Inline {
            data: "data:image/png;base64,AAAA".to_string(),
        },
        created_at,
    }
}

#[tokio::test]
async fn listing_orders_strictly_by_creation_time_descending() {
    let repo = Arc::new(MockSchoolRepository::default());
    let t1 = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    let t2 = OffsetDateTime::from_unix_timestamp(1_700_000_100).unwrap();
    let t3 = OffsetDateTime::from_unix_timestamp(1_700_000_200).unwrap();

    // Inserted out of order on purpose
    repo.push(school_at(1, "Middle", t2));
    repo.push(school_at(2, "Oldest", t1));
    repo.push(school_at(3, "Newest", t3));

    let listed = ListSchoolsUseCase::new(repo).execute().await.unwrap();

    let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
    for pair in listed.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
async fn mixed_image_kinds_survive_the_listing_unconflated() {
    let repo = Arc::new(MockSchoolRepository::default());
    let t = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    repo.push(school_at(1, "Inline School", t));
    let mut hosted = school_at(2, "Hosted School", t + time::Duration::seconds(1));
    hosted.image = SchoolImage::Hosted {
        url: "https://img.example.com/schoolImages/x".to_string(),
    };
    repo.push(hosted);

    let listed = ListSchoolsUseCase::new(repo).execute().await.unwrap();

    assert!(matches!(listed[0].image, SchoolImage::Hosted { .. }));
    assert!(matches!(listed[1].image, SchoolImage::Inline { .. }));
}
