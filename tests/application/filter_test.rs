use skolr::application::schools::filter::{SchoolFilter, unique_cities, unique_states};
use skolr::domain::schools::{School, SchoolImage};
use time::OffsetDateTime;

fn school(id: i64, name: &str, city: &str, state: &str, address: &str) -> School {
    School {
        id,
        name: name.to_string(),
        address: address.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        contact: "0123456789".to_string(),
        email_id: format!("school{id}@example.com"),
        image: SchoolImage::Hosted {
            url: format!("https://img.example.com/schoolImages/{id}"),
        },
        created_at: OffsetDateTime::from_unix_timestamp(1_700_000_000 + id).unwrap(),
    }
}

fn directory() -> Vec<School> {
    vec![
        school(1, "Lotus School", "Springfield", "IL", "12 Park Lane"),
        school(2, "Riverdale High", "Portland", "OR", "8 River Road"),
        school(3, "Hilltop Academy", "Springfield", "MO", "3 Hilltop Drive"),
        school(4, "Parkside Primary", "Salem", "OR", "1 Lotus Avenue"),
        school(5, "Cedar Grove School", "Portland", "OR", "77 Cedar Street"),
    ]
}

#[test]
fn empty_search_is_the_identity() {
    let schools = directory();
    let with_empty = SchoolFilter {
        search: Some(String::new()),
        ..SchoolFilter::default()
    };
    let unfiltered: Vec<i64> = with_empty.apply(&schools).iter().map(|s| s.id).collect();
    assert_eq!(unfiltered, vec![1, 2, 3, 4, 5]);
}

#[test]
fn every_hit_contains_the_term_in_some_field() {
    let schools = directory();
    for term in ["school", "PORT", "lane", "il", "e"] {
        let filter = SchoolFilter {
            search: Some(term.to_string()),
            ..SchoolFilter::default()
        };
        let needle = term.to_lowercase();
        for hit in filter.apply(&schools) {
            let fields = [&hit.name, &hit.city, &hit.state, &hit.address];
            assert!(
                fields.iter().any(|f| f.to_lowercase().contains(&needle)),
                "term {term:?} produced a false hit on school {}",
                hit.id
            );
        }
    }
}

#[test]
fn search_and_dropdowns_compose() {
    let schools = directory();
    let filter = SchoolFilter {
        search: Some("school".to_string()),
        city: Some("Portland".to_string()),
        state: Some("OR".to_string()),
    };
    let ids: Vec<i64> = filter.apply(&schools).iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![5]);
}

#[test]
fn dropdown_feeds_cover_exactly_the_stored_values() {
    let schools = directory();
    let cities = unique_cities(&schools);
    let states = unique_states(&schools);

    assert_eq!(cities, vec!["Portland", "Salem", "Springfield"]);
    assert_eq!(states, vec!["IL", "MO", "OR"]);

    // Every dropdown value selects at least one record.
    for city in cities {
        let filter = SchoolFilter {
            city: Some(city),
            ..SchoolFilter::default()
        };
        assert!(!filter.apply(&schools).is_empty());
    }
}

#[test]
fn clearing_all_predicates_restores_the_full_list() {
    let schools = directory();
    let mut filter = SchoolFilter {
        search: Some("cedar".to_string()),
        city: Some("Portland".to_string()),
        state: Some("OR".to_string()),
    };
    assert_eq!(filter.apply(&schools).len(), 1);

    filter = SchoolFilter::default();
    assert!(filter.is_empty());
    assert_eq!(filter.apply(&schools).len(), schools.len());
}
