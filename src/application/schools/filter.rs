use crate::domain::schools::School;
use serde::Deserialize;

/// View-layer narrowing over an already-fetched record list.
///
/// This is deliberately not part of the listing endpoint: the server returns
/// the full list and display layers recompute this projection on every input
/// change. All three predicates are optional and combine with AND; the
/// free-text search matches case-insensitively against any of name, city,
/// state or address, while the city and state predicates are exact matches
/// (their values come from the stored records themselves, via
/// [`unique_cities`] / [`unique_states`]).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchoolFilter {
    pub search: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl SchoolFilter {
    /// True when no predicate is supplied, i.e. `apply` is the identity.
    pub fn is_empty(&self) -> bool {
        fn unset(value: &Option<String>) -> bool {
            value.as_deref().is_none_or(str::is_empty)
        }
        unset(&self.search) && unset(&self.city) && unset(&self.state)
    }

    pub fn matches(&self, school: &School) -> bool {
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let hit = [
                &school.name,
                &school.city,
                &school.state,
                &school.address,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        if let Some(city) = self.city.as_deref().filter(|c| !c.is_empty()) {
            if school.city != city {
                return false;
            }
        }
        if let Some(state) = self.state.as_deref().filter(|s| !s.is_empty()) {
            if school.state != state {
                return false;
            }
        }
        true
    }

    /// Keep the records satisfying every supplied predicate, in their
    /// original order. Cheap enough to recompute per keystroke.
    pub fn apply<'a>(&self, schools: &'a [School]) -> Vec<&'a School> {
        schools.iter().filter(|s| self.matches(s)).collect()
    }
}

/// Distinct city values across the list, sorted — dropdown feed.
pub fn unique_cities(schools: &[School]) -> Vec<String> {
    unique_values(schools, |s| &s.city)
}

/// Distinct state values across the list, sorted — dropdown feed.
pub fn unique_states(schools: &[School]) -> Vec<String> {
    unique_values(schools, |s| &s.state)
}

fn unique_values<F>(schools: &[School], field: F) -> Vec<String>
where
    F: Fn(&School) -> &String,
{
    let mut values: Vec<String> = schools.iter().map(|s| field(s).clone()).collect();
    values.sort();
    values.dedup();
    values
}
