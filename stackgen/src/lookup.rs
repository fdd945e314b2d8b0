//! Arity policy shared by the generated lookup helpers.

use crate::error::{ApiError, LookupError};

/// Resolves an entity id from a name-filtered listing.
///
/// - zero results → [`LookupError::NotFound`]
/// - one result → its id
/// - more → the id of the exact name match, else [`LookupError::NotFound`]
///
/// `count` is the count reported by the service (or recomputed by the
/// caller for entities whose count is unreliable).
pub fn resolve_id<'a, I>(kind: &str, name: &str, count: i64, candidates: I) -> Result<String, LookupError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let not_found = || LookupError::NotFound {
        kind: kind.to_string(),
        key: name.to_string(),
    };

    let mut candidates = candidates.into_iter();
    match count {
        c if c <= 0 => Err(not_found()),
        1 => candidates
            .next()
            .map(|(id, _)| id.to_string())
            .ok_or_else(not_found),
        _ => candidates
            .find(|(_, candidate)| *candidate == name)
            .map(|(id, _)| id.to_string())
            .ok_or_else(not_found),
    }
}

/// Picks the single entity from an id-filtered listing.
///
/// - zero results → [`LookupError::NotFound`]
/// - one result → that entity
/// - more → [`LookupError::MultipleResults`]
pub fn single_by_id<T>(kind: &str, id: &str, count: i64, items: Vec<T>) -> Result<T, LookupError> {
    let not_found = || LookupError::NotFound {
        kind: kind.to_string(),
        key: id.to_string(),
    };

    match count {
        c if c <= 0 => Err(not_found()),
        1 => items.into_iter().next().ok_or_else(not_found),
        _ => Err(LookupError::MultipleResults {
            kind: kind.to_string(),
            id: id.to_string(),
            count,
        }),
    }
}

/// Maps an "invalid id" rejection from the service to a not-found error.
///
/// The service answers a malformed or unknown id filter with an error whose
/// text contains `Invalid parameter id value=<id>`; every other error is
/// returned unchanged.
pub fn translate_invalid_id(err: ApiError, kind: &str, id: &str) -> ApiError {
    let needle = format!("Invalid parameter id value={id}");
    if err.service_text().is_some_and(|text| text.contains(&needle)) {
        LookupError::NotFound {
            kind: kind.to_string(),
            key: id.to_string(),
        }
        .into()
    } else {
        err
    }
}
