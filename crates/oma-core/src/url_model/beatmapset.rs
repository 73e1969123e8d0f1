//! Splitting of the text after `beatmapsets/` into set id, mode and difficulty.

use super::ResolveError;

#[derive(Debug, PartialEq, Eq)]
pub(super) struct SetParts<'a> {
    pub set_id: &'a str,
    pub game_mode: Option<&'a str>,
    pub difficulty_id: Option<&'a str>,
}

/// Splits `<set_id>[#<game_mode>[/<difficulty_id>]]` on the first `#` and first `/`.
///
/// A `/` with no `#` keeps the historical reading where the mode runs from
/// the start of the remainder: `123/456` yields an empty set id, mode `123`
/// and difficulty `456`. A `#` after the first `/` would leak `/` into the set
/// id and is rejected. Empty mode or difficulty text is reported as absent.
pub(super) fn split_remainder(rest: &str) -> Result<SetParts<'_>, ResolveError> {
    let slash = rest.find('/');
    let hash = rest.find('#');

    let parts = match (slash, hash) {
        (None, None) => SetParts {
            set_id: rest,
            game_mode: None,
            difficulty_id: None,
        },
        (None, Some(h)) => SetParts {
            set_id: &rest[..h],
            game_mode: non_empty(&rest[h + 1..]),
            difficulty_id: None,
        },
        (Some(s), None) => SetParts {
            set_id: "",
            game_mode: non_empty(&rest[..s]),
            difficulty_id: non_empty(&rest[s + 1..]),
        },
        (Some(s), Some(h)) if h < s => SetParts {
            set_id: &rest[..h],
            game_mode: non_empty(&rest[h + 1..s]),
            difficulty_id: non_empty(&rest[s + 1..]),
        },
        (Some(_), Some(_)) => return Err(ResolveError::NotRecognized),
    };
    Ok(parts)
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
