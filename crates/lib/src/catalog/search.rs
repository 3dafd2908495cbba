//! Token lookup with near-miss suggestions for `info` and interactive mode.

use similar::get_close_matches;

use super::{AliasIndex, AliasTarget, LookupError};

/// Candidates scoring below this similarity are never suggested.
pub const SIMILARITY_CUTOFF: f32 = 0.6;

/// At most this many suggestions are returned.
pub const MAX_SUGGESTIONS: usize = 3;

/// Outcome of looking up a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
  /// The token is a package name or an unambiguous alias.
  Found(String),

  /// The token is an alias shared by these packages.
  Ambiguous(Vec<String>),

  /// No exact hit; exactly one close match.
  DidYouMean(String),

  /// No exact hit; several close matches, best first.
  Alternatives(Vec<String>),
}

/// Resolve a token, falling back to approximate matches over every index key.
///
/// # Errors
///
/// [`LookupError::PackageNotFound`] when nothing is close enough.
pub fn find(token: &str, index: &AliasIndex) -> Result<Lookup, LookupError> {
  match index.get(token) {
    Some(AliasTarget::Package(name)) => return Ok(Lookup::Found(name.clone())),
    Some(AliasTarget::Ambiguous(candidates)) => return Ok(Lookup::Ambiguous(candidates.clone())),
    None => {}
  }

  let mut matches = suggest(token, index.keys());
  match matches.len() {
    0 => Err(LookupError::PackageNotFound(token.to_string())),
    1 => Ok(Lookup::DidYouMean(matches.remove(0))),
    _ => Ok(Lookup::Alternatives(matches)),
  }
}

/// Return up to [`MAX_SUGGESTIONS`] candidates by matching-block ratio, best first.
///
/// The ratio is `2 * matched / (len(needle) + len(candidate))`, so a token
/// that is a large part of a name (`mpi` in `openmpi`) still qualifies.
/// Equal ratios are ordered by name.
pub fn suggest<'a>(needle: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
  let needle = needle.trim();
  if needle.is_empty() {
    return vec![];
  }

  let candidates: Vec<&str> = candidates
    .into_iter()
    .filter(|c| !c.is_empty() && *c != needle)
    .collect();

  get_close_matches(needle, candidates.as_slice(), MAX_SUGGESTIONS, SIMILARITY_CUTOFF)
    .into_iter()
    .map(str::to_string)
    .collect()
}
