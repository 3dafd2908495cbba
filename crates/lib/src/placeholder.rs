//! Placeholder parsing and substitution for package value templates.
//!
//! Values in a catalog are templates that may refer to the package's install
//! prefix and to the user's home directory. Substitution happens in two phases:
//! the prefix is known while composing fragments, the home directory only when
//! rendering for a shell (it is either baked in or deferred as `$HOME`).
//!
//! # Placeholder Formats
//!
//! - `{PREFIX}` - the `__prefix` of the package declaring the value
//! - `{HOME}` - the home directory of the invoking user
//!
//! # Escaping
//!
//! `{{` and `}}` produce literal braces. A lone `}` or an unknown name such as
//! `{FOO}` is an error, so shell syntax like `${FOO}` must be written `${{FOO}}`.
//! Single `$` characters pass through unchanged.
//!
//! # Example
//!
//! ```
//! use pmod_lib::placeholder::{parse, Placeholder, Segment};
//!
//! let segments = parse("{PREFIX}/bin:$PATH").unwrap();
//! assert_eq!(segments, vec![
//!     Segment::Placeholder(Placeholder::Prefix),
//!     Segment::Literal("/bin:$PATH".to_string()),
//! ]);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A parsed placeholder reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
  /// `{PREFIX}` - install prefix of the declaring package
  Prefix,

  /// `{HOME}` - home directory of the invoking user
  Home,
}

impl Placeholder {
  pub fn as_str(&self) -> &'static str {
    match self {
      Placeholder::Prefix => "PREFIX",
      Placeholder::Home => "HOME",
    }
  }
}

impl fmt::Display for Placeholder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{{{}}}", self.as_str())
  }
}

impl FromStr for Placeholder {
  type Err = PlaceholderError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "PREFIX" => Ok(Placeholder::Prefix),
      "HOME" => Ok(Placeholder::Home),
      other => Err(PlaceholderError::UnknownName(other.to_string())),
    }
  }
}

/// A segment of parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Literal text, with escapes already collapsed
  Literal(String),

  /// A placeholder to be resolved
  Placeholder(Placeholder),
}

/// Errors that can occur during placeholder parsing or resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
  #[error("unclosed placeholder at position {0}")]
  Unclosed(usize),

  #[error("single '}}' at position {0} (write '}}}}' for a literal brace)")]
  UnmatchedClose(usize),

  #[error("unknown placeholder {{{0}}} (write '{{{{' for a literal brace)")]
  UnknownName(String),

  #[error("unresolved placeholder {0}")]
  Unresolved(Placeholder),

  #[error("placeholder {0} is not allowed here")]
  NotAllowed(Placeholder),
}

/// Supplies values for placeholders.
///
/// Returning `None` leaves the placeholder for a later phase.
pub trait Resolver {
  fn resolve(&self, placeholder: Placeholder) -> Option<&str>;
}

/// Resolves `{PREFIX}` only; `{HOME}` stays deferred.
#[derive(Debug, Clone, Copy)]
pub struct PrefixResolver<'a>(pub &'a str);

impl Resolver for PrefixResolver<'_> {
  fn resolve(&self, placeholder: Placeholder) -> Option<&str> {
    match placeholder {
      Placeholder::Prefix => Some(self.0),
      Placeholder::Home => None,
    }
  }
}

/// Resolves `{HOME}` only.
#[derive(Debug, Clone, Copy)]
pub struct HomeResolver<'a>(pub &'a str);

impl Resolver for HomeResolver<'_> {
  fn resolve(&self, placeholder: Placeholder) -> Option<&str> {
    match placeholder {
      Placeholder::Home => Some(self.0),
      Placeholder::Prefix => None,
    }
  }
}

/// Parse a template into segments.
///
/// # Errors
///
/// Returns an error for an unclosed `{`, a lone `}` or an unknown placeholder name.
pub fn parse(input: &str) -> Result<Vec<Segment>, PlaceholderError> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut chars = input.char_indices().peekable();

  while let Some((pos, ch)) = chars.next() {
    match ch {
      '{' => {
        if let Some((_, '{')) = chars.peek() {
          chars.next();
          literal.push('{');
          continue;
        }

        let mut name = String::new();
        let mut found_close = false;
        for (_, c) in chars.by_ref() {
          if c == '}' {
            found_close = true;
            break;
          }
          name.push(c);
        }

        if !found_close {
          return Err(PlaceholderError::Unclosed(pos));
        }

        let placeholder = name.parse::<Placeholder>()?;
        if !literal.is_empty() {
          segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Placeholder(placeholder));
      }
      '}' => match chars.peek() {
        Some((_, '}')) => {
          chars.next();
          literal.push('}');
        }
        _ => return Err(PlaceholderError::UnmatchedClose(pos)),
      },
      _ => literal.push(ch),
    }
  }

  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  Ok(segments)
}

/// Check that a template parses, without substituting anything.
pub fn validate(input: &str) -> Result<(), PlaceholderError> {
  parse(input).map(|_| ())
}

/// Substitute what the resolver knows and keep the rest as template text.
///
/// Resolved values are inserted verbatim, so a value that is itself a template
/// (a prefix such as `{HOME}/opt`) keeps its own placeholders for the next
/// phase. Literal braces are re-escaped; the result parses again.
pub fn substitute_partial(input: &str, resolver: &impl Resolver) -> Result<String, PlaceholderError> {
  let segments = parse(input)?;
  let mut result = String::with_capacity(input.len());

  for segment in &segments {
    match segment {
      Segment::Literal(s) => result.push_str(&escape(s)),
      Segment::Placeholder(p) => match resolver.resolve(*p) {
        Some(value) => result.push_str(value),
        None => result.push_str(&p.to_string()),
      },
    }
  }

  Ok(result)
}

/// Substitute every placeholder and collapse escapes.
///
/// # Errors
///
/// Returns [`PlaceholderError::Unresolved`] if the resolver has no value for a
/// placeholder present in the input.
pub fn substitute(input: &str, resolver: &impl Resolver) -> Result<String, PlaceholderError> {
  let segments = parse(input)?;
  let mut result = String::with_capacity(input.len());

  for segment in &segments {
    match segment {
      Segment::Literal(s) => result.push_str(s),
      Segment::Placeholder(p) => {
        let value = resolver.resolve(*p).ok_or(PlaceholderError::Unresolved(*p))?;
        result.push_str(value);
      }
    }
  }

  Ok(result)
}

/// Escape literal text so it survives another [`parse`].
pub fn escape(literal: &str) -> String {
  literal.replace('{', "{{").replace('}', "}}")
}
