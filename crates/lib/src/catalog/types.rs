use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use super::CatalogError;
use crate::consts::{CMD_KEY, KEYWORDS_KEY, META_KEY, PREFIX_KEY, RESERVED_MARKER};
use crate::placeholder::{self, Placeholder, PlaceholderError, Segment};

/// Raw `name -> record` document as loaded from `pkg.json` or `meta.json`.
pub type RawCatalog = Map<String, Value>;

/// The value declared for one environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VarValue {
  Single(String),
  List(Vec<String>),
}

impl VarValue {
  /// The declared templates in order; a single value is a one-element slice.
  pub fn templates(&self) -> &[String] {
    match self {
      VarValue::Single(s) => std::slice::from_ref(s),
      VarValue::List(list) => list,
    }
  }
}

/// Environment variables declared by a package or template, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables(Vec<(String, VarValue)>);

impl Variables {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, name: &str) -> Option<&VarValue> {
    self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.get(name).is_some()
  }

  /// Set a variable; an existing entry keeps its position.
  pub fn insert(&mut self, name: impl Into<String>, value: VarValue) {
    let name = name.into();
    match self.0.iter_mut().find(|(n, _)| *n == name) {
      Some((_, existing)) => *existing = value,
      None => self.0.push((name, value)),
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &VarValue)> {
    self.0.iter().map(|(n, v)| (n.as_str(), v))
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(|(n, _)| n.as_str())
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<K: Into<String>> FromIterator<(K, VarValue)> for Variables {
  fn from_iter<I: IntoIterator<Item = (K, VarValue)>>(iter: I) -> Self {
    let mut vars = Variables::new();
    for (name, value) in iter {
      vars.insert(name, value);
    }
    vars
  }
}

impl Serialize for Variables {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.0.len()))?;
    for (name, value) in &self.0 {
      map.serialize_entry(name, value)?;
    }
    map.end()
  }
}

/// A requestable package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Package {
  pub name: String,

  /// `__keywords`: shorthand names selecting this package.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub aliases: Vec<String>,

  /// `__prefix`: install root substituted for `{PREFIX}`; may contain `{HOME}`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub prefix: Option<String>,

  pub variables: Variables,

  /// `__cmd`: literal commands printed before any assignment.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub commands: Option<Vec<String>>,

  /// `__meta`: template merged in during resolution; always `None` once resolved.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub template_ref: Option<String>,
}

impl Package {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Default::default()
    }
  }

  /// The prefix, or an empty string when the package declares none.
  pub fn prefix(&self) -> &str {
    self.prefix.as_deref().unwrap_or("")
  }

  pub fn commands(&self) -> &[String] {
    self.commands.as_deref().unwrap_or(&[])
  }

  /// Build a package from its raw JSON record.
  ///
  /// Unknown `__` keys are reserved and skipped. Every template is checked
  /// for placeholder syntax here so composition never sees a malformed one.
  /// `__prefix` may use `{HOME}` but not `{PREFIX}`.
  pub fn from_raw(name: &str, record: &Value) -> Result<Self, CatalogError> {
    let fields = as_record(name, record)?;
    let mut package = Package::new(name);

    for (key, value) in fields {
      match key.as_str() {
        KEYWORDS_KEY => package.aliases = string_list(name, key, value)?,
        PREFIX_KEY => {
          let prefix = string(name, key, value)?;
          check_prefix(name, &prefix)?;
          package.prefix = Some(prefix);
        }
        META_KEY => package.template_ref = Some(string(name, key, value)?),
        CMD_KEY => package.commands = Some(commands(name, value)?),
        k if k.starts_with(RESERVED_MARKER) => {}
        _ => {
          let var = var_value(name, key, value)?;
          package.variables.insert(key.as_str(), var);
        }
      }
    }

    Ok(package)
  }
}

/// A reusable field set merged into packages via `__meta`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Template {
  pub name: String,
  pub variables: Variables,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub commands: Option<Vec<String>>,
}

impl Template {
  /// Build a template from its raw JSON record.
  ///
  /// Templates cannot carry package identity: `__keywords`, `__prefix` and
  /// `__meta` are skipped with a warning.
  pub fn from_raw(name: &str, record: &Value) -> Result<Self, CatalogError> {
    let fields = as_record(name, record)?;
    let mut template = Template {
      name: name.to_string(),
      ..Default::default()
    };

    for (key, value) in fields {
      match key.as_str() {
        CMD_KEY => template.commands = Some(commands(name, value)?),
        KEYWORDS_KEY | PREFIX_KEY | META_KEY => {
          warn!(template = %name, key = %key, "ignoring package-only key in template");
        }
        k if k.starts_with(RESERVED_MARKER) => {}
        _ => {
          let var = var_value(name, key, value)?;
          template.variables.insert(key.as_str(), var);
        }
      }
    }

    Ok(template)
  }
}

fn as_record<'a>(owner: &str, record: &'a Value) -> Result<&'a Map<String, Value>, CatalogError> {
  record.as_object().ok_or_else(|| CatalogError::InvalidField {
    owner: owner.to_string(),
    field: owner.to_string(),
    expected: "an object",
  })
}

fn invalid(owner: &str, field: &str, expected: &'static str) -> CatalogError {
  CatalogError::InvalidField {
    owner: owner.to_string(),
    field: field.to_string(),
    expected,
  }
}

fn check_template(owner: &str, field: &str, template: &str) -> Result<(), CatalogError> {
  placeholder::validate(template).map_err(|source| CatalogError::Placeholder {
    owner: owner.to_string(),
    field: field.to_string(),
    source,
  })
}

fn check_prefix(owner: &str, prefix: &str) -> Result<(), CatalogError> {
  let placeholder_error = |source: PlaceholderError| CatalogError::Placeholder {
    owner: owner.to_string(),
    field: PREFIX_KEY.to_string(),
    source,
  };

  let segments = placeholder::parse(prefix).map_err(placeholder_error)?;
  if segments.contains(&Segment::Placeholder(Placeholder::Prefix)) {
    return Err(placeholder_error(PlaceholderError::NotAllowed(Placeholder::Prefix)));
  }
  Ok(())
}

fn string(owner: &str, field: &str, value: &Value) -> Result<String, CatalogError> {
  value
    .as_str()
    .map(str::to_string)
    .ok_or_else(|| invalid(owner, field, "a string"))
}

fn string_list(owner: &str, field: &str, value: &Value) -> Result<Vec<String>, CatalogError> {
  let items = value
    .as_array()
    .ok_or_else(|| invalid(owner, field, "a list of strings"))?;
  items
    .iter()
    .map(|item| {
      item
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(owner, field, "a list of strings"))
    })
    .collect()
}

fn commands(owner: &str, value: &Value) -> Result<Vec<String>, CatalogError> {
  let list = match value {
    Value::String(s) => vec![s.clone()],
    Value::Array(_) => string_list(owner, CMD_KEY, value)?,
    _ => return Err(invalid(owner, CMD_KEY, "a string or a list of strings")),
  };
  for cmd in &list {
    check_template(owner, CMD_KEY, cmd)?;
  }
  Ok(list)
}

fn var_value(owner: &str, field: &str, value: &Value) -> Result<VarValue, CatalogError> {
  let var = match value {
    Value::String(s) => VarValue::Single(s.clone()),
    Value::Array(_) => VarValue::List(string_list(owner, field, value)?),
    _ => return Err(invalid(owner, field, "a string or a list of strings")),
  };
  for template in var.templates() {
    check_template(owner, field, template)?;
  }
  Ok(var)
}
