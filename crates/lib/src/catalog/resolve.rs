//! Template ("meta") expansion.

use std::collections::HashMap;

use tracing::debug;

use super::types::RawCatalog;
use super::{CatalogError, Package, Template};

/// Parse raw packages and templates and merge each package's template into it.
///
/// The returned packages keep document order and carry no `template_ref`.
pub fn resolve(raw_packages: &RawCatalog, raw_templates: &RawCatalog) -> Result<Vec<Package>, CatalogError> {
  let templates = raw_templates
    .iter()
    .map(|(name, record)| Template::from_raw(name, record).map(|t| (name.as_str(), t)))
    .collect::<Result<HashMap<_, _>, _>>()?;

  raw_packages
    .iter()
    .map(|(name, record)| -> Result<Package, CatalogError> {
      let mut package = Package::from_raw(name, record)?;
      if let Some(template_name) = package.template_ref.take() {
        let template = templates
          .get(template_name.as_str())
          .ok_or_else(|| CatalogError::TemplateNotFound {
            package: name.clone(),
            template: template_name.clone(),
          })?;
        debug!(package = %name, template = %template_name, "merging template");
        merge_template(&mut package, template);
      }
      Ok(package)
    })
    .collect()
}

/// Copy template fields the package does not declare itself.
///
/// Template-only variables are appended after the package's own, in template
/// order. Template commands apply only when the package declares none.
pub fn merge_template(package: &mut Package, template: &Template) {
  for (name, value) in template.variables.iter() {
    if !package.variables.contains(name) {
      package.variables.insert(name, value.clone());
    }
  }

  if package.commands.is_none() {
    package.commands = template.commands.clone();
  }

  package.template_ref = None;
}
