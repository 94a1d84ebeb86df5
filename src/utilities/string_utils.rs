//! String helpers for filling `{placeholder}` variables in config text.

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static VARIABLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_\-]*)\}").expect("valid regex"));

/// Replace every `{name}` whose `name` is present in `inputs`.
///
/// Unknown placeholders and braces that do not form a variable name (JSON
/// snippets in a task description, for instance) are left as they are.
pub fn interpolate_only(template: &str, inputs: &HashMap<String, String>) -> String {
    if inputs.is_empty() || !template.contains('{') {
        return template.to_string();
    }
    VARIABLE_PATTERN
        .replace_all(template, |caps: &Captures<'_>| match inputs.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// The distinct variable names referenced by `template`, sorted.
pub fn template_variables(template: &str) -> BTreeSet<String> {
    VARIABLE_PATTERN
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}
