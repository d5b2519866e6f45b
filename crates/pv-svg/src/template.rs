use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

/// Document width placeholder.
pub const WIDTH_KEY: &str = "#VBX#";
/// Document height placeholder.
pub const HEIGHT_KEY: &str = "#VBY#";
/// Marker line, newline included, replaced by the generated shapes.
pub const SHAPES_KEY: &str = "    <!-- ##PIXELART## -->\n";

const DEFAULT_BODY: &str = include_str!("../templates/pixelart.svg");

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template has no placeholder {0:?}")]
    MissingPlaceholder(String),

    #[error("placeholder names must not be empty")]
    EmptyPlaceholder,

    #[error("failed to read template {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    body: String,
}

impl Default for Template {
    fn default() -> Self {
        Self::new(DEFAULT_BODY)
    }
}

impl Template {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let body = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded template {}", path.display());
        Ok(Self { body })
    }

    /// Replaces every occurrence of every key with its value.
    ///
    /// The body is scanned once from left to right. Substituted text is never
    /// rescanned, so the result does not depend on key order or on what the
    /// values contain. When two keys match at the same offset the longer one
    /// wins. Every key must occur in the body at least once.
    pub fn render(&self, values: &BTreeMap<&str, String>) -> Result<String, TemplateError> {
        for key in values.keys() {
            if key.is_empty() {
                return Err(TemplateError::EmptyPlaceholder);
            }
            if !self.body.contains(key) {
                return Err(TemplateError::MissingPlaceholder((*key).to_owned()));
            }
        }

        let extra: usize = values.values().map(String::len).sum();
        let mut out = String::with_capacity(self.body.len() + extra);
        let mut rest = self.body.as_str();

        loop {
            let next = values
                .iter()
                .filter_map(|(key, value)| rest.find(key).map(|at| (at, key.len(), value)))
                .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

            let Some((at, key_len, value)) = next else {
                out.push_str(rest);
                break;
            };

            out.push_str(&rest[..at]);
            out.push_str(value);
            rest = &rest[at + key_len..];
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{HEIGHT_KEY, SHAPES_KEY, Template, TemplateError, WIDTH_KEY};

    #[test]
    fn default_template_has_all_placeholders() {
        let t = Template::default();
        assert!(t.body.contains(WIDTH_KEY));
        assert!(t.body.contains(HEIGHT_KEY));
        assert!(t.body.contains(SHAPES_KEY));
    }

    #[test]
    fn replaces_every_occurrence() {
        let t = Template::new("w=#W# h=#H# again #W#");
        let values = BTreeMap::from([("#W#", "3".to_owned()), ("#H#", "4".to_owned())]);

        assert_eq!(t.render(&values).expect("render"), "w=3 h=4 again 3");
    }

    #[test]
    fn values_are_not_rescanned() {
        let t = Template::new("[#A#][#B#]");
        let values = BTreeMap::from([("#A#", "#B#".to_owned()), ("#B#", "#A#".to_owned())]);

        assert_eq!(t.render(&values).expect("render"), "[#B#][#A#]");
    }

    #[test]
    fn longer_key_wins_at_same_offset() {
        let t = Template::new("<#KEY#>");
        let values = BTreeMap::from([("#KEY", "short".to_owned()), ("#KEY#", "long".to_owned())]);

        assert_eq!(t.render(&values).expect("render"), "<long>");
    }

    #[test]
    fn missing_placeholder_is_an_error() {
        let t = Template::new("no markers here");
        let values = BTreeMap::from([(WIDTH_KEY, "1".to_owned())]);

        match t.render(&values) {
            Err(TemplateError::MissingPlaceholder(key)) => assert_eq!(key, WIDTH_KEY),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_key_is_rejected() {
        let t = Template::new("x");
        let values = BTreeMap::from([("", "1".to_owned())]);
        assert!(matches!(
            t.render(&values),
            Err(TemplateError::EmptyPlaceholder)
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = std::path::Path::new("definitely/not/here/template.svg");
        let err = Template::from_file(path).unwrap_err();
        assert!(err.to_string().contains("template.svg"));
    }
}
