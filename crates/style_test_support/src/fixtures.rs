//! Golden scoping fixtures.
//!
//! A fixture file is TOML:
//!
//! ```toml
//! format = "css-scope-v1"
//!
//! [[cases]]
//! id = "pseudo-class"
//! input = ".a:hover { color: red; }"
//! classes = ["a"]
//! expected_css = ".{{a}}:hover { color: red; }"
//!
//! [[cases]]
//! id = "nested-media"
//! input = "@media print { .a { } }"
//! expected_error = "unsupported"
//! ```
//!
//! `{{name}}` in `expected_css` stands for the scoped name of class `name`.
//!
//! `mode = "scoped"` or `mode = "styled"` runs the selector transforms with
//! the given `key` instead of class scoping; their `expected_css` is literal.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const FIXTURE_FORMAT_V1: &str = "css-scope-v1";

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ExpectedError {
    NoClassNames,
    Unsupported,
    Malformed,
}

/// Transform a case runs through.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FixtureMode {
    /// Class scoping with a fresh content hash.
    #[default]
    Module,
    /// Selectors limited to the scope class `key`.
    Scoped,
    /// Styled template bound to `key`.
    Styled,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FixtureCase {
    pub id: String,
    #[serde(default)]
    pub mode: FixtureMode,
    pub key: Option<String>,
    pub input: String,
    #[serde(default)]
    pub classes: Vec<String>,
    pub expected_css: Option<String>,
    pub expected_error: Option<ExpectedError>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FixtureFile {
    pub format: String,
    pub cases: Vec<FixtureCase>,
    #[serde(skip)]
    pub path: PathBuf,
}

impl FixtureFile {
    pub fn load(path: &Path) -> Self {
        let content = fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("failed to read fixture file {path:?}: {err}"));
        let mut file: FixtureFile = toml::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse fixture file {path:?}: {err}"));
        file.path = path.to_path_buf();
        file.validate();
        file
    }

    fn validate(&self) {
        let path = &self.path;
        assert_eq!(
            self.format, FIXTURE_FORMAT_V1,
            "unsupported fixture format in {path:?}"
        );
        assert!(!self.cases.is_empty(), "fixture file {path:?} has no cases");
        let mut ids = BTreeSet::new();
        for case in &self.cases {
            assert!(
                ids.insert(case.id.as_str()),
                "duplicate case id '{}' in {path:?}",
                case.id
            );
            assert_eq!(
                case.key.is_some(),
                case.mode != FixtureMode::Module,
                "case '{}' in {path:?}: `key` goes with scoped/styled mode only",
                case.id
            );
            let needs_classes = case.mode == FixtureMode::Module && case.expected_css.is_some();
            match (&case.expected_css, case.expected_error) {
                (Some(_), None) | (None, Some(_)) => assert_eq!(
                    !case.classes.is_empty(),
                    needs_classes,
                    "case '{}' in {path:?}: classes are listed exactly for expected class scoping",
                    case.id
                ),
                _ => panic!(
                    "case '{}' in {path:?} needs exactly one of expected_css/expected_error",
                    case.id
                ),
            }
        }
    }
}

/// Every `*.toml` fixture file in `dir`, in file-name order.
pub fn load_fixture_dir(dir: &Path) -> Vec<FixtureFile> {
    let mut paths = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read fixture dir {dir:?}: {err}"))
        .map(|entry| {
            entry
                .unwrap_or_else(|err| panic!("failed to read entry in {dir:?}: {err}"))
                .path()
        })
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect::<Vec<_>>();
    paths.sort();
    assert!(!paths.is_empty(), "no fixture files in {dir:?}");
    paths.iter().map(|p| FixtureFile::load(p)).collect()
}

/// Replace each `{{name}}` in `template` with `lookup(name)`.
///
/// Panics on an unknown name or an unterminated placeholder.
pub fn substitute_placeholders(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .unwrap_or_else(|| panic!("unterminated placeholder in {template:?}"));
        let name = &after[..end];
        let value =
            lookup(name).unwrap_or_else(|| panic!("no value for placeholder '{name}'"));
        out.push_str(&value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}
