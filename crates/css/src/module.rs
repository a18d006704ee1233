use core_types::{ClassNameMap, ContentHash};
use tools::hash::{hex_digest, mixed_hex_digest, truncated};

use crate::error::CssError;
use crate::extract::extract_class_names;
use crate::rewrite::rewrite;

/// Naming knobs for scoped class names.
#[derive(Clone, Debug)]
pub struct ScopeConfig {
    /// Prefix of every generated class name.
    pub class_prefix: String,
    /// Hex characters kept from the per-class digest.
    pub class_hash_len: usize,
    /// Hex characters kept from the content digest (at most 8).
    pub content_hash_len: usize,
    /// Attribute that tags injected style elements with their content hash.
    pub marker_attribute: String,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            class_prefix: "css-".to_string(),
            class_hash_len: 6,
            content_hash_len: 8,
            marker_attribute: "data-css-module".to_string(),
        }
    }
}

/// Result of scoping one style text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopedStylesheet {
    pub hash: ContentHash,
    pub class_map: ClassNameMap,
    pub css: String,
}

pub fn content_hash(css: &str, config: &ScopeConfig) -> ContentHash {
    let digest = hex_digest(css);
    ContentHash::new(truncated(&digest, config.content_hash_len))
}

/// Scoped name for `name` under `hash`. Same inputs, same output.
///
/// Only a prefix of the digest is kept, so it goes through the finalizer:
/// every character of `hash` must be able to change the name.
pub fn scoped_class_name(name: &str, hash: &ContentHash, config: &ScopeConfig) -> String {
    let digest = mixed_hex_digest(&format!("{name}-{hash}"));
    format!(
        "{}{}",
        config.class_prefix,
        truncated(&digest, config.class_hash_len)
    )
}

/// Build the class map for every class selector in `css`.
pub fn class_map_for(
    css: &str,
    hash: &ContentHash,
    config: &ScopeConfig,
) -> Result<ClassNameMap, CssError> {
    let names = extract_class_names(css)?;
    if names.is_empty() {
        return Err(CssError::NoClassNamesFound);
    }
    Ok(names
        .into_iter()
        .map(|name| {
            let scoped = scoped_class_name(&name, hash, config);
            (name, scoped)
        })
        .collect())
}

/// Hash, extract, map and rewrite. Pure: nothing is injected or recorded.
pub fn scope_css(css: &str, config: &ScopeConfig) -> Result<ScopedStylesheet, CssError> {
    let hash = content_hash(css, config);
    let class_map = class_map_for(css, &hash, config)?;
    let css = rewrite(css, &class_map)?;
    Ok(ScopedStylesheet {
        hash,
        class_map,
        css,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_stable_for_name_and_hash() {
        let config = ScopeConfig::default();
        let hash = ContentHash::new("1234abcd");
        let first = scoped_class_name("foo", &hash, &config);
        assert_eq!(first, scoped_class_name("foo", &hash, &config));
        assert_eq!(first, format!("css-{}", &mixed_hex_digest("foo-1234abcd")[..6]));
        assert_ne!(first, scoped_class_name("foo", &ContentHash::new("1234abce"), &config));
    }

    #[test]
    fn every_last_hash_digit_changes_the_name() {
        let config = ScopeConfig::default();
        let names: std::collections::BTreeSet<String> = "0123456789abcdef"
            .chars()
            .map(|c| scoped_class_name("foo", &ContentHash::new(format!("1234abc{c}")), &config))
            .collect();
        assert_eq!(names.len(), 16, "{names:?}");
    }

    #[test]
    fn container_scenario() {
        let input = ".container { padding: 16px; } .container:hover { opacity: 0.8; }";
        let scoped = scope_css(input, &ScopeConfig::default()).unwrap();

        assert_eq!(scoped.class_map.len(), 1);
        let name = scoped.class_map.get("container").unwrap().to_string();
        assert!(name.starts_with("css-"));
        assert_eq!(name.len(), "css-".len() + 6);
        assert_eq!(
            scoped.css,
            format!(".{name} {{ padding: 16px; }} .{name}:hover {{ opacity: 0.8; }}")
        );
        assert_eq!(scoped.hash, content_hash(input, &ScopeConfig::default()));
        assert_eq!(scoped.hash.as_str().len(), 8);
    }

    #[test]
    fn no_class_selectors_is_an_error() {
        assert_eq!(
            scope_css("body { color: black; }", &ScopeConfig::default()),
            Err(CssError::NoClassNamesFound)
        );
    }

    #[test]
    fn custom_prefix_and_length() {
        let config = ScopeConfig {
            class_prefix: "x_".to_string(),
            class_hash_len: 4,
            content_hash_len: 6,
            ..ScopeConfig::default()
        };
        let scoped = scope_css(".a {}", &config).unwrap();
        let name = scoped.class_map.get("a").unwrap();
        assert!(name.starts_with("x_"));
        assert_eq!(name.len(), 6);
        assert_eq!(scoped.hash.as_str().len(), 6);
    }
}
