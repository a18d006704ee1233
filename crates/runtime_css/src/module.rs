use std::panic::{AssertUnwindSafe, catch_unwind};

use core_types::{ClassNameMap, ContentHash, StyleId};
use css::{ScopeConfig, class_map_for, content_hash, interpolate, rewrite};

use crate::error::{InjectError, ModuleError};
use crate::host::StyleHost;
use crate::registry::{Lookup, StyleRegistry};

/// What [`try_css_module`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleOutcome {
    /// Scoped and appended to the document as `style`.
    Injected {
        hash: ContentHash,
        class_map: ClassNameMap,
        style: StyleId,
    },
    /// The same text was injected earlier; nothing was appended.
    Reused {
        hash: ContentHash,
        class_map: ClassNameMap,
    },
    /// No document to inject into. The mapping is valid but nothing was
    /// appended or recorded.
    Detached {
        hash: ContentHash,
        class_map: ClassNameMap,
    },
}

impl ModuleOutcome {
    pub fn hash(&self) -> &ContentHash {
        match self {
            ModuleOutcome::Injected { hash, .. }
            | ModuleOutcome::Reused { hash, .. }
            | ModuleOutcome::Detached { hash, .. } => hash,
        }
    }

    pub fn class_map(&self) -> &ClassNameMap {
        match self {
            ModuleOutcome::Injected { class_map, .. }
            | ModuleOutcome::Reused { class_map, .. }
            | ModuleOutcome::Detached { class_map, .. } => class_map,
        }
    }

    pub fn into_class_map(self) -> ClassNameMap {
        match self {
            ModuleOutcome::Injected { class_map, .. }
            | ModuleOutcome::Reused { class_map, .. }
            | ModuleOutcome::Detached { class_map, .. } => class_map,
        }
    }
}

/// Append `css` to the host's head, tagged with `hash` under the configured
/// marker attribute.
pub fn inject<H: StyleHost + ?Sized>(
    host: &mut H,
    css: &str,
    hash: &ContentHash,
    config: &ScopeConfig,
) -> Result<StyleId, InjectError> {
    host.append_style(css, &[(config.marker_attribute.as_str(), hash.as_str())])
}

/// Scope `css`, inject it once per content hash, and report what happened.
///
/// A hit in `registry` skips rewriting and injection and returns the map
/// recorded the first time. A host without a document still yields the map.
///
/// A host that calls back into the same registry from
/// [`StyleHost::append_style`] gets [`ModuleError::Internal`] for the nested
/// call.
pub fn try_css_module<H: StyleHost + ?Sized>(
    host: &mut H,
    registry: &StyleRegistry,
    css: &str,
    config: &ScopeConfig,
) -> Result<ModuleOutcome, ModuleError> {
    if registry.is_producing_on_current_thread() {
        return Err(ModuleError::Internal(
            "css module requested while this registry is injecting".to_string(),
        ));
    }
    let hash = content_hash(css, config);
    let mut style = None;

    let lookup = registry.get_or_try_insert_with(&hash, || -> Result<_, ModuleError> {
        let class_map = class_map_for(css, &hash, config)?;
        let scoped = rewrite(css, &class_map)?;
        match inject(host, &scoped, &hash, config) {
            Ok(id) => {
                style = Some(id);
                Ok((class_map, true))
            }
            Err(InjectError::EnvironmentUnavailable) => {
                log::warn!(
                    target: "css.module",
                    "no document to inject into, returning class map for {hash} without injecting"
                );
                Ok((class_map, false))
            }
            Err(err) => Err(ModuleError::from(err)),
        }
    })?;

    Ok(match (lookup, style) {
        (Lookup::Cached(class_map), _) => {
            log::debug!(target: "css.module", "style {hash} already injected, skipping");
            ModuleOutcome::Reused { hash, class_map }
        }
        (Lookup::Fresh { map, .. }, Some(style)) => {
            log::debug!(
                target: "css.module",
                "injected style {hash} with {} class names",
                map.len()
            );
            ModuleOutcome::Injected {
                hash,
                class_map: map,
                style,
            }
        }
        (Lookup::Fresh { map, .. }, None) => ModuleOutcome::Detached {
            hash,
            class_map: map,
        },
    })
}

/// Scoped class names for `css`, or `None` on any failure.
///
/// Never panics past this call: errors (and panics from the host) are logged
/// and turned into `None`.
pub fn css_module<H: StyleHost + ?Sized>(
    host: &mut H,
    registry: &StyleRegistry,
    css: &str,
    config: &ScopeConfig,
) -> Option<ClassNameMap> {
    let result = catch_unwind(AssertUnwindSafe(|| {
        try_css_module(host, registry, css, config)
    }))
    .unwrap_or_else(|payload| Err(ModuleError::Internal(panic_message(payload.as_ref()))));

    match result {
        Ok(outcome) => Some(outcome.into_class_map()),
        Err(err) => {
            log::error!(target: "css.module", "css module failed: {err}");
            None
        }
    }
}

/// [`css_module`] over a template: `parts` interleaved with `values`.
pub fn css_module_template<H: StyleHost + ?Sized, S: AsRef<str>>(
    host: &mut H,
    registry: &StyleRegistry,
    parts: &[&str],
    values: &[S],
    config: &ScopeConfig,
) -> Option<ClassNameMap> {
    css_module(host, registry, &interpolate(parts, values), config)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
