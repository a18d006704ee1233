use core_types::StyleId;
use css::{scope_selectors, unique_scope_class};
use html::vnode::{CLASS_NAME, set_prop};
use html::{VNode, map_elements};

use crate::error::{InjectError, ModuleError};
use crate::host::StyleHost;

/// Attribute naming the scope class on injected scoped styles.
pub const SCOPE_ATTRIBUTE: &str = "data-scoped";

/// Styles declared inline in a component tree, limited to that tree.
///
/// Created by [`ScopedStyles::mount`]; the injected element lives until
/// [`ScopedStyles::unmount`].
#[derive(Debug, PartialEq, Eq)]
pub struct ScopedStyles {
    unique_class: Option<String>,
    style: Option<StyleId>,
}

impl ScopedStyles {
    /// Take the `<style>` elements out of `tree`, limit their rules to a
    /// scope class, tag every element with that class, and inject the
    /// result. Returns the rewritten tree.
    ///
    /// A tree without style text is returned without its (empty) style
    /// elements and nothing is injected.
    pub fn mount<H: StyleHost + ?Sized>(
        host: &mut H,
        tree: &VNode,
    ) -> Result<(VNode, ScopedStyles), ModuleError> {
        let mut content = String::new();
        collect_style_text(tree, &mut content);

        let unique_class = (!content.trim().is_empty()).then(|| unique_scope_class(&content));
        let scoped_css = match &unique_class {
            Some(class) => Some(scope_selectors(&content, class)?),
            None => None,
        };

        let rewritten = map_elements(tree, &mut |tag, props, _| {
            if tag == "style" {
                return None;
            }
            let mut props = props.to_vec();
            if let Some(class) = &unique_class {
                let class_name = match props.iter().find(|(k, _)| k == CLASS_NAME) {
                    Some((_, current)) if !current.is_empty() => format!("{current} {class}"),
                    _ => class.clone(),
                };
                set_prop(&mut props, CLASS_NAME.to_string(), class_name);
            }
            Some(props)
        })
        .unwrap_or_else(|| VNode::text(""));

        let style = match (&unique_class, scoped_css) {
            (Some(class), Some(css)) => {
                match host.append_style(&css, &[(SCOPE_ATTRIBUTE, class.as_str())]) {
                    Ok(id) => Some(id),
                    Err(InjectError::EnvironmentUnavailable) => {
                        log::warn!(target: "css.inject", "no document for scoped styles {class}");
                        None
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            _ => None,
        };

        Ok((rewritten, ScopedStyles { unique_class, style }))
    }

    pub fn unique_class(&self) -> Option<&str> {
        self.unique_class.as_deref()
    }

    pub fn style(&self) -> Option<StyleId> {
        self.style
    }

    /// Remove the injected style element, if any.
    pub fn unmount<H: StyleHost + ?Sized>(self, host: &mut H) -> bool {
        match self.style {
            Some(id) => host.remove_style(id),
            None => false,
        }
    }
}

fn collect_style_text(node: &VNode, out: &mut String) {
    match node {
        VNode::Element { tag, .. } if tag == "style" => {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&node.text_content());
        }
        VNode::Element { children, .. } => {
            for c in children {
                collect_style_text(c, out);
            }
        }
        VNode::Component { .. } | VNode::Text(_) => {}
    }
}
