use core_types::StyleId;
use css::{styled_css, styled_key};
use html::vnode::{CLASS_NAME, set_prop};
use html::{VNode, map_elements};

use crate::error::{InjectError, ModuleError};
use crate::host::StyleHost;

/// `id` of the style element shared by all styled templates.
pub const SHARED_STYLE_ID: &str = "style_preact";

/// Styled-template runtime: every template is appended, as its own text
/// node, to one shared style element.
#[derive(Debug)]
pub struct Styled {
    element_id: String,
    shared: Option<StyleId>,
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

impl Styled {
    pub fn new() -> Self {
        Self::with_element_id(SHARED_STYLE_ID)
    }

    pub fn with_element_id(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            shared: None,
        }
    }

    /// Bind `template` to a fresh key and append it.
    pub fn styled<H: StyleHost + ?Sized>(
        &mut self,
        host: &mut H,
        template: &str,
    ) -> Result<StyledComponent, ModuleError> {
        let key = styled_key(template);
        let css = styled_css(template, &key)?;
        self.append(host, &css)?;
        Ok(StyledComponent {
            class_name: key.clone(),
            key,
        })
    }

    /// Like [`Styled::styled`], but the wrapper also carries `base`'s classes.
    pub fn extend<H: StyleHost + ?Sized>(
        &mut self,
        host: &mut H,
        base: &StyledComponent,
        template: &str,
    ) -> Result<StyledComponent, ModuleError> {
        let component = self.styled(host, template)?;
        Ok(StyledComponent {
            class_name: format!("{} {}", component.key, base.class_name),
            key: component.key,
        })
    }

    /// Append `css` unchanged.
    pub fn create_global<H: StyleHost + ?Sized>(
        &mut self,
        host: &mut H,
        css: &str,
    ) -> Result<(), ModuleError> {
        self.append(host, css)
    }

    fn append<H: StyleHost + ?Sized>(&mut self, host: &mut H, css: &str) -> Result<(), ModuleError> {
        match self.append_to_shared(host, css) {
            Ok(()) => Ok(()),
            Err(InjectError::EnvironmentUnavailable) => {
                log::warn!(target: "css.styled", "no document for styled template, skipping injection");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn append_to_shared<H: StyleHost + ?Sized>(
        &mut self,
        host: &mut H,
        css: &str,
    ) -> Result<(), InjectError> {
        if let Some(id) = self.shared.or_else(|| host.find_style(&self.element_id)) {
            match host.append_style_text(id, css) {
                Ok(()) => {
                    self.shared = Some(id);
                    return Ok(());
                }
                // Removed behind our back; create it again below.
                Err(InjectError::MissingElement(_)) => self.shared = None,
                Err(err) => return Err(err),
            }
        }
        let id = host.append_style(css, &[("id", self.element_id.as_str())])?;
        log::debug!(target: "css.styled", "created shared style element {}", id.0);
        self.shared = Some(id);
        Ok(())
    }
}

/// Handle returned by [`Styled::styled`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledComponent {
    key: String,
    class_name: String,
}

impl StyledComponent {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// `<div className={class_name}>` around `children`; every descendant
    /// element gets an empty `key` attribute so the template's selectors
    /// match it.
    pub fn render(&self, children: Vec<VNode>) -> VNode {
        let children = children
            .iter()
            .filter_map(|child| {
                map_elements(child, &mut |_, props, _| {
                    let mut props = props.to_vec();
                    set_prop(&mut props, self.key.clone(), String::new());
                    Some(props)
                })
            })
            .collect::<Vec<_>>();
        VNode::element("div")
            .with_prop(CLASS_NAME, self.class_name.clone())
            .with_children(children)
    }
}
