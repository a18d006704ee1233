use core_types::StyleId;
use html::dom_utils::collect_style_texts;
use html::head::append_to_head;
use html::traverse::{
    find_element_by_attr, find_node_by_id_mut, next_free_id, remove_node_by_id,
};
use html::{Id, Node};

use crate::error::InjectError;

/// Where injected style text ends up.
///
/// Implementations append to a document head; they never reorder or rewrite
/// existing styles.
pub trait StyleHost {
    /// Append a new `<style type="text/css">` carrying `attributes` and `css`.
    ///
    /// Runs while the registry that requested it is locked. A css module
    /// requested from here against that same registry fails with
    /// [`ModuleError::Internal`](crate::ModuleError::Internal).
    fn append_style(
        &mut self,
        css: &str,
        attributes: &[(&str, &str)],
    ) -> Result<StyleId, InjectError>;

    /// Append `css` as a new text node of the existing style element `id`.
    fn append_style_text(&mut self, id: StyleId, css: &str) -> Result<(), InjectError>;

    /// Remove a style element. Returns `false` if it was not there.
    fn remove_style(&mut self, id: StyleId) -> bool;

    /// Style element whose `id` attribute is `element_id`.
    fn find_style(&self, element_id: &str) -> Option<StyleId>;
}

/// Injects into an in-memory document.
#[derive(Clone, Debug)]
pub struct DocumentHost {
    document: Node,
}

impl Default for DocumentHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentHost {
    pub fn new() -> Self {
        Self::from_document(Node::empty_document())
    }

    pub fn from_document(document: Node) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Node {
        &self.document
    }

    pub fn into_document(self) -> Node {
        self.document
    }

    /// Text of every style element in document order, one per line.
    pub fn stylesheet_text(&self) -> String {
        let mut out = String::new();
        collect_style_texts(&self.document, &mut out);
        out
    }

    fn style_node_mut(&mut self, id: StyleId) -> Option<&mut Node> {
        find_node_by_id_mut(&mut self.document, Id(id.0)).filter(|n| n.is_element("style"))
    }
}

impl StyleHost for DocumentHost {
    fn append_style(
        &mut self,
        css: &str,
        attributes: &[(&str, &str)],
    ) -> Result<StyleId, InjectError> {
        let mut attrs = vec![("type".to_string(), Some("text/css".to_string()))];
        attrs.extend(
            attributes
                .iter()
                .map(|(k, v)| (k.to_string(), Some(v.to_string()))),
        );
        let children = if css.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(css)]
        };
        let id = append_to_head(&mut self.document, Node::element("style", attrs, children))
            .ok_or(InjectError::EnvironmentUnavailable)?;
        log::debug!(target: "css.inject", "appended style element {} ({} bytes)", id.0, css.len());
        Ok(StyleId(id.0))
    }

    fn append_style_text(&mut self, id: StyleId, css: &str) -> Result<(), InjectError> {
        let next = next_free_id(&self.document);
        let style = self
            .style_node_mut(id)
            .ok_or(InjectError::MissingElement(id))?;
        let children = style
            .children_mut()
            .ok_or(InjectError::MissingElement(id))?;
        children.push(Node::Text {
            id: next,
            text: css.to_string(),
        });
        Ok(())
    }

    fn remove_style(&mut self, id: StyleId) -> bool {
        if self.style_node_mut(id).is_none() {
            return false;
        }
        let removed = remove_node_by_id(&mut self.document, Id(id.0)).is_some();
        if removed {
            log::debug!(target: "css.inject", "removed style element {}", id.0);
        }
        removed
    }

    fn find_style(&self, element_id: &str) -> Option<StyleId> {
        find_element_by_attr(&self.document, "style", "id", element_id).map(|n| StyleId(n.id().0))
    }
}

/// No document at all, e.g. server-side rendering. Every append reports
/// [`InjectError::EnvironmentUnavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedHost;

impl StyleHost for DetachedHost {
    fn append_style(&mut self, _css: &str, _attributes: &[(&str, &str)]) -> Result<StyleId, InjectError> {
        Err(InjectError::EnvironmentUnavailable)
    }

    fn append_style_text(&mut self, _id: StyleId, _css: &str) -> Result<(), InjectError> {
        Err(InjectError::EnvironmentUnavailable)
    }

    fn remove_style(&mut self, _id: StyleId) -> bool {
        false
    }

    fn find_style(&self, _element_id: &str) -> Option<StyleId> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::head::head_styles;

    #[test]
    fn append_tags_style_elements() {
        let mut host = DocumentHost::new();
        let id = host
            .append_style(".a{}", &[("data-css-module", "0000abcd")])
            .unwrap();
        let styles = head_styles(host.document());
        assert_eq!(styles.len(), 1);
        assert_eq!(StyleId(styles[0].id().0), id);
        assert_eq!(styles[0].attr("type"), Some("text/css"));
        assert_eq!(styles[0].attr("data-css-module"), Some("0000abcd"));
        assert_eq!(host.stylesheet_text(), ".a{}\n");
    }

    #[test]
    fn shared_element_accumulates_text() {
        let mut host = DocumentHost::new();
        let id = host.append_style("", &[("id", "shared")]).unwrap();
        assert_eq!(host.find_style("shared"), Some(id));
        host.append_style_text(id, ".a{}").unwrap();
        host.append_style_text(id, ".b{}").unwrap();
        assert_eq!(host.stylesheet_text(), ".a{}.b{}\n");
    }

    #[test]
    fn remove_only_touches_style_elements() {
        let mut host = DocumentHost::new();
        let id = host.append_style(".a{}", &[]).unwrap();
        // The document root is not a style element.
        assert!(!host.remove_style(StyleId(1)));
        assert!(host.remove_style(id));
        assert!(!host.remove_style(id));
        assert_eq!(
            host.append_style_text(id, ".b{}"),
            Err(InjectError::MissingElement(id))
        );
        assert_eq!(host.stylesheet_text(), "");
    }

    #[test]
    fn headless_documents_are_unavailable() {
        let mut host = DocumentHost::from_document(Node::Document {
            id: Id(1),
            doctype: None,
            children: Vec::new(),
        });
        assert_eq!(
            host.append_style(".a{}", &[]),
            Err(InjectError::EnvironmentUnavailable)
        );
        assert_eq!(
            DetachedHost.append_style(".a{}", &[]),
            Err(InjectError::EnvironmentUnavailable)
        );
    }
}
