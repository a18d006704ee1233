//! Minimal UI tree: `{ type, props, children }`.
//!
//! Independent of any rendering library. Transforms rebuild the tree instead
//! of mutating it, so a caller's tree can be rendered again unchanged.

pub type Props = Vec<(String, String)>;

pub const CLASS_NAME: &str = "className";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VNode {
    /// Host element such as `div`.
    Element {
        tag: String,
        props: Props,
        children: Vec<VNode>,
    },
    /// User component; opaque to class-name transforms.
    Component {
        name: String,
        props: Props,
        children: Vec<VNode>,
    },
    Text(String),
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            props: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn component(name: impl Into<String>) -> Self {
        VNode::Component {
            name: name.into(),
            props: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        VNode::Text(text.into())
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_prop(key, value);
        self
    }

    pub fn with_class(self, class_name: impl Into<String>) -> Self {
        self.with_prop(CLASS_NAME, class_name)
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element { children, .. } | VNode::Component { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element { children, .. } | VNode::Component { children, .. } = &mut self {
            children.extend(new);
        }
        self
    }

    pub fn props(&self) -> &[(String, String)] {
        match self {
            VNode::Element { props, .. } | VNode::Component { props, .. } => props,
            VNode::Text(_) => &[],
        }
    }

    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_prop(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if let VNode::Element { props, .. } | VNode::Component { props, .. } = self {
            set_prop(props, key.into(), value.into());
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        self.prop(CLASS_NAME)
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } | VNode::Component { children, .. } => children,
            VNode::Text(_) => &[],
        }
    }

    pub fn is_element(&self, name: &str) -> bool {
        matches!(self, VNode::Element { tag, .. } if tag == name)
    }

    /// Concatenated text of the direct text children.
    pub fn text_content(&self) -> String {
        self.children()
            .iter()
            .filter_map(|c| match c {
                VNode::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Replace `key` in place, or append it.
pub fn set_prop(props: &mut Props, key: String, value: String) {
    match props.iter_mut().find(|(k, _)| *k == key) {
        Some((_, v)) => *v = value,
        None => props.push((key, value)),
    }
}

/// Rebuild `node` without mutating it.
///
/// `f` sees every element (tag, props, children) before its children and
/// returns the element's new props, or `None` to drop the element and its
/// subtree. Text nodes are copied. Components are copied as is and their
/// children are not visited. Returns `None` when the root itself is dropped.
pub fn map_elements<F>(node: &VNode, f: &mut F) -> Option<VNode>
where
    F: FnMut(&str, &[(String, String)], &[VNode]) -> Option<Props>,
{
    match node {
        VNode::Element {
            tag,
            props,
            children,
        } => {
            let props = f(tag, props, children)?;
            let children = children
                .iter()
                .filter_map(|c| map_elements(c, f))
                .collect();
            Some(VNode::Element {
                tag: tag.clone(),
                props,
                children,
            })
        }
        VNode::Component { .. } | VNode::Text(_) => Some(node.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VNode {
        VNode::element("div")
            .with_class("container")
            .with_child(VNode::element("span").with_class("text").with_child(VNode::text("hi")))
            .with_child(VNode::component("Avatar").with_child(VNode::element("img").with_class("pic")))
    }

    #[test]
    fn builder_sets_and_replaces_props() {
        let node = VNode::element("a").with_prop("href", "/x").with_prop("href", "/y");
        assert_eq!(node.props().len(), 1);
        assert_eq!(node.prop("href"), Some("/y"));
        assert_eq!(node.class_name(), None);
    }

    #[test]
    fn map_visits_elements_but_not_components() {
        let tree = sample();
        let mut seen = Vec::new();
        let mapped = map_elements(&tree, &mut |tag, props, _| {
            seen.push(tag.to_string());
            let mut props = props.to_vec();
            set_prop(&mut props, "data-seen".to_string(), String::new());
            Some(props)
        })
        .unwrap();

        assert_eq!(seen, vec!["div", "span"]);
        assert_eq!(mapped.prop("data-seen"), Some(""));
        // The component subtree is copied verbatim.
        assert_eq!(mapped.children()[1], tree.children()[1]);
        // The input is untouched.
        assert_eq!(tree, sample());
    }

    #[test]
    fn map_can_drop_elements() {
        let tree = VNode::element("div")
            .with_child(VNode::element("style").with_child(VNode::text(".a{}")))
            .with_child(VNode::element("p"));
        let mapped = map_elements(&tree, &mut |tag, props, _| {
            (tag != "style").then(|| props.to_vec())
        })
        .unwrap();
        assert_eq!(mapped.children().len(), 1);
        assert!(mapped.children()[0].is_element("p"));
        assert!(map_elements(&tree, &mut |_, _, _| None).is_none());
    }

    #[test]
    fn text_content_joins_direct_text() {
        let style = VNode::element("style")
            .with_child(VNode::text(".a{}"))
            .with_child(VNode::text(".b{}"));
        assert_eq!(style.text_content(), ".a{}.b{}");
    }
}
