pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Id(pub NodeId);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Document {
        id: Id,
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    /// `<!DOCTYPE html><html><head></head><body></body></html>` with ids assigned.
    pub fn empty_document() -> Self {
        let mut doc = Node::Document {
            id: Id(0),
            doctype: Some("html".to_string()),
            children: vec![Node::element(
                "html",
                Vec::new(),
                vec![
                    Node::element("head", Vec::new(), Vec::new()),
                    Node::element("body", Vec::new(), Vec::new()),
                ],
            )],
        };
        crate::traverse::assign_node_ids(&mut doc);
        doc
    }

    /// Element with an unset id; see [`crate::traverse::assign_node_ids`].
    pub fn element(
        name: impl Into<String>,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    ) -> Self {
        Node::Element {
            id: Id(0),
            name: name.into(),
            attributes,
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            id: Id(0),
            text: text.into(),
        }
    }

    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Document { id, .. } => *id = new_id,
            Node::Element { id, .. } => *id = new_id,
            Node::Text { id, .. } => *id = new_id,
            Node::Comment { id, .. } => *id = new_id,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } => Some(children),
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn is_element(&self, tag: &str) -> bool {
        matches!(self, Node::Element { name, .. } if name.eq_ignore_ascii_case(tag))
    }

    /// Attribute value; valueless attributes read as `""`.
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_deref().unwrap_or("")),
            _ => None,
        }
    }

    /// Concatenated text of the direct text children.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            if let Node::Text { text, .. } = child {
                out.push_str(text);
            }
        }
        out
    }
}
