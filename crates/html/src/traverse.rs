use crate::{Id, Node};

pub fn assign_node_ids(root: &mut Node) {
    let mut next = next_free_id(root).0;
    assign_from(root, &mut next);
}

/// Assign ids to every unset (`Id(0)`) node of `root`, starting at `*next`.
pub fn assign_from(root: &mut Node, next: &mut u32) {
    // only assign if currently unset
    if root.id() == Id(0) {
        root.set_id(Id(*next));
        *next = next.wrapping_add(1);
    }
    if let Some(children) = root.children_mut() {
        for c in children {
            assign_from(c, next);
        }
    }
}

/// One past the largest id in the tree (at least 1).
pub fn next_free_id(root: &Node) -> Id {
    fn walk(node: &Node, max: &mut u32) {
        *max = (*max).max(node.id().0);
        for c in node.children() {
            walk(c, max);
        }
    }
    let mut max = 0;
    walk(root, &mut max);
    Id(max.wrapping_add(1).max(1))
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|c| find_node_by_id(c, id))
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|c| find_node_by_id_mut(c, id))
}

/// Detach the node with `id` from its parent. The root cannot be removed.
pub fn remove_node_by_id(root: &mut Node, id: Id) -> Option<Node> {
    let children = root.children_mut()?;
    if let Some(pos) = children.iter().position(|c| c.id() == id) {
        return Some(children.remove(pos));
    }
    children
        .iter_mut()
        .find_map(|c| remove_node_by_id(c, id))
}

/// First element in document order with `name` and `key="value"`.
pub fn find_element_by_attr<'a>(
    node: &'a Node,
    name: &str,
    key: &str,
    value: &str,
) -> Option<&'a Node> {
    if node.is_element(name) && node.attr(key) == Some(value) {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|c| find_element_by_attr(c, name, key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_stable() {
        let doc = Node::empty_document();
        let head = doc.children()[0].children()[0].id();
        let body = doc.children()[0].children()[1].id();
        assert_ne!(head, body);
        assert_eq!(next_free_id(&doc), Id(5));
        assert!(find_node_by_id(&doc, head).unwrap().is_element("head"));
    }

    #[test]
    fn assign_keeps_existing_ids() {
        let mut doc = Node::empty_document();
        let before = next_free_id(&doc);
        let html_children = doc.children_mut().unwrap()[0].children_mut().unwrap();
        html_children.push(Node::element("p", Vec::new(), vec![Node::text("hi")]));
        assign_node_ids(&mut doc);
        assert_eq!(next_free_id(&doc), Id(before.0 + 2));
    }

    #[test]
    fn remove_detaches_subtree() {
        let mut doc = Node::empty_document();
        let head = doc.children()[0].children()[0].id();
        let removed = remove_node_by_id(&mut doc, head).unwrap();
        assert!(removed.is_element("head"));
        assert!(find_node_by_id(&doc, head).is_none());
        assert!(remove_node_by_id(&mut doc, head).is_none());
    }

    #[test]
    fn finds_by_attribute() {
        let mut doc = Node::empty_document();
        let html = &mut doc.children_mut().unwrap()[0];
        html.children_mut().unwrap()[1]
            .children_mut()
            .unwrap()
            .push(Node::element(
                "style",
                vec![("id".to_string(), Some("main".to_string()))],
                Vec::new(),
            ));
        assert!(find_element_by_attr(&doc, "style", "id", "main").is_some());
        assert!(find_element_by_attr(&doc, "style", "id", "other").is_none());
    }
}
