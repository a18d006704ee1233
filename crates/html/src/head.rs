use crate::traverse::{assign_from, next_free_id};
use crate::{Id, Node};

pub fn find_head(dom: &Node) -> Option<&Node> {
    match dom {
        Node::Document { children, .. } => children
            .iter()
            .filter(|c| c.is_element("html"))
            .flat_map(|html| html.children())
            .find(|hc| hc.is_element("head")),
        _ => None,
    }
}

pub fn find_head_mut(dom: &mut Node) -> Option<&mut Node> {
    match dom {
        Node::Document { children, .. } => children
            .iter_mut()
            .filter(|c| c.is_element("html"))
            .flat_map(|html| html.children_mut().into_iter().flatten())
            .find(|hc| hc.is_element("head")),
        _ => None,
    }
}

/// Append `node` as the last child of `<head>`, assigning fresh ids to it and
/// its subtree. Returns the id of `node`, or `None` when the document has no
/// head.
pub fn append_to_head(dom: &mut Node, mut node: Node) -> Option<Id> {
    let mut next = next_free_id(dom).0;
    let head = find_head_mut(dom)?;
    assign_from(&mut node, &mut next);
    let id = node.id();
    head.children_mut()?.push(node);
    Some(id)
}

/// `<style>` elements directly under `<head>`, in document order.
pub fn head_styles(dom: &Node) -> Vec<&Node> {
    find_head(dom)
        .map(|head| head.children().iter().filter(|c| c.is_element("style")).collect())
        .unwrap_or_default()
}
