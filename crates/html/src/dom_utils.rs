use crate::Node;

/// Collect concatenated text from <style> elements, one element per line.
pub fn collect_style_texts(node: &Node, out: &mut String) {
    match node {
        Node::Element { name, children, .. } if name.eq_ignore_ascii_case("style") => {
            for c in children {
                if let Node::Text { text, .. } = c {
                    out.push_str(text);
                }
            }
            out.push('\n');
        }
        Node::Element { children, .. } | Node::Document { children, .. } => {
            for c in children {
                collect_style_texts(c, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::head::append_to_head;

    #[test]
    fn collects_split_text_nodes_per_element() {
        let mut doc = Node::empty_document();
        append_to_head(
            &mut doc,
            Node::element("style", Vec::new(), vec![Node::text(".a{}"), Node::text(".b{}")]),
        );
        append_to_head(&mut doc, Node::element("style", Vec::new(), vec![Node::text(".c{}")]));
        let mut out = String::new();
        collect_style_texts(&doc, &mut out);
        assert_eq!(out, ".a{}.b{}\n.c{}\n");
    }
}
