use core_types::ClassNameMap;
use html::vnode::{CLASS_NAME, set_prop};
use html::{VNode, map_elements};

/// How `className` tokens are looked up in a [`ClassNameMap`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClassLookup {
    /// Use the token as written.
    #[default]
    Exact,
    /// Convert `user-avatar` to `userAvatar` first.
    CamelCase,
}

/// `user-avatar` -> `userAvatar`. A `-` not followed by a word character is kept.
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '-'
            && let Some(&next) = chars.peek()
            && (next.is_alphanumeric() || next == '_')
        {
            out.extend(next.to_uppercase());
            chars.next();
            continue;
        }
        out.push(ch);
    }
    out
}

/// Map each whitespace-separated token of `class_name`; unknown tokens are kept.
pub fn transform_class_name(class_name: &str, map: &ClassNameMap, lookup: ClassLookup) -> String {
    class_name
        .split_whitespace()
        .map(|token| {
            let scoped = match lookup {
                ClassLookup::Exact => map.get(token),
                ClassLookup::CamelCase => map.get(&kebab_to_camel(token)),
            };
            scoped.unwrap_or(token)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Copy of `node` with every element's `className` mapped through `map`.
///
/// Only host elements are rewritten; components and their children are left
/// alone. Elements without a `className` are copied unchanged.
pub fn apply_class_map(node: &VNode, map: &ClassNameMap, lookup: ClassLookup) -> VNode {
    map_elements(node, &mut |_, props, _| {
        let mut props = props.to_vec();
        let current = props
            .iter()
            .find(|(k, _)| k == CLASS_NAME)
            .map(|(_, v)| transform_class_name(v, map, lookup));
        if let Some(class_name) = current {
            set_prop(&mut props, CLASS_NAME.to_string(), class_name);
        }
        Some(props)
    })
    .unwrap_or_else(|| node.clone())
}
