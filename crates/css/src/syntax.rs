//! Best-effort lexer for scoped style text.
//!
//! This is not a CSS parser. It recognises the subset that scoping needs:
//!
//! - top-level rules `selector-list { declarations }`, one level deep;
//! - at-rule statements (`@import ...;`) and flat at-rule blocks (`@font-face { ... }`);
//! - comments, quoted strings and attribute selectors, which are kept verbatim.
//!
//! Everything else (nested blocks, escaped selector characters, unbalanced
//! braces) is reported as an error so callers never rewrite text they did
//! not understand.

use std::ops::Range;

use memchr::{memchr2, memmem};

use crate::error::CssError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Selector text of a style rule. The only kind scanned for class tokens.
    Prelude,
    /// Prelude of an at-rule, including the trailing `;` of a statement.
    AtPrelude,
    /// Attribute selector or quoted string inside a prelude.
    Opaque,
    /// `{ ... }`, braces included.
    Block,
    /// `/* ... */`
    Comment,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub span: Range<usize>,
}

impl Segment {
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.clone()]
    }
}

/// Split `input` into contiguous segments covering every byte exactly once.
pub fn tokenize_stylesheet(input: &str) -> Result<Vec<Segment>, CssError> {
    let mut lexer = Lexer {
        input,
        bytes: input.as_bytes(),
        pos: 0,
        segments: Vec::new(),
        run_start: None,
        at_rule: None,
        rule_start: 0,
    };
    lexer.run()?;
    Ok(lexer.segments)
}

struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    segments: Vec<Segment>,
    // Start of the pending prelude run.
    run_start: Option<usize>,
    // `None` until the first significant byte of the current rule.
    at_rule: Option<bool>,
    rule_start: usize,
}

impl Lexer<'_> {
    fn run(&mut self) -> Result<(), CssError> {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            match b {
                b'/' if self.bytes.get(self.pos + 1) == Some(&b'*') => {
                    self.flush_run(self.pos);
                    let end = comment_end(self.bytes, self.pos)?;
                    self.push(SegmentKind::Comment, self.pos, end);
                    self.pos = end;
                }
                b'{' => {
                    self.flush_run(self.pos);
                    let end = block_end(self.bytes, self.pos)?;
                    self.push(SegmentKind::Block, self.pos, end);
                    self.pos = end;
                    self.at_rule = None;
                }
                b'}' => {
                    return Err(CssError::Malformed {
                        reason: "unbalanced `}`",
                        offset: self.pos,
                    });
                }
                b';' => {
                    if self.at_rule != Some(true) {
                        return Err(CssError::Malformed {
                            reason: "unexpected `;` outside a declaration block",
                            offset: self.pos,
                        });
                    }
                    if self.run_start.is_none() {
                        self.run_start = Some(self.pos);
                    }
                    self.flush_run(self.pos + 1);
                    self.pos += 1;
                    self.at_rule = None;
                }
                b'[' | b'"' | b'\'' => {
                    self.note_significant(b);
                    self.flush_run(self.pos);
                    let end = if b == b'[' {
                        bracket_end(self.bytes, self.pos)?
                    } else {
                        string_end(self.bytes, self.pos)?
                    };
                    self.push(SegmentKind::Opaque, self.pos, end);
                    self.pos = end;
                }
                b'\\' => {
                    return Err(CssError::Unsupported {
                        construct: "escaped character in selector",
                        offset: self.pos,
                    });
                }
                0x80.. if self.at_rule != Some(true) => {
                    let len = self.separator_len().ok_or(CssError::Unsupported {
                        construct: "non-ASCII character in selector",
                        offset: self.pos,
                    })?;
                    if self.run_start.is_none() {
                        self.run_start = Some(self.pos);
                    }
                    self.pos += len;
                }
                _ => {
                    if !b.is_ascii_whitespace() {
                        self.note_significant(b);
                    }
                    if self.run_start.is_none() {
                        self.run_start = Some(self.pos);
                    }
                    self.pos += 1;
                }
            }
        }

        if self.at_rule.is_some() {
            return Err(CssError::Malformed {
                reason: "rule without a declaration block",
                offset: self.rule_start,
            });
        }
        self.flush_run(self.pos);
        Ok(())
    }

    /// Byte length of the non-ASCII separator at `pos`, if one may appear here.
    fn separator_len(&self) -> Option<usize> {
        if self.at_rule.is_some() {
            return None;
        }
        let ch = self.input.get(self.pos..)?.chars().next()?;
        is_separator_char(ch, self.pos).then(|| ch.len_utf8())
    }

    fn note_significant(&mut self, b: u8) {
        if self.at_rule.is_none() {
            self.at_rule = Some(b == b'@');
            self.rule_start = self.pos;
        }
    }

    fn flush_run(&mut self, end: usize) {
        if let Some(start) = self.run_start.take()
            && start < end
        {
            let kind = if self.at_rule == Some(true) {
                SegmentKind::AtPrelude
            } else {
                SegmentKind::Prelude
            };
            self.push(kind, start, end);
        }
    }

    fn push(&mut self, kind: SegmentKind, start: usize, end: usize) {
        self.segments.push(Segment {
            kind,
            span: start..end,
        });
    }
}

/// Non-ASCII text allowed between rules: Unicode whitespace, and a byte
/// order mark at the very start.
fn is_separator_char(ch: char, offset: usize) -> bool {
    ch.is_whitespace() || (ch == BOM && offset == 0)
}

const BOM: char = '\u{FEFF}';

fn trim_selector_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

fn comment_end(bytes: &[u8], start: usize) -> Result<usize, CssError> {
    memmem::find(&bytes[start + 2..], b"*/")
        .map(|rel| start + 2 + rel + 2)
        .ok_or(CssError::Malformed {
            reason: "unterminated comment",
            offset: start,
        })
}

fn string_end(bytes: &[u8], start: usize) -> Result<usize, CssError> {
    let quote = bytes[start];
    let mut i = start + 1;
    while let Some(rel) = memchr2(quote, b'\\', &bytes[i..]) {
        let at = i + rel;
        if bytes[at] == b'\\' {
            i = at + 2;
            if i > bytes.len() {
                break;
            }
            continue;
        }
        return Ok(at + 1);
    }
    Err(CssError::Malformed {
        reason: "unterminated string",
        offset: start,
    })
}

fn bracket_end(bytes: &[u8], start: usize) -> Result<usize, CssError> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b']' => return Ok(i + 1),
            b'"' | b'\'' => i = string_end(bytes, i)?,
            b'[' | b'{' | b'}' => break,
            _ => i += 1,
        }
    }
    Err(CssError::Malformed {
        reason: "unterminated attribute selector",
        offset: start,
    })
}

fn block_end(bytes: &[u8], start: usize) -> Result<usize, CssError> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'}' => return Ok(i + 1),
            b'{' => {
                return Err(CssError::Unsupported {
                    construct: "nested block",
                    offset: i,
                });
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = comment_end(bytes, i)?,
            b'"' | b'\'' => i = string_end(bytes, i)?,
            _ => i += 1,
        }
    }
    Err(CssError::Malformed {
        reason: "unterminated declaration block",
        offset: start,
    })
}

/// A style rule: selector list plus its declaration block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Trimmed selectors, split on top-level commas.
    pub selectors: Vec<String>,
    /// The block, braces included, verbatim.
    pub block: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Style(StyleRule),
    /// At-rule prelude (trimmed) and its flat block, if any.
    At {
        prelude: String,
        block: Option<String>,
    },
    Comment(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub items: Vec<Item>,
}

impl Stylesheet {
    pub fn style_rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.items.iter().filter_map(|item| match item {
            Item::Style(rule) => Some(rule),
            _ => None,
        })
    }

    /// Serialize one item per line, passing every selector of every style
    /// rule through `map_selector`. Comments and at-rules are kept as is.
    pub fn render_with(&self, mut map_selector: impl FnMut(&str) -> String) -> String {
        let mut out = String::new();
        for item in &self.items {
            if !out.is_empty() {
                out.push('\n');
            }
            match item {
                Item::Style(rule) => {
                    let selectors: Vec<String> =
                        rule.selectors.iter().map(|s| map_selector(s)).collect();
                    out.push_str(&selectors.join(", "));
                    out.push(' ');
                    out.push_str(&rule.block);
                }
                Item::At { prelude, block } => {
                    out.push_str(prelude);
                    if let Some(block) = block {
                        out.push(' ');
                        out.push_str(block);
                    }
                }
                Item::Comment(text) => out.push_str(text),
            }
        }
        out
    }
}

/// Bytes of `selector` with attribute selectors and quoted strings blanked
/// out as `_`. Offsets line up with `selector`.
pub fn mask_opaque(selector: &str) -> Vec<u8> {
    let bytes = selector.as_bytes();
    let mut masked = bytes.to_vec();
    let mut i = 0;
    while i < bytes.len() {
        let end = match bytes[i] {
            b'[' => bracket_end(bytes, i).unwrap_or(bytes.len()),
            b'"' | b'\'' => string_end(bytes, i).unwrap_or(bytes.len()),
            _ => {
                i += 1;
                continue;
            }
        };
        masked[i..end].fill(b'_');
        i = end;
    }
    masked
}

/// Byte index where a trailing pseudo-element (`::before`) of the last
/// compound selector starts, if there is one. `::` inside attribute values
/// does not count.
pub fn pseudo_element_start(selector: &str) -> Option<usize> {
    let masked = mask_opaque(selector);
    let idx = memmem::rfind(&masked, b"::")?;
    if masked[idx..]
        .iter()
        .any(|b| b.is_ascii_whitespace() || matches!(b, b'>' | b'+' | b'~' | b','))
    {
        return None;
    }
    Some(idx)
}

// input: "/* card */ .a, .b:hover { color: red; } @import 'x.css';"
// output: [Comment, Style { selectors: [".a", ".b:hover"], block: "{ color: red; }" }, At { .. }]
pub fn parse_stylesheet(input: &str) -> Result<Stylesheet, CssError> {
    let segments = tokenize_stylesheet(input)?;
    let mut items = Vec::new();
    let mut prelude = String::new();
    let mut selectors = SelectorSplitter::default();
    let mut is_at = false;

    for segment in &segments {
        let text = segment.text(input);
        match segment.kind {
            SegmentKind::Comment => {
                // Comments inside a selector list are dropped from the rule.
                if trim_selector_text(&prelude).is_empty() {
                    items.push(Item::Comment(text.to_string()));
                }
            }
            SegmentKind::Prelude => {
                prelude.push_str(text);
                selectors.push_text(text);
            }
            SegmentKind::Opaque => {
                prelude.push_str(text);
                selectors.push_opaque(text);
            }
            SegmentKind::AtPrelude => {
                is_at = true;
                prelude.push_str(text);
                if text.ends_with(';') {
                    items.push(Item::At {
                        prelude: trim_selector_text(&prelude).to_string(),
                        block: None,
                    });
                    prelude.clear();
                    selectors = SelectorSplitter::default();
                    is_at = false;
                }
            }
            SegmentKind::Block => {
                if is_at {
                    items.push(Item::At {
                        prelude: trim_selector_text(&prelude).to_string(),
                        block: Some(text.to_string()),
                    });
                } else {
                    items.push(Item::Style(StyleRule {
                        selectors: std::mem::take(&mut selectors).finish(),
                        block: text.to_string(),
                    }));
                }
                prelude.clear();
                selectors = SelectorSplitter::default();
                is_at = false;
            }
        }
    }

    Ok(Stylesheet { items })
}

/// Splits a selector list on commas outside parentheses and opaque segments.
#[derive(Default)]
struct SelectorSplitter {
    current: String,
    done: Vec<String>,
    paren_depth: usize,
}

impl SelectorSplitter {
    fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '(' => self.paren_depth += 1,
                ')' => self.paren_depth = self.paren_depth.saturating_sub(1),
                ',' if self.paren_depth == 0 => {
                    self.done.push(trim_selector_text(&self.current).to_string());
                    self.current.clear();
                    continue;
                }
                _ => {}
            }
            self.current.push(ch);
        }
    }

    fn push_opaque(&mut self, text: &str) {
        self.current.push_str(text);
    }

    fn finish(mut self) -> Vec<String> {
        self.done.push(trim_selector_text(&self.current).to_string());
        self.done.retain(|s| !s.is_empty());
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(SegmentKind, &str)> {
        tokenize_stylesheet(input)
            .expect("tokenize")
            .iter()
            .map(|s| (s.kind, s.text(input)))
            .collect()
    }

    #[test]
    fn segments_cover_input() {
        let input = "/* a */ .a:hover, div[data-x=\"1.5\"] { width: 0.5em; }\n@import 'b.css';\n";
        let segments = tokenize_stylesheet(input).unwrap();
        let mut next = 0;
        for s in &segments {
            assert_eq!(s.span.start, next, "gap before {s:?}");
            next = s.span.end;
        }
        assert_eq!(next, input.len());
    }

    #[test]
    fn declarations_are_blocks() {
        assert_eq!(
            kinds(".c { opacity: 0.8; }"),
            vec![
                (SegmentKind::Prelude, ".c "),
                (SegmentKind::Block, "{ opacity: 0.8; }"),
            ]
        );
    }

    #[test]
    fn attribute_selectors_and_strings_are_opaque() {
        assert_eq!(
            kinds("a[href$=\".pdf\"].doc{}"),
            vec![
                (SegmentKind::Prelude, "a"),
                (SegmentKind::Opaque, "[href$=\".pdf\"]"),
                (SegmentKind::Prelude, ".doc"),
                (SegmentKind::Block, "{}"),
            ]
        );
    }

    #[test]
    fn at_rules_are_not_preludes() {
        assert_eq!(
            kinds("@import url(x.css);@font-face{font-family:a}"),
            vec![
                (SegmentKind::AtPrelude, "@import url(x.css);"),
                (SegmentKind::AtPrelude, "@font-face"),
                (SegmentKind::Block, "{font-family:a}"),
            ]
        );
    }

    #[test]
    fn braces_inside_strings_do_not_close_blocks() {
        assert_eq!(
            kinds(".q{content:\"}\"}"),
            vec![
                (SegmentKind::Prelude, ".q"),
                (SegmentKind::Block, "{content:\"}\"}"),
            ]
        );
    }

    #[test]
    fn nested_blocks_fail_closed() {
        let err = tokenize_stylesheet("@media (min-width: 1px) { .a { color: red; } }").unwrap_err();
        assert_eq!(
            err,
            CssError::Unsupported {
                construct: "nested block",
                offset: 29,
            }
        );
    }

    #[test]
    fn escapes_fail_closed() {
        let err = tokenize_stylesheet(".sm\\:flex { display: flex; }").unwrap_err();
        assert!(matches!(err, CssError::Unsupported { offset: 3, .. }));
    }

    #[test]
    fn leading_bom_and_unicode_spaces_separate_rules() {
        let input = "\u{FEFF}.a { color: red; }\u{00A0}.b { }\u{2003}\n";
        let segments = tokenize_stylesheet(input).unwrap();
        assert_eq!(segments.last().unwrap().span.end, input.len());
        let sheet = parse_stylesheet(input).unwrap();
        let selectors: Vec<_> = sheet.style_rules().map(|r| r.selectors.clone()).collect();
        assert_eq!(selectors, vec![vec![".a".to_string()], vec![".b".to_string()]]);
        // A BOM anywhere else is still refused.
        assert!(matches!(
            tokenize_stylesheet(".a { }\u{FEFF}.b { }"),
            Err(CssError::Unsupported { offset: 6, .. })
        ));
    }

    #[test]
    fn masking_blanks_attribute_values() {
        assert_eq!(mask_opaque(r#"a[title="x::y"]::after"#), b"a______________::after");
        assert_eq!(pseudo_element_start(r#"a[title="x::y"]"#), None);
        assert_eq!(pseudo_element_start(r#"a[title="x::y"]::after"#), Some(15));
        assert_eq!(pseudo_element_start(".a::before .b"), None);
    }

    #[test]
    fn non_ascii_selectors_fail_closed() {
        let err = tokenize_stylesheet(".größe { width: 1px; }").unwrap_err();
        assert!(matches!(err, CssError::Unsupported { offset: 3, .. }));
        // Fine inside blocks, comments and at-rule preludes.
        assert!(tokenize_stylesheet("/* größe */ .a::before { content: \"→\"; }").is_ok());
        assert!(tokenize_stylesheet("@import \"größe.css\";").is_ok());
    }

    #[test]
    fn malformed_inputs_are_reported() {
        for input in [
            ".a { color: red;",
            ".a } ",
            "/* open",
            ".a",
            ".a { } .b",
            "a[x",
            ".a; .b {}",
        ] {
            assert!(
                matches!(tokenize_stylesheet(input), Err(CssError::Malformed { .. })),
                "expected malformed: {input:?}"
            );
        }
    }

    #[test]
    fn trailing_whitespace_and_comments_are_fine() {
        assert!(tokenize_stylesheet(".a{}  /* end */ \n").is_ok());
        assert!(tokenize_stylesheet("").unwrap().is_empty());
    }

    #[test]
    fn parse_groups_rules() {
        let sheet = parse_stylesheet(
            "/* card */\n.a, .b:hover { color: red; }\n@import 'x.css';\n:is(.c, .d) > p[title=\"a,b\"] {}",
        )
        .unwrap();
        assert_eq!(
            sheet.items,
            vec![
                Item::Comment("/* card */".to_string()),
                Item::Style(StyleRule {
                    selectors: vec![".a".to_string(), ".b:hover".to_string()],
                    block: "{ color: red; }".to_string(),
                }),
                Item::At {
                    prelude: "@import 'x.css';".to_string(),
                    block: None,
                },
                Item::Style(StyleRule {
                    selectors: vec![":is(.c, .d) > p[title=\"a,b\"]".to_string()],
                    block: "{}".to_string(),
                }),
            ]
        );
        assert_eq!(sheet.style_rules().count(), 2);
    }
}
