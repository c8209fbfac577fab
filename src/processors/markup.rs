//! Inline markup for nested spans
//!
//! `[...]` is a translatable span, `{...}` an untranslatable one and `\`
//! escapes the next character. `Hello [big {Rust}] world` becomes
//! `container["Hello ", container["big ", frozen["Rust"]], " world"]`.

use crate::core::errors::{Result, TranslationError};
use crate::core::tag::{Container, Node};

const ESCAPE: char = '\\';

struct Frame {
    close: char,
    opened_at: usize,
    translatable: bool,
    children: Vec<Node>,
    text: String,
}

impl Frame {
    fn new(close: char, opened_at: usize, translatable: bool) -> Self {
        Self {
            close,
            opened_at,
            translatable,
            children: Vec::new(),
            text: String::new(),
        }
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.children.push(Node::Leaf(std::mem::take(&mut self.text)));
        }
    }

    fn finish(mut self) -> Node {
        self.flush();
        Node::Container(Container::new(self.children, self.translatable))
    }
}

/// Parse one line of markup into a translatable root container
pub fn parse_markup(input: &str) -> Result<Node> {
    let mut stack = vec![Frame::new('\0', 0, true)];
    let mut escaped = false;

    for (position, ch) in input.char_indices() {
        let Some(frame) = stack.last_mut() else {
            return Err(TranslationError::InternalError("markup stack underflow".to_string()));
        };

        if escaped {
            frame.text.push(ch);
            escaped = false;
            continue;
        }

        match ch {
            ESCAPE => escaped = true,
            '[' | '{' => {
                frame.flush();
                let close = if ch == '[' { ']' } else { '}' };
                stack.push(Frame::new(close, position, ch == '['));
            }
            ']' | '}' => {
                // The root frame closes on '\0', so a stray bracket lands here too.
                if frame.close != ch {
                    return Err(TranslationError::InvalidMarkup {
                        position,
                        message: format!("unexpected '{}'", ch),
                    });
                }
                if let Some(done) = stack.pop() {
                    let node = done.finish();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
            }
            _ => frame.text.push(ch),
        }
    }

    if escaped {
        return Err(TranslationError::InvalidMarkup {
            position: input.len(),
            message: "dangling escape".to_string(),
        });
    }

    if stack.len() > 1 {
        let open = &stack[stack.len() - 1];
        return Err(TranslationError::InvalidMarkup {
            position: open.opened_at,
            message: format!("unclosed span, expected '{}'", open.close),
        });
    }

    match stack.pop() {
        Some(root) => Ok(root.finish()),
        None => Err(TranslationError::InternalError("markup stack underflow".to_string())),
    }
}

/// Render a tree back to markup; the root container itself is not bracketed
pub fn render_markup(node: &Node) -> String {
    let mut out = String::new();
    match node {
        Node::Leaf(text) => push_escaped(&mut out, text),
        Node::Container(container) => {
            for child in &container.children {
                render_into(&mut out, child);
            }
        }
    }
    out
}

fn render_into(out: &mut String, node: &Node) {
    match node {
        Node::Leaf(text) => push_escaped(out, text),
        Node::Container(container) => {
            let (open, close) = if container.translatable { ('[', ']') } else { ('{', '}') };
            out.push(open);
            for child in &container.children {
                render_into(out, child);
            }
            out.push(close);
        }
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        if matches!(ch, '[' | ']' | '{' | '}' | ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_text() {
        assert_eq!(
            parse_markup("plain text").unwrap(),
            Node::container(vec![Node::leaf("plain text")])
        );
        assert_eq!(parse_markup("").unwrap(), Node::container(vec![]));
    }

    #[test]
    fn test_parse_nested_spans() {
        let node = parse_markup("Hello [big {Rust}] world").unwrap();
        assert_eq!(
            node,
            Node::container(vec![
                Node::leaf("Hello "),
                Node::container(vec![Node::leaf("big "), Node::frozen(vec![Node::leaf("Rust")])]),
                Node::leaf(" world"),
            ])
        );
        assert_eq!(node.text(), "Hello big Rust world");
    }

    #[test]
    fn test_parse_escapes() {
        let node = parse_markup(r"a \[b\] \\ c").unwrap();
        assert_eq!(node, Node::container(vec![Node::leaf(r"a [b] \ c")]));
    }

    #[test]
    fn test_parse_errors() {
        match parse_markup("a ] b") {
            Err(TranslationError::InvalidMarkup { position, .. }) => assert_eq!(position, 2),
            other => panic!("Expected InvalidMarkup, got {:?}", other),
        }
        match parse_markup("a [b} c") {
            Err(TranslationError::InvalidMarkup { position, .. }) => assert_eq!(position, 4),
            other => panic!("Expected InvalidMarkup, got {:?}", other),
        }
        match parse_markup("x [open") {
            Err(TranslationError::InvalidMarkup { position, message }) => {
                assert_eq!(position, 2);
                assert!(message.contains("unclosed"));
            }
            other => panic!("Expected InvalidMarkup, got {:?}", other),
        }
        assert!(parse_markup("trailing \\").is_err());
    }

    #[test]
    fn test_render_restores_markup() {
        let source = r"Say [hi {there}] \[x\]";
        let node = parse_markup(source).unwrap();
        assert_eq!(render_markup(&node), source);
    }

    #[test]
    fn test_render_leaf_root() {
        assert_eq!(render_markup(&Node::leaf("a{b}")), r"a\{b\}");
    }
}
