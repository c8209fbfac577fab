//! Injection planner
//!
//! Given the flat translation of a parent and the independent translations
//! of its depth-1 children, recover the parent's structure by locating each
//! child translation as a literal substring of the parent translation and
//! splicing the child subtrees back in.
//!
//! Rejection is an expected outcome, not an error: the caller falls back to
//! translating every child on its own.

use std::fmt;

use crate::core::tag::{Container, DepthMode, Node};

/// Default cap on the flattened parent length, in chars
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 200;

/// One depth-1 child being spliced into its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionCandidate {
    pub translated_text: String,
    pub source_subtree: Node,
    /// Byte offset into the translated parent, once located
    pub injection_index: Option<usize>,
}

impl InjectionCandidate {
    pub fn new(translated_text: impl Into<String>, source_subtree: Node) -> Self {
        Self {
            translated_text: translated_text.into(),
            source_subtree,
            injection_index: None,
        }
    }

    /// The subtree to splice in, carrying the translated text
    ///
    /// A depth-1 child only holds leaves, so its leaves collapse into one
    /// leaf with the translation; the container keeps its flag.
    fn into_spliced(self) -> Node {
        match self.source_subtree {
            Node::Leaf(_) => Node::Leaf(self.translated_text),
            Node::Container(container) => Node::Container(Container::new(
                vec![Node::Leaf(self.translated_text)],
                container.translatable,
            )),
        }
    }
}

/// Why injection was not attempted or was abandoned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Child at `position` is neither a leaf nor a depth-1 container
    UnsupportedChild { position: usize, depth: usize },
    /// Depth-1 child at `position` is untranslatable
    FrozenChild { position: usize },
    /// Parent text is longer than the limit
    Oversized { length: usize, limit: usize },
    /// Candidate translation not found in the parent translation
    Unlocatable { text: String },
    /// Two located spans overlap or touch
    Overlap { first: usize, second: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnsupportedChild { position, depth } => {
                write!(f, "child {} has unsupported depth {}", position, depth)
            }
            Rejection::FrozenChild { position } => write!(f, "child {} is untranslatable", position),
            Rejection::Oversized { length, limit } => {
                write!(f, "text length {} exceeds limit {}", length, limit)
            }
            Rejection::Unlocatable { text } => write!(f, "'{}' not found in parent translation", text),
            Rejection::Overlap { first, second } => {
                write!(f, "spans at {} and {} overlap", first, second)
            }
        }
    }
}

/// Result of an injection attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionOutcome {
    /// Parent with its children rebuilt around the translated text
    Injected(Container),
    /// Cannot inject; fall back to per-child translation
    Inapplicable(Rejection),
}

/// Locates translated child spans inside a translated parent
#[derive(Debug, Clone, Copy)]
pub struct InjectionPlanner {
    max_sequence_length: usize,
    depth_mode: DepthMode,
}

impl Default for InjectionPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SEQUENCE_LENGTH, DepthMode::default())
    }
}

impl InjectionPlanner {
    pub fn new(max_sequence_length: usize, depth_mode: DepthMode) -> Self {
        Self {
            max_sequence_length,
            depth_mode,
        }
    }

    /// Preconditions checked before any oracle call
    ///
    /// Returns the positions of the children that become candidates.
    pub fn check(&self, parent: &Container) -> Result<Vec<usize>, Rejection> {
        let mut positions = Vec::new();

        for (position, child) in parent.children.iter().enumerate() {
            match child {
                Node::Leaf(_) => {}
                Node::Container(container) => {
                    let depth = child.depth(self.depth_mode);
                    if depth != 1 {
                        return Err(Rejection::UnsupportedChild { position, depth });
                    }
                    if !container.translatable {
                        return Err(Rejection::FrozenChild { position });
                    }
                    positions.push(position);
                }
            }
        }

        let length = parent.text().chars().count();
        if length > self.max_sequence_length {
            return Err(Rejection::Oversized {
                length,
                limit: self.max_sequence_length,
            });
        }

        Ok(positions)
    }

    /// Locate, validate and splice
    ///
    /// `candidates` must already hold whitespace-guarded translations taken
    /// from the same oracle calls that produced `translated_parent`.
    pub fn plan(
        &self,
        parent: &Container,
        translated_parent: &str,
        candidates: Vec<InjectionCandidate>,
    ) -> InjectionOutcome {
        let mut located = Vec::with_capacity(candidates.len());
        for mut candidate in candidates {
            match translated_parent.find(&candidate.translated_text) {
                Some(index) => {
                    candidate.injection_index = Some(index);
                    located.push((index, candidate));
                }
                None => {
                    return InjectionOutcome::Inapplicable(Rejection::Unlocatable {
                        text: candidate.translated_text,
                    })
                }
            }
        }

        // Stable: equal indices keep candidate order.
        located.sort_by_key(|(index, _)| *index);

        for pair in located.windows(2) {
            let (first, current) = &pair[0];
            let (second, _) = &pair[1];
            if first + current.translated_text.len() >= *second {
                return InjectionOutcome::Inapplicable(Rejection::Overlap {
                    first: *first,
                    second: *second,
                });
            }
        }

        let mut children = Vec::with_capacity(located.len() * 2 + 1);
        let mut cursor = 0;
        for (index, candidate) in located {
            if cursor < index {
                children.push(Node::Leaf(translated_parent[cursor..index].to_string()));
            }
            cursor = index + candidate.translated_text.len();
            children.push(candidate.into_spliced());
        }
        if cursor < translated_parent.len() {
            children.push(Node::Leaf(translated_parent[cursor..].to_string()));
        }

        InjectionOutcome::Injected(Container::new(children, parent.translatable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner() -> InjectionPlanner {
        InjectionPlanner::new(DEFAULT_MAX_SEQUENCE_LENGTH, DepthMode::Incremented)
    }

    fn span(text: &str) -> Node {
        Node::container(vec![Node::leaf(text)])
    }

    fn hello_world() -> Container {
        Container::new(
            vec![Node::leaf("Hello "), span("world"), Node::leaf("!")],
            true,
        )
    }

    #[test]
    fn test_check_collects_depth_one_children() {
        assert_eq!(planner().check(&hello_world()), Ok(vec![1]));
    }

    #[test]
    fn test_check_rejects_deeper_children() {
        let parent = Container::new(
            vec![Node::leaf("a "), Node::container(vec![span("b")])],
            true,
        );
        assert_eq!(
            planner().check(&parent),
            Err(Rejection::UnsupportedChild { position: 1, depth: 2 })
        );
    }

    #[test]
    fn test_check_rejects_literal_depth_children() {
        let planner = InjectionPlanner::new(DEFAULT_MAX_SEQUENCE_LENGTH, DepthMode::Literal);
        assert_eq!(
            planner.check(&hello_world()),
            Err(Rejection::UnsupportedChild { position: 1, depth: 0 })
        );
    }

    #[test]
    fn test_check_rejects_frozen_children() {
        let parent = Container::new(
            vec![Node::leaf("a "), Node::frozen(vec![Node::leaf("b")])],
            true,
        );
        assert_eq!(planner().check(&parent), Err(Rejection::FrozenChild { position: 1 }));
    }

    #[test]
    fn test_check_rejects_oversized_parent() {
        let long = "x".repeat(DEFAULT_MAX_SEQUENCE_LENGTH + 1);
        let parent = Container::new(vec![Node::leaf(long), span("y")], true);
        assert_eq!(
            planner().check(&parent),
            Err(Rejection::Oversized {
                length: DEFAULT_MAX_SEQUENCE_LENGTH + 2,
                limit: DEFAULT_MAX_SEQUENCE_LENGTH
            })
        );

        let exact = "é".repeat(DEFAULT_MAX_SEQUENCE_LENGTH - 1);
        let parent = Container::new(vec![Node::leaf(exact), span("y")], true);
        assert!(planner().check(&parent).is_ok());
    }

    #[test]
    fn test_plan_splices_hello_world() {
        let parent = hello_world();
        let candidates = vec![InjectionCandidate::new("monde", span("world"))];

        let outcome = planner().plan(&parent, "Bonjour monde !", candidates);

        let expected = Container::new(
            vec![Node::leaf("Bonjour "), span("monde"), Node::leaf(" !")],
            true,
        );
        assert_eq!(outcome, InjectionOutcome::Injected(expected));
    }

    #[test]
    fn test_plan_is_lossless_and_ordered() {
        let parent = Container::new(
            vec![span("red"), Node::leaf(" and "), span("blue"), Node::leaf(" sky")],
            false,
        );
        // Translation swaps the two spans.
        let translated = "ciel bleu et rouge";
        let candidates = vec![
            InjectionCandidate::new("rouge", span("red")),
            InjectionCandidate::new("bleu", span("blue")),
        ];

        match planner().plan(&parent, translated, candidates) {
            InjectionOutcome::Injected(container) => {
                assert_eq!(container.text(), translated);
                assert!(!container.translatable);
                assert_eq!(
                    container.children,
                    vec![
                        Node::leaf("ciel "),
                        span("bleu"),
                        Node::leaf(" et "),
                        span("rouge"),
                    ]
                );
            }
            other => panic!("Expected injection, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_keeps_child_flag_and_spans_at_edges() {
        let parent = Container::new(vec![span("a"), Node::leaf(" "), span("b")], true);
        let candidates = vec![
            InjectionCandidate::new("A", span("a")),
            InjectionCandidate::new("B", span("b")),
        ];
        match planner().plan(&parent, "A B", candidates) {
            InjectionOutcome::Injected(container) => {
                assert_eq!(container.children, vec![span("A"), Node::leaf(" "), span("B")]);
            }
            other => panic!("Expected injection, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_rejects_missing_candidate() {
        let candidates = vec![InjectionCandidate::new("monde", span("world"))];
        let outcome = planner().plan(&hello_world(), "Bonjour !", candidates);
        assert_eq!(
            outcome,
            InjectionOutcome::Inapplicable(Rejection::Unlocatable {
                text: "monde".to_string()
            })
        );
    }

    #[test]
    fn test_plan_rejects_overlapping_spans() {
        let parent = Container::new(vec![span("x"), span("y")], true);
        // "le" appears inside "lele"; both spans overlap once sorted.
        let candidates = vec![
            InjectionCandidate::new("lele", span("x")),
            InjectionCandidate::new("le", span("y")),
        ];
        let outcome = planner().plan(&parent, "lele", candidates);
        assert_eq!(
            outcome,
            InjectionOutcome::Inapplicable(Rejection::Overlap { first: 0, second: 0 })
        );
    }

    #[test]
    fn test_plan_rejects_touching_spans() {
        let parent = Container::new(vec![span("x"), span("y")], true);
        let candidates = vec![
            InjectionCandidate::new("le", span("x")),
            InjectionCandidate::new("la", span("y")),
        ];
        let outcome = planner().plan(&parent, "lela", candidates);
        assert_eq!(
            outcome,
            InjectionOutcome::Inapplicable(Rejection::Overlap { first: 0, second: 2 })
        );
    }

    #[test]
    fn test_plan_rejects_duplicate_translations() {
        let parent = Container::new(vec![span("x"), Node::leaf(" "), span("y")], true);
        let candidates = vec![
            InjectionCandidate::new("le", span("x")),
            InjectionCandidate::new("le", span("y")),
        ];
        let outcome = planner().plan(&parent, "le le", candidates);
        assert!(matches!(
            outcome,
            InjectionOutcome::Inapplicable(Rejection::Overlap { .. })
        ));
    }

    #[test]
    fn test_plan_without_candidates_yields_single_leaf() {
        let parent = Container::new(vec![Node::leaf("plain")], true);
        let outcome = planner().plan(&parent, "simple", vec![]);
        assert_eq!(
            outcome,
            InjectionOutcome::Injected(Container::new(vec![Node::leaf("simple")], true))
        );
    }

    #[test]
    fn test_plan_handles_multibyte_text() {
        let parent = Container::new(vec![Node::leaf("I like "), span("tea")], true);
        let candidates = vec![InjectionCandidate::new("お茶", span("tea"))];
        match planner().plan(&parent, "私はお茶が好き", candidates) {
            InjectionOutcome::Injected(container) => {
                assert_eq!(container.text(), "私はお茶が好き");
                assert_eq!(container.children.len(), 3);
            }
            other => panic!("Expected injection, got {:?}", other),
        }
    }
}
