//! Depth-first tree traversal driving the encoder.

use crate::color::Color;
use crate::encoder::Encoder;
use crate::tree::SyntaxNode;

struct Frame<N> {
    node: N,
    colored: bool,
    next_child: usize,
}

fn enter<N: SyntaxNode>(
    node: N,
    classify: &impl Fn(&str) -> Option<Color>,
    encoder: &mut Encoder,
) -> Frame<N> {
    let color = classify(node.kind());
    if let Some(color) = color {
        encoder.start(color, node.start());
    }
    Frame {
        node,
        colored: color.is_some(),
        next_child: 0,
    }
}

/// Walk `root` in document order, opening a colored region on the encoder
/// for every node `classify` recognizes and closing it after its children.
///
/// Unclassified nodes are transparent: their children are visited but they
/// emit no events of their own. The traversal keeps its own stack, so tree
/// depth is not limited by the thread stack.
pub fn walk<N, F>(root: N, classify: F, encoder: &mut Encoder)
where
    N: SyntaxNode,
    F: Fn(&str) -> Option<Color>,
{
    let mut stack = vec![enter(root, &classify, encoder)];

    while let Some(frame) = stack.last_mut() {
        if frame.next_child < frame.node.child_count() {
            let index = frame.next_child;
            frame.next_child += 1;
            if let Some(child) = frame.node.child(index) {
                let child = enter(child, &classify, encoder);
                stack.push(child);
            }
        } else if let Some(frame) = stack.pop() {
            if frame.colored {
                encoder.end(frame.node.end());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Run;
    use crate::encoder::Position;

    /// In-memory tree for exercising the walker without a parser.
    struct TestNode {
        kind: &'static str,
        start: Position,
        end: Position,
        children: Vec<TestNode>,
    }

    fn node(kind: &'static str, start: (usize, usize), end: (usize, usize), children: Vec<TestNode>) -> TestNode {
        TestNode {
            kind,
            start: Position::new(start.0, start.1),
            end: Position::new(end.0, end.1),
            children,
        }
    }

    fn leaf(kind: &'static str, start: (usize, usize), end: (usize, usize)) -> TestNode {
        node(kind, start, end, Vec::new())
    }

    impl<'a> SyntaxNode for &'a TestNode {
        fn kind(&self) -> &str {
            self.kind
        }

        fn start(&self) -> Position {
            self.start
        }

        fn end(&self) -> Position {
            self.end
        }

        fn child_count(&self) -> usize {
            self.children.len()
        }

        fn child(&self, index: usize) -> Option<Self> {
            let node: &'a TestNode = self;
            node.children.get(index)
        }
    }

    fn classify(kind: &str) -> Option<Color> {
        match kind {
            "root" => Some(Color::Plain),
            "str" => Some(Color::String),
            "esc" => Some(Color::SpecialChar),
            "id" => Some(Color::Identifier),
            "kw" => Some(Color::Keyword),
            "bad" => Some(Color::Error),
            _ => None,
        }
    }

    fn encode(root: &TestNode, widths: Vec<usize>) -> Vec<Vec<Run>> {
        let mut encoder = Encoder::new(root.start, widths);
        walk(root, classify, &mut encoder);
        assert_eq!(encoder.depth(), 0, "every start must be matched by an end");
        encoder.render()
    }

    #[test]
    fn test_transparent_nodes_pass_parent_color() {
        // `"a\tb"` where the fragment nodes are unclassified
        let tree = node(
            "root",
            (0, 0),
            (0, 6),
            vec![node(
                "str",
                (0, 0),
                (0, 6),
                vec![
                    leaf("fragment", (0, 1), (0, 2)),
                    leaf("esc", (0, 2), (0, 4)),
                    leaf("fragment", (0, 4), (0, 5)),
                ],
            )],
        );
        assert_eq!(
            encode(&tree, vec![6]),
            vec![vec![
                Run::new(Color::String, 2),
                Run::new(Color::SpecialChar, 2),
                Run::eol(Color::String),
            ]]
        );
    }

    #[test]
    fn test_unclassified_wrapper_is_invisible() {
        let tree = node(
            "root",
            (0, 0),
            (0, 7),
            vec![node(
                "statement",
                (0, 0),
                (0, 7),
                vec![leaf("kw", (0, 0), (0, 3)), leaf("id", (0, 4), (0, 7))],
            )],
        );
        assert_eq!(
            encode(&tree, vec![7]),
            vec![vec![
                Run::new(Color::Keyword, 3),
                Run::new(Color::Plain, 1),
                Run::eol(Color::Identifier),
            ]]
        );
    }

    #[test]
    fn test_zero_width_error_node_is_neutral() {
        let plain = node(
            "root",
            (0, 0),
            (0, 3),
            vec![leaf("id", (0, 0), (0, 1)), leaf("id", (0, 2), (0, 3))],
        );
        let with_missing = node(
            "root",
            (0, 0),
            (0, 3),
            vec![
                leaf("id", (0, 0), (0, 1)),
                leaf("bad", (0, 1), (0, 1)),
                leaf("id", (0, 2), (0, 3)),
            ],
        );
        assert_eq!(encode(&plain, vec![3]), encode(&with_missing, vec![3]));
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let depth = 100_000;
        let mut tree = leaf("id", (0, 0), (0, 1));
        for _ in 0..depth {
            tree = node("group", (0, 0), (0, 1), vec![tree]);
        }
        let tree = node("root", (0, 0), (0, 1), vec![tree]);
        assert_eq!(encode(&tree, vec![1]), vec![vec![Run::eol(Color::Identifier)]]);
        // Drop iteratively; the recursive drop of a 100k-deep Vec chain would overflow.
        let mut pending = vec![tree];
        while let Some(mut n) = pending.pop() {
            pending.append(&mut n.children);
        }
    }

    #[test]
    fn test_multiline_nested_spans() {
        // root { str spanning two lines containing an esc on line 1 }
        let tree = node(
            "root",
            (0, 0),
            (1, 4),
            vec![
                leaf("kw", (0, 0), (0, 3)),
                node("str", (0, 4), (1, 4), vec![leaf("esc", (1, 1), (1, 3))]),
            ],
        );
        assert_eq!(
            encode(&tree, vec![6, 4]),
            vec![
                vec![
                    Run::new(Color::Keyword, 3),
                    Run::new(Color::Plain, 1),
                    Run::eol(Color::String),
                ],
                vec![
                    Run::new(Color::String, 1),
                    Run::new(Color::SpecialChar, 2),
                    Run::eol(Color::String),
                ],
            ]
        );
    }
}
