use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use scrub_dom::{Document, NodeId};

use crate::error::ConfigError;
use crate::policy::Policy;
use crate::sanitizer::Disposition;

/// Order in which the policy sees a node relative to its children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Parents first. A rejected node is not descended into.
    #[default]
    TopDown,
    /// Children first.
    BottomUp,
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top_down" | "top-down" => Ok(Direction::TopDown),
            "bottom_up" | "bottom-up" => Ok(Direction::BottomUp),
            _ => Err(ConfigError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::TopDown => "top_down",
            Direction::BottomUp => "bottom_up",
        })
    }
}

enum Step {
    Enter(NodeId, Option<NodeId>),
    Exit(NodeId, Option<NodeId>),
}

/// Whether a queued node is still where it was when it got queued.
fn in_place(doc: &Document, node: NodeId, parent: Option<NodeId>) -> bool {
    parent.map_or(true, |parent| doc.parent(node) == Some(parent))
}

fn push_children(doc: &Document, node: NodeId, stack: &mut Vec<Step>) {
    stack.extend(
        doc.children(node)
            .iter()
            .rev()
            .map(|&child| Step::Enter(child, Some(node))),
    );
}

/// Applies `policy` to `root` and its descendants depth first, left to right.
///
/// Children are read after the policy saw their parent (top-down) and nodes
/// a policy moved away in the meantime are skipped. The walk uses an explicit
/// stack, so deep trees cannot exhaust the call stack. Returns the number of
/// policy invocations.
pub fn traverse<P: Policy + ?Sized>(
    doc: &mut Document,
    root: NodeId,
    policy: &mut P,
    direction: Direction,
) -> usize {
    log::debug!("traversing {:?} {}", root, direction);
    let mut visits = 0;
    let mut stack = vec![Step::Enter(root, None)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node, parent) => {
                if !in_place(doc, node, parent) {
                    continue;
                }
                match direction {
                    Direction::TopDown => {
                        visits += 1;
                        if policy.apply(doc, node) == Disposition::Allow {
                            push_children(doc, node, &mut stack);
                        }
                    }
                    Direction::BottomUp => {
                        stack.push(Step::Exit(node, parent));
                        push_children(doc, node, &mut stack);
                    }
                }
            }
            Step::Exit(node, parent) => {
                if in_place(doc, node, parent) {
                    visits += 1;
                    policy.apply(doc, node);
                }
            }
        }
    }
    visits
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use scrub_dom::{Element, NodeKind};

    use super::*;
    use crate::policy::policy_fn;

    fn sample() -> (Document, NodeId) {
        // <div>a<p>b<em>c</em></p><!--d--></div>
        let mut doc = Document::new();
        let div = doc.create_element(Element::new("div"));
        let a = doc.create_text("a");
        let p = doc.create_element(Element::new("p"));
        let b = doc.create_text("b");
        let em = doc.create_element(Element::new("em"));
        let c = doc.create_text("c");
        let d = doc.create_comment("d");
        let root = doc.root();
        doc.append_child(root, div);
        doc.append_child(div, a);
        doc.append_child(div, p);
        doc.append_child(p, b);
        doc.append_child(p, em);
        doc.append_child(em, c);
        doc.append_child(div, d);
        (doc, div)
    }

    fn label(doc: &Document, node: NodeId) -> String {
        match doc.kind(node) {
            NodeKind::Element(element) => element.name().to_string(),
            NodeKind::Text(text) => text.clone(),
            NodeKind::Comment(text) => format!("#{}", text),
            _ => "?".to_string(),
        }
    }

    fn order(direction: Direction) -> Vec<String> {
        let (mut doc, div) = sample();
        let mut seen = vec![];
        traverse(
            &mut doc,
            div,
            &mut policy_fn(|doc: &mut Document, node| {
                seen.push(label(doc, node));
                None
            }),
            direction,
        );
        seen
    }

    mod direction {
        use super::*;

        #[test]
        fn parse() {
            assert_eq!(Direction::TopDown, "top_down".parse().unwrap());
            assert_eq!(Direction::TopDown, "top-down".parse().unwrap());
            assert_eq!(Direction::BottomUp, "bottom_up".parse().unwrap());
            assert_eq!(Direction::BottomUp, "bottom-up".parse().unwrap());
        }

        #[test]
        fn invalid() {
            assert_matches!(
                "sideways".parse::<Direction>(),
                Err(ConfigError::InvalidDirection(name)) if name == "sideways"
            );
            assert!("TOP_DOWN".parse::<Direction>().is_err());
        }

        #[test]
        fn display_roundtrip() {
            for direction in [Direction::TopDown, Direction::BottomUp] {
                assert_eq!(direction, direction.to_string().parse().unwrap());
            }
        }
    }

    #[test]
    fn top_down_order() {
        assert_eq!(vec!["div", "a", "p", "b", "em", "c", "#d"], order(Direction::TopDown));
    }

    #[test]
    fn bottom_up_order() {
        assert_eq!(vec!["a", "b", "c", "em", "p", "#d", "div"], order(Direction::BottomUp));
    }

    #[test]
    fn same_count_in_both_directions() {
        let (mut doc, div) = sample();
        let mut allow = policy_fn(|_: &mut Document, _| Some(Disposition::Allow));
        let top_down = traverse(&mut doc, div, &mut allow, Direction::TopDown);
        let bottom_up = traverse(&mut doc, div, &mut allow, Direction::BottomUp);
        assert_eq!(7, top_down);
        assert_eq!(top_down, bottom_up);
    }

    #[test]
    fn reject_stops_descent() {
        let (mut doc, div) = sample();
        let mut reject = policy_fn(|_: &mut Document, _| Some(Disposition::Reject));
        assert_eq!(1, traverse(&mut doc, div, &mut reject, Direction::TopDown));
        assert_eq!(7, traverse(&mut doc, div, &mut reject, Direction::BottomUp));
    }

    #[test]
    fn reject_skips_only_that_subtree() {
        let (mut doc, div) = sample();
        let mut seen = vec![];
        traverse(
            &mut doc,
            div,
            &mut policy_fn(|doc: &mut Document, node| {
                seen.push(label(doc, node));
                (label(doc, node) == "p").then_some(Disposition::Reject)
            }),
            Direction::TopDown,
        );
        assert_eq!(vec!["div", "a", "p", "#d"], seen);
    }

    #[test]
    fn detached_siblings_are_skipped() {
        let (mut doc, div) = sample();
        let mut seen = vec![];
        traverse(
            &mut doc,
            div,
            &mut policy_fn(|doc: &mut Document, node| {
                seen.push(label(doc, node));
                if label(doc, node) == "a" {
                    // drop every later sibling
                    let siblings = doc.children(div).to_vec();
                    for sibling in siblings.into_iter().skip(1) {
                        doc.remove(sibling);
                    }
                }
                None
            }),
            Direction::TopDown,
        );
        assert_eq!(vec!["div", "a"], seen);
    }

    #[test]
    fn deep_tree() {
        let mut doc = Document::new();
        let mut parent = doc.root();
        for _ in 0..100_000 {
            let child = doc.create_element(Element::new("div"));
            doc.append_child(parent, child);
            parent = child;
        }
        let root = doc.root();
        let mut allow = policy_fn(|_: &mut Document, _| None);
        assert_eq!(100_001, traverse(&mut doc, root, &mut allow, Direction::TopDown));
        assert_eq!(100_001, traverse(&mut doc, root, &mut allow, Direction::BottomUp));
    }
}
