//! # Bracketed Parse Trees
//!
//! An arena-backed constituency tree read from one-line Penn-style
//! bracketings such as `(TOP (NP (NN dog)))`. The tree is read-only once
//! built; event extraction works on a flattened chunk view and never
//! mutates the nodes themselves.

use crate::error::{KaisekiError, Result};

/// Type label of the sentence-top node. A completed top constituent is
/// consumed without being re-inserted into the chunk frontier.
pub const TOP_LABEL: &str = "TOP";

/// Handle to a node in a [`ParseTree`] arena.
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    label: String,
    /// Token text, set only on pos-tag (preterminal) nodes.
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Covered token index range, end exclusive.
    span: (usize, usize),
}

/// A constituency tree for one sentence.
#[derive(Debug, Clone)]
pub struct ParseTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl ParseTree {
    /// Reads a tree from a one-line bracketing.
    ///
    /// # Examples
    /// ```
    /// use kaiseki_core::tree::ParseTree;
    ///
    /// let tree = ParseTree::parse("(TOP (NP (NN dog)))").unwrap();
    /// assert_eq!(tree.label(tree.root()), "TOP");
    /// ```
    pub fn parse(input: &str) -> Result<ParseTree> {
        let chars: Vec<char> = input.chars().collect();
        let mut nodes = Vec::new();
        let mut pos = 0;
        let mut next_token = 0;

        skip_ws(&chars, &mut pos);
        let root = parse_node(&chars, &mut pos, &mut nodes, None, &mut next_token)?;
        skip_ws(&chars, &mut pos);
        if pos != chars.len() {
            return Err(KaisekiError::MalformedTree(format!(
                "trailing input after bracketing at offset {pos}"
            )));
        }

        Ok(ParseTree { nodes, root })
    }

    /// The root node of the tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The structural type label of a node (e.g. `NP`, `NN`, `TOP`).
    pub fn label(&self, node: NodeId) -> &str {
        &self.nodes[node.0].label
    }

    /// The token text of a pos-tag node, `None` for constituents.
    pub fn token_text(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].text.as_deref()
    }

    /// The parent of a node, `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// The children of a node in left-to-right order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// The covered token index range of a node, end exclusive.
    pub fn span(&self, node: NodeId) -> (usize, usize) {
        self.nodes[node.0].span
    }

    /// True for pos-tag (preterminal) nodes covering a single token.
    pub fn is_pos_tag(&self, node: NodeId) -> bool {
        self.nodes[node.0].text.is_some()
    }

    /// True if every child of this node is a pos-tag node.
    pub fn is_minimal_constituent(&self, node: NodeId) -> bool {
        let children = self.children(node);
        !children.is_empty() && children.iter().all(|c| self.is_pos_tag(*c))
    }

    /// True if `child` is the leftmost child of `parent`.
    pub fn is_first_child(&self, child: NodeId, parent: NodeId) -> bool {
        self.children(parent).first() == Some(&child)
    }

    /// True if `child` is the rightmost child of `parent`.
    pub fn is_last_child(&self, child: NodeId, parent: NodeId) -> bool {
        self.children(parent).last() == Some(&child)
    }

    /// All token texts covered by a node, in order.
    pub fn covered_tokens(&self, node: NodeId) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_tokens(node, &mut out);
        out
    }

    /// The covered token texts joined with single spaces.
    pub fn covered_text(&self, node: NodeId) -> String {
        self.covered_tokens(node).join(" ")
    }

    /// Renders the tree back into its one-line bracketing.
    pub fn to_bracketed(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, &mut out);
        out
    }

    /// Severs a parent link, leaving the tree structurally inconsistent.
    /// Exists so the extraction guards against such trees can be exercised.
    #[cfg(test)]
    pub(crate) fn detach(&mut self, node: NodeId) {
        self.nodes[node.0].parent = None;
    }

    fn collect_tokens<'a>(&'a self, node: NodeId, out: &mut Vec<&'a str>) {
        if let Some(text) = self.token_text(node) {
            out.push(text);
        } else {
            for child in self.children(node) {
                self.collect_tokens(*child, out);
            }
        }
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        out.push('(');
        out.push_str(self.label(node));
        if let Some(text) = self.token_text(node) {
            out.push(' ');
            out.push_str(text);
        } else {
            for child in self.children(node) {
                out.push(' ');
                self.write_node(*child, out);
            }
        }
        out.push(')');
    }
}

fn skip_ws(chars: &[char], pos: &mut usize) {
    while *pos < chars.len() && chars[*pos].is_whitespace() {
        *pos += 1;
    }
}

fn read_symbol(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() {
        let c = chars[*pos];
        if c == '(' || c == ')' || c.is_whitespace() {
            break;
        }
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn parse_node(
    chars: &[char],
    pos: &mut usize,
    nodes: &mut Vec<Node>,
    parent: Option<NodeId>,
    next_token: &mut usize,
) -> Result<NodeId> {
    if chars.get(*pos) != Some(&'(') {
        return Err(KaisekiError::MalformedTree(format!(
            "expected '(' at offset {pos}",
            pos = *pos
        )));
    }
    *pos += 1;
    skip_ws(chars, pos);

    let label = read_symbol(chars, pos);
    if label.is_empty() {
        return Err(KaisekiError::MalformedTree(format!(
            "missing node label at offset {pos}",
            pos = *pos
        )));
    }
    skip_ws(chars, pos);

    let id = NodeId(nodes.len());
    nodes.push(Node {
        label,
        text: None,
        parent,
        children: Vec::new(),
        span: (0, 0),
    });

    if chars.get(*pos) == Some(&'(') {
        // Constituent: one or more child nodes.
        let mut children = Vec::new();
        while chars.get(*pos) == Some(&'(') {
            let child = parse_node(chars, pos, nodes, Some(id), next_token)?;
            children.push(child);
            skip_ws(chars, pos);
        }
        let span = (
            nodes[children[0].0].span.0,
            nodes[children[children.len() - 1].0].span.1,
        );
        nodes[id.0].children = children;
        nodes[id.0].span = span;
    } else {
        // Pos-tag node: a single covered token.
        let text = read_symbol(chars, pos);
        if text.is_empty() {
            return Err(KaisekiError::MalformedTree(format!(
                "pos-tag node without token text at offset {pos}",
                pos = *pos
            )));
        }
        nodes[id.0].text = Some(text);
        nodes[id.0].span = (*next_token, *next_token + 1);
        *next_token += 1;
        skip_ws(chars, pos);
    }

    if chars.get(*pos) != Some(&')') {
        return Err(KaisekiError::MalformedTree(format!(
            "unbalanced bracketing at offset {pos}",
            pos = *pos
        )));
    }
    *pos += 1;
    Ok(id)
}
