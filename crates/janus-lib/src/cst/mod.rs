//! Printed concrete syntax tree.
//!
//! Printers build an immutable Rowan green tree bottom-up. Leaves are text
//! fragments, inner nodes are either plain sequences or category nodes added
//! by `annotate`. The tree says nothing about layout: a [`LayoutPrinter`]
//! decides how fragments and categories turn into text.
//!
//! Plain sequences never nest: concatenation splices their children into the
//! new node, so tree depth only grows with annotations. Green children are
//! reference counted, so splicing shares subtrees instead of copying them.

mod printer;

#[cfg(test)]
mod cst_tests;

use std::fmt::{self, Write};

use rowan::{GreenNode, GreenNodeData, GreenToken, NodeOrToken};

pub use printer::{LayoutPrinter, StringPrinter};

const TEXT: rowan::SyntaxKind = rowan::SyntaxKind(0);
const SEQUENCE: rowan::SyntaxKind = rowan::SyntaxKind(1);
const FIRST_CATEGORY: u16 = 2;

type Child = NodeOrToken<GreenNode, GreenToken>;

/// Annotation category, chosen by the grammar author.
///
/// Categories tag printed subtrees (e.g. "infix operator", "block") so a
/// layout printer can insert spacing or indentation around them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Category(u16);

impl Category {
    /// # Panics
    /// Panics if `id` does not fit next to the reserved kinds.
    pub const fn new(id: u16) -> Self {
        assert!(id <= u16::MAX - FIRST_CATEGORY, "category id out of range");
        Self(id)
    }

    #[inline]
    pub fn id(self) -> u16 {
        self.0
    }

    fn to_raw(self) -> rowan::SyntaxKind {
        rowan::SyntaxKind(self.0 + FIRST_CATEGORY)
    }

    fn from_raw(raw: rowan::SyntaxKind) -> Option<Self> {
        raw.0.checked_sub(FIRST_CATEGORY).map(Self)
    }
}

/// Printed tree.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Cst(GreenNode);

impl Cst {
    pub fn empty() -> Self {
        Self(GreenNode::new(SEQUENCE, Vec::new()))
    }

    pub fn text(text: &str) -> Self {
        let token = GreenToken::new(TEXT, text);
        Self(GreenNode::new(SEQUENCE, vec![NodeOrToken::Token(token)]))
    }

    /// `self` followed by `next`.
    pub fn then(self, next: Cst) -> Self {
        if self.is_empty() {
            return next;
        }
        if next.is_empty() {
            return self;
        }
        Self::concat([self, next])
    }

    /// Concatenate trees in order into one flat sequence node.
    pub fn concat(trees: impl IntoIterator<Item = Cst>) -> Self {
        let mut children = Vec::new();
        for tree in trees {
            tree.splice_into(&mut children);
        }
        Self(GreenNode::new(SEQUENCE, children))
    }

    fn splice_into(self, children: &mut Vec<Child>) {
        if self.0.kind() == SEQUENCE {
            children.extend(self.0.children().map(|child| child.to_owned()));
        } else {
            children.push(NodeOrToken::Node(self.0));
        }
    }

    pub fn annotate(self, category: Category) -> Self {
        Self(GreenNode::new(
            category.to_raw(),
            vec![NodeOrToken::Node(self.0)],
        ))
    }

    /// A tree without children. Annotated empty trees are not empty.
    pub fn is_empty(&self) -> bool {
        self.0.kind() == SEQUENCE && self.0.children().len() == 0
    }

    pub fn as_green(&self) -> &GreenNode {
        &self.0
    }

    pub fn view(&self) -> CstRef<'_> {
        CstRef(&self.0)
    }

    pub fn print_to<P: LayoutPrinter + ?Sized>(&self, printer: &mut P) {
        self.view().print_to(printer)
    }

    /// Render with the default layout: fragments back to back.
    pub fn to_source(&self) -> String {
        let mut printer = StringPrinter::new();
        self.print_to(&mut printer);
        printer.finish()
    }
}

impl Default for Cst {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Cst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source())
    }
}

impl fmt::Debug for Cst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.view().dump())
    }
}

/// Borrowed subtree handed to layout printers.
#[derive(Clone, Copy)]
pub struct CstRef<'a>(&'a GreenNodeData);

impl<'a> CstRef<'a> {
    /// Category of this node, if it was produced by `annotate`.
    pub fn category(&self) -> Option<Category> {
        Category::from_raw(self.0.kind())
    }

    /// Walk the subtree, reporting fragments and category nodes to `printer`.
    pub fn print_to<P: LayoutPrinter + ?Sized>(&self, printer: &mut P) {
        if let Some(category) = self.category() {
            printer.annotated(category, self.content());
            return;
        }
        for child in self.0.children() {
            match child {
                NodeOrToken::Token(token) => printer.text(token.text()),
                NodeOrToken::Node(node) => CstRef(node).print_to(printer),
            }
        }
    }

    /// The wrapped subtree of a category node.
    fn content(&self) -> CstRef<'a> {
        // Category nodes always wrap exactly one node.
        match self.0.children().next() {
            Some(NodeOrToken::Node(node)) => CstRef(node),
            _ => unreachable!("category node without content"),
        }
    }

    /// S-expression-like dump for tests and debugging.
    ///
    /// Plain sequences are flattened; categories show as `#id(...)`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out);
        out.trim_end().to_owned()
    }

    fn dump_into(&self, out: &mut String) {
        if let Some(category) = self.category() {
            let mut inner = String::new();
            self.content().dump_into(&mut inner);
            write!(out, "#{}({}) ", category.id(), inner.trim_end())
                .expect("String write never fails");
            return;
        }
        for child in self.0.children() {
            match child {
                NodeOrToken::Token(token) => {
                    write!(out, "{:?} ", token.text()).expect("String write never fails")
                }
                NodeOrToken::Node(node) => CstRef(node).dump_into(out),
            }
        }
    }
}

/// Result of printing with a reducer: the decomposed accumulator plus the
/// tree for the input the reducer would have consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialCst<T> {
    pub left: T,
    pub tree: Cst,
}

impl<T> PartialCst<T> {
    pub fn new(left: T, tree: Cst) -> Self {
        Self { left, tree }
    }

    pub fn map_tree(self, f: impl FnOnce(Cst) -> Cst) -> Self {
        Self {
            left: self.left,
            tree: f(self.tree),
        }
    }
}
