//! Layout printers turn a printed tree into text.

use super::{Category, CstRef};

/// Receives fragments and category nodes while a tree is walked.
///
/// The default layout ignores categories and writes fragments back to back.
/// Override `annotated` to add spacing or indentation per category:
///
/// ```
/// use janus::cst::{CstRef, LayoutPrinter, StringPrinter};
/// use janus::Category;
///
/// const INFIX: Category = Category::new(0);
///
/// struct Spaced(StringPrinter);
///
/// impl LayoutPrinter for Spaced {
///     fn text(&mut self, text: &str) {
///         self.0.text(text);
///     }
///
///     fn annotated(&mut self, category: Category, tree: CstRef<'_>) {
///         if category == INFIX {
///             self.text(" ");
///             tree.print_to(self);
///             self.text(" ");
///         } else {
///             tree.print_to(self);
///         }
///     }
/// }
/// ```
pub trait LayoutPrinter {
    fn text(&mut self, text: &str);

    fn annotated(&mut self, category: Category, tree: CstRef<'_>) {
        let _ = category;
        tree.print_to(self);
    }
}

/// Collects fragments into a `String`.
#[derive(Debug, Clone, Default)]
pub struct StringPrinter {
    out: String,
}

impl StringPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl LayoutPrinter for StringPrinter {
    fn text(&mut self, text: &str) {
        self.out.push_str(text);
    }
}
