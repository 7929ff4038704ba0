use super::*;

const INFIX: Category = Category::new(0);
const BLOCK: Category = Category::new(7);

struct Bracketing(StringPrinter);

impl LayoutPrinter for Bracketing {
    fn text(&mut self, text: &str) {
        self.0.text(text);
    }

    fn annotated(&mut self, category: Category, tree: CstRef<'_>) {
        self.text(&format!("<{}>", category.id()));
        tree.print_to(self);
        self.text(&format!("</{}>", category.id()));
    }
}

#[test]
fn empty_tree() {
    let tree = Cst::empty();

    assert!(tree.is_empty());
    assert_eq!(tree.to_source(), "");
    assert_eq!(Cst::default(), tree);
}

#[test]
fn then_skips_empty_sides() {
    let a = Cst::text("a");

    assert_eq!(Cst::empty().then(a.clone()), a);
    assert_eq!(a.clone().then(Cst::empty()), a);
}

#[test]
fn concat_keeps_order() {
    let tree = Cst::concat(["1", "+", "2"].map(Cst::text));

    assert_eq!(tree.to_source(), "1+2");
    insta::assert_snapshot!(format!("{tree:?}"), @r#""1" "+" "2""#);
}

#[test]
fn sequences_splice_instead_of_nesting() {
    let tree = Cst::text("a")
        .then(Cst::text("b"))
        .then(Cst::text("+").annotate(INFIX))
        .then(Cst::concat(["c", "d"].map(Cst::text)));

    assert_eq!(tree.as_green().children().len(), 5);
    assert_eq!(
        tree,
        Cst::concat([
            Cst::text("a"),
            Cst::text("b"),
            Cst::text("+").annotate(INFIX),
            Cst::text("c"),
            Cst::text("d"),
        ])
    );
}

#[test]
fn chained_sequence_stays_flat() {
    let tree = (0..10_000).fold(Cst::empty(), |tree, _| tree.then(Cst::text("x")));

    assert_eq!(tree.as_green().children().len(), 10_000);
    assert_eq!(tree.to_source().len(), 10_000);
}

#[test]
fn annotated_empty_is_not_empty() {
    let tree = Cst::empty().annotate(INFIX);

    assert!(!tree.is_empty());
    assert_eq!(tree.to_source(), "");
}

#[test]
fn category_roundtrips_through_kind() {
    let tree = Cst::text("x").annotate(BLOCK);

    assert_eq!(tree.view().category(), Some(BLOCK));
    assert_eq!(Cst::text("x").view().category(), None);
}

#[test]
fn default_layout_ignores_categories() {
    let tree = Cst::text("1")
        .then(Cst::text("+").annotate(INFIX))
        .then(Cst::text("2"));

    assert_eq!(tree.to_string(), "1+2");
}

#[test]
fn custom_layout_sees_nested_categories() {
    let tree = Cst::text("{")
        .then(
            Cst::text("a")
                .then(Cst::text("=").annotate(INFIX))
                .then(Cst::text("b"))
                .annotate(BLOCK),
        )
        .then(Cst::text("}"));

    let mut printer = Bracketing(StringPrinter::new());
    tree.print_to(&mut printer);

    assert_eq!(printer.0.as_str(), "{<7>a<0>=</0>b</7>}");
}

#[test]
fn root_category_is_reported() {
    let tree = Cst::text("x").annotate(INFIX);

    let mut printer = Bracketing(StringPrinter::new());
    tree.print_to(&mut printer);

    assert_eq!(printer.0.finish(), "<0>x</0>");
}

#[test]
fn dump_shows_categories() {
    let tree = Cst::text("a")
        .then(Cst::text("+").annotate(INFIX))
        .then(Cst::text("b"));

    insta::assert_snapshot!(format!("{tree:?}"), @r#""a" #0("+") "b""#);
}

#[test]
fn partial_map_tree_keeps_left() {
    let partial = PartialCst::new(vec![1], Cst::text("2"));

    let partial = partial.map_tree(|tree| Cst::text(",").then(tree));

    assert_eq!(partial.left, vec![1]);
    assert_eq!(partial.tree.to_source(), ",2");
}
