//! Whole-engine tests: properties that tie extraction and location together,
//! checked over a set of representative fixtures.

use crate::classify::Classifier;
use crate::config::MapperConfig;
use crate::extract::{SegmentKind, current_offset, extract_text, segments};
use crate::locate::locate_offset;
use crate::mapper::TextMapper;
use crate::mem::{MemSelection, MemTree, NodeId};
use crate::text::utf16_len;
use crate::tree::DocumentTree;
use crate::types::TreePosition;
use crate::walk::BreakKind;

const FIXTURES: &[&str] = &[
    "<div>hello world</div>",
    "<div><span>a</span><span>b</span><span>c</span></div>",
    "<div>a<br/>b</div>",
    "<div><p>a</p><p>b</p></div>",
    "<div><div>one</div><div><br/></div><div>two</div></div>",
    "<div>a<br/><br/><br/>b</div>",
    "<div>a<br/><p>b</p>c</div>",
    "<div><p>a</p><br/>b</div>",
    "<div><ul><li>x <b>bold</b></li><li><i>y</i></li></ul><p>tail<br/></p></div>",
    "<div><span>a<div>b</div>c</span></div>",
    "<div><div><div>deep</div></div><div><p>b</p><p></p><p>c</p></div></div>",
    "<div>a&#160;&#160;b <!-- skip -->café end</div>",
    "<div><div>one</div><div><br/></div></div>",
    "<div><p></p><p>x</p><p></p></div>",
    "<div></div>",
];

fn parse(markup: &str) -> (MemTree, NodeId) {
    let tree = MemTree::parse_xhtml(markup).unwrap();
    let root = tree.children(&tree.root())[0];
    (tree, root)
}

/// Compact, id-free description of a tree position.
fn describe(tree: &MemTree, pos: &TreePosition<NodeId>) -> String {
    match tree.text(&pos.node) {
        Some(text) => format!("{:?}@{}", text, pos.offset),
        None => format!(
            "<{}>@{}",
            tree.tag_name(&pos.node).unwrap_or_default(),
            pos.offset
        ),
    }
}

fn dump(markup: &str) -> String {
    let (tree, root) = parse(markup);
    segments(&tree, &Classifier::default(), &root)
        .iter()
        .map(|seg| {
            let kind = match seg.kind {
                SegmentKind::Text => "text",
                SegmentKind::Break(BreakKind::Block) => "block",
                SegmentKind::Break(BreakKind::Manual) => "manual",
            };
            format!(
                "{}..{} {} {}",
                seg.range.start,
                seg.range.end,
                kind,
                describe(&tree, &seg.position)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_round_trip_every_range() {
    let c = Classifier::default();
    for markup in FIXTURES {
        let (tree, root) = parse(markup);
        let len = utf16_len(&extract_text(&tree, &c, &root, None));
        for s in 0..=len {
            for e in s..=len {
                let located = locate_offset(&tree, &c, &root, s, Some(e));
                assert_eq!(
                    current_offset(&tree, &c, &root, &located.start),
                    s,
                    "start {s} of {s}..{e} in {markup}"
                );
                assert_eq!(
                    current_offset(&tree, &c, &root, &located.end),
                    e,
                    "end {e} of {s}..{e} in {markup}"
                );
            }
        }
    }
}

#[test]
fn test_caret_round_trip() {
    let c = Classifier::default();
    for markup in FIXTURES {
        let (tree, root) = parse(markup);
        let len = utf16_len(&extract_text(&tree, &c, &root, None));
        for offset in 0..=len {
            let located = locate_offset(&tree, &c, &root, offset, None);
            assert!(located.is_collapsed());
            assert_eq!(
                current_offset(&tree, &c, &root, &located.start),
                offset,
                "caret {offset} in {markup}"
            );
        }
    }
}

#[test]
fn test_extraction_idempotent() {
    let c = Classifier::default();
    for markup in FIXTURES {
        let (tree, root) = parse(markup);
        assert_eq!(
            extract_text(&tree, &c, &root, None),
            extract_text(&tree, &c, &root, None)
        );
    }
}

#[test]
fn test_clamp_law() {
    let c = Classifier::default();
    for markup in FIXTURES {
        let (tree, root) = parse(markup);
        let len = utf16_len(&extract_text(&tree, &c, &root, None));
        let at_end = locate_offset(&tree, &c, &root, len, None);
        for past in [len + 1, len + 7, usize::MAX / 2] {
            let clamped = locate_offset(&tree, &c, &root, past, None);
            assert_eq!(clamped.start, at_end.start, "{past} in {markup}");
            assert_eq!(clamped.range, at_end.range);
        }
    }
}

#[test]
fn test_consecutive_breaks_each_count_once() {
    let c = Classifier::default();
    for n in 1..=5 {
        let markup = format!("<div>a{}b</div>", "<br/>".repeat(n));
        let (tree, root) = parse(&markup);
        let expected = format!("a{}b", "\n".repeat(n));
        assert_eq!(extract_text(&tree, &c, &root, None), expected);
    }
}

#[test]
fn test_segments_agree_with_extraction() {
    let c = Classifier::default();
    for markup in FIXTURES {
        let (tree, root) = parse(markup);
        let text = extract_text(&tree, &c, &root, None);
        let total = segments(&tree, &c, &root)
            .last()
            .map_or(0, |seg| seg.range.end);
        assert_eq!(total, utf16_len(&text), "{markup}");
    }
}

#[test]
fn test_inline_scenario() {
    let (tree, root) = parse(FIXTURES[1]);
    let c = Classifier::default();
    assert_eq!(extract_text(&tree, &c, &root, None), "abc");
    let located = locate_offset(&tree, &c, &root, 2, None);
    assert_eq!(located.start, TreePosition::new(tree.find_text("c").unwrap(), 0));
}

#[test]
fn test_break_only_block_scenario() {
    let (tree, root) = parse(FIXTURES[4]);
    let c = Classifier::default();
    assert_eq!(extract_text(&tree, &c, &root, None), "one\n\ntwo");

    // Offset 4 is the empty line: right before the <br/> in the middle div.
    let middle = tree.children(&root)[1];
    let located = locate_offset(&tree, &c, &root, 4, None);
    assert_eq!(located.start, TreePosition::new(middle, 0));
}

#[test]
fn test_nbsp_scenario() {
    let (tree, root) = parse("<div>x&#160;y</div>");
    let c = Classifier::default();
    let text = extract_text(&tree, &c, &root, None);
    assert_eq!(text, "x\u{a0}y");
    assert_eq!(utf16_len(&text), 3);
    let located = locate_offset(&tree, &c, &root, 2, None);
    assert_eq!(current_offset(&tree, &c, &root, &located.start), 2);
}

#[test]
fn test_custom_block_tag_from_toml() {
    let config = MapperConfig::from_toml_str(
        r#"
        block_tags = ["x-line"]
        editable_attribute = "data-editable"
        editable_values = ["yes"]
        "#,
    )
    .unwrap();
    let tree = MemTree::parse_xhtml(
        r#"<main data-editable="yes"><x-line>one</x-line><x-line>two</x-line><p>no</p><p>break</p></main>"#,
    )
    .unwrap();
    let one = tree.find_text("one").unwrap();
    let mapper = TextMapper::with_config(tree, MemSelection::<NodeId>::new(), &config);
    assert_eq!(mapper.source(&one).as_deref(), Some("one\ntwo\nnobreak"));
}

#[test]
fn test_user_multi_range_replaced_by_single() {
    let (tree, root) = parse(r#"<div contenteditable="true"><p>one</p><p>two</p></div>"#);
    let one = tree.find_text("one").unwrap();
    let two = tree.find_text("two").unwrap();
    let mut selection = MemSelection::new();
    selection.add_range(TreePosition::new(one, 0), TreePosition::new(one, 1));
    selection.add_range(TreePosition::new(two, 0), TreePosition::new(two, 2));
    selection.set_focus(Some(root));

    let mut mapper = TextMapper::new(tree, selection);
    mapper.set_cursor(1, Some(6)).unwrap();
    assert_eq!(
        mapper.selection().ranges(),
        &[(TreePosition::new(one, 1), TreePosition::new(two, 2))]
    );
    assert_eq!(mapper.selection().clears(), 1);
    assert_eq!(mapper.cursor(), 1);
}

#[test]
fn test_segments_dump_mixed() {
    insta::assert_snapshot!(dump("<div><p>one</p>x<br/><b>y</b><div>z</div></div>"), @r#"
    0..3 text "one"@0
    3..4 block <p>@1
    4..5 text "x"@0
    5..6 manual <div>@2
    6..7 text "y"@0
    7..8 block <div>@4
    8..9 text "z"@0
    "#);
}

#[test]
fn test_segments_dump_empty_line() {
    insta::assert_snapshot!(dump("<div><div>one</div><div><br/></div><div>two</div></div>"), @r#"
    0..3 text "one"@0
    3..4 block <div>@1
    4..5 manual <div>@0
    5..8 text "two"@0
    "#);
}
