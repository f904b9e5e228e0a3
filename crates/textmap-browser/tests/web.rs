//! WASM browser tests for textmap-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use textmap_browser::{
    BrowserController, DomSelection, DomTree, EditTarget, SelectionPort, TreePosition,
};
use textmap_core::{DocumentTree, NodeType};
use web_sys::{HtmlElement, HtmlTextAreaElement, Node};

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Append a fresh container holding `html` to the body.
fn mount(html: &str) -> HtmlElement {
    let document = document();
    let container = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    container.set_inner_html(html);
    document.body().unwrap().append_child(&container).unwrap();
    container
}

fn by_id(id: &str) -> HtmlElement {
    document()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

// === DomTree ===

#[wasm_bindgen_test]
fn test_dom_node_types() {
    let container = mount(r#"<p id="nt">a<!-- c --></p>"#);
    let p: Node = by_id("nt").into();
    let tree = DomTree;
    let children = tree.children(&p);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.node_type(&p), NodeType::Element);
    assert_eq!(tree.node_type(&children[0]), NodeType::Text);
    assert_eq!(tree.node_type(&children[1]), NodeType::Other);
    assert_eq!(tree.tag_name(&p).as_deref(), Some("P"));
    assert_eq!(tree.parent(&children[0]), Some(p));
    container.remove();
}

// === Rich regions ===

#[wasm_bindgen_test]
fn test_source_of_rich_region() {
    let container = mount(
        r#"<div id="rich" contenteditable="true"><div>one</div><div><br></div><div>two</div></div>"#,
    );
    let controller = BrowserController::new();
    let rich: Node = by_id("rich").into();
    assert_eq!(controller.source(Some(&rich)).as_deref(), Some("one\n\ntwo"));
    container.remove();
}

#[wasm_bindgen_test]
fn test_source_outside_editable() {
    let container = mount(r#"<p id="static">hi</p>"#);
    let controller = BrowserController::new();
    let p: Node = by_id("static").into();
    assert_eq!(controller.source(Some(&p)), None);
    container.remove();
}

#[wasm_bindgen_test]
fn test_set_cursor_round_trip() {
    let container = mount(
        r#"<div id="rt" contenteditable="true"><p>one</p><p>two <b>three</b></p></div>"#,
    );
    let editable = by_id("rt");
    editable.focus().unwrap();

    let mut controller = BrowserController::new();
    assert!(matches!(controller.target(None), Some(EditTarget::Rich(_))));
    for offset in [0, 2, 3, 4, 7, 9, 13] {
        controller.set_cursor(offset, None).unwrap();
        assert_eq!(controller.cursor(), offset, "offset {offset}");
    }

    controller.set_cursor(99, None).unwrap();
    assert_eq!(controller.cursor(), 13);
    container.remove();
}

#[wasm_bindgen_test]
fn test_install_leaves_single_range() {
    let container = mount(r#"<div id="one-range" contenteditable="true">abcdef</div>"#);
    let editable = by_id("one-range");
    editable.focus().unwrap();

    let mut controller = BrowserController::new();
    controller.set_cursor(1, Some(4)).unwrap();
    controller.set_cursor(2, Some(5)).unwrap();

    let selection = web_sys::window().unwrap().get_selection().unwrap().unwrap();
    assert_eq!(selection.range_count(), 1);
    assert_eq!(selection.to_string().as_string().as_deref(), Some("cde"));
    container.remove();
}

#[wasm_bindgen_test]
fn test_dom_selection_boundary() {
    let container = mount(r#"<div id="b" contenteditable="true">xyz</div>"#);
    let text = by_id("b").first_child().unwrap();
    let mut selection = DomSelection;
    selection
        .install(TreePosition::new(text.clone(), 2), None)
        .unwrap();
    assert_eq!(selection.active_boundary(), Some(TreePosition::new(text, 2)));
    container.remove();
}

// === Form fields ===

#[wasm_bindgen_test]
fn test_textarea_field() {
    let container = mount(r#"<textarea id="ta"></textarea>"#);
    let area = by_id("ta").dyn_into::<HtmlTextAreaElement>().unwrap();
    area.set_value("hello\nworld");
    area.focus().unwrap();

    let mut controller = BrowserController::new();
    assert!(matches!(controller.target(None), Some(EditTarget::Field(_))));
    assert_eq!(controller.source(None).as_deref(), Some("hello\nworld"));

    controller.set_cursor(7, None).unwrap();
    assert_eq!(controller.cursor(), 7);

    controller.set_cursor(500, None).unwrap();
    assert_eq!(controller.cursor(), 11);
    container.remove();
}
