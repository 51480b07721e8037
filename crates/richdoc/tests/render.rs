mod common;

use common::fixtures::{load_all_fixture_records, load_fixture};
use richdoc::document::Block;
use richdoc::{
    parse_document, plain_text, plain_text_of, render_html, Document, Inline, ListItem, Mark,
    PlainTextOptions, RenderOptions,
};

#[test]
fn fixtures_render_to_expected_html() {
    for record in load_all_fixture_records() {
        let doc = parse_document(&record.fixture.input());
        assert_eq!(
            render_html(&doc, &RenderOptions::default()),
            record.fixture.html,
            "fixture {}",
            record.entry.name
        );
    }
}

#[test]
fn fixtures_reduce_to_expected_text() {
    for record in load_all_fixture_records() {
        assert_eq!(
            plain_text(&record.fixture.input(), &PlainTextOptions::default()),
            record.fixture.text,
            "fixture {}",
            record.entry.name
        );
    }
}

#[test]
fn bullet_list_text() {
    let doc = Document::from_blocks(vec![Block::bullet_list(vec![
        ListItem::new(vec![Inline::plain("x")]),
        ListItem::new(vec![Inline::plain("y")]),
    ])]);
    assert_eq!(plain_text_of(&doc, &PlainTextOptions::default()), "• x\n• y");
}

#[test]
fn blank_content_gives_placeholder() {
    let doc = Document::from_blocks(vec![Block::paragraph(vec![Inline::plain("  ")])]);
    assert_eq!(
        plain_text_of(&doc, &PlainTextOptions::default()),
        "No description available"
    );
    assert_eq!(
        plain_text_of(&doc, &PlainTextOptions::details()),
        "No details available"
    );
    let empty_legacy = r#"{"blocks": [], "entityMap": {}}"#;
    assert_eq!(
        plain_text(empty_legacy, &PlainTextOptions::default()),
        "No description available"
    );
}

#[test]
fn custom_placeholder_image() {
    let doc = parse_document(&load_fixture("tree_landing").input());
    let options = RenderOptions {
        placeholder_image: "/static/missing.png".to_owned(),
        ..RenderOptions::default()
    };
    assert!(render_html(&doc, &options).contains(r#"<img src="/static/missing.png" alt="Hero" />"#));
}

#[test]
fn indented_html_puts_blocks_on_lines() {
    let doc = Document::from_blocks(vec![
        Block::heading(1, vec![Inline::plain("T")]),
        Block::ordered_list(vec![ListItem::new(vec![
            Inline::plain("one"),
            Inline::plain("two").with_mark(Mark::underline()),
        ])]),
    ]);
    let options = RenderOptions {
        indent: "  ".to_owned(),
        ..RenderOptions::default()
    };
    assert_eq!(
        render_html(&doc, &options),
        "<h1>T</h1>\n<ol>\n  <li>one<u>two</u></li>\n</ol>"
    );
}

#[test]
fn tree_and_legacy_blank_lines_agree() {
    let tree = r#"{"type": "doc", "content": [
        {"type": "paragraph", "content": [{"type": "text", "text": "a"}]},
        {"type": "paragraph"},
        {"type": "paragraph", "content": [{"type": "text", "text": "b"}]}
    ]}"#;
    let legacy = r#"{"blocks": [{"type": "unstyled", "text": "a\n\nb"}], "entityMap": {}}"#;
    let options = PlainTextOptions::default();
    assert_eq!(plain_text(tree, &options), "a\n\nb");
    assert_eq!(plain_text(legacy, &options), plain_text(tree, &options));
}
