use richdoc_json_ml::{to_html, JsonMlElement, JsonMlNode};

use crate::config::RenderOptions;
use crate::document::{Block, Document, Inline, List, ListItem, Mark};

/// Renders a document as a JsonML fragment with one element per block.
///
/// Raw nodes, empty text runs and images nested in list items render as
/// nothing.
pub fn render(doc: &Document, options: &RenderOptions) -> JsonMlNode {
    JsonMlElement::fragment()
        .children(doc.blocks().map(|block| render_block(block, options)))
        .into()
}

/// Renders a document straight to HTML.
pub fn render_html(doc: &Document, options: &RenderOptions) -> String {
    to_html(&render(doc, options), &options.indent, "")
}

fn render_block(block: &Block, options: &RenderOptions) -> JsonMlNode {
    match block {
        Block::Paragraph(p) => JsonMlElement::new("p")
            .children(render_inlines(p.inlines(), options))
            .into(),
        Block::Heading(h) => JsonMlElement::new(format!("h{}", h.level()))
            .children(render_inlines(h.inlines(), options))
            .into(),
        Block::BulletList(list) => render_list(JsonMlElement::new("ul"), list, options),
        Block::OrderedList(list) => {
            let mut ol = JsonMlElement::new("ol");
            if list.start() != 1 {
                ol = ol.attr("start", list.start().to_string());
            }
            render_list(ol, list, options)
        }
        Block::Image(img) => {
            let src = if img.src().is_empty() {
                options.placeholder_image.as_str()
            } else {
                img.src()
            };
            let mut el = JsonMlElement::new("img").attr("src", src);
            if let Some(alt) = img.alt() {
                el = el.attr("alt", alt);
            }
            el.into()
        }
    }
}

fn render_list(el: JsonMlElement, list: &List, options: &RenderOptions) -> JsonMlNode {
    el.children(list.items().map(|item| render_item(item, options)))
        .into()
}

fn render_item(item: &ListItem, options: &RenderOptions) -> JsonMlNode {
    let mut li = JsonMlElement::new("li");
    let mut after_text = false;
    for block in item.blocks() {
        match block {
            Block::Paragraph(p) => {
                if after_text {
                    li = li.child(JsonMlElement::new("br").into());
                }
                li = li.children(render_inlines(p.inlines(), options));
                after_text = true;
            }
            Block::Heading(h) => {
                if after_text {
                    li = li.child(JsonMlElement::new("br").into());
                }
                li = li.children(render_inlines(h.inlines(), options));
                after_text = true;
            }
            Block::BulletList(_) | Block::OrderedList(_) => {
                li = li.child(render_block(block, options));
                after_text = false;
            }
            Block::Image(_) => {}
        }
    }
    li.into()
}

fn render_inlines<'a>(
    inlines: impl Iterator<Item = &'a Inline> + 'a,
    options: &'a RenderOptions,
) -> impl Iterator<Item = JsonMlNode> + 'a {
    inlines.filter_map(move |inline| render_inline(inline, options))
}

fn render_inline(inline: &Inline, options: &RenderOptions) -> Option<JsonMlNode> {
    match inline {
        Inline::HardBreak(_) => Some(JsonMlElement::new("br").into()),
        Inline::Text(run) if run.text.is_empty() => None,
        Inline::Text(run) => Some(
            inline
                .effective_marks()
                .into_iter()
                .fold(JsonMlNode::text(run.text.as_str()), |node, mark| {
                    wrap(mark, node, options)
                }),
        ),
    }
}

/// Wraps `node` in the element for `mark`; the first mark applied ends up
/// innermost.
fn wrap(mark: &Mark, node: JsonMlNode, options: &RenderOptions) -> JsonMlNode {
    let el = match mark {
        Mark::Bold(_) => JsonMlElement::new("strong"),
        Mark::Italic(_) => JsonMlElement::new("em"),
        Mark::Underline(_) => JsonMlElement::new("u"),
        Mark::Link(link) => match link.href() {
            Some(href) if !href.is_empty() => JsonMlElement::new("a")
                .attr("href", href)
                .attr("target", options.link_target.as_str())
                .attr("rel", options.link_rel.as_str()),
            _ => return node,
        },
    };
    el.child(node).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn html(doc: &Document) -> String {
        render_html(doc, &RenderOptions::default())
    }

    #[test]
    fn paragraph_with_link() {
        let doc = Document::from_blocks(vec![Block::paragraph(vec![
            Inline::plain("see "),
            Inline::linked("docs", "http://z"),
            Inline::plain(" here"),
        ])]);
        assert_eq!(
            html(&doc),
            r#"<p>see <a href="http://z" target="_blank" rel="noopener noreferrer">docs</a> here</p>"#
        );
    }

    #[test]
    fn first_mark_is_innermost() {
        let doc = Document::from_blocks(vec![Block::paragraph(vec![Inline::plain("x")
            .with_mark(Mark::bold())
            .with_mark(Mark::italic())
            .with_mark(Mark::bold())])]);
        assert_eq!(html(&doc), "<p><em><strong>x</strong></em></p>");
    }

    #[test]
    fn heading_and_empty_paragraph() {
        let doc = Document::from_blocks(vec![
            Block::heading(3, vec![Inline::plain("Title")]),
            Block::paragraph(vec![]),
        ]);
        assert_eq!(html(&doc), "<h3>Title</h3><p></p>");
    }

    #[test]
    fn lists_render_one_item_per_list_item() {
        let doc = Document::from_blocks(vec![
            Block::bullet_list(vec![
                ListItem::new(vec![Inline::plain("x")]),
                ListItem::new(vec![Inline::plain("y")]),
            ]),
            Block::ordered_list(vec![ListItem::new(vec![Inline::plain("z")])]),
        ]);
        assert_eq!(html(&doc), "<ul><li>x</li><li>y</li></ul><ol><li>z</li></ol>");
    }

    #[test]
    fn ordered_list_start_attribute() {
        let doc: Document = serde_json::from_value(json!({"type": "doc", "content": [
            {"type": "orderedList", "attrs": {"start": 4}, "content": [
                {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "d"}]}]}
            ]}
        ]}))
        .unwrap();
        assert_eq!(html(&doc), r#"<ol start="4"><li>d</li></ol>"#);
    }

    #[test]
    fn image_falls_back_to_placeholder() {
        let doc = Document::from_blocks(vec![
            Block::image("", None),
            Block::image("http://x/y.png", Some("logo".into())),
        ]);
        let options = RenderOptions {
            placeholder_image: "/missing.png".into(),
            ..RenderOptions::default()
        };
        assert_eq!(
            render_html(&doc, &options),
            r#"<img src="/missing.png" /><img src="http://x/y.png" alt="logo" />"#
        );
    }

    #[test]
    fn editor_default_attrs_render() {
        let doc: Document = serde_json::from_value(json!({"type": "doc", "content": [
            {"type": "image", "attrs": {"src": "a.png", "alt": null, "title": null}},
            {"type": "paragraph", "id": "p1", "content": [
                {"type": "text", "text": "x", "marks": [{"type": "link"}]}
            ]}
        ]}))
        .unwrap();
        assert_eq!(html(&doc), r#"<img src="a.png" /><p>x</p>"#);
    }

    #[test]
    fn raw_nodes_and_empty_text_render_nothing() {
        let doc: Document = serde_json::from_value(json!({"type": "doc", "content": [
            {"type": "table"},
            {"type": "paragraph", "content": [
                {"type": "text", "text": ""},
                {"type": "emoji", "attrs": {"name": "x"}},
                {"type": "text", "text": "a", "marks": [{"type": "strike"}]}
            ]}
        ]}))
        .unwrap();
        assert_eq!(html(&doc), "<p>a</p>");
    }

    #[test]
    fn hard_break_and_escaping() {
        let doc = Document::from_blocks(vec![Block::paragraph(vec![
            Inline::plain("a < b"),
            Inline::hard_break(),
            Inline::plain("c & d"),
        ])]);
        assert_eq!(html(&doc), "<p>a &lt; b<br />c &amp; d</p>");
    }

    #[test]
    fn display_tree_json_form() {
        let doc = Document::from_blocks(vec![Block::paragraph(vec![
            Inline::plain("b").with_mark(Mark::underline()),
        ])]);
        assert_eq!(
            render(&doc, &RenderOptions::default()).to_json(),
            json!(["", null, ["p", null, ["u", null, "b"]]])
        );
    }

    #[test]
    fn every_link_gets_target_and_rel() {
        let doc = Document::from_blocks(vec![
            Block::paragraph(vec![Inline::linked("a", "http://a")]),
            Block::bullet_list(vec![ListItem::new(vec![
                Inline::linked("b", "http://b").with_mark(Mark::bold()),
            ])]),
        ]);
        let tree = render(&doc, &RenderOptions::default());
        let links: Vec<&JsonMlElement> = richdoc_json_ml::walk(&tree)
            .filter_map(|node| match node {
                JsonMlNode::Element(el) if el.tag.name() == "a" => Some(el),
                _ => None,
            })
            .collect();
        assert_eq!(links.len(), 2);
        for link in links {
            assert_eq!(link.get_attr("target"), Some("_blank"));
            assert_eq!(link.get_attr("rel"), Some("noopener noreferrer"));
        }
        assert_eq!(tree.text_content(), "ab");
    }

    #[test]
    fn indented_output() {
        let doc = Document::from_blocks(vec![Block::bullet_list(vec![ListItem::new(vec![
            Inline::plain("x"),
        ])])]);
        let options = RenderOptions {
            indent: "  ".into(),
            ..RenderOptions::default()
        };
        assert_eq!(render_html(&doc, &options), "<ul>\n  <li>x</li>\n</ul>");
    }
}
