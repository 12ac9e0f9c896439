use kuchiki::traits::TendrilSink;
use kuchiki::{NodeData, NodeRef};

use crate::app::domain::page::PageSegment;
use crate::app::services::page_split::{self, DocumentTree};

/// Class the editor puts on page-break nodes.
pub const PAGE_BREAK_CLASS: &str = "page-break-node";

/// Editor HTML parsed into a `kuchiki` tree; the `<body>` is the document root.
pub struct HtmlTree {
    body: NodeRef,
}

impl HtmlTree {
    pub fn parse(html: &str) -> Self {
        let document = kuchiki::parse_html().one(html);
        let body = match document.select_first("body") {
            Ok(body) => body.as_node().clone(),
            // html5ever always synthesizes a body; keep an empty one otherwise.
            Err(()) => NodeRef::new_document(),
        };
        Self { body }
    }

    pub fn text_contents(&self) -> String {
        self.body.text_contents()
    }

    pub fn body(&self) -> &NodeRef {
        &self.body
    }
}

/// Split editor HTML into page segments.
pub fn split_markup(html: &str) -> Vec<PageSegment> {
    page_split::split(&HtmlTree::parse(html))
}

/// True for `<hr>` elements and anything tagged with the page-break class.
pub fn is_page_break_node(node: &NodeRef) -> bool {
    let Some(element) = node.as_element() else {
        return false;
    };
    if element.name.local.as_ref().eq_ignore_ascii_case("hr") {
        return true;
    }
    let attrs = element.attributes.borrow();
    attrs
        .get("class")
        .map(|classes| classes.split_ascii_whitespace().any(|c| c == PAGE_BREAK_CLASS))
        .unwrap_or(false)
}

fn shallow_copy(node: &NodeRef) -> Option<NodeRef> {
    match node.data() {
        NodeData::Element(element) => Some(NodeRef::new_element(
            element.name.clone(),
            element.attributes.borrow().map.clone(),
        )),
        NodeData::Text(text) => Some(NodeRef::new_text(text.borrow().clone())),
        NodeData::Comment(text) => Some(NodeRef::new_comment(text.borrow().clone())),
        NodeData::Document(_) | NodeData::DocumentFragment => Some(NodeRef::new_document()),
        NodeData::Doctype(_) | NodeData::ProcessingInstruction(_) => None,
    }
}

impl DocumentTree for HtmlTree {
    type Node = NodeRef;

    fn root(&self) -> NodeRef {
        self.body.clone()
    }

    fn children(&self, node: &NodeRef) -> Vec<NodeRef> {
        node.children().collect()
    }

    fn is_page_break(&self, node: &NodeRef) -> bool {
        is_page_break_node(node)
    }

    fn shallow_clone(&self, node: &NodeRef) -> NodeRef {
        shallow_copy(node).unwrap_or_else(NodeRef::new_document)
    }

    fn deep_clone(&self, node: &NodeRef) -> NodeRef {
        let copy = self.shallow_clone(node);
        for child in node.children() {
            copy.append(self.deep_clone(&child));
        }
        copy
    }

    fn append_child(&self, parent: &NodeRef, child: NodeRef) {
        parent.append(child);
    }

    fn serialize(&self, nodes: &[NodeRef]) -> String {
        // Appending to a holder would detach source nodes; serialize each in place.
        nodes.iter().map(|node| node.to_string()).collect()
    }
}
