use std::cell::RefCell;
use std::rc::Rc;

use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

fn html_name(tag: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag))
}

fn attr_name(name: &str) -> QualName {
    QualName::new(None, Namespace::from(""), LocalName::from(name))
}

/// Tag name of an element node, `None` for every other node kind.
pub fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn is_element(node: &Handle, tag: &str) -> bool {
    tag_name(node) == Some(tag)
}

/// Value of the attribute `name`, if the node is an element carrying it.
pub fn attr(node: &Handle, name: &str) -> Option<String> {
    let NodeData::Element { attrs, .. } = &node.data else {
        return None;
    };
    attrs
        .borrow()
        .iter()
        .find(|attr| &*attr.name.local == name)
        .map(|attr| attr.value.to_string())
}

/// Overwrite an existing attribute in place, keeping its position.
///
/// Returns `false` when the node is not an element or lacks the attribute.
pub fn set_attr(node: &Handle, name: &str, value: &str) -> bool {
    let NodeData::Element { attrs, .. } = &node.data else {
        return false;
    };
    let mut attrs = attrs.borrow_mut();
    match attrs.iter_mut().find(|attr| &*attr.name.local == name) {
        Some(attr) => {
            attr.value = StrTendril::from_slice(value);
            true
        }
        None => false,
    }
}

/// Build a detached HTML element with attributes in the given order.
pub fn new_element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    let attrs = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: attr_name(name),
            value: StrTendril::from_slice(value),
        })
        .collect();

    Node::new(NodeData::Element {
        name: html_name(tag),
        attrs: RefCell::new(attrs),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

/// Build a detached text node.
pub fn new_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from_slice(text)),
    })
}

/// Payload of a text node.
pub fn text(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// Concatenated text of the node and all its descendants.
pub fn text_content(node: &Handle) -> String {
    let mut buffer = String::new();
    collect_text(node, &mut buffer);
    buffer
}

fn collect_text(node: &Handle, buffer: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        buffer.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, buffer);
    }
}

pub fn parent(node: &Handle) -> Option<Handle> {
    // Cell<Option<Weak>> is not Copy: take, upgrade, put back
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|weak| weak.upgrade());
    node.parent.set(weak);
    parent
}

/// Snapshot of a node's children, safe to hold while the child list mutates.
pub fn children(node: &Handle) -> Vec<Handle> {
    node.children.borrow().clone()
}

/// First direct child satisfying `predicate`.
pub fn find_child(node: &Handle, predicate: impl Fn(&Handle) -> bool) -> Option<Handle> {
    node.children
        .borrow()
        .iter()
        .find(|child| predicate(child))
        .cloned()
}

/// First descendant (pre-order, excluding `node` itself) satisfying `predicate`.
pub fn find_descendant(node: &Handle, predicate: &dyn Fn(&Handle) -> bool) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if predicate(child) {
            return Some(child.clone());
        }
        if let Some(found) = find_descendant(child, predicate) {
            return Some(found);
        }
    }
    None
}

/// All element descendants in pre-order, `node` included when it is an element.
pub fn elements_preorder(node: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    push_elements(node, &mut out);
    out
}

fn push_elements(node: &Handle, out: &mut Vec<Handle>) {
    if matches!(node.data, NodeData::Element { .. }) {
        out.push(node.clone());
    }
    for child in node.children.borrow().iter() {
        push_elements(child, out);
    }
}

/// Remove `child` from `parent`'s child list and clear its parent link.
///
/// Returns `false` if `child` is not a child of `parent`.
pub fn remove_child(parent: &Handle, child: &Handle) -> bool {
    let mut children = parent.children.borrow_mut();
    let Some(index) = children.iter().position(|c| Rc::ptr_eq(c, child)) else {
        return false;
    };
    children.remove(index);
    child.parent.set(None);
    true
}

/// Unlink a node from whatever parent currently owns it.
pub fn detach(node: &Handle) {
    if let Some(parent) = parent(node) {
        remove_child(&parent, node);
    }
}

/// Append `child` as the last child of `parent`, detaching it first.
pub fn append_child(parent: &Handle, child: Handle) {
    detach(&child);
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Insert `new_child` immediately before `reference` among `parent`'s
/// children, detaching it from any previous parent first.
///
/// Returns `false` (and leaves `new_child` detached) if `reference` is not a
/// child of `parent`.
pub fn insert_before(parent: &Handle, new_child: Handle, reference: &Handle) -> bool {
    detach(&new_child);
    let mut children = parent.children.borrow_mut();
    let Some(index) = children.iter().position(|c| Rc::ptr_eq(c, reference)) else {
        return false;
    };
    new_child.parent.set(Some(Rc::downgrade(parent)));
    children.insert(index, new_child);
    true
}

/// Put `replacement` where `old` was and discard `old`.
pub fn replace_child(parent: &Handle, old: &Handle, replacement: Handle) -> bool {
    insert_before(parent, replacement, old) && remove_child(parent, old)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn body(doc: &Document) -> Handle {
        elements_preorder(doc.root())
            .into_iter()
            .find(|n| is_element(n, "body"))
            .unwrap()
    }

    #[test]
    fn test_insert_before_sets_single_parent() {
        let doc = Document::parse("<p>one</p><p>two</p>");
        let body = body(&doc);
        let second = children(&body)[1].clone();

        let hr = new_element("hr", &[]);
        assert!(insert_before(&body, hr.clone(), &second));
        assert!(Rc::ptr_eq(&parent(&hr).unwrap(), &body));
        assert_eq!(children(&body).len(), 3);

        // Moving the node re-parents it instead of sharing it
        let first = children(&body)[0].clone();
        append_child(&first, hr.clone());
        assert_eq!(children(&body).len(), 2);
        assert!(Rc::ptr_eq(&parent(&hr).unwrap(), &first));
    }

    #[test]
    fn test_remove_child_clears_parent() {
        let doc = Document::parse("<p>one</p>");
        let body = body(&doc);
        let p = children(&body)[0].clone();
        assert!(remove_child(&body, &p));
        assert!(parent(&p).is_none());
        assert!(!remove_child(&body, &p));
    }

    #[test]
    fn test_set_attr_keeps_order() {
        let doc = Document::parse(r#"<a class="x" href="/a" id="y">t</a>"#);
        let a = elements_preorder(doc.root())
            .into_iter()
            .find(|n| is_element(n, "a"))
            .unwrap();
        assert!(set_attr(&a, "href", "/b"));
        assert!(!set_attr(&a, "title", "nope"));
        let html = doc.to_html().unwrap();
        assert!(html.contains(r#"<a class="x" href="/b" id="y">t</a>"#));
    }

    #[test]
    fn test_text_content_recurses() {
        let doc = Document::parse("<p>a<b>b<i>c</i></b>d</p>");
        let p = elements_preorder(doc.root())
            .into_iter()
            .find(|n| is_element(n, "p"))
            .unwrap();
        assert_eq!(text_content(&p), "abcd");
    }
}
