//! # XML Element Tree
//!
//! A small owned element tree used to assemble the output feed. Feeds are
//! built from typed values and rendered once at the end of a run, so the
//! tree only needs elements, attributes, and text.
//!
//! Names are kept as written, prefix included (`dc:language`). Namespace
//! declarations are ordinary `xmlns` / `xmlns:<prefix>` attributes on the
//! element that declares them, which lets importers drop declarations from
//! one element without touching its descendants.
//!
//! Both directions go through `xot`:
//!
//! - [`parse_document`] parses with `xot` and copies the document element
//!   into this tree. Comments and processing instructions are dropped.
//! - [`Element::to_pretty_string`] resolves every prefix against the
//!   declarations in scope, builds a `xot` document, and serializes it with
//!   an XML declaration and two-space indentation. Whitespace-only text in
//!   element-only content is formatting and is not carried over; mixed
//!   content is rendered inline as written. Lines that end up blank are
//!   removed.

use std::collections::HashMap;

use xot::output::xml::{Declaration, Parameters};
use xot::output::Indentation;
use xot::{NameId, NamespaceId, Value, Xot};

/// Namespace URI of the Atom syndication format.
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// A node in an element's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// An element containing a single text node.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Element::new(name);
        element.children.push(Node::Text(text.into()));
        element
    }

    /// Builder-style attribute setter. Replaces an existing value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child append.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The part of the name after any namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Child elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// The first child element with the given local name.
    pub fn find(&self, local_name: &str) -> Option<&Element> {
        self.elements().find(|e| e.local_name() == local_name)
    }

    /// The first element with the given local name, this one included,
    /// in document order.
    pub fn find_descendant(&self, local_name: &str) -> Option<&Element> {
        if self.local_name() == local_name {
            return Some(self);
        }
        self.elements()
            .find_map(|child| child.find_descendant(local_name))
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Render this element as a pretty-printed XML document.
    ///
    /// Fails when a prefixed name has no declaration in scope.
    pub fn to_pretty_string(&self) -> Result<String, String> {
        let mut xot = Xot::new();
        let root = build(&mut xot, self, &Scope::new())?;
        let document = xot
            .new_document_with_element(root)
            .map_err(|e| e.to_string())?;
        let parameters = Parameters {
            indentation: Some(Indentation::default()),
            declaration: Some(Declaration {
                encoding: Some("UTF-8".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let xml = xot
            .serialize_xml_string(parameters, document)
            .map_err(|e| e.to_string())?;
        Ok(strip_blank_lines(&xml))
    }

    /// Whether any direct text child carries more than whitespace.
    fn has_mixed_content(&self) -> bool {
        self.children.iter().any(|node| match node {
            Node::Text(text) => !text.trim().is_empty(),
            Node::Element(_) => false,
        })
    }
}

/// Drop lines that contain only whitespace.
pub fn strip_blank_lines(text: &str) -> String {
    let mut out = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

/// Prefix to namespace URI; the empty prefix is the default namespace.
type Scope = HashMap<String, String>;

/// The prefix an attribute name declares, if it is a namespace declaration.
fn declared_prefix(name: &str) -> Option<&str> {
    if name == "xmlns" {
        Some("")
    } else {
        name.strip_prefix("xmlns:")
    }
}

fn build(xot: &mut Xot, element: &Element, inherited: &Scope) -> Result<xot::Node, String> {
    let mut scope = inherited.clone();
    for (name, value) in &element.attributes {
        if let Some(prefix) = declared_prefix(name) {
            scope.insert(prefix.to_string(), value.clone());
        }
    }

    let name = resolve(xot, &scope, &element.name, true)?;
    let node = xot.new_element(name);
    for (name, value) in &element.attributes {
        match declared_prefix(name) {
            Some(prefix) => {
                let prefix = if prefix.is_empty() {
                    xot.empty_prefix()
                } else {
                    xot.add_prefix(prefix)
                };
                let namespace = namespace_id(xot, value);
                xot.namespaces_mut(node).insert(prefix, namespace);
            }
            None => {
                let name = resolve(xot, &scope, name, false)?;
                xot.attributes_mut(node).insert(name, value.clone());
            }
        }
    }

    let mixed = element.has_mixed_content();
    for child in &element.children {
        match child {
            Node::Element(child) => {
                let child = build(xot, child, &scope)?;
                xot.append(node, child).map_err(|e| e.to_string())?;
            }
            Node::Text(text) if !mixed && text.trim().is_empty() => {}
            Node::Text(text) => xot.append_text(node, text).map_err(|e| e.to_string())?,
        }
    }
    Ok(node)
}

fn namespace_id(xot: &mut Xot, uri: &str) -> NamespaceId {
    if uri.is_empty() {
        xot.no_namespace()
    } else {
        xot.add_namespace(uri)
    }
}

/// Resolve a written name against `scope`.
///
/// Unprefixed element names take the default namespace; unprefixed
/// attribute names are in no namespace. `xml:` is always bound.
fn resolve(
    xot: &mut Xot,
    scope: &Scope,
    qualified: &str,
    element: bool,
) -> Result<NameId, String> {
    let (prefix, local) = qualified.split_once(':').unwrap_or(("", qualified));
    if prefix == "xml" {
        let namespace = xot.xml_namespace();
        return Ok(xot.add_name_ns(local, namespace));
    }
    if prefix.is_empty() && !element {
        return Ok(xot.add_name(local));
    }
    let uri = match scope.get(prefix) {
        Some(uri) => uri.as_str(),
        None if prefix.is_empty() => "",
        None => {
            return Err(format!(
                "namespace prefix '{}' of <{}> is not declared",
                prefix, qualified
            ))
        }
    };
    let namespace = namespace_id(xot, uri);
    Ok(xot.add_name_ns(local, namespace))
}

/// Parse `text` and return its document element as an owned tree.
///
/// The error string is the parser's own description of the problem.
pub fn parse_document(text: &str) -> Result<Element, String> {
    let mut xot = Xot::new();
    let document = xot.parse(text).map_err(|e| e.to_string())?;
    let root = xot
        .children(document)
        .filter_map(|node| convert(&xot, node))
        .find_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
        .ok_or_else(|| "document has no root element".to_string());
    root
}

fn convert(xot: &Xot, node: xot::Node) -> Option<Node> {
    match xot.value(node) {
        Value::Element(element) => {
            let mut out = Element::new(qualified_name(xot, node, element.name()));
            for (prefix, namespace) in xot.namespaces(node).iter() {
                let prefix = xot.prefix_str(prefix);
                let name = if prefix.is_empty() {
                    "xmlns".to_string()
                } else {
                    format!("xmlns:{}", prefix)
                };
                out.attributes
                    .push((name, xot.namespace_str(*namespace).to_string()));
            }
            for (name, value) in xot.attributes(node).iter() {
                out.attributes.push((
                    qualified_name(xot, node, name.to_owned()),
                    value.to_string(),
                ));
            }
            out.children = xot
                .children(node)
                .filter_map(|child| convert(xot, child))
                .collect();
            Some(Node::Element(out))
        }
        Value::Text(text) => Some(Node::Text(text.get().to_string())),
        _ => None,
    }
}

/// Name as written in the source. Atom and unqualified names stay bare so
/// they resolve against the output feed's default namespace; `xml:` names
/// keep their prefix; other names keep the prefix in scope at `node`.
fn qualified_name(xot: &Xot, node: xot::Node, name: NameId) -> String {
    let (local, uri) = xot.name_ns_str(name);
    if uri.is_empty() || uri == ATOM_NAMESPACE {
        return local.to_string();
    }
    let namespace = xot.namespace_for_name(name);
    if namespace == xot.xml_namespace() {
        return format!("xml:{}", local);
    }
    match xot.prefix_for_namespace(node, namespace) {
        Some(prefix) if !xot.prefix_str(prefix).is_empty() => {
            format!("{}:{}", xot.prefix_str(prefix), local)
        }
        _ => local.to_string(),
    }
}
