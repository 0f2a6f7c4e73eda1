use std::collections::HashMap;

use crate::selector::{AttrMatch, Combinator, Compound, Pseudo, SimpleSelector, parse_selector_list};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) value: String,
    pub(crate) checked: bool,
    pub(crate) disabled: bool,
}

/// Read-only view of a document, as the scope resolver sees it.
///
/// The resolver never mutates the tree; everything it needs is an attribute
/// read, an ancestor walk, or a selector query. Implementing this trait on a
/// host's own document representation is enough to drive the resolver without
/// this crate's built-in [`Document`].
pub trait DomQuery {
    fn root(&self) -> NodeId;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn tag_name(&self, node: NodeId) -> Option<&str>;
    fn attr(&self, node: NodeId, name: &str) -> Option<&str>;
    /// Current value of a form control (live value, not the value attribute).
    fn current_value(&self, node: NodeId) -> Option<String>;
    fn is_checked(&self, node: NodeId) -> bool;
    /// Element descendants of `root` in document order, excluding `root`.
    fn element_descendants(&self, root: NodeId) -> Vec<NodeId>;
    /// Elements under `root` matching a CSS selector, in document order.
    fn query_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>>;
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Document {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    pub fn from_html(html: &str) -> Result<Self> {
        crate::html::parse_document(html)
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let checked = attrs.contains_key("checked");
        let disabled = attrs.contains_key("disabled");
        let element = Element {
            tag_name,
            attrs,
            value,
            checked,
            disabled,
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            node_type: NodeType::Element(element),
        });
        self.nodes[parent.0].children.push(id);
        if let Some(id_attr) = self.element(id).and_then(|e| e.attrs.get("id").cloned()) {
            if !id_attr.is_empty() {
                self.id_index.insert(id_attr, id);
            }
        }
        id
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            node_type: NodeType::Text(text),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub fn text_content(&self, node_id: NodeId) -> String {
        match &self.nodes[node_id.0].node_type {
            NodeType::Document | NodeType::Element(_) => {
                let mut out = String::new();
                for child in &self.nodes[node_id.0].children {
                    out.push_str(&self.text_content(*child));
                }
                out
            }
            NodeType::Text(text) => text.clone(),
        }
    }

    /// Simulates a user edit on a form control. Host-side only; the scope
    /// resolver itself never writes to the tree.
    pub fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::InvalidNode("set_value target is not an element".into()))?;
        element.value = value.to_string();
        Ok(())
    }

    pub fn set_checked(&mut self, node_id: NodeId, checked: bool) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::InvalidNode("set_checked target is not an element".into()))?;
        element.checked = checked;
        Ok(())
    }

    pub(crate) fn seed_control_values(&mut self) {
        for idx in 0..self.nodes.len() {
            let id = NodeId(idx);
            let Some(tag) = self.element(id).map(|e| e.tag_name.clone()) else {
                continue;
            };
            if tag == "textarea" {
                let text = self.text_content(id);
                if let Some(element) = self.element_mut(id) {
                    element.value = text;
                }
            } else if tag == "select" {
                let value = self.select_option_value(id);
                if let Some(element) = self.element_mut(id) {
                    element.value = value;
                }
            }
        }
    }

    // Last selected option wins; with none selected the first option does.
    fn select_option_value(&self, select: NodeId) -> String {
        let options = self
            .collect_descendants(select)
            .into_iter()
            .filter(|id| self.tag_name_of(*id) == Some("option"))
            .collect::<Vec<_>>();
        let chosen = options
            .iter()
            .rev()
            .find(|id| {
                self.element(**id)
                    .is_some_and(|e| e.attrs.contains_key("selected"))
            })
            .or_else(|| options.first());
        match chosen {
            Some(option) => self
                .element(*option)
                .and_then(|e| e.attrs.get("value").cloned())
                .unwrap_or_else(|| self.text_content(*option).trim().to_string()),
            None => String::new(),
        }
    }

    fn tag_name_of(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    fn collect_descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for child in &self.nodes[root.0].children {
            self.collect_subtree(*child, &mut out);
        }
        out
    }

    fn collect_subtree(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        if matches!(self.nodes[node_id.0].node_type, NodeType::Element(_)) {
            out.push(node_id);
        }
        for child in &self.nodes[node_id.0].children {
            self.collect_subtree(*child, out);
        }
    }

    fn previous_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[node_id.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|id| *id == node_id)?;
        siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|id| self.element(*id).is_some())
    }

    fn element_children(&self, node_id: NodeId) -> Vec<NodeId> {
        self.nodes[node_id.0]
            .children
            .iter()
            .copied()
            .filter(|id| self.element(*id).is_some())
            .collect()
    }

    fn matches_chain(&self, node_id: NodeId, chain: &[Compound]) -> bool {
        let Some(last) = chain.last() else {
            return false;
        };
        if !self.matches_simple(node_id, &last.simple) {
            return false;
        }

        let mut current = node_id;
        for idx in (1..chain.len()).rev() {
            let left = &chain[idx - 1].simple;
            let combinator = chain[idx].combinator.unwrap_or(Combinator::Descendant);

            let matched = match combinator {
                Combinator::Child => self
                    .nodes[current.0]
                    .parent
                    .filter(|parent| self.matches_simple(*parent, left)),
                Combinator::Descendant => {
                    let mut cursor = self.nodes[current.0].parent;
                    let mut found = None;
                    while let Some(parent) = cursor {
                        if self.matches_simple(parent, left) {
                            found = Some(parent);
                            break;
                        }
                        cursor = self.nodes[parent.0].parent;
                    }
                    found
                }
                Combinator::AdjacentSibling => self
                    .previous_element_sibling(current)
                    .filter(|sibling| self.matches_simple(*sibling, left)),
                Combinator::GeneralSibling => {
                    let mut cursor = self.previous_element_sibling(current);
                    let mut found = None;
                    while let Some(sibling) = cursor {
                        if self.matches_simple(sibling, left) {
                            found = Some(sibling);
                            break;
                        }
                        cursor = self.previous_element_sibling(sibling);
                    }
                    found
                }
            };

            let Some(matched) = matched else {
                return false;
            };
            current = matched;
        }
        true
    }

    fn matches_simple(&self, node_id: NodeId, simple: &SimpleSelector) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };

        if let Some(tag) = &simple.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if let Some(id) = &simple.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }

        let class_attr = element.attrs.get("class").map(String::as_str);
        if simple
            .classes
            .iter()
            .any(|class_name| !has_class_token(class_attr, class_name))
        {
            return false;
        }

        for cond in &simple.attrs {
            let matched = match cond {
                AttrMatch::Exists { key } => element.attrs.contains_key(key),
                AttrMatch::Eq { key, value } => element.attrs.get(key) == Some(value),
                AttrMatch::Includes { key, value } => element
                    .attrs
                    .get(key)
                    .is_some_and(|attr| attr.split_ascii_whitespace().any(|token| token == value)),
                AttrMatch::StartsWith { key, value } => element
                    .attrs
                    .get(key)
                    .is_some_and(|attr| !value.is_empty() && attr.starts_with(value)),
                AttrMatch::EndsWith { key, value } => element
                    .attrs
                    .get(key)
                    .is_some_and(|attr| !value.is_empty() && attr.ends_with(value)),
                AttrMatch::Contains { key, value } => element
                    .attrs
                    .get(key)
                    .is_some_and(|attr| !value.is_empty() && attr.contains(value)),
            };
            if !matched {
                return false;
            }
        }

        for pseudo in &simple.pseudos {
            let matched = match pseudo {
                Pseudo::Checked => element.checked,
                Pseudo::Disabled => element.disabled,
                Pseudo::Enabled => !element.disabled,
                Pseudo::FirstChild => self.nodes[node_id.0]
                    .parent
                    .is_some_and(|p| self.element_children(p).first() == Some(&node_id)),
                Pseudo::LastChild => self.nodes[node_id.0]
                    .parent
                    .is_some_and(|p| self.element_children(p).last() == Some(&node_id)),
                Pseudo::Not(groups) => !groups
                    .iter()
                    .any(|chain| self.matches_chain(node_id, chain)),
            };
            if !matched {
                return false;
            }
        }

        true
    }
}

impl DomQuery for Document {
    fn root(&self) -> NodeId {
        self.root
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.tag_name_of(node)
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attrs.get(name).map(String::as_str)
    }

    fn current_value(&self, node: NodeId) -> Option<String> {
        self.element(node).map(|e| e.value.clone())
    }

    fn is_checked(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.checked)
    }

    fn element_descendants(&self, root: NodeId) -> Vec<NodeId> {
        self.collect_descendants(root)
    }

    fn query_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_list(selector)?;
        Ok(self
            .collect_descendants(root)
            .into_iter()
            .filter(|candidate| {
                groups
                    .iter()
                    .any(|chain| self.matches_chain(*candidate, chain))
            })
            .collect())
    }
}

fn has_class_token(class_attr: Option<&str>, class_name: &str) -> bool {
    class_attr.is_some_and(|attr| {
        attr.split_ascii_whitespace()
            .any(|token| token == class_name)
    })
}
