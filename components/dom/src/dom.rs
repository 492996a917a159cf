use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Possibly prefixed name of an attribute (`xlink:href`).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct QName {
    prefix: Option<String>,
    local: String,
}

impl QName {
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: local.into(),
        }
    }

    /// Splits at the first colon. A leading or trailing colon does not
    /// count as a prefix separator.
    pub fn parse(qualified: &str) -> Self {
        match qualified.split_once(':') {
            Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {
                Self::with_prefix(prefix, local)
            }
            _ => Self::new(qualified),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local
    }

    pub fn qualified(&self) -> Cow<'_, str> {
        match &self.prefix {
            Some(prefix) => Cow::Owned(format!("{}:{}", prefix, self.local)),
            None => Cow::Borrowed(&self.local),
        }
    }

    pub fn matches(&self, qualified: &str) -> bool {
        match &self.prefix {
            Some(prefix) => {
                qualified.split_once(':') == Some((prefix.as_str(), self.local.as_str()))
            }
            None => qualified == self.local,
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{}:", prefix)?;
        }
        f.write_str(&self.local)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // attributes

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, qualified: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.matches(qualified))
            .map(|attr| attr.value.as_str())
    }

    pub fn has_attribute(&self, qualified: &str) -> bool {
        self.attribute(qualified).is_some()
    }

    /// Replaces the value of an existing attribute in place or appends a
    /// new one, so insertion order is kept.
    pub fn set_attribute(&mut self, qualified: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|attr| attr.name.matches(qualified))
        {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: QName::parse(qualified),
                value,
            }),
        }
    }

    pub fn remove_attribute(&mut self, qualified: &str) -> Option<String> {
        let pos = self
            .attributes
            .iter()
            .position(|attr| attr.name.matches(qualified))?;
        Some(self.attributes.remove(pos).value)
    }

    pub fn attributes_mut(&mut self) -> &mut [Attribute] {
        &mut self.attributes
    }

    pub fn remove_attribute_at(&mut self, index: usize) -> Attribute {
        self.attributes.remove(index)
    }

    pub fn push_attribute(&mut self, name: QName, value: impl Into<String>) {
        self.attributes.push(Attribute {
            name,
            value: value.into(),
        });
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum NodeKind {
    Document,
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction { target: String, data: String },
}

impl NodeKind {
    pub fn is_element(&self) -> bool {
        matches!(self, NodeKind::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, NodeKind::Text(_))
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena owning every node of one tree.
///
/// Removing a node only detaches it; its slot stays allocated until the
/// document is dropped. A node has at most one parent and the mutation
/// methods refuse to build cycles.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: vec![],
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// First element child of the document node.
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.root())
            .iter()
            .copied()
            .find(|&id| self.kind(id).is_element())
    }

    // access

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id) {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.kind_mut(id) {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Whether `id` is reachable from the document node.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root() {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        if ancestor != id && self.children(ancestor).is_empty() {
            return false;
        }
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Number of nodes below `id`, not counting `id` itself.
    pub fn descendant_count(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend_from_slice(self.children(node));
        }
        count
    }

    /// Concatenated text and CDATA content of the subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            match self.kind(node) {
                NodeKind::Text(value) | NodeKind::CData(value) => text.push_str(value),
                _ => stack.extend(self.children(node).iter().rev()),
            }
        }
        text
    }

    // create

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: vec![],
        });
        id
    }

    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.push(NodeKind::Element(element))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    pub fn create_cdata(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::CData(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Comment(text.into()))
    }

    pub fn create_processing_instruction(
        &mut self,
        target: impl Into<String>,
        data: impl Into<String>,
    ) -> NodeId {
        self.push(NodeKind::ProcessingInstruction {
            target: target.into(),
            data: data.into(),
        })
    }

    // manipulators

    /// Detaches `id` from its parent. Returns `false` if it had none.
    pub fn remove(&mut self, id: NodeId) -> bool {
        match self.nodes[id.0].parent.take() {
            Some(parent) => {
                self.nodes[parent.0].children.retain(|&child| child != id);
                true
            }
            None => false,
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.is_ancestor_or_self(child, parent) {
            log::warn!("refusing to append {:?} below its own descendant", child);
            return false;
        }
        self.remove(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        true
    }

    /// Inserts `new` as the sibling directly before `reference`.
    ///
    /// Fails if `reference` is detached or if `new` is an ancestor of
    /// (or equal to) `reference`.
    pub fn insert_before(&mut self, new: NodeId, reference: NodeId) -> bool {
        let parent = match self.parent(reference) {
            Some(parent) => parent,
            None => return false,
        };
        if self.is_ancestor_or_self(new, reference) {
            log::warn!("refusing to insert {:?} before its own descendant", new);
            return false;
        }
        self.remove(new);
        let siblings = &mut self.nodes[parent.0].children;
        let pos = siblings
            .iter()
            .position(|&child| child == reference)
            .unwrap_or(siblings.len());
        siblings.insert(pos, new);
        self.nodes[new.0].parent = Some(parent);
        true
    }

    /// Copies the subtree rooted at `id`. The copy is detached.
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let kind = self.kind(id).clone();
        let copy = self.push(kind);
        let mut stack = vec![(id, copy)];
        while let Some((original, cloned)) = stack.pop() {
            for child in self.children(original).to_vec() {
                let kind = self.kind(child).clone();
                let child_copy = self.push(kind);
                self.nodes[child_copy.0].parent = Some(cloned);
                self.nodes[cloned.0].children.push(child_copy);
                stack.push((child, child_copy));
            }
        }
        copy
    }
}
