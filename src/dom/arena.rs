//! Arena-based document tree for documentation pages.
//!
//! Both loaders (strict XML and lenient HTML) build into the same arena, so
//! the extractors see one tree shape regardless of how a page was parsed.
//! Parent/child/sibling links are indices into a single node vector.

use html5ever::{LocalName, QualName};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }

    fn to_option(self) -> Option<NodeId> {
        self.is_some().then_some(self)
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    Element { name: QualName, attrs: Vec<Attribute> },
    /// Character data. Adjacent text is always merged into one node.
    Text(String),
    /// Comment.
    Comment(String),
    /// Processing instruction or XML declaration.
    ProcessingInstruction(String),
    /// Document type declaration.
    Doctype(String),
}

/// Element attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// A parsed documentation page.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Create an empty document holding only the root node.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId::NONE,
        };
        doc.root = doc.alloc(Node::new(NodeData::Document));
        doc
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Document root ID.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(Node::new(NodeData::Element { name, attrs }))
    }

    pub fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text)))
    }

    pub fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(text)))
    }

    pub fn create_processing_instruction(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::ProcessingInstruction(text)))
    }

    pub fn create_doctype(&mut self, name: String) -> NodeId {
        self.alloc(Node::new(NodeData::Doctype(name)))
    }

    /// Append a child as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = NodeId::NONE;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert `new_node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text to the last child when it is a text node, or add a new text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(ref mut existing) = last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Unlink a node from its parent and siblings. Its own subtree stays intact.
    pub fn detach(&mut self, target: NodeId) {
        let (parent, prev, next) = match self.get(target) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(target) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    // ------------------------------------------------------------------
    // Node accessors
    // ------------------------------------------------------------------

    /// Parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.to_option())
    }

    /// Element's local name (tag).
    pub fn local_name(&self, id: NodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// True when the node is an element with the given local name.
    pub fn is_element_named(&self, id: NodeId, tag: &str) -> bool {
        self.local_name(id).is_some_and(|name| name.as_ref() == tag)
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// Character data of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Text of the first child, when that child is a text node.
    ///
    /// Documentation generators put the interesting value of headings,
    /// paragraphs and code blocks directly at the start of the element, so
    /// this is the "value" of most nodes the extractors look at.
    pub fn first_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| self.text(n.first_child))
    }

    /// Concatenated text of every text node under `id`, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.text(d))
            .collect()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        ChildrenIter {
            doc: self,
            current: first,
        }
    }

    /// Iterate over every node below `root` in document order, `root` excluded.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(root).collect();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// First descendant of `root` (document order) satisfying `predicate`.
    pub fn find_descendant<F>(&self, root: NodeId, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(NodeId) -> bool,
    {
        self.descendants(root).find(|&id| predicate(id))
    }

    /// All descendant elements of `root` with the given tag, in document order.
    pub fn elements_by_tag<'a>(
        &'a self,
        root: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(root)
            .filter(move |&id| self.is_element_named(id, tag))
    }

    /// First descendant element of `root` with the given tag.
    pub fn first_element_by_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.find_descendant(root, |id| self.is_element_named(id, tag))
    }

    /// Nearest preceding sibling of `id` satisfying `predicate`.
    pub fn preceding_sibling<F>(&self, id: NodeId, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(NodeId) -> bool,
    {
        let mut cursor = self.get(id).map(|n| n.prev_sibling)?;
        while let Some(node) = self.get(cursor) {
            if predicate(cursor) {
                return Some(cursor);
            }
            cursor = node.prev_sibling;
        }
        None
    }

    /// First element `tag` below `root` whose trimmed text equals `heading`.
    pub fn find_heading(&self, root: NodeId, tag: &str, heading: &str) -> Option<NodeId> {
        self.elements_by_tag(root, tag)
            .find(|&id| self.text_content(id).trim() == heading)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    doc: &'a Document,
    current: NodeId,
}

impl<'a> Iterator for ChildrenIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .doc
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        let mark = self.stack.len();
        self.stack.extend(self.doc.children(id));
        self.stack[mark..].reverse();
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use html5ever::ns;

    use super::*;

    fn make_qname(local: &str) -> QualName {
        QualName::new(None, ns!(html), LocalName::from(local))
    }

    fn element(doc: &mut Document, parent: NodeId, tag: &str) -> NodeId {
        let id = doc.create_element(make_qname(tag), vec![]);
        doc.append(parent, id);
        id
    }

    #[test]
    fn test_append_children() {
        let mut doc = Document::new();
        let root = doc.root();
        let parent = element(&mut doc, root, "div");
        let child1 = element(&mut doc, parent, "p");
        let child2 = element(&mut doc, parent, "p");

        let children: Vec<_> = doc.children(parent).collect();
        assert_eq!(children, vec![child1, child2]);
        assert_eq!(doc.parent(child2), Some(parent));
        assert_eq!(doc.parent(root), None);
    }

    #[test]
    fn test_text_merging() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = element(&mut doc, root, "p");

        doc.append_text(p, "Hello, ");
        doc.append_text(p, "World!");

        let children: Vec<_> = doc.children(p).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(doc.first_text(p), Some("Hello, World!"));
    }

    #[test]
    fn test_descendants_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = element(&mut doc, root, "div");
        let a = element(&mut doc, div, "a");
        doc.append_text(a, "one");
        let b = element(&mut doc, div, "b");
        doc.append_text(b, "two");
        let c = element(&mut doc, root, "c");

        let tags: Vec<_> = doc
            .descendants(root)
            .filter_map(|id| doc.local_name(id).map(|n| n.to_string()))
            .collect();
        assert_eq!(tags, vec!["div", "a", "b", "c"]);
        assert_eq!(doc.text_content(div), "onetwo");
        assert_eq!(doc.first_element_by_tag(root, "c"), Some(c));
    }

    #[test]
    fn test_first_text_requires_leading_text() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = element(&mut doc, root, "p");
        let span = element(&mut doc, p, "span");
        doc.append_text(span, "inner");
        doc.append_text(p, " tail");

        assert_eq!(doc.first_text(p), None);
        assert_eq!(doc.text_content(p), "inner tail");
    }

    #[test]
    fn test_preceding_sibling() {
        let mut doc = Document::new();
        let root = doc.root();
        let anchor = doc.create_element(
            make_qname("a"),
            vec![Attribute {
                name: make_qname("name"),
                value: "GtkButton.style-property-details".to_string(),
            }],
        );
        doc.append(root, anchor);
        doc.append_text(root, "\n");
        let heading = element(&mut doc, root, "h2");

        let found = doc.preceding_sibling(heading, |id| doc.get_attr(id, "name").is_some());
        assert_eq!(found, Some(anchor));
        assert_eq!(doc.preceding_sibling(anchor, |_| true), None);
    }

    #[test]
    fn test_detach_and_insert_before() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = element(&mut doc, root, "a");
        let b = element(&mut doc, root, "b");
        let c = element(&mut doc, root, "c");

        doc.detach(b);
        assert_eq!(doc.children(root).collect::<Vec<_>>(), vec![a, c]);

        doc.insert_before(a, b);
        assert_eq!(doc.children(root).collect::<Vec<_>>(), vec![b, a, c]);

        doc.detach(c);
        assert_eq!(doc.get(root).map(|n| n.last_child), Some(a));
    }
}
