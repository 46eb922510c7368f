use std::collections::BTreeSet;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The identity of a vertex in the alignment graph.
///
/// Two nodes are the same node if and only if their [`NodeId`]s are equal;
/// labels and provenance tags play no part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId(value)
    }
}

/// Provenance pattern tags attached to a node.
///
/// A node that was never matched against historical models has no tag set at
/// all; that is treated exactly like an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Provenance(Option<BTreeSet<String>>);

impl Provenance {
    fn from_tags<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Provenance(Some(tags.into_iter().map(Into::into).collect()))
    }

    fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().flatten().map(String::as_str)
    }

    fn len(&self) -> usize {
        self.0.as_ref().map_or(0, BTreeSet::len)
    }
}

/// A terminal node standing for a data column.
///
/// Depending on its role in an edge it is either the *source* column being
/// mapped, or the *target* column of the semantic model that the source is
/// aligned to.
#[derive(Debug, Clone)]
pub struct ColumnNode {
    id: NodeId,
    column_name: String,
    provenance: Provenance,
}

impl ColumnNode {
    /// A column node without provenance tags.
    pub fn new(id: impl Into<NodeId>, column_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            column_name: column_name.into(),
            provenance: Provenance::default(),
        }
    }

    /// Attach provenance pattern tags to this column node.
    pub fn with_provenance<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.provenance = Provenance::from_tags(tags);
        self
    }

    /// The identity of this node.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// The name of the column this node represents.
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// The provenance tags, in sorted order.
    pub fn provenance_tags(&self) -> impl Iterator<Item = &str> {
        self.provenance.iter()
    }

    /// Number of provenance tags (zero when none are attached).
    pub fn tag_count(&self) -> usize {
        self.provenance.len()
    }
}

/// An intermediate ontology vertex (a class or property instance).
#[derive(Debug, Clone)]
pub struct InternalNode {
    id: NodeId,
    local_id: String,
    provenance: Provenance,
}

impl InternalNode {
    /// An internal node without provenance tags.
    pub fn new(id: impl Into<NodeId>, local_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            local_id: local_id.into(),
            provenance: Provenance::default(),
        }
    }

    /// Attach provenance pattern tags to this internal node.
    pub fn with_provenance<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.provenance = Provenance::from_tags(tags);
        self
    }

    /// The identity of this node.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// The short, ontology-local identifier of this node.
    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// The provenance tags, in sorted order.
    pub fn provenance_tags(&self) -> impl Iterator<Item = &str> {
        self.provenance.iter()
    }

    /// Number of provenance tags (zero when none are attached).
    pub fn tag_count(&self) -> usize {
        self.provenance.len()
    }
}

macro_rules! identity_by_id {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}

identity_by_id!(ColumnNode);
identity_by_id!(InternalNode);

/// A shared reference to any node of the alignment graph.
///
/// Nodes are owned by the graph; candidates only ever hold these cheap,
/// shared handles and never mutate what they point to.
///
/// Identity is the [`NodeId`] alone, whatever the variant: an internal and a
/// column node with the same id are the same node.
#[derive(Debug, Clone)]
pub enum Node {
    /// An intermediate ontology vertex.
    Internal(Arc<InternalNode>),
    /// A terminal column vertex.
    Column(Arc<ColumnNode>),
}

impl Node {
    /// The identity of this node.
    pub fn id(&self) -> &NodeId {
        match self {
            Node::Internal(node) => node.id(),
            Node::Column(node) => node.id(),
        }
    }

    /// The provenance tags, in sorted order.
    pub fn provenance_tags(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Node::Internal(node) => Box::new(node.provenance_tags()),
            Node::Column(node) => Box::new(node.provenance_tags()),
        }
    }

    /// Number of provenance tags (zero when none are attached).
    pub fn tag_count(&self) -> usize {
        match self {
            Node::Internal(node) => node.tag_count(),
            Node::Column(node) => node.tag_count(),
        }
    }

    /// The node's own label: the local id of an internal node or the column
    /// name of a column node.
    pub fn display_label(&self) -> &str {
        match self {
            Node::Internal(node) => node.local_id(),
            Node::Column(node) => node.column_name(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl From<Arc<InternalNode>> for Node {
    fn from(value: Arc<InternalNode>) -> Self {
        Node::Internal(value)
    }
}

impl From<Arc<ColumnNode>> for Node {
    fn from(value: Arc<ColumnNode>) -> Self {
        Node::Column(value)
    }
}
