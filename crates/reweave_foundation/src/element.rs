//! Graph elements and their identifiers.
//!
//! Host graphs are built from three element kinds: [`Node`], [`Arc`] (a
//! two-ended connection whose ends may dangle), and [`Hyperarc`] (an n-ended
//! connection). Elements are addressed by generational [`ElementId`]s.

use std::fmt;

use crate::label::LabelSet;

/// Element identifier with a generational index for stale reference detection.
///
/// The generation counter increments when an element index is reused after
/// removal, allowing detection of stale references. The null sentinel doubles
/// as the "dangling" value for unconnected arc ends.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId {
    /// Index into element storage.
    pub index: u64,
    /// Generation counter for stale reference detection.
    pub generation: u32,
}

impl ElementId {
    /// Creates a new element ID with the given index and generation.
    #[must_use]
    pub const fn new(index: u64, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the sentinel value representing "no element".
    ///
    /// This uses `u64::MAX` as the index, which is never allocated. A dangling
    /// arc end carries this value.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            index: u64::MAX,
            generation: 0,
        }
    }

    /// Returns true if this is the null sentinel value.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.index == u64::MAX
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "ElementId(null)")
        } else {
            write!(f, "ElementId({}v{})", self.index, self.generation)
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "∅")
        } else {
            write!(f, "#{}", self.index)
        }
    }
}

/// The three element kinds of a graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// A node.
    Node,
    /// A two-ended arc.
    Arc,
    /// An n-ended hyperarc.
    Hyperarc,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => write!(f, "node"),
            Self::Arc => write!(f, "arc"),
            Self::Hyperarc => write!(f, "hyperarc"),
        }
    }
}

/// A graph node: a named point with labels and a position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// The node's identity within its graph. Null until the node is added.
    pub id: ElementId,
    /// Human-readable name.
    pub name: String,
    /// Symbolic properties.
    pub labels: LabelSet,
    /// Spatial position.
    pub position: [f64; 3],
}

impl Node {
    /// Creates a node with no labels at the origin.
    ///
    /// The id is null until the node is added to a graph.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ElementId::null(),
            name: name.into(),
            labels: LabelSet::new(),
            position: [0.0; 3],
        }
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the position.
    #[must_use]
    pub fn with_position(mut self, position: [f64; 3]) -> Self {
        self.position = position;
        self
    }
}

/// A two-ended connection between nodes.
///
/// Either end may be null, meaning the arc dangles there. Direction flags are
/// orthogonal to connectivity: an arc can be undirected, directed (from→to),
/// or doubly directed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// The arc's identity within its graph. Null until the arc is added.
    pub id: ElementId,
    /// Human-readable name.
    pub name: String,
    /// Symbolic properties.
    pub labels: LabelSet,
    /// Tail end, or null if dangling.
    pub from: ElementId,
    /// Head end, or null if dangling.
    pub to: ElementId,
    /// Whether the arc is directed from→to.
    pub directed: bool,
    /// Whether the arc is directed both ways.
    pub doubly_directed: bool,
}

impl Arc {
    /// Creates an undirected arc between the given ends.
    ///
    /// Pass [`ElementId::null`] for a dangling end.
    #[must_use]
    pub fn new(name: impl Into<String>, from: ElementId, to: ElementId) -> Self {
        Self {
            id: ElementId::null(),
            name: name.into(),
            labels: LabelSet::new(),
            from,
            to,
            directed: false,
            doubly_directed: false,
        }
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the direction flags.
    #[must_use]
    pub fn with_direction(mut self, directed: bool, doubly_directed: bool) -> Self {
        self.directed = directed;
        self.doubly_directed = doubly_directed;
        self
    }

    /// Returns true if the given id is one of this arc's ends.
    #[must_use]
    pub fn touches(&self, id: ElementId) -> bool {
        !id.is_null() && (self.from == id || self.to == id)
    }
}

/// An n-ended connection among nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperarc {
    /// The hyperarc's identity within its graph. Null until added.
    pub id: ElementId,
    /// Human-readable name.
    pub name: String,
    /// Symbolic properties.
    pub labels: LabelSet,
    /// Connected nodes.
    pub nodes: Vec<ElementId>,
}

impl Hyperarc {
    /// Creates a hyperarc over the given nodes.
    #[must_use]
    pub fn new(name: impl Into<String>, nodes: Vec<ElementId>) -> Self {
        Self {
            id: ElementId::null(),
            name: name.into(),
            labels: LabelSet::new(),
            nodes,
        }
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Returns true if the given node id is connected by this hyperarc.
    #[must_use]
    pub fn touches(&self, id: ElementId) -> bool {
        !id.is_null() && self.nodes.contains(&id)
    }
}
