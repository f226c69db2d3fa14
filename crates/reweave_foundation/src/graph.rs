//! The host graph.
//!
//! A [`Graph`] owns nodes, arcs, and hyperarcs addressed by [`ElementId`],
//! plus a set of graph-wide global labels. Element storage uses persistent
//! maps, so `Clone` produces a snapshot that is fully independent of the
//! original under mutation. This is the copy primitive the empirical
//! confluence fallback relies on.

use crate::element::{Arc, ElementId, Hyperarc, Node};
use crate::error::{Error, Result};
use crate::label::LabelSet;

/// Which end of an arc to address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArcEnd {
    /// The tail (`from`) end.
    Tail,
    /// The head (`to`) end.
    Head,
}

/// A host graph: nodes, arcs, hyperarcs, and global labels.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    global_labels: LabelSet,
    nodes: im::HashMap<ElementId, Node>,
    arcs: im::HashMap<ElementId, Arc>,
    hyperarcs: im::HashMap<ElementId, Hyperarc>,
    next_index: u64,
    free: Vec<(u64, u32)>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> ElementId {
        if let Some((index, generation)) = self.free.pop() {
            ElementId::new(index, generation)
        } else {
            let index = self.next_index;
            self.next_index += 1;
            ElementId::new(index, 0)
        }
    }

    fn release_id(&mut self, id: ElementId) {
        self.free.push((id.index, id.generation + 1));
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the graph's global labels.
    #[must_use]
    pub fn global_labels(&self) -> &LabelSet {
        &self.global_labels
    }

    /// Gets a node by id.
    #[must_use]
    pub fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Gets an arc by id.
    #[must_use]
    pub fn arc(&self, id: ElementId) -> Option<&Arc> {
        self.arcs.get(&id)
    }

    /// Gets a hyperarc by id.
    #[must_use]
    pub fn hyperarc(&self, id: ElementId) -> Option<&Hyperarc> {
        self.hyperarcs.get(&id)
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterates over all arcs.
    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.arcs.values()
    }

    /// Iterates over all hyperarcs.
    pub fn hyperarcs(&self) -> impl Iterator<Item = &Hyperarc> {
        self.hyperarcs.values()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of arcs.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Returns the number of hyperarcs.
    #[must_use]
    pub fn hyperarc_count(&self) -> usize {
        self.hyperarcs.len()
    }

    /// Finds a node by name.
    #[must_use]
    pub fn node_named(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name == name)
    }

    /// Finds an arc by name.
    #[must_use]
    pub fn arc_named(&self, name: &str) -> Option<&Arc> {
        self.arcs.values().find(|a| a.name == name)
    }

    /// Finds a hyperarc by name.
    #[must_use]
    pub fn hyperarc_named(&self, name: &str) -> Option<&Hyperarc> {
        self.hyperarcs.values().find(|h| h.name == name)
    }

    /// Returns the arc degree of a node: the number of arc ends attached to it.
    ///
    /// A self-loop counts both ends.
    #[must_use]
    pub fn degree(&self, node: ElementId) -> usize {
        if node.is_null() {
            return 0;
        }
        self.arcs
            .values()
            .map(|a| usize::from(a.from == node) + usize::from(a.to == node))
            .sum()
    }

    /// Returns the number of hyperarcs connected to a node.
    #[must_use]
    pub fn hyper_degree(&self, node: ElementId) -> usize {
        if node.is_null() {
            return 0;
        }
        self.hyperarcs.values().filter(|h| h.touches(node)).count()
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Adds a node, stamping and returning its id.
    pub fn add_node(&mut self, mut node: Node) -> ElementId {
        let id = self.alloc_id();
        node.id = id;
        self.nodes.insert(id, node);
        id
    }

    /// Adds an arc, stamping and returning its id.
    ///
    /// # Errors
    /// Returns an error if a non-null end does not name a node in this graph.
    pub fn add_arc(&mut self, mut arc: Arc) -> Result<ElementId> {
        self.check_end(arc.from)?;
        self.check_end(arc.to)?;
        let id = self.alloc_id();
        arc.id = id;
        self.arcs.insert(id, arc);
        Ok(id)
    }

    /// Adds a hyperarc, stamping and returning its id.
    ///
    /// # Errors
    /// Returns an error if any connected node is not in this graph.
    pub fn add_hyperarc(&mut self, mut hyperarc: Hyperarc) -> Result<ElementId> {
        for &n in &hyperarc.nodes {
            if !self.nodes.contains_key(&n) {
                return Err(Error::element_not_found(n));
            }
        }
        let id = self.alloc_id();
        hyperarc.id = id;
        self.hyperarcs.insert(id, hyperarc);
        Ok(id)
    }

    fn check_end(&self, end: ElementId) -> Result<()> {
        if end.is_null() || self.nodes.contains_key(&end) {
            Ok(())
        } else {
            Err(Error::element_not_found(end))
        }
    }

    /// Removes a node.
    ///
    /// Incident arc ends are left dangling (set to null) and the node is
    /// dropped from hyperarc node lists. This is the substrate embedding
    /// rules reattach over.
    ///
    /// # Errors
    /// Returns an error if the node is not in this graph.
    pub fn remove_node(&mut self, id: ElementId) -> Result<()> {
        if self.nodes.remove(&id).is_none() {
            return Err(Error::element_not_found(id));
        }
        let touched: Vec<ElementId> = self
            .arcs
            .values()
            .filter(|a| a.touches(id))
            .map(|a| a.id)
            .collect();
        for arc_id in touched {
            if let Some(arc) = self.arcs.get_mut(&arc_id) {
                if arc.from == id {
                    arc.from = ElementId::null();
                }
                if arc.to == id {
                    arc.to = ElementId::null();
                }
            }
        }
        let hyper_touched: Vec<ElementId> = self
            .hyperarcs
            .values()
            .filter(|h| h.touches(id))
            .map(|h| h.id)
            .collect();
        for hyper_id in hyper_touched {
            if let Some(hyperarc) = self.hyperarcs.get_mut(&hyper_id) {
                hyperarc.nodes.retain(|&n| n != id);
            }
        }
        self.release_id(id);
        Ok(())
    }

    /// Removes an arc.
    ///
    /// # Errors
    /// Returns an error if the arc is not in this graph.
    pub fn remove_arc(&mut self, id: ElementId) -> Result<()> {
        if self.arcs.remove(&id).is_none() {
            return Err(Error::element_not_found(id));
        }
        self.release_id(id);
        Ok(())
    }

    /// Removes a hyperarc.
    ///
    /// # Errors
    /// Returns an error if the hyperarc is not in this graph.
    pub fn remove_hyperarc(&mut self, id: ElementId) -> Result<()> {
        if self.hyperarcs.remove(&id).is_none() {
            return Err(Error::element_not_found(id));
        }
        self.release_id(id);
        Ok(())
    }

    /// Reattaches one end of an arc to a node (or detaches it with null).
    ///
    /// # Errors
    /// Returns an error if the arc does not exist, or if a non-null target
    /// node does not exist.
    pub fn set_arc_end(&mut self, arc: ElementId, end: ArcEnd, node: ElementId) -> Result<()> {
        self.check_end(node)?;
        let Some(a) = self.arcs.get_mut(&arc) else {
            return Err(Error::element_not_found(arc));
        };
        match end {
            ArcEnd::Tail => a.from = node,
            ArcEnd::Head => a.to = node,
        }
        Ok(())
    }

    /// Replaces a node's labels.
    ///
    /// # Errors
    /// Returns an error if the node is not in this graph.
    pub fn relabel_node(&mut self, id: ElementId, labels: LabelSet) -> Result<()> {
        let Some(n) = self.nodes.get_mut(&id) else {
            return Err(Error::element_not_found(id));
        };
        n.labels = labels;
        Ok(())
    }

    /// Replaces an arc's labels.
    ///
    /// # Errors
    /// Returns an error if the arc is not in this graph.
    pub fn relabel_arc(&mut self, id: ElementId, labels: LabelSet) -> Result<()> {
        let Some(a) = self.arcs.get_mut(&id) else {
            return Err(Error::element_not_found(id));
        };
        a.labels = labels;
        Ok(())
    }

    /// Replaces a hyperarc's labels.
    ///
    /// # Errors
    /// Returns an error if the hyperarc is not in this graph.
    pub fn relabel_hyperarc(&mut self, id: ElementId, labels: LabelSet) -> Result<()> {
        let Some(h) = self.hyperarcs.get_mut(&id) else {
            return Err(Error::element_not_found(id));
        };
        h.labels = labels;
        Ok(())
    }

    /// Moves a node.
    ///
    /// # Errors
    /// Returns an error if the node is not in this graph.
    pub fn set_node_position(&mut self, id: ElementId, position: [f64; 3]) -> Result<()> {
        let Some(n) = self.nodes.get_mut(&id) else {
            return Err(Error::element_not_found(id));
        };
        n.position = position;
        Ok(())
    }

    /// Adds a global label.
    pub fn add_global_label(&mut self, label: impl Into<String>) {
        self.global_labels = self.global_labels.insert(label);
    }

    /// Removes a global label.
    pub fn remove_global_label(&mut self, label: &str) {
        self.global_labels = self.global_labels.remove(label);
    }
}
