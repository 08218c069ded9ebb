use crate::net::SegmentId;
use std::{fmt::Display, net::Ipv4Addr};

///
/// A topology unique handle to a node.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The position of the node in its topology.
    #[must_use]
    pub fn raw(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

///
/// An attachment point of a node to a segment, with the address
/// assigned from the segments block.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interface {
    /// The segment this interface is attached to.
    pub segment: SegmentId,
    /// The address assigned to this interface.
    pub addr: Ipv4Addr,
}

///
/// A participant of the simulated network.
///
/// Nodes carry no behaviour of their own; applications reference them by
/// their [`NodeId`] handle or their name.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) interfaces: Vec<Interface>,
}

impl Node {
    /// The topology unique handle of this node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The user-chosen name of this node.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attachment points of this node, in installation order.
    #[must_use]
    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    ///
    /// The address of this node on the given segment, if attached.
    ///
    #[must_use]
    pub fn addr_on(&self, segment: SegmentId) -> Option<Ipv4Addr> {
        self.interfaces
            .iter()
            .find(|itf| itf.segment == segment)
            .map(|itf| itf.addr)
    }
}
