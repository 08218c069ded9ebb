use crate::{
    net::{Interface, LinkConfig, NetBuildError, Node, NodeId, SubnetBlock},
    time::Duration,
};
use fxhash::FxHashMap;
use std::{fmt::Display, net::Ipv4Addr};

///
/// A topology unique handle to a segment.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(usize);

impl Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seg#{}", self.0)
    }
}

///
/// The medium type of a segment.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A single dedicated connection between exactly two endpoints.
    PointToPoint,
    /// A shared-medium segment where all members contend for one channel.
    Csma,
}

///
/// A network segment: a set of attached nodes sharing one medium
/// and one address block.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    id: SegmentId,
    name: String,
    kind: SegmentKind,
    config: LinkConfig,
    members: Vec<NodeId>,
    block: SubnetBlock,
}

impl Segment {
    /// The topology unique handle of this segment.
    #[must_use]
    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// The user-chosen name of this segment.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The medium type of this segment.
    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// The medium configuration of this segment.
    #[must_use]
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// The attached nodes, in attachment order.
    #[must_use]
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// The address block assigned to this segment.
    #[must_use]
    pub fn block(&self) -> &SubnetBlock {
        &self.block
    }
}

///
/// A complete description of a simulated network.
///
/// Nodes and segments are created through the builder-style `add_*` and
/// `connect_*` methods and referred to by the returned handles. This replaces
/// index arithmetic on helper containers with named references.
///
/// # Examples
///
/// ```
/// use simnet::net::{Bitrate, LinkConfig, SubnetBlock, Topology};
/// use std::time::Duration;
///
/// let mut topology = Topology::new();
/// let left = topology.add_node("left").unwrap();
/// let right = topology.add_node("right").unwrap();
///
/// let link = topology
///     .connect_p2p(
///         "backbone",
///         left,
///         right,
///         LinkConfig::new(Bitrate::from_mbps(5), Duration::from_millis(2)),
///         SubnetBlock::new("10.1.1.0".parse().unwrap(), "255.255.255.0".parse().unwrap()).unwrap(),
///     )
///     .unwrap();
///
/// assert_eq!(
///     topology.addr_of(left, link),
///     Some("10.1.1.1".parse().unwrap())
/// );
/// ```
///
#[derive(Debug, Clone, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    segments: Vec<Segment>,
    index: FxHashMap<String, NodeId>,
}

impl Topology {
    ///
    /// Creates an empty topology.
    ///
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of nodes in the topology.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The number of segments in the topology.
    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    ///
    /// Creates a new node under a topology unique name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already taken.
    ///
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<NodeId, NetBuildError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(NetBuildError::DuplicateNode(name));
        }

        let id = NodeId(self.nodes.len());
        self.index.insert(name.clone(), id);
        self.nodes.push(Node {
            id,
            name,
            interfaces: Vec::new(),
        });
        Ok(id)
    }

    ///
    /// Resolves a node by its handle.
    ///
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    ///
    /// Resolves a node by its name.
    ///
    #[must_use]
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|id| &self.nodes[id.0])
    }

    ///
    /// Resolves a segment by its handle.
    ///
    #[must_use]
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0]
    }

    ///
    /// Connects exactly two endpoints through a dedicated link and assigns
    /// both ends an address from the given block.
    ///
    /// # Errors
    ///
    /// Returns an error if both endpoints are the same node, or the block
    /// cannot provide two addresses.
    ///
    pub fn connect_p2p(
        &mut self,
        name: impl Into<String>,
        a: NodeId,
        b: NodeId,
        config: LinkConfig,
        block: SubnetBlock,
    ) -> Result<SegmentId, NetBuildError> {
        if a == b {
            return Err(NetBuildError::SelfLink(self.node(a).name.clone()));
        }
        self.install(name.into(), SegmentKind::PointToPoint, &[a, b], config, block)
    }

    ///
    /// Attaches all members to one shared medium and assigns each an address
    /// from the given block, in member order.
    ///
    /// # Errors
    ///
    /// Returns an error if the member list contains duplicates, or the block
    /// cannot provide enough addresses.
    ///
    pub fn connect_csma(
        &mut self,
        name: impl Into<String>,
        members: &[NodeId],
        config: LinkConfig,
        block: SubnetBlock,
    ) -> Result<SegmentId, NetBuildError> {
        self.install(name.into(), SegmentKind::Csma, members, config, block)
    }

    fn install(
        &mut self,
        name: String,
        kind: SegmentKind,
        members: &[NodeId],
        config: LinkConfig,
        mut block: SubnetBlock,
    ) -> Result<SegmentId, NetBuildError> {
        for (i, member) in members.iter().enumerate() {
            if members[..i].contains(member) {
                return Err(NetBuildError::DuplicateMember(
                    self.node(*member).name.clone(),
                ));
            }
        }

        let id = SegmentId(self.segments.len());
        for member in members {
            let addr = block.assign()?;
            self.nodes[member.0].interfaces.push(Interface {
                segment: id,
                addr,
            });
        }

        self.segments.push(Segment {
            id,
            name,
            kind,
            config,
            members: members.to_vec(),
            block,
        });
        Ok(id)
    }

    ///
    /// The address of a node on a segment, if attached.
    ///
    #[must_use]
    pub fn addr_of(&self, node: NodeId, segment: SegmentId) -> Option<Ipv4Addr> {
        self.node(node).addr_on(segment)
    }

    ///
    /// Finds the node owning the given address.
    ///
    #[must_use]
    pub fn node_by_addr(&self, addr: Ipv4Addr) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|node| node.interfaces.iter().any(|itf| itf.addr == addr))
    }

    ///
    /// Calculates the time a packet of `bits` size needs to traverse the
    /// given segments in order, summing propagation delay and transmission
    /// time per hop.
    ///
    #[must_use]
    pub fn route_transit(&self, route: &[SegmentId], bits: u64) -> Duration {
        route
            .iter()
            .map(|seg| self.segment(*seg).config.transit_time(bits))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::Bitrate;

    fn block(base: &str) -> SubnetBlock {
        SubnetBlock::new(base.parse().unwrap(), Ipv4Addr::new(255, 255, 255, 0)).unwrap()
    }

    fn link() -> LinkConfig {
        LinkConfig::new(Bitrate::from_mbps(100), Duration::from_nanos(6560))
    }

    #[test]
    fn p2p_addressing() {
        let mut topology = Topology::new();
        let a = topology.add_node("a").unwrap();
        let b = topology.add_node("b").unwrap();
        let seg = topology
            .connect_p2p("link", a, b, link(), block("10.1.1.0"))
            .unwrap();

        assert_eq!(topology.addr_of(a, seg), Some(Ipv4Addr::new(10, 1, 1, 1)));
        assert_eq!(topology.addr_of(b, seg), Some(Ipv4Addr::new(10, 1, 1, 2)));
        assert_eq!(
            topology.node_by_addr(Ipv4Addr::new(10, 1, 1, 2)).unwrap().id(),
            b
        );
    }

    #[test]
    fn csma_membership() {
        let mut topology = Topology::new();
        let gw = topology.add_node("gw").unwrap();
        let n1 = topology.add_node("n1").unwrap();
        let n2 = topology.add_node("n2").unwrap();
        let seg = topology
            .connect_csma("lan", &[gw, n1, n2], link(), block("10.1.3.0"))
            .unwrap();

        assert_eq!(topology.segment(seg).members(), &[gw, n1, n2]);
        assert_eq!(topology.addr_of(n2, seg), Some(Ipv4Addr::new(10, 1, 3, 3)));
        assert_eq!(topology.segment(seg).kind(), SegmentKind::Csma);
    }

    #[test]
    fn rejects_invalid_shapes() {
        let mut topology = Topology::new();
        let a = topology.add_node("a").unwrap();
        let b = topology.add_node("b").unwrap();

        assert!(matches!(
            topology.add_node("a"),
            Err(NetBuildError::DuplicateNode(_))
        ));
        assert!(matches!(
            topology.connect_p2p("loop", a, a, link(), block("10.1.1.0")),
            Err(NetBuildError::SelfLink(_))
        ));
        assert!(matches!(
            topology.connect_csma("lan", &[a, b, a], link(), block("10.1.3.0")),
            Err(NetBuildError::DuplicateMember(_))
        ));
    }

    #[test]
    fn route_transit_sums_hops() {
        let mut topology = Topology::new();
        let a = topology.add_node("a").unwrap();
        let b = topology.add_node("b").unwrap();
        let c = topology.add_node("c").unwrap();

        let lan = topology
            .connect_csma("lan", &[a, b], link(), block("10.1.3.0"))
            .unwrap();
        let b2c = topology
            .connect_p2p(
                "uplink",
                b,
                c,
                LinkConfig::new(Bitrate::from_mbps(5), Duration::from_millis(2)),
                block("10.1.1.0"),
            )
            .unwrap();

        let bits = 1024 * 8;
        let expected = topology.segment(lan).config().transit_time(bits)
            + topology.segment(b2c).config().transit_time(bits);
        assert_eq!(topology.route_transit(&[lan, b2c], bits), expected);
    }
}
