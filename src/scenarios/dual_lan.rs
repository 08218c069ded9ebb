//!
//! The topology/traffic bootstrap.
//!
//! Two endpoint groups are bridged by a point-to-point link; each endpoint
//! fans out into a shared-medium segment. An echo server sits on the last
//! node of the second segment, four echo clients on the last four nodes of
//! the first. Client start times are staggered to avoid simultaneous request
//! bursts; the stagger is literal configuration, never derived.
//!
//! ```text
//!                               10.1.1.0
//!  lan1-4 ... lan1-0  gw1 --------------------- gw2  lan2-0 ... lan2-2
//!    |          |      |      point-to-point     |     |          |
//!    ==================                          ==================
//!      LAN1 10.1.3.0                               LAN2 10.1.2.0
//! ```
//!

use crate::{
    net::{
        Bitrate, EchoClient, EchoClientConfig, EchoServer, EchoServerConfig, LinkConfig,
        NetBuildError, PacketTrace, SegmentId, SubnetBlock, Topology, TraceDirection, TraceRecord,
    },
    runtime::{Application, Builder, Event, EventSet, Runtime},
    time::{Duration, SimTime},
};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddrV4};

/// The maximum number of extra nodes per shared-medium segment. More would
/// soon run the /24 address blocks out of host addresses.
pub const MAX_LAN_NODES: u32 = 250;

/// The number of echo clients installed on the first segment.
pub const NUM_CLIENTS: usize = 4;

/// The well-known echo port.
pub const ECHO_PORT: u16 = 9;

/// The first ephemeral port handed out to clients.
const CLIENT_PORT_BASE: u16 = 49153;

/// The global stop time of the bootstrap.
pub const STOP_TIME: SimTime = SimTime::from_duration(Duration::from_secs(10));

/// The staggered client start offsets, in installation order; the second
/// client is the primary one. Literal configuration, never derived.
pub const CLIENT_STARTS: [Duration; NUM_CLIENTS] = [
    Duration::from_millis(2000),
    Duration::from_millis(3000),
    Duration::from_millis(2300),
    Duration::from_millis(2800),
];

///
/// The scalar parameters of the bootstrap.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DualLanConfig {
    /// The number of extra nodes on the client-side segment.
    pub n_csma1: u32,
    /// The number of extra nodes on the server-side segment.
    pub n_csma2: u32,
    /// Whether the echo applications log their activity.
    pub verbose: bool,
    /// Whether packet traces are recorded.
    pub tracing: bool,
}

impl Default for DualLanConfig {
    fn default() -> Self {
        Self {
            n_csma1: 5,
            n_csma2: 3,
            verbose: true,
            tracing: false,
        }
    }
}

impl DualLanConfig {
    ///
    /// Checks the node-count preconditions, before any topology is built.
    ///
    /// # Errors
    ///
    /// Returns an error if either segment would exceed [`MAX_LAN_NODES`], or
    /// would carry fewer nodes than the installed applications require.
    ///
    pub fn validate(&self) -> Result<(), NetBuildError> {
        for (lan, count) in [("lan1", self.n_csma1), ("lan2", self.n_csma2)] {
            if count > MAX_LAN_NODES {
                return Err(NetBuildError::TooManyLanNodes {
                    lan: lan.to_string(),
                    count,
                    limit: MAX_LAN_NODES,
                });
            }
        }

        let needed = NUM_CLIENTS as u32;
        if self.n_csma1 < needed {
            return Err(NetBuildError::TooFewLanNodes {
                lan: "lan1".to_string(),
                count: self.n_csma1,
                needed,
            });
        }
        if self.n_csma2 < 1 {
            return Err(NetBuildError::TooFewLanNodes {
                lan: "lan2".to_string(),
                count: self.n_csma2,
                needed: 1,
            });
        }
        Ok(())
    }
}

///
/// One echo transaction log, recorded as `(client index, virtual time)`
/// pairs in handling order.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EchoLog {
    /// Datagrams put onto the wire by clients.
    pub sent: Vec<(usize, SimTime)>,
    /// Datagrams accepted by the server.
    pub served: Vec<(usize, SimTime)>,
    /// Echos received back by clients.
    pub echoed: Vec<(usize, SimTime)>,
}

///
/// The assembled simulation: topology, installed applications and the
/// transaction log filled during the run.
///
#[derive(Debug)]
pub struct DualLan {
    /// The assembled network.
    pub topology: Topology,
    /// The echo server on the last node of LAN 2.
    pub server: EchoServer,
    /// The echo clients on the last four nodes of LAN 1, in
    /// [`CLIENT_STARTS`] order.
    pub clients: Vec<EchoClient>,
    /// The transaction log of the run.
    pub log: EchoLog,
    /// The packet trace, recorded when tracing is enabled.
    pub trace: Option<PacketTrace>,

    server_sock: SocketAddrV4,
    client_socks: Vec<SocketAddrV4>,
    route_up: [SegmentId; 3],
    route_down: [SegmentId; 3],
}

fn subnet(base: [u8; 4]) -> Result<SubnetBlock, NetBuildError> {
    SubnetBlock::new(Ipv4Addr::from(base), Ipv4Addr::new(255, 255, 255, 0))
}

///
/// Assembles the topology and installs the echo applications, without
/// scheduling any event yet.
///
/// # Errors
///
/// Returns an error if the configuration fails validation. Nothing is built
/// in that case.
///
pub fn build(config: &DualLanConfig) -> Result<DualLan, NetBuildError> {
    config.validate()?;

    let p2p_config = LinkConfig::new(Bitrate::from_mbps(5), Duration::from_millis(2));
    let csma_config = LinkConfig::new(Bitrate::from_mbps(100), Duration::from_nanos(6560));

    let mut topology = Topology::new();

    // The two bridge endpoints. gw2 joins LAN 2 (server side), gw1 LAN 1.
    let gw2 = topology.add_node("gw2")?;
    let gw1 = topology.add_node("gw1")?;
    let p2p = topology.connect_p2p("backbone", gw2, gw1, p2p_config, subnet([10, 1, 1, 0])?)?;

    let mut lan2_members = vec![gw2];
    for i in 0..config.n_csma2 {
        lan2_members.push(topology.add_node(format!("lan2-{i}"))?);
    }
    let lan2 = topology.connect_csma("lan2", &lan2_members, csma_config, subnet([10, 1, 2, 0])?)?;

    let mut lan1_members = vec![gw1];
    for i in 0..config.n_csma1 {
        lan1_members.push(topology.add_node(format!("lan1-{i}"))?);
    }
    let lan1 = topology.connect_csma("lan1", &lan1_members, csma_config, subnet([10, 1, 3, 0])?)?;

    // The server sits on the last node of LAN 2.
    let server_node = *lan2_members.last().expect("lan2 has at least the gateway");
    let server = EchoServer {
        node: server_node,
        config: EchoServerConfig::new(ECHO_PORT).active(SimTime::from(1.0), STOP_TIME),
    };
    let server_sock = SocketAddrV4::new(
        topology
            .addr_of(server_node, lan2)
            .expect("server node is attached to lan2"),
        ECHO_PORT,
    );

    // The clients occupy the last four extra nodes of LAN 1, newest first.
    let extras = &lan1_members[1..];
    let mut clients = Vec::with_capacity(NUM_CLIENTS);
    let mut client_socks = Vec::with_capacity(NUM_CLIENTS);
    for (i, start) in CLIENT_STARTS.iter().enumerate() {
        let node = extras[extras.len() - 1 - i];
        clients.push(EchoClient {
            node,
            config: EchoClientConfig::new(server_sock).active(SimTime::ZERO + *start, STOP_TIME),
        });
        client_socks.push(SocketAddrV4::new(
            topology
                .addr_of(node, lan1)
                .expect("client node is attached to lan1"),
            CLIENT_PORT_BASE + i as u16,
        ));
    }

    let trace = config.tracing.then(|| PacketTrace::new("dual-lan"));

    Ok(DualLan {
        topology,
        server,
        clients,
        log: EchoLog::default(),
        trace,
        server_sock,
        client_socks,
        route_up: [lan1, p2p, lan2],
        route_down: [lan2, p2p, lan1],
    })
}

impl DualLan {
    fn record(&mut self, record: TraceRecord) {
        if let Some(trace) = &mut self.trace {
            trace.record(record);
        }
    }
}

impl Application for DualLan {
    type EventSet = DualLanEvents;

    fn at_sim_start(rt: &mut Runtime<Self>) {
        for (client, config) in rt
            .app
            .clients
            .iter()
            .map(|c| c.config.clone())
            .enumerate()
            .collect::<Vec<_>>()
        {
            rt.add_event(ClientSend { client, seq: 0 }, config.start);
        }

        // The global stop marker; echoes arriving later are still handled,
        // but no application sends beyond this point.
        rt.add_event(Halt, STOP_TIME);
    }
}

///
/// All events of the bootstrap scenario.
///
#[derive(Debug, Clone)]
pub enum DualLanEvents {
    /// A client emits a datagram.
    ClientSend(ClientSend),
    /// A datagram arrives at the server.
    ServerRecv(ServerRecv),
    /// An echo arrives back at its client.
    ClientRecv(ClientRecv),
    /// The global stop marker.
    Halt(Halt),
}

impl EventSet<DualLan> for DualLanEvents {
    fn handle(self, rt: &mut Runtime<DualLan>) {
        match self {
            Self::ClientSend(event) => event.handle(rt),
            Self::ServerRecv(event) => event.handle(rt),
            Self::ClientRecv(event) => event.handle(rt),
            Self::Halt(event) => event.handle(rt),
        }
    }
}

///
/// A client emits the `seq`-th datagram of its configured series.
///
#[derive(Debug, Clone, Copy)]
pub struct ClientSend {
    /// The index of the sending client.
    pub client: usize,
    /// The position in the clients series.
    pub seq: usize,
}

impl Event<DualLan> for ClientSend {
    fn handle(self, rt: &mut Runtime<DualLan>) {
        let now = rt.sim_time();
        let config = rt.app.clients[self.client].config.clone();
        if now >= config.stop {
            return;
        }

        let bytes = config.packet_size;
        let bits = (bytes * 8) as u64;
        let delay = rt.app.topology.route_transit(&rt.app.route_up, bits);

        tracing::info!(
            target: "echo::client",
            "client {} sent {} bytes to {} at {}",
            self.client,
            bytes,
            config.remote,
            now
        );

        rt.app.log.sent.push((self.client, now));
        let record = TraceRecord {
            time: now,
            node: rt.app.clients[self.client].node,
            direction: TraceDirection::Tx,
            src: rt.app.client_socks[self.client],
            dst: rt.app.server_sock,
            bytes,
        };
        rt.app.record(record);

        rt.add_event_in(
            ServerRecv {
                client: self.client,
                seq: self.seq,
                bytes,
            },
            delay,
        );

        if self.seq + 1 < config.max_packets {
            rt.add_event_in(
                ClientSend {
                    client: self.client,
                    seq: self.seq + 1,
                },
                config.interval,
            );
        }
    }
}

///
/// A datagram arrives at the server, which echoes it back unchanged
/// if it is inside its serving window.
///
#[derive(Debug, Clone, Copy)]
pub struct ServerRecv {
    /// The index of the originating client.
    pub client: usize,
    /// The position in the clients series.
    pub seq: usize,
    /// The payload size in bytes.
    pub bytes: usize,
}

impl Event<DualLan> for ServerRecv {
    fn handle(self, rt: &mut Runtime<DualLan>) {
        let now = rt.sim_time();
        let server = rt.app.server.clone();
        if now < server.config.start || now >= server.config.stop {
            tracing::debug!(
                target: "echo::server",
                "dropped {} bytes outside the serving window at {}",
                self.bytes,
                now
            );
            return;
        }

        let src = rt.app.client_socks[self.client];
        tracing::info!(
            target: "echo::server",
            "received {} bytes from {} at {}",
            self.bytes,
            src,
            now
        );

        rt.app.log.served.push((self.client, now));
        let server_sock = rt.app.server_sock;
        rt.app.record(TraceRecord {
            time: now,
            node: server.node,
            direction: TraceDirection::Rx,
            src,
            dst: server_sock,
            bytes: self.bytes,
        });

        // The echo returns the payload unchanged along the reverse route.
        let delay = rt
            .app
            .topology
            .route_transit(&rt.app.route_down, (self.bytes * 8) as u64);
        rt.app.record(TraceRecord {
            time: now,
            node: server.node,
            direction: TraceDirection::Tx,
            src: server_sock,
            dst: src,
            bytes: self.bytes,
        });

        rt.add_event_in(
            ClientRecv {
                client: self.client,
                seq: self.seq,
                bytes: self.bytes,
            },
            delay,
        );
    }
}

///
/// An echo arrives back at its client.
///
#[derive(Debug, Clone, Copy)]
pub struct ClientRecv {
    /// The index of the receiving client.
    pub client: usize,
    /// The position in the clients series.
    pub seq: usize,
    /// The payload size in bytes.
    pub bytes: usize,
}

impl Event<DualLan> for ClientRecv {
    fn handle(self, rt: &mut Runtime<DualLan>) {
        let now = rt.sim_time();

        tracing::info!(
            target: "echo::client",
            "client {} received {} bytes from {} at {}",
            self.client,
            self.bytes,
            rt.app.server_sock,
            now
        );

        rt.app.log.echoed.push((self.client, now));
        let record = TraceRecord {
            time: now,
            node: rt.app.clients[self.client].node,
            direction: TraceDirection::Rx,
            src: rt.app.server_sock,
            dst: rt.app.client_socks[self.client],
            bytes: self.bytes,
        };
        rt.app.record(record);
    }
}

///
/// The global stop marker. It carries no behaviour; it only pins the end of
/// the run to the configured stop time.
///
#[derive(Debug, Clone, Copy)]
pub struct Halt;

impl Event<DualLan> for Halt {
    fn handle(self, rt: &mut Runtime<DualLan>) {
        tracing::debug!(target: "dual_lan", "reached stop time at {}", rt.sim_time());
    }
}

impl From<ClientSend> for DualLanEvents {
    fn from(event: ClientSend) -> Self {
        Self::ClientSend(event)
    }
}

impl From<ServerRecv> for DualLanEvents {
    fn from(event: ServerRecv) -> Self {
        Self::ServerRecv(event)
    }
}

impl From<ClientRecv> for DualLanEvents {
    fn from(event: ClientRecv) -> Self {
        Self::ClientRecv(event)
    }
}

impl From<Halt> for DualLanEvents {
    fn from(event: Halt) -> Self {
        Self::Halt(event)
    }
}

///
/// Builds the scenario and runs it to its stop time. Returns the final
/// application state and the virtual end time of the run.
///
/// # Errors
///
/// Returns an error if the configuration fails validation; no topology is
/// constructed and no event is scheduled in that case.
///
pub fn run(config: &DualLanConfig) -> Result<(DualLan, SimTime), NetBuildError> {
    let app = build(config)?;
    let rt = Builder::seeded(0).quiet().build(app);

    let (app, time, _) = rt.run().unwrap_premature_abort();
    Ok((app, time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bootstrap_runs_to_stop_time() {
        let (app, time) = run(&DualLanConfig::default()).unwrap();

        assert_eq!(time, STOP_TIME);
        assert_eq!(app.log.sent.len(), NUM_CLIENTS);
        assert_eq!(app.log.served.len(), NUM_CLIENTS);
        assert_eq!(app.log.echoed.len(), NUM_CLIENTS);
    }

    #[test]
    fn client_stagger_is_literal_configuration() {
        for config in [
            DualLanConfig::default(),
            DualLanConfig {
                n_csma1: 120,
                n_csma2: 77,
                ..DualLanConfig::default()
            },
        ] {
            let (app, _) = run(&config).unwrap();

            let mut starts: Vec<SimTime> = app.log.sent.iter().map(|(_, t)| *t).collect();
            starts.sort();
            assert_eq!(
                starts,
                vec![
                    SimTime::from(2.0),
                    SimTime::from(2.3),
                    SimTime::from(2.8),
                    SimTime::from(3.0)
                ]
            );
        }
    }

    #[test]
    fn oversized_lans_are_rejected_before_building() {
        for config in [
            DualLanConfig {
                n_csma1: 251,
                ..DualLanConfig::default()
            },
            DualLanConfig {
                n_csma2: 251,
                ..DualLanConfig::default()
            },
        ] {
            assert!(matches!(
                build(&config),
                Err(NetBuildError::TooManyLanNodes { .. })
            ));
        }

        // The limit itself is fine.
        let config = DualLanConfig {
            n_csma1: 250,
            n_csma2: 250,
            ..DualLanConfig::default()
        };
        assert!(build(&config).is_ok());
    }

    #[test]
    fn undersized_lans_are_rejected() {
        assert!(matches!(
            build(&DualLanConfig {
                n_csma1: 3,
                ..DualLanConfig::default()
            }),
            Err(NetBuildError::TooFewLanNodes { .. })
        ));
        assert!(matches!(
            build(&DualLanConfig {
                n_csma2: 0,
                ..DualLanConfig::default()
            }),
            Err(NetBuildError::TooFewLanNodes { .. })
        ));
    }

    #[test]
    fn addressing_matches_the_block_plan() {
        let app = build(&DualLanConfig::default()).unwrap();

        // Server: last node of LAN 2, behind the gateway, so host .4
        // of the 10.1.2.0/24 block for three extra nodes.
        assert_eq!(
            app.server_sock,
            "10.1.2.4:9".parse::<SocketAddrV4>().unwrap()
        );

        let gw2 = app.topology.node_by_name("gw2").unwrap();
        assert!(gw2
            .interfaces()
            .iter()
            .any(|itf| itf.addr == Ipv4Addr::new(10, 1, 1, 1)));
    }

    #[test]
    fn echoes_return_after_the_round_trip() {
        let (app, _) = run(&DualLanConfig::default()).unwrap();

        let bits = 1024 * 8;
        let rtt = app.topology.route_transit(&app.route_up, bits)
            + app.topology.route_transit(&app.route_down, bits);

        for (client, sent_at) in &app.log.sent {
            let (_, echoed_at) = app
                .log
                .echoed
                .iter()
                .find(|(c, _)| c == client)
                .expect("every datagram is echoed");
            assert_eq!(*echoed_at, *sent_at + rtt);
        }
    }

    #[test]
    fn runs_are_deterministic() {
        let (a, _) = run(&DualLanConfig::default()).unwrap();
        let (b, _) = run(&DualLanConfig::default()).unwrap();
        assert_eq!(a.log, b.log);
    }

    #[test]
    fn tracing_records_all_packet_events() {
        let config = DualLanConfig {
            tracing: true,
            ..DualLanConfig::default()
        };
        let (app, _) = run(&config).unwrap();

        let trace = app.trace.expect("tracing was enabled");
        // Per transaction: client tx, server rx, server tx, client rx.
        assert_eq!(trace.records().len(), 4 * NUM_CLIENTS);
    }

    #[test]
    fn yaml_roundtrip() {
        let config = DualLanConfig {
            n_csma1: 10,
            tracing: true,
            ..DualLanConfig::default()
        };
        let yaml = serde_yml::to_string(&config).unwrap();
        let back: DualLanConfig = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(config, back);
    }
}
