use crate::{
    net::NodeId,
    time::{Duration, SimTime},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddrV4;

///
/// Configuration of an echo service: a server that returns every received
/// datagram unchanged to its sender.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoServerConfig {
    /// The port the server listens on.
    pub port: u16,
    /// The virtual time the server starts accepting datagrams.
    pub start: SimTime,
    /// The virtual time the server stops accepting datagrams.
    pub stop: SimTime,
}

impl EchoServerConfig {
    ///
    /// Creates a server configuration listening on `port` for the
    /// whole run.
    ///
    #[must_use]
    pub const fn new(port: u16) -> Self {
        Self {
            port,
            start: SimTime::MIN,
            stop: SimTime::MAX,
        }
    }

    /// Restricts the serving window of this configuration.
    #[must_use]
    pub fn active(mut self, start: SimTime, stop: SimTime) -> Self {
        self.start = start;
        self.stop = stop;
        self
    }
}

///
/// Configuration of an echo client: a peer that sends a bounded number of
/// fixed-size datagrams to a remote echo server.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoClientConfig {
    /// The address and port of the echo server.
    pub remote: SocketAddrV4,
    /// The number of datagrams to send before going silent.
    pub max_packets: usize,
    /// The virtual-time offset between two datagrams.
    pub interval: Duration,
    /// The payload size per datagram, in bytes.
    pub packet_size: usize,
    /// The virtual time of the first datagram.
    pub start: SimTime,
    /// The virtual time after which no datagram is sent anymore.
    pub stop: SimTime,
}

impl EchoClientConfig {
    ///
    /// Creates a client configuration targeting `remote`, sending a single
    /// 1 KiB datagram per second until reconfigured.
    ///
    #[must_use]
    pub const fn new(remote: SocketAddrV4) -> Self {
        Self {
            remote,
            max_packets: 1,
            interval: Duration::from_secs(1),
            packet_size: 1024,
            start: SimTime::MIN,
            stop: SimTime::MAX,
        }
    }

    /// Restricts the sending window of this configuration.
    #[must_use]
    pub fn active(mut self, start: SimTime, stop: SimTime) -> Self {
        self.start = start;
        self.stop = stop;
        self
    }
}

///
/// An echo server installed on a node.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoServer {
    /// The hosting node.
    pub node: NodeId,
    /// The service configuration.
    pub config: EchoServerConfig,
}

///
/// An echo client installed on a node.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoClient {
    /// The hosting node.
    pub node: NodeId,
    /// The peer configuration.
    pub config: EchoClientConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_defaults_and_window() {
        let remote: SocketAddrV4 = "10.1.2.4:9".parse().unwrap();

        let config = EchoClientConfig::new(remote);
        assert_eq!(config.max_packets, 1);
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.packet_size, 1024);
        assert_eq!(config.start, SimTime::MIN);
        assert_eq!(config.stop, SimTime::MAX);

        let config = config.active(SimTime::from(2.0), SimTime::from(10.0));
        assert_eq!(config.start, SimTime::from(2.0));
        assert_eq!(config.stop, SimTime::from(10.0));
    }

    #[test]
    fn server_window() {
        let config = EchoServerConfig::new(9).active(SimTime::from(1.0), SimTime::from(10.0));
        assert_eq!(config.port, 9);
        assert_eq!(config.start, SimTime::from(1.0));
        assert_eq!(config.stop, SimTime::from(10.0));
    }
}
