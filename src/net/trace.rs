use crate::{net::NodeId, time::SimTime};
use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    net::SocketAddrV4,
    path::{Path, PathBuf},
};

///
/// The direction of a traced packet event, seen from the recording node.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceDirection {
    /// The node put the packet onto the medium.
    Tx,
    /// The packet arrived at the node.
    Rx,
}

impl Display for TraceDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tx => write!(f, "+"),
            Self::Rx => write!(f, "r"),
        }
    }
}

///
/// One recorded packet event.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// The virtual time of the event.
    pub time: SimTime,
    /// The recording node.
    pub node: NodeId,
    /// Tx or Rx, seen from the recording node.
    pub direction: TraceDirection,
    /// The datagram source.
    pub src: SocketAddrV4,
    /// The datagram destination.
    pub dst: SocketAddrV4,
    /// The payload size in bytes.
    pub bytes: usize,
}

impl Display for TraceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:.9} {} {} > {} len={}",
            self.direction,
            self.time.as_secs_f64(),
            self.node,
            self.src,
            self.dst,
            self.bytes
        )
    }
}

///
/// A plain-text packet trace, collecting one record per packet event.
///
/// When enabled, the bootstrap records every transmission and arrival here.
/// After the run the trace is flushed to one file per traced node, named
/// `<base>-<node>.tr` under a common base name.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketTrace {
    base: String,
    records: Vec<TraceRecord>,
}

impl PacketTrace {
    ///
    /// Creates an empty trace under the given base name.
    ///
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            records: Vec::new(),
        }
    }

    /// The common base name of all emitted trace files.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// All records, in recording order.
    #[must_use]
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    ///
    /// Appends a record to the trace.
    ///
    pub fn record(&mut self, record: TraceRecord) {
        self.records.push(record);
    }

    ///
    /// Writes the trace to disk, one file per traced node, and returns the
    /// emitted paths.
    ///
    /// # Errors
    ///
    /// Forwards io errors of the underlying file operations.
    ///
    pub fn write_to(&self, dir: impl AsRef<Path>) -> std::io::Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut nodes: Vec<NodeId> = self.records.iter().map(|r| r.node).collect();
        nodes.sort_unstable();
        nodes.dedup();

        let mut paths = Vec::with_capacity(nodes.len());
        for node in nodes {
            let path = dir.join(format!("{}-{}.tr", self.base, node.raw()));
            let mut writer = BufWriter::new(File::create(&path)?);
            for record in self.records.iter().filter(|r| r.node == node) {
                writeln!(writer, "{record}")?;
            }
            writer.flush()?;
            paths.push(path);
        }
        Ok(paths)
    }
}
