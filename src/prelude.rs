//!
//! Convenience re-export of common members.
//!

//
// # Generic core exports
//

pub use crate::runtime::Builder;
pub use crate::runtime::Runtime;
pub use crate::runtime::RuntimeLimit;
pub use crate::runtime::RuntimeResult;

pub use crate::runtime::Application;
pub use crate::runtime::Event;
pub use crate::runtime::EventSet;

pub use crate::runtime::PeriodicTask;

pub use crate::time::Duration;
pub use crate::time::SimTime;

//
// # feature = "net"
//

#[cfg(feature = "net")]
pub use crate::net::Bitrate;
#[cfg(feature = "net")]
pub use crate::net::LinkConfig;
#[cfg(feature = "net")]
pub use crate::net::NetBuildError;

#[cfg(feature = "net")]
pub use crate::net::Node;
#[cfg(feature = "net")]
pub use crate::net::NodeId;
#[cfg(feature = "net")]
pub use crate::net::SegmentId;
#[cfg(feature = "net")]
pub use crate::net::SubnetBlock;
#[cfg(feature = "net")]
pub use crate::net::Topology;

#[cfg(feature = "net")]
pub use crate::net::EchoClientConfig;
#[cfg(feature = "net")]
pub use crate::net::EchoServerConfig;
