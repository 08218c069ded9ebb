//!
//! Tools for building strongly typed network topologies.
//!
//! Instead of configuring helpers through string-keyed attribute maps, every
//! recognized option is a field of a configuration struct: link media are
//! described by [`LinkConfig`], address blocks by [`SubnetBlock`] and echo
//! applications by [`EchoServerConfig`] / [`EchoClientConfig`]. Nodes are
//! referred to through [`NodeId`] handles handed out by the [`Topology`].
//!

mod addr;
mod bitrate;
mod echo;
mod error;
mod link;
mod node;
mod topology;
mod trace;

pub use self::addr::*;
pub use self::bitrate::*;
pub use self::echo::*;
pub use self::error::*;
pub use self::link::*;
pub use self::node::*;
pub use self::topology::*;
pub use self::trace::*;
