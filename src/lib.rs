//!
//! A minimal discrete event simulator.
//!
//! `simnet` provides the tools to build an event simulation with completely
//! custom events: a [`Runtime`](crate::runtime::Runtime) that owns the future
//! event set, virtual [`time`](crate::time) managment and a seedable source of
//! randomness. On top of that, the `net` feature adds a strongly typed
//! topology layer (point-to-point links, shared-medium segments, address
//! blocks and echo applications) together with two reference scenarios.
//!
//! # Building a simple event simulation
//!
//! ```
//! use simnet::prelude::*;
//!
//! #[derive(Debug)]
//! enum MyEventSet {
//!     EventA { what_happend: String },
//!     EventB { ack: bool },
//! }
//!
//! impl EventSet<MyApp> for MyEventSet {
//!     fn handle(self, _rt: &mut Runtime<MyApp>) {
//!         // Do something
//!     }
//! }
//!
//! #[derive(Default)]
//! struct MyApp {
//!     logs: Vec<String>,
//! }
//!
//! impl Application for MyApp {
//!     type EventSet = MyEventSet;
//! }
//!
//! let rt = Builder::new().quiet().build(MyApp::default());
//! let result = rt.run();
//! ```
//!
//! If an event is executed [`EventSet::handle`](crate::runtime::EventSet::handle)
//! will be called with the runtime as parameter. If new events are to be
//! created as result of an event execution, this mutable reference can be used
//! to add new events to the future event set. The runtime is an explicitly
//! constructed, passed-by-reference object; there is no process-wide
//! scheduler singleton.
//!
//! # Simulating networks
//!
//! The [`net`](crate::net) module describes topologies as values: nodes are
//! referred to by named handles, links are configured through
//! [`LinkConfig`](crate::net::LinkConfig) instead of stringly-typed attribute
//! maps, and IPv4 address blocks are assigned per segment. The
//! [`scenarios`](crate::scenarios) module wires these pieces into two complete
//! simulations, exposed as the `announce` and `dual-lan` binaries.
//!

pub mod prelude;
pub mod runtime;
pub mod time;

#[cfg(feature = "net")]
pub mod net;

#[cfg(feature = "net")]
pub mod scenarios;
