//!
//! Complete reference simulations built from the runtime and net layers.
//!
//! Both scenarios are exposed as binaries: `announce` drives a repeating
//! announcement timer, `dual-lan` bootstraps two CSMA segments bridged by a
//! point-to-point link and runs an echo client/server workload over it.
//!

pub mod announce;
pub mod dual_lan;
