use crate::net::BitrateParseError;
use std::{error::Error, fmt::Display, net::Ipv4Addr};

///
/// An error that occurred while assembling a topology, before any
/// event is scheduled.
///
/// All of these are fatal precondition failures: nothing about a partially
/// built topology is recoverable, the caller reports the error and exits.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetBuildError {
    /// A shared-medium segment exceeds the supported node count.
    TooManyLanNodes {
        /// The name of the offending segment.
        lan: String,
        /// The requested number of extra nodes.
        count: u32,
        /// The maximum supported number of extra nodes per segment.
        limit: u32,
    },

    /// A shared-medium segment carries fewer nodes than the installed
    /// applications require.
    TooFewLanNodes {
        /// The name of the offending segment.
        lan: String,
        /// The requested number of extra nodes.
        count: u32,
        /// The minimum number of extra nodes required.
        needed: u32,
    },

    /// A node name was used twice.
    DuplicateNode(String),

    /// A point-to-point link was requested with identical endpoints.
    SelfLink(String),

    /// A segment was requested over a member list with duplicates.
    DuplicateMember(String),

    /// A subnet block ran out of host addresses.
    AddressPoolExhausted {
        /// The base address of the exhausted block.
        base: Ipv4Addr,
    },

    /// A subnet block was created from an invalid base/mask pair.
    InvalidSubnet {
        /// The requested base address.
        base: Ipv4Addr,
        /// The requested mask.
        mask: Ipv4Addr,
    },

    /// A bitrate string could not be parsed.
    Bitrate(BitrateParseError),
}

impl Display for NetBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyLanNodes { lan, count, limit } => write!(
                f,
                "Too many csma nodes on '{lan}' ({count}), no more than {limit} each."
            ),
            Self::TooFewLanNodes { lan, count, needed } => write!(
                f,
                "Too few csma nodes on '{lan}' ({count}), at least {needed} needed."
            ),
            Self::DuplicateNode(name) => write!(f, "A node named '{name}' already exists."),
            Self::SelfLink(name) => {
                write!(f, "A point-to-point link cannot connect '{name}' to itself.")
            }
            Self::DuplicateMember(name) => {
                write!(f, "Node '{name}' cannot join the same segment twice.")
            }
            Self::AddressPoolExhausted { base } => {
                write!(f, "No host addresses left in subnet {base}.")
            }
            Self::InvalidSubnet { base, mask } => {
                write!(f, "Invalid subnet base/mask pair {base}/{mask}.")
            }
            Self::Bitrate(e) => Display::fmt(e, f),
        }
    }
}

impl Error for NetBuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bitrate(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BitrateParseError> for NetBuildError {
    fn from(e: BitrateParseError) -> Self {
        Self::Bitrate(e)
    }
}
