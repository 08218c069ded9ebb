use crate::net::NetBuildError;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, net::Ipv4Addr};

///
/// An IPv4 address block assigned to one network segment.
///
/// Host addresses are handed out sequentially starting at the first host
/// address of the block. Blocks for different segments are expected to be
/// disjoint; the allocator itself only guarantees that no single block hands
/// out an address twice, and that neither the network nor the broadcast
/// address is ever assigned.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSubnetBlock")]
pub struct SubnetBlock {
    base: Ipv4Addr,
    mask: Ipv4Addr,
    next_host: u32,
}

/// The unvalidated deserialization shape of a [`SubnetBlock`].
#[derive(Deserialize)]
struct RawSubnetBlock {
    base: Ipv4Addr,
    mask: Ipv4Addr,
    #[serde(default = "default_next_host")]
    next_host: u32,
}

fn default_next_host() -> u32 {
    1
}

impl TryFrom<RawSubnetBlock> for SubnetBlock {
    type Error = NetBuildError;

    fn try_from(raw: RawSubnetBlock) -> Result<Self, Self::Error> {
        let mut block = SubnetBlock::new(raw.base, raw.mask)?;
        block.next_host = raw.next_host;
        Ok(block)
    }
}

impl SubnetBlock {
    ///
    /// Creates a new block from a network base address and a subnet mask.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask is not contiguous or the base address
    /// has host bits set.
    ///
    pub fn new(base: Ipv4Addr, mask: Ipv4Addr) -> Result<Self, NetBuildError> {
        let mask_bits = u32::from(mask);
        // A valid mask consists of leading ones only, and must leave room
        // for at least one host.
        if !(!mask_bits).wrapping_add(1).is_power_of_two() {
            return Err(NetBuildError::InvalidSubnet { base, mask });
        }
        if u32::from(base) & !mask_bits != 0 {
            return Err(NetBuildError::InvalidSubnet { base, mask });
        }

        Ok(Self {
            base,
            mask,
            next_host: 1,
        })
    }

    /// The network base address of this block.
    #[must_use]
    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    /// The subnet mask of this block.
    #[must_use]
    pub fn mask(&self) -> Ipv4Addr {
        self.mask
    }

    ///
    /// Assigns the next free host address of this block.
    ///
    /// # Errors
    ///
    /// Returns an error once all host addresses are taken.
    ///
    pub fn assign(&mut self) -> Result<Ipv4Addr, NetBuildError> {
        let host_bits = !u32::from(self.mask);
        // The all-ones host part is the broadcast address.
        if self.next_host >= host_bits {
            return Err(NetBuildError::AddressPoolExhausted { base: self.base });
        }

        let addr = Ipv4Addr::from(u32::from(self.base) | self.next_host);
        self.next_host += 1;
        Ok(addr)
    }

    ///
    /// Checks whether an address belongs to this block.
    ///
    #[must_use]
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & u32::from(self.mask) == u32::from(self.base)
    }
}

impl Display for SubnetBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}",
            self.base,
            u32::from(self.mask).count_ones()
        )
    }
}
