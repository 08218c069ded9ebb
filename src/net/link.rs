use crate::{net::Bitrate, time::Duration};
use rand::{distributions::Uniform, Rng};
use serde::{Deserialize, Serialize};

///
/// The capabilities of a transmission medium.
///
/// Every recognized option of a link is a field of this struct; there is no
/// string-keyed attribute dispatch. The same configuration is used for
/// point-to-point links and shared-medium segments.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// The maximum throughput of the medium.
    pub bitrate: Bitrate,
    /// The propagation delay a packet endures while traversing the medium.
    pub delay: Duration,
    /// The variance in delay. Zero by default, keeping runs deterministic.
    #[serde(default)]
    pub jitter: Duration,
}

impl LinkConfig {
    ///
    /// Creates a jitter-free link configuration.
    ///
    #[must_use]
    pub const fn new(bitrate: Bitrate, delay: Duration) -> Self {
        Self {
            bitrate,
            delay,
            jitter: Duration::ZERO,
        }
    }

    ///
    /// Adds a delay variance to the configuration.
    ///
    #[must_use]
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    ///
    /// Calculates the duration a packet of `bits` size travels on this
    /// medium: propagation delay plus transmission time.
    ///
    #[must_use]
    pub fn transit_time(&self, bits: u64) -> Duration {
        self.delay + self.bitrate.transmission_time(bits)
    }

    ///
    /// Like [`transit_time`](LinkConfig::transit_time), but samples the
    /// configured jitter from the given rng.
    ///
    pub fn transit_time_jittered(&self, bits: u64, rng: &mut impl Rng) -> Duration {
        let base = self.transit_time(bits);
        if self.jitter == Duration::ZERO {
            base
        } else {
            let perc = rng.sample(Uniform::new(0.0f64, self.jitter.as_secs_f64()));
            base + Duration::from_secs_f64(perc)
        }
    }

    ///
    /// Calculates the duration the medium is busy putting the packet onto
    /// the wire, independent of propagation delay.
    ///
    #[must_use]
    pub fn busy_time(&self, bits: u64) -> Duration {
        self.bitrate.transmission_time(bits)
    }
}
