use crate::time::Duration;
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{Debug, Display},
    str::FromStr,
};

///
/// The maximum throughput of a transmission medium in bit/s.
///
/// Bitrates can be written in the usual shorthand notation:
///
/// ```
/// # use simnet::net::Bitrate;
/// let rate: Bitrate = "5Mbps".parse().unwrap();
/// assert_eq!(rate, Bitrate::from_mbps(5));
/// ```
///
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bitrate(u64);

impl Bitrate {
    /// Creates a bitrate from a raw bit/s value.
    #[must_use]
    pub const fn from_bps(bps: u64) -> Self {
        Self(bps)
    }

    /// Creates a bitrate from a kilobit/s value.
    #[must_use]
    pub const fn from_kbps(kbps: u64) -> Self {
        Self(kbps * 1_000)
    }

    /// Creates a bitrate from a megabit/s value.
    #[must_use]
    pub const fn from_mbps(mbps: u64) -> Self {
        Self(mbps * 1_000_000)
    }

    /// Creates a bitrate from a gigabit/s value.
    #[must_use]
    pub const fn from_gbps(gbps: u64) -> Self {
        Self(gbps * 1_000_000_000)
    }

    /// Returns the raw bit/s value.
    #[must_use]
    pub const fn as_bps(self) -> u64 {
        self.0
    }

    ///
    /// Calculates the time it takes to put `bits` onto a medium with this
    /// bitrate. A zero bitrate transmits instantaneous.
    ///
    #[must_use]
    pub fn transmission_time(self, bits: u64) -> Duration {
        if self.0 == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(bits as f64 / self.0 as f64)
        }
    }
}

impl FromStr for Bitrate {
    type Err = BitrateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (value, scale) = if let Some(prefix) = s.strip_suffix("Gbps") {
            (prefix, 1_000_000_000.0)
        } else if let Some(prefix) = s.strip_suffix("Mbps") {
            (prefix, 1_000_000.0)
        } else if let Some(prefix) = s.strip_suffix("Kbps") {
            (prefix, 1_000.0)
        } else if let Some(prefix) = s.strip_suffix("bps") {
            (prefix, 1.0)
        } else {
            return Err(BitrateParseError(s.to_string()));
        };

        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| BitrateParseError(s.to_string()))?;
        if value < 0.0 || !value.is_finite() {
            return Err(BitrateParseError(s.to_string()));
        }

        Ok(Self((value * scale).round() as u64))
    }
}

impl TryFrom<String> for Bitrate {
    type Error = BitrateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Bitrate> for String {
    fn from(rate: Bitrate) -> Self {
        rate.to_string()
    }
}

impl Display for Bitrate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            n if n >= 1_000_000_000 && n % 1_000_000_000 == 0 => {
                write!(f, "{}Gbps", n / 1_000_000_000)
            }
            n if n >= 1_000_000 && n % 1_000_000 == 0 => write!(f, "{}Mbps", n / 1_000_000),
            n if n >= 1_000 && n % 1_000 == 0 => write!(f, "{}Kbps", n / 1_000),
            n => write!(f, "{n}bps"),
        }
    }
}

impl Debug for Bitrate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

///
/// An error emitted when a bitrate string could not be parsed.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitrateParseError(pub(crate) String);

impl Display for BitrateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid bitrate '{}', expected e.g. '5Mbps' or '9600bps'",
            self.0
        )
    }
}

impl Error for BitrateParseError {}
