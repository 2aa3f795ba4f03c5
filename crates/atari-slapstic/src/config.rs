//! Slapstic board configuration.

use crate::chip::ChipId;
use crate::cpu::HostCpu;
use crate::error::ConfigError;

/// Which slapstic a board carries and what drives it.
///
/// With the `serde` feature the chip may be given as `104`, `"104"` or
/// `"137412-104"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlapsticConfig {
    pub chip: ChipId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub host: HostCpu,
}

impl SlapsticConfig {
    pub fn new(part: u16, host: HostCpu) -> Result<Self, ConfigError> {
        Ok(Self {
            chip: ChipId::new(part)?,
            host,
        })
    }
}

impl Default for SlapsticConfig {
    /// Marble Madness on System 1.
    fn default() -> Self {
        Self {
            chip: ChipId::MARBLE_MADNESS,
            host: HostCpu::M68010,
        }
    }
}
