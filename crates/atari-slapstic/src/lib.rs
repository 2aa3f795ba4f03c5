//! Atari Slapstic (137412-1xx) security and bank-switching chip.
//!
//! The slapstic sits between the CPU's address bus and a protected program
//! ROM on Atari coin-op boards from 1984 to 1990. Its two bank-select outputs
//! replace two ROM address lines, and it changes bank only when the CPU
//! issues one of several secret address sequences, all starting with an
//! access to `$0000`.
//!
//! ```text
//!         A9   1 +-v-+ 20  A8
//!         A10  2 |   | 19  A7
//!         A11  3 |   | 18  A6
//!         A12  4 |   | 17  A5
//!         A13  5 |   | 16  A4
//!         /CS  6 |   | 15  A3
//!         CLK  7 |   | 14  A2
//!         VCC  8 |   | 13  A1
//!         BS1  9 |   | 12  A0
//!         BS0 10 +---+ 11 GND
//! ```
//!
//! On 16-bit hosts A0-A13 of the chip are wired to A1-A14 of the CPU, so the
//! chip sees word offsets into its window.
//!
//! The chip reportedly keeps its bank in DRAM and falls back to the default
//! bank after several seconds without a clock. That has never been
//! confirmed and is not emulated.

mod chip;
mod config;
mod cpu;
mod error;
mod pattern;
mod rom;
mod slapstic;
mod snapshot;
mod trace;

pub use chip::{
    AdditivePatterns, BitwisePatterns, ChipId, ChipProfile, PART_PREFIX, Revision, catalog,
};
pub use config::SlapsticConfig;
pub use cpu::{HostCpu, NoIntrospection, ProcessorView};
pub use error::{ConfigError, RestoreError, RomError};
pub use pattern::Trigger;
pub use rom::BankedRom;
pub use slapstic::{Slapstic, State};
pub use snapshot::Snapshot;
pub use trace::{AccessLog, AccessRecord};
