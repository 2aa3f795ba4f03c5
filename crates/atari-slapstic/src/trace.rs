//! Access log for reverse-engineering bank-switch sequences.
//!
//! The board forwards each access after clocking the chip. Lines look like
//!
//! ```text
//! pc=01A2B4: 3D14 B=3 ALTERNATE2
//! ```
//!
//! with a dashed separator whenever more than a second of emulated time has
//! passed since the previous line, so bursts of bank switching stand out.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use crate::slapstic::{Slapstic, State};

/// Quiet period that starts a new block in the log.
const BLOCK_GAP: Duration = Duration::from_secs(1);
const SEPARATOR: &str = "------------------------------------";

/// The chip as it stands after one access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRecord {
    pub address: u32,
    pub bank: u8,
    pub state: State,
}

impl fmt::Display for AccessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X} B={} {}", self.address, self.bank, self.state)
    }
}

impl Slapstic {
    /// Record for an access that has just been clocked.
    #[must_use]
    pub fn access_record(&self, address: u32) -> AccessRecord {
        AccessRecord {
            address,
            bank: self.bank,
            state: self.state,
        }
    }
}

/// Text log of slapstic accesses.
pub struct AccessLog<W: Write> {
    out: W,
    last: Duration,
}

impl<W: Write> AccessLog<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: Duration::ZERO,
        }
    }

    /// Append one access. `time` is emulated time; `context` describes the
    /// host at the time of the access.
    pub fn record(
        &mut self,
        time: Duration,
        context: &str,
        record: &AccessRecord,
    ) -> io::Result<()> {
        if time.saturating_sub(self.last) > BLOCK_GAP {
            writeln!(self.out, "{SEPARATOR}")?;
        }
        self.last = time;
        writeln!(self.out, "{context}: {record}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
