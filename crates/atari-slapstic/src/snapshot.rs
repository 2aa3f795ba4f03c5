//! Save-state support.
//!
//! The chip keeps very little: its protocol state (with any pending bank)
//! and the committed bank. The profile is fixed by the part number.

use crate::chip::ChipId;
use crate::error::RestoreError;
use crate::slapstic::{Slapstic, State};

/// Working variables of one slapstic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub chip: ChipId,
    pub state: State,
    pub bank: u8,
}

impl Slapstic {
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            chip: self.chip(),
            state: self.state,
            bank: self.bank,
        }
    }

    /// Load a snapshot taken from the same part.
    ///
    /// The chip is left untouched if the snapshot is rejected.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RestoreError> {
        if snapshot.chip != self.chip() {
            return Err(RestoreError::ChipMismatch {
                expected: self.chip().number(),
                found: snapshot.chip.number(),
            });
        }
        for bank in [Some(snapshot.bank), snapshot.state.pending_bank()]
            .into_iter()
            .flatten()
        {
            if bank > 3 {
                return Err(RestoreError::BankOutOfRange(bank));
            }
        }
        match snapshot.state {
            State::Bitwise2 { toggle, .. } if toggle != 0 && toggle != 3 => {
                return Err(RestoreError::BadToggle(toggle));
            }
            _ => {}
        }

        self.state = snapshot.state;
        self.bank = snapshot.bank;
        Ok(())
    }
}
