//! The bank-switch state machine.
//!
//! Every sequence starts with an access to `$0000`, which enables the chip
//! from any state. From there one of four protocols selects the next bank:
//!
//! - simple: a bank-select address, with any unrelated accesses in between;
//! - alternate: `alt1`, `alt2`, `alt3` back to back, then `alt4`. The bank
//!   comes from the `alt3` address;
//! - bitwise (rev 1): arm, bank-select, set/clear twiddles, escape,
//!   bank-select;
//! - additive (rev 2): arm, confirm, +1/+2 increments, escape, bank-select.
//!
//! The chip clocks on every access to its window, so the board has to call
//! [`Slapstic::access`] for each one, in order, and use the returned bank for
//! that same access.

use std::fmt;

use crate::chip::{AdditivePatterns, BitwisePatterns, ChipId, ChipProfile};
use crate::config::SlapsticConfig;
use crate::cpu::{HostCpu, ProcessorView};
use crate::error::ConfigError;
use crate::pattern;

/// The chip has fourteen address inputs, A0-A13.
const ADDRESS_LINES: u32 = 0x3FFF;

/// Protocol state. Pending banks live in the states that accumulate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    /// Ignoring everything but `$0000`.
    Disabled,
    /// Armed, waiting for the first access of a sequence.
    Enabled,
    Alternate1,
    Alternate2,
    /// Alternate bank captured, waiting for `alt4`.
    Alternate3 { bank: u8 },
    /// Waiting for a bank-select address to start twiddling.
    Bitwise1,
    /// Twiddling. `toggle` swaps the meaning of the low two address bits
    /// after each successful twiddle.
    Bitwise2 { bank: u8, toggle: u8 },
    Bitwise3 { bank: u8 },
    Additive1,
    Additive2 { bank: u8 },
    Additive3 { bank: u8 },
}

impl State {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Disabled => "DISABLED",
            Self::Enabled => "ENABLED",
            Self::Alternate1 => "ALTERNATE1",
            Self::Alternate2 => "ALTERNATE2",
            Self::Alternate3 { .. } => "ALTERNATE3",
            Self::Bitwise1 => "BITWISE1",
            Self::Bitwise2 { .. } => "BITWISE2",
            Self::Bitwise3 { .. } => "BITWISE3",
            Self::Additive1 => "ADDITIVE1",
            Self::Additive2 { .. } => "ADDITIVE2",
            Self::Additive3 { .. } => "ADDITIVE3",
        }
    }

    /// Bank held mid-sequence, if this state carries one.
    #[must_use]
    pub const fn pending_bank(self) -> Option<u8> {
        match self {
            Self::Alternate3 { bank }
            | Self::Bitwise2 { bank, .. }
            | Self::Bitwise3 { bank }
            | Self::Additive2 { bank }
            | Self::Additive3 { bank } => Some(bank),
            Self::Disabled
            | Self::Enabled
            | Self::Alternate1
            | Self::Alternate2
            | Self::Bitwise1
            | Self::Additive1 => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Atari Slapstic 137412-1xx.
#[derive(Debug, Clone)]
pub struct Slapstic {
    pub(crate) profile: &'static ChipProfile,
    pub(crate) host: HostCpu,
    pub(crate) state: State,
    pub(crate) bank: u8,
}

impl Slapstic {
    /// Create a chip in its power-up state.
    #[must_use]
    pub fn new(chip: ChipId, host: HostCpu) -> Self {
        let profile = chip.profile();
        if !profile.confirmed {
            log::warn!("slapstic {chip} has not been verified against hardware");
        }
        log::info!(
            "slapstic {chip} on {host:?}, starting in bank {}",
            profile.starting_bank
        );
        Self {
            profile,
            host,
            state: State::Disabled,
            bank: profile.starting_bank,
        }
    }

    /// Create a chip from a bare part number.
    pub fn for_part(part: u16, host: HostCpu) -> Result<Self, ConfigError> {
        Ok(Self::new(ChipId::new(part)?, host))
    }

    #[must_use]
    pub fn from_config(config: &SlapsticConfig) -> Self {
        Self::new(config.chip, config.host)
    }

    /// Return to the power-up state.
    pub fn reset(&mut self) {
        self.state = State::Disabled;
        self.bank = self.profile.starting_bank;
    }

    /// Currently selected bank, without clocking the chip.
    #[must_use]
    pub const fn bank(&self) -> u8 {
        self.bank
    }

    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub const fn profile(&self) -> &'static ChipProfile {
        self.profile
    }

    #[must_use]
    pub const fn chip(&self) -> ChipId {
        self.profile.part
    }

    #[must_use]
    pub const fn host(&self) -> HostCpu {
        self.host
    }

    /// Clock one access and return the bank to use for it.
    ///
    /// Only A0-A13 of `address` reach the chip; higher bits are dropped.
    pub fn access<V: ProcessorView + ?Sized>(&mut self, address: u32, cpu: &V) -> u8 {
        let address = address & ADDRESS_LINES;
        let (state, bank) = self.transition(address, cpu);
        if bank != self.bank {
            log::debug!(
                "slapstic {}: bank {} -> {bank} via {}",
                self.profile.part,
                self.bank,
                self.state
            );
        }
        self.state = state;
        self.bank = bank;
        log::trace!("{address:04X} B={bank} {state}");
        bank
    }

    /// Transition for one access: the next state and the bank after it.
    fn transition<V: ProcessorView + ?Sized>(&self, address: u32, cpu: &V) -> (State, u8) {
        let profile = self.profile;
        let current = self.bank;

        // $0000 enables the chip from anywhere.
        if address == 0 {
            return (State::Enabled, current);
        }

        let state = match self.state {
            State::Disabled => State::Disabled,

            State::Enabled => {
                if profile.bitwise.is_some_and(|bits| bits.arm.matches(address)) {
                    State::Bitwise1
                } else if profile.additive.is_some_and(|adds| adds.arm.matches(address)) {
                    State::Additive1
                } else if pattern::hit(profile.alt1, address) {
                    State::Alternate1
                } else if profile.alt2.matches(address) {
                    // alt1 is usually an opcode fetch the board never shows us.
                    self.host.resolve_alternate2(profile, cpu)
                } else if let Some(bank) = profile.bank_for(address) {
                    return (State::Disabled, bank);
                } else {
                    State::Enabled
                }
            }

            State::Alternate1 => {
                if profile.alt2.matches(address) {
                    State::Alternate2
                } else {
                    State::Enabled
                }
            }
            State::Alternate2 => {
                if profile.alt3.matches(address) {
                    State::Alternate3 {
                        bank: profile.alt_bank(address),
                    }
                } else {
                    State::Enabled
                }
            }
            State::Alternate3 { bank } => {
                if profile.alt4.matches(address) {
                    return (State::Disabled, bank);
                }
                self.state
            }

            State::Bitwise1 => {
                if profile.is_bank_select(address) {
                    State::Bitwise2 {
                        bank: current,
                        toggle: 0,
                    }
                } else {
                    State::Bitwise1
                }
            }
            State::Bitwise2 { bank, toggle } => match profile.bitwise {
                Some(bits) => twiddle(&bits, bank, toggle, address),
                None => self.state,
            },
            State::Bitwise3 { bank } => {
                if profile.is_bank_select(address) {
                    return (State::Disabled, bank);
                }
                self.state
            }

            State::Additive1 => match profile.additive {
                Some(adds) if adds.confirm.matches(address) => State::Additive2 { bank: current },
                _ => State::Enabled,
            },
            State::Additive2 { bank } => match profile.additive {
                Some(adds) => add(&adds, bank, address),
                None => self.state,
            },
            State::Additive3 { bank } => {
                if profile.is_bank_select(address) {
                    return (State::Disabled, bank);
                }
                self.state
            }
        };

        (state, current)
    }
}

/// One access in the `Bitwise2` state. The twiddles are tried in order and
/// only the first hit counts; the escape is only checked when none hit.
fn twiddle(bits: &BitwisePatterns, bank: u8, toggle: u8, address: u32) -> State {
    let flipped = address ^ u32::from(toggle);
    let twiddled = if bits.clear0.matches(flipped) {
        Some(bank & !1)
    } else if bits.set0.matches(flipped) {
        Some(bank | 1)
    } else if bits.clear1.matches(flipped) {
        Some(bank & !2)
    } else if bits.set1.matches(flipped) {
        Some(bank | 2)
    } else {
        None
    };

    match twiddled {
        Some(bank) => State::Bitwise2 {
            bank,
            toggle: toggle ^ 3,
        },
        None if bits.escape.matches(address) => State::Bitwise3 { bank },
        None => State::Bitwise2 { bank, toggle },
    }
}

/// One access in the `Additive2` state. Unlike the twiddles, +1, +2 and the
/// escape are independent and can all hit on the same access.
fn add(adds: &AdditivePatterns, mut bank: u8, address: u32) -> State {
    if adds.plus1.matches(address) {
        bank = (bank + 1) & 3;
    }
    if adds.plus2.matches(address) {
        bank = (bank + 2) & 3;
    }
    if adds.escape.matches(address) {
        State::Additive3 { bank }
    } else {
        State::Additive2 { bank }
    }
}
