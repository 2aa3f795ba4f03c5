//! Host CPU introspection for the alternate sequence.
//!
//! Only the middle address of the three-step alternate sequence has to fall
//! inside the slapstic's window; the first and third can be anywhere in the
//! host's address space. On 68000 boards the sequence is produced by a
//! single `move.w (An),(An)` or `cmpm.w (An)+,(An)+` whose opcode fetch and
//! source operand never reach the chip's window, so the board only reports
//! the middle access. The adapter here looks at the executing instruction to
//! recover the other two steps.

use crate::chip::ChipProfile;
use crate::pattern;
use crate::slapstic::State;

/// Read-only view of the host CPU at the moment of a bus access.
pub trait ProcessorView {
    /// Program counter as seen by the bus (after prefetch).
    fn pc(&self) -> u32;

    /// Address of the instruction currently executing.
    ///
    /// On a prefetching CPU this trails [`pc`](Self::pc). Defaults to `pc`
    /// for views that do not track it separately.
    fn instruction_pc(&self) -> u32 {
        self.pc()
    }

    /// Read a 16-bit word from the host's address space without side effects.
    fn read_word(&self, address: u32) -> u16;

    /// Value of address register `An` (0-7).
    fn address_register(&self, n: usize) -> u32;
}

/// View for boards that expose nothing about their CPU.
///
/// Every read returns zero. Pair it with a bus-only [`HostCpu`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIntrospection;

impl ProcessorView for NoIntrospection {
    fn pc(&self) -> u32 {
        0
    }

    fn read_word(&self, _address: u32) -> u16 {
        0
    }

    fn address_register(&self, _n: usize) -> u32 {
        0
    }
}

/// 68000 external address bus width.
const M68K_ADDRESS_MASK: u32 = 0x00FF_FFFF;

/// `move.w (An),(An)` with any register pair.
const MOVE_W_INDIRECT: u16 = 0x3090;
/// `cmpm.w (An)+,(An)+` with any register pair.
const CMPM_W: u16 = 0xB148;
/// Clears both register fields of the two forms above.
const REGISTER_FIELDS: u16 = 0xF1F8;

/// CPU family driving the slapstic's address lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostCpu {
    /// Motorola 68000 (Pit Fighter, Hydra, Race Drivin', Rampart).
    #[default]
    M68000,
    /// Motorola 68010 (System 1, Gauntlet hardware).
    M68010,
    /// DEC T-11 (System 2: Paperboy, 720 Degrees, Super Sprint).
    T11,
    /// MOS 6502 (Tetris).
    M6502,
    /// Motorola 6809 (Empire Strikes Back).
    M6809,
}

impl HostCpu {
    /// True if the adapter inspects this CPU's state.
    #[must_use]
    pub const fn introspects(self) -> bool {
        matches!(self, Self::M68000 | Self::M68010)
    }

    /// Decide the next state after an `alt2` hit seen from the enabled state.
    ///
    /// 68k hosts get the instruction checked: the sequence only stands if
    /// the executing opcode produced all three accesses, in which case the
    /// bank is captured here and the machine skips straight to the
    /// confirming step. Other hosts are trusted on the bus access alone.
    #[must_use]
    pub fn resolve_alternate2<V: ProcessorView + ?Sized>(
        self,
        profile: &ChipProfile,
        cpu: &V,
    ) -> State {
        if self.introspects() {
            resolve_m68k(profile, cpu)
        } else {
            State::Alternate2
        }
    }
}

fn resolve_m68k<V: ProcessorView + ?Sized>(profile: &ChipProfile, cpu: &V) -> State {
    // The chip's A0 is the CPU's A1: byte addresses are shifted down by one.
    if !pattern::hit(profile.alt1, cpu.pc() >> 1) {
        return State::Enabled;
    }

    let opcode = cpu.read_word(cpu.instruction_pc() & M68K_ADDRESS_MASK);
    let form = opcode & REGISTER_FIELDS;
    if form != MOVE_W_INDIRECT && form != CMPM_W {
        // Without a second hit inside this instruction the next opcode
        // fetch breaks the sequence anyway.
        return State::Enabled;
    }

    let register = usize::from((opcode >> 9) & 7);
    let value = cpu.address_register(register) >> 1;
    if profile.alt3.matches(value) {
        State::Alternate3 {
            bank: profile.alt_bank(value),
        }
    } else {
        State::Enabled
    }
}
