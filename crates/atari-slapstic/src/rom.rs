//! Program ROM banked by a slapstic.
//!
//! Boards wire the chip's BS0/BS1 outputs in place of two ROM address lines
//! (traditionally A12 and A13), so the CPU sees a window one bank wide whose
//! contents depend on the chip. Each read of the window clocks the chip
//! first and then fetches from the bank it returns.

use crate::cpu::ProcessorView;
use crate::error::RomError;
use crate::slapstic::Slapstic;

/// ROM image split into four equal banks.
pub struct BankedRom {
    data: Vec<u8>,
    bank_size: usize,
}

impl BankedRom {
    pub fn new(data: Vec<u8>) -> Result<Self, RomError> {
        let bank_size = data.len() / 4;
        if bank_size == 0 || data.len() % 4 != 0 || bank_size % 2 != 0 {
            return Err(RomError::BadSize(data.len()));
        }
        Ok(Self { data, bank_size })
    }

    /// Size of the CPU-visible window in bytes.
    #[must_use]
    pub const fn bank_size(&self) -> usize {
        self.bank_size
    }

    /// 16-bit read at byte `offset` into the window (68000, T-11).
    ///
    /// The chip's A0 is the CPU's A1, so the chip sees the word offset.
    pub fn read_word<V: ProcessorView + ?Sized>(
        &self,
        slapstic: &mut Slapstic,
        offset: u32,
        cpu: &V,
    ) -> u16 {
        let bank = slapstic.access(offset >> 1, cpu);
        self.peek_word(bank, offset)
    }

    /// 8-bit read at byte `offset` into the window (6502, 6809).
    pub fn read_byte<V: ProcessorView + ?Sized>(
        &self,
        slapstic: &mut Slapstic,
        offset: u32,
        cpu: &V,
    ) -> u8 {
        let bank = slapstic.access(offset, cpu);
        self.peek_byte(bank, offset)
    }

    /// Big-endian word from a given bank without clocking the chip.
    #[must_use]
    pub fn peek_word(&self, bank: u8, offset: u32) -> u16 {
        let index = self.index(bank, offset & !1);
        u16::from_be_bytes([self.data[index], self.data[index + 1]])
    }

    #[must_use]
    pub fn peek_byte(&self, bank: u8, offset: u32) -> u8 {
        self.data[self.index(bank, offset)]
    }

    fn index(&self, bank: u8, offset: u32) -> usize {
        usize::from(bank & 3) * self.bank_size + offset as usize % self.bank_size
    }
}
