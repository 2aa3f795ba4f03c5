//! Address search helpers shared by the scenario tests.

#![allow(dead_code)]

use atari_slapstic::{ChipProfile, Trigger};

/// Every address the chip can see, excluding the universal `$0000`.
pub fn chip_addresses() -> impl Iterator<Item = u32> {
    1..0x4000
}

/// First address satisfying `pred`.
pub fn find(pred: impl Fn(u32) -> bool) -> u32 {
    chip_addresses()
        .find(|&a| pred(a))
        .expect("no address satisfies the predicate")
}

/// True if `address` does nothing in the enabled state.
pub fn ignored_when_enabled(profile: &ChipProfile, address: u32) -> bool {
    address != 0
        && !profile.is_bank_select(address)
        && !profile.bitwise.is_some_and(|b| b.arm.matches(address))
        && !profile.additive.is_some_and(|a| a.arm.matches(address))
        && !profile.alt1.is_some_and(|t| t.matches(address))
        && !profile.alt2.matches(address)
}

/// Lowest address hitting `trigger`.
pub fn first_hit(trigger: Trigger) -> u32 {
    find(|a| trigger.matches(a))
}
