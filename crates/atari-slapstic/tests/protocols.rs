//! Bank-switch protocols exercised against every part in the catalog.

mod common;

use atari_slapstic::{ChipProfile, HostCpu, NoIntrospection, Revision, Slapstic, State};
use common::{find, first_hit, ignored_when_enabled};

fn clock(chip: &mut Slapstic, addresses: &[u32]) -> u8 {
    let mut bank = chip.bank();
    for &address in addresses {
        bank = chip.access(address, &NoIntrospection);
    }
    bank
}

/// Lowest address that enters the alternate sequence from the enabled state.
fn alt1_address(profile: &ChipProfile) -> Option<u32> {
    let alt1 = profile.alt1?;
    Some(find(|a| {
        alt1.matches(a)
            && !profile.bitwise.is_some_and(|b| b.arm.matches(a))
            && !profile.additive.is_some_and(|b| b.arm.matches(a))
    }))
}

#[test]
fn empire_strikes_back_simple_switch() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut chip = Slapstic::for_part(101, HostCpu::M6809).expect("known part");
    assert_eq!(chip.bank(), 3);
    assert_eq!(clock(&mut chip, &[0x0000, 0x0090]), 1);
    assert_eq!(chip.state(), State::Disabled);
}

#[test]
fn simple_mode_selects_every_bank_on_every_part() {
    for profile in ChipProfile::iter() {
        for (bank, &select) in profile.bank_select.iter().enumerate() {
            let mut chip = Slapstic::new(profile.part, HostCpu::M68000);
            let result = clock(&mut chip, &[0x0000, u32::from(select)]);
            assert_eq!(usize::from(result), bank, "{}", profile.part);
            assert_eq!(chip.state(), State::Disabled, "{}", profile.part);
        }
    }
}

#[test]
fn simple_mode_tolerates_unrelated_accesses() {
    for profile in ChipProfile::iter() {
        let noise: Vec<u32> = (0x0100..0x0400)
            .filter(|&a| ignored_when_enabled(profile, a))
            .take(16)
            .collect();
        let mut chip = Slapstic::new(profile.part, HostCpu::M68000);
        clock(&mut chip, &[0x0000]);
        clock(&mut chip, &noise);
        assert_eq!(chip.state(), State::Enabled, "{}", profile.part);
        assert_eq!(clock(&mut chip, &[u32::from(profile.bank_select[2])]), 2);
    }
}

#[test]
fn alternate_mode_commits_the_encoded_bank() {
    for profile in ChipProfile::iter() {
        let Some(arm) = alt1_address(profile) else {
            continue;
        };
        let mid = first_hit(profile.alt2);
        let confirm = first_hit(profile.alt4);
        for bank in 0..4 {
            let carry = find(|a| profile.alt3.matches(a) && profile.alt_bank(a) == bank);
            for host in [HostCpu::M68000, HostCpu::T11] {
                let mut chip = Slapstic::new(profile.part, host);
                clock(&mut chip, &[0x0000, arm, mid, carry]);
                assert_eq!(chip.state(), State::Alternate3 { bank }, "{}", profile.part);
                assert_eq!(clock(&mut chip, &[confirm]), bank, "{}", profile.part);
                assert_eq!(chip.state(), State::Disabled);
            }
        }
    }
}

#[test]
fn alternate_mode_must_be_uninterrupted() {
    for profile in ChipProfile::iter() {
        let Some(arm) = alt1_address(profile) else {
            continue;
        };
        let mid = first_hit(profile.alt2);
        let not_alt2 = find(|a| !profile.alt2.matches(a));
        let not_alt3 = find(|a| !profile.alt3.matches(a));

        let mut chip = Slapstic::new(profile.part, HostCpu::T11);
        clock(&mut chip, &[0x0000, arm, not_alt2]);
        assert_eq!(chip.state(), State::Enabled, "{}", profile.part);

        let mut chip = Slapstic::new(profile.part, HostCpu::T11);
        clock(&mut chip, &[0x0000, arm, mid, not_alt3]);
        assert_eq!(chip.state(), State::Enabled, "{}", profile.part);
        assert_eq!(chip.bank(), profile.starting_bank);
    }
}

#[test]
fn alternate3_ignores_everything_but_alt4() {
    let profile = ChipProfile::lookup(116).expect("known part");
    let arm = alt1_address(profile).expect("alt1 known");
    let carry = find(|a| profile.alt3.matches(a) && profile.alt_bank(a) == 1);
    let mut chip = Slapstic::new(profile.part, HostCpu::M68000);
    clock(&mut chip, &[0x0000, arm, first_hit(profile.alt2), carry]);

    let noise: Vec<u32> = (1..0x200).filter(|&a| !profile.alt4.matches(a)).collect();
    clock(&mut chip, &noise);
    assert_eq!(chip.state(), State::Alternate3 { bank: 1 });
    assert_eq!(chip.bank(), 0);
}

#[test]
fn empire_strikes_back_alternate_without_alt1() {
    // The 6809 board only shows the middle access.
    let profile = ChipProfile::lookup(101).expect("known part");
    let carry = find(|a| profile.alt3.matches(a) && profile.alt_bank(a) == 2);
    let mut chip = Slapstic::new(profile.part, HostCpu::M6809);
    clock(&mut chip, &[0x0000, first_hit(profile.alt2)]);
    assert_eq!(chip.state(), State::Alternate2);
    assert_eq!(clock(&mut chip, &[carry, first_hit(profile.alt4)]), 2);

    // A 68000 host with no way to validate the instruction gives up.
    let mut chip = Slapstic::new(profile.part, HostCpu::M68000);
    clock(&mut chip, &[0x0000, first_hit(profile.alt2)]);
    assert_eq!(chip.state(), State::Enabled);
}

#[test]
fn bitwise_mode_on_every_rev1_part() {
    for profile in ChipProfile::iter().filter(|p| p.revision == Revision::Slapstic) {
        let bits = profile.bitwise.expect("rev 1 parts twiddle bits");
        let select = u32::from(profile.bank_select[0]);
        let clear0 = u32::from(bits.clear0.value);
        let set1 = u32::from(bits.set1.value);
        let escape = u32::from(bits.escape.value);

        let mut chip = Slapstic::new(profile.part, HostCpu::M68000);
        clock(&mut chip, &[0x0000, u32::from(bits.arm.value), select]);
        assert_eq!(chip.state(), State::Bitwise2 { bank: 3, toggle: 0 });

        // clear bit 0 (3 -> 2), set bit 1 through the toggle (stays 2),
        // clear bit 0 again with the toggle back to 0.
        clock(&mut chip, &[clear0, set1 ^ 3, clear0, escape]);
        assert_eq!(chip.state(), State::Bitwise3 { bank: 2 }, "{}", profile.part);
        assert_eq!(chip.bank(), 3);
        assert_eq!(clock(&mut chip, &[select]), 2, "{}", profile.part);
    }
}

#[test]
fn additive_mode_adds_three_in_one_access() {
    for profile in ChipProfile::iter().filter(|p| p.revision == Revision::Slapstic2) {
        let adds = profile.additive.expect("rev 2 parts add");
        let both = find(|a| {
            adds.plus1.matches(a) && adds.plus2.matches(a) && !adds.escape.matches(a)
        });

        let mut chip = Slapstic::new(profile.part, HostCpu::M68000);
        let entry = [0x0000, u32::from(adds.arm.value), u32::from(adds.confirm.value)];
        clock(&mut chip, &entry);
        assert_eq!(chip.state(), State::Additive2 { bank: 0 }, "{}", profile.part);
        clock(&mut chip, &[both]);
        assert_eq!(chip.state(), State::Additive2 { bank: 3 }, "{}", profile.part);
    }
}

#[test]
fn race_drivin_escape_also_adds_one() {
    // On 137412-117 the escape address is inside the +1 pattern.
    let profile = ChipProfile::lookup(117).expect("known part");
    let adds = profile.additive.expect("rev 2 part");
    let escape = u32::from(adds.escape.value);
    assert!(adds.plus1.matches(escape));

    let mut chip = Slapstic::new(profile.part, HostCpu::M68000);
    clock(&mut chip, &[0x0000, 0x0676, 0x0677, escape]);
    assert_eq!(chip.state(), State::Additive3 { bank: 1 });

    // An explicit +1 before the escape lands one bank further.
    let plus1_only = find(|a| {
        adds.plus1.matches(a) && !adds.plus2.matches(a) && !adds.escape.matches(a)
    });
    let mut chip = Slapstic::new(profile.part, HostCpu::M68000);
    clock(&mut chip, &[0x0000, 0x0676, 0x0677, plus1_only, escape]);
    assert_eq!(chip.state(), State::Additive3 { bank: 2 });
    assert_eq!(clock(&mut chip, &[0x0008]), 2);
}

#[test]
fn additive_entry_must_be_back_to_back() {
    let mut chip = Slapstic::for_part(118, HostCpu::M68000).expect("known part");
    clock(&mut chip, &[0x0000, 0x1958, 0x0200, 0x1959]);
    assert_eq!(chip.state(), State::Enabled);
}

#[test]
fn reset_returns_every_part_to_its_starting_bank() {
    for profile in ChipProfile::iter() {
        let mut chip = Slapstic::new(profile.part, HostCpu::M68000);
        clock(&mut chip, &[0x0000, u32::from(profile.bank_select[1])]);
        chip.reset();
        assert_eq!(chip.bank(), profile.starting_bank);
        assert_eq!(chip.state(), State::Disabled);
    }
}
