//! Address trigger patterns.
//!
//! Every special address the slapstic reacts to (apart from `$0000` and the
//! four bank-select addresses) is described by a mask/value pair: an access
//! hits the pattern when the masked address bits equal the masked value.

/// A mask/value address-matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trigger {
    /// Address bits that take part in the comparison.
    pub mask: u16,
    /// Expected state of the masked bits.
    pub value: u16,
}

impl Trigger {
    #[must_use]
    pub const fn new(mask: u16, value: u16) -> Self {
        Self { mask, value }
    }

    /// True if `address` hits this pattern.
    ///
    /// Only the chip's address lines take part; the mask never covers more
    /// than A0-A13, so wider host addresses are compared on their low bits.
    #[must_use]
    pub const fn matches(self, address: u32) -> bool {
        let mask = self.mask as u32;
        (address & mask) == (self.value as u32 & mask)
    }
}

/// Match against a pattern that may be unknown.
///
/// Profiles reverse-engineered from incomplete dumps leave some patterns
/// unknown; an unknown pattern never matches.
#[must_use]
pub const fn hit(pattern: Option<Trigger>, address: u32) -> bool {
    match pattern {
        Some(trigger) => trigger.matches(address),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_bits_are_ignored() {
        let alt4 = Trigger::new(0x3FCF, 0x0040);
        assert!(alt4.matches(0x0040));
        assert!(alt4.matches(0x0070));
        assert!(!alt4.matches(0x0041));
    }

    #[test]
    fn high_address_bits_outside_mask_are_ignored() {
        let alt2 = Trigger::new(0x3FFF, 0x3D14);
        assert!(alt2.matches(0x0001_3D14));
        assert!(!alt2.matches(0x3D15));
    }

    #[test]
    fn zero_pattern_matches_everything() {
        let any = Trigger::new(0, 0);
        assert!(any.matches(0));
        assert!(any.matches(0x3FFF));
        assert!(hit(Some(any), 0x1234));
    }

    #[test]
    fn unknown_pattern_never_matches() {
        for address in [0x0000, 0x007F, 0x3FFF, 0xFFFF_FFFF] {
            assert!(!hit(None, address));
        }
    }
}
