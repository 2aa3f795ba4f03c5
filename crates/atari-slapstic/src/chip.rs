//! Per-part chip profiles.
//!
//! Seventeen part numbers have been found on boards, spread over two silicon
//! revisions. They all share the same state machine but respond to different
//! addresses; a [`ChipProfile`] holds everything that differs between parts.
//!
//! | Part | Rev | Boards |
//! |------|-----|--------|
//! | 101  | 1   | Empire Strikes Back, Tetris (unconfirmed) |
//! | 103  | 1   | Marble Madness |
//! | 104  | 1   | Gauntlet |
//! | 105  | 1   | Indiana Jones, Paperboy |
//! | 106  | 1   | Gauntlet II |
//! | 107  | 1   | Peter Packrat, Xybots, 2-Player Gauntlet, 720 Degrees |
//! | 108  | 1   | Road Runner, Super Sprint |
//! | 109  | 1   | Championship Sprint, Road Blasters |
//! | 110  | 1   | Road Blasters, APB |
//! | 111-114 | 2 | Pit Fighter (successive production runs) |
//! | 115  | 2   | Race Drivin' DSK board |
//! | 116  | 2   | Hydra, Tournament Cyberball 2072 |
//! | 117  | 2   | Race Drivin' main board |
//! | 118  | 2   | Rampart, Vindicators Part II |
//!
//! 103/110 and 106/109 decode identically despite the different numbers.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::pattern::Trigger;

/// Prefix printed on every slapstic package.
pub const PART_PREFIX: &str = "137412-";

const FIRST_PART: u16 = 101;
const LAST_PART: u16 = 118;
/// Gap in the numbering: no board with a 137412-102 has turned up.
const NEVER_SEEN: u16 = 102;

/// A validated slapstic part number (the `1xx` suffix of `137412-1xx`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PartRepr", into = "u16")
)]
pub struct ChipId(u16);

impl ChipId {
    /// 137412-103, the System 1 launch title's part.
    pub const MARBLE_MADNESS: Self = Self(103);

    /// Validate a part number.
    pub fn new(part: u16) -> Result<Self, ConfigError> {
        if !(FIRST_PART..=LAST_PART).contains(&part) {
            Err(ConfigError::UnknownChip(part))
        } else if part == NEVER_SEEN {
            Err(ConfigError::ReservedChip(part))
        } else {
            Ok(Self(part))
        }
    }

    /// Part number suffix, e.g. `104`.
    #[must_use]
    pub const fn number(self) -> u16 {
        self.0
    }

    /// The catalog entry for this part.
    #[must_use]
    pub fn profile(self) -> &'static ChipProfile {
        // The catalog is in part order with only 102 missing.
        let index = match self.0 {
            FIRST_PART => 0,
            n => usize::from(n - NEVER_SEEN),
        };
        &CATALOG[index]
    }
}

impl fmt::Display for ChipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PART_PREFIX}{}", self.0)
    }
}

/// Accepts `"104"` or `"137412-104"`.
impl FromStr for ChipId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(PART_PREFIX).unwrap_or(trimmed);
        let part = digits
            .parse::<u16>()
            .map_err(|_| ConfigError::MalformedPartNumber(s.to_string()))?;
        Self::new(part)
    }
}

impl TryFrom<u16> for ChipId {
    type Error = ConfigError;

    fn try_from(part: u16) -> Result<Self, Self::Error> {
        Self::new(part)
    }
}

impl From<ChipId> for u16 {
    fn from(id: ChipId) -> Self {
        id.0
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum PartRepr {
    Number(u16),
    Text(String),
}

#[cfg(feature = "serde")]
impl TryFrom<PartRepr> for ChipId {
    type Error = ConfigError;

    fn try_from(repr: PartRepr) -> Result<Self, Self::Error> {
        match repr {
            PartRepr::Number(part) => Self::new(part),
            PartRepr::Text(text) => text.parse(),
        }
    }
}

/// Silicon revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    /// SLAPSTIC, parts 101-110. Bit twiddling.
    Slapstic,
    /// SLAPSTIC-2, parts 111-118. Bank addition.
    Slapstic2,
}

/// Bit-twiddling patterns (revision 1 parts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitwisePatterns {
    /// Enters the bitwise sequence from the enabled state.
    pub arm: Trigger,
    pub clear0: Trigger,
    pub set0: Trigger,
    pub clear1: Trigger,
    pub set1: Trigger,
    /// Ends the twiddling; a bank-select access then commits.
    pub escape: Trigger,
}

/// Bank-addition patterns (revision 2 parts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditivePatterns {
    /// First access of the two-step entry.
    pub arm: Trigger,
    /// Second access of the two-step entry; seeds the pending bank.
    pub confirm: Trigger,
    pub plus1: Trigger,
    pub plus2: Trigger,
    /// Ends the additions; a bank-select access then commits.
    pub escape: Trigger,
}

/// Everything that distinguishes one slapstic part from another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipProfile {
    pub part: ChipId,
    pub revision: Revision,
    /// Verified against real hardware.
    pub confirmed: bool,
    /// Boards known to carry this part.
    pub games: &'static [&'static str],
    /// Bank selected at power-up and reset.
    pub starting_bank: u8,
    /// Simple-mode addresses for banks 0-3.
    pub bank_select: [u16; 4],
    /// First step of the alternate sequence. Unknown on part 101.
    pub alt1: Option<Trigger>,
    /// Middle step of the alternate sequence.
    pub alt2: Trigger,
    /// Bank-carrying step of the alternate sequence.
    pub alt3: Trigger,
    /// Confirming access that commits the alternate bank.
    pub alt4: Trigger,
    /// Right shift that brings the bank bits of the alt3 address down to 0-1.
    pub alt_shift: u8,
    pub bitwise: Option<BitwisePatterns>,
    pub additive: Option<AdditivePatterns>,
}

impl ChipProfile {
    /// Look up a part by number.
    pub fn lookup(part: u16) -> Result<&'static Self, ConfigError> {
        Ok(ChipId::new(part)?.profile())
    }

    /// Every known part, in part-number order.
    pub fn iter() -> impl Iterator<Item = &'static Self> {
        CATALOG.iter()
    }

    /// Bank index selected by a simple-mode access to `address`.
    #[must_use]
    pub fn bank_for(&self, address: u32) -> Option<u8> {
        self.bank_select
            .iter()
            .position(|&a| u32::from(a) == address)
            .map(|i| i as u8)
    }

    /// True if `address` is any of the four bank-select addresses.
    #[must_use]
    pub fn is_bank_select(&self, address: u32) -> bool {
        self.bank_for(address).is_some()
    }

    /// Bank carried by an alternate-sequence address.
    #[must_use]
    pub fn alt_bank(&self, address: u32) -> u8 {
        ((address >> self.alt_shift) & 3) as u8
    }
}

/// All known parts.
#[must_use]
pub fn catalog() -> &'static [ChipProfile] {
    &CATALOG
}

static CATALOG: [ChipProfile; 17] = [
    // 137412-101
    ChipProfile {
        part: ChipId(101),
        revision: Revision::Slapstic,
        confirmed: false,
        games: &["Empire Strikes Back", "Tetris"],
        starting_bank: 3,
        bank_select: [0x0080, 0x0090, 0x00A0, 0x00B0],
        alt1: None,
        alt2: Trigger::new(0x1FFF, 0x1DFF),
        alt3: Trigger::new(0x1FFC, 0x1B5C),
        alt4: Trigger::new(0x1FCF, 0x0080),
        alt_shift: 0,
        bitwise: Some(BitwisePatterns {
            arm: Trigger::new(0x1FF0, 0x1540),
            clear0: Trigger::new(0x1FF3, 0x1540),
            set0: Trigger::new(0x1FF3, 0x1541),
            clear1: Trigger::new(0x1FF3, 0x1542),
            set1: Trigger::new(0x1FF3, 0x1543),
            escape: Trigger::new(0x1FF8, 0x1550),
        }),
        additive: None,
    },
    // 137412-103
    ChipProfile {
        part: ChipId(103),
        revision: Revision::Slapstic,
        confirmed: true,
        games: &["Marble Madness"],
        starting_bank: 3,
        bank_select: [0x0040, 0x0050, 0x0060, 0x0070],
        alt1: Some(Trigger::new(0x007F, 0x002D)),
        alt2: Trigger::new(0x3FFF, 0x3D14),
        alt3: Trigger::new(0x3FFC, 0x3D24),
        alt4: Trigger::new(0x3FCF, 0x0040),
        alt_shift: 0,
        bitwise: Some(BitwisePatterns {
            arm: Trigger::new(0x3FF0, 0x34C0),
            clear0: Trigger::new(0x3FF3, 0x34C0),
            set0: Trigger::new(0x3FF3, 0x34C1),
            clear1: Trigger::new(0x3FF3, 0x34C2),
            set1: Trigger::new(0x3FF3, 0x34C3),
            escape: Trigger::new(0x3FF8, 0x34D0),
        }),
        additive: None,
    },
    // 137412-104
    ChipProfile {
        part: ChipId(104),
        revision: Revision::Slapstic,
        confirmed: true,
        games: &["Gauntlet"],
        starting_bank: 3,
        bank_select: [0x0020, 0x0028, 0x0030, 0x0038],
        alt1: Some(Trigger::new(0x007F, 0x0069)),
        alt2: Trigger::new(0x3FFF, 0x3735),
        alt3: Trigger::new(0x3FFC, 0x3764),
        alt4: Trigger::new(0x3FE7, 0x0020),
        alt_shift: 0,
        bitwise: Some(BitwisePatterns {
            arm: Trigger::new(0x3FF0, 0x3D90),
            clear0: Trigger::new(0x3FF3, 0x3D90),
            set0: Trigger::new(0x3FF3, 0x3D91),
            clear1: Trigger::new(0x3FF3, 0x3D92),
            set1: Trigger::new(0x3FF3, 0x3D93),
            escape: Trigger::new(0x3FF8, 0x3DA0),
        }),
        additive: None,
    },
    // 137412-105
    ChipProfile {
        part: ChipId(105),
        revision: Revision::Slapstic,
        confirmed: true,
        games: &["Indiana Jones and the Temple of Doom", "Paperboy"],
        starting_bank: 3,
        bank_select: [0x0010, 0x0014, 0x0018, 0x001C],
        alt1: Some(Trigger::new(0x007F, 0x003D)),
        alt2: Trigger::new(0x3FFF, 0x0092),
        alt3: Trigger::new(0x3FFC, 0x00A4),
        alt4: Trigger::new(0x3FF3, 0x0010),
        alt_shift: 0,
        bitwise: Some(BitwisePatterns {
            arm: Trigger::new(0x3FF0, 0x35B0),
            clear0: Trigger::new(0x3FF3, 0x35B0),
            set0: Trigger::new(0x3FF3, 0x35B1),
            clear1: Trigger::new(0x3FF3, 0x35B2),
            set1: Trigger::new(0x3FF3, 0x35B3),
            escape: Trigger::new(0x3FF8, 0x35C0),
        }),
        additive: None,
    },
    // 137412-106
    ChipProfile {
        part: ChipId(106),
        revision: Revision::Slapstic,
        confirmed: true,
        games: &["Gauntlet II"],
        starting_bank: 3,
        bank_select: [0x0008, 0x000A, 0x000C, 0x000E],
        alt1: Some(Trigger::new(0x007F, 0x002B)),
        alt2: Trigger::new(0x3FFF, 0x0052),
        alt3: Trigger::new(0x3FFC, 0x0064),
        alt4: Trigger::new(0x3FF9, 0x0008),
        alt_shift: 0,
        bitwise: Some(BitwisePatterns {
            arm: Trigger::new(0x3FF0, 0x3DA0),
            clear0: Trigger::new(0x3FF3, 0x3DA0),
            set0: Trigger::new(0x3FF3, 0x3DA1),
            clear1: Trigger::new(0x3FF3, 0x3DA2),
            set1: Trigger::new(0x3FF3, 0x3DA3),
            escape: Trigger::new(0x3FF8, 0x3DB0),
        }),
        additive: None,
    },
    // 137412-107
    ChipProfile {
        part: ChipId(107),
        revision: Revision::Slapstic,
        confirmed: true,
        games: &["Peter Packrat", "Xybots", "2-Player Gauntlet", "720 Degrees"],
        starting_bank: 3,
        bank_select: [0x0018, 0x001A, 0x001C, 0x001E],
        alt1: Some(Trigger::new(0x007F, 0x006B)),
        alt2: Trigger::new(0x3FFF, 0x3D52),
        alt3: Trigger::new(0x3FFC, 0x3D64),
        alt4: Trigger::new(0x3FF9, 0x0018),
        alt_shift: 0,
        bitwise: Some(BitwisePatterns {
            arm: Trigger::new(0x3FF0, 0x00A0),
            clear0: Trigger::new(0x3FF3, 0x00A0),
            set0: Trigger::new(0x3FF3, 0x00A1),
            clear1: Trigger::new(0x3FF3, 0x00A2),
            set1: Trigger::new(0x3FF3, 0x00A3),
            escape: Trigger::new(0x3FF8, 0x00B0),
        }),
        additive: None,
    },
    // 137412-108
    ChipProfile {
        part: ChipId(108),
        revision: Revision::Slapstic,
        confirmed: true,
        games: &["Road Runner", "Super Sprint"],
        starting_bank: 3,
        bank_select: [0x0028, 0x002A, 0x002C, 0x002E],
        alt1: Some(Trigger::new(0x007F, 0x001F)),
        alt2: Trigger::new(0x3FFF, 0x3772),
        alt3: Trigger::new(0x3FFC, 0x3764),
        alt4: Trigger::new(0x3FF9, 0x0028),
        alt_shift: 0,
        bitwise: Some(BitwisePatterns {
            arm: Trigger::new(0x3FF0, 0x0060),
            clear0: Trigger::new(0x3FF3, 0x0060),
            set0: Trigger::new(0x3FF3, 0x0061),
            clear1: Trigger::new(0x3FF3, 0x0062),
            set1: Trigger::new(0x3FF3, 0x0063),
            escape: Trigger::new(0x3FF8, 0x0070),
        }),
        additive: None,
    },
    // 137412-109
    ChipProfile {
        part: ChipId(109),
        revision: Revision::Slapstic,
        confirmed: true,
        games: &["Championship Sprint", "Road Blasters"],
        starting_bank: 3,
        bank_select: [0x0008, 0x000A, 0x000C, 0x000E],
        alt1: Some(Trigger::new(0x007F, 0x002B)),
        alt2: Trigger::new(0x3FFF, 0x0052),
        alt3: Trigger::new(0x3FFC, 0x0064),
        alt4: Trigger::new(0x3FF9, 0x0008),
        alt_shift: 0,
        bitwise: Some(BitwisePatterns {
            arm: Trigger::new(0x3FF0, 0x3DA0),
            clear0: Trigger::new(0x3FF3, 0x3DA0),
            set0: Trigger::new(0x3FF3, 0x3DA1),
            clear1: Trigger::new(0x3FF3, 0x3DA2),
            set1: Trigger::new(0x3FF3, 0x3DA3),
            escape: Trigger::new(0x3FF8, 0x3DB0),
        }),
        additive: None,
    },
    // 137412-110
    ChipProfile {
        part: ChipId(110),
        revision: Revision::Slapstic,
        confirmed: true,
        games: &["Road Blasters", "APB"],
        starting_bank: 3,
        bank_select: [0x0040, 0x0050, 0x0060, 0x0070],
        alt1: Some(Trigger::new(0x007F, 0x002D)),
        alt2: Trigger::new(0x3FFF, 0x3D14),
        alt3: Trigger::new(0x3FFC, 0x3D24),
        alt4: Trigger::new(0x3FCF, 0x0040),
        alt_shift: 0,
        bitwise: Some(BitwisePatterns {
            arm: Trigger::new(0x3FF0, 0x34C0),
            clear0: Trigger::new(0x3FF3, 0x34C0),
            set0: Trigger::new(0x3FF3, 0x34C1),
            clear1: Trigger::new(0x3FF3, 0x34C2),
            set1: Trigger::new(0x3FF3, 0x34C3),
            escape: Trigger::new(0x3FF8, 0x34D0),
        }),
        additive: None,
    },
    // 137412-111
    ChipProfile {
        part: ChipId(111),
        revision: Revision::Slapstic2,
        confirmed: true,
        games: &["Pit Fighter (Aug 09 1990)"],
        starting_bank: 0,
        bank_select: [0x0042, 0x0052, 0x0062, 0x0072],
        alt1: Some(Trigger::new(0x007F, 0x000A)),
        alt2: Trigger::new(0x3FFF, 0x28A4),
        alt3: Trigger::new(0x0784, 0x0080),
        alt4: Trigger::new(0x3FCF, 0x0042),
        alt_shift: 0,
        bitwise: None,
        additive: Some(AdditivePatterns {
            arm: Trigger::new(0x3FFF, 0x00A1),
            confirm: Trigger::new(0x3FFF, 0x00A2),
            plus1: Trigger::new(0x3C4F, 0x284D),
            plus2: Trigger::new(0x3A5F, 0x285D),
            escape: Trigger::new(0x3FF8, 0x2800),
        }),
    },
    // 137412-112
    ChipProfile {
        part: ChipId(112),
        revision: Revision::Slapstic2,
        confirmed: true,
        games: &["Pit Fighter (Aug 22 1990)"],
        starting_bank: 0,
        bank_select: [0x002C, 0x003C, 0x006C, 0x007C],
        alt1: Some(Trigger::new(0x007F, 0x0014)),
        alt2: Trigger::new(0x3FFF, 0x29A0),
        alt3: Trigger::new(0x0073, 0x0010),
        alt4: Trigger::new(0x3FAF, 0x002C),
        alt_shift: 2,
        bitwise: None,
        additive: Some(AdditivePatterns {
            arm: Trigger::new(0x3FFF, 0x2DCE),
            confirm: Trigger::new(0x3FFF, 0x2DCF),
            plus1: Trigger::new(0x3DEF, 0x15E2),
            plus2: Trigger::new(0x3FBF, 0x15A2),
            escape: Trigger::new(0x3FFC, 0x1450),
        }),
    },
    // 137412-113
    ChipProfile {
        part: ChipId(113),
        revision: Revision::Slapstic2,
        confirmed: true,
        games: &["Pit Fighter (Oct 09 1990)"],
        starting_bank: 0,
        bank_select: [0x0008, 0x0018, 0x0028, 0x0038],
        alt1: Some(Trigger::new(0x007F, 0x0059)),
        alt2: Trigger::new(0x3FFF, 0x11A5),
        alt3: Trigger::new(0x0860, 0x0800),
        alt4: Trigger::new(0x3FCF, 0x0008),
        alt_shift: 3,
        bitwise: None,
        additive: Some(AdditivePatterns {
            arm: Trigger::new(0x3FFF, 0x049B),
            confirm: Trigger::new(0x3FFF, 0x049C),
            plus1: Trigger::new(0x3FCF, 0x3EC7),
            plus2: Trigger::new(0x3EDF, 0x3ED7),
            escape: Trigger::new(0x3FFF, 0x3FB2),
        }),
    },
    // 137412-114
    ChipProfile {
        part: ChipId(114),
        revision: Revision::Slapstic2,
        confirmed: true,
        games: &["Pit Fighter (Nov 01 1990)"],
        starting_bank: 0,
        bank_select: [0x0040, 0x0048, 0x0050, 0x0058],
        alt1: Some(Trigger::new(0x007F, 0x0016)),
        alt2: Trigger::new(0x3FFF, 0x24DE),
        alt3: Trigger::new(0x3871, 0x0000),
        alt4: Trigger::new(0x3FE7, 0x0040),
        alt_shift: 1,
        bitwise: None,
        additive: Some(AdditivePatterns {
            arm: Trigger::new(0x3FFF, 0x0AB7),
            confirm: Trigger::new(0x3FFF, 0x0AB8),
            plus1: Trigger::new(0x3F63, 0x0D40),
            plus2: Trigger::new(0x3FD9, 0x0DC8),
            escape: Trigger::new(0x3FFF, 0x0AB0),
        }),
    },
    // 137412-115
    ChipProfile {
        part: ChipId(115),
        revision: Revision::Slapstic2,
        confirmed: true,
        games: &["Race Drivin' DSK board"],
        starting_bank: 0,
        bank_select: [0x0020, 0x0022, 0x0024, 0x0026],
        alt1: Some(Trigger::new(0x007F, 0x0054)),
        alt2: Trigger::new(0x3FFF, 0x3E01),
        alt3: Trigger::new(0x3879, 0x0029),
        alt4: Trigger::new(0x3FF9, 0x0020),
        alt_shift: 1,
        bitwise: None,
        additive: Some(AdditivePatterns {
            arm: Trigger::new(0x3FFF, 0x2591),
            confirm: Trigger::new(0x3FFF, 0x2592),
            plus1: Trigger::new(0x3FE6, 0x3402),
            plus2: Trigger::new(0x3FB4, 0x3410),
            escape: Trigger::new(0x3FFF, 0x34A2),
        }),
    },
    // 137412-116
    ChipProfile {
        part: ChipId(116),
        revision: Revision::Slapstic2,
        confirmed: true,
        games: &["Hydra", "Tournament Cyberball 2072"],
        starting_bank: 0,
        bank_select: [0x0044, 0x004C, 0x0054, 0x005C],
        alt1: Some(Trigger::new(0x007F, 0x0069)),
        alt2: Trigger::new(0x3FFF, 0x2BAB),
        alt3: Trigger::new(0x387C, 0x0808),
        alt4: Trigger::new(0x3FE7, 0x0044),
        alt_shift: 0,
        bitwise: None,
        additive: Some(AdditivePatterns {
            arm: Trigger::new(0x3FFF, 0x3F7C),
            confirm: Trigger::new(0x3FFF, 0x3F7D),
            plus1: Trigger::new(0x3DB2, 0x3C12),
            plus2: Trigger::new(0x3FE3, 0x3E43),
            escape: Trigger::new(0x3FFF, 0x2BA8),
        }),
    },
    // 137412-117
    ChipProfile {
        part: ChipId(117),
        revision: Revision::Slapstic2,
        confirmed: true,
        games: &["Race Drivin' main board"],
        starting_bank: 0,
        bank_select: [0x0008, 0x001A, 0x002C, 0x003E],
        alt1: Some(Trigger::new(0x007F, 0x007D)),
        alt2: Trigger::new(0x3FFF, 0x3580),
        alt3: Trigger::new(0x0079, 0x0020),
        alt4: Trigger::new(0x3FC9, 0x0008),
        alt_shift: 1,
        bitwise: None,
        additive: Some(AdditivePatterns {
            arm: Trigger::new(0x3FFF, 0x0676),
            confirm: Trigger::new(0x3FFF, 0x0677),
            plus1: Trigger::new(0x3E62, 0x1A42),
            plus2: Trigger::new(0x3E35, 0x1A11),
            escape: Trigger::new(0x3FFF, 0x1A42),
        }),
    },
    // 137412-118
    ChipProfile {
        part: ChipId(118),
        revision: Revision::Slapstic2,
        confirmed: true,
        games: &["Rampart", "Vindicators Part II"],
        starting_bank: 0,
        bank_select: [0x0014, 0x0034, 0x0054, 0x0074],
        alt1: Some(Trigger::new(0x007F, 0x0002)),
        alt2: Trigger::new(0x3FFF, 0x1950),
        alt3: Trigger::new(0x0067, 0x0020),
        alt4: Trigger::new(0x3F9F, 0x0014),
        alt_shift: 3,
        bitwise: None,
        additive: Some(AdditivePatterns {
            arm: Trigger::new(0x3FFF, 0x1958),
            confirm: Trigger::new(0x3FFF, 0x1959),
            plus1: Trigger::new(0x3F73, 0x3052),
            plus2: Trigger::new(0x3F67, 0x3042),
            escape: Trigger::new(0x3FF8, 0x30E0),
        }),
    },
];
