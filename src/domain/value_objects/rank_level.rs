//! Guild rank ordering.
//!
//! Rank rows store an integer level; authorization compares the typed
//! [`RankLevel`] and the caller's [`EffectiveRank`] instead of raw numbers.

use serde::{Deserialize, Serialize};

/// Level of one of the three ranks seeded for every guild.
///
/// Variants are declared lowest first so the derived ordering matches
/// authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RankLevel {
    Member,
    ViceLeader,
    Leader,
}

impl RankLevel {
    /// All seeded levels, highest first.
    pub const ALL: [RankLevel; 3] = [RankLevel::Leader, RankLevel::ViceLeader, RankLevel::Member];

    /// Integer stored in `guild_ranks.level`.
    pub fn as_i32(self) -> i32 {
        match self {
            RankLevel::Member => 1,
            RankLevel::ViceLeader => 2,
            RankLevel::Leader => 3,
        }
    }

    /// Interpret a stored level.
    ///
    /// Levels above 3 count as Leader, anything below 2 as Member.
    pub fn from_stored(level: i32) -> Self {
        match level {
            l if l >= 3 => RankLevel::Leader,
            2 => RankLevel::ViceLeader,
            _ => RankLevel::Member,
        }
    }

    /// Default display name of the rank seeded at this level.
    pub fn default_name(self) -> &'static str {
        match self {
            RankLevel::Member => "Member",
            RankLevel::ViceLeader => "Vice Leader",
            RankLevel::Leader => "Leader",
        }
    }
}

/// Rank level shown for an owner that has no membership row; above every
/// stored rank.
pub const OWNER_RANK_LEVEL: i32 = 999;

/// Authority a caller holds over one guild.
///
/// Ordered `None < Member(..) < Owner`; the owner sits above every stored
/// rank, Leader included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EffectiveRank {
    None,
    Member(RankLevel),
    Owner,
}

impl EffectiveRank {
    /// Whether the caller is involved with the guild at all.
    pub fn is_member(self) -> bool {
        !matches!(self, EffectiveRank::None)
    }

    /// Whether this rank reaches at least `level`.
    pub fn at_least(self, level: RankLevel) -> bool {
        self >= EffectiveRank::Member(level)
    }
}
