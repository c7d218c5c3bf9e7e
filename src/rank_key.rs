use core::cmp::Ordering;

use crate::model::{Level, PlayerId};

/// The `(level, player)` composite that orders players for "highest level" queries.
///
/// The ordering is the *reverse* of the order results are reported in: a key is smaller when its
/// level is lower, or when levels tie and its player id is larger. The greatest key is therefore
/// the highest-level player with the smallest id, and walking an index of `RankKey`s from the back
/// yields players by level descending, then id ascending, without any extra sort.
///
/// # Examples
///
/// ```
/// use guild_index::{PlayerId, RankKey};
///
/// let strong = RankKey::new(9, PlayerId(4));
/// let weak = RankKey::new(2, PlayerId(1));
/// let tied_low_id = RankKey::new(9, PlayerId(3));
///
/// assert!(weak < strong);
/// assert!(strong < tied_low_id);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RankKey {
    pub level: Level,
    pub player: PlayerId,
}

impl RankKey {
    #[must_use]
    pub const fn new(level: Level, player: PlayerId) -> Self {
        RankKey { level, player }
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level.cmp(&other.level).then_with(|| other.player.cmp(&self.player))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
