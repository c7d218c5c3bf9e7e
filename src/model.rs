//! The records stored in a [`Manager`](crate::Manager)'s indices.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

use crate::avl_tree::{AvlTree, ItemRef};
use crate::rank_key::RankKey;

/// A player's experience level. Levels only ever increase.
pub type Level = u32;

/// Globally unique player identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PlayerId(pub u32);

/// Group identifier, unique among every group ever added.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GroupId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which players a query looks at.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Scope {
    /// Every player in the store.
    All,
    /// Only the members of one group.
    Group(GroupId),
}

/// A player as stored in the global players-by-id index.
///
/// Ordered by `id` alone; `level` and `group` are payload and may change in place.
#[derive(Clone, Copy, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub level: Level,
    pub group: GroupId,
}

impl Player {
    pub(crate) const fn rank_key(&self) -> RankKey {
        RankKey::new(self.level, self.id)
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Ord for Player {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Player {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Borrow<PlayerId> for Player {
    fn borrow(&self) -> &PlayerId {
        &self.id
    }
}

/// A player's entry in its group's players-by-id index.
///
/// `link` points back into the global players-by-id index. It is weak: once the player is removed
/// from the global index the link stops resolving.
#[derive(Clone, Copy, Debug)]
pub struct Membership {
    player: PlayerId,
    link: ItemRef,
}

impl Membership {
    pub(crate) const fn new(player: PlayerId, link: ItemRef) -> Self {
        Membership { player, link }
    }

    #[must_use]
    pub const fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub const fn link(&self) -> ItemRef {
        self.link
    }
}

impl PartialEq for Membership {
    fn eq(&self, other: &Self) -> bool {
        self.player == other.player
    }
}

impl Eq for Membership {}

impl Ord for Membership {
    fn cmp(&self, other: &Self) -> Ordering {
        self.player.cmp(&other.player)
    }
}

impl PartialOrd for Membership {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Borrow<PlayerId> for Membership {
    fn borrow(&self) -> &PlayerId {
        &self.player
    }
}

/// A group with at least one member.
///
/// Besides its two private indices the group caches its highest level and how many members have
/// it. Empty groups are not represented by this type at all.
#[derive(Clone, Debug)]
pub struct Group {
    id: GroupId,
    pub(crate) members: AvlTree<Membership>,
    pub(crate) ranking: AvlTree<RankKey>,
    pub(crate) max_level: Level,
    pub(crate) max_count: usize,
}

impl Group {
    pub(crate) const fn new(id: GroupId) -> Self {
        Group {
            id,
            members: AvlTree::new(),
            ranking: AvlTree::new(),
            max_level: 0,
            max_count: 0,
        }
    }

    #[must_use]
    pub const fn id(&self) -> GroupId {
        self.id
    }

    /// Number of members.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Highest level among the members.
    #[must_use]
    pub const fn max_level(&self) -> Level {
        self.max_level
    }

    /// Number of members at [`max_level`](Self::max_level).
    #[must_use]
    pub const fn max_count(&self) -> usize {
        self.max_count
    }

    /// The highest-level member, smallest id first on ties.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn leader(&self) -> Option<PlayerId> {
        self.ranking.last().map(|key| key.player)
    }

    /// Member ids in ascending order.
    pub fn members(&self) -> impl DoubleEndedIterator<Item = PlayerId> + '_ {
        self.members.iter().map(Membership::player)
    }

    /// Member ids by level descending, then id ascending.
    pub fn by_level(&self) -> impl DoubleEndedIterator<Item = PlayerId> + '_ {
        self.ranking.iter().rev().map(|key| key.player)
    }

    /// Adds a member. The caller guarantees `key.player` is not yet in any group.
    pub(crate) fn admit(&mut self, key: RankKey, link: ItemRef) {
        let joined = self.members.insert(Membership::new(key.player, link)).is_ok();
        let ranked = self.ranking.insert(key).is_ok();
        debug_assert!(joined && ranked, "`Group::admit()` - player {} already present!", key.player);
        self.note_level(key.level);
    }

    /// Removes a member. The caller guarantees `key` is the member's current rank key.
    pub(crate) fn release(&mut self, key: RankKey) {
        let left = self.members.remove(&key.player).is_some();
        let unranked = self.ranking.remove(&key).is_some();
        debug_assert!(left && unranked, "`Group::release()` - player {} not present!", key.player);

        if key.level == self.max_level {
            self.max_count -= 1;
            if self.max_count == 0 {
                self.recompute_max();
            }
        }
    }

    /// Moves a member from `old` to `new`. Levels only rise, so the cache never needs a rescan.
    pub(crate) fn promote(&mut self, old: RankKey, new: RankKey) {
        debug_assert!(old < new, "`Group::promote()` - level did not increase!");
        let unranked = self.ranking.remove(&old).is_some();
        let ranked = self.ranking.insert(new).is_ok();
        debug_assert!(unranked && ranked, "`Group::promote()` - ranking out of sync for {}!", old.player);
        self.note_level(new.level);
    }

    /// Folds a newly arrived level into the `(max_level, max_count)` cache.
    pub(crate) fn note_level(&mut self, level: Level) {
        if self.max_count == 0 || level > self.max_level {
            self.max_level = level;
            self.max_count = 1;
        } else if level == self.max_level {
            self.max_count += 1;
        }
    }

    /// Rebuilds the cache from the ranking index: O(log n + k) for k members tied at the top.
    pub(crate) fn recompute_max(&mut self) {
        let Some(top) = self.ranking.last() else {
            self.max_level = 0;
            self.max_count = 0;
            return;
        };

        let level = top.level;
        let count = self.ranking.iter().rev().take_while(|key| key.level == level).count();
        self.max_level = level;
        self.max_count = count;
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Group {}

impl Ord for Group {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Group {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Borrow<GroupId> for Group {
    fn borrow(&self) -> &GroupId {
        &self.id
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    fn group_with(levels: &[(u32, Level)]) -> (Group, AvlTree<Player>) {
        let mut players = AvlTree::new();
        let mut group = Group::new(GroupId(1));
        for &(id, level) in levels {
            let player = Player {
                id: PlayerId(id),
                level,
                group: GroupId(1),
            };
            let link = players.insert(player).unwrap();
            group.admit(player.rank_key(), link);
        }
        (group, players)
    }

    #[test]
    fn cache_tracks_admissions() {
        let (group, _) = group_with(&[(1, 4), (2, 9), (3, 9), (4, 2)]);
        assert_eq!((group.max_level(), group.max_count()), (9, 2));
        assert_eq!(group.leader(), Some(PlayerId(2)));
        assert_eq!(group.by_level().collect::<Vec<_>>(), [PlayerId(2), PlayerId(3), PlayerId(1), PlayerId(4)]);
        assert_eq!(group.members().collect::<Vec<_>>(), [PlayerId(1), PlayerId(2), PlayerId(3), PlayerId(4)]);
    }

    #[test]
    fn releasing_last_max_rescans() {
        let (mut group, _) = group_with(&[(1, 4), (2, 9), (3, 4), (4, 2)]);
        group.release(RankKey::new(9, PlayerId(2)));
        assert_eq!((group.max_level(), group.max_count()), (4, 2));
        assert_eq!(group.leader(), Some(PlayerId(1)));

        group.release(RankKey::new(4, PlayerId(1)));
        assert_eq!((group.max_level(), group.max_count()), (4, 1));
        assert_eq!(group.leader(), Some(PlayerId(3)));
    }

    #[test]
    fn promote_only_raises() {
        let (mut group, _) = group_with(&[(1, 4), (2, 9)]);
        group.promote(RankKey::new(4, PlayerId(1)), RankKey::new(9, PlayerId(1)));
        assert_eq!((group.max_level(), group.max_count()), (9, 2));
        assert_eq!(group.leader(), Some(PlayerId(1)));

        group.promote(RankKey::new(9, PlayerId(2)), RankKey::new(10, PlayerId(2)));
        assert_eq!((group.max_level(), group.max_count()), (10, 1));
        assert_eq!(group.leader(), Some(PlayerId(2)));
    }

    #[test]
    fn membership_links_resolve_to_players() {
        let (group, players) = group_with(&[(7, 1), (3, 2)]);
        for membership in group.members.iter() {
            let player = players.resolve(membership.link()).unwrap();
            assert_eq!(player.id, membership.player());
        }
    }

    #[test]
    fn records_order_by_id_only() {
        let a = Player {
            id: PlayerId(1),
            level: 50,
            group: GroupId(2),
        };
        let b = Player {
            id: PlayerId(1),
            level: 0,
            group: GroupId(9),
        };
        assert_eq!(a, b);
        assert_eq!(Group::new(GroupId(3)).cmp(&Group::new(GroupId(4))), Ordering::Less);
    }
}
