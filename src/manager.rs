//! The multi-index player store.

use tracing::{debug, instrument, trace};

use crate::avl_tree::AvlTree;
use crate::error::{Error, Result};
use crate::model::{Group, GroupId, Level, Player, PlayerId};
use crate::rank_key::RankKey;

mod merge;
mod queries;

/// Players, the groups they belong to, and the indices that answer ranking queries.
///
/// Six kinds of index are kept mutually consistent across every operation:
///
/// - a global players-by-id index and a global players-by-rank index,
/// - the ids of groups with no players,
/// - the non-empty groups, each with its own players-by-id and players-by-rank index and a cached
///   `(max_level, max_count)` pair,
/// - plus a cached global leader.
///
/// Every operation checks all of its preconditions before touching any index, so a rejected call
/// leaves the store exactly as it was.
///
/// # Examples
///
/// ```
/// use guild_index::{GroupId, Manager, PlayerId, Scope};
///
/// let mut manager = Manager::new();
/// manager.add_group(GroupId(1))?;
/// manager.add_group(GroupId(2))?;
/// manager.add_player(PlayerId(10), GroupId(1), 5)?;
/// manager.add_player(PlayerId(20), GroupId(2), 7)?;
///
/// manager.replace_group(GroupId(1), GroupId(2))?;
///
/// assert_eq!(manager.players_by_level(Scope::Group(GroupId(2)))?, [PlayerId(20), PlayerId(10)]);
/// assert_eq!(manager.highest_level(Scope::Group(GroupId(2)))?, Some(PlayerId(20)));
/// assert!(manager.highest_level(Scope::Group(GroupId(1))).is_err());
/// # Ok::<(), guild_index::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Manager {
    players: AvlTree<Player>,
    ranking: AvlTree<RankKey>,
    empty_groups: AvlTree<GroupId>,
    groups: AvlTree<Group>,
    // Greatest key in `ranking`, kept so the global leader is O(1).
    leader: Option<RankKey>,
    total_players: usize,
}

impl Manager {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Manager {
            players: AvlTree::new(),
            ranking: AvlTree::new(),
            empty_groups: AvlTree::new(),
            groups: AvlTree::new(),
            leader: None,
            total_players: 0,
        }
    }

    /// Creates an empty store whose global indices have room for `players` players.
    #[must_use]
    pub fn with_capacity(players: usize) -> Self {
        Manager {
            players: AvlTree::with_capacity(players),
            ranking: AvlTree::with_capacity(players),
            ..Manager::new()
        }
    }

    /// Total number of players.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.total_players
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_players == 0
    }

    /// Number of known groups, empty or not.
    #[must_use]
    pub const fn group_count(&self) -> usize {
        self.empty_groups.len() + self.groups.len()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Returns the record of a non-empty group. Empty groups have no record.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    #[must_use]
    pub fn contains_group(&self, id: GroupId) -> bool {
        self.groups.contains(&id) || self.empty_groups.contains(&id)
    }

    /// Registers a new, empty group.
    ///
    /// # Errors
    ///
    /// [`Error::GroupExists`] if `id` is already known.
    ///
    /// # Complexity
    ///
    /// O(log G)
    #[instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn add_group(&mut self, id: GroupId) -> Result<()> {
        if self.contains_group(id) {
            return Err(Error::GroupExists(id));
        }
        self.empty_groups.insert(id).map_err(Error::GroupExists)?;
        debug!(group = %id, "group added");
        Ok(())
    }

    /// Adds a player to an existing group.
    ///
    /// # Errors
    ///
    /// [`Error::PlayerExists`] if `id` is taken, [`Error::GroupNotFound`] if `group` is unknown.
    ///
    /// # Complexity
    ///
    /// O(log n + log G)
    #[instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn add_player(&mut self, id: PlayerId, group: GroupId, level: Level) -> Result<()> {
        if self.players.contains(&id) {
            return Err(Error::PlayerExists(id));
        }
        let promote = if self.groups.contains(&group) {
            false
        } else if self.empty_groups.contains(&group) {
            true
        } else {
            return Err(Error::GroupNotFound(group));
        };

        let player = Player { id, level, group };
        let link = self.players.insert(player).map_err(|player| Error::PlayerExists(player.id))?;

        if promote {
            self.empty_groups.remove(&group);
            let _ = self.groups.insert(Group::new(group));
            trace!(group = %group, "group promoted");
        }

        let key = player.rank_key();
        let ranked = self.ranking.insert(key).is_ok();
        debug_assert!(ranked, "`Manager::add_player()` - rank key for {id} already present!");
        self.group_mut(group).admit(key, link);

        self.leader = self.leader.max(Some(key));
        self.total_players += 1;
        debug!(player = %id, group = %group, level, "player added");
        Ok(())
    }

    /// Removes a player from the store and from its group.
    ///
    /// A group losing its last player becomes empty again but stays known.
    ///
    /// # Errors
    ///
    /// [`Error::PlayerNotFound`] if `id` is unknown.
    ///
    /// # Complexity
    ///
    /// O(log n + log G), plus O(k) to recount a group's top level when its last top player leaves.
    #[instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn remove_player(&mut self, id: PlayerId) -> Result<()> {
        let player = self.players.remove(&id).ok_or(Error::PlayerNotFound(id))?;
        let key = player.rank_key();

        let unranked = self.ranking.remove(&key).is_some();
        debug_assert!(unranked, "`Manager::remove_player()` - rank key for {id} missing!");

        let group = self.group_mut(player.group);
        group.release(key);
        if group.is_empty() {
            self.groups.remove(&player.group);
            let _ = self.empty_groups.insert(player.group);
            trace!(group = %player.group, "group demoted");
        }

        if self.leader == Some(key) {
            self.leader = self.ranking.last().copied();
        }
        self.total_players -= 1;
        debug!(player = %id, group = %player.group, "player removed");
        Ok(())
    }

    /// Raises a player's level by `increase`.
    ///
    /// An increase of zero changes nothing.
    ///
    /// # Errors
    ///
    /// [`Error::PlayerNotFound`] if `id` is unknown, [`Error::LevelOverflow`] if the new level
    /// does not fit in a [`Level`].
    ///
    /// # Complexity
    ///
    /// O(log n + log G)
    #[instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn increase_level(&mut self, id: PlayerId, increase: Level) -> Result<()> {
        let player = self.players.get_mut(&id).ok_or(Error::PlayerNotFound(id))?;
        if increase == 0 {
            return Ok(());
        }
        let level = player.level.checked_add(increase).ok_or(Error::LevelOverflow {
            player: id,
            level: player.level,
            increase,
        })?;

        // The level is part of every rank key, so the keys are replaced rather than edited.
        let old = player.rank_key();
        player.level = level;
        let new = player.rank_key();
        let group = player.group;

        let unranked = self.ranking.remove(&old).is_some();
        let ranked = self.ranking.insert(new).is_ok();
        debug_assert!(unranked && ranked, "`Manager::increase_level()` - ranking out of sync for {id}!");
        self.group_mut(group).promote(old, new);

        self.leader = self.leader.max(Some(new));
        debug!(player = %id, level, "level increased");
        Ok(())
    }

    /// Returns the record of a group the indices say is non-empty.
    fn group_mut(&mut self, id: GroupId) -> &mut Group {
        self.groups.get_mut(&id).expect("`Manager::group_mut()` - group is not in the non-empty set!")
    }
}
