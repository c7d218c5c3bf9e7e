use tracing::{debug, instrument};

use super::Manager;
use crate::avl_tree::AvlTree;
use crate::error::{Error, Result};
use crate::model::{Group, GroupId, Player};

impl Manager {
    /// Dissolves group `id` into group `replacement`.
    ///
    /// If `id` is empty it simply disappears. Otherwise every member of `id` moves to
    /// `replacement`, which becomes non-empty if it was not already. Either way `id` is unknown
    /// afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::SameGroup`] if the ids are equal, [`Error::GroupNotFound`] if either is unknown.
    ///
    /// # Complexity
    ///
    /// O(n + m + log G) for groups of n and m members: both groups' indices are drained in order,
    /// merged linearly and rebuilt with minimum height.
    #[instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn replace_group(&mut self, id: GroupId, replacement: GroupId) -> Result<()> {
        if id == replacement {
            return Err(Error::SameGroup(id));
        }
        for group in [id, replacement] {
            if !self.contains_group(group) {
                return Err(Error::GroupNotFound(group));
            }
        }

        if self.empty_groups.remove(&id).is_some() {
            debug!(group = %id, %replacement, "empty group dissolved");
            return Ok(());
        }

        let source = self.groups.remove(&id).expect("`Manager::replace_group()` - group vanished!");
        if self.empty_groups.remove(&replacement).is_some() {
            let _ = self.groups.insert(Group::new(replacement));
        }
        let target = self
            .groups
            .get_mut(&replacement)
            .expect("`Manager::replace_group()` - replacement is not in the non-empty set!");
        let (moved, kept) = (source.len(), target.len());
        target.absorb(source, &mut self.players);

        debug!(group = %id, %replacement, moved, kept, "group merged");
        Ok(())
    }
}

impl Group {
    /// Takes over every member of `other`, re-pointing each moved player at this group.
    fn absorb(&mut self, mut other: Group, players: &mut AvlTree<Player>) {
        let id = self.id();
        for membership in other.members.iter() {
            let player = players.resolve_mut(membership.link());
            debug_assert!(player.is_some(), "`Group::absorb()` - dangling link for {}!", membership.player());
            if let Some(player) = player {
                player.group = id;
            }
        }

        self.members.append(&mut other.members);
        self.ranking.append(&mut other.ranking);

        if self.max_count == 0 || other.max_level > self.max_level {
            self.max_level = other.max_level;
            self.max_count = other.max_count;
        } else if other.max_level == self.max_level {
            self.max_count += other.max_count;
        }
    }
}
