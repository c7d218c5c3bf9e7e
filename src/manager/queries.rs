use alloc::vec::Vec;

use super::Manager;
use crate::avl_tree::AvlTree;
use crate::error::{Error, Result};
use crate::model::{Group, PlayerId, Scope};
use crate::rank_key::RankKey;

impl Manager {
    /// Returns the highest-level player in `scope`, smallest id first on ties.
    ///
    /// A known but empty group yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`Error::NoPlayers`] for [`Scope::All`] on an empty store, [`Error::GroupNotFound`] for an
    /// unknown group.
    ///
    /// # Complexity
    ///
    /// O(1) for [`Scope::All`], O(log G + log n) for a group.
    pub fn highest_level(&self, scope: Scope) -> Result<Option<PlayerId>> {
        match scope {
            Scope::All => self.leader.map(|key| Some(key.player)).ok_or(Error::NoPlayers),
            Scope::Group(id) => match self.groups.get(&id) {
                Some(group) => Ok(group.leader()),
                None if self.empty_groups.contains(&id) => Ok(None),
                None => Err(Error::GroupNotFound(id)),
            },
        }
    }

    /// Returns every player in `scope`, by level descending and then id ascending.
    ///
    /// # Errors
    ///
    /// [`Error::GroupNotFound`] for an unknown group, [`Error::Allocation`] if the result buffer
    /// cannot be allocated.
    ///
    /// # Complexity
    ///
    /// O(n) in the number of players reported.
    pub fn players_by_level(&self, scope: Scope) -> Result<Vec<PlayerId>> {
        match scope {
            Scope::All => ranked_ids(&self.ranking),
            Scope::Group(id) => match self.groups.get(&id) {
                Some(group) => ranked_ids(&group.ranking),
                None if self.empty_groups.contains(&id) => Ok(Vec::new()),
                None => Err(Error::GroupNotFound(id)),
            },
        }
    }

    /// For the `count` known groups with the smallest ids, in ascending id order, returns each
    /// group's highest-level player, or `None` for an empty group.
    ///
    /// # Errors
    ///
    /// [`Error::GroupCountOutOfRange`] if `count` is zero or exceeds the number of known groups.
    ///
    /// # Complexity
    ///
    /// O(count · log n + log G)
    pub fn groups_highest_level(&self, count: usize) -> Result<Vec<Option<PlayerId>>> {
        let known = self.group_count();
        if count == 0 || count > known {
            return Err(Error::GroupCountOutOfRange { requested: count, known });
        }

        let mut leaders = Vec::new();
        leaders.try_reserve_exact(count)?;

        // Both sets are walked in id order and merged on the fly.
        let mut empty = self.empty_groups.iter().peekable();
        let mut full = self.groups.iter().peekable();
        while leaders.len() < count {
            let next_is_empty = match (empty.peek(), full.peek()) {
                (Some(&&empty_id), Some(group)) => empty_id < group.id(),
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            if next_is_empty {
                empty.next();
                leaders.push(None);
            } else {
                leaders.push(full.next().and_then(Group::leader));
            }
        }

        Ok(leaders)
    }
}

fn ranked_ids(ranking: &AvlTree<RankKey>) -> Result<Vec<PlayerId>> {
    let mut ids = Vec::new();
    ids.try_reserve_exact(ranking.len())?;
    ids.extend(ranking.iter().rev().map(|key| key.player));
    Ok(ids)
}
