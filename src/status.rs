//! Integer status-code surface over [`Manager`].
//!
//! [`Library`] takes raw integers the way a C caller would pass them, rejects malformed arguments
//! with [`StatusType::InvalidInput`] before the manager is reached, and collapses every
//! [`Error`] into one of four [`StatusType`] codes.

use alloc::vec::Vec;

use crate::error::{Error, ErrorKind};
use crate::manager::Manager;
use crate::model::{GroupId, PlayerId, Scope};

/// Marker reported in place of a player id when a group has no players.
pub const NO_PLAYER: i32 = -1;

/// The four outcomes every call collapses to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum StatusType {
    Success = 0,
    Failure = -1,
    AllocationError = -2,
    InvalidInput = -3,
}

impl From<&Error> for StatusType {
    fn from(error: &Error) -> Self {
        match error.kind() {
            ErrorKind::ResourceExhausted => StatusType::AllocationError,
            ErrorKind::NotFound | ErrorKind::Conflict | ErrorKind::DomainViolation => StatusType::Failure,
        }
    }
}

impl<T> From<&crate::Result<T>> for StatusType {
    fn from(result: &crate::Result<T>) -> Self {
        match result {
            Ok(_) => StatusType::Success,
            Err(error) => StatusType::from(error),
        }
    }
}

/// Owns one [`Manager`]. Creating a `Library` is `create`; dropping it is `destroy`.
///
/// # Examples
///
/// ```
/// use guild_index::status::{Library, StatusType, NO_PLAYER};
///
/// let mut library = Library::new();
/// assert_eq!(library.add_group(1), StatusType::Success);
/// assert_eq!(library.add_group(1), StatusType::Failure);
/// assert_eq!(library.add_group(0), StatusType::InvalidInput);
///
/// assert_eq!(library.get_highest_level(1), Ok(NO_PLAYER));
/// assert_eq!(library.add_player(7, 1, 3), StatusType::Success);
/// assert_eq!(library.get_highest_level(-1), Ok(7));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Library {
    manager: Manager,
}

impl Library {
    #[must_use]
    pub const fn new() -> Self {
        Library { manager: Manager::new() }
    }

    /// Read access to the underlying manager.
    #[must_use]
    pub const fn manager(&self) -> &Manager {
        &self.manager
    }

    pub fn add_group(&mut self, group_id: i32) -> StatusType {
        let Some(group) = group(group_id) else {
            return StatusType::InvalidInput;
        };
        StatusType::from(&self.manager.add_group(group))
    }

    pub fn add_player(&mut self, player_id: i32, group_id: i32, level: i32) -> StatusType {
        let (Some(player), Some(group), Ok(level)) = (player(player_id), group(group_id), u32::try_from(level)) else {
            return StatusType::InvalidInput;
        };
        StatusType::from(&self.manager.add_player(player, group, level))
    }

    pub fn remove_player(&mut self, player_id: i32) -> StatusType {
        let Some(player) = player(player_id) else {
            return StatusType::InvalidInput;
        };
        StatusType::from(&self.manager.remove_player(player))
    }

    pub fn replace_group(&mut self, group_id: i32, replacement_id: i32) -> StatusType {
        let (Some(group), Some(replacement)) = (group(group_id), group(replacement_id)) else {
            return StatusType::InvalidInput;
        };
        if group == replacement {
            return StatusType::InvalidInput;
        }
        StatusType::from(&self.manager.replace_group(group, replacement))
    }

    pub fn increase_level(&mut self, player_id: i32, level_increase: i32) -> StatusType {
        let (Some(player), Some(increase)) = (player(player_id), positive(level_increase)) else {
            return StatusType::InvalidInput;
        };
        StatusType::from(&self.manager.increase_level(player, increase))
    }

    /// Returns the highest-level player of `group_id`, or of everyone when `group_id` is negative.
    /// An empty group reports [`NO_PLAYER`].
    ///
    /// # Errors
    ///
    /// [`StatusType::InvalidInput`] for a zero group id, otherwise the status of the failed call.
    pub fn get_highest_level(&self, group_id: i32) -> Result<i32, StatusType> {
        let scope = scope(group_id).ok_or(StatusType::InvalidInput)?;
        let leader = self.manager.highest_level(scope).map_err(|error| StatusType::from(&error))?;
        Ok(leader.map_or(NO_PLAYER, raw_player))
    }

    /// Returns all player ids of `group_id` (everyone when negative) by level descending.
    ///
    /// # Errors
    ///
    /// [`StatusType::InvalidInput`] for a zero group id, otherwise the status of the failed call.
    pub fn get_all_players_by_level(&self, group_id: i32) -> Result<Vec<i32>, StatusType> {
        let scope = scope(group_id).ok_or(StatusType::InvalidInput)?;
        let players = self.manager.players_by_level(scope).map_err(|error| StatusType::from(&error))?;
        Ok(players.into_iter().map(raw_player).collect())
    }

    /// Returns the leader of each of the `num_of_groups` lowest-id groups, [`NO_PLAYER`] for
    /// empty ones.
    ///
    /// # Errors
    ///
    /// [`StatusType::InvalidInput`] when `num_of_groups < 1`, otherwise the status of the failed
    /// call.
    pub fn get_groups_highest_level(&self, num_of_groups: i32) -> Result<Vec<i32>, StatusType> {
        let count = positive(num_of_groups).ok_or(StatusType::InvalidInput)?;
        let count = usize::try_from(count).map_err(|_| StatusType::InvalidInput)?;
        let leaders = self.manager.groups_highest_level(count).map_err(|error| StatusType::from(&error))?;
        Ok(leaders.into_iter().map(|leader| leader.map_or(NO_PLAYER, raw_player)).collect())
    }
}

fn positive(value: i32) -> Option<u32> {
    u32::try_from(value).ok().filter(|&value| value > 0)
}

fn player(id: i32) -> Option<PlayerId> {
    positive(id).map(PlayerId)
}

fn group(id: i32) -> Option<GroupId> {
    positive(id).map(GroupId)
}

fn scope(group_id: i32) -> Option<Scope> {
    match group_id {
        0 => None,
        id if id < 0 => Some(Scope::All),
        id => group(id).map(Scope::Group),
    }
}

fn raw_player(id: PlayerId) -> i32 {
    // Every id in the store entered through `player()`, so it fits.
    i32::try_from(id.0).unwrap_or(i32::MAX)
}
