use alloc::collections::TryReserveError;

use crate::model::{GroupId, Level, PlayerId};

pub type Result<T> = core::result::Result<T, Error>;

/// Every way a [`Manager`](crate::Manager) operation can be rejected.
///
/// A rejected operation never leaves a partial change behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("player {0} already exists")]
    PlayerExists(PlayerId),
    #[error("player {0} does not exist")]
    PlayerNotFound(PlayerId),
    #[error("group {0} already exists")]
    GroupExists(GroupId),
    #[error("group {0} does not exist")]
    GroupNotFound(GroupId),
    #[error("group {0} cannot replace itself")]
    SameGroup(GroupId),
    #[error("there are no players")]
    NoPlayers,
    #[error("requested {requested} groups but only {known} exist")]
    GroupCountOutOfRange { requested: usize, known: usize },
    #[error("raising player {player} from level {level} by {increase} overflows")]
    LevelOverflow { player: PlayerId, level: Level, increase: Level },
    #[error("failed to allocate result buffer: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// An id that must exist does not.
    NotFound,
    /// An id that must be fresh is already taken.
    Conflict,
    /// The arguments are individually valid but make no sense together.
    DomainViolation,
    /// Memory could not be obtained.
    ResourceExhausted,
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::PlayerNotFound(_) | Error::GroupNotFound(_) | Error::NoPlayers => ErrorKind::NotFound,
            Error::PlayerExists(_) | Error::GroupExists(_) | Error::SameGroup(_) => ErrorKind::Conflict,
            Error::GroupCountOutOfRange { .. } | Error::LevelOverflow { .. } => ErrorKind::DomainViolation,
            Error::Allocation(_) => ErrorKind::ResourceExhausted,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn messages_name_the_ids() {
        assert_eq!(Error::PlayerNotFound(PlayerId(7)).to_string(), "player 7 does not exist");
        assert_eq!(Error::SameGroup(GroupId(3)).to_string(), "group 3 cannot replace itself");
        assert_eq!(
            Error::GroupCountOutOfRange { requested: 5, known: 2 }.to_string(),
            "requested 5 groups but only 2 exist"
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(Error::GroupNotFound(GroupId(1)).kind(), ErrorKind::NotFound);
        assert_eq!(Error::PlayerExists(PlayerId(1)).kind(), ErrorKind::Conflict);
        assert_eq!(Error::SameGroup(GroupId(1)).kind(), ErrorKind::Conflict);
        assert_eq!(
            Error::LevelOverflow {
                player: PlayerId(1),
                level: Level::MAX,
                increase: 1
            }
            .kind(),
            ErrorKind::DomainViolation
        );

        let mut buffer: Vec<u64> = Vec::new();
        let err = buffer.try_reserve_exact(usize::MAX).unwrap_err();
        assert_eq!(Error::from(err).kind(), ErrorKind::ResourceExhausted);
    }
}
