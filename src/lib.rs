//! A multi-index player and group store built on an arena-backed AVL tree.
//!
//! The crate has two layers:
//!
//! - [`AvlTree`] - a generic height-balanced binary search tree with stable weak element
//!   references ([`ItemRef`]), parent-linked in-order stepping, and a linear-time minimum-height
//!   build from sorted input.
//! - [`Manager`] - players, the groups they belong to, and the ranking indices that answer
//!   "highest level" queries, all kept mutually consistent across every mutation.
//!
//! # Example
//!
//! ```
//! use guild_index::{GroupId, Manager, PlayerId, Scope};
//!
//! let mut manager = Manager::new();
//! manager.add_group(GroupId(1))?;
//! manager.add_player(PlayerId(10), GroupId(1), 3)?;
//! manager.add_player(PlayerId(11), GroupId(1), 3)?;
//! manager.add_player(PlayerId(12), GroupId(1), 1)?;
//!
//! // Ties on level go to the smaller id.
//! assert_eq!(manager.highest_level(Scope::Group(GroupId(1)))?, Some(PlayerId(10)));
//!
//! manager.increase_level(PlayerId(12), 5)?;
//! assert_eq!(
//!     manager.players_by_level(Scope::All)?,
//!     [PlayerId(12), PlayerId(10), PlayerId(11)]
//! );
//! # Ok::<(), guild_index::Error>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Linear group merge** - Indices are drained in order, merged, and rebuilt without rotations
//! - **Structured logging** - Mutations emit [`tracing`] events; install any subscriber to see them
//!
//! The [`status`] module wraps a [`Manager`] in the integer status-code surface external callers
//! use.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod avl_tree;
pub mod error;
pub mod manager;
pub mod model;
pub mod rank_key;
pub mod status;

pub use avl_tree::{AvlTree, ItemRef};
pub use error::{Error, ErrorKind, Result};
pub use manager::Manager;
pub use model::{Group, GroupId, Level, Membership, Player, PlayerId, Scope};
pub use rank_key::RankKey;
