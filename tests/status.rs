use guild_index::PlayerId;
use guild_index::status::{Library, NO_PLAYER, StatusType};
use pretty_assertions::assert_eq;

#[test]
fn full_session() {
    let mut library = Library::new();
    assert_eq!(library.add_group(1), StatusType::Success);
    assert_eq!(library.add_group(2), StatusType::Success);
    assert_eq!(library.add_group(3), StatusType::Success);

    assert_eq!(library.add_player(10, 1, 5), StatusType::Success);
    assert_eq!(library.add_player(20, 2, 7), StatusType::Success);
    assert_eq!(library.add_player(30, 2, 0), StatusType::Success);
    assert_eq!(library.add_player(10, 3, 1), StatusType::Failure);
    assert_eq!(library.add_player(40, 4, 1), StatusType::Failure);

    assert_eq!(library.get_highest_level(-1), Ok(20));
    assert_eq!(library.get_groups_highest_level(3), Ok(vec![10, 20, NO_PLAYER]));

    assert_eq!(library.replace_group(1, 2), StatusType::Success);
    assert_eq!(library.get_all_players_by_level(2), Ok(vec![20, 10, 30]));
    assert_eq!(library.get_highest_level(1), Err(StatusType::Failure));
    assert_eq!(library.replace_group(1, 2), StatusType::Failure);

    assert_eq!(library.increase_level(30, 9), StatusType::Success);
    assert_eq!(library.get_all_players_by_level(-5), Ok(vec![30, 20, 10]));

    assert_eq!(library.remove_player(30), StatusType::Success);
    assert_eq!(library.remove_player(30), StatusType::Failure);
    assert_eq!(library.get_highest_level(2), Ok(20));
    assert_eq!(library.manager().len(), 2);
}

#[test]
fn empty_library() {
    let library = Library::default();
    assert_eq!(library.get_highest_level(-1), Err(StatusType::Failure));
    assert_eq!(library.get_all_players_by_level(-1), Ok(vec![]));
    assert_eq!(library.get_all_players_by_level(7), Err(StatusType::Failure));
    assert_eq!(library.get_groups_highest_level(1), Err(StatusType::Failure));
}

#[test]
fn level_overflow_is_a_failure() {
    let mut library = Library::new();
    assert_eq!(library.add_group(1), StatusType::Success);
    assert_eq!(library.add_player(1, 1, i32::MAX), StatusType::Success);
    assert_eq!(library.increase_level(1, i32::MAX), StatusType::Success);
    // 2 * i32::MAX < u32::MAX < 3 * i32::MAX
    assert_eq!(library.increase_level(1, i32::MAX), StatusType::Failure);
    let level = library.manager().player(PlayerId(1)).map(|player| player.level);
    assert_eq!(level, Some(2 * i32::MAX.unsigned_abs()));
}
