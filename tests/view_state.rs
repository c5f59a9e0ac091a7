use twenty48::domain::board::{Board, BoardSettings};
use twenty48::domain::models::Direction;
use twenty48::interface::models::ViewState;

#[test]
fn test_view_state_lists_rendered_tiles() {
    let mut board =
        Board::from_values([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], BoardSettings::seeded(9)).unwrap();
    board.apply_move(Direction::Left);

    let view = ViewState::from(&board);
    assert_eq!(view.score, 4);
    assert!(!view.won);
    assert!(!view.lost);

    // Two consumed tiles, the product, and the spawned tile.
    assert_eq!(view.tiles.len(), 4);
    assert_eq!(view.tiles.iter().filter(|t| t.merged).count(), 2);
    assert!(view.tiles.iter().filter(|t| t.merged).all(|t| t.position.is_none()));
    assert_eq!(view.tiles.iter().filter(|t| t.is_new).count(), 1);
}

#[test]
fn test_view_state_json_shape() {
    let board =
        Board::from_values([[0, 0, 0, 4], [0; 4], [0; 4], [0; 4]], BoardSettings::seeded(9)).unwrap();
    let json = serde_json::to_value(ViewState::from(&board)).unwrap();

    assert_eq!(json["score"], 0);
    assert_eq!(json["status"], "InProgress");
    let tile = &json["tiles"][0];
    assert_eq!(tile["value"], 4);
    assert_eq!(tile["position"]["row"], 0);
    assert_eq!(tile["position"]["column"], 3);
    assert!(tile["id"].is_u64());
}
