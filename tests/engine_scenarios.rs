//! End-to-end scenarios driven through the public API with scripted pieces.

use blockfall::collision::{drop_distance, is_valid};
use blockfall::kicks;
use blockfall::score::clear_lines;
use blockfall::{
    Action, Board, Cell, Engine, Game, GameData, GameEvent, Phase, Piece, Rotation, Rules,
    ScriptedSource, Variant,
};

fn engine(script: Vec<Variant>) -> Engine<ScriptedSource> {
    Engine::new(Rules::default(), ScriptedSource::new(script)).unwrap()
}

fn start(engine: &mut Engine<ScriptedSource>) -> GameData {
    let menu = engine.initial(0);
    engine.transition(&menu, Action::Start)
}

#[test]
fn o_piece_falls_to_bottom_without_scoring() {
    let mut engine = engine(vec![Variant::O]);
    let mut state = start(&mut engine);

    // slide to the left wall, then let gravity do the rest
    for _ in 0..4 {
        state = engine.transition(&state, Action::MoveLeft);
    }
    assert_eq!(state.current_piece.unwrap().x, 0);

    while state.board.is_empty() {
        state = engine.transition(&state, Action::Tick);
    }

    for (x, y) in [(0, 18), (1, 18), (0, 19), (1, 19)] {
        assert_eq!(state.board.get(x, y), Some(Cell::Occupied(Variant::O)));
    }
    let occupied = state.board.rows().flatten().filter(|c| c.is_occupied()).count();
    assert_eq!(occupied, 4);
    assert_eq!(state.score, 0);
    assert_eq!(state.lines_cleared_total, 0);
}

#[test]
fn filling_last_gap_clears_one_line() {
    let mut engine = engine(vec![Variant::I]);
    let state = start(&mut engine);

    let mut board = Board::new(10, 20);
    for x in 0..8 {
        board.set(x, 19, Cell::Occupied(Variant::L));
    }
    // an O hovering over the two-cell gap at the right edge
    let primed = GameData {
        board,
        current_piece: Some(Piece::new(Variant::O, Rotation::North, 8, 10)),
        level: 2,
        lines_cleared_total: 12,
        score: 50,
        ..state
    };

    let dropped = engine.transition(&primed, Action::HardDrop);
    let distance = 8;
    assert_eq!(dropped.lines_cleared_total, 13);
    assert_eq!(dropped.score, 50 + 2 * distance + 100 * 2);
    // the O's top half survives, shifted into the bottom row
    assert!(dropped.board.is_occupied(8, 19));
    assert!(dropped.board.is_occupied(9, 19));
    assert!(!dropped.board.is_occupied(0, 19));
}

#[test]
fn clearing_the_bottom_row_reports_count_one() {
    let mut board = Board::new(10, 20);
    for x in 0..10 {
        board.set(x, 19, Cell::Occupied(Variant::S));
    }
    board.set(4, 18, Cell::Occupied(Variant::T));
    let (cleared, count) = clear_lines(&board);
    assert_eq!(count, 1);
    assert_eq!(cleared.get(4, 19), Some(Cell::Occupied(Variant::T)));
}

#[test]
fn full_rotation_cycle_is_identity() {
    let mut engine = engine(vec![Variant::T]);
    let mut state = start(&mut engine);
    state = engine.transition(&state, Action::Tick);
    state = engine.transition(&state, Action::Tick);
    let original = state.current_piece.unwrap();

    for turn in 1..=4 {
        state = engine.transition(&state, Action::Rotate);
        let piece = state.current_piece.unwrap();
        assert_eq!(piece.rotation.index(), turn % 4);
    }

    let piece = state.current_piece.unwrap();
    assert_eq!(piece, original);
    assert_eq!(piece.shape(), original.shape());
}

#[test]
fn hard_drop_over_five_rows_scores_ten() {
    let mut engine = engine(vec![Variant::O]);
    let state = start(&mut engine);

    let mut board = Board::new(10, 20);
    // a lone block on row 7 stops the O after five rows
    board.set(4, 7, Cell::Occupied(Variant::Z));
    let primed = GameData { board, ..state };
    let piece = primed.current_piece.unwrap();
    assert_eq!(drop_distance(&primed.board, &piece), 5);

    let dropped = engine.transition(&primed, Action::HardDrop);
    assert_eq!(dropped.score, 10);
    assert!(dropped.board.is_occupied(4, 5));
    assert!(dropped.board.is_occupied(5, 6));
}

#[test]
fn blocked_rotation_leaves_piece_untouched() {
    let mut engine = engine(vec![Variant::I]);
    let state = start(&mut engine);

    let mut board = Board::new(10, 20);
    for y in 0..20 {
        for x in 0..10 {
            if y != 11 || !(3..7).contains(&x) {
                board.set(x, y, Cell::Occupied(Variant::J));
            }
        }
    }
    let trapped = Piece::new(Variant::I, Rotation::North, 3, 10);
    assert!(is_valid(&board, &trapped));
    assert_eq!(kicks::rotate(&board, &trapped), None);

    let primed = GameData {
        board,
        current_piece: Some(trapped),
        ..state
    };
    let after = engine.transition(&primed, Action::Rotate);
    assert_eq!(after, primed);
}

#[test]
fn topping_out_records_high_score() {
    let mut game = Game::new(Rules::default(), ScriptedSource::repeat(Variant::O), 25).unwrap();
    game.apply(Action::Start);

    let mut events = Vec::new();
    for _ in 0..20 {
        events.extend(game.apply(Action::HardDrop));
        if game.state().phase == Phase::GameOver {
            break;
        }
    }

    let state = game.state();
    assert_eq!(state.phase, Phase::GameOver);
    assert!(state.score > 25);
    assert_eq!(state.high_score, state.score);
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOver {
            score: state.score,
            high_score: state.high_score
        })
    );

    // a stale best survives a worse game
    let mut game = Game::new(Rules::default(), ScriptedSource::repeat(Variant::O), 1_000_000).unwrap();
    game.apply(Action::Start);
    game.apply(Action::GameOver);
    assert_eq!(game.state().high_score, 1_000_000);
}

#[test]
fn level_rises_every_ten_lines() {
    let mut engine = engine(vec![Variant::I]);
    let state = start(&mut engine);

    let mut board = Board::new(10, 20);
    for x in 0..6 {
        board.set(x, 19, Cell::Occupied(Variant::J));
    }
    let primed = GameData {
        board,
        current_piece: Some(Piece::new(Variant::I, Rotation::North, 6, 0)),
        lines_cleared_total: 9,
        ..state
    };
    let next = engine.transition(&primed, Action::HardDrop);
    assert_eq!(next.lines_cleared_total, 10);
    assert_eq!(next.level, 2);
    // scored at the old level
    assert_eq!(next.score, 2 * 18 + 100);
}

#[test]
fn snapshot_serializes_to_json() {
    let mut engine = engine(vec![Variant::Z, Variant::T]);
    let state = start(&mut engine);
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["phase"], "Playing");
    assert_eq!(json["level"], 1);
    assert_eq!(json["current_piece"]["variant"], "T");
    assert_eq!(json["next_variant"], "Z");
}

#[test]
fn narrow_board_clear_still_reports_lock() {
    let rules = Rules {
        width: 4,
        ..Rules::default()
    };
    let mut game = Game::new(rules, ScriptedSource::repeat(Variant::I), 0).unwrap();
    game.apply(Action::Start);

    let events = game.apply(Action::HardDrop);
    assert!(game.state().board.is_empty());
    assert_eq!(game.state().score, 2 * 18 + 100);
    assert_eq!(
        events,
        vec![GameEvent::PieceLocked, GameEvent::LinesCleared(1)]
    );
}
