use rummy_rs::agents::{AgentTable, ScriptedAgent};
use rummy_rs::engine::GameEngine;
use rummy_rs::game::{ActionError, Game, GameConfig, GameError, Phase, Step, TurnAction};
use rummy_rs::player::DiscardError;

fn game_with_limit(limit: Option<usize>) -> Game {
    Game::new(GameConfig::default().with_seed(31).with_hand_limit(limit)).unwrap()
}

#[test]
fn drawing_past_the_limit_forces_a_discard() {
    let mut g = game_with_limit(Some(10));
    let step = g.apply_action(TurnAction::Draw).unwrap();
    assert!(matches!(step, Step::AwaitingDiscard { seat: 0, drawn: Some(_) }));
    assert_eq!(g.phase(), Phase::AwaitingDiscard);
    assert_eq!(g.hand(0).len(), 11);
    assert_eq!(g.current(), 0);

    let Step::TurnEnded(rec) = g.apply_discard(11).unwrap() else {
        panic!("discard should end the turn");
    };
    assert_eq!(rec.drawn, rec.discarded);
    assert_eq!(g.hand(0).len(), 10);
    assert_eq!(g.current(), 1);
}

#[test]
fn drawing_up_to_the_limit_ends_the_turn() {
    let mut g = game_with_limit(Some(11));
    assert!(matches!(g.apply_action(TurnAction::Draw).unwrap(), Step::TurnEnded(_)));
    assert_eq!(g.hand(0).len(), 11);
    assert_eq!(g.current(), 1);

    // Seat 1 also reaches 11; back at seat 0 the next draw goes over.
    g.apply_action(TurnAction::Draw).unwrap();
    assert!(matches!(g.apply_action(TurnAction::Draw).unwrap(), Step::AwaitingDiscard { .. }));
}

#[test]
fn no_limit_lets_hands_grow() {
    let mut g = game_with_limit(None);
    for _ in 0..6 {
        assert!(matches!(g.apply_action(TurnAction::Draw).unwrap(), Step::TurnEnded(_)));
    }
    assert_eq!(g.hand(0).len(), 13);
    assert_eq!(g.hand(1).len(), 13);
    assert_eq!(g.hand_limit(), None);
}

#[test]
fn bad_index_keeps_the_discard_pending() {
    let mut g = game_with_limit(Some(10));
    g.apply_action(TurnAction::Draw).unwrap();
    assert_eq!(
        g.apply_discard(0),
        Err(GameError::Discard(DiscardError::InvalidIndex { index: 0, len: 11 }))
    );
    assert_eq!(
        g.apply_discard(12),
        Err(GameError::Discard(DiscardError::InvalidIndex { index: 12, len: 11 }))
    );
    assert_eq!(g.phase(), Phase::AwaitingDiscard);
    assert_eq!(
        g.apply_action(TurnAction::Draw),
        Err(GameError::Action(ActionError::DiscardPending))
    );
    assert!(g.apply_discard(1).is_ok());
}

#[test]
fn limit_holds_for_a_whole_game() {
    let mut g = game_with_limit(Some(10));
    let mut agents = AgentTable::for_seats(2);
    for seat in 0..2 {
        agents.set_agent(seat, Some(Box::new(ScriptedAgent::always(TurnAction::Draw, Some(1)))));
    }
    loop {
        match g.step(&mut agents).unwrap() {
            Step::Finished => break,
            Step::Waiting { seat } => panic!("seat {seat} stalled"),
            _ => {}
        }
        if g.phase() == Phase::AwaitingAction {
            assert!(g.players().iter().all(|p| p.hand().len() <= 10));
        }
    }
    assert_eq!(g.turns(), 32);
    assert!(g.players().iter().all(|p| p.discard_pile().len() == 16));
}
