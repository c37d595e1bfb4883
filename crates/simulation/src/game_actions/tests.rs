use super::*;
use crate::dispatch::DispatchError;
use bevy::math::Vec2;

#[test]
fn test_game_action_serialization() {
    let action = GameAction::StartSession;
    let json = serde_json::to_string(&action).unwrap();
    let decoded: GameAction = serde_json::from_str(&json).unwrap();
    assert_eq!(action, decoded);

    let action = GameAction::dispatch("LY-03", Vec2::new(12.5, 80.0));
    let json = serde_json::to_string(&action).unwrap();
    let decoded: GameAction = serde_json::from_str(&json).unwrap();
    assert_eq!(action, decoded);
}

#[test]
fn test_action_result_serialization() {
    let res = ActionResult::Success;
    let json = serde_json::to_string(&res).unwrap();
    let decoded: ActionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(res, decoded);

    let res = ActionResult::Rejected(DispatchError::AlreadyPending);
    let json = serde_json::to_string(&res).unwrap();
    let decoded: ActionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(res, decoded);
}

#[test]
fn test_action_result_from_dispatch() {
    assert!(ActionResult::from(Ok(3)).is_success());
    let rejected = ActionResult::from(Err(DispatchError::NotPlaying));
    assert!(!rejected.is_success());
    assert_eq!(rejected.error(), Some(DispatchError::NotPlaying));
}
