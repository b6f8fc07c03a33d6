use voxel_diorama::{
    cgmath::Vector2,
    input::{Direction, InputAction, InputRouter, KeySet, MoveKey, PointerButton},
};
use winit::{event::TouchPhase, keyboard::KeyCode};

#[test]
fn arrows_and_wasd_map_onto_the_same_directions() {
    let pairs = [
        (KeyCode::ArrowUp, KeyCode::KeyW, Direction::Forward),
        (KeyCode::ArrowDown, KeyCode::KeyS, Direction::Back),
        (KeyCode::ArrowLeft, KeyCode::KeyA, Direction::Left),
        (KeyCode::ArrowRight, KeyCode::KeyD, Direction::Right),
    ];
    for (arrow, letter, direction) in pairs {
        let arrow = MoveKey::from_key_code(arrow).expect("arrow key");
        let letter = MoveKey::from_key_code(letter).expect("letter key");
        assert_eq!(arrow.direction(), direction);
        assert_eq!(letter.direction(), direction);
    }
    assert_eq!(MoveKey::from_key_code(KeyCode::Space), None);
    assert_eq!(MoveKey::from_key_code(KeyCode::KeyQ), None);
}

#[test]
fn key_set_tracks_presses_and_releases() {
    let mut keys = KeySet::new();
    assert!(!keys.is_moving());

    keys.press(MoveKey::ArrowUp);
    keys.press(MoveKey::W);
    assert!(keys.is_held(Direction::Forward));
    assert_eq!(keys.movement(), Vector2::new(0.0, -1.0));

    // releasing one of two keys for the same direction keeps it held
    keys.release(MoveKey::ArrowUp);
    assert!(keys.is_held(Direction::Forward));
    keys.release(MoveKey::W);
    assert!(!keys.is_moving());
}

#[test]
fn diagonal_movement_sums_directions() {
    let mut keys = KeySet::new();
    keys.set(MoveKey::S, true);
    keys.set(MoveKey::D, true);
    assert_eq!(keys.movement(), Vector2::new(1.0, 1.0));
    keys.clear();
    assert_eq!(keys.movement(), Vector2::new(0.0, 0.0));
}

#[test]
fn primary_press_picks_exactly_once() {
    let mut router = InputRouter::new(800, 600);
    router.pointer_moved(400.0, 300.0);

    let first = router.pointer_button(PointerButton::Primary, true);
    assert_eq!(first, Some(InputAction::Pick(Vector2::new(0.0, 0.0))));

    // dragging with the button held orbits, it never picks again
    let drag = router.pointer_moved(410.0, 300.0);
    assert_eq!(drag, Some(InputAction::Orbit(Vector2::new(10.0, 0.0))));
    assert_eq!(router.pointer_button(PointerButton::Primary, false), None);
}

#[test]
fn hover_never_picks() {
    let mut router = InputRouter::new(800, 600);
    for i in 0..10 {
        assert_eq!(router.pointer_moved(i as f32 * 10.0, 50.0), None);
    }
}

#[test]
fn secondary_drag_pans() {
    let mut router = InputRouter::new(800, 600);
    router.pointer_moved(100.0, 100.0);
    assert_eq!(router.pointer_button(PointerButton::Secondary, true), None);
    assert_eq!(
        router.pointer_moved(95.0, 120.0),
        Some(InputAction::Pan(Vector2::new(-5.0, 20.0)))
    );
    router.pointer_button(PointerButton::Secondary, false);
    assert_eq!(router.pointer_moved(90.0, 120.0), None);
}

#[test]
fn pointer_ndc_follows_the_viewport() {
    let mut router = InputRouter::new(800, 600);
    router.pointer_moved(0.0, 0.0);
    assert_eq!(router.pointer_ndc(), Vector2::new(-1.0, 1.0));
    router.pointer_moved(800.0, 600.0);
    assert_eq!(router.pointer_ndc(), Vector2::new(1.0, -1.0));

    router.resize(1600, 1200);
    assert_eq!(router.pointer_ndc(), Vector2::new(0.0, 0.0));
}

#[test]
fn router_keys_follow_key_events() {
    let mut router = InputRouter::new(800, 600);
    router.key(MoveKey::A, true);
    assert!(router.keys().is_held(Direction::Left));
    router.key(MoveKey::A, false);
    assert!(!router.keys().is_moving());
}

#[test]
fn touch_acts_like_the_primary_button() {
    let mut router = InputRouter::new(800, 600);

    let down = router.touch(7, TouchPhase::Started, 600.0, 150.0);
    assert_eq!(down, Some(InputAction::Pick(Vector2::new(0.5, 0.5))));

    let drag = router.touch(7, TouchPhase::Moved, 590.0, 160.0);
    assert_eq!(drag, Some(InputAction::Orbit(Vector2::new(-10.0, 10.0))));

    assert_eq!(router.touch(7, TouchPhase::Ended, 590.0, 160.0), None);
    assert_eq!(router.touch(7, TouchPhase::Moved, 500.0, 160.0), None);
    assert_eq!(router.pointer_moved(480.0, 160.0), None);
}

#[test]
fn second_finger_is_ignored_until_the_first_lifts() {
    let mut router = InputRouter::new(800, 600);
    assert!(router.touch(1, TouchPhase::Started, 400.0, 300.0).is_some());

    assert_eq!(router.touch(2, TouchPhase::Started, 100.0, 100.0), None);
    assert_eq!(router.touch(2, TouchPhase::Moved, 120.0, 100.0), None);
    assert_eq!(router.touch(2, TouchPhase::Ended, 120.0, 100.0), None);
    // the first finger still orbits from where it was
    assert_eq!(
        router.touch(1, TouchPhase::Moved, 405.0, 300.0),
        Some(InputAction::Orbit(Vector2::new(5.0, 0.0)))
    );

    assert_eq!(router.touch(1, TouchPhase::Cancelled, 405.0, 300.0), None);
    assert_eq!(
        router.touch(2, TouchPhase::Started, 0.0, 0.0),
        Some(InputAction::Pick(Vector2::new(-1.0, 1.0)))
    );
}
