//! Input routing: raw window events in, engine actions out.
//!
//! Keyboard state is kept as a set over a closed enumeration of movement keys,
//! so the animation step never sees platform key names. Pointer events are
//! turned into camera gestures or a single pick request per primary press.
//! A single finger on a touch screen behaves like the primary mouse button.

use cgmath::Vector2;
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Planar movement direction of the character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the back wall (-Z).
    Forward,
    /// Towards the viewer (+Z).
    Back,
    /// -X
    Left,
    /// +X
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step on the (x, z) plane.
    pub fn delta(self) -> Vector2<f32> {
        match self {
            Direction::Forward => Vector2::new(0.0, -1.0),
            Direction::Back => Vector2::new(0.0, 1.0),
            Direction::Left => Vector2::new(-1.0, 0.0),
            Direction::Right => Vector2::new(1.0, 0.0),
        }
    }
}

/// The reserved movement keys: arrows plus their WASD equivalents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
}

impl MoveKey {
    pub const ALL: [MoveKey; 8] = [
        MoveKey::ArrowUp,
        MoveKey::ArrowDown,
        MoveKey::ArrowLeft,
        MoveKey::ArrowRight,
        MoveKey::W,
        MoveKey::A,
        MoveKey::S,
        MoveKey::D,
    ];

    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::ArrowUp => Some(MoveKey::ArrowUp),
            KeyCode::ArrowDown => Some(MoveKey::ArrowDown),
            KeyCode::ArrowLeft => Some(MoveKey::ArrowLeft),
            KeyCode::ArrowRight => Some(MoveKey::ArrowRight),
            KeyCode::KeyW => Some(MoveKey::W),
            KeyCode::KeyA => Some(MoveKey::A),
            KeyCode::KeyS => Some(MoveKey::S),
            KeyCode::KeyD => Some(MoveKey::D),
            _ => None,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            MoveKey::ArrowUp | MoveKey::W => Direction::Forward,
            MoveKey::ArrowDown | MoveKey::S => Direction::Back,
            MoveKey::ArrowLeft | MoveKey::A => Direction::Left,
            MoveKey::ArrowRight | MoveKey::D => Direction::Right,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Currently held movement keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeySet(u8);

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: MoveKey) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: MoveKey) {
        self.0 &= !key.bit();
    }

    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        if pressed {
            self.press(key)
        } else {
            self.release(key)
        }
    }

    pub fn contains(&self, key: MoveKey) -> bool {
        self.0 & key.bit() != 0
    }

    /// Whether either key of a direction pair is held.
    pub fn is_held(&self, direction: Direction) -> bool {
        MoveKey::ALL
            .iter()
            .any(|&key| key.direction() == direction && self.contains(key))
    }

    pub fn is_moving(&self) -> bool {
        self.0 != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Sum of the unit steps of all held directions. Opposite directions cancel.
    pub fn movement(&self) -> Vector2<f32> {
        Direction::ALL
            .iter()
            .filter(|&&direction| self.is_held(direction))
            .fold(Vector2::new(0.0, 0.0), |acc, direction| acc + direction.delta())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            _ => PointerButton::Other,
        }
    }
}

/// What the engine should do in response to an input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputAction {
    /// Cast a pick ray through this point in normalised device coordinates.
    Pick(Vector2<f32>),
    /// Orbit by a pointer delta in pixels.
    Orbit(Vector2<f32>),
    /// Pan by a pointer delta in pixels.
    Pan(Vector2<f32>),
    /// Zoom in (positive) or out (negative) by wheel lines.
    Zoom(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Drag {
    None,
    Orbit,
    Pan,
}

/// Translates window events into key state and [`InputAction`]s.
#[derive(Debug)]
pub struct InputRouter {
    keys: KeySet,
    pointer: Vector2<f32>,
    viewport: Vector2<f32>,
    drag: Drag,
    /// The finger currently acting as the primary pointer.
    touch: Option<u64>,
}

impl InputRouter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            keys: KeySet::new(),
            pointer: Vector2::new(0.0, 0.0),
            viewport: Vector2::new(width.max(1) as f32, height.max(1) as f32),
            drag: Drag::None,
            touch: None,
        }
    }

    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Vector2::new(width.max(1) as f32, height.max(1) as f32);
    }

    /// Pointer position in normalised device coordinates, +Y up.
    pub fn pointer_ndc(&self) -> Vector2<f32> {
        Vector2::new(
            self.pointer.x / self.viewport.x * 2.0 - 1.0,
            -(self.pointer.y / self.viewport.y) * 2.0 + 1.0,
        )
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<InputAction> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = MoveKey::from_key_code(code) {
                        self.key(key, event.state.is_pressed());
                    }
                }
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.pointer_button((*button).into(), *state == ElementState::Pressed)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / 50.0) as f32,
                };
                Some(InputAction::Zoom(lines))
            }
            WindowEvent::Touch(touch) => self.touch(
                touch.id,
                touch.phase,
                touch.location.x as f32,
                touch.location.y as f32,
            ),
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height);
                None
            }
            // Keys held while the window loses focus would otherwise stick.
            WindowEvent::Focused(false) => {
                self.keys.clear();
                self.drag = Drag::None;
                self.touch = None;
                None
            }
            _ => None,
        }
    }

    pub fn key(&mut self, key: MoveKey, pressed: bool) {
        self.keys.set(key, pressed);
    }

    /// Hover only tracks the pointer. It never produces a pick.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Option<InputAction> {
        let delta = Vector2::new(x, y) - self.pointer;
        self.pointer = Vector2::new(x, y);
        match self.drag {
            Drag::Orbit => Some(InputAction::Orbit(delta)),
            Drag::Pan => Some(InputAction::Pan(delta)),
            Drag::None => None,
        }
    }

    /// Route a touch point. The first finger down drives the pointer; other
    /// fingers are ignored until it lifts.
    pub fn touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32) -> Option<InputAction> {
        match phase {
            TouchPhase::Started => {
                if self.touch.is_some() {
                    return None;
                }
                self.touch = Some(id);
                self.drag = Drag::None;
                self.pointer_moved(x, y);
                self.pointer_button(PointerButton::Primary, true)
            }
            TouchPhase::Moved if self.touch == Some(id) => self.pointer_moved(x, y),
            TouchPhase::Ended | TouchPhase::Cancelled if self.touch == Some(id) => {
                self.touch = None;
                self.pointer_button(PointerButton::Primary, false)
            }
            _ => None,
        }
    }

    /// A primary press yields exactly one pick. Releases end any drag.
    pub fn pointer_button(&mut self, button: PointerButton, pressed: bool) -> Option<InputAction> {
        if !pressed {
            self.drag = Drag::None;
            return None;
        }
        match button {
            PointerButton::Primary => {
                self.drag = Drag::Orbit;
                Some(InputAction::Pick(self.pointer_ndc()))
            }
            PointerButton::Secondary => {
                self.drag = Drag::Pan;
                None
            }
            PointerButton::Other => None,
        }
    }
}
