//! Voxel records and group identifiers.
//!
//! A [`Voxel`] is the atomic render unit of the diorama: a cube at an integer
//! grid coordinate with a packed `0xRRGGBB` colour. Its index in the generated
//! sequence doubles as its GPU instance slot, so a voxel sequence must never be
//! reordered or filtered once it has been handed to a scene.

use std::fmt;

use cgmath::Vector3;

/// Reserved id of the fireplace assembly. Animated, never clickable.
pub const FIRE_ID: &str = "animated_fire";
/// Reserved id of the walking character. Animated and clickable.
pub const CHARACTER_ID: &str = "character";

/// The logical object a voxel belongs to.
///
/// Two ids are reserved and get special treatment during animation and picking.
/// Every other interactive object is an [`GroupId::Object`] with a stable name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupId {
    Fire,
    Character,
    Object(String),
}

impl GroupId {
    /// Parse a raw id, mapping the reserved names onto their variants.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        match id.as_str() {
            FIRE_ID => GroupId::Fire,
            CHARACTER_ID => GroupId::Character,
            _ => GroupId::Object(id),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GroupId::Fire => FIRE_ID,
            GroupId::Character => CHARACTER_ID,
            GroupId::Object(name) => name,
        }
    }

    /// Whether a primary click on this group may reach the click callback.
    pub fn is_clickable(&self) -> bool {
        !matches!(self, GroupId::Fire)
    }

    /// Whether the group takes part in the shared sine bobbing.
    pub fn bobs(&self) -> bool {
        matches!(self, GroupId::Object(_))
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        GroupId::new(id)
    }
}

/// A single coloured cube on the integer grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voxel {
    pub position: Vector3<i32>,
    pub color: u32,
    pub group: Option<GroupId>,
}

impl Voxel {
    pub fn new(position: Vector3<i32>, color: u32, group: Option<GroupId>) -> Self {
        Self {
            position,
            color,
            group,
        }
    }

    /// Unpack `0xRRGGBB` into linear RGB suitable for an sRGB surface.
    pub fn linear_rgb(&self) -> [f32; 3] {
        let channel = |shift: u32| srgb_to_linear(((self.color >> shift) & 0xFF) as f32 / 255.0);
        [channel(16), channel(8), channel(0)]
    }
}

/// Standard sRGB transfer function.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
