//! Packed `0xRRGGBB` colours of the room.

// Architecture
pub const WALL_BASE: u32 = 0x3A5F5F;
pub const WALL_NOISE_1: u32 = 0x456767;
pub const WALL_NOISE_2: u32 = 0x2F4F4F;
pub const FLOOR_BASE: u32 = 0x4E342E;
pub const FLOOR_VAR_1: u32 = 0x5D4037;
pub const FLOOR_VAR_2: u32 = 0x3E2723;
pub const SKIRTING: u32 = 0x212121;

// Wood
pub const WOOD_OAK: u32 = 0x8D6E63;
pub const WOOD_OAK_DARK: u32 = 0x6D4C41;
pub const WOOD_MAHOGANY: u32 = 0x4E342E;

// Bed
pub const BED_FRAME: u32 = 0x212121;
pub const BED_SHEET_MAIN: u32 = 0x283593;
pub const BED_SHEET_HIGHLIGHT: u32 = 0x3949AB;
pub const BED_PILLOW: u32 = 0xE8EAF6;

// Fireplace
pub const STONE_MAIN: u32 = 0x757575;
pub const STONE_HIGHLIGHT: u32 = 0x9E9E9E;
pub const STONE_SHADOW: u32 = 0x424242;
pub const FIRE_CORE: u32 = 0xFFEB3B;
pub const FIRE_MID: u32 = 0xFF9800;
pub const FIRE_OUTER: u32 = 0xF44336;
pub const LOG: u32 = 0x3E2723;

// Rug
pub const RUG_RED: u32 = 0xC62828;
pub const RUG_RED_SHADOW: u32 = 0xB71C1C;
pub const RUG_WHITE: u32 = 0xFFEBEE;

// Plants
pub const LEAF_DARK: u32 = 0x2E7D32;
pub const LEAF_MID: u32 = 0x43A047;
pub const LEAF_LIGHT: u32 = 0x66BB6A;
pub const POT_CLAY: u32 = 0x8D6E63;
pub const SOIL: u32 = 0x3E2723;

// Window
pub const WIN_FRAME: u32 = 0x3E2723;
pub const WIN_GLASS: u32 = 0xFFF59D;
pub const WIN_GLOW: u32 = 0xFFF9C4;

// Clutter
pub const BOOK_RED: u32 = 0xC62828;
pub const BOOK_BLUE: u32 = 0x1565C0;
pub const BOOK_GREEN: u32 = 0x2E7D32;
pub const BOOK_PAGES: u32 = 0xF5F5F5;
pub const BOTTLE_GLASS: u32 = 0x81C784;
pub const BOTTLE_WINE: u32 = 0x5D1010;

// Desk
pub const LAPTOP_GREY: u32 = 0x546E7A;
pub const LAPTOP_SCREEN: u32 = 0x29B6F6;

// Art
pub const EASEL: u32 = 0x5D4037;
pub const CANVAS: u32 = 0xFFFFFF;
pub const PAINT_SPLATTER: u32 = 0xF44336;
pub const PALETTE_WOOD: u32 = 0xD7CCC8;

// Character
pub const SKIN: u32 = 0xFFCCBC;
pub const HAIR: u32 = 0x212121;
pub const OUTFIT_WHITE: u32 = 0xFFFFFF;
pub const OUTFIT_RED: u32 = 0xC62828;
pub const OUTFIT_DARK: u32 = 0x121212;

// Lights
pub const LIGHT_STRING_OFF: u32 = 0x757575;
pub const LIGHT_STRING_ON: u32 = 0xFFEE58;

pub const BLACK: u32 = 0x000000;
pub const WHITE: u32 = 0xFFFFFF;
pub const GOLD: u32 = 0xFFD700;

/// Colours that fake light emission. Matched by exact value, so variants of
/// these colours do not glow.
pub const GLOWING: [u32; 4] = [LIGHT_STRING_ON, WIN_GLASS, FIRE_CORE, FIRE_MID];

pub fn is_glowing(color: u32) -> bool {
    GLOWING.contains(&color)
}
