//! The hand-authored room: architecture, furniture and the character.
//!
//! Pieces are emitted in a fixed order. Only the randomised details (noise
//! textures, book spines, flame placement) change between invocations, so the
//! set of groups and their rough extents are stable while exact voxel counts
//! are not.

use rand::Rng;

use crate::{
    data_structures::voxel::GroupId,
    generator::{
        palette::*,
        shapes::{SaggingString, VoxelBuilder},
    },
};

/// Width and depth of the room footprint.
pub const ROOM_SIZE: i32 = 140;
pub const ROOM_HEIGHT: i32 = 100;
/// Where the character is built; the walking offset is relative to this.
pub const CHARACTER_SPAWN: (i32, i32) = (55, 55);

pub const BED_ID: &str = "bed";
pub const DESK_ID: &str = "notepad";
pub const EASEL_ID: &str = "easel";

pub(crate) fn build_room<R: Rng + ?Sized>(b: &mut VoxelBuilder, rng: &mut R) {
    floor(b, rng);
    walls(b, rng);
    window(b);
    fireplace(b, rng);
    corner_shelf(b);
    bed(b);
    desk(b);
    easel(b);
    rug(b);
    character(b);
    fairy_lights(b);
    wall_decor(b);
}

fn floor<R: Rng + ?Sized>(b: &mut VoxelBuilder, rng: &mut R) {
    for x in 0..ROOM_SIZE {
        for z in 0..ROOM_SIZE {
            let mut color = FLOOR_BASE;
            if (x + z) % 4 == 0 {
                color = FLOOR_VAR_1;
            }
            if rng.r#gen::<f32>() > 0.97 {
                color = FLOOR_VAR_2;
            }
            b.add_voxel([x as f32, 0.0, z as f32], color, None);
        }
    }
    let size = ROOM_SIZE;
    b.add_box([0.0, 1.0, 0.0], [size, 4, 2], SKIRTING, None);
    b.add_box([0.0, 1.0, 0.0], [2, 4, size], SKIRTING, None);
}

fn walls<R: Rng + ?Sized>(b: &mut VoxelBuilder, rng: &mut R) {
    let (size, height) = (ROOM_SIZE, ROOM_HEIGHT);
    let wall = [WALL_BASE, WALL_NOISE_1, WALL_NOISE_2];
    b.add_textured_box(rng, [0.0, 0.0, 0.0], [2, height, size], wall, None);
    b.add_textured_box(rng, [0.0, 0.0, 0.0], [size, height, 2], wall, None);

    let trim_y = (height - 4) as f32;
    b.add_box([0.0, trim_y, 0.0], [size, 4, 3], WOOD_OAK_DARK, None);
    b.add_box([0.0, trim_y, 0.0], [3, 4, size], WOOD_OAK_DARK, None);
}

/// Arched window cut into the left wall.
fn window(b: &mut VoxelBuilder) {
    let (z, y) = (60.0, 30.0);
    let (width, height) = (30, 50);

    b.add_box([0.0, y, z], [3, height, width], BLACK, None);
    b.add_box([2.0, y, z], [1, height, width], WIN_GLASS, None);
    for i in 0..width {
        let arch = (i as f32 / width as f32 * std::f32::consts::PI).sin() * 10.0;
        b.add_box([1.0, y + height as f32 + arch, z + i as f32], [3, 2, 1], WIN_FRAME, None);
    }
    // mullions
    b.add_box([1.0, y, z + (width / 2) as f32], [2, height + 10, 1], WIN_FRAME, None);
    b.add_box([1.0, y + (height / 2) as f32, z], [2, 1, width], WIN_FRAME, None);
    // sill
    b.add_box([2.0, y - 2.0, z - 2.0], [6, 2, width + 4], WOOD_OAK, None);
}

/// Hollow fireplace against the back wall. Every voxel of the assembly is
/// tagged with the fire id, including the 60 loose flame voxels in the void.
fn fireplace<R: Rng + ?Sized>(b: &mut VoxelBuilder, rng: &mut R) {
    let fire = GroupId::Fire;
    let f = Some(&fire);
    let x = 80.0;
    let z = 2.0;
    let (w, h, d) = (34, 30, 12);
    let (xf, hf) = (x, h as f32);

    b.add_box([xf, 0.0, z], [w, 2, d], STONE_MAIN, f);
    b.add_box([xf, 2.0, z], [8, h - 2, d], STONE_MAIN, f);
    b.add_box([xf + (w - 8) as f32, 2.0, z], [8, h - 2, d], STONE_MAIN, f);
    // back wall only 4 deep, leaving room for the flames in front
    b.add_box([xf + 8.0, 2.0, z], [w - 16, h - 10, 4], STONE_SHADOW, f);
    b.add_box([xf + 8.0, hf - 8.0, z], [w - 16, 8, d], STONE_MAIN, f);
    b.add_box([xf - 2.0, hf, z], [w + 4, 4, d + 2], WOOD_OAK_DARK, f);
    b.add_box([xf + 12.0, 2.0, z + 6.0], [10, 3, 3], LOG, f);

    for _ in 0..60 {
        let r = rng.r#gen::<f32>();
        let color = if r > 0.6 {
            FIRE_CORE
        } else if r > 0.3 {
            FIRE_MID
        } else {
            FIRE_OUTER
        };
        let fx = xf + 10.0 + rng.r#gen::<f32>() * 14.0;
        let fy = 5.0 + rng.r#gen::<f32>() * 10.0;
        let fz = z + 6.0 + rng.r#gen::<f32>() * 4.0;
        b.add_voxel([fx, fy, fz], color, f);
    }

    b.add_box([xf + 4.0, hf + 4.0, 2.0], [w - 8, ROOM_HEIGHT - h - 4, 6], STONE_HIGHLIGHT, f);
    // candle with its flame
    b.add_box([xf + 4.0, hf + 4.0, 6.0], [2, 6, 2], RUG_WHITE, f);
    b.add_voxel([xf + 4.0, hf + 10.0, 6.0], FIRE_CORE, f);
    books(b, rng, [xf + 15.0, hf + 4.0, 6.0], 10, 4);
}

/// A row of books with random thickness, height and spine colour, stopping
/// before the row would overflow `width`.
fn books<R: Rng + ?Sized>(b: &mut VoxelBuilder, rng: &mut R, at: [f32; 3], width: i32, depth: i32) {
    let [x, y, z] = at;
    let spines = [BOOK_RED, BOOK_BLUE, BOOK_GREEN, WOOD_MAHOGANY];
    let mut current = 0;
    while current < width - 2 {
        let thickness = rng.gen_range(2..5);
        let height = rng.gen_range(6..12);
        let spine = spines[rng.gen_range(0..spines.len())];
        if current + thickness > width {
            break;
        }
        let cx = x + current as f32;
        b.add_box([cx, y, z], [thickness, height, depth], spine, None);
        b.add_box(
            [cx + 1.0, y + (height - 1) as f32, z + 1.0],
            [thickness - 2, 1, depth - 1],
            BOOK_PAGES,
            None,
        );
        current += thickness;
    }
}

/// Four posts, four shelves and a few props; purely decorative.
fn corner_shelf(b: &mut VoxelBuilder) {
    let (x, z) = (4.0, 4.0);
    let (w, d) = (30.0, 12.0);
    for (px, pz) in [(x, z), (x + w, z), (x, z + d), (x + w, z + d)] {
        b.add_box([px, 0.0, pz], [2, 90, 2], WOOD_OAK, None);
    }
    for y in (10..90).step_by(25) {
        let yf = y as f32;
        b.add_box([x, yf, z], [w as i32 + 2, 2, d as i32 + 2], WOOD_OAK, None);
        match y {
            10 => b.add_box([x + 4.0, yf + 2.0, z + 2.0], [8, 6, 8], WOOD_MAHOGANY, None),
            35 => {
                b.add_box([x + 5.0, yf + 2.0, z + 5.0], [3, 8, 3], BOTTLE_GLASS, None);
                b.add_box([x + 6.0, yf + 10.0, z + 6.0], [1, 3, 1], RUG_RED, None);
                b.add_box([x + 12.0, yf + 2.0, z + 4.0], [3, 8, 3], BOTTLE_WINE, None);
            }
            60 => potted_plant(b, [x + 15.0, yf + 2.0, z + 6.0]),
            _ => {}
        }
    }
}

/// Clay pot with three leaning stems, each crowned by a diamond leaf with two
/// holes punched into it.
fn potted_plant(b: &mut VoxelBuilder, at: [f32; 3]) {
    let [bx, by, bz] = at;
    b.add_box([bx, by, bz], [6, 6, 6], POT_CLAY, None);
    b.add_box([bx + 1.0, by + 6.0, bz + 1.0], [4, 1, 4], SOIL, None);

    // (dx, dz, height, lean x, lean z)
    let stems: [(f32, f32, i32, f32, f32); 3] = [
        (2.0, 2.0, 8, 1.0, 1.0),
        (3.0, 3.0, 12, -1.0, 1.0),
        (2.0, 3.0, 10, 1.0, -1.0),
    ];
    for (dx, dz, height, lean_x, lean_z) in stems {
        let (mut cx, cy, mut cz) = (bx + dx, by + 6.0, bz + dz);
        for i in 0..height {
            b.add_voxel([cx, cy + i as f32, cz], LEAF_DARK, None);
            if i % 3 == 0 {
                cx += lean_x;
            }
            if i % 4 == 0 {
                cz += lean_z;
            }
        }
        let leaf_y = cy + height as f32;
        for lx in -3i32..=3 {
            for lz in -3i32..=3 {
                let hole = (lx, lz) == (1, 1) || (lx, lz) == (-2, -1);
                if lx.abs() + lz.abs() < 5 && !hole {
                    b.add_voxel([cx + lx as f32, leaf_y, cz + lz as f32], LEAF_MID, None);
                }
            }
        }
    }
}

fn bed(b: &mut VoxelBuilder) {
    let bed = GroupId::new(BED_ID);
    let g = Some(&bed);
    let (x, z) = (10.0, 80.0);
    let (w, l) = (50, 70);
    let (wf, lf) = (w as f32, l as f32);

    for (lx, lz) in [(x, z), (x + wf - 3.0, z), (x, z + lf), (x + wf - 3.0, z + lf)] {
        b.add_box([lx, 0.0, lz], [3, 12, 3], BED_FRAME, g);
    }
    b.add_box([x, 12.0, z], [w, 4, l + 3], BED_FRAME, g);
    for slat in (0..w).step_by(4) {
        b.add_box([x + slat as f32, 12.0, z], [2, 25, 2], BED_FRAME, g);
    }
    b.add_box([x, 35.0, z], [w, 2, 2], BED_FRAME, g);
    b.add_box([x + 2.0, 16.0, z + 2.0], [w - 4, 6, l - 2], WHITE, g);

    // duvet: a sine × cosine height field rumpled over the mattress
    for dx in 0..w - 4 {
        for dz in 20..l - 2 {
            let h = ((dx as f32 / 5.0).sin() * (dz as f32 / 5.0).cos() * 2.0 + 2.0).floor();
            let color = if h > 2.0 { BED_SHEET_HIGHLIGHT } else { BED_SHEET_MAIN };
            b.add_voxel([x + 2.0 + dx as f32, 22.0 + h, z + 2.0 + dz as f32], color, g);
        }
    }

    b.add_box([x + 6.0, 22.0, z + 4.0], [16, 4, 10], BED_PILLOW, g);
    b.add_box([x + 26.0, 22.0, z + 4.0], [16, 4, 10], BED_PILLOW, g);

    let (px, py, pz) = (x + 35.0, 26.0, z + 40.0);
    b.add_box([px, py, pz], [6, 6, 6], LEAF_LIGHT, g);
    b.add_box([px + 1.0, py + 4.0, pz + 6.0], [1, 1, 1], WHITE, g);
    b.add_box([px + 4.0, py + 4.0, pz + 6.0], [1, 1, 1], WHITE, g);
}

fn desk(b: &mut VoxelBuilder) {
    let desk = GroupId::new(DESK_ID);
    let g = Some(&desk);
    let (x, z) = (90.0, 80.0);
    let (w, d, h) = (45, 20, 22);
    let (wf, df, hf) = (w as f32, d as f32, h as f32);

    for (lx, lz) in [(x, z), (x + wf - 3.0, z), (x, z + df), (x + wf - 3.0, z + df)] {
        b.add_box([lx, 0.0, lz], [3, h, 3], WOOD_OAK, g);
    }
    b.add_box([x - 2.0, hf, z - 2.0], [w + 4, 2, d + 4], WOOD_OAK_DARK, g);

    // laptop base and a screen tilting back as it rises
    b.add_box([x + 15.0, hf + 2.0, z + 6.0], [14, 1, 10], LAPTOP_GREY, g);
    for i in 0..10 {
        let tilt = i as f32 * 0.3;
        b.add_box([x + 15.0, hf + 2.0 + i as f32, z + 6.0 - tilt], [14, 1, 1], LAPTOP_SCREEN, g);
    }

    b.add_box([x + 35.0, hf + 2.0, z + 4.0], [3, 4, 3], WHITE, g);
    b.add_box([x + 36.0, hf + 5.0, z + 5.0], [1, 1, 1], WOOD_MAHOGANY, g);
    b.add_box([x + 5.0, hf + 2.0, z + 10.0], [8, 1, 6], GOLD, g);
}

fn easel(b: &mut VoxelBuilder) {
    let easel = GroupId::new(EASEL_ID);
    let g = Some(&easel);
    let (x, z) = (70.0, 50.0);

    for i in 0..25 {
        let t = i as f32;
        b.add_voxel([x + t * 0.3, t, z + t * 0.3], EASEL, g);
        b.add_voxel([x - 6.0 + t * 0.1, t, z - 6.0 + t * 0.1], EASEL, g);
        b.add_voxel([x + 6.0 - t * 0.1, t, z - 6.0 + t * 0.1], EASEL, g);
    }
    b.add_box([x - 8.0, 15.0, z - 7.0], [16, 1, 2], EASEL, g);
    b.add_box([x - 7.0, 16.0, z - 8.0], [14, 18, 1], CANVAS, g);
    b.add_box([x - 4.0, 20.0, z - 9.0], [4, 4, 1], PAINT_SPLATTER, g);
    b.add_box([x + 2.0, 26.0, z - 9.0], [2, 6, 1], BOOK_BLUE, g);

    b.add_box([x + 8.0, 0.0, z], [6, 1, 5], PALETTE_WOOD, g);
    b.add_voxel([x + 9.0, 1.0, z + 1.0], RUG_RED, g);
    b.add_voxel([x + 11.0, 1.0, z + 1.0], BOOK_BLUE, g);
}

/// Round mushroom rug: red disc, darker outer ring, white spots.
fn rug(b: &mut VoxelBuilder) {
    let (cx, cz, radius) = (60, 60, 26);
    // (x, z, radius) relative to the rug centre
    let spots = [(-10, -8, 4), (12, 6, 5), (-5, 14, 3)];
    let dist2 = |x: i32, z: i32, ox: i32, oz: i32| (x - ox).pow(2) + (z - oz).pow(2);

    for x in cx - radius..=cx + radius {
        for z in cz - radius..=cz + radius {
            let d = dist2(x, z, cx, cz);
            if d > radius * radius {
                continue;
            }
            let mut color = if d > (radius - 4).pow(2) { RUG_RED_SHADOW } else { RUG_RED };
            if spots
                .iter()
                .any(|&(sx, sz, sr)| dist2(x, z, cx + sx, cz + sz) <= sr * sr)
            {
                color = RUG_WHITE;
            }
            b.add_voxel([x as f32, 1.0, z as f32], color, None);
        }
    }
}

/// The walking character, built bottom-up and facing +Z.
fn character(b: &mut VoxelBuilder) {
    let who = GroupId::Character;
    let g = Some(&who);
    let (x, z) = (CHARACTER_SPAWN.0 as f32, CHARACTER_SPAWN.1 as f32);
    let y = 2.0;

    for foot in [x, x + 5.0] {
        b.add_box([foot, y, z], [3, 2, 4], OUTFIT_DARK, g);
        b.add_box([foot, y + 2.0, z + 1.0], [3, 3, 3], WHITE, g);
        b.add_box([foot, y + 5.0, z + 1.0], [3, 6, 3], SKIN, g);
    }
    // skirt flaring out towards the hem
    for i in 0..6 {
        let flare = i as f32 / 2.0;
        b.add_box(
            [x - 2.0 - flare, y + 11.0 + i as f32, z - 1.0 - flare],
            [12 + i, 1, 6 + i],
            OUTFIT_RED,
            g,
        );
    }
    b.add_box([x, y + 17.0, z], [8, 10, 5], OUTFIT_WHITE, g);
    b.add_box([x, y + 17.0, z], [8, 6, 5], OUTFIT_DARK, g);
    b.add_box([x - 1.0, y + 27.0, z - 1.0], [10, 9, 8], SKIN, g);
    b.add_box([x + 1.0, y + 30.0, z + 7.0], [2, 2, 1], BLACK, g);
    b.add_box([x + 6.0, y + 30.0, z + 7.0], [2, 2, 1], BLACK, g);
    b.add_box([x - 2.0, y + 32.0, z - 2.0], [12, 5, 10], HAIR, g);
    b.add_box([x - 2.0, y + 25.0, z], [2, 12, 8], HAIR, g);
    b.add_box([x + 8.0, y + 25.0, z], [2, 12, 8], HAIR, g);
    b.add_box([x - 2.0, y + 25.0, z - 2.0], [12, 12, 2], HAIR, g);
}

fn fairy_lights(b: &mut VoxelBuilder) {
    let string = SaggingString {
        start: [2.0, 60.0, 60.0].into(),
        end: [40.0, 70.0, 10.0].into(),
        steps: 40,
        sag: 15.0,
        bulb_every: 4,
        wire: LIGHT_STRING_OFF,
        bulb: LIGHT_STRING_ON,
    };
    b.add_sagging_string(&string, None);
}

fn wall_decor(b: &mut VoxelBuilder) {
    // poster
    b.add_box([0.0, 50.0, 20.0], [1, 16, 12], BOOK_BLUE, None);
    b.add_box([1.0, 52.0, 22.0], [1, 12, 8], WHITE, None);
    // coat on its hook
    b.add_box([60.0, 60.0, 1.0], [2, 4, 1], GOLD, None);
    b.add_box([58.0, 48.0, 2.0], [6, 14, 2], POT_CLAY, None);
}
