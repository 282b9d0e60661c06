//! Precomputed attack tables, built on first use and shared by every game.
//!
//! Leapers (king, knight, pawn) get one bitboard per square. Sliders (rook,
//! bishop) get one table per square keyed by the blocker pattern inside the
//! square's edge-trimmed ray mask, so per-move generation is a lookup
//! instead of a ray walk. The tables are immutable after construction.

use once_cell::sync::Lazy;

use super::types::{Bitboard, Color, Square};

pub(crate) static KING_MOVES: Lazy<[u64; 64]> = Lazy::new(|| {
    let deltas = [
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ];
    leaper_table(&deltas)
});

pub(crate) static KNIGHT_MOVES: Lazy<[u64; 64]> = Lazy::new(|| {
    let deltas = [
        (2, 1),
        (1, 2),
        (-1, 2),
        (-2, 1),
        (-2, -1),
        (-1, -2),
        (1, -2),
        (2, -1),
    ];
    leaper_table(&deltas)
});

/// Capture targets per color: the two forward diagonals.
pub(crate) static PAWN_CAPTURES: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut tables = [[0u64; 64]; 2];
    for color in Color::BOTH {
        let dr = color.pawn_direction();
        for sq in 0..64 {
            let from = Square::from_index(sq);
            let mut mask = 0u64;
            for dc in [-1, 1] {
                if let Some(to) = from.offset(dr, dc) {
                    mask |= 1u64 << to.as_index();
                }
            }
            tables[color.index()][sq] = mask;
        }
    }
    tables
});

/// Push targets per color: one square forward, plus the double push from
/// the pawn's start row.
pub(crate) static PAWN_PUSHES: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut tables = [[0u64; 64]; 2];
    for color in Color::BOTH {
        let dr = color.pawn_direction();
        for sq in 0..64 {
            let from = Square::from_index(sq);
            let mut mask = 0u64;
            if let Some(to) = from.offset(dr, 0) {
                mask |= 1u64 << to.as_index();
                if from.row() == color.pawn_start_row() {
                    if let Some(double) = from.offset(2 * dr, 0) {
                        mask |= 1u64 << double.as_index();
                    }
                }
            }
            tables[color.index()][sq] = mask;
        }
    }
    tables
});

// Ray direction indices; increasing directions scan from the low bit end.
const DIR_N: usize = 0;
const DIR_S: usize = 1;
const DIR_E: usize = 2;
const DIR_W: usize = 3;
const DIR_NE: usize = 4;
const DIR_NW: usize = 5;
const DIR_SE: usize = 6;
const DIR_SW: usize = 7;

const DIR_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const ROOK_DIRS: [usize; 4] = [DIR_N, DIR_S, DIR_E, DIR_W];
const BISHOP_DIRS: [usize; 4] = [DIR_NE, DIR_NW, DIR_SE, DIR_SW];

static RAYS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    for sq in 0..64 {
        for (dir, &(dr, dc)) in DIR_DELTAS.iter().enumerate() {
            let mut mask = 0u64;
            let mut cur = Square::from_index(sq);
            while let Some(next) = cur.offset(dr, dc) {
                mask |= 1u64 << next.as_index();
                cur = next;
            }
            rays[dir][sq] = mask;
        }
    }
    rays
});

/// Rook blocker masks: the four straight rays with the far edge square of
/// each ray removed (an edge square can never change what is reachable).
static ROOK_MASKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut masks = [0u64; 64];
    for (sq, slot) in masks.iter_mut().enumerate() {
        let mut mask = 0u64;
        for &dir in &ROOK_DIRS {
            let ray = RAYS[dir][sq];
            let trimmed = match dir {
                DIR_N => ray & !Bitboard::RANK_8.0,
                DIR_S => ray & !Bitboard::RANK_1.0,
                DIR_E => ray & !Bitboard::FILE_A.0,
                DIR_W => ray & !Bitboard::FILE_H.0,
                _ => ray,
            };
            mask |= trimmed;
        }
        *slot = mask;
    }
    masks
});

/// Bishop blocker masks: the four diagonal rays, all edge squares removed.
static BISHOP_MASKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let edges =
        Bitboard::RANK_1.0 | Bitboard::RANK_8.0 | Bitboard::FILE_A.0 | Bitboard::FILE_H.0;
    let mut masks = [0u64; 64];
    for (sq, slot) in masks.iter_mut().enumerate() {
        let mut mask = 0u64;
        for &dir in &BISHOP_DIRS {
            mask |= RAYS[dir][sq] & !edges;
        }
        *slot = mask;
    }
    masks
});

static ROOK_TABLE: Lazy<Vec<Vec<u64>>> = Lazy::new(|| slider_table(&ROOK_MASKS, &ROOK_DIRS));

static BISHOP_TABLE: Lazy<Vec<Vec<u64>>> = Lazy::new(|| slider_table(&BISHOP_MASKS, &BISHOP_DIRS));

fn leaper_table(deltas: &[(isize, isize)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    for (sq, slot) in table.iter_mut().enumerate() {
        let from = Square::from_index(sq);
        let mut mask = 0u64;
        for &(dr, dc) in deltas {
            if let Some(to) = from.offset(dr, dc) {
                mask |= 1u64 << to.as_index();
            }
        }
        *slot = mask;
    }
    table
}

/// For each square, enumerate every blocker pattern inside the mask and
/// walk the rays once per pattern.
fn slider_table(masks: &[u64; 64], dirs: &[usize; 4]) -> Vec<Vec<u64>> {
    let mut tables = Vec::with_capacity(64);
    for sq in 0..64 {
        let mask = masks[sq];
        let size = 1usize << mask.count_ones();
        let mut table = vec![0u64; size];
        for (index, slot) in table.iter_mut().enumerate() {
            let occupancy = occupancy_from_index(index, mask);
            *slot = walk_rays(sq, occupancy, dirs);
        }
        tables.push(table);
    }
    tables
}

/// Expand a table index back into the blocker pattern it encodes.
fn occupancy_from_index(mut index: usize, mut mask: u64) -> u64 {
    let mut occupancy = 0u64;
    while mask != 0 {
        let sq = pop_lsb_u64(&mut mask);
        if index & 1 != 0 {
            occupancy |= 1u64 << sq;
        }
        index >>= 1;
    }
    occupancy
}

/// Compress the blocker pattern inside `mask` into a table index.
fn index_from_occupancy(occupancy: u64, mut mask: u64) -> usize {
    let mut index = 0usize;
    let mut bit = 0usize;
    while mask != 0 {
        let sq = pop_lsb_u64(&mut mask);
        if occupancy & (1u64 << sq) != 0 {
            index |= 1usize << bit;
        }
        bit += 1;
    }
    index
}

fn pop_lsb_u64(bb: &mut u64) -> usize {
    let idx = bb.trailing_zeros() as usize;
    *bb &= *bb - 1;
    idx
}

fn ray_attacks(from: usize, dir: usize, occupancy: u64) -> u64 {
    let ray = RAYS[dir][from];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }
    // The nearest blocker stays in the attack set as a capture target;
    // everything beyond it is shadowed.
    let blocker = if matches!(dir, DIR_N | DIR_E | DIR_NE | DIR_NW) {
        blockers.trailing_zeros() as usize
    } else {
        63 - blockers.leading_zeros() as usize
    };
    ray ^ RAYS[dir][blocker]
}

fn walk_rays(from: usize, occupancy: u64, dirs: &[usize; 4]) -> u64 {
    let mut attacks = 0u64;
    for &dir in dirs {
        attacks |= ray_attacks(from, dir, occupancy);
    }
    attacks
}

/// King step targets from `sq`.
#[inline]
pub(crate) fn king_moves(sq: Square) -> Bitboard {
    Bitboard(KING_MOVES[sq.as_index()])
}

/// Knight jump targets from `sq`.
#[inline]
pub(crate) fn knight_moves(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_MOVES[sq.as_index()])
}

/// Unfiltered pawn push targets (single and, from the start row, double).
#[inline]
pub(crate) fn pawn_pushes(color: Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_PUSHES[color.index()][sq.as_index()])
}

/// The two diagonal capture targets, regardless of occupancy.
#[inline]
pub(crate) fn pawn_captures(color: Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_CAPTURES[color.index()][sq.as_index()])
}

/// Rook attack set for the given occupancy, first blocker included.
#[inline]
pub(crate) fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    let idx = sq.as_index();
    let key = index_from_occupancy(occupancy.0, ROOK_MASKS[idx]);
    Bitboard(ROOK_TABLE[idx][key])
}

/// Bishop attack set for the given occupancy, first blocker included.
#[inline]
pub(crate) fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    let idx = sq.as_index();
    let key = index_from_occupancy(occupancy.0, BISHOP_MASKS[idx]);
    Bitboard(BISHOP_TABLE[idx][key])
}
