//! Triangular peg layout
//!
//! Pure geometry: the layout is computed once from [`Settings`] and then
//! materialized into static bodies by the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PEG_RADIUS_FRAC;
use crate::settings::Settings;

/// One horizontal row of pegs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PegRow {
    pub y: f32,
    /// Peg centres, left to right
    pub positions: Vec<Vec2>,
}

impl PegRow {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Peg positions for a whole board, top row first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub rows: Vec<PegRow>,
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub peg_radius: f32,
    pub center_x: f32,
    /// Height of the top row
    pub top_y: f32,
}

impl BoardLayout {
    /// Compute the layout for `settings`.
    ///
    /// Row `i` holds `first_row_pegs + i` pegs centred on the arena midline, so
    /// the last row is the widest and spans exactly the configured peg area width.
    pub fn generate(settings: &Settings) -> Self {
        let rows = settings.rows;
        let first = settings.first_row_pegs;
        debug_assert!(rows > 1, "a board needs at least two rows");
        debug_assert!(first >= 1, "the first row needs at least one peg");

        let center_x = settings.center_x();
        let top_y = settings.peg_area_start();
        let spacing_x = settings.peg_area_width() / (rows - 1 + first - 1) as f32;
        let spacing_y = settings.peg_area_height() / (rows - 1) as f32;

        let rows = (0..rows)
            .map(|row| {
                let pegs_in_row = first + row;
                let start_x = center_x - (pegs_in_row - 1) as f32 * spacing_x / 2.0;
                let y = top_y - row as f32 * spacing_y;
                let positions = (0..pegs_in_row)
                    .map(|col| Vec2::new(start_x + col as f32 * spacing_x, y))
                    .collect();
                PegRow { y, positions }
            })
            .collect();

        Self {
            rows,
            spacing_x,
            spacing_y,
            peg_radius: spacing_y * PEG_RADIUS_FRAC,
            center_x,
            top_y,
        }
    }

    /// Total number of pegs on the board
    pub fn peg_count(&self) -> usize {
        self.rows.iter().map(PegRow::len).sum()
    }

    /// All peg centres in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.rows.iter().flat_map(|row| row.positions.iter().copied())
    }

    /// Drop height, `rows_above` row spacings over the top row
    pub fn spawn_height(&self, rows_above: f32) -> f32 {
        self.top_y + rows_above * self.spacing_y
    }

    /// True if every peg (including its radius) lies strictly inside the arena
    pub fn fits_within(&self, width: f32, height: f32) -> bool {
        let r = self.peg_radius;
        self.positions()
            .all(|p| p.x - r > 0.0 && p.x + r < width && p.y - r > 0.0 && p.y + r < height)
    }
}
