//! Grid templates
//!
//! A template divides a fixed grid (e.g. 4 columns by 3 rows) into tiles
//! spanning 1-2 columns and 1-3 rows. Photo `i` goes into tile `i`, tiles are
//! ordered row-major by their top-left cell.
//!
//! Selection scores every template with the right number of tiles against
//! the photos' aspect ratios and keeps the closest fit:
//!
//! ```text
//! error = Σ (column_span / row_span - ratio_i)²
//! ```

use serde::Serialize;
use shutter_core::{snap, Rect, Size};

/// Errors closer than this are treated as a tie and broken by the seed
pub const TIE_TOLERANCE: f32 = 1e-4;

/// One tile of a template, in grid cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TileSpan {
    pub column: u8,
    pub row: u8,
    pub column_span: u8,
    pub row_span: u8,
}

impl TileSpan {
    pub const fn new(column: u8, row: u8, column_span: u8, row_span: u8) -> Self {
        Self {
            column,
            row,
            column_span,
            row_span,
        }
    }

    /// Aspect ratio of the tile assuming square cells
    pub fn aspect_ratio(&self) -> f32 {
        f32::from(self.column_span) / f32::from(self.row_span)
    }

    /// Pixel rect for this tile given the cell size and gutter
    pub fn frame(&self, tile_width: f32, tile_height: f32, spacing: f32) -> Rect {
        let x = f32::from(self.column) * (tile_width + spacing);
        let y = f32::from(self.row) * (tile_height + spacing);
        let width = span_length(self.column_span, tile_width, spacing);
        let height = span_length(self.row_span, tile_height, spacing);
        Rect::new(x, y, width, height).snapped()
    }
}

fn span_length(cells: u8, cell: f32, spacing: f32) -> f32 {
    let cells = f32::from(cells);
    cells * cell + (cells - 1.0).max(0.0) * spacing
}

/// A precomputed arrangement of tiles on a fixed grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Template {
    pub(crate) columns: u8,
    pub(crate) rows: u8,
    pub(crate) tiles: &'static [TileSpan],
}

impl Template {
    pub const fn new(columns: u8, rows: u8, tiles: &'static [TileSpan]) -> Self {
        Self {
            columns,
            rows,
            tiles,
        }
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn tiles(&self) -> &'static [TileSpan] {
        self.tiles
    }

    /// Number of photos this template holds
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Sum of squared aspect-ratio differences between tiles and photos
    ///
    /// Pairs tile `i` with `ratios[i]`; extra entries on either side are
    /// ignored.
    pub fn score(&self, ratios: &[f32]) -> f32 {
        self.tiles
            .iter()
            .zip(ratios)
            .map(|(tile, ratio)| {
                let diff = tile.aspect_ratio() - ratio;
                diff * diff
            })
            .sum()
    }

    /// Expand into pixel rects, one per tile in tile order
    pub fn apply(&self, tile_width: f32, tile_height: f32, spacing: f32) -> Vec<Rect> {
        self.tiles
            .iter()
            .map(|tile| tile.frame(tile_width, tile_height, spacing))
            .collect()
    }

    /// Overall pixel size of the expanded grid
    pub fn size(&self, tile_width: f32, tile_height: f32, spacing: f32) -> Size {
        Size::new(
            snap(span_length(self.columns, tile_width, spacing)),
            snap(span_length(self.rows, tile_height, spacing)),
        )
    }

    /// True when the tiles cover every grid cell exactly once
    pub fn is_exact_cover(&self) -> bool {
        let columns = usize::from(self.columns);
        let rows = usize::from(self.rows);
        let mut covered = vec![false; columns * rows];

        for tile in self.tiles {
            let (c0, r0) = (usize::from(tile.column), usize::from(tile.row));
            let c1 = c0 + usize::from(tile.column_span);
            let r1 = r0 + usize::from(tile.row_span);
            if tile.column_span == 0 || tile.row_span == 0 || c1 > columns || r1 > rows {
                return false;
            }
            for row in r0..r1 {
                for column in c0..c1 {
                    let cell = &mut covered[row * columns + column];
                    if *cell {
                        return false;
                    }
                    *cell = true;
                }
            }
        }

        covered.iter().all(|cell| *cell)
    }
}

/// Pick the best-fitting template for `ratios` from `library`
///
/// Only templates with exactly `ratios.len()` tiles are candidates. Every
/// candidate within [`TIE_TOLERANCE`] of the lowest error is a tie, and
/// `seed` picks among ties so that a photo set keeps its template across
/// re-layouts. Returns `None` when no template has that many tiles.
pub fn select(
    library: &'static [Template],
    ratios: &[f32],
    seed: u64,
) -> Option<&'static Template> {
    let scored: Vec<(&'static Template, f32)> = library
        .iter()
        .filter(|template| template.len() == ratios.len())
        .map(|template| (template, template.score(ratios)))
        .collect();

    let best = scored
        .iter()
        .map(|(_, error)| *error)
        .fold(f32::INFINITY, f32::min);

    let ties: Vec<&'static Template> = scored
        .iter()
        .filter(|(_, error)| *error <= best + TIE_TOLERANCE)
        .map(|(template, _)| *template)
        .collect();

    if ties.is_empty() {
        tracing::debug!(count = ratios.len(), "no template holds this many photos");
        return None;
    }

    let index = (seed % ties.len() as u64) as usize;
    let chosen = ties[index];
    tracing::debug!(
        count = ratios.len(),
        candidates = scored.len(),
        ties = ties.len(),
        error = best,
        "selected {}x{} template",
        chosen.columns,
        chosen.rows
    );
    Some(chosen)
}
