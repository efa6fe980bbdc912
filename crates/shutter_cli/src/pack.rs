//! `shutter pack`: lay out a photo set with one of the packers

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use shutter_core::Rect;
use shutter_tiles::{validate_aspect_ratios, Grid, PackedLayout, Template};

use crate::config::TilesConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Justified rows over every photo
    Share,
    /// Full-width hero above justified rows
    Event,
    /// Collapsed inbox card filmstrip
    Inbox,
    /// Expanded inbox card
    InboxExpanded,
    #[value(name = "4x3")]
    Grid4x3,
    #[value(name = "4x2")]
    Grid4x2,
    #[value(name = "4x1")]
    Grid4x1,
    #[value(name = "3x1")]
    Grid3x1,
}

/// Result printed by `shutter pack`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Packing {
    pub frames: Vec<Rect>,
    pub height: f32,
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<&'static Template>,
}

impl From<PackedLayout> for Packing {
    fn from(layout: PackedLayout) -> Self {
        Self {
            frames: layout.frames,
            height: layout.height,
            rows: layout.rows,
            template: None,
        }
    }
}

/// Validate `ratios` and run the packer for `strategy`
pub fn pack(
    strategy: Strategy,
    tiles: &TilesConfig,
    ratios: &[f32],
    seed: u64,
) -> Result<Packing> {
    validate_aspect_ratios(ratios)?;

    let layout = match strategy {
        Strategy::Share => tiles.share.apply(ratios),
        Strategy::Event => tiles.event.apply(ratios),
        Strategy::Inbox => tiles.inbox.apply(ratios),
        Strategy::InboxExpanded => tiles.inbox.apply_expanded(ratios),
        Strategy::Grid4x3 => return pack_grid(Grid::FourByThree, tiles, ratios, seed),
        Strategy::Grid4x2 => return pack_grid(Grid::FourByTwo, tiles, ratios, seed),
        Strategy::Grid4x1 => return pack_grid(Grid::FourByOne, tiles, ratios, seed),
        Strategy::Grid3x1 => return pack_grid(Grid::ThreeByOne, tiles, ratios, seed),
    };
    Ok(layout.into())
}

/// Expand the best template for `grid` over the share width with square cells
fn pack_grid(grid: Grid, tiles: &TilesConfig, ratios: &[f32], seed: u64) -> Result<Packing> {
    let template = grid.require(ratios, seed)?;
    let spacing = tiles.grid_spacing;
    let columns = f32::from(template.columns());
    let cell = ((tiles.share.width - spacing * (columns - 1.0)) / columns).max(0.0);

    Ok(Packing {
        frames: template.apply(cell, cell, spacing),
        height: template.size(cell, cell, spacing).height,
        rows: usize::from(template.rows()),
        template: Some(template),
    })
}
