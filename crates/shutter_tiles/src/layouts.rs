//! Greedy fill layouts
//!
//! Share, event and inbox card groups built on the justified-row pass in
//! [`crate::rows`].

use serde::{Deserialize, Serialize};
use shutter_core::{snap, Rect};

use crate::rows::{place_row, RowFill};

/// Output of a packing call
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PackedLayout {
    /// One frame per input ratio, in input order
    pub frames: Vec<Rect>,
    /// Total stacked height of all rows
    pub height: f32,
    /// Number of rows, including a hero row
    pub rows: usize,
}

impl PackedLayout {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Share
// ─────────────────────────────────────────────────────────────────────────────

/// Justified rows over every photo of a shared group
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareLayout {
    pub width: f32,
    pub row_height: f32,
    pub spacing: f32,
    pub min_aspect_ratio: f32,
}

impl Default for ShareLayout {
    fn default() -> Self {
        Self {
            width: 320.0,
            row_height: 120.0,
            spacing: 2.0,
            min_aspect_ratio: 0.5,
        }
    }
}

impl ShareLayout {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn with_row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_min_aspect_ratio(mut self, min_aspect_ratio: f32) -> Self {
        self.min_aspect_ratio = min_aspect_ratio;
        self
    }

    fn rows(&self) -> RowFill {
        RowFill {
            width: self.width,
            row_height: self.row_height,
            spacing: self.spacing,
            min_aspect_ratio: self.min_aspect_ratio,
        }
    }

    pub fn apply(&self, ratios: &[f32]) -> PackedLayout {
        let mut frames = Vec::with_capacity(ratios.len());
        let (height, rows) = self.rows().fill(ratios, 0.0, &mut frames);
        PackedLayout {
            frames,
            height,
            rows,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Event
// ─────────────────────────────────────────────────────────────────────────────

/// An event group: a full-width hero photo above justified rows
///
/// The hero keeps its aspect ratio up to `max_hero_height`; taller heroes
/// are cropped to that height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventLayout {
    pub width: f32,
    pub row_height: f32,
    pub spacing: f32,
    pub min_aspect_ratio: f32,
    pub max_hero_height: f32,
}

impl Default for EventLayout {
    fn default() -> Self {
        Self {
            width: 320.0,
            row_height: 120.0,
            spacing: 2.0,
            min_aspect_ratio: 0.5,
            max_hero_height: 400.0,
        }
    }
}

impl EventLayout {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn with_row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_min_aspect_ratio(mut self, min_aspect_ratio: f32) -> Self {
        self.min_aspect_ratio = min_aspect_ratio;
        self
    }

    pub fn with_max_hero_height(mut self, max_hero_height: f32) -> Self {
        self.max_hero_height = max_hero_height;
        self
    }

    fn rows(&self) -> RowFill {
        RowFill {
            width: self.width,
            row_height: self.row_height,
            spacing: self.spacing,
            min_aspect_ratio: self.min_aspect_ratio,
        }
    }

    /// Height of the hero row for a photo of `ratio`
    pub fn hero_height(&self, ratio: f32) -> f32 {
        let ratio = ratio.max(self.min_aspect_ratio);
        snap((self.width / ratio).min(self.max_hero_height))
    }

    pub fn apply(&self, ratios: &[f32]) -> PackedLayout {
        let Some((hero, rest)) = ratios.split_first() else {
            return PackedLayout::default();
        };

        let hero_height = self.hero_height(*hero);
        let mut frames = Vec::with_capacity(ratios.len());
        frames.push(Rect::from_edges(0.0, 0.0, snap(self.width), hero_height));

        if rest.is_empty() {
            return PackedLayout {
                frames,
                height: hero_height,
                rows: 1,
            };
        }

        let top = hero_height + snap(self.spacing);
        let (height, rows) = self.rows().fill(rest, top, &mut frames);
        PackedLayout {
            frames,
            height: top + height,
            rows: rows + 1,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inbox card
// ─────────────────────────────────────────────────────────────────────────────

/// Photos attached to an inbox card
///
/// Collapsed, the card shows every photo in a single filmstrip row; expanded,
/// it shows justified rows at `expanded_row_height`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxCardLayout {
    pub width: f32,
    pub expanded_row_height: f32,
    pub spacing: f32,
    pub min_aspect_ratio: f32,
}

impl Default for InboxCardLayout {
    fn default() -> Self {
        Self {
            width: 300.0,
            expanded_row_height: 160.0,
            spacing: 2.0,
            min_aspect_ratio: 0.5,
        }
    }
}

impl InboxCardLayout {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn with_expanded_row_height(mut self, expanded_row_height: f32) -> Self {
        self.expanded_row_height = expanded_row_height;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_min_aspect_ratio(mut self, min_aspect_ratio: f32) -> Self {
        self.min_aspect_ratio = min_aspect_ratio;
        self
    }

    /// Collapsed card: one filmstrip row scaled to the card width
    pub fn apply(&self, ratios: &[f32]) -> PackedLayout {
        if ratios.is_empty() {
            return PackedLayout::default();
        }

        let clamped: Vec<f32> = ratios
            .iter()
            .map(|ratio| ratio.max(self.min_aspect_ratio))
            .collect();
        let mut frames = Vec::with_capacity(ratios.len());
        let height = place_row(&clamped, 0.0, self.width, self.spacing, &mut frames);
        tracing::trace!(images = ratios.len(), height, "packed filmstrip");

        PackedLayout {
            frames,
            height,
            rows: 1,
        }
    }

    /// Expanded card: justified rows at the expanded row height
    pub fn apply_expanded(&self, ratios: &[f32]) -> PackedLayout {
        let fill = RowFill {
            width: self.width,
            row_height: self.expanded_row_height,
            spacing: self.spacing,
            min_aspect_ratio: self.min_aspect_ratio,
        };
        let mut frames = Vec::with_capacity(ratios.len());
        let (height, rows) = fill.fill(ratios, 0.0, &mut frames);
        PackedLayout {
            frames,
            height,
            rows,
        }
    }
}
