//! Justified rows
//!
//! The greedy layouts all reduce to the same pass: clamp the ratios, break
//! them into rows at a nominal row height, then scale each row so it spans
//! the group width exactly.

use std::ops::Range;

use shutter_core::{snap, Rect};

/// Parameters for one justified-row pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowFill {
    /// Group width every row is scaled to
    pub width: f32,
    /// Nominal height used to decide where rows break
    pub row_height: f32,
    /// Gap between images and between rows
    pub spacing: f32,
    /// Ratios below this are raised to it
    pub min_aspect_ratio: f32,
}

impl RowFill {
    pub fn clamp(&self, ratio: f32) -> f32 {
        ratio.max(self.min_aspect_ratio)
    }

    /// Split `ratios` into rows
    ///
    /// A row keeps taking images while its natural width, images at
    /// `row_height` plus gaps, stays within `width`. An empty row always
    /// takes its first image, however wide.
    pub fn break_rows(&self, ratios: &[f32]) -> Vec<Range<usize>> {
        let mut rows = Vec::new();
        let mut start = 0;
        let mut natural = 0.0;

        for (index, ratio) in ratios.iter().enumerate() {
            let image = ratio * self.row_height;
            if index == start {
                natural = image;
            } else if natural + self.spacing + image > self.width {
                rows.push(start..index);
                start = index;
                natural = image;
            } else {
                natural += self.spacing + image;
            }
        }

        if start < ratios.len() {
            rows.push(start..ratios.len());
        }
        rows
    }

    /// Clamp, break and place `ratios` with the first row at `top`
    ///
    /// Appends one frame per ratio to `frames` and returns the stacked
    /// height and the number of rows. The gap between rows is `spacing`
    /// rounded once, so every row gutter has the same whole-pixel height.
    pub fn fill(&self, ratios: &[f32], top: f32, frames: &mut Vec<Rect>) -> (f32, usize) {
        let clamped: Vec<f32> = ratios.iter().map(|ratio| self.clamp(*ratio)).collect();
        let rows = self.break_rows(&clamped);
        let gutter = snap(self.spacing);
        let top = snap(top);

        let mut y = top;
        for (index, range) in rows.iter().enumerate() {
            if index > 0 {
                y += gutter;
            }
            let images = &clamped[range.clone()];
            let height = place_row(images, y, self.width, self.spacing, frames);
            tracing::trace!(row = index, images = images.len(), height, "packed row");
            y += height;
        }

        (y - top, rows.len())
    }
}

/// Place one row so its images and gaps span exactly `width`
///
/// Widths keep each image's ratio at the unrounded row height; edges are then
/// snapped and the last image is stretched to end at `width` rounded to a
/// whole pixel. Returns the rounded row height.
pub fn place_row(
    ratios: &[f32],
    top: f32,
    width: f32,
    spacing: f32,
    frames: &mut Vec<Rect>,
) -> f32 {
    let Some(last) = ratios.len().checked_sub(1) else {
        return 0.0;
    };

    let gaps = spacing * last as f32;
    let total: f32 = ratios.iter().sum();
    let height = ((width - gaps) / total).max(0.0);
    let rounded = snap(height);
    let top = snap(top);
    let end = snap(width);

    let mut x = 0.0;
    for (index, ratio) in ratios.iter().enumerate() {
        let right = if index == last {
            end
        } else {
            snap(x + ratio * height)
        };
        frames.push(Rect::from_edges(snap(x), top, right, top + rounded));
        x += ratio * height + spacing;
    }

    rounded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(width: f32, row_height: f32, spacing: f32) -> RowFill {
        RowFill {
            width,
            row_height,
            spacing,
            min_aspect_ratio: 0.5,
        }
    }

    #[test]
    fn test_row_takes_images_up_to_exact_width() {
        let rows = fill(304.0, 100.0, 2.0).break_rows(&[1.0, 1.0, 1.0]);
        assert_eq!(rows, vec![0..3]);
    }

    #[test]
    fn test_overflowing_image_starts_new_row() {
        let rows = fill(300.0, 100.0, 0.0).break_rows(&[1.0, 1.0, 1.0, 1.0, 2.0]);
        assert_eq!(rows, vec![0..3, 3..5]);
    }

    #[test]
    fn test_empty_row_accepts_wide_image() {
        let rows = fill(300.0, 100.0, 0.0).break_rows(&[5.0, 1.0, 4.0]);
        assert_eq!(rows, vec![0..1, 1..2, 2..3]);
        assert!(fill(300.0, 100.0, 0.0).break_rows(&[]).is_empty());
    }

    #[test]
    fn test_place_row_spans_width() {
        let mut frames = Vec::new();
        let height = place_row(&[1.0, 1.0, 1.0], 10.0, 304.0, 2.0, &mut frames);

        assert_eq!(height, 100.0);
        assert_eq!(
            frames,
            vec![
                Rect::new(0.0, 10.0, 100.0, 100.0),
                Rect::new(102.0, 10.0, 100.0, 100.0),
                Rect::new(204.0, 10.0, 100.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_place_row_snaps_without_seams() {
        let mut frames = Vec::new();
        place_row(&[1.0, 1.3, 0.7], 0.0, 320.0, 0.0, &mut frames);

        assert_eq!(frames[0].x(), 0.0);
        assert_eq!(frames[0].max_x(), frames[1].x());
        assert_eq!(frames[1].max_x(), frames[2].x());
        assert_eq!(frames[2].max_x(), 320.0);
        for frame in &frames {
            assert_eq!(frame.x(), frame.x().round());
            assert_eq!(frame.height(), frame.height().round());
        }
    }

    #[test]
    fn test_fill_stacks_rows_with_spacing() {
        let mut frames = Vec::new();
        let (height, rows) = fill(300.0, 100.0, 4.0).fill(&[1.0, 1.0, 1.0], 0.0, &mut frames);

        // 1 + 1 fit in 204, the third would need 308
        assert_eq!(rows, 2);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], Rect::new(0.0, 0.0, 148.0, 148.0));
        assert_eq!(frames[2], Rect::new(0.0, 152.0, 300.0, 300.0));
        assert_eq!(height, 148.0 + 4.0 + 300.0);
    }

    #[test]
    fn test_fill_clamps_narrow_ratios() {
        let mut frames = Vec::new();
        let (height, rows) = fill(300.0, 100.0, 0.0).fill(&[0.1], 0.0, &mut frames);

        assert_eq!(rows, 1);
        assert_eq!(frames, vec![Rect::new(0.0, 0.0, 300.0, 600.0)]);
        assert_eq!(height, 600.0);
    }

    #[test]
    fn test_fractional_width_ends_on_whole_pixel() {
        let mut frames = Vec::new();
        place_row(&[1.0, 1.0], 0.0, 320.5, 0.0, &mut frames);

        assert_eq!(frames[0], Rect::new(0.0, 0.0, 160.0, 160.0));
        assert_eq!(frames[1].max_x(), 321.0);
        assert_eq!(frames[1].width(), frames[1].width().round());
    }

    #[test]
    fn test_fractional_spacing_keeps_gutters_even() {
        let mut frames = Vec::new();
        let (height, rows) = fill(300.0, 100.0, 2.5).fill(&[2.0, 2.0, 2.0], 0.0, &mut frames);

        assert_eq!(rows, 3);
        let first_gap = frames[1].y() - frames[0].max_y();
        let second_gap = frames[2].y() - frames[1].max_y();
        assert_eq!(first_gap, 3.0);
        assert_eq!(second_gap, first_gap);
        assert_eq!(height, 3.0 * 150.0 + 2.0 * 3.0);
        assert_eq!(height, frames[2].max_y());
    }
}
