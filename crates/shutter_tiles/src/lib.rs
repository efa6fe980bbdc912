//! Shutter Tile Packer
//!
//! Arranges photos of varying aspect ratio into pixel rects for the UI layer.
//!
//! # Strategies
//!
//! - **Template grids**: score a fixed library of grid templates against the
//!   photos and pick the closest fit ([`select_4x3`] and friends), then
//!   expand it with [`Template::apply`]
//! - **Justified rows**: greedy aspect-preserving rows that exactly fill the
//!   group width ([`ShareLayout`], [`EventLayout`], [`InboxCardLayout`])
//!
//! Every strategy returns one rect per input ratio, in input order, snapped to
//! whole pixels. Ratios are assumed positive and finite; callers holding
//! untrusted input should run [`validate_aspect_ratios`] first.
//!
//! # Example
//!
//! ```rust
//! use shutter_tiles::ShareLayout;
//!
//! let layout = ShareLayout::new(300.0)
//!     .with_row_height(100.0)
//!     .with_spacing(0.0)
//!     .apply(&[1.0, 1.0, 1.0]);
//!
//! assert_eq!(layout.rows, 1);
//! assert_eq!(layout.height, 100.0);
//! assert_eq!(layout.frames.len(), 3);
//! ```

pub mod error;
pub mod layouts;
pub mod library;
pub mod rows;
pub mod template;

pub use error::{validate_aspect_ratios, Result, TileError};
pub use layouts::{EventLayout, InboxCardLayout, PackedLayout, ShareLayout};
pub use library::{
    select_3x1, select_4x1, select_4x2, select_4x3, Grid, GRID_3X1, GRID_4X1, GRID_4X2, GRID_4X3,
};
pub use template::{select, Template, TileSpan, TIE_TOLERANCE};
