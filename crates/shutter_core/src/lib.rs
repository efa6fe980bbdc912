//! Shutter Core
//!
//! Geometry primitives shared by the Shutter engines:
//!
//! - **Vec2**: 2D vector with the arithmetic the motion integrator needs
//! - **Point / Size / Rect**: layout geometry produced by the tile packer
//! - **Pixel snapping**: rounding helpers that keep adjacent tiles seamless
//!
//! # Example
//!
//! ```rust
//! use shutter_core::{Rect, Vec2};
//!
//! let velocity = Vec2::new(3.0, 4.0);
//! assert_eq!(velocity.length(), 5.0);
//!
//! let frame = Rect::new(0.4, 10.6, 99.7, 50.2).snapped();
//! assert_eq!(frame, Rect::new(0.0, 11.0, 100.0, 50.0));
//! ```

pub mod geometry;

pub use geometry::{snap, Point, Rect, Size, Vec2};
