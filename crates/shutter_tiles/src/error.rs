//! Error types for shutter_tiles

use thiserror::Error;

use crate::library::Grid;

/// Errors reported around tile packing
///
/// The packers themselves never fail; these surface from input validation and
/// from callers that require a template to exist.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TileError {
    /// An aspect ratio that is zero, negative, NaN or infinite
    #[error("invalid aspect ratio {value} at index {index}")]
    InvalidAspectRatio { index: usize, value: f32 },

    /// No template in the grid's library has this many tiles
    #[error("no {grid} template holds {count} photos")]
    NoTemplate { count: usize, grid: Grid },
}

/// Result type for shutter_tiles operations
pub type Result<T> = std::result::Result<T, TileError>;

/// Reject ratios the packers cannot lay out
pub fn validate_aspect_ratios(ratios: &[f32]) -> Result<()> {
    match ratios
        .iter()
        .position(|ratio| !ratio.is_finite() || *ratio <= 0.0)
    {
        Some(index) => Err(TileError::InvalidAspectRatio {
            index,
            value: ratios[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ratios_pass() {
        assert!(validate_aspect_ratios(&[]).is_ok());
        assert!(validate_aspect_ratios(&[0.5, 1.0, 1.777]).is_ok());
    }

    #[test]
    fn test_first_bad_ratio_is_reported() {
        let err = validate_aspect_ratios(&[1.0, 0.0, -2.0]).unwrap_err();
        assert_eq!(err, TileError::InvalidAspectRatio { index: 1, value: 0.0 });

        let err = validate_aspect_ratios(&[1.0, f32::INFINITY]).unwrap_err();
        assert!(matches!(err, TileError::InvalidAspectRatio { index: 1, .. }));
        assert!(validate_aspect_ratios(&[f32::NAN]).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = TileError::NoTemplate {
            count: 1,
            grid: Grid::FourByThree,
        };
        assert_eq!(err.to_string(), "no 4x3 template holds 1 photos");
    }
}
