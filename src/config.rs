//! Tunable layout parameters.
//!
//! DESIGN
//! ======
//! Every radius, step and board dimension has a compiled-in default from
//! [`crate::consts`]. Hosts that want different values either build a
//! [`LayoutConfig`] directly or call [`LayoutConfig::from_env`], which reads
//! `PROTOBOARD_*` variables and falls back to the default for anything
//! missing or unparsable.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::{self, VarError};

use tracing::warn;

use crate::consts::{
    BOARD_COLS, BOARD_HOLE_INSET, BOARD_PITCH, BOARD_RAIL_OFFSET, BOARD_ROWS, BODY_HALF_EXTENT,
    COARSE_ROTATE_STEP_DEG, COMPONENT_HEIGHT, COMPONENT_WIDTH, FINE_ROTATE_STEP_DEG, HOLE_CAPTURE_RADIUS,
    PIN_PICK_RADIUS,
};

/// Board grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    /// Distance between neighbouring holes.
    pub pitch: f64,
    /// Width of the power-rail margin left of the hole field.
    pub rail_offset: f64,
    /// Extra inset from the board origin to the first hole.
    pub hole_inset: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            pitch: BOARD_PITCH,
            rail_offset: BOARD_RAIL_OFFSET,
            hole_inset: BOARD_HOLE_INSET,
        }
    }
}

/// Interaction and geometry parameters for a [`crate::layout::Layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub pick_radius: f64,
    pub hole_capture_radius: f64,
    pub body_half_extent: f64,
    pub component_width: f64,
    pub component_height: f64,
    pub fine_rotate_step: f64,
    pub coarse_rotate_step: f64,
    pub board: BoardConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pick_radius: PIN_PICK_RADIUS,
            hole_capture_radius: HOLE_CAPTURE_RADIUS,
            body_half_extent: BODY_HALF_EXTENT,
            component_width: COMPONENT_WIDTH,
            component_height: COMPONENT_HEIGHT,
            fine_rotate_step: FINE_ROTATE_STEP_DEG,
            coarse_rotate_step: COARSE_ROTATE_STEP_DEG,
            board: BoardConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Defaults overridden by `PROTOBOARD_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match env::var(key) {
            Ok(raw) => Some(raw),
            Err(VarError::NotPresent) => None,
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable setting");
                None
            }
        })
    }

    /// Defaults overridden by whatever `lookup` returns for each key.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let board = BoardConfig {
            rows: parse_or(&lookup, "PROTOBOARD_BOARD_ROWS", defaults.board.rows),
            cols: parse_or(&lookup, "PROTOBOARD_BOARD_COLS", defaults.board.cols),
            pitch: parse_or(&lookup, "PROTOBOARD_BOARD_PITCH", defaults.board.pitch),
            ..defaults.board
        };
        Self {
            pick_radius: parse_or(&lookup, "PROTOBOARD_PICK_RADIUS", defaults.pick_radius),
            hole_capture_radius: parse_or(&lookup, "PROTOBOARD_HOLE_CAPTURE_RADIUS", defaults.hole_capture_radius),
            board,
            ..defaults
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(v) => v,
        Err(_) => {
            warn!(key, raw = %raw, "unparsable setting; using default");
            default
        }
    }
}
