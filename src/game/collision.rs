//! # Collision Detection
//!
//! Axis-aligned rectangle overlap between entity hitboxes.
//!
//! A hitbox is derived from an entity's anchor position and its nominal
//! sprite footprint scaled by that entity's render scale factor. The same
//! rectangle-intersection test is used for every entity pairing; there is no
//! separate circle approximation anywhere in the crate.

use crate::game::{Footprint, Position};
use serde::{Deserialize, Serialize};

/// The axis-aligned rectangle used for collision testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    /// Builds the hitbox for an entity anchored at `anchor` with the given
    /// nominal sprite footprint and per-kind scale factor.
    ///
    /// # Examples
    ///
    /// ```
    /// use forage::game::{Footprint, Hitbox, Position};
    ///
    /// let hb = Hitbox::from_anchor(
    ///     Position::new(10.0, 20.0),
    ///     Footprint::new(600.0, 400.0),
    ///     0.05,
    /// );
    /// assert_eq!(hb.width, 30.0);
    /// assert_eq!(hb.height, 20.0);
    /// ```
    pub fn from_anchor(anchor: Position, footprint: Footprint, scale: f32) -> Self {
        Self {
            x: anchor.x,
            y: anchor.y,
            width: footprint.width * scale,
            height: footprint.height * scale,
        }
    }

    /// Right edge of the rectangle.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge of the rectangle.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict rectangle-intersection test. Rectangles that merely share an
    /// edge do not overlap.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
