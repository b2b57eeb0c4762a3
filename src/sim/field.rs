//! Brick field generation and storage
//!
//! The field is an ordered grid of bricks laid out left-to-right,
//! top-to-bottom. Storage order is generation order and is what "first
//! brick hit" means during collision.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Cosmetic RGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Uniformly random color
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }

    /// `#rrggbb` form for renderers
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(hex: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&hex).ok_or_else(|| format!("invalid color {hex:?}, expected #rrggbb"))
    }
}

/// A brick (top-left anchored, shared size)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub pos: Vec2,
    pub color: Rgb,
}

impl Brick {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, BRICK_WIDTH, BRICK_HEIGHT)
    }
}

/// Grid shape and placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLayout {
    pub rows: usize,
    pub cols: usize,
    /// Top-left corner of the first brick
    pub origin: Vec2,
    /// Distance between consecutive brick corners (x per column, y per row)
    pub spacing: Vec2,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            cols: BRICK_COLS,
            origin: Vec2::new(BRICK_ORIGIN_X, BRICK_ORIGIN_Y),
            spacing: Vec2::new(BRICK_SPACING_X, BRICK_SPACING_Y),
        }
    }
}

impl FieldLayout {
    /// Number of bricks in a fresh grid
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }
}

/// Build a fresh grid; every brick in a row shares one random color
pub fn generate(
    rows: usize,
    cols: usize,
    spacing_x: f32,
    spacing_y: f32,
    origin_x: f32,
    origin_y: f32,
    rng: &mut impl Rng,
) -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let row_color = Rgb::random(rng);
        let y = origin_y + row as f32 * spacing_y;
        for col in 0..cols {
            let x = origin_x + col as f32 * spacing_x;
            bricks.push(Brick {
                pos: Vec2::new(x, y),
                color: row_color,
            });
        }
    }
    bricks
}

/// The live brick set for a round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    layout: FieldLayout,
    bricks: Vec<Brick>,
}

impl Field {
    /// Generate a full field for `layout`
    pub fn new(layout: FieldLayout, rng: &mut impl Rng) -> Self {
        let mut field = Self {
            layout,
            bricks: Vec::new(),
        };
        field.regenerate(rng);
        field
    }

    /// Replace the brick set with a fresh full grid
    pub fn regenerate(&mut self, rng: &mut impl Rng) {
        let l = self.layout;
        self.bricks = generate(
            l.rows,
            l.cols,
            l.spacing.x,
            l.spacing.y,
            l.origin.x,
            l.origin.y,
            rng,
        );
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// True when no brick has been removed since generation
    pub fn is_full(&self) -> bool {
        self.bricks.len() == self.layout.capacity()
    }

    /// Index of the first brick (storage order) overlapping `bounds`
    pub fn first_hit(&self, bounds: &Aabb) -> Option<usize> {
        self.bricks.iter().position(|b| b.bounds().intersects(bounds))
    }

    /// Remove a brick, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> Brick {
        self.bricks.remove(index)
    }

    #[cfg(test)]
    pub(crate) fn bricks_mut(&mut self) -> &mut Vec<Brick> {
        &mut self.bricks
    }
}
