//! Level layouts and the catalog they are looked up from.

use glam::Vec2;
use serde::Deserialize;

use crate::contact::LandingPad;

/// A landing pad placed in a level.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PadPlacement {
    /// Centre of the pad's top surface.
    pub centre: Vec2,
    /// Width of the landing surface.
    pub width: f32,
    /// Score multiplier.
    pub multiplier: f32,
}

impl PadPlacement {
    /// Pad component seen by the contact classifier.
    #[must_use]
    pub fn pad(&self) -> LandingPad {
        LandingPad::new(self.multiplier)
    }

    /// Whether `x` lies over the landing surface.
    #[must_use]
    pub fn spans(&self, x: f32) -> bool {
        (x - self.centre.x).abs() <= self.width * 0.5
    }
}

/// Static layout of one level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LevelDefinition {
    /// One-based level number.
    pub number: u32,
    /// Where the craft spawns.
    pub start: Vec2,
    /// Height of the flat terrain.
    pub ground_height: f32,
    /// Landing pads.
    #[serde(default)]
    pub pads: Vec<PadPlacement>,
    /// Coin positions.
    #[serde(default)]
    pub coins: Vec<Vec2>,
    /// Fuel cell positions.
    #[serde(default)]
    pub fuel_cells: Vec<Vec2>,
}

/// Ordered set of levels making up a run.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::new(default_levels())
    }
}

impl LevelCatalog {
    /// Builds a catalog ordered by level number.
    #[must_use]
    pub fn new(mut levels: Vec<LevelDefinition>) -> Self {
        levels.sort_by_key(|level| level.number);
        Self { levels }
    }

    /// Looks up a level by its one-based number.
    #[must_use]
    pub fn get(&self, number: u32) -> Option<&LevelDefinition> {
        self.levels.iter().find(|level| level.number == number)
    }

    /// Number of levels.
    #[must_use]
    pub fn count(&self) -> u32 {
        u32::try_from(self.levels.len()).unwrap_or(u32::MAX)
    }

    /// Whether the catalog holds no levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels in play order.
    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }
}

/// Built-in levels used when no configuration supplies its own.
#[must_use]
pub fn default_levels() -> Vec<LevelDefinition> {
    vec![
        LevelDefinition {
            number: 1,
            start: Vec2::new(0.0, 12.0),
            ground_height: 0.0,
            pads: vec![PadPlacement {
                centre: Vec2::new(0.0, 1.0),
                width: 4.0,
                multiplier: 1.0,
            }],
            coins: vec![Vec2::new(0.0, 8.0)],
            fuel_cells: Vec::new(),
        },
        LevelDefinition {
            number: 2,
            start: Vec2::new(-6.0, 18.0),
            ground_height: 0.0,
            pads: vec![
                PadPlacement {
                    centre: Vec2::new(-6.0, 2.0),
                    width: 3.0,
                    multiplier: 2.0,
                },
                PadPlacement {
                    centre: Vec2::new(8.0, 0.5),
                    width: 5.0,
                    multiplier: 1.0,
                },
            ],
            coins: vec![Vec2::new(-6.0, 12.0)],
            fuel_cells: vec![Vec2::new(-6.0, 14.0)],
        },
        LevelDefinition {
            number: 3,
            start: Vec2::new(4.0, 26.0),
            ground_height: -2.0,
            pads: vec![PadPlacement {
                centre: Vec2::new(4.0, 3.0),
                width: 2.0,
                multiplier: 3.0,
            }],
            coins: vec![Vec2::new(4.0, 20.0), Vec2::new(4.0, 10.0)],
            fuel_cells: vec![Vec2::new(4.0, 15.0)],
        },
    ]
}
