//! Loose-object layouts (named shape constraints).

use std::fmt;

use super::ConfigurationObjectType::{self, Circle, Line, Point};

/// Named shape constraint fixing the number, types and order of loose objects.
///
/// Every layout is symmetric in its same-typed loose objects, so relabeling
/// them never changes the described configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LooseObjectLayout {
    /// Two distinct points.
    TwoPoints,
    /// Non-degenerate acute scalene triangle.
    Triangle,
    /// Four points, no three collinear.
    Quadrilateral,
    /// A line and a point off it.
    LineAndPoint,
    /// A line and two distinct points off it.
    LineAndTwoPoints,
    /// A circle and a point neither on it nor at its center.
    CircleAndPoint,
}

impl LooseObjectLayout {
    pub const ALL: [LooseObjectLayout; 6] = [
        Self::TwoPoints,
        Self::Triangle,
        Self::Quadrilateral,
        Self::LineAndPoint,
        Self::LineAndTwoPoints,
        Self::CircleAndPoint,
    ];

    pub fn object_types(self) -> &'static [ConfigurationObjectType] {
        match self {
            Self::TwoPoints => &[Point, Point],
            Self::Triangle => &[Point, Point, Point],
            Self::Quadrilateral => &[Point, Point, Point, Point],
            Self::LineAndPoint => &[Line, Point],
            Self::LineAndTwoPoints => &[Line, Point, Point],
            Self::CircleAndPoint => &[Circle, Point],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TwoPoints => "TwoPoints",
            Self::Triangle => "Triangle",
            Self::Quadrilateral => "Quadrilateral",
            Self::LineAndPoint => "LineAndPoint",
            Self::LineAndTwoPoints => "LineAndTwoPoints",
            Self::CircleAndPoint => "CircleAndPoint",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }
}

impl fmt::Display for LooseObjectLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
