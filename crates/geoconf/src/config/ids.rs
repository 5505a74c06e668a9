use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique object identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// Allocate a fresh id. Ids are never handed out twice within a process.
    pub fn fresh() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a configuration object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigurationObjectType {
    Point,
    Line,
    Circle,
}

impl ConfigurationObjectType {
    /// All types, in canonical group order.
    pub const ALL: [ConfigurationObjectType; 3] = [Self::Point, Self::Line, Self::Circle];

    /// Single-letter tag used in canonical strings.
    pub fn letter(self) -> char {
        match self {
            Self::Point => 'P',
            Self::Line => 'L',
            Self::Circle => 'C',
        }
    }
}

impl fmt::Display for ConfigurationObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Circle => "circle",
        };
        f.write_str(name)
    }
}
