//! Constructions and their signatures.

use std::fmt;
use std::sync::Arc;

use super::{Configuration, ConfigurationError, ConfigurationObjectType, ObjectRef};

/// One parameter of a construction signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstructionParameter {
    Object(ConfigurationObjectType),
    /// Unordered set of `count` distinct arguments, each matching `inner`.
    Set {
        inner: Box<ConstructionParameter>,
        count: usize,
    },
}

impl ConstructionParameter {
    pub fn set(inner: ConstructionParameter, count: usize) -> Self {
        Self::Set {
            inner: Box::new(inner),
            count,
        }
    }

    fn push_flattened(&self, out: &mut Vec<ConfigurationObjectType>) {
        match self {
            Self::Object(t) => out.push(*t),
            Self::Set { inner, count } => {
                for _ in 0..*count {
                    inner.push_flattened(out);
                }
            }
        }
    }
}

/// Ordered list of parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature(pub Vec<ConstructionParameter>);

impl Signature {
    /// Object types of the flattened (depth-first) argument list.
    pub fn flattened_types(&self) -> Vec<ConfigurationObjectType> {
        let mut out = Vec::new();
        for p in &self.0 {
            p.push_flattened(&mut out);
        }
        out
    }

    pub fn arity(&self) -> usize {
        self.flattened_types().len()
    }
}

/// Closed-form constructions known to the constructor library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PredefinedConstructionType {
    /// `{P, P}` → line.
    LineFromPoints,
    /// `{P, P}` → point.
    Midpoint,
    /// `{L, L}` → point.
    IntersectionOfLines,
    /// `(P, L)` → line through P perpendicular to L.
    PerpendicularLine,
    /// `(P, L)` → line through P parallel to L.
    ParallelLine,
    /// `(P, L)` → foot of the perpendicular from P.
    PerpendicularProjection,
    /// `{P, P}` → line.
    PerpendicularBisector,
    /// `(P vertex, {P, P})` → line.
    InternalAngleBisector,
    /// `{P, P, P}` → circle.
    Circumcircle,
    /// `(P center, P)` → circle.
    CircleWithCenterThroughPoint,
    /// `(P, P center)` → point.
    PointReflection,
    /// `(P, L)` → point.
    ReflectionInLine,
    /// `(C)` → point.
    CenterOfCircle,
}

impl PredefinedConstructionType {
    pub const ALL: [PredefinedConstructionType; 13] = [
        Self::LineFromPoints,
        Self::Midpoint,
        Self::IntersectionOfLines,
        Self::PerpendicularLine,
        Self::ParallelLine,
        Self::PerpendicularProjection,
        Self::PerpendicularBisector,
        Self::InternalAngleBisector,
        Self::Circumcircle,
        Self::CircleWithCenterThroughPoint,
        Self::PointReflection,
        Self::ReflectionInLine,
        Self::CenterOfCircle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::LineFromPoints => "LineFromPoints",
            Self::Midpoint => "Midpoint",
            Self::IntersectionOfLines => "IntersectionOfLines",
            Self::PerpendicularLine => "PerpendicularLine",
            Self::ParallelLine => "ParallelLine",
            Self::PerpendicularProjection => "PerpendicularProjection",
            Self::PerpendicularBisector => "PerpendicularBisector",
            Self::InternalAngleBisector => "InternalAngleBisector",
            Self::Circumcircle => "Circumcircle",
            Self::CircleWithCenterThroughPoint => "CircleWithCenterThroughPoint",
            Self::PointReflection => "PointReflection",
            Self::ReflectionInLine => "ReflectionInLine",
            Self::CenterOfCircle => "CenterOfCircle",
        }
    }

    pub fn signature(self) -> Signature {
        use ConfigurationObjectType::{Circle, Line, Point};
        use ConstructionParameter as P;
        let params = match self {
            Self::LineFromPoints
            | Self::Midpoint
            | Self::PerpendicularBisector => vec![P::set(P::Object(Point), 2)],
            Self::IntersectionOfLines => vec![P::set(P::Object(Line), 2)],
            Self::PerpendicularLine
            | Self::ParallelLine
            | Self::PerpendicularProjection
            | Self::ReflectionInLine => vec![P::Object(Point), P::Object(Line)],
            Self::InternalAngleBisector => {
                vec![P::Object(Point), P::set(P::Object(Point), 2)]
            }
            Self::Circumcircle => vec![P::set(P::Object(Point), 3)],
            Self::CircleWithCenterThroughPoint | Self::PointReflection => {
                vec![P::Object(Point), P::Object(Point)]
            }
            Self::CenterOfCircle => vec![P::Object(Circle)],
        };
        Signature(params)
    }

    pub fn output_type(self) -> ConfigurationObjectType {
        use ConfigurationObjectType::{Circle, Line, Point};
        match self {
            Self::LineFromPoints
            | Self::PerpendicularLine
            | Self::ParallelLine
            | Self::PerpendicularBisector
            | Self::InternalAngleBisector => Line,
            Self::Circumcircle | Self::CircleWithCenterThroughPoint => Circle,
            Self::Midpoint
            | Self::IntersectionOfLines
            | Self::PerpendicularProjection
            | Self::PointReflection
            | Self::ReflectionInLine
            | Self::CenterOfCircle => Point,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Construction defined by an internal configuration.
///
/// The internal loose objects are bound positionally to the flattened
/// arguments; the last internal constructed object is the output.
#[derive(Debug)]
pub struct ComposedConstruction {
    name: String,
    configuration: Configuration,
    signature: Signature,
    output_type: ConfigurationObjectType,
}

impl ComposedConstruction {
    pub fn new(
        name: impl Into<String>,
        configuration: Configuration,
        signature: Signature,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        if PredefinedConstructionType::from_name(&name).is_some() {
            return Err(ConfigurationError::InvalidComposition {
                reason: "name is taken by a predefined construction".to_string(),
                name,
            });
        }
        let loose_types: Vec<_> = configuration
            .loose_objects()
            .iter()
            .map(|o| o.object_type())
            .collect();
        if loose_types != signature.flattened_types() {
            return Err(ConfigurationError::InvalidComposition {
                name,
                reason: format!(
                    "signature flattens to {:?}, loose objects are {:?}",
                    signature.flattened_types(),
                    loose_types
                ),
            });
        }
        let output_type = match configuration.constructed_objects().last() {
            Some(output) => output.object_type(),
            None => {
                return Err(ConfigurationError::InvalidComposition {
                    name,
                    reason: "no constructed output".to_string(),
                })
            }
        };
        Ok(Self {
            name,
            configuration,
            signature,
            output_type,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The internal object realized as the construction's result.
    pub fn output(&self) -> Option<&ObjectRef> {
        self.configuration.constructed_objects().last()
    }

    pub fn output_type(&self) -> ConfigurationObjectType {
        self.output_type
    }
}

/// A named rule producing one object from arguments.
#[derive(Clone, Debug)]
pub enum Construction {
    Predefined(PredefinedConstructionType),
    Composed(Arc<ComposedConstruction>),
}

impl Construction {
    pub fn name(&self) -> &str {
        match self {
            Self::Predefined(p) => p.name(),
            Self::Composed(c) => c.name(),
        }
    }

    pub fn signature(&self) -> Signature {
        match self {
            Self::Predefined(p) => p.signature(),
            Self::Composed(c) => c.signature().clone(),
        }
    }

    pub fn output_type(&self) -> ConfigurationObjectType {
        match self {
            Self::Predefined(p) => p.output_type(),
            Self::Composed(c) => c.output_type(),
        }
    }
}

impl From<PredefinedConstructionType> for Construction {
    fn from(p: PredefinedConstructionType) -> Self {
        Self::Predefined(p)
    }
}

/// Constructions are identified by name.
impl PartialEq for Construction {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Construction {}

impl fmt::Display for Construction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
