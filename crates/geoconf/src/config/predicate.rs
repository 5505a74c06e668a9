//! Abstract geometric predicates over configuration objects.

use std::fmt;

use super::ObjectId;

/// A statement about objects of a configuration, evaluated per picture.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Points on one line.
    Collinear(Vec<ObjectId>),
    /// Four or more points on one circle.
    Concyclic(Vec<ObjectId>),
    ParallelLines(ObjectId, ObjectId),
    PerpendicularLines(ObjectId, ObjectId),
    ConcurrentLines(Vec<ObjectId>),
    /// `|AB| = |CD|`.
    EqualLineSegments([ObjectId; 4]),
    /// Every point is at the same distance from `center`.
    Equidistant {
        center: ObjectId,
        points: Vec<ObjectId>,
    },
    /// Point lies on a line or circle.
    Incidence { point: ObjectId, on: ObjectId },
    /// Line/circle or circle/circle tangency.
    Tangent(ObjectId, ObjectId),
}

impl Predicate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Collinear(_) => "Collinear",
            Self::Concyclic(_) => "Concyclic",
            Self::ParallelLines(..) => "ParallelLines",
            Self::PerpendicularLines(..) => "PerpendicularLines",
            Self::ConcurrentLines(_) => "ConcurrentLines",
            Self::EqualLineSegments(_) => "EqualLineSegments",
            Self::Equidistant { .. } => "Equidistant",
            Self::Incidence { .. } => "Incidence",
            Self::Tangent(..) => "Tangent",
        }
    }

    /// Every object the predicate mentions.
    pub fn objects(&self) -> Vec<ObjectId> {
        match self {
            Self::Collinear(ids) | Self::Concyclic(ids) | Self::ConcurrentLines(ids) => ids.clone(),
            Self::ParallelLines(a, b) | Self::PerpendicularLines(a, b) | Self::Tangent(a, b) => {
                vec![*a, *b]
            }
            Self::EqualLineSegments(ids) => ids.to_vec(),
            Self::Equidistant { center, points } => {
                std::iter::once(*center).chain(points.iter().copied()).collect()
            }
            Self::Incidence { point, on } => vec![*point, *on],
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.objects().iter().map(|id| id.to_string()).collect();
        write!(f, "{}({})", self.name(), ids.join(", "))
    }
}
