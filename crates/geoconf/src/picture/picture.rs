use std::collections::{BTreeSet, HashMap};

use nalgebra::Vector2;

use super::PictureSeed;
use crate::analytic::{self, AnalyticObject, Line, RoundingCfg};
use crate::config::{ObjectId, Predicate};

/// Why a predicate cannot be evaluated in a picture.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredicateError {
    #[error("object {0} is not realized in this picture")]
    MissingObject(ObjectId),

    #[error("{predicate}: object {object} is not a {expected}")]
    WrongKind {
        predicate: &'static str,
        object: ObjectId,
        expected: &'static str,
    },

    #[error("{predicate} needs at least {min} objects, got {got}")]
    TooFewObjects {
        predicate: &'static str,
        min: usize,
        got: usize,
    },
}

/// One numeric realization of a configuration.
///
/// Objects are stored in insertion order; the incidence index records, for each
/// point, the lines and circles passing through it.
#[derive(Clone, Debug)]
pub struct Picture {
    seed: PictureSeed,
    objects: Vec<(ObjectId, AnalyticObject)>,
    index: HashMap<ObjectId, usize>,
    incidences: HashMap<ObjectId, BTreeSet<ObjectId>>,
    tol: RoundingCfg,
}

impl Picture {
    pub fn new(seed: PictureSeed, tol: RoundingCfg) -> Self {
        Self {
            seed,
            objects: Vec::new(),
            index: HashMap::new(),
            incidences: HashMap::new(),
            tol,
        }
    }

    pub fn seed(&self) -> PictureSeed {
        self.seed
    }

    pub fn tolerance(&self) -> RoundingCfg {
        self.tol
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&AnalyticObject> {
        self.index.get(&id).map(|&i| &self.objects[i].1)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ObjectId, AnalyticObject)> {
        self.objects.iter()
    }

    /// Add an object and update the incidence index. Re-inserting an id replaces its value.
    pub fn insert(&mut self, id: ObjectId, value: AnalyticObject) {
        if let Some(&i) = self.index.get(&id) {
            self.objects[i].1 = value;
            self.reindex();
            return;
        }
        self.index.insert(id, self.objects.len());
        self.objects.push((id, value));
        self.index_incidences(id, value);
    }

    fn reindex(&mut self) {
        self.incidences.clear();
        let objects = self.objects.clone();
        for (id, value) in objects {
            self.index_incidences(id, value);
        }
    }

    fn index_incidences(&mut self, id: ObjectId, value: AnalyticObject) {
        let tol = self.tol;
        match value {
            AnalyticObject::Point(p) => {
                let through: BTreeSet<ObjectId> = self
                    .objects
                    .iter()
                    .filter(|(other, curve)| {
                        *other != id && analytic::lies_on(p, curve, tol).unwrap_or(false)
                    })
                    .map(|(other, _)| *other)
                    .collect();
                self.incidences.entry(id).or_default().extend(through);
            }
            curve => {
                let points: Vec<ObjectId> = self
                    .objects
                    .iter()
                    .filter_map(|(other, o)| {
                        let p = o.as_point()?;
                        analytic::lies_on(p, &curve, tol)
                            .unwrap_or(false)
                            .then_some(*other)
                    })
                    .collect();
                for p in points {
                    self.incidences.entry(p).or_default().insert(id);
                }
            }
        }
    }

    /// Lines and circles passing through `point`.
    pub fn objects_through(&self, point: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        self.incidences.get(&point).into_iter().flatten().copied()
    }

    /// First stored object numerically equal to `value`.
    pub fn find_equal(&self, value: &AnalyticObject) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, o)| o.approx_eq(value, self.tol))
            .map(|(id, _)| *id)
    }

    fn point(&self, predicate: &'static str, id: ObjectId) -> Result<Vector2<f64>, PredicateError> {
        self.kind(predicate, id, "point", AnalyticObject::as_point)
    }

    fn line(&self, predicate: &'static str, id: ObjectId) -> Result<Line, PredicateError> {
        self.kind(predicate, id, "line", AnalyticObject::as_line)
    }

    fn kind<T>(
        &self,
        predicate: &'static str,
        id: ObjectId,
        expected: &'static str,
        f: fn(&AnalyticObject) -> Option<T>,
    ) -> Result<T, PredicateError> {
        let value = self.get(id).ok_or(PredicateError::MissingObject(id))?;
        f(value).ok_or(PredicateError::WrongKind {
            predicate,
            object: id,
            expected,
        })
    }

    fn points(&self, predicate: &'static str, ids: &[ObjectId], min: usize) -> Result<Vec<Vector2<f64>>, PredicateError> {
        if ids.len() < min {
            return Err(PredicateError::TooFewObjects {
                predicate,
                min,
                got: ids.len(),
            });
        }
        ids.iter().map(|&id| self.point(predicate, id)).collect()
    }

    /// Evaluate `predicate` on this picture's objects.
    pub fn evaluate(&self, predicate: &Predicate) -> Result<bool, PredicateError> {
        let (name, tol) = (predicate.name(), self.tol);
        match predicate {
            Predicate::Collinear(ids) => Ok(analytic::are_collinear(&self.points(name, ids, 3)?, tol)),
            Predicate::Concyclic(ids) => Ok(analytic::are_concyclic(&self.points(name, ids, 4)?, tol)),
            Predicate::ParallelLines(a, b) => {
                Ok(analytic::are_parallel(&self.line(name, *a)?, &self.line(name, *b)?, tol))
            }
            Predicate::PerpendicularLines(a, b) => Ok(analytic::are_perpendicular(
                &self.line(name, *a)?,
                &self.line(name, *b)?,
                tol,
            )),
            Predicate::ConcurrentLines(ids) => {
                if ids.len() < 3 {
                    return Err(PredicateError::TooFewObjects {
                        predicate: name,
                        min: 3,
                        got: ids.len(),
                    });
                }
                let lines = ids
                    .iter()
                    .map(|&id| self.line(name, id))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(analytic::are_concurrent(&lines, tol))
            }
            Predicate::EqualLineSegments(ids) => {
                let p = self.points(name, ids, 4)?;
                Ok(tol.eq((p[0] - p[1]).norm(), (p[2] - p[3]).norm()))
            }
            Predicate::Equidistant { center, points } => {
                let c = self.point(name, *center)?;
                Ok(analytic::equal_distances(c, &self.points(name, points, 2)?, tol))
            }
            Predicate::Incidence { point, on } => {
                self.point(name, *point)?;
                let curve = self.get(*on).ok_or(PredicateError::MissingObject(*on))?;
                if curve.as_point().is_some() {
                    return Err(PredicateError::WrongKind {
                        predicate: name,
                        object: *on,
                        expected: "line or circle",
                    });
                }
                Ok(self.objects_through(*point).any(|id| id == *on))
            }
            Predicate::Tangent(a, b) => {
                let x = self.get(*a).ok_or(PredicateError::MissingObject(*a))?;
                let y = self.get(*b).ok_or(PredicateError::MissingObject(*b))?;
                analytic::are_tangent(x, y, tol).ok_or(PredicateError::WrongKind {
                    predicate: name,
                    object: *a,
                    expected: "line or circle paired with a circle",
                })
            }
        }
    }
}
