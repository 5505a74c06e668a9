//! Closed-form constructors for `PredefinedConstructionType`.
//!
//! Inputs arrive flattened in signature order. `Ok(None)` means inconstructible.

use nalgebra::Vector2;

use super::ConstructionFailure;
use crate::analytic::{AnalyticObject, Circle, Line, RoundingCfg};
use crate::config::{ConfigurationObjectType, PredefinedConstructionType};

pub type AtomicConstructor =
    fn(&[AnalyticObject], RoundingCfg) -> Result<Option<AnalyticObject>, ConstructionFailure>;

type Built = Result<Option<AnalyticObject>, ConstructionFailure>;

pub fn atomic_constructor(kind: PredefinedConstructionType) -> AtomicConstructor {
    use PredefinedConstructionType as K;
    match kind {
        K::LineFromPoints => line_from_points,
        K::Midpoint => midpoint,
        K::IntersectionOfLines => intersection_of_lines,
        K::PerpendicularLine => perpendicular_line,
        K::ParallelLine => parallel_line,
        K::PerpendicularProjection => perpendicular_projection,
        K::PerpendicularBisector => perpendicular_bisector,
        K::InternalAngleBisector => internal_angle_bisector,
        K::Circumcircle => circumcircle,
        K::CircleWithCenterThroughPoint => circle_with_center_through_point,
        K::PointReflection => point_reflection,
        K::ReflectionInLine => reflection_in_line,
        K::CenterOfCircle => center_of_circle,
    }
}

fn input_type(name: &str, index: usize, expected: ConfigurationObjectType) -> ConstructionFailure {
    ConstructionFailure::InputType {
        construction: name.to_string(),
        index,
        expected,
    }
}

fn point(inputs: &[AnalyticObject], i: usize, name: &str) -> Result<Vector2<f64>, ConstructionFailure> {
    inputs
        .get(i)
        .and_then(|o| o.as_point())
        .ok_or_else(|| input_type(name, i, ConfigurationObjectType::Point))
}

fn line(inputs: &[AnalyticObject], i: usize, name: &str) -> Result<Line, ConstructionFailure> {
    inputs
        .get(i)
        .and_then(|o| o.as_line())
        .ok_or_else(|| input_type(name, i, ConfigurationObjectType::Line))
}

fn circle(inputs: &[AnalyticObject], i: usize, name: &str) -> Result<Circle, ConstructionFailure> {
    inputs
        .get(i)
        .and_then(|o| o.as_circle())
        .ok_or_else(|| input_type(name, i, ConfigurationObjectType::Circle))
}

fn line_from_points(inputs: &[AnalyticObject], tol: RoundingCfg) -> Built {
    let name = "LineFromPoints";
    let (a, b) = (point(inputs, 0, name)?, point(inputs, 1, name)?);
    Ok(Line::through(a, b, tol).map(AnalyticObject::Line))
}

fn midpoint(inputs: &[AnalyticObject], _tol: RoundingCfg) -> Built {
    let name = "Midpoint";
    let (a, b) = (point(inputs, 0, name)?, point(inputs, 1, name)?);
    Ok(Some(AnalyticObject::Point((a + b) * 0.5)))
}

fn intersection_of_lines(inputs: &[AnalyticObject], tol: RoundingCfg) -> Built {
    let name = "IntersectionOfLines";
    let (a, b) = (line(inputs, 0, name)?, line(inputs, 1, name)?);
    Ok(a.intersection(&b, tol).map(AnalyticObject::Point))
}

fn perpendicular_line(inputs: &[AnalyticObject], _tol: RoundingCfg) -> Built {
    let name = "PerpendicularLine";
    let (p, l) = (point(inputs, 0, name)?, line(inputs, 1, name)?);
    Ok(Line::with_normal(l.direction(), p).map(AnalyticObject::Line))
}

fn parallel_line(inputs: &[AnalyticObject], _tol: RoundingCfg) -> Built {
    let name = "ParallelLine";
    let (p, l) = (point(inputs, 0, name)?, line(inputs, 1, name)?);
    Ok(Line::with_normal(l.n, p).map(AnalyticObject::Line))
}

fn perpendicular_projection(inputs: &[AnalyticObject], _tol: RoundingCfg) -> Built {
    let name = "PerpendicularProjection";
    let (p, l) = (point(inputs, 0, name)?, line(inputs, 1, name)?);
    Ok(Some(AnalyticObject::Point(l.project(p))))
}

fn perpendicular_bisector(inputs: &[AnalyticObject], tol: RoundingCfg) -> Built {
    let name = "PerpendicularBisector";
    let (a, b) = (point(inputs, 0, name)?, point(inputs, 1, name)?);
    if Line::through(a, b, tol).is_none() {
        return Ok(None);
    }
    Ok(Line::with_normal(b - a, (a + b) * 0.5).map(AnalyticObject::Line))
}

fn internal_angle_bisector(inputs: &[AnalyticObject], tol: RoundingCfg) -> Built {
    let name = "InternalAngleBisector";
    let v = point(inputs, 0, name)?;
    let (b, c) = (point(inputs, 1, name)?, point(inputs, 2, name)?);
    let (vb, vc) = (b - v, c - v);
    let scale = 1.0f64.max(v.norm());
    if tol.is_zero(vb.norm(), scale) || tol.is_zero(vc.norm(), scale) {
        return Ok(None);
    }
    let dir = vb / vb.norm() + vc / vc.norm();
    // Straight angle: the internal bisector is undefined by this formula.
    if tol.is_zero(dir.norm(), 1.0) {
        return Ok(None);
    }
    Ok(Line::with_direction(dir, v).map(AnalyticObject::Line))
}

fn circumcircle(inputs: &[AnalyticObject], tol: RoundingCfg) -> Built {
    let name = "Circumcircle";
    let a = point(inputs, 0, name)?;
    let b = point(inputs, 1, name)?;
    let c = point(inputs, 2, name)?;
    Ok(Circle::through(a, b, c, tol).map(AnalyticObject::Circle))
}

fn circle_with_center_through_point(inputs: &[AnalyticObject], tol: RoundingCfg) -> Built {
    let name = "CircleWithCenterThroughPoint";
    let (center, p) = (point(inputs, 0, name)?, point(inputs, 1, name)?);
    let r = (p - center).norm();
    if tol.is_zero(r, 1.0f64.max(center.norm())) {
        return Ok(None);
    }
    Ok(Circle::new(center, r).map(AnalyticObject::Circle))
}

fn point_reflection(inputs: &[AnalyticObject], _tol: RoundingCfg) -> Built {
    let name = "PointReflection";
    let (p, center) = (point(inputs, 0, name)?, point(inputs, 1, name)?);
    Ok(Some(AnalyticObject::Point(center * 2.0 - p)))
}

fn reflection_in_line(inputs: &[AnalyticObject], _tol: RoundingCfg) -> Built {
    let name = "ReflectionInLine";
    let (p, l) = (point(inputs, 0, name)?, line(inputs, 1, name)?);
    Ok(Some(AnalyticObject::Point(l.project(p) * 2.0 - p)))
}

fn center_of_circle(inputs: &[AnalyticObject], _tol: RoundingCfg) -> Built {
    let c = circle(inputs, 0, "CenterOfCircle")?;
    Ok(Some(AnalyticObject::Point(c.center)))
}
