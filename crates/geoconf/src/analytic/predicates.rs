//! Tolerance-based geometric predicates over analytic objects.

use nalgebra::Vector2;

use super::types::{points_equal, AnalyticObject, Circle, Line};
use super::RoundingCfg;

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// All points lie on one line. Fewer than three points are trivially collinear.
pub fn are_collinear(points: &[Vector2<f64>], tol: RoundingCfg) -> bool {
    let Some(&a) = points.first() else {
        return true;
    };
    // Anchor on the farthest point from `a` so near-coincident pairs do not dominate.
    let Some(&b) = points.iter().max_by(|p, q| {
        (**p - a)
            .norm_squared()
            .partial_cmp(&(**q - a).norm_squared())
            .unwrap_or(std::cmp::Ordering::Equal)
    }) else {
        return true;
    };
    if points_equal(a, b, tol) {
        return true;
    }
    let ab = b - a;
    points.iter().all(|&p| {
        let ap = p - a;
        tol.is_zero(cross(ab, ap), ab.norm() * ap.norm())
    })
}

/// All points lie on one circle. Requires at least four points, three of which
/// are not collinear.
pub fn are_concyclic(points: &[Vector2<f64>], tol: RoundingCfg) -> bool {
    if points.len() < 4 {
        return false;
    }
    let Some(circle) = Circle::through(points[0], points[1], points[2], tol) else {
        return false;
    };
    points[3..].iter().all(|&p| circle.contains(p, tol))
}

pub fn are_parallel(a: &Line, b: &Line, tol: RoundingCfg) -> bool {
    tol.is_zero(cross(a.n, b.n), 1.0)
}

pub fn are_perpendicular(a: &Line, b: &Line, tol: RoundingCfg) -> bool {
    tol.is_zero(a.n.dot(&b.n), 1.0)
}

/// Three or more lines pass through one point. Parallel first pairs are never concurrent.
pub fn are_concurrent(lines: &[Line], tol: RoundingCfg) -> bool {
    if lines.len() < 3 {
        return false;
    }
    let Some(x) = lines[0].intersection(&lines[1], tol) else {
        return false;
    };
    lines[2..].iter().all(|l| l.contains(x, tol))
}

/// Distances `|center - p|` agree for every `p`.
pub fn equal_distances(center: Vector2<f64>, points: &[Vector2<f64>], tol: RoundingCfg) -> bool {
    let mut distances = points.iter().map(|&p| (p - center).norm());
    let Some(first) = distances.next() else {
        return true;
    };
    distances.all(|d| tol.eq(d, first))
}

/// Point lies on a line or circle. Any other pairing is `None`.
pub fn lies_on(point: Vector2<f64>, on: &AnalyticObject, tol: RoundingCfg) -> Option<bool> {
    match on {
        AnalyticObject::Line(l) => Some(l.contains(point, tol)),
        AnalyticObject::Circle(c) => Some(c.contains(point, tol)),
        AnalyticObject::Point(_) => None,
    }
}

/// Tangency of line/circle or circle/circle pairs. Other pairings are `None`.
///
/// Equal circles are not tangent.
pub fn are_tangent(a: &AnalyticObject, b: &AnalyticObject, tol: RoundingCfg) -> Option<bool> {
    match (a, b) {
        (AnalyticObject::Line(l), AnalyticObject::Circle(c))
        | (AnalyticObject::Circle(c), AnalyticObject::Line(l)) => {
            Some(tol.eq(l.signed_distance(c.center).abs(), c.radius))
        }
        (AnalyticObject::Circle(c1), AnalyticObject::Circle(c2)) => {
            if c1.approx_eq(c2, tol) {
                return Some(false);
            }
            let d = (c1.center - c2.center).norm();
            Some(tol.eq(d, c1.radius + c2.radius) || tol.eq(d, (c1.radius - c2.radius).abs()))
        }
        _ => None,
    }
}
