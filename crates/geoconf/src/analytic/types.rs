//! Analytic object types.
//!
//! Invariants
//! - `Line::n` has unit length and lies in the half-plane `n.x > 0 || (n.x == 0 && n.y > 0)`.
//! - `Circle::radius` is strictly positive.

use nalgebra::Vector2;

use super::RoundingCfg;
use crate::config::ConfigurationObjectType;

/// Line `n · x = c` with unit normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Line {
    /// Line with normal `n` through `p`; `None` if `n` is zero or non-finite.
    pub fn with_normal(n: Vector2<f64>, p: Vector2<f64>) -> Option<Self> {
        let norm = n.norm();
        if !norm.is_finite() || norm <= 0.0 {
            return None;
        }
        let mut n = n / norm;
        if n.x < 0.0 || (n.x == 0.0 && n.y < 0.0) {
            n = -n;
        }
        Some(Self { n, c: n.dot(&p) })
    }

    /// Line with direction `d` through `p`.
    #[inline]
    pub fn with_direction(d: Vector2<f64>, p: Vector2<f64>) -> Option<Self> {
        Self::with_normal(Vector2::new(-d.y, d.x), p)
    }

    /// Line through two points; `None` if they coincide under `tol`.
    pub fn through(a: Vector2<f64>, b: Vector2<f64>, tol: RoundingCfg) -> Option<Self> {
        if points_equal(a, b, tol) {
            return None;
        }
        Self::with_direction(b - a, a)
    }

    /// Unit direction vector.
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        Vector2::new(-self.n.y, self.n.x)
    }

    /// Signed distance of `p` from the line.
    #[inline]
    pub fn signed_distance(&self, p: Vector2<f64>) -> f64 {
        self.n.dot(&p) - self.c
    }

    /// Orthogonal projection of `p` onto the line.
    #[inline]
    pub fn project(&self, p: Vector2<f64>) -> Vector2<f64> {
        p - self.n * self.signed_distance(p)
    }

    pub fn contains(&self, p: Vector2<f64>, tol: RoundingCfg) -> bool {
        let scale = 1.0f64.max(p.norm()).max(self.c.abs());
        tol.is_zero(self.signed_distance(p), scale)
    }

    /// Intersection point; `None` for parallel (or equal) lines.
    pub fn intersection(&self, other: &Line, tol: RoundingCfg) -> Option<Vector2<f64>> {
        let det = self.n.x * other.n.y - self.n.y * other.n.x;
        if tol.is_zero(det, 1.0) {
            return None;
        }
        let x = (self.c * other.n.y - self.n.y * other.c) / det;
        let y = (self.n.x * other.c - self.c * other.n.x) / det;
        Some(Vector2::new(x, y))
    }

    /// Equality up to the orientation of the normal.
    pub fn approx_eq(&self, other: &Line, tol: RoundingCfg) -> bool {
        let same = tol.eq(self.n.x, other.n.x) && tol.eq(self.n.y, other.n.y) && tol.eq(self.c, other.c);
        let flipped =
            tol.eq(self.n.x, -other.n.x) && tol.eq(self.n.y, -other.n.y) && tol.eq(self.c, -other.c);
        same || flipped
    }
}

/// Circle with center and positive radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vector2<f64>,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vector2<f64>, radius: f64) -> Option<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return None;
        }
        Some(Self { center, radius })
    }

    /// Circumcircle of three points; `None` if they are collinear under `tol`.
    pub fn through(
        a: Vector2<f64>,
        b: Vector2<f64>,
        c: Vector2<f64>,
        tol: RoundingCfg,
    ) -> Option<Self> {
        let ab = b - a;
        let ac = c - a;
        let d = 2.0 * (ab.x * ac.y - ab.y * ac.x);
        if tol.is_zero(d, 2.0 * ab.norm() * ac.norm()) {
            return None;
        }
        let ab2 = ab.norm_squared();
        let ac2 = ac.norm_squared();
        let ux = (ac.y * ab2 - ab.y * ac2) / d;
        let uy = (ab.x * ac2 - ac.x * ab2) / d;
        let offset = Vector2::new(ux, uy);
        Self::new(a + offset, offset.norm())
    }

    pub fn contains(&self, p: Vector2<f64>, tol: RoundingCfg) -> bool {
        tol.eq((p - self.center).norm(), self.radius)
    }

    pub fn approx_eq(&self, other: &Circle, tol: RoundingCfg) -> bool {
        points_equal(self.center, other.center, tol) && tol.eq(self.radius, other.radius)
    }
}

/// Floating-point realization of one configuration object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnalyticObject {
    Point(Vector2<f64>),
    Line(Line),
    Circle(Circle),
}

impl AnalyticObject {
    pub fn object_type(&self) -> ConfigurationObjectType {
        match self {
            Self::Point(_) => ConfigurationObjectType::Point,
            Self::Line(_) => ConfigurationObjectType::Line,
            Self::Circle(_) => ConfigurationObjectType::Circle,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Self::Point(p) => p.x.is_finite() && p.y.is_finite(),
            Self::Line(l) => l.n.x.is_finite() && l.n.y.is_finite() && l.c.is_finite(),
            Self::Circle(c) => {
                c.center.x.is_finite() && c.center.y.is_finite() && c.radius.is_finite()
            }
        }
    }

    /// Same kind and equal under `tol`.
    pub fn approx_eq(&self, other: &AnalyticObject, tol: RoundingCfg) -> bool {
        match (self, other) {
            (Self::Point(a), Self::Point(b)) => points_equal(*a, *b, tol),
            (Self::Line(a), Self::Line(b)) => a.approx_eq(b, tol),
            (Self::Circle(a), Self::Circle(b)) => a.approx_eq(b, tol),
            _ => false,
        }
    }

    pub fn as_point(&self) -> Option<Vector2<f64>> {
        match self {
            Self::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<Line> {
        match self {
            Self::Line(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<Circle> {
        match self {
            Self::Circle(c) => Some(*c),
            _ => None,
        }
    }
}

#[inline]
pub(crate) fn points_equal(a: Vector2<f64>, b: Vector2<f64>, tol: RoundingCfg) -> bool {
    tol.eq(a.x, b.x) && tol.eq(a.y, b.y)
}
