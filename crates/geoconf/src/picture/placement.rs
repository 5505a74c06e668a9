//! Loose-object placement per layout.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::Rng;

use super::PictureSeed;
use crate::analytic::{AnalyticObject, Circle, Line};
use crate::config::LooseObjectLayout;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("no admissible {layout} placement after {draws} draws")]
    Exhausted { layout: LooseObjectLayout, draws: usize },

    #[error("placement for {layout} is malformed: {reason}")]
    Shape {
        layout: LooseObjectLayout,
        reason: String,
    },
}

/// Source of loose-object coordinates for a picture.
pub trait LoosePlacer: Send + Sync {
    /// Analytic loose objects in layout order.
    fn place(
        &self,
        layout: LooseObjectLayout,
        seed: PictureSeed,
    ) -> Result<Vec<AnalyticObject>, PlacementError>;
}

/// Rejection-sampling parameters.
#[derive(Clone, Copy, Debug)]
pub struct PlacementCfg {
    /// Coordinates are drawn from `[-extent, extent]²`.
    pub extent: f64,
    /// Smallest admissible triangle angle, in radians.
    pub min_angle: f64,
    /// Minimal relative difference between triangle side lengths.
    pub min_side_gap: f64,
    /// Minimal distance between points, and between points and curves.
    pub min_separation: f64,
    pub max_draws: usize,
}

impl Default for PlacementCfg {
    fn default() -> Self {
        Self {
            extent: 10.0,
            min_angle: 10f64.to_radians(),
            min_side_gap: 0.05,
            min_separation: 0.5,
            max_draws: 1000,
        }
    }
}

/// Random placement honoring each layout's non-degeneracy constraint.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPlacer {
    pub cfg: PlacementCfg,
}

impl RandomPlacer {
    pub fn new(cfg: PlacementCfg) -> Self {
        Self { cfg }
    }

    fn point(&self, rng: &mut StdRng) -> Vector2<f64> {
        let e = self.cfg.extent;
        Vector2::new(rng.gen_range(-e..e), rng.gen_range(-e..e))
    }

    fn line(&self, rng: &mut StdRng) -> Option<Line> {
        let theta = rng.gen_range(0.0..std::f64::consts::PI);
        Line::with_direction(Vector2::new(theta.cos(), theta.sin()), self.point(rng))
    }

    fn circle(&self, rng: &mut StdRng) -> Option<Circle> {
        let r = rng.gen_range(1.0..self.cfg.extent * 0.5);
        Circle::new(self.point(rng), r)
    }

    fn separated(&self, points: &[Vector2<f64>]) -> bool {
        points.iter().enumerate().all(|(i, a)| {
            points[i + 1..]
                .iter()
                .all(|b| (a - b).norm() >= self.cfg.min_separation)
        })
    }

    /// Every angle of triangle `abc` is at least `min_angle`.
    fn fat_triangle(&self, a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> bool {
        triangle_angles(a, b, c).iter().all(|&t| t >= self.cfg.min_angle)
    }

    fn acute_scalene(&self, p: &[Vector2<f64>]) -> bool {
        let (a, b, c) = (p[0], p[1], p[2]);
        let right = std::f64::consts::FRAC_PI_2 - self.cfg.min_angle;
        if !self.fat_triangle(a, b, c) || triangle_angles(a, b, c).iter().any(|&t| t >= right) {
            return false;
        }
        let mut sides = [(a - b).norm(), (b - c).norm(), (c - a).norm()];
        sides.sort_by(f64::total_cmp);
        sides
            .windows(2)
            .all(|w| w[1] - w[0] >= self.cfg.min_side_gap * w[1])
    }

    fn draw(&self, layout: LooseObjectLayout, rng: &mut StdRng) -> Option<Vec<AnalyticObject>> {
        use AnalyticObject as A;
        use LooseObjectLayout as L;
        let sep = self.cfg.min_separation;
        match layout {
            L::TwoPoints => {
                let p = [self.point(rng), self.point(rng)];
                self.separated(&p).then(|| p.map(A::Point).to_vec())
            }
            L::Triangle => {
                let p = [self.point(rng), self.point(rng), self.point(rng)];
                (self.separated(&p) && self.acute_scalene(&p)).then(|| p.map(A::Point).to_vec())
            }
            L::Quadrilateral => {
                let p = [
                    self.point(rng),
                    self.point(rng),
                    self.point(rng),
                    self.point(rng),
                ];
                let no_three_collinear = (0..4).all(|skip| {
                    let t: Vec<_> = (0..4).filter(|&i| i != skip).map(|i| p[i]).collect();
                    self.fat_triangle(t[0], t[1], t[2])
                });
                (self.separated(&p) && no_three_collinear).then(|| p.map(A::Point).to_vec())
            }
            L::LineAndPoint | L::LineAndTwoPoints => {
                let l = self.line(rng)?;
                let n = if layout == L::LineAndPoint { 1 } else { 2 };
                let p: Vec<_> = (0..n).map(|_| self.point(rng)).collect();
                let off_line = p.iter().all(|&q| l.signed_distance(q).abs() >= sep);
                (off_line && self.separated(&p))
                    .then(|| std::iter::once(A::Line(l)).chain(p.into_iter().map(A::Point)).collect())
            }
            L::CircleAndPoint => {
                let c = self.circle(rng)?;
                let p = self.point(rng);
                let d = (p - c.center).norm();
                ((d - c.radius).abs() >= sep && d >= sep)
                    .then(|| vec![A::Circle(c), A::Point(p)])
            }
        }
    }
}

impl LoosePlacer for RandomPlacer {
    fn place(
        &self,
        layout: LooseObjectLayout,
        seed: PictureSeed,
    ) -> Result<Vec<AnalyticObject>, PlacementError> {
        let mut rng = seed.to_std_rng();
        (0..self.cfg.max_draws)
            .find_map(|_| self.draw(layout, &mut rng))
            .ok_or(PlacementError::Exhausted {
                layout,
                draws: self.cfg.max_draws,
            })
    }
}

fn triangle_angles(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> [f64; 3] {
    let angle = |v: Vector2<f64>, p: Vector2<f64>, q: Vector2<f64>| {
        let (u, w) = (p - v, q - v);
        let denom = u.norm() * w.norm();
        if denom <= 0.0 {
            0.0
        } else {
            (u.dot(&w) / denom).clamp(-1.0, 1.0).acos()
        }
    };
    [angle(a, b, c), angle(b, c, a), angle(c, a, b)]
}

/// Exact coordinates, identical in every picture and attempt.
#[derive(Clone, Debug)]
pub struct FixedPlacer {
    objects: Vec<AnalyticObject>,
}

impl FixedPlacer {
    pub fn new(objects: Vec<AnalyticObject>) -> Self {
        Self { objects }
    }

    pub fn points(points: &[(f64, f64)]) -> Self {
        Self::new(
            points
                .iter()
                .map(|&(x, y)| AnalyticObject::Point(Vector2::new(x, y)))
                .collect(),
        )
    }
}

impl LoosePlacer for FixedPlacer {
    fn place(
        &self,
        layout: LooseObjectLayout,
        _seed: PictureSeed,
    ) -> Result<Vec<AnalyticObject>, PlacementError> {
        let got: Vec<_> = self.objects.iter().map(|o| o.object_type()).collect();
        if got != layout.object_types() {
            return Err(PlacementError::Shape {
                layout,
                reason: format!("expected {:?}, got {:?}", layout.object_types(), got),
            });
        }
        Ok(self.objects.clone())
    }
}
