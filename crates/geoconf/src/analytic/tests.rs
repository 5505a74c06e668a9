use super::*;
use nalgebra::{vector, Vector2};

fn tol() -> RoundingCfg {
    RoundingCfg::default()
}

#[test]
fn rounding_relative_and_scaled_zero() {
    let r = RoundingCfg::new(20);
    assert!(r.eq(1.0, 1.0 + 1e-7));
    assert!(!r.eq(1.0, 1.0 + 1e-5));
    // Relative for large magnitudes.
    assert!(r.eq(1e6, 1e6 + 0.1));
    assert!(r.is_zero(1e-3, 1e4));
    assert!(!r.is_zero(1e-3, 1.0));
    // Out-of-range bit counts are clamped.
    assert_eq!(RoundingCfg::new(0).significant_bits, 1);
    assert_eq!(RoundingCfg::new(80).significant_bits, 52);
}

#[test]
fn line_through_points_is_normalized() {
    let l = Line::through(vector![0.0, 0.0], vector![0.0, 3.0], tol()).unwrap();
    assert!((l.n.norm() - 1.0).abs() < 1e-12);
    assert!(l.n.x > 0.0 || (l.n.x == 0.0 && l.n.y > 0.0));
    assert!(l.contains(vector![0.0, -7.5], tol()));
    assert!(!l.contains(vector![0.1, 0.0], tol()));
    assert!(Line::through(vector![1.0, 1.0], vector![1.0, 1.0], tol()).is_none());
}

#[test]
fn line_equality_ignores_orientation() {
    let a = Line::through(vector![0.0, 0.0], vector![1.0, 1.0], tol()).unwrap();
    let b = Line::through(vector![2.0, 2.0], vector![-3.0, -3.0], tol()).unwrap();
    assert!(a.approx_eq(&b, tol()));
    let flipped = Line { n: -a.n, c: -a.c };
    assert!(a.approx_eq(&flipped, tol()));
}

#[test]
fn parallel_lines_have_no_intersection() {
    let a = Line::through(vector![0.0, 0.0], vector![1.0, 0.0], tol()).unwrap();
    let b = Line::with_normal(a.n, vector![0.0, 1.0]).unwrap();
    assert!(a.intersection(&b, tol()).is_none());
    let c = Line::through(vector![0.5, -1.0], vector![0.5, 1.0], tol()).unwrap();
    let x = a.intersection(&c, tol()).unwrap();
    assert!((x - vector![0.5, 0.0]).norm() < 1e-12);
}

#[test]
fn circumcircle_of_right_triangle() {
    let c = Circle::through(vector![0.0, 0.0], vector![2.0, 0.0], vector![0.0, 2.0], tol()).unwrap();
    assert!((c.center - vector![1.0, 1.0]).norm() < 1e-12);
    assert!((c.radius - 2f64.sqrt()).abs() < 1e-12);
    assert!(Circle::through(vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0], tol()).is_none());
}

#[test]
fn collinear_and_concyclic() {
    let pts: Vec<Vector2<f64>> = vec![vector![0.0, 0.0], vector![1.0, 2.0], vector![-2.0, -4.0]];
    assert!(are_collinear(&pts, tol()));
    assert!(!are_collinear(&[vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]], tol()));
    let on_unit: Vec<Vector2<f64>> = [0.3f64, 1.1, 2.5, 4.0]
        .iter()
        .map(|t| vector![t.cos(), t.sin()])
        .collect();
    assert!(are_concyclic(&on_unit, tol()));
    let mut off = on_unit.clone();
    off[3] *= 1.01;
    assert!(!are_concyclic(&off, tol()));
}

#[test]
fn line_relations() {
    let x_axis = Line::through(vector![0.0, 0.0], vector![1.0, 0.0], tol()).unwrap();
    let y_axis = Line::through(vector![0.0, 0.0], vector![0.0, 1.0], tol()).unwrap();
    let diag = Line::through(vector![-1.0, -1.0], vector![1.0, 1.0], tol()).unwrap();
    assert!(are_perpendicular(&x_axis, &y_axis, tol()));
    assert!(!are_parallel(&x_axis, &y_axis, tol()));
    assert!(are_concurrent(&[x_axis, y_axis, diag], tol()));
    let shifted = Line::with_normal(diag.n, vector![0.0, 1.0]).unwrap();
    assert!(!are_concurrent(&[x_axis, y_axis, shifted], tol()));
}

#[test]
fn tangency_and_incidence() {
    let c = AnalyticObject::Circle(Circle::new(vector![0.0, 0.0], 1.0).unwrap());
    let tangent = AnalyticObject::Line(Line::with_normal(vector![0.0, 1.0], vector![5.0, 1.0]).unwrap());
    assert_eq!(are_tangent(&tangent, &c, tol()), Some(true));
    let outer = AnalyticObject::Circle(Circle::new(vector![3.0, 0.0], 2.0).unwrap());
    assert_eq!(are_tangent(&c, &outer, tol()), Some(true));
    assert_eq!(are_tangent(&c, &c, tol()), Some(false));
    assert_eq!(are_tangent(&AnalyticObject::Point(vector![0.0, 0.0]), &c, tol()), None);
    assert_eq!(lies_on(vector![0.0, 1.0], &c, tol()), Some(true));
    assert_eq!(lies_on(vector![0.0, 1.0], &tangent, tol()), Some(true));
    assert!(equal_distances(vector![0.0, 0.0], &[vector![1.0, 0.0], vector![0.0, -1.0]], tol()));
}
