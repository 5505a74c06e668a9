use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use geoconf::analytic::AnalyticObject;
use geoconf::consistency::{FailureTracer, UnresolvableReason};
use geoconf::construct::composed;
use geoconf::picture::{FixedPlacer, LoosePlacer, PictureSeed, PlacementError, RandomPlacer};
use geoconf::prelude::*;

fn construct(kind: impl Into<geoconf::config::Construction>, args: &[&ObjectRef]) -> ObjectRef {
    let args: Vec<ObjectRef> = args.iter().map(|o| (*o).clone()).collect();
    ConfigurationObject::construct(kind, &args).unwrap()
}

fn accepted(r: Registration) -> geoconf::registry::AcceptedConfiguration {
    match r {
        Registration::Accepted(a) => a,
        other => panic!("expected acceptance, got {other:?}"),
    }
}

#[derive(Default)]
struct CountingTracer {
    reconstructions: AtomicUsize,
    inconsistencies: AtomicUsize,
}

impl FailureTracer for CountingTracer {
    fn inconsistency(&self, _: geoconf::consistency::Subject<'_>, _: &[usize]) {
        self.inconsistencies.fetch_add(1, Ordering::Relaxed);
    }
    fn reconstructing(&self, _: usize, _: usize) {
        self.reconstructions.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn circumcenter_is_equidistant_without_reconstruction() {
    let core = GeometryCore::new(CoreCfg::default());
    let base = Configuration::from_layout(LooseObjectLayout::Triangle);
    let l = base.loose_objects().to_vec();
    let center = construct(
        geoconf::config::Construction::Composed(composed::circumcenter().unwrap()),
        &[&l[0], &l[1], &l[2]],
    );
    let c = base.extend(vec![center.clone()]).unwrap();
    let mut accepted = accepted(core.try_register(&c));
    assert_eq!(accepted.pictures.len(), CoreCfg::default().pictures);
    for pic in accepted.pictures.pictures() {
        assert!(matches!(pic.get(center.id()), Some(AnalyticObject::Point(_))));
    }
    let p = Predicate::Equidistant {
        center: center.id(),
        points: l.iter().map(|o| o.id()).collect(),
    };
    assert_eq!(core.evaluate_predicate(&mut accepted.pictures, &p), PredicateVerdict::True);
    assert_eq!(accepted.stats.reconstructions, 0);
    for i in 0..accepted.pictures.len() {
        assert_eq!(accepted.pictures.health(i).unwrap().reconstructions, 0);
    }
}

#[test]
fn intersecting_parallel_lines_is_inconstructible() {
    let tracer = Arc::new(CountingTracer::default());
    let core = GeometryCore::new(CoreCfg::default()).with_tracer(tracer.clone());
    let base = Configuration::from_layout(LooseObjectLayout::LineAndPoint);
    let l = base.loose_objects().to_vec();
    let m = construct(PredefinedConstructionType::ParallelLine, &[&l[1], &l[0]]);
    let x = construct(PredefinedConstructionType::IntersectionOfLines, &[&l[0], &m]);
    let c = base.extend(vec![m, x.clone()]).unwrap();
    match core.try_register(&c) {
        Registration::Inconstructible(ids) => assert_eq!(ids, vec![x.id()]),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(tracer.reconstructions.load(Ordering::Relaxed), 0);
    assert_eq!(tracer.inconsistencies.load(Ordering::Relaxed), 0);
    assert!(core.container().is_empty());

    // Extensions of an inconstructible configuration stay inconstructible.
    let foot = construct(PredefinedConstructionType::PerpendicularProjection, &[&l[1], &l[0]]);
    let on_x = construct(PredefinedConstructionType::Midpoint, &[&x, &l[1]]);
    let bigger = c.extend(vec![foot, on_x]).unwrap();
    match core.try_register(&bigger) {
        Registration::Inconstructible(ids) => assert_eq!(ids, vec![x.id()]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn relabeled_midpoint_is_a_duplicate() {
    let core = GeometryCore::new(CoreCfg::default());
    let first = Configuration::from_layout(LooseObjectLayout::Triangle);
    let a = first.loose_objects().to_vec();
    let first = first
        .extend(vec![construct(PredefinedConstructionType::Midpoint, &[&a[0], &a[1]])])
        .unwrap();
    let key = accepted(core.try_register(&first)).key;

    let second = Configuration::from_layout(LooseObjectLayout::Triangle);
    let x = second.loose_objects().to_vec();
    let second = second
        .extend(vec![construct(PredefinedConstructionType::Midpoint, &[&x[2], &x[1]])])
        .unwrap();
    match core.try_register(&second) {
        Registration::DuplicateOf(k) => assert_eq!(k, key),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(core.container().len(), 1);
}

#[test]
fn exact_coordinates_never_disagree() {
    let tracer = Arc::new(CountingTracer::default());
    let core = GeometryCore::new(CoreCfg::default())
        .with_placer(Arc::new(FixedPlacer::points(&[(0.0, 0.0), (4.0, 0.0), (1.0, 3.0)])))
        .with_tracer(tracer.clone());
    let base = Configuration::from_layout(LooseObjectLayout::Triangle);
    let l = base.loose_objects().to_vec();
    let ab = construct(PredefinedConstructionType::LineFromPoints, &[&l[0], &l[1]]);
    let foot = construct(PredefinedConstructionType::PerpendicularProjection, &[&l[2], &ab]);
    let m_ab = construct(PredefinedConstructionType::Midpoint, &[&l[0], &l[1]]);
    let npc = construct(
        geoconf::config::Construction::Composed(composed::nine_point_circle().unwrap()),
        &[&l[0], &l[1], &l[2]],
    );
    let c = base
        .extend(vec![ab.clone(), foot.clone(), m_ab.clone(), npc.clone()])
        .unwrap();
    let mut accepted = accepted(core.try_register(&c));
    let cases = [
        (Predicate::Incidence { point: foot.id(), on: npc.id() }, PredicateVerdict::True),
        (Predicate::Incidence { point: m_ab.id(), on: npc.id() }, PredicateVerdict::True),
        (Predicate::Incidence { point: l[2].id(), on: ab.id() }, PredicateVerdict::False),
        (
            Predicate::Collinear(vec![l[0].id(), foot.id(), m_ab.id()]),
            PredicateVerdict::True,
        ),
        (
            Predicate::EqualLineSegments([l[0].id(), m_ab.id(), m_ab.id(), l[1].id()]),
            PredicateVerdict::True,
        ),
    ];
    for (p, expected) in cases {
        assert_eq!(core.evaluate_predicate(&mut accepted.pictures, &p), expected, "{p}");
    }
    assert_eq!(tracer.inconsistencies.load(Ordering::Relaxed), 0);
    assert_eq!(tracer.reconstructions.load(Ordering::Relaxed), 0);
}

#[test]
fn reflection_back_onto_a_point_reports_equal_objects() {
    let core = GeometryCore::new(CoreCfg::default());
    let base = Configuration::from_layout(LooseObjectLayout::TwoPoints);
    let l = base.loose_objects().to_vec();
    let m = construct(PredefinedConstructionType::Midpoint, &[&l[0], &l[1]]);
    let back = construct(PredefinedConstructionType::PointReflection, &[&l[0], &m]);
    let c = base.extend(vec![m, back.clone()]).unwrap();
    match core.try_register(&c) {
        Registration::EqualObjects { object, equal_to } => {
            assert_eq!(object, back.id());
            assert_eq!(equal_to, l[1].id());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn extension_reuses_parent_pictures() {
    let core = GeometryCore::new(CoreCfg::default());
    let base = Configuration::from_layout(LooseObjectLayout::Triangle);
    let l = base.loose_objects().to_vec();
    let m = construct(PredefinedConstructionType::Midpoint, &[&l[0], &l[1]]);
    let parent = accepted(core.try_register(&base.extend(vec![m.clone()]).unwrap()));

    let g = construct(
        geoconf::config::Construction::Composed(composed::centroid().unwrap()),
        &[&l[0], &l[1], &l[2]],
    );
    let child_cfg = parent.configuration.extend(vec![g.clone()]).unwrap();
    let child = accepted(core.try_register_from(&parent, &child_cfg));
    assert_eq!(child.pictures.agreed_objects().len(), 2);
    for (p, c) in parent.pictures.pictures().zip(child.pictures.pictures()) {
        assert_eq!(p.get(m.id()), c.get(m.id()));
        assert_eq!(p.seed(), c.seed());
        assert!(c.contains(g.id()));
    }
    // Centroid lies on the median through the midpoint.
    let mut pictures = child.pictures;
    let median = Predicate::Collinear(vec![l[2].id(), g.id(), m.id()]);
    assert_eq!(core.evaluate_predicate(&mut pictures, &median), PredicateVerdict::True);
    assert_eq!(core.container().len(), 2);
    // Registering the same child again is a duplicate.
    assert!(matches!(
        core.try_register_from(&parent, &child_cfg),
        Registration::DuplicateOf(_)
    ));
}

#[test]
fn concurrent_equivalent_registrations_accept_once() {
    let core = GeometryCore::new(CoreCfg::default());
    let configs: Vec<Configuration> = (0..8)
        .map(|i| {
            let base = Configuration::from_layout(LooseObjectLayout::Triangle);
            let l = base.loose_objects().to_vec();
            let (a, b) = [(0, 1), (1, 2), (2, 0)][i % 3];
            let m = construct(PredefinedConstructionType::Midpoint, &[&l[a], &l[b]]);
            base.extend(vec![m]).unwrap()
        })
        .collect();
    let core = &core;
    let results: Vec<Registration> = std::thread::scope(|s| {
        let handles: Vec<_> = configs
            .iter()
            .map(|c| s.spawn(move || core.try_register(c)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    let accepted = results
        .iter()
        .filter(|r| matches!(r, Registration::Accepted(_)))
        .count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Registration::DuplicateOf(_)))
        .count();
    assert_eq!(accepted, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(core.container().len(), 1);
}

/// Collinear triangle in slot 0 on every attempt.
struct ForcedDegenerate(RandomPlacer);

impl LoosePlacer for ForcedDegenerate {
    fn place(
        &self,
        layout: LooseObjectLayout,
        seed: PictureSeed,
    ) -> Result<Vec<AnalyticObject>, PlacementError> {
        if seed.slot == 0 {
            FixedPlacer::points(&[(0.0, 0.0), (2.0, 1.0), (4.0, 2.0)]).place(layout, seed)
        } else {
            self.0.place(layout, seed)
        }
    }
}

#[test]
fn forced_degenerate_configuration_is_unresolvable() {
    let cfg = CoreCfg {
        pictures: 3,
        min_pictures: 3,
        max_reconstructions: 3,
        ..CoreCfg::default()
    };
    let core = GeometryCore::new(cfg).with_placer(Arc::new(ForcedDegenerate(RandomPlacer::default())));
    let base = Configuration::from_layout(LooseObjectLayout::Triangle);
    let l = base.loose_objects().to_vec();
    let circle = construct(PredefinedConstructionType::Circumcircle, &[&l[0], &l[1], &l[2]]);
    let c = base.extend(vec![circle.clone()]).unwrap();
    match core.try_register(&c) {
        Registration::UnresolvableInconsistency(report) => {
            assert_eq!(report.reason, UnresolvableReason::TooFewPictures { min: 3 });
            assert_eq!(report.object, Some(circle.id()));
            assert_eq!(report.stats.reconstructions, 3);
            assert_eq!(report.stats.dropped_pictures, 1);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(core.container().is_empty());

    // With two pictures required the same configuration survives.
    let relaxed = GeometryCore::new(CoreCfg { min_pictures: 2, ..cfg })
        .with_placer(Arc::new(ForcedDegenerate(RandomPlacer::default())));
    let a = accepted(relaxed.try_register(&c));
    assert_eq!(a.pictures.len(), 2);
    assert_eq!(a.stats.dropped_pictures, 1);
}

/// Coordinates whose midpoint overflows, in slot 0 only.
struct OverflowInFirstSlot(RandomPlacer);

impl LoosePlacer for OverflowInFirstSlot {
    fn place(
        &self,
        layout: LooseObjectLayout,
        seed: PictureSeed,
    ) -> Result<Vec<AnalyticObject>, PlacementError> {
        if seed.slot == 0 {
            FixedPlacer::points(&[(1.7e308, 0.0), (1.7e308, 5.0)]).place(layout, seed)
        } else {
            self.0.place(layout, seed)
        }
    }
}

#[test]
fn fatal_failure_in_a_single_picture_is_never_accepted() {
    let core = GeometryCore::new(CoreCfg::default())
        .with_placer(Arc::new(OverflowInFirstSlot(RandomPlacer::default())));
    let base = Configuration::from_layout(LooseObjectLayout::TwoPoints);
    let l = base.loose_objects().to_vec();
    let m = construct(PredefinedConstructionType::Midpoint, &[&l[0], &l[1]]);
    let c = base.extend(vec![m.clone()]).unwrap();
    match core.try_register(&c) {
        Registration::UnresolvableInconsistency(report) => {
            assert!(matches!(report.reason, UnresolvableReason::ConstructionFailure(_)));
            assert_eq!(report.object, Some(m.id()));
            assert_eq!(report.surviving, CoreCfg::default().pictures);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(core.container().is_empty());
}
