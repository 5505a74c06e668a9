use parking_lot::Mutex;

use super::*;
use crate::analytic::AnalyticObject;
use crate::cfg::CoreCfg;
use crate::config::{
    Configuration, ConfigurationObject, LooseObjectLayout, ObjectRef, Predicate,
    PredefinedConstructionType as K,
};
use crate::construct::{ConstructionFailure, ConstructorResolver};
use crate::picture::{
    FixedPlacer, LoosePlacer, PictureSeed, Pictures, PlacementError, RandomPlacer, ReplayError,
};

fn construct(kind: K, args: &[&ObjectRef]) -> ObjectRef {
    let args: Vec<ObjectRef> = args.iter().map(|o| (*o).clone()).collect();
    ConfigurationObject::construct(kind, &args).unwrap()
}

/// Collinear triangle whenever `degenerate(seed)` holds, random otherwise.
struct DegeneratePlacer<F> {
    degenerate: F,
    random: RandomPlacer,
}

impl<F: Fn(PictureSeed) -> bool + Send + Sync> LoosePlacer for DegeneratePlacer<F> {
    fn place(
        &self,
        layout: LooseObjectLayout,
        seed: PictureSeed,
    ) -> Result<Vec<AnalyticObject>, PlacementError> {
        if (self.degenerate)(seed) {
            FixedPlacer::points(&[(0.0, 0.0), (1.0, 1.0), (3.0, 3.0)]).place(layout, seed)
        } else {
            self.random.place(layout, seed)
        }
    }
}

#[derive(Default)]
struct RecordingTracer {
    events: Mutex<Vec<String>>,
}

impl RecordingTracer {
    fn count(&self, prefix: &str) -> usize {
        self.events.lock().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

impl FailureTracer for RecordingTracer {
    fn construction_failed(&self, object: crate::config::ObjectId, picture: usize, _: &ConstructionFailure) {
        self.events.lock().push(format!("failed {object} {picture}"));
    }
    fn inconsistency(&self, subject: Subject<'_>, suspects: &[usize]) {
        self.events.lock().push(format!("inconsistency {subject} {suspects:?}"));
    }
    fn reconstructing(&self, picture: usize, attempt: usize) {
        self.events.lock().push(format!("reconstructing {picture} {attempt}"));
    }
    fn replay_failed(&self, picture: usize, _: &ReplayError) {
        self.events.lock().push(format!("replay {picture}"));
    }
    fn picture_dropped(&self, picture: usize, remaining: usize) {
        self.events.lock().push(format!("dropped {picture} {remaining}"));
    }
}

fn circumcircle_config() -> (Configuration, ObjectRef) {
    let base = Configuration::from_layout(LooseObjectLayout::Triangle);
    let l = base.loose_objects().to_vec();
    let circle = construct(K::Circumcircle, &[&l[0], &l[1], &l[2]]);
    (base.extend(vec![circle.clone()]).unwrap(), circle)
}

fn core_cfg(pictures: usize, min_pictures: usize) -> CoreCfg {
    CoreCfg {
        pictures,
        min_pictures,
        max_reconstructions: 4,
        ..CoreCfg::default()
    }
}

#[test]
fn forced_degenerate_picture_exhausts_budget() {
    let (c, circle) = circumcircle_config();
    let cfg = core_cfg(3, 3);
    let placer = DegeneratePlacer {
        degenerate: |s: PictureSeed| s.slot == 0,
        random: RandomPlacer::default(),
    };
    let resolver = ConstructorResolver::new();
    let tracer = RecordingTracer::default();
    let coordinator = Coordinator {
        cfg: &cfg,
        resolver: &resolver,
        placer: &placer,
        tracer: &tracer,
    };
    let mut pictures = Pictures::new(&c, &cfg, &placer).unwrap();
    let mut stats = ConsistencyStats::default();
    let report = coordinator
        .construct(&mut pictures, &circle, &mut stats)
        .unwrap_err();
    assert_eq!(report.reason, UnresolvableReason::TooFewPictures { min: 3 });
    assert_eq!(report.object, Some(circle.id()));
    assert_eq!(report.surviving, 2);
    assert_eq!(stats.reconstructions, cfg.max_reconstructions);
    assert_eq!(stats.dropped_pictures, 1);
    assert_eq!(stats.inconsistencies, cfg.max_reconstructions + 1);
    assert_eq!(tracer.count("reconstructing 0"), cfg.max_reconstructions);
    assert_eq!(tracer.count("dropped 0"), 1);
}

#[test]
fn dropping_one_picture_is_tolerated_above_minimum() {
    let (c, circle) = circumcircle_config();
    let cfg = core_cfg(3, 2);
    let placer = DegeneratePlacer {
        degenerate: |s: PictureSeed| s.slot == 0,
        random: RandomPlacer::default(),
    };
    let resolver = ConstructorResolver::new();
    let coordinator = Coordinator {
        cfg: &cfg,
        resolver: &resolver,
        placer: &placer,
        tracer: &NoopTracer,
    };
    let mut pictures = Pictures::new(&c, &cfg, &placer).unwrap();
    let mut stats = ConsistencyStats::default();
    let agreement = coordinator.construct(&mut pictures, &circle, &mut stats).unwrap();
    assert_eq!(agreement, Agreement::Constructed);
    assert_eq!(pictures.len(), 2);
    assert_eq!(stats.dropped_pictures, 1);
    assert_eq!(stats.agreements, 1);
    assert!(pictures.pictures().all(|p| p.contains(circle.id())));
}

#[test]
fn one_reconstruction_repairs_a_flaky_picture() {
    let (c, _) = circumcircle_config();
    let l = c.loose_objects().to_vec();
    let cfg = core_cfg(3, 2);
    let placer = DegeneratePlacer {
        degenerate: |s: PictureSeed| s.slot == 1 && s.attempt == 0,
        random: RandomPlacer::default(),
    };
    let resolver = ConstructorResolver::new();
    let tracer = RecordingTracer::default();
    let coordinator = Coordinator {
        cfg: &cfg,
        resolver: &resolver,
        placer: &placer,
        tracer: &tracer,
    };
    let mut pictures = Pictures::new(&c, &cfg, &placer).unwrap();
    let mut stats = ConsistencyStats::default();
    let collinear = Predicate::Collinear(vec![l[0].id(), l[1].id(), l[2].id()]);
    let answer = coordinator.evaluate(&mut pictures, &collinear, &mut stats).unwrap();
    assert!(!answer);
    assert_eq!(stats.inconsistencies, 1);
    assert_eq!(stats.reconstructions, 1);
    assert_eq!(stats.dropped_pictures, 0);
    assert_eq!(pictures.len(), 3);
    assert_eq!(pictures.picture(1).unwrap().seed().attempt, 1);
    assert_eq!(tracer.count("inconsistency predicate Collinear"), 1);
    // The two pictures that sided with the majority gained history.
    assert_eq!(pictures.agreement_history(), vec![2, 1, 2]);
}

#[test]
fn malformed_predicate_is_unresolvable() {
    let (c, circle) = circumcircle_config();
    let cfg = core_cfg(3, 2);
    let resolver = ConstructorResolver::new();
    let placer = RandomPlacer::default();
    let coordinator = Coordinator {
        cfg: &cfg,
        resolver: &resolver,
        placer: &placer,
        tracer: &NoopTracer,
    };
    let mut pictures = Pictures::new(&c, &cfg, &placer).unwrap();
    let mut stats = ConsistencyStats::default();
    // The circle has not been constructed yet.
    let p = Predicate::Incidence {
        point: c.loose_objects()[0].id(),
        on: circle.id(),
    };
    let report = coordinator.evaluate(&mut pictures, &p, &mut stats).unwrap_err();
    assert!(matches!(report.reason, UnresolvableReason::MalformedPredicate(_)));
    assert_eq!(report.predicate, Some(p));
}

#[test]
fn fatal_failures_in_every_picture_are_unresolvable() {
    let base = Configuration::from_layout(LooseObjectLayout::Triangle);
    let l = base.loose_objects().to_vec();
    let m = construct(K::Midpoint, &[&l[0], &l[1]]);
    let orphan = construct(K::Midpoint, &[&l[2], &m]);
    let cfg = core_cfg(3, 2);
    let resolver = ConstructorResolver::new();
    let placer = RandomPlacer::default();
    let tracer = RecordingTracer::default();
    let coordinator = Coordinator {
        cfg: &cfg,
        resolver: &resolver,
        placer: &placer,
        tracer: &tracer,
    };
    let mut pictures = Pictures::new(&base, &cfg, &placer).unwrap();
    let mut stats = ConsistencyStats::default();
    let report = coordinator
        .construct(&mut pictures, &orphan, &mut stats)
        .unwrap_err();
    assert_eq!(
        report.reason,
        UnresolvableReason::ConstructionFailure(ConstructionFailure::MissingInput(m.id()))
    );
    assert_eq!(tracer.count("failed"), 3);
    assert_eq!(stats.reconstructions, 0);
}

#[test]
fn coincidence_is_agreed_as_equal_object() {
    let base = Configuration::from_layout(LooseObjectLayout::TwoPoints);
    let l = base.loose_objects().to_vec();
    let m = construct(K::Midpoint, &[&l[0], &l[1]]);
    let back = construct(K::PointReflection, &[&l[0], &m]);
    let c = base.extend(vec![m.clone(), back.clone()]).unwrap();
    let cfg = core_cfg(4, 2);
    let resolver = ConstructorResolver::new();
    let placer = RandomPlacer::default();
    let coordinator = Coordinator {
        cfg: &cfg,
        resolver: &resolver,
        placer: &placer,
        tracer: &NoopTracer,
    };
    let mut pictures = Pictures::new(&c, &cfg, &placer).unwrap();
    let mut stats = ConsistencyStats::default();
    assert_eq!(
        coordinator.construct(&mut pictures, &m, &mut stats).unwrap(),
        Agreement::Constructed
    );
    assert_eq!(
        coordinator.construct(&mut pictures, &back, &mut stats).unwrap(),
        Agreement::EqualTo(l[1].id())
    );
    assert_eq!(stats.agreements, 2);
    assert_eq!(stats.reconstructions, 0);
}

/// Overflowing coordinates in slot 0, random elsewhere.
struct OverflowPlacer;

impl LoosePlacer for OverflowPlacer {
    fn place(
        &self,
        layout: LooseObjectLayout,
        seed: PictureSeed,
    ) -> Result<Vec<AnalyticObject>, PlacementError> {
        if seed.slot == 0 {
            FixedPlacer::points(&[(1.7e308, 0.0), (1.7e308, 5.0)]).place(layout, seed)
        } else {
            RandomPlacer::default().place(layout, seed)
        }
    }
}

#[test]
fn fatal_failure_in_one_picture_is_unresolvable() {
    let base = Configuration::from_layout(LooseObjectLayout::TwoPoints);
    let l = base.loose_objects().to_vec();
    let m = construct(K::Midpoint, &[&l[0], &l[1]]);
    let c = base.extend(vec![m.clone()]).unwrap();
    let cfg = core_cfg(5, 2);
    let resolver = ConstructorResolver::new();
    let tracer = RecordingTracer::default();
    let coordinator = Coordinator {
        cfg: &cfg,
        resolver: &resolver,
        placer: &OverflowPlacer,
        tracer: &tracer,
    };
    let mut pictures = Pictures::new(&c, &cfg, &OverflowPlacer).unwrap();
    let mut stats = ConsistencyStats::default();
    let report = coordinator.construct(&mut pictures, &m, &mut stats).unwrap_err();
    assert_eq!(
        report.reason,
        UnresolvableReason::ConstructionFailure(ConstructionFailure::NonFinite(
            "Midpoint".to_string()
        ))
    );
    assert_eq!(report.object, Some(m.id()));
    assert_eq!(tracer.count("failed"), 1);
    assert_eq!(stats.dropped_pictures, 0);
    assert_eq!(stats.agreements, 0);
    assert!(pictures.agreed_objects().is_empty());
}
