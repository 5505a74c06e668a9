//! Registration of configurations and predicate verification.
//!
//! Purpose
//! - Accept a configuration once per equivalence class (canonical key), after
//!   constructing it consistently in every picture.
//! - Answer predicates about accepted configurations.
//!
//! Model
//! - `GeometryCore` owns the shared configuration container, the constructor
//!   cache, the placer and the tracer; it is `Sync` and can be shared by workers.
//! - Expected outcomes are `Registration` / `PredicateVerdict` values, never errors.
//!
//! Code cross-refs: `canon::SharedContainer`, `consistency::Coordinator`

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::canon::{CanonicalKey, ConfigurationKeyer, SharedContainer};
use crate::cfg::CoreCfg;
use crate::config::{Configuration, ObjectId, Predicate};
use crate::consistency::{
    Agreement, ConsistencyStats, Coordinator, FailureTracer, InconsistencyReport, NoopTracer,
    UnresolvableReason,
};
use crate::construct::ConstructorResolver;
use crate::picture::{LoosePlacer, Pictures, RandomPlacer};

/// A configuration accepted into the container together with its pictures.
#[derive(Clone, Debug)]
pub struct AcceptedConfiguration {
    pub key: CanonicalKey,
    pub configuration: Configuration,
    pub pictures: Pictures,
    pub stats: ConsistencyStats,
}

#[derive(Clone, Debug)]
pub enum Registration {
    Accepted(AcceptedConfiguration),
    /// An equivalent configuration was registered before.
    DuplicateOf(CanonicalKey),
    /// These objects cannot be constructed in any picture.
    Inconstructible(Vec<ObjectId>),
    /// `object` coincides with `equal_to` in every picture.
    EqualObjects { object: ObjectId, equal_to: ObjectId },
    UnresolvableInconsistency(InconsistencyReport),
}

#[derive(Clone, Debug, PartialEq)]
pub enum PredicateVerdict {
    True,
    False,
    UnresolvableInconsistency(InconsistencyReport),
}

pub struct GeometryCore {
    cfg: CoreCfg,
    container: SharedContainer<Configuration, ConfigurationKeyer>,
    resolver: ConstructorResolver,
    placer: Arc<dyn LoosePlacer>,
    tracer: Arc<dyn FailureTracer>,
}

impl GeometryCore {
    pub fn new(cfg: CoreCfg) -> Self {
        Self {
            cfg,
            container: SharedContainer::new(ConfigurationKeyer::default()),
            resolver: ConstructorResolver::new(),
            placer: Arc::new(RandomPlacer::new(cfg.placement())),
            tracer: Arc::new(NoopTracer),
        }
    }

    pub fn with_placer(mut self, placer: Arc<dyn LoosePlacer>) -> Self {
        self.placer = placer;
        self
    }

    pub fn with_tracer(mut self, tracer: Arc<dyn FailureTracer>) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn cfg(&self) -> &CoreCfg {
        &self.cfg
    }

    pub fn container(&self) -> &SharedContainer<Configuration, ConfigurationKeyer> {
        &self.container
    }

    pub fn resolver(&self) -> &ConstructorResolver {
        &self.resolver
    }

    fn coordinator(&self) -> Coordinator<'_> {
        Coordinator {
            cfg: &self.cfg,
            resolver: &self.resolver,
            placer: self.placer.as_ref(),
            tracer: self.tracer.as_ref(),
        }
    }

    fn unresolvable(&self, report: InconsistencyReport) -> Registration {
        self.tracer.unresolvable(&report);
        Registration::UnresolvableInconsistency(report)
    }

    fn bare_report(&self, reason: UnresolvableReason) -> InconsistencyReport {
        InconsistencyReport {
            reason,
            object: None,
            predicate: None,
            surviving: 0,
            stats: ConsistencyStats::default(),
        }
    }

    /// Key `configuration`, or return the registration that ends the attempt early.
    fn fresh_key(&self, configuration: &Configuration) -> Result<CanonicalKey, Registration> {
        let key = self.container.key(configuration).map_err(|e| {
            self.unresolvable(self.bare_report(UnresolvableReason::Canonicalization(e)))
        })?;
        if self.container.contains_key(&key) {
            return Err(Registration::DuplicateOf(key));
        }
        Ok(key)
    }

    /// Register a configuration built from scratch.
    pub fn try_register(&self, configuration: &Configuration) -> Registration {
        let key = match self.fresh_key(configuration) {
            Ok(key) => key,
            Err(done) => return done,
        };
        let pictures = match Pictures::new(configuration, &self.cfg, self.placer.as_ref()) {
            Ok(pictures) => pictures,
            Err(e) => return self.unresolvable(self.bare_report(UnresolvableReason::Placement(e))),
        };
        self.realize(key, configuration, pictures)
    }

    /// Register `configuration` reusing the pictures of an accepted prefix.
    ///
    /// Falls back to `try_register` when `configuration` does not extend `parent`.
    pub fn try_register_from(
        &self,
        parent: &AcceptedConfiguration,
        configuration: &Configuration,
    ) -> Registration {
        if !configuration.starts_with(&parent.configuration) {
            return self.try_register(configuration);
        }
        let key = match self.fresh_key(configuration) {
            Ok(key) => key,
            Err(done) => return done,
        };
        self.realize(key, configuration, parent.pictures.clone())
    }

    fn realize(&self, key: CanonicalKey, configuration: &Configuration, mut pictures: Pictures) -> Registration {
        pictures.reset_budgets();
        let coordinator = self.coordinator();
        let mut stats = ConsistencyStats::default();
        let mut blocked: HashSet<ObjectId> = HashSet::new();
        let mut inconstructible = Vec::new();
        for object in configuration.constructed_objects() {
            if pictures.is_realized(object.id()) {
                continue;
            }
            let depends_on_blocked = object.as_constructed().is_some_and(|c| {
                c.arguments()
                    .flattened()
                    .iter()
                    .any(|a| blocked.contains(&a.id()))
            });
            if depends_on_blocked {
                blocked.insert(object.id());
                continue;
            }
            match coordinator.construct(&mut pictures, object, &mut stats) {
                Ok(Agreement::Constructed) => {}
                Ok(Agreement::Inconstructible) => {
                    blocked.insert(object.id());
                    inconstructible.push(object.id());
                }
                Ok(Agreement::EqualTo(existing)) => {
                    return Registration::EqualObjects {
                        object: object.id(),
                        equal_to: existing,
                    }
                }
                Err(report) => return self.unresolvable(report),
            }
        }
        if !inconstructible.is_empty() {
            return Registration::Inconstructible(inconstructible);
        }
        if !self.container.add_keyed(key.clone(), configuration.clone()) {
            return Registration::DuplicateOf(key);
        }
        debug!(%key, pictures = pictures.len(), ?stats, "configuration accepted");
        Registration::Accepted(AcceptedConfiguration {
            key,
            configuration: configuration.clone(),
            pictures,
            stats,
        })
    }

    /// Evaluate `predicate` on accepted pictures.
    pub fn evaluate_predicate(&self, pictures: &mut Pictures, predicate: &Predicate) -> PredicateVerdict {
        let mut stats = ConsistencyStats::default();
        self.evaluate_predicate_with(pictures, predicate, &mut stats)
    }

    /// As `evaluate_predicate`, accumulating counters into `stats`.
    pub fn evaluate_predicate_with(
        &self,
        pictures: &mut Pictures,
        predicate: &Predicate,
        stats: &mut ConsistencyStats,
    ) -> PredicateVerdict {
        match self.coordinator().evaluate(pictures, predicate, stats) {
            Ok(true) => PredicateVerdict::True,
            Ok(false) => PredicateVerdict::False,
            Err(report) => {
                self.tracer.unresolvable(&report);
                PredicateVerdict::UnresolvableInconsistency(report)
            }
        }
    }
}
