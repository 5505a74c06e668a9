use std::collections::BTreeSet;

use rayon::prelude::*;

use super::{LoosePlacer, Picture, PictureSeed, PlacementError, PredicateError};
use crate::analytic::{AnalyticObject, RoundingCfg};
use crate::cfg::CoreCfg;
use crate::config::{
    ConfigurationObject, Configuration, ConstructedObject, LooseObjectLayout, ObjectId, ObjectRef,
    Predicate,
};
use crate::construct::{ConstructionOutcome, ConstructorResolver, OutcomeClass};

/// Per-picture counters kept across reconstructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PictureHealth {
    /// Reconstructions spent on the current configuration.
    pub reconstructions: usize,
    /// Reconciliations in which this picture sided with the majority.
    pub agreements: usize,
}

/// Why a reconstruction attempt did not yield a usable picture.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error("replaying {object} gave {outcome:?} instead of a constructed object")]
    Diverged {
        object: ObjectId,
        outcome: OutcomeClass,
    },
}

#[derive(Clone, Debug)]
struct Slot {
    picture: Picture,
    /// Latest attempt drawn for this slot, successful or not.
    seed: PictureSeed,
    health: PictureHealth,
}

/// Realization set: every picture holds the same objects.
///
/// Invariants
/// - Each picture realizes the loose objects plus `agreed` and nothing else.
/// - `agreed` lists constructed objects in insertion order; it only grows.
#[derive(Clone, Debug)]
pub struct Pictures {
    layout: LooseObjectLayout,
    loose: Vec<ObjectRef>,
    agreed: Vec<ObjectRef>,
    slots: Vec<Slot>,
    tol: RoundingCfg,
    parallel: bool,
}

fn place_picture(
    layout: LooseObjectLayout,
    loose: &[ObjectRef],
    seed: PictureSeed,
    placer: &dyn LoosePlacer,
    tol: RoundingCfg,
) -> Result<Picture, PlacementError> {
    let values = placer.place(layout, seed)?;
    if values.len() != loose.len() {
        return Err(PlacementError::Shape {
            layout,
            reason: format!("{} objects for {} loose objects", values.len(), loose.len()),
        });
    }
    let mut picture = Picture::new(seed, tol);
    for (object, value) in loose.iter().zip(values) {
        picture.insert(object.id(), value);
    }
    Ok(picture)
}

impl Pictures {
    /// Place `cfg.pictures` pictures of `configuration`'s loose objects.
    pub fn new(
        configuration: &Configuration,
        cfg: &CoreCfg,
        placer: &dyn LoosePlacer,
    ) -> Result<Self, PlacementError> {
        let layout = configuration.layout();
        let loose = configuration.loose_objects().to_vec();
        let slots = (0..cfg.pictures)
            .map(|slot| {
                let seed = PictureSeed::new(cfg.seed, slot);
                let picture = place_picture(layout, &loose, seed, placer, cfg.rounding)?;
                Ok(Slot {
                    picture,
                    seed,
                    health: PictureHealth::default(),
                })
            })
            .collect::<Result<Vec<_>, PlacementError>>()?;
        Ok(Self {
            layout,
            loose,
            agreed: Vec::new(),
            slots,
            tol: cfg.rounding,
            parallel: cfg.parallel,
        })
    }

    pub fn layout(&self) -> LooseObjectLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn tolerance(&self) -> RoundingCfg {
        self.tol
    }

    pub fn loose_objects(&self) -> &[ObjectRef] {
        &self.loose
    }

    /// Constructed objects realized in every picture.
    pub fn agreed_objects(&self) -> &[ObjectRef] {
        &self.agreed
    }

    pub fn is_realized(&self, id: ObjectId) -> bool {
        self.loose.iter().chain(&self.agreed).any(|o| o.id() == id)
    }

    pub fn picture(&self, index: usize) -> Option<&Picture> {
        self.slots.get(index).map(|s| &s.picture)
    }

    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.slots.iter().map(|s| &s.picture)
    }

    pub fn health(&self, index: usize) -> Option<PictureHealth> {
        self.slots.get(index).map(|s| s.health)
    }

    pub fn agreement_history(&self) -> Vec<usize> {
        self.slots.iter().map(|s| s.health.agreements).collect()
    }

    pub fn record_agreement(&mut self, members: &[usize]) {
        for &i in members {
            if let Some(slot) = self.slots.get_mut(i) {
                slot.health.agreements += 1;
            }
        }
    }

    /// Start a fresh reconstruction budget (one per configuration).
    pub fn reset_budgets(&mut self) {
        self.slots
            .iter_mut()
            .for_each(|s| s.health.reconstructions = 0);
    }

    /// Construct `object` in every picture without touching them.
    pub fn construct_each(
        &self,
        object: &ConstructedObject,
        resolver: &ConstructorResolver,
    ) -> Vec<ConstructionOutcome> {
        let tol = self.tol;
        if self.parallel {
            self.slots
                .par_iter()
                .map(|s| resolver.construct_one(object, &s.picture, tol))
                .collect()
        } else {
            self.slots
                .iter()
                .map(|s| resolver.construct_one(object, &s.picture, tol))
                .collect()
        }
    }

    /// Store one value per picture for `object` and mark it agreed.
    ///
    /// `values` is aligned with the pictures.
    pub fn commit(&mut self, object: ObjectRef, values: Vec<AnalyticObject>) {
        let id = object.id();
        for (slot, value) in self.slots.iter_mut().zip(values) {
            slot.picture.insert(id, value);
        }
        self.agreed.push(object);
    }

    /// Evaluate `predicate` in every picture.
    pub fn evaluate_each(&self, predicate: &Predicate) -> Vec<Result<bool, PredicateError>> {
        if self.parallel {
            self.slots
                .par_iter()
                .map(|s| s.picture.evaluate(predicate))
                .collect()
        } else {
            self.slots
                .iter()
                .map(|s| s.picture.evaluate(predicate))
                .collect()
        }
    }

    /// Distinct answers of `predicate` across pictures.
    pub fn evaluate(&self, predicate: &Predicate) -> Result<BTreeSet<bool>, PredicateError> {
        self.evaluate_each(predicate).into_iter().collect()
    }

    /// Replay `configuration`'s constructed objects that are not yet realized.
    ///
    /// No reconciliation happens here: an object is committed only when every
    /// picture constructs it, and the replay stops at the first object that is not
    /// unanimously constructed. Returns the outcomes of each attempted object.
    pub fn ensure_constructed(
        &mut self,
        configuration: &Configuration,
        resolver: &ConstructorResolver,
    ) -> Vec<(ObjectId, Vec<ConstructionOutcome>)> {
        let mut report = Vec::new();
        for object in configuration.constructed_objects() {
            if self.is_realized(object.id()) {
                continue;
            }
            let ConfigurationObject::Constructed(constructed) = object.as_ref() else {
                continue;
            };
            let tol = self.tol;
            let outcomes: Vec<ConstructionOutcome> = if self.parallel {
                self.slots
                    .par_iter_mut()
                    .map(|s| insert_constructed(resolver, constructed, &mut s.picture, tol))
                    .collect()
            } else {
                self.slots
                    .iter_mut()
                    .map(|s| insert_constructed(resolver, constructed, &mut s.picture, tol))
                    .collect()
            };
            let unanimous = outcomes
                .iter()
                .all(|o| matches!(o, ConstructionOutcome::Constructed(_)));
            report.push((object.id(), outcomes));
            if !unanimous {
                // Restore parity before stopping.
                for slot in &mut self.slots {
                    slot.picture = rebuild_without(&slot.picture, object.id());
                }
                break;
            }
            self.agreed.push(object.clone());
        }
        report
    }

    /// Remove the picture at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Picture> {
        (index < self.slots.len()).then(|| self.slots.remove(index).picture)
    }

    /// Resample picture `index` with its next attempt seed and replay every agreed object.
    ///
    /// The attempt counts against the budget whether or not it succeeds. On failure
    /// the old picture is kept; on success its agreement history starts over.
    pub fn reconstruct(
        &mut self,
        index: usize,
        placer: &dyn LoosePlacer,
        resolver: &ConstructorResolver,
    ) -> Result<(), ReplayError> {
        let (layout, tol) = (self.layout, self.tol);
        let Some(slot) = self.slots.get_mut(index) else {
            return Ok(());
        };
        slot.health.reconstructions += 1;
        slot.seed = slot.seed.next_attempt();
        let mut picture = place_picture(layout, &self.loose, slot.seed, placer, tol)?;
        for object in &self.agreed {
            let Some(constructed) = object.as_constructed() else {
                continue;
            };
            match resolver.construct_one(constructed, &picture, tol) {
                ConstructionOutcome::Constructed(value) => picture.insert(object.id(), value),
                other => {
                    return Err(ReplayError::Diverged {
                        object: object.id(),
                        outcome: other.class(),
                    })
                }
            }
        }
        slot.picture = picture;
        slot.health.agreements = 0;
        Ok(())
    }
}

fn insert_constructed(
    resolver: &ConstructorResolver,
    object: &ConstructedObject,
    picture: &mut Picture,
    tol: RoundingCfg,
) -> ConstructionOutcome {
    let outcome = resolver.construct_one(object, picture, tol);
    if let ConstructionOutcome::Constructed(value) = &outcome {
        picture.insert(object.id(), *value);
    }
    outcome
}

fn rebuild_without(picture: &Picture, id: ObjectId) -> Picture {
    let mut out = Picture::new(picture.seed(), picture.tolerance());
    for (other, value) in picture.iter().filter(|(other, _)| *other != id) {
        out.insert(*other, *value);
    }
    out
}
