use super::reconcile::{reconcile, Verdict};
use super::{
    ConsistencyStats, FailureTracer, InconsistencyReport, Subject, UnresolvableReason,
};
use crate::analytic::AnalyticObject;
use crate::cfg::CoreCfg;
use crate::config::{ObjectId, ObjectRef, Predicate};
use crate::construct::{ConstructionOutcome, ConstructorResolver, OutcomeClass};
use crate::picture::{LoosePlacer, Pictures};

/// Agreed result of constructing one object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Agreement {
    Constructed,
    Inconstructible,
    /// Coincides with an existing object in every picture.
    EqualTo(ObjectId),
}

/// Drives construction and predicate evaluation over a realization set.
///
/// State machine per request: Evaluate, then Agree (done) or Disagree; on
/// disagreement each suspect picture is reconstructed unless its budget is spent,
/// in which case it is dropped. Dropping below `min_pictures` is terminal.
pub struct Coordinator<'a> {
    pub cfg: &'a CoreCfg,
    pub resolver: &'a ConstructorResolver,
    pub placer: &'a dyn LoosePlacer,
    pub tracer: &'a dyn FailureTracer,
}

impl<'a> Coordinator<'a> {
    fn report(
        &self,
        reason: UnresolvableReason,
        pictures: &Pictures,
        stats: &ConsistencyStats,
    ) -> InconsistencyReport {
        InconsistencyReport {
            reason,
            object: None,
            predicate: None,
            surviving: pictures.len(),
            stats: *stats,
        }
    }

    fn too_few(&self, pictures: &Pictures) -> bool {
        pictures.len() < self.cfg.min_pictures.max(1)
    }

    /// Construct `object` in every picture until the pictures agree.
    pub fn construct(
        &self,
        pictures: &mut Pictures,
        object: &ObjectRef,
        stats: &mut ConsistencyStats,
    ) -> Result<Agreement, InconsistencyReport> {
        let id = object.id();
        let with_object = |mut r: InconsistencyReport| {
            r.object = Some(id);
            r
        };
        let Some(constructed) = object.as_constructed() else {
            return Ok(Agreement::Constructed);
        };
        loop {
            if self.too_few(pictures) {
                let min = self.cfg.min_pictures;
                return Err(with_object(self.report(
                    UnresolvableReason::TooFewPictures { min },
                    pictures,
                    stats,
                )));
            }
            let outcomes = pictures.construct_each(constructed, self.resolver);

            let failed: Vec<usize> = outcomes
                .iter()
                .enumerate()
                .filter_map(|(i, o)| match o {
                    ConstructionOutcome::Failed(e) => {
                        self.tracer.construction_failed(id, i, e);
                        Some(i)
                    }
                    _ => None,
                })
                .collect();
            // A fatal failure in any picture ends the configuration.
            if let Some(&first) = failed.first() {
                let reason = match outcomes.into_iter().nth(first) {
                    Some(ConstructionOutcome::Failed(e)) => UnresolvableReason::ConstructionFailure(e),
                    _ => UnresolvableReason::TooFewPictures {
                        min: self.cfg.min_pictures,
                    },
                };
                return Err(with_object(self.report(reason, pictures, stats)));
            }

            let classes: Vec<OutcomeClass> = outcomes.iter().map(ConstructionOutcome::class).collect();
            match reconcile(&classes, &pictures.agreement_history()) {
                Verdict::Agree(class) => {
                    stats.agreements += 1;
                    pictures.record_agreement(&(0..pictures.len()).collect::<Vec<_>>());
                    return Ok(match class {
                        OutcomeClass::Constructed => {
                            let values: Vec<AnalyticObject> = outcomes
                                .into_iter()
                                .filter_map(|o| match o {
                                    ConstructionOutcome::Constructed(v) => Some(v),
                                    _ => None,
                                })
                                .collect();
                            pictures.commit(object.clone(), values);
                            Agreement::Constructed
                        }
                        OutcomeClass::Duplicate(existing) => Agreement::EqualTo(existing),
                        OutcomeClass::Inconstructible | OutcomeClass::Failed => {
                            Agreement::Inconstructible
                        }
                    });
                }
                Verdict::Disagree { majority, suspects } => {
                    stats.inconsistencies += 1;
                    self.tracer.inconsistency(Subject::Object(id), &suspects);
                    if let Some((_, members)) = majority {
                        pictures.record_agreement(&members);
                    }
                    self.repair(pictures, &suspects, stats);
                }
            }
        }
    }

    /// Evaluate `predicate` in every picture until the pictures agree.
    pub fn evaluate(
        &self,
        pictures: &mut Pictures,
        predicate: &Predicate,
        stats: &mut ConsistencyStats,
    ) -> Result<bool, InconsistencyReport> {
        let with_predicate = |mut r: InconsistencyReport| {
            r.predicate = Some(predicate.clone());
            r
        };
        loop {
            if self.too_few(pictures) {
                let min = self.cfg.min_pictures;
                return Err(with_predicate(self.report(
                    UnresolvableReason::TooFewPictures { min },
                    pictures,
                    stats,
                )));
            }
            let values = match pictures
                .evaluate_each(predicate)
                .into_iter()
                .collect::<Result<Vec<bool>, _>>()
            {
                Ok(values) => values,
                Err(e) => {
                    return Err(with_predicate(self.report(
                        UnresolvableReason::MalformedPredicate(e),
                        pictures,
                        stats,
                    )))
                }
            };
            match reconcile(&values, &pictures.agreement_history()) {
                Verdict::Agree(answer) => {
                    stats.agreements += 1;
                    pictures.record_agreement(&(0..pictures.len()).collect::<Vec<_>>());
                    return Ok(answer);
                }
                Verdict::Disagree { majority, suspects } => {
                    stats.inconsistencies += 1;
                    self.tracer.inconsistency(Subject::Predicate(predicate), &suspects);
                    if let Some((_, members)) = majority {
                        pictures.record_agreement(&members);
                    }
                    self.repair(pictures, &suspects, stats);
                }
            }
        }
    }

    /// Reconstruct or drop every suspect picture.
    fn repair(&self, pictures: &mut Pictures, suspects: &[usize], stats: &mut ConsistencyStats) {
        let mut exhausted = Vec::new();
        for &i in suspects {
            let spent = pictures.health(i).map_or(0, |h| h.reconstructions);
            if spent >= self.cfg.max_reconstructions {
                exhausted.push(i);
                continue;
            }
            stats.reconstructions += 1;
            self.tracer.reconstructing(i, spent + 1);
            if let Err(e) = pictures.reconstruct(i, self.placer, self.resolver) {
                self.tracer.replay_failed(i, &e);
            }
        }
        self.drop_pictures(pictures, &exhausted, stats);
    }

    fn drop_pictures(&self, pictures: &mut Pictures, indices: &[usize], stats: &mut ConsistencyStats) {
        let mut indices = indices.to_vec();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        for i in indices {
            if pictures.remove(i).is_some() {
                stats.dropped_pictures += 1;
                self.tracer.picture_dropped(i, pictures.len());
            }
        }
    }
}
