use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{atomic_constructor, AtomicConstructor, ConstructionFailure, ConstructionOutcome};
use crate::analytic::{AnalyticObject, RoundingCfg};
use crate::config::{
    ComposedConstruction, ConstructedObject, Construction, ObjectId, PredefinedConstructionType,
};
use crate::picture::Picture;

/// Executable form of a construction.
pub enum Constructor {
    Atomic {
        kind: PredefinedConstructionType,
        f: AtomicConstructor,
    },
    Composed(Arc<ComposedConstruction>),
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic { kind, .. } => f.debug_tuple("Atomic").field(kind).finish(),
            Self::Composed(c) => f.debug_tuple("Composed").field(&c.name()).finish(),
        }
    }
}

impl Constructor {
    pub fn name(&self) -> &str {
        match self {
            Self::Atomic { kind, .. } => kind.name(),
            Self::Composed(c) => c.name(),
        }
    }

    /// Evaluate on flattened inputs. `Ok(None)` means inconstructible.
    pub fn compute(
        &self,
        inputs: &[AnalyticObject],
        resolver: &ConstructorResolver,
        tol: RoundingCfg,
    ) -> Result<Option<AnalyticObject>, ConstructionFailure> {
        let expected = match self {
            Self::Atomic { kind, .. } => kind.signature().arity(),
            Self::Composed(c) => c.signature().arity(),
        };
        if inputs.len() != expected {
            return Err(ConstructionFailure::Arity {
                construction: self.name().to_string(),
                expected,
                got: inputs.len(),
            });
        }
        match self {
            Self::Atomic { f, .. } => f(inputs, tol),
            Self::Composed(c) => compute_composed(c, inputs, resolver, tol),
        }
    }
}

fn compute_composed(
    composed: &ComposedConstruction,
    inputs: &[AnalyticObject],
    resolver: &ConstructorResolver,
    tol: RoundingCfg,
) -> Result<Option<AnalyticObject>, ConstructionFailure> {
    let internal = composed.configuration();
    let mut values: HashMap<ObjectId, AnalyticObject> = HashMap::with_capacity(internal.len());
    for (index, (loose, value)) in internal.loose_objects().iter().zip(inputs).enumerate() {
        if loose.object_type() != value.object_type() {
            return Err(ConstructionFailure::InputType {
                construction: composed.name().to_string(),
                index,
                expected: loose.object_type(),
            });
        }
        values.insert(loose.id(), *value);
    }
    let mut last = None;
    for object in internal.constructed_objects() {
        let Some(constructed) = object.as_constructed() else {
            continue;
        };
        let args = constructed
            .arguments()
            .flattened()
            .iter()
            .map(|a| values.get(&a.id()).copied().ok_or(ConstructionFailure::MissingInput(a.id())))
            .collect::<Result<Vec<_>, _>>()?;
        let constructor = resolver.resolve(constructed.construction());
        let Some(value) = constructor.compute(&args, resolver, tol)? else {
            return Ok(None);
        };
        values.insert(constructed.id(), value);
        last = Some(value);
    }
    Ok(last)
}

/// Cache key; predefined and composed constructions never share an entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum ConstructorKey {
    Predefined(PredefinedConstructionType),
    Composed(String),
}

/// Maps constructions to constructors, resolving each construction once.
#[derive(Debug, Default)]
pub struct ConstructorResolver {
    cache: Mutex<HashMap<ConstructorKey, Arc<Constructor>>>,
}

impl ConstructorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A composed construction whose definition differs from the cached one
    /// under the same name replaces the cached entry.
    pub fn resolve(&self, construction: &Construction) -> Arc<Constructor> {
        let key = match construction {
            Construction::Predefined(kind) => ConstructorKey::Predefined(*kind),
            Construction::Composed(c) => ConstructorKey::Composed(c.name().to_string()),
        };
        let mut cache = self.cache.lock();
        if let Some(found) = cache.get(&key) {
            let current = match (found.as_ref(), construction) {
                (Constructor::Composed(cached), Construction::Composed(requested)) => {
                    Arc::ptr_eq(cached, requested)
                }
                _ => true,
            };
            if current {
                return Arc::clone(found);
            }
        }
        let constructor = Arc::new(match construction {
            Construction::Predefined(kind) => Constructor::Atomic {
                kind: *kind,
                f: atomic_constructor(*kind),
            },
            Construction::Composed(c) => Constructor::Composed(Arc::clone(c)),
        });
        cache.insert(key, Arc::clone(&constructor));
        constructor
    }

    /// Number of distinct constructions resolved so far.
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Construct a batch of objects sharing one construction inside `picture`.
    ///
    /// The picture is read only; callers insert `Constructed` results.
    pub fn construct(
        &self,
        objects: &[&ConstructedObject],
        picture: &Picture,
        tol: RoundingCfg,
    ) -> Vec<ConstructionOutcome> {
        let Some(first) = objects.first() else {
            return Vec::new();
        };
        if let Some(other) = objects
            .iter()
            .find(|o| o.construction() != first.construction())
        {
            let failure = ConstructionFailure::MixedBatch(
                first.construction().name().to_string(),
                other.construction().name().to_string(),
            );
            return objects
                .iter()
                .map(|_| ConstructionOutcome::Failed(failure.clone()))
                .collect();
        }
        let constructor = self.resolve(first.construction());
        objects
            .iter()
            .map(|o| self.construct_with(&constructor, o, picture, tol))
            .collect()
    }

    pub fn construct_one(
        &self,
        object: &ConstructedObject,
        picture: &Picture,
        tol: RoundingCfg,
    ) -> ConstructionOutcome {
        let constructor = self.resolve(object.construction());
        self.construct_with(&constructor, object, picture, tol)
    }

    fn construct_with(
        &self,
        constructor: &Constructor,
        object: &ConstructedObject,
        picture: &Picture,
        tol: RoundingCfg,
    ) -> ConstructionOutcome {
        let inputs = match object
            .arguments()
            .flattened()
            .iter()
            .map(|a| picture.get(a.id()).copied().ok_or(ConstructionFailure::MissingInput(a.id())))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(inputs) => inputs,
            Err(e) => return ConstructionOutcome::Failed(e),
        };
        match constructor.compute(&inputs, self, tol) {
            Err(e) => ConstructionOutcome::Failed(e),
            Ok(None) => ConstructionOutcome::Inconstructible,
            Ok(Some(value)) if !value.is_finite() => ConstructionOutcome::Failed(
                ConstructionFailure::NonFinite(constructor.name().to_string()),
            ),
            Ok(Some(value)) => match picture.find_equal(&value) {
                Some(existing) => ConstructionOutcome::Duplicate(existing),
                None => ConstructionOutcome::Constructed(value),
            },
        }
    }
}
