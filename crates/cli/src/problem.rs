//! JSON problem files: a layout, named objects and predicates to verify.
//!
//! ```json
//! {
//!   "layout": "Triangle",
//!   "loose": ["A", "B", "C"],
//!   "objects": [{ "name": "O", "construction": "Circumcenter", "args": ["A", "B", "C"] }],
//!   "predicates": [{ "kind": "Equidistant", "center": "O", "objects": ["A", "B", "C"] }]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, ensure, Context, Result};
use geoconf::api::{
    composed_by_name, Configuration, ConfigurationObject, Construction, LooseObjectLayout,
    ObjectId, ObjectRef, Predicate, PredefinedConstructionType,
};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Problem {
    pub layout: String,
    pub loose: Vec<String>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    #[serde(default)]
    pub predicates: Vec<PredicateSpec>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectSpec {
    pub name: String,
    pub construction: String,
    /// Flat argument list in signature order.
    pub args: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredicateSpec {
    pub kind: String,
    #[serde(default)]
    pub objects: Vec<String>,
    #[serde(default)]
    pub center: Option<String>,
}

/// A problem resolved into library types.
pub struct Built {
    pub configuration: Configuration,
    pub predicates: Vec<(String, Predicate)>,
    pub names: HashMap<ObjectId, String>,
}

impl Problem {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading problem {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing problem {}", path.display()))
    }

    pub fn build(&self) -> Result<Built> {
        let layout = LooseObjectLayout::from_name(&self.layout)
            .ok_or_else(|| anyhow!("unknown layout {:?}", self.layout))?;
        let base = Configuration::from_layout(layout);
        ensure!(
            self.loose.len() == base.loose_objects().len(),
            "layout {layout} has {} loose objects, {} names given",
            base.loose_objects().len(),
            self.loose.len()
        );
        let mut by_name: HashMap<String, ObjectRef> = HashMap::new();
        for (name, object) in self.loose.iter().zip(base.loose_objects()) {
            ensure!(
                by_name.insert(name.clone(), object.clone()).is_none(),
                "object name {name:?} used twice"
            );
        }
        let mut constructed = Vec::with_capacity(self.objects.len());
        for spec in &self.objects {
            let construction = lookup_construction(&spec.construction)?;
            let args = spec
                .args
                .iter()
                .map(|a| {
                    by_name
                        .get(a)
                        .cloned()
                        .ok_or_else(|| anyhow!("{}: unknown argument {a:?}", spec.name))
                })
                .collect::<Result<Vec<_>>>()?;
            let object = ConfigurationObject::construct(construction, &args)
                .with_context(|| format!("constructing {}", spec.name))?;
            ensure!(
                by_name.insert(spec.name.clone(), object.clone()).is_none(),
                "object name {:?} used twice",
                spec.name
            );
            constructed.push(object);
        }
        let configuration = base.extend(constructed)?;
        let id = |name: &str| -> Result<ObjectId> {
            by_name
                .get(name)
                .map(|o| o.id())
                .ok_or_else(|| anyhow!("unknown object {name:?}"))
        };
        let predicates = self
            .predicates
            .iter()
            .map(|p| {
                let predicate = predicate_from(p, &id)?;
                Ok((label(p), predicate))
            })
            .collect::<Result<Vec<_>>>()?;
        let names = by_name.iter().map(|(n, o)| (o.id(), n.clone())).collect();
        Ok(Built {
            configuration,
            predicates,
            names,
        })
    }
}

fn lookup_construction(name: &str) -> Result<Construction> {
    if let Some(kind) = PredefinedConstructionType::from_name(name) {
        return Ok(kind.into());
    }
    composed_by_name(name)?
        .map(Construction::Composed)
        .ok_or_else(|| anyhow!("unknown construction {name:?}"))
}

fn label(p: &PredicateSpec) -> String {
    match &p.center {
        Some(c) => format!("{}({}; {})", p.kind, c, p.objects.join(", ")),
        None => format!("{}({})", p.kind, p.objects.join(", ")),
    }
}

fn predicate_from(p: &PredicateSpec, id: &dyn Fn(&str) -> Result<ObjectId>) -> Result<Predicate> {
    let ids = p
        .objects
        .iter()
        .map(|n| id(n.as_str()))
        .collect::<Result<Vec<_>>>()?;
    let pair = || -> Result<(ObjectId, ObjectId)> {
        match ids.as_slice() {
            [a, b] => Ok((*a, *b)),
            _ => bail!("{} takes exactly two objects", p.kind),
        }
    };
    Ok(match p.kind.as_str() {
        "Collinear" => Predicate::Collinear(ids.clone()),
        "Concyclic" => Predicate::Concyclic(ids.clone()),
        "ConcurrentLines" => Predicate::ConcurrentLines(ids.clone()),
        "ParallelLines" => {
            let (a, b) = pair()?;
            Predicate::ParallelLines(a, b)
        }
        "PerpendicularLines" => {
            let (a, b) = pair()?;
            Predicate::PerpendicularLines(a, b)
        }
        "Tangent" => {
            let (a, b) = pair()?;
            Predicate::Tangent(a, b)
        }
        "Incidence" => {
            let (point, on) = pair()?;
            Predicate::Incidence { point, on }
        }
        "EqualLineSegments" => {
            let four: [ObjectId; 4] = ids
                .as_slice()
                .try_into()
                .map_err(|_| anyhow!("EqualLineSegments takes exactly four points"))?;
            Predicate::EqualLineSegments(four)
        }
        "Equidistant" => {
            let center = p
                .center
                .as_deref()
                .ok_or_else(|| anyhow!("Equidistant needs a center"))?;
            Predicate::Equidistant {
                center: id(center)?,
                points: ids.clone(),
            }
        }
        other => bail!("unknown predicate {other:?}"),
    })
}
