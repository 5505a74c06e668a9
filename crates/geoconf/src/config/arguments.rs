//! Construction arguments (argument trees matching a signature).

use super::{Construction, ConfigurationError, ConstructionParameter, ObjectId, ObjectRef};

/// One argument: a single object or an unordered set of arguments.
#[derive(Clone, Debug)]
pub enum ConstructionArgument {
    Object(ObjectRef),
    Set(Vec<ConstructionArgument>),
}

impl ConstructionArgument {
    fn push_flattened(&self, out: &mut Vec<ObjectRef>) {
        match self {
            Self::Object(o) => out.push(o.clone()),
            Self::Set(items) => items.iter().for_each(|a| a.push_flattened(out)),
        }
    }

    /// Order-independent identity, used to reject repeated set elements.
    fn identity(&self) -> Vec<ObjectId> {
        let mut flat = Vec::new();
        self.push_flattened(&mut flat);
        let mut ids: Vec<ObjectId> = flat.iter().map(|o| o.id()).collect();
        ids.sort_unstable();
        ids
    }

    fn check(&self, param: &ConstructionParameter, construction: &str) -> Result<(), ConfigurationError> {
        match (self, param) {
            (Self::Object(o), ConstructionParameter::Object(t)) => {
                if o.object_type() == *t {
                    Ok(())
                } else {
                    Err(ConfigurationError::shape(
                        construction,
                        format!("object {} is a {}, expected a {}", o.id(), o.object_type(), t),
                    ))
                }
            }
            (Self::Set(items), ConstructionParameter::Set { inner, count }) => {
                if items.len() != *count {
                    return Err(ConfigurationError::shape(
                        construction,
                        format!("set has {} elements, expected {}", items.len(), count),
                    ));
                }
                for item in items {
                    item.check(inner, construction)?;
                }
                let mut identities: Vec<_> = items.iter().map(|i| i.identity()).collect();
                identities.sort();
                identities.dedup();
                if identities.len() != items.len() {
                    return Err(ConfigurationError::shape(
                        construction,
                        "set elements must be distinct",
                    ));
                }
                Ok(())
            }
            (Self::Object(_), ConstructionParameter::Set { .. }) => Err(
                ConfigurationError::shape(construction, "expected a set, got an object"),
            ),
            (Self::Set(_), ConstructionParameter::Object(_)) => Err(ConfigurationError::shape(
                construction,
                "expected an object, got a set",
            )),
        }
    }

    fn pack<'a, I>(
        param: &ConstructionParameter,
        objects: &mut I,
        construction: &str,
    ) -> Result<Self, ConfigurationError>
    where
        I: Iterator<Item = &'a ObjectRef>,
    {
        match param {
            ConstructionParameter::Object(_) => objects
                .next()
                .map(|o| Self::Object(o.clone()))
                .ok_or_else(|| ConfigurationError::shape(construction, "too few objects")),
            ConstructionParameter::Set { inner, count } => {
                let items = (0..*count)
                    .map(|_| Self::pack(inner, objects, construction))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Set(items))
            }
        }
    }
}

/// Argument list of a constructed object.
#[derive(Clone, Debug)]
pub struct Arguments(Vec<ConstructionArgument>);

impl Arguments {
    pub fn new(arguments: Vec<ConstructionArgument>) -> Self {
        Self(arguments)
    }

    /// Pack a flat object list into the shape of `construction`'s signature.
    pub fn pack(construction: &Construction, objects: &[ObjectRef]) -> Result<Self, ConfigurationError> {
        let name = construction.name();
        let mut it = objects.iter();
        let args = construction
            .signature()
            .0
            .iter()
            .map(|p| ConstructionArgument::pack(p, &mut it, name))
            .collect::<Result<Vec<_>, _>>()?;
        if it.next().is_some() {
            return Err(ConfigurationError::shape(name, "too many objects"));
        }
        Ok(Self(args))
    }

    /// Validate against the signature of `construction`.
    pub fn check(&self, construction: &Construction) -> Result<(), ConfigurationError> {
        let signature = construction.signature();
        if self.0.len() != signature.0.len() {
            return Err(ConfigurationError::shape(
                construction.name(),
                format!("{} arguments, expected {}", self.0.len(), signature.0.len()),
            ));
        }
        self.0
            .iter()
            .zip(signature.0.iter())
            .try_for_each(|(a, p)| a.check(p, construction.name()))
    }

    pub fn as_slice(&self) -> &[ConstructionArgument] {
        &self.0
    }

    /// Objects in depth-first argument order.
    pub fn flattened(&self) -> Vec<ObjectRef> {
        let mut out = Vec::new();
        self.0.iter().for_each(|a| a.push_flattened(&mut out));
        out
    }
}
