//! Library of composed constructions over a triangle.
//!
//! Each construction takes an unordered set of three points and is defined by an
//! internal `Triangle` configuration whose last constructed object is the output.

use std::sync::Arc;

use crate::config::{
    ComposedConstruction, Configuration, ConfigurationError, ConfigurationObject,
    ConfigurationObjectType, ConstructionParameter, LooseObjectLayout, ObjectRef,
    PredefinedConstructionType as K, Signature,
};

fn triangle_signature() -> Signature {
    Signature(vec![ConstructionParameter::set(
        ConstructionParameter::Object(ConfigurationObjectType::Point),
        3,
    )])
}

/// Build a composed construction from the triangle's loose points.
fn compose<F>(name: &str, build: F) -> Result<Arc<ComposedConstruction>, ConfigurationError>
where
    F: FnOnce(&[ObjectRef]) -> Result<Vec<ObjectRef>, ConfigurationError>,
{
    let base = Configuration::from_layout(LooseObjectLayout::Triangle);
    let objects = build(base.loose_objects())?;
    let configuration = base.extend(objects)?;
    Ok(Arc::new(ComposedConstruction::new(
        name,
        configuration,
        triangle_signature(),
    )?))
}

fn c(kind: K, args: &[&ObjectRef]) -> Result<ObjectRef, ConfigurationError> {
    let args: Vec<ObjectRef> = args.iter().map(|&a| a.clone()).collect();
    ConfigurationObject::construct(kind, &args)
}

/// Intersection of two perpendicular bisectors.
pub fn circumcenter() -> Result<Arc<ComposedConstruction>, ConfigurationError> {
    compose("Circumcenter", |p| {
        let (a, b, cc) = (&p[0], &p[1], &p[2]);
        let ab = c(K::PerpendicularBisector, &[a, b])?;
        let bc = c(K::PerpendicularBisector, &[b, cc])?;
        let out = c(K::IntersectionOfLines, &[&ab, &bc])?;
        Ok(vec![ab, bc, out])
    })
}

/// Intersection of two altitudes.
pub fn orthocenter() -> Result<Arc<ComposedConstruction>, ConfigurationError> {
    compose("Orthocenter", |p| {
        let (a, b, cc) = (&p[0], &p[1], &p[2]);
        let side_bc = c(K::LineFromPoints, &[b, cc])?;
        let side_ac = c(K::LineFromPoints, &[a, cc])?;
        let alt_a = c(K::PerpendicularLine, &[a, &side_bc])?;
        let alt_b = c(K::PerpendicularLine, &[b, &side_ac])?;
        let out = c(K::IntersectionOfLines, &[&alt_a, &alt_b])?;
        Ok(vec![side_bc, side_ac, alt_a, alt_b, out])
    })
}

/// Intersection of two medians.
pub fn centroid() -> Result<Arc<ComposedConstruction>, ConfigurationError> {
    compose("Centroid", |p| {
        let (a, b, cc) = (&p[0], &p[1], &p[2]);
        let m_bc = c(K::Midpoint, &[b, cc])?;
        let m_ac = c(K::Midpoint, &[a, cc])?;
        let med_a = c(K::LineFromPoints, &[a, &m_bc])?;
        let med_b = c(K::LineFromPoints, &[b, &m_ac])?;
        let out = c(K::IntersectionOfLines, &[&med_a, &med_b])?;
        Ok(vec![m_bc, m_ac, med_a, med_b, out])
    })
}

/// Intersection of two internal angle bisectors.
pub fn incenter() -> Result<Arc<ComposedConstruction>, ConfigurationError> {
    compose("Incenter", |p| {
        let (a, b, cc) = (&p[0], &p[1], &p[2]);
        let bis_a = c(K::InternalAngleBisector, &[a, b, cc])?;
        let bis_b = c(K::InternalAngleBisector, &[b, a, cc])?;
        let out = c(K::IntersectionOfLines, &[&bis_a, &bis_b])?;
        Ok(vec![bis_a, bis_b, out])
    })
}

/// Circle through the three side midpoints.
pub fn nine_point_circle() -> Result<Arc<ComposedConstruction>, ConfigurationError> {
    compose("NinePointCircle", |p| {
        let (a, b, cc) = (&p[0], &p[1], &p[2]);
        let m_ab = c(K::Midpoint, &[a, b])?;
        let m_bc = c(K::Midpoint, &[b, cc])?;
        let m_ac = c(K::Midpoint, &[a, cc])?;
        let out = c(K::Circumcircle, &[&m_ab, &m_bc, &m_ac])?;
        Ok(vec![m_ab, m_bc, m_ac, out])
    })
}

/// Every composed construction of the library, by name.
pub fn library() -> Result<Vec<Arc<ComposedConstruction>>, ConfigurationError> {
    Ok(vec![
        circumcenter()?,
        orthocenter()?,
        centroid()?,
        incenter()?,
        nine_point_circle()?,
    ])
}

/// Look up a library construction by name.
pub fn by_name(name: &str) -> Result<Option<Arc<ComposedConstruction>>, ConfigurationError> {
    let found = match name {
        "Circumcenter" => circumcenter()?,
        "Orthocenter" => orthocenter()?,
        "Centroid" => centroid()?,
        "Incenter" => incenter()?,
        "NinePointCircle" => nine_point_circle()?,
        _ => return Ok(None),
    };
    Ok(Some(found))
}
