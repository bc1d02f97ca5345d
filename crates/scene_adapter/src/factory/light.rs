//! Light factory
//!
//! Only the hemispheric (ambient) variant is built. Other light tags in the
//! catalog resolve to it until their variant is added to [`LightVariant`].

use super::{recipe, BuildRequest};
use crate::backend::SceneBackend;
use crate::catalog::FamilyTag;
use crate::diagnostics::DiagnosticSink;
use crate::error::BackendError;
use crate::foundation::math::directions;
use crate::instance::CreatedObject;
use crate::resolve::resolve_direction;

/// Light variants the factory can build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightVariant {
    /// Ambient light lit from a direction, with a ground color
    Hemispheric,
}

impl LightVariant {
    /// Variant built for a light tag
    pub fn for_tag(tag: &str) -> Self {
        if tag != "HemisphericLight" {
            log::debug!("{tag}: building as hemispheric light");
        }
        Self::Hemispheric
    }
}

/// Build a light node
pub fn build<B: SceneBackend + ?Sized>(
    request: &BuildRequest<'_>,
    backend: &mut B,
    sink: &dyn DiagnosticSink,
) -> Result<CreatedObject, BackendError> {
    let mut options = request.props.clone();
    let name = options.take_text("name");
    let direction = options
        .take("direction")
        .map_or_else(directions::up, |value| resolve_direction(&value, sink));

    let light = match LightVariant::for_tag(request.tag) {
        LightVariant::Hemispheric => {
            backend.create_hemispheric_light(request.context.scene, name.as_deref(), direction)?
        }
    };
    recipe::assign_mutable_props(request.recipe, &options, light, backend)?;

    Ok(CreatedObject::new(light, FamilyTag::Lights))
}
