//! Prop updates on existing objects
//!
//! Only meshes are updated. A changed prop bag recomputes the position from
//! `x`, `y` and `z` and reassigns every remaining prop the recipe allows,
//! without diffing individual keys. Props the recipe does not allow are
//! reported only when their value changed.

use crate::backend::SceneBackend;
use crate::catalog::{ConstructionRecipe, FamilyTag};
use crate::diagnostics::DiagnosticSink;
use crate::error::Diagnostic;
use crate::foundation::math::Vec3;
use crate::instance::CreatedObject;
use crate::props::Props;

const POSITION_COMPONENTS: [&str; 3] = ["x", "y", "z"];

/// Whether an update may assign `property` on an object built from `recipe`
pub fn is_assignable(recipe: &ConstructionRecipe, property: &str) -> bool {
    matches!(property, "name" | "position") || recipe.is_mutable(property)
}

/// Apply a new prop bag to an existing object
///
/// Returns the number of properties assigned, position included.
pub fn update<B: SceneBackend + ?Sized>(
    object: CreatedObject,
    recipe: &ConstructionRecipe,
    old: &Props,
    new: &Props,
    backend: &mut B,
    sink: &dyn DiagnosticSink,
) -> usize {
    if !object.is(FamilyTag::Meshes) {
        log::trace!("{}: updates only apply to meshes", recipe.name);
        return 0;
    }
    if old == new {
        return 0;
    }

    let component = |key: &str| new.get(key).and_then(|value| value.as_number()).unwrap_or(0.0);
    let position = Vec3::new(component("x"), component("y"), component("z"));

    let mut assigned = 0;
    match backend.set_position(object.handle(), position) {
        Ok(()) => assigned += 1,
        Err(source) => sink.emit(Diagnostic::PropertyFailed {
            tag: recipe.name.clone(),
            property: "position".to_string(),
            source,
        }),
    }

    for (key, value) in new.iter() {
        if POSITION_COMPONENTS.contains(&key) {
            continue;
        }
        if !is_assignable(recipe, key) {
            // Construction-only options are reported only when they change
            if old.get(key) == Some(value) {
                log::trace!("{}: skipping unchanged '{key}'", recipe.name);
                continue;
            }
            sink.emit(Diagnostic::PropertyRejected {
                tag: recipe.name.clone(),
                property: key.to_string(),
            });
            continue;
        }
        match backend.set_property(object.handle(), key, value.clone()) {
            Ok(()) => assigned += 1,
            Err(source) => sink.emit(Diagnostic::PropertyFailed {
                tag: recipe.name.clone(),
                property: key.to_string(),
                source,
            }),
        }
    }

    log::trace!("{}: {assigned} properties assigned", recipe.name);
    assigned
}
