//! Generic recipe-driven construction
//!
//! Maps a recipe's constructor arguments positionally onto prop values, calls
//! the named constructor, then assigns the recipe's mutable props.

use crate::backend::{ConstructorArg, SceneBackend};
use crate::catalog::ConstructionRecipe;
use crate::context::SceneContext;
use crate::error::BackendError;
use crate::foundation::collections::ObjectHandle;
use crate::props::{PropValue, Props};

/// Construct an object from `recipe` and a prop bag
///
/// The context's scene, canvas and engine are added to the bag (replacing
/// any props of the same name) so recipes can consume them as arguments.
pub fn construct<B: SceneBackend + ?Sized>(
    recipe: &ConstructionRecipe,
    mut props: Props,
    context: &SceneContext,
    backend: &mut B,
) -> Result<ObjectHandle, BackendError> {
    props.insert("scene", PropValue::Scene(context.scene));
    props.insert("canvas", PropValue::Canvas(context.canvas));
    props.insert("engine", PropValue::Engine(context.engine));

    let args: Vec<ConstructorArg<'_>> = recipe
        .constructor_args
        .iter()
        .map(|arg| (arg.as_str(), props.get(arg).cloned()))
        .collect();

    let object = backend.construct(&recipe.name, &args)?;
    assign_mutable_props(recipe, &props, object, backend)?;
    Ok(object)
}

/// Assign every mutable prop present in `props`
///
/// Props consumed as constructor arguments are skipped.
pub fn assign_mutable_props<B: SceneBackend + ?Sized>(
    recipe: &ConstructionRecipe,
    props: &Props,
    object: ObjectHandle,
    backend: &mut B,
) -> Result<(), BackendError> {
    for prop in &recipe.mutable_props {
        if recipe.is_constructor_arg(prop) {
            continue;
        }
        if let Some(value) = props.get(prop) {
            backend.set_property(object, prop, value.clone())?;
        }
    }
    Ok(())
}
