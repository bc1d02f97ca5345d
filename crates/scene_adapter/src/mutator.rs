//! Structural tree mutations
//!
//! The object model registers every object in its scene on construction, so
//! most structural hooks have nothing to do. The one structural rule is a
//! material child binding itself to its mesh parent.

use crate::backend::SceneBackend;
use crate::catalog::FamilyTag;
use crate::error::BackendError;
use crate::instance::CreatedObject;

/// Attach a child created during the initial build of its parent
///
/// Returns whether the object model was changed.
pub fn attach_initial<B: SceneBackend + ?Sized>(
    parent: CreatedObject,
    child: CreatedObject,
    backend: &mut B,
) -> Result<bool, BackendError> {
    if parent.is(FamilyTag::Meshes) && child.is(FamilyTag::Materials) {
        backend.set_material(parent.handle(), child.handle())?;
        log::debug!("material bound to mesh");
        return Ok(true);
    }
    log::trace!("initial child {} under {}: nothing to attach", child.family(), parent.family());
    Ok(false)
}

/// Append a child after the initial build
pub fn append(parent: CreatedObject, child: CreatedObject) {
    log::trace!("append {} to {}", child.family(), parent.family());
}

/// Append a top-level object to the root container
pub fn append_to_container(child: CreatedObject) {
    log::trace!("append {} to container", child.family());
}

/// Remove a child from its parent
///
/// Objects are left in the scene; disposal is up to the object model.
pub fn remove(parent: Option<CreatedObject>, child: CreatedObject) {
    log::debug!(
        "remove {} from {}",
        child.family(),
        parent.map_or_else(|| "container".to_string(), |parent| parent.family().to_string())
    );
}

/// Hydration target check; server-rendered scenes are not supported
pub fn can_hydrate_instance(_tag: &str) -> Option<CreatedObject> {
    None
}

/// Subtrees are never deprioritized
pub fn should_deprioritize_subtree(_tag: &str) -> bool {
    false
}

/// Scene nodes never hold text content
pub fn should_set_text_content(_tag: &str) -> bool {
    false
}

/// Text nodes have no counterpart in a scene
pub fn create_text_instance(_text: &str) -> Option<CreatedObject> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::catalog::ConstructionRecipe;
    use crate::context::SceneContext;
    use crate::factory::{material, mesh, BuildRequest};
    use crate::foundation::collections::{CanvasHandle, EngineHandle};
    use crate::props::Props;

    fn mesh_and_material() -> (MemoryBackend, CreatedObject, CreatedObject) {
        let mut backend = MemoryBackend::new();
        let scene = backend.create_scene(EngineHandle(0));
        let context = SceneContext::new(scene, CanvasHandle(0), EngineHandle(0));

        let box_recipe = ConstructionRecipe::new("Box", "meshes");
        let box_props = Props::new().with("name", "crate");
        let request =
            BuildRequest { tag: "Box", props: &box_props, recipe: &box_recipe, context: &context };
        let crate_mesh = mesh::build(&request, &mut backend).unwrap();

        let material_recipe =
            ConstructionRecipe::new("StandardMaterial", "materials").with_args(["name", "scene"]);
        let material_props = Props::new().with("name", "wood");
        let request = BuildRequest {
            tag: "StandardMaterial",
            props: &material_props,
            recipe: &material_recipe,
            context: &context,
        };
        let wood = material::build(&request, &mut backend).unwrap();

        (backend, crate_mesh, wood)
    }

    #[test]
    fn test_material_binds_to_mesh() {
        let (mut backend, crate_mesh, wood) = mesh_and_material();

        assert!(attach_initial(crate_mesh, wood, &mut backend).unwrap());
        assert_eq!(backend.object(crate_mesh.handle()).unwrap().material, Some(wood.handle()));
    }

    #[test]
    fn test_reversed_pair_is_noop() {
        let (mut backend, crate_mesh, wood) = mesh_and_material();
        let before = backend.mutation_count();

        assert!(!attach_initial(wood, crate_mesh, &mut backend).unwrap());
        assert!(!attach_initial(crate_mesh, crate_mesh, &mut backend).unwrap());
        assert_eq!(backend.mutation_count(), before);
        assert_eq!(backend.object(crate_mesh.handle()).unwrap().material, None);
    }

    #[test]
    fn test_fixed_answers() {
        assert!(can_hydrate_instance("Box").is_none());
        assert!(!should_deprioritize_subtree("Box"));
        assert!(!should_set_text_content("Box"));
        assert!(create_text_instance("hello").is_none());
    }
}
