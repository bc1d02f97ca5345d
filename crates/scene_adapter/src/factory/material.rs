//! Material factory

use super::{recipe, BuildRequest};
use crate::backend::SceneBackend;
use crate::catalog::FamilyTag;
use crate::error::BackendError;
use crate::instance::CreatedObject;

/// Build a material node through its recipe
pub fn build<B: SceneBackend + ?Sized>(
    request: &BuildRequest<'_>,
    backend: &mut B,
) -> Result<CreatedObject, BackendError> {
    let props = request.props.clone();
    let material = recipe::construct(request.recipe, props, request.context, backend)?;
    Ok(CreatedObject::new(material, FamilyTag::Materials))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::catalog::Catalog;
    use crate::context::SceneContext;
    use crate::foundation::collections::{CanvasHandle, EngineHandle};
    use crate::props::{PropValue, Props};

    #[test]
    fn test_material_from_recipe() {
        let mut backend = MemoryBackend::new();
        let scene = backend.create_scene(EngineHandle(0));
        let context = SceneContext::new(scene, CanvasHandle(0), EngineHandle(0));
        let catalog = Catalog::builtin().unwrap();
        let props = Props::new()
            .with("name", "red")
            .with("diffuseColor", PropValue::Color([1.0, 0.0, 0.0]))
            .with("wireframe", true);
        let request = BuildRequest {
            tag: "StandardMaterial",
            props: &props,
            recipe: catalog.get("StandardMaterial").unwrap(),
            context: &context,
        };

        let material = build(&request, &mut backend).unwrap();
        assert_eq!(material.family(), FamilyTag::Materials);

        let object = backend.object(material.handle()).unwrap();
        assert_eq!(object.name.as_deref(), Some("red"));
        assert_eq!(object.property("diffuseColor"), Some(&PropValue::Color([1.0, 0.0, 0.0])));
        assert_eq!(object.property("wireframe"), Some(&PropValue::Bool(true)));
    }
}
