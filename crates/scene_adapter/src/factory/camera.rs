//! Camera factory

use super::{recipe, take_position, BuildRequest, FactorySettings};
use crate::backend::SceneBackend;
use crate::catalog::FamilyTag;
use crate::diagnostics::DiagnosticSink;
use crate::error::{BackendError, Diagnostic};
use crate::instance::CreatedObject;
use crate::resolve::{resolve_target, TargetSlot};

/// Build a camera node
///
/// Position is built the same way as for meshes and passed as the `position`
/// prop. A `target` prop is resolved to an object and stored in the slot the
/// camera kind uses; an unresolved target leaves the camera untargeted.
pub fn build<B: SceneBackend + ?Sized>(
    request: &BuildRequest<'_>,
    settings: FactorySettings,
    backend: &mut B,
    sink: &dyn DiagnosticSink,
) -> Result<CreatedObject, BackendError> {
    let context = request.context;
    let mut options = request.props.clone();
    let position = take_position(&mut options);
    options.insert("position", position);

    if let Some(target) = options.take("target") {
        let is_follow_camera = TargetSlot::for_tag(request.tag) == TargetSlot::Follow;
        let resolved = resolve_target(&target, context.scene, &*backend, is_follow_camera, sink);
        if let Some(resolved) = resolved {
            options.insert(resolved.slot.property_name(), resolved.value);
        }
    }

    let camera = recipe::construct(request.recipe, options, context, backend)?;

    if settings.attach_camera_controls {
        if let Err(source) = backend.attach_control(camera, context.canvas) {
            sink.emit(Diagnostic::PropertyFailed {
                tag: request.tag.to_string(),
                property: "control".to_string(),
                source,
            });
        }
    }

    Ok(CreatedObject::new(camera, FamilyTag::Camera))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ConstructorArg, MemoryBackend};
    use crate::catalog::Catalog;
    use crate::context::SceneContext;
    use crate::diagnostics::RecordingSink;
    use crate::foundation::collections::{CanvasHandle, EngineHandle, ObjectHandle, SceneHandle};
    use crate::foundation::math::Vec3;
    use crate::props::{PropValue, Props};

    struct Fixture {
        backend: MemoryBackend,
        context: SceneContext,
        catalog: Catalog,
        sink: RecordingSink,
        ship: ObjectHandle,
    }

    fn fixture() -> Fixture {
        let mut backend = MemoryBackend::new();
        let scene = backend.create_scene(EngineHandle(1));
        let ship = backend.create_mesh(scene, "CreateBox", Some("ship"), &Props::new()).unwrap();
        Fixture {
            backend,
            context: SceneContext::new(scene, CanvasHandle(5), EngineHandle(1)),
            catalog: Catalog::builtin().unwrap(),
            sink: RecordingSink::new(),
            ship,
        }
    }

    fn build_camera(
        fx: &mut Fixture,
        tag: &str,
        props: &Props,
        settings: FactorySettings,
    ) -> CreatedObject {
        let request = BuildRequest {
            tag,
            props,
            recipe: fx.catalog.get(tag).unwrap(),
            context: &fx.context,
        };
        build(&request, settings, &mut fx.backend, &fx.sink).unwrap()
    }

    #[test]
    fn test_free_camera_position_and_controls() {
        let mut fx = fixture();
        let props = Props::new()
            .with("name", "eye")
            .with("y", 5.0)
            .with("z", -10.0)
            .with("speed", 2.0);
        let camera = build_camera(&mut fx, "FreeCamera", &props, FactorySettings::default());

        assert_eq!(camera.family(), FamilyTag::Camera);
        let object = fx.backend.object(camera.handle()).unwrap();
        assert_eq!(object.position, Vec3::new(0.0, 5.0, -10.0));
        assert_eq!(object.control, Some(CanvasHandle(5)));
        assert_eq!(object.property("speed"), Some(&PropValue::Number(2.0)));
    }

    #[test]
    fn test_follow_camera_locks_named_target() {
        let mut fx = fixture();
        let props = Props::new().with("name", "chase").with("target", "ship").with("radius", 8.0);
        let camera = build_camera(&mut fx, "FollowCamera", &props, FactorySettings::default());

        let object = fx.backend.object(camera.handle()).unwrap();
        // lockedTarget is a constructor argument of the follow camera
        assert!(object
            .arguments
            .contains(&("lockedTarget".to_string(), Some(PropValue::Object(fx.ship)))));
        assert_eq!(object.property("target"), None);
        assert!(fx.sink.is_empty());
    }

    #[test]
    fn test_other_cameras_use_the_lock_slot() {
        let mut fx = fixture();
        let props = Props::new().with("name", "look").with("target", PropValue::Object(fx.ship));
        let camera = build_camera(&mut fx, "FreeCamera", &props, FactorySettings::default());

        let object = fx.backend.object(camera.handle()).unwrap();
        assert_eq!(object.property("target"), Some(&PropValue::Object(fx.ship)));
        assert_eq!(object.property("lockedTarget"), None);
    }

    #[test]
    fn test_unresolved_target_still_builds_camera() {
        let mut fx = fixture();
        let props = Props::new().with("name", "orbit").with("target", "nowhere");
        let camera = build_camera(&mut fx, "ArcRotateCamera", &props, FactorySettings::default());

        let object = fx.backend.object(camera.handle()).unwrap();
        assert!(object.arguments.contains(&("target".to_string(), None)));
        assert_eq!(fx.sink.take(), vec![Diagnostic::UnresolvedTarget { name: "nowhere".into() }]);
    }

    #[test]
    fn test_arc_rotate_camera_takes_focal_point() {
        let mut fx = fixture();
        let focus = PropValue::Vector(Vec3::new(0.0, 1.0, 0.0));
        let props = Props::new()
            .with("name", "orbit")
            .with("radius", 10.0)
            .with("target", focus.clone());
        let camera = build_camera(&mut fx, "ArcRotateCamera", &props, FactorySettings::default());

        let object = fx.backend.object(camera.handle()).unwrap();
        assert!(object.arguments.contains(&("target".to_string(), Some(focus))));
        assert!(fx.sink.is_empty());
    }

    /// Memory backend whose cameras refuse input controls
    struct NoControls(MemoryBackend);

    impl SceneBackend for NoControls {
        fn create_mesh(
            &mut self,
            scene: SceneHandle,
            builder: &str,
            name: Option<&str>,
            options: &Props,
        ) -> Result<ObjectHandle, BackendError> {
            self.0.create_mesh(scene, builder, name, options)
        }

        fn construct(
            &mut self,
            class: &str,
            args: &[ConstructorArg<'_>],
        ) -> Result<ObjectHandle, BackendError> {
            self.0.construct(class, args)
        }

        fn create_hemispheric_light(
            &mut self,
            scene: SceneHandle,
            name: Option<&str>,
            direction: Vec3,
        ) -> Result<ObjectHandle, BackendError> {
            self.0.create_hemispheric_light(scene, name, direction)
        }

        fn set_position(
            &mut self,
            object: ObjectHandle,
            position: Vec3,
        ) -> Result<(), BackendError> {
            self.0.set_position(object, position)
        }

        fn set_property(
            &mut self,
            object: ObjectHandle,
            name: &str,
            value: PropValue,
        ) -> Result<(), BackendError> {
            self.0.set_property(object, name, value)
        }

        fn set_material(
            &mut self,
            mesh: ObjectHandle,
            material: ObjectHandle,
        ) -> Result<(), BackendError> {
            self.0.set_material(mesh, material)
        }

        fn attach_control(
            &mut self,
            _camera: ObjectHandle,
            _canvas: CanvasHandle,
        ) -> Result<(), BackendError> {
            Err(BackendError::StaleHandle)
        }

        fn find_mesh_by_name(&self, scene: SceneHandle, name: &str) -> Option<ObjectHandle> {
            self.0.find_mesh_by_name(scene, name)
        }
    }

    #[test]
    fn test_failed_control_attach_is_reported() {
        let fx = fixture();
        let mut backend = NoControls(fx.backend);
        let props = Props::new().with("name", "eye");
        let request = BuildRequest {
            tag: "FreeCamera",
            props: &props,
            recipe: fx.catalog.get("FreeCamera").unwrap(),
            context: &fx.context,
        };

        let camera = build(&request, FactorySettings::default(), &mut backend, &fx.sink).unwrap();
        assert_eq!(backend.0.object(camera.handle()).unwrap().control, None);
        assert_eq!(
            fx.sink.take(),
            vec![Diagnostic::PropertyFailed {
                tag: "FreeCamera".into(),
                property: "control".into(),
                source: BackendError::StaleHandle,
            }]
        );
    }

    #[test]
    fn test_controls_can_be_disabled() {
        let mut fx = fixture();
        let props = Props::new().with("name", "fixed");
        let settings = FactorySettings { attach_camera_controls: false };
        let camera = build_camera(&mut fx, "UniversalCamera", &props, settings);

        assert_eq!(fx.backend.object(camera.handle()).unwrap().control, None);
    }
}
