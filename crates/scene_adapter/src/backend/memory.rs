//! Retained-mode object model kept entirely in memory

use std::collections::BTreeMap;

use super::{ConstructorArg, SceneBackend};
use crate::error::BackendError;
use crate::foundation::collections::{
    CanvasHandle, EngineHandle, ObjectHandle, ObjectMap, SceneHandle, SceneMap,
};
use crate::foundation::math::Vec3;
use crate::props::{PropValue, Props};

/// Mesh builders this object model provides
const MESH_BUILDERS: [&str; 11] = [
    "CreateBox",
    "CreateSphere",
    "CreateGround",
    "CreatePlane",
    "CreateCylinder",
    "CreateTorus",
    "CreateTorusKnot",
    "CreateDisc",
    "CreateIcoSphere",
    "CreateCapsule",
    "CreatePolyhedron",
];

/// Constructors this object model provides
const CONSTRUCTORS: [&str; 7] = [
    "FreeCamera",
    "UniversalCamera",
    "TargetCamera",
    "ArcRotateCamera",
    "FollowCamera",
    "StandardMaterial",
    "PBRMaterial",
];

/// How an object came into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Built by a mesh builder
    Mesh,
    /// Built as a light
    Light,
    /// Built by a named constructor
    Constructed,
}

/// One object in the model
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Builder or constructor identifier
    pub class: String,
    /// Construction path
    pub kind: ObjectKind,
    /// Object name
    pub name: Option<String>,
    /// Scene the object registered itself in
    pub scene: Option<SceneHandle>,
    /// World position
    pub position: Vec3,
    /// Direction, for directional objects
    pub direction: Option<Vec3>,
    /// Bound material, for meshes
    pub material: Option<ObjectHandle>,
    /// Canvas input is routed from, for cameras
    pub control: Option<CanvasHandle>,
    /// Builder options, for meshes
    pub options: Props,
    /// Constructor arguments as received, for constructed objects
    pub arguments: Vec<(String, Option<PropValue>)>,
    /// Properties assigned by name
    pub properties: BTreeMap<String, PropValue>,
}

impl SceneObject {
    fn new(class: &str, kind: ObjectKind) -> Self {
        Self {
            class: class.to_string(),
            kind,
            name: None,
            scene: None,
            position: Vec3::zeros(),
            direction: None,
            material: None,
            control: None,
            options: Props::new(),
            arguments: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Property assigned by name
    pub fn property(&self, name: &str) -> Option<&PropValue> {
        self.properties.get(name)
    }
}

#[derive(Debug)]
struct SceneRecord {
    engine: EngineHandle,
    objects: Vec<ObjectHandle>,
}

/// In-memory [`SceneBackend`]
///
/// Objects register into their scene at construction time, as a retained
/// engine would. Every successful mutation bumps [`mutation_count`], which
/// makes redundant work observable.
///
/// [`mutation_count`]: MemoryBackend::mutation_count
#[derive(Debug, Default)]
pub struct MemoryBackend {
    scenes: SceneMap<SceneRecord>,
    objects: ObjectMap<SceneObject>,
    mutations: u64,
}

impl MemoryBackend {
    /// Create an empty object model
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene rendered by `engine`
    pub fn create_scene(&mut self, engine: EngineHandle) -> SceneHandle {
        let scene = self.scenes.insert(SceneRecord {
            engine,
            objects: Vec::new(),
        });
        log::debug!("created scene {scene:?} on engine {}", engine.0);
        scene
    }

    /// Engine a scene belongs to
    pub fn scene_engine(&self, scene: SceneHandle) -> Option<EngineHandle> {
        self.scenes.get(scene).map(|record| record.engine)
    }

    /// Look up an object
    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle)
    }

    /// Objects registered in a scene, in construction order
    pub fn objects_in(&self, scene: SceneHandle) -> &[ObjectHandle] {
        self.scenes
            .get(scene)
            .map(|record| record.objects.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of live objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of successful mutations since creation
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    fn register(&mut self, scene: Option<SceneHandle>, object: SceneObject) -> ObjectHandle {
        let handle = self.objects.insert(object);
        if let Some(record) = scene.and_then(|s| self.scenes.get_mut(s)) {
            record.objects.push(handle);
        }
        handle
    }

    fn object_mut(&mut self, handle: ObjectHandle) -> Result<&mut SceneObject, BackendError> {
        self.objects.get_mut(handle).ok_or(BackendError::StaleHandle)
    }

    fn live_scene(&self, scene: SceneHandle) -> Result<SceneHandle, BackendError> {
        if self.scenes.contains_key(scene) {
            Ok(scene)
        } else {
            Err(BackendError::StaleHandle)
        }
    }
}

/// Apply a named property, routing well-known names to typed fields
fn assign(object: &mut SceneObject, name: &str, value: PropValue) -> Result<(), BackendError> {
    match (name, value) {
        ("position", PropValue::Vector(position)) => object.position = position,
        ("direction", PropValue::Vector(direction)) => object.direction = Some(direction),
        ("name", PropValue::Text(text)) => object.name = Some(text),
        ("material", PropValue::Object(material)) => object.material = Some(material),
        (typed @ ("position" | "direction" | "name" | "material"), value) => {
            return Err(BackendError::InvalidValue {
                property: typed.to_string(),
                value: value.to_string(),
            });
        }
        (other, value) => {
            object.properties.insert(other.to_string(), value);
        }
    }
    Ok(())
}

impl SceneBackend for MemoryBackend {
    fn create_mesh(
        &mut self,
        scene: SceneHandle,
        builder: &str,
        name: Option<&str>,
        options: &Props,
    ) -> Result<ObjectHandle, BackendError> {
        if !MESH_BUILDERS.contains(&builder) {
            return Err(BackendError::UnknownBuilder(builder.to_string()));
        }
        let scene = self.live_scene(scene)?;

        let mut mesh = SceneObject::new(builder, ObjectKind::Mesh);
        mesh.name = name.map(str::to_string);
        mesh.scene = Some(scene);
        mesh.options = options.clone();
        Ok(self.register(Some(scene), mesh))
    }

    fn construct(
        &mut self,
        class: &str,
        args: &[ConstructorArg<'_>],
    ) -> Result<ObjectHandle, BackendError> {
        if !CONSTRUCTORS.contains(&class) {
            return Err(BackendError::UnknownConstructor(class.to_string()));
        }

        let mut object = SceneObject::new(class, ObjectKind::Constructed);
        for (arg, value) in args {
            match (*arg, value) {
                ("name", None) => {
                    return Err(BackendError::MissingArgument {
                        class: class.to_string(),
                        argument: "name".to_string(),
                    });
                }
                ("scene", Some(PropValue::Scene(scene))) => {
                    object.scene = Some(self.live_scene(*scene)?);
                }
                (_, None) => {}
                (name, Some(value)) => assign(&mut object, name, value.clone())?,
            }
            object.arguments.push(((*arg).to_string(), value.clone()));
        }

        let scene = object.scene;
        Ok(self.register(scene, object))
    }

    fn create_hemispheric_light(
        &mut self,
        scene: SceneHandle,
        name: Option<&str>,
        direction: Vec3,
    ) -> Result<ObjectHandle, BackendError> {
        let scene = self.live_scene(scene)?;

        let mut light = SceneObject::new("HemisphericLight", ObjectKind::Light);
        light.name = name.map(str::to_string);
        light.scene = Some(scene);
        light.direction = Some(direction);
        Ok(self.register(Some(scene), light))
    }

    fn set_position(&mut self, object: ObjectHandle, position: Vec3) -> Result<(), BackendError> {
        self.object_mut(object)?.position = position;
        self.mutations += 1;
        Ok(())
    }

    fn set_property(
        &mut self,
        object: ObjectHandle,
        name: &str,
        value: PropValue,
    ) -> Result<(), BackendError> {
        assign(self.object_mut(object)?, name, value)?;
        self.mutations += 1;
        Ok(())
    }

    fn set_material(
        &mut self,
        mesh: ObjectHandle,
        material: ObjectHandle,
    ) -> Result<(), BackendError> {
        if !self.objects.contains_key(material) {
            return Err(BackendError::StaleHandle);
        }
        self.object_mut(mesh)?.material = Some(material);
        self.mutations += 1;
        Ok(())
    }

    fn attach_control(
        &mut self,
        camera: ObjectHandle,
        canvas: CanvasHandle,
    ) -> Result<(), BackendError> {
        self.object_mut(camera)?.control = Some(canvas);
        self.mutations += 1;
        Ok(())
    }

    fn find_mesh_by_name(&self, scene: SceneHandle, name: &str) -> Option<ObjectHandle> {
        self.objects_in(scene).iter().copied().find(|handle| {
            self.objects.get(*handle).is_some_and(|object| {
                object.kind == ObjectKind::Mesh && object.name.as_deref() == Some(name)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_with_scene() -> (MemoryBackend, SceneHandle) {
        let mut backend = MemoryBackend::new();
        let scene = backend.create_scene(EngineHandle(1));
        (backend, scene)
    }

    #[test]
    fn test_mesh_registers_in_scene() {
        let (mut backend, scene) = backend_with_scene();
        let options = Props::new().with("size", 2.0);
        let mesh = backend.create_mesh(scene, "CreateBox", Some("crate"), &options).unwrap();

        assert_eq!(backend.objects_in(scene), &[mesh]);
        let object = backend.object(mesh).unwrap();
        assert_eq!(object.kind, ObjectKind::Mesh);
        assert_eq!(object.name.as_deref(), Some("crate"));
        assert_eq!(object.options, options);
        assert_eq!(backend.scene_engine(scene), Some(EngineHandle(1)));
    }

    #[test]
    fn test_unknown_builder_and_constructor() {
        let (mut backend, scene) = backend_with_scene();
        assert_eq!(
            backend.create_mesh(scene, "CreateDecal", None, &Props::new()),
            Err(BackendError::UnknownBuilder("CreateDecal".into()))
        );
        assert_eq!(
            backend.construct("VRCamera", &[]),
            Err(BackendError::UnknownConstructor("VRCamera".into()))
        );
        assert_eq!(
            backend.construct("PointLight", &[]),
            Err(BackendError::UnknownConstructor("PointLight".into()))
        );
        assert_eq!(backend.object_count(), 0);
    }

    #[test]
    fn test_construct_maps_named_arguments() {
        let (mut backend, scene) = backend_with_scene();
        let camera = backend
            .construct(
                "FreeCamera",
                &[
                    ("name", Some("eye".into())),
                    ("position", Some(Vec3::new(0.0, 5.0, -10.0).into())),
                    ("scene", Some(PropValue::Scene(scene))),
                ],
            )
            .unwrap();

        let object = backend.object(camera).unwrap();
        assert_eq!(object.name.as_deref(), Some("eye"));
        assert_eq!(object.position, Vec3::new(0.0, 5.0, -10.0));
        assert_eq!(object.scene, Some(scene));
        assert_eq!(object.arguments.len(), 3);
        assert_eq!(backend.objects_in(scene), &[camera]);
    }

    #[test]
    fn test_construct_requires_name() {
        let (mut backend, scene) = backend_with_scene();
        let result = backend.construct(
            "StandardMaterial",
            &[("name", None), ("scene", Some(PropValue::Scene(scene)))],
        );
        assert!(matches!(result, Err(BackendError::MissingArgument { .. })));
    }

    #[test]
    fn test_typed_properties_reject_wrong_kinds() {
        let (mut backend, scene) = backend_with_scene();
        let mesh = backend.create_mesh(scene, "CreateSphere", None, &Props::new()).unwrap();

        assert!(backend.set_property(mesh, "position", PropValue::Number(1.0)).is_err());
        backend.set_property(mesh, "position", Vec3::new(1.0, 2.0, 3.0).into()).unwrap();
        backend.set_property(mesh, "visibility", 0.5.into()).unwrap();

        let object = backend.object(mesh).unwrap();
        assert_eq!(object.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(object.property("visibility"), Some(&PropValue::Number(0.5)));
        assert_eq!(backend.mutation_count(), 2);
    }

    #[test]
    fn test_find_mesh_by_name_ignores_other_kinds() {
        let (mut backend, scene) = backend_with_scene();
        let _light = backend
            .create_hemispheric_light(scene, Some("target"), Vec3::new(0.0, 1.0, 0.0))
            .unwrap();
        assert_eq!(backend.find_mesh_by_name(scene, "target"), None);

        let mesh = backend.create_mesh(scene, "CreateBox", Some("target"), &Props::new()).unwrap();
        assert_eq!(backend.find_mesh_by_name(scene, "target"), Some(mesh));

        let other = backend.create_scene(EngineHandle(1));
        assert_eq!(backend.find_mesh_by_name(other, "target"), None);
    }

    #[test]
    fn test_stale_scene_is_rejected() {
        let mut backend = MemoryBackend::new();
        let mut other = MemoryBackend::new();
        let foreign = other.create_scene(EngineHandle(9));
        assert_eq!(
            backend.create_mesh(foreign, "CreateBox", None, &Props::new()),
            Err(BackendError::StaleHandle)
        );
    }
}
