//! Object model seam
//!
//! The adapter drives a 3D object model only through [`SceneBackend`]:
//! construction by builder or constructor name, attribute assignment by
//! name, material binding and input attachment. [`MemoryBackend`] is a
//! retained-mode implementation that keeps every object in a slot map.

mod memory;

pub use memory::{MemoryBackend, ObjectKind, SceneObject};

use crate::error::BackendError;
use crate::foundation::collections::{CanvasHandle, ObjectHandle, SceneHandle};
use crate::foundation::math::Vec3;
use crate::props::{PropValue, Props};

/// Constructor argument as passed to [`SceneBackend::construct`]
///
/// The name is the declarative prop the value came from; the value is `None`
/// when the prop bag did not supply it.
pub type ConstructorArg<'a> = (&'a str, Option<PropValue>);

/// Public construction and mutation API of a 3D object model
pub trait SceneBackend {
    /// Build a mesh through the builder named `builder` (e.g. `CreateBox`)
    ///
    /// The object is registered in `scene` on construction.
    fn create_mesh(
        &mut self,
        scene: SceneHandle,
        builder: &str,
        name: Option<&str>,
        options: &Props,
    ) -> Result<ObjectHandle, BackendError>;

    /// Invoke the constructor named `class` with positional arguments
    fn construct(
        &mut self,
        class: &str,
        args: &[ConstructorArg<'_>],
    ) -> Result<ObjectHandle, BackendError>;

    /// Build a hemispheric (ambient) light
    fn create_hemispheric_light(
        &mut self,
        scene: SceneHandle,
        name: Option<&str>,
        direction: Vec3,
    ) -> Result<ObjectHandle, BackendError>;

    /// Move an object
    fn set_position(&mut self, object: ObjectHandle, position: Vec3) -> Result<(), BackendError>;

    /// Assign a property by name
    fn set_property(
        &mut self,
        object: ObjectHandle,
        name: &str,
        value: PropValue,
    ) -> Result<(), BackendError>;

    /// Bind a material to a mesh
    fn set_material(
        &mut self,
        mesh: ObjectHandle,
        material: ObjectHandle,
    ) -> Result<(), BackendError>;

    /// Route input from `canvas` to a camera
    fn attach_control(
        &mut self,
        camera: ObjectHandle,
        canvas: CanvasHandle,
    ) -> Result<(), BackendError>;

    /// Find a mesh in `scene` by name
    fn find_mesh_by_name(&self, scene: SceneHandle, name: &str) -> Option<ObjectHandle>;
}
