//! Handle types for objects owned by the object model
//!
//! Handles are generational slot map keys, so a handle to a disposed object
//! can never alias a newer one.

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle to an object (mesh, camera, light, material) in the object model
    pub struct ObjectHandle;

    /// Handle to a scene in the object model
    pub struct SceneHandle;
}

/// Handle to the drawing surface a root is mounted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasHandle(pub u32);

/// Handle to the engine instance driving a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineHandle(pub u32);

/// Handle map keyed by object handles
pub type ObjectMap<T> = SlotMap<ObjectHandle, T>;

/// Handle map keyed by scene handles
pub type SceneMap<T> = SlotMap<SceneHandle, T>;
