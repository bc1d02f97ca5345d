//! Per-root context handed to the adapter

use crate::foundation::collections::{CanvasHandle, EngineHandle, SceneHandle};

/// Handles a mounted tree constructs objects against
///
/// One instance per mounted tree, owned by the root container and read-only
/// to the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneContext {
    /// Active scene new objects are registered in
    pub scene: SceneHandle,
    /// Surface cameras take input from
    pub canvas: CanvasHandle,
    /// Engine driving the canvas
    pub engine: EngineHandle,
}

impl SceneContext {
    /// Bundle scene, canvas and engine handles
    pub fn new(scene: SceneHandle, canvas: CanvasHandle, engine: EngineHandle) -> Self {
        Self { scene, canvas, engine }
    }
}

/// Context passed down the tree by the diffing engine
///
/// The adapter keeps no per-subtree state, so this is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostContext;
