//! # Scene Adapter
//!
//! Keeps a retained-mode 3D scene graph in sync with a declarative scene tree.
//!
//! A tree-diffing engine decides which nodes were created, changed, moved or
//! removed. This crate is the host side of that engine: it turns tags and
//! props into scene objects and applies prop changes to them.
//!
//! ## Features
//!
//! - **Catalog**: tag to construction recipe table, loaded from RON or TOML
//! - **Family Factories**: meshes, cameras, lights and materials
//! - **Update Engine**: allow-listed prop reassignment on changed nodes
//! - **Diagnostics**: bad input is reported and skipped, never fatal
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_adapter::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AdapterConfig::default();
//!     scene_adapter::foundation::logging::init_with_level(&config.log_level);
//!
//!     let mut backend = MemoryBackend::new();
//!     let scene = backend.create_scene(EngineHandle(0));
//!     let context = SceneContext::new(scene, CanvasHandle(0), EngineHandle(0));
//!
//!     let mut adapter = SceneAdapter::from_config(&config, backend, ManualScheduler::new())?;
//!     let props = props! { "name" => "ship", "y" => 1.0 };
//!     let ship = adapter.create_instance("Box", &props, &context);
//!     assert!(ship.is_some());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod error;
pub mod props;
pub mod diagnostics;

pub mod catalog;
pub mod context;
pub mod backend;
pub mod resolve;
pub mod instance;
pub mod factory;
pub mod update;
pub mod mutator;
pub mod scheduler;
pub mod host;
pub mod root;

#[cfg(test)]
mod tests;

pub use error::{AdapterError, BackendError, Diagnostic};
pub use host::{HostCapabilities, HostConfig, SceneAdapter};

/// Common imports for adapter users
pub mod prelude {
    pub use crate::{
        backend::{MemoryBackend, SceneBackend},
        catalog::{Catalog, ConstructionRecipe, FamilyTag},
        config::{AdapterConfig, Config},
        context::SceneContext,
        diagnostics::{DiagnosticSink, LogSink, RecordingSink},
        error::{AdapterError, BackendError, Diagnostic},
        foundation::{
            collections::{CanvasHandle, EngineHandle, ObjectHandle, SceneHandle},
            math::Vec3,
        },
        host::{HostCapabilities, HostConfig, SceneAdapter},
        instance::CreatedObject,
        props,
        props::{PropValue, Props},
        root::{render, unmount, Reconciler, RenderContainer, SceneElement},
        scheduler::{HostScheduler, ManualScheduler},
    };
}
