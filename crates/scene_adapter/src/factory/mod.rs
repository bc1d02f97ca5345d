//! Family-specific factories
//!
//! One construction strategy per [`FamilyTag`]. Each factory consumes the
//! recipe, the declarative props and the scene context, and returns a tagged
//! [`CreatedObject`]. Object model failures are returned to the caller, which
//! reports them and omits the node.

pub mod camera;
pub mod light;
pub mod material;
pub mod mesh;
pub mod recipe;

use crate::backend::SceneBackend;
use crate::catalog::{ConstructionRecipe, FamilyTag};
use crate::context::SceneContext;
use crate::diagnostics::DiagnosticSink;
use crate::error::BackendError;
use crate::foundation::math::Vec3;
use crate::instance::CreatedObject;
use crate::props::Props;

/// Everything a factory needs for one node
pub struct BuildRequest<'a> {
    /// Node tag
    pub tag: &'a str,
    /// Full declarative prop bag
    pub props: &'a Props,
    /// The tag's recipe
    pub recipe: &'a ConstructionRecipe,
    /// Scene, canvas and engine of the mounted tree
    pub context: &'a SceneContext,
}

/// Factory settings shared by all families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorySettings {
    /// Attach canvas input to cameras after construction
    pub attach_camera_controls: bool,
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self {
            attach_camera_controls: true,
        }
    }
}

/// Dispatch construction to the factory for `family`
pub fn build<B: SceneBackend + ?Sized>(
    family: FamilyTag,
    request: &BuildRequest<'_>,
    settings: FactorySettings,
    backend: &mut B,
    sink: &dyn DiagnosticSink,
) -> Result<CreatedObject, BackendError> {
    log::debug!("creating {} ({family})", request.tag);
    match family {
        FamilyTag::Meshes => mesh::build(request, backend),
        FamilyTag::Camera => camera::build(request, settings, backend, sink),
        FamilyTag::Lights => light::build(request, backend, sink),
        FamilyTag::Materials => material::build(request, backend),
    }
}

/// Remove `x`, `y`, `z` and `position` from a bag and combine them
///
/// An explicit `position` vector wins; otherwise the components default to 0.
pub(crate) fn take_position(props: &mut Props) -> Vec3 {
    let x = props.take_number_or("x", 0.0);
    let y = props.take_number_or("y", 0.0);
    let z = props.take_number_or("z", 0.0);
    props
        .take("position")
        .and_then(|position| position.as_vector())
        .unwrap_or_else(|| Vec3::new(x, y, z))
}
