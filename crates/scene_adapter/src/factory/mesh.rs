//! Mesh factory
//!
//! Meshes are built through the object model's builders, named `Create` +
//! tag. `name` and the positional props are consumed; everything else is
//! handed to the builder as its options bag.

use super::{take_position, BuildRequest};
use crate::backend::SceneBackend;
use crate::catalog::FamilyTag;
use crate::error::BackendError;
use crate::instance::CreatedObject;

/// Builder identifier for a mesh tag
pub fn builder_name(tag: &str) -> String {
    format!("Create{tag}")
}

/// Build a mesh node
pub fn build<B: SceneBackend + ?Sized>(
    request: &BuildRequest<'_>,
    backend: &mut B,
) -> Result<CreatedObject, BackendError> {
    let mut options = request.props.clone();
    let name = options.take_text("name");
    let position = take_position(&mut options);

    let mesh = backend.create_mesh(
        request.context.scene,
        &builder_name(request.tag),
        name.as_deref(),
        &options,
    )?;
    backend.set_position(mesh, position)?;

    Ok(CreatedObject::new(mesh, FamilyTag::Meshes))
}
