//! Render roots
//!
//! A [`RenderContainer`] pairs a scene context with the root handle the
//! diffing engine uses to track the mounted tree. The handle is created on the
//! first [`render`] and reused afterwards.

use crate::context::SceneContext;
use crate::props::Props;

/// Callback run once a submitted tree has been committed
pub type RenderCallback = Box<dyn FnOnce()>;

/// One node of a declarative scene tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneElement {
    /// Catalog tag
    pub tag: String,
    /// Declarative props
    pub props: Props,
    /// Child nodes, in order
    pub children: Vec<SceneElement>,
}

impl SceneElement {
    /// Create a childless node with no props
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the node's props
    #[must_use]
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Append a child node
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// Tree-diffing engine driving a host
pub trait Reconciler {
    /// Handle to a mounted tree
    type Root;

    /// Create the root for a container
    fn create_container(&mut self, container: &SceneContext) -> Self::Root;

    /// Submit a tree to a root; `None` unmounts everything under it
    fn update_container(
        &mut self,
        element: Option<&SceneElement>,
        root: &mut Self::Root,
        on_done: Option<RenderCallback>,
    );
}

/// Scene context plus its lazily created root
#[derive(Debug)]
pub struct RenderContainer<R> {
    context: SceneContext,
    root: Option<R>,
}

impl<R> RenderContainer<R> {
    /// Wrap a scene context; no root exists until the first render
    pub fn new(context: SceneContext) -> Self {
        Self { context, root: None }
    }

    /// Scene context objects are built against
    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    /// Whether a root currently exists
    pub fn is_mounted(&self) -> bool {
        self.root.is_some()
    }

    /// The root handle, if rendered
    pub fn root(&self) -> Option<&R> {
        self.root.as_ref()
    }
}

/// Submit `tree` to the container's root, creating the root on first use
pub fn render<R: Reconciler>(
    reconciler: &mut R,
    tree: &SceneElement,
    container: &mut RenderContainer<R::Root>,
    on_done: Option<RenderCallback>,
) {
    let context = container.context;
    let root = container.root.get_or_insert_with(|| {
        log::debug!("creating root container");
        reconciler.create_container(&context)
    });
    reconciler.update_container(Some(tree), root, on_done);
}

/// Tear down the container's root
///
/// Returns false if the container was never rendered.
pub fn unmount<R: Reconciler>(
    reconciler: &mut R,
    container: &mut RenderContainer<R::Root>,
) -> bool {
    let Some(mut root) = container.root.take() else {
        log::debug!("unmount: container has no root");
        return false;
    };
    reconciler.update_container(None, &mut root, None);
    log::debug!("root container released");
    true
}
