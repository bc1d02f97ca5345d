//! Adapter facade called by the diffing engine
//!
//! [`HostConfig`] is the full set of callbacks a diffing engine drives during
//! render and commit. [`SceneAdapter`] implements it by delegating to the
//! catalog, the family factories, the update engine and the structural
//! mutator. No error crosses this boundary: failures become diagnostics.

use std::time::Duration;

use bitflags::bitflags;

use crate::backend::SceneBackend;
use crate::catalog::Catalog;
use crate::config::{AdapterConfig, Config};
use crate::context::{HostContext, SceneContext};
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::{AdapterError, Diagnostic};
use crate::factory::{self, BuildRequest, FactorySettings};
use crate::foundation::time::Clock;
use crate::instance::CreatedObject;
use crate::mutator;
use crate::props::Props;
use crate::scheduler::{CallbackHandle, HostScheduler, IdleCallback, TimeoutCallback};
use crate::update;

bitflags! {
    /// Rendering modes a host supports
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HostCapabilities: u8 {
        /// Instances are mutated in place
        const MUTATION = 1 << 0;
        /// Instances are immutable and cloned on change
        const PERSISTENCE = 1 << 1;
        /// Existing instances can be adopted from a prior render
        const HYDRATION = 1 << 2;
        /// The renderer owns the host surface
        const PRIMARY_RENDERER = 1 << 3;
    }
}

/// Callbacks a diffing engine invokes on its host
pub trait HostConfig {
    /// Rendering modes this host supports
    fn capabilities(&self) -> HostCapabilities;

    /// Build the object for a newly mounted node
    fn create_instance(
        &mut self,
        tag: &str,
        props: &Props,
        container: &SceneContext,
    ) -> Option<CreatedObject>;

    /// Whether a prop change needs a commit
    fn prepare_update(&self, instance: CreatedObject, tag: &str, old: &Props, new: &Props) -> bool;

    /// Apply a prop change during commit
    fn commit_update(&mut self, instance: CreatedObject, tag: &str, old: &Props, new: &Props);

    /// Apply a prop change outside of a two-phase commit
    fn update_instance(&mut self, instance: CreatedObject, tag: &str, old: &Props, new: &Props) {
        self.commit_update(instance, tag, old, new);
    }

    /// Attach a child while its parent is first built
    fn append_initial_child(&mut self, parent: CreatedObject, child: CreatedObject);

    /// Attach a child to a mounted parent
    fn append_child(&mut self, parent: CreatedObject, child: CreatedObject);

    /// Attach a top-level child to the root container
    fn append_child_to_container(&mut self, container: &SceneContext, child: CreatedObject);

    /// Detach a child from its parent
    fn remove_child(&mut self, parent: CreatedObject, child: CreatedObject);

    /// Detach a top-level child from the root container
    fn remove_child_from_container(&mut self, container: &SceneContext, child: CreatedObject);

    /// Whether the instance wants a mount callback after its children attach
    fn finalize_initial_children(
        &mut self,
        instance: CreatedObject,
        tag: &str,
        props: &Props,
    ) -> bool;

    /// Value exposed to user code for an instance
    fn get_public_instance(&self, instance: CreatedObject) -> CreatedObject {
        instance
    }

    /// Context for the root of a tree
    fn get_root_host_context(&self, container: &SceneContext) -> HostContext;

    /// Context for the children of a node
    fn get_child_host_context(&self, parent: HostContext, tag: &str) -> HostContext;

    /// Called before the commit phase mutates anything
    fn prepare_for_commit(&mut self, container: &SceneContext);

    /// Called after the commit phase finished
    fn reset_after_commit(&mut self, container: &SceneContext);

    /// Milliseconds since the host started
    fn now(&self) -> f64;

    /// Existing object a node could adopt
    fn can_hydrate_instance(&self, tag: &str, props: &Props) -> Option<CreatedObject>;

    /// Whether a subtree can be rendered at lower priority
    fn should_deprioritize_subtree(&self, tag: &str, props: &Props) -> bool;

    /// Whether a node renders its children as text
    fn should_set_text_content(&self, tag: &str, props: &Props) -> bool;

    /// Object for a text node
    fn create_text_instance(
        &mut self,
        text: &str,
        container: &SceneContext,
    ) -> Option<CreatedObject>;

    /// Defer work until the host is idle
    fn schedule_deferred_callback(
        &mut self,
        callback: IdleCallback,
        timeout: Option<Duration>,
    ) -> CallbackHandle;

    /// Drop deferred work
    fn cancel_deferred_callback(&mut self, handle: CallbackHandle);

    /// Run work after a delay
    fn set_timeout(&mut self, callback: TimeoutCallback, delay: Duration) -> CallbackHandle;

    /// Drop delayed work
    fn clear_timeout(&mut self, handle: CallbackHandle);

    /// Handle value meaning "no timeout pending"
    fn no_timeout(&self) -> Option<CallbackHandle> {
        None
    }
}

/// Host implementation mapping scene tree nodes onto a [`SceneBackend`]
pub struct SceneAdapter<B, S> {
    catalog: Catalog,
    backend: B,
    scheduler: S,
    sink: Box<dyn DiagnosticSink>,
    settings: FactorySettings,
    clock: Clock,
}

impl<B: SceneBackend, S: HostScheduler> SceneAdapter<B, S> {
    /// Create an adapter that logs diagnostics
    pub fn new(catalog: Catalog, backend: B, scheduler: S) -> Self {
        Self {
            catalog,
            backend,
            scheduler,
            sink: Box::new(LogSink),
            settings: FactorySettings::default(),
            clock: Clock::new(),
        }
    }

    /// Create an adapter from configuration
    ///
    /// Loads the catalog from `catalog_path` when set, otherwise the built-in
    /// catalog.
    pub fn from_config(
        config: &AdapterConfig,
        backend: B,
        scheduler: S,
    ) -> Result<Self, AdapterError> {
        config.validate().map_err(AdapterError::InvalidConfig)?;

        let catalog = match &config.catalog_path {
            Some(path) => {
                log::info!("Loading catalog from {path}");
                Catalog::load_from_file(path)?
            }
            None => Catalog::builtin()?,
        };
        log::debug!("catalog holds {} recipes", catalog.len());

        let settings = FactorySettings {
            attach_camera_controls: config.attach_camera_controls,
        };
        Ok(Self::new(catalog, backend, scheduler).with_settings(settings))
    }

    /// Replace the diagnostic sink
    #[must_use]
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Replace the factory settings
    #[must_use]
    pub fn with_settings(mut self, settings: FactorySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Recipe catalog in use
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Object model
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the object model
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Host scheduler
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<B: SceneBackend, S: HostScheduler> HostConfig for SceneAdapter<B, S> {
    fn capabilities(&self) -> HostCapabilities {
        HostCapabilities::MUTATION | HostCapabilities::PRIMARY_RENDERER
    }

    fn create_instance(
        &mut self,
        tag: &str,
        props: &Props,
        container: &SceneContext,
    ) -> Option<CreatedObject> {
        let sink = self.sink.as_ref();
        let (family, recipe) = self.catalog.resolve_reported(tag, sink)?;
        let request = BuildRequest {
            tag,
            props,
            recipe,
            context: container,
        };

        match factory::build(family, &request, self.settings, &mut self.backend, sink) {
            Ok(object) => Some(object),
            Err(source) => {
                sink.emit(Diagnostic::ConstructionFailed {
                    tag: tag.to_string(),
                    source,
                });
                None
            }
        }
    }

    fn prepare_update(
        &self,
        _instance: CreatedObject,
        _tag: &str,
        _old: &Props,
        _new: &Props,
    ) -> bool {
        true
    }

    fn commit_update(&mut self, instance: CreatedObject, tag: &str, old: &Props, new: &Props) {
        let Some(recipe) = self.catalog.get(tag) else {
            log::trace!("{tag}: no recipe, update skipped");
            return;
        };
        update::update(instance, recipe, old, new, &mut self.backend, self.sink.as_ref());
    }

    fn append_initial_child(&mut self, parent: CreatedObject, child: CreatedObject) {
        if let Err(source) = mutator::attach_initial(parent, child, &mut self.backend) {
            self.sink.emit(Diagnostic::PropertyFailed {
                tag: parent.family().to_string(),
                property: "material".to_string(),
                source,
            });
        }
    }

    fn append_child(&mut self, parent: CreatedObject, child: CreatedObject) {
        mutator::append(parent, child);
    }

    fn append_child_to_container(&mut self, _container: &SceneContext, child: CreatedObject) {
        mutator::append_to_container(child);
    }

    fn remove_child(&mut self, parent: CreatedObject, child: CreatedObject) {
        mutator::remove(Some(parent), child);
    }

    fn remove_child_from_container(&mut self, _container: &SceneContext, child: CreatedObject) {
        mutator::remove(None, child);
    }

    fn finalize_initial_children(
        &mut self,
        _instance: CreatedObject,
        _tag: &str,
        _props: &Props,
    ) -> bool {
        false
    }

    fn get_root_host_context(&self, _container: &SceneContext) -> HostContext {
        HostContext
    }

    fn get_child_host_context(&self, parent: HostContext, _tag: &str) -> HostContext {
        parent
    }

    fn prepare_for_commit(&mut self, _container: &SceneContext) {
        log::trace!("prepare for commit");
    }

    fn reset_after_commit(&mut self, _container: &SceneContext) {
        log::debug!("commit finished");
    }

    fn now(&self) -> f64 {
        self.clock.now_millis()
    }

    fn can_hydrate_instance(&self, tag: &str, _props: &Props) -> Option<CreatedObject> {
        mutator::can_hydrate_instance(tag)
    }

    fn should_deprioritize_subtree(&self, tag: &str, _props: &Props) -> bool {
        mutator::should_deprioritize_subtree(tag)
    }

    fn should_set_text_content(&self, tag: &str, _props: &Props) -> bool {
        mutator::should_set_text_content(tag)
    }

    fn create_text_instance(
        &mut self,
        text: &str,
        _container: &SceneContext,
    ) -> Option<CreatedObject> {
        mutator::create_text_instance(text)
    }

    fn schedule_deferred_callback(
        &mut self,
        callback: IdleCallback,
        timeout: Option<Duration>,
    ) -> CallbackHandle {
        self.scheduler.request_idle_callback(callback, timeout)
    }

    fn cancel_deferred_callback(&mut self, handle: CallbackHandle) {
        self.scheduler.cancel_idle_callback(handle);
    }

    fn set_timeout(&mut self, callback: TimeoutCallback, delay: Duration) -> CallbackHandle {
        self.scheduler.set_timeout(callback, delay)
    }

    fn clear_timeout(&mut self, handle: CallbackHandle) {
        self.scheduler.clear_timeout(handle);
    }
}
