//! Scene adapter demo
//!
//! Mounts a small declarative scene into the in-memory object model, prints
//! the resulting scene graph and unmounts it again.
//!
//! Usage: `scene_demo [config.toml|config.ron]`

use std::time::Duration;

use scene_adapter::foundation::logging;
use scene_adapter::prelude::*;
use scene_adapter::root::RenderCallback;
use thiserror::Error;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Config(#[from] scene_adapter::config::ConfigError),
}

/// Mount-only driver: builds a tree on first submit and drops it on unmount
struct MountReconciler {
    adapter: SceneAdapter<MemoryBackend, ManualScheduler>,
}

struct MountedRoot {
    context: SceneContext,
    top: Vec<CreatedObject>,
}

impl MountReconciler {
    fn mount(&mut self, element: &SceneElement, context: &SceneContext) -> Option<CreatedObject> {
        let object = self.adapter.create_instance(&element.tag, &element.props, context)?;
        for child in &element.children {
            if let Some(child) = self.mount(child, context) {
                self.adapter.append_initial_child(object, child);
            }
        }
        Some(object)
    }
}

impl Reconciler for MountReconciler {
    type Root = MountedRoot;

    fn create_container(&mut self, container: &SceneContext) -> MountedRoot {
        MountedRoot {
            context: *container,
            top: Vec::new(),
        }
    }

    fn update_container(
        &mut self,
        element: Option<&SceneElement>,
        root: &mut MountedRoot,
        on_done: Option<RenderCallback>,
    ) {
        let context = root.context;
        self.adapter.prepare_for_commit(&context);
        for object in root.top.drain(..) {
            self.adapter.remove_child_from_container(&context, object);
        }
        if let Some(element) = element {
            if let Some(object) = self.mount(element, &context) {
                self.adapter.append_child_to_container(&context, object);
                root.top.push(object);
            }
        }
        self.adapter.reset_after_commit(&context);
        if let Some(on_done) = on_done {
            on_done();
        }
    }
}

fn level() -> SceneElement {
    SceneElement::new("Ground")
        .with_props(props! { "name" => "ground", "width" => 40.0, "height" => 40.0 })
        .with_child(
            SceneElement::new("Box")
                .with_props(props! { "name" => "ship", "y" => 1.0, "size" => 2.0 })
                .with_child(SceneElement::new("StandardMaterial").with_props(props! {
                    "name" => "hull",
                    "diffuseColor" => PropValue::Color([0.8, 0.7, 0.5]),
                })),
        )
        .with_child(
            SceneElement::new("Sphere").with_props(props! {
                "name" => "asteroid",
                "position" => Vec3::new(6.0, 1.0, -4.0),
            }),
        )
        .with_child(SceneElement::new("FollowCamera").with_props(props! {
            "name" => "chase",
            "y" => 8.0,
            "z" => -12.0,
            "target" => "ship",
            "radius" => 15.0,
        }))
        .with_child(SceneElement::new("HemisphericLight").with_props(props! {
            "name" => "sky",
            "direction" => "up",
            "intensity" => 0.9,
        }))
}

fn print_scene(backend: &MemoryBackend, scene: SceneHandle) {
    for handle in backend.objects_in(scene) {
        let Some(object) = backend.object(*handle) else {
            continue;
        };
        let p = object.position;
        println!(
            "  {:<18} {:<10} ({:>5.1}, {:>5.1}, {:>5.1})",
            object.class,
            object.name.as_deref().unwrap_or("-"),
            p.x,
            p.y,
            p.z
        );
    }
}

fn main() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => AdapterConfig::load_from_file(path)?,
        None => AdapterConfig::default(),
    };
    logging::init_with_level(&config.log_level);
    log::info!("Starting scene demo");

    let mut backend = MemoryBackend::new();
    let scene = backend.create_scene(EngineHandle(0));
    let context = SceneContext::new(scene, CanvasHandle(0), EngineHandle(0));

    let adapter = SceneAdapter::from_config(&config, backend, ManualScheduler::new())?;
    let mut reconciler = MountReconciler { adapter };
    let mut container = RenderContainer::new(context);

    let on_done: RenderCallback = Box::new(|| log::info!("Scene committed"));
    render(&mut reconciler, &level(), &mut container, Some(on_done));

    reconciler
        .adapter
        .set_timeout(Box::new(|| log::info!("First frame elapsed")), Duration::from_millis(16));
    reconciler.adapter.scheduler_mut().advance(Duration::from_millis(16));

    println!("Scene graph ({} objects):", reconciler.adapter.backend().object_count());
    print_scene(reconciler.adapter.backend(), scene);

    unmount(&mut reconciler, &mut container);
    log::info!("Scene demo finished");
    Ok(())
}
