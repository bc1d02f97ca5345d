//! Symbolic resolvers
//!
//! Pure lookups turning declarative shorthands into object model values:
//! direction names into unit vectors and target names into scene objects.
//! Misses are reported and defaulted, never raised.

use crate::backend::SceneBackend;
use crate::diagnostics::DiagnosticSink;
use crate::error::Diagnostic;
use crate::foundation::collections::SceneHandle;
use crate::foundation::math::{directions, Vec3};
use crate::props::PropValue;

/// Resolve a direction prop into a vector
///
/// Vectors pass through unchanged. Strings are lowercased and looked up in
/// the direction table; anything unknown falls back to up with one
/// diagnostic.
pub fn resolve_direction(value: &PropValue, sink: &dyn DiagnosticSink) -> Vec3 {
    match value {
        PropValue::Vector(direction) => *direction,
        PropValue::Text(name) => directions::named(&name.to_lowercase()).unwrap_or_else(|| {
            sink.emit(Diagnostic::UnknownDirection { value: value.to_string() });
            directions::up()
        }),
        other => {
            sink.emit(Diagnostic::UnknownDirection { value: other.to_string() });
            directions::up()
        }
    }
}

/// Camera slot a resolved target is written to
///
/// The slots are distinct properties on the camera and are not
/// interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSlot {
    /// Locked target a follow camera chases (`lockedTarget`)
    Follow,
    /// Generic lock target other cameras look at (`target`)
    Lock,
}

impl TargetSlot {
    /// Slot for a camera, selected by whether it is a follow camera
    pub fn for_follow_camera(is_follow_camera: bool) -> Self {
        if is_follow_camera {
            Self::Follow
        } else {
            Self::Lock
        }
    }

    /// Slot for a camera tag
    pub fn for_tag(tag: &str) -> Self {
        Self::for_follow_camera(tag == "FollowCamera")
    }

    /// Declarative prop the resolved reference is stored under
    pub fn property_name(self) -> &'static str {
        match self {
            Self::Follow => "lockedTarget",
            Self::Lock => "target",
        }
    }
}

/// A target prop resolved for a camera slot
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRef {
    /// Slot the reference belongs in
    pub slot: TargetSlot,
    /// Value to store in the slot
    pub value: PropValue,
}

/// Resolve a target prop for a camera
///
/// Strings name a mesh in `scene`; a missing mesh yields `None` with one
/// diagnostic and the camera is built without a target. Any other value
/// (an object reference or a focal point) is stored unchanged.
pub fn resolve_target<B: SceneBackend + ?Sized>(
    value: &PropValue,
    scene: SceneHandle,
    backend: &B,
    is_follow_camera: bool,
    sink: &dyn DiagnosticSink,
) -> Option<TargetRef> {
    let value = match value {
        PropValue::Text(name) => {
            let Some(object) = backend.find_mesh_by_name(scene, name) else {
                sink.emit(Diagnostic::UnresolvedTarget { name: name.clone() });
                return None;
            };
            PropValue::Object(object)
        }
        other => other.clone(),
    };

    Some(TargetRef {
        slot: TargetSlot::for_follow_camera(is_follow_camera),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::diagnostics::RecordingSink;
    use crate::foundation::collections::EngineHandle;
    use crate::props::Props;

    #[test]
    fn test_direction_names_are_case_insensitive() {
        let sink = RecordingSink::new();
        assert_eq!(resolve_direction(&"UP".into(), &sink), directions::up());
        assert_eq!(resolve_direction(&"up".into(), &sink), directions::up());
        assert_eq!(resolve_direction(&"Backward".into(), &sink), directions::backward());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unknown_direction_defaults_to_up() {
        let sink = RecordingSink::new();
        assert_eq!(resolve_direction(&"sideways".into(), &sink), directions::up());
        assert_eq!(
            sink.take(),
            vec![Diagnostic::UnknownDirection { value: "\"sideways\"".into() }]
        );

        assert_eq!(resolve_direction(&PropValue::Number(3.0), &sink), directions::up());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_vector_direction_is_unchanged() {
        let sink = RecordingSink::new();
        let tilted = Vec3::new(0.3, -1.0, 0.2);
        assert_eq!(resolve_direction(&tilted.into(), &sink), tilted);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_target_slots_are_distinct() {
        assert_eq!(TargetSlot::for_tag("FollowCamera"), TargetSlot::Follow);
        assert_eq!(TargetSlot::for_tag("ArcRotateCamera"), TargetSlot::Lock);
        assert_ne!(TargetSlot::Follow.property_name(), TargetSlot::Lock.property_name());
    }

    #[test]
    fn test_resolve_target_by_name() {
        let mut backend = MemoryBackend::new();
        let scene = backend.create_scene(EngineHandle(0));
        let ship = backend.create_mesh(scene, "CreateBox", Some("ship"), &Props::new()).unwrap();
        let sink = RecordingSink::new();

        let resolved = resolve_target(&"ship".into(), scene, &backend, true, &sink).unwrap();
        assert_eq!(
            resolved,
            TargetRef {
                slot: TargetSlot::Follow,
                value: PropValue::Object(ship),
            }
        );

        let resolved =
            resolve_target(&PropValue::Object(ship), scene, &backend, false, &sink).unwrap();
        assert_eq!(resolved.slot, TargetSlot::Lock);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unresolved_target_reports_once() {
        let mut backend = MemoryBackend::new();
        let scene = backend.create_scene(EngineHandle(0));
        let sink = RecordingSink::new();

        assert!(resolve_target(&"ghost".into(), scene, &backend, false, &sink).is_none());
        assert_eq!(sink.take(), vec![Diagnostic::UnresolvedTarget { name: "ghost".into() }]);

    }

    #[test]
    fn test_non_text_target_passes_through() {
        let mut backend = MemoryBackend::new();
        let scene = backend.create_scene(EngineHandle(0));
        let sink = RecordingSink::new();
        let focus = PropValue::Vector(Vec3::new(0.0, 1.0, 0.0));

        let resolved = resolve_target(&focus, scene, &backend, false, &sink).unwrap();
        assert_eq!(resolved.slot, TargetSlot::Lock);
        assert_eq!(resolved.value, focus);
        assert!(sink.is_empty());
    }
}
