//! Math utilities and types
//!
//! Provides the vector type used for positions and directions, and the
//! process-wide table of named directions.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Named unit directions, Y-up right-handed with forward along +Z
pub mod directions {
    use super::Vec3;

    /// `(0, 1, 0)`
    pub fn up() -> Vec3 {
        Vec3::new(0.0, 1.0, 0.0)
    }

    /// `(0, -1, 0)`
    pub fn down() -> Vec3 {
        Vec3::new(0.0, -1.0, 0.0)
    }

    /// `(-1, 0, 0)`
    pub fn left() -> Vec3 {
        Vec3::new(-1.0, 0.0, 0.0)
    }

    /// `(1, 0, 0)`
    pub fn right() -> Vec3 {
        Vec3::new(1.0, 0.0, 0.0)
    }

    /// `(0, 0, 1)`
    pub fn forward() -> Vec3 {
        Vec3::new(0.0, 0.0, 1.0)
    }

    /// `(0, 0, -1)`
    pub fn backward() -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }

    /// Lowercase direction name to constructor. Read-only, never mutated.
    pub(crate) static TABLE: [(&str, fn() -> Vec3); 6] = [
        ("up", up),
        ("down", down),
        ("left", left),
        ("right", right),
        ("forward", forward),
        ("backward", backward),
    ];

    /// Look up a lowercase direction name
    pub fn named(name: &str) -> Option<Vec3> {
        TABLE
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, make)| make())
    }
}
