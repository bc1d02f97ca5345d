//! Construction recipes and the closed family classification

use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog entry describing how to build an object for one tag
///
/// Loaded once from the catalog and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionRecipe {
    /// Constructor identifier in the object model
    pub name: String,
    /// Raw family string (`meshes`, `lights`, `materials`, `camera`)
    pub family: String,
    /// Declarative prop names consumed positionally by the constructor
    #[serde(rename = "args", default)]
    pub constructor_args: Vec<String>,
    /// Declarative prop names assignable after construction
    #[serde(rename = "props", default)]
    pub mutable_props: Vec<String>,
    /// Reserved pass-through list, currently unused
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl ConstructionRecipe {
    /// Create a recipe with no arguments or mutable props
    pub fn new(name: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family: family.into(),
            constructor_args: Vec::new(),
            mutable_props: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Set the positional constructor arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constructor_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the mutable props allow-list
    pub fn with_props<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mutable_props = props.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `prop` is consumed by the constructor
    pub fn is_constructor_arg(&self, prop: &str) -> bool {
        self.constructor_args.iter().any(|arg| arg == prop)
    }

    /// Whether `prop` may be assigned after construction
    ///
    /// Constructor arguments are never reassigned, even when the catalog also
    /// lists them as mutable.
    pub fn is_mutable(&self, prop: &str) -> bool {
        !self.is_constructor_arg(prop) && self.mutable_props.iter().any(|p| p == prop)
    }
}

/// Closed classification of a scene object's kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyTag {
    /// Geometry built through mesh builders
    Meshes,
    /// Light sources
    Lights,
    /// Surface materials, attached to meshes
    Materials,
    /// Cameras
    Camera,
}

/// Family string to tag. Exhaustive; anything else is unresolved.
static FAMILY_TABLE: [(&str, FamilyTag); 4] = [
    ("camera", FamilyTag::Camera),
    ("lights", FamilyTag::Lights),
    ("materials", FamilyTag::Materials),
    ("meshes", FamilyTag::Meshes),
];

impl FamilyTag {
    /// Map a catalog family string to a tag
    pub fn from_family_name(family: &str) -> Option<Self> {
        FAMILY_TABLE
            .iter()
            .find(|(name, _)| *name == family)
            .map(|(_, tag)| *tag)
    }

    /// The catalog family string for this tag
    pub fn family_name(self) -> &'static str {
        match self {
            Self::Meshes => "meshes",
            Self::Lights => "lights",
            Self::Materials => "materials",
            Self::Camera => "camera",
        }
    }
}

impl fmt::Display for FamilyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_table_round_trips() {
        for (name, tag) in FAMILY_TABLE.iter() {
            assert_eq!(FamilyTag::from_family_name(name), Some(*tag));
            assert_eq!(tag.family_name(), *name);
        }
    }

    #[test]
    fn test_family_names_are_exact() {
        assert_eq!(FamilyTag::from_family_name("Meshes"), None);
        assert_eq!(FamilyTag::from_family_name("mesh"), None);
        assert_eq!(FamilyTag::from_family_name("cameras"), None);
        assert_eq!(FamilyTag::from_family_name(""), None);
    }

    #[test]
    fn test_constructor_args_are_never_mutable() {
        let recipe = ConstructionRecipe::new("FollowCamera", "camera")
            .with_args(["name", "position", "scene", "lockedTarget"])
            .with_props(["radius", "lockedTarget"]);

        assert!(recipe.is_mutable("radius"));
        assert!(recipe.is_constructor_arg("lockedTarget"));
        assert!(!recipe.is_mutable("lockedTarget"));
        assert!(!recipe.is_mutable("heightOffset"));
    }
}
