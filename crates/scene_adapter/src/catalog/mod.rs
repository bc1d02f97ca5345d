//! Catalog of construction recipes and family resolution
//!
//! The catalog is an external, read-only document mapping tags to
//! [`ConstructionRecipe`]s. It is not validated; the only check performed is
//! classifying each recipe's family string into a [`FamilyTag`].

mod recipe;

pub use recipe::{ConstructionRecipe, FamilyTag};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError, Format};
use crate::diagnostics::DiagnosticSink;
use crate::error::Diagnostic;

const BUILTIN_CATALOG: &str = include_str!("../../resources/catalog.ron");

/// Outcome of looking up a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Tag has a recipe with a known family
    Resolved {
        /// Classified family
        family: FamilyTag,
        /// The tag's recipe
        recipe: &'a ConstructionRecipe,
    },
    /// No recipe for the tag
    UnknownTag,
    /// Recipe exists but its family string is not recognised
    UnknownFamily(&'a str),
}

/// Read-only map from tag to recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    recipes: BTreeMap<String, ConstructionRecipe>,
}

impl Config for Catalog {}

impl Catalog {
    /// The catalog shipped with the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::parse(BUILTIN_CATALOG, Format::Ron)
    }

    /// Build a catalog from `(tag, recipe)` pairs
    pub fn from_recipes<I, S>(recipes: I) -> Self
    where
        I: IntoIterator<Item = (S, ConstructionRecipe)>,
        S: Into<String>,
    {
        Self {
            recipes: recipes.into_iter().map(|(tag, r)| (tag.into(), r)).collect(),
        }
    }

    /// Recipe for a tag
    pub fn get(&self, tag: &str) -> Option<&ConstructionRecipe> {
        self.recipes.get(tag)
    }

    /// All known tags, in order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }

    /// Number of recipes
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the catalog has no recipes
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Look up and classify a tag without reporting
    pub fn resolve(&self, tag: &str) -> Resolution<'_> {
        match self.get(tag) {
            None => Resolution::UnknownTag,
            Some(recipe) => match FamilyTag::from_family_name(&recipe.family) {
                Some(family) => Resolution::Resolved { family, recipe },
                None => Resolution::UnknownFamily(&recipe.family),
            },
        }
    }

    /// Look up and classify a tag, reporting a miss to `sink`
    ///
    /// Emits exactly one diagnostic when the tag cannot be resolved.
    pub fn resolve_reported(
        &self,
        tag: &str,
        sink: &dyn DiagnosticSink,
    ) -> Option<(FamilyTag, &ConstructionRecipe)> {
        let recipe = self.get(tag);
        resolve_family(tag, recipe, sink).and_then(|family| recipe.map(|r| (family, r)))
    }
}

/// Classify a tag's recipe into a family
///
/// A missing recipe or unrecognised family string yields `None` plus one
/// diagnostic; callers skip construction for that tag.
pub fn resolve_family(
    tag: &str,
    recipe: Option<&ConstructionRecipe>,
    sink: &dyn DiagnosticSink,
) -> Option<FamilyTag> {
    let Some(recipe) = recipe else {
        sink.emit(Diagnostic::UnknownTag { tag: tag.to_string() });
        return None;
    };

    let family = FamilyTag::from_family_name(&recipe.family);
    if family.is_none() {
        sink.emit(Diagnostic::UnknownFamily {
            tag: tag.to_string(),
            family: recipe.family.clone(),
        });
    }
    family
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;

    #[test]
    fn test_builtin_catalog_classifies_every_entry() {
        let catalog = Catalog::builtin().expect("built-in catalog parses");
        assert!(!catalog.is_empty());

        for tag in catalog.tags() {
            assert!(
                matches!(catalog.resolve(tag), Resolution::Resolved { .. }),
                "{tag} has an unknown family"
            );
        }
    }

    #[test]
    fn test_builtin_catalog_shapes() {
        let catalog = Catalog::builtin().unwrap();

        let follow = catalog.get("FollowCamera").unwrap();
        assert_eq!(follow.constructor_args, ["name", "position", "scene", "lockedTarget"]);

        let material = catalog.get("StandardMaterial").unwrap();
        assert_eq!(FamilyTag::from_family_name(&material.family), Some(FamilyTag::Materials));
        assert!(material.is_mutable("diffuseColor"));

        let sphere = catalog.get("Sphere").unwrap();
        assert!(sphere.constructor_args.is_empty());
    }

    #[test]
    fn test_unknown_tag_reports_once() {
        let catalog = Catalog::builtin().unwrap();
        let sink = RecordingSink::new();

        assert_eq!(catalog.resolve("Teapot"), Resolution::UnknownTag);
        assert!(catalog.resolve_reported("Teapot", &sink).is_none());
        assert_eq!(sink.take(), vec![Diagnostic::UnknownTag { tag: "Teapot".into() }]);
    }

    #[test]
    fn test_unknown_family_reports_once() {
        let fog = ConstructionRecipe::new("Fog", "atmosphere");
        let catalog = Catalog::from_recipes([("Fog", fog)]);
        let sink = RecordingSink::new();

        assert_eq!(catalog.resolve("Fog"), Resolution::UnknownFamily("atmosphere"));
        assert!(resolve_family("Fog", catalog.get("Fog"), &sink).is_none());
        assert_eq!(
            sink.take(),
            vec![Diagnostic::UnknownFamily { tag: "Fog".into(), family: "atmosphere".into() }]
        );
    }

    #[test]
    fn test_resolved_lookup_is_silent() {
        let catalog = Catalog::builtin().unwrap();
        let sink = RecordingSink::new();

        let (family, recipe) = catalog.resolve_reported("Box", &sink).unwrap();
        assert_eq!(family, FamilyTag::Meshes);
        assert_eq!(recipe.name, "Box");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_toml_catalog() {
        let doc = r#"
            [Lamp]
            name = "HemisphericLight"
            family = "lights"
            args = ["name", "direction", "scene"]
        "#;
        let catalog = Catalog::parse(doc, Format::Toml).unwrap();
        let lamp = catalog.get("Lamp").unwrap();
        assert!(lamp.mutable_props.is_empty());
        assert_eq!(catalog.len(), 1);
    }
}
