//! Declarative property bags
//!
//! Every node in the declarative tree carries a [`Props`] bag. Values are a
//! closed variant type; the adapter never reflects over object model types.

use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::collections::{CanvasHandle, EngineHandle, ObjectHandle, SceneHandle};
use crate::foundation::math::Vec3;

/// A single declarative property value
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Boolean flag
    Bool(bool),
    /// Scalar number
    Number(f32),
    /// String value (names, symbolic directions, target names)
    Text(String),
    /// 3D vector
    Vector(Vec3),
    /// RGB color, components in `0.0..=1.0`
    Color([f32; 3]),
    /// Reference to another object in the object model
    Object(ObjectHandle),
    /// Scene handle (injected by factories)
    Scene(SceneHandle),
    /// Canvas handle (injected by factories)
    Canvas(CanvasHandle),
    /// Engine handle (injected by factories)
    Engine(EngineHandle),
    /// Ordered list of values
    List(Vec<PropValue>),
}

impl PropValue {
    /// Numeric value, if this is a number
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String slice, if this is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Vector value, if this is a vector
    pub fn as_vector(&self) -> Option<Vec3> {
        match self {
            Self::Vector(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Vector(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Self::Color([r, g, b]) => write!(f, "rgb({r}, {g}, {b})"),
            Self::Object(handle) => write!(f, "object {handle:?}"),
            Self::Scene(handle) => write!(f, "scene {handle:?}"),
            Self::Canvas(handle) => write!(f, "canvas {}", handle.0),
            Self::Engine(handle) => write!(f, "engine {}", handle.0),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<f64> for PropValue {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: f64) -> Self {
        Self::Number(value as f32)
    }
}

impl From<i32> for PropValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i32) -> Self {
        Self::Number(value as f32)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec3> for PropValue {
    fn from(value: Vec3) -> Self {
        Self::Vector(value)
    }
}

impl From<ObjectHandle> for PropValue {
    fn from(value: ObjectHandle) -> Self {
        Self::Object(value)
    }
}

/// Ordered bag of declarative properties
///
/// Ordering is by key, so iteration (and therefore assignment order) is
/// deterministic across commits. Equality is structural.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    values: BTreeMap<String, PropValue>,
}

impl Props {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a property
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropValue>,
    ) -> Option<PropValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Remove a property, returning it
    pub fn take(&mut self, key: &str) -> Option<PropValue> {
        self.values.remove(key)
    }

    /// Remove a numeric property; missing or non-numeric values yield `default`
    pub fn take_number_or(&mut self, key: &str, default: f32) -> f32 {
        self.take(key)
            .and_then(|value| value.as_number())
            .unwrap_or(default)
    }

    /// Remove a text property, if it is text
    pub fn take_text(&mut self, key: &str) -> Option<String> {
        match self.take(key) {
            Some(PropValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Get a property by key
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.values.get(key)
    }

    /// Whether the bag has a property with this key
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate properties in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl IntoIterator for Props {
    type Item = (String, PropValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Build a [`Props`] bag from `key => value` pairs
///
/// ```
/// use scene_adapter::props;
///
/// let bag = props! { "name" => "box", "x" => 1.0_f32 };
/// assert_eq!(bag.len(), 2);
/// ```
#[macro_export]
macro_rules! props {
    () => { $crate::props::Props::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::props::Props::new()$(.with($key, $value))+
    };
}
