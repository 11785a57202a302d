//! Properties

#![allow(dead_code)]

use crate::color::Color;
use crate::common::Float;
use crate::emission::ArcEmission;
use crate::film::Image;
use crate::geometry::{Point3f, Transform, Vector3f};
use crate::instance::ArcInstance;
use crate::medium::ArcMedium;
use crate::reflection::ArcBsdf;
use crate::shape::ArcShape;
use crate::texture::ArcTexture;
use std::collections::HashMap;
use std::sync::Arc;

/// A value attached to a named property. Object-valued properties carry
/// fully-constructed scene objects; the closed set of variants mirrors the
/// closed set of object kinds in the renderer.
#[derive(Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(Float),
    Vector(Vector3f),
    Color(Color),
    Str(String),
    Texture(ArcTexture),
    Transform(Arc<Transform>),
    Shape(ArcShape),
    Bsdf(ArcBsdf),
    Emission(ArcEmission),
    Medium(ArcMedium),
    Instance(ArcInstance),
    Image(Arc<Image>),
}

/// A string-keyed bag of typed properties used to construct scene objects.
/// Parsing a scene description into properties is an external concern; the
/// renderer itself only consumes fully-populated bags.
#[derive(Clone, Default)]
pub struct Properties {
    values: HashMap<String, Value>,
}

impl Properties {
    /// Creates an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under a name, replacing any previous value.
    ///
    /// * `name`  - The property name.
    /// * `value` - The value to store.
    pub fn insert(mut self, name: &str, value: Value) -> Self {
        self.values.insert(name.to_owned(), value);
        self
    }

    /// Reports whether a property exists.
    ///
    /// * `name` - The property name.
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    fn missing(&self, name: &str, kind: &str) -> String {
        format!("missing required {kind} property '{name}'")
    }

    /// Returns a boolean property or a default.
    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        match self.get(name) {
            Some(Value::Bool(v)) => *v,
            _ => default,
        }
    }

    /// Returns an integer property or a default.
    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        match self.get(name) {
            Some(Value::Int(v)) => *v,
            _ => default,
        }
    }

    /// Returns a float property or a default. Integer values are promoted.
    pub fn float_or(&self, name: &str, default: Float) -> Float {
        match self.get(name) {
            Some(Value::Float(v)) => *v,
            Some(Value::Int(v)) => *v as Float,
            _ => default,
        }
    }

    /// Returns a required float property.
    pub fn require_float(&self, name: &str) -> Result<Float, String> {
        match self.get(name) {
            Some(Value::Float(v)) => Ok(*v),
            Some(Value::Int(v)) => Ok(*v as Float),
            _ => Err(self.missing(name, "float")),
        }
    }

    /// Returns a vector property or a default.
    pub fn vector_or(&self, name: &str, default: Vector3f) -> Vector3f {
        match self.get(name) {
            Some(Value::Vector(v)) => *v,
            _ => default,
        }
    }

    /// Returns a required vector property.
    pub fn require_vector(&self, name: &str) -> Result<Vector3f, String> {
        match self.get(name) {
            Some(Value::Vector(v)) => Ok(*v),
            _ => Err(self.missing(name, "vector")),
        }
    }

    /// Returns a point property or a default.
    pub fn point_or(&self, name: &str, default: Point3f) -> Point3f {
        Point3f::from(self.vector_or(name, Vector3f::from(default)))
    }

    /// Returns a required point property.
    pub fn require_point(&self, name: &str) -> Result<Point3f, String> {
        self.require_vector(name).map(Point3f::from)
    }

    /// Returns a color property or a default.
    pub fn color_or(&self, name: &str, default: Color) -> Color {
        match self.get(name) {
            Some(Value::Color(v)) => *v,
            _ => default,
        }
    }

    /// Returns a required color property.
    pub fn require_color(&self, name: &str) -> Result<Color, String> {
        match self.get(name) {
            Some(Value::Color(v)) => Ok(*v),
            _ => Err(self.missing(name, "color")),
        }
    }

    /// Returns a string property or a default.
    pub fn string_or(&self, name: &str, default: &str) -> String {
        match self.get(name) {
            Some(Value::Str(v)) => v.clone(),
            _ => default.to_owned(),
        }
    }

    /// Resolves a named enumeration property against a closed variant list.
    /// Unknown variant names are construction errors.
    ///
    /// * `name`     - The property name.
    /// * `default`  - The value used when the property is absent.
    /// * `variants` - The accepted (name, value) pairs.
    pub fn enumeration<T: Copy>(
        &self,
        name: &str,
        default: T,
        variants: &[(&str, T)],
    ) -> Result<T, String> {
        match self.get(name) {
            None => Ok(default),
            Some(Value::Str(s)) => variants
                .iter()
                .find(|(n, _)| n == s)
                .map(|(_, v)| *v)
                .ok_or_else(|| format!("unknown variant '{s}' for property '{name}'")),
            Some(_) => Err(format!("property '{name}' is not an enumeration")),
        }
    }

    /// Returns a required texture child.
    pub fn require_texture(&self, name: &str) -> Result<ArcTexture, String> {
        match self.get(name) {
            Some(Value::Texture(v)) => Ok(v.clone()),
            _ => Err(self.missing(name, "texture")),
        }
    }

    /// Returns an optional texture child.
    pub fn optional_texture(&self, name: &str) -> Option<ArcTexture> {
        match self.get(name) {
            Some(Value::Texture(v)) => Some(v.clone()),
            _ => None,
        }
    }

    /// Returns an optional transform child.
    pub fn optional_transform(&self, name: &str) -> Option<Arc<Transform>> {
        match self.get(name) {
            Some(Value::Transform(v)) => Some(v.clone()),
            _ => None,
        }
    }

    /// Returns a required shape child.
    pub fn require_shape(&self, name: &str) -> Result<ArcShape, String> {
        match self.get(name) {
            Some(Value::Shape(v)) => Ok(v.clone()),
            _ => Err(self.missing(name, "shape")),
        }
    }

    /// Returns an optional BSDF child.
    pub fn optional_bsdf(&self, name: &str) -> Option<ArcBsdf> {
        match self.get(name) {
            Some(Value::Bsdf(v)) => Some(v.clone()),
            _ => None,
        }
    }

    /// Returns an optional emission child.
    pub fn optional_emission(&self, name: &str) -> Option<ArcEmission> {
        match self.get(name) {
            Some(Value::Emission(v)) => Some(v.clone()),
            _ => None,
        }
    }

    /// Returns an optional medium child.
    pub fn optional_medium(&self, name: &str) -> Option<ArcMedium> {
        match self.get(name) {
            Some(Value::Medium(v)) => Some(v.clone()),
            _ => None,
        }
    }

    /// Returns a required instance child.
    pub fn require_instance(&self, name: &str) -> Result<ArcInstance, String> {
        match self.get(name) {
            Some(Value::Instance(v)) => Ok(v.clone()),
            _ => Err(self.missing(name, "instance")),
        }
    }

    /// Returns a required image child.
    pub fn require_image(&self, name: &str) -> Result<Arc<Image>, String> {
        match self.get(name) {
            Some(Value::Image(v)) => Ok(v.clone()),
            _ => Err(self.missing(name, "image")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_property_is_an_error() {
        let props = Properties::new();
        assert!(props.require_float("fov").is_err());
    }

    #[test]
    fn defaults_and_overrides() {
        let props = Properties::new()
            .insert("depth", Value::Int(4))
            .insert("remap", Value::Bool(false));
        assert_eq!(props.int_or("depth", 2), 4);
        assert_eq!(props.float_or("depth", 2.0), 4.0);
        assert!(!props.bool_or("remap", true));
        assert!(props.bool_or("smooth", true));
    }

    #[test]
    fn unknown_enum_variant_is_an_error() {
        let props = Properties::new().insert("border", Value::Str("mirror".into()));
        let result = props.enumeration("border", 0, &[("clamp", 0), ("repeat", 1)]);
        assert!(result.is_err());
    }
}
