//! Plain value types and the JSON helpers around them.
//!
//! Decoding attaches behavior by type: the caller picks which type the JSON
//! becomes, either statically through [`from_json`] or at run time through
//! [`ShapeKind::decode`], and the decoded value carries that type's methods.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Behavior shared by the decodable shapes.
pub trait Shape: fmt::Debug {
    fn name(&self) -> &'static str;
    /// Computed on every call, never cached.
    fn area(&self) -> f64;
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Rectangle {
    #[serde(serialize_with = "whole_number")]
    pub width: f64,
    #[serde(serialize_with = "whole_number")]
    pub height: f64,
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl Shape for Rectangle {
    fn name(&self) -> &'static str {
        "rectangle"
    }

    fn area(&self) -> f64 {
        Rectangle::area(self)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Circle {
    #[serde(serialize_with = "whole_number")]
    pub radius: f64,
}

impl Shape for Circle {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

/// Largest magnitude below which every integer is exactly representable.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Writes integral values without a fractional part, so a width of `10.0`
/// encodes as `10`.
fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Encodes any serializable value as compact JSON.
///
/// Field order follows the type's declaration; `serde_json::Value` objects
/// come out with sorted keys.
pub fn to_json<T>(value: &T) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value)
}

/// Decodes JSON text into `T`. Malformed text returns the decoder's error
/// unchanged.
pub fn from_json<T: DeserializeOwned>(json: &str) -> serde_json::Result<T> {
    serde_json::from_str(json)
}

/// Run-time choice of which shape a JSON document becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl ShapeKind {
    pub fn decode(self, json: &str) -> serde_json::Result<Box<dyn Shape>> {
        Ok(match self {
            ShapeKind::Rectangle => Box::new(from_json::<Rectangle>(json)?),
            ShapeKind::Circle => Box::new(from_json::<Circle>(json)?),
        })
    }
}

impl FromStr for ShapeKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(ShapeKind::Rectangle),
            "circle" => Ok(ShapeKind::Circle),
            _ => anyhow::bail!("Invalid shape kind: {}", s),
        }
    }
}
