use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

/// Optionally signed number with an optional decimal part.
#[allow(clippy::expect_used)]
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?(?:\d*\.)?\d+").expect("number pattern is a valid regex"));

/// Failure to read a fixed-size vector out of a token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected} numbers, found {found}")]
pub struct VectorParseError {
    /// Component count of the target vector
    pub expected: usize,
    /// Numbers found in the token
    pub found: usize,
}

/// Pulls every number out of `text`, ignoring whatever surrounds them.
///
/// `"(1, -2.5, .5)"` yields `[1.0, -2.5, 0.5]`.
pub fn numbers_in(text: &str) -> Vec<f32> {
    NUMBER_PATTERN
        .find_iter(text)
        .filter_map(|found| found.as_str().parse().ok())
        .collect()
}

fn exact_components<const N: usize>(text: &str) -> Result<[f32; N], VectorParseError> {
    let numbers = numbers_in(text);

    numbers.try_into().map_err(|numbers: Vec<f32>| VectorParseError {
        expected: N,
        found: numbers.len(),
    })
}

/// Two component float vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

/// Three component float vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

/// Four component float vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec4 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Vec2 {
    /// Creates a vector from its components.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Vec3 {
    /// Creates a vector from its components.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Vec4 {
    /// Creates a vector from its components.
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl FromStr for Vec2 {
    type Err = VectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x, y] = exact_components(s)?;
        Ok(Self { x, y })
    }
}

impl FromStr for Vec3 {
    type Err = VectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x, y, z] = exact_components(s)?;
        Ok(Self { x, y, z })
    }
}

impl FromStr for Vec4 {
    type Err = VectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x, y, z, w] = exact_components(s)?;
        Ok(Self { x, y, z, w })
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}
