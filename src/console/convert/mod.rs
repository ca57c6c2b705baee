//! Registry of string to typed value converters.
//!
//! Each supported type is keyed by its [`TypeId`]. Converting a token looks
//! the converter up, runs it, and turns every kind of failure, including a
//! panicking converter, into a [`ConsoleError`].

mod vector;

pub use vector::{Vec2, Vec3, Vec4, VectorParseError, numbers_in};

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt::Display,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, PoisonError, RwLock},
};

use tracing::debug;

use super::ConsoleError;

type ParseFn = dyn Fn(&str) -> Result<Box<dyn Any + Send>, String> + Send + Sync;

#[derive(Clone)]
struct ConverterEntry {
    type_name: &'static str,
    parse: Arc<ParseFn>,
}

/// Maps types to the functions that parse them out of text tokens.
///
/// The registry is shared between the console and every command bound
/// through it, so it uses interior locking: converters registered at
/// runtime are immediately visible to commands bound earlier. Registering a
/// type twice replaces the first converter.
pub struct TypeRegistry {
    converters: RwLock<HashMap<TypeId, ConverterEntry>>,
}

impl TypeRegistry {
    /// Creates a registry with the built-in converters.
    ///
    /// Supported out of the box: `i32`, `i64`, `f32`, `f64`, `String`,
    /// `bool`, [`Vec2`], [`Vec3`] and [`Vec4`].
    pub fn new() -> Self {
        let registry = Self::empty();

        registry.register(|s: &str| s.trim().parse::<i32>());
        registry.register(|s: &str| s.trim().parse::<i64>());
        registry.register(|s: &str| s.trim().parse::<f32>());
        registry.register(|s: &str| s.trim().parse::<f64>());
        registry.register(|s: &str| Ok::<_, std::convert::Infallible>(s.to_string()));
        registry.register(parse_bool);
        registry.register(|s: &str| s.parse::<Vec2>());
        registry.register(|s: &str| s.parse::<Vec3>());
        registry.register(|s: &str| s.parse::<Vec4>());

        registry
    }

    /// Creates a registry with no converters at all.
    pub fn empty() -> Self {
        Self {
            converters: RwLock::new(HashMap::new()),
        }
    }

    /// Registers the converter for `T`, replacing any earlier one.
    pub fn register<T, E, F>(&self, parse: F)
    where
        T: Any + Send,
        E: Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let entry = ConverterEntry {
            type_name: short_type_name::<T>(),
            parse: Arc::new(move |s: &str| {
                parse(s)
                    .map(|value| Box::new(value) as Box<dyn Any + Send>)
                    .map_err(|e| e.to_string())
            }),
        };

        debug!(type_name = entry.type_name, "Registering converter");

        self.converters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), entry);
    }

    /// Whether a converter exists for `T`.
    pub fn supports<T: Any>(&self) -> bool {
        self.supports_id(TypeId::of::<T>())
    }

    /// Whether a converter exists for the type with the given id.
    pub fn supports_id(&self, type_id: TypeId) -> bool {
        self.converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&type_id)
    }

    /// Converts `token` into a `T`.
    ///
    /// # Errors
    ///
    /// * `ConsoleError::UnsupportedType` - no converter is registered for `T`
    /// * `ConsoleError::ConversionFailed` - the converter rejected the token or panicked
    pub fn convert<T: Any>(&self, token: &str) -> Result<T, ConsoleError> {
        let entry = self
            .converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| ConsoleError::UnsupportedType {
                type_name: short_type_name::<T>().to_string(),
            })?;

        let failed = || ConsoleError::ConversionFailed {
            type_name: entry.type_name.to_string(),
            token: token.to_string(),
        };

        let parsed = match panic::catch_unwind(AssertUnwindSafe(|| (entry.parse)(token))) {
            Ok(Ok(value)) => value,
            Ok(Err(reason)) => {
                debug!(type_name = entry.type_name, token, %reason, "Conversion rejected");
                return Err(failed());
            }
            Err(_) => {
                debug!(type_name = entry.type_name, token, "Converter panicked");
                return Err(failed());
            }
        };

        parsed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| failed())
    }

    /// Names of all supported types, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|entry| entry.type_name)
            .collect();
        names.sort_unstable();
        names
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Last path segment of the type's name, e.g. `Vec3` rather than
/// `devconsole::console::convert::vector::Vec3`.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(pos) if base.len() == full.len() => &full[pos + 2..],
        _ => full,
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if s.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("'{s}' is not true or false"))
    }
}
