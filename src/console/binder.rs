//! Turns typed Rust functions and variables into text commands.
//!
//! The binder checks at bind time that every parameter type has a converter
//! in the [`TypeRegistry`]. At call time the produced command tokenizes its
//! parameter string, insists on exactly one token per parameter, converts
//! each token and only then calls the target. Nothing is partially bound.
//!
//! ```
//! use std::sync::Arc;
//! use devconsole::console::{Binder, TypeRegistry};
//!
//! let registry = Arc::new(TypeRegistry::new());
//! let bound = Binder::function(&registry, |(count, scale): (i32, f32)| {
//!     Ok(format!("{}", count as f32 * scale))
//! })
//! .unwrap();
//!
//! assert_eq!(bound.signature(), "Expects i32, f32");
//! ```

use std::{
    any::{Any, TypeId},
    fmt::Display,
    sync::Arc,
};

use super::{
    Command, CommandResult, ConsoleError, Invocation,
    convert::{TypeRegistry, short_type_name},
    tokenizer::tokenize,
};

/// Type information for one declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
    /// Identifier used to look the converter up
    pub type_id: TypeId,
    /// Short type name used in help and error text
    pub type_name: &'static str,
}

impl ParamInfo {
    /// Describes the parameter type `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: short_type_name::<T>(),
        }
    }
}

/// A tuple of parameter types that can be built from text tokens.
///
/// Implemented for tuples of up to four elements, including `()`.
pub trait ParamList: Sized + 'static {
    /// Number of parameters in the list.
    const COUNT: usize;

    /// Declared parameter types, in order.
    fn params() -> Vec<ParamInfo>;

    /// Converts one token per parameter.
    ///
    /// # Errors
    ///
    /// * `ConsoleError::ArgumentCountMismatch` - token count differs from [`Self::COUNT`]
    /// * `ConsoleError::ConversionFailed` - a token could not be converted
    /// * `ConsoleError::UnsupportedType` - a converter was removed from the registry
    fn from_tokens(registry: &TypeRegistry, tokens: &[String]) -> Result<Self, ConsoleError>;
}

macro_rules! impl_param_list {
    ($($name:ident => $index:tt),*) => {
        impl<$($name: Any),*> ParamList for ($($name,)*) {
            const COUNT: usize = <[&str]>::len(&[$(stringify!($name)),*]);

            fn params() -> Vec<ParamInfo> {
                vec![$(ParamInfo::of::<$name>()),*]
            }

            #[allow(unused_variables)]
            fn from_tokens(
                registry: &TypeRegistry,
                tokens: &[String],
            ) -> Result<Self, ConsoleError> {
                if tokens.len() != Self::COUNT {
                    return Err(ConsoleError::ArgumentCountMismatch {
                        expected: Self::COUNT,
                        got: tokens.len(),
                    });
                }

                Ok(($(registry.convert::<$name>(&tokens[$index])?,)*))
            }
        }
    };
}

impl_param_list!();
impl_param_list!(A => 0);
impl_param_list!(A => 0, B => 1);
impl_param_list!(A => 0, B => 1, C => 2);
impl_param_list!(A => 0, B => 1, C => 2, D => 3);

type TextCallback = Box<dyn Fn(&str) -> CommandResult + Send + Sync>;

/// A text command produced by the [`Binder`].
pub struct BoundCommand {
    signature: String,
    callback: TextCallback,
}

impl BoundCommand {
    /// Generated help text describing the expected parameters.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Runs the command against a raw parameter string.
    ///
    /// # Errors
    ///
    /// Returns the binding error or whatever the target function returned.
    pub fn call(&self, params: &str) -> CommandResult {
        (self.callback)(params)
    }
}

impl Command for BoundCommand {
    fn execute(&self, invocation: &Invocation<'_>) -> CommandResult {
        self.call(invocation.params())
    }
}

/// Builds text commands out of typed functions and variables.
pub struct Binder;

impl Binder {
    /// Wraps `function` so it can be called with a parameter string.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::UnsupportedType` naming the first parameter
    /// type that has no converter in `registry`.
    pub fn function<P, F>(
        registry: &Arc<TypeRegistry>,
        function: F,
    ) -> Result<BoundCommand, ConsoleError>
    where
        P: ParamList,
        F: Fn(P) -> CommandResult + Send + Sync + 'static,
    {
        let params = P::params();
        Self::ensure_supported(registry, &params)?;

        let registry = Arc::clone(registry);
        let callback = move |input: &str| -> CommandResult {
            let tokens = tokenize(input);
            let args = P::from_tokens(&registry, &tokens)?;
            function(args)
        };

        Ok(BoundCommand {
            signature: Self::describe(&params),
            callback: Box::new(callback),
        })
    }

    /// Wraps a getter/setter pair as a single command.
    ///
    /// An empty parameter string reads the value and renders it as
    /// `=<value>`. Anything else is converted to `T` as a whole, passed to
    /// `setter`, and the value read back is rendered the same way.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::UnsupportedType` when `T` has no converter.
    pub fn variable<T, G, S>(
        registry: &Arc<TypeRegistry>,
        name: &str,
        getter: G,
        setter: S,
    ) -> Result<BoundCommand, ConsoleError>
    where
        T: Any + Display,
        G: Fn() -> T + Send + Sync + 'static,
        S: Fn(T) + Send + Sync + 'static,
    {
        Self::accessor(registry, name, getter, Some(Box::new(setter)))
    }

    /// Like [`Binder::variable`] but every attempt to set reports
    /// `ConsoleError::ReadOnly`.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::UnsupportedType` when `T` has no converter.
    pub fn read_only<T, G>(
        registry: &Arc<TypeRegistry>,
        name: &str,
        getter: G,
    ) -> Result<BoundCommand, ConsoleError>
    where
        T: Any + Display,
        G: Fn() -> T + Send + Sync + 'static,
    {
        Self::accessor(registry, name, getter, None)
    }

    fn accessor<T, G>(
        registry: &Arc<TypeRegistry>,
        name: &str,
        getter: G,
        setter: Option<Box<dyn Fn(T) + Send + Sync>>,
    ) -> Result<BoundCommand, ConsoleError>
    where
        T: Any + Display,
        G: Fn() -> T + Send + Sync + 'static,
    {
        let param = ParamInfo::of::<T>();
        Self::ensure_supported(registry, &[param])?;

        let registry = Arc::clone(registry);
        let name = name.to_string();
        let callback = move |input: &str| -> CommandResult {
            if input.is_empty() {
                return Ok(format!("={}", getter()));
            }

            let setter = setter.as_ref().ok_or_else(|| ConsoleError::ReadOnly {
                name: name.clone(),
            })?;
            setter(registry.convert::<T>(input)?);

            Ok(format!("={}", getter()))
        };

        Ok(BoundCommand {
            signature: Self::describe(&[param]),
            callback: Box::new(callback),
        })
    }

    fn ensure_supported(registry: &TypeRegistry, params: &[ParamInfo]) -> Result<(), ConsoleError> {
        match params
            .iter()
            .find(|param| !registry.supports_id(param.type_id))
        {
            Some(unsupported) => Err(ConsoleError::UnsupportedType {
                type_name: unsupported.type_name.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn describe(params: &[ParamInfo]) -> String {
        if params.is_empty() {
            return "Expects no parameters".to_string();
        }

        let names: Vec<&str> = params.iter().map(|param| param.type_name).collect();
        format!("Expects {}", names.join(", "))
    }
}
