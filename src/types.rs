//! Shapes produced by the IDL code generator.
//!
//! A generated service module implements [`ThriftModule`], every method gets an
//! `<method>_args` container implementing [`ThriftArgs`] and, unless the method is
//! one-way, a `<method>_result` container implementing [`ResultUnion`].

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{collections::BTreeMap, error::Error, fmt};

/// The error type handlers throw. Downcasting recovers the original type.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Application-level headers.
pub type Headers = BTreeMap<String, String>;

/// The success type of a result union.
pub type Success<R> = <R as ResultUnion>::Success;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    #[default]
    Ok,
    Error,
}

impl StatusCode {
    fn name(&self) -> &'static str {
        use StatusCode::*;
        match self {
            Ok => "ok",
            Error => "error",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The exception type a result-union field stands for.
#[derive(Clone, Copy)]
pub struct ExceptionType {
    name: &'static str,
    matches: fn(&(dyn Error + 'static)) -> bool,
}

fn is_instance<E: Error + 'static>(error: &(dyn Error + 'static)) -> bool {
    error.is::<E>()
}

impl ExceptionType {
    /// Matches errors whose runtime type is exactly `E`.
    pub const fn of<E: Error + 'static>(name: &'static str) -> Self {
        Self {
            name,
            matches: is_instance::<E>,
        }
    }

    /// Matches whatever `matches` accepts, e.g. every member of an exception family.
    pub const fn new(name: &'static str, matches: fn(&(dyn Error + 'static)) -> bool) -> Self {
        Self { name, matches }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, error: &(dyn Error + 'static)) -> bool {
        (self.matches)(error)
    }
}

impl fmt::Debug for ExceptionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ExceptionType").field(&self.name).finish()
    }
}

/// One entry of a result union's field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub id: i16,
    pub name: &'static str,
    pub exception: Option<ExceptionType>,
}

impl FieldSpec {
    pub const fn success(name: &'static str) -> Self {
        Self {
            id: 0,
            name,
            exception: None,
        }
    }

    pub const fn exception(id: i16, name: &'static str, exception: ExceptionType) -> Self {
        Self {
            id,
            name,
            exception: Some(exception),
        }
    }
}

/// Argument container of a method (`<method>_args`).
pub trait ThriftArgs: Serialize + DeserializeOwned + Send + 'static {
    const NAME: &'static str;
}

/// Result container of a non-one-way method (`<method>_result`).
///
/// `SPEC[0]` describes the success field and is `None` for void methods. The
/// remaining slots describe the declared exceptions in IDL order; gaps are `None`.
/// At most one field of a container is ever set.
pub trait ResultUnion: Default + Serialize + DeserializeOwned + Send + 'static {
    const NAME: &'static str;
    const SPEC: &'static [Option<FieldSpec>];

    type Success: Send + 'static;

    fn set_success(&mut self, value: Self::Success);

    /// Stores `error` in field `id`. Hands the error back if it does not fit the field.
    fn set_exception(&mut self, id: i16, error: BoxError) -> Result<(), BoxError>;
}

/// A method as declared on the service interface.
#[derive(Debug, Clone, Copy)]
pub struct MethodSpec {
    pub name: &'static str,
    pub args: &'static str,
    /// `None` for one-way methods.
    pub result: Option<&'static str>,
}

impl MethodSpec {
    pub const fn new(name: &'static str, args: &'static str, result: &'static str) -> Self {
        Self {
            name,
            args,
            result: Some(result),
        }
    }

    pub const fn oneway(name: &'static str, args: &'static str) -> Self {
        Self {
            name,
            args,
            result: None,
        }
    }

    pub fn is_oneway(&self) -> bool {
        self.result.is_none()
    }
}

/// A generated service module.
pub trait ThriftModule {
    /// Module path, e.g. `module_path!()` of the generated module.
    const PATH: &'static str;
    const METHODS: &'static [MethodSpec];

    /// The trailing segment of [`Self::PATH`].
    fn service_name(&self) -> &'static str {
        Self::PATH.rsplit("::").next().unwrap_or(Self::PATH)
    }

    fn method(&self, name: &str) -> Option<&'static MethodSpec> {
        Self::METHODS.iter().find(|m| m.name == name)
    }
}
