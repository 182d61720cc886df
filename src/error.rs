#![allow(clippy::used_underscore_binding)]

use crate::TypeKey;
use derive_more::{Display, Error};
use std::{
    error::Error,
    fmt::{Display as FmtDisplay, Formatter},
};

/// A constructor was rejected by [`Cronos::register`](crate::Cronos::register).
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegisterError {
    /// The constructor produces `()`, so there is nothing to bind.
    #[display(fmt = "constructor does not produce a component")]
    NoOutput,

    /// The constructor produces several values at once.
    #[display(
        fmt = "constructor produces multiple values ({}); return a single component instead",
        "output.name()"
    )]
    TupleOutput {
        /// The output type of the constructor.
        #[error(not(source))]
        output: TypeKey,
    },

    /// The constructor returns a `Result` but was not wrapped with
    /// [`IntoFallible::fallible`](crate::IntoFallible::fallible).
    #[display(
        fmt = "constructor returns {} without being marked fallible",
        "output.name()"
    )]
    UnwrappedResult {
        /// The output type of the constructor.
        #[error(not(source))]
        output: TypeKey,
    },
}

/// An error that has occurred while resolving a component.
#[derive(Debug)]
#[non_exhaustive]
pub enum CronosError {
    /// No constructor is registered for the requested type.
    MissingBinding {
        /// The type that was requested.
        type_key: TypeKey,
    },

    /// No constructor is registered for a parameter of a constructor.
    MissingDependency {
        /// The type whose constructor declared the parameter.
        type_key: TypeKey,

        /// The parameter type that has no constructor.
        dependency: TypeKey,
    },

    /// A component was requested again while it was still being built.
    CycleDetected {
        /// The type that was requested.
        type_key: TypeKey,

        /// The chain of types that led back to the requested type.
        cycle: Vec<TypeKey>,
    },

    /// A component was bound to an interface it does not implement.
    InvalidImplementation {
        /// The interface that was targeted.
        interface: TypeKey,

        /// The type of the component that was bound.
        implementation: TypeKey,
    },

    /// The stored component does not have the requested type.
    InvalidComponent {
        /// The type that was requested.
        type_key: TypeKey,
    },

    /// A fallible constructor returned an error.
    ConstructionFailed {
        /// The type the constructor produces.
        type_key: TypeKey,

        /// The error returned by the constructor.
        inner: Box<dyn Error + 'static>,
    },
}

impl Error for CronosError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CronosError::ConstructionFailed { inner, .. } => Some(inner.as_ref()),
            _ => None,
        }
    }
}

impl FmtDisplay for CronosError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to resolve component: ")?;
        match self {
            CronosError::MissingBinding { type_key } => {
                write!(f, "no constructor registered for {type_key}")
            }
            CronosError::MissingDependency {
                type_key,
                dependency,
            } => write!(
                f,
                "no constructor registered for {dependency} (required by {type_key})"
            ),
            CronosError::CycleDetected { type_key, cycle } => write!(
                f,
                "a cycle was detected while building {type_key} [{}]",
                fmt_cycle(cycle)
            ),
            CronosError::InvalidImplementation {
                interface,
                implementation,
            } => write!(
                f,
                "{implementation} is not declared as an implementer of {interface}"
            ),
            CronosError::InvalidComponent { type_key } => write!(
                f,
                "the component stored for {type_key} has the wrong type"
            ),
            CronosError::ConstructionFailed { type_key, inner } => {
                write!(f, "the constructor for {type_key} failed: {inner}")
            }
        }
    }
}

fn fmt_cycle(cycle: &[TypeKey]) -> String {
    let mut joined = String::new();
    for item in cycle.iter().rev() {
        if !joined.is_empty() {
            joined.push_str(" -> ");
        }
        joined.push_str(item.name());
    }
    joined
}
