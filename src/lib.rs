//! Constructor-driven dependency injection.
//!
//! A [`Cronos`] container is given a set of constructors: plain functions
//! whose return type is the component they produce and whose parameters are
//! the components they need. When a root function is run through
//! [`Cronos::init`], every parameter is resolved by building its
//! dependencies first, recursively, so the caller never sequences
//! construction by hand. Registration order does not matter.
//!
//! By default, components are held in [`Arc<T>`](std::sync::Arc) pointers.
//! This can be changed to [`Rc<T>`](std::rc::Rc) by disabling default
//! features and enabling the "rc" feature:
//!
//! ```text
//! [dependencies.cronos]
//! version = "*"
//! default-features = false
//! features = ["rc"]
//! ```
//!
//! # Component lifetimes
//!
//! Every component is a singleton unless told otherwise: it is built on the
//! first request and the same instance is supplied to every later request.
//! Registering a constructor with [`singleton(false)`](singleton) rebuilds
//! the component each time it is requested instead.
//!
//! # Interfaces
//!
//! A constructor can ask for a trait object, `Svc<dyn Trait>`, rather than a
//! concrete type. The trait is declared as an interface with [`interface!`],
//! and a concrete component is bound to it with [`bind_as`]. A specific
//! constructor can be handed a different implementation with [`qualifier`].
//!
//! # Fallible constructors
//!
//! Constructors that return [`Result<T, E>`] are registered through
//! [`IntoFallible::fallible`]. If one fails, the whole resolution fails with
//! [`CronosError::ConstructionFailed`] and nothing in the failing branch is
//! cached.
//!
//! # Example
//!
//! ```
//! use cronos::{bind_as, interface, qualifier, Cronos, Service, Svc};
//!
//! trait Observable: Service {
//!     fn observe(&self) -> &'static str;
//! }
//!
//! #[derive(Default)]
//! struct Observer;
//! impl Observable for Observer {
//!     fn observe(&self) -> &'static str { "observer" }
//! }
//!
//! #[derive(Default)]
//! struct Visualizer;
//! impl Observable for Visualizer {
//!     fn observe(&self) -> &'static str { "visualizer" }
//! }
//!
//! interface!(Observable = [Observer, Visualizer]);
//!
//! struct Subject(Svc<dyn Observable>);
//! struct Person(Svc<dyn Observable>);
//!
//! let mut cronos = Cronos::new();
//! cronos.register(Subject).unwrap();
//! cronos.register_with(Observer::default, [bind_as::<dyn Observable>()]).unwrap();
//! cronos.register(Visualizer::default).unwrap();
//! cronos.register_with(Person, [qualifier::<Visualizer, dyn Observable>()]).unwrap();
//!
//! cronos
//!     .init(|person: Svc<Person>, subject: Svc<Subject>| {
//!         assert_eq!("observer", subject.0.observe());
//!         assert_eq!("visualizer", person.0.observe());
//!     })
//!     .unwrap();
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![warn(missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::needless_pass_by_value,
    clippy::needless_doctest_main
)]

#[cfg(not(any(feature = "arc", feature = "rc")))]
compile_error!(
    "Either the 'arc' or 'rc' feature must be enabled (but not both)."
);

#[cfg(all(feature = "arc", feature = "rc"))]
compile_error!(
    "The 'arc' and 'rc' features are mutually exclusive and cannot be enabled together."
);

mod constructors;
mod cronos;
mod error;
mod interface;
mod key;
mod options;
mod requests;

pub use constructors::*;
pub use cronos::*;
pub use error::*;
pub use interface::*;
pub use key::*;
pub use options::*;
pub use requests::*;
