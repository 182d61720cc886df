mod binding;
mod constructor;
mod fallible;
mod validate;

pub(crate) use binding::*;
pub use constructor::*;
pub use fallible::*;
pub(crate) use validate::*;
