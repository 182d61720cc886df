mod arguments;
mod dependency;

pub use arguments::*;
pub use dependency::*;
