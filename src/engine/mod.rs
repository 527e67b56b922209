mod color;
pub use color::*;

mod anchor;
pub use anchor::*;

mod registry;
pub use registry::*;

mod persist;
pub use persist::*;

mod stroke;
pub use stroke::*;
