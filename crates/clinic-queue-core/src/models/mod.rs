//! Domain models for the clinic queue.

mod entry;
mod specialty;
mod view;

pub use entry::*;
pub use specialty::*;
pub use view::*;
