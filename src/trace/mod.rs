mod event;
mod observer;

pub use event::*;
pub use observer::*;
