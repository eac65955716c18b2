pub mod event;
pub mod values;


pub use event::{HoneypotEvent, NewHoneypotEvent};
pub use values::{EventId, Timestamp};
