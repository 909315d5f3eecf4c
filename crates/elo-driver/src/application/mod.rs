//! Application layer use cases for the driver.
//!
//! # What use cases does the driver have?
//!
//! - **`forward_touch`** – Feeds serial bytes through the frame decoder and
//!   hands each decoded `TouchEvent` to a `TouchSink`.  The sink is injected
//!   at construction time, so the use case knows nothing about uinput.
//!
//! - **`run`** – The blocking read loop that pumps a `ByteSource` into the
//!   forward-touch use case until shutdown or a fatal transport error.

pub mod forward_touch;
pub mod run;
