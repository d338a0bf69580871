//! Byte buffer primitives for json-grain.
//!
//! The encode path of json-grain writes JSON text directly into a [`Writer`]
//! without building an intermediate value tree; this crate holds that writer.

mod writer;

pub use writer::Writer;
