//! Transport module - serial link to the decision device

pub mod serial;

pub use serial::SerialTransport;
