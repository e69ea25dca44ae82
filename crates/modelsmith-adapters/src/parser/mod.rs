//! Model artifact parsers.

mod xmi;

pub use xmi::XmiParser;
