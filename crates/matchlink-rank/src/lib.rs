#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod pipeline;
pub mod trace;

pub use pipeline::{Matchmaker, DEFAULT_COLLECTION};
pub use trace::{JsonlTraceSink, MemoryTraceSink};
