#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod lance;
pub mod memory;

pub use lance::LanceStore;
pub use memory::MemoryStore;
