#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod document;
pub mod error;
pub mod profile;
pub mod role;
pub mod traits;
pub mod types;
