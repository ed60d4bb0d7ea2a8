#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod intent;
pub mod traits;
pub mod types;
