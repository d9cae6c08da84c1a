#![allow(dead_code)]


pub use fixtures::*;
pub use test_server::*;
