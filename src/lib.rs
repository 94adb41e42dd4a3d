#![doc = include_str!("../README.md")]

pub mod builder;
pub mod checksum;
pub mod error;
pub mod headers;
pub mod models;
pub mod pseudo_header;

pub use builder::*;
pub use checksum::*;
pub use error::*;
