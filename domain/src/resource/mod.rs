//! Resource catalog entries.

pub mod entities;
