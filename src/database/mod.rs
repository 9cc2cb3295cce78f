//! Engine Module
//!
//! # Module Structure
//! - `core`: Engine struct, open/in_memory, namespace selection
//! - `table`: Table management (define/drop/exists/list/show)
//! - `crud`: Row insertion and query execution

pub mod core;
pub mod crud;
pub mod table;

pub use self::core::Engine;
