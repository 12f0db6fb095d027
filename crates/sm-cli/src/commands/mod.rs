//! CLI command implementations

pub(crate) mod common;
pub(crate) mod down;
pub(crate) mod schema;
pub(crate) mod show;
pub(crate) mod up;
