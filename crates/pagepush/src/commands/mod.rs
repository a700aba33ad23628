//! CLI command implementations.

pub(crate) mod write;

pub(crate) use write::WriteArgs;
