//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod fields;

pub(crate) use build::BuildArgs;
pub(crate) use fields::FieldsArgs;
