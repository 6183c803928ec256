//! Infrastructure layer - storage and the external auth backend client

pub mod backend;
pub mod storage;
