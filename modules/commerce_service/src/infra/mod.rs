pub mod payments;
pub mod storage;
