pub mod storage;
pub mod token;
