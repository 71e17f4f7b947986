pub mod clock;
pub mod persistence;
pub mod random;
pub mod storage;
