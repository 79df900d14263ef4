pub mod debounce;
pub mod generation;
pub mod storage;
pub mod time;
