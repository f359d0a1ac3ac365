pub mod static_tokens;
pub mod storage;
