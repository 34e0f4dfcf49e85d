pub mod constants;
pub mod fees;
mod push_bytes;

pub use push_bytes::bytes_to_push_bytes;
