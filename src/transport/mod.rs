/// Streaming file transport for contribution records.
pub mod fs;
