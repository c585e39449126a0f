mod optimize_chunks_driver;
pub use optimize_chunks_driver::*;
