//! Wire format for handing batches to the print processor
//!
//! The processor reads its jobs from standard input as plain decimal lines:
//! the job count first, then four lines per job (id, pages, category,
//! priority). This crate encodes batches into that form, decodes it back, and
//! writes an encoded batch into a child's input stream.

pub mod error;
pub mod protocol;
pub mod transport;

pub use error::ProtocolError;
pub use protocol::{decode, encode, FIELDS_PER_JOB};
pub use transport::write_batch;
