//! I/O module
//!
//! Handles the on-disk record representation.
//!
//! # Components
//!
//! - `record_format` - Fixed-width binary record codec (pure, no I/O)

pub mod record_format;

pub use record_format::{decode_record, encode_record, truncate_name, RECORD_LEN};
