#![warn(missing_docs)]
//! Protobuf backend for [`rab_core`].
//!
//! Session logs are exported by the game as a base64-encoded
//! [`ProtoGameDetail`] protobuf message. This crate decodes them and exposes
//! the message as a [`SessionRecord`](rab_core::SessionRecord), so that
//! [`DatasetAssembler`](rab_core::DatasetAssembler) can convert it into a
//! [`TrajectoryDataset`](rab_core::TrajectoryDataset).
//!
//! # Example
//!
//! ```no_run
//! # use anyhow::Result;
//! use rab_core::DatasetConfig;
//! use rab_proto::load_dataset;
//!
//! fn main() -> Result<()> {
//!     let dataset = load_dataset("session.b64", &DatasetConfig::default())?;
//!     dataset.log_stats();
//!     Ok(())
//! }
//! ```
mod decode;
mod message;

pub use decode::{
    decode_base64, decode_bytes, decode_file, decode_file_with, encode_base64, encode_file,
    load_dataset,
};
pub use message::ProtoGameDetail;
