//! Named numeric streams of a recorded session.
//!
//! A session is recorded as a set of flat, parallel numeric streams keyed by
//! field name. Position-like fields are stored flattened, one timestep after
//! another, so a stream holding `M` objects with two coordinates each has
//! `2 * M` elements per timestep. A stream may declare more elements than the
//! session has valid timesteps; readers truncate to the prefix they need.
//!
//! # Core Components
//!
//! * [`SessionRecord`] - The capability interface implemented by decoder backends
//! * [`StreamRef`] - A borrowed view of one stream
//! * [`Record`] - An in-memory record keyed by stream name
//! * [`get_field`], [`get_matrix`], [`get_int_matrix`] - Truncating and reshaping accessors
//! * [`timestep_count`], [`object_capacity`] - Derivation of `L` and `M`
//!
//! # Basic Usage
//!
//! ```rust
//! use rab_core::record::{get_field, Record, StreamValue};
//!
//! let mut record = Record::empty();
//! record.insert("CurrentBPScore", StreamValue::Int(vec![0, 0, 5]));
//! record.insert("ClawCartVelocity", StreamValue::Float(vec![0.1, 0.2, 0.3, 0.4]));
//!
//! let velocity = get_field(&record, "ClawCartVelocity", 3).unwrap();
//! assert_eq!(velocity, vec![0.1, 0.2, 0.3]);
//! ```
mod access;
mod base;

pub use access::{
    get_field, get_int_matrix, get_matrix, object_capacity, timestep_count, MAX_OBJECTS,
};
pub use base::{Record, SessionRecord, StreamRef, StreamValue};
