#![warn(missing_docs)]
//! Conversion of recorded game sessions into reinforcement learning trajectories.
//!
//! A session log holds parallel flat numeric streams: object and claw
//! positions, rotations, flags, scores and one-hot player controls. This crate
//! turns them into a [`TrajectoryDataset`]:
//!
//! * an `(L, F)` observation matrix built from the configured fields,
//! * an `(L, 1)` matrix of discrete actions ([`action`]),
//! * sparse rewards from the running score ([`reward`]),
//! * episode boundaries from the episode score ([`segmenter`]).
//!
//! The streams are read through the [`SessionRecord`] trait, so the crate does
//! not depend on the format the session was stored in. `rab-proto` provides
//! the protobuf backend.
//!
//! # Example
//!
//! ```rust
//! use rab_core::{record::{Record, StreamValue}, DatasetAssembler, DatasetConfig};
//!
//! let record = Record::from_slice(&[
//!     ("BlockCount", StreamValue::Int(vec![1, 1])),
//!     ("BlocksPosition", StreamValue::Float(vec![0.0, 1.0, 0.0, 2.0])),
//!     ("ClawPosition", StreamValue::Float(vec![3.0, 4.0, 3.5, 4.0])),
//!     ("rotationGlobalClawArm", StreamValue::Float(vec![0.0; 6])),
//!     ("rotationClawArm", StreamValue::Float(vec![0.0; 6])),
//!     ("ClawCartVelocity", StreamValue::Float(vec![0.0, 0.5])),
//!     ("ClawOpen", StreamValue::Int(vec![1, 1])),
//!     ("ClawFacingGround", StreamValue::Int(vec![1, 1])),
//!     ("CurrentBPScore", StreamValue::Int(vec![0, 1])),
//!     ("CurrentScore", StreamValue::Int(vec![0, 1])),
//!     ("PlayerControls", StreamValue::Int(vec![0; 20])),
//! ]);
//!
//! let assembler = DatasetAssembler::build(&DatasetConfig::default()).unwrap();
//! let dataset = assembler.assemble(&record).unwrap();
//! assert_eq!(dataset.observations.shape(), &[2, 16]);
//! ```
pub mod action;
mod assembler;
mod config;
mod dataset;
pub mod error;
pub mod record;
pub mod reward;
pub mod segmenter;
mod step_type;

pub use assembler::DatasetAssembler;
pub use config::{
    DatasetConfig, FieldWidth, ObservationField, RewardAlignment, BLOCKS_POSITION, BLOCK_COUNT,
    CLAW_CART_VELOCITY, CLAW_FACING_GROUND, CLAW_OPEN, CLAW_POSITION, CURRENT_BP_SCORE,
    CURRENT_SCORE, PLAYER_CONTROLS, ROTATION_CLAW_ARM, ROTATION_GLOBAL_CLAW_ARM,
};
pub use dataset::TrajectoryDataset;
pub use error::RabError;
pub use record::SessionRecord;
pub use step_type::StepType;
