//! Trajectory dataset produced from one session.
use crate::step_type::StepType;
use ndarray::{Array1, Array2};
use serde::Serialize;

/// Per-timestep arrays of one session.
///
/// Row `i` of `actions` and `observations`, and element `i` of `step_types`
/// and `next_step_types`, describe timestep `i`. See
/// [`RewardAlignment`](crate::RewardAlignment) for the alignment of `rewards`.
#[derive(Clone, Debug, Serialize)]
pub struct TrajectoryDataset {
    /// Discrete action ids, shape `(L, 1)`.
    pub actions: Array2<i32>,

    /// Observation vectors, shape `(L, F)`.
    pub observations: Array2<f32>,

    /// Rewards.
    pub rewards: Array1<f32>,

    /// Encoded [`StepType`] of each timestep.
    pub step_types: Array1<i32>,

    /// Encoded [`StepType`] of the following timestep.
    pub next_step_types: Array1<i32>,
}

impl TrajectoryDataset {
    /// Returns the number of timesteps.
    pub fn len(&self) -> usize {
        self.observations.nrows()
    }

    /// Returns `true` if the dataset has no timesteps.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of columns of an observation.
    pub fn observation_dim(&self) -> usize {
        self.observations.ncols()
    }

    /// Returns the number of timesteps labelled as the end of an episode.
    pub fn num_episode_ends(&self) -> usize {
        let end = StepType::End.as_i32();
        self.step_types.iter().filter(|&&v| v == end).count()
    }

    /// Returns the sum of rewards.
    pub fn sum_rewards(&self) -> f32 {
        self.rewards.sum()
    }

    /// Logs statistics of the dataset.
    pub fn log_stats(&self) {
        log::info!("In trajectory dataset:");
        log::info!("{} timesteps", self.len());
        log::info!("{} observation dimensions", self.observation_dim());
        log::info!("{} rewards", self.rewards.len());
        log::info!("{} episode ends", self.num_episode_ends());
        log::info!("{} reward sum", self.sum_rewards());
    }
}
