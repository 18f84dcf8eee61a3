//! Labelling of timesteps with episode boundaries.
//!
//! A session can contain several scored episodes. The end of an episode is
//! detected as a strict increase of the episode score; the timestep after an
//! end starts a new episode.
use crate::step_type::StepType;

/// State machine assigning a [`StepType`] to each timestep.
///
/// The state is the previously emitted label and the previous score. A fresh
/// segmenter is used for every sequence.
#[derive(Debug, Clone, Default)]
pub struct EpisodeSegmenter {
    prev_step_type: Option<StepType>,
    prev_score: f32,
}

impl EpisodeSegmenter {
    /// Creates a segmenter positioned at the start of a sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels the next timestep given its score.
    pub fn step(&mut self, score: f32) -> StepType {
        let step_type = match self.prev_step_type {
            None | Some(StepType::End) => StepType::Start,
            Some(_) if score > self.prev_score => StepType::End,
            Some(_) => StepType::Mid,
        };
        self.prev_step_type = Some(step_type);
        self.prev_score = score;
        step_type
    }

    /// Labels a whole score sequence.
    pub fn segment(scores: &[f32]) -> Vec<StepType> {
        let mut segmenter = Self::new();
        scores.iter().map(|&score| segmenter.step(score)).collect()
    }
}

/// Returns the step types shifted left by one, with [`StepType::End`] appended
/// as a terminal boundary.
///
/// The output has the same length as the input.
pub fn next_step_types(step_types: &[StepType]) -> Vec<StepType> {
    step_types
        .iter()
        .skip(1)
        .copied()
        .chain(std::iter::once(StepType::End))
        .take(step_types.len())
        .collect()
}
