//! Shaping of a cumulative score into per-step rewards.
use crate::error::RabError;

/// Converts a cumulative score sequence into sparse per-step rewards.
///
/// The output starts with a seed element equal to `scores[0]`, followed by one
/// reward per input score, so it has `scores.len() + 1` elements. A reward is
/// zero while the score stays on a plateau and equals the increase over the
/// last distinct score when it changes. Decreases, e.g. a score reset between
/// episodes, give zero, never a negative reward.
///
/// The increase is measured against the last distinct score, not by
/// subtracting the previously emitted reward from the score. The two differ
/// after a plateau and after a nonzero first score: `[3, 3, 4]` yields a final
/// reward of `1` here, where subtracting the previous reward would give `4`.
///
/// ```rust
/// use rab_core::reward::step_rewards;
///
/// let rewards = step_rewards(&[0.0, 0.0, 5.0]).unwrap();
/// assert_eq!(rewards, vec![0.0, 0.0, 0.0, 5.0]);
/// ```
///
/// # Errors
///
/// [`RabError::EmptyRecordError`] if `scores` is empty.
pub fn step_rewards(scores: &[f32]) -> Result<Vec<f32>, RabError> {
    let first = *scores
        .first()
        .ok_or_else(|| RabError::EmptyRecordError("cumulative score".to_string()))?;

    let mut rewards = Vec::with_capacity(scores.len() + 1);
    rewards.push(first);

    let mut last_score = first;
    for &score in scores {
        let mut reward = 0f32;
        if score != last_score {
            reward = score - last_score;
            last_score = score;
        }
        rewards.push(reward.max(0.0));
    }

    Ok(rewards)
}
