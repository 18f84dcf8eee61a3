//! Position of a timestep within an episode.
use serde::{Deserialize, Serialize};

/// Label of a timestep relative to episode boundaries.
///
/// The numeric encoding (`START = 0`, `MID = 1`, `END = 2`) is the one stored
/// in [`TrajectoryDataset`](crate::TrajectoryDataset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepType {
    /// First timestep of an episode.
    Start,

    /// Any timestep between the first and the last.
    Mid,

    /// Last timestep of an episode.
    End,
}

impl StepType {
    /// Returns the numeric encoding.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Start => 0,
            Self::Mid => 1,
            Self::End => 2,
        }
    }

    /// Decodes the numeric encoding.
    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::Start),
            1 => Some(Self::Mid),
            2 => Some(Self::End),
            _ => None,
        }
    }
}

impl From<StepType> for i32 {
    fn from(step_type: StepType) -> Self {
        step_type.as_i32()
    }
}

#[cfg(test)]
mod tests {
    use super::StepType;

    #[test]
    fn test_encoding() {
        for st in [StepType::Start, StepType::Mid, StepType::End] {
            assert_eq!(StepType::from_i32(st.as_i32()), Some(st));
        }
        assert_eq!(StepType::from_i32(3), None);
    }
}
