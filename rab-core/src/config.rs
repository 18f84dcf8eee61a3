//! Configuration of the dataset assembler.
//!
//! The default configuration describes the layout of the claw game sessions:
//! which streams drive the timestep count, rewards, episode boundaries and
//! actions, and which streams are concatenated into an observation.
use crate::{
    action::{NUM_ACTION_SLOTS, RESET_ACTION},
    error::RabError,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Number of objects in the session.
pub const BLOCK_COUNT: &str = "BlockCount";
/// Flattened `(x, y)` positions of every object.
pub const BLOCKS_POSITION: &str = "BlocksPosition";
/// Flattened `(x, y)` positions of the claw.
pub const CLAW_POSITION: &str = "ClawPosition";
/// Flattened global rotation of the claw arm.
pub const ROTATION_GLOBAL_CLAW_ARM: &str = "rotationGlobalClawArm";
/// Flattened local rotation of the claw arm.
pub const ROTATION_CLAW_ARM: &str = "rotationClawArm";
/// Velocity of the claw cart.
pub const CLAW_CART_VELOCITY: &str = "ClawCartVelocity";
/// Whether the claw is open.
pub const CLAW_OPEN: &str = "ClawOpen";
/// Whether the claw faces the ground.
pub const CLAW_FACING_GROUND: &str = "ClawFacingGround";
/// Running score, cumulative over the session.
pub const CURRENT_BP_SCORE: &str = "CurrentBPScore";
/// Score of the current episode.
pub const CURRENT_SCORE: &str = "CurrentScore";
/// Flattened one-hot control vectors.
pub const PLAYER_CONTROLS: &str = "PlayerControls";

/// Number of columns a field occupies in one observation row.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum FieldWidth {
    /// A fixed number of columns.
    Fixed(usize),

    /// The given number of columns for each object, i.e., `n * M`.
    PerObject(usize),
}

impl FieldWidth {
    /// Returns the number of columns for a session with `num_objects` objects.
    ///
    /// # Errors
    ///
    /// [`RabError::ShapeError`] if the number of columns overflows.
    pub fn resolve(&self, num_objects: usize) -> Result<usize, RabError> {
        match self {
            Self::Fixed(n) => Ok(*n),
            Self::PerObject(n) => n.checked_mul(num_objects).ok_or_else(|| {
                RabError::ShapeError(format!("{} columns for {} objects overflow", n, num_objects))
            }),
        }
    }
}

/// A block of columns in the observation matrix.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct ObservationField {
    /// Name of the field, used in logs.
    pub name: String,

    /// Name of the stream the values are read from.
    pub stream: String,

    /// Number of columns per timestep.
    pub width: FieldWidth,
}

impl ObservationField {
    /// Creates a field.
    pub fn new(name: impl Into<String>, stream: impl Into<String>, width: FieldWidth) -> Self {
        Self {
            name: name.into(),
            stream: stream.into(),
            width,
        }
    }
}

/// Alignment of the reward sequence.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum RewardAlignment {
    /// Keep the seed element, giving `L + 1` rewards.
    KeepSeed,

    /// Drop the seed element, giving one reward per timestep.
    DropSeed,
}

/// Configuration of [`DatasetAssembler`](crate::DatasetAssembler).
///
/// # Examples
///
/// ```rust
/// use rab_core::{DatasetConfig, RewardAlignment};
///
/// let config = DatasetConfig::default().reward_alignment(RewardAlignment::DropSeed);
/// assert_eq!(config.observation_fields.len(), 10);
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct DatasetConfig {
    /// Running score stream. Its length defines the number of timesteps and
    /// rewards are computed from it.
    pub score_stream: String,

    /// Episode score stream driving the step types.
    pub step_score_stream: String,

    /// Stream whose first element is the number of objects.
    pub count_stream: String,

    /// Flattened control vectors.
    pub action_stream: String,

    /// Observation fields in column order.
    pub observation_fields: Vec<ObservationField>,

    /// Number of slots in a control vector.
    pub num_action_slots: usize,

    /// Slot that resets the carried action.
    pub reset_action: i32,

    /// Alignment of the reward sequence.
    pub reward_alignment: RewardAlignment,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        use FieldWidth::{Fixed, PerObject};

        Self {
            score_stream: CURRENT_BP_SCORE.to_string(),
            step_score_stream: CURRENT_SCORE.to_string(),
            count_stream: BLOCK_COUNT.to_string(),
            action_stream: PLAYER_CONTROLS.to_string(),
            observation_fields: vec![
                ObservationField::new("block_count", BLOCK_COUNT, Fixed(1)),
                ObservationField::new("block_positions", BLOCKS_POSITION, PerObject(2)),
                ObservationField::new("claw_cart_position", CLAW_POSITION, Fixed(1)),
                ObservationField::new("claw_positions", CLAW_POSITION, Fixed(2)),
                ObservationField::new(
                    "rotation_global_claw_arm",
                    ROTATION_GLOBAL_CLAW_ARM,
                    Fixed(3),
                ),
                ObservationField::new("rotation_claw_arm", ROTATION_CLAW_ARM, Fixed(3)),
                ObservationField::new("claw_cart_velocity", CLAW_CART_VELOCITY, Fixed(1)),
                ObservationField::new("claw_open", CLAW_OPEN, Fixed(1)),
                ObservationField::new("claw_facing_ground", CLAW_FACING_GROUND, Fixed(1)),
                ObservationField::new("current_bp_score", CURRENT_BP_SCORE, Fixed(1)),
            ],
            num_action_slots: NUM_ACTION_SLOTS,
            reset_action: RESET_ACTION,
            reward_alignment: RewardAlignment::KeepSeed,
        }
    }
}

impl DatasetConfig {
    /// Sets the running score stream.
    pub fn score_stream(mut self, v: impl Into<String>) -> Self {
        self.score_stream = v.into();
        self
    }

    /// Sets the episode score stream.
    pub fn step_score_stream(mut self, v: impl Into<String>) -> Self {
        self.step_score_stream = v.into();
        self
    }

    /// Sets the object count stream.
    pub fn count_stream(mut self, v: impl Into<String>) -> Self {
        self.count_stream = v.into();
        self
    }

    /// Sets the control vector stream.
    pub fn action_stream(mut self, v: impl Into<String>) -> Self {
        self.action_stream = v.into();
        self
    }

    /// Sets the observation fields.
    pub fn observation_fields(mut self, v: Vec<ObservationField>) -> Self {
        self.observation_fields = v;
        self
    }

    /// Sets the number of control slots.
    pub fn num_action_slots(mut self, v: usize) -> Self {
        self.num_action_slots = v;
        self
    }

    /// Sets the reset slot.
    pub fn reset_action(mut self, v: i32) -> Self {
        self.reset_action = v;
        self
    }

    /// Sets the reward alignment.
    pub fn reward_alignment(mut self, v: RewardAlignment) -> Self {
        self.reward_alignment = v;
        self
    }

    /// Checks that the configuration describes a dataset.
    ///
    /// # Errors
    ///
    /// [`RabError::ConfigError`] if there are no observation fields, a field
    /// has zero width, there are no action slots or the reset slot is out of range.
    pub fn validate(&self) -> Result<(), RabError> {
        if self.observation_fields.is_empty() {
            return Err(RabError::ConfigError("no observation fields".to_string()));
        }
        if let Some(field) = self
            .observation_fields
            .iter()
            .find(|f| matches!(f.width.resolve(1), Ok(0)))
        {
            return Err(RabError::ConfigError(format!(
                "observation field {} has zero width",
                field.name
            )));
        }
        if self.num_action_slots == 0 {
            return Err(RabError::ConfigError("no action slots".to_string()));
        }
        if self.reset_action < 0 || self.reset_action as usize >= self.num_action_slots {
            return Err(RabError::ConfigError(format!(
                "reset action {} is not one of {} slots",
                self.reset_action, self.num_action_slots
            )));
        }
        Ok(())
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_default_layout() {
        let config = DatasetConfig::default();
        config.validate().unwrap();

        let width: usize = config
            .observation_fields
            .iter()
            .map(|f| f.width.resolve(3).unwrap())
            .sum();
        assert_eq!(width, 14 + 2 * 3);
    }

    #[test]
    fn test_resolve_overflow() {
        assert_eq!(FieldWidth::Fixed(3).resolve(usize::MAX).unwrap(), 3);
        assert!(matches!(
            FieldWidth::PerObject(2).resolve(usize::MAX),
            Err(RabError::ShapeError(_))
        ));
    }

    #[test]
    fn test_validate() {
        let config = DatasetConfig::default().reset_action(10);
        assert!(matches!(config.validate(), Err(RabError::ConfigError(_))));

        let config = DatasetConfig::default().observation_fields(vec![]);
        assert!(matches!(config.validate(), Err(RabError::ConfigError(_))));

        let config = DatasetConfig::default().observation_fields(vec![ObservationField::new(
            "nothing",
            CLAW_OPEN,
            FieldWidth::PerObject(0),
        )]);
        assert!(matches!(config.validate(), Err(RabError::ConfigError(_))));
    }

    #[test]
    fn test_serde_dataset_config() -> Result<()> {
        let config = DatasetConfig::default()
            .step_score_stream(CURRENT_BP_SCORE)
            .reward_alignment(RewardAlignment::DropSeed);

        let dir = TempDir::new("dataset_config")?;
        let path = dir.path().join("dataset_config.yaml");
        println!("{:?}", path);

        config.save(&path)?;
        let config_ = DatasetConfig::load(&path)?;
        assert_eq!(config, config_);

        println!("{:?}", config_);

        Ok(())
    }
}
