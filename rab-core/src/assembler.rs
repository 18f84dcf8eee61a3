//! Assembly of a [`TrajectoryDataset`] from a session record.
use crate::{
    action::ActionNormalizer,
    config::{DatasetConfig, RewardAlignment},
    dataset::TrajectoryDataset,
    error::RabError,
    record::{
        get_field, get_int_matrix, get_matrix, object_capacity, timestep_count, SessionRecord,
    },
    reward::step_rewards,
    segmenter::{next_step_types, EpisodeSegmenter},
    step_type::StepType,
};
use ndarray::{concatenate, Array1, Array2, ArrayView2, Axis};

/// Builds trajectory datasets from session records.
///
/// The number of timesteps `L` is the length of the running score stream and
/// the number of objects `M` is the first element of the count stream. Every
/// other stream is truncated to `L` rows; a stream too short for that is an
/// error, never padded.
///
/// ```rust
/// use rab_core::{
///     record::{Record, StreamValue},
///     DatasetAssembler, DatasetConfig, ObservationField, FieldWidth,
/// };
///
/// let config = DatasetConfig::default().observation_fields(vec![ObservationField::new(
///     "score",
///     "CurrentBPScore",
///     FieldWidth::Fixed(1),
/// )]);
/// let record = Record::from_slice(&[
///     ("CurrentBPScore", StreamValue::Int(vec![0, 0, 5])),
///     ("CurrentScore", StreamValue::Int(vec![0, 0, 5])),
///     ("BlockCount", StreamValue::Int(vec![1])),
///     ("PlayerControls", StreamValue::Int(vec![0; 30])),
/// ]);
///
/// let dataset = DatasetAssembler::build(&config).unwrap().assemble(&record).unwrap();
/// assert_eq!(dataset.len(), 3);
/// assert_eq!(dataset.rewards.to_vec(), vec![0.0, 0.0, 0.0, 5.0]);
/// ```
#[derive(Debug, Clone)]
pub struct DatasetAssembler {
    config: DatasetConfig,
}

impl DatasetAssembler {
    /// Creates an assembler.
    ///
    /// # Errors
    ///
    /// [`RabError::ConfigError`] if the configuration is invalid.
    pub fn build(config: &DatasetConfig) -> Result<Self, RabError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Converts a session record into a dataset.
    ///
    /// # Errors
    ///
    /// Any error of the record accessors, e.g. [`RabError::EmptyRecordError`]
    /// when a driving stream is empty and [`RabError::ShapeError`] when a
    /// stream has fewer than `L` rows.
    pub fn assemble<R: SessionRecord + ?Sized>(
        &self,
        record: &R,
    ) -> Result<TrajectoryDataset, RabError> {
        let config = &self.config;
        log::debug!("Assembling dataset");
        for name in [
            &config.count_stream,
            &config.score_stream,
            &config.step_score_stream,
        ] {
            log::debug!("{} length is {:?}", name, record.declared_len(name).ok());
        }

        let n_steps = timestep_count(record, &config.score_stream)?;
        let n_objects = object_capacity(record, &config.count_stream)?;
        log::debug!("Record contains {} steps", n_steps);
        log::debug!("Max objects value is {}", n_objects);

        let observations = self.observations(record, n_steps, n_objects)?;
        let actions = self.actions(record, n_steps)?;
        let rewards = self.rewards(record, n_steps)?;
        let step_types = self.step_types(record, n_steps)?;
        let next_step_types = next_step_types(&step_types);
        log::debug!("Step types len is {}", step_types.len());
        log::debug!("Next step types len is {}", next_step_types.len());

        Ok(TrajectoryDataset {
            actions,
            observations,
            rewards,
            step_types: encode(&step_types),
            next_step_types: encode(&next_step_types),
        })
    }

    /// Concatenates the observation fields into an `(L, F)` matrix.
    fn observations<R: SessionRecord + ?Sized>(
        &self,
        record: &R,
        n_steps: usize,
        n_objects: usize,
    ) -> Result<Array2<f32>, RabError> {
        let blocks = self
            .config
            .observation_fields
            .iter()
            .map(|field| {
                let width = field.width.resolve(n_objects)?;
                log::debug!(
                    "{} length is {:?}, {} columns",
                    field.stream,
                    record.declared_len(&field.stream).ok(),
                    width
                );
                get_matrix(record, &field.stream, n_steps, width)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let views: Vec<ArrayView2<f32>> = blocks.iter().map(|b| b.view()).collect();
        concatenate(Axis(1), &views).map_err(|e| RabError::ShapeError(e.to_string()))
    }

    /// Normalizes the control vectors of the first `L` timesteps.
    fn actions<R: SessionRecord + ?Sized>(
        &self,
        record: &R,
        n_steps: usize,
    ) -> Result<Array2<i32>, RabError> {
        let config = &self.config;
        let raw = get_int_matrix(
            record,
            &config.action_stream,
            n_steps,
            config.num_action_slots,
        )?;
        Ok(ActionNormalizer::new(config.reset_action).normalize(raw.view()))
    }

    fn rewards<R: SessionRecord + ?Sized>(
        &self,
        record: &R,
        n_steps: usize,
    ) -> Result<Array1<f32>, RabError> {
        let scores = get_field(record, &self.config.score_stream, n_steps)?;
        let mut rewards = step_rewards(&scores)?;
        if self.config.reward_alignment == RewardAlignment::DropSeed {
            rewards.remove(0);
        }
        Ok(Array1::from(rewards))
    }

    fn step_types<R: SessionRecord + ?Sized>(
        &self,
        record: &R,
        n_steps: usize,
    ) -> Result<Vec<StepType>, RabError> {
        let name = &self.config.step_score_stream;

        // An empty episode score stream is a missing driving stream, not a short one
        timestep_count(record, name)?;
        let scores = get_field(record, name, n_steps)?;
        Ok(EpisodeSegmenter::segment(&scores))
    }
}

fn encode(step_types: &[StepType]) -> Array1<i32> {
    step_types.iter().map(|st| st.as_i32()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{FieldWidth, ObservationField, CLAW_OPEN, CURRENT_SCORE, PLAYER_CONTROLS},
        record::{Record, StreamValue},
    };
    use ndarray::{arr1, arr2};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// A session of 3 timesteps with 2 objects. Streams are longer than needed.
    fn session() -> Record {
        let mut controls = vec![0; 40];
        controls[10 + 4] = 1;
        controls[20 + 9] = 1;

        Record::from_slice(&[
            ("BlockCount", StreamValue::Int(vec![2, 2, 2, 2])),
            (
                "BlocksPosition",
                StreamValue::Float((0..16).map(|x| x as f32).collect()),
            ),
            (
                "ClawPosition",
                StreamValue::Float(vec![0.5, 1.5, 2.5, 3.5, 4.5, 5.5, 6.5]),
            ),
            (
                "rotationGlobalClawArm",
                StreamValue::Float((0..9).map(|x| x as f32 * 10.0).collect()),
            ),
            (
                "rotationClawArm",
                StreamValue::Float((0..9).map(|x| -(x as f32)).collect()),
            ),
            ("ClawCartVelocity", StreamValue::Float(vec![0.0, 0.25, -0.25])),
            ("ClawOpen", StreamValue::Int(vec![1, 0, 0, 1])),
            ("ClawFacingGround", StreamValue::Int(vec![0, 1, 1])),
            ("CurrentBPScore", StreamValue::Int(vec![0, 0, 5])),
            ("CurrentScore", StreamValue::Int(vec![0, 0, 5])),
            ("PlayerControls", StreamValue::Int(controls)),
        ])
    }

    #[test]
    fn test_assemble() {
        init();

        let assembler = DatasetAssembler::build(&DatasetConfig::default()).unwrap();
        let dataset = assembler.assemble(&session()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.observation_dim(), 14 + 2 * 2);
        assert_eq!(
            dataset.observations.row(1).to_vec(),
            vec![
                2.0, // block count
                4.0, 5.0, 6.0, 7.0, // block positions
                1.5, // claw cart position
                2.5, 3.5, // claw position
                30.0, 40.0, 50.0, // global claw-arm rotation
                -3.0, -4.0, -5.0, // claw-arm rotation
                0.25, // cart velocity
                0.0,  // claw open
                1.0,  // claw facing ground
                0.0,  // running score
            ]
        );
        assert_eq!(dataset.actions, arr2(&[[0], [4], [9]]));
        assert_eq!(dataset.rewards, arr1(&[0.0, 0.0, 0.0, 5.0]));
        assert_eq!(dataset.step_types, arr1(&[0, 1, 2]));
        assert_eq!(dataset.next_step_types, arr1(&[1, 2, 2]));
        assert_eq!(dataset.num_episode_ends(), 1);
        assert_eq!(dataset.sum_rewards(), 5.0);
    }

    #[test]
    fn test_drop_seed() {
        let config = DatasetConfig::default().reward_alignment(RewardAlignment::DropSeed);
        let dataset = DatasetAssembler::build(&config)
            .unwrap()
            .assemble(&session())
            .unwrap();
        assert_eq!(dataset.rewards, arr1(&[0.0, 0.0, 5.0]));
    }

    #[test]
    fn test_episode_boundaries() {
        let mut record = session();
        record.insert("CurrentBPScore", StreamValue::Int(vec![0, 0, 2, 2, 5]));
        record.insert("CurrentScore", StreamValue::Int(vec![10, 10, 12, 12, 15]));
        record.insert("PlayerControls", StreamValue::Int(vec![0; 50]));

        let config = DatasetConfig::default().observation_fields(vec![ObservationField::new(
            "claw_open",
            CLAW_OPEN,
            FieldWidth::Fixed(0),
        )]);
        assert!(DatasetAssembler::build(&config).is_err());

        let config = DatasetConfig::default().observation_fields(vec![ObservationField::new(
            "score",
            CURRENT_SCORE,
            FieldWidth::Fixed(1),
        )]);
        let dataset = DatasetAssembler::build(&config)
            .unwrap()
            .assemble(&record)
            .unwrap();

        assert_eq!(dataset.observations.shape(), &[5, 1]);
        assert_eq!(dataset.step_types, arr1(&[0, 1, 2, 0, 2]));
        assert_eq!(dataset.next_step_types, arr1(&[1, 2, 0, 2, 2]));
        assert_eq!(dataset.rewards, arr1(&[0.0, 0.0, 0.0, 2.0, 0.0, 3.0]));
    }

    #[test]
    fn test_short_streams() {
        let assembler = DatasetAssembler::build(&DatasetConfig::default()).unwrap();

        // 3 objects over 3 timesteps need 18 block positions, 16 are recorded
        let mut record = session();
        record.insert("BlockCount", StreamValue::Int(vec![3, 3, 3]));
        assert!(matches!(
            assembler.assemble(&record),
            Err(RabError::ShapeError(_))
        ));

        let mut record = session();
        record.insert(PLAYER_CONTROLS, StreamValue::Int(vec![0; 29]));
        assert!(matches!(
            assembler.assemble(&record),
            Err(RabError::ShapeError(_))
        ));

        let mut record = session();
        record.insert("CurrentScore", StreamValue::Int(vec![0, 0]));
        assert!(matches!(
            assembler.assemble(&record),
            Err(RabError::ShapeError(_))
        ));
    }

    #[test]
    fn test_empty_driving_streams() {
        let assembler = DatasetAssembler::build(&DatasetConfig::default()).unwrap();

        for name in ["CurrentBPScore", "CurrentScore", "BlockCount"] {
            let mut record = session();
            record.insert(name, StreamValue::Int(vec![]));
            let result = assembler.assemble(&record);
            assert!(
                matches!(&result, Err(RabError::EmptyRecordError(n)) if n == name),
                "{}",
                name
            );
        }

        let mut record = session();
        record.insert("Unused", StreamValue::Int(vec![]));
        assert!(assembler.assemble(&record).is_ok());
    }

    #[test]
    fn test_error_independent_of_log_level() {
        init();

        // Short block positions and no episode score stream
        let mut streams = session();
        streams.insert("BlocksPosition", StreamValue::Float(vec![0.0; 4]));
        let record = Record::from_slice(
            &streams
                .keys()
                .filter(|k| k.as_str() != CURRENT_SCORE)
                .map(|k| (k.as_str(), streams.get(k).unwrap().clone()))
                .collect::<Vec<_>>(),
        );

        let assembler = DatasetAssembler::build(&DatasetConfig::default()).unwrap();
        let max_level = log::max_level();

        log::set_max_level(log::LevelFilter::Off);
        let quiet = assembler.assemble(&record);
        log::set_max_level(log::LevelFilter::Debug);
        let verbose = assembler.assemble(&record);
        log::set_max_level(max_level);

        assert!(matches!(quiet, Err(RabError::ShapeError(_))));
        assert!(matches!(verbose, Err(RabError::ShapeError(_))));
        assert_eq!(format!("{:?}", quiet), format!("{:?}", verbose));
    }

    #[test]
    fn test_huge_object_count() {
        let mut record = session();
        record.insert("BlockCount", StreamValue::Float(vec![1e30, 1e30, 1e30]));

        let assembler = DatasetAssembler::build(&DatasetConfig::default()).unwrap();
        assert!(matches!(
            assembler.assemble(&record),
            Err(RabError::ShapeError(_))
        ));
    }
}
