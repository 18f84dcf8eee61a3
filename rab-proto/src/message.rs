//! Protobuf message of a recorded session.
use rab_core::{
    record::StreamRef, RabError, SessionRecord, BLOCKS_POSITION, BLOCK_COUNT, CLAW_CART_VELOCITY,
    CLAW_FACING_GROUND, CLAW_OPEN, CLAW_POSITION, CURRENT_BP_SCORE, CURRENT_SCORE,
    PLAYER_CONTROLS, ROTATION_CLAW_ARM, ROTATION_GLOBAL_CLAW_ARM,
};

/// Telemetry of one play session, one stream per recorded quantity.
///
/// Position and rotation streams are flattened over timesteps. Streams are
/// exposed through [`SessionRecord`] under their protobuf field names, e.g.
/// `BlocksPosition` or `CurrentBPScore`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoGameDetail {
    /// Number of blocks at each timestep.
    #[prost(int32, repeated, tag = "1")]
    pub block_count: Vec<i32>,

    /// `(x, y)` of every block at each timestep.
    #[prost(float, repeated, tag = "2")]
    pub blocks_position: Vec<f32>,

    /// `(x, y)` of the claw at each timestep.
    #[prost(float, repeated, tag = "3")]
    pub claw_position: Vec<f32>,

    /// Global rotation of the claw arm, three values per timestep.
    #[prost(float, repeated, tag = "4")]
    pub rotation_global_claw_arm: Vec<f32>,

    /// Local rotation of the claw arm, three values per timestep.
    #[prost(float, repeated, tag = "5")]
    pub rotation_claw_arm: Vec<f32>,

    /// Velocity of the claw cart.
    #[prost(float, repeated, tag = "6")]
    pub claw_cart_velocity: Vec<f32>,

    /// `1` while the claw is open.
    #[prost(int32, repeated, tag = "7")]
    pub claw_open: Vec<i32>,

    /// `1` while the claw faces the ground.
    #[prost(int32, repeated, tag = "8")]
    pub claw_facing_ground: Vec<i32>,

    /// Running score over the whole session.
    #[prost(int32, repeated, tag = "9")]
    pub current_bp_score: Vec<i32>,

    /// Score of the current episode.
    #[prost(int32, repeated, tag = "10")]
    pub current_score: Vec<i32>,

    /// One-hot player controls, ten slots per timestep.
    #[prost(int32, repeated, tag = "11")]
    pub player_controls: Vec<i32>,
}

impl SessionRecord for ProtoGameDetail {
    fn stream(&self, name: &str) -> Result<StreamRef<'_>, RabError> {
        let stream = match name {
            BLOCK_COUNT => StreamRef::Int(&self.block_count),
            BLOCKS_POSITION => StreamRef::Float(&self.blocks_position),
            CLAW_POSITION => StreamRef::Float(&self.claw_position),
            ROTATION_GLOBAL_CLAW_ARM => StreamRef::Float(&self.rotation_global_claw_arm),
            ROTATION_CLAW_ARM => StreamRef::Float(&self.rotation_claw_arm),
            CLAW_CART_VELOCITY => StreamRef::Float(&self.claw_cart_velocity),
            CLAW_OPEN => StreamRef::Int(&self.claw_open),
            CLAW_FACING_GROUND => StreamRef::Int(&self.claw_facing_ground),
            CURRENT_BP_SCORE => StreamRef::Int(&self.current_bp_score),
            CURRENT_SCORE => StreamRef::Int(&self.current_score),
            PLAYER_CONTROLS => StreamRef::Int(&self.player_controls),
            _ => return Err(RabError::RecordKeyError(name.to_string())),
        };
        Ok(stream)
    }
}
