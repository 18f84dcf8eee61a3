//! Reading and writing base64-encoded session logs.
use crate::ProtoGameDetail;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use prost::Message;
use rab_core::{DatasetAssembler, DatasetConfig, RabError, TrajectoryDataset};
use std::{fs, path::Path};

/// Parses a serialized [`ProtoGameDetail`].
///
/// # Errors
///
/// [`RabError::DecodeError`] if the bytes are not a valid message.
pub fn decode_bytes(bytes: &[u8]) -> Result<ProtoGameDetail, RabError> {
    ProtoGameDetail::decode(bytes).map_err(RabError::decode)
}

/// Parses a base64-encoded [`ProtoGameDetail`].
///
/// Whitespace, e.g. line breaks inserted by the exporting tool, is ignored.
///
/// # Errors
///
/// [`RabError::DecodeError`] if the text is not valid base64 or the decoded
/// bytes are not a valid message.
pub fn decode_base64(text: &str) -> Result<ProtoGameDetail, RabError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact).map_err(RabError::decode)?;
    log::debug!("Decoded {} bytes of session log", bytes.len());
    decode_bytes(&bytes)
}

/// Reads a base64-encoded [`ProtoGameDetail`] from a file.
///
/// # Errors
///
/// [`RabError::IoError`] if the file cannot be read, otherwise the errors of
/// [`decode_base64`].
pub fn decode_file(path: impl AsRef<Path>) -> Result<ProtoGameDetail, RabError> {
    let path = path.as_ref();
    log::debug!("Read session log {:?}", path);
    let text = fs::read_to_string(path)?;
    decode_base64(&text)
}

/// Reads a session log from a file and applies `prepare` to the message.
///
/// ```no_run
/// use rab_proto::decode_file_with;
///
/// let n_steps =
///     decode_file_with("session.b64", |msg| Ok(msg.current_bp_score.len())).unwrap();
/// ```
pub fn decode_file_with<T, F>(path: impl AsRef<Path>, prepare: F) -> Result<T, RabError>
where
    F: FnOnce(ProtoGameDetail) -> Result<T, RabError>,
{
    prepare(decode_file(path)?)
}

/// Reads a session log from a file and converts it into a dataset.
pub fn load_dataset(
    path: impl AsRef<Path>,
    config: &DatasetConfig,
) -> Result<TrajectoryDataset, RabError> {
    let assembler = DatasetAssembler::build(config)?;
    decode_file_with(path, |msg| assembler.assemble(&msg))
}

/// Serializes a message as base64 text.
pub fn encode_base64(msg: &ProtoGameDetail) -> String {
    STANDARD.encode(msg.encode_to_vec())
}

/// Writes a message to a file as base64 text, readable by [`decode_file`].
pub fn encode_file(msg: &ProtoGameDetail, path: impl AsRef<Path>) -> Result<(), RabError> {
    fs::write(path, encode_base64(msg))?;
    Ok(())
}
