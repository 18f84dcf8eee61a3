//! Base implementation of session records.
use crate::error::RabError;
use std::collections::{hash_map::Keys, HashMap};

/// Access to the named streams of a decoded session.
///
/// Any decoder backend can implement this trait; the dataset assembler only
/// relies on looking streams up by name.
pub trait SessionRecord {
    /// Returns the stream with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`RabError::RecordKeyError`] if the record has no such stream.
    fn stream(&self, name: &str) -> Result<StreamRef<'_>, RabError>;

    /// Returns the declared length of the stream with the given name.
    fn declared_len(&self, name: &str) -> Result<usize, RabError> {
        Ok(self.stream(name)?.len())
    }
}

/// Borrowed view of a stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamRef<'a> {
    /// Integer-valued stream, e.g. counts, scores, flags and controls.
    Int(&'a [i32]),

    /// Float-valued stream, e.g. positions, rotations and velocities.
    Float(&'a [f32]),
}

impl<'a> StreamRef<'a> {
    /// Returns the declared number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
        }
    }

    /// Returns `true` if the stream has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `ix` as `f32`.
    pub fn get_f32(&self, ix: usize) -> Option<f32> {
        match self {
            Self::Int(v) => v.get(ix).map(|x| *x as f32),
            Self::Float(v) => v.get(ix).copied(),
        }
    }

    /// Returns the first `count` elements as `f32`, or `None` if the stream
    /// is shorter than `count`.
    pub fn prefix_f32(&self, count: usize) -> Option<Vec<f32>> {
        match self {
            Self::Int(v) => v
                .get(..count)
                .map(|v| v.iter().map(|x| *x as f32).collect()),
            Self::Float(v) => v.get(..count).map(|v| v.to_vec()),
        }
    }

    /// Returns the first `count` elements as `i32`, or `None` if the stream
    /// is shorter than `count`.
    ///
    /// Float elements are truncated toward zero.
    pub fn prefix_i32(&self, count: usize) -> Option<Vec<i32>> {
        match self {
            Self::Int(v) => v.get(..count).map(|v| v.to_vec()),
            Self::Float(v) => v
                .get(..count)
                .map(|v| v.iter().map(|x| *x as i32).collect()),
        }
    }
}

/// Owned values of a stream stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum StreamValue {
    /// Integer-valued stream.
    Int(Vec<i32>),

    /// Float-valued stream.
    Float(Vec<f32>),
}

impl StreamValue {
    /// Borrows the values as a [`StreamRef`].
    pub fn view(&self) -> StreamRef<'_> {
        match self {
            Self::Int(v) => StreamRef::Int(v),
            Self::Float(v) => StreamRef::Float(v),
        }
    }
}

/// An in-memory session record keyed by stream name.
///
/// Useful when the streams are produced by something other than the protobuf
/// decoder, e.g. in tests or when converting from another log format.
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, StreamValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record from a slice of name-stream pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, StreamValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a stream, replacing any stream with the same name.
    pub fn insert(&mut self, k: impl Into<String>, v: StreamValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the stream names.
    pub fn keys(&self) -> Keys<String, StreamValue> {
        self.0.keys()
    }

    /// Gets the stream with the given name.
    pub fn get(&self, k: &str) -> Option<&StreamValue> {
        self.0.get(k)
    }

    /// Returns `true` if the record holds no streams.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl SessionRecord for Record {
    fn stream(&self, name: &str) -> Result<StreamRef<'_>, RabError> {
        self.0
            .get(name)
            .map(StreamValue::view)
            .ok_or_else(|| RabError::RecordKeyError(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stream_is_key_error() {
        let record = Record::from_slice(&[("BlockCount", StreamValue::Int(vec![2]))]);
        assert!(matches!(
            record.stream("CurrentScore"),
            Err(RabError::RecordKeyError(name)) if name == "CurrentScore"
        ));
        assert_eq!(record.declared_len("BlockCount").unwrap(), 1);
    }

    #[test]
    fn test_prefix_conversions() {
        let ints = StreamValue::Int(vec![1, 0, 3]);
        let floats = StreamValue::Float(vec![1.5, -2.5]);

        assert_eq!(ints.view().prefix_f32(2), Some(vec![1.0, 0.0]));
        assert_eq!(ints.view().prefix_f32(4), None);
        assert_eq!(floats.view().prefix_i32(2), Some(vec![1, -2]));
        assert_eq!(floats.view().get_f32(1), Some(-2.5));
        assert_eq!(floats.view().get_f32(2), None);
        assert!(StreamValue::Int(vec![]).view().is_empty());
    }
}
