//! Truncating and reshaping accessors over a [`SessionRecord`].
use super::SessionRecord;
use crate::error::RabError;
use ndarray::Array2;

/// Largest object capacity a count stream may declare.
pub const MAX_OBJECTS: usize = 1 << 16;

/// Returns the first `count` elements of the named stream as `f32`.
///
/// # Errors
///
/// * [`RabError::RecordKeyError`] if the stream does not exist.
/// * [`RabError::ShapeError`] if the stream declares fewer than `count` elements.
pub fn get_field<R: SessionRecord + ?Sized>(
    record: &R,
    name: &str,
    count: usize,
) -> Result<Vec<f32>, RabError> {
    let stream = record.stream(name)?;
    stream
        .prefix_f32(count)
        .ok_or_else(|| RabError::shape(name, count, stream.len()))
}

/// Returns the first `rows * cols` elements of the named stream reshaped to
/// `(rows, cols)` in row-major order.
///
/// # Errors
///
/// Same as [`get_field`] with `count = rows * cols`.
pub fn get_matrix<R: SessionRecord + ?Sized>(
    record: &R,
    name: &str,
    rows: usize,
    cols: usize,
) -> Result<Array2<f32>, RabError> {
    let count = rows.checked_mul(cols).ok_or_else(|| {
        RabError::ShapeError(format!("{} x {} overflows for {}", rows, cols, name))
    })?;
    let values = get_field(record, name, count)?;
    Array2::from_shape_vec((rows, cols), values)
        .map_err(|e| RabError::ShapeError(format!("{}: {}", name, e)))
}

/// Returns the first `rows * cols` elements of the named stream as `i32`,
/// reshaped to `(rows, cols)` in row-major order.
///
/// # Errors
///
/// Same as [`get_matrix`].
pub fn get_int_matrix<R: SessionRecord + ?Sized>(
    record: &R,
    name: &str,
    rows: usize,
    cols: usize,
) -> Result<Array2<i32>, RabError> {
    let count = rows.checked_mul(cols).ok_or_else(|| {
        RabError::ShapeError(format!("{} x {} overflows for {}", rows, cols, name))
    })?;
    let stream = record.stream(name)?;
    let values = stream
        .prefix_i32(count)
        .ok_or_else(|| RabError::shape(name, count, stream.len()))?;
    Array2::from_shape_vec((rows, cols), values)
        .map_err(|e| RabError::ShapeError(format!("{}: {}", name, e)))
}

/// Returns the number of timesteps `L`, i.e., the length of the running
/// score stream `name`.
///
/// # Errors
///
/// [`RabError::EmptyRecordError`] if the stream is empty.
pub fn timestep_count<R: SessionRecord + ?Sized>(
    record: &R,
    name: &str,
) -> Result<usize, RabError> {
    match record.declared_len(name)? {
        0 => Err(RabError::EmptyRecordError(name.to_string())),
        n => Ok(n),
    }
}

/// Returns the object capacity `M`, i.e., the first element of the count
/// stream `name`.
///
/// # Errors
///
/// * [`RabError::EmptyRecordError`] if the stream is empty.
/// * [`RabError::ShapeError`] if the first element is negative, not integral or
///   larger than [`MAX_OBJECTS`].
pub fn object_capacity<R: SessionRecord + ?Sized>(
    record: &R,
    name: &str,
) -> Result<usize, RabError> {
    let first = record
        .stream(name)?
        .get_f32(0)
        .ok_or_else(|| RabError::EmptyRecordError(name.to_string()))?;

    if first < 0.0 || first.fract() != 0.0 || first > MAX_OBJECTS as f32 {
        return Err(RabError::ShapeError(format!(
            "{} must start with an object count in 0..={}, got {}",
            name, MAX_OBJECTS, first
        )));
    }

    Ok(first as usize)
}
