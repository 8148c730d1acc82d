//! Vector extractor factories for common serialized-path shapes.
//!
//! Both factories take an accessor returning the serialized path of an input
//! item and return a closure usable as the extractor of a
//! [TreeBuilder](crate::matpath::TreeBuilder).

use crate::error::BuildError;
use crate::model::segment::{PathVector, Segment};

/// Returns an extractor splitting delimited paths into vectors.
///
/// The empty string maps to the empty (root) vector; any other path splits
/// on the delimiter, so `"1.2.3"` with `'.'` becomes `["1", "2", "3"]`.
/// Consecutive delimiters produce empty segments rather than being skipped.
///
/// # Example
/// ```
/// use matpath::matpath::delimited;
/// use matpath::model::Segment;
///
/// let mut extractor = delimited('.', |item: &&str, _| item.to_string());
/// let vector = extractor(&"1.2", 0, &()).unwrap();
/// assert_eq!(vector, vec![Segment::from("1"), Segment::from("2")]);
/// ```
pub fn delimited<I, T>(
    delimiter: char,
    mut path: impl FnMut(&I, usize) -> String,
) -> impl FnMut(&I, usize, &T) -> Result<PathVector, BuildError> {
    move |item, input_index, _data| {
        let path = path(item, input_index);
        if path.is_empty() {
            return Ok(PathVector::new());
        }
        Ok(path.split(delimiter).map(Segment::from).collect())
    }
}

/// Returns an extractor splitting fixed-width paths into vectors.
///
/// The path is chopped into consecutive chunks of `width` characters, so
/// `"007007"` with width 3 becomes `["007", "007"]` and the empty string maps
/// to the empty (root) vector. A path whose length is not a multiple of the
/// width is rejected with an [ExtractorReturnValueIssue] error.
///
/// [ExtractorReturnValueIssue]: crate::error::BuildErrorKind::ExtractorReturnValueIssue
///
/// # Panics
/// Panics if `width` is zero.
///
/// # Example
/// ```
/// use matpath::matpath::fixed;
/// use matpath::model::Segment;
///
/// let mut extractor = fixed(3, |item: &&str, _| item.to_string());
/// let vector = extractor(&"001002", 0, &()).unwrap();
/// assert_eq!(vector, vec![Segment::from("001"), Segment::from("002")]);
/// ```
pub fn fixed<I, T>(
    width: usize,
    mut path: impl FnMut(&I, usize) -> String,
) -> impl FnMut(&I, usize, &T) -> Result<PathVector, BuildError> {
    assert!(width > 0, "segment width must be positive");
    move |item, input_index, _data| {
        let path = path(item, input_index);
        let characters: Vec<char> = path.chars().collect();
        if characters.len() % width != 0 {
            return Err(BuildError::extractor(format!(
                "path length {} is not a multiple of the segment width {width}",
                characters.len()
            ))
            .tag("path", path));
        }
        Ok(characters
            .chunks(width)
            .map(|chunk| Segment::from(chunk.iter().collect::<String>()))
            .collect())
    }
}
