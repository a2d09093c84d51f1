//! Compression of datapoint identifier lists into contiguous runs.
//!
//! The gateway only answers queries for a contiguous block of datapoints,
//! given as a start identifier and a count. A caller that wants an
//! arbitrary list of datapoints therefore has to split that list into
//! blocks first. [`compress`] does that split without sorting or
//! deduplicating the input: a new run starts wherever two neighbouring
//! identifiers in the list are not `n` followed by `n + 1`. Expanding the
//! runs in order gives back the original list, element for element.

use std::fmt;

/// A contiguous block of datapoint identifiers: `base, base + 1, ...,
/// base + length - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    base: u32,
    length: u32,
}

impl Run {
    /// Create a new run. Returns `None` if `length` is zero or if the
    /// run would extend past `u32::MAX`.
    pub fn new(base: u32, length: u32) -> Option<Self> {
        if length == 0 {
            return None;
        }
        base.checked_add(length - 1)?;
        Some(Self { base, length })
    }

    /// A run holding only the given identifier.
    pub fn single(base: u32) -> Self {
        Self { base, length: 1 }
    }

    /// The first identifier of the run.
    pub fn base(&self) -> u32 {
        self.base
    }

    /// The number of identifiers in the run. Always at least one.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// The last identifier of the run.
    pub fn last(&self) -> u32 {
        // Cannot overflow, this is checked on construction.
        self.base + (self.length - 1)
    }

    /// Iterate over the identifiers in the run, in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u32> {
        self.base..=self.last()
    }

    /// Extend the run by one identifier at the end. The caller must have
    /// checked that `last() + 1` exists.
    fn extend(&mut self) {
        self.length += 1;
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.base, self.length)
    }
}

/// Compress the given identifiers into runs of consecutive identifiers.
///
/// The scan looks at neighbouring elements of `ids` only. A run is
/// extended when the current identifier is exactly one more than the
/// previous element of the list; anything else (a gap, a repeat, a step
/// backwards) closes the pending run and opens a new one at the current
/// identifier. An empty input yields no runs.
///
/// ```
/// use baos_client::runs::{compress, Run};
///
/// let runs = compress(&[255, 256, 243, 477, 478, 479, 480, 4]);
/// let expected = [(255, 2), (243, 1), (477, 4), (4, 1)]
///     .map(|(base, length)| Run::new(base, length).unwrap());
/// assert_eq!(runs, expected);
/// ```
pub fn compress(ids: &[u32]) -> Vec<Run> {
    let Some((&first, rest)) = ids.split_first() else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    let mut pending = Run::single(first);
    let mut previous = first;

    for &id in rest {
        if previous.checked_add(1) == Some(id) {
            pending.extend();
        } else {
            runs.push(pending);
            pending = Run::single(id);
        }
        previous = id;
    }

    runs.push(pending);
    runs
}

/// Expand the runs back into the list of identifiers they cover, in run
/// order. This is the inverse of [`compress`].
pub fn expand(runs: &[Run]) -> Vec<u32> {
    runs.iter().flat_map(Run::ids).collect()
}
