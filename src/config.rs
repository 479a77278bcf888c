//! Table configuration: the capacity ladder and the growth threshold.

use crate::error::ConfigError;

/// Prime capacities used when no ladder is supplied.
pub const DEFAULT_LADDER: [usize; 12] = [
    31, 61, 127, 251, 509, 1021, 2039, 4093, 8191, 16381, 32749, 65521,
];

/// Load factor above which the table moves to the next ladder capacity.
pub const DEFAULT_GROWTH_THRESHOLD: f32 = 0.73;

/// Construction-time configuration for a `FrequencyTable`.
///
/// `ladder` lists the bucket-array sizes the table may use, smallest
/// first. The table starts at `ladder[0]` and advances one rung each time
/// an insert finds the load factor above `growth_threshold`. A threshold
/// of exactly `1.0` disables growth altogether.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub ladder: Vec<usize>,
    pub growth_threshold: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            ladder: DEFAULT_LADDER.to_vec(),
            growth_threshold: DEFAULT_GROWTH_THRESHOLD,
        }
    }
}

impl TableConfig {
    pub fn new(ladder: impl Into<Vec<usize>>, growth_threshold: f32) -> Self {
        Self {
            ladder: ladder.into(),
            growth_threshold,
        }
    }

    pub fn with_ladder(mut self, ladder: impl Into<Vec<usize>>) -> Self {
        self.ladder = ladder.into();
        self
    }

    pub fn with_growth_threshold(mut self, growth_threshold: f32) -> Self {
        self.growth_threshold = growth_threshold;
        self
    }

    /// Returns the first problem found, checking the ladder before the
    /// threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_ladder(&self.ladder)?;
        validate_threshold(self.growth_threshold)
    }

    /// Validate once and split into the ladder cursor and the threshold.
    pub(crate) fn into_parts(self) -> Result<(CapacityLadder, f32), ConfigError> {
        self.validate()?;
        let ladder = CapacityLadder {
            sizes: self.ladder.into_boxed_slice(),
            cursor: 0,
        };
        Ok((ladder, self.growth_threshold))
    }
}

fn validate_ladder(ladder: &[usize]) -> Result<(), ConfigError> {
    match ladder.first() {
        None => return Err(ConfigError::EmptyLadder),
        Some(0) => return Err(ConfigError::ZeroCapacity),
        Some(_) => {}
    }
    for (i, pair) in ladder.windows(2).enumerate() {
        if pair[0] >= pair[1] {
            return Err(ConfigError::NotAscending {
                index: i + 1,
                previous: pair[0],
                next: pair[1],
            });
        }
    }
    Ok(())
}

fn validate_threshold(threshold: f32) -> Result<(), ConfigError> {
    // Written so that NaN is rejected too.
    if threshold > 0.0 && threshold <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange(threshold))
    }
}

/// Validated ladder plus the cursor naming the current capacity. The
/// cursor only moves forward and stops at the last rung.
#[derive(Debug, Clone)]
pub(crate) struct CapacityLadder {
    sizes: Box<[usize]>,
    cursor: usize,
}

impl CapacityLadder {
    #[inline]
    pub(crate) fn current(&self) -> usize {
        self.sizes[self.cursor]
    }

    /// The next rung, if the ladder is not exhausted.
    #[inline]
    pub(crate) fn peek_next(&self) -> Option<usize> {
        self.sizes.get(self.cursor + 1).copied()
    }

    pub(crate) fn advance(&mut self) {
        if self.cursor + 1 < self.sizes.len() {
            self.cursor += 1;
        }
    }

    pub(crate) fn as_slice(&self) -> &[usize] {
        &self.sizes
    }
}
