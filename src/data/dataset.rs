use super::DataError;

/// A single supervised sample (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// An ordered, in-memory dataset of `(x, y)` pairs.
///
/// Columns are stored separately so the standardizer and the optimizer can
/// work on plain slices. The order of the samples is preserved, fold indexing
/// relies on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Dataset {
    /// The minimum amount of samples a dataset can be built with.
    pub const MIN_LEN: usize = 2;

    /// Creates a new dataset from owned columns.
    ///
    /// # Arguments
    /// * `xs` - The explanatory column.
    /// * `ys` - The observed column.
    ///
    /// # Returns
    /// A new `Dataset`.
    ///
    /// # Errors
    /// Returns `DataError::ColumnMismatch` if the columns differ in length and
    /// `DataError::TooFewSamples` if there are fewer than `MIN_LEN` samples.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, DataError> {
        if xs.len() != ys.len() {
            return Err(DataError::ColumnMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        if xs.len() < Self::MIN_LEN {
            return Err(DataError::TooFewSamples {
                got: xs.len(),
                expected: Self::MIN_LEN,
            });
        }

        Ok(Self { xs, ys })
    }

    /// Creates a new dataset from a list of samples.
    ///
    /// # Errors
    /// Same as `Dataset::new`.
    pub fn from_samples<I>(samples: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = Sample>,
    {
        let (xs, ys) = samples.into_iter().map(|s| (s.x, s.y)).unzip();
        Self::new(xs, ys)
    }

    /// Builds the subset made of the samples at `indices`, in the given order.
    ///
    /// The size invariant is not enforced here: callers (the fold partition)
    /// are the ones guaranteeing each subset is large enough.
    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        let xs = indices.iter().map(|&i| self.xs[i]).collect();
        let ys = indices.iter().map(|&i| self.ys[i]).collect();
        Self { xs, ys }
    }

    /// Builds a dataset from already validated columns.
    pub(crate) fn from_columns_unchecked(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        Self { xs, ys }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Returns the sample at `idx` (panics if out of bounds).
    #[inline]
    pub fn sample(&self, idx: usize) -> Sample {
        Sample {
            x: self.xs[idx],
            y: self.ys[idx],
        }
    }

    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Iterates over the samples in order.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| Sample { x, y })
    }
}
