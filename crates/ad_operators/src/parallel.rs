//! Parallel execution settings for the reduction kernels.
//!
//! Face rows are written independently, so the kernels split the output
//! into disjoint runs of rows and hand each run to a Rayon worker. Small
//! meshes stay on the calling thread, where task setup would dominate.

/// Minimum number of face rows handed to one worker.
///
/// Empirically tuned for cache efficiency.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Face count below which the kernels run serially.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Configuration for parallel execution.
///
/// # Examples
///
/// ```
/// use ad_operators::ParallelConfig;
///
/// let config = ParallelConfig::default().with_parallel_threshold(10_000);
/// assert!(!config.should_parallelize(5_000));
/// assert!(config.should_parallelize(10_000));
/// assert!(!ParallelConfig::serial().should_parallelize(usize::MAX - 1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParallelConfig {
    /// Minimum face rows per parallel task
    pub chunk_size: usize,
    /// Minimum face count before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(chunk_size: usize, parallel_threshold: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            parallel_threshold,
        }
    }

    /// Never parallelise.
    pub fn serial() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, usize::MAX)
    }

    /// Parallelise regardless of size. Mostly useful in tests.
    pub fn always_parallel() -> Self {
        Self::new(1, 0)
    }

    /// Sets the chunk size (clamped to at least 1).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Sets the parallel threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns whether to use parallel processing for the given face count.
    ///
    /// Always `false` when the crate is built without the `parallel` feature.
    #[inline]
    pub fn should_parallelize(&self, n_faces: usize) -> bool {
        cfg!(feature = "parallel") && n_faces >= self.parallel_threshold
    }

    /// Chunk size actually used, never zero even if the field was set to 0
    /// directly or by deserialisation.
    #[inline]
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}
