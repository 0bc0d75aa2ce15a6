use rayon::prelude::*;

/// Number of pixels from which [`ExecutionStrategy::Auto`] switches to parallel execution.
pub const AUTO_PARALLEL_MIN_PIXELS: usize = 100_000;

/// Controls how the row loops of an operation are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process output rows in parallel.
    Parallel,

    /// Parallel for images with at least [`AUTO_PARALLEL_MIN_PIXELS`] pixels, serial otherwise.
    #[default]
    Auto,
}

impl ExecutionStrategy {
    /// Whether an image with `num_pixels` pixels should be processed in parallel.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Auto => num_pixels >= AUTO_PARALLEL_MIN_PIXELS,
        }
    }
}

/// Apply `f(row_index, row)` to every row of a row-major buffer with `cols` columns.
///
/// The rows are visited in parallel or serially depending on `strategy`. `f` must not
/// depend on the order the rows are visited in.
pub fn for_each_row<T, F>(data: &mut [T], cols: usize, strategy: ExecutionStrategy, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if cols == 0 {
        return;
    }

    if strategy.is_parallel(data.len()) {
        log::trace!("row loop: parallel over {} rows", data.len() / cols);
        data.par_chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    } else {
        data.chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    }
}
