use grayproc_image::{Image, ImageError};

use crate::parallel::{self, ExecutionStrategy};

/// A separable 2D filter that applies a horizontal and a vertical 1D correlation sequentially.
///
/// This struct caches the kernel data and precomputed offsets for efficient filtering.
struct SeparableFilter<'a> {
    kernel_x: &'a [f32],
    kernel_y: &'a [f32],
    offsets_x: Vec<isize>,
    offsets_y: Vec<isize>,
}

impl<'a> SeparableFilter<'a> {
    /// Create a new separable filter with the given kernels.
    ///
    /// # Arguments
    ///
    /// * `kernel_x` - The horizontal kernel
    /// * `kernel_y` - The vertical kernel
    fn new(kernel_x: &'a [f32], kernel_y: &'a [f32]) -> Self {
        let half_x = (kernel_x.len() / 2) as isize;
        let half_y = (kernel_y.len() / 2) as isize;

        Self {
            kernel_x,
            kernel_y,
            offsets_x: (0..kernel_x.len() as isize).map(|i| i - half_x).collect(),
            offsets_y: (0..kernel_y.len() as isize).map(|i| i - half_y).collect(),
        }
    }

    /// Performs horizontal filtering followed by vertical filtering using a temporary buffer.
    fn apply(&self, src: &Image<f32, 1>, dst: &mut Image<f32, 1>, strategy: ExecutionStrategy) {
        let rows = src.rows();
        let cols = src.cols();
        let src_data = src.as_slice();
        let mut temp = vec![0.0f32; src_data.len()];

        // Horizontal
        parallel::for_each_row(&mut temp, cols, strategy, |r, row_temp| {
            let src_row = &src_data[r * cols..(r + 1) * cols];
            for (c, out) in row_temp.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (&k, &off) in self.kernel_x.iter().zip(self.offsets_x.iter()) {
                    let x = c as isize + off;
                    if x >= 0 && x < cols as isize {
                        acc += src_row[x as usize] * k;
                    }
                }
                *out = acc;
            }
        });

        // Vertical
        let temp = temp;
        parallel::for_each_row(dst.as_slice_mut(), cols, strategy, |r, row_dst| {
            row_dst.fill(0.0);
            for (&k, &off) in self.kernel_y.iter().zip(self.offsets_y.iter()) {
                let y = r as isize + off;
                if y >= 0 && y < rows as isize {
                    let temp_row = &temp[y as usize * cols..(y as usize + 1) * cols];
                    for (out, &v) in row_dst.iter_mut().zip(temp_row.iter()) {
                        *out += v * k;
                    }
                }
            }
        });
    }
}

fn check_kernel_1d(kernel: &[f32]) -> Result<(), ImageError> {
    if kernel.len() % 2 == 0 {
        return Err(ImageError::InvalidKernelLength(kernel.len()));
    }
    Ok(())
}

/// Apply a separable filter with execution strategy control.
///
/// The result equals correlating `src` with `kernel_x` as a `1 x n` row kernel and then
/// with `kernel_y` as a `m x 1` column kernel, both with zero padding. The kernels are not
/// flipped; pass symmetric kernels to get convolution semantics.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `kernel_x` - The kernel applied along rows.
/// * `kernel_y` - The kernel applied along columns. `None` reuses `kernel_x`.
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
///
/// # Errors
///
/// * [`ImageError::InvalidKernelLength`] if a kernel is empty or has an even length.
/// * [`ImageError::InvalidImageSize`] if `dst` and `src` differ in size.
pub fn separable_filter_with_strategy(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_x: &[f32],
    kernel_y: Option<&[f32]>,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    let kernel_y = kernel_y.unwrap_or(kernel_x);
    check_kernel_1d(kernel_x)?;
    check_kernel_1d(kernel_y)?;

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    log::debug!(
        "separable_filter: image {} kernels {}x{}",
        src.size(),
        kernel_x.len(),
        kernel_y.len()
    );

    SeparableFilter::new(kernel_x, kernel_y).apply(src, dst, strategy);

    Ok(())
}

/// Apply a separable filter to an image.
///
/// Uses `ExecutionStrategy::Auto` (parallel for images ≥100K pixels, serial otherwise).
/// For explicit control, use [`separable_filter_with_strategy`].
///
/// # Example
///
/// ```
/// use grayproc_image::{Image, ImageSize};
/// use grayproc_imgproc::filter::separable_filter;
///
/// let mut src = Image::<f32, 1>::from_size_val(ImageSize { width: 3, height: 3 }, 0.0).unwrap();
/// src.set_pixel(1, 1, 0, 1.0).unwrap();
///
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
/// separable_filter(&src, &mut dst, &[1.0, 2.0, 1.0], None).unwrap();
///
/// assert_eq!(dst.as_slice(), &[1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0]);
/// ```
pub fn separable_filter(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_x: &[f32],
    kernel_y: Option<&[f32]>,
) -> Result<(), ImageError> {
    separable_filter_with_strategy(src, dst, kernel_x, kernel_y, ExecutionStrategy::Auto)
}
