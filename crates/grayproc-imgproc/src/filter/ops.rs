use grayproc_image::{Image, ImageError};

use super::correlation::check_filter_shapes;
use super::{convolve_with_strategy, kernels, separable_filter_with_strategy, Kernel};
use crate::parallel::{self, ExecutionStrategy};

fn check_window_size(size: usize) -> Result<(), ImageError> {
    if size % 2 == 0 {
        return Err(ImageError::InvalidKernelShape(size, size));
    }
    Ok(())
}

/// Summed-area table of `src` with one leading row and column of zeros.
fn integral_image(src: &Image<f32, 1>) -> Vec<f64> {
    let (rows, cols) = (src.rows(), src.cols());
    let stride = cols + 1;
    let mut table = vec![0.0f64; (rows + 1) * stride];

    for r in 0..rows {
        let mut row_sum = 0.0f64;
        for c in 0..cols {
            row_sum += src.as_slice()[r * cols + c] as f64;
            table[(r + 1) * stride + c + 1] = table[r * stride + c + 1] + row_sum;
        }
    }

    table
}

/// Apply a square mean filter with zero padding.
///
/// The result matches correlating with a `size x size` kernel of weights `1 / size²`. Near
/// the borders the window covers padding zeros, so the mean is pulled down.
///
/// The window sums are read from a summed-area table, so the cost per pixel does not
/// depend on `size`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `size` - The odd side length of the window.
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
pub fn mean_filter_with_strategy(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    size: usize,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    check_window_size(size)?;
    check_filter_shapes(src, dst, size, size)?;

    log::debug!("mean_filter: image {} size {}", src.size(), size);

    let (rows, cols) = (src.rows(), src.cols());
    let half = size / 2;
    let stride = cols + 1;
    let norm = (size * size) as f64;
    let table = integral_image(src);

    parallel::for_each_row(dst.as_slice_mut(), cols, strategy, |r, dst_row| {
        let top = r.saturating_sub(half);
        let bottom = (r + half + 1).min(rows);
        for (c, out) in dst_row.iter_mut().enumerate() {
            let left = c.saturating_sub(half);
            let right = (c + half + 1).min(cols);
            let sum = table[bottom * stride + right]
                - table[top * stride + right]
                - table[bottom * stride + left]
                + table[top * stride + left];
            *out = (sum / norm) as f32;
        }
    });

    Ok(())
}

/// Apply a square mean filter with zero padding.
///
/// Uses `ExecutionStrategy::Auto`. See [`mean_filter_with_strategy`].
///
/// # Example
///
/// ```
/// use grayproc_image::{Image, ImageSize};
/// use grayproc_imgproc::filter::mean_filter;
///
/// let src = Image::<f32, 1>::from_size_val(ImageSize { width: 3, height: 3 }, 1.0).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// mean_filter(&src, &mut dst, 3).unwrap();
///
/// assert_eq!(dst.get_pixel(1, 1, 0).unwrap(), 1.0);
/// assert!((dst.get_pixel(0, 0, 0).unwrap() - 4.0 / 9.0).abs() < 1e-6);
/// ```
pub fn mean_filter(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    size: usize,
) -> Result<(), ImageError> {
    mean_filter_with_strategy(src, dst, size, ExecutionStrategy::Auto)
}

/// Apply a square maximum filter with zero padding.
///
/// Each pixel is replaced by the maximum of the `size x size` neighborhood. Padding
/// samples take part as zeros, so border pixels are never below `0.0`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `size` - The odd side length of the window.
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
pub fn maximum_filter_with_strategy(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    size: usize,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    check_window_size(size)?;
    check_filter_shapes(src, dst, size, size)?;

    log::debug!("maximum_filter: image {} size {}", src.size(), size);

    let (rows, cols) = (src.rows(), src.cols());
    let half = size / 2;
    let src_data = src.as_slice();

    // the max over a rectangle is the max over its rows of the row maxima
    let mut row_max = vec![0.0f32; src_data.len()];
    parallel::for_each_row(&mut row_max, cols, strategy, |r, out_row| {
        let src_row = &src_data[r * cols..(r + 1) * cols];
        for (c, out) in out_row.iter_mut().enumerate() {
            let left = c.saturating_sub(half);
            let right = (c + half + 1).min(cols);
            let padded = c < half || c + half >= cols;
            let init = if padded { 0.0 } else { f32::NEG_INFINITY };
            *out = src_row[left..right].iter().copied().fold(init, f32::max);
        }
    });

    let row_max = row_max;
    parallel::for_each_row(dst.as_slice_mut(), cols, strategy, |r, dst_row| {
        let top = r.saturating_sub(half);
        let bottom = (r + half + 1).min(rows);
        let padded = r < half || r + half >= rows;
        dst_row.fill(if padded { 0.0 } else { f32::NEG_INFINITY });
        for y in top..bottom {
            let max_row = &row_max[y * cols..(y + 1) * cols];
            for (out, &v) in dst_row.iter_mut().zip(max_row.iter()) {
                *out = out.max(v);
            }
        }
    });

    Ok(())
}

/// Apply a square maximum filter with zero padding.
///
/// Uses `ExecutionStrategy::Auto`. See [`maximum_filter_with_strategy`].
pub fn maximum_filter(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    size: usize,
) -> Result<(), ImageError> {
    maximum_filter_with_strategy(src, dst, size, ExecutionStrategy::Auto)
}

/// Compute the first order image derivatives in x and y using Sobel kernels.
///
/// `dx` is the convolution with [`kernels::SOBEL_X`] and `dy` the convolution with
/// [`kernels::SOBEL_Y`], both with zero padding. `dx` is positive where the intensity
/// increases to the right and `dy` where it increases downwards.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dx` - The horizontal derivative with shape (H, W).
/// * `dy` - The vertical derivative with shape (H, W).
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
pub fn gradient_with_strategy(
    src: &Image<f32, 1>,
    dx: &mut Image<f32, 1>,
    dy: &mut Image<f32, 1>,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    let sobel_x = Kernel::from_rows(&kernels::SOBEL_X)?;
    let sobel_y = Kernel::from_rows(&kernels::SOBEL_Y)?;

    convolve_with_strategy(src, dx, &sobel_x, strategy)?;
    convolve_with_strategy(src, dy, &sobel_y, strategy)?;

    Ok(())
}

/// Compute the first order image derivatives in x and y using Sobel kernels.
///
/// Uses `ExecutionStrategy::Auto`. See [`gradient_with_strategy`].
pub fn gradient(
    src: &Image<f32, 1>,
    dx: &mut Image<f32, 1>,
    dy: &mut Image<f32, 1>,
) -> Result<(), ImageError> {
    gradient_with_strategy(src, dx, dy, ExecutionStrategy::Auto)
}

/// Compute the Sobel gradient magnitude `sqrt(dx² + dy²)`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
pub fn gradient_magnitude_with_strategy(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    let mut gx = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    let mut gy = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    gradient_with_strategy(src, &mut gx, &mut gy, strategy)?;

    if dst.size() != src.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(gx.as_slice().iter())
        .zip(gy.as_slice().iter())
        .for_each(|((dst, &gx), &gy)| {
            *dst = (gx * gx + gy * gy).sqrt();
        });

    Ok(())
}

/// Compute the Sobel gradient magnitude `sqrt(dx² + dy²)`.
///
/// Uses `ExecutionStrategy::Auto`. See [`gradient_magnitude_with_strategy`].
pub fn gradient_magnitude(src: &Image<f32, 1>, dst: &mut Image<f32, 1>) -> Result<(), ImageError> {
    gradient_magnitude_with_strategy(src, dst, ExecutionStrategy::Auto)
}

/// Blur an image using a gaussian blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `kernel_size` - The odd size of the kernel (kernel_x, kernel_y).
/// * `sigma` - The sigma of the gaussian kernel, xy-ordered.
pub fn gaussian_blur(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_size: (usize, usize),
    sigma: (f32, f32),
) -> Result<(), ImageError> {
    let kernel_x = kernels::gaussian_kernel_1d(kernel_size.0, sigma.0);
    let kernel_y = kernels::gaussian_kernel_1d(kernel_size.1, sigma.1);
    separable_filter_with_strategy(
        src,
        dst,
        &kernel_x,
        Some(&kernel_y),
        ExecutionStrategy::Auto,
    )
}

/// Blur an image using a box blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `kernel_size` - The odd size of the kernel (kernel_x, kernel_y).
pub fn box_blur(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_size: (usize, usize),
) -> Result<(), ImageError> {
    let kernel_x = kernels::box_kernel_1d(kernel_size.0);
    let kernel_y = kernels::box_kernel_1d(kernel_size.1);
    separable_filter_with_strategy(
        src,
        dst,
        &kernel_x,
        Some(&kernel_y),
        ExecutionStrategy::Auto,
    )
}
