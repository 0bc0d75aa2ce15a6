use grayproc_image::{Image, ImageError, ImageSize};

use crate::filter::{kernels::GAUSSIAN_5, separable_filter_with_strategy};
use crate::parallel::{self, ExecutionStrategy};

/// Interpolation used by [`upsample_2x`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsampleMode {
    /// Source values at even positions, zeros elsewhere.
    None,
    /// Every source pixel fills its 2x2 output block.
    Nearest,
    /// Zero insertion followed by the pyramid low-pass, scaled by 4.
    Gaussian,
    /// Bilinear interpolation. Not implemented.
    Linear,
}

/// Size of the image produced by [`downsample_2x`]: every second row and column from 0.
pub fn downsampled_size(size: ImageSize) -> ImageSize {
    ImageSize {
        width: size.width.div_ceil(2),
        height: size.height.div_ceil(2),
    }
}

/// Size of the image produced by [`upsample_2x`].
pub fn upsampled_size(size: ImageSize) -> ImageSize {
    ImageSize {
        width: size.width * 2,
        height: size.height * 2,
    }
}

fn check_dst_size(expected: ImageSize, dst: &Image<f32, 1>) -> Result<(), ImageError> {
    if dst.size() != expected {
        return Err(ImageError::InvalidImageSize(
            expected.width,
            expected.height,
            dst.width(),
            dst.height(),
        ));
    }
    Ok(())
}

/// Blur an image with the pyramid low-pass and keep every second row and column.
///
/// The low-pass is the separable 5-tap kernel `[1, 4, 6, 4, 1] / 16` with zero padding.
/// Output pixel `(r, c)` is the blurred input pixel `(2r, 2c)`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (ceil(H / 2), ceil(W / 2)).
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
pub fn downsample_2x_with_strategy(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    check_dst_size(downsampled_size(src.size()), dst)?;

    log::debug!("downsample_2x: {} -> {}", src.size(), dst.size());

    let mut blurred = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    separable_filter_with_strategy(src, &mut blurred, &GAUSSIAN_5, None, strategy)?;

    let src_cols = src.cols();
    let blurred = blurred.as_slice();
    let dst_cols = dst.cols();
    parallel::for_each_row(dst.as_slice_mut(), dst_cols, strategy, |r, dst_row| {
        let src_row = &blurred[2 * r * src_cols..(2 * r + 1) * src_cols];
        dst_row
            .iter_mut()
            .zip(src_row.iter().step_by(2))
            .for_each(|(out, &v)| *out = v);
    });

    Ok(())
}

/// Downsample an image by a factor of 2 in each dimension.
///
/// Uses `ExecutionStrategy::Auto`. See [`downsample_2x_with_strategy`].
///
/// # Example
///
/// ```
/// use grayproc_image::{Image, ImageSize};
/// use grayproc_imgproc::pyramid::{downsample_2x, downsampled_size};
///
/// let src = Image::<f32, 1>::from_size_val(ImageSize { width: 5, height: 4 }, 1.0).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(downsampled_size(src.size()), 0.0).unwrap();
///
/// downsample_2x(&src, &mut dst).unwrap();
///
/// assert_eq!(dst.size(), ImageSize { width: 3, height: 2 });
/// ```
pub fn downsample_2x(src: &Image<f32, 1>, dst: &mut Image<f32, 1>) -> Result<(), ImageError> {
    downsample_2x_with_strategy(src, dst, ExecutionStrategy::Auto)
}

/// Downsample an image by a factor of 4 by applying [`downsample_2x`] twice.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with the size of two [`downsampled_size`] steps.
pub fn downsample_4x(src: &Image<f32, 1>, dst: &mut Image<f32, 1>) -> Result<(), ImageError> {
    let half_size = downsampled_size(src.size());
    check_dst_size(downsampled_size(half_size), dst)?;

    let mut half = Image::<f32, 1>::from_size_val(half_size, 0.0)?;
    downsample_2x(src, &mut half)?;
    downsample_2x(&half, dst)
}

/// Write `src` at the even positions of `dst` and zeros elsewhere.
fn zero_insert(src: &Image<f32, 1>, dst: &mut Image<f32, 1>, strategy: ExecutionStrategy) {
    let src_cols = src.cols();
    let src_data = src.as_slice();
    let dst_cols = dst.cols();
    parallel::for_each_row(dst.as_slice_mut(), dst_cols, strategy, |r, dst_row| {
        dst_row.fill(0.0);
        if r % 2 == 1 {
            return;
        }
        let src_row = &src_data[(r / 2) * src_cols..(r / 2 + 1) * src_cols];
        dst_row
            .iter_mut()
            .step_by(2)
            .zip(src_row.iter())
            .for_each(|(out, &v)| *out = v);
    });
}

/// Upsample an image by a factor of 2 in each dimension.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (2H, 2W).
/// * `mode` - The [`UpsampleMode`].
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
///
/// # Errors
///
/// * [`ImageError::NotImplemented`] for [`UpsampleMode::Linear`], whatever the input.
/// * [`ImageError::InvalidImageSize`] if `dst` is not twice the size of `src`.
pub fn upsample_2x_with_strategy(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    mode: UpsampleMode,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    if mode == UpsampleMode::Linear {
        return Err(ImageError::NotImplemented("linear upsampling"));
    }

    check_dst_size(upsampled_size(src.size()), dst)?;

    log::debug!("upsample_2x: {} -> {} ({:?})", src.size(), dst.size(), mode);

    match mode {
        UpsampleMode::None => zero_insert(src, dst, strategy),
        UpsampleMode::Nearest => {
            let src_cols = src.cols();
            let src_data = src.as_slice();
            let dst_cols = dst.cols();
            parallel::for_each_row(dst.as_slice_mut(), dst_cols, strategy, |r, dst_row| {
                let src_row = &src_data[(r / 2) * src_cols..(r / 2 + 1) * src_cols];
                dst_row
                    .chunks_exact_mut(2)
                    .zip(src_row.iter())
                    .for_each(|(block, &v)| block.fill(v));
            });
        }
        UpsampleMode::Gaussian => {
            let mut inserted = Image::<f32, 1>::from_size_val(dst.size(), 0.0)?;
            zero_insert(src, &mut inserted, strategy);
            separable_filter_with_strategy(&inserted, dst, &GAUSSIAN_5, None, strategy)?;
            dst.as_slice_mut().iter_mut().for_each(|v| *v *= 4.0);
        }
        UpsampleMode::Linear => return Err(ImageError::NotImplemented("linear upsampling")),
    }

    Ok(())
}

/// Upsample an image by a factor of 2 in each dimension.
///
/// Uses `ExecutionStrategy::Auto`. See [`upsample_2x_with_strategy`].
///
/// # Example
///
/// ```
/// use grayproc_image::{Image, ImageSize};
/// use grayproc_imgproc::pyramid::{upsample_2x, upsampled_size, UpsampleMode};
///
/// let src = Image::<f32, 1>::new(ImageSize { width: 2, height: 1 }, vec![1.0, 2.0]).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(upsampled_size(src.size()), 0.0).unwrap();
///
/// upsample_2x(&src, &mut dst, UpsampleMode::Nearest).unwrap();
///
/// assert_eq!(dst.as_slice(), &[1.0, 1.0, 2.0, 2.0, 1.0, 1.0, 2.0, 2.0]);
/// ```
pub fn upsample_2x(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    mode: UpsampleMode,
) -> Result<(), ImageError> {
    upsample_2x_with_strategy(src, dst, mode, ExecutionStrategy::Auto)
}

/// Upsample an image by a factor of 4 by applying [`upsample_2x`] twice with the same mode.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (4H, 4W).
/// * `mode` - The [`UpsampleMode`] of both steps.
pub fn upsample_4x(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    mode: UpsampleMode,
) -> Result<(), ImageError> {
    if mode == UpsampleMode::Linear {
        return Err(ImageError::NotImplemented("linear upsampling"));
    }

    let double_size = upsampled_size(src.size());
    check_dst_size(upsampled_size(double_size), dst)?;

    let mut double = Image::<f32, 1>::from_size_val(double_size, 0.0)?;
    upsample_2x(src, &mut double, mode)?;
    upsample_2x(&double, dst, mode)
}
