use grayproc_image::{Image, ImageError};

use super::Kernel;
use crate::parallel::{self, ExecutionStrategy};

/// Check that `dst` matches `src` and that a `kernel_h x kernel_w` window fits in `src`.
pub(crate) fn check_filter_shapes(
    src: &Image<f32, 1>,
    dst: &Image<f32, 1>,
    kernel_h: usize,
    kernel_w: usize,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if kernel_h > src.rows() || kernel_w > src.cols() {
        return Err(ImageError::KernelLargerThanImage(
            kernel_h,
            kernel_w,
            src.rows(),
            src.cols(),
        ));
    }

    Ok(())
}

/// Correlate one output row `r` with the kernel.
fn correlate_row(src: &Image<f32, 1>, kernel: &Kernel, r: usize, dst_row: &mut [f32]) {
    let (rows, cols) = (src.rows() as isize, src.cols() as isize);
    let (pad_h, pad_w) = kernel.pad();
    let kernel_w = kernel.width();
    let src_data = src.as_slice();

    dst_row.fill(0.0);

    for ki in 0..kernel.height() {
        let y = r as isize + ki as isize - pad_h as isize;
        if y < 0 || y >= rows {
            continue;
        }

        let row_offset = y as usize * cols as usize;
        let src_row = &src_data[row_offset..row_offset + cols as usize];
        let weights = &kernel.data()[ki * kernel_w..(ki + 1) * kernel_w];

        for (c, out) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (kj, &w) in weights.iter().enumerate() {
                let x = c as isize + kj as isize - pad_w as isize;
                if x >= 0 && x < cols {
                    acc += w * src_row[x as usize];
                }
            }
            *out += acc;
        }
    }
}

/// Cross-correlate an image with a kernel using zero padding.
///
/// For every pixel `(i, j)`:
///
/// `dst[i, j] = sum(kernel[ki, kj] * src[i + ki - kh / 2, j + kj - kw / 2])`
///
/// where samples outside `src` are zero. The kernel is not flipped.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `kernel` - The filter kernel with odd sides.
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
///
/// # Errors
///
/// * [`ImageError::InvalidImageSize`] if `dst` and `src` differ in size.
/// * [`ImageError::KernelLargerThanImage`] if the kernel does not fit in `src`.
pub fn correlate_with_strategy(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    check_filter_shapes(src, dst, kernel.height(), kernel.width())?;

    log::debug!(
        "correlate: image {} kernel {}x{}",
        src.size(),
        kernel.height(),
        kernel.width()
    );

    let cols = dst.cols();
    parallel::for_each_row(dst.as_slice_mut(), cols, strategy, |r, dst_row| {
        correlate_row(src, kernel, r, dst_row)
    });

    Ok(())
}

/// Cross-correlate an image with a kernel using zero padding.
///
/// Uses `ExecutionStrategy::Auto`. See [`correlate_with_strategy`].
///
/// # Example
///
/// ```
/// use grayproc_image::{Image, ImageSize};
/// use grayproc_imgproc::filter::{correlate, Kernel};
///
/// let src = Image::<f32, 1>::new(
///     ImageSize { width: 3, height: 1 },
///     vec![1.0, 2.0, 3.0],
/// ).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// let kernel = Kernel::row(&[1.0, 0.0, 0.0]).unwrap();
/// correlate(&src, &mut dst, &kernel).unwrap();
///
/// // every pixel takes its left neighbor
/// assert_eq!(dst.as_slice(), &[0.0, 1.0, 2.0]);
/// ```
pub fn correlate(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel: &Kernel,
) -> Result<(), ImageError> {
    correlate_with_strategy(src, dst, kernel, ExecutionStrategy::Auto)
}

/// Convolve an image with a kernel using zero padding.
///
/// Equivalent to [`correlate_with_strategy`] with the kernel flipped along both axes.
pub fn convolve_with_strategy(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    correlate_with_strategy(src, dst, &kernel.flip(), strategy)
}

/// Convolve an image with a kernel using zero padding.
///
/// Uses `ExecutionStrategy::Auto`. See [`convolve_with_strategy`].
pub fn convolve(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel: &Kernel,
) -> Result<(), ImageError> {
    convolve_with_strategy(src, dst, kernel, ExecutionStrategy::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grayproc_image::ImageSize;

    fn ramp(size: ImageSize) -> Result<Image<f32, 1>, ImageError> {
        Image::from_fn(size, |r, c, _| (r * size.width + c) as f32)
    }

    #[test]
    fn test_correlate_identity() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        let img = ramp(size)?;
        let mut dst = Image::from_size_val(size, -1.0)?;

        correlate(&img, &mut dst, &Kernel::identity())?;

        assert_eq!(dst.as_slice(), img.as_slice());
        Ok(())
    }

    #[test]
    fn test_correlate_box_zero_padding() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let img = Image::from_size_val(size, 1.0)?;
        let mut dst = Image::from_size_val(size, 0.0)?;

        correlate(&img, &mut dst, &Kernel::uniform(3, 3, 1.0)?)?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                4.0, 6.0, 4.0,
                6.0, 9.0, 6.0,
                4.0, 6.0, 4.0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_correlate_does_not_flip() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let mut img = Image::from_size_val(size, 0.0)?;
        img.set_pixel(2, 2, 0, 1.0)?;

        #[rustfmt::skip]
        let kernel = Kernel::new(3, 3, vec![
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
            7.0, 8.0, 9.0,
        ])?;

        let mut corr = Image::from_size_val(size, 0.0)?;
        correlate(&img, &mut corr, &kernel)?;

        // an impulse answers with the flipped kernel
        #[rustfmt::skip]
        assert_eq!(
            corr.as_slice(),
            &[
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 9.0, 8.0, 7.0, 0.0,
                0.0, 6.0, 5.0, 4.0, 0.0,
                0.0, 3.0, 2.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
            ]
        );

        let mut conv = Image::from_size_val(size, 0.0)?;
        convolve(&img, &mut conv, &kernel)?;

        #[rustfmt::skip]
        assert_eq!(
            conv.as_slice(),
            &[
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 2.0, 3.0, 0.0,
                0.0, 4.0, 5.0, 6.0, 0.0,
                0.0, 7.0, 8.0, 9.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_correlate_rectangular_kernel() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        let img = ramp(size)?;
        let mut dst = Image::from_size_val(size, 0.0)?;

        // sum of the pixel above and below
        correlate(&img, &mut dst, &Kernel::column(&[1.0, 0.0, 1.0])?)?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                4.0, 5.0, 6.0, 7.0,
                8.0, 10.0, 12.0, 14.0,
                4.0, 5.0, 6.0, 7.0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_correlate_strategies_agree() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 7,
            height: 6,
        };
        let img = ramp(size)?;
        let kernel = Kernel::new(3, 5, (0..15).map(|x| x as f32 * 0.1).collect())?;

        let mut serial = Image::from_size_val(size, 0.0)?;
        correlate_with_strategy(&img, &mut serial, &kernel, ExecutionStrategy::Serial)?;

        let mut parallel = Image::from_size_val(size, 0.0)?;
        correlate_with_strategy(&img, &mut parallel, &kernel, ExecutionStrategy::Parallel)?;

        assert_eq!(serial.as_slice(), parallel.as_slice());
        Ok(())
    }

    #[test]
    fn test_correlate_shape_errors() -> Result<(), ImageError> {
        let img = Image::from_size_val(
            ImageSize {
                width: 4,
                height: 2,
            },
            0.0,
        )?;

        let mut wrong = Image::from_size_val(
            ImageSize {
                width: 2,
                height: 4,
            },
            0.0,
        )?;
        assert_eq!(
            correlate(&img, &mut wrong, &Kernel::identity()),
            Err(ImageError::InvalidImageSize(4, 2, 2, 4))
        );

        let mut dst = Image::from_size_val(img.size(), 0.0)?;
        assert_eq!(
            correlate(&img, &mut dst, &Kernel::uniform(3, 3, 1.0)?),
            Err(ImageError::KernelLargerThanImage(3, 3, 2, 4))
        );
        Ok(())
    }
}
