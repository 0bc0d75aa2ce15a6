use grayproc_image::{Image, ImageError};

use super::Transform;
use crate::parallel::{self, ExecutionStrategy};

/// Sample `src` at the nearest pixel of `(x, y)`, or `0.0` if it lies outside the image.
fn sample_nearest(src: &Image<f32, 1>, x: f32, y: f32) -> f32 {
    let (u, v) = (x.round(), y.round());

    // also rejects NaN and infinities
    if u >= 0.0 && u < src.cols() as f32 && v >= 0.0 && v < src.rows() as f32 {
        src.as_slice()[v as usize * src.cols() + u as usize]
    } else {
        0.0
    }
}

/// Applies a geometric transformation to an image by inverse mapping.
///
/// For every destination pixel `(x, y)` the source position is
/// `inverse(transform) · [x, y, 1]`, divided by its homogeneous coordinate and rounded
/// to the nearest pixel. Destination pixels whose source position falls outside `src`
/// are set to `0.0`.
///
/// The output size is the size of `dst`; allocate `dst` with `src.size()` to keep the
/// input size.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W).
/// * `dst` - The output image with shape (H', W').
/// * `transform` - The transformation mapping source to destination coordinates.
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
///
/// # Errors
///
/// Returns [`ImageError::SingularTransform`] if the transform cannot be inverted.
pub fn warp_with_strategy(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    transform: &Transform,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    let inv = transform.inverse()?;

    log::debug!(
        "warp: {} -> {} with {:?}",
        src.size(),
        dst.size(),
        transform.as_array()
    );

    let cols = dst.cols();
    parallel::for_each_row(dst.as_slice_mut(), cols, strategy, |r, dst_row| {
        for (c, out) in dst_row.iter_mut().enumerate() {
            let (x, y) = inv.transform_point(c as f32, r as f32);
            *out = sample_nearest(src, x, y);
        }
    });

    Ok(())
}

/// Applies a geometric transformation to an image by inverse mapping.
///
/// Uses `ExecutionStrategy::Auto`. See [`warp_with_strategy`].
///
/// # Example
///
/// ```
/// use grayproc_image::{Image, ImageSize};
/// use grayproc_imgproc::warp::{warp, Transform};
///
/// let src = Image::<f32, 1>::new(
///   ImageSize {
///     width: 2,
///     height: 3,
///   },
///   vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
/// ).unwrap();
///
/// // horizontal flip
/// let m = Transform::from_block(2, 3, &[-1.0, 0.0, 1.0, 0.0, 1.0, 0.0]).unwrap();
///
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
/// warp(&src, &mut dst, &m).unwrap();
///
/// assert_eq!(dst.as_slice(), &[1.0, 0.0, 3.0, 2.0, 5.0, 4.0]);
/// ```
pub fn warp(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    transform: &Transform,
) -> Result<(), ImageError> {
    warp_with_strategy(src, dst, transform, ExecutionStrategy::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grayproc_image::ImageSize;

    fn ramp(size: ImageSize) -> Result<Image<f32, 1>, ImageError> {
        Image::from_fn(size, |r, c, _| (r * size.width + c) as f32)
    }

    #[test]
    fn warp_identity() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 5,
        };
        let image = ramp(size)?;
        let mut dst = Image::from_size_val(size, -1.0)?;

        warp(&image, &mut dst, &Transform::identity())?;

        assert_eq!(dst, image);
        Ok(())
    }

    #[test]
    fn warp_output_size() -> Result<(), ImageError> {
        let image = ramp(ImageSize {
            width: 4,
            height: 5,
        })?;
        let new_size = ImageSize {
            width: 2,
            height: 3,
        };
        let mut dst = Image::from_size_val(new_size, 0.0)?;

        warp(&image, &mut dst, &Transform::identity())?;

        assert_eq!(dst.size(), new_size);
        assert_eq!(dst.as_slice(), &[0.0, 1.0, 4.0, 5.0, 8.0, 9.0]);
        Ok(())
    }

    #[test]
    fn warp_shift_fills_background() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let image = ramp(size)?;

        // shift left by 1 pixel
        let m = Transform::translation(-1.0, 0.0);
        let mut dst = Image::from_size_val(size, -1.0)?;
        warp(&image, &mut dst, &m)?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                1.0, 2.0, 3.0, 0.0,
                5.0, 6.0, 7.0, 0.0,
                9.0, 10.0, 11.0, 0.0,
                13.0, 14.0, 15.0, 0.0,
            ]
        );
        Ok(())
    }

    #[test]
    fn warp_scale_down() -> Result<(), ImageError> {
        let image = ramp(ImageSize {
            width: 4,
            height: 4,
        })?;

        // destination = source / 3
        let m = Transform::from_block(2, 2, &[1.0 / 3.0, 0.0, 0.0, 1.0 / 3.0])?;
        let mut dst = Image::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;
        warp(&image, &mut dst, &m)?;

        assert_eq!(dst.as_slice(), &[0.0, 3.0, 12.0, 15.0]);
        Ok(())
    }

    #[test]
    fn warp_out_of_bounds_is_zero() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let image = Image::from_size_val(size, 1.0)?;

        for m in [
            Transform::translation(100.0, -100.0),
            Transform::translation(-3.0, 0.0),
            Transform::from_block(2, 2, &[1e-6, 0.0, 0.0, 1e-6])?,
        ] {
            let mut dst = Image::from_size_val(size, -1.0)?;
            warp(&image, &mut dst, &m)?;
            assert!(
                dst.as_slice().iter().skip(1).all(|&v| v == 0.0),
                "{:?}",
                dst.as_slice()
            );
        }
        Ok(())
    }

    #[test]
    fn warp_singular() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let image = Image::from_size_val(size, 1.0)?;
        let mut dst = Image::from_size_val(size, 0.0)?;

        let m = Transform::from_block(2, 2, &[0.0, 0.0, 0.0, 1.0])?;
        assert_eq!(
            warp(&image, &mut dst, &m),
            Err(ImageError::SingularTransform)
        );
        Ok(())
    }

    #[test]
    fn warp_strategies_agree() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 9,
            height: 7,
        };
        let image = ramp(size)?;
        let m = Transform::rotation((4.0, 3.0), 30.0, 1.2);

        let mut serial = Image::from_size_val(size, 0.0)?;
        warp_with_strategy(&image, &mut serial, &m, ExecutionStrategy::Serial)?;
        let mut parallel = Image::from_size_val(size, 0.0)?;
        warp_with_strategy(&image, &mut parallel, &m, ExecutionStrategy::Parallel)?;

        assert_eq!(serial, parallel);
        Ok(())
    }
}
