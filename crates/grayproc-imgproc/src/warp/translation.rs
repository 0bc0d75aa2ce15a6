use grayproc_image::ImageError;

/// A pair of matching points, `src` in the source image and `dst` in the destination image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Correspondence {
    /// The `(x, y)` position in the source image.
    pub src: [f32; 2],
    /// The `(x, y)` position in the destination image.
    pub dst: [f32; 2],
}

impl From<([f32; 2], [f32; 2])> for Correspondence {
    fn from((src, dst): ([f32; 2], [f32; 2])) -> Self {
        Self { src, dst }
    }
}

/// Estimate the translation `(tx, ty)` as the mean displacement `dst - src`.
///
/// The result can be turned into a transform with [`super::Transform::translation`].
///
/// # Errors
///
/// Returns [`ImageError::EmptyCorrespondences`] if `correspondences` is empty.
///
/// # Example
///
/// ```
/// use grayproc_imgproc::warp::{estimate_translation, Correspondence};
///
/// let matches: Vec<Correspondence> = vec![
///     ([0.0, 0.0], [1.0, 1.0]).into(),
///     ([2.0, 2.0], [1.0, 1.0]).into(),
/// ];
///
/// assert_eq!(estimate_translation(&matches).unwrap(), (0.0, 0.0));
/// ```
pub fn estimate_translation(correspondences: &[Correspondence]) -> Result<(f32, f32), ImageError> {
    if correspondences.is_empty() {
        return Err(ImageError::EmptyCorrespondences);
    }

    let (sum_x, sum_y) = correspondences
        .iter()
        .fold((0.0f64, 0.0f64), |(sx, sy), m| {
            (
                sx + (m.dst[0] - m.src[0]) as f64,
                sy + (m.dst[1] - m.src[1]) as f64,
            )
        });

    let n = correspondences.len() as f64;
    let (tx, ty) = ((sum_x / n) as f32, (sum_y / n) as f32);

    log::debug!(
        "estimate_translation: {} correspondences -> ({}, {})",
        correspondences.len(),
        tx,
        ty
    );

    Ok((tx, ty))
}
