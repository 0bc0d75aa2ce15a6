use grayproc_image::ImageError;

/// A 3x3 homogeneous transformation mapping source pixel coordinates `(x, y)` to
/// destination pixel coordinates.
///
/// The matrix is stored row-major: `[m00, m01, m02, m10, m11, m12, m20, m21, m22]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    m: [f32; 9],
}

#[rustfmt::skip]
const IDENTITY: [f32; 9] = [
    1.0, 0.0, 0.0,
    0.0, 1.0, 0.0,
    0.0, 0.0, 1.0,
];

#[rustfmt::skip]
fn determinant3x3(m: &[f64; 9]) -> f64 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) -
    m[1] * (m[3] * m[8] - m[5] * m[6]) +
    m[2] * (m[3] * m[7] - m[4] * m[6])
}

#[rustfmt::skip]
fn adjugate3x3(m: &[f64; 9]) -> [f64; 9] {
    [
        m[4] * m[8] - m[5] * m[7],  // [0, 0]
        m[2] * m[7] - m[1] * m[8],  // [0, 1]
        m[1] * m[5] - m[2] * m[4],  // [0, 2]
        m[5] * m[6] - m[3] * m[8],  // [1, 0]
        m[0] * m[8] - m[2] * m[6],  // [1, 1]
        m[2] * m[3] - m[0] * m[5],  // [1, 2]
        m[3] * m[7] - m[4] * m[6],  // [2, 0]
        m[1] * m[6] - m[0] * m[7],  // [2, 1]
        m[0] * m[4] - m[1] * m[3],  // [2, 2]
    ]
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Wrap a row-major 3x3 matrix.
    pub fn new(m: [f32; 9]) -> Self {
        Self { m }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self { m: IDENTITY }
    }

    /// Build a transform from a leading `rows x cols` block with `rows, cols ∈ {2, 3}`.
    ///
    /// The block overwrites the top-left corner of the 3x3 identity; the remaining
    /// entries keep their identity values.
    ///
    /// # Errors
    ///
    /// * [`ImageError::InvalidTransformShape`] if `rows` or `cols` is not 2 or 3.
    /// * [`ImageError::InvalidTransformData`] if `data` does not hold `rows * cols` values.
    ///
    /// # Example
    ///
    /// ```
    /// use grayproc_imgproc::warp::Transform;
    ///
    /// let t = Transform::from_block(2, 3, &[1.0, 0.0, 5.0, 0.0, 1.0, -2.0]).unwrap();
    /// assert_eq!(t, Transform::translation(5.0, -2.0));
    /// ```
    pub fn from_block(rows: usize, cols: usize, data: &[f32]) -> Result<Self, ImageError> {
        if !(2..=3).contains(&rows) || !(2..=3).contains(&cols) {
            return Err(ImageError::InvalidTransformShape(rows, cols));
        }

        if data.len() != rows * cols {
            return Err(ImageError::InvalidTransformData(data.len(), rows * cols));
        }

        let mut m = IDENTITY;
        for r in 0..rows {
            m[r * 3..r * 3 + cols].copy_from_slice(&data[r * cols..(r + 1) * cols]);
        }

        Ok(Self { m })
    }

    /// Build a transform from a 2x3 affine matrix.
    pub fn from_affine(m: &[f32; 6]) -> Self {
        Self {
            m: [m[0], m[1], m[2], m[3], m[4], m[5], 0.0, 0.0, 1.0],
        }
    }

    /// A translation by `(tx, ty)` pixels.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0],
        }
    }

    /// A rotation of `angle` degrees around `center`, followed by a uniform `scale`.
    ///
    /// The matrix is defined as:
    ///
    /// | alpha  beta  tx |
    /// | -beta  alpha ty |
    /// |   0     0    1  |
    ///
    /// where:
    ///
    /// alpha = scale * cos(angle)
    /// beta = scale * sin(angle)
    /// tx = (1 - alpha) * center.x - beta * center.y
    /// ty = beta * center.x + (1 - alpha) * center.y
    pub fn rotation(center: (f32, f32), angle: f32, scale: f32) -> Self {
        let angle = angle.to_radians();
        let alpha = scale * angle.cos();
        let beta = scale * angle.sin();

        let tx = (1.0 - alpha) * center.0 - beta * center.1;
        let ty = beta * center.0 + (1.0 - alpha) * center.1;

        Self::from_affine(&[alpha, beta, tx, -beta, alpha, ty])
    }

    /// The row-major matrix entries.
    pub fn as_array(&self) -> &[f32; 9] {
        &self.m
    }

    /// The determinant of the matrix, computed in double precision.
    pub fn determinant(&self) -> f64 {
        determinant3x3(&self.m.map(f64::from))
    }

    /// The inverse transform.
    ///
    /// The adjugate and the determinant are computed in double precision, so large
    /// scales and tiny determinants that do not fit in `f32` are still handled.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::SingularTransform`] if the determinant is zero or not finite,
    /// or if an entry of the inverse is not representable as a finite `f32`.
    pub fn inverse(&self) -> Result<Self, ImageError> {
        let m = self.m.map(f64::from);
        let det = determinant3x3(&m);

        if det == 0.0 || !det.is_finite() {
            log::warn!("cannot invert transform {:?}: determinant {}", self.m, det);
            return Err(ImageError::SingularTransform);
        }

        let inv = adjugate3x3(&m).map(|v| (v / det) as f32);

        if inv.iter().any(|v| !v.is_finite()) {
            log::warn!("cannot invert transform {:?}: inverse overflows", self.m);
            return Err(ImageError::SingularTransform);
        }

        Ok(Self { m: inv })
    }

    /// The transform applying `other` first and `self` second.
    pub fn compose(&self, other: &Transform) -> Self {
        let (a, b) = (&self.m, &other.m);
        let mut m = [0.0; 9];
        for r in 0..3 {
            for c in 0..3 {
                m[r * 3 + c] = (0..3).map(|k| a[r * 3 + k] * b[k * 3 + c]).sum();
            }
        }
        Self { m }
    }

    /// Map the point `(x, y)` and divide by the homogeneous coordinate.
    ///
    /// Points sent to infinity come back as non-finite coordinates.
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.m;
        let w = m[6] * x + m[7] * y + m[8];
        let u = (m[0] * x + m[1] * y + m[2]) / w;
        let v = (m[3] * x + m[4] * y + m[5]) / w;
        (u, v)
    }
}
