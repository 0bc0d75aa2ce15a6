use grayproc_image::ImageError;

/// Sobel kernel estimating the horizontal derivative when used with [`super::convolve`].
#[rustfmt::skip]
pub const SOBEL_X: [[f32; 3]; 3] = [
    [1.0, 0.0, -1.0],
    [2.0, 0.0, -2.0],
    [1.0, 0.0, -1.0],
];

/// Sobel kernel estimating the vertical derivative, the transpose of [`SOBEL_X`].
#[rustfmt::skip]
pub const SOBEL_Y: [[f32; 3]; 3] = [
    [ 1.0,  2.0,  1.0],
    [ 0.0,  0.0,  0.0],
    [-1.0, -2.0, -1.0],
];

/// 5-tap binomial low-pass kernel used by the pyramid operations.
pub const GAUSSIAN_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// A dense 2D filter kernel with odd height and width.
///
/// The weights are stored row-major. The anchor is the central element.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    data: Vec<f32>,
    height: usize,
    width: usize,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidKernelShape`] if a side is even or zero and
    /// [`ImageError::InvalidKernelData`] if `data` does not hold `height * width` weights.
    ///
    /// # Example
    ///
    /// ```
    /// use grayproc_imgproc::filter::Kernel;
    ///
    /// let kernel = Kernel::new(1, 3, vec![1.0, 2.0, 1.0]).unwrap();
    /// assert_eq!(kernel.width(), 3);
    /// assert!(Kernel::new(2, 2, vec![0.0; 4]).is_err());
    /// ```
    pub fn new(height: usize, width: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        if height % 2 == 0 || width % 2 == 0 {
            return Err(ImageError::InvalidKernelShape(height, width));
        }

        if data.len() != height * width {
            return Err(ImageError::InvalidKernelData(data.len(), height * width));
        }

        Ok(Self {
            data,
            height,
            width,
        })
    }

    /// Create a kernel from fixed-size rows, e.g. [`SOBEL_X`].
    pub fn from_rows<const H: usize, const W: usize>(
        rows: &[[f32; W]; H],
    ) -> Result<Self, ImageError> {
        Self::new(H, W, rows.iter().flatten().copied().collect())
    }

    /// The 1x1 kernel `[[1]]`.
    pub fn identity() -> Self {
        Self {
            data: vec![1.0],
            height: 1,
            width: 1,
        }
    }

    /// A kernel with every weight set to `value`.
    pub fn uniform(height: usize, width: usize, value: f32) -> Result<Self, ImageError> {
        Self::new(height, width, vec![value; height * width])
    }

    /// A `1 x n` kernel applied along image rows.
    pub fn row(weights: &[f32]) -> Result<Self, ImageError> {
        Self::new(1, weights.len(), weights.to_vec())
    }

    /// A `n x 1` kernel applied along image columns.
    pub fn column(weights: &[f32]) -> Result<Self, ImageError> {
        Self::new(weights.len(), 1, weights.to_vec())
    }

    /// Height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Half sizes `(height / 2, width / 2)`, i.e. the zero padding needed on each side.
    pub fn pad(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }

    /// Row-major weights.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Weight at row `r` and column `c`.
    pub fn at(&self, r: usize, c: usize) -> f32 {
        self.data[r * self.width + c]
    }

    /// The kernel flipped along both axes.
    pub fn flip(&self) -> Self {
        Self {
            data: self.data.iter().rev().copied().collect(),
            height: self.height,
            width: self.width,
        }
    }

    /// The transposed kernel.
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.width {
            for r in 0..self.height {
                data.push(self.at(r, c));
            }
        }
        Self {
            data,
            height: self.width,
            width: self.height,
        }
    }
}

/// Create a normalized box kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size as f32 - 1.0) / 2.0;
    let sigma_sq = sigma * sigma;

    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}
