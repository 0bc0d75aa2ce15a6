/// An error type for the image and image processing crates.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image size does not match the expected one.
    #[error("Invalid image size. Expected ({0}, {1}), got ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the pixel data cannot be cast to the target type.
    #[error("Failed to cast image data")]
    CastError,

    /// Error when a 2D kernel has an even side length or is empty.
    #[error("Invalid kernel shape ({0}, {1}). Both sides must be odd")]
    InvalidKernelShape(usize, usize),

    /// Error when a 1D kernel has an even length or is empty.
    #[error("Invalid kernel length ({0}). It must be odd")]
    InvalidKernelLength(usize),

    /// Error when a 2D kernel does not fit inside the image.
    #[error("Kernel ({0}, {1}) is larger than the image ({2}, {3})")]
    KernelLargerThanImage(usize, usize, usize, usize),

    /// Error when the kernel data does not match its shape.
    #[error("Kernel data length ({0}) does not match its shape ({1})")]
    InvalidKernelData(usize, usize),

    /// Error when a transformation block is not 2x2, 2x3, 3x2 or 3x3.
    #[error("Invalid transform shape ({0}, {1}). Rows and cols must be 2 or 3")]
    InvalidTransformShape(usize, usize),

    /// Error when the transformation data does not match its shape.
    #[error("Transform data length ({0}) does not match its shape ({1})")]
    InvalidTransformData(usize, usize),

    /// Error when the transformation matrix cannot be inverted.
    #[error("Transformation matrix is singular")]
    SingularTransform,

    /// Error when no point correspondences are given.
    #[error("Correspondence set is empty")]
    EmptyCorrespondences,

    /// Error when a requested mode is not implemented.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}
