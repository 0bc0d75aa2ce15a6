use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use grayproc_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major with shape (H, W, C), where H is the height of the image,
/// W the width and C the number of channels.
///
/// With the `serde` feature, deserialization goes through [`Image::new`] and rejects
/// payloads whose data length does not match the size.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use grayproc_image::{Image, ImageSize};
    ///
    /// let image = Image::<f32, 1>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0f32; 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 1);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        if data.len() != size.width * size.height * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and a constant pixel value.
    ///
    /// # Examples
    ///
    /// ```
    /// use grayproc_image::{Image, ImageSize};
    ///
    /// let image = Image::<f32, 1>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0.0).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Create a new image by evaluating `f(row, col, channel)` on every sample.
    pub fn from_fn(
        size: ImageSize,
        mut f: impl FnMut(usize, usize, usize) -> T,
    ) -> Result<Self, ImageError> {
        let mut data = Vec::with_capacity(size.width * size.height * CHANNELS);
        for r in 0..size.height {
            for c in 0..size.width {
                for ch in 0..CHANNELS {
                    data.push(f(r, c, ch));
                }
            }
        }
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable row-major slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get a reference to the sample at `[row, col, channel]`, or `None` if out of bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [r, c, ch] = index;
        if r >= self.rows() || c >= self.cols() || ch >= CHANNELS {
            return None;
        }
        self.data.get((r * self.cols() + c) * CHANNELS + ch)
    }

    /// Get the pixel value at column `x`, row `y` and channel `ch`.
    ///
    /// # Errors
    ///
    /// If the coordinates or the channel are out of bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        Ok(self.data[(y * self.width() + x) * CHANNELS + ch])
    }

    /// Set the pixel value at column `x`, row `y` and channel `ch`.
    ///
    /// # Errors
    ///
    /// If the coordinates or the channel are out of bounds, an error is returned.
    pub fn set_pixel(&mut self, x: usize, y: usize, ch: usize, val: T) -> Result<(), ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        let idx = (y * self.width() + x) * CHANNELS + ch;
        self.data[idx] = val;
        Ok(())
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Errors
    ///
    /// If a value cannot be represented in the target type, an error is returned.
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, casted_data)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.area(), 200);
        assert_eq!(ImageSize::from([10, 20]), image_size);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0f32; 10 * 20],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.rows(), 20);
        assert_eq!(image.cols(), 10);
        assert_eq!(image.num_channels(), 1);

        Ok(())
    }

    #[test]
    fn image_invalid_data_length() {
        let res = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0f32; 5],
        );
        assert_eq!(res, Err(ImageError::InvalidChannelShape(5, 6)));
    }

    #[test]
    fn image_from_fn() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_fn(
            ImageSize {
                width: 3,
                height: 2,
            },
            |r, c, _| (r * 10 + c) as f32,
        )?;
        assert_eq!(image.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(image.get([1, 2, 0]), Some(&12.0));
        assert_eq!(image.get([2, 0, 0]), None);
        Ok(())
    }

    #[test]
    fn image_pixel_access() -> Result<(), ImageError> {
        let mut image = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;
        image.set_pixel(1, 0, 0, 5.0)?;
        assert_eq!(image.get_pixel(1, 0, 0)?, 5.0);
        assert_eq!(image.as_slice(), &[0.0, 5.0, 0.0, 0.0]);
        assert_eq!(
            image.get_pixel(2, 0, 0),
            Err(ImageError::PixelIndexOutOfBounds(2, 0, 2, 2))
        );
        assert_eq!(
            image.set_pixel(0, 0, 1, 1.0),
            Err(ImageError::ChannelIndexOutOfBounds(1, 1))
        );
        Ok(())
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let image_u8 = Image::<u8, 1>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            vec![3, 5],
        )?;
        let image_f32: Image<f32, 1> = image_u8.cast()?;
        assert_eq!(image_f32.get([1, 0, 0]), Some(&5.0f32));

        let image_back: Image<u8, 1> = image_f32.cast()?;
        assert_eq!(image_back, image_u8);

        let negative = Image::<f32, 1>::from_size_val(image_u8.size(), -1.0)?;
        assert_eq!(negative.cast::<u8>(), Err(ImageError::CastError));

        Ok(())
    }
}
