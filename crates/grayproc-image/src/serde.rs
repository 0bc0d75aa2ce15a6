use crate::image::{Image, ImageSize};

use serde::ser::SerializeStruct;
use serde::Deserialize;

impl<T, const CHANNELS: usize> serde::Serialize for Image<T, CHANNELS>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Image", 2)?;
        state.serialize_field("size", &self.size())?;
        state.serialize_field("data", self.as_slice())?;
        state.end()
    }
}

impl<'de, T, const CHANNELS: usize> serde::Deserialize<'de> for Image<T, CHANNELS>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ImageData<T> {
            size: ImageSize,
            data: Vec<T>,
        }

        let ImageData { size, data } = ImageData::deserialize(deserializer)?;

        // data.len() must equal width * height * CHANNELS
        Image::new(size, data).map_err(serde::de::Error::custom)
    }
}
