use crate::GridError;

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

impl GrayImageView<'_> {
    /// Check that the buffer length matches the declared dimensions.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width == 0 || self.height == 0 {
            return Err(GridError::EmptyDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.width * self.height;
        if self.data.len() != expected {
            return Err(GridError::BufferSizeMismatch {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }
}
