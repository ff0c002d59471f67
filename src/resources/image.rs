use std::sync::Arc;

fn byte_len(width: u32, height: u32, components: u32) -> usize {
    width as usize * height as usize * components as usize
}

/// Raw pixel storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    components: u32,
    pixels: Vec<u8>,
}

impl ImageData {
    /// Zero-filled image with `components` bytes per pixel.
    #[must_use]
    pub fn new(width: u32, height: u32, components: u32) -> Self {
        Self {
            width,
            height,
            components,
            pixels: vec![0; byte_len(width, height, components)],
        }
    }

    /// Wraps existing pixels. Returns `None` if the length does not match.
    #[must_use]
    pub fn from_pixels(width: u32, height: u32, components: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != byte_len(width, height, components) {
            return None;
        }
        Some(Self {
            width,
            height,
            components,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn components(&self) -> u32 {
        self.components
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Resizes the pixel buffer; existing contents are discarded.
    pub fn set_size(&mut self, width: u32, height: u32, components: u32) {
        self.width = width;
        self.height = height;
        self.components = components;
        self.pixels.clear();
        self.pixels.resize(byte_len(width, height, components), 0);
    }
}

/// Image payload object.
///
/// Copies of an `Image` share their pixel storage until one of them is
/// written through [`Image::data_mut`] (copy-on-write via `Arc::make_mut`).
#[derive(Debug, Clone, Default)]
pub struct Image {
    data: Arc<ImageData>,
}

impl Image {
    #[must_use]
    pub fn new(data: ImageData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    /// Wraps storage that is already shared with other owners.
    #[must_use]
    pub fn from_shared(data: Arc<ImageData>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &ImageData {
        &self.data
    }

    /// Mutable access; detaches from any other image sharing the storage.
    pub fn data_mut(&mut self) -> &mut ImageData {
        Arc::make_mut(&mut self.data)
    }

    pub fn shared_data(&self) -> &Arc<ImageData> {
        &self.data
    }

    #[must_use]
    pub fn shares_data_with(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub fn set_size(&mut self, width: u32, height: u32, components: u32) {
        self.data_mut().set_size(width, height, components);
    }
}
