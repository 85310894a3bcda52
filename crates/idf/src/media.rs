use crate::SharedData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

/// Index of an item in a [`MediaStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub data: SharedData,
    pub format: ImageFormat,
    pub width_px: u32,
    pub height_px: u32,
}

/// Encoded images referenced by the document, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MediaStore {
    items: Vec<MediaItem>,
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: MediaItem) -> MediaId {
        self.items.push(item);
        MediaId(self.items.len() - 1)
    }

    pub fn get(&self, id: MediaId) -> Option<&MediaItem> {
        self.items.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MediaId, &MediaItem)> {
        self.items.iter().enumerate().map(|(i, m)| (MediaId(i), m))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Conventional part name, e.g. `media/image3.jpeg`.
    pub fn part_name(id: MediaId, format: ImageFormat) -> String {
        format!("media/image{}.{}", id.0 + 1, format.extension())
    }
}
