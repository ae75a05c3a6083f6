use std::collections::HashMap;

use crate::application::ports::ExtractedImage;
use crate::domain::ImageHandle;

/// Images extracted from one document, addressable by archive entry name or
/// by enumeration position.
#[derive(Debug, Clone, Default)]
pub struct ImageCatalog {
    images: Vec<ExtractedImage>,
    by_name: HashMap<String, usize>,
}

impl ImageCatalog {
    pub fn new(images: Vec<ExtractedImage>) -> Self {
        let by_name = images
            .iter()
            .enumerate()
            .map(|(index, image)| (image.entry_name.clone(), index))
            .collect();
        Self { images, by_name }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Resolves an image block. A named reference must match an entry; an
    /// empty reference falls back to the `ordinal`-th image in archive order.
    pub fn resolve(&self, reference: &str, ordinal: usize) -> Option<(usize, &ImageHandle)> {
        let index = if reference.is_empty() {
            ordinal
        } else {
            *self.by_name.get(reference)?
        };
        self.images.get(index).map(|image| (index, &image.handle))
    }
}
