//! Loading of the piece icons and the two background tiles.
//!
//! All resources are read and decoded once, up front. A view is only ever
//! built from a complete set, so any missing or broken file fails the
//! whole load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use tracing::debug;

use crate::{unicode_char, PieceKind, Side};

/// File extension of every icon resource.
pub const ICON_EXTENSION: &str = "png";

/// Resource name of the tile drawn where `rank + file` is odd.
pub const LIGHT_TILE_RESOURCE: &str = "whiteTile.jpg";

/// Resource name of the tile drawn where `rank + file` is even.
pub const DARK_TILE_RESOURCE: &str = "blackTile.jpeg";

/// The resource name of the icon for a piece, e.g. `"whiteKnight.png"`.
pub fn icon_resource_name(side: Side, kind: PieceKind) -> String {
    format!("{}{}.{}", side.color(), kind.name(), ICON_EXTENSION)
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("resource '{name}' could not be read")]
    Missing {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("resource '{name}' is not a valid image")]
    Unreadable {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("resource '{name}' is neither a PNG nor a JPEG")]
    Unsupported { name: String },
}

/// Somewhere to read resources from by name.
pub trait AssetSource {
    fn read(&self, name: &str) -> std::io::Result<Vec<u8>>;
}

/// Reads resources from files in a directory.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirectorySource {
    fn read(&self, name: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.root.join(name))
    }
}

/// Resources held in memory, e.g. embedded with `include_bytes!`.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), bytes.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.files.remove(name)
    }
}

impl AssetSource for MemorySource {
    fn read(&self, name: &str) -> std::io::Result<Vec<u8>> {
        self.files.get(name).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("no resource {name}"))
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// The format a resource is stored in, going by its extension.
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// A fully decoded resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub name: String,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pixels: RgbaImage,
}

impl Image {
    /// Decodes every pixel of `bytes`, so truncated or corrupt files are
    /// rejected here and not when drawing.
    ///
    /// The format is chosen by the extension of `name`.
    pub fn decode(name: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        let format = ImageFormat::from_name(name).ok_or_else(|| AssetError::Unsupported {
            name: String::from(name),
        })?;
        let decoded = image::load_from_memory_with_format(bytes, format.into()).map_err(
            |source| AssetError::Unreadable {
                name: String::from(name),
                source,
            },
        )?;
        let pixels = decoded.to_rgba8();
        Ok(Self {
            name: String::from(name),
            format,
            width: pixels.width(),
            height: pixels.height(),
            pixels,
        })
    }

    /// The mean color over all pixels, ignoring alpha.
    pub fn average_rgb(&self) -> [u8; 3] {
        let mut sums = [0u64; 3];
        for pixel in self.pixels.pixels() {
            for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                *sum += u64::from(channel);
            }
        }
        let count = u64::from(self.width) * u64::from(self.height);
        sums.map(|sum| (sum / count.max(1)) as u8)
    }
}

/// A piece icon, cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Icon {
    side: Side,
    kind: PieceKind,
    image: Arc<Image>,
}

impl Icon {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// The Unicode chess symbol for text front ends.
    pub fn glyph(&self) -> char {
        unicode_char(self.side, self.kind)
    }
}

/// Which of the two background tiles a cell uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Light,
    Dark,
}

impl TileKind {
    /// The parity rule: light where `rank + file` is odd, dark otherwise.
    pub fn for_square(rank: usize, file: usize) -> Self {
        if (rank + file) % 2 == 1 {
            TileKind::Light
        } else {
            TileKind::Dark
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    kind: TileKind,
    image: Arc<Image>,
}

impl Tile {
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn image(&self) -> &Image {
        &self.image
    }
}

/// One icon for every piece kind of both playing sides.
#[derive(Clone, Debug)]
pub struct IconCache {
    // Indexed by side index * number of kinds + kind.
    icons: Vec<Icon>,
}

impl IconCache {
    /// Loads the icons for every playing side and piece kind.
    pub fn load(source: &impl AssetSource) -> Result<Self, AssetError> {
        let mut icons = Vec::with_capacity(Side::PLAYING.len() * PieceKind::ALL.len());
        for side in Side::PLAYING {
            for kind in PieceKind::ALL {
                let image = load_image(source, &icon_resource_name(side, kind))?;
                icons.push(Icon { side, kind, image });
            }
        }
        Ok(Self { icons })
    }

    /// Returns `None` only for [`Side::Unoccupied`].
    pub fn get(&self, side: Side, kind: PieceKind) -> Option<&Icon> {
        let idx = side.index()? * PieceKind::ALL.len() + kind as usize;
        self.icons.get(idx)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// The two background tiles.
#[derive(Clone, Debug)]
pub struct Tiles {
    light: Tile,
    dark: Tile,
}

impl Tiles {
    pub fn load(source: &impl AssetSource) -> Result<Self, AssetError> {
        Ok(Self {
            light: Tile {
                kind: TileKind::Light,
                image: load_image(source, LIGHT_TILE_RESOURCE)?,
            },
            dark: Tile {
                kind: TileKind::Dark,
                image: load_image(source, DARK_TILE_RESOURCE)?,
            },
        })
    }

    pub fn get(&self, kind: TileKind) -> &Tile {
        match kind {
            TileKind::Light => &self.light,
            TileKind::Dark => &self.dark,
        }
    }
}

/// Everything a view needs from disk.
#[derive(Clone, Debug)]
pub struct Assets {
    pub icons: IconCache,
    pub tiles: Tiles,
}

impl Assets {
    pub fn load(source: &impl AssetSource) -> Result<Self, AssetError> {
        let icons = IconCache::load(source)?;
        let tiles = Tiles::load(source)?;
        debug!(icons = icons.len(), "Loaded board assets");
        Ok(Self { icons, tiles })
    }
}

fn load_image(source: &impl AssetSource, name: &str) -> Result<Arc<Image>, AssetError> {
    let bytes = source.read(name).map_err(|source| AssetError::Missing {
        name: String::from(name),
        source,
    })?;
    Ok(Arc::new(Image::decode(name, &bytes)?))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::Cursor;

    use image::{DynamicImage, GrayImage, Luma, Rgba};

    use super::*;

    fn encode(image: DynamicImage, format: image::ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    /// A 2x2 black PNG.
    pub fn png() -> Vec<u8> {
        let icon = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        encode(DynamicImage::ImageRgba8(icon), image::ImageFormat::Png)
    }

    /// An 8x8 uniformly gray JPEG.
    pub fn jpeg() -> Vec<u8> {
        let tile = GrayImage::from_pixel(8, 8, Luma([200]));
        encode(DynamicImage::ImageLuma8(tile), image::ImageFormat::Jpeg)
    }

    /// A source with every resource a view needs.
    pub fn complete_source() -> MemorySource {
        let mut source = MemorySource::new();
        for side in Side::PLAYING {
            for kind in PieceKind::ALL {
                source.insert(icon_resource_name(side, kind), png());
            }
        }
        source.insert(LIGHT_TILE_RESOURCE, jpeg());
        source.insert(DARK_TILE_RESOURCE, jpeg());
        source
    }
}
