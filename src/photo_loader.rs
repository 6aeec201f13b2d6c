use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use exif::{In, Reader, Tag, Value};
use image::{DynamicImage, ImageFormat};
use crate::error::DeckError;
use crate::slide::{Media, MediaFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub dir: PathBuf,
}

// Decoded pixels plus the bytes embedded for them
#[derive(Debug, Clone)]
pub struct Photo {
    pub path: PathBuf,
    pub image: DynamicImage,
    pub media: Media,
}

// --- Helper: List and Sort Entity Folders ---
pub fn load_sorted_entities(root: &Path) -> Result<Vec<Entity>, DeckError> {
    let mut entities = Vec::new();
    let entries = fs::read_dir(root).map_err(|e| DeckError::io(root, e))?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(root = ?root, %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            entities.push(Entity {
                name: entry.file_name().to_string_lossy().into_owned(),
                dir: path,
            });
        }
    }
    entities.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entities)
}

// --- Helper: First `dir/base_name.ext` That Exists, Extensions Tried in Order ---
pub fn find_photo<S: AsRef<str>>(dir: &Path, base_name: &str, extensions: &[S]) -> Option<PathBuf> {
    extensions
        .iter()
        .map(|ext| dir.join(format!("{}.{}", base_name, ext.as_ref())))
        .find(|path| path.is_file())
}

pub fn load_photo(path: &Path) -> Result<Photo, DeckError> {
    let bytes = fs::read(path).map_err(|e| DeckError::io(path, e))?;
    decode_photo(path, bytes)
}

// --- Decode Photo, Apply EXIF Rotation, Pick Embeddable Bytes ---
pub fn decode_photo(path: &Path, bytes: Vec<u8>) -> Result<Photo, DeckError> {
    let format = image::guess_format(&bytes).map_err(|e| DeckError::decode(path, e))?;
    let mut image = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| DeckError::decode(path, e))?;

    let orientation = if format == ImageFormat::Jpeg {
        exif_orientation(path, &bytes)
    } else {
        1
    };

    // 1 = normal, 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW; flips are ignored
    match orientation {
        3 => image = image.rotate180(),
        6 => image = image.rotate90(),
        8 => image = image.rotate270(),
        _ => {}
    }

    let embeddable = match format {
        ImageFormat::Jpeg => Some(MediaFormat::Jpeg),
        ImageFormat::Png => Some(MediaFormat::Png),
        _ => None,
    };

    let rotated = matches!(orientation, 3 | 6 | 8);
    let media = match embeddable {
        Some(format) if !rotated => Media { bytes, format },
        _ => {
            tracing::debug!(path = ?path, orientation, "Re-encoding photo as PNG");
            let mut png = Vec::new();
            image
                .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
                .map_err(DeckError::Encode)?;
            Media { bytes: png, format: MediaFormat::Png }
        }
    };

    Ok(Photo { path: path.to_path_buf(), image, media })
}

fn exif_orientation(path: &Path, bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            // Most cameras write EXIF but plenty of exported JPEGs don't
            tracing::debug!(path = ?path, %e, "No EXIF orientation");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([1, 2, 3])).save(path).unwrap();
    }

    // JPEG with a minimal big-endian EXIF APP1 segment holding only Orientation
    fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
        let mut jpeg = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([30, 60, 90])))
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();

        let mut tiff = b"MM\x00\x2A\x00\x00\x00\x08".to_vec();
        tiff.extend_from_slice(&1u16.to_be_bytes()); // one IFD entry
        tiff.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
        tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0, 0]);
        tiff.extend_from_slice(&0u32.to_be_bytes()); // no next IFD

        let mut app1 = vec![0xFF, 0xE1];
        app1.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
        app1.extend_from_slice(b"Exif\x00\x00");
        app1.extend_from_slice(&tiff);

        // right after SOI
        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&app1);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_entities_sorted_and_files_ignored() {
        let root = TempDir::new().unwrap();
        for name in ["Zoe", "Avery", "Mika"] {
            fs::create_dir(root.path().join(name)).unwrap();
        }
        fs::write(root.path().join("notes.txt"), "not an entity").unwrap();

        let names: Vec<String> = load_sorted_entities(root.path())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Avery", "Mika", "Zoe"]);
    }

    #[test]
    fn test_unreadable_root_is_an_error() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("gone");
        assert!(matches!(load_sorted_entities(&missing), Err(DeckError::Io { .. })));
    }

    #[test]
    fn test_find_photo_respects_extension_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("recent.png"), b"").unwrap();
        fs::write(dir.path().join("recent.jpeg"), b"").unwrap();

        let found = find_photo(dir.path(), "recent", &["jpg", "jpeg", "png"]);
        assert_eq!(found, Some(dir.path().join("recent.jpeg")));

        let found = find_photo(dir.path(), "recent", &["png", "jpeg"]);
        assert_eq!(found, Some(dir.path().join("recent.png")));
    }

    #[test]
    fn test_find_photo_missing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("recent.gif"), b"").unwrap();
        assert_eq!(find_photo(dir.path(), "recent", &["jpg", "jpeg", "png"]), None);
        assert_eq!(find_photo(dir.path(), "baby", &["gif"]), None);
    }

    #[test]
    fn test_find_photo_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("baby.jpg")).unwrap();
        write_png(&dir.path().join("baby.png"), 2, 2);
        assert_eq!(
            find_photo(dir.path(), "baby", &["jpg", "png"]),
            Some(dir.path().join("baby.png"))
        );
    }

    #[test]
    fn test_png_is_embedded_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recent.png");
        write_png(&path, 4, 3);

        let photo = load_photo(&path).unwrap();
        assert_eq!(photo.media.format, MediaFormat::Png);
        assert_eq!(photo.media.bytes, fs::read(&path).unwrap());
        assert_eq!((photo.image.width(), photo.image.height()), (4, 3));
    }

    #[test]
    fn test_jpeg_without_exif_is_embedded_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("baby.jpg");
        RgbImage::from_pixel(8, 6, Rgb([200, 10, 10])).save(&path).unwrap();

        let photo = load_photo(&path).unwrap();
        assert_eq!(photo.media.format, MediaFormat::Jpeg);
        assert_eq!(photo.media.bytes, fs::read(&path).unwrap());
        assert_eq!((photo.image.width(), photo.image.height()), (8, 6));
    }

    #[test]
    fn test_other_formats_are_reencoded_as_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recent.bmp");
        RgbImage::from_pixel(5, 5, Rgb([9, 9, 9])).save(&path).unwrap();

        let photo = load_photo(&path).unwrap();
        assert_eq!(photo.media.format, MediaFormat::Png);
        assert_eq!(image::guess_format(&photo.media.bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_exif_orientation_rotates_and_reencodes() {
        let path = Path::new("recent.jpg");
        for (orientation, size) in [(1, (40, 20)), (3, (40, 20)), (6, (20, 40)), (8, (20, 40))] {
            let bytes = jpeg_with_orientation(40, 20, orientation);
            assert_eq!(exif_orientation(path, &bytes), orientation);

            let photo = decode_photo(path, bytes.clone()).unwrap();
            assert_eq!((photo.image.width(), photo.image.height()), size, "orientation {}", orientation);

            if orientation == 1 {
                assert_eq!(photo.media.format, MediaFormat::Jpeg);
                assert_eq!(photo.media.bytes, bytes);
            } else {
                assert_eq!(photo.media.format, MediaFormat::Png, "orientation {}", orientation);
                assert_eq!(image::guess_format(&photo.media.bytes).unwrap(), ImageFormat::Png);
                let embedded = image::load_from_memory(&photo.media.bytes).unwrap();
                assert_eq!((embedded.width(), embedded.height()), size);
            }
        }
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let path = Path::new("recent.png");
        let err = decode_photo(path, b"\x89PNG but not really".to_vec()).unwrap_err();
        assert!(matches!(err, DeckError::Decode { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_photo(&dir.path().join("recent.jpg")).unwrap_err();
        assert!(matches!(err, DeckError::Io { .. }));
    }
}
