use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::{info, warn};
use pv_core::{Image, Rgba};

/// Input extensions accepted by [`is_supported_extension`], lowercase.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("couldn't decode image {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{path} has {channels} color channel(s); RGB or RGBA images only")]
    UnsupportedChannels { path: PathBuf, channels: u8 },

    #[error("couldn't write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Decodes `path` into an RGBA grid.
///
/// Images with fewer than three color channels are rejected. Three-channel
/// images are widened with alpha 255.
pub fn load_rgba(path: &Path) -> Result<Image<Rgba>, RasterError> {
    let dyn_img = image::open(path).map_err(|source| RasterError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let channels = dyn_img.color().channel_count();
    info!(
        "Loaded {}: {} x {} : {} channels",
        path.display(),
        dyn_img.width(),
        dyn_img.height(),
        channels
    );

    if channels < 3 {
        return Err(RasterError::UnsupportedChannels {
            path: path.to_path_buf(),
            channels,
        });
    }

    Ok(rgba_from_dynamic(&dyn_img))
}

pub fn rgba_from_dynamic(img: &DynamicImage) -> Image<Rgba> {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let mut grid = Image::new_fill(w as usize, h as usize, Rgba::transparent());
    let mut view = grid.as_view_mut();
    for (y, row) in rgba.rows().enumerate() {
        for (dst, px) in view.row_mut(y).iter_mut().zip(row) {
            *dst = Rgba::from(px.0);
        }
    }

    grid
}

/// `<out_dir>/<input stem>.svg`
pub fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".svg");
    out_dir.join(name)
}

/// Writes `text` to `path` through a sibling temporary file.
///
/// The target only appears once the whole document has been written, so a
/// failed save never leaves a truncated artifact behind.
pub fn save_document(path: &Path, text: &str) -> Result<(), RasterError> {
    let tmp = path.with_extension("svg.partial");

    if let Err(source) = fs::write(&tmp, text) {
        discard(&tmp);
        return Err(RasterError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if let Err(source) = fs::rename(&tmp, path) {
        discard(&tmp);
        return Err(RasterError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    info!("Saved: {}", path.display());
    Ok(())
}

fn discard(tmp: &Path) {
    if tmp.exists()
        && let Err(err) = fs::remove_file(tmp)
    {
        warn!("couldn't remove {}: {err}", tmp.display());
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use image::{DynamicImage, Rgb, RgbImage};
    use pv_core::Rgba;

    use super::{is_supported_extension, output_path, rgba_from_dynamic};

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_supported_extension(Path::new("a/b/sprite.PNG")));
        assert!(is_supported_extension(Path::new("photo.jpeg")));
        assert!(!is_supported_extension(Path::new("notes.txt")));
        assert!(!is_supported_extension(Path::new("no_extension")));
    }

    #[test]
    fn output_is_named_after_input_stem() {
        let out = output_path(Path::new("output"), Path::new("../images/bonsai.png"));
        assert_eq!(out, Path::new("output/bonsai.svg"));

        let dotted = output_path(Path::new("out"), Path::new("v1.2.gif"));
        assert_eq!(dotted, Path::new("out/v1.2.svg"));
    }

    #[test]
    fn rgb_input_becomes_opaque() {
        let mut rgb = RgbImage::new(2, 1);
        rgb.put_pixel(1, 0, Rgb([10, 20, 30]));

        let grid = rgba_from_dynamic(&DynamicImage::ImageRgb8(rgb));

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.get(0, 0), Some(&Rgba::new(0, 0, 0, 255)));
        assert_eq!(grid.get(1, 0), Some(&Rgba::new(10, 20, 30, 255)));
    }
}
