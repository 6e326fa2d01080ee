use std::io::Cursor;
use std::path::PathBuf;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

use crate::config::PadConfig;

/// Errors that can occur while exporting the drawing
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid export size {export_size}px for a {display_size}pt canvas")]
    InvalidSize { display_size: f32, export_size: u32 },

    #[error("Failed to load fonts: {0}")]
    Font(String),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Browser download failed: {0}")]
    Browser(String),
}

/// Where an exported image ends up
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTarget {
    /// Directory for native builds; ignored in the browser
    pub dir: PathBuf,
    pub file_name: String,
}

impl ExportTarget {
    pub fn from_config(config: &PadConfig) -> Self {
        Self {
            dir: config.export_dir.clone(),
            file_name: config.export_file_name.clone(),
        }
    }
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Write PNG bytes to the export directory. Returns where they went.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(bytes: &[u8], target: &ExportTarget) -> Result<String, ExportError> {
    let path = target.dir.join(&target.file_name);
    std::fs::write(&path, bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    log::info!("Exported {} bytes to {}", bytes.len(), path.display());
    Ok(path.display().to_string())
}

/// Offer PNG bytes to the user as a browser download. Returns the file name.
#[cfg(target_arch = "wasm32")]
pub fn save_png(bytes: &[u8], target: &ExportTarget) -> Result<String, ExportError> {
    use wasm_bindgen::JsCast;

    let browser_err = |err: wasm_bindgen::JsValue| ExportError::Browser(format!("{err:?}"));

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Browser("no document available".to_owned()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(browser_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(browser_err)?;

    let anchor = document
        .create_element("a")
        .map_err(browser_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Browser("created element is not an anchor".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(&target.file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(browser_err)?;

    log::info!("Offered {} bytes as {}", bytes.len(), target.file_name);
    Ok(target.file_name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_encode_png_round_trips_pixels() {
        let mut image = RgbaImage::from_pixel(4, 3, Rgba([255, 255, 255, 255]));
        image.put_pixel(1, 2, Rgba([10, 20, 30, 255]));

        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(1, 2).0, [10, 20, 30, 255]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_png_reports_missing_directory() {
        let target = ExportTarget {
            dir: PathBuf::from("/definitely/not/a/real/dir"),
            file_name: "out.png".to_owned(),
        };
        assert!(matches!(
            save_png(b"png", &target),
            Err(ExportError::Io { .. })
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_png_writes_file() {
        let dir = std::env::temp_dir().join(format!("sketch_pad_export_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let target = ExportTarget {
            dir: dir.clone(),
            file_name: "out.png".to_owned(),
        };

        let written = save_png(b"not really a png", &target).unwrap();
        assert!(written.ends_with("out.png"));
        assert_eq!(std::fs::read(dir.join("out.png")).unwrap(), b"not really a png");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
