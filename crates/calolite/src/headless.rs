//! Headless rendering.
//!
//! Renders the current stage to an image buffer or file without a window.
//! Useful for integration tests, batch processing and scripted snapshots.

use std::path::Path;

use calolite_core::{CaloError, Result};
use calolite_render::{save_image, Rasterizer};
use image::RgbaImage;

use crate::stage::Stage;

impl Stage {
    /// Renders one frame of the current stage into an RGBA image.
    ///
    /// The camera, visibility and event selection are used as they are.
    pub fn render_to_image(&self, width: u32, height: u32) -> RgbaImage {
        let mut raster = Rasterizer::new(width, height, self.camera().settings());
        let stats = self.render(&mut raster);
        if stats.failed > 0 {
            log::warn!("{} drawable(s) failed to render", stats.failed);
        }
        raster.into_image()
    }

    /// Renders one frame and saves it as PNG or JPEG, chosen by extension.
    pub fn render_to_file(&self, path: impl AsRef<Path>, width: u32, height: u32) -> Result<()> {
        let image = self.render_to_image(width, height);
        save_image(path, &image)
            .map_err(|e| CaloError::RenderError(format!("Failed to save image: {e}")))
    }
}
