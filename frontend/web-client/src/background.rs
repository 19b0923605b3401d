//! Sizing the map's canvas from its background image.

use anyhow::{anyhow, Context};
use std::path::Path;
use ticket_to_ride::render::{MapCanvas, Size};
use tracing::{debug, warn};

/// Natural size of the image at `path`, read from its header only.
pub fn image_natural_size(path: &Path) -> anyhow::Result<Size> {
    let size = imagesize::size(path)
        .map_err(|error| anyhow!("{error}"))
        .with_context(|| format!("Could not read the size of {}", path.display()))?;

    let width = u32::try_from(size.width).context("Image width too large")?;
    let height = u32::try_from(size.height).context("Image height too large")?;
    if width == 0 || height == 0 {
        return Err(anyhow!("{} has no pixels", path.display()));
    }

    Ok(Size::new(width, height))
}

/// (Re)loads the canvas' background image, and fits the canvas to its natural size.
///
/// If the image cannot be read, the canvas fits the last known natural size instead.
pub fn load_background(canvas: &mut MapCanvas) {
    let href = canvas.background().href.clone();

    match image_natural_size(Path::new(&href)) {
        Ok(natural_size) => {
            debug!(%href, ?natural_size, "background loaded");
            canvas.on_background_loaded(natural_size);
        }
        Err(error) => {
            warn!(%href, error = %format!("{error:#}"), "keeping the configured map size");
            canvas.on_viewport_resized();
        }
    }
}
