//! Built-in rectangle selection tool.

use super::{AspectRatio, CropError, CropTool};
use crate::decode::DecodedImage;
use crate::transform::{apply_crop, CropRect};

/// Constrain `rect` to `ratio` inside a `width x height` image.
///
/// The rectangle is first clamped to the image, then shrunk along one axis
/// until it matches the ratio, keeping its centre where possible.
pub fn fit_to_aspect(rect: CropRect, ratio: AspectRatio, width: u32, height: u32) -> CropRect {
    let rect = rect.clamped_to(width, height);
    let Some(target) = ratio.ratio() else {
        return rect;
    };

    let (cx, cy) = rect.center();
    let (mut w, mut h) = (rect.width as f64, rect.height as f64);
    if w / h > target {
        w = h * target;
    } else {
        h = w / target;
    }

    let w = (w.round() as u32).clamp(1, width);
    let h = (h.round() as u32).clamp(1, height);
    let x = (cx - w as f64 / 2.0).round().clamp(0.0, (width - w) as f64) as u32;
    let y = (cy - h as f64 / 2.0).round().clamp(0.0, (height - h) as f64) as u32;

    CropRect::new(x, y, w, h)
}

#[derive(Debug, Clone)]
struct ActiveCrop {
    image: DecodedImage,
    ratio: AspectRatio,
    selection: CropRect,
}

/// Rectangle selection over an owned decoded image.
///
/// On start the selection is the largest centred rectangle that satisfies
/// the aspect ratio.
#[derive(Debug, Clone, Default)]
pub struct RectCropTool {
    active: Option<ActiveCrop>,
}

impl RectCropTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn active_mut(&mut self) -> Result<&mut ActiveCrop, CropError> {
        self.active.as_mut().ok_or(CropError::Inactive)
    }
}

impl CropTool for RectCropTool {
    fn start(&mut self, image: DecodedImage, ratio: AspectRatio) -> Result<(), CropError> {
        if self.active.is_some() {
            return Err(CropError::AlreadyActive);
        }
        if image.is_empty() {
            return Err(CropError::NotReady {
                width: image.width,
                height: image.height,
            });
        }

        let selection = fit_to_aspect(
            CropRect::full(image.width, image.height),
            ratio,
            image.width,
            image.height,
        );
        log::debug!(
            "crop started on {}x{} ({}), selection {selection:?}",
            image.width,
            image.height,
            ratio.label()
        );
        self.active = Some(ActiveCrop {
            image,
            ratio,
            selection,
        });
        Ok(())
    }

    fn set_aspect_ratio(&mut self, ratio: AspectRatio) -> Result<(), CropError> {
        let active = self.active_mut()?;
        active.ratio = ratio;
        active.selection = fit_to_aspect(
            active.selection,
            ratio,
            active.image.width,
            active.image.height,
        );
        Ok(())
    }

    fn select(&mut self, rect: CropRect) -> Result<CropRect, CropError> {
        let active = self.active_mut()?;
        active.selection = fit_to_aspect(rect, active.ratio, active.image.width, active.image.height);
        Ok(active.selection)
    }

    fn selection(&self) -> Option<CropRect> {
        self.active.as_ref().map(|a| a.selection)
    }

    fn aspect_ratio(&self) -> Option<AspectRatio> {
        self.active.as_ref().map(|a| a.ratio)
    }

    fn result(&self) -> Result<DecodedImage, CropError> {
        let active = self.active.as_ref().ok_or(CropError::Inactive)?;
        Ok(apply_crop(&active.image, &active.selection))
    }

    fn destroy(&mut self) {
        self.active = None;
    }

    fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
