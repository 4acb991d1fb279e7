//! Editing session WASM bindings.
//!
//! `JsEditSession` is a thin shell over [`EditSession`]: names arrive as
//! strings, structured values cross as plain objects via
//! `serde_wasm_bindgen`, and every failure becomes a `"<kind>: <message>"`
//! string.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsEditSession('listing-9', [a, b, c], undefined);
//! session.apply_transform('rotateRight');
//! session.begin_crop('4:3');
//! session.select_crop(10, 10, 400, 300);
//! session.apply_crop();
//! const outputs = session.apply_to_all();
//! ```

use crate::types::{editor_error, js_error, JsRenderOutput};
use photoprep_core::{
    AspectRatio, CropRect, Direction, EditHistory, EditMode, EditSession, EditorConfig, FilterName,
    HistoryEntry, ImageRef, InMemoryPresetStore, Preset, PresetStore, TransformOp,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Uploads are session-owned until the host persists them.
fn upload_ref(bytes: Vec<u8>) -> ImageRef {
    ImageRef::session(bytes)
}

fn parse_filter(name: &str) -> Result<FilterName, String> {
    FilterName::from_name(name).ok_or_else(|| format!("validation: unknown filter '{name}'"))
}

fn parse_transform(name: &str) -> Result<TransformOp, String> {
    TransformOp::from_name(name).ok_or_else(|| format!("validation: unknown transform '{name}'"))
}

fn parse_ratio(label: &str) -> Result<AspectRatio, String> {
    AspectRatio::from_label(label)
        .ok_or_else(|| format!("validation: unknown aspect ratio '{label}'"))
}

/// One committed history entry as seen by the host.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRecord {
    slot: usize,
    #[serde(flatten)]
    entry: HistoryEntry,
}

/// Preset store held in WASM memory for the lifetime of the page.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsPresetStore {
    inner: InMemoryPresetStore,
}

#[wasm_bindgen]
impl JsPresetStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsPresetStore {
        JsPresetStore::default()
    }

    /// All presets as `[{ name, settings }]`.
    pub fn list(&self) -> Result<JsValue, JsValue> {
        let presets = self.inner.list().map_err(js_error)?;
        Ok(serde_wasm_bindgen::to_value(&presets)?)
    }

    /// Store a preset object; returns the stored copy.
    pub fn create(&mut self, preset: JsValue) -> Result<JsValue, JsValue> {
        let preset: Preset = serde_wasm_bindgen::from_value(preset)?;
        preset.settings.validate().map_err(js_error)?;
        let stored = self.inner.create(preset).map_err(js_error)?;
        Ok(serde_wasm_bindgen::to_value(&stored)?)
    }
}

/// Editing session over one item's photos.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Open a session on an array of `Uint8Array` image buffers.
    ///
    /// `config_json` overrides `{ commitQuality, cropQuality, defaultAspectRatio }`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        item_key: &str,
        images: js_sys::Array,
        config_json: Option<String>,
    ) -> Result<JsEditSession, JsValue> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json).map_err(js_error)?,
            None => EditorConfig::default(),
        };
        let images = images
            .iter()
            .map(|value| ImageRef::external(js_sys::Uint8Array::new(&value).to_vec()))
            .collect();
        let inner =
            EditSession::open_with_config(images, item_key, config).map_err(editor_error)?;
        Ok(JsEditSession { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn current_index(&self) -> usize {
        self.inner.current_index()
    }

    #[wasm_bindgen(getter)]
    pub fn image_count(&self) -> usize {
        self.inner.image_count()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dirty(&self) -> bool {
        self.inner.is_dirty()
    }

    #[wasm_bindgen(getter)]
    pub fn applied_to_all(&self) -> bool {
        self.inner.applied_to_all()
    }

    #[wasm_bindgen(getter)]
    pub fn is_cropping(&self) -> bool {
        self.inner.mode() == EditMode::Cropping
    }

    #[wasm_bindgen(getter)]
    pub fn selected_preset(&self) -> Option<String> {
        self.inner.selected_preset().map(str::to_owned)
    }

    /// Slots committed at least once, ascending.
    pub fn edited_slots(&self) -> Vec<u32> {
        self.inner.edited_slots().map(|s| s as u32).collect()
    }

    /// Live `{ brightness, contrast, saturate, shadows }`.
    pub fn filters(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.filters())?)
    }

    /// Live `{ rotate, flipX, flipY }`.
    pub fn transform(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.transform())?)
    }

    /// Bytes of the current slot's base image (after any applied crop).
    pub fn current_image(&self) -> Option<Vec<u8>> {
        self.inner.current_image().map(|img| img.bytes().to_vec())
    }

    /// Move to the previous slot. Returns false at the first image.
    pub fn prev_image(&mut self) -> bool {
        self.inner.navigate(Direction::Prev)
    }

    /// Move to the next slot. Returns false at the last image.
    pub fn next_image(&mut self) -> bool {
        self.inner.navigate(Direction::Next)
    }

    pub fn set_filter(&mut self, name: &str, value: i32) -> Result<(), JsValue> {
        let name = parse_filter(name).map_err(js_error)?;
        self.inner.set_filter(name, value);
        Ok(())
    }

    /// One of `rotateLeft`, `rotateRight`, `flipX`, `flipY`.
    pub fn apply_transform(&mut self, op: &str) -> Result<(), JsValue> {
        let op = parse_transform(op).map_err(js_error)?;
        self.inner.apply_transform(op);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.inner.reset_current();
    }

    /// Swap in a newly uploaded image for the current slot.
    pub fn replace_current_image(&mut self, bytes: Vec<u8>) {
        self.inner.replace_current_image(upload_ref(bytes));
    }

    pub fn commit(&mut self) -> Result<JsRenderOutput, JsValue> {
        self.inner
            .commit_current()
            .map(|commit| JsRenderOutput::for_slot(commit.output, commit.slot))
            .map_err(editor_error)
    }

    /// Render every slot with the live edit; returns outputs in slot order,
    /// each tagged with its `slot`.
    pub fn apply_to_all(&mut self) -> Result<js_sys::Array, JsValue> {
        let batch = self.inner.apply_to_all_and_commit().map_err(editor_error)?;
        Ok(batch
            .outputs
            .into_iter()
            .zip(batch.slots)
            .map(|(out, slot)| JsValue::from(JsRenderOutput::for_slot(out, slot)))
            .collect())
    }

    /// Enter crop mode. `ratio` is a label such as `"1:1"`; omitted uses the
    /// configured default. Returns the initial selection `{ x, y, width, height }`.
    pub fn begin_crop(&mut self, ratio: Option<String>) -> Result<JsValue, JsValue> {
        let ratio = match ratio {
            Some(label) => parse_ratio(&label).map_err(js_error)?,
            None => self.inner.config().default_aspect_ratio,
        };
        let selection = self.inner.begin_crop(ratio).map_err(editor_error)?;
        Ok(serde_wasm_bindgen::to_value(&selection)?)
    }

    pub fn set_crop_aspect_ratio(&mut self, ratio: &str) -> Result<JsValue, JsValue> {
        let ratio = parse_ratio(ratio).map_err(js_error)?;
        let selection = self
            .inner
            .set_crop_aspect_ratio(ratio)
            .map_err(editor_error)?;
        Ok(serde_wasm_bindgen::to_value(&selection)?)
    }

    pub fn select_crop(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<JsValue, JsValue> {
        let selection = self
            .inner
            .select_crop(CropRect::new(x, y, width, height))
            .map_err(editor_error)?;
        Ok(serde_wasm_bindgen::to_value(&selection)?)
    }

    /// Bake the selection into the slot. Returns `[width, height]`.
    pub fn apply_crop(&mut self) -> Result<Vec<u32>, JsValue> {
        let (width, height) = self.inner.apply_crop().map_err(editor_error)?;
        Ok(vec![width, height])
    }

    pub fn cancel_crop(&mut self) {
        self.inner.cancel_crop();
    }

    /// Apply a `{ name, settings }` preset object.
    pub fn apply_preset(&mut self, preset: JsValue) -> Result<(), JsValue> {
        let preset: Preset = serde_wasm_bindgen::from_value(preset)?;
        self.inner.apply_preset(&preset).map_err(editor_error)
    }

    pub fn save_preset(
        &mut self,
        store: &mut JsPresetStore,
        name: &str,
    ) -> Result<JsValue, JsValue> {
        let preset = self
            .inner
            .save_preset(&mut store.inner, name)
            .map_err(editor_error)?;
        Ok(serde_wasm_bindgen::to_value(&preset)?)
    }

    /// Committed entries as `[{ slot, filters, transform, timestampMs }]`.
    pub fn history(&self) -> Result<JsValue, JsValue> {
        let records = history_records(self.inner.history(), self.inner.item_key());
        Ok(serde_wasm_bindgen::to_value(&records)?)
    }

    /// End the session and return its history records.
    pub fn close(self) -> Result<JsValue, JsValue> {
        let item_key = self.inner.item_key().to_owned();
        let history = self.inner.close();
        let records = history_records(&history, &item_key);
        Ok(serde_wasm_bindgen::to_value(&records)?)
    }
}

fn history_records(history: &EditHistory, item_key: &str) -> Vec<HistoryRecord> {
    history
        .entries_for(item_key)
        .into_iter()
        .map(|(slot, entry)| HistoryRecord { slot, entry })
        .collect()
}
