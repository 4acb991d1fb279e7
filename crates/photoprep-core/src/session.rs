//! Editing session controller.
//!
//! [`EditSession`] is the single owner of session state: the working set,
//! the current slot, live filter/transform values, crop mode, and the
//! per-slot history. The render pipeline and crop tool are called from here
//! and hold nothing between calls except the one live crop tool.
//!
//! # State Machine
//!
//! ```text
//! Idle (slot loaded) -> Editing (dirty) -> [Cropping <-> Editing]
//!     -> Committed (clean, slot edited) -> Idle (next navigate)
//! ```
//!
//! Every operation takes `&mut self`, so at most one is ever in flight.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::EditorConfig;
use crate::crop::{default_crop_tool, AspectRatio, CropError, CropTool, CropToolFactory};
use crate::decode::decode_image;
use crate::encode::encode_jpeg;
use crate::error::{EditorError, Result, ValidationError};
use crate::history::EditHistory;
use crate::preset::{Preset, PresetSettings, PresetStore};
use crate::render::{render, RenderOutput};
use crate::transform::CropRect;
use crate::working_set::{ImageRef, WorkingSet};
use crate::{FilterName, FilterState, TransformOp, TransformState};

/// Slot navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Which control set is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Filters and transforms are adjustable
    Normal,
    /// A crop tool is active; filter controls are hidden
    Cropping,
}

/// Result of committing the current slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutput {
    pub slot: usize,
    pub output: RenderOutput,
}

/// Result of applying the live edit to every slot, in working-set order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    pub outputs: Vec<RenderOutput>,
    pub slots: Vec<usize>,
}

/// One editing session over the photos of a single item.
pub struct EditSession {
    item_key: String,
    config: EditorConfig,
    working_set: WorkingSet,
    current_index: usize,
    filters: FilterState,
    transform: TransformState,
    crop_tool: Option<Box<dyn CropTool>>,
    crop_factory: CropToolFactory,
    edited_slots: BTreeSet<usize>,
    dirty: bool,
    applied_to_all: bool,
    selected_preset: Option<String>,
    history: EditHistory,
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("item_key", &self.item_key)
            .field("images", &self.working_set.len())
            .field("current_index", &self.current_index)
            .field("filters", &self.filters)
            .field("transform", &self.transform)
            .field("mode", &self.mode())
            .field("edited_slots", &self.edited_slots)
            .field("dirty", &self.dirty)
            .field("applied_to_all", &self.applied_to_all)
            .finish()
    }
}

impl EditSession {
    /// Open a session on `images` for `item_key` with default settings.
    pub fn open(images: Vec<ImageRef>, item_key: impl Into<String>) -> Result<Self> {
        Self::open_with_config(images, item_key, EditorConfig::default())
    }

    /// Open a session with explicit configuration.
    pub fn open_with_config(
        images: Vec<ImageRef>,
        item_key: impl Into<String>,
        config: EditorConfig,
    ) -> Result<Self> {
        config.validate()?;
        let working_set = WorkingSet::new(images)?;
        let mut session = Self {
            item_key: item_key.into(),
            config,
            working_set,
            current_index: 0,
            filters: FilterState::IDENTITY,
            transform: TransformState::IDENTITY,
            crop_tool: None,
            crop_factory: default_crop_tool,
            edited_slots: BTreeSet::new(),
            dirty: false,
            applied_to_all: false,
            selected_preset: None,
            history: EditHistory::new(),
        };
        session.load_slot(0);
        log::info!(
            "opened session for {} with {} image(s)",
            session.item_key,
            session.working_set.len()
        );
        Ok(session)
    }

    /// Use a different crop tool implementation.
    pub fn with_crop_tool(mut self, factory: CropToolFactory) -> Self {
        self.destroy_crop_tool();
        self.crop_factory = factory;
        self
    }

    pub fn item_key(&self) -> &str {
        &self.item_key
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn image_count(&self) -> usize {
        self.working_set.len()
    }

    pub fn filters(&self) -> FilterState {
        self.filters
    }

    pub fn transform(&self) -> TransformState {
        self.transform
    }

    pub fn mode(&self) -> EditMode {
        if self.crop_tool.is_some() {
            EditMode::Cropping
        } else {
            EditMode::Normal
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn applied_to_all(&self) -> bool {
        self.applied_to_all
    }

    pub fn is_edited(&self, slot: usize) -> bool {
        self.edited_slots.contains(&slot)
    }

    /// Slots with a successful commit, ascending.
    pub fn edited_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.edited_slots.iter().copied()
    }

    /// Name of the preset the live values came from, if untouched since.
    pub fn selected_preset(&self) -> Option<&str> {
        self.selected_preset.as_deref()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Base image of the current slot.
    pub fn current_image(&self) -> Option<&ImageRef> {
        self.working_set.current(self.current_index)
    }

    /// Live crop selection, when cropping.
    pub fn crop_selection(&self) -> Option<CropRect> {
        self.crop_tool.as_ref().and_then(|t| t.selection())
    }

    /// Move to the previous/next slot. Returns false at either end.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Prev => self.current_index.checked_sub(1),
            Direction::Next => Some(self.current_index + 1).filter(|&i| i < self.working_set.len()),
        };
        let Some(target) = target else {
            return false;
        };

        self.destroy_crop_tool();
        self.applied_to_all = false;
        self.load_slot(target);
        log::debug!("navigated to slot {target}");
        true
    }

    /// Set one tonal filter (clamped to its range).
    pub fn set_filter(&mut self, name: FilterName, value: i32) {
        self.filters.set(name, value);
        self.selected_preset = None;
        self.recompute_dirty();
    }

    /// Apply one geometric step.
    pub fn apply_transform(&mut self, op: TransformOp) {
        self.transform.apply(op);
        self.selected_preset = None;
        self.recompute_dirty();
    }

    /// Undo every edit of the current slot, including a committed crop.
    pub fn reset_current(&mut self) {
        self.destroy_crop_tool();
        self.working_set.restore_original(self.current_index);
        self.filters = FilterState::IDENTITY;
        self.transform = TransformState::IDENTITY;
        self.history.delete(&self.item_key, self.current_index);
        self.selected_preset = None;
        self.applied_to_all = false;
        self.recompute_dirty();
        log::debug!("reset slot {}", self.current_index);
    }

    /// Install a freshly selected image in the current slot.
    ///
    /// Behaves as a reset followed by loading the new image, which also
    /// becomes the slot's original.
    pub fn replace_current_image(&mut self, image: ImageRef) {
        self.reset_current();
        self.working_set.install(self.current_index, image);
    }

    /// Render the current slot with the live values.
    pub fn commit_current(&mut self) -> Result<CommitOutput> {
        self.ensure_not_cropping()?;
        let slot = self.current_index;
        let output = self.render_slot(slot)?;

        self.history
            .set(&self.item_key, slot, self.filters, self.transform);
        self.edited_slots.insert(slot);
        self.dirty = false;
        log::info!(
            "committed slot {slot} of {}: {}x{}, {} bytes",
            self.item_key,
            output.width,
            output.height,
            output.byte_len()
        );
        Ok(CommitOutput { slot, output })
    }

    /// Render every slot, in order, with the live values.
    ///
    /// Runs one image at a time. The first failure aborts the rest and
    /// leaves session state exactly as it was.
    pub fn apply_to_all_and_commit(&mut self) -> Result<BatchOutput> {
        self.ensure_not_cropping()?;
        if !self.dirty {
            return Err(EditorError::NothingToApply("no pending edits"));
        }
        if self.working_set.len() < 2 {
            return Err(EditorError::NothingToApply("only one image"));
        }

        let mut outputs = Vec::with_capacity(self.working_set.len());
        for slot in 0..self.working_set.len() {
            match self.render_slot(slot) {
                Ok(output) => outputs.push(output),
                Err(source) => {
                    log::warn!("apply to all aborted at slot {slot}: {source}");
                    return Err(EditorError::BatchAbort {
                        slot,
                        source: Box::new(source),
                    });
                }
            }
        }

        let slots: Vec<usize> = (0..outputs.len()).collect();
        for &slot in &slots {
            self.history
                .set(&self.item_key, slot, self.filters, self.transform);
            self.edited_slots.insert(slot);
        }
        self.applied_to_all = true;
        self.dirty = false;
        log::info!(
            "applied edit to all {} images of {}",
            slots.len(),
            self.item_key
        );
        Ok(BatchOutput { outputs, slots })
    }

    /// Enter crop mode on the current slot's base image.
    ///
    /// Any live tool is destroyed first. Returns the initial selection.
    pub fn begin_crop(&mut self, ratio: AspectRatio) -> Result<CropRect> {
        self.destroy_crop_tool();

        let image = match self.working_set.current(self.current_index) {
            Some(image) => decode_image(image.bytes())?,
            None => return Err(EditorError::NoCropSession),
        };

        let mut tool = (self.crop_factory)();
        tool.start(image, ratio).map_err(EditorError::CropInit)?;
        let selection = tool
            .selection()
            .ok_or(EditorError::Crop(CropError::Inactive))?;
        self.crop_tool = Some(tool);
        Ok(selection)
    }

    /// Change the live tool's aspect constraint.
    pub fn set_crop_aspect_ratio(&mut self, ratio: AspectRatio) -> Result<CropRect> {
        let tool = self.crop_tool.as_mut().ok_or(EditorError::NoCropSession)?;
        tool.set_aspect_ratio(ratio).map_err(EditorError::Crop)?;
        tool.selection().ok_or(EditorError::NoCropSession)
    }

    /// Move/resize the live selection.
    pub fn select_crop(&mut self, rect: CropRect) -> Result<CropRect> {
        let tool = self.crop_tool.as_mut().ok_or(EditorError::NoCropSession)?;
        tool.select(rect).map_err(EditorError::Crop)
    }

    /// Bake the selection into a new base image for the current slot.
    ///
    /// Filters and transform are left alone so the crop composes with them.
    pub fn apply_crop(&mut self) -> Result<(u32, u32)> {
        let tool = self.crop_tool.as_ref().ok_or(EditorError::NoCropSession)?;
        let cropped = tool.result().map_err(EditorError::Crop)?;
        let bytes = encode_jpeg(
            &cropped.pixels,
            cropped.width,
            cropped.height,
            self.config.crop_quality,
        )?;

        self.working_set
            .replace_current(self.current_index, ImageRef::session(bytes));
        self.destroy_crop_tool();
        log::debug!(
            "cropped slot {} to {}x{}",
            self.current_index,
            cropped.width,
            cropped.height
        );
        Ok(cropped.dimensions())
    }

    /// Leave crop mode without changing the base image.
    pub fn cancel_crop(&mut self) {
        self.destroy_crop_tool();
    }

    /// Overwrite the live values with a preset's settings.
    pub fn apply_preset(&mut self, preset: &Preset) -> Result<()> {
        preset.settings.validate()?;
        self.filters = preset.settings.filters.clamped();
        self.transform = preset.settings.transform;
        self.selected_preset = Some(preset.name.clone());
        self.recompute_dirty();
        Ok(())
    }

    /// Snapshot the live values as a named preset.
    pub fn preset_from_current(&self, name: &str) -> Result<Preset> {
        Ok(Preset::new(
            name,
            PresetSettings::new(self.filters, self.transform),
        )?)
    }

    /// Save the live values to `store` under `name`.
    pub fn save_preset<S>(&mut self, store: &mut S, name: &str) -> Result<Preset>
    where
        S: PresetStore + ?Sized,
    {
        let preset = store.create(self.preset_from_current(name)?)?;
        self.selected_preset = Some(preset.name.clone());
        Ok(preset)
    }

    /// End the session, handing back its history for optional persistence.
    pub fn close(mut self) -> EditHistory {
        self.destroy_crop_tool();
        log::info!("closed session for {}", self.item_key);
        self.history
    }

    fn load_slot(&mut self, slot: usize) {
        let (filters, transform) = self.history.load(&self.item_key, slot);
        self.current_index = slot;
        self.filters = filters;
        self.transform = transform;
        self.selected_preset = None;
        self.recompute_dirty();
    }

    fn recompute_dirty(&mut self) {
        self.dirty = !(self.filters.is_identity() && self.transform.is_identity());
    }

    fn ensure_not_cropping(&self) -> Result<()> {
        match self.mode() {
            EditMode::Cropping => Err(EditorError::CropActive),
            EditMode::Normal => Ok(()),
        }
    }

    fn render_slot(&self, slot: usize) -> Result<RenderOutput> {
        let image = self
            .working_set
            .current(slot)
            .ok_or(ValidationError::EmptyWorkingSet)?;
        render(
            image.bytes(),
            &self.filters,
            &self.transform,
            self.config.commit_quality,
        )
    }

    fn destroy_crop_tool(&mut self) {
        if let Some(mut tool) = self.crop_tool.take() {
            tool.destroy();
        }
    }
}
