//! Application state and message dispatch.
//!
//! `App` owns the class registry, the edit session, both canvas controllers,
//! and the storage boundaries. Every host event arrives as a [`Message`];
//! `update` applies it synchronously and returns the effects the host must
//! carry out (replay a display list, show a notice, refresh the dataset
//! view). Failed operations leave state exactly as it was before the action.

use crate::canvas::{CommitOutcome, DisplayList, EditCanvas, PreviewCanvas};
use crate::coords::NormalizedAnnotation;
use crate::dataset::{DatasetBackend, DatasetItem, DatasetStats, UploadedImage};
use crate::keybindings::ShortcutAction;
use crate::message::Message;
use crate::model::ClassId;
use crate::notify::Notification;
use crate::registry::{ClassRegistry, RegistryError};
use crate::session::EditSession;
use crate::settings::{SettingsBlob, SettingsStore};

/// Side effects the host must carry out after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replay this display list onto the edit canvas.
    RedrawEdit(DisplayList),
    /// Replay this display list onto the preview canvas.
    RedrawPreview(DisplayList),
    /// Show a transient notification.
    Notify(Notification),
    /// A new image was staged; size the edit canvas to its dimensions.
    ImageLoaded(UploadedImage),
    /// The edit session ended; reset the upload input and show the
    /// empty-canvas overlay.
    SessionCleared,
    /// Fresh dataset listing for the dataset view.
    DatasetLoaded {
        items: Vec<DatasetItem>,
        stats: DatasetStats,
    },
    /// Close any open modal dialogs.
    CloseModals,
}

/// The annotation application.
pub struct App<B, S> {
    backend: B,
    settings: S,
    registry: ClassRegistry,
    selected_class: ClassId,
    session: EditSession,
    edit: EditCanvas,
    preview: Option<PreviewCanvas>,
}

impl<B: DatasetBackend, S: SettingsStore> App<B, S> {
    /// Create the app, loading persisted settings.
    ///
    /// A missing settings blob means first run: the registry is seeded with
    /// defaults and written back immediately. A broken blob is logged and
    /// surfaced as a notice, and the app continues on in-memory defaults.
    pub fn new(backend: B, mut settings: S) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();
        let registry = match settings.load() {
            Ok(Some(blob)) => blob.to_registry(),
            Ok(None) => {
                let registry = ClassRegistry::new();
                if let Err(e) = settings.save(&SettingsBlob::from(&registry)) {
                    log::error!("Error seeding settings: {e}");
                    effects.push(Effect::Notify(Notification::error("Error saving settings")));
                }
                registry
            }
            Err(e) => {
                log::error!("Error loading settings: {e}");
                effects.push(Effect::Notify(Notification::error("Error loading settings")));
                ClassRegistry::new()
            }
        };

        let selected_class = registry
            .classes()
            .first()
            .map(|c| c.id.clone())
            .unwrap_or_else(|| "0".to_string());

        let app = Self {
            backend,
            settings,
            registry,
            selected_class,
            session: EditSession::new(),
            edit: EditCanvas::new(),
            preview: None,
        };
        (app, effects)
    }

    /// The class registry.
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// The current edit session.
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Id of the class new boxes are tagged with.
    pub fn selected_class(&self) -> &str {
        &self.selected_class
    }

    /// Apply a message and return the effects for the host.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::PointerDown { x, y } => {
                if self.session.is_loaded() {
                    self.edit.pointer_down(x, y);
                }
                Vec::new()
            }
            Message::PointerMove { x, y } => {
                if self.edit.pointer_move(x, y) {
                    vec![self.redraw_edit()]
                } else {
                    Vec::new()
                }
            }
            Message::PointerUp { x, y } | Message::PointerLeave { x, y } => {
                let class_id = self.selected_class.clone();
                match self.edit.finish(x, y, &class_id, &mut self.session) {
                    CommitOutcome::Committed => vec![self.redraw_edit()],
                    CommitOutcome::TooSmall => vec![
                        self.redraw_edit(),
                        Effect::Notify(Notification::info("Box too small - draw larger")),
                    ],
                    CommitOutcome::NotDragging => Vec::new(),
                }
            }
            Message::CanvasResized => vec![self.redraw_edit()],

            Message::UploadImage {
                original_name,
                bytes,
            } => self.upload_image(&original_name, &bytes),
            Message::SaveAnnotations => self.save_annotations(),
            Message::ClearAnnotations => self.clear_annotations(),
            Message::RemoveLastBox => self.remove_last_box("Last annotation removed"),

            Message::SelectClass(id) => {
                self.selected_class = id;
                Vec::new()
            }
            Message::AddClass { name, color } => self.add_class(&name, &color),
            Message::RenameClass { id, name } => self.mutate_class(|r| r.rename(&id, &name)),
            Message::RecolorClass { id, color } => self.mutate_class(|r| r.recolor(&id, &color)),
            Message::RemoveClass { id } => self.remove_class(&id),
            Message::ResetClasses => self.reset_classes(),

            Message::RefreshDataset => self.refresh_dataset(),
            Message::OpenPreview {
                item,
                image_width,
                image_height,
            } => self.open_preview(&item, image_width, image_height),
            Message::ClosePreview => {
                self.preview = None;
                Vec::new()
            }
            Message::DeleteImage { image_name } => self.delete_image(&image_name),

            Message::ZoomIn => self.with_preview(PreviewCanvas::zoom_in),
            Message::ZoomOut => self.with_preview(PreviewCanvas::zoom_out),
            Message::ResetZoom => self.with_preview(PreviewCanvas::reset),

            Message::KeyPressed { key, ctrl_or_cmd } => {
                match ShortcutAction::for_key(key, ctrl_or_cmd) {
                    Some(ShortcutAction::CloseModals) => {
                        self.preview = None;
                        vec![Effect::CloseModals]
                    }
                    Some(ShortcutAction::RemoveLastBox) => {
                        self.remove_last_box("Last annotation removed")
                    }
                    Some(ShortcutAction::Save) => self.save_annotations(),
                    Some(ShortcutAction::Undo) => self.remove_last_box("Undo last annotation"),
                    None => Vec::new(),
                }
            }
        }
    }

    fn redraw_edit(&self) -> Effect {
        Effect::RedrawEdit(self.edit.render(&self.session, &self.registry, &self.selected_class))
    }

    fn with_preview(&mut self, f: impl FnOnce(&mut PreviewCanvas)) -> Vec<Effect> {
        match &mut self.preview {
            Some(preview) => {
                f(preview);
                vec![Effect::RedrawPreview(preview.render(&self.registry))]
            }
            None => Vec::new(),
        }
    }

    fn upload_image(&mut self, original_name: &str, bytes: &[u8]) -> Vec<Effect> {
        match self.backend.upload(original_name, bytes) {
            Ok(uploaded) => {
                self.edit.cancel();
                self.session.load(
                    uploaded.filename.clone(),
                    uploaded.width as f32,
                    uploaded.height as f32,
                );
                vec![Effect::ImageLoaded(uploaded), self.redraw_edit()]
            }
            Err(e) => {
                log::error!("Upload error: {e}");
                vec![Effect::Notify(Notification::error(format!(
                    "Error uploading image: {e}"
                )))]
            }
        }
    }

    fn save_annotations(&mut self) -> Vec<Effect> {
        let Some(image) = self.session.image() else {
            return vec![Effect::Notify(Notification::error(
                "Please upload an image and draw at least one box",
            ))];
        };
        if self.session.store().is_empty() {
            return vec![Effect::Notify(Notification::error(
                "Please upload an image and draw at least one box",
            ))];
        }

        let image_name = image.name.clone();
        match self
            .backend
            .save_annotations(&image_name, self.session.store().as_slice())
        {
            Ok(()) => {
                // Only a successful save clears the session.
                self.session.discard();
                vec![
                    Effect::Notify(Notification::success("Annotations saved successfully")),
                    Effect::SessionCleared,
                    self.redraw_edit(),
                ]
            }
            Err(e) => {
                log::error!("Save error: {e}");
                vec![Effect::Notify(Notification::error(format!(
                    "Error saving annotations: {e}"
                )))]
            }
        }
    }

    fn clear_annotations(&mut self) -> Vec<Effect> {
        if self.session.store().is_empty() {
            return vec![Effect::Notify(Notification::info("No annotations to clear"))];
        }
        self.session.store_mut().clear();
        vec![
            self.redraw_edit(),
            Effect::Notify(Notification::success("Annotations cleared")),
        ]
    }

    fn remove_last_box(&mut self, notice: &str) -> Vec<Effect> {
        match self.session.store_mut().pop_last() {
            Some(_) => vec![
                self.redraw_edit(),
                Effect::Notify(Notification::info(notice)),
            ],
            None => vec![Effect::Notify(Notification::info(
                "No annotations to remove",
            ))],
        }
    }

    fn add_class(&mut self, name: &str, color: &str) -> Vec<Effect> {
        match self.registry.add(name, color) {
            Ok(_) => {
                let mut effects = self.persist_registry();
                effects.push(Effect::Notify(Notification::success("New class added")));
                effects
            }
            Err(RegistryError::EmptyName) => vec![Effect::Notify(Notification::error(
                "Please enter a class name",
            ))],
            Err(e) => vec![Effect::Notify(Notification::error(e.to_string()))],
        }
    }

    fn mutate_class(
        &mut self,
        op: impl FnOnce(&mut ClassRegistry) -> Result<(), RegistryError>,
    ) -> Vec<Effect> {
        match op(&mut self.registry) {
            Ok(()) => self.persist_registry(),
            Err(e) => vec![Effect::Notify(Notification::error(e.to_string()))],
        }
    }

    fn remove_class(&mut self, id: &str) -> Vec<Effect> {
        match self.registry.remove(id) {
            Ok(()) => {
                self.ensure_selected_class();
                let mut effects = self.persist_registry();
                effects.push(Effect::Notify(Notification::success(
                    "Class deleted successfully",
                )));
                effects
            }
            Err(RegistryError::LastClass) => vec![Effect::Notify(Notification::error(
                "You must have at least one class",
            ))],
            Err(e) => vec![Effect::Notify(Notification::error(e.to_string()))],
        }
    }

    fn reset_classes(&mut self) -> Vec<Effect> {
        self.registry.reset_to_defaults();
        self.ensure_selected_class();
        let mut effects = self.persist_registry();
        effects.push(Effect::Notify(Notification::success(
            "Settings reset to default",
        )));
        effects
    }

    /// Keep the selection pointing at an existing class after deletions.
    fn ensure_selected_class(&mut self) {
        if self.registry.get(&self.selected_class).is_none() {
            if let Some(first) = self.registry.classes().first() {
                self.selected_class = first.id.clone();
            }
        }
    }

    /// Persist the registry synchronously, before any dependent UI updates.
    fn persist_registry(&mut self) -> Vec<Effect> {
        match self.settings.save(&SettingsBlob::from(&self.registry)) {
            Ok(()) => Vec::new(),
            Err(e) => {
                log::error!("Error saving settings: {e}");
                vec![Effect::Notify(Notification::error("Error saving settings"))]
            }
        }
    }

    fn refresh_dataset(&self) -> Vec<Effect> {
        match self.backend.list() {
            Ok(items) => {
                let stats = DatasetStats::from_items(&items);
                vec![Effect::DatasetLoaded { items, stats }]
            }
            Err(e) => {
                log::error!("Error loading dataset: {e}");
                vec![Effect::Notify(Notification::error("Error loading dataset"))]
            }
        }
    }

    fn open_preview(&mut self, item: &DatasetItem, width: f32, height: f32) -> Vec<Effect> {
        let annotations: Vec<NormalizedAnnotation> = item
            .annotations
            .iter()
            .filter_map(|line| match NormalizedAnnotation::parse(line) {
                Ok(ann) => Some(ann),
                Err(e) => {
                    log::warn!("Skipping malformed annotation for '{}': {e}", item.filename);
                    None
                }
            })
            .collect();

        let preview = PreviewCanvas::open(width, height, annotations);
        let display = preview.render(&self.registry);
        self.preview = Some(preview);
        vec![Effect::RedrawPreview(display)]
    }

    fn delete_image(&mut self, image_name: &str) -> Vec<Effect> {
        match self.backend.delete(image_name) {
            Ok(()) => {
                self.preview = None;
                let mut effects = vec![
                    Effect::Notify(Notification::success("Image deleted successfully")),
                    Effect::CloseModals,
                ];
                effects.extend(self.refresh_dataset());
                effects
            }
            Err(e) => {
                log::error!("Delete error: {e}");
                vec![Effect::Notify(Notification::error(format!(
                    "Error deleting image: {e}"
                )))]
            }
        }
    }
}
