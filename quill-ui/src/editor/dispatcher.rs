// Command dispatcher: turns user gestures into scene mutations and history calls.
//
// Every completed, user-visible mutation is followed by exactly one
// checkpoint. An edit the surface cannot lay out is rolled back and never
// checkpointed. Selection and canvas resizing are not edits and are never
// checkpointed.

use quill_core::{Canvas, LayoutSurface, ObjectId, Scene, Surface};
use quill_history::{HistoryEngine, HistoryStrategy};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, info, warn};

use super::listeners::{ListenerHandle, ListenerKind, ListenerRegistry, WindowEvent};
use super::tools::{FontFamily, FontSize, StyleFlag, Toggle, Tool};
use super::{Command, EditorError, HistoryControls, Outcome, Shortcuts};
use crate::config::EditorConfig;

pub struct Editor {
    canvas: Canvas,
    history: HistoryEngine,
    config: EditorConfig,
    shortcuts: Shortcuts,
    /// Commands delivered by listeners and input polling, run in order.
    pending: Rc<RefCell<VecDeque<Command>>>,
    // Held for the editor's lifetime; dropping them deregisters.
    listeners: Vec<ListenerHandle>,
}

impl Editor {
    pub fn new(
        config: EditorConfig,
        surface: Box<dyn Surface>,
        registry: &ListenerRegistry,
    ) -> Result<Self, EditorError> {
        let scene = Scene::new(
            config.canvas_width,
            config.canvas_height,
            config.background.clone(),
        );
        let mut canvas = Canvas::new(scene, surface);
        let mut history = HistoryEngine::new(&config.history);

        if config.record_initial_state {
            history.record_checkpoint(canvas.scene())?;
        }
        canvas.render_all();

        let shortcuts = Shortcuts::default();
        let pending = Rc::new(RefCell::new(VecDeque::new()));

        let queue = Rc::clone(&pending);
        let resize = registry.register(ListenerKind::Resize, move |event| {
            if let WindowEvent::Resized { width, height } = *event {
                queue
                    .borrow_mut()
                    .push_back(Command::ResizeCanvas { width, height });
            }
        });

        let queue = Rc::clone(&pending);
        let bindings = shortcuts.clone();
        let keyboard = registry.register(ListenerKind::Keyboard, move |event| {
            if let WindowEvent::KeyPressed { key, modifiers } = *event {
                if let Some(command) = bindings.command_for(modifiers, key) {
                    queue.borrow_mut().push_back(command);
                }
            }
        });

        info!(strategy = ?history.strategy(), "editor ready");
        Ok(Self {
            canvas,
            history,
            config,
            shortcuts,
            pending,
            listeners: vec![resize, keyboard],
        })
    }

    /// Editor on the headless layout surface, using the configured fonts.
    pub fn headless(config: EditorConfig, registry: &ListenerRegistry) -> Result<Self, EditorError> {
        let surface = LayoutSurface::new(config.fonts.iter().cloned());
        Self::new(config, Box::new(surface), registry)
    }

    pub fn scene(&self) -> &Scene {
        self.canvas.scene()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &HistoryEngine {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn controls(&self) -> HistoryControls {
        HistoryControls {
            can_undo: self.history.can_undo(self.canvas.scene()),
            can_redo: self.history.can_redo(),
        }
    }

    /// Queue a command for [`run_pending`](Self::run_pending).
    pub fn queue(&self, command: Command) {
        self.pending.borrow_mut().push_back(command);
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Queue the shortcuts pressed in this egui frame.
    pub fn handle_input(&self, ctx: &egui::Context) {
        let commands = self.shortcuts.poll(ctx);
        if !commands.is_empty() {
            debug!(count = commands.len(), "shortcuts pressed");
            self.pending.borrow_mut().extend(commands);
        }
    }

    /// Run every queued command, oldest first, each to completion before
    /// the next starts. One result per command.
    pub async fn run_pending(&mut self) -> Vec<Result<Outcome, EditorError>> {
        let mut results = Vec::new();
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(command) = next else {
                break;
            };
            results.push(self.execute(command).await);
        }
        results
    }

    /// Run one command to completion. `&mut self` is held across the
    /// restore, so the next command cannot start before this one is done.
    pub async fn execute(&mut self, command: Command) -> Result<Outcome, EditorError> {
        debug!(command = command.name(), "dispatching");
        match command {
            Command::AddText => self.add_text().await,
            Command::Undo => Ok(applied(self.history.undo(&mut self.canvas).await?)),
            Command::Redo => Ok(applied(self.history.redo(&mut self.canvas).await?)),
            Command::ToggleBold => self.apply_tool(&Toggle::new(StyleFlag::Bold)).await,
            Command::ToggleItalic => self.apply_tool(&Toggle::new(StyleFlag::Italic)).await,
            Command::ToggleUnderline => {
                self.apply_tool(&Toggle::new(StyleFlag::Underline)).await
            }
            Command::SetFontSize(points) => self.apply_tool(&FontSize::new(points)).await,
            Command::SetFontFamily(family) => self.apply_tool(&FontFamily::new(family)).await,
            Command::MoveActive(position) => {
                self.modify_active(|scene, id| scene.move_object(id, position))
                    .await
            }
            Command::ResizeActive(size) => {
                self.modify_active(|scene, id| scene.resize_object(id, size))
                    .await
            }
            Command::EditText(text) => {
                self.modify_active(|scene, id| scene.set_text(id, text))
                    .await
            }
            Command::Select(point) => {
                let hit = self.canvas.select_at(point);
                self.canvas.render_all();
                Ok(if hit.is_some() {
                    Outcome::Applied
                } else {
                    Outcome::Ignored
                })
            }
            Command::ResizeCanvas { width, height } => {
                self.canvas.scene_mut().resize_canvas(width, height);
                self.canvas.render_all();
                Ok(Outcome::Applied)
            }
        }
    }

    async fn add_text(&mut self) -> Result<Outcome, EditorError> {
        let before = self.canvas.scene().clone();
        let scene = self.canvas.scene_mut();
        let id = scene.add_object(self.config.new_text.to_spec());
        scene.set_active(Some(id));
        self.commit(before).await?;
        info!(object_id = %id, "text added");
        Ok(Outcome::Added(id))
    }

    async fn apply_tool(&mut self, tool: &dyn Tool) -> Result<Outcome, EditorError> {
        let name = tool.name().to_string();
        self.modify_active(|scene, id| {
            let changed = tool.apply(scene, id);
            if !changed {
                debug!(tool = %name, object_id = %id, "tool made no change");
            }
            changed
        })
        .await
    }

    async fn modify_active(
        &mut self,
        edit: impl FnOnce(&mut Scene, ObjectId) -> bool,
    ) -> Result<Outcome, EditorError> {
        let Some(id) = self.canvas.scene().active_object() else {
            warn!("no active object, command ignored");
            return Ok(Outcome::Ignored);
        };
        let stylable = self
            .canvas
            .scene()
            .get(id)
            .is_some_and(|object| object.is_stylable());
        if !stylable {
            warn!(object_id = %id, "active object is not a text box, command ignored");
            return Ok(Outcome::Ignored);
        }

        let before = self.canvas.scene().clone();
        if !edit(self.canvas.scene_mut(), id) {
            return Ok(Outcome::Ignored);
        }
        self.commit(before).await?;
        Ok(Outcome::Applied)
    }

    // Modification completed: check the surface can lay it out, redraw,
    // then checkpoint. Any failure puts `before` back untouched.
    async fn commit(&mut self, before: Scene) -> Result<(), EditorError> {
        if let Err(e) = self.canvas.check_layout().await {
            warn!(error = %e, "edit rejected, scene rolled back");
            self.rollback(before);
            return Err(EditorError::Rejected(e));
        }

        self.canvas.render_all();
        match self.history.record_checkpoint(self.canvas.scene()) {
            Ok(Some(index)) => debug!(index, "checkpoint after edit"),
            Ok(None) => {
                if self.history.strategy() == HistoryStrategy::ObjectStack {
                    debug!("edit not recorded by object-stack history");
                }
            }
            Err(e) => {
                warn!(error = %e, "checkpoint failed, scene rolled back");
                self.rollback(before);
                return Err(e.into());
            }
        }
        Ok(())
    }

    fn rollback(&mut self, before: Scene) {
        *self.canvas.scene_mut() = before;
        self.canvas.render_all();
    }

    /// Tear down: deregister listeners and end the history engine's lifetime.
    pub fn dispose(self) -> Scene {
        let Editor {
            canvas,
            history,
            listeners,
            ..
        } = self;
        drop(listeners);
        history.dispose();
        info!("editor disposed");
        canvas.into_scene()
    }
}

fn applied(changed: bool) -> Outcome {
    if changed {
        Outcome::Applied
    } else {
        Outcome::Ignored
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("canvas", &self.canvas)
            .field("history", &self.history.strategy())
            .field("pending", &self.pending.borrow().len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
