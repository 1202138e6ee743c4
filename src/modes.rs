//! Application view modes and the state machine that owns them.
//!
//! All mode/panel/pointer-lock state lives in one [`ModeMachine`] resource
//! and is only mutated through its action methods, which enforce the
//! transition table (an invalid call logs a warning and does nothing). A sync
//! system mirrors the machine's mode into [`ViewMode`] Bevy state so other
//! plugins can schedule with `in_state`, and another reconciles the window
//! cursor with the machine's desired pointer lock.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, WindowFocused};

/// Application view mode, used for system scheduling. Exactly one is active.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ViewMode {
    /// 2D landing page over a frozen scene.
    #[default]
    Website,
    /// Scripted look-around sequence before first-person control.
    Tour,
    /// Free first-person walking.
    Fps,
    /// A collectible's payload is displayed; the scene is paused behind it.
    ViewingObject,
    /// Content panel beside a live view of the room.
    Split,
}

/// Which content panel a split-mode overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PanelKind {
    /// Bio panel (picture frame).
    About,
    /// Skills panel (whiteboard).
    Technical,
    /// Projects panel (PC).
    Projects,
    /// Certifications panel (trophy).
    Certifications,
}

impl PanelKind {
    /// Fixed navigation order for prev/next in split mode.
    pub const ORDER: [PanelKind; 4] = [
        PanelKind::About,
        PanelKind::Technical,
        PanelKind::Projects,
        PanelKind::Certifications,
    ];

    /// Panel before this one in navigation order, if any.
    pub fn prev(self) -> Option<PanelKind> {
        let i = Self::ORDER.iter().position(|p| *p == self)?;
        i.checked_sub(1).map(|i| Self::ORDER[i])
    }

    /// Panel after this one in navigation order, if any.
    pub fn next(self) -> Option<PanelKind> {
        let i = Self::ORDER.iter().position(|p| *p == self)?;
        Self::ORDER.get(i + 1).copied()
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PanelKind::About => "About Me",
            PanelKind::Technical => "Technical Skills",
            PanelKind::Projects => "Projects",
            PanelKind::Certifications => "Certifications",
        }
    }
}

/// Payload of a viewable collectible prop.
#[derive(Clone, Debug, PartialEq, Eq, Reflect)]
pub struct CollectibleInfo {
    /// Stable identifier.
    pub id: String,
    /// Heading shown in the object viewer.
    pub title: String,
    /// Body text shown in the object viewer.
    pub content: String,
}

/// The single owned application-state object.
///
/// Pointer lock here is the *desired* capture state implied by the mode; the
/// window may transiently disagree (focus loss), which is handled by
/// [`apply_pointer_lock`] without leaving the mode.
#[derive(Resource, Debug, Reflect)]
pub struct ModeMachine {
    mode: ViewMode,
    panel: Option<PanelKind>,
    viewed: Option<CollectibleInfo>,
    pointer_locked: bool,
    has_played_tour: bool,
}

impl ModeMachine {
    /// Fresh machine in `Website` mode. `skip_tour` marks the tour as already
    /// played, so the enter affordance goes straight to first person.
    pub fn new(skip_tour: bool) -> Self {
        Self {
            mode: ViewMode::Website,
            panel: None,
            viewed: None,
            pointer_locked: false,
            has_played_tour: skip_tour,
        }
    }

    /// Currently active mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Active split panel; `Some` exactly while in `Split`.
    pub fn panel(&self) -> Option<PanelKind> {
        self.panel
    }

    /// Collectible being viewed; `Some` exactly while in `ViewingObject`.
    pub fn viewed(&self) -> Option<&CollectibleInfo> {
        self.viewed.as_ref()
    }

    /// Desired pointer-capture state for the current mode.
    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// `true` once the tour has completed at least once; never reset.
    pub fn has_played_tour(&self) -> bool {
        self.has_played_tour
    }

    fn guard(&self, expected: ViewMode, action: &str) -> bool {
        if self.mode == expected {
            true
        } else {
            warn!("{action} ignored: mode is {:?}, expected {expected:?}", self.mode);
            false
        }
    }

    /// The landing page's enter affordance: first visit starts the tour,
    /// later visits go straight to first person.
    pub fn enter(&mut self) {
        if self.has_played_tour {
            self.enter_fps();
        } else {
            self.start_tour();
        }
    }

    /// `Website -> Fps` (tour already played). Requests pointer lock.
    pub fn enter_fps(&mut self) {
        if !self.guard(ViewMode::Website, "enter_fps") {
            return;
        }
        self.mode = ViewMode::Fps;
        self.pointer_locked = true;
    }

    /// `Fps -> Website` via the intentional exit key. Releases pointer lock.
    pub fn exit_fps(&mut self) {
        if !self.guard(ViewMode::Fps, "exit_fps") {
            return;
        }
        self.mode = ViewMode::Website;
        self.pointer_locked = false;
    }

    /// `Website -> Tour`. Pointer lock is requested for the whole sequence.
    pub fn start_tour(&mut self) {
        if !self.guard(ViewMode::Website, "start_tour") {
            return;
        }
        self.mode = ViewMode::Tour;
        self.pointer_locked = true;
    }

    /// `Tour -> Fps` when the sequence completes; lock is retained and the
    /// tour is permanently marked as played.
    pub fn end_tour(&mut self) {
        if !self.guard(ViewMode::Tour, "end_tour") {
            return;
        }
        self.mode = ViewMode::Fps;
        self.has_played_tour = true;
        self.pointer_locked = true;
    }

    /// `Fps -> ViewingObject`; stores the payload, releases pointer lock.
    pub fn view_object(&mut self, object: CollectibleInfo) {
        if !self.guard(ViewMode::Fps, "view_object") {
            return;
        }
        self.mode = ViewMode::ViewingObject;
        self.viewed = Some(object);
        self.pointer_locked = false;
    }

    /// `ViewingObject -> Fps`; clears the payload, re-requests pointer lock.
    pub fn close_object(&mut self) {
        if !self.guard(ViewMode::ViewingObject, "close_object") {
            return;
        }
        self.mode = ViewMode::Fps;
        self.viewed = None;
        self.pointer_locked = true;
    }

    /// `Fps -> Split` with the interacted prop's panel. Releases pointer
    /// lock. The caller is responsible for starting the camera transition to
    /// the panel's viewpoint.
    pub fn enter_split(&mut self, panel: PanelKind) {
        if !self.guard(ViewMode::Fps, "enter_split") {
            return;
        }
        self.mode = ViewMode::Split;
        self.panel = Some(panel);
        self.pointer_locked = false;
    }

    /// `Split -> Split` prev/next navigation; only the panel changes, the
    /// pointer stays released. The caller re-targets the camera transition.
    pub fn navigate_split(&mut self, panel: PanelKind) {
        if !self.guard(ViewMode::Split, "navigate_split") {
            return;
        }
        self.panel = Some(panel);
    }

    /// `Split -> Fps`; clears the panel, re-requests pointer lock.
    pub fn exit_split(&mut self) {
        if !self.guard(ViewMode::Split, "exit_split") {
            return;
        }
        self.mode = ViewMode::Fps;
        self.panel = None;
        self.pointer_locked = true;
    }
}

/// Actual window cursor capture state, reconciled each frame.
#[derive(Resource, Default, Reflect)]
pub struct PointerLock {
    /// `true` while the cursor is hidden and confined.
    pub engaged: bool,
    focused: bool,
}

/// State machine plugin: [`ViewMode`] state, [`ModeMachine`], cursor capture.
pub struct ModesPlugin {
    /// Start with the tour already marked as played.
    pub skip_tour: bool,
}

impl Plugin for ModesPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ViewMode>()
            .register_type::<PointerLock>()
            .init_state::<ViewMode>()
            .insert_resource(ModeMachine::new(self.skip_tour))
            .insert_resource(PointerLock {
                engaged: false,
                // Windows start focused; WindowFocused only fires on change.
                focused: true,
            })
            .add_systems(
                Update,
                (escape_shortcuts, sync_mode_state, apply_pointer_lock).chain(),
            );
    }
}

/// Mirrors the machine's mode into the schedulable [`ViewMode`] state.
fn sync_mode_state(
    machine: Res<ModeMachine>,
    state: Res<State<ViewMode>>,
    mut next: ResMut<NextState<ViewMode>>,
) {
    if machine.mode() != *state.get() {
        next.set(machine.mode());
    }
}

/// Escape is the intentional exit key: it backs out one mode layer. Losing
/// window focus is *not* an exit (that path only drops capture, below).
fn escape_shortcuts(keys: Res<ButtonInput<KeyCode>>, mut machine: ResMut<ModeMachine>) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }
    match machine.mode() {
        ViewMode::Fps => machine.exit_fps(),
        ViewMode::Split => machine.exit_split(),
        ViewMode::ViewingObject => machine.close_object(),
        ViewMode::Website | ViewMode::Tour => {}
    }
}

/// Reconciles cursor capture with the machine's desired lock.
///
/// Capture engages only while the window is focused; a focus loss drops
/// capture without leaving the mode, and regaining focus re-engages it.
fn apply_pointer_lock(
    machine: Res<ModeMachine>,
    mut lock: ResMut<PointerLock>,
    mut focus_events: MessageReader<WindowFocused>,
    mut windows: Query<(&mut CursorOptions, &mut Window)>,
) {
    for ev in focus_events.read() {
        lock.focused = ev.focused;
    }

    let engaged = machine.pointer_locked() && lock.focused;
    if engaged == lock.engaged {
        return;
    }
    lock.engaged = engaged;

    for (mut opts, mut window) in &mut windows {
        if engaged {
            opts.visible = false;
            opts.grab_mode = CursorGrabMode::Confined;
            let center = Vec2::new(window.width() / 2.0, window.height() / 2.0);
            window.set_cursor_position(Some(center));
        } else {
            opts.visible = true;
            opts.grab_mode = CursorGrabMode::None;
        }
    }
}
