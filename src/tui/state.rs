//! TUI state algebra: pure types, zero effects.
//!
//! These types define the entire TUI state space. The transition function
//! and the rendering layer both program against them.
//!
//! Design principle: Screen variants carry only per-screen transient state
//! (cursor, focus, form contents). Shared data (the catalog, icon status)
//! lives in App. Viewport offsets for the grid are derived during
//! rendering; the modal's body scroll is stored and clamped by the loop.

use crossterm::event::{KeyEvent, MouseEvent};

use crate::assets::IconStatus;
use crate::catalog::Catalog;
use crate::form::{ContactForm, Field};
use crate::types::Inquiry;

use super::timer::ScopedTimer;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Producers:
/// - A terminal reader thread sends `Key`, `Mouse`, `Resize`, and
///   `InputClosed` when it stops reading
/// - Reset timers send `ResetForm`
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    /// The terminal can no longer be read; nothing else will arrive from it.
    InputClosed,
    /// A confirmation delay elapsed for the submission with this ticket.
    ResetForm { ticket: u64 },
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Program content, injected at startup.
    pub catalog: Catalog,

    /// Icon availability, parallel to `catalog.programs()`.
    pub icons: Vec<IconStatus>,

    /// Current screen. `Screen::Detail` is the non-null selection.
    pub screen: Screen,

    /// Card columns at the last rendered width.
    pub columns: usize,

    /// Pending confirmation reset, if a submission is on screen.
    pub reset_timer: Option<ScopedTimer>,

    /// Last ticket handed out to a submission.
    pub last_ticket: u64,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Card grid with nothing selected.
    Grid {
        /// Focused card.
        cursor: usize,
    },

    /// A program is selected; the modal is open over the grid.
    Detail(Modal),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Grid { cursor: 0 }
    }
}

/// Per-selection modal state. A fresh one is built on every selection,
/// so the form never outlives the program it was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    /// Index into `catalog.programs()`.
    pub program: usize,
    pub focus: Focus,
    pub form: ContactForm,
    /// First visible row of the description body.
    pub scroll: u16,
}

impl Modal {
    pub fn open(program: usize) -> Self {
        Modal {
            program,
            focus: Focus::Field(Field::Name),
            form: ContactForm::new(),
            scroll: 0,
        }
    }
}

/// Focusable elements of the modal, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    CloseIcon,
    Field(Field),
    Send,
    CloseButton,
}

impl Focus {
    const EDITABLE_ORDER: [Focus; 6] = [
        Focus::CloseIcon,
        Focus::Field(Field::Name),
        Focus::Field(Field::Email),
        Focus::Field(Field::Message),
        Focus::Send,
        Focus::CloseButton,
    ];

    /// While the confirmation is up the form controls are hidden.
    const SUBMITTED_ORDER: [Focus; 2] = [Focus::CloseIcon, Focus::CloseButton];

    fn order(form_editable: bool) -> &'static [Focus] {
        if form_editable {
            &Self::EDITABLE_ORDER
        } else {
            &Self::SUBMITTED_ORDER
        }
    }

    /// Whether this element is visible for the given form state.
    pub fn is_available(self, form_editable: bool) -> bool {
        Self::order(form_editable).contains(&self)
    }

    pub fn next(self, form_editable: bool) -> Focus {
        let order = Self::order(form_editable);
        match order.iter().position(|f| *f == self) {
            Some(i) => order[(i + 1) % order.len()],
            None => order[0],
        }
    }

    pub fn prev(self, form_editable: bool) -> Focus {
        let order = Self::order(form_editable);
        match order.iter().position(|f| *f == self) {
            Some(i) => order[(i + order.len() - 1) % order.len()],
            None => order[order.len() - 1],
        }
    }
}

/// How keys are interpreted right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Card grid: navigation and activation.
    Grid,
    /// A text field has focus: printable keys are typed.
    Typing(Field),
    /// A modal button has focus: keys act as shortcuts.
    Buttons,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key and mouse events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the card cursor.
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Press the focused card or modal button (Enter / Space / click).
    Activate,
    /// Select a program directly by index.
    Select(usize),
    /// Cycle the open modal through programs.
    NextProgram,
    PrevProgram,
    /// Clear the selection (Esc, backdrop, close icon, close button).
    Close,
    /// Move modal focus.
    FocusNext,
    FocusPrev,
    FocusOn(Focus),
    /// Type into the focused field.
    Input(char),
    Backspace,
    /// Submit the contact form.
    Submit,
    /// Scroll the modal body.
    ScrollUp,
    ScrollDown,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Quit the application.
    Quit,
    /// Show `screen` and execute a side effect against it.
    Effect { screen: Screen, effect: Effect },
}

/// Side effect requested by a pure transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand an inquiry to the delivery boundary.
    Deliver(Inquiry),
}

// ============================================================================
// CONSTRUCTORS AND QUERIES
// ============================================================================

impl App {
    /// Create an App on the card grid.
    pub fn new(catalog: Catalog, icons: Vec<IconStatus>) -> Self {
        App {
            catalog,
            icons,
            screen: Screen::default(),
            columns: 1,
            reset_timer: None,
            last_ticket: 0,
            should_quit: false,
        }
    }

    /// The open modal, if a program is selected.
    pub fn modal(&self) -> Option<&Modal> {
        match &self.screen {
            Screen::Detail(modal) => Some(modal),
            Screen::Grid { .. } => None,
        }
    }

    pub fn modal_mut(&mut self) -> Option<&mut Modal> {
        match &mut self.screen {
            Screen::Detail(modal) => Some(modal),
            Screen::Grid { .. } => None,
        }
    }

    /// Index of the selected program, if any.
    pub fn selection(&self) -> Option<usize> {
        self.modal().map(|m| m.program)
    }

    pub fn input_mode(&self) -> InputMode {
        match self.modal() {
            None => InputMode::Grid,
            Some(modal) => match modal.focus {
                Focus::Field(field) if modal.form.is_editable() => InputMode::Typing(field),
                _ => InputMode::Buttons,
            },
        }
    }

    /// Hand out a ticket for a new submission.
    pub fn next_ticket(&mut self) -> u64 {
        self.last_ticket += 1;
        self.last_ticket
    }

    /// Icon status for a program; Unchecked when not tracked.
    pub fn icon(&self, index: usize) -> &IconStatus {
        static UNCHECKED: IconStatus = IconStatus::Unchecked;
        self.icons.get(index).unwrap_or(&UNCHECKED)
    }
}

// ============================================================================
// TESTS
// ============================================================================
