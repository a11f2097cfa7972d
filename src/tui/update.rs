//! Pure state transitions: (Screen, Action) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Each screen defines which actions it accepts. Unhandled actions
//! return the current screen unchanged (no-op).

use crate::catalog::Catalog;
use crate::form::SubmitError;

use super::state::{Action, Effect, Focus, Modal, Screen, Transition};

/// Read-only inputs the transitions need besides the screen itself.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub catalog: &'a Catalog,
    /// Card columns currently on screen.
    pub columns: usize,
}

/// Rows moved per scroll step in the modal body.
const SCROLL_STEP: u16 = 3;

/// Pure state transition function.
pub fn update(screen: Screen, action: &Action, ctx: &Context) -> Transition {
    match screen {
        Screen::Grid { cursor } => update_grid(cursor, action, ctx),
        Screen::Detail(modal) => update_detail(modal, action, ctx),
    }
}

// ============================================================================
// GRID (nothing selected)
// ============================================================================

/// Grid: move the card cursor, select a card, quit.
fn update_grid(cursor: usize, action: &Action, ctx: &Context) -> Transition {
    let len = ctx.catalog.len();
    let columns = ctx.columns.max(1);
    let stay = Transition::Screen(Screen::Grid { cursor });

    match action {
        Action::MoveLeft => Transition::Screen(Screen::Grid {
            cursor: cursor.saturating_sub(1),
        }),
        Action::MoveRight => {
            let new_cursor = if len == 0 { 0 } else { (cursor + 1).min(len - 1) };
            Transition::Screen(Screen::Grid { cursor: new_cursor })
        }
        Action::MoveUp => match cursor.checked_sub(columns) {
            Some(new_cursor) => Transition::Screen(Screen::Grid { cursor: new_cursor }),
            None => stay,
        },
        Action::MoveDown => {
            if cursor + columns < len {
                Transition::Screen(Screen::Grid {
                    cursor: cursor + columns,
                })
            } else {
                stay
            }
        }
        Action::Activate => select(cursor, ctx).unwrap_or(stay),
        Action::Select(index) => select(*index, ctx).unwrap_or(stay),
        Action::Quit => Transition::Quit,
        // Close with nothing selected is a no-op.
        _ => stay,
    }
}

/// Open the modal for `index`, if it names a program.
fn select(index: usize, ctx: &Context) -> Option<Transition> {
    (index < ctx.catalog.len()).then(|| Transition::Screen(Screen::Detail(Modal::open(index))))
}

// ============================================================================
// DETAIL (a program is selected)
// ============================================================================

/// Detail modal: close, switch program, focus, form editing, submit.
fn update_detail(mut modal: Modal, action: &Action, ctx: &Context) -> Transition {
    let len = ctx.catalog.len();
    let editable = modal.form.is_editable();

    match action {
        Action::Close => Transition::Screen(Screen::Grid {
            cursor: modal.program,
        }),
        Action::Select(index) => {
            if *index == modal.program || *index >= len {
                Transition::Screen(Screen::Detail(modal))
            } else {
                Transition::Screen(Screen::Detail(Modal::open(*index)))
            }
        }
        Action::NextProgram if len > 0 => {
            Transition::Screen(Screen::Detail(Modal::open((modal.program + 1) % len)))
        }
        Action::PrevProgram if len > 0 => {
            Transition::Screen(Screen::Detail(Modal::open((modal.program + len - 1) % len)))
        }
        Action::FocusNext => {
            modal.focus = modal.focus.next(editable);
            Transition::Screen(Screen::Detail(modal))
        }
        Action::FocusPrev => {
            modal.focus = modal.focus.prev(editable);
            Transition::Screen(Screen::Detail(modal))
        }
        Action::FocusOn(focus) => {
            if focus.is_available(editable) {
                modal.focus = *focus;
            }
            Transition::Screen(Screen::Detail(modal))
        }
        Action::Input(c) => {
            if let Focus::Field(field) = modal.focus {
                modal.form.insert(field, *c);
            }
            Transition::Screen(Screen::Detail(modal))
        }
        Action::Backspace => {
            if let Focus::Field(field) = modal.focus {
                modal.form.backspace(field);
            }
            Transition::Screen(Screen::Detail(modal))
        }
        Action::Submit => submit(modal, ctx),
        Action::Activate => match modal.focus {
            Focus::CloseIcon | Focus::CloseButton => Transition::Screen(Screen::Grid {
                cursor: modal.program,
            }),
            Focus::Send => submit(modal, ctx),
            Focus::Field(_) => Transition::Screen(Screen::Detail(modal)),
        },
        Action::ScrollUp => {
            modal.scroll = modal.scroll.saturating_sub(SCROLL_STEP);
            Transition::Screen(Screen::Detail(modal))
        }
        Action::ScrollDown => {
            modal.scroll = modal.scroll.saturating_add(SCROLL_STEP);
            Transition::Screen(Screen::Detail(modal))
        }
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Detail(modal)),
    }
}

/// Validate the form; on success ask the effects layer to deliver.
fn submit(mut modal: Modal, ctx: &Context) -> Transition {
    let Some(program) = ctx.catalog.program(modal.program) else {
        return Transition::Screen(Screen::Detail(modal));
    };

    match modal.form.submit(&program.title) {
        Ok(inquiry) => Transition::Effect {
            screen: Screen::Detail(modal),
            effect: Effect::Deliver(inquiry),
        },
        Err(SubmitError::MissingField(field)) => {
            modal.focus = Focus::Field(field);
            Transition::Screen(Screen::Detail(modal))
        }
        Err(SubmitError::AlreadySubmitted) => Transition::Screen(Screen::Detail(modal)),
    }
}

// ============================================================================
// TESTS
// ============================================================================
