//! TUI effects boundary: event loop, terminal lifecycle, input mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! hands inquiries to the delivery sink, and owns the reset timers.
//!
//! Architecture: producers feed a single mpsc channel.
//! - Input reader thread: forwards crossterm key, mouse and resize events
//! - Reset timers: send `ResetForm` once their delay elapses
//! The event loop consumes from the channel, dispatching to pure handlers.

use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};
use ratatui::Terminal;
use tracing::{debug, info, warn};

use crate::assets::{resolve_icon, IconStatus};
use crate::catalog::Catalog;
use crate::delivery::InquirySink;
use crate::form::Field;
use crate::types::BrowseConfig;

use super::layout;
use super::state::{Action, App, AppEvent, Effect, Focus, InputMode, Screen, Transition};
use super::theme;
use super::timer::ScopedTimer;
use super::update::{update, Context};
use super::view::{body_scroll_limit, render};

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action for the current mode.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C always quits
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        InputMode::Grid => map_grid_key(key),
        InputMode::Typing(field) => map_typing_key(key, field, ctrl),
        InputMode::Buttons => map_button_key(key, ctrl),
    }
}

fn map_grid_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),

        // Selection
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Select(digit_index(c))),

        KeyCode::Esc => Some(Action::Close),
        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

/// A text field has focus: printable characters are typed.
fn map_typing_key(key: KeyEvent, field: Field, ctrl: bool) -> Option<Action> {
    if ctrl {
        return match key.code {
            KeyCode::Char('s') => Some(Action::Submit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Close),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Enter if field.is_multiline() => Some(Action::Input('\n')),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::PageUp => Some(Action::ScrollUp),
        KeyCode::PageDown => Some(Action::ScrollDown),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => Some(Action::Input(c)),
        _ => None,
    }
}

/// A modal button has focus: keys act as shortcuts.
fn map_button_key(key: KeyEvent, ctrl: bool) -> Option<Action> {
    if ctrl {
        return match key.code {
            KeyCode::Char('s') => Some(Action::Submit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Close),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),

        // Program switching
        KeyCode::Char('[') => Some(Action::PrevProgram),
        KeyCode::Char(']') => Some(Action::NextProgram),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Select(digit_index(c))),

        // Body scrolling
        KeyCode::PageUp | KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::PageDown | KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),

        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

/// '1' selects the first program.
fn digit_index(c: char) -> usize {
    (c as u8 - b'1') as usize
}

// ============================================================================
// MOUSE MAPPING
// ============================================================================

/// Map a mouse event to an Action by hit-testing the rendered layout.
///
/// `area` is the full frame the last render used.
pub fn map_mouse(app: &App, area: Rect, mouse: MouseEvent) -> Option<Action> {
    let pos = Position::new(mouse.column, mouse.row);

    match (&app.screen, mouse.kind) {
        (Screen::Grid { cursor }, MouseEventKind::Down(MouseButton::Left)) => {
            let (_, content, _) = layout::split_frame(area);
            let catalog = &app.catalog;
            layout::grid_layout(content, catalog.heading(), catalog.intro(), catalog.len(), *cursor)
                .cards
                .iter()
                .find(|(_, rect)| rect.contains(pos))
                .map(|(index, _)| Action::Select(*index))
        }
        (Screen::Grid { .. }, MouseEventKind::ScrollUp) => Some(Action::MoveUp),
        (Screen::Grid { .. }, MouseEventKind::ScrollDown) => Some(Action::MoveDown),

        (Screen::Detail(modal), MouseEventKind::Down(MouseButton::Left)) => {
            let m = layout::modal_layout(area);
            let editable = modal.form.is_editable();

            if !m.panel.contains(pos)
                || m.close_icon.contains(pos)
                || m.close_button.contains(pos)
            {
                return Some(Action::Close);
            }
            if !editable {
                return None;
            }
            if m.send.contains(pos) {
                return Some(Action::Submit);
            }
            [(Field::Name, m.name), (Field::Email, m.email), (Field::Message, m.message)]
                .into_iter()
                .find(|(_, rect)| rect.contains(pos))
                .map(|(field, _)| Action::FocusOn(Focus::Field(field)))
        }
        (Screen::Detail(_), MouseEventKind::ScrollUp) => Some(Action::ScrollUp),
        (Screen::Detail(_), MouseEventKind::ScrollDown) => Some(Action::ScrollDown),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout()
        .execute(EnterAlternateScreen)?
        .execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout()
        .execute(DisableMouseCapture)?
        .execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || forward_events(event::read, &tx));
}

/// Forward terminal events until reading fails or the receiver is gone.
///
/// A read failure is reported as `InputClosed` so the loop can shut down
/// instead of waiting on an input source that will never speak again.
fn forward_events(mut read: impl FnMut() -> io::Result<Event>, tx: &mpsc::Sender<AppEvent>) {
    loop {
        let forwarded = match read() {
            Ok(Event::Key(key)) => AppEvent::Key(key),
            Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
            Ok(Event::Resize(_, _)) => AppEvent::Resize,
            Ok(_) => continue, // focus, paste
            Err(e) => {
                warn!(error = %e, "terminal input failed");
                let _ = tx.send(AppEvent::InputClosed);
                break;
            }
        };
        if tx.send(forwarded).is_err() {
            break; // receiver dropped, TUI is shutting down
        }
    }
}

// ============================================================================
// STARTUP
// ============================================================================

/// Check every program icon against `assets_dir`, logging the missing ones.
pub fn resolve_icons(catalog: &Catalog, assets_dir: Option<&Path>) -> Vec<IconStatus> {
    catalog
        .programs()
        .iter()
        .map(|program| {
            let status = resolve_icon(assets_dir, &program.icon_path);
            if let IconStatus::Missing { expected } = &status {
                warn!(
                    program = %program.title,
                    path = %expected.display(),
                    "program icon missing; using fallback glyph"
                );
            }
            status
        })
        .collect()
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI event loop until the user quits.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// spawns the input reader, and delivers inquiries through `sink`.
pub fn run(catalog: Catalog, config: BrowseConfig, sink: &dyn InquirySink) -> io::Result<()> {
    for issue in catalog.audit(theme::is_known_accent) {
        warn!(%issue, "catalog issue");
    }
    let icons = resolve_icons(&catalog, config.assets_dir.as_deref());

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(catalog, icons);
    info!(programs = app.catalog.len(), "browser started");

    let result = event_loop(&mut terminal, &mut app, &config, sink);

    // Cancel any pending reset before the terminal goes away.
    app.reset_timer = None;
    let restored = restore_terminal();
    match &result {
        Ok(()) => info!("browser closed"),
        Err(e) => warn!(error = %e, "browser stopped on terminal error"),
    }
    result.and(restored)
}

/// Draw and dispatch until the user quits or input closes.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &BrowseConfig,
    sink: &dyn InquirySink,
) -> io::Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_input_reader(tx.clone());

    while !app.should_quit {
        // Render
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        sync_viewport(app, area);
        terminal.draw(|frame| render(app, frame))?;

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key, app.input_mode()) {
                    dispatch(app, &action, sink, &tx, config.reset_delay);
                }
            }
            AppEvent::Mouse(mouse) => {
                if let Some(action) = map_mouse(app, area, mouse) {
                    dispatch(app, &action, sink, &tx, config.reset_delay);
                }
            }
            AppEvent::Resize => {} // redrawn at the top of the loop
            background_event => handle_background_event(app, background_event),
        }
    }
    Ok(())
}

/// Update layout-derived state for the current terminal size.
fn sync_viewport(app: &mut App, area: Rect) {
    let (_, content, _) = layout::split_frame(area);
    app.columns = layout::grid_columns(content.width);

    let limit = body_scroll_limit(app, area);
    if let Some(modal) = app.modal_mut() {
        modal.scroll = modal.scroll.min(limit);
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Apply one action: pure transition, then its effects.
pub fn dispatch(
    app: &mut App,
    action: &Action,
    sink: &dyn InquirySink,
    tx: &mpsc::Sender<AppEvent>,
    reset_delay: Duration,
) {
    let before = app.selection();
    let screen = std::mem::take(&mut app.screen);
    let ctx = Context {
        catalog: &app.catalog,
        columns: app.columns,
    };

    match update(screen, action, &ctx) {
        Transition::Screen(new_screen) => {
            app.screen = new_screen;
        }
        Transition::Quit => {
            app.should_quit = true;
        }
        Transition::Effect { screen, effect } => {
            app.screen = screen;
            handle_effect(effect, app, sink, tx, reset_delay);
        }
    }

    release_stale_timer(app);
    log_selection_change(app, before);
}

/// Handle a side effect requested by a pure transition.
fn handle_effect(
    effect: Effect,
    app: &mut App,
    sink: &dyn InquirySink,
    tx: &mpsc::Sender<AppEvent>,
    reset_delay: Duration,
) {
    match effect {
        Effect::Deliver(inquiry) => match sink.deliver(&inquiry) {
            Ok(()) => {
                let ticket = app.next_ticket();
                if let Some(modal) = app.modal_mut() {
                    modal.form.mark_submitted(ticket);
                    modal.focus = Focus::CloseButton;
                }
                // Replacing drops, and so cancels, any earlier timer.
                app.reset_timer = Some(ScopedTimer::start(
                    reset_delay,
                    ticket,
                    AppEvent::ResetForm { ticket },
                    tx.clone(),
                ));
                debug!(
                    ticket,
                    delay_ms = reset_delay.as_millis() as u64,
                    "reset timer started"
                );
            }
            Err(e) => {
                warn!(program = %inquiry.program_title, error = %e, "inquiry delivery failed");
                if let Some(modal) = app.modal_mut() {
                    modal.form.mark_failed(e.to_string());
                }
            }
        },
    }
}

/// Handle events from the reset timers and input shutdown.
pub fn handle_background_event(app: &mut App, event: AppEvent) {
    if let AppEvent::InputClosed = event {
        app.should_quit = true;
    } else if let AppEvent::ResetForm { ticket } = event {
        let reset = app.modal_mut().is_some_and(|modal| {
            let reset = modal.form.reset(ticket);
            if reset {
                modal.focus = Focus::Field(Field::Name);
            }
            reset
        });

        if reset {
            info!(ticket, "contact form reset");
            if app.reset_timer.as_ref().is_some_and(|t| t.ticket() == ticket) {
                app.reset_timer = None;
            }
        } else {
            debug!(ticket, "stale reset ignored");
        }
    }
}

/// Drop the reset timer once the form it belongs to is gone.
fn release_stale_timer(app: &mut App) {
    let live = app.modal().and_then(|modal| modal.form.submitted_ticket());
    if let Some(timer) = app.reset_timer.take_if(|timer| Some(timer.ticket()) != live)
        && !timer.is_finished()
    {
        debug!(ticket = timer.ticket(), "reset timer cancelled");
    }
}

/// Log selection changes, including a missing detail record.
fn log_selection_change(app: &App, before: Option<usize>) {
    let after = app.selection();
    if after == before {
        return;
    }

    match after.and_then(|index| app.catalog.program(index)) {
        Some(program) => {
            info!(program = %program.title, "program selected");
            if app.catalog.detail(&program.title).is_none() {
                warn!(program = %program.title, "no detail record; showing fallback");
            }
        }
        None => info!("detail closed"),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::tests::{FailingSink, RecordingSink};
    use crate::delivery::DeliveryError;
    use crate::form::{FormPhase, CONFIRMATION};
    use crate::tui::state::Modal;
    use crate::types::{Inquiry, ProgramSummary};
    use crossterm::event::KeyEventState;
    use crate::rich_text;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::style::Modifier;

    const DELAY: Duration = Duration::from_millis(250);
    const AREA: Rect = Rect::new(0, 0, 100, 40);

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn harness() -> (App, mpsc::Sender<AppEvent>, mpsc::Receiver<AppEvent>) {
        let mut app = App::new(Catalog::builtin(), Vec::new());
        app.columns = 3;
        let (tx, rx) = mpsc::channel();
        (app, tx, rx)
    }

    fn act(app: &mut App, action: Action, sink: &dyn InquirySink, tx: &mpsc::Sender<AppEvent>) {
        dispatch(app, &action, sink, tx, DELAY);
    }

    fn type_text(app: &mut App, text: &str, sink: &dyn InquirySink, tx: &mpsc::Sender<AppEvent>) {
        for c in text.chars() {
            act(app, Action::Input(c), sink, tx);
        }
    }

    /// Fill all three fields of the open modal and submit.
    fn fill_and_submit(app: &mut App, sink: &dyn InquirySink, tx: &mpsc::Sender<AppEvent>) {
        type_text(app, "Ada", sink, tx);
        act(app, Action::FocusNext, sink, tx);
        type_text(app, "ada@example.com", sink, tx);
        act(app, Action::FocusNext, sink, tx);
        type_text(app, "When is the next workshop?", sink, tx);
        act(app, Action::Submit, sink, tx);
    }

    fn phase(app: &App) -> FormPhase {
        app.modal().expect("modal open").form.phase().clone()
    }

    fn wait_for_reset(rx: &mpsc::Receiver<AppEvent>) -> AppEvent {
        rx.recv_timeout(Duration::from_secs(2))
            .expect("reset event should arrive")
    }

    fn screen_buffer(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn screen_text(app: &App) -> String {
        buffer_text(&screen_buffer(app, 100, 50))
    }

    /// Whether `word` appears somewhere on screen with every cell bold.
    fn shows_bold(buffer: &Buffer, word: &str) -> bool {
        let chars: Vec<String> = word.chars().map(String::from).collect();
        let span = chars.len() as u16;
        let area = buffer.area;
        (area.top()..area.bottom()).any(|y| {
            (area.left()..area.right().saturating_sub(span.saturating_sub(1))).any(|x| {
                chars.iter().enumerate().all(|(i, c)| {
                    let cell = &buffer[(x + i as u16, y)];
                    cell.symbol() == c && cell.modifier.contains(Modifier::BOLD)
                })
            })
        })
    }

    // --- key mapping -------------------------------------------------------

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [
            InputMode::Grid,
            InputMode::Typing(Field::Name),
            InputMode::Buttons,
        ] {
            assert_eq!(map_key(ctrl_c, mode), Some(Action::Quit));
        }
    }

    #[test]
    fn grid_keys_move_and_activate() {
        let g = InputMode::Grid;
        assert_eq!(map_key(key(KeyCode::Char('j')), g), Some(Action::MoveDown));
        assert_eq!(map_key(key(KeyCode::Up), g), Some(Action::MoveUp));
        assert_eq!(map_key(key(KeyCode::Char('h')), g), Some(Action::MoveLeft));
        assert_eq!(map_key(key(KeyCode::Right), g), Some(Action::MoveRight));
        assert_eq!(map_key(key(KeyCode::Enter), g), Some(Action::Activate));
        assert_eq!(map_key(key(KeyCode::Char(' ')), g), Some(Action::Activate));
        assert_eq!(map_key(key(KeyCode::Char('q')), g), Some(Action::Quit));
    }

    #[test]
    fn digits_select_programs() {
        assert_eq!(
            map_key(key(KeyCode::Char('1')), InputMode::Grid),
            Some(Action::Select(0))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('6')), InputMode::Buttons),
            Some(Action::Select(5))
        );
    }

    #[test]
    fn typing_mode_types_letters_and_digits() {
        let mode = InputMode::Typing(Field::Name);
        assert_eq!(map_key(key(KeyCode::Char('q')), mode), Some(Action::Input('q')));
        assert_eq!(map_key(key(KeyCode::Char('2')), mode), Some(Action::Input('2')));
        assert_eq!(map_key(key(KeyCode::Char(' ')), mode), Some(Action::Input(' ')));
        assert_eq!(map_key(key(KeyCode::Backspace), mode), Some(Action::Backspace));
    }

    #[test]
    fn enter_submits_single_line_fields_and_breaks_message_lines() {
        assert_eq!(
            map_key(key(KeyCode::Enter), InputMode::Typing(Field::Email)),
            Some(Action::Submit)
        );
        assert_eq!(
            map_key(key(KeyCode::Enter), InputMode::Typing(Field::Message)),
            Some(Action::Input('\n'))
        );
    }

    #[test]
    fn ctrl_s_submits_from_modal() {
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            map_key(ctrl_s, InputMode::Typing(Field::Message)),
            Some(Action::Submit)
        );
        assert_eq!(map_key(ctrl_s, InputMode::Buttons), Some(Action::Submit));
    }

    #[test]
    fn tab_and_esc_in_modal() {
        for mode in [InputMode::Typing(Field::Name), InputMode::Buttons] {
            assert_eq!(map_key(key(KeyCode::Tab), mode), Some(Action::FocusNext));
            assert_eq!(map_key(key(KeyCode::BackTab), mode), Some(Action::FocusPrev));
            assert_eq!(map_key(key(KeyCode::Esc), mode), Some(Action::Close));
        }
    }

    #[test]
    fn button_mode_shortcuts() {
        let b = InputMode::Buttons;
        assert_eq!(map_key(key(KeyCode::Char(']')), b), Some(Action::NextProgram));
        assert_eq!(map_key(key(KeyCode::Char('[')), b), Some(Action::PrevProgram));
        assert_eq!(map_key(key(KeyCode::Char(' ')), b), Some(Action::Activate));
        assert_eq!(map_key(key(KeyCode::PageDown), b), Some(Action::ScrollDown));
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release, InputMode::Grid), None);
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(key(KeyCode::Char('z')), InputMode::Grid), None);
        assert_eq!(map_key(key(KeyCode::F(5)), InputMode::Buttons), None);
    }

    // --- mouse mapping -----------------------------------------------------

    #[test]
    fn clicking_a_card_selects_it() {
        let (app, _tx, _rx) = harness();
        let (_, content, _) = layout::split_frame(AREA);
        let catalog = &app.catalog;
        let grid = layout::grid_layout(content, catalog.heading(), catalog.intro(), 6, 0);
        let (index, rect) = grid.cards[2];

        let action = map_mouse(&app, AREA, click(rect.x + 2, rect.y + 2));
        assert_eq!(action, Some(Action::Select(index)));
    }

    #[test]
    fn clicking_grid_gap_does_nothing() {
        let (app, _tx, _rx) = harness();
        // Title bar row.
        assert_eq!(map_mouse(&app, AREA, click(5, 0)), None);
    }

    #[test]
    fn backdrop_click_closes() {
        let (mut app, _tx, _rx) = harness();
        app.screen = Screen::Detail(Modal::open(1));
        let panel = layout::modal_layout(AREA).panel;
        assert!(panel.x > 0);

        assert_eq!(map_mouse(&app, AREA, click(0, 10)), Some(Action::Close));
    }

    #[test]
    fn click_inside_panel_keeps_modal_open() {
        let (mut app, _tx, _rx) = harness();
        app.screen = Screen::Detail(Modal::open(1));
        let m = layout::modal_layout(AREA);

        assert_eq!(map_mouse(&app, AREA, click(m.body.x + 1, m.body.y + 1)), None);
        assert_eq!(map_mouse(&app, AREA, click(m.hero.x, m.hero.y + 1)), None);
        assert_eq!(
            map_mouse(&app, AREA, click(m.email.x + 2, m.email.y)),
            Some(Action::FocusOn(Focus::Field(Field::Email)))
        );
    }

    #[test]
    fn close_icon_and_button_clicks_close() {
        let (mut app, _tx, _rx) = harness();
        app.screen = Screen::Detail(Modal::open(1));
        let m = layout::modal_layout(AREA);

        assert_eq!(
            map_mouse(&app, AREA, click(m.close_icon.x + 1, m.close_icon.y)),
            Some(Action::Close)
        );
        assert_eq!(
            map_mouse(&app, AREA, click(m.close_button.x + 5, m.close_button.y)),
            Some(Action::Close)
        );
    }

    #[test]
    fn send_click_submits_only_while_editable() {
        let (mut app, _tx, _rx) = harness();
        let mut modal = Modal::open(1);
        let m = layout::modal_layout(AREA);
        let at_send = click(m.send.x + m.send.width / 2, m.send.y);

        app.screen = Screen::Detail(modal.clone());
        assert_eq!(map_mouse(&app, AREA, at_send), Some(Action::Submit));

        modal.form.mark_submitted(1);
        app.screen = Screen::Detail(modal);
        assert_eq!(map_mouse(&app, AREA, at_send), None);
    }

    // --- dispatch ----------------------------------------------------------

    #[test]
    fn activating_each_card_shows_its_own_detail() {
        let sink = RecordingSink::default();
        let catalog = Catalog::builtin();
        for (index, program) in catalog.programs().iter().enumerate() {
            let (mut app, tx, _rx) = harness();
            for _ in 0..index {
                act(&mut app, Action::MoveRight, &sink, &tx);
            }
            act(&mut app, Action::Activate, &sink, &tx);
            assert_eq!(app.selection(), Some(index));

            // Tall enough that the whole body fits without scrolling.
            let buffer = screen_buffer(&app, 100, 120);
            let text = buffer_text(&buffer);
            let detail = catalog.detail(&program.title).unwrap();
            assert!(text.contains(&detail.long_title));

            let description = rich_text::parse(&detail.long_description);
            assert!(!text.contains("**"));
            for word in description.emphasized() {
                assert!(shows_bold(&buffer, word), "{}: '{word}' not bold", program.title);
            }
            for area in &detail.focus_areas {
                assert!(text.contains(area.as_str()), "{}: missing {area}", program.title);
            }

            let own_text = description.plain_text();
            for other in catalog.programs().iter().filter(|p| p.title != program.title) {
                let other_detail = catalog.detail(&other.title).unwrap();
                assert!(!text.contains(&other_detail.long_title), "{}", other.title);
                for label in &other_detail.focus_areas {
                    if own_text.contains(label.as_str()) || detail.focus_areas.contains(label) {
                        continue;
                    }
                    assert!(
                        !text.contains(label.as_str()),
                        "{} shows {}'s focus area {label}",
                        program.title,
                        other.title
                    );
                }
            }
        }
    }

    #[test]
    fn poetry_inquiry_end_to_end() {
        let sink = RecordingSink::default();
        let (mut app, tx, rx) = harness();

        act(&mut app, Action::Select(1), &sink, &tx);
        let text = screen_text(&app);
        assert!(text.contains("Spoken Word, Creative Writing, and Performance"));

        fill_and_submit(&mut app, &sink, &tx);

        assert!(matches!(phase(&app), FormPhase::Submitted { .. }));
        assert!(screen_text(&app).contains(CONFIRMATION));
        assert_eq!(
            sink.received.lock().unwrap().as_slice(),
            &[Inquiry {
                program_title: "EVERYTHING POETRY".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                message: "When is the next workshop?".into(),
            }]
        );
        assert!(app.reset_timer.is_some());

        let event = wait_for_reset(&rx);
        assert!(matches!(event, AppEvent::ResetForm { ticket: 1 }));
        handle_background_event(&mut app, event);

        let modal = app.modal().unwrap();
        assert_eq!(modal.form.phase(), &FormPhase::Idle);
        assert!(modal.form.is_blank());
        assert_eq!(modal.focus, Focus::Field(Field::Name));
        assert!(app.reset_timer.is_none());
        assert!(!screen_text(&app).contains(CONFIRMATION));
    }

    #[test]
    fn closing_before_delay_cancels_reset() {
        let sink = RecordingSink::default();
        let (mut app, tx, rx) = harness();

        act(&mut app, Action::Select(2), &sink, &tx);
        fill_and_submit(&mut app, &sink, &tx);
        assert!(app.reset_timer.is_some());

        act(&mut app, Action::Close, &sink, &tx);
        assert_eq!(app.selection(), None);
        assert!(app.reset_timer.is_none());
        assert!(rx.recv_timeout(Duration::from_millis(400)).is_err());
    }

    #[test]
    fn switching_programs_cancels_reset_and_clears_form() {
        let sink = RecordingSink::default();
        let (mut app, tx, rx) = harness();

        act(&mut app, Action::Select(0), &sink, &tx);
        fill_and_submit(&mut app, &sink, &tx);
        act(&mut app, Action::Select(4), &sink, &tx);

        assert_eq!(app.selection(), Some(4));
        assert_eq!(phase(&app), FormPhase::Idle);
        assert!(app.modal().unwrap().form.is_blank());
        assert!(app.reset_timer.is_none());
        assert!(rx.recv_timeout(Duration::from_millis(400)).is_err());
    }

    #[test]
    fn selecting_another_program_updates_modal() {
        let sink = RecordingSink::default();
        let (mut app, tx, _rx) = harness();

        act(&mut app, Action::Select(0), &sink, &tx);
        act(&mut app, Action::Select(5), &sink, &tx);
        let text = screen_text(&app);
        assert!(text.contains("Civic Literacy and Community Advocacy"));
        assert!(!text.contains("Academic Excellence and Future Readiness"));
    }

    #[test]
    fn stale_reset_is_ignored() {
        let sink = RecordingSink::default();
        let (mut app, tx, _rx) = harness();

        act(&mut app, Action::Select(1), &sink, &tx);
        fill_and_submit(&mut app, &sink, &tx);
        handle_background_event(&mut app, AppEvent::ResetForm { ticket: 99 });

        assert_eq!(phase(&app), FormPhase::Submitted { ticket: 1 });
        assert!(app.reset_timer.is_some());
    }

    #[test]
    fn reader_reports_closed_input_after_last_event() {
        let (tx, rx) = mpsc::channel();
        let mut pending = vec![
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "tty gone")),
            Ok(Event::FocusGained),
            Ok(Event::Key(key(KeyCode::Char('j')))),
        ];

        forward_events(|| pending.pop().unwrap(), &tx);

        assert!(matches!(rx.try_recv(), Ok(AppEvent::Key(k)) if k.code == KeyCode::Char('j')));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::InputClosed)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn reader_stops_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut reads = 0;

        forward_events(
            || {
                reads += 1;
                Ok(Event::Resize(80, 24))
            },
            &tx,
        );
        assert_eq!(reads, 1);
    }

    #[test]
    fn closed_input_quits_even_with_pending_reset() {
        let sink = RecordingSink::default();
        let (mut app, tx, _rx) = harness();

        act(&mut app, Action::Select(1), &sink, &tx);
        fill_and_submit(&mut app, &sink, &tx);
        assert!(app.reset_timer.is_some());

        handle_background_event(&mut app, AppEvent::InputClosed);
        assert!(app.should_quit);
    }

    #[test]
    fn failing_sink_leaves_form_failed_and_intact() {
        let sink = FailingSink(DeliveryError::Unavailable("offline".into()));
        let (mut app, tx, rx) = harness();

        act(&mut app, Action::Select(3), &sink, &tx);
        fill_and_submit(&mut app, &sink, &tx);

        let modal = app.modal().unwrap();
        assert_eq!(
            modal.form.phase(),
            &FormPhase::Failed {
                reason: "delivery unavailable: offline".into()
            }
        );
        assert_eq!(modal.form.value(Field::Name), "Ada");
        assert_eq!(modal.form.value(Field::Message), "When is the next workshop?");
        assert!(app.reset_timer.is_none());
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn empty_field_blocks_delivery() {
        let sink = RecordingSink::default();
        let (mut app, tx, _rx) = harness();

        act(&mut app, Action::Select(0), &sink, &tx);
        type_text(&mut app, "Ada", &sink, &tx);
        act(&mut app, Action::Submit, &sink, &tx);

        assert!(sink.received.lock().unwrap().is_empty());
        assert_eq!(app.modal().unwrap().focus, Focus::Field(Field::Email));
        assert!(app.reset_timer.is_none());
    }

    #[test]
    fn quit_releases_timer() {
        let sink = RecordingSink::default();
        let (mut app, tx, _rx) = harness();

        act(&mut app, Action::Select(1), &sink, &tx);
        fill_and_submit(&mut app, &sink, &tx);
        act(&mut app, Action::Quit, &sink, &tx);

        assert!(app.should_quit);
        assert!(app.reset_timer.is_none());
    }

    #[test]
    fn missing_detail_selection_does_not_panic() {
        let catalog = Catalog::from_parts(
            "Heading",
            "Intro",
            vec![ProgramSummary {
                title: "EVERYTHING COOKING".into(),
                short_description: "Food.".into(),
                icon_path: "/assets/images/cooking.png".into(),
            }],
            vec![],
        )
        .unwrap();
        let mut app = App::new(catalog, Vec::new());
        let (tx, _rx) = mpsc::channel();
        let sink = RecordingSink::default();

        act(&mut app, Action::Activate, &sink, &tx);
        assert_eq!(app.selection(), Some(0));
        assert!(screen_text(&app).contains("not available yet"));
    }

    // --- viewport ----------------------------------------------------------

    #[test]
    fn sync_viewport_sets_columns_and_clamps_scroll() {
        let (mut app, _tx, _rx) = harness();
        sync_viewport(&mut app, Rect::new(0, 0, 50, 30));
        assert_eq!(app.columns, 1);

        let mut modal = Modal::open(0);
        modal.scroll = u16::MAX;
        app.screen = Screen::Detail(modal);
        let area = Rect::new(0, 0, 100, 24);
        sync_viewport(&mut app, area);

        assert_eq!(app.columns, 3);
        assert_eq!(app.modal().unwrap().scroll, body_scroll_limit(&app, area));
    }

    // --- startup -----------------------------------------------------------

    #[test]
    fn icons_unchecked_without_assets_dir() {
        let icons = resolve_icons(&Catalog::builtin(), None);
        assert_eq!(icons.len(), 6);
        assert!(icons.iter().all(|s| *s == IconStatus::Unchecked));
    }

    #[test]
    fn icons_checked_against_assets_dir() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("assets/images");
        std::fs::create_dir_all(&images).unwrap();
        std::fs::write(images.join("poetry.png"), b"png").unwrap();

        let icons = resolve_icons(&Catalog::builtin(), Some(dir.path()));
        assert!(!icons[1].is_missing());
        assert_eq!(icons.iter().filter(|s| s.is_missing()).count(), 5);
    }
}
