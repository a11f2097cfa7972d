//! Pure rendering: map App state to ratatui widget trees.
//!
//! The grid is always drawn; when a program is selected the modal is
//! drawn over a dimmed backdrop. Geometry comes from [`super::layout`] so
//! mouse hit-testing agrees with what is on screen. Widget-building
//! functions are pure (state in, widgets out); the only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::assets::{icon_file_name, IconStatus, FALLBACK_GLYPH};
use crate::form::{Field, FormPhase, CONFIRMATION, REQUIRED_HINT};
use crate::rich_text::{self, RichText};
use crate::types::{ProgramDetail, ProgramSummary};

use super::layout::{self, ModalLayout, MESSAGE_ROWS};
use super::state::{App, Focus, InputMode, Modal, Screen};
use super::theme;

/// Name shown in the title bar.
const APP_TITLE: &str = "Global Flame Youth Community";

/// Call to action at the bottom of every card.
const CARD_HINT: &str = "Click for Detailed Explanation →";

/// Width of the label column in the form.
const LABEL_WIDTH: usize = 9;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let (title_area, content, help_area) = layout::split_frame(area);

    frame.render_widget(render_title(app), title_area);
    frame.render_widget(render_help(app.input_mode()), help_area);

    let cursor = match &app.screen {
        Screen::Grid { cursor } => *cursor,
        Screen::Detail(modal) => modal.program,
    };
    render_grid(app, cursor, frame, content);

    if let Screen::Detail(modal) = &app.screen {
        render_modal(app, modal, frame, area);
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar: organisation name, plus the selected program.
fn render_title(app: &App) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(APP_TITLE, theme::STYLE_TITLE)];
    if let Some(program) = app.selection().and_then(|i| app.catalog.program(i)) {
        spans.push(Span::styled(" › ", theme::STYLE_DIM));
        spans.push(Span::styled(program.title.clone(), theme::STYLE_IMPORTANT));
    }
    Paragraph::new(Line::from(spans))
}

/// Help line showing available keybindings for the current input mode.
fn render_help(mode: InputMode) -> Paragraph<'static> {
    let help_text = match mode {
        InputMode::Grid => "[←↑↓→/hjkl] move  [Enter/Space] details  [1-6] jump  [q] quit",
        InputMode::Typing(field) if field.is_multiline() => {
            "[Tab] next  [Enter] new line  [^S] send  [PgUp/PgDn] scroll  [Esc] close"
        }
        InputMode::Typing(_) => "[Tab] next  [Enter/^S] send  [PgUp/PgDn] scroll  [Esc] close",
        InputMode::Buttons => {
            "[Tab] focus  [Enter/Space] press  [[/]] prev/next  [j/k] scroll  [Esc] close"
        }
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// GRID
// ============================================================================

fn render_grid(app: &App, cursor: usize, frame: &mut Frame, area: Rect) {
    let catalog = &app.catalog;
    let grid = layout::grid_layout(area, catalog.heading(), catalog.intro(), catalog.len(), cursor);

    let mut heading = vec![Line::styled(catalog.heading().to_string(), theme::STYLE_TITLE)];
    if grid.show_intro {
        heading.push(Line::from(""));
        heading.push(Line::from(catalog.intro().to_string()));
    }
    frame.render_widget(
        Paragraph::new(heading)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        grid.heading,
    );

    let focused_card = app.modal().is_none().then_some(cursor);
    for (index, rect) in &grid.cards {
        if let Some(program) = catalog.program(*index) {
            render_card(
                program,
                app.icon(*index),
                focused_card == Some(*index),
                frame,
                *rect,
            );
        }
    }
}

fn render_card(
    program: &ProgramSummary,
    icon: &IconStatus,
    focused: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let border = if focused {
        theme::STYLE_FOCUS
    } else {
        theme::STYLE_BLUR
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [icon_row, title_row, blurb_area, hint_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(icon_line(program, icon)).alignment(Alignment::Center),
        icon_row,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(program.title.clone(), theme::STYLE_CARD_TITLE))
            .alignment(Alignment::Center),
        title_row,
    );
    frame.render_widget(
        Paragraph::new(program.short_description.clone())
            .style(theme::STYLE_DIM)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        blurb_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(CARD_HINT, theme::STYLE_INTERACTIVE))
            .alignment(Alignment::Center),
        hint_row,
    );
}

/// Icon row: file name, or the fallback glyph when the file is missing.
fn icon_line(program: &ProgramSummary, icon: &IconStatus) -> Line<'static> {
    match icon {
        IconStatus::Missing { .. } => Line::from(vec![
            Span::styled(FALLBACK_GLYPH, theme::STYLE_INTERACTIVE),
            Span::styled(" (image unavailable)", theme::STYLE_DIM),
        ]),
        IconStatus::Available { .. } | IconStatus::Unchecked => Line::from(vec![
            Span::styled("◉ ", theme::STYLE_INTERACTIVE),
            Span::styled(
                icon_file_name(&program.icon_path).to_string(),
                theme::STYLE_DIM,
            ),
        ]),
    }
}

// ============================================================================
// MODAL
// ============================================================================

fn render_modal(app: &App, modal: &Modal, frame: &mut Frame, area: Rect) {
    let Some(program) = app.catalog.program(modal.program) else {
        return;
    };
    let detail = app.catalog.detail(&program.title);
    let accent = detail
        .map(|d| theme::accent_or_brand(&d.accent_color))
        .unwrap_or(theme::BRAND);
    let m = layout::modal_layout(area);

    // Backdrop: everything behind the panel fades.
    frame.buffer_mut().set_style(area, theme::STYLE_BACKDROP);
    frame.render_widget(Clear, m.panel);
    frame.render_widget(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(accent)),
        m.panel,
    );

    render_hero(program, detail, modal.focus, accent, frame, &m);

    let body = detail_body_lines(&program.title, detail, accent);
    frame.render_widget(body_paragraph(body).scroll((modal.scroll, 0)), m.body);

    render_form(&program.title, modal, frame, &m);

    let close_style = button_style(modal.focus == Focus::CloseButton);
    frame.render_widget(
        Paragraph::new("Close Details")
            .style(close_style)
            .alignment(Alignment::Center),
        m.close_button,
    );
}

fn render_hero(
    program: &ProgramSummary,
    detail: Option<&ProgramDetail>,
    focus: Focus,
    accent: Color,
    frame: &mut Frame,
    m: &ModalLayout,
) {
    let subtitle = detail
        .map(|d| d.long_title.clone())
        .unwrap_or_else(|| "Program details".to_string());

    let lines = vec![
        Line::styled(
            program.title.clone(),
            Style::new().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Line::styled(subtitle, theme::STYLE_IMPORTANT),
        Line::styled("─".repeat(usize::from(m.hero.width)), theme::STYLE_DIM),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), m.hero);

    let icon_style = if focus == Focus::CloseIcon {
        theme::STYLE_BUTTON_FOCUS
    } else {
        theme::STYLE_INTERACTIVE
    };
    frame.render_widget(Paragraph::new(Span::styled("[x]", icon_style)), m.close_icon);
}

/// Description, focus-area checklist, or the fallback panel.
///
/// Also used to measure how far the body can scroll.
pub fn detail_body_lines(
    title: &str,
    detail: Option<&ProgramDetail>,
    accent: Color,
) -> Vec<Line<'static>> {
    let Some(detail) = detail else {
        return vec![
            Line::styled(
                format!("Details for {} are not available yet.", title),
                theme::STYLE_IMPORTANT,
            ),
            Line::from(""),
            Line::styled(
                "Use the form below to contact the team directly.",
                theme::STYLE_DIM,
            ),
        ];
    };

    let mut lines = rich_lines(&rich_text::parse(&detail.long_description), Style::new());
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("▌ ", Style::new().fg(accent)),
        Span::styled("Key Focus Areas", theme::STYLE_IMPORTANT),
    ]));
    lines.push(Line::from(""));
    for area in &detail.focus_areas {
        lines.push(Line::from(vec![
            Span::styled("  ✔ ", Style::new().fg(accent).add_modifier(Modifier::BOLD)),
            Span::raw(area.clone()),
        ]));
    }
    lines
}

/// Styled lines from rich text; emphasis is bold.
fn rich_lines(text: &RichText, base: Style) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    for segment in text.segments() {
        let style = if segment.is_emphasis() {
            base.add_modifier(Modifier::BOLD)
        } else {
            base
        };
        for (i, part) in segment.text().split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if !part.is_empty()
                && let Some(line) = lines.last_mut()
            {
                line.push_span(Span::styled(part.to_string(), style));
            }
        }
    }
    lines
}

/// The modal body widget. Rendering and scroll measurement share it so
/// both wrap identically.
fn body_paragraph(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

/// How far the modal body can scroll at this terminal size.
pub fn body_scroll_limit(app: &App, area: Rect) -> u16 {
    let Some(program) = app.selection().and_then(|i| app.catalog.program(i)) else {
        return 0;
    };
    let body = layout::modal_layout(area).body;
    if body.width == 0 {
        return 0;
    }
    let lines = detail_body_lines(&program.title, app.catalog.detail(&program.title), theme::BRAND);

    let rows = body_paragraph(lines).line_count(body.width);
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_sub(body.height)
}

// ============================================================================
// FORM
// ============================================================================

fn render_form(title: &str, modal: &Modal, frame: &mut Frame, m: &ModalLayout) {
    let block = Block::bordered()
        .border_style(theme::STYLE_BLUR)
        .title(Line::from(vec![
            Span::styled(" ✉ ", theme::STYLE_INTERACTIVE),
            Span::styled(format!("Contact Admin About {} ", title), theme::STYLE_IMPORTANT),
        ]));
    let inner = block.inner(m.form);
    frame.render_widget(block, m.form);

    let form = &modal.form;
    if let FormPhase::Submitted { .. } = form.phase() {
        let confirmation = vec![
            Line::from(""),
            Line::from(""),
            Line::from(vec![
                Span::styled("➤ ", theme::STYLE_SAFE),
                Span::styled(CONFIRMATION, theme::STYLE_SAFE.add_modifier(Modifier::BOLD)),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(confirmation).alignment(Alignment::Center),
            inner,
        );
        return;
    }

    for (field, rect) in [
        (Field::Name, m.name),
        (Field::Email, m.email),
        (Field::Message, m.message),
    ] {
        frame.render_widget(render_input(field, modal), rect);
    }

    let status = match (form.rejected(), form.phase()) {
        (Some(field), _) => Line::styled(
            format!("⚠ {}: {}", field.label(), REQUIRED_HINT),
            theme::STYLE_DANGER,
        ),
        (None, FormPhase::Failed { reason }) => Line::styled(
            format!("✖ Could not send: {}", reason),
            theme::STYLE_DANGER.add_modifier(Modifier::BOLD),
        ),
        _ => Line::from(""),
    };
    frame.render_widget(Paragraph::new(status), m.status);

    frame.render_widget(
        Paragraph::new("Send Inquiry")
            .style(button_style(modal.focus == Focus::Send))
            .alignment(Alignment::Center),
        m.send,
    );
}

/// One labelled input. The message shows its last few lines.
fn render_input(field: Field, modal: &Modal) -> Paragraph<'static> {
    let focused = modal.focus == Focus::Field(field);
    let value = modal.form.value(field);

    let label_style = if modal.form.rejected() == Some(field) {
        theme::STYLE_DANGER
    } else if focused {
        theme::STYLE_FOCUS
    } else {
        theme::STYLE_DIM
    };
    let label = format!("{:<width$}", field.label(), width = LABEL_WIDTH);
    let pad = " ".repeat(LABEL_WIDTH);

    let mut rows: Vec<&str> = value.split('\n').collect();
    if rows.len() > usize::from(MESSAGE_ROWS) {
        rows.drain(..rows.len() - usize::from(MESSAGE_ROWS));
    }
    let last = rows.len() - 1;

    let lines: Vec<Line<'static>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let prefix = if i == 0 {
                Span::styled(label.clone(), label_style)
            } else {
                Span::raw(pad.clone())
            };
            let content = if value.is_empty() {
                Span::styled(field.placeholder(), theme::STYLE_PLACEHOLDER)
            } else {
                Span::raw(row.to_string())
            };
            let mut spans = vec![prefix, content];
            if focused && i == last {
                spans.push(Span::styled("▏", theme::STYLE_FOCUS));
            }
            Line::from(spans)
        })
        .collect();

    Paragraph::new(lines)
}

fn button_style(focused: bool) -> Style {
    if focused {
        theme::STYLE_BUTTON_FOCUS
    } else {
        theme::STYLE_BUTTON
    }
}

// ============================================================================
// TESTS
// ============================================================================
