//! Screen geometry shared by rendering and mouse hit-testing.
//!
//! Pure functions: (area, state) → rectangles. The view draws into these
//! rectangles and the effects layer maps clicks against the same ones, so
//! what you see is what you click.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Paragraph, Wrap};

/// Height of one program card, borders included.
pub const CARD_HEIGHT: u16 = 8;

/// Widest the modal panel gets.
pub const MODAL_MAX_WIDTH: u16 = 72;

/// Rows in the hero header inside the panel.
const HERO_HEIGHT: u16 = 3;

/// Rows in the form block: border, name, email, 3 message rows, status,
/// send button, border.
const FORM_HEIGHT: u16 = 9;

/// Rows used by the message input.
pub const MESSAGE_ROWS: u16 = 3;

// ============================================================================
// FRAME
// ============================================================================

/// Split the frame into title bar, content, and help line.
pub fn split_frame(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);
    (chunks[0], chunks[1], chunks[2])
}

// ============================================================================
// TEXT MEASUREMENT
// ============================================================================

/// Rows `text` occupies when word-wrapped to `width` columns, measured the
/// way the heading paragraph renders it.
pub fn wrapped_line_count(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let rows = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .line_count(width);
    u16::try_from(rows).unwrap_or(u16::MAX)
}

// ============================================================================
// GRID
// ============================================================================

/// Number of card columns for a terminal width.
pub fn grid_columns(width: u16) -> usize {
    match width {
        0..60 => 1,
        60..100 => 2,
        _ => 3,
    }
}

/// Placement of the section heading and the visible cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    /// Heading (and intro, when it fits).
    pub heading: Rect,
    /// Whether the intro paragraph fits under the heading.
    pub show_intro: bool,
    /// Visible cards as (program index, rectangle).
    pub cards: Vec<(usize, Rect)>,
}

/// Lay out the heading and cards, scrolling rows so `cursor` is visible.
pub fn grid_layout(
    content: Rect,
    heading: &str,
    intro: &str,
    count: usize,
    cursor: usize,
) -> GridLayout {
    let columns = grid_columns(content.width);
    let heading_rows = wrapped_line_count(heading, content.width);
    let intro_rows = wrapped_line_count(intro, content.width);

    let full = heading_rows + 1 + intro_rows + 1;
    let (heading_height, show_intro) = if content.height >= full + CARD_HEIGHT {
        (full, true)
    } else {
        ((heading_rows + 1).min(content.height), false)
    };

    let heading_area = Rect {
        height: heading_height,
        ..content
    };

    let grid_top = content.y + heading_height;
    let grid_height = content.height - heading_height;
    let rows_fit = usize::from((grid_height / CARD_HEIGHT).max(1));

    let cursor_row = cursor / columns;
    let first_row = (cursor_row + 1).saturating_sub(rows_fit);

    let card_width = content.width / columns as u16;
    let bottom = content.y + content.height;

    let mut cards = Vec::new();
    let first = first_row * columns;
    let last = ((first_row + rows_fit) * columns).min(count);
    for index in first..last {
        let row = (index / columns - first_row) as u16;
        let col = (index % columns) as u16;
        let y = grid_top + row * CARD_HEIGHT;
        if y >= bottom {
            break;
        }
        cards.push((
            index,
            Rect {
                x: content.x + col * card_width,
                y,
                width: card_width,
                height: CARD_HEIGHT.min(bottom - y),
            },
        ));
    }

    GridLayout {
        heading: heading_area,
        show_intro,
        cards,
    }
}

// ============================================================================
// MODAL
// ============================================================================

/// Regions of the detail modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalLayout {
    /// Outer panel (bordered). Everything outside is backdrop.
    pub panel: Rect,
    /// Hero header: program name and long title.
    pub hero: Rect,
    /// The "[x]" close icon in the hero's top-right corner.
    pub close_icon: Rect,
    /// Scrollable description and focus areas.
    pub body: Rect,
    /// Contact form block (bordered).
    pub form: Rect,
    pub name: Rect,
    pub email: Rect,
    pub message: Rect,
    /// Validation hint / delivery error row.
    pub status: Rect,
    pub send: Rect,
    /// Full-width "Close Details" button.
    pub close_button: Rect,
}

/// Center the modal panel in `area` and carve out its regions.
pub fn modal_layout(area: Rect) -> ModalLayout {
    let width = area.width.saturating_sub(4).min(MODAL_MAX_WIDTH);
    let height = area.height.saturating_sub(2);
    let panel = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let inner = Rect {
        x: panel.x + 1,
        y: panel.y + 1,
        width: panel.width.saturating_sub(2),
        height: panel.height.saturating_sub(2),
    };

    let [hero, body, form, close_button] = Layout::vertical([
        Constraint::Length(HERO_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FORM_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(inner);

    let close_icon = Rect {
        x: hero.x + hero.width.saturating_sub(3),
        y: hero.y,
        width: hero.width.min(3),
        height: hero.height.min(1),
    };

    let form_inner = Rect {
        x: form.x + 1,
        y: form.y + 1,
        width: form.width.saturating_sub(2),
        height: form.height.saturating_sub(2),
    };
    let [name, email, message, status, send] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(MESSAGE_ROWS),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(form_inner);

    ModalLayout {
        panel,
        hero,
        close_icon,
        body,
        form,
        name,
        email,
        message,
        status,
        send,
        close_button,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Position;

    const HEADING: &str = "WANT TO KNOW MORE?";
    const INTRO: &str = "A short intro paragraph.";

    #[test]
    fn columns_follow_width_breakpoints() {
        assert_eq!(grid_columns(40), 1);
        assert_eq!(grid_columns(59), 1);
        assert_eq!(grid_columns(60), 2);
        assert_eq!(grid_columns(99), 2);
        assert_eq!(grid_columns(100), 3);
        assert_eq!(grid_columns(200), 3);
    }

    #[test]
    fn wrapped_count_breaks_on_words() {
        assert_eq!(wrapped_line_count("hello world", 11), 1);
        assert_eq!(wrapped_line_count("hello world", 10), 2);
        assert_eq!(wrapped_line_count("a\nb", 10), 2);
        assert_eq!(wrapped_line_count("abcdefghijkl", 5), 3);
        assert_eq!(wrapped_line_count("anything", 0), 0);
    }

    #[test]
    fn all_six_cards_fit_on_large_screen() {
        let content = Rect::new(0, 1, 120, 40);
        let grid = grid_layout(content, HEADING, INTRO, 6, 0);
        assert!(grid.show_intro);
        assert_eq!(grid.cards.len(), 6);
        // Three per row.
        assert_eq!(grid.cards[0].1.y, grid.cards[2].1.y);
        assert!(grid.cards[3].1.y > grid.cards[0].1.y);
    }

    #[test]
    fn cards_do_not_overlap() {
        let content = Rect::new(0, 1, 120, 40);
        let grid = grid_layout(content, HEADING, INTRO, 6, 0);
        for (i, (_, a)) in grid.cards.iter().enumerate() {
            for (_, b) in grid.cards.iter().skip(i + 1) {
                assert!(!a.intersects(*b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn grid_scrolls_to_keep_cursor_visible() {
        let content = Rect::new(0, 1, 50, 20);
        let grid = grid_layout(content, HEADING, INTRO, 6, 5);
        assert!(grid.cards.iter().any(|(i, _)| *i == 5));
        assert!(!grid.cards.iter().any(|(i, _)| *i == 0));
    }

    #[test]
    fn intro_is_dropped_when_space_is_tight() {
        let content = Rect::new(0, 1, 120, 10);
        let grid = grid_layout(content, HEADING, INTRO, 6, 0);
        assert!(!grid.show_intro);
        assert!(!grid.cards.is_empty());
    }

    #[test]
    fn cards_stay_inside_content() {
        let content = Rect::new(0, 1, 80, 21);
        for cursor in 0..6 {
            let grid = grid_layout(content, HEADING, INTRO, 6, cursor);
            for (_, rect) in &grid.cards {
                assert!(content.contains(Position::new(rect.x, rect.y)));
                assert!(rect.bottom() <= content.bottom());
            }
        }
    }

    #[test]
    fn modal_is_centered_and_capped() {
        let area = Rect::new(0, 0, 200, 50);
        let modal = modal_layout(area);
        assert_eq!(modal.panel.width, MODAL_MAX_WIDTH);
        assert_eq!(modal.panel.x, (200 - MODAL_MAX_WIDTH) / 2);
    }

    #[test]
    fn modal_regions_nest_inside_panel() {
        let modal = modal_layout(Rect::new(0, 0, 100, 40));
        for region in [
            modal.hero,
            modal.close_icon,
            modal.body,
            modal.form,
            modal.name,
            modal.email,
            modal.message,
            modal.send,
            modal.close_button,
        ] {
            assert!(modal.panel.contains(Position::new(region.x, region.y)), "{region:?}");
        }
        assert_eq!(modal.message.height, MESSAGE_ROWS);
        assert_eq!(modal.close_icon.width, 3);
    }

    #[test]
    fn modal_fields_stack_in_tab_order() {
        let modal = modal_layout(Rect::new(0, 0, 100, 40));
        assert!(modal.name.y < modal.email.y);
        assert!(modal.email.y < modal.message.y);
        assert!(modal.message.y < modal.send.y);
        assert!(modal.send.y < modal.close_button.y);
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let modal = modal_layout(Rect::new(0, 0, 3, 2));
        assert!(modal.panel.width <= 3);
        let grid = grid_layout(Rect::new(0, 0, 3, 2), HEADING, INTRO, 6, 0);
        assert!(grid.cards.len() <= 6);
    }
}
