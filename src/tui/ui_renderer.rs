use super::app_logic::TuiApp;
use super::app_state::AppMode;
use crate::session::{EntryKind, Notice, ViewModel};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

const MAX_STATUS_LINES: usize = 3;

fn draw_header_block(f: &mut Frame, view: &ViewModel, area: Rect) {
    let ignored_marker = if view.hide_ignored { "[x]" } else { "[ ]" };
    let header_lines = vec![
        Line::from(vec![
            Span::styled("Current Dir: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(view.current_dir.clone()),
        ]),
        Line::from(format!(
            "{} Hide Ignored (i) | Selected: {} file(s) across all directories",
            ignored_marker, view.selected_count
        )),
        Line::from("Arrows/jk: Nav | Enter: Open/Sel | Space: Sel | Bksp: Up | g: Change Dir | /: Search"),
        Line::from("a: Sel All Displayed | d: Desel All Displayed | x: Clear | r: Refresh | y: Copy | q: Quit"),
    ];
    let header = Paragraph::new(header_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Code Selector & Copier"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(header, area);
}

fn draw_prompt_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let (prefix, title) = match app.mode {
        AppMode::Searching => ("/", "Search files (Enter to keep, Esc to clear)"),
        _ => ("", "Change directory (Enter to open, Esc to cancel)"),
    };
    let input_text = format!("{}{}", prefix, app.prompt.text);
    let prompt = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(prompt, area);
    let cursor_x = prompt_cursor_x(area, prefix.len() + app.prompt.cursor);
    f.set_cursor_position((cursor_x, area.y.saturating_add(1)));
}

/// Column for the prompt cursor, kept inside the block's borders.
fn prompt_cursor_x(area: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    let last_inner = area.x.saturating_add(area.width.saturating_sub(2));
    area.x
        .saturating_add(1)
        .saturating_add(offset)
        .min(last_inner)
}

fn draw_main_list_block(f: &mut Frame, app: &mut TuiApp, view: &ViewModel, area: Rect) {
    app.list_viewport_height = area.height.saturating_sub(2) as usize;
    app.ensure_selection_is_visible_in_viewport();

    let end = (app.scroll_offset + app.list_viewport_height).min(view.rows.len());
    let list_items: Vec<ListItem> = view
        .rows
        .get(app.scroll_offset..end)
        .unwrap_or(&[])
        .iter()
        .map(|row| {
            let line = match row.kind {
                EntryKind::Parent => Line::styled(row.label.clone(), Style::default().fg(Color::Blue)),
                EntryKind::Directory => {
                    Line::styled(row.label.clone(), Style::default().fg(Color::Green))
                }
                EntryKind::File => {
                    let checkbox = if row.checked == Some(true) { "[x] " } else { "[ ] " };
                    Line::from(format!("{}{}", checkbox, row.label))
                }
            };
            ListItem::new(line)
        })
        .collect();

    let list_title = if view.search.is_empty() {
        "Files".to_string()
    } else {
        format!("Files (Search: '{}')", view.search)
    };

    let list_widget = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state_for_view = ListState::default();
    if !view.rows.is_empty() && app.current_selection_idx >= app.scroll_offset {
        list_state_for_view.select(Some(app.current_selection_idx - app.scroll_offset));
    }
    f.render_stateful_widget(list_widget, area, &mut list_state_for_view);
}

fn draw_status_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let lines: Vec<Line> = app
        .status
        .notices
        .iter()
        .take(MAX_STATUS_LINES)
        .map(|notice| {
            let color = match notice {
                Notice::Info(_) => Color::Cyan,
                Notice::Warning(_) => Color::Yellow,
                Notice::Error(_) => Color::Red,
            };
            Line::styled(notice.message().to_string(), Style::default().fg(color))
        })
        .collect();
    let status = Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
    f.render_widget(status, area);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut TuiApp) {
    let view = app.session.view();
    let header_height = 4 + 2;
    let prompt_height = if app.mode == AppMode::Normal { 0 } else { 3 };
    let status_height = app.status.notices.len().min(MAX_STATUS_LINES) as u16 + 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(prompt_height),
            Constraint::Min(0),
            Constraint::Length(status_height),
        ])
        .split(frame.area());

    draw_header_block(frame, &view, chunks[0]);
    if app.mode != AppMode::Normal {
        draw_prompt_block(frame, app, chunks[1]);
    }
    draw_main_list_block(frame, app, &view, chunks[2]);
    draw_status_block(frame, app, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_cursor_follows_short_input() {
        let area = Rect::new(2, 5, 40, 3);
        assert_eq!(prompt_cursor_x(area, 0), 3);
        assert_eq!(prompt_cursor_x(area, 4), 7);
    }

    #[test]
    fn prompt_cursor_stays_inside_the_border() {
        let area = Rect::new(2, 5, 40, 3);
        assert_eq!(prompt_cursor_x(area, 500), 40);
        assert_eq!(prompt_cursor_x(area, usize::MAX), 40);

        let edge = Rect::new(u16::MAX - 10, 0, 10, 3);
        assert_eq!(prompt_cursor_x(edge, 1_000_000), u16::MAX - 2);
    }
}
