use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use shorebook_core::booking::{Picker, SubmissionState};
use shorebook_core::format::{format_currency, format_date, format_date_or};

use crate::app::{App, AppState, FormField};

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(12),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    if let Some(picker) = app.form.open_picker_kind() {
        render_picker_overlay(frame, app, picker);
    }

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }

    render_toasts(frame, app);
}

const TITLE: &str = "  Shorebook - Book Your Room";
const HELP_HINT: &str = "[?] Help";

/// Spaces between the title and the right-aligned help hint, leaving a
/// 4-column right margin. Counts chars, not bytes.
fn title_padding(width: u16) -> usize {
    (width as usize).saturating_sub(TITLE.chars().count() + HELP_HINT.chars().count() + 4)
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title_line = Line::from(vec![
        Span::styled(TITLE, styles::title_style()),
        Span::raw(" ".repeat(title_padding(area.width))),
        Span::styled(HELP_HINT, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_form(frame, app, chunks[0]);
    render_summary(frame, app, chunks[1]);
}

fn field_line<'a>(app: &App, field: FormField, value: String) -> Line<'a> {
    let focused = app.focus == field;
    let marker = if focused { "> " } else { "  " };
    let label = format!("{:<18}", field.label());
    let value_span = if value.is_empty() {
        Span::styled(format!("{}...", field.label()), styles::muted_style())
    } else {
        Span::raw(value)
    };

    let mut line = Line::from(vec![
        Span::styled(marker.to_string(), styles::highlight_style()),
        Span::styled(label, styles::muted_style()),
        value_span,
    ]);
    if focused {
        line = line.style(styles::selected_style());
    }
    line
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let draft = app.form.draft();
    let processing = app.form.is_processing();

    let button_label = if processing {
        "[ Processing... ]"
    } else {
        "[ Book Now ]"
    };
    let button_focused = app.focus == FormField::BookButton;

    let lines = vec![
        Line::from(""),
        field_line(
            app,
            FormField::CheckIn,
            format_date_or(draft.check_in, ""),
        ),
        Line::from(""),
        field_line(
            app,
            FormField::CheckOut,
            format_date_or(draft.check_out, ""),
        ),
        Line::from(""),
        field_line(app, FormField::Guests, draft.guests.text()),
        Line::from(""),
        field_line(app, FormField::Rooms, draft.rooms.text()),
        Line::from(""),
        field_line(
            app,
            FormField::RoomType,
            draft.selected_room.clone().unwrap_or_default(),
        ),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(button_label, styles::button_style(button_focused, processing)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Booking ")
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let draft = app.form.draft();
    let mut lines = vec![Line::from("")];

    match draft
        .selected_room
        .as_deref()
        .and_then(|name| app.catalog.find(name))
    {
        Some(room) => {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(room.name.clone(), styles::title_style()),
            ]));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(room.image_url.clone(), styles::muted_style()),
            ]));
            lines.push(Line::from(""));

            let nights = draft.nights().filter(|&n| n > 0).unwrap_or(1);
            let rooms = draft.rooms.get().unwrap_or(1).max(1);
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!(
                        "{} x {} night{} x {} room{}",
                        format_currency(room.nightly_price),
                        nights,
                        if nights == 1 { "" } else { "s" },
                        rooms,
                        if rooms == 1 { "" } else { "s" },
                    ),
                    styles::muted_style(),
                ),
            ]));
            lines.push(Line::from(""));

            if let Some(total) = app.form.total_price(&app.catalog) {
                lines.push(Line::from(vec![
                    Span::raw("  Total  "),
                    Span::styled(format_currency(total), styles::price_style()),
                ]));
            }
        }
        None => {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("Select a room to see pricing", styles::muted_style()),
            ]));
        }
    }

    if let (Some(check_in), Some(check_out)) = (draft.check_in, draft.check_out) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{} -> {}", format_date(check_in), format_date(check_out)),
                styles::muted_style(),
            ),
        ]));
    }

    match app.form.submission() {
        SubmissionState::Processing => {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("Processing your booking...", styles::highlight_style()),
            ]));
        }
        SubmissionState::Failed => {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    "Booking failed - press Enter on Book Now to retry",
                    styles::toast_style(shorebook_core::ToastKind::Error),
                ),
            ]));
        }
        _ => {}
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Summary ")
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if app.form.is_processing() {
        " Processing... [Esc] cancel ".to_string()
    } else {
        " Tab/arrows move | Enter opens picker / books ".to_string()
    };
    let right_text = " [?] Help | [q]uit ";

    let padding = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

// ============================================================================
// Overlays
// ============================================================================

fn render_picker_overlay(frame: &mut Frame, app: &App, picker: Picker) {
    match picker {
        Picker::CheckIn | Picker::CheckOut => render_date_picker(frame, app, picker),
        Picker::Guests | Picker::Rooms => render_number_picker(frame, app, picker),
        Picker::RoomType => render_room_picker(frame, app),
    }
}

fn render_date_picker(frame: &mut Frame, app: &App, picker: Picker) {
    let area = centered_rect_fixed(40, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format_date(app.picker_date), styles::highlight_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("</> day  ^/v week  Enter select", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", picker.title()))
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_number_picker(frame: &mut Frame, app: &App, picker: Picker) {
    let area = centered_rect_fixed(40, 7, frame.area());
    frame.render_widget(Clear, area);

    let max = app.picker_number_max();
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{}  (1-{})", app.picker_number, max),
                styles::highlight_style(),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("</> adjust  0-9 jump  Enter select", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", picker.title()))
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_room_picker(frame: &mut Frame, app: &App) {
    let height = (app.catalog.room_count() + app.catalog.groups().len() * 2 + 2).min(20) as u16;
    let area = centered_rect_fixed(48, height, frame.area());
    frame.render_widget(Clear, area);

    // Flat item list with class headers; headers are not selectable, so
    // track the list index of each room to map the cursor.
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_index = 0;
    let mut room_index = 0;
    for group in app.catalog.groups() {
        items.push(ListItem::new(Line::from(Span::styled(
            format!(" {} ", group.class),
            styles::title_style(),
        ))));
        for room in &group.rooms {
            if room_index == app.picker_room {
                selected_index = items.len();
            }
            items.push(ListItem::new(Line::from(vec![
                Span::raw(format!("   {:<22}", room.name)),
                Span::styled(
                    format!("{}/night", format_currency(room.nightly_price)),
                    styles::price_style(),
                ),
            ])));
            room_index += 1;
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Select a room ")
        .border_style(styles::border_style(true));

    let list = List::new(items)
        .block(block)
        .highlight_style(styles::selected_style());

    let mut state = ListState::default();
    state.select(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(48, 16, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Shorebook", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        help_line("  Tab/↓     ", "Next field"),
        help_line("  S-Tab/↑   ", "Previous field"),
        help_line("  Enter     ", "Open picker / book"),
        help_line("  0-9       ", "Type guests or rooms directly"),
        help_line("  Esc       ", "Close picker / cancel booking"),
        Line::from(""),
        help_line("  ?         ", "This help"),
        help_line("  q         ", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Esc to close",
            styles::muted_style(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn help_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(key.to_string(), styles::help_key_style()),
        Span::styled(desc.to_string(), styles::help_desc_style()),
    ])
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(36, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Quit shorebook? "),
            Span::styled("[y]es", styles::help_key_style()),
            Span::raw(" / "),
            Span::styled("[n]o", styles::help_key_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confirm ")
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_toasts(frame: &mut Frame, app: &App) {
    if app.toasts.is_empty() {
        return;
    }

    let frame_area = frame.area();
    let width = 44u16.min(frame_area.width.saturating_sub(2));
    let mut y = 1u16;

    for toast in app.toasts.iter() {
        if y + 3 > frame_area.height {
            break;
        }
        let x = frame_area.width.saturating_sub(width + 1);
        let area = Rect::new(x, y, width, 3);
        frame.render_widget(Clear, area);

        let line = Line::from(Span::styled(
            shorebook_core::format::truncate_string(&toast.message, (width as usize).saturating_sub(4)),
            styles::toast_style(toast.kind),
        ));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::toast_style(toast.kind));

        frame.render_widget(Paragraph::new(line).block(block), area);
        y += 3;
    }
}

/// Fixed-size centered rectangle, clamped to the frame.
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_bar_fills_width_with_right_margin() {
        let width = 80u16;
        let occupied = TITLE.chars().count() + title_padding(width) + HELP_HINT.chars().count();
        assert_eq!(occupied, width as usize - 4);
    }

    #[test]
    fn title_padding_never_underflows() {
        assert_eq!(title_padding(10), 0);
    }
}
