use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block as Panel, Borders, Paragraph, Wrap},
};
use folio_core::format::{Block, Inline, ListKind};
use folio_core::ai::groq::MODEL;
use crate::app::{App, FocusPane, ViewEntry};

const GREETING: &str = "Hi! I'm Hari's AI assistant. Ask me anything about Hari's experience, skills, or projects.";

fn inline_spans(inlines: &[Inline], style: Style, spans: &mut Vec<Span<'static>>) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => spans.push(Span::styled(text.clone(), style)),
            Inline::Strong(children) => {
                inline_spans(children, style.add_modifier(Modifier::BOLD), spans)
            }
            Inline::Emphasis(children) => {
                inline_spans(children, style.add_modifier(Modifier::ITALIC), spans)
            }
            Inline::Code(code) => spans.push(Span::styled(code.clone(), style.fg(Color::Green))),
            Inline::Link(url) => spans.push(Span::styled(
                url.clone(),
                style.fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            )),
        }
    }
}

/// Turn formatted reply blocks into styled terminal lines.
pub fn block_lines(blocks: &[Block]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for block in blocks {
        match block {
            Block::Line(inlines) => {
                let mut spans = Vec::new();
                inline_spans(inlines, Style::default(), &mut spans);
                lines.push(Line::from(spans));
            }
            Block::List { kind, items } => {
                for (i, item) in items.iter().enumerate() {
                    let marker = match kind {
                        ListKind::Unordered => "  • ".to_string(),
                        ListKind::Ordered => format!("  {}. ", i + 1),
                    };
                    let mut spans = vec![Span::styled(marker, Style::default().fg(Color::DarkGray))];
                    inline_spans(item, Style::default(), &mut spans);
                    lines.push(Line::from(spans));
                }
            }
        }
    }

    lines
}

/// Rows the lines occupy once wrapped to `width` columns.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    rows.min(u16::MAX as usize) as u16
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);

    if app.panel_open {
        render_chat_panel(app, frame, body_area);
    } else {
        app.chat_area = None;
        render_launcher(frame, body_area);
    }

    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Hari · AI Developer ", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
        Span::styled(
            format!("{} v{}", MODEL, env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = if !app.panel_open {
        " Enter: open chat  q: quit "
    } else if !app.view.controls_enabled {
        " Waiting for reply...  PgUp/PgDn: scroll  Esc: close  Ctrl-C: quit "
    } else {
        match app.focus {
            FocusPane::Input => " Enter: send  Tab: suggestions  PgUp/PgDn: scroll  Esc: close ",
            FocusPane::Suggestions => " ←/→: choose  Enter: ask  Tab: input  Esc: close ",
        }
    };

    let footer = Paragraph::new(Span::styled(hints, Style::default().fg(Color::White)))
        .style(Style::default().bg(Color::Blue));
    frame.render_widget(footer, area);
}

fn render_launcher(frame: &mut Frame, area: Rect) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    let launcher = Paragraph::new(Line::from(vec![
        Span::styled("💬 ", Style::default()),
        Span::styled("Chat with Hari's assistant", Style::default().fg(Color::Cyan).bold()),
        Span::styled("  (press Enter)", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center)
    .block(Panel::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(launcher, middle);
}

fn chat_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    if app.view.entries.is_empty() && !app.view.typing {
        lines.push(Line::from(Span::styled(
            GREETING,
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    for entry in &app.view.entries {
        match entry {
            ViewEntry::User(text) => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
                for line in text.lines() {
                    lines.push(Line::from(line.to_string()));
                }
            }
            ViewEntry::Assistant(blocks) => {
                lines.push(Line::from(Span::styled(
                    "AI:",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                lines.extend(block_lines(blocks));
            }
        }
        lines.push(Line::default());
    }

    if app.view.typing {
        lines.push(Line::from(Span::styled(
            "AI:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Typing{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

fn render_chat_panel(app: &mut App, frame: &mut Frame, area: Rect) {
    let [chat_area, suggestions_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(area);

    app.chat_area = Some(chat_area);
    app.view.chat_height = chat_area.height.saturating_sub(2);
    app.view.chat_width = chat_area.width.saturating_sub(2);

    let lines = chat_lines(app);

    // Keep the newest message in view unless the user scrolled away
    let max_scroll = wrapped_height(&lines, app.view.chat_width).saturating_sub(app.view.chat_height);
    if app.view.follow_bottom || app.view.scroll >= max_scroll {
        app.view.scroll = max_scroll;
        app.view.follow_bottom = true;
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(
            Panel::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Ask about Hari "),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.view.scroll, 0));
    frame.render_widget(chat, chat_area);

    render_suggestions(app, frame, suggestions_area);
    render_input(app, frame, input_area);
}

fn render_suggestions(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Suggestions;
    let enabled = app.view.controls_enabled;

    let mut spans = Vec::new();
    for (i, label) in app.suggestions.iter().enumerate() {
        let style = if !enabled {
            Style::default().fg(Color::DarkGray)
        } else if focused && i == app.selected_suggestion {
            Style::default().bg(Color::Magenta).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Magenta)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }

    let border_color = if focused { Color::Magenta } else { Color::DarkGray };
    let suggestions = Paragraph::new(Line::from(spans)).block(
        Panel::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Suggestions "),
    );
    frame.render_widget(suggestions, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.focus == FocusPane::Input && app.view.controls_enabled;
    let border_color = if editing { Color::Yellow } else { Color::DarkGray };
    let title = if app.view.controls_enabled {
        " Message "
    } else {
        " Message (waiting for reply) "
    };

    // Calculate visible portion of input with horizontal scrolling
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.view.cursor;

    // Calculate scroll offset to keep cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = app.view.input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(if app.view.controls_enabled { Color::Cyan } else { Color::DarkGray }))
        .block(
            Panel::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );
    frame.render_widget(input, area);

    // Show cursor when editing
    if editing && app.view.input_focused {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}
