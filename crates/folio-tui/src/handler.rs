use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, FocusPane};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Paste(text) => insert_text(app, &text),
        AppEvent::Resize => {}
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_query_task().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if !app.panel_open {
        handle_launcher(app, key);
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.close_panel();
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                FocusPane::Input => FocusPane::Suggestions,
                FocusPane::Suggestions => FocusPane::Input,
            };
            app.view.input_focused = app.focus == FocusPane::Input;
            return;
        }
        KeyCode::PageUp => {
            app.view.scroll_up(app.view.chat_height.max(1) / 2);
            return;
        }
        KeyCode::PageDown => {
            app.view.scroll_down(app.view.chat_height.max(1) / 2);
            return;
        }
        _ => {}
    }

    match app.focus {
        FocusPane::Input => handle_input_key(app, key),
        FocusPane::Suggestions => handle_suggestion_key(app, key),
    }
}

fn handle_launcher(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char('o') => app.open_panel(),
        _ => {}
    }
}

fn handle_suggestion_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => app.prev_suggestion(),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => app.next_suggestion(),
        KeyCode::Enter => app.pick_suggestion(),
        _ => {}
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) {
    // The field is read-only while a reply is pending.
    if !app.view.controls_enabled {
        return;
    }

    if key.code == KeyCode::Enter {
        app.submit_input();
        return;
    }

    let view = &mut app.view;
    match key.code {
        KeyCode::Backspace => {
            if view.cursor > 0 {
                view.cursor -= 1;
                let byte_pos = char_to_byte_index(&view.input, view.cursor);
                view.input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = view.input.chars().count();
            if view.cursor < char_count {
                let byte_pos = char_to_byte_index(&view.input, view.cursor);
                view.input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            view.cursor = view.cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = view.input.chars().count();
            view.cursor = (view.cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            view.cursor = 0;
        }
        KeyCode::End => {
            view.cursor = view.input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&view.input, view.cursor);
            view.input.insert(byte_pos, c);
            view.cursor += 1;
        }
        _ => {}
    }
}

fn insert_text(app: &mut App, text: &str) {
    if !app.panel_open || app.focus != FocusPane::Input || !app.view.controls_enabled {
        return;
    }

    // Pasted newlines would otherwise look like a submit.
    let text: String = text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }).collect();
    let view = &mut app.view;
    let byte_pos = char_to_byte_index(&view.input, view.cursor);
    view.input.insert_str(byte_pos, &text);
    view.cursor += text.chars().count();
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let in_chat = app
        .chat_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);
    if !app.panel_open || !in_chat {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => app.view.scroll_down(3),
        MouseEventKind::ScrollUp => app.view.scroll_up(3),
        _ => {}
    }
}
