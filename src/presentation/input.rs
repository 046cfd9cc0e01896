use crate::application::{App, AppMode};
use crate::domain::ArtifactKind;
use crate::infrastructure::copy_to_clipboard;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_form_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('q') | KeyCode::Char('c') => {
                    app.should_quit = true;
                }
                KeyCode::Char('r') => {
                    app.submit_description();
                }
                KeyCode::Char('f') => {
                    let _ = app.export_artifact(ArtifactKind::Formal);
                }
                KeyCode::Char('t') => {
                    let _ = app.export_artifact(ArtifactKind::Intuitive);
                }
                KeyCode::Char('y') => {
                    let result = if app.description_input.is_seeded() {
                        copy_to_clipboard(app.description_input.description.value())
                    } else {
                        Err("no visual language yet".to_string())
                    };
                    app.set_clipboard_result(result);
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::F(1) => {
                app.open_help();
            }
            KeyCode::Tab | KeyCode::Down => {
                app.focus_next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus_previous();
            }
            KeyCode::Enter => {
                app.submit_focused();
            }
            KeyCode::Esc => {
                app.status_message = None;
            }
            KeyCode::Backspace => {
                app.edit_focused(|input| input.backspace());
            }
            KeyCode::Delete => {
                app.edit_focused(|input| input.delete());
            }
            KeyCode::Left => {
                app.navigate_focused(|input| input.move_left());
            }
            KeyCode::Right => {
                app.navigate_focused(|input| input.move_right());
            }
            KeyCode::Home => {
                app.navigate_focused(|input| input.move_home());
            }
            KeyCode::End => {
                app.navigate_focused(|input| input.move_end());
            }
            KeyCode::Char(c) => {
                app.edit_focused(|input| input.insert(c));
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
