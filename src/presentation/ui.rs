use crate::application::{App, AppMode};
use crate::domain::{ArtifactKind, Field, GenerationResult, RequestState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

pub fn render_ui(f: &mut Frame, app: &App) {
    let show_error = app.request_state().error().is_some();
    let show_description = app.description_input.is_seeded();

    let mut constraints = vec![
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Length(3),
        Constraint::Length(1),
    ];
    if show_error {
        constraints.push(Constraint::Length(3));
    }
    if show_description {
        constraints.push(Constraint::Length(7));
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());
    let mut areas = chunks.iter().copied();
    let mut next_area = || areas.next().unwrap_or_default();

    render_header(f, next_area());
    render_text_field(
        f,
        app,
        Field::Problem,
        "Math Word Problem",
        "Enter your math word problem…",
        next_area(),
    );
    render_text_field(
        f,
        app,
        Field::Formula,
        "Formula",
        "Optional formula (e.g. 9 + 7 = 16)",
        next_area(),
    );
    render_button(f, app, "Enter: Generate Visualization", "Generating…", next_area());

    if let Some(message) = app.request_state().error() {
        render_error(f, message, next_area());
    }
    if show_description {
        render_text_field(f, app, Field::Description, "Visual Language", "", next_area());
        render_button(f, app, "Ctrl+R: Resubmit Visualization", "Updating…", next_area());
    }

    render_artifacts(f, app.request_state(), next_area());
    render_status_bar(f, app, next_area());

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("Math2Visual - enter a math word problem to generate visual representations")
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_text_field(
    f: &mut Frame,
    app: &App,
    field: Field,
    title: &str,
    placeholder: &str,
    area: Rect,
) {
    let input = match field {
        Field::Problem => &app.problem_input.problem,
        Field::Formula => &app.problem_input.formula,
        Field::Description => &app.description_input.description,
    };
    let focused = app.focus == field && matches!(app.mode, AppMode::Normal);
    let error = app.field_errors.get(&field);

    let border_style = match (error, focused) {
        (Some(_), _) => Style::default().fg(Color::Red),
        (None, true) => Style::default().fg(Color::Yellow),
        (None, false) => Style::default(),
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(border_style);
    if let Some(err) = error {
        block = block.title_bottom(Line::from(err.message).style(Style::default().fg(Color::Red)));
    }

    let width = area.width.saturating_sub(2).max(1) as usize;
    let (lines, (cursor_col, cursor_row)) = wrap_input(input.value(), input.cursor(), width);
    let content: Vec<Line> = if input.value().is_empty() {
        vec![Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        lines.into_iter().map(Line::from).collect()
    };
    let style = if field == Field::Description {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(content).block(block).style(style);
    f.render_widget(paragraph, area);

    if focused {
        let x = area.x + 1 + cursor_col as u16;
        let y = area.y + 1 + cursor_row as u16;
        if y < area.y + area.height.saturating_sub(1) {
            f.set_cursor_position((x, y));
        }
    }
}

/// Breaks `value` into rows of at most `width` display columns and locates
/// the character cursor as `(column, row)` within them.
///
/// Wrapping is per character so the drawn rows and the cursor agree for
/// wide characters as well.
pub(crate) fn wrap_input(
    value: &str,
    cursor: usize,
    width: usize,
) -> (Vec<String>, (usize, usize)) {
    let width = width.max(1);
    let mut lines = vec![String::new()];
    let mut col = 0;
    let mut position = None;

    for (index, c) in value.chars().enumerate() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if col > 0 && col + w > width {
            lines.push(String::new());
            col = 0;
        }
        if index == cursor {
            position = Some((col, lines.len() - 1));
        }
        if let Some(line) = lines.last_mut() {
            line.push(c);
        }
        col += w;
    }

    let position = position.unwrap_or(if col >= width {
        (0, lines.len())
    } else {
        (col, lines.len() - 1)
    });
    (lines, position)
}

fn render_button(f: &mut Frame, app: &App, label: &str, busy_label: &str, area: Rect) {
    let (text, style) = if app.is_pending() {
        (busy_label, Style::default().fg(Color::DarkGray))
    } else {
        (label, Style::default().fg(Color::Black).bg(Color::Green))
    };
    let button = Paragraph::new(format!(" {} ", text))
        .alignment(Alignment::Center)
        .style(style);
    f.render_widget(button, area);
}

fn render_error(f: &mut Frame, message: &str, area: Rect) {
    let error = Paragraph::new(format!("Error: {}", message))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
    f.render_widget(error, area);
}

fn render_artifacts(f: &mut Frame, state: &RequestState, area: Rect) {
    match state {
        RequestState::Succeeded(result) => render_result(f, result, area),
        RequestState::Pending { .. } => {
            let waiting = Paragraph::new("Generating visualizations…")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(waiting, area);
        }
        RequestState::Idle | RequestState::Failed(_) => {}
    }
}

fn render_result(f: &mut Frame, result: &GenerationResult, area: Rect) {
    if !result.is_complete() {
        let reasons: Vec<Line> = result
            .unavailable()
            .into_iter()
            .map(|(_, reason)| Line::from(reason.to_string()))
            .collect();
        let errors = Paragraph::new(reasons)
            .block(Block::default().borders(Borders::ALL).title("Visualizations"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        f.render_widget(errors, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (kind, column) in ArtifactKind::ALL.into_iter().zip(columns.iter()) {
        let markup = result.artifact(kind).svg().unwrap_or_default();
        let shortcut = match kind {
            ArtifactKind::Formal => "Ctrl+F",
            ArtifactKind::Intuitive => "Ctrl+T",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(kind.label())
            .title_bottom(
                Line::from(format!("{}: save {}", shortcut, kind.filename()))
                    .style(Style::default().fg(Color::Magenta)),
            );
        let panel = Paragraph::new(markup)
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(panel, *column);
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else if app.is_pending() {
                "Waiting for the generation service…".to_string()
            } else {
                "Tab: next field | Enter: submit | Ctrl+F/Ctrl+T: save SVG | Ctrl+Y: copy | F1: help | Ctrl+Q: quit".to_string()
            }
        }
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal if app.is_pending() => Style::default().fg(Color::Yellow),
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "Math2Visual Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

pub(crate) const HELP_TEXT: &str = r#"MATH2VISUAL

=== WORKFLOW ===
1. Type a math word problem (required) and optionally a formula.
2. Press Enter to generate. The visual language and two SVG
   visualizations (formal and intuitive) are shown when ready.
3. Edit the visual language and press Ctrl+R to regenerate from it.
While a request is running, both submit actions are disabled.

=== EDITING ===
Tab / ↓         Next field
Shift+Tab / ↑   Previous field
←/→ Home/End    Move cursor
Backspace/Del   Delete characters

=== ACTIONS ===
Enter           Submit the focused form
Ctrl+R          Resubmit the visual language
Ctrl+F          Save formal-visualization.svg
Ctrl+T          Save intuitive-visualization.svg
Ctrl+Y          Copy the visual language to the clipboard
Esc             Dismiss the status message
F1              Show this help
Ctrl+Q / Ctrl+C Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

SVG files are written to the export directory
(MATH2VISUAL_EXPORT_DIR, default: current directory)."#;
