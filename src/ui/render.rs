use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::types::*;

pub fn draw(f: &mut Frame, app: &mut App) {
    // Fill background
    let bg_block = Block::default().style(Style::default().bg(app.theme.bg));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // top bar
            Constraint::Min(10),   // converter
            Constraint::Length(1), // bottom bar
        ])
        .split(f.area());

    draw_top_bar(f, app, chunks[0]);
    draw_converter(f, app, chunks[1]);
    draw_bottom_bar(f, app, chunks[2]);
}

// -- Top bar --

fn draw_top_bar(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;

    let mut spans: Vec<Span> = vec![Span::styled(
        " satseur ",
        Style::default().fg(t.title).add_modifier(Modifier::BOLD),
    )];

    if !app.rate_display.is_empty() {
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let rate_len = app.rate_display.chars().count();
        let pad = (area.width as usize).saturating_sub(used + rate_len + 1);
        if pad > 0 {
            spans.push(Span::raw(" ".repeat(pad)));
        }
        spans.push(Span::styled(
            app.rate_display.clone(),
            Style::default().fg(t.accent),
        ));
    }

    let bar = Paragraph::new(Line::from(spans));
    f.render_widget(bar, area);
}

// -- Converter box --

fn draw_converter(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;

    // Center the converter
    let box_w = 46_u16.min(area.width.saturating_sub(2));
    let box_h = 10_u16.min(area.height);
    let x = area.x + (area.width.saturating_sub(box_w)) / 2;
    let y = area.y + (area.height.saturating_sub(box_h)) / 2;
    let outer = Rect::new(x, y, box_w, box_h);

    let block = Block::default()
        .title(" sats \u{21c4} EUR ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.border));
    let inner = block.inner(outer);
    f.render_widget(block, outer);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // sats field
            Constraint::Length(3), // eur field
            Constraint::Length(1), // status
            Constraint::Min(0),
        ])
        .split(inner);

    draw_field(f, app, chunks[0], Field::Sats);
    draw_field(f, app, chunks[1], Field::Eur);
    draw_status(f, app, chunks[2]);
}

fn draw_field(f: &mut Frame, app: &App, area: Rect, field: Field) {
    let t = &app.theme;
    let fs = app.field(field);
    let focused = app.focus == field;

    let border = if focused { t.input_accent } else { t.border };
    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = Paragraph::new(fs.text.as_str()).style(Style::default().fg(t.fg));
    f.render_widget(text, inner);

    if focused && inner.width > 0 {
        let caret_x = inner.x + (fs.caret as u16).min(inner.width.saturating_sub(1));
        f.set_cursor_position(Position::new(caret_x, inner.y));
    }
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let color = match app.status_kind {
        StatusKind::Neutral => t.dim,
        StatusKind::Success => t.success,
        StatusKind::Error => t.error,
    };
    let status = Paragraph::new(format!(" {}", app.status)).style(Style::default().fg(color));
    f.render_widget(status, area);
}

// -- Bottom bar --

fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let help = " Tab switch field \u{b7} Enter convert now \u{b7} Esc quit";
    let bar = Paragraph::new(help).style(Style::default().fg(t.dim));
    f.render_widget(bar, area);
}
