//! UI rendering for the terminal user interface.
//!
//! Everything here is a pure function of `App` and the UI settings; the
//! event loop redraws on every pass.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::catalog::Dua;
use crate::config::{ThemeMode, UiSettings};
use crate::emotion::EMOTIONS;
use crate::player::{CardPlayer, CardState, PlaybackMode};

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("1-7", "emotion"),
    ("0/esc", "all"),
    ("space/p", "play/pause"),
    ("f", "favorite"),
    ("s", "share"),
    ("t", "theme"),
    ("q", "quit"),
];

const EMPTY_TEXT: &str = "No du'a found for this emotion.";

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    dim: Color,
    highlight: Color,
}

impl Palette {
    fn for_theme(theme: ThemeMode) -> Self {
        match theme {
            ThemeMode::Light => Self {
                fg: Color::Rgb(40, 40, 40),
                bg: Color::Rgb(250, 247, 240),
                accent: Color::Rgb(15, 118, 110),
                dim: Color::Rgb(120, 120, 120),
                highlight: Color::Rgb(226, 238, 232),
            },
            ThemeMode::Dark => Self {
                fg: Color::Rgb(230, 230, 230),
                bg: Color::Rgb(18, 24, 27),
                accent: Color::Rgb(94, 234, 212),
                dim: Color::Rgb(140, 140, 140),
                highlight: Color::Rgb(32, 48, 48),
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    fn dim(&self) -> Style {
        Style::default().fg(self.dim)
    }
}

/// Greedy word wrap on character counts. Words longer than `width` get a line of their own.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut len = 0;
        for word in paragraph.split_whitespace() {
            let wlen = word.chars().count();
            if len > 0 && len + 1 + wlen > width {
                lines.push(std::mem::take(&mut current));
                len = 0;
            }
            if len > 0 {
                current.push(' ');
                len += 1;
            }
            current.push_str(word);
            len += wlen;
        }
        lines.push(current);
    }

    lines
}

/// `width` cells of bar for `progress` in [0, 100].
fn progress_bar(progress: f32, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 100.0) / 100.0) * width as f32).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn play_glyph(card: &CardPlayer) -> &'static str {
    match card.state() {
        CardState::Playing => "⏸",
        _ if card.is_starting() => "…",
        _ => "▶",
    }
}

fn card_item<'a>(
    dua: &'a Dua,
    card: Option<&CardPlayer>,
    favorite: bool,
    ui: &UiSettings,
    palette: Palette,
    width: usize,
) -> ListItem<'a> {
    let mut lines: Vec<Line> = Vec::new();

    let mut title = vec![Span::styled(
        format!("{} {}", dua.icon.map(|i| i.glyph()).unwrap_or("•"), dua.category),
        palette.accent().add_modifier(Modifier::BOLD),
    )];
    if favorite {
        title.push(Span::styled("  ♥", Style::default().fg(Color::Red)));
    }
    lines.push(Line::from(title));

    for l in wrap_text(&dua.arabic, width) {
        lines.push(Line::from(l).alignment(Alignment::Right));
    }
    if ui.show_transliteration {
        if let Some(t) = &dua.transliteration {
            for l in wrap_text(t, width) {
                lines.push(Line::styled(l, palette.dim().add_modifier(Modifier::ITALIC)));
            }
        }
    }
    for l in wrap_text(&dua.translation, width) {
        lines.push(Line::from(l));
    }
    if let Some(r) = &dua.reference {
        lines.push(Line::styled(format!("— {r}"), palette.dim()));
    }

    if let Some(card) = card {
        let bar_width = width.saturating_sub(16).clamp(4, 40);
        let mode = match card.mode() {
            PlaybackMode::Real => "audio",
            PlaybackMode::Simulated => "preview",
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", play_glyph(card)), palette.accent()),
            Span::styled(progress_bar(card.progress(), bar_width), palette.accent()),
            Span::styled(format!(" {:>3.0}% {mode}", card.progress()), palette.dim()),
        ]));
    }
    lines.push(Line::from(""));

    ListItem::new(Text::from(lines))
}

fn emotion_line(app: &App, palette: Palette) -> Line<'static> {
    let mut spans = Vec::new();
    for (n, e) in EMOTIONS.iter().enumerate() {
        let text = format!(" {}:{} {} ", n + 1, e.icon, e.label);
        let style = if app.selected_emotion() == Some(e.id) {
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            palette.base()
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    match app.now_playing_title() {
        Some(t) => parts.push(format!("Playing: {t}")),
        None => parts.push("Stopped".to_string()),
    }

    let filter = app
        .selected_emotion()
        .and_then(crate::emotion::find)
        .map(|e| e.label)
        .unwrap_or("All");
    parts.push(format!("Emotion: {filter}"));
    parts.push(format!("{} shown", app.visible().len()));

    if let Some(s) = &app.status {
        parts.push(s.clone());
    }

    parts.join(" • ")
}

/// Render the entire UI into `frame`.
pub fn draw(frame: &mut Frame, app: &App, ui: &UiSettings) {
    let palette = Palette::for_theme(app.theme);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let theme_hint = match app.theme {
        ThemeMode::Light => " light ",
        ThemeMode::Dark => " dark ",
    };
    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .style(palette.accent().add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" duabook ")
                .title_alignment(Alignment::Center)
                .title_bottom(Line::from(theme_hint).right_aligned())
                .style(palette.base()),
        );
    frame.render_widget(header, chunks[0]);

    let emotions = Paragraph::new(emotion_line(app, palette)).block(
        Block::bordered()
            .title(" how are you feeling? ")
            .style(palette.base()),
    );
    frame.render_widget(emotions, chunks[1]);

    let list_area = chunks[2];
    let list_block = Block::bordered()
        .title(" du'a ")
        .padding(Padding::horizontal(1))
        .style(palette.base());

    if !app.has_visible() {
        let empty = Paragraph::new(EMPTY_TEXT)
            .alignment(Alignment::Center)
            .style(palette.dim())
            .block(list_block);
        frame.render_widget(empty, list_area);
    } else {
        // Borders, padding and the highlight symbol.
        let width = list_area.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = app
            .visible()
            .iter()
            .map(|&i| {
                let dua = &app.duas[i];
                card_item(dua, app.card(i), app.is_favorite(&dua.id), ui, palette, width)
            })
            .collect();

        let list = List::new(items)
            .block(list_block)
            .highlight_style(Style::default().bg(palette.highlight))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(app.visible().iter().position(|&i| i == app.selected));
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    let status = Paragraph::new(status_text(app))
        .block(
            Block::bordered()
                .padding(Padding::left(1))
                .title(" status ")
                .style(palette.base()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[3]);

    let footer = Paragraph::new(controls_text())
        .style(palette.dim())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding::left(1))
                .style(palette.base()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
