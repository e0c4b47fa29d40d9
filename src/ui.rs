use dex_lookup::error::LookupError;
use dex_lookup::session::{LookupSession, Outcome, ViewState};
use dex_lookup::utils::{ability_label, capitalize_first, format_tenths};
use dex_lookup::{LookupResult, SpriteThumb, Variant};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Spans};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io;
use std::io::Stdout;

/// Largest sprite edge, in thumbnail pixels.
const MAX_SPRITE_EDGE: u32 = 32;

pub struct App {
    pub session: LookupSession,
    pub search_text: String,
    pub editing: bool,
    pub show_help: bool,
}

impl App {
    pub fn new(variant: Variant) -> Self {
        Self {
            session: LookupSession::new(variant),
            search_text: String::new(),
            editing: true,
            show_help: false,
        }
    }

    /// Identifier to submit: the search box with surrounding whitespace removed.
    pub fn submitted_identifier(&self) -> &str {
        self.search_text.trim()
    }
}

pub fn draw_ui(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &App) -> io::Result<()> {
    terminal
        .draw(|f| {
            let size = f.size();
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(size);

            draw_controls(f, chunks[0], app);
            draw_detail(f, chunks[1], app);

            if app.show_help {
                draw_help(f, centered_rect(60, 40, size));
            }
        })
        .map(|_| ())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_w = r.width.saturating_mul(percent_x) / 100;
    let popup_h = r.height.saturating_mul(percent_y) / 100;
    let popup_x = r.x + (r.width.saturating_sub(popup_w) / 2);
    let popup_y = r.y + (r.height.saturating_sub(popup_h) / 2);
    Rect::new(popup_x, popup_y, popup_w, popup_h)
}

fn draw_controls<B: Backend>(f: &mut Frame<B>, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    let title = if app.editing {
        "Search (Enter to look up)"
    } else {
        "Search ('/' to edit)"
    };
    let search = Paragraph::new(Spans::from(Span::raw(app.search_text.as_str())))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(search, rows[0]);
    if app.editing {
        f.set_cursor(cursor_x(rows[0], &app.search_text), rows[0].y.saturating_add(1));
    }

    let selected = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let radio = |variant: Variant| {
        if app.session.variant() == variant {
            Span::styled(format!("(•) {}", variant.label()), selected)
        } else {
            Span::raw(format!("( ) {}", variant.label()))
        }
    };
    let variant_para = Paragraph::new(Spans::from(vec![
        radio(Variant::Normal),
        Span::raw("   "),
        radio(Variant::Shiny),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Sprite (Tab)"));
    f.render_widget(variant_para, rows[1]);

    let hints = Paragraph::new(vec![
        Spans::from(Span::raw("Type a name or number, then Enter.")),
        Spans::from(Span::raw("Tab toggles Normal / Shiny.")),
        Spans::from(Span::raw("Press '?' for help, 'q' to quit.")),
    ])
    .block(Block::default().borders(Borders::ALL).title("Pokédex"))
    .wrap(Wrap { trim: true });
    f.render_widget(hints, rows[2]);
}

/// Column just past `text` inside a bordered box, clamped to the box.
fn cursor_x(area: Rect, text: &str) -> u16 {
    let typed = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(typed)
        .min(area.right().saturating_sub(2))
}

fn draw_detail<B: Backend>(f: &mut Frame<B>, area: Rect, app: &App) {
    match app.session.view() {
        ViewState::Idle => {
            let para = Paragraph::new("Search for a Pokémon by name or Pokédex number.")
                .block(Block::default().borders(Borders::ALL).title("Details"))
                .wrap(Wrap { trim: true });
            f.render_widget(para, area);
        }
        ViewState::Loading(query) => {
            let para = Paragraph::new(vec![
                Spans::from(Span::styled(
                    "Loading Pokémon...",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(Span::raw(format!(
                    "{} ({})",
                    query.identifier,
                    query.variant.label()
                ))),
            ])
            .block(Block::default().borders(Borders::ALL).title("Details"));
            f.render_widget(para, area);
        }
        ViewState::Ready(outcome) => draw_outcome(f, area, outcome),
    }
}

fn draw_outcome<B: Backend>(f: &mut Frame<B>, area: Rect, outcome: &Outcome) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Min(8)])
        .split(area);

    f.render_widget(sprite_paragraph(chunks[0], outcome.sprite.as_ref()), chunks[0]);

    let info = Paragraph::new(info_lines(outcome))
        .block(Block::default().borders(Borders::ALL).title("Info"))
        .wrap(Wrap { trim: true });
    f.render_widget(info, chunks[1]);
}

fn sprite_paragraph(rect: Rect, sprite: Option<&SpriteThumb>) -> Paragraph<'static> {
    let block = Block::default().borders(Borders::ALL).title("Sprite");
    let thumb = match sprite {
        Some(thumb) => thumb,
        None => return Paragraph::new("Image not available").block(block),
    };

    // Two columns per pixel keeps the sprite roughly square.
    let avail_w = (rect.width.saturating_sub(2) / 2).max(1) as u32;
    let avail_h = rect.height.saturating_sub(2).max(1) as u32;
    let edge = avail_w.min(avail_h).min(MAX_SPRITE_EDGE);

    let lines: Vec<Spans> = thumb
        .pixels(edge, edge)
        .into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|px| match px {
                    Some((r, g, b)) => Span::styled("  ", Style::default().bg(Color::Rgb(r, g, b))),
                    None => Span::raw("  "),
                })
                .collect();
            Spans::from(spans)
        })
        .collect();
    Paragraph::new(lines).block(block)
}

fn info_lines(outcome: &Outcome) -> Vec<Spans<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    let record = match &outcome.result {
        LookupResult::Found(record) => record,
        LookupResult::NotFound => {
            let message = if outcome.query.identifier.is_empty() {
                "Type a name or number first.".to_string()
            } else {
                format!("No such Pokémon: {}", outcome.query.identifier)
            };
            lines.push(Spans::from(Span::styled(message, bold.fg(Color::Yellow))));
            lines.extend(placeholder_lines());
            return lines;
        }
        LookupResult::TransportError(err) => {
            lines.push(Spans::from(Span::styled(
                "Could not reach the Pokédex, check your connection.",
                bold.fg(Color::Red),
            )));
            lines.push(Spans::from(Span::raw(error_detail(err))));
            lines.extend(placeholder_lines());
            return lines;
        }
    };

    lines.push(Spans::from(Span::styled(
        format!("Name: {}", record.display_name()),
        bold,
    )));
    lines.push(Spans::from(Span::raw(format!("#ID: {}", record.id))));
    lines.push(Spans::from(Span::raw(format!(
        "Height: {}",
        format_tenths(record.height_decimetres, "m")
    ))));
    lines.push(Spans::from(Span::raw(format!(
        "Weight: {}",
        format_tenths(record.weight_hectograms, "kg")
    ))));
    lines.push(Spans::from(Span::styled("Abilities:", bold)));
    if record.abilities.is_empty() {
        lines.push(Spans::from(Span::raw("No abilities found.")));
    } else {
        for ability in &record.abilities {
            lines.push(Spans::from(Span::raw(format!(
                "\u{2022} {}",
                ability_label(ability)
            ))));
        }
    }
    lines
}

fn placeholder_lines() -> Vec<Spans<'static>> {
    vec![
        Spans::from(Span::raw("Name: -")),
        Spans::from(Span::raw("#ID: -")),
        Spans::from(Span::raw("Height: -")),
        Spans::from(Span::raw("Weight: -")),
        Spans::from(Span::raw("Abilities:")),
        Spans::from(Span::raw("No abilities found.")),
    ]
}

fn error_detail(err: &LookupError) -> String {
    capitalize_first(&err.to_string())
}

fn draw_help<B: Backend>(f: &mut Frame<B>, popup: Rect) {
    let help_lines = vec![
        Spans::from(Span::styled(
            "Keybindings",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::raw("")),
        Spans::from(Span::raw("q          Quit")),
        Spans::from(Span::raw("/ or i     Edit the search box")),
        Spans::from(Span::raw("Enter      Look up the typed name or number")),
        Spans::from(Span::raw("Esc        Stop editing")),
        Spans::from(Span::raw("Tab or s   Toggle Normal / Shiny sprite")),
        Spans::from(Span::raw("?          Toggle this help")),
    ];
    let help_para = Paragraph::new(help_lines)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    f.render_widget(ratatui::widgets::Clear, popup);
    f.render_widget(help_para, popup);
}
