use ratatui::layout::{Constraint, Layout, Position};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::state::InputState;
use crate::highlight::{Highlighted, SegmentKind};
use crate::shorthand::ShorthandTable;

const PROMPT: &str = "jq> ";

/// Everything one frame shows.
pub struct View<'a> {
    pub input: &'a InputState,
    pub evaluating: bool,
    /// Label and annotation of the shown candidate.
    pub candidate: Option<(&'a str, &'a Highlighted)>,
    pub shorthands: &'a ShorthandTable,
}

pub fn draw(frame: &mut Frame<'_>, view: &View<'_>) {
    let [prompt_area, preview_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let mut prompt = vec![
        Span::styled(PROMPT, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(view.input.text()),
    ];
    if view.evaluating {
        prompt.push(Span::styled("  running", Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(Paragraph::new(Line::from(prompt)), prompt_area);

    let cursor_x = Span::raw(PROMPT).width() + Span::raw(view.input.before_cursor()).width();
    let cursor_x = u16::try_from(cursor_x).unwrap_or(u16::MAX);
    frame.set_cursor_position(Position::new(
        prompt_area.x.saturating_add(cursor_x),
        prompt_area.y,
    ));

    let (title, body) = match view.candidate {
        Some((label, annotation)) => (format!(" {label} "), highlighted_lines(annotation)),
        None => (
            " no result ".to_string(),
            vec![Line::styled(
                "Type a filter to preview its output.",
                Style::default().fg(Color::DarkGray),
            )],
        ),
    };
    let preview = Paragraph::new(body)
        .block(Block::default().borders(Borders::TOP).title(title))
        .scroll((view.input.scroll(), 0));
    frame.render_widget(preview, preview_area);

    frame.render_widget(footer(view.shorthands), footer_area);
}

fn highlighted_lines(annotation: &Highlighted) -> Vec<Line<'_>> {
    annotation
        .lines
        .iter()
        .map(|line| {
            Line::from(
                line.iter()
                    .map(|segment| Span::styled(segment.text.as_str(), segment_style(segment.kind)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn segment_style(kind: SegmentKind) -> Style {
    match kind {
        SegmentKind::Key => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        SegmentKind::String => Style::default().fg(Color::Green),
        SegmentKind::Number => Style::default().fg(Color::Magenta),
        SegmentKind::Bool | SegmentKind::Null => Style::default().fg(Color::Yellow),
        SegmentKind::Punctuation => Style::default().fg(Color::DarkGray),
        SegmentKind::Plain => Style::default(),
    }
}

fn footer(shorthands: &ShorthandTable) -> Paragraph<'_> {
    let hint = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::styled("enter copy  esc cancel  pgup/pgdn scroll", hint)];
    if !shorthands.is_empty() {
        spans.push(Span::styled("  shorthands:", hint));
        for shorthand in shorthands.iter() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                shorthand.name.as_str(),
                Style::default().fg(Color::Cyan),
            ));
        }
    }
    Paragraph::new(Line::from(spans))
}
