use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::theme::Theme;
use crate::view::{CharClass, ViewModel, TEXT_WIDTH};

/// Blank rows between the prompt and the stats line
const PROMPT_MARGIN_BOTTOM: u16 = 3;
const SEPARATOR: &str = "•";

impl Widget for &ViewModel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let theme = self.theme;

        Block::default()
            .style(Style::default().bg(theme.base))
            .render(area, buf);

        if self.is_finished {
            render_results(self, area, buf);
        } else {
            render_typing(self, area, buf);
        }

        // drawn last so it stays on top of a crowded results screen
        render_theme_indicator(theme, area, buf);
    }
}

fn render_theme_indicator(theme: &Theme, area: Rect, buf: &mut Buffer) {
    if area.height < 2 {
        return;
    }
    let row = Rect::new(area.x, area.y + 1, area.width.saturating_sub(2), 1);
    Paragraph::new(Span::styled(
        format!("Theme: {} (Ctrl+T)", theme.name),
        Style::default().fg(theme.subtle),
    ))
    .alignment(Alignment::Right)
    .render(row, buf);
}

fn render_typing(view: &ViewModel, area: Rect, buf: &mut Buffer) {
    let theme = view.theme;

    let lines: Vec<Line> = view
        .lines
        .iter()
        .map(|runs| {
            Line::from(
                runs.iter()
                    .map(|run| Span::styled(run.text.clone(), char_style(theme, run.class, view.cursor_visible)))
                    .collect::<Vec<Span>>(),
            )
        })
        .collect();

    let prompt_height = lines.len() as u16;
    let content = centered(
        area,
        TEXT_WIDTH as u16,
        prompt_height + PROMPT_MARGIN_BOTTOM + 1,
    );

    let prompt_area = Rect::new(content.x, content.y, content.width, prompt_height.min(content.height));
    Paragraph::new(lines).render(prompt_area, buf);

    let stats_y = content.y + content.height.saturating_sub(1);
    let stats_area = Rect::new(content.x, stats_y, content.width, content.height.min(1));
    Paragraph::new(Line::from(typing_stats(view))).render(stats_area, buf);
}

fn typing_stats(view: &ViewModel) -> Vec<Span<'static>> {
    let theme = view.theme;
    let separator = || Span::styled(format!(" {SEPARATOR} "), Style::default().fg(theme.muted));

    vec![
        Span::styled(view.wpm.to_string(), Style::default().fg(theme.gold)),
        Span::styled(" wpm", Style::default().fg(theme.text)),
        separator(),
        Span::styled(format!("{}%", view.accuracy), Style::default().fg(theme.foam)),
        Span::styled(" acc", Style::default().fg(theme.text)),
        separator(),
        Span::styled(view.elapsed.clone(), Style::default().fg(theme.rose)),
        separator(),
        Span::styled("ESC to exit", Style::default().fg(theme.subtle)),
    ]
}

fn render_results(view: &ViewModel, area: Rect, buf: &mut Buffer) {
    let theme = view.theme;
    let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.subtle));
    let row = |name: &'static str, value: String, value_style: Style| {
        Line::from(vec![label(name), Span::raw("  "), Span::styled(value, value_style)])
    };

    let mut lines = vec![
        row(
            "WPM",
            view.wpm.to_string(),
            Style::default().fg(theme.gold).bold(),
        ),
        Line::default(),
        row(
            "Accuracy",
            format!("{}%", view.accuracy),
            Style::default().fg(theme.foam),
        ),
        Line::default(),
        row("Time", view.elapsed.clone(), Style::default().fg(theme.rose)),
        Line::default(),
        row(
            "Characters",
            format!("{}/{}", view.correct_chars, view.incorrect_chars),
            Style::default().fg(theme.text),
        ),
    ];

    if !view.samples.is_empty() {
        let separator = || Span::styled(format!("  {SEPARATOR}  "), Style::default().fg(theme.muted));
        lines.extend([
            Line::default(),
            Line::default(),
            Line::from(label("WPM Progress")),
            Line::default(),
            Line::from(Span::styled(
                view.sparkline.clone(),
                Style::default().fg(theme.iris),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled(format!("Peak: {}", view.peak_wpm), Style::default().fg(theme.subtle)),
                separator(),
                Span::styled(format!("Avg: {}", view.average_wpm), Style::default().fg(theme.subtle)),
                separator(),
                Span::styled(
                    format!("Consistency: {}%", view.consistency),
                    Style::default().fg(theme.subtle),
                ),
            ]),
        ]);
    }

    lines.extend([
        Line::default(),
        Line::default(),
        Line::from(label("Press Enter to try again • ESC to exit")),
    ]);

    let height = lines.len() as u16;
    let content = centered(area, area.width, height);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(content, buf);
}

fn char_style(theme: &Theme, class: CharClass, cursor_visible: bool) -> Style {
    match class {
        CharClass::Correct => Style::default().fg(theme.text),
        CharClass::Incorrect => Style::default().fg(theme.love),
        CharClass::Cursor if cursor_visible => Style::default().fg(theme.iris).bg(theme.overlay),
        CharClass::Cursor => Style::default().fg(theme.iris),
        CharClass::Pending => Style::default().fg(theme.muted),
    }
}

/// A `width` x `height` rect centered in `area`, clamped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
