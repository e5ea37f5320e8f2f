//! Ratatui dashboard: banner, sentiment bar chart, footer.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Padding, Paragraph};

use crate::app::App;

/// Fixed chart title.
const CHART_TITLE: &str = " Real-Time Average Sentiment by Category ";

/// Bar column width; category labels are truncated to fit.
const BAR_WIDTH: u16 = 10;

/// Renders the full dashboard frame from the current state.
///
/// Drawing is a pure function of `app`: redrawing without an intervening
/// table update produces an identical frame.
pub fn render(frame: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // banner
        Constraint::Min(8),    // bar chart
        Constraint::Length(3), // footer
    ])
    .split(frame.area());

    draw_banner(frame, chunks[0], app);
    draw_chart(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);
}

fn draw_banner(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let uptime = fmt_duration(app.uptime());
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(
            " buzzline-sentiment",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("topic {}", app.topic),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{} categories", app.table.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{:.1} msg/s", app.throughput),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(uptime, Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(banner, area);
}

fn draw_chart(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(Line::from(Span::styled(
            CHART_TITLE,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .title_bottom(Line::from(" Categories ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::horizontal(1));

    if app.table.is_empty() {
        let waiting = Paragraph::new(" waiting for messages...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(waiting, area);
        return;
    }

    let averages = app.table.averages();
    // Heights are scaled against the largest magnitude so negative and
    // fractional averages stay comparable; the true value rides on the bar.
    let max_mag = averages
        .iter()
        .map(|(_, avg)| avg.abs())
        .fold(0.0_f64, f64::max)
        .max(0.01);

    let bars: Vec<Bar> = averages
        .iter()
        .map(|(category, avg)| {
            let height = ((avg.abs() / max_mag) * 100.0).round() as u64;
            let color = if *avg < 0.0 { Color::Red } else { Color::Green };
            Bar::default()
                .value(height)
                .text_value(format!("{avg:+.2}"))
                .label(Line::from(truncate(category, BAR_WIDTH as usize)))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(BAR_WIDTH)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" received: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.messages_received.to_string(),
            Style::default().fg(Color::White),
        ),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled("applied: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.messages_applied.to_string(),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled("dropped: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.messages_dropped.to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            "                              q: quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(footer, area);
}

// ── Formatting helpers ───────────────────────────────────────────

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(2)).collect();
        format!("{head}..")
    } else {
        s.to_string()
    }
}

fn fmt_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    use super::*;

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn redraw_without_updates_is_identical() {
        let mut app = App::new("t".into());
        app.ingest(br#"{"category": "tech", "sentiment": 5}"#);
        app.ingest(br#"{"category": "news", "sentiment": -2}"#);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        // The chart is a pure function of the table; the banner is excluded
        // because its uptime readout moves with the clock.
        let draw = |f: &mut ratatui::Frame| {
            let area = f.area();
            draw_chart(f, area, &app);
        };
        terminal.draw(draw).unwrap();
        let first = terminal.backend().buffer().clone();
        terminal.draw(draw).unwrap();
        assert_eq!(first, *terminal.backend().buffer());
    }

    #[test]
    fn empty_table_shows_waiting_placeholder() {
        let app = App::new("t".into());
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("waiting for messages..."));
    }

    #[test]
    fn chart_labels_each_category() {
        let mut app = App::new("t".into());
        app.ingest(br#"{"category": "tech", "sentiment": 1}"#);
        app.ingest(br#"{"category": "sports", "sentiment": 0.5}"#);

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("tech"));
        assert!(text.contains("sports"));
        assert!(text.contains("Average Sentiment"));
        assert!(text.contains("Categories"));
    }

    #[test]
    fn truncate_shortens_long_labels() {
        assert_eq!(truncate("entertainment", 10), "entertai..");
        assert_eq!(truncate("tech", 10), "tech");
    }

    #[test]
    fn duration_formatting() {
        use std::time::Duration;
        assert_eq!(fmt_duration(Duration::from_secs(42)), "42s");
        assert_eq!(fmt_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(fmt_duration(Duration::from_secs(3700)), "1h 1m");
    }
}
