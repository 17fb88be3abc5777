use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use party_leaders::chart::{ChartSpec, TITLE};
use party_leaders::summary::{party_summaries, PartySummary};
use party_leaders::{Party, PartyLeader};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Chart,
    Summary,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Chart => Page::Summary,
            Page::Summary => Page::Chart,
        }
    }

    pub fn previous(&self) -> Self {
        // Two pages: previous == next
        self.next()
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Chart => "Diagram",
            Page::Summary => "Sammanfattning",
        }
    }
}

pub struct App {
    pub leaders: Vec<PartyLeader>,
    pub summaries: Vec<PartySummary>,
    /// Indices into `leaders` that pass the party filter
    pub visible: Vec<usize>,
    /// Position in `visible`
    pub selected: Option<usize>,
    pub party_filter: Option<Party>,
    /// Chart of the visible leaders, rebuilt when the filter changes
    pub chart: ChartSpec,
    pub current_page: Page,
    pub summary_state: TableState,
    pub show_detail: bool,
}

impl App {
    pub fn new(leaders: Vec<PartyLeader>) -> Self {
        let summaries = party_summaries(&leaders);

        let mut summary_state = TableState::default();
        if !summaries.is_empty() {
            summary_state.select(Some(0));
        }

        let mut app = Self {
            leaders,
            summaries,
            visible: Vec::new(),
            selected: None,
            party_filter: None,
            chart: ChartSpec::from_leaders(std::iter::empty()),
            current_page: Page::Chart,
            summary_state,
            show_detail: true,
        };
        app.apply_filter(None);
        app
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_leader(&self) -> Option<&PartyLeader> {
        self.selected
            .and_then(|i| self.visible.get(i))
            .map(|&idx| &self.leaders[idx])
    }

    pub fn apply_filter(&mut self, filter: Option<Party>) {
        self.party_filter = filter;
        self.visible = self
            .leaders
            .iter()
            .enumerate()
            .filter(|(_, l)| filter.map_or(true, |p| l.party_abr == p))
            .map(|(i, _)| i)
            .collect();
        self.chart = ChartSpec::from_leaders(self.visible.iter().map(|&i| &self.leaders[i]));

        // Reset selection to first point
        self.selected = if self.visible.is_empty() { None } else { Some(0) };
    }

    /// Step the filter: all → V → S → … → Sd → all, skipping absent parties
    pub fn cycle_filter(&mut self) {
        let present: Vec<Party> = self.summaries.iter().map(|s| s.party).collect();
        let next = match self.party_filter {
            None => present.first().copied(),
            Some(current) => present.iter().copied().find(|p| *p > current),
        };
        self.apply_filter(next);
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(None);
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn next(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.selected = Some(i);
    }

    pub fn previous(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
    }

    pub fn next_summary(&mut self) {
        let len = self.summaries.len();
        if len == 0 {
            return;
        }
        let i = self.summary_state.selected().map_or(0, |i| (i + 1) % len);
        self.summary_state.select(Some(i));
    }

    pub fn previous_summary(&mut self) {
        let len = self.summaries.len();
        if len == 0 {
            return;
        }
        let i = self
            .summary_state
            .selected()
            .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
        self.summary_state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Char('p') => app.cycle_filter(),
                KeyCode::Char('c') => app.clear_filter(),
                KeyCode::Right | KeyCode::Char('l') if app.current_page == Page::Chart => app.next(),
                KeyCode::Left | KeyCode::Char('h') if app.current_page == Page::Chart => {
                    app.previous()
                }
                KeyCode::Down | KeyCode::Char('j') if app.current_page == Page::Summary => {
                    app.next_summary()
                }
                KeyCode::Up | KeyCode::Char('k') if app.current_page == Page::Summary => {
                    app.previous_summary()
                }
                KeyCode::Home => {
                    if !app.visible.is_empty() {
                        app.selected = Some(0);
                    }
                }
                KeyCode::End => {
                    if !app.visible.is_empty() {
                        app.selected = Some(app.visible.len() - 1);
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Chart if app.show_detail => {
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(70), // Chart
                    Constraint::Percentage(30), // Detail panel
                ])
                .split(chunks[1]);

            render_chart(f, content_chunks[0], app);
            render_detail_panel(f, content_chunks[1], app);
        }
        Page::Chart => render_chart(f, chunks[1], app),
        Page::Summary => render_summary(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn party_color(party: Party) -> Color {
    let (r, g, b) = party.color_rgb();
    Color::Rgb(r, g, b)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in [Page::Chart, Page::Summary].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Partiledare: {}", app.leaders.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("I ämbetet: {}", app.leaders.iter().filter(|l| l.is_in_office()).count()),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", TITLE)),
    );

    f.render_widget(header, area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let spec = &app.chart;
    let ([x_min, x_max], [y_min, y_max]) = spec.bounds();

    // Point buffers must outlive the datasets that borrow them
    let series_points: Vec<(Party, Vec<(f64, f64)>)> = spec
        .series
        .iter()
        .map(|s| (s.party, s.points.iter().map(|p| (p.x, p.y)).collect()))
        .collect();
    let selected_point: Vec<(f64, f64)> = app.selected_leader().map(|l| l.point()).into_iter().collect();

    let mut datasets: Vec<Dataset> = series_points
        .iter()
        .map(|(party, points)| {
            Dataset::default()
                .name(party.code())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(party_color(*party)))
                .data(points)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .name("▶")
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .data(&selected_point),
    );

    let x_labels = axis_labels(x_min, x_max);
    let y_labels = axis_labels(y_min, y_max);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", spec.legend_title)),
        )
        .x_axis(
            Axis::default()
                .title(spec.x_label)
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_label)
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn axis_labels(min: f64, max: f64) -> Vec<Span<'static>> {
    let mid = (min + max) / 2.0;
    [min, mid, max]
        .iter()
        .map(|v| Span::styled(format!("{:.0}", v), Style::default().fg(Color::DarkGray)))
        .collect()
}

fn render_summary(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Parti", "Ledare", "Snittålder", "Snitt år", "Längst i ämbetet"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.summaries.iter().map(|s| {
        let color = party_color(s.party);
        let cells = vec![
            Cell::from(format!("{} {}", s.party.code(), s.party.name()))
                .style(Style::default().fg(color)),
            Cell::from(format!("{}", s.leaders)),
            Cell::from(format!("{:.1}", s.mean_age_when_assumed_office)),
            Cell::from(format!("{:.2}", s.mean_years_in_office)),
            Cell::from(s.longest_serving.clone()),
        ];
        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Min(30),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Sammanfattning per parti "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.summary_state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Partiledare ");

    let leader = match app.selected_leader() {
        Some(l) => l,
        None => {
            f.render_widget(Paragraph::new("Ingen markerad").block(block), area);
            return;
        }
    };

    let label = |text: &'static str| {
        Span::styled(text, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    };
    let death = if leader.is_alive() {
        "-".to_string()
    } else {
        leader.death_date.date.to_string()
    };
    let left = if leader.is_in_office() {
        "i ämbetet".to_string()
    } else {
        leader.left_office.date.to_string()
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", leader.hover_label()),
            Style::default()
                .fg(party_color(leader.party_abr))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![label("  Parti: "), Span::raw(leader.party_abr.name())]),
        Line::from(vec![label("  Född: "), Span::raw(leader.birth_date.to_string())]),
        Line::from(vec![label("  Död: "), Span::raw(death)]),
        Line::from(vec![
            label("  Tillträdde: "),
            Span::raw(leader.assumed_office.date.to_string()),
        ]),
        Line::from(vec![label("  Avgick: "), Span::raw(left)]),
        Line::from(""),
        Line::from(vec![
            label("  Ålder vid tillträde: "),
            Span::raw(leader.age_when_assumed_office.to_string()),
        ]),
        Line::from(vec![
            label("  Antal år i ämbetet: "),
            Span::raw(format!("{:.2}", leader.years_in_office)),
        ]),
    ];

    let detail_panel = Paragraph::new(content)
        .alignment(Alignment::Left)
        .block(block);

    f.render_widget(detail_panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.selected.map(|i| i + 1).unwrap_or(0);
    let total = app.visible.len();

    let mut status_spans = vec![Span::styled(
        format!(" Punkt: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(party) = app.party_filter {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Filter: {}", party.code()),
            Style::default().fg(party_color(party)),
        ));
        status_spans.push(Span::raw(" ("));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" rensa)"));
    }

    status_spans.push(Span::raw(" | "));
    for (key, text, color) in [
        ("←/→", " Punkt | ", Color::Yellow),
        ("p", " Parti | ", Color::Yellow),
        ("Enter", " Detaljer | ", Color::Yellow),
        ("Tab", " Sida | ", Color::Yellow),
        ("q", " Avsluta", Color::Red),
    ] {
        status_spans.push(Span::styled(key, Style::default().fg(color)));
        status_spans.push(Span::raw(text));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use party_leaders::pipeline::prepare;
    use party_leaders::RawLeaderRow;

    fn app() -> App {
        let row = |name: &str, party: &str| RawLeaderRow {
            name: name.to_string(),
            surname: "Test".to_string(),
            sex: "m".to_string(),
            party_abr: party.to_string(),
            birth_date: "1950-01-01".to_string(),
            death_date: None,
            assumed_office: Some("1990-01-01".to_string()),
            left_office: Some("1995-01-01".to_string()),
        };
        let leaders = prepare(
            vec![row("Mona", "M"), row("Vera", "V"), row("Sara", "S"), row("Sven", "S")],
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
        )
        .unwrap();
        App::new(leaders)
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = app();
        assert_eq!(app.selected_leader().unwrap().name, "Vera");
        app.previous();
        assert_eq!(app.selected_leader().unwrap().name, "Mona");
        app.next();
        assert_eq!(app.selected_leader().unwrap().name, "Vera");
    }

    #[test]
    fn test_cycle_filter_skips_absent_parties() {
        let mut app = app();
        app.cycle_filter();
        assert_eq!(app.party_filter, Some(Party::V));
        app.cycle_filter();
        assert_eq!(app.party_filter, Some(Party::S));
        assert_eq!(app.visible.len(), 2);
        app.cycle_filter();
        assert_eq!(app.party_filter, Some(Party::M));
        app.cycle_filter();
        assert_eq!(app.party_filter, None);
        assert_eq!(app.visible.len(), 4);
    }

    #[test]
    fn test_chart_follows_filter() {
        let mut app = app();
        assert_eq!(app.chart.point_count(), 4);
        assert_eq!(app.chart.series.len(), 3);

        app.apply_filter(Some(Party::S));
        assert_eq!(app.chart.point_count(), 2);
        assert_eq!(app.chart.series.len(), 1);
        assert_eq!(app.chart.series[0].party, Party::S);

        app.clear_filter();
        assert_eq!(app.chart.point_count(), 4);
    }

    #[test]
    fn test_summary_navigation() {
        let mut app = app();
        assert_eq!(app.summary_state.selected(), Some(0));
        app.previous_summary();
        assert_eq!(app.summary_state.selected(), Some(2));
        app.next_summary();
        assert_eq!(app.summary_state.selected(), Some(0));
    }
}
