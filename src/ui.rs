use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use shelter_queue::{
    Adopter, AdoptionCertificate, AdoptionChoice, AnimalRecord, ShelterRegistry, Species,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dogs,
    Cats,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Dogs => Page::Cats,
            Page::Cats => Page::Dogs,
        }
    }

    pub fn previous(&self) -> Self {
        // Two pages, so backwards is forwards
        self.next()
    }

    pub fn species(&self) -> Species {
        match self {
            Page::Dogs => Species::Dog,
            Page::Cats => Species::Cat,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Dogs => "Dogs",
            Page::Cats => "Cats",
        }
    }
}

pub struct App {
    pub registry: ShelterRegistry,
    pub adopter: Adopter,
    pub center_name: String,
    pub today: NaiveDate,
    pub current_page: Page,
    pub dog_state: TableState,
    pub cat_state: TableState,
    pub show_detail: bool,
    /// Detail panel shows the latest certificate until the user moves on
    pub show_certificate: bool,
    pub adoptions: Vec<AdoptionCertificate>,
    pub status: Option<String>,
}

impl App {
    pub fn new(
        registry: ShelterRegistry,
        adopter: Adopter,
        center_name: String,
        today: NaiveDate,
    ) -> Self {
        let mut dog_state = TableState::default();
        if registry.count(Species::Dog) > 0 {
            dog_state.select(Some(0));
        }

        let mut cat_state = TableState::default();
        if registry.count(Species::Cat) > 0 {
            cat_state.select(Some(0));
        }

        Self {
            registry,
            adopter,
            center_name,
            today,
            current_page: Page::Dogs,
            dog_state,
            cat_state,
            show_detail: false,
            show_certificate: false,
            adoptions: Vec::new(),
            status: None,
        }
    }

    fn page_len(&self) -> usize {
        self.registry.count(self.current_page.species())
    }

    fn state_mut(&mut self) -> &mut TableState {
        match self.current_page {
            Page::Dogs => &mut self.dog_state,
            Page::Cats => &mut self.cat_state,
        }
    }

    fn state(&self) -> &TableState {
        match self.current_page {
            Page::Dogs => &self.dog_state,
            Page::Cats => &self.cat_state,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
        if !self.show_detail {
            self.show_certificate = false;
        }
    }

    pub fn next_page(&mut self) {
        self.show_certificate = false;
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.show_certificate = false;
        self.current_page = self.current_page.previous();
    }

    pub fn selected_record(&self) -> Option<&AnimalRecord> {
        self.state()
            .selected()
            .and_then(|i| self.registry.records(self.current_page.species()).nth(i))
    }

    /// Release per `choice`, record the certificate and keep selections in range
    pub fn adopt(&mut self, choice: AdoptionChoice) {
        match choice.release(&mut self.registry) {
            Ok(record) => {
                self.status = Some(format!(
                    "{} adopted {} the {}!",
                    self.adopter.name,
                    record.name,
                    record.species().label()
                ));
                self.adoptions.push(AdoptionCertificate::new(
                    record,
                    self.adopter.clone(),
                    self.today,
                    self.center_name.clone(),
                ));
                self.show_detail = true;
                self.show_certificate = true;
            }
            Err(err) => {
                self.status = Some(format!("Sorry: {}", err));
            }
        }

        for (species, state) in [
            (Species::Dog, &mut self.dog_state),
            (Species::Cat, &mut self.cat_state),
        ] {
            let len = self.registry.count(species);
            let clamped = match state.selected() {
                _ if len == 0 => None,
                Some(i) if i >= len => Some(len - 1),
                Some(i) => Some(i),
                None => Some(0),
            };
            state.select(clamped);
        }
    }

    pub fn next(&mut self) {
        self.show_certificate = false;
        let len = self.page_len();
        if len == 0 {
            return;
        }
        let i = match self.state().selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state_mut().select(Some(i));
    }

    pub fn previous(&mut self) {
        self.show_certificate = false;
        let len = self.page_len();
        if len == 0 {
            return;
        }
        let i = match self.state().selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state_mut().select(Some(i));
    }

    pub fn page_down(&mut self) {
        self.show_certificate = false;
        let len = self.page_len();
        if len == 0 {
            return;
        }
        let i = match self.state().selected() {
            Some(i) => (i + 10).min(len - 1),
            None => 0,
        };
        self.state_mut().select(Some(i));
    }

    pub fn page_up(&mut self) {
        self.show_certificate = false;
        let len = self.page_len();
        if len == 0 {
            return;
        }
        let i = match self.state().selected() {
            Some(i) => i.saturating_sub(10),
            None => 0,
        };
        self.state_mut().select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

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
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::Char('a') => app.adopt(AdoptionChoice::OldestOverall),
                KeyCode::Char('o') => {
                    let species = app.current_page.species();
                    app.adopt(AdoptionChoice::OldestOf(species));
                }
                KeyCode::Char(c @ '1'..='3') => {
                    if let Some(choice) = AdoptionChoice::from_menu(&c.to_string()) {
                        app.adopt(choice);
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => {
                    if app.page_len() > 0 {
                        app.state_mut().select(Some(0));
                    }
                }
                KeyCode::End => {
                    let len = app.page_len();
                    if len > 0 {
                        app.state_mut().select(Some(len - 1));
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
            Constraint::Length(3), // Header with species tabs
            Constraint::Min(0),    // Listing
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_table(f, chunks[1], app);
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        format!(" {} ", app.center_name),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for page in [Page::Dogs, Page::Cats] {
        tab_spans.push(Span::raw(" │ "));

        let style = if page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(
            format!(
                "{} {} ({})",
                page.species().emoji(),
                page.title(),
                app.registry.count(page.species())
            ),
            style,
        ));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Adopted: {}", app.adoptions.len()),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let species = app.current_page.species();
    let today = app.today;

    let header_cells = ["", "Name", "Breed", "Age", "Sex", "Intake Date", "Days"]
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

    let listing = app.registry.listing_of(species);
    let rows: Vec<Row> = listing
        .entries
        .iter()
        .map(|entry| {
            let r = entry.record;
            let style = if entry.is_oldest {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };

            let cells = vec![
                Cell::from(if entry.is_oldest { "⭐" } else { "" }),
                Cell::from(truncate(&r.name, 18)),
                Cell::from(truncate(&r.breed, 22)),
                Cell::from(format!("{}", r.age)),
                Cell::from(r.sex.as_str()),
                Cell::from(r.intake_date().format("%Y-%m-%d").to_string()),
                Cell::from(format!("{}", r.days_sheltered(today))),
            ];

            Row::new(cells).style(style).height(1)
        })
        .collect();

    let title = format!(" {} {} in the shelter ", species.emoji(), app.current_page.title());

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(20),
            Constraint::Length(24),
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    let state = match app.current_page {
        Page::Dogs => &mut app.dog_state,
        Page::Cats => &mut app.cat_state,
    };
    f.render_stateful_widget(table, area, state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state().selected().map(|i| i + 1).unwrap_or(0);
    let total = app.page_len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(status) = &app.status {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(status.clone(), Style::default().fg(Color::Green)));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("a", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Adopt oldest | "));
    status_spans.push(Span::styled("o", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(format!(" Oldest {} | ", app.current_page.species().label())));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Species | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn label(name: &str) -> Span<'static> {
    Span::styled(
        format!("  {}: ", name),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    if let Some(certificate) = app.adoptions.last().filter(|_| app.show_certificate) {
        let lines: Vec<Line> = certificate
            .render()
            .lines()
            .map(|l| Line::from(format!(" {}", l)))
            .collect();

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(format!(
                    " Adoption Certificate ({} days waited) ",
                    certificate.days_waited()
                )),
        );
        f.render_widget(panel, area);
        return;
    }

    let record = match app.selected_record() {
        Some(r) => r,
        None => {
            let no_selection = Paragraph::new("No animal selected").block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Animal Details "),
            );
            f.render_widget(no_selection, area);
            return;
        }
    };

    let is_next = app
        .registry
        .peek_oldest_of_species(record.species())
        .map(|oldest| oldest.id() == record.id())
        .unwrap_or(false);

    let content = vec![
        Line::from(""),
        Line::from(vec![label("Name"), Span::raw(record.name.clone())]),
        Line::from(""),
        Line::from(vec![label("Species"), Span::raw(record.species().title())]),
        Line::from(""),
        Line::from(vec![label("Breed"), Span::raw(record.breed.clone())]),
        Line::from(""),
        Line::from(vec![label("Age"), Span::raw(format!("{} years", record.age))]),
        Line::from(""),
        Line::from(vec![label("Sex"), Span::raw(record.sex.as_str())]),
        Line::from(""),
        Line::from(vec![
            label("Intake Date"),
            Span::styled(
                record.intake_date().format("%Y-%m-%d").to_string(),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Waiting"),
            Span::raw(format!("{} days", record.days_sheltered(app.today))),
        ]),
        Line::from(""),
        Line::from(if is_next {
            Span::styled(
                "  ⭐ Next in line for adoption",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("")
        }),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to close",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let detail_panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Animal Details "),
    );

    f.render_widget(detail_panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use shelter_queue::Sex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app() -> App {
        let mut registry = ShelterRegistry::new();
        registry.admit(AnimalRecord::dog("Rex", "Beagle", 2, Sex::Male, date(2020, 1, 1)));
        registry.admit(AnimalRecord::dog("Fido", "Boxer", 5, Sex::Male, date(2019, 6, 1)));
        registry.admit(AnimalRecord::cat("Tom", "Siamese", 3, Sex::Male, date(2020, 1, 1)));
        App::new(
            registry,
            Adopter::new("Alice", "alice@example.com"),
            "Shelter".to_string(),
            date(2024, 6, 5),
        )
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();

        assert_eq!(app.selected_record().unwrap().name, "Rex");
        app.next();
        assert_eq!(app.selected_record().unwrap().name, "Fido");
        app.next();
        assert_eq!(app.selected_record().unwrap().name, "Rex");
        app.previous();
        assert_eq!(app.selected_record().unwrap().name, "Fido");
    }

    #[test]
    fn test_adopt_oldest_of_page_species() {
        let mut app = app();
        app.next();

        app.adopt(AdoptionChoice::OldestOf(Species::Dog));

        assert_eq!(app.adoptions.len(), 1);
        assert_eq!(app.adoptions[0].record.name, "Fido");
        // Selection clamped back into range
        assert_eq!(app.selected_record().unwrap().name, "Rex");
    }

    #[test]
    fn test_adopt_from_empty_species_sets_status() {
        let mut app = app();
        app.adopt(AdoptionChoice::OldestOf(Species::Cat));
        app.adopt(AdoptionChoice::OldestOf(Species::Cat));

        assert_eq!(app.adoptions.len(), 1);
        assert_eq!(app.status.as_deref(), Some("Sorry: no cats available for adoption"));
        assert_eq!(app.cat_state.selected(), None);
    }

    #[test]
    fn test_page_switch() {
        let mut app = app();
        app.next_page();

        assert_eq!(app.current_page, Page::Cats);
        assert_eq!(app.selected_record().unwrap().name, "Tom");
        app.previous_page();
        assert_eq!(app.current_page, Page::Dogs);
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_certificate_shown_after_adopt() {
        let mut app = app();
        app.adopt(AdoptionChoice::OldestOf(Species::Dog));

        let text = screen(&mut app);
        assert!(text.contains("Adoption Certificate (1831 days waited)"));
        assert!(!text.contains("Animal Details"));
    }

    #[test]
    fn test_reopened_detail_shows_selected_animal() {
        let mut app = app();
        app.adopt(AdoptionChoice::OldestOf(Species::Dog));
        app.toggle_detail();
        app.toggle_detail();

        let text = screen(&mut app);
        assert!(app.show_detail);
        assert!(text.contains("Animal Details"));
        assert!(!text.contains("Adoption Certificate"));
    }

    #[test]
    fn test_navigation_dismisses_certificate() {
        let mut app = app();
        app.adopt(AdoptionChoice::OldestOf(Species::Cat));
        assert!(app.show_certificate);

        app.next();
        assert!(!app.show_certificate);
        assert!(app.show_detail);
        assert!(screen(&mut app).contains("Animal Details"));
    }

    #[test]
    fn test_page_up_on_empty_page_keeps_no_selection() {
        let mut app = app();
        app.adopt(AdoptionChoice::OldestOf(Species::Cat));
        app.next_page();

        app.page_up();
        assert_eq!(app.cat_state.selected(), None);
        assert!(app.selected_record().is_none());
        app.page_down();
        assert_eq!(app.cat_state.selected(), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Labrador Retriever", 10), "Labrad...");
        assert_eq!(truncate("Pug", 10), "Pug");
    }
}
