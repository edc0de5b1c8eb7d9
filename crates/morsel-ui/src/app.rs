//! Main application state and TUI event loop.
//!
//! [`App`] owns the theme, the artifact path, the region option list and the
//! latest aggregate. Every region change and manual reload re-reads the
//! artifact from disk and re-aggregates; nothing is cached between
//! interactions, so the view always reflects the artifact as last written.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame, Terminal,
};

use morsel_core::error::{Result, SalesError};
use morsel_core::models::{DailySales, RegionFilter, ARTIFACT_FILE_NAME, REGIONS};
use morsel_data::aggregator::SalesAggregator;
use morsel_data::combiner;

use crate::chart_view::{self, build_chart_data};
use crate::components::header::Header;
use crate::components::selector::RegionSelector;
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the interactive chart.
pub struct App {
    /// Active colour theme.
    theme: Theme,
    /// Path of the combined artifact this view reads from.
    artifact_path: PathBuf,
    /// Selector options: `all` plus the four named regions.
    options: Vec<String>,
    /// Index of the currently selected option.
    selected: usize,
    /// Aggregate for the current selection, rebuilt on every interaction.
    series: Vec<DailySales>,
    /// Set when the artifact could not be read; shown instead of the chart.
    load_error: Option<String>,
}

impl App {
    /// Construct the application and load the initial aggregate.
    pub fn new(theme_name: &str, artifact_path: PathBuf, initial_region: &str) -> Self {
        let options: Vec<String> = std::iter::once("all".to_string())
            .chain(REGIONS.iter().map(|r| r.to_string()))
            .collect();
        let selected = options
            .iter()
            .position(|o| o.eq_ignore_ascii_case(initial_region))
            .unwrap_or(0);

        let mut app = Self {
            theme: Theme::from_name(theme_name),
            artifact_path,
            options,
            selected,
            series: Vec::new(),
            load_error: None,
        };
        app.refresh();
        app
    }

    /// The filter for the currently selected option.
    pub fn current_filter(&self) -> RegionFilter {
        RegionFilter::from_name(&self.options[self.selected])
    }

    /// Re-read the artifact and re-aggregate for the current region.
    pub fn refresh(&mut self) {
        match combiner::load_artifact(&self.artifact_path) {
            Ok(records) => {
                self.series = SalesAggregator::aggregate_daily(&records, &self.current_filter());
                self.load_error = None;
            }
            Err(e) => {
                self.series.clear();
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Select the next region option (wrapping) and reload.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.options.len();
        self.refresh();
    }

    /// Select the previous region option (wrapping) and reload.
    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        self.refresh();
    }

    /// Jump to an option by index; out-of-range indices are ignored.
    pub fn select_index(&mut self, index: usize) {
        if index < self.options.len() && index != self.selected {
            self.selected = index;
            self.refresh();
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive chart until `q` / `Ctrl+C`.
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode().map_err(term_err)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(term_err)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(term_err)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(term_err(e));
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break Ok(());
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break Ok(()),
                        KeyCode::Left | KeyCode::Char('h') => self.select_prev(),
                        KeyCode::Right | KeyCode::Char('l') => self.select_next(),
                        KeyCode::Char('r') | KeyCode::Char('R') => self.refresh(),
                        KeyCode::Char(c @ '1'..='5') => {
                            self.select_index(c as usize - '1' as usize)
                        }
                        _ => {}
                    },
                    Ok(_) => {}
                    Err(e) => break Err(term_err(e)),
                },
                Ok(false) => {}
                Err(e) => break Err(term_err(e)),
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode().map_err(term_err)?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(term_err)?;
        terminal.show_cursor().map_err(term_err)?;

        result
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let [header_area, selector_area, body_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(8),
        ])
        .areas(frame.area());

        let header = Header::new(
            &self.options[self.selected],
            ARTIFACT_FILE_NAME,
            &self.theme,
        );
        frame.render_widget(Paragraph::new(header.to_lines(header_area.width)), header_area);

        let selector = RegionSelector::new(&self.options, self.selected, &self.theme);
        frame.render_widget(Paragraph::new(selector.to_line()), selector_area);

        if let Some(message) = &self.load_error {
            chart_view::render_no_data(
                frame,
                body_area,
                message,
                "Run `morsel-viz --view etl` to generate the artifact, then press 'r'.",
                &self.theme,
            );
        } else {
            // An empty aggregate still gets a chart: the price-increase
            // marker is shown regardless of data availability.
            let data = build_chart_data(&self.series, &self.current_filter());
            chart_view::render_chart_view(frame, body_area, &data, &self.theme);
        }
    }
}

/// Map a terminal-layer failure into the shared error type.
fn term_err(e: io::Error) -> SalesError {
    SalesError::Terminal(e.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
