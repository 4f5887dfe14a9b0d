// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod chart;

pub use chart::{BarLayout, format_compact_count, format_count, pie_bounds, pie_points};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap};
use std::io;
use std::time::{Duration, Instant};
use unidash_app::i18n::{TextId, text};
use unidash_app::{
    AppCommand, AppEvent, DashboardView, Dataset, Locale, PieChartSpec, SelectionState,
    ViewSnapshot, build_view,
};

const STATUS_TTL: Duration = Duration::from_secs(4);
const POLL_INTERVAL: Duration = Duration::from_millis(120);
const HEADER_HEIGHT: u16 = 4;
const FOOTER_HEIGHT: u16 = 4;
const CONTROLS_WIDTH: u16 = 32;
// Rows inside the controls panel above the first province option.
const OPTIONS_TOP: u16 = 2;
const LANGUAGE_ROW: u16 = 1;

const BAR_COLOR: Color = Color::Rgb(0x4a, 0x90, 0xe2);
const SELECTED_BAR_COLOR: Color = Color::Rgb(0x50, 0xe3, 0xc2);
const CURSOR_BAR_COLOR: Color = Color::Rgb(0xf5, 0xa6, 0x23);
const SLICE_COLORS: [Color; 3] = [
    Color::Rgb(0x4a, 0x90, 0xe2),
    Color::Rgb(0x50, 0xe3, 0xc2),
    Color::Rgb(0xf5, 0xa6, 0x23),
];

/// Screen regions of the most recent frame. Pointer events resolve against
/// this, never against state that changed after the frame was drawn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct FrameLayout {
    snapshot: ViewSnapshot,
    header: Rect,
    controls: Rect,
    bar_chart: Rect,
    pie_chart: Option<Rect>,
    footer: Rect,
    bars: BarLayout,
    options: Rect,
    language_row: Option<u16>,
    languages: Vec<(Locale, u16, u16)>,
}

impl FrameLayout {
    fn compute(area: Rect, view: &DashboardView, bar_cursor: usize) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CONTROLS_WIDTH), Constraint::Min(10)])
            .split(rows[1]);

        let (bar_chart, pie_chart) = if view.pie_chart.is_some() {
            let charts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(body[1]);
            (charts[0], Some(charts[1]))
        } else {
            (body[1], None)
        };

        let bars = BarLayout::new(framed().inner(bar_chart), view.snapshot.len(), bar_cursor);

        let controls_inner = framed().inner(body[0]);
        let options = if controls_inner.height > OPTIONS_TOP {
            Rect {
                y: controls_inner.y + OPTIONS_TOP,
                height: controls_inner.height - OPTIONS_TOP,
                ..controls_inner
            }
        } else {
            Rect::default()
        };

        let header_inner = framed().inner(rows[0]);
        let language_row =
            (header_inner.height > LANGUAGE_ROW).then_some(header_inner.y + LANGUAGE_ROW);
        let mut languages = Vec::new();
        let mut column = header_inner.x;
        for (locale, span) in language_spans(view) {
            let width = u16::try_from(span.width()).unwrap_or(u16::MAX);
            let end = column.saturating_add(width).min(header_inner.right());
            if let Some(locale) = locale {
                languages.push((locale, column, end));
            }
            column = end;
        }

        Self {
            snapshot: view.snapshot.clone(),
            header: rows[0],
            controls: body[0],
            bar_chart,
            pie_chart,
            footer: rows[2],
            bars,
            options,
            language_row,
            languages,
        }
    }

    fn option_at(&self, column: u16, row: u16) -> Option<usize> {
        contains(self.options, column, row).then(|| usize::from(row - self.options.y))
    }

    fn language_at(&self, column: u16, row: u16) -> Option<Locale> {
        if self.language_row != Some(row) {
            return None;
        }
        self.languages
            .iter()
            .find(|(_, start, end)| (*start..*end).contains(&column))
            .map(|(locale, _, _)| *locale)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ViewData {
    view: DashboardView,
    frame: FrameLayout,
    bar_cursor: usize,
    help_visible: bool,
    status_set_at: Option<Instant>,
}

impl ViewData {
    fn new(dataset: &Dataset, state: &SelectionState) -> Self {
        Self {
            view: build_view(dataset, state),
            frame: FrameLayout::default(),
            bar_cursor: 0,
            help_visible: false,
            status_set_at: None,
        }
    }

    fn rebuild(&mut self, dataset: &Dataset, state: &SelectionState) {
        self.view = build_view(dataset, state);
        self.bar_cursor = self
            .bar_cursor
            .min(self.view.snapshot.len().saturating_sub(1));
    }

    /// Must run with the final terminal size before every draw.
    fn relayout(&mut self, area: Rect) {
        self.frame = FrameLayout::compute(area, &self.view, self.bar_cursor);
    }
}

pub fn run_app(state: &mut SelectionState, dataset: &Dataset) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(error) = execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture) {
        restore_terminal().ok();
        return Err(error).context("enter alternate screen");
    }

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend)
        .context("create terminal")
        .and_then(|mut terminal| event_loop(&mut terminal, state, dataset));

    let restored = restore_terminal();
    result.and(restored)
}

fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode().context("disable raw mode");
    execute!(io::stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen)
        .context("leave alternate screen")?;
    raw
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut SelectionState,
    dataset: &Dataset,
) -> Result<()> {
    tracing::info!(
        records = dataset.len(),
        locale = state.locale.as_str(),
        province = state.province.as_str(),
        "dashboard opened"
    );
    let mut view_data = ViewData::new(dataset, state);

    loop {
        expire_status(state, dataset, &mut view_data, Instant::now());

        let size = terminal.size().context("read terminal size")?;
        view_data.relayout(Rect::new(0, 0, size.width, size.height));
        terminal
            .draw(|frame| render(frame, state, &view_data))
            .context("draw frame")?;

        if !event::poll(POLL_INTERVAL).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key_event(state, dataset, &mut view_data, key) {
                    break;
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(state, dataset, &mut view_data, mouse),
            _ => {}
        }
    }

    tracing::info!("dashboard closed");
    Ok(())
}

fn dispatch(
    state: &mut SelectionState,
    dataset: &Dataset,
    view_data: &mut ViewData,
    command: AppCommand,
) -> bool {
    let events = state.dispatch(dataset, command);
    if events.is_empty() {
        return false;
    }

    for event in &events {
        match event {
            AppEvent::ProvinceChanged(_) => view_data.bar_cursor = 0,
            AppEvent::StatusUpdated(_) => view_data.status_set_at = Some(Instant::now()),
            AppEvent::StatusCleared => view_data.status_set_at = None,
            AppEvent::DrillDownSelected(_)
            | AppEvent::DrillDownCleared
            | AppEvent::LocaleChanged(_) => {}
        }
    }
    view_data.rebuild(dataset, state);
    true
}

fn expire_status(
    state: &mut SelectionState,
    dataset: &Dataset,
    view_data: &mut ViewData,
    now: Instant,
) {
    if let Some(set_at) = view_data.status_set_at
        && now.saturating_duration_since(set_at) >= STATUS_TTL
    {
        dispatch(state, dataset, view_data, AppCommand::ClearStatus);
    }
}

/// Returns true when the app should exit.
fn handle_key_event(
    state: &mut SelectionState,
    dataset: &Dataset,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('q'));
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Char('j') | KeyCode::Down => move_province(state, dataset, view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_province(state, dataset, view_data, -1),
        KeyCode::Char('h') | KeyCode::Left => move_bar_cursor(view_data, -1),
        KeyCode::Char('l') | KeyCode::Right => move_bar_cursor(view_data, 1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if !view_data.view.snapshot.is_empty() {
                let command = AppCommand::SelectInSnapshot {
                    snapshot: view_data.view.snapshot.clone(),
                    index: view_data.bar_cursor,
                };
                dispatch(state, dataset, view_data, command);
            }
        }
        KeyCode::Char('L') => {
            dispatch(state, dataset, view_data, AppCommand::ToggleLocale);
        }
        KeyCode::Char('e') => {
            dispatch(state, dataset, view_data, AppCommand::SetLocale(Locale::En));
        }
        KeyCode::Char('f') => {
            dispatch(state, dataset, view_data, AppCommand::SetLocale(Locale::Fr));
        }
        _ => {}
    }
    false
}

fn move_province(
    state: &mut SelectionState,
    dataset: &Dataset,
    view_data: &mut ViewData,
    delta: isize,
) {
    let options = &view_data.view.options;
    let Some(last) = options.len().checked_sub(1) else {
        return;
    };
    let current = view_data.view.selected_option_index();
    let next = match current {
        Some(index) => index.saturating_add_signed(delta).min(last),
        None => 0,
    };
    if current == Some(next) {
        return;
    }
    let filter = options[next].filter();
    dispatch(state, dataset, view_data, AppCommand::SetProvince(filter));
}

fn move_bar_cursor(view_data: &mut ViewData, delta: isize) {
    let last = view_data.view.snapshot.len().saturating_sub(1);
    view_data.bar_cursor = view_data.bar_cursor.saturating_add_signed(delta).min(last);
}

fn handle_mouse_event(
    state: &mut SelectionState,
    dataset: &Dataset,
    view_data: &mut ViewData,
    mouse: MouseEvent,
) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    if view_data.help_visible {
        view_data.help_visible = false;
        return;
    }

    let (column, row) = (mouse.column, mouse.row);
    if let Some(index) = view_data.frame.bars.hit_test(column, row) {
        tracing::debug!(column, row, index, "bar clicked");
        let command = AppCommand::SelectInSnapshot {
            snapshot: view_data.frame.snapshot.clone(),
            index,
        };
        if dispatch(state, dataset, view_data, command) {
            view_data.bar_cursor = index;
        }
        return;
    }

    if let Some(index) = view_data.frame.option_at(column, row) {
        if let Some(option) = view_data.view.options.get(index)
            && !option.selected
        {
            let filter = option.filter();
            dispatch(state, dataset, view_data, AppCommand::SetProvince(filter));
        }
        return;
    }

    if let Some(locale) = view_data.frame.language_at(column, row)
        && locale != state.locale
    {
        dispatch(state, dataset, view_data, AppCommand::SetLocale(locale));
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &SelectionState, view_data: &ViewData) {
    let layout = &view_data.frame;
    let view = &view_data.view;

    render_header(frame, layout.header, view);
    render_controls(frame, layout.controls, view);
    render_bar_chart(frame, state, view_data);
    if let (Some(area), Some(pie)) = (layout.pie_chart, view.pie_chart.as_ref()) {
        render_pie_chart(frame, area, pie);
    }
    render_footer(frame, layout.footer, state, view_data);

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(text(view.locale, TextId::HelpBody))
            .wrap(Wrap { trim: false })
            .block(framed().title(text(view.locale, TextId::HelpTitle)));
        frame.render_widget(help, area);
    }
}

fn framed<'a>() -> Block<'a> {
    Block::default().borders(Borders::ALL)
}

fn language_spans(view: &DashboardView) -> Vec<(Option<Locale>, Span<'static>)> {
    let mut spans = vec![(
        None,
        Span::raw(format!("{}: ", text(view.locale, TextId::LanguageLabel))),
    )];
    for (index, locale) in Locale::ALL.iter().enumerate() {
        if index > 0 {
            spans.push((None, Span::raw("  ")));
        }
        let style = if *locale == view.locale {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push((Some(*locale), Span::styled(locale.native_name(), style)));
    }
    spans
}

fn render_header(frame: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
    let languages = language_spans(view)
        .into_iter()
        .map(|(_, span)| span)
        .collect::<Vec<_>>();
    let header = Paragraph::new(vec![Line::from(view.subtitle.clone()), Line::from(languages)])
        .block(
            framed().title(Span::styled(
                view.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        );
    frame.render_widget(header, area);
}

fn render_controls(frame: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
    let mut lines = vec![
        Line::from(Span::styled(
            view.province_label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    for option in &view.options {
        let line = if option.selected {
            Line::from(Span::styled(
                format!("> {}", option.label),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(format!("  {}", option.label))
        };
        lines.push(line);
    }
    let controls = Paragraph::new(lines).block(framed().title(view.controls_title.clone()));
    frame.render_widget(controls, area);
}

fn render_bar_chart(frame: &mut ratatui::Frame<'_>, state: &SelectionState, view_data: &ViewData) {
    let view = &view_data.view;
    let layout = &view_data.frame;
    let block = framed()
        .title(view.bar_chart.title.clone())
        .title_top(Line::from(view.bar_chart.series_label.clone()).right_aligned())
        .title_bottom(view.instruction.clone());
    frame.render_widget(block, layout.bar_chart);

    if layout.bars.visible == 0 {
        return;
    }

    let selected = state.drill_down.as_ref().and_then(|record| {
        view.snapshot
            .records
            .iter()
            .position(|candidate| candidate == record)
    });
    let bars = layout
        .bars
        .visible_range()
        .filter_map(|index| view.bar_chart.bars.get(index).map(|spec| (index, spec)))
        .map(|(index, spec)| {
            let color = if index == view_data.bar_cursor {
                CURSOR_BAR_COLOR
            } else if Some(index) == selected {
                SELECTED_BAR_COLOR
            } else {
                BAR_COLOR
            };
            Bar::default()
                .value(spec.value)
                .label(Line::from(spec.label.clone()))
                .text_value(format_compact_count(spec.value))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect::<Vec<_>>();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(layout.bars.bar_width)
        .bar_gap(layout.bars.bar_gap)
        .max(view.bar_chart.max_value().max(1));
    frame.render_widget(chart, layout.bars.plot);
}

fn render_pie_chart(frame: &mut ratatui::Frame<'_>, area: Rect, pie: &PieChartSpec) {
    let block = framed().title(pie.title.clone());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    let plot = halves[0];

    let (x_bounds, y_bounds) = pie_bounds(plot.width, plot.height);
    let slices = pie_points(&pie.values(), plot.width, plot.height);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for (coords, color) in slices.iter().zip(SLICE_COLORS) {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color,
                });
            }
        });
    frame.render_widget(canvas, plot);

    let total = pie.total();
    let legend = pie
        .slices
        .iter()
        .zip(SLICE_COLORS)
        .map(|(slice, color)| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::raw(format!(
                    "{}  {}  ({:.1}%)",
                    slice.label,
                    format_count(u64::from(slice.value)),
                    slice.share(total)
                )),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(legend), halves[1]);
}

fn render_footer(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &SelectionState,
    view_data: &ViewData,
) {
    let lines = vec![
        Line::from(Span::styled(
            status_text(state, view_data),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            view_data.view.footer.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(framed()), area);
}

fn status_text(state: &SelectionState, view_data: &ViewData) -> String {
    // The help overlay suppresses the status and key hints.
    if view_data.help_visible {
        return String::new();
    }

    let hints = text(state.locale, TextId::KeyHints);
    match &state.status_line {
        Some(status) => format!("{status} | {hints}"),
        None => hints.to_owned(),
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.left() && column < rect.right() && row >= rect.top() && row < rect.bottom()
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
