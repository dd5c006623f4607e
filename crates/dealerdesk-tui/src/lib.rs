// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use dealerdesk_app::{
    ColumnAffordances, ColumnKey, ColumnSelectCommand, ColumnSelectEvent, ColumnSelectState,
    Direction, ListSide, ReportColumn, ReportService, UserId,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const KEY_HINTS: &str =
    "tab pane | j/k focus | enter transfer | K/J g/G order | 1-4 data set | esc clear | q quit";

/// Data source and sink behind the column selector.
pub trait AppRuntime {
    fn load_report_columns(
        &mut self,
        service: ReportService,
        user: &UserId,
    ) -> Result<Vec<ReportColumn>>;
    /// Receives the full selected order after every change.
    fn store_report_columns(&mut self, columns: &[ReportColumn]) -> Result<()>;
    /// Called once when the UI exits.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewData {
    pane: ListSide,
    rows: [usize; 2],
    status: Option<String>,
    status_token: u64,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            pane: ListSide::Available,
            rows: [0; 2],
            status: None,
            status_token: 0,
        }
    }
}

impl ViewData {
    fn row(&self, side: ListSide) -> usize {
        self.rows[pane_index(side)]
    }

    fn set_row(&mut self, side: ListSide, row: usize) {
        self.rows[pane_index(side)] = row;
    }
}

const fn pane_index(side: ListSide) -> usize {
    match side {
        ListSide::Available => 0,
        ListSide::Selected => 1,
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut ColumnSelectState,
    runtime: &mut R,
    user: &UserId,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    if state.is_locked() {
        emit_status(
            &mut view_data,
            &internal_tx,
            "default report: columns are read-only",
        );
    }

    let mut result = Ok(());
    loop {
        process_internal_events(&mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, user, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    let flushed = runtime.flush().context("save final column selection");
    result.and(flushed)
}

fn process_internal_events(view_data: &mut ViewData, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                view_data.status = None;
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view_data.status = Some(message.into());
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Returns true when the UI should exit.
fn handle_key_event<R: AppRuntime>(
    state: &mut ColumnSelectState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    user: &UserId,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'));
    }

    let events = match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab | KeyCode::BackTab => {
            view_data.pane = view_data.pane.opposite();
            focus_row(state, view_data, 0)
        }
        KeyCode::Down | KeyCode::Char('j') => focus_row(state, view_data, 1),
        KeyCode::Up | KeyCode::Char('k') => focus_row(state, view_data, -1),
        KeyCode::Enter => match row_key(state, view_data) {
            Some(key) => state.dispatch(ColumnSelectCommand::DoubleClick(key)),
            None => Vec::new(),
        },
        KeyCode::Char('K') => reorder(state, view_data, Direction::Up),
        KeyCode::Char('J') => reorder(state, view_data, Direction::Down),
        KeyCode::Char('g') => reorder(state, view_data, Direction::Top),
        KeyCode::Char('G') => reorder(state, view_data, Direction::Bottom),
        KeyCode::Right | KeyCode::Char('l') => state.dispatch(ColumnSelectCommand::MoveRight),
        KeyCode::Left | KeyCode::Char('h') => state.dispatch(ColumnSelectCommand::MoveLeft),
        KeyCode::Char('L') => state.dispatch(ColumnSelectCommand::MoveAllRight),
        KeyCode::Char('H') => state.dispatch(ColumnSelectCommand::MoveAllLeft),
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit as usize - '1' as usize;
            state.dispatch(ColumnSelectCommand::SelectDataSet(ReportService::ALL[index]))
        }
        KeyCode::Esc => state.dispatch(ColumnSelectCommand::ClearFocus),
        _ => Vec::new(),
    };

    apply_events(state, runtime, view_data, internal_tx, user, events);
    false
}

fn apply_events<R: AppRuntime>(
    state: &mut ColumnSelectState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    user: &UserId,
    events: Vec<ColumnSelectEvent>,
) {
    let mut queue = events;
    while !queue.is_empty() {
        let mut follow_up = Vec::new();
        for event in queue {
            match event {
                ColumnSelectEvent::SelectionChanged(columns) => {
                    if let Err(error) = runtime.store_report_columns(&columns) {
                        warn!(error = %error, "storing column selection failed");
                        emit_status(view_data, internal_tx, format!("save failed: {error:#}"));
                    }
                }
                ColumnSelectEvent::DataSetChanged(service) => {
                    match runtime.load_report_columns(service, user) {
                        Ok(columns) => {
                            follow_up.extend(state.dispatch(ColumnSelectCommand::ApplyAvailable {
                                service,
                                columns,
                            }));
                        }
                        Err(error) => emit_status(
                            view_data,
                            internal_tx,
                            format!("load {} columns failed: {error:#}", service.label()),
                        ),
                    }
                }
                ColumnSelectEvent::Rejected(message) => {
                    debug!(%message, "column command rejected");
                    emit_status(view_data, internal_tx, message);
                }
                ColumnSelectEvent::AvailableChanged(_) | ColumnSelectEvent::FocusChanged(_) => {}
            }
        }
        queue = follow_up;
    }
    sync_rows(state, view_data);
}

/// Moves focus in the active pane by `delta` rows.
fn focus_row(
    state: &mut ColumnSelectState,
    view_data: &mut ViewData,
    delta: isize,
) -> Vec<ColumnSelectEvent> {
    let pane = view_data.pane;
    let list = state.lists().list(pane);
    if list.is_empty() {
        return state.dispatch(ColumnSelectCommand::ClearFocus);
    }

    // Without focus in this pane the first press lands on the marker row.
    let next = match state.lists().cursor_position() {
        Some((side, index)) if side == pane => index.saturating_add_signed(delta),
        _ => view_data.row(pane),
    }
    .min(list.len() - 1);
    let key = list[next].data.clone();
    view_data.set_row(pane, next);
    state.dispatch(ColumnSelectCommand::Focus(key))
}

fn row_key(state: &ColumnSelectState, view_data: &ViewData) -> Option<ColumnKey> {
    if let Some(item) = state.lists().cursor_item() {
        return Some(item.data.clone());
    }
    state
        .lists()
        .list(view_data.pane)
        .get(view_data.row(view_data.pane))
        .map(|column| column.data.clone())
}

fn reorder(
    state: &mut ColumnSelectState,
    view_data: &ViewData,
    direction: Direction,
) -> Vec<ColumnSelectEvent> {
    let side = state
        .lists()
        .cursor_position()
        .map_or(view_data.pane, |(side, _)| side);
    state.dispatch(ColumnSelectCommand::Reorder(side, direction))
}

fn sync_rows(state: &ColumnSelectState, view_data: &mut ViewData) {
    if let Some((side, index)) = state.lists().cursor_position() {
        view_data.pane = side;
        view_data.set_row(side, index);
    }
    for side in [ListSide::Available, ListSide::Selected] {
        let len = state.lists().list(side).len();
        let row = view_data.row(side).min(len.saturating_sub(1));
        view_data.set_row(side, row);
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &ColumnSelectState, view_data: &ViewData) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    let selected_tab = state
        .data_set()
        .and_then(|service| ReportService::ALL.iter().position(|item| *item == service));
    let titles = ReportService::ALL
        .iter()
        .enumerate()
        .map(|(index, service)| format!("{} {}", index + 1, service.label()))
        .collect::<Vec<_>>();
    let affordances = state.affordances();
    let mut tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(report_title(state))
                .borders(Borders::ALL),
        )
        .style(enabled_style(affordances.data_set))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    if let Some(index) = selected_tab {
        tabs = tabs.select(index);
    }
    frame.render_widget(tabs, header);

    let [available, controls, selected] = Layout::horizontal([
        Constraint::Percentage(42),
        Constraint::Length(18),
        Constraint::Percentage(42),
    ])
    .areas(body);
    render_list(frame, available, state, view_data, ListSide::Available);
    render_controls(frame, controls, affordances, view_data.pane);
    render_list(frame, selected, state, view_data, ListSide::Selected);

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, footer);
}

fn render_list(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &ColumnSelectState,
    view_data: &ViewData,
    side: ListSide,
) {
    let focus = state.focus();
    let lines = state
        .lists()
        .list(side)
        .iter()
        .map(|column| {
            let style = if focus == Some(&column.data) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::styled(list_row_text(column, focus), style)
        })
        .collect::<Vec<_>>();

    let border = if view_data.pane == side {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let title = format!("{} ({})", side.label(), state.lists().list(side).len());
    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(widget, area);
}

fn render_controls(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    affordances: ColumnAffordances,
    pane: ListSide,
) {
    let lines = control_hints(affordances, pane)
        .into_iter()
        .map(|(label, enabled)| Line::from(Span::styled(label, enabled_style(enabled))))
        .collect::<Vec<_>>();
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn enabled_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }
}

/// Control labels for the middle column and whether each is usable.
fn control_hints(affordances: ColumnAffordances, pane: ListSide) -> Vec<(&'static str, bool)> {
    let reorder = affordances.reorder(pane);
    vec![
        ("l  move right", affordances.move_right),
        ("L  all right", affordances.move_all_right),
        ("h  move left", affordances.move_left),
        ("H  all left", affordances.move_all_left),
        ("", false),
        ("g  top", reorder.top),
        ("K  up", reorder.up),
        ("J  down", reorder.down),
        ("G  bottom", reorder.bottom),
    ]
}

fn list_row_text(column: &ReportColumn, focus: Option<&ColumnKey>) -> String {
    let marker = if focus == Some(&column.data) { ">" } else { " " };
    format!("{marker} {}", column.name)
}

fn report_title(state: &ColumnSelectState) -> String {
    match state.report() {
        Some(report) if report.is_default => format!("{} [read-only]", report.name),
        Some(report) => report.name.clone(),
        None => "dealerdesk".to_owned(),
    }
}

fn status_text(state: &ColumnSelectState, view_data: &ViewData) -> String {
    let data_set = state
        .data_set()
        .map_or("no data set", |service| service.label());
    match &view_data.status {
        Some(status) => format!("{data_set} | {status} | {KEY_HINTS}"),
        None => format!("{data_set} | {KEY_HINTS}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, InternalEvent, ViewData, control_hints, handle_key_event, list_row_text,
        process_internal_events, report_title, status_text,
    };
    use anyhow::{Result, bail};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use dealerdesk_app::{
        ColumnKey, ColumnSelectCommand, ColumnSelectState, ListSide, ReportColumn,
        ReportDefinition, ReportId, ReportService, UserId,
    };
    use dealerdesk_testkit::DealerFaker;
    use std::sync::mpsc;

    #[derive(Debug, Default)]
    struct TestRuntime {
        fail_loads: bool,
        fail_stores: bool,
        loads: Vec<(ReportService, UserId)>,
        stored: Vec<Vec<ReportColumn>>,
    }

    impl AppRuntime for TestRuntime {
        fn load_report_columns(
            &mut self,
            service: ReportService,
            user: &UserId,
        ) -> Result<Vec<ReportColumn>> {
            self.loads.push((service, user.clone()));
            if self.fail_loads {
                bail!("connection refused");
            }
            Ok(DealerFaker::new(1).report_columns(service))
        }

        fn store_report_columns(&mut self, columns: &[ReportColumn]) -> Result<()> {
            if self.fail_stores {
                bail!("service unavailable");
            }
            self.stored.push(columns.to_vec());
            Ok(())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn user() -> UserId {
        UserId::new("u-1")
    }

    fn report(is_default: bool, keys: &[&str]) -> ReportDefinition {
        ReportDefinition {
            id: ReportId::new("r-1"),
            name: "Lot Walk".to_owned(),
            is_default,
            columns: keys
                .iter()
                .map(|key| ReportColumn::new(key.to_uppercase(), *key))
                .collect(),
        }
    }

    fn loaded(is_default: bool, keys: &[&str]) -> ColumnSelectState {
        let mut state = ColumnSelectState::default();
        state.dispatch(ColumnSelectCommand::LoadReport(report(is_default, keys)));
        state
    }

    fn press_all(
        state: &mut ColumnSelectState,
        runtime: &mut TestRuntime,
        view_data: &mut ViewData,
        keys: &[KeyCode],
    ) {
        let (tx, _rx) = mpsc::channel();
        for code in keys {
            let quit = handle_key_event(state, runtime, view_data, &tx, &user(), key(*code));
            assert!(!quit, "{code:?} should not quit");
        }
    }

    fn selected_keys(state: &ColumnSelectState) -> Vec<&str> {
        state
            .selected()
            .iter()
            .map(|column| column.data.as_str())
            .collect()
    }

    #[test]
    fn digit_key_loads_data_set_columns() {
        let mut state = loaded(false, &["VIN"]);
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();

        press_all(&mut state, &mut runtime, &mut view_data, &[KeyCode::Char('1')]);
        assert_eq!(state.data_set(), Some(ReportService::Inventory));
        assert_eq!(runtime.loads, vec![(ReportService::Inventory, user())]);
        assert_eq!(state.available().len(), 11);
        assert!(state.available().iter().all(|column| column.data.as_str() != "VIN"));

        press_all(&mut state, &mut runtime, &mut view_data, &[KeyCode::Char('1')]);
        assert_eq!(runtime.loads.len(), 1);
    }

    #[test]
    fn focus_and_move_right_stores_new_selection() {
        let mut state = loaded(false, &["VIN"]);
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();

        press_all(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[KeyCode::Char('1'), KeyCode::Char('j'), KeyCode::Char('j')],
        );
        assert_eq!(state.focus(), Some(&ColumnKey::new("Year")));

        press_all(&mut state, &mut runtime, &mut view_data, &[KeyCode::Char('l')]);
        assert_eq!(selected_keys(&state), vec!["VIN", "Year"]);
        assert_eq!(state.focus(), None);
        assert_eq!(runtime.stored.last(), Some(&state.selected().to_vec()));
    }

    #[test]
    fn enter_transfers_row_under_marker() {
        let mut state = loaded(false, &[]);
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();

        press_all(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[KeyCode::Char('2'), KeyCode::Enter],
        );
        assert_eq!(selected_keys(&state), vec!["firstName"]);
        assert_eq!(runtime.stored.len(), 1);
    }

    #[test]
    fn reorder_keys_work_in_selected_pane() {
        let mut state = loaded(false, &["x", "y", "z"]);
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();

        press_all(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[KeyCode::Tab, KeyCode::Char('G'), KeyCode::Char('g')],
        );
        assert_eq!(view_data.pane, ListSide::Selected);
        assert_eq!(state.focus(), Some(&ColumnKey::new("x")));
        assert_eq!(selected_keys(&state), vec!["x", "y", "z"]);
        assert_eq!(runtime.stored.len(), 2);

        press_all(&mut state, &mut runtime, &mut view_data, &[KeyCode::Char('J')]);
        assert_eq!(selected_keys(&state), vec!["y", "x", "z"]);
        assert_eq!(view_data.rows[1], 1);
    }

    #[test]
    fn move_all_right_then_left() {
        let mut state = loaded(false, &["Deal#"]);
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();

        press_all(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[KeyCode::Char('3'), KeyCode::Char('L')],
        );
        assert!(state.available().is_empty());
        assert_eq!(state.selected().len(), 10);

        press_all(&mut state, &mut runtime, &mut view_data, &[KeyCode::Char('H')]);
        assert!(state.selected().is_empty());
        assert_eq!(runtime.stored.last().map(Vec::len), Some(0));
    }

    #[test]
    fn load_failure_becomes_status_message() {
        let mut state = loaded(false, &[]);
        let mut runtime = TestRuntime {
            fail_loads: true,
            ..TestRuntime::default()
        };
        let mut view_data = ViewData::default();

        press_all(&mut state, &mut runtime, &mut view_data, &[KeyCode::Char('4')]);
        let status = view_data.status.clone().unwrap_or_default();
        assert!(status.contains("load Accounts columns failed"), "{status}");
        assert!(status.contains("connection refused"), "{status}");
        assert!(state.available().is_empty());
    }

    #[test]
    fn store_failure_is_reported_but_change_is_kept() {
        let mut state = loaded(false, &["a", "b"]);
        let mut runtime = TestRuntime {
            fail_stores: true,
            ..TestRuntime::default()
        };
        let mut view_data = ViewData::default();

        press_all(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[KeyCode::Tab, KeyCode::Char('j'), KeyCode::Char('K')],
        );
        assert_eq!(selected_keys(&state), vec!["b", "a"]);
        assert!(
            view_data
                .status
                .as_deref()
                .is_some_and(|status| status.starts_with("save failed"))
        );
    }

    #[test]
    fn default_report_rejects_edits_with_status() {
        let mut state = loaded(true, &["x", "y"]);
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();

        press_all(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[KeyCode::Tab, KeyCode::Char('j'), KeyCode::Char('g')],
        );
        assert_eq!(state.focus(), Some(&ColumnKey::new("y")));
        assert_eq!(selected_keys(&state), vec!["x", "y"]);
        assert!(runtime.stored.is_empty());
        assert!(
            view_data
                .status
                .as_deref()
                .is_some_and(|status| status.contains("read-only"))
        );
        assert_eq!(report_title(&state), "Lot Walk [read-only]");
    }

    #[test]
    fn esc_clears_focus_and_q_quits() {
        let mut state = loaded(false, &["x"]);
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();
        let (tx, _rx) = mpsc::channel();

        press_all(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[KeyCode::Tab, KeyCode::Char('k'), KeyCode::Esc],
        );
        assert_eq!(state.focus(), None);
        assert!(handle_key_event(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &user(),
            key(KeyCode::Char('q')),
        ));
        assert!(handle_key_event(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &user(),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ));
    }

    #[test]
    fn control_hints_follow_affordances() {
        let mut state = loaded(false, &["x", "y"]);
        state.dispatch(ColumnSelectCommand::Focus(ColumnKey::new("y")));

        let hints = control_hints(state.affordances(), ListSide::Selected);
        let enabled = |label: &str| {
            hints
                .iter()
                .find(|(hint, _)| hint.ends_with(label))
                .is_some_and(|(_, enabled)| *enabled)
        };
        assert!(enabled("move left"));
        assert!(!enabled("move right"));
        assert!(enabled("up"));
        assert!(enabled("top"));
        assert!(!enabled("down"));
        assert!(!enabled("bottom"));
        assert!(!enabled("all right"));
    }

    #[test]
    fn focused_row_is_marked() {
        let column = ReportColumn::new("Stock#", "StockNo");
        assert_eq!(list_row_text(&column, Some(&ColumnKey::new("StockNo"))), "> Stock#");
        assert_eq!(list_row_text(&column, None), "  Stock#");
    }

    #[test]
    fn stale_status_clear_is_ignored() {
        let state = loaded(false, &[]);
        let mut view_data = ViewData {
            status: Some("save failed".to_owned()),
            status_token: 2,
            ..ViewData::default()
        };
        let (tx, rx) = mpsc::channel();
        tx.send(InternalEvent::ClearStatus { token: 1 })
            .expect("send clear");
        process_internal_events(&mut view_data, &rx);
        assert!(status_text(&state, &view_data).contains("save failed"));

        tx.send(InternalEvent::ClearStatus { token: 2 })
            .expect("send clear");
        process_internal_events(&mut view_data, &rx);
        assert!(status_text(&state, &view_data).starts_with("no data set | tab pane"));
    }
}
