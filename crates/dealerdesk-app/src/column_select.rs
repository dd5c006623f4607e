// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, info};

use crate::{
    ColumnKey, Direction, DualList, ListSide, ReportColumn, ReportDefinition, ReportService,
};

const LOCKED_MESSAGE: &str = "default reports are read-only -- copy the report to change columns";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelectCommand {
    LoadReport(ReportDefinition),
    SelectDataSet(ReportService),
    ApplyAvailable {
        service: ReportService,
        columns: Vec<ReportColumn>,
    },
    Focus(ColumnKey),
    ClearFocus,
    DoubleClick(ColumnKey),
    MoveRight,
    MoveLeft,
    MoveAllRight,
    MoveAllLeft,
    Reorder(ListSide, Direction),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelectEvent {
    /// The selected order changed; carries the full new order for the sink.
    SelectionChanged(Vec<ReportColumn>),
    AvailableChanged(usize),
    FocusChanged(Option<ColumnKey>),
    DataSetChanged(ReportService),
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReorderControls {
    pub up: bool,
    pub top: bool,
    pub down: bool,
    pub bottom: bool,
}

impl ReorderControls {
    pub const fn allows(self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Top => self.top,
            Direction::Down => self.down,
            Direction::Bottom => self.bottom,
        }
    }
}

/// Which controls of the column selector are enabled right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnAffordances {
    pub data_set: bool,
    pub available: ReorderControls,
    pub selected: ReorderControls,
    pub move_right: bool,
    pub move_all_right: bool,
    pub move_left: bool,
    pub move_all_left: bool,
}

impl ColumnAffordances {
    pub const fn reorder(self, side: ListSide) -> ReorderControls {
        match side {
            ListSide::Available => self.available,
            ListSide::Selected => self.selected,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColumnSelectState {
    report: Option<ReportDefinition>,
    data_set: Option<ReportService>,
    lists: DualList<ReportColumn>,
}

impl ColumnSelectState {
    pub fn report(&self) -> Option<&ReportDefinition> {
        self.report.as_ref()
    }

    pub fn data_set(&self) -> Option<ReportService> {
        self.data_set
    }

    pub fn lists(&self) -> &DualList<ReportColumn> {
        &self.lists
    }

    pub fn available(&self) -> &[ReportColumn] {
        self.lists.available()
    }

    pub fn selected(&self) -> &[ReportColumn] {
        self.lists.selected()
    }

    pub fn focus(&self) -> Option<&ColumnKey> {
        self.lists.cursor()
    }

    pub fn is_locked(&self) -> bool {
        self.report.as_ref().is_some_and(|report| report.is_default)
    }

    pub fn affordances(&self) -> ColumnAffordances {
        if self.is_locked() {
            return ColumnAffordances::default();
        }
        let reorder = |side| ReorderControls {
            up: self.lists.can_reorder(side, Direction::Up),
            top: self.lists.can_reorder(side, Direction::Top),
            down: self.lists.can_reorder(side, Direction::Down),
            bottom: self.lists.can_reorder(side, Direction::Bottom),
        };
        ColumnAffordances {
            data_set: true,
            available: reorder(ListSide::Available),
            selected: reorder(ListSide::Selected),
            move_right: self.lists.can_move_to(ListSide::Selected),
            move_all_right: self.lists.can_move_all(ListSide::Available),
            move_left: self.lists.can_move_to(ListSide::Available),
            move_all_left: self.lists.can_move_all(ListSide::Selected),
        }
    }

    pub fn dispatch(&mut self, command: ColumnSelectCommand) -> Vec<ColumnSelectEvent> {
        match command {
            ColumnSelectCommand::LoadReport(report) => self.load_report(report),
            ColumnSelectCommand::Reset => {
                self.report = None;
                self.data_set = None;
                self.lists.reset();
                vec![self.selection_changed()]
            }
            ColumnSelectCommand::Focus(key) => match self.lists.try_set_cursor(Some(key)) {
                Ok(()) => vec![ColumnSelectEvent::FocusChanged(self.focus().cloned())],
                Err(error) => vec![ColumnSelectEvent::Rejected(error.to_string())],
            },
            ColumnSelectCommand::ClearFocus => {
                if self.lists.set_cursor(None) {
                    vec![ColumnSelectEvent::FocusChanged(None)]
                } else {
                    Vec::new()
                }
            }
            command if self.is_locked() => {
                debug!(?command, "column command rejected on default report");
                vec![ColumnSelectEvent::Rejected(LOCKED_MESSAGE.to_owned())]
            }
            ColumnSelectCommand::SelectDataSet(service) => {
                if self.data_set == Some(service) {
                    return Vec::new();
                }
                self.data_set = Some(service);
                vec![ColumnSelectEvent::DataSetChanged(service)]
            }
            ColumnSelectCommand::ApplyAvailable { service, columns } => {
                self.apply_available(service, columns)
            }
            ColumnSelectCommand::DoubleClick(key) => {
                if self.lists.handle_double_click(&key) {
                    self.transfer_events()
                } else {
                    Vec::new()
                }
            }
            ColumnSelectCommand::MoveRight => self.move_focused(ListSide::Selected),
            ColumnSelectCommand::MoveLeft => self.move_focused(ListSide::Available),
            ColumnSelectCommand::MoveAllRight => {
                self.move_all(ListSide::Available, ListSide::Selected)
            }
            ColumnSelectCommand::MoveAllLeft => {
                self.move_all(ListSide::Selected, ListSide::Available)
            }
            ColumnSelectCommand::Reorder(side, direction) => {
                match self.lists.try_reorder_cursor(side, direction) {
                    Ok(true) => vec![self.list_changed(side)],
                    Ok(false) => Vec::new(),
                    Err(error) => vec![ColumnSelectEvent::Rejected(error.to_string())],
                }
            }
        }
    }

    fn load_report(&mut self, report: ReportDefinition) -> Vec<ColumnSelectEvent> {
        let persisted = report.persisted_columns();
        info!(
            report = %report.id,
            columns = persisted.len(),
            "report columns loaded"
        );
        self.lists.populate(Vec::new(), persisted);
        self.data_set = None;
        self.report = Some(report);
        vec![self.selection_changed()]
    }

    fn apply_available(
        &mut self,
        service: ReportService,
        columns: Vec<ReportColumn>,
    ) -> Vec<ColumnSelectEvent> {
        if self.data_set != Some(service) {
            debug!(
                service = service.as_str(),
                "stale column list for a previous data set dropped"
            );
            return Vec::new();
        }

        let had_focus = self.focus().is_some();
        self.lists.replace_available(columns);
        let mut events = vec![self.list_changed(ListSide::Available)];
        if had_focus && self.focus().is_none() {
            events.push(ColumnSelectEvent::FocusChanged(None));
        }
        events
    }

    fn move_focused(&mut self, to: ListSide) -> Vec<ColumnSelectEvent> {
        match self.lists.try_move_cursor(to) {
            Ok(()) => self.transfer_events(),
            Err(error) => vec![ColumnSelectEvent::Rejected(error.to_string())],
        }
    }

    fn move_all(&mut self, from: ListSide, to: ListSide) -> Vec<ColumnSelectEvent> {
        if self.lists.move_all(from, to) == 0 {
            return Vec::new();
        }
        vec![
            self.selection_changed(),
            self.list_changed(ListSide::Available),
        ]
    }

    fn transfer_events(&self) -> Vec<ColumnSelectEvent> {
        vec![
            self.selection_changed(),
            self.list_changed(ListSide::Available),
            ColumnSelectEvent::FocusChanged(None),
        ]
    }

    fn list_changed(&self, side: ListSide) -> ColumnSelectEvent {
        match side {
            ListSide::Selected => self.selection_changed(),
            ListSide::Available => ColumnSelectEvent::AvailableChanged(self.available().len()),
        }
    }

    fn selection_changed(&self) -> ColumnSelectEvent {
        ColumnSelectEvent::SelectionChanged(self.selected().to_vec())
    }
}
