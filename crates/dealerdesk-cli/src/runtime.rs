// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use dealerdesk_api::Client;
use dealerdesk_app::{Debounced, ReportColumn, ReportId, ReportService, UserId};
use dealerdesk_testkit::DealerFaker;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

type InFlight = Arc<Mutex<Vec<JoinHandle<()>>>>;
type Confirmed = Arc<Mutex<Option<Vec<ReportColumn>>>>;

/// Loads column catalogs from the report service and autosaves the
/// selected order once edits go quiet.
pub struct ApiRuntime {
    client: Arc<Client>,
    report: ReportId,
    latest: Option<Vec<ReportColumn>>,
    // Last selection the service acknowledged.
    confirmed: Confirmed,
    autosave: Debounced<Vec<ReportColumn>>,
    in_flight: InFlight,
    // Owns the timer threads behind `autosave`.
    _timers: tokio::runtime::Runtime,
}

impl ApiRuntime {
    pub fn new(client: Client, report: ReportId, autosave_delay: Duration) -> Result<Self> {
        let timers = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("dealerdesk-autosave")
            .enable_time()
            .build()
            .context("start autosave timer runtime")?;

        let client = Arc::new(client);
        let in_flight: InFlight = Arc::default();
        let confirmed: Confirmed = Arc::default();
        let autosave = {
            let client = Arc::clone(&client);
            let in_flight = Arc::clone(&in_flight);
            let confirmed = Arc::clone(&confirmed);
            let report = report.clone();
            Debounced::with_handle(
                move |columns: Vec<ReportColumn>| {
                    let client = Arc::clone(&client);
                    let confirmed = Arc::clone(&confirmed);
                    let report = report.clone();
                    // The blocking client must not run on a tokio worker.
                    let save = thread::spawn(move || {
                        save_columns(&client, &report, columns, &confirmed);
                    });
                    lock(&in_flight).push(save);
                },
                autosave_delay,
                timers.handle().clone(),
            )
        };

        Ok(Self {
            client,
            report,
            latest: None,
            confirmed,
            autosave,
            in_flight,
            _timers: timers,
        })
    }
}

fn save_columns(
    client: &Client,
    report: &ReportId,
    columns: Vec<ReportColumn>,
    confirmed: &Mutex<Option<Vec<ReportColumn>>>,
) {
    match client.save_report_columns(report, &columns) {
        Ok(()) => *lock(confirmed) = Some(columns),
        Err(error) => warn!(report = %report, error = %error, "autosave failed"),
    }
}

fn lock<T>(shared: &Mutex<T>) -> MutexGuard<'_, T> {
    match shared.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl dealerdesk_tui::AppRuntime for ApiRuntime {
    fn load_report_columns(
        &mut self,
        service: ReportService,
        user: &UserId,
    ) -> Result<Vec<ReportColumn>> {
        self.client
            .report_columns(service, user)
            .with_context(|| format!("load {} columns", service.label()))
    }

    fn store_report_columns(&mut self, columns: &[ReportColumn]) -> Result<()> {
        debug!(columns = columns.len(), "autosave scheduled");
        self.latest = Some(columns.to_vec());
        self.autosave.call(columns.to_vec());
        Ok(())
    }

    /// Saves the latest selection unless the service already acknowledged
    /// it. A save spawned by a timer that fired just before this call may
    /// not be joinable yet, so only acknowledged saves count.
    fn flush(&mut self) -> Result<()> {
        self.autosave.cancel();

        let saves = std::mem::take(&mut *lock(&self.in_flight));
        for save in saves {
            if save.join().is_err() {
                warn!("autosave thread panicked");
            }
        }

        let Some(columns) = self.latest.take() else {
            return Ok(());
        };
        if lock(&self.confirmed).as_ref() == Some(&columns) {
            return Ok(());
        }
        self.client
            .save_report_columns(&self.report, &columns)
            .with_context(|| format!("save columns of report {}", self.report))?;
        *lock(&self.confirmed) = Some(columns);
        Ok(())
    }
}

/// Serves catalogs from the demo faker and keeps every stored selection.
pub struct DemoRuntime {
    faker: DealerFaker,
    stored: Vec<Vec<ReportColumn>>,
}

impl DemoRuntime {
    pub fn new(faker: DealerFaker) -> Self {
        Self {
            faker,
            stored: Vec::new(),
        }
    }

    pub fn stored(&self) -> &[Vec<ReportColumn>] {
        &self.stored
    }
}

impl dealerdesk_tui::AppRuntime for DemoRuntime {
    fn load_report_columns(
        &mut self,
        service: ReportService,
        _user: &UserId,
    ) -> Result<Vec<ReportColumn>> {
        Ok(self.faker.report_columns(service))
    }

    fn store_report_columns(&mut self, columns: &[ReportColumn]) -> Result<()> {
        self.stored.push(columns.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        info!(
            saves = self.stored().len(),
            "demo session ended; nothing was persisted"
        );
        Ok(())
    }
}
