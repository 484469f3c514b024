//! Load orchestration.
//!
//! Sequences schema creation and the per-entity CSV loads, tolerating
//! per-row failures, and produces a [`LoadReport`] with per-entity counts.
//! Only a connection-level failure during table creation aborts a run;
//! everything after that point recovers locally and keeps going.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::dataset::{self, Dataset, Row};
use crate::db::{setup, Database, InsertRecord};
use crate::error::Result;
use crate::transform;

/// Default dataset file names, relative to the pipeline's data directory.
pub const HOSPITAL_FILE: &str = "Hospital_General_Information.csv";
pub const DOCTOR_FILE: &str = "doctors_info_data.csv";
pub const EMERGENCY_FILE: &str = "hospitals_emergency_data.csv";

/// Run state of a load.
///
/// `Failed` is terminal and reachable only from `TablesCreating`: once the
/// tables phase has a connection, later per-row errors never fail the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    NotStarted,
    TablesCreating,
    TablesReady,
    LoadingHospitals,
    LoadingDoctors,
    LoadingEmergency,
    Complete,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunState::NotStarted => "not started",
            RunState::TablesCreating => "creating tables",
            RunState::TablesReady => "tables ready",
            RunState::LoadingHospitals => "loading hospitals",
            RunState::LoadingDoctors => "loading doctors",
            RunState::LoadingEmergency => "loading emergency services",
            RunState::Complete => "complete",
            RunState::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// One recovered per-row failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowFailure {
    /// 1-indexed data row (the header is row 0).
    pub row: usize,
    pub table: String,
    pub reason: String,
}

/// Outcome of loading one entity's dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadOutcome {
    /// Rows successfully persisted.
    pub inserted: usize,
    /// Rows skipped after a transform or insert failure.
    pub failures: Vec<RowFailure>,
    /// Set when the dataset itself could not be loaded; no rows were
    /// attempted.
    pub error: Option<String>,
}

impl LoadOutcome {
    fn unavailable(err: impl fmt::Display) -> Self {
        LoadOutcome {
            error: Some(err.to_string()),
            ..LoadOutcome::default()
        }
    }
}

/// Summary of a full load run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub state: RunState,
    pub hospitals: LoadOutcome,
    pub doctors: LoadOutcome,
    pub emergency_services: LoadOutcome,
}

impl LoadReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn outcome_line(outcome: &LoadOutcome) -> String {
    if let Some(err) = &outcome.error {
        return format!("0 (dataset unavailable: {})", err);
    }
    if outcome.failures.is_empty() {
        outcome.inserted.to_string()
    } else {
        format!("{} ({} rows failed)", outcome.inserted, outcome.failures.len())
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "          PIPELINE SUMMARY")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "run id: {}", self.run_id)?;
        writeln!(f, "state:  {}", self.state)?;
        writeln!(f, "hospitals loaded:          {}", outcome_line(&self.hospitals))?;
        writeln!(f, "doctors loaded:            {}", outcome_line(&self.doctors))?;
        writeln!(
            f,
            "emergency services loaded: {}",
            outcome_line(&self.emergency_services)
        )?;
        write!(f, "{}", rule)
    }
}

/// Run every row of `dataset` through `transform` and `sink`, recovering
/// from per-row failures.
///
/// Each row is handled independently: a failure in either stage is logged
/// and recorded, and the sequence continues with the next row. The caller
/// gets the partition (persisted count plus the failure log) as a
/// [`LoadOutcome`].
pub fn load_rows<R>(
    table: &str,
    dataset: &Dataset,
    transform: impl Fn(&Row) -> Result<R>,
    mut sink: impl FnMut(R) -> Result<i32>,
) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    let results = dataset
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| (index + 1, transform(row).and_then(&mut sink)));

    for (row_number, result) in results {
        match result {
            Ok(id) => {
                outcome.inserted += 1;
                debug!(table, row = row_number, id, "row persisted");
            }
            Err(e) => {
                warn!(table, row = row_number, error = %e, "row skipped");
                outcome.failures.push(RowFailure {
                    row: row_number,
                    table: table.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    outcome
}

/// Sequences table creation and the per-entity loads.
pub struct Pipeline {
    db: Database,
    data_dir: PathBuf,
    state: RunState,
}

impl Pipeline {
    pub fn new(db: Database, data_dir: impl Into<PathBuf>) -> Self {
        Pipeline {
            db,
            data_dir: data_dir.into(),
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Complete database setup: ensure the tables exist, then load every
    /// dataset.
    ///
    /// # Errors
    ///
    /// Propagates only a connection-level failure during table creation;
    /// the run state is then `Failed`. Per-row and per-dataset problems are
    /// recovered and reported through the [`LoadReport`].
    pub fn setup_database(&mut self) -> Result<LoadReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, data_dir = %self.data_dir.display(), "starting load run");

        self.state = RunState::TablesCreating;
        let tables_ok = match setup::ensure_all_tables(&self.db) {
            Ok(ok) => ok,
            Err(e) => {
                self.state = RunState::Failed;
                error!(error = %e, "could not reach the database, aborting run");
                return Err(e);
            }
        };
        self.state = RunState::TablesReady;
        if !tables_ok {
            warn!("one or more tables could not be created; affected loads will fail per row");
        }

        self.state = RunState::LoadingHospitals;
        let hospitals = self.load_hospitals();

        self.state = RunState::LoadingDoctors;
        let doctors = self.load_doctors();

        self.state = RunState::LoadingEmergency;
        let emergency_services = self.load_emergency_services();

        self.state = RunState::Complete;

        let report = LoadReport {
            run_id,
            started_at,
            finished_at: Some(Utc::now()),
            state: self.state,
            hospitals,
            doctors,
            emergency_services,
        };
        info!(
            %run_id,
            hospitals = report.hospitals.inserted,
            doctors = report.doctors.inserted,
            emergency_services = report.emergency_services.inserted,
            "load run complete"
        );
        Ok(report)
    }

    /// Load the hospital dataset into the store.
    pub fn load_hospitals(&self) -> LoadOutcome {
        self.load_entity(HOSPITAL_FILE, transform::hospital_record)
    }

    /// Load the doctor dataset into the store.
    pub fn load_doctors(&self) -> LoadOutcome {
        self.load_entity(DOCTOR_FILE, transform::doctor_record)
    }

    /// Load the emergency-services dataset into the store.
    pub fn load_emergency_services(&self) -> LoadOutcome {
        self.load_entity(EMERGENCY_FILE, transform::emergency_record)
    }

    fn load_entity<R: InsertRecord>(
        &self,
        file: &str,
        transform: impl Fn(&Row) -> Result<R>,
    ) -> LoadOutcome {
        let path = self.data_dir.join(file);
        let dataset = match dataset::load_csv(&path) {
            Ok(dataset) => dataset,
            Err(e) => {
                error!(table = R::TABLE, file = %path.display(), error = %e, "dataset unavailable");
                return LoadOutcome::unavailable(e);
            }
        };

        load_rows(R::TABLE, &dataset, transform, |record| {
            self.db.with_connection(|conn| record.insert(conn))
        })
    }
}
