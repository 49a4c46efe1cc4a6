//! CSV reference tables: slots, resistance goals and player progression

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::availability::ProgressionSnapshot;
use crate::optimizer::ResistanceGoal;
use crate::slots::Slot;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column '{column}' holds '{value}', expected an integer")]
    InvalidInteger { column: String, value: String },

    #[error("Table has no data rows")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct SlotRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Component")]
    component: i64,
    #[serde(rename = "Augment")]
    augment: i64,
}

#[derive(Debug, Deserialize)]
struct GoalRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Current")]
    current: i64,
    #[serde(rename = "Goal")]
    goal: i64,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Read the slot table. A flag of `0` means the slot accepts that class.
pub fn read_slots<R: Read>(reader: R) -> Result<Vec<Slot>, TableError> {
    let mut slots = Vec::new();
    for row in csv_reader(reader).deserialize() {
        let row: SlotRow = row?;
        slots.push(Slot::new(row.name, row.component == 0, row.augment == 0));
    }
    Ok(slots)
}

/// Read the resistance goal table
pub fn read_goals<R: Read>(reader: R) -> Result<Vec<ResistanceGoal>, TableError> {
    let mut goals = Vec::new();
    for row in csv_reader(reader).deserialize() {
        let row: GoalRow = row?;
        goals.push(ResistanceGoal::new(row.name, row.current, row.goal));
    }
    Ok(goals)
}

/// Read the progression snapshot from the first data row
pub fn read_progression<R: Read>(reader: R) -> Result<ProgressionSnapshot, TableError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let record = reader.records().next().ok_or(TableError::Empty)??;

    let mut snapshot = ProgressionSnapshot::default();
    for (column, value) in headers.iter().zip(record.iter()) {
        let parsed = value.parse().map_err(|_| TableError::InvalidInteger {
            column: column.to_string(),
            value: value.to_string(),
        })?;
        snapshot.set(column, parsed);
    }
    Ok(snapshot)
}

pub fn load_slots<P: AsRef<Path>>(path: P) -> Result<Vec<Slot>, TableError> {
    read_slots(File::open(path)?)
}

pub fn load_goals<P: AsRef<Path>>(path: P) -> Result<Vec<ResistanceGoal>, TableError> {
    read_goals(File::open(path)?)
}

pub fn load_progression<P: AsRef<Path>>(path: P) -> Result<ProgressionSnapshot, TableError> {
    read_progression(File::open(path)?)
}
