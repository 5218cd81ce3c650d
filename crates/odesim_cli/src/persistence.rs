//! CSV persistence for trajectories: a `Time` column followed by one column per
//! state component, one row per recorded step.

use anyhow::{bail, Context, Result};
use csv::{Reader, Writer};
use odesim_core::Trajectory;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub const TIME_COLUMN: &str = "Time";

pub fn write_trajectory<W: Write>(
    writer: W,
    labels: &[String],
    trajectory: &Trajectory<f64>,
) -> Result<()> {
    if !trajectory.is_empty() && labels.len() != trajectory.dimension() {
        bail!(
            "Got {} labels for a trajectory of dimension {}.",
            labels.len(),
            trajectory.dimension()
        );
    }

    let mut writer = Writer::from_writer(writer);
    let mut header = Vec::with_capacity(labels.len() + 1);
    header.push(TIME_COLUMN);
    header.extend(labels.iter().map(String::as_str));
    writer.write_record(&header)?;

    for (t, state) in trajectory.iter() {
        let mut row = Vec::with_capacity(state.len() + 1);
        row.push(t.to_string());
        row.extend(state.iter().map(f64::to_string));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn read_trajectory<R: Read>(reader: R) -> Result<(Vec<String>, Trajectory<f64>)> {
    let mut reader = Reader::from_reader(reader);
    let header = reader.headers().context("Failed to read CSV header")?.clone();
    if header.is_empty() {
        bail!("CSV header is empty.");
    }
    let labels: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

    let mut times = Vec::new();
    let mut states = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read row {}", line + 1))?;
        let mut values = record.iter().map(|field| field.trim().parse::<f64>());
        let t = match values.next() {
            Some(value) => value.with_context(|| format!("Bad time value in row {}", line + 1))?,
            None => bail!("Row {} is empty.", line + 1),
        };
        let state = values
            .collect::<std::result::Result<Vec<f64>, _>>()
            .with_context(|| format!("Bad state value in row {}", line + 1))?;
        times.push(t);
        states.push(state);
    }

    let trajectory = Trajectory::from_parts(times, states)?;
    Ok((labels, trajectory))
}

pub fn save_results_to_csv(
    path: &Path,
    labels: &[String],
    trajectory: &Trajectory<f64>,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_trajectory(file, labels, trajectory)
}

pub fn load_results_from_csv(path: &Path) -> Result<(Vec<String>, Trajectory<f64>)> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    read_trajectory(file)
}
