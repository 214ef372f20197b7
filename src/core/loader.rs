//! Dataset loader for particle position dumps
//!
//! Two on-disk formats are accepted:
//! - the `particle_data` module written by the fluid simulator's text mode
//!   (`num_particles = N`, `box_size = B`, then one `[x, y, z],` row per line)
//! - JSON: `{"box_size": B, "num_particles": N, "data": [[x, y], ...]}`
//!
//! Only the first two columns of each row are kept.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, trace, warn};

use super::dataset::{DatasetError, ParticleDataset, Point2};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing `{0}` header")]
    MissingHeader(&'static str),
    #[error("line {line}: invalid value for `{key}`")]
    BadHeader { line: usize, key: &'static str },
    #[error("row {line}: {reason}")]
    BadRow { line: usize, reason: String },
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

#[derive(Deserialize)]
struct JsonDataset {
    box_size: f64,
    num_particles: usize,
    data: Vec<Vec<f64>>,
}

/// Load a dataset, picking the format from the file extension
pub fn load_dataset(path: &Path) -> Result<ParticleDataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let dataset = if is_json {
        parse_json(&text)?
    } else {
        parse_particle_module(&text)?
    };

    info!(
        path = %path.display(),
        frames = dataset.frame_count(),
        particles = dataset.particles_per_frame(),
        box_size = dataset.box_size(),
        "Dataset loaded"
    );
    Ok(dataset)
}

pub fn parse_json(text: &str) -> Result<ParticleDataset, LoadError> {
    let raw: JsonDataset = serde_json::from_str(text)?;

    let positions = raw
        .data
        .iter()
        .enumerate()
        .map(|(idx, row)| match row.as_slice() {
            [x, y, ..] => Ok(Point2::new(*x, *y)),
            _ => Err(LoadError::BadRow {
                line: idx + 1,
                reason: format!("expected at least 2 columns, got {}", row.len()),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParticleDataset::new(raw.box_size, raw.num_particles, positions)?)
}

/// Parse the simulator's text dump
pub fn parse_particle_module(text: &str) -> Result<ParticleDataset, LoadError> {
    let mut num_particles: Option<usize> = None;
    let mut box_size: Option<f64> = None;
    let mut positions = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with("import ") {
            continue;
        }

        if line.starts_with('[') {
            positions.push(parse_row(line, line_no)?);
            continue;
        }

        if line.starts_with(']') {
            // closing `])`
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => match key.trim() {
                "num_particles" => {
                    let n = value.trim().parse().map_err(|_| LoadError::BadHeader {
                        line: line_no,
                        key: "num_particles",
                    })?;
                    num_particles = Some(n);
                }
                "box_size" => {
                    let size = value.trim().parse().map_err(|_| LoadError::BadHeader {
                        line: line_no,
                        key: "box_size",
                    })?;
                    box_size = Some(size);
                }
                "data" => {}
                other => warn!(line = line_no, key = other, "Ignoring unknown header"),
            },
            None => warn!(line = line_no, "Skipping unrecognized line"),
        }
    }

    let num_particles = num_particles.ok_or(LoadError::MissingHeader("num_particles"))?;
    let box_size = box_size.ok_or(LoadError::MissingHeader("box_size"))?;

    trace!(num_particles, box_size, rows = positions.len(), "Parsed particle module");
    Ok(ParticleDataset::new(box_size, num_particles, positions)?)
}

/// `[x, y, z],` or `[x y z]` -> (x, y)
fn parse_row(line: &str, line_no: usize) -> Result<Point2, LoadError> {
    let inner = line
        .trim_end_matches(',')
        .trim_end()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| LoadError::BadRow {
            line: line_no,
            reason: "unterminated row".to_string(),
        })?;

    let values = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|_| LoadError::BadRow {
                line: line_no,
                reason: format!("not a number: {token}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    match values.as_slice() {
        [x, y, ..] => Ok(Point2::new(*x, *y)),
        _ => Err(LoadError::BadRow {
            line: line_no,
            reason: format!("expected at least 2 columns, got {}", values.len()),
        }),
    }
}
