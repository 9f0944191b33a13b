//! Read named initial conditions from the plain-text scenario format
//!
//! ```text
//! Figure 8
//! 0 1 -1 0 0 0.3393928985595663 0.536191205596924 0
//! 1 1  1 0 0 0.3393928985595663 0.536191205596924 0
//! 2 1  0 0 0 -0.6787857971191326 -1.072382411193848 0
//! ```
//!
//! A line that does not start with a digit names a new scenario; the lines
//! after it are bodies, `label mass px py pz vx vy vz`. Blank lines are
//! skipped and scenarios without bodies are dropped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::simulation::states::{Body, NVec3};

/// A named list of bodies at t = 0
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub bodies: Vec<Body>,
}

/// Open `path` and parse every scenario in it
pub fn load_scenarios(path: impl AsRef<Path>) -> Result<Vec<Scenario>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open scenario file {}", path.display()))?;
    parse_scenarios(BufReader::new(file))
        .with_context(|| format!("failed to parse scenario file {}", path.display()))
}

pub fn parse_scenarios(reader: impl BufRead) -> Result<Vec<Scenario>> {
    let mut scenarios = Vec::new();
    let mut current: Option<Scenario> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !line.starts_with(|c: char| c.is_ascii_digit()) {
            if let Some(done) = current.take() {
                push_non_empty(&mut scenarios, done);
            }
            current = Some(Scenario {
                name: line.to_string(),
                bodies: Vec::new(),
            });
            continue;
        }

        let Some(scenario) = current.as_mut() else {
            bail!("line {line_no}: body defined before any scenario name");
        };
        let body = parse_body(line).with_context(|| format!("line {line_no}"))?;
        scenario.bodies.push(body);
    }

    if let Some(done) = current {
        push_non_empty(&mut scenarios, done);
    }

    Ok(scenarios)
}

fn push_non_empty(scenarios: &mut Vec<Scenario>, scenario: Scenario) {
    if !scenario.bodies.is_empty() {
        scenarios.push(scenario);
    }
}

/// `label mass px py pz vx vy vz`
fn parse_body(line: &str) -> Result<Body> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 8 {
        bail!(
            "expected 8 fields (label mass px py pz vx vy vz), found {}",
            fields.len()
        );
    }

    let mut nums = [0.0; 7];
    for (slot, field) in nums.iter_mut().zip(&fields[1..]) {
        *slot = field
            .parse::<f64>()
            .with_context(|| format!("invalid number `{field}`"))?;
    }

    let [m, px, py, pz, vx, vy, vz] = nums;
    Body::new(fields[0], m, NVec3::new(px, py, pz), NVec3::new(vx, vy, vz))
}
