//! Plain-text diagnostic files, one per (scenario, order)
//!
//! Layout per sample:
//!
//! ```text
//! dMomentum = <dx> <dy> <dz>
//! dEnergy = <de>
//! <label> <px> <py> <pz> <vx> <vy> <vz>
//! ```
//!
//! with one body line per body.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::simulation::diagnostics::{DiagnosticRecord, DiagnosticSink};

/// Format one record
pub fn write_record<W: Write>(out: &mut W, record: &DiagnosticRecord) -> std::io::Result<()> {
    let dp = &record.d_momentum;
    writeln!(out, "dMomentum = {} {} {}", dp.x, dp.y, dp.z)?;
    writeln!(out, "dEnergy = {}", record.d_energy)?;
    for b in &record.bodies {
        writeln!(
            out,
            "{} {} {} {} {} {} {}",
            b.label, b.x.x, b.x.y, b.x.z, b.v.x, b.v.y, b.v.z
        )?;
    }
    Ok(())
}

/// `<output_dir>/<order>/<scenario>.txt`, with path separators in the
/// scenario name replaced
pub fn output_path(output_dir: &Path, order: usize, scenario_name: &str) -> PathBuf {
    let file_name: String = scenario_name
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    output_dir.join(order.to_string()).join(format!("{file_name}.txt"))
}

/// Buffered file sink
pub struct TextFileSink {
    path: PathBuf,
    out: BufWriter<File>,
}

impl TextFileSink {
    /// Create the per-order directory and truncate the output file
    pub fn create(output_dir: &Path, order: usize, scenario_name: &str) -> Result<Self> {
        let path = output_path(output_dir, order, scenario_name);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        }
        let file = File::create(&path)
            .with_context(|| format!("failed to create output file {}", path.display()))?;
        Ok(Self {
            path,
            out: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and hand back the file path
    pub fn finish(mut self) -> Result<PathBuf> {
        self.out
            .flush()
            .with_context(|| format!("failed to flush {}", self.path.display()))?;
        Ok(self.path)
    }
}

impl DiagnosticSink for TextFileSink {
    fn record(&mut self, record: &DiagnosticRecord) -> Result<()> {
        write_record(&mut self.out, record)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}
