use crate::{constants::SNAPSHOT_EXTENSION, core::variant::Variant, utils::util::Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Writes an IGV batch script: one session-setup preamble, one command group
/// per snapshot window, and a trailing `exit`.
pub struct BatchWriter {
    writer: BufWriter<File>,
}

impl BatchWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|error| {
            crate::igvx_error!(
                "Failed to create batch script at {}: {}",
                path.display(),
                error
            )
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Opens a fresh IGV session, loads the genome and the alignments, and
    /// points snapshots at the output directory. Paths must be absolute so
    /// the script works regardless of where IGV itself is launched.
    pub fn write_session_setup(
        &mut self,
        genome: &Path,
        aln: &Path,
        snapshot_dir: &Path,
    ) -> Result<()> {
        self.write_line("new")?;
        self.write_line(&format!("genome {}", genome.display()))?;
        self.write_line(&format!("load {}", aln.display()))?;
        self.write_line(&format!("snapshotDirectory {}", snapshot_dir.display()))
    }

    /// Emits the command group for one snapshot window: navigate to the
    /// padded region, sort and collapse the alignment track, optionally
    /// squish it, and capture `<id>.png`.
    pub fn write_snapshot(&mut self, cluster: &Variant, padding: i64, squish: bool) -> Result<()> {
        let (start, end) = cluster.window(padding);
        self.write_line(&format!("goto {}:{}-{}", cluster.chrom, start, end))?;
        self.write_line("sort position")?;
        self.write_line("collapse")?;
        if squish {
            self.write_line("squish")?;
        }
        self.write_line(&format!("snapshot {}.{}", cluster.id(), SNAPSHOT_EXTENSION))
    }

    /// Terminates the script and flushes it to disk.
    pub fn finish(mut self) -> Result<()> {
        self.write_line("exit")?;
        self.writer
            .flush()
            .map_err(|error| crate::igvx_error!("Failed to flush batch script: {error}"))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")
            .map_err(|error| crate::igvx_error!("Failed to write batch command: {error}"))
    }
}
