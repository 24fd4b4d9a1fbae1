use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::config::{Percentile, PipelineConfig};
use crate::errors::PipelineError;
use crate::metrics::IngestStats;
use crate::processor::RecordProcessor;

/// Stream every line of `reader` through `processor`, writing output lines in
/// input order as soon as they are produced.
///
/// Record-level failures are counted and skipped; only IO failures abort.
pub fn stream_records<R, W>(
    mut reader: R,
    mut writer: W,
    processor: &mut RecordProcessor,
) -> Result<(), PipelineError>
where
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if let Ok(Some(output)) = processor.process_bytes(&buf) {
            writeln!(writer, "{output}")?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Run a full pass: read the percentile, stream the input file, write the output file.
pub fn run_files(config: &PipelineConfig) -> Result<IngestStats, PipelineError> {
    let percentile = Percentile::from_file(&config.percentile_path)?;
    let input = open(&config.input)?;
    let output = File::create(&config.output)
        .map_err(|err| PipelineError::path(&config.output, err))?;

    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        %percentile,
        "starting ingestion"
    );

    let mut processor = RecordProcessor::new(percentile);
    stream_records(BufReader::new(input), BufWriter::new(output), &mut processor)?;
    let stats = processor.into_stats();

    info!(
        lines = stats.lines_read,
        emitted = stats.emitted,
        new_donors = stats.new_donors,
        skipped = stats.skipped(),
        emit_ratio = stats.emit_ratio(),
        "ingestion finished"
    );
    Ok(stats)
}

fn open(path: &Path) -> Result<File, PipelineError> {
    File::open(path).map_err(|err| PipelineError::path(path, err))
}
