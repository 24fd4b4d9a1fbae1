use std::error::Error;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};
use tracing::info;

use crate::config::PipelineConfig;
use crate::metrics::IngestStats;
use crate::transport::fs::run_files;

#[derive(Debug, Parser)]
#[command(
    name = "donation-analytics",
    version,
    disable_help_subcommand = true,
    about = "Emit running percentiles for repeat campaign donors",
    long_about = "Stream pipe-delimited contribution records, detect repeat donors, and write one line per repeat donation with the running percentile, total amount, and transaction count of its recipient/zip/year group.",
    after_help = "Output lines have the form RECIPIENT|ZIP|YEAR|PERCENTILE|TOTAL|COUNT and follow input order."
)]
struct DonationAnalyticsCli {
    #[arg(value_name = "INPUT", help = "Pipe-delimited contribution records")]
    input: PathBuf,
    #[arg(
        value_name = "PERCENTILE_FILE",
        help = "File whose first line holds a percentile in (0, 100]"
    )]
    percentile: PathBuf,
    #[arg(value_name = "OUTPUT", help = "Output file, created or truncated")]
    output: PathBuf,
}

impl From<DonationAnalyticsCli> for PipelineConfig {
    fn from(cli: DonationAnalyticsCli) -> Self {
        PipelineConfig {
            input: cli.input,
            percentile_path: cli.percentile,
            output: cli.output,
        }
    }
}

/// Run the `donation-analytics` command with `args_iter` (program name excluded).
///
/// Returns `Ok(None)` when only help or version output was requested.
pub fn run_donation_analytics<I>(args_iter: I) -> Result<Option<IngestStats>, Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<DonationAnalyticsCli, _>(
        std::iter::once("donation-analytics".to_string()).chain(args_iter),
    )?
    else {
        return Ok(None);
    };

    let config = PipelineConfig::from(cli);
    let stats = run_files(&config)?;
    for (kind, count) in &stats.skipped_by_kind {
        info!(kind, count, "skipped records");
    }
    Ok(Some(stats))
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(values: &[&str]) -> std::vec::IntoIter<String> {
        values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn cli_takes_three_positional_paths() {
        let cli =
            DonationAnalyticsCli::try_parse_from(["donation-analytics", "in.txt", "p.txt", "out.txt"])
                .unwrap();
        let config = PipelineConfig::from(cli);
        assert_eq!(config.input, PathBuf::from("in.txt"));
        assert_eq!(config.percentile_path, PathBuf::from("p.txt"));
        assert_eq!(config.output, PathBuf::from("out.txt"));
    }

    #[test]
    fn missing_arguments_are_errors() {
        assert!(run_donation_analytics(args(&["in.txt"])).is_err());
    }

    #[test]
    fn help_is_not_an_error() {
        assert!(run_donation_analytics(args(&["--help"])).unwrap().is_none());
    }

    #[test]
    fn runs_pipeline_end_to_end() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("itcont.txt");
        let percentile = temp.path().join("percentile.txt");
        let output = temp.path().join("out.txt");
        fs::write(
            &input,
            "C001|||||||SMITH, JOHN|||123456789|||01152017|200|\nC001|||||||SMITH, JOHN|||12345|||01202017|300|\n",
        )
        .unwrap();
        fs::write(&percentile, "50").unwrap();

        let stats = run_donation_analytics(args(&[
            input.to_str().unwrap(),
            percentile.to_str().unwrap(),
            output.to_str().unwrap(),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(stats.emitted, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "C001|12345|2017|300|300|1\n"
        );
    }

    #[test]
    fn bad_percentile_aborts_run() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("itcont.txt");
        let percentile = temp.path().join("percentile.txt");
        fs::write(&input, "").unwrap();
        fs::write(&percentile, "0").unwrap();
        let output = temp.path().join("out.txt");
        let err = run_donation_analytics(args(&[
            input.to_str().unwrap(),
            percentile.to_str().unwrap(),
            output.to_str().unwrap(),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("percentile"));
        assert!(!output.exists());
    }
}
