//! `ccx2paraview`: convert CalculiX `.frd` results to ParaView files.
//!
//! ```text
//! ccx2paraview -frd <jobname> [-fmt vtk|vtu] [-skip 0|1]
//!              [-encoding ascii|binary|appended] [-o <dir>] [-summary] [-v]
//! ```
//!
//! Exit status: 0 on success, 1 when the input cannot be converted or any
//! output file failed to write, 2 on a usage error.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use ccx_io::{ConvertOptions, Converter, FrdFile, OutputFormat, VtuEncoding};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Long options that are also accepted with a single dash
const LEGACY_LONG_OPTIONS: [&str; 8] = [
    "frd", "fmt", "skip", "encoding", "output", "summary", "verbose", "help",
];

#[derive(Parser, Debug)]
#[command(name = "ccx2paraview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert CalculiX .frd results to ParaView .vtk/.vtu files", long_about = None)]
struct Args {
    /// Job name, with or without the .frd extension
    #[arg(long, value_name = "JOBNAME")]
    frd: PathBuf,

    /// Output format: vtk or vtu
    #[arg(long, default_value = "vtk")]
    fmt: OutputFormat,

    /// 1 leaves ERROR indicator fields out of the output, 0 keeps them
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    skip: u8,

    /// Data encoding of .vtu files: ascii, binary or appended
    #[arg(long, default_value = "ascii")]
    encoding: VtuEncoding,

    /// Output directory (default: next to the .frd file)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    output: Option<PathBuf>,

    /// Print a JSON summary of the model instead of converting
    #[arg(long)]
    summary: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            format: self.fmt,
            skip_error_fields: self.skip == 1,
            encoding: self.encoding,
            output_dir: self.output.clone(),
        }
    }
}

/// Rewrite `-frd job` style options into the `--frd job` form clap expects.
fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(name) = text.strip_prefix('-') else {
                return arg;
            };
            let key = name.split_once('=').map_or(name, |(key, _)| key);
            if LEGACY_LONG_OPTIONS.contains(&key) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(args: &Args) -> ExitCode {
    let converter = Converter::new(&args.frd, args.convert_options());
    let frd = match FrdFile::from_file(converter.input_path()) {
        Ok(frd) => frd,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(1);
        }
    };
    match serde_json::to_string_pretty(&frd.summary()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("summary serialization failed: {err}");
            ExitCode::from(1)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse_from(normalize_legacy_args(std::env::args_os()));
    init_logging(args.verbose);

    if args.summary {
        return print_summary(&args);
    }

    let converter = Converter::new(&args.frd, args.convert_options());
    let report = match converter.run() {
        Ok(report) => report,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(1);
        }
    };

    if report.warnings > 0 {
        warn!("{} problem(s) recovered from while parsing", report.warnings);
    }
    for failure in &report.failed {
        error!("not written: {}", failure.path.display());
    }
    info!(
        "wrote {} file(s){}",
        report.written.len() + usize::from(report.collection.is_some()),
        if report.is_success() { "" } else { " with failures" }
    );

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        let args = args.iter().map(OsString::from);
        Args::try_parse_from(normalize_legacy_args(args))
    }

    #[test]
    fn single_dash_long_options() {
        let args = parse(&["ccx2paraview", "-frd", "beam", "-fmt", "vtu", "-skip", "0"])
            .expect("legacy form parses");
        assert_eq!(args.frd, PathBuf::from("beam"));
        assert_eq!(args.fmt, OutputFormat::Vtu);
        assert_eq!(args.skip, 0);
        assert!(!args.convert_options().skip_error_fields);
    }

    #[test]
    fn double_dash_and_defaults() {
        let args = parse(&["ccx2paraview", "--frd=job.frd", "-o", "out", "-v"]).expect("parses");
        assert_eq!(args.fmt, OutputFormat::Vtk);
        assert_eq!(args.encoding, VtuEncoding::Ascii);
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert!(args.verbose);
        assert!(args.convert_options().skip_error_fields);
    }

    #[test]
    fn normalization_leaves_values_alone() {
        let args: Vec<OsString> = ["prog", "-frd", "-fmt", "-o", "-3", "-frd=x", "--fmt"]
            .iter()
            .map(OsString::from)
            .collect();
        let normalized = normalize_legacy_args(args);
        assert_eq!(
            normalized,
            ["prog", "--frd", "--fmt", "-o", "-3", "--frd=x", "--fmt"]
                .iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn usage_errors() {
        assert!(parse(&["ccx2paraview"]).is_err());
        assert!(parse(&["ccx2paraview", "-frd", "job", "-fmt", "xdmf"]).is_err());
        assert!(parse(&["ccx2paraview", "-frd", "job", "-skip", "2"]).is_err());
        let err = parse(&["ccx2paraview", "-frd", "job", "-encoding", "zlib"]).expect_err("bad encoding");
        assert_eq!(err.exit_code(), 2);
    }
}
