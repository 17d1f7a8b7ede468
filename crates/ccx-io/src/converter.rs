//! FRD to ParaView conversion driver
//!
//! Reads `<job>.frd` and writes one `.vtk` or `.vtu` file per output step,
//! named `<job>.<k>.<ext>` with `k` zero-padded to the width of the step
//! count. Multi-step VTU conversions also get a `<job>.pvd` collection.
//! A file without result steps produces a single mesh-only `<job>.<ext>`.
//!
//! A step that fails to write is recorded in the [`ConversionReport`], its
//! partial file removed, and the remaining steps are still attempted.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ccx_model::Step;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::frd_reader::FrdFile;
use crate::pvd_writer::{PvdEntry, write_pvd};
use crate::vtk_writer::VtkWriter;
use crate::vtu_writer::{VtuEncoding, VtuWriter};

/// Output file flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Legacy ASCII `.vtk`
    #[default]
    Vtk,
    /// XML `.vtu`
    Vtu,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Vtk => "vtk",
            OutputFormat::Vtu => "vtu",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "vtk" => Ok(OutputFormat::Vtk),
            "vtu" => Ok(OutputFormat::Vtu),
            other => Err(Error::InvalidOption(format!(
                "unknown output format '{other}' (expected vtk or vtu)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    /// Leave ERROR/HERROR indicator fields out of the output
    pub skip_error_fields: bool,
    /// Data encoding of `.vtu` output
    pub encoding: VtuEncoding,
    /// Directory for the output files; defaults to the input's directory
    pub output_dir: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Vtk,
            skip_error_fields: true,
            encoding: VtuEncoding::Ascii,
            output_dir: None,
        }
    }
}

impl ConvertOptions {
    pub fn validate(&self) -> Result<()> {
        if self.format == OutputFormat::Vtk && self.encoding != VtuEncoding::Ascii {
            return Err(Error::InvalidOption(format!(
                "{} encoding is only available for vtu output",
                self.encoding
            )));
        }
        Ok(())
    }
}

/// An output file that could not be written
#[derive(Debug)]
pub struct StepFailure {
    /// Step index; `None` for the mesh-only file and the collection
    pub step: Option<usize>,
    pub path: PathBuf,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Step (or mesh-only) files, in step order
    pub written: Vec<PathBuf>,
    pub failed: Vec<StepFailure>,
    /// `.pvd` collection, when one was written
    pub collection: Option<PathBuf>,
    /// Number of parser warnings
    pub warnings: usize,
}

impl ConversionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// `<stem>.<index>.<ext>`, the index zero-padded to `width` digits.
pub fn step_file_name(stem: &str, index: usize, width: usize, extension: &str) -> String {
    format!("{stem}.{index:0width$}.{extension}")
}

pub struct Converter {
    job: PathBuf,
    options: ConvertOptions,
}

impl Converter {
    /// `job` may name the result file with or without its `.frd` extension.
    pub fn new(job: impl AsRef<Path>, options: ConvertOptions) -> Self {
        Self {
            job: job.as_ref().to_path_buf(),
            options,
        }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn input_path(&self) -> PathBuf {
        let has_frd_extension = self
            .job
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("frd"));
        if has_frd_extension {
            return self.job.clone();
        }
        let mut name = OsString::from(self.job.as_os_str());
        name.push(".frd");
        PathBuf::from(name)
    }

    fn output_dir(&self) -> PathBuf {
        match &self.options.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .input_path()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }

    fn stem(&self) -> String {
        self.input_path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "job".to_string())
    }

    /// Parse the input and write every step.
    pub fn run(&self) -> Result<ConversionReport> {
        self.options.validate()?;
        let frd = FrdFile::from_file(self.input_path())?;
        Ok(self.write_all(&frd))
    }

    /// Write every step of an already parsed file.
    pub fn write_all(&self, frd: &FrdFile) -> ConversionReport {
        let dir = self.output_dir();
        let stem = self.stem();
        let ext = self.options.format.extension();
        let steps = frd.steps();
        let mut report = ConversionReport {
            warnings: frd.warnings.len(),
            ..ConversionReport::default()
        };

        if steps.is_empty() {
            warn!(
                "{} has no result steps; writing the mesh only",
                self.input_path().display()
            );
            let path = dir.join(format!("{stem}.{ext}"));
            self.write_file(frd, path, None, &mut report);
            return report;
        }

        info!("{} output step(s)", steps.len());
        let width = steps.len().to_string().len();
        let mut entries = Vec::with_capacity(steps.len());
        for step in &steps {
            let name = step_file_name(&stem, step.index, width, ext);
            if self.write_file(frd, dir.join(&name), Some(step), &mut report) {
                entries.push(PvdEntry {
                    time: step.time,
                    file: name,
                });
            }
        }

        if self.options.format == OutputFormat::Vtu && steps.len() > 1 {
            let path = dir.join(format!("{stem}.pvd"));
            info!("writing {}", path.display());
            match write_pvd(&path, &entries) {
                Ok(()) => report.collection = Some(path),
                Err(error) => {
                    error!("{error}");
                    report.failed.push(StepFailure {
                        step: None,
                        path,
                        error,
                    });
                }
            }
        }
        report
    }

    /// Write one output file, recording the outcome. Returns `true` on success.
    fn write_file(
        &self,
        frd: &FrdFile,
        path: PathBuf,
        step: Option<&Step<'_>>,
        report: &mut ConversionReport,
    ) -> bool {
        info!("writing {}", path.display());
        match self.write_one(frd, &path, step) {
            Ok(()) => {
                report.written.push(path);
                true
            }
            Err(error) => {
                error!("{error}");
                remove_partial(&path);
                report.failed.push(StepFailure {
                    step: step.map(|s| s.index),
                    path,
                    error,
                });
                false
            }
        }
    }

    fn write_one(&self, frd: &FrdFile, path: &Path, step: Option<&Step<'_>>) -> Result<()> {
        let skip = self.options.skip_error_fields;
        match self.options.format {
            OutputFormat::Vtk => {
                let writer = VtkWriter::new(frd).skip_error_fields(skip);
                match step {
                    Some(step) => writer.write_step(path, step),
                    None => writer.write_mesh(path),
                }
            }
            OutputFormat::Vtu => {
                let writer = VtuWriter::new(frd)
                    .skip_error_fields(skip)
                    .encoding(self.options.encoding);
                match step {
                    Some(step) => writer.write_step(path, step),
                    None => writer.write_mesh(path),
                }
            }
        }
    }
}

fn remove_partial(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("removed partial {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("could not remove partial {}: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_names_are_zero_padded() {
        assert_eq!(step_file_name("job", 1, 1, "vtk"), "job.1.vtk");
        assert_eq!(step_file_name("job", 7, 2, "vtu"), "job.07.vtu");
        assert_eq!(step_file_name("beam", 120, 3, "vtu"), "beam.120.vtu");
    }

    #[test]
    fn job_name_with_or_without_extension() {
        let options = ConvertOptions::default();
        assert_eq!(
            Converter::new("runs/beam", options.clone()).input_path(),
            PathBuf::from("runs/beam.frd")
        );
        assert_eq!(
            Converter::new("runs/beam.frd", options.clone()).input_path(),
            PathBuf::from("runs/beam.frd")
        );
        assert_eq!(
            Converter::new("beam.FRD", options.clone()).input_path(),
            PathBuf::from("beam.FRD")
        );
        assert_eq!(
            Converter::new("v1.2/beam.v3", options).input_path(),
            PathBuf::from("v1.2/beam.v3.frd")
        );
    }

    #[test]
    fn output_defaults_next_to_input() {
        let converter = Converter::new("runs/beam", ConvertOptions::default());
        assert_eq!(converter.output_dir(), PathBuf::from("runs"));
        assert_eq!(converter.stem(), "beam");

        let converter = Converter::new(
            "runs/beam",
            ConvertOptions {
                output_dir: Some(PathBuf::from("out")),
                ..ConvertOptions::default()
            },
        );
        assert_eq!(converter.output_dir(), PathBuf::from("out"));
    }

    #[test]
    fn option_parsing_and_validation() {
        assert_eq!("VTU".parse::<OutputFormat>().expect("known"), OutputFormat::Vtu);
        assert!("xdmf".parse::<OutputFormat>().is_err());

        let options = ConvertOptions {
            encoding: VtuEncoding::Binary,
            ..ConvertOptions::default()
        };
        assert!(matches!(options.validate(), Err(Error::InvalidOption(_))));
        let options = ConvertOptions {
            format: OutputFormat::Vtu,
            ..options
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let converter = Converter::new(dir.path().join("absent"), ConvertOptions::default());
        match converter.run() {
            Err(Error::Io { path, .. }) => assert!(path.ends_with("absent.frd")),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
