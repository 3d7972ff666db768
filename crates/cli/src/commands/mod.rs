mod normalize;
mod parse;
mod sections;

use std::path::Path;
use std::process;

use ottomap_core::{FileSystemSource, ReportSource};

use crate::{report_error, OutputFormat};

pub(crate) use normalize::cmd_normalize;
pub(crate) use parse::cmd_parse;
pub(crate) use sections::cmd_sections;

/// Read the raw report bytes, or exit 1.
fn read_input(file: &Path, output: OutputFormat, quiet: bool) -> Vec<u8> {
    match FileSystemSource.read_report(file) {
        Ok(bytes) => bytes,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    }
}
