use std::path::Path;

use ottomap_core::{dump_sections, sections_of};

use super::read_input;
use crate::config::Config;
use crate::OutputFormat;

pub(crate) fn cmd_sections(
    file: &Path,
    compact: bool,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let input = read_input(file, output, quiet);
    let sections = sections_of(&input, &config.parse);
    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&sections)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => {
            let separate_units = config.dump.separate_units && !compact;
            print!("{}", dump_sections(&sections, separate_units));
        }
    }
}
