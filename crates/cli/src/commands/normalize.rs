use std::path::Path;

use ottomap_core::normalize::{lines, normalize};

use super::read_input;
use crate::config::Config;
use crate::OutputFormat;

pub(crate) fn cmd_normalize(file: &Path, config: &Config, output: OutputFormat, quiet: bool) {
    let input = read_input(file, output, quiet);
    let text = normalize(&input, &config.parse.normalize_options());
    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&lines(&text))
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => {
            print!("{}", text);
            if !text.is_empty() && !text.ends_with('\n') {
                println!();
            }
        }
    }
}
