use crate::tally::io_common::resolve_path;
use crate::tally::*;

use serde::{Deserialize, Serialize};

/// The optional JSON configuration of a run.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(rename = "inputPath")]
    pub input_path: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    #[serde(rename = "referencePath")]
    pub reference_path: Option<String>,
}

impl SummaryConfig {
    /// Resolves the relative paths against the directory of the configuration file.
    /// The `stdout` output is kept as is.
    pub fn resolved(self, root: &Path) -> SummaryConfig {
        SummaryConfig {
            input_path: self.input_path.map(|p| resolve_path(root, &p)),
            output_path: self.output_path.map(|p| {
                if p == STDOUT_OUTPUT {
                    p
                } else {
                    resolve_path(root, &p)
                }
            }),
            reference_path: self.reference_path.map(|p| resolve_path(root, &p)),
        }
    }
}

pub fn read_config(path: &str) -> BTallyResult<SummaryConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read config: {:?}", contents);
    let config: SummaryConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}
