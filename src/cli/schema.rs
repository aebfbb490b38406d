//! Schema command implementation

use crate::cli::{GlobalOptions, OutputFormat};
use crate::cli::context::TEAM_LABEL_TYPE;
use crate::error::{Error, Result};
use crate::models::AttributeDisplay;
use crate::output::Formattable;
use crate::provider::LinearProvider;

/// Print the team label schema; needs no token or network
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let provider = LinearProvider::new(env!("CARGO_PKG_VERSION"));
    let resource = provider
        .resource(TEAM_LABEL_TYPE)
        .ok_or_else(|| Error::Other(format!("provider does not implement {}", TEAM_LABEL_TYPE)))?;

    let schema = resource.schema();
    let format = opts.format.unwrap_or_default();

    if format == OutputFormat::Table {
        println!("{}: {}\n", TEAM_LABEL_TYPE, schema.markdown_description);
    }

    AttributeDisplay::from_schema(&schema).print(format)
}
