use std::fs::File;
use std::path::Path;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::error::Result;

/// Sends `log` records to `path`. The terminal itself is busy drawing the
/// board, so nothing is ever logged to stdout or stderr.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, File::create(path)?)?;
    log::info!("logging to {} at {level}", path.display());
    Ok(())
}
