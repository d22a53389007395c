use config::Config;
use tracing::{debug, warn};

use crate::compose::{compose, Composed};
use crate::error::RunError;


pub struct RunStats {
    pub written: Vec<Composed>,
}

impl RunStats {
    pub fn new() -> Self {
        Self { written: vec![] }
    }
    pub fn bytes(&self) -> usize {
        self.written.iter().map(|c| c.bytes).sum()
    }
}

/// Write every configured target in order, stopping at the first failure.
/// Targets written before a failure are left in place.
pub async fn run_action(config: &Config) -> Result<RunStats, RunError> {
    let input = config.input_path();

    if !input.is_file() {
        return Err(RunError::MissingInput(input))
    }

    debug!("Rounding corners of {:?} for {} target(s)", input, config.targets.len());

    let mut stats = RunStats::new();

    for target in config.targets.iter() {
        let output = config.target_path(target);
        let radius = config.radius_for(target);

        if target.extension_mismatch() {
            warn!("{} will contain {} data despite its extension", output.display(), target.format);
        }

        match compose(&input, &output, radius, target.format).await {
            Ok(c) => stats.written.push(c),
            Err(e) => return Err(RunError::from_target(output, e)),
        }
    }

    Ok(stats)
}
