use crate::engine::loader::TemplateSet;
use crate::error::{Result, VelvetError};

const SCRATCH_TEMPLATE: &str = "__velvet_scratch__";

/// Check a freshly parsed set before it goes live.
///
/// The set must be non-empty and must accept an extra template on a clone,
/// the operation layout rendering performs.
pub fn validate(set: &TemplateSet) -> Result<()> {
    if set.is_empty() {
        return Err(VelvetError::NoTemplates);
    }

    let mut scratch = set.tera.clone();
    scratch
        .add_raw_template(SCRATCH_TEMPLATE, "")
        .map_err(|e| VelvetError::CloneFailed { source: e })?;

    Ok(())
}
