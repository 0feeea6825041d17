use std::path::PathBuf;

use colored::Colorize;
use tf_story::validate;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, catalogs: &[PathBuf], include_builtin: bool) -> Result<(), String> {
    let catalog = super::load_catalog(config, catalogs, include_builtin)?;
    let report = validate(&catalog);

    for issue in report.issues() {
        if issue.is_error {
            eprintln!("  {}", issue.to_string().red());
        } else {
            eprintln!("  {}", issue.to_string().yellow());
        }
    }

    let errors = report.invalid_scenes.len() + report.missing_targets.len();
    let warnings = report.unreachable.len();

    if errors > 0 {
        eprintln!(
            "  {errors} error{}, {warnings} warning{}",
            super::plural(errors),
            super::plural(warnings),
        );
        return Err("scene graph has integrity errors".into());
    }

    if warnings > 0 {
        eprintln!("  {warnings} warning{}", super::plural(warnings));
    }
    println!("  All checks passed for {} scenes.", catalog.len());
    println!(
        "  start: {}, hub: {}",
        catalog.start(),
        catalog.default_scene()
    );

    Ok(())
}
