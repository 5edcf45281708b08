//! Command implementations for the codecull CLI.

use std::fs;
use std::io::Write;

use anyhow::{bail, Context};
use tracing::info;

use codecull_rs::core::pipeline::{CurationPipeline, InputSelector};
use codecull_rs::CurationConfig;

use super::args::{CurateArgs, InitConfigArgs, ValidateConfigArgs};
use super::output;

/// Run the curation pipeline and emit the curated path list.
pub fn curate_command(args: CurateArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;

    if !args.input.exists() {
        bail!("Input path '{}' does not exist", args.input.display());
    }
    let input = InputSelector::from_path(&args.input);

    info!("Curating corpus from '{}'", args.input.display());
    let pipeline = CurationPipeline::new(config)?;
    let outcome = pipeline.run(&input)?;

    match &args.out {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            for p in &outcome.paths {
                writeln!(file, "{}", p.display())?;
            }
            info!(
                "Wrote {} curated paths to '{}'",
                outcome.paths.len(),
                path.display()
            );
        }
        None => output::print_path_list(&outcome.paths)?,
    }

    output::print_summary(&outcome, args.lm_task);
    Ok(())
}

/// Merge YAML config (when given) with CLI flag overrides.
fn build_config(args: &CurateArgs) -> anyhow::Result<CurationConfig> {
    let mut config = match &args.config {
        Some(path) => CurationConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => CurationConfig::default(),
    };

    config.deduplicate |= args.deduplicate;
    config.print_stats |= args.stats;
    if let Some(cache_output) = &args.cache_output {
        config.cache_output = Some(cache_output.clone());
    }
    if let Some(max_size_bytes) = args.max_size_bytes {
        config.max_size_bytes = max_size_bytes;
    }
    if let Some(min_tokens) = args.min_tokens {
        config.min_tokens = min_tokens;
    }
    config
        .include_patterns
        .extend(args.include_patterns.iter().cloned());
    config
        .exclude_patterns
        .extend(args.exclude_patterns.iter().cloned());
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }

    config.validate()?;
    Ok(config)
}

/// Print the default configuration as YAML.
pub fn print_default_config() -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(&CurationConfig::default())?;
    println!("{yaml}");
    Ok(())
}

/// Write a default configuration file.
pub fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "'{}' already exists (use --force to overwrite)",
            args.output.display()
        );
    }
    CurationConfig::default().to_yaml_file(&args.output)?;
    println!("Wrote default configuration to '{}'", args.output.display());
    Ok(())
}

/// Validate a configuration file, reporting the first problem found.
pub fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    let config = CurationConfig::from_yaml_file(&args.config)
        .with_context(|| format!("Configuration '{}' is invalid", args.config.display()))?;
    config.validate()?;
    println!("Configuration '{}' is valid", args.config.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codecull_rs::LmTask;
    use std::path::PathBuf;

    fn bare_args(config: Option<PathBuf>) -> CurateArgs {
        CurateArgs {
            input: PathBuf::from("corpus"),
            config,
            deduplicate: false,
            stats: false,
            cache_output: None,
            max_size_bytes: None,
            min_tokens: None,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            jobs: None,
            out: None,
            lm_task: LmTask::Causal,
        }
    }

    #[test]
    fn yaml_settings_survive_unset_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("codecull.yml");
        std::fs::write(
            &config_path,
            "jobs: 4\ndeduplicate: true\nmin_tokens: 30\n",
        )
        .unwrap();

        let config = build_config(&bare_args(Some(config_path))).unwrap();
        assert_eq!(config.jobs, 4);
        assert!(config.deduplicate);
        assert_eq!(config.min_tokens, 30);
    }

    #[test]
    fn flags_override_yaml_when_given() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("codecull.yml");
        std::fs::write(&config_path, "jobs: 4\nmin_tokens: 30\n").unwrap();

        let mut args = bare_args(Some(config_path));
        args.jobs = Some(2);
        args.min_tokens = Some(5);

        let config = build_config(&args).unwrap();
        assert_eq!(config.jobs, 2);
        assert_eq!(config.min_tokens, 5);
    }
}
