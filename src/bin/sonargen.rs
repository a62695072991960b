// src/bin/sonargen.rs
use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use sonargen_core::config::{self, AnalysisConfig};
use sonargen_core::conflict::SONAR_PROPERTIES_FILE_NAME;
use sonargen_core::error::GenError;
use sonargen_core::logger::ConsoleLogger;
use sonargen_core::project::Property;
use sonargen_core::{discovery, generator, report};
use std::path::PathBuf;
use std::{env, fs, process};

#[derive(Parser)]
#[command(name = "sonargen")]
#[command(about = "Generates a sonar-project.properties file from per-project build records")]
struct Cli {
    /// Directory to scan for project-info.json record files
    #[arg(long)]
    input_dir: PathBuf,

    /// Directory receiving the properties file and the summary report
    #[arg(long)]
    output_dir: PathBuf,

    /// SonarQube project key (falls back to sonargen.toml)
    #[arg(long, default_value = "")]
    project_key: String,

    /// SonarQube project name (falls back to sonargen.toml)
    #[arg(long, default_value = "")]
    project_name: String,

    /// Project version written to the properties file
    #[arg(long, default_value = "")]
    project_version: String,

    /// Target SonarQube server version; gates the multi-value path encoding
    #[arg(long)]
    sonar_version: Option<String>,

    /// Extra global setting, key=value (repeatable)
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    define: Vec<String>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "ERROR:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut logger = ConsoleLogger::new(cli.verbose);

    // 1. Build the run configuration: CLI flags over the optional overlay.
    let invocation_dir = env::current_dir().context("cannot determine working directory")?;
    let mut analysis_config = AnalysisConfig {
        sonar_project_key: cli.project_key,
        sonar_project_name: cli.project_name,
        sonar_project_version: cli.project_version,
        sonar_output_dir: cli.output_dir.clone(),
        sonar_qube_version: cli.sonar_version,
        global_settings: parse_defines(&cli.define)?,
    };
    if let Some(overlay) = config::load_overlay(&invocation_dir)? {
        overlay.apply_to(&mut analysis_config);
    }
    analysis_config.validate()?;

    // 2. Collect the per-project records emitted by the build.
    let records = discovery::collect_records(&cli.input_dir)?;
    if cli.verbose {
        println!("Found {} project record(s) in {}", records.len(), cli.input_dir.display());
    }

    // 3. Classify, gate, and generate the properties buffer.
    let outcome = match generator::generate(&analysis_config, records, &invocation_dir, &mut logger)
    {
        Ok(outcome) => outcome,
        Err(GenError::PropertiesFileConflict(dirs)) => {
            eprintln!(
                "{}",
                "sonar-project.properties files are not understood by the \
                 SonarScanner for MSBuild. Remove those files from the \
                 following folders:"
                    .red()
            );
            for dir in dirs {
                eprintln!("    {}", dir.display());
            }
            bail!("generation aborted: conflicting properties files found");
        }
        Err(e) => return Err(e.into()),
    };

    // 4. Persist the buffer and the summary report.
    fs::create_dir_all(&analysis_config.sonar_output_dir).with_context(|| {
        format!("cannot create {}", analysis_config.sonar_output_dir.display())
    })?;
    let properties_path = analysis_config
        .sonar_output_dir
        .join(SONAR_PROPERTIES_FILE_NAME);
    fs::write(&properties_path, &outcome.contents)
        .with_context(|| format!("cannot write {}", properties_path.display()))?;
    let report_path = report::write_summary_report(&analysis_config, &outcome.projects)?;

    let valid = outcome.projects.iter().filter(|p| p.is_valid()).count();
    let skipped = outcome.projects.len() - valid;
    println!(
        "{}",
        format!(
            "Generated {} ({valid} module(s), {skipped} skipped). Summary: {}",
            properties_path.display(),
            report_path.display()
        )
        .green()
    );
    Ok(())
}

fn parse_defines(defines: &[String]) -> Result<Vec<Property>> {
    let mut settings = Vec::with_capacity(defines.len());
    for raw in defines {
        let Some((id, value)) = raw.split_once('=') else {
            bail!("invalid -D setting {raw:?}: expected KEY=VALUE");
        };
        settings.push(Property {
            id: id.to_string(),
            value: value.to_string(),
        });
    }
    Ok(settings)
}
