// tests/integration_generate.rs
//! End-to-end runs of the generation pipeline over real directories.

use anyhow::Result;
use sonargen_core::config::{self, AnalysisConfig};
use sonargen_core::conflict::SONAR_PROPERTIES_FILE_NAME;
use sonargen_core::discovery::{collect_records, PROJECT_INFO_FILE_NAME};
use sonargen_core::error::GenError;
use sonargen_core::generator::generate;
use sonargen_core::logger::TestLogger;
use sonargen_core::project::{
    AnalysisResult, AnalysisResultKind, ProjectKind, ProjectRecord, Property,
};
use sonargen_core::validity::ValidityStatus;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// --- Helpers ---

const GUID_1: &str = "DB2E5521-3172-47B9-BA50-864F12E6DFFF";
const GUID_2: &str = "B51622CF-82F4-48C9-9F38-FB981FAFAF3A";
const GUID_3: &str = "DA0FCD82-9C5C-4666-9370-C7388281D49B";

fn make_config(output_dir: &Path) -> AnalysisConfig {
    AnalysisConfig {
        sonar_project_key: "my_project_key".to_string(),
        sonar_project_name: "my_project_name".to_string(),
        sonar_project_version: "1.0".to_string(),
        sonar_output_dir: output_dir.to_path_buf(),
        sonar_qube_version: None,
        global_settings: Vec::new(),
    }
}

/// Creates a project directory with real source files and a
/// files-to-analyze list, returning its record.
fn make_project(
    root: &Path,
    name: &str,
    guid: &str,
    kind: ProjectKind,
    files: &[&str],
) -> Result<ProjectRecord> {
    let dir = root.join(name);
    fs::create_dir_all(&dir)?;
    let mut lines = Vec::new();
    for file in files {
        let path = dir.join(file);
        fs::write(&path, "")?;
        lines.push(path.display().to_string());
    }
    let list = dir.join("FilesToAnalyze.txt");
    fs::write(&list, lines.join("\n"))?;

    Ok(ProjectRecord {
        project_guid: guid.to_string(),
        project_name: name.to_string(),
        kind,
        full_path: dir.join(format!("{name}.csproj")),
        language: None,
        encoding: None,
        analysis_results: vec![AnalysisResult {
            kind: AnalysisResultKind::FilesToAnalyze,
            location: list,
        }],
        analysis_settings: Vec::new(),
        analyzer_out_paths: Vec::new(),
        exclude: false,
    })
}

// --- End to end ---

#[test]
fn test_three_projects_produce_three_module_blocks_in_order() -> Result<()> {
    let root = TempDir::new()?;
    let out = TempDir::new()?;
    let cwd = TempDir::new()?;

    let records = vec![
        make_project(root.path(), "alpha", GUID_1, ProjectKind::Product, &["A.cs", "B.cs"])?,
        make_project(root.path(), "beta", GUID_2, ProjectKind::Product, &["C.cs"])?,
        make_project(root.path(), "gamma", GUID_3, ProjectKind::Test, &["T.cs"])?,
    ];
    let config = make_config(out.path());
    let mut logger = TestLogger::new();

    let outcome = generate(&config, records, cwd.path(), &mut logger)?;
    let contents = &outcome.contents;

    // Module blocks appear in input order.
    let pos_1 = contents.find(&format!("{GUID_1}.sonar.projectKey=")).unwrap();
    let pos_2 = contents.find(&format!("{GUID_2}.sonar.projectKey=")).unwrap();
    let pos_3 = contents.find(&format!("{GUID_3}.sonar.projectKey=")).unwrap();
    assert!(pos_1 < pos_2 && pos_2 < pos_3);

    // Base directories are present (tmp paths are plain ASCII, so escaping
    // is the identity here).
    assert!(contents.contains(&format!(
        "{GUID_1}.sonar.projectBaseDir={}\r\n",
        root.path().join("alpha").display()
    )));

    // Test projects get an empty sources value and a tests list.
    assert!(contents.contains(&format!("{GUID_3}.sonar.sources=\r\n")));
    assert!(contents.contains(&format!("{GUID_3}.sonar.tests=\\\r\n")));

    // Working directories in strictly increasing ordinal order.
    for n in 0..3 {
        assert!(contents.contains(&format!(".sonar.working.directory={}\r\n",
            out.path().join(".sonar").join(format!("mod{n}")).display())));
    }

    assert!(contents.contains(&format!("sonar.modules={GUID_1},{GUID_2},{GUID_3}\r\n")));
    Ok(())
}

#[test]
fn test_invalid_projects_leave_no_ordinal_gaps() -> Result<()> {
    let root = TempDir::new()?;
    let out = TempDir::new()?;
    let cwd = TempDir::new()?;

    let records = vec![
        make_project(root.path(), "bad", "not-a-guid", ProjectKind::Product, &["A.cs"])?,
        make_project(root.path(), "good1", GUID_1, ProjectKind::Product, &["B.cs"])?,
        make_project(root.path(), "good2", GUID_2, ProjectKind::Product, &["C.cs"])?,
    ];
    let config = make_config(out.path());
    let mut logger = TestLogger::new();

    let outcome = generate(&config, records, cwd.path(), &mut logger)?;

    assert!(outcome.contents.contains("mod0"));
    assert!(outcome.contents.contains("mod1"));
    assert!(!outcome.contents.contains("mod2"));
    assert!(outcome.contents.contains(&format!("sonar.modules={GUID_1},{GUID_2}\r\n")));
    assert_eq!(outcome.projects[0].status, ValidityStatus::InvalidGuid);
    Ok(())
}

#[test]
fn test_global_settings_and_project_info_written() -> Result<()> {
    let root = TempDir::new()?;
    let out = TempDir::new()?;
    let cwd = TempDir::new()?;

    let records =
        vec![make_project(root.path(), "alpha", GUID_1, ProjectKind::Product, &["A.cs"])?];
    let mut config = make_config(out.path());
    config.global_settings = vec![Property {
        id: "sonar.branch".to_string(),
        value: "aBranch".to_string(),
    }];
    let mut logger = TestLogger::new();

    let outcome = generate(&config, records, cwd.path(), &mut logger)?;

    assert!(outcome.contents.contains("sonar.branch=aBranch\r\n"));
    assert!(outcome.contents.contains("sonar.projectKey=my_project_key\r\n"));
    assert!(outcome.contents.contains("sonar.projectVersion=1.0\r\n"));
    Ok(())
}

// --- Conflict gate ---

#[test]
fn test_conflict_aborts_and_lists_every_directory() -> Result<()> {
    let root = TempDir::new()?;
    let out = TempDir::new()?;
    let cwd = TempDir::new()?;

    let records = vec![
        make_project(root.path(), "alpha", GUID_1, ProjectKind::Product, &["A.cs"])?,
        make_project(root.path(), "beta", GUID_2, ProjectKind::Product, &["B.cs"])?,
    ];
    fs::write(root.path().join("alpha").join(SONAR_PROPERTIES_FILE_NAME), "")?;
    fs::write(cwd.path().join(SONAR_PROPERTIES_FILE_NAME), "")?;

    let config = make_config(out.path());
    let mut logger = TestLogger::new();

    let err = generate(&config, records, cwd.path(), &mut logger).unwrap_err();

    match err {
        GenError::PropertiesFileConflict(dirs) => {
            assert_eq!(dirs.len(), 2);
            assert!(dirs.contains(&root.path().join("alpha")));
            assert!(dirs.contains(&cwd.path().to_path_buf()));
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_zero_valid_projects_is_an_error() -> Result<()> {
    let root = TempDir::new()?;
    let out = TempDir::new()?;
    let cwd = TempDir::new()?;

    let mut excluded = make_project(root.path(), "alpha", GUID_1, ProjectKind::Product, &["A.cs"])?;
    excluded.exclude = true;

    let config = make_config(out.path());
    let mut logger = TestLogger::new();

    let err = generate(&config, vec![excluded], cwd.path(), &mut logger).unwrap_err();
    assert!(matches!(err, GenError::NoProjectsToAnalyze));
    Ok(())
}

// --- Record discovery ---

#[test]
fn test_discovery_reads_records_in_sorted_order() -> Result<()> {
    let root = TempDir::new()?;
    let build = TempDir::new()?;

    let records = vec![
        make_project(root.path(), "zeta", GUID_1, ProjectKind::Product, &["A.cs"])?,
        make_project(root.path(), "alpha", GUID_2, ProjectKind::Product, &["B.cs"])?,
    ];
    for record in &records {
        let dir = build.path().join(&record.project_name);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(PROJECT_INFO_FILE_NAME), serde_json::to_string_pretty(record)?)?;
    }

    let collected = collect_records(build.path())?;

    assert_eq!(collected.len(), 2);
    // Sorted by path: alpha before zeta, regardless of creation order.
    assert_eq!(collected[0].project_name, "alpha");
    assert_eq!(collected[1].project_name, "zeta");
    Ok(())
}

#[test]
fn test_discovery_rejects_malformed_records() -> Result<()> {
    let build = TempDir::new()?;
    fs::write(build.path().join(PROJECT_INFO_FILE_NAME), "{ not json")?;

    let err = collect_records(build.path()).unwrap_err();
    assert!(matches!(err, GenError::MalformedRecord { .. }));
    Ok(())
}

// --- Config overlay ---

#[test]
fn test_overlay_fills_unset_fields_and_appends_properties() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("sonargen.toml"),
        r#"
[project]
key = "overlay_key"
name = "overlay_name"

[properties]
"sonar.branch" = "main"
"#,
    )?;

    let mut config = AnalysisConfig {
        sonar_project_key: "flag_key".to_string(),
        ..AnalysisConfig::default()
    };
    let overlay = config::load_overlay(dir.path())?.expect("overlay should load");
    overlay.apply_to(&mut config);

    // The CLI flag wins; unset fields come from the overlay.
    assert_eq!(config.sonar_project_key, "flag_key");
    assert_eq!(config.sonar_project_name, "overlay_name");
    assert_eq!(config.global_settings.len(), 1);
    assert_eq!(config.global_settings[0].id, "sonar.branch");
    Ok(())
}

#[test]
fn test_missing_overlay_is_not_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    assert!(config::load_overlay(dir.path())?.is_none());
    Ok(())
}
