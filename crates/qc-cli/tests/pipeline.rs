//! Integration tests for the extraction pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use qc_cli::pipeline::{ExtractConfig, run_extract};
use qc_core::ExtractOptions;

fn fixed_stamp(_: &Path) -> Option<String> {
    Some("1742".to_string())
}

fn setup(files: &[(&str, &str)]) -> (TempDir, ExtractConfig) {
    let dir = TempDir::new().unwrap();
    let input_dir = dir.path().join("Datos_txt");
    fs::create_dir(&input_dir).unwrap();
    for (name, contents) in files {
        fs::write(input_dir.join(name), contents).unwrap();
    }
    let config = ExtractConfig {
        input_dir,
        output_dir: dir.path().join("Plantillas"),
        dry_run: false,
        options: ExtractOptions::default(),
    };
    (dir, config)
}

fn output_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

const PRINTOUT: &str = "Índice 05/31/2025 08:10\n\
                        LYPHOCHEK-ASSAYED\n\
                        GLU - 1 95.0: CHOL-C - 2 180:\n\
                        QC1 LIQUICHEK URINE\n\
                        GLU - 3 999:\n";

#[test]
fn writes_plain_and_timestamped_tables() {
    let (_dir, config) = setup(&[("a.txt", PRINTOUT), ("b.txt", PRINTOUT)]);

    let result = run_extract(&config, &fixed_stamp).unwrap();

    assert!(!result.has_errors());
    assert_eq!(result.processed, 2);
    assert_eq!(
        output_names(&config.output_dir),
        vec!["05_31_2025.csv".to_string(), "05_31_2025_1742.csv".to_string()]
    );
    let csv = fs::read_to_string(config.output_dir.join("05_31_2025.csv")).unwrap();
    assert!(csv.contains("1,Glucosa,95.0,0.0,0.0"));
    assert!(csv.contains("2,Colesterol Total (CHOL),0.0,180.0,0.0"));
}

#[test]
fn empty_printouts_produce_no_table() {
    let (_dir, config) = setup(&[
        ("zeros.txt", "Índice 06/01/2025\nLYPHOCHEK-ASSAYED\nGLU - 1 0:\n"),
        ("no-window.txt", "GLU - 1 95:\n"),
    ]);

    let result = run_extract(&config, &fixed_stamp).unwrap();

    assert!(result.written.is_empty());
    assert_eq!(result.empty_files.len(), 2);
    assert!(output_names(&config.output_dir).is_empty());
}

#[test]
fn dry_run_leaves_output_folder_absent() {
    let (_dir, mut config) = setup(&[("a.txt", PRINTOUT)]);
    config.dry_run = true;

    let result = run_extract(&config, &fixed_stamp).unwrap();

    assert_eq!(result.written.len(), 1);
    assert!(!config.output_dir.exists());
}

#[test]
fn missing_input_folder_is_fatal() {
    let (dir, mut config) = setup(&[]);
    config.input_dir = PathBuf::from(dir.path()).join("nope");

    let error = run_extract(&config, &fixed_stamp).unwrap_err();

    assert!(format!("{error:#}").contains("directory not found"));
    assert!(!config.output_dir.exists());
}
