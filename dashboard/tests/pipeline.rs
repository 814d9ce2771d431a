use std::collections::BTreeSet;
use std::io::Write;

use ip4t_dashboard::{
    run_analysis, show_tree, DashboardConfig, PipelineError, SectionOutcome, Session, ViewError,
};
use tempfile::NamedTempFile;

/// Fifty parcels, every fifth one with toll road potential
fn program_csv() -> String {
    let mut csv = "NO;KABUPATEN;STATUS;Luas  m2;POTENSI TOL\n".to_string();
    for i in 0..50 {
        let line = if i % 5 == 0 {
            format!("{};BOGOR;SHM;{};YA\n", i + 1, 1000 + 10 * i)
        } else {
            let region = ["BEKASI", "DEPOK", "BOGOR"][i % 3];
            let status = if i % 2 == 0 { "SHM" } else { "HGB" };
            format!("{};{};{};{};TIDAK\n", i + 1, region, status, 100 + i)
        };
        csv.push_str(&line);
    }

    csv
}

fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn config_for(file: &NamedTempFile) -> DashboardConfig {
    DashboardConfig {
        dataset_path: file.path().to_path_buf(),
        ..DashboardConfig::default()
    }
}

#[test]
fn full_run_publishes_forest() {
    let file = fixture(&program_csv());
    let config = config_for(&file);
    let mut session = Session::new();

    let report = run_analysis(&config, &mut session).unwrap();
    assert!(report.dropped_index);
    assert!(report.area.is_ok());
    assert!(report.target.is_ok());

    let modeling = report.modeling.ok().unwrap();

    // train and test partition the labelled rows
    let train = modeling.train_rows.iter().copied().collect::<BTreeSet<_>>();
    let test = modeling.test_rows.iter().copied().collect::<BTreeSet<_>>();
    assert!(train.is_disjoint(&test));
    assert_eq!(train.union(&test).count(), 50);
    assert_eq!(test.len(), 10);
    // two of ten positive parcels are held out, as in the whole dataset
    assert_eq!(test.iter().filter(|r| *r % 5 == 0).count(), 2);

    // every class reaches the majority count of the training rows
    assert_eq!(modeling.balanced.len(), 2);
    assert!(modeling.balanced.iter().all(|s| s.count == 32));

    let cm = &modeling.confusion;
    assert_eq!(cm.members().to_vec(), vec!["TIDAK", "YA"]);
    assert_eq!(cm.support().to_vec(), vec![8, 2]);
    let trace = cm.matrix().diag().sum() as f32;
    assert!((modeling.report.accuracy - trace / 10.0).abs() < 1e-6);

    let artifacts = session.artifacts().unwrap();
    assert_eq!(artifacts.forest.trees().len(), 100);
    assert_eq!(artifacts.feature_matrix.nrows(), 50);
    assert_eq!(artifacts.feature_matrix.ncols(), artifacts.feature_names.len());
    assert_eq!(artifacts.feature_names[0], "Luas  m2");
    assert_eq!(artifacts.class_labels, vec!["TIDAK", "YA"]);
    assert_eq!(artifacts.run_id, 1);

    let rendered = report.to_string();
    assert!(rendered.contains("== Confusion matrix after SMOTE =="));
    assert!(rendered.contains("== Classification report =="));
}

#[test]
fn trees_are_shown_by_number() {
    let file = fixture(&program_csv());
    let config = config_for(&file);
    let mut session = Session::new();

    assert_eq!(show_tree(&session, 1), Err(ViewError::ModelNotAvailable));

    run_analysis(&config, &mut session).unwrap();

    let first = show_tree(&session, 1).unwrap();
    assert!(first.starts_with("Decision tree 1 of 100"));
    assert!(first.contains("samples = "));
    assert!(show_tree(&session, 100).is_ok());

    assert_eq!(
        show_tree(&session, 101),
        Err(ViewError::IndexOutOfRange {
            index: 101,
            n_trees: 100
        })
    );
    assert!(show_tree(&session, 0).is_err());
}

#[test]
fn missing_target_skips_modeling() {
    let file = fixture("NO;KABUPATEN;Luas  m2\n1;BOGOR;120\n2;DEPOK;80\n3;BOGOR;95\n");
    let config = config_for(&file);
    let mut session = Session::new();

    let report = run_analysis(&config, &mut session).unwrap();

    assert!(report.target.is_skipped());
    assert!(report.modeling.is_skipped());
    assert!(report.area.is_ok());
    assert_eq!(report.overview.head.nrows(), 3);
    assert_eq!(report.overview.numeric.len(), 1);
    assert_eq!(report.overview.categorical[0].0, "KABUPATEN");
    assert!(session.artifacts().is_none());
    assert_eq!(show_tree(&session, 1), Err(ViewError::ModelNotAvailable));
}

#[test]
fn single_member_class_fails_modeling_only() {
    let mut csv = "KABUPATEN;Luas  m2;POTENSI TOL\n".to_string();
    for i in 0..20 {
        let label = if i == 7 { "YA" } else { "TIDAK" };
        csv.push_str(&format!("BOGOR;{};{}\n", 100 + i, label));
    }
    let file = fixture(&csv);
    let config = config_for(&file);
    let mut session = Session::new();

    let report = run_analysis(&config, &mut session).unwrap();

    match &report.modeling {
        SectionOutcome::Failed(message) => assert!(message.contains("class YA has 1 samples")),
        _ => panic!("modeling should fail"),
    }
    assert!(report.area.is_ok());
    assert!(report.target.is_ok());
    assert!(session.artifacts().is_none());
}

#[test]
fn second_run_replaces_artifacts() {
    let file = fixture(&program_csv());
    let mut session = Session::new();

    let first = DashboardConfig {
        n_trees: 5,
        ..config_for(&file)
    };
    run_analysis(&first, &mut session).unwrap();
    assert_eq!(session.artifacts().unwrap().forest.trees().len(), 5);

    let second = DashboardConfig {
        n_trees: 7,
        ..config_for(&file)
    };
    run_analysis(&second, &mut session).unwrap();

    let artifacts = session.artifacts().unwrap();
    assert_eq!(artifacts.forest.trees().len(), 7);
    assert_eq!(artifacts.run_id, 2);
    assert_eq!(
        show_tree(&session, 8),
        Err(ViewError::IndexOutOfRange {
            index: 8,
            n_trees: 7
        })
    );

    // a failing run keeps the forest of the last successful one
    let broken = DashboardConfig {
        n_trees: 0,
        ..config_for(&file)
    };
    let report = run_analysis(&broken, &mut session).unwrap();
    assert!(report.modeling.is_failed());
    assert_eq!(session.artifacts().unwrap().run_id, 2);

    session.clear();
    assert!(session.artifacts().is_none());
}

#[test]
fn unlabelled_rows_are_left_out() {
    let mut csv = program_csv();
    csv.push_str("51;BOGOR;SHM;130;\n52;DEPOK;HGB;140;\n");
    let file = fixture(&csv);
    let mut session = Session::new();

    let report = run_analysis(&config_for(&file), &mut session).unwrap();
    let modeling = report.modeling.ok().unwrap();

    assert_eq!(modeling.train_rows.len() + modeling.test_rows.len(), 50);
    assert!(!modeling.train_rows.contains(&50));
    assert!(!modeling.test_rows.contains(&51));
    assert_eq!(report.overview.info.rows, 52);
}

#[test]
fn unreadable_dataset_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = DashboardConfig {
        dataset_path: dir.path().join("dataset28052025.csv"),
        ..DashboardConfig::default()
    };
    let mut session = Session::new();

    assert!(matches!(
        run_analysis(&config, &mut session),
        Err(PipelineError::Load(_))
    ));
    assert_eq!(session.runs(), 0);
}

#[test]
fn short_rows_keep_the_page() {
    let mut csv = program_csv();
    csv.push_str("51;DEPOK;HGB\n");
    let file = fixture(&csv);
    let mut session = Session::new();

    let report = run_analysis(&config_for(&file), &mut session).unwrap();

    assert_eq!(report.overview.info.rows, 51);
    assert!(report.area.is_ok());
    let modeling = report.modeling.ok().unwrap();
    assert_eq!(modeling.train_rows.len() + modeling.test_rows.len(), 50);
}
