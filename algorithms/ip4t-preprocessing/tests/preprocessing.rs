use approx::assert_abs_diff_eq;
use ip4t::prelude::*;
use ip4t_preprocessing::{FeatureEncoder, FeatureFrame, PreprocessingError, Smote};
use ndarray::{array, Array1, Array2};

fn cell(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn frame(
    rows: Vec<usize>,
    area: Vec<Option<f64>>,
    region: Vec<Option<String>>,
) -> FeatureFrame<f64> {
    let n = rows.len();
    FeatureFrame::new(
        rows,
        Array2::from_shape_vec((n, 1), area).unwrap(),
        vec!["Luas  m2".to_string()],
        Array2::from_shape_vec((n, 1), region).unwrap(),
        vec!["KABUPATEN".to_string()],
    )
    .unwrap()
}

#[test]
fn encode_then_balance_training_rows() {
    let train = frame(
        vec![0, 1, 2, 3, 5, 6],
        vec![Some(100.), Some(120.), Some(110.), Some(900.), Some(950.), None],
        vec![
            cell("BOGOR"),
            cell("BOGOR"),
            cell("BEKASI"),
            cell("DEPOK"),
            cell("DEPOK"),
            cell("BOGOR"),
        ],
    );
    let test = frame(vec![4], vec![Some(130.)], vec![cell("KARAWANG")]);
    let targets = array!["TIDAK", "TIDAK", "TIDAK", "YA", "YA", "TIDAK"];

    let split = FeatureEncoder::new().encode_split(&train, &test).unwrap();
    assert_eq!(
        split.feature_names,
        vec![
            "Luas  m2",
            "KABUPATEN_BEKASI",
            "KABUPATEN_BOGOR",
            "KABUPATEN_DEPOK"
        ]
    );
    // the test row has an unseen region and its area is kept as is
    assert_abs_diff_eq!(split.test, array![[130., 0., 0., 0.]]);

    let dataset =
        Dataset::new(split.train.clone(), targets).with_feature_names(split.feature_names);
    let balanced = Smote::params().resample(&dataset).unwrap();

    let counts = balanced.label_count();
    assert_eq!(counts["TIDAK"], 4);
    assert_eq!(counts["YA"], 4);
    assert_eq!(balanced.nsamples(), 8);
    assert_eq!(balanced.nfeatures(), 4);

    // synthetic rows of YA interpolate the two DEPOK rows
    for row in balanced.records().rows().into_iter().skip(6) {
        assert!(row[0] >= 900. && row[0] <= 950.);
        assert_abs_diff_eq!(row[3], 1.);
    }
}

#[test]
fn single_member_minority_stops_oversampling() {
    let records = Array2::from_shape_fn((5, 2), |(i, j)| (i + j) as f64);
    let targets: Array1<String> = vec!["TIDAK", "TIDAK", "TIDAK", "TIDAK", "YA"]
        .into_iter()
        .map(String::from)
        .collect();
    let dataset = Dataset::new(records, targets);

    let res = Smote::params().resample(&dataset);
    assert!(matches!(
        res,
        Err(PreprocessingError::InsufficientMinoritySamples { count: 1, .. })
    ));
}
