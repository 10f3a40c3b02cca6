use bevy_terrain_lut::{error::TerrainError, field::ScalarField, normalize};

fn bumpy(rows: usize, cols: usize) -> ScalarField {
    let values = (0..rows * cols)
        .map(|i| ((i * 37) % 11) as f32 * 2.5 - 7.0)
        .collect();
    ScalarField::from_vec(rows, cols, values).unwrap()
}

#[test]
fn normalized_field_spans_unit_range() {
    let out = normalize(&bumpy(9, 13), false, 1.0).unwrap();
    let (lo, hi) = out.min_max();
    assert_eq!(lo, 0.0);
    assert!((hi - 1.0).abs() < 1e-6, "max {}", hi);
    assert_eq!(out.shape(), (9, 13));
}

#[test]
fn smoothed_field_spans_unit_range() {
    let out = normalize(&bumpy(16, 16), true, 1.5).unwrap();
    let (lo, hi) = out.min_max();
    assert!(lo.abs() < 1e-6, "min {}", lo);
    assert!((hi - 1.0).abs() < 1e-6, "max {}", hi);
    assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn normalization_is_affine() {
    let raw = ScalarField::from_vec(1, 4, vec![10.0, 12.0, 15.0, 20.0]).unwrap();
    let out = normalize(&raw, false, 1.0).unwrap();
    let expected = [0.0, 0.2, 0.5, 1.0];
    for (c, e) in expected.iter().enumerate() {
        assert!((out.get(0, c) - e).abs() < 1e-6);
    }
}

#[test]
fn range_wider_than_f32_stays_finite() {
    // max - min overflows f32 here.
    let raw = ScalarField::from_vec(1, 3, vec![-3e38, 0.0, 3e38]).unwrap();
    let out = normalize(&raw, false, 1.0).unwrap();
    assert!(out.iter().all(|v| v.is_finite()));
    assert_eq!(out.get(0, 0), 0.0);
    assert!((out.get(0, 1) - 0.5).abs() < 1e-6);
    assert_eq!(out.get(0, 2), 1.0);
}

#[test]
fn smoothing_flattens_a_spike() {
    let mut values = vec![0.0; 81];
    values[40] = 1.0;
    values[0] = 0.5;
    let raw = ScalarField::from_vec(9, 9, values).unwrap();
    let sharp = normalize(&raw, false, 1.0).unwrap();
    let soft = normalize(&raw, true, 1.0).unwrap();
    // The spike's neighbours pick up weight once blurred.
    assert_eq!(sharp.get(4, 5), 0.0);
    assert!(soft.get(4, 5) > 0.1);
}

#[test]
fn constant_field_is_degenerate() {
    let raw = ScalarField::constant(4, 4, 3.0).unwrap();
    match normalize(&raw, false, 1.0) {
        Err(TerrainError::DegenerateField { value }) => assert_eq!(value, 3.0),
        other => panic!("expected DegenerateField, got {:?}", other),
    }
    // Blurring a constant field keeps it constant.
    assert!(matches!(
        normalize(&raw, true, 2.0),
        Err(TerrainError::DegenerateField { .. })
    ));
}

#[test]
fn non_finite_input_is_rejected() {
    let mut values = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    values[5] = f32::NAN;
    let raw = ScalarField::from_vec(2, 3, values).unwrap();
    assert!(matches!(
        normalize(&raw, false, 1.0),
        Err(TerrainError::NonFiniteValue { row: 1, col: 2 })
    ));
}

#[test]
fn sigma_is_checked_only_when_smoothing() {
    let raw = bumpy(4, 4);
    assert!(matches!(
        normalize(&raw, true, 0.0),
        Err(TerrainError::InvalidSigma { .. })
    ));
    // A huge sigma is rejected before any kernel is allocated.
    assert!(matches!(
        normalize(&raw, true, 1e30),
        Err(TerrainError::InvalidSigma { .. })
    ));
    assert!(normalize(&raw, false, 0.0).is_ok());
}

#[test]
fn empty_fields_cannot_be_built() {
    assert!(matches!(
        ScalarField::from_vec(0, 3, vec![]),
        Err(TerrainError::EmptyField)
    ));
    assert!(matches!(
        ScalarField::from_vec(2, 3, vec![1.0; 5]),
        Err(TerrainError::Layout(_))
    ));
}
