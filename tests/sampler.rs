use bevy_terrain_lut::{
    error::TerrainError,
    field::ScalarField,
    lut::LookupImage,
    sample,
    sampler::{LutSampler, SampleMode},
    types::{Axis, Rgb},
};
use ndarray::Array2;

/// Encodes the texel position in the color so lookups can be read back.
fn indexed_lut(rows: usize, cols: usize) -> LookupImage {
    LookupImage::from_fn(rows, cols, |(r, c)| [r as f32, c as f32, 0.5])
}

fn texel(color: Rgb) -> (usize, usize) {
    (color[0] as usize, color[1] as usize)
}

fn single(v: f32) -> ScalarField {
    ScalarField::constant(1, 1, v).unwrap()
}

#[test]
fn picks_row_from_elevation_and_column_from_steepness() {
    let lut = indexed_lut(5, 3);
    let field = ScalarField::from_vec(1, 3, vec![0.0, 0.5, 1.0]).unwrap();
    let steepness = ScalarField::from_vec(1, 3, vec![1.0, 0.5, 0.0]).unwrap();
    let colors = sample(&field, &steepness, &lut, 1.0).unwrap();
    assert_eq!(colors.shape(), (1, 3));
    assert_eq!(texel(colors.get(0, 0)), (0, 2));
    assert_eq!(texel(colors.get(0, 1)), (2, 1));
    assert_eq!(texel(colors.get(0, 2)), (4, 0));
}

#[test]
fn out_of_range_coordinates_saturate() {
    let lut = indexed_lut(4, 4);
    let high = sample(&single(2.0), &single(5.0), &lut, 1.0).unwrap();
    assert_eq!(texel(high.get(0, 0)), (3, 3));
    let low = sample(&single(-1.0), &single(-0.5), &lut, 1.0).unwrap();
    assert_eq!(texel(low.get(0, 0)), (0, 0));
}

#[test]
fn steepness_scale_amplifies_before_lookup() {
    let lut = indexed_lut(2, 11);
    let colors = sample(&single(0.0), &single(0.02), &lut, 10.0).unwrap();
    // 0.02 * 10 * 10 = 2
    assert_eq!(texel(colors.get(0, 0)), (0, 2));
    let saturated = sample(&single(0.0), &single(0.02), &lut, 150.0).unwrap();
    assert_eq!(texel(saturated.get(0, 0)), (0, 10));
}

#[test]
fn halfway_rounds_up() {
    let lut = indexed_lut(2, 2);
    let colors = sample(&single(0.5), &single(0.5), &lut, 1.0).unwrap();
    assert_eq!(texel(colors.get(0, 0)), (1, 1));
    let colors = sample(&single(0.49), &single(0.49), &lut, 1.0).unwrap();
    assert_eq!(texel(colors.get(0, 0)), (0, 0));
}

#[test]
fn single_axis_modes_pin_the_other_index() {
    let lut = indexed_lut(5, 5);
    let elevation_only = LutSampler::new(&lut).with_mode(SampleMode::SingleAxis(Axis::Elevation));
    let colors = elevation_only.sample(&single(0.75), &single(1.0)).unwrap();
    assert_eq!(texel(colors.get(0, 0)), (3, 0));

    let steepness_only = LutSampler::new(&lut)
        .with_mode(SampleMode::SingleAxis(Axis::Steepness))
        .with_steepness_scale(2.0);
    let colors = steepness_only.sample(&single(0.75), &single(0.25)).unwrap();
    assert_eq!(texel(colors.get(0, 0)), (0, 2));
}

#[test]
fn empty_lut_is_invalid() {
    let lut = LookupImage::new(Array2::from_elem((0, 3), [0.0; 3]));
    assert!(matches!(
        sample(&single(0.5), &single(0.5), &lut, 1.0),
        Err(TerrainError::InvalidLut { rows: 0, cols: 3 })
    ));
    let lut = LookupImage::new(Array2::from_elem((2, 0), [0.0; 3]));
    assert!(matches!(
        sample(&single(0.5), &single(0.5), &lut, 1.0),
        Err(TerrainError::InvalidLut { rows: 2, cols: 0 })
    ));
}

#[test]
fn mismatched_shapes_are_rejected() {
    let lut = indexed_lut(2, 2);
    let field = ScalarField::constant(2, 3, 0.5).unwrap();
    let steepness = ScalarField::constant(3, 2, 0.5).unwrap();
    match sample(&field, &steepness, &lut, 1.0) {
        Err(TerrainError::ShapeMismatch { expected, found }) => {
            assert_eq!(expected, (2, 3));
            assert_eq!(found, (3, 2));
        }
        other => panic!("expected ShapeMismatch, got {:?}", other),
    }
}
