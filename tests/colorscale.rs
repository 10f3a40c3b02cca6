use bevy_terrain_lut::{
    colorscale::{ColorStop, Colorscale, DEFAULT_RESOLUTION},
    error::TerrainError,
    field::ScalarField,
    sampler::{LutSampler, SampleMode},
    types::{Axis, Rgb},
};

fn assert_rgb_close(a: Rgb, b: Rgb) {
    for i in 0..3 {
        assert!((a[i] - b[i]).abs() < 1e-5, "{:?} != {:?}", a, b);
    }
}

fn black_white() -> Colorscale {
    Colorscale::new(vec![
        ColorStop::new(0.0, [0.0, 0.0, 0.0]),
        ColorStop::new(1.0, [1.0, 1.0, 1.0]),
    ])
    .unwrap()
}

#[test]
fn interpolates_between_stops() {
    let scale = black_white();
    assert_rgb_close(scale.sample(0.25), [0.25, 0.25, 0.25]);
    assert_rgb_close(scale.sample(1.0), [1.0, 1.0, 1.0]);
}

#[test]
fn clamps_outside_unit_range() {
    let scale = black_white();
    assert_rgb_close(scale.sample(-3.0), [0.0, 0.0, 0.0]);
    assert_rgb_close(scale.sample(7.0), [1.0, 1.0, 1.0]);
    assert_rgb_close(scale.sample(f32::NAN), [0.0, 0.0, 0.0]);
}

#[test]
fn slope_preset_holds_grey_above_point_three() {
    let scale = Colorscale::slope();
    let grey = [50.0 / 255.0, 50.0 / 255.0, 60.0 / 255.0];
    assert_rgb_close(scale.sample(0.3), grey);
    assert_rgb_close(scale.sample(0.8), grey);
    assert_rgb_close(scale.sample(0.0), [15.0 / 255.0, 150.0 / 255.0, 50.0 / 255.0]);
    // Halfway between the green and brown stops.
    assert_rgb_close(
        scale.sample(0.05),
        [57.5 / 255.0, 105.0 / 255.0, 50.0 / 255.0],
    );
}

#[test]
fn viridis_endpoints() {
    let scale = Colorscale::viridis();
    assert_eq!(scale.stops().len(), 10);
    assert_rgb_close(scale.sample(0.0), [68.0 / 255.0, 1.0 / 255.0, 84.0 / 255.0]);
    assert_rgb_close(scale.sample(1.0), [253.0 / 255.0, 231.0 / 255.0, 37.0 / 255.0]);
}

#[test]
fn rejects_malformed_stops() {
    let one = vec![ColorStop::new(0.0, [0.0; 3])];
    let unordered = vec![
        ColorStop::new(0.0, [0.0; 3]),
        ColorStop::new(0.6, [0.0; 3]),
        ColorStop::new(0.4, [0.0; 3]),
        ColorStop::new(1.0, [0.0; 3]),
    ];
    let short = vec![ColorStop::new(0.0, [0.0; 3]), ColorStop::new(0.9, [0.0; 3])];
    let nan = vec![ColorStop::new(0.0, [0.0; 3]), ColorStop::new(f32::NAN, [0.0; 3])];
    for stops in [one, unordered, short, nan] {
        assert!(matches!(
            Colorscale::new(stops),
            Err(TerrainError::InvalidColorscale { .. })
        ));
    }
}

#[test]
fn baked_lut_layout_follows_axis() {
    let scale = black_white();
    let rows = scale.to_lut(DEFAULT_RESOLUTION, Axis::Elevation);
    assert_eq!(rows.shape(), (DEFAULT_RESOLUTION, 1));
    let cols = scale.to_lut(16, Axis::Steepness);
    assert_eq!(cols.shape(), (1, 16));
    assert_eq!(scale.to_lut(0, Axis::Elevation).shape(), (2, 1));
}

#[test]
fn single_axis_sampling_reproduces_the_scale() {
    let scale = Colorscale::viridis();
    let lut = scale.to_lut(DEFAULT_RESOLUTION, Axis::Elevation);
    let values = (0..=10).map(|i| i as f32 / 10.0).collect();
    let field = ScalarField::from_vec(1, 11, values).unwrap();
    let steepness = ScalarField::constant(1, 11, 0.9).unwrap();
    let colors = LutSampler::new(&lut)
        .with_mode(SampleMode::SingleAxis(Axis::Elevation))
        .sample(&field, &steepness)
        .unwrap();
    for c in 0..11 {
        let expected = scale.sample(c as f32 / 10.0);
        let got = colors.get(0, c);
        // One texel of quantization.
        for i in 0..3 {
            assert!((got[i] - expected[i]).abs() < 0.02, "{:?} vs {:?}", got, expected);
        }
    }
}
