use nalgebra::Vector3;

/// Scalar value stored in every grid cell.
pub type Value = f32;

/// Linear RGB triple with channels in `[0, 1]`.
pub type Rgb = [Value; 3];

/// A 3D vector with [`Value`] components.
pub type Vector = Vector3<Value>;

/// Which lookup table axis a single scalar drives.
///
/// Rows of a [`LookupImage`](crate::lut::LookupImage) follow elevation, columns follow steepness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Elevation,
    Steepness,
}
