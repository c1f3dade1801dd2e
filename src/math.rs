//! Transform matrices built from first principles.
//!
//! Every matrix is a plain `[[f32; 4]; 4]` indexed `[row][column]` in the
//! row-vector convention: a point is transformed as `v · M`, so translations
//! live in the last row and a chain `A · B` applies `A` first. Uploading the
//! array as-is to a column-major shader matrix yields the transpose, which is
//! exactly the column-vector form the shaders multiply with.

use cgmath::Vector3;

/// A 4x4 matrix stored as rows.
pub type Matrix4 = [[f32; 4]; 4];

/// The 4x4 identity.
pub fn identity() -> Matrix4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Row-by-column product `a · b`.
pub fn multiply(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let mut out = [[0.0; 4]; 4];
    for (row, out_row) in out.iter_mut().enumerate() {
        for (col, cell) in out_row.iter_mut().enumerate() {
            *cell = (0..4).map(|k| a[row][k] * b[k][col]).sum();
        }
    }
    out
}

/// OpenGL-style right-handed perspective projection.
///
/// `f = 1 / tan(fov / 2)`; the caller keeps `near != far`, `aspect_ratio > 0`
/// and `0 < fov_degrees < 180`, otherwise the result holds NaN or infinities.
pub fn perspective(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4 {
    let f = 1.0 / (fov_degrees.to_radians() / 2.0).tan();
    let nf = 1.0 / (near - far);
    [
        [f / aspect_ratio, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) * nf, -1.0],
        [0.0, 0.0, 2.0 * far * near * nf, 0.0],
    ]
}

pub fn rotation_x(degrees: f32) -> Matrix4 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, cos, -sin, 0.0],
        [0.0, sin, cos, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the vertical axis, used for the camera yaw.
pub fn rotation_y(degrees: f32) -> Matrix4 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [cos, 0.0, sin, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-sin, 0.0, cos, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub fn rotation_z(degrees: f32) -> Matrix4 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [cos, -sin, 0.0, 0.0],
        [sin, cos, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Combined Euler rotation `Rz · Ry · Rx`.
///
/// The composition order is fixed; swapping it changes how every rotated
/// object in the scene looks.
pub fn rotation_xyz(euler_degrees: Vector3<f32>) -> Matrix4 {
    let zy = multiply(&rotation_z(euler_degrees.z), &rotation_y(euler_degrees.y));
    multiply(&zy, &rotation_x(euler_degrees.x))
}

pub fn scale_matrix(scale: Vector3<f32>) -> Matrix4 {
    [
        [scale.x, 0.0, 0.0, 0.0],
        [0.0, scale.y, 0.0, 0.0],
        [0.0, 0.0, scale.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub fn translation_matrix(position: Vector3<f32>) -> Matrix4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [position.x, position.y, position.z, 1.0],
    ]
}

/// Model matrix `identity · scale · rotation · translation`.
///
/// Scale is innermost and translation outermost. The chain is evaluated left
/// to right and must not be reordered.
pub fn model_matrix(position: Vector3<f32>, euler_degrees: Vector3<f32>, scale: Vector3<f32>) -> Matrix4 {
    [
        scale_matrix(scale),
        rotation_xyz(euler_degrees),
        translation_matrix(position),
    ]
    .iter()
    .fold(identity(), |acc, m| multiply(&acc, m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_by_identity_is_a_no_op() {
        let m = perspective(60.0, 1.5, 0.5, 20.0);
        assert_eq!(multiply(&identity(), &m), m);
        assert_eq!(multiply(&m, &identity()), m);
    }

    #[test]
    fn translation_moves_a_point_in_row_vector_form() {
        let t = translation_matrix(Vector3::new(1.0, 2.0, 3.0));
        let point = [[4.0, 5.0, 6.0, 1.0], [0.0; 4], [0.0; 4], [0.0; 4]];
        let moved = multiply(&point, &t);
        assert_eq!(moved[0], [5.0, 7.0, 9.0, 1.0]);
    }
}
