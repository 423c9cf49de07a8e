//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are column-major (`m[column][row]`), matching WGSL's `mat4x4<f32>` layout,
//! so they can be written to uniform buffers unchanged.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a rotation matrix in the plane spanned by two axes.
///
/// # Arguments
/// * `angle` - Rotation angle in radians
/// * `p1`, `p2` - Indices of the axes forming the rotation plane (0=X, 1=Y, 2=Z).
///   Positive angles rotate `p1` toward `p2`.
pub fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = IDENTITY;

    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

/// Rotation about the X axis (Y toward Z)
#[inline]
pub fn rotation_x(angle: f32) -> Mat4 {
    plane_rotation(angle, 1, 2)
}

/// Rotation about the Y axis (Z toward X)
#[inline]
pub fn rotation_y(angle: f32) -> Mat4 {
    plane_rotation(angle, 2, 0)
}

/// Rotation about the Z axis (X toward Y)
#[inline]
pub fn rotation_z(angle: f32) -> Mat4 {
    plane_rotation(angle, 0, 1)
}

/// Rotation from Euler angles applied in intrinsic X, Y, Z order.
///
/// The resulting matrix is `Rx * Ry * Rz`, so a vector is rotated about Z first.
pub fn euler_xyz(angles: Vec3) -> Mat4 {
    mul(mul(rotation_x(angles.x), rotation_y(angles.y)), rotation_z(angles.z))
}

/// Translation matrix
pub fn translation(offset: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = offset.x;
    m[3][1] = offset.y;
    m[3][2] = offset.z;
    m
}

/// Uniform scale matrix
pub fn scale(factor: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = factor;
    m[1][1] = factor;
    m[2][2] = factor;
    m
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point (w = 1) by a 4x4 matrix
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transform a direction (w = 0) by a 4x4 matrix
pub fn transform_vector(m: Mat4, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
    )
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

/// Right-handed perspective projection with a [0, 1] depth range (wgpu clip space)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let range_inv = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * range_inv, -1.0],
        [0.0, 0.0, near * far * range_inv, 0.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}
