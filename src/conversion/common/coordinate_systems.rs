use std::f32::consts::FRAC_PI_2;

use bzen_files::common::types::{Mat3x3, Vec2f, Vec3f};
use glam::{EulerRot, Mat3, Mat4, Vec2, Vec3};

#[inline]
pub fn vec3(source: Vec3f) -> Vec3 {
    Vec3::new(source.x, source.y, source.z)
}

/// The engine is LH, Up: Y. Blender is RH, Up: Z. Swapping Y and Z converts between the two.
#[inline]
pub fn engine_to_blender(source: Vec3f, scale: f32) -> Vec3 {
    Vec3::new(source.x, source.z, source.y) * scale
}

#[inline]
pub fn engine_normal_to_blender(source: Vec3f) -> Vec3 {
    Vec3::new(source.x, source.z, source.y)
}

/// V runs top to bottom in the engine.
#[inline]
pub fn engine_uv_to_blender(source: Vec2f) -> Vec2 {
    Vec2::new(source.x, -source.y)
}

/// The engine stores rotations column major, so does glam.
#[inline]
pub fn engine_mat3(source: &Mat3x3) -> Mat3 {
    let [x, y, z] = source.columns;
    Mat3::from_cols(vec3(x), vec3(y), vec3(z))
}

/// -90 degrees around X
#[inline]
pub fn base_rotation_correction() -> Mat4 {
    Mat4::from_rotation_x(-FRAC_PI_2)
}

/// Mirrors Y
#[inline]
pub fn base_axis_flip_correction() -> Mat4 {
    Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0))
}

/// Aligns a model hierarchy root with the target convention.
#[inline]
pub fn hierarchy_root_correction() -> Mat4 {
    base_rotation_correction() * base_axis_flip_correction()
}

/// The XYZ euler angles (as in `R = Rz * Ry * Rx`) of a rotation matrix.
pub fn euler_xyz(rotation: &Mat3) -> Vec3 {
    // rotation.col(c)[r] is the element at row r, column c
    let (r00, r10, r20) = (rotation.x_axis.x, rotation.x_axis.y, rotation.x_axis.z);
    let (r11, r21) = (rotation.y_axis.y, rotation.y_axis.z);
    let (r12, r22) = (rotation.z_axis.y, rotation.z_axis.z);

    let cy = r00.hypot(r10);
    match cy > 16.0 * f32::EPSILON {
        true => Vec3::new(r21.atan2(r22), (-r20).atan2(cy), r10.atan2(r00)),
        // gimbal lock, Z is folded into X
        false => Vec3::new((-r12).atan2(r11), (-r20).atan2(cy), 0.0),
    }
}

#[inline]
pub fn rotation_from_euler_xyz(euler: Vec3) -> Mat3 {
    Mat3::from_euler(EulerRot::ZYX, euler.z, euler.y, euler.x)
}

/// Converts an object rotation: rows 1 and 2 are swapped (the Y/Z axis swap), then the X angle is
/// mirrored around 90 degrees to stand the object upright.
pub fn engine_rotation_to_blender(rotation: &Mat3x3) -> Mat3 {
    let [c0, c1, c2] = rotation.columns;
    let remapped = Mat3::from_cols(
        Vec3::new(c0.x, c0.z, c0.y),
        Vec3::new(c1.x, c1.z, c1.y),
        Vec3::new(c2.x, c2.z, c2.y),
    );

    let mut euler = euler_xyz(&remapped);
    euler.x = FRAC_PI_2 - euler.x;
    rotation_from_euler_xyz(euler)
}
