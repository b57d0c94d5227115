#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3f {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Column major 3x3 matrix, as stored by the engine for rotations.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3x3 {
    pub columns: [Vec3f; 3],
}

impl Mat3x3 {
    pub const IDENTITY: Mat3x3 = Mat3x3 {
        columns: [
            Vec3f::new(1.0, 0.0, 0.0),
            Vec3f::new(0.0, 1.0, 0.0),
            Vec3f::new(0.0, 0.0, 1.0),
        ],
    };

    pub const fn from_columns(x: Vec3f, y: Vec3f, z: Vec3f) -> Self {
        Self { columns: [x, y, z] }
    }
}

impl Default for Mat3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 8 bit per channel color. The engine stores it as BGRA on disk, the repository hands it out
/// already split into channels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
        a: 0xFF,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Color {
    /// The little endian engine layout is `b, g, r, a`.
    fn from(value: u32) -> Self {
        let bytes = value.to_le_bytes();
        Color {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
            a: bytes[3],
        }
    }
}

impl From<Color> for u32 {
    fn from(value: Color) -> Self {
        u32::from_le_bytes([value.b, value.g, value.r, value.a])
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn color_from_engine_layout() {
        let color = Color::from(0x80FF4020u32);
        assert_eq!(color, Color::new(0xFF, 0x40, 0x20, 0x80));
        assert_eq!(u32::from(color), 0x80FF4020u32);
    }
}
