use glam::Vec3;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightKind {
    Ambient,
    Point { position: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Light {
    pub kind: LightKind,
    pub intensity: f32,
    /// 颜色，格式 0xRRGGBB
    pub color: u32,
}

/// 绿色主光 + 红色补光
pub fn default_lights() -> [Light; 3] {
    [
        Light {
            kind: LightKind::Ambient,
            intensity: 0.2,
            color: 0x00ff41,
        },
        Light {
            kind: LightKind::Point {
                position: Vec3::new(10.0, 10.0, 10.0),
            },
            intensity: 1.0,
            color: 0x00ff41,
        },
        Light {
            kind: LightKind::Point {
                position: Vec3::new(-10.0, -10.0, -10.0),
            },
            intensity: 0.5,
            color: 0xff0040,
        },
    ]
}
