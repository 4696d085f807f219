// 威胁图标的基本体几何
// 偏移和欧拉角均在标记局部空间，尚未应用标记姿态和缩放

use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec3;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Sphere { radius: f32 },
    Cuboid { size: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    /// 颜色，格式 0xRRGGBB
    pub color: u32,
    pub emissive: Option<u32>,
    pub emissive_intensity: f32,
    pub opacity: f32,
}

impl Material {
    pub const fn solid(color: u32) -> Self {
        Self {
            color,
            emissive: None,
            emissive_intensity: 1.0,
            opacity: 1.0,
        }
    }

    pub const fn glowing(color: u32, emissive: u32, opacity: f32) -> Self {
        Self {
            color,
            emissive: Some(emissive),
            emissive_intensity: 1.0,
            opacity,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Part {
    pub shape: Shape,
    pub offset: Vec3,
    pub rotation: Vec3,
    pub material: Material,
}

impl Part {
    fn sphere(radius: f32, offset: Vec3, material: Material) -> Self {
        Self {
            shape: Shape::Sphere { radius },
            offset,
            rotation: Vec3::ZERO,
            material,
        }
    }

    fn cuboid(size: Vec3, offset: Vec3, material: Material) -> Self {
        Self {
            shape: Shape::Cuboid { size },
            offset,
            rotation: Vec3::ZERO,
            material,
        }
    }

    fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }
}

const RED: u32 = 0xff0040;
const GREEN: u32 = 0x00ff41;
const AMBER: u32 = 0xffaa00;
const VIOLET: u32 = 0x8b5cf6;
const BLACK: u32 = 0x000000;
const WHITE: u32 = 0xffffff;

pub fn skull_parts() -> Vec<Part> {
    let bone = Vec3::new(0.4, 0.05, 0.05);
    vec![
        Part::sphere(0.3, Vec3::new(0.0, 0.1, 0.0), Material::glowing(RED, 0x330008, 0.9)),
        // 眼窝
        Part::sphere(0.08, Vec3::new(-0.1, 0.15, 0.2), Material::solid(BLACK)),
        Part::sphere(0.08, Vec3::new(0.1, 0.15, 0.2), Material::solid(BLACK)),
        // 交叉骨
        Part::cuboid(bone, Vec3::new(0.0, -0.2, 0.0), Material::solid(WHITE))
            .rotated(Vec3::new(0.0, 0.0, FRAC_PI_4)),
        Part::cuboid(bone, Vec3::new(0.0, -0.2, 0.0), Material::solid(WHITE))
            .rotated(Vec3::new(0.0, 0.0, -FRAC_PI_4)),
    ]
}

pub fn virus_parts() -> Vec<Part> {
    const SPIKES: usize = 8;
    const SPIKE_RADIUS: f32 = 0.3;

    let mut parts = Vec::with_capacity(SPIKES + 1);
    parts.push(Part::sphere(
        0.2,
        Vec3::ZERO,
        Material::glowing(GREEN, 0x004d0d, 0.8),
    ));
    for i in 0..SPIKES {
        let angle = i as f32 / SPIKES as f32 * TAU;
        parts.push(
            Part::cuboid(
                Vec3::new(0.03, 0.2, 0.03),
                Vec3::new(angle.cos() * SPIKE_RADIUS, 0.0, angle.sin() * SPIKE_RADIUS),
                Material::solid(RED),
            )
            .rotated(Vec3::new(0.0, angle, 0.0)),
        );
    }
    parts
}

pub fn ransomware_parts() -> Vec<Part> {
    // 锁扣组整体上移 0.1
    let shackle = Vec3::new(0.0, 0.1, 0.0);
    let bar = Vec3::new(0.15, 0.03, 0.03);
    let post = Vec3::new(0.03, 0.15, 0.03);
    let mark = Vec3::new(0.15, 0.02, 0.02);

    vec![
        Part::cuboid(
            Vec3::new(0.3, 0.2, 0.1),
            Vec3::new(0.0, -0.1, 0.0),
            Material::glowing(AMBER, 0x331a00, 0.9),
        ),
        Part::cuboid(bar, shackle + Vec3::new(-0.075, 0.0, 0.0), Material::solid(AMBER)),
        Part::cuboid(bar, shackle + Vec3::new(0.075, 0.0, 0.0), Material::solid(AMBER)),
        Part::cuboid(post, shackle + Vec3::new(-0.15, -0.075, 0.0), Material::solid(AMBER)),
        Part::cuboid(post, shackle + Vec3::new(0.15, -0.075, 0.0), Material::solid(AMBER)),
        Part::cuboid(mark, Vec3::new(0.0, -0.05, 0.06), Material::solid(RED))
            .rotated(Vec3::new(0.0, 0.0, FRAC_PI_4)),
        Part::cuboid(mark, Vec3::new(0.0, -0.05, 0.06), Material::solid(RED))
            .rotated(Vec3::new(0.0, 0.0, -FRAC_PI_4)),
    ]
}

pub fn trojan_parts() -> Vec<Part> {
    let mut core = Material::glowing(RED, RED, 1.0);
    core.emissive_intensity = 0.5;

    let mut parts = vec![
        Part::cuboid(
            Vec3::new(0.4, 0.2, 0.15),
            Vec3::new(0.0, -0.05, 0.0),
            Material::glowing(VIOLET, 0x2d1b69, 0.8),
        ),
        Part::cuboid(
            Vec3::new(0.15, 0.25, 0.1),
            Vec3::new(0.25, 0.1, 0.0),
            Material::solid(VIOLET),
        ),
        Part::sphere(0.08, Vec3::ZERO, core),
    ];
    for x in [-0.15, -0.05, 0.05, 0.15] {
        parts.push(Part::cuboid(
            Vec3::new(0.03, 0.15, 0.03),
            Vec3::new(x, -0.2, 0.0),
            Material::solid(VIOLET),
        ));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::markers::ThreatKind;

    #[test]
    fn test_part_counts() {
        assert_eq!(ThreatKind::Skull.parts().len(), 5);
        assert_eq!(ThreatKind::Virus.parts().len(), 9);
        assert_eq!(ThreatKind::Ransomware.parts().len(), 7);
        assert_eq!(ThreatKind::Trojan.parts().len(), 7);
    }

    #[test]
    fn test_first_part_carries_accent() {
        for kind in ThreatKind::ALL {
            let parts = kind.parts();
            assert_eq!(parts[0].material.color, kind.accent());
            assert!(parts[0].material.emissive.is_some());
            assert!(parts[0].material.is_transparent());
        }
    }

    #[test]
    fn test_virus_spikes_on_ring() {
        let parts = virus_parts();
        for spike in &parts[1..] {
            let r = (spike.offset.x.powi(2) + spike.offset.z.powi(2)).sqrt();
            assert!((r - 0.3).abs() < 1e-5);
            assert!(matches!(spike.shape, Shape::Cuboid { .. }));
        }
    }

    #[test]
    fn test_parts_fit_inside_marker() {
        // 所有部件都在半径 0.5 的包围球内
        for kind in ThreatKind::ALL {
            for part in kind.parts() {
                assert!(part.offset.length() < 0.5, "{:?} part too far out", kind);
            }
        }
    }
}
