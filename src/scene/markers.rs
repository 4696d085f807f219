use glam::Vec3;
use serde::Serialize;

use super::symbols::{Part, skull_parts, ransomware_parts, trojan_parts, virus_parts};

/// 标记整体缩放
pub const MARKER_SCALE: f32 = 1.2;
pub const BOB_AMPLITUDE: f32 = 0.2;
pub const PITCH_AMPLITUDE: f32 = 0.2;
pub const YAW_AMPLITUDE: f32 = 0.3;

const PITCH_FREQ: f32 = 0.5;
const YAW_FREQ: f32 = 0.3;
const BOB_FREQ: f32 = 0.8;

/// 四种装饰性威胁图标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatKind {
    Skull,
    Virus,
    Ransomware,
    Trojan,
}

impl ThreatKind {
    pub const ALL: [ThreatKind; 4] = [
        ThreatKind::Skull,
        ThreatKind::Virus,
        ThreatKind::Ransomware,
        ThreatKind::Trojan,
    ];

    /// 绘制该图标的基本体，坐标为标记局部空间
    pub fn parts(self) -> Vec<Part> {
        match self {
            ThreatKind::Skull => skull_parts(),
            ThreatKind::Virus => virus_parts(),
            ThreatKind::Ransomware => ransomware_parts(),
            ThreatKind::Trojan => trojan_parts(),
        }
    }

    /// 主色，格式 0xRRGGBB
    pub fn accent(self) -> u32 {
        match self {
            ThreatKind::Skull => 0xff0040,
            ThreatKind::Virus => 0x00ff41,
            ThreatKind::Ransomware => 0xffaa00,
            ThreatKind::Trojan => 0x8b5cf6,
        }
    }
}

/// 写入场景图的单个标记变换
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    pub position: Vec3,
    /// 欧拉角 (x, y, z)，弧度
    pub rotation: Vec3,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThreatMarker {
    pub kind: ThreatKind,
    pub base: Vec3,
}

impl ThreatMarker {
    pub fn new(kind: ThreatKind, base: Vec3) -> Self {
        Self { kind, base }
    }

    /// 挂载后第 `elapsed` 秒的姿态
    ///
    /// 只依赖 `elapsed` 和基准位置，同一时刻多次计算结果相同。
    pub fn pose(&self, elapsed: f32) -> Pose {
        let rotation = Vec3::new(
            (elapsed * PITCH_FREQ).sin() * PITCH_AMPLITUDE,
            (elapsed * YAW_FREQ).cos() * YAW_AMPLITUDE,
            0.0,
        );
        let position = Vec3::new(
            self.base.x,
            self.base.y + (elapsed * BOB_FREQ).sin() * BOB_AMPLITUDE,
            self.base.z,
        );

        Pose {
            position,
            rotation,
            scale: MARKER_SCALE,
        }
    }
}

/// 首页场景布局
pub fn default_markers() -> [ThreatMarker; 4] {
    [
        ThreatMarker::new(ThreatKind::Skull, Vec3::new(-4.0, 2.0, -3.0)),
        ThreatMarker::new(ThreatKind::Ransomware, Vec3::new(4.0, -1.0, -2.0)),
        ThreatMarker::new(ThreatKind::Virus, Vec3::new(-3.0, -2.0, 2.0)),
        ThreatMarker::new(ThreatKind::Trojan, Vec3::new(3.0, 1.0, 3.0)),
    ]
}
