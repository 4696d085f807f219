// 首页 3D 场景的逐帧逻辑
// 渲染器负责 GPU 部分，本模块只维护它要绘制的状态：
// - 粒子场：下落到底部后回收的点
// - 威胁标记：随时间浮动的四个图标
// - 轨道相机：缓慢自动旋转
// 渲染器每帧调用一次 CyberScene::frame 并上传返回的 Frame

pub mod camera;
pub mod clock;
pub mod lights;
pub mod markers;
pub mod particles;
pub mod symbols;
pub mod terminal;

use glam::Vec3;
use serde::Serialize;
use thiserror::Error;

pub use camera::OrbitRig;
pub use clock::FrameClock;
pub use lights::{Light, LightKind, default_lights};
pub use markers::{Pose, ThreatKind, ThreatMarker, default_markers};
pub use particles::{PARTICLE_COUNT, ParticleField};
pub use terminal::TerminalText;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("粒子场至少需要一个粒子")]
    EmptyField,
    #[error("位置数量({positions})与速度数量({velocities})不一致")]
    LayoutMismatch { positions: usize, velocities: usize },
    #[error("第{index}个粒子位置越界: {position:?}")]
    PositionOutOfBounds { index: usize, position: [f32; 3] },
    #[error("第{index}个粒子速度无效: {speed}")]
    SpeedOutOfRange { index: usize, speed: f32 },
}

/// 渲染一帧所需的全部数据，借用自场景
#[derive(Debug, Serialize)]
pub struct Frame<'a> {
    pub index: u64,
    pub elapsed: f32,
    /// 交错的 xyz 坐标
    pub particles: &'a [f32],
    pub field_rotation: f32,
    pub markers: [(ThreatKind, Pose); 4],
    pub camera: Vec3,
}

pub struct CyberScene {
    field: ParticleField,
    markers: [ThreatMarker; 4],
    lights: [Light; 3],
    rig: OrbitRig,
}

impl CyberScene {
    pub fn new() -> Self {
        Self::with_field(ParticleField::default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_field(ParticleField::with_seed(PARTICLE_COUNT, seed))
    }

    pub fn with_field(field: ParticleField) -> Self {
        Self {
            field,
            markers: default_markers(),
            lights: default_lights(),
            rig: OrbitRig::new(),
        }
    }

    /// 逐帧更新：`elapsed` 驱动标记姿态，`delta` 驱动相机
    pub fn frame(&mut self, elapsed: f32, delta: f32) -> Frame<'_> {
        self.field.tick();
        self.rig.advance(delta);

        let markers = self.markers.map(|m| (m.kind, m.pose(elapsed)));

        Frame {
            index: self.field.frames(),
            elapsed,
            particles: self.field.as_flat(),
            field_rotation: self.field.rotation_y(),
            markers,
            camera: self.rig.position(),
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn markers(&self) -> &[ThreatMarker; 4] {
        &self.markers
    }

    pub fn lights(&self) -> &[Light; 3] {
        &self.lights
    }

    pub fn rig(&self) -> &OrbitRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut OrbitRig {
        &mut self.rig
    }
}

impl Default for CyberScene {
    fn default() -> Self {
        Self::new()
    }
}
