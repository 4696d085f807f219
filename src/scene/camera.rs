use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use serde::Serialize;

pub const CAMERA_DISTANCE: f32 = 8.0;
pub const FIELD_OF_VIEW_DEG: f32 = 75.0;
pub const AUTO_ROTATE_SPEED: f32 = 0.2;
pub const MIN_POLAR: f32 = PI / 2.5;
pub const MAX_POLAR: f32 = FRAC_PI_2;

/// 绕原点的轨道相机：距离固定、不可平移、缓慢自动旋转
///
/// 球坐标以 y 轴向上：`polar` 从 +y 起算，`azimuth` 从 +z 转向 +x。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitRig {
    pub distance: f32,
    pub fov_deg: f32,
    polar: f32,
    azimuth: f32,
    auto_rotate_speed: f32,
}

impl OrbitRig {
    pub fn new() -> Self {
        Self {
            distance: CAMERA_DISTANCE,
            fov_deg: FIELD_OF_VIEW_DEG,
            polar: FRAC_PI_2,
            azimuth: 0.0,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
        }
    }

    /// 每秒方位角变化量，速度 1.0 即每分钟一圈
    pub fn angular_velocity(&self) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed
    }

    /// 按 `delta` 秒帧时间自动旋转
    pub fn advance(&mut self, delta: f32) {
        self.azimuth = (self.azimuth - self.angular_velocity() * delta).rem_euclid(TAU);
    }

    /// 用户拖拽，极角限制在允许范围内
    pub fn orbit(&mut self, d_azimuth: f32, d_polar: f32) {
        self.azimuth = (self.azimuth + d_azimuth).rem_euclid(TAU);
        self.polar = (self.polar + d_polar).clamp(MIN_POLAR, MAX_POLAR);
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn position(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        Vec3::new(
            self.distance * sin_p * sin_a,
            self.distance * cos_p,
            self.distance * sin_p * cos_a,
        )
    }
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self::new()
    }
}
