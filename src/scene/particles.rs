use std::f32::consts::TAU;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::SceneError;

/// 默认粒子数量
pub const PARTICLE_COUNT: usize = 500;
/// x/z 方向半宽，粒子分布在 [-HALF_EXTENT, HALF_EXTENT]
pub const HALF_EXTENT: f32 = 10.0;
/// 初始 y 分布在 [0, SPAWN_HEIGHT]
pub const SPAWN_HEIGHT: f32 = 20.0;
/// 低于该高度的粒子回收到 RESET_HEIGHT
pub const FLOOR: f32 = -10.0;
pub const RESET_HEIGHT: f32 = 10.0;
pub const MIN_SPEED: f32 = 0.01;
pub const MAX_SPEED: f32 = 0.03;
/// 每帧绕 y 轴的旋转量 (rad)
pub const ROTATION_STEP: f32 = 0.001;

/// 矩阵雨粒子场：固定长度的下落点缓冲区
///
/// 缓冲区为 boxed slice，挂载后长度不变；`tick` 原地修改，不分配内存。
pub struct ParticleField {
    positions: Box<[[f32; 3]]>,
    velocities: Box<[f32]>,
    wraps: Box<[u32]>,
    rotation_y: f32,
    frames: u64,
    rng: ChaCha8Rng,
}

impl ParticleField {
    /// 随机初始布局
    pub fn new(count: usize) -> Self {
        let seed = rand::thread_rng().r#gen();
        Self::with_seed(count, seed)
    }

    /// 指定随机种子，结果可复现
    pub fn with_seed(count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let positions: Box<[[f32; 3]]> = (0..count)
            .map(|_| {
                [
                    rng.gen_range(-HALF_EXTENT..=HALF_EXTENT),
                    rng.gen_range(0.0..=SPAWN_HEIGHT),
                    rng.gen_range(-HALF_EXTENT..=HALF_EXTENT),
                ]
            })
            .collect();
        let velocities: Box<[f32]> = (0..count)
            .map(|_| rng.gen_range(MIN_SPEED..=MAX_SPEED))
            .collect();

        Self {
            positions,
            velocities,
            wraps: vec![0; count].into_boxed_slice(),
            rotation_y: 0.0,
            frames: 0,
            rng,
        }
    }

    /// 从给定的初始状态构建粒子场
    ///
    /// 位置必须在初始包围盒内，速度必须在 [MIN_SPEED, MAX_SPEED] 内；
    /// `seed` 只用于回收粒子时的随机位置。
    pub fn from_layout(
        positions: Vec<[f32; 3]>,
        velocities: Vec<f32>,
        seed: u64,
    ) -> Result<Self, SceneError> {
        if positions.is_empty() {
            return Err(SceneError::EmptyField);
        }
        if positions.len() != velocities.len() {
            return Err(SceneError::LayoutMismatch {
                positions: positions.len(),
                velocities: velocities.len(),
            });
        }

        if let Some((index, &position)) = positions
            .iter()
            .enumerate()
            .find(|(_, p)| !in_spawn_bounds(p))
        {
            return Err(SceneError::PositionOutOfBounds { index, position });
        }
        if let Some((index, &speed)) = velocities
            .iter()
            .enumerate()
            .find(|(_, v)| !(MIN_SPEED..=MAX_SPEED).contains(*v))
        {
            return Err(SceneError::SpeedOutOfRange { index, speed });
        }

        let count = positions.len();
        Ok(Self {
            positions: positions.into_boxed_slice(),
            velocities: velocities.into_boxed_slice(),
            wraps: vec![0; count].into_boxed_slice(),
            rotation_y: 0.0,
            frames: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// 前进一帧
    pub fn tick(&mut self) {
        for ((pos, &speed), wraps) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter())
            .zip(self.wraps.iter_mut())
        {
            pos[1] -= speed;

            if pos[1] < FLOOR {
                pos[0] = self.rng.gen_range(-HALF_EXTENT..=HALF_EXTENT);
                pos[1] = RESET_HEIGHT;
                pos[2] = self.rng.gen_range(-HALF_EXTENT..=HALF_EXTENT);
                *wraps += 1;
            }
        }

        // 取模保持角度较小，避免 f32 精度丢失
        self.rotation_y = (self.rotation_y + ROTATION_STEP).rem_euclid(TAU);
        self.frames += 1;
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// 交错的 xyz 缓冲区，可直接上传为顶点属性
    pub fn as_flat(&self) -> &[f32] {
        self.positions.as_flattened()
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    /// 每个粒子被回收到顶部的次数
    pub fn wrap_counts(&self) -> &[u32] {
        &self.wraps
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

fn in_spawn_bounds(p: &[f32; 3]) -> bool {
    (-HALF_EXTENT..=HALF_EXTENT).contains(&p[0])
        && (FLOOR..=SPAWN_HEIGHT).contains(&p[1])
        && (-HALF_EXTENT..=HALF_EXTENT).contains(&p[2])
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(PARTICLE_COUNT)
    }
}
