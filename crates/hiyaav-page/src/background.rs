//! Decorative 3D background.
//!
//! Produces a per-frame pose snapshot for a gold particle cloud, a floating
//! torus-knot centerpiece and a camera that drifts toward the pointer. It
//! computes poses only; drawing is up to the host renderer.

use hiyaav_config::BackgroundConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::color::{self, LinPremul};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len <= f32::EPSILON {
            return Vec3::ZERO;
        }
        Vec3::new(self.x / len, self.y / len, self.z / len)
    }

    pub fn lerp(self, to: Vec3, t: f32) -> Vec3 {
        Vec3::new(
            self.x + (to.x - self.x) * t,
            self.y + (to.y - self.y) * t,
            self.z + (to.z - self.z) * t,
        )
    }

    pub fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Rotate about the y axis by `angle` radians.
    pub fn rotate_y(self, angle: f32) -> Vec3 {
        let (s, c) = angle.sin_cos();
        Vec3::new(self.x * c + self.z * s, self.y, -self.x * s + self.z * c)
    }
}

/// Pose of one particle in cloud space. Rotation is Euler XYZ in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticlePose {
    pub position: Vec3,
    pub rotation: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CenterpiecePose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub position: Vec3,
    /// Unit vector toward the look-at target.
    pub forward: Vec3,
    pub fov_degrees: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointLight {
    pub position: Vec3,
    pub color: LinPremul,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lighting {
    pub ambient: f32,
    pub points: [PointLight; 2],
}

/// Everything a renderer needs to draw one background frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundSnapshot {
    pub time_secs: f32,
    pub particles: Vec<ParticlePose>,
    /// Rotation of the whole cloud about y.
    pub cloud_rotation_y: f32,
    pub particle_color: LinPremul,
    pub centerpiece: CenterpiecePose,
    pub camera: CameraPose,
    pub lighting: Lighting,
}

impl BackgroundSnapshot {
    /// Particle position in world space, cloud rotation applied.
    pub fn particle_world_position(&self, index: usize) -> Option<Vec3> {
        self.particles
            .get(index)
            .map(|p| p.position.rotate_y(self.cloud_rotation_y))
    }
}

const CENTERPIECE_ANCHOR: Vec3 = Vec3::new(0.0, 0.0, -2.0);
const CENTERPIECE_SCALE: f32 = 0.8;
const FLOAT_SPEED: f32 = 2.0;
const FLOAT_ROTATION_INTENSITY: f32 = 0.2;
const FLOAT_INTENSITY: f32 = 0.5;
const CAMERA_FOV: f32 = 50.0;

/// Particle pose at time `t` for particle `index`.
pub fn particle_pose(index: usize, t: f32) -> ParticlePose {
    let idx = (index * 3) as f32;
    let a = t * 0.1 + idx;
    let (sin_a, cos_a) = a.sin_cos();
    let spin = t * 0.1;
    ParticlePose {
        position: Vec3::new(sin_a * cos_a * 5.0, cos_a * 5.0, sin_a * 5.0),
        rotation: Vec3::new(spin, spin, spin),
    }
}

/// Centerpiece pose: its own sway and bob inside a gentle float.
fn centerpiece_pose(t: f32, float_offset: f32) -> CenterpiecePose {
    let ft = (float_offset + t) / 4.0 * FLOAT_SPEED;
    let float_rotation = Vec3::new(
        ft.cos() / 8.0 * FLOAT_ROTATION_INTENSITY,
        ft.sin() / 8.0 * FLOAT_ROTATION_INTENSITY,
        ft.sin() / 20.0 * FLOAT_ROTATION_INTENSITY,
    );
    let float_y = ft.sin() / 10.0 * FLOAT_INTENSITY;

    let sway = (t / 4.0).sin() * 0.3;
    let bob = (t / 2.0).sin() * 0.2;
    CenterpiecePose {
        position: Vec3::new(CENTERPIECE_ANCHOR.x, bob + float_y, CENTERPIECE_ANCHOR.z),
        rotation: Vec3::new(float_rotation.x, sway + float_rotation.y, float_rotation.z),
        scale: CENTERPIECE_SCALE,
    }
}

fn lighting() -> Lighting {
    Lighting {
        ambient: 0.5,
        points: [
            PointLight {
                position: Vec3::new(10.0, 10.0, 10.0),
                color: color::white(1.0),
                intensity: 1.0,
            },
            PointLight {
                position: Vec3::new(-10.0, -10.0, -10.0),
                color: color::gold(1.0),
                intensity: 0.5,
            },
        ],
    }
}

#[derive(Debug)]
pub struct BackgroundRenderer {
    config: BackgroundConfig,
    initial: Vec<Vec3>,
    float_offset: f32,
    camera: Vec3,
    frames: u64,
}

impl BackgroundRenderer {
    pub fn new(config: BackgroundConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let half = config.particle_spread / 2.0;
        let initial = (0..config.particle_count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                )
            })
            .collect();
        let float_offset = rng.gen_range(0.0..10_000.0);

        Self {
            config,
            initial,
            float_offset,
            camera: Vec3::new(0.0, 0.0, config.camera_depth),
            frames: 0,
        }
    }

    /// Scattered particle positions shown before the first frame.
    pub fn initial_positions(&self) -> &[Vec3] {
        &self.initial
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Compute the next frame. `pointer` is in normalized device
    /// coordinates. The camera eases a fixed fraction per call.
    pub fn frame(&mut self, time_secs: f32, pointer: (f32, f32)) -> BackgroundSnapshot {
        self.frames += 1;
        let goal = Vec3::new(
            pointer.0 * self.config.camera_gain_x,
            pointer.1 * self.config.camera_gain_y,
            self.config.camera_depth,
        );
        self.camera = self.camera.lerp(goal, self.config.camera_lerp);

        let particles = (0..self.config.particle_count)
            .map(|i| particle_pose(i, time_secs))
            .collect();

        BackgroundSnapshot {
            time_secs,
            particles,
            cloud_rotation_y: time_secs * 0.05,
            particle_color: color::gold(1.0),
            centerpiece: centerpiece_pose(time_secs, self.float_offset),
            camera: CameraPose {
                position: self.camera,
                forward: Vec3::ZERO.sub(self.camera).normalized(),
                fov_degrees: CAMERA_FOV,
            },
            lighting: lighting(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_particle_formula() {
        let pose = particle_pose(0, 0.0);
        assert!(close(pose.position.x, 0.0));
        assert!(close(pose.position.y, 5.0));
        assert!(close(pose.position.z, 0.0));

        let t = 12.0;
        let a: f32 = 7.2;
        let pose = particle_pose(2, t);
        assert!(close(pose.position.x, a.sin() * a.cos() * 5.0));
        assert!(close(pose.position.y, a.cos() * 5.0));
        assert!(close(pose.position.z, a.sin() * 5.0));
        assert!(close(pose.rotation.x, 1.2));
    }

    #[test]
    fn test_snapshot_counts_and_cloud_spin() {
        let mut renderer = BackgroundRenderer::new(BackgroundConfig::default());
        assert_eq!(renderer.initial_positions().len(), 200);
        assert!(renderer.initial_positions().iter().all(|p| {
            p.x.abs() <= 5.0 && p.y.abs() <= 5.0 && p.z.abs() <= 5.0
        }));

        let snapshot = renderer.frame(20.0, (0.0, 0.0));
        assert_eq!(snapshot.particles.len(), 200);
        assert!(close(snapshot.cloud_rotation_y, 1.0));
        assert_eq!(snapshot.centerpiece.scale, 0.8);
        assert_eq!(snapshot.centerpiece.position.z, -2.0);
    }

    #[test]
    fn test_camera_lerps_toward_pointer() {
        let mut renderer = BackgroundRenderer::new(BackgroundConfig::default());
        let first = renderer.frame(0.0, (1.0, 1.0)).camera;
        assert!(close(first.position.x, 0.1));
        assert!(close(first.position.y, 0.05));
        assert!(close(first.position.z, 10.0));

        for _ in 0..500 {
            renderer.frame(0.0, (1.0, 1.0));
        }
        let settled = renderer.camera_position();
        assert!(close(settled.x, 2.0));
        assert!(close(settled.y, 1.0));
    }

    #[test]
    fn test_camera_looks_at_origin() {
        let mut renderer = BackgroundRenderer::new(BackgroundConfig::default());
        let camera = renderer.frame(0.0, (0.0, 0.0)).camera;
        assert!(close(camera.forward.z, -1.0));
        assert!(close(camera.forward.length(), 1.0));
    }

    #[test]
    fn test_same_seed_same_scatter() {
        let a = BackgroundRenderer::new(BackgroundConfig::default());
        let b = BackgroundRenderer::new(BackgroundConfig::default());
        assert_eq!(a.initial_positions(), b.initial_positions());
    }

    #[test]
    fn test_world_position_applies_cloud_rotation() {
        let mut renderer = BackgroundRenderer::new(BackgroundConfig {
            particle_count: 1,
            ..BackgroundConfig::default()
        });
        let snapshot = renderer.frame(0.0, (0.0, 0.0));
        let world = snapshot.particle_world_position(0).unwrap();
        assert_eq!(world, snapshot.particles[0].position);
        assert!(snapshot.particle_world_position(1).is_none());
    }
}
