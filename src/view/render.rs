use glam::{Mat4, Vec2, Vec3};
use tracing::trace;

use crate::model::{BodyHandle, CameraState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Skybox,
    Body(BodyHandle),
    Craft,
    Projectile,
}

/// One drawable entity with its world-space model matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawInstance {
    pub kind: DrawKind,
    pub model: Mat4,
}

impl DrawInstance {
    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw {
            model: self.model.to_cols_array_2d(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudKind {
    Reticle,
    Controls,
}

/// Screen-space overlay sprite. Reticle positions are the sprite centre,
/// the controls panel is anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSprite {
    pub kind: HudKind,
    pub position: Vec2,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 3],
    pub _pad: f32,
}

impl CameraUniform {
    pub fn from_camera(camera: &CameraState) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            eye: camera.eye.to_array(),
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub frame: u64,
    pub camera: CameraState,
    pub instances: Vec<DrawInstance>,
    pub hud: Vec<HudSprite>,
}

impl RenderFrame {
    pub fn instance_data(&self) -> Vec<InstanceRaw> {
        self.instances.iter().map(DrawInstance::to_raw).collect()
    }

    pub fn count(&self, kind: DrawKind) -> usize {
        self.instances.iter().filter(|i| i.kind == kind).count()
    }

    pub fn projectile_count(&self) -> usize {
        self.count(DrawKind::Projectile)
    }

    pub fn reticle(&self) -> Option<Vec2> {
        self.hud
            .iter()
            .find(|s| s.kind == HudKind::Reticle)
            .map(|s| s.position)
    }
}

/// Consumer of finished frames (GPU renderer, recorder, log)
pub trait RenderSink {
    fn present(&mut self, frame: &RenderFrame);
}

/// Sink that reports a frame summary through `tracing` every `every` frames.
pub struct TraceSink {
    every: u64,
}

impl TraceSink {
    pub fn new(every: u64) -> Self {
        Self { every: every.max(1) }
    }
}

impl RenderSink for TraceSink {
    fn present(&mut self, frame: &RenderFrame) {
        if frame.frame % self.every != 0 {
            return;
        }
        let craft = frame
            .instances
            .iter()
            .find(|i| i.kind == DrawKind::Craft)
            .map(|i| i.model.transform_point3(Vec3::ZERO));
        trace!(
            frame = frame.frame,
            instances = frame.instances.len(),
            projectiles = frame.projectile_count(),
            craft = ?craft,
            eye = ?frame.camera.eye,
            "frame presented"
        );
    }
}

/// Sink that keeps every frame, for tests and replays.
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<RenderFrame>,
}

impl RenderSink for RecordingSink {
    fn present(&mut self, frame: &RenderFrame) {
        self.frames.push(frame.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraRig;

    fn frame() -> RenderFrame {
        RenderFrame {
            frame: 3,
            camera: CameraState::new(&CameraRig::default(), 1600, 900),
            instances: vec![
                DrawInstance { kind: DrawKind::Craft, model: Mat4::from_translation(Vec3::X) },
                DrawInstance { kind: DrawKind::Projectile, model: Mat4::IDENTITY },
                DrawInstance { kind: DrawKind::Projectile, model: Mat4::IDENTITY },
            ],
            hud: vec![HudSprite { kind: HudKind::Reticle, position: Vec2::new(5.0, 6.0) }],
        }
    }

    #[test]
    fn test_instance_data_is_column_major() {
        let data = frame().instance_data();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0].model[3], [1.0, 0.0, 0.0, 1.0]);

        let bytes: &[u8] = bytemuck::cast_slice(&data);
        assert_eq!(bytes.len(), 3 * 64);
    }

    #[test]
    fn test_counts_and_reticle() {
        let frame = frame();
        assert_eq!(frame.projectile_count(), 2);
        assert_eq!(frame.count(DrawKind::Skybox), 0);
        assert_eq!(frame.reticle(), Some(Vec2::new(5.0, 6.0)));
    }

    #[test]
    fn test_recording_sink_keeps_frames() {
        let mut sink = RecordingSink::default();
        sink.present(&frame());
        sink.present(&frame());
        assert_eq!(sink.frames.len(), 2);
    }
}
