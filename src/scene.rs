use glam::{Mat4, Vec2, Vec3};
use tracing::{debug, info, trace};

use crate::config::SimConfig;
use crate::controller::{ButtonEdge, CraftController, FrameClock, FrameInput};
use crate::error::SimResult;
use crate::model::{CameraState, CraftState, OrbitSystem, ProjectilePool};
use crate::view::{DrawInstance, DrawKind, HudKind, HudSprite, RenderFrame, RenderSink};

/// Top-left corner of the controls panel in screen pixels
const CONTROLS_ANCHOR: Vec2 = Vec2::new(10.0, 10.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    /// The exit signal was seen; the frame was not simulated
    Exit,
}

/// One running simulation: craft, chase camera, orbiting bodies and projectiles.
///
/// Each [`Scene::update`] runs craft, camera, bodies, projectiles in that order.
pub struct Scene {
    config: SimConfig,
    craft: CraftState,
    controller: CraftController,
    camera: CameraState,
    bodies: OrbitSystem,
    projectiles: ProjectilePool,
    fire: ButtonEdge,
    cursor: Vec2,
    frame: u64,
}

impl Scene {
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;

        let bodies = OrbitSystem::from_specs(&config.bodies, config.phase_seed)?;
        let craft = CraftState::new(&config.craft);
        let mut camera = CameraState::new(&config.camera, config.window.width, config.window.height);
        camera.follow(&craft.pose(), &config.camera);

        info!(
            bodies = bodies.len(),
            seed = config.phase_seed,
            start = ?craft.position,
            "scene ready"
        );

        Ok(Self {
            controller: CraftController::new(config.craft.clone()),
            projectiles: ProjectilePool::new(config.projectiles.clone()),
            cursor: Vec2::new(
                config.window.width as f32 / 2.0,
                config.window.height as f32 / 2.0,
            ),
            craft,
            camera,
            bodies,
            fire: ButtonEdge::default(),
            frame: 0,
            config,
        })
    }

    /// Simulate one frame.
    pub fn update(&mut self, input: &FrameInput, clock: FrameClock) -> FrameStatus {
        if input.exit {
            debug!(frame = self.frame, "exit requested");
            return FrameStatus::Exit;
        }
        self.frame += 1;
        self.cursor = input.pointer;

        self.controller.update(&mut self.craft, input, clock.elapsed);
        let craft_pose = self.craft.pose();

        if input.screen.x >= 1.0 && input.screen.y >= 1.0 {
            self.camera.set_aspect(input.screen.x as u32, input.screen.y as u32);
        }
        self.camera.follow(&craft_pose, &self.config.camera);

        self.bodies.update(clock.total);

        if self.fire.rising(input.fire) {
            let muzzle = craft_pose.transform_point(self.config.camera.look_at_offset);
            self.projectiles
                .spawn(muzzle, craft_pose.forward(), craft_pose.down());
        }
        self.projectiles.advance(craft_pose.forward());
        self.projectiles.retire_expired();

        trace!(
            frame = self.frame,
            dt = clock.elapsed,
            velocity = self.craft.velocity,
            roll_rate = self.craft.roll_rate,
            projectiles = self.projectiles.len(),
            "frame updated"
        );
        FrameStatus::Continue
    }

    /// Snapshot of the current state for the renderer.
    pub fn render_frame(&self) -> RenderFrame {
        let mut instances =
            Vec::with_capacity(2 + self.bodies.len() + self.projectiles.len());

        instances.push(DrawInstance {
            kind: DrawKind::Skybox,
            model: Mat4::from_translation(self.camera.eye)
                * Mat4::from_scale(Vec3::splat(self.config.camera.skybox_scale)),
        });

        instances.extend(self.bodies.iter().map(|(handle, body)| DrawInstance {
            kind: DrawKind::Body(handle),
            model: body.pose.to_mat4(),
        }));

        let bullet_scale = Mat4::from_scale(Vec3::splat(self.projectiles.tuning().render_scale));
        instances.extend(self.projectiles.iter().map(|p| DrawInstance {
            kind: DrawKind::Projectile,
            model: p.pose.to_mat4() * bullet_scale,
        }));

        instances.push(DrawInstance {
            kind: DrawKind::Craft,
            model: self.craft.pose().to_mat4(),
        });

        RenderFrame {
            frame: self.frame,
            camera: self.camera.clone(),
            instances,
            hud: vec![
                HudSprite { kind: HudKind::Reticle, position: self.cursor },
                HudSprite { kind: HudKind::Controls, position: CONTROLS_ANCHOR },
            ],
        }
    }

    pub fn present<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        sink.present(&self.render_frame());
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn craft(&self) -> &CraftState {
        &self.craft
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn bodies(&self) -> &OrbitSystem {
        &self.bodies
    }

    pub fn projectiles(&self) -> &ProjectilePool {
        &self.projectiles
    }

    /// Number of simulated frames so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
