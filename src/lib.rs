// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod error;
pub mod logging;
pub mod scene;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use scene::{FrameStatus, Scene};

#[cfg(target_arch = "wasm32")]
mod web {
    use js_sys::Float32Array;
    use wasm_bindgen::prelude::wasm_bindgen;
    use wasm_bindgen::JsValue;
    use web_sys::{KeyboardEvent, MouseEvent};

    use crate::config::SimConfig;
    use crate::controller::input::wasm::{keyboard_event_to_input, mouse_click_to_input, mouse_move_to_input};
    use crate::controller::{InputEvent, InputProcessor, InputState, SimClock};
    use crate::scene::{FrameStatus, Scene};
    use crate::logging;
    use crate::view::CameraUniform;

    #[wasm_bindgen(start)]
    pub fn start() {
        logging::init();
    }

    /// Browser-side handle: feed it DOM events, call `tick` from
    /// `requestAnimationFrame`, then read the instance buffer.
    #[wasm_bindgen]
    pub struct SpaceSim {
        scene: Scene,
        input: InputState,
        processor: InputProcessor,
        clock: SimClock,
        last_ms: Option<f64>,
    }

    #[wasm_bindgen]
    impl SpaceSim {
        #[wasm_bindgen(constructor)]
        pub fn new(width: u32, height: u32, seed: u32) -> Result<SpaceSim, JsValue> {
            let mut config = SimConfig::default();
            config.window.width = width;
            config.window.height = height;
            config.phase_seed = seed as u64;

            let clock = SimClock::new(config.max_frame_dt);
            let scene = Scene::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(SpaceSim {
                scene,
                input: InputState::new(width, height),
                processor: InputProcessor::default(),
                clock,
                last_ms: None,
            })
        }

        pub fn on_key(&mut self, event: &KeyboardEvent, is_down: bool) {
            self.input.process_event(&keyboard_event_to_input(event, is_down));
        }

        pub fn on_pointer_move(&mut self, event: &MouseEvent) {
            self.input.process_event(&mouse_move_to_input(event));
        }

        pub fn on_pointer_button(&mut self, event: &MouseEvent, is_down: bool) {
            self.input.process_event(&mouse_click_to_input(event, is_down));
        }

        pub fn on_resize(&mut self, width: u32, height: u32) {
            self.input.process_event(&InputEvent::Resized { width, height });
        }

        pub fn on_blur(&mut self) {
            self.input.process_event(&InputEvent::FocusLost);
        }

        /// Advance one frame at `now_ms` (`performance.now()`). Returns false
        /// once the exit key was pressed.
        pub fn tick(&mut self, now_ms: f64) -> bool {
            let dt = self.last_ms.map_or(0.0, |last| ((now_ms - last) / 1000.0) as f32);
            self.last_ms = Some(now_ms);
            let clock = self.clock.advance(dt);
            let frame_input = self.processor.sample(&self.input);
            self.scene.update(&frame_input, clock) == FrameStatus::Continue
        }

        /// Column-major 4x4 model matrices, 16 floats per drawable.
        pub fn instances(&self) -> Float32Array {
            let data = self.scene.render_frame().instance_data();
            Float32Array::from(bytemuck::cast_slice::<_, f32>(&data))
        }

        /// Camera uniform: view-projection (16 floats), eye (3) and padding.
        pub fn camera(&self) -> Float32Array {
            let uniform = CameraUniform::from_camera(self.scene.camera());
            Float32Array::from(bytemuck::cast_slice::<_, f32>(std::slice::from_ref(&uniform)))
        }

        pub fn projectile_count(&self) -> usize {
            self.scene.projectiles().len()
        }
    }
}
