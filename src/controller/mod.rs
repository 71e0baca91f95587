// CONTROLLER: Input, flight logic, and frame timing
pub mod input;
pub mod orientation;
pub mod craft_controller;
pub mod clock;

pub use input::{ButtonEdge, FrameInput, InputEvent, InputProcessor, InputState, KeyBindings, MouseButton};
pub use craft_controller::CraftController;
pub use clock::{FrameClock, SimClock};
