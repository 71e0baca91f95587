// VIEW: Render-facing frame output
pub mod render;

pub use render::{
    CameraUniform, DrawInstance, DrawKind, HudKind, HudSprite, InstanceRaw, RecordingSink,
    RenderFrame, RenderSink, TraceSink,
};
