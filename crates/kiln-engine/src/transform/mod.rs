//! Model-view-projection transform.
//!
//! View and projection are fixed at init; the model rotation is compounded
//! into the running MVP once per frame.

mod camera;
mod stage;

pub use camera::{Camera, Projection};
pub use stage::TransformStage;
