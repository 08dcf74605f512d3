use glam::{Mat4, Vec2};

use crate::render::RasterUniform;

use super::{Camera, Projection};

/// Stateful MVP accumulator.
///
/// Starts at `projection * view` (identity model). Every [`advance`] call
/// right-multiplies the *current* accumulator by a fixed rotation about the
/// object's Y axis, so after `n` frames the matrix is
/// `P * V * R * R * ... * R` (`n` factors) evaluated in that order. Float
/// error accumulates with it; the orientation can only be reproduced by
/// replaying every step.
///
/// [`advance`]: TransformStage::advance
#[derive(Debug, Clone)]
pub struct TransformStage {
    view: Mat4,
    projection: Mat4,
    step: Mat4,
    mvp: Mat4,
    frames: u64,
}

impl TransformStage {
    /// `rotation_step` is the per-frame angle in radians.
    pub fn new(camera: Camera, projection: Projection, rotation_step: f32) -> Self {
        let view = camera.view();
        let projection = projection.matrix();
        Self {
            view,
            projection,
            step: Mat4::from_rotation_y(rotation_step),
            mvp: projection * view,
            frames: 0,
        }
    }

    /// Compounds one rotation step into the accumulator.
    pub fn advance(&mut self) {
        self.mvp *= self.step;
        self.frames += 1;
    }

    /// Current accumulated model-view-projection matrix.
    pub fn mvp(&self) -> Mat4 {
        self.mvp
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Number of [`advance`](Self::advance) calls so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Uniform block contents for the current frame.
    pub fn uniform(&self, viewport: Vec2) -> RasterUniform {
        RasterUniform::new(&self.mvp, viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 0.01;

    fn stage() -> TransformStage {
        TransformStage::new(Camera::default(), Projection::for_viewport(800, 800), STEP)
    }

    #[test]
    fn starts_at_projection_times_view() {
        let s = stage();
        assert_eq!(s.mvp(), s.projection() * s.view());
        assert_eq!(s.frames(), 0);
    }

    #[test]
    fn advance_compounds_onto_accumulator() {
        let mut s = stage();
        let mut expected = s.projection() * s.view();
        let r = Mat4::from_rotation_y(STEP);

        for n in 1..=10u64 {
            s.advance();
            expected *= r;
            assert_eq!(s.mvp(), expected, "frame {n}");
            assert_eq!(s.frames(), n);
        }
    }

    #[test]
    fn accumulation_tracks_closed_form_rotation() {
        let mut s = stage();
        for _ in 0..100 {
            s.advance();
        }
        let closed = s.projection() * s.view() * Mat4::from_rotation_y(STEP * 100.0);
        assert!(s.mvp().abs_diff_eq(closed, 1e-4));
    }

    #[test]
    fn uniform_carries_column_major_mvp() {
        let mut s = stage();
        s.advance();
        let u = s.uniform(Vec2::new(800.0, 600.0));
        assert_eq!(u.mvp, s.mvp().to_cols_array());
        assert_eq!(u.viewport, [800.0, 600.0]);
    }
}
