//! Per-frame uniform block handed to the rendering layer.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::ambience::AmbienceSample;
use crate::camera_rig::CameraRig;
use crate::progression::Phase;

/// Camera and ambience data for GPU upload. Every field is a vec4 so the layout
/// matches WGSL std140 without padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub camera_position: [f32; 4], // w unused
    pub look_target: [f32; 4],     // w unused
    /// rgb = fog/sky colour, a = fog density.
    pub fog: [f32; 4],
    /// rgb = ambient light colour, a = ambient intensity.
    pub ambient: [f32; 4],
    /// x = saturation, y = sun intensity, z = exposure, w = fog far distance.
    pub lighting: [f32; 4],
    /// x = progress, y = step index, z = phase (0, 1, 2), w = 1 while input is locked.
    pub progress: [f32; 4],
}

impl FrameUniform {
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            ..Self::zeroed()
        }
    }

    pub fn update(
        &mut self,
        camera: &CameraRig,
        ambience: &AmbienceSample,
        step: usize,
        phase: Phase,
        input_locked: bool,
    ) {
        self.view = camera.view_matrix().to_cols_array_2d();
        let pos = camera.position();
        self.camera_position = [pos.x, pos.y, pos.z, 1.0];
        let look = camera.look_target();
        self.look_target = [look.x, look.y, look.z, 1.0];
        let c = ambience.ambient_color;
        self.fog = [c.x, c.y, c.z, ambience.fog_density];
        self.ambient = [c.x, c.y, c.z, ambience.ambient_intensity];
        self.lighting = [
            ambience.saturation,
            ambience.sun_intensity,
            ambience.exposure,
            ambience.fog_far,
        ];
        let phase_index = match phase {
            Phase::NotStarted => 0.0,
            Phase::Active => 1.0,
            Phase::Completed => 2.0,
        };
        self.progress = [
            ambience.progress,
            step as f32,
            phase_index,
            if input_locked { 1.0 } else { 0.0 },
        ];
    }
}

impl Default for FrameUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_std140_friendly() {
        assert_eq!(std::mem::size_of::<FrameUniform>() % 16, 0);
        assert_eq!(bytemuck::bytes_of(&FrameUniform::new()).len(), 160);
    }

    #[test]
    fn update_packs_ambience_and_state() {
        let rig = CameraRig::new(12);
        let ambience = AmbienceSample::at(6, 12, false);
        let mut u = FrameUniform::new();
        u.update(&rig, &ambience, 6, Phase::Active, true);
        assert_eq!(u.fog[3], ambience.fog_density);
        assert_eq!(u.lighting[0], ambience.saturation);
        assert_eq!(u.progress, [0.5, 6.0, 1.0, 1.0]);
        assert_eq!(u.camera_position[2], rig.position().z);
    }
}
