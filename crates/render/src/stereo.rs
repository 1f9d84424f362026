use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use stereoscape_kernel::Scene;

use crate::backend::{Eye, GraphicsBackend, RenderTarget};

/// Projection and stereo tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Distance of the zero-parallax plane.
    pub screen_distance: f32,
    /// The slider reading is divided by this to soften the 3D effect.
    pub iod_divisor: f32,
    pub target_width: u32,
    pub target_height: u32,
    pub clear_color: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 40.0,
            aspect: 400.0 / 240.0,
            near: 0.01,
            far: 1000.0,
            screen_distance: 2.0,
            iod_divisor: 3.0,
            target_width: 240,
            target_height: 400,
            clear_color: 0x6888_98FF,
        }
    }
}

/// What a frame's render pass did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderStats {
    pub iod: f32,
    pub eye_passes: u32,
    pub draw_calls: usize,
}

/// Off-axis perspective projection for a camera displaced by `eye_offset / 2`
/// along x, converging at `screen_distance`.
///
/// `eye_offset == 0` yields a plain symmetric perspective.
pub fn stereo_projection(config: &RenderConfig, eye_offset: f32) -> Mat4 {
    let near = config.near;
    let top = near * (config.fov_y_degrees.to_radians() * 0.5).tan();
    let half_width = top * config.aspect;
    let half_offset = eye_offset * 0.5;
    let shift = half_offset * near / config.screen_distance;
    frustum(
        -half_width - shift,
        half_width - shift,
        -top,
        top,
        near,
        config.far,
    ) * Mat4::from_translation(Vec3::new(-half_offset, 0.0, 0.0))
}

/// Right-handed frustum with OpenGL clip depth.
fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;
    Mat4::from_cols(
        Vec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        Vec4::new(
            (right + left) / width,
            (top + bottom) / height,
            -(far + near) / depth,
            -1.0,
        ),
        Vec4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
    )
}

/// Schedules one or two eye passes per frame and submits every object.
#[derive(Debug, Clone, Default)]
pub struct StereoRenderer {
    config: RenderConfig,
}

impl StereoRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Left and right target descriptions.
    pub fn targets(&self) -> [RenderTarget; 2] {
        [Eye::Left, Eye::Right].map(|eye| RenderTarget {
            eye,
            width: self.config.target_width,
            height: self.config.target_height,
            clear_color: self.config.clear_color,
        })
    }

    /// Inter-ocular distance for a slider reading. Bad readings count as zero.
    pub fn interocular_distance(&self, slider: f32) -> f32 {
        let slider = if slider.is_nan() {
            0.0
        } else {
            slider.clamp(0.0, 1.0)
        };
        slider / self.config.iod_divisor
    }

    /// Render one frame. The right eye is skipped when the slider is at zero.
    pub fn render<G: GraphicsBackend + ?Sized>(&self, scene: &Scene, gfx: &mut G) -> RenderStats {
        let _span = tracing::info_span!("stereo_render", tick = scene.tick()).entered();
        let iod = self.interocular_distance(gfx.slider_level());
        let mut stats = RenderStats {
            iod,
            ..RenderStats::default()
        };

        gfx.frame_begin();
        stats.draw_calls += self.eye_pass(scene, gfx, Eye::Left, iod);
        stats.eye_passes += 1;
        if iod > 0.0 {
            stats.draw_calls += self.eye_pass(scene, gfx, Eye::Right, iod);
            stats.eye_passes += 1;
        }
        gfx.frame_end();

        tracing::trace!(
            iod,
            passes = stats.eye_passes,
            draws = stats.draw_calls,
            "frame rendered"
        );
        stats
    }

    fn eye_pass<G: GraphicsBackend + ?Sized>(
        &self,
        scene: &Scene,
        gfx: &mut G,
        eye: Eye,
        iod: f32,
    ) -> usize {
        let _span = tracing::debug_span!("eye_pass", %eye).entered();
        gfx.draw_on(eye);

        let projection = stereo_projection(&self.config, eye.sign() * iod);
        gfx.set_projection(&projection);
        let view = scene.player().view_matrix();
        gfx.set_view(&view);

        let mut draws = 0;
        for object in scene.objects() {
            gfx.bind_buffer(object.buffer());
            let mut model = Mat4::IDENTITY;
            object.render_update(&view, &mut model);
            gfx.set_model(&model);
            gfx.draw(object.buffer().len());
            draws += 1;
        }
        draws
    }
}
