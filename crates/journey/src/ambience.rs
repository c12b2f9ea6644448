//! Progress-driven ambience: saturation, sky/fog colour, fog density and light levels.
//!
//! Every value is a pure function of the step index and the total step count. The
//! step is clamped to `[0, total]` everywhere, so overshoot past the last gate
//! reads as full progress.

use glam::Vec3;

/// Exponent of the saturation curve. Below 1, so most of the brightening lands on the
/// last few steps.
pub const SATURATION_EXPONENT: f32 = 0.6;

/// Fog density at the first step.
pub const FOG_DENSITY_MAX: f32 = 0.08;
/// Fog density once every step is done.
pub const FOG_DENSITY_MIN: f32 = 0.002;

const FOG_FAR_BASE: f32 = 55.0;
const FOG_FAR_PER_STEP: f32 = 15.0;
const FOG_FAR_COMPLETED: f32 = 8000.0;

/// Sky colours from midnight to full day, in strictly increasing luminance.
const SKY_TIMELINE: [u32; 13] = [
    0x0a0612, // deep midnight
    0x0d111a,
    0x111827, // slate night
    0x1e293b,
    0x334155, // grey-blue morning
    0x475569,
    0x64748b, // overcast, sun peeking
    0x94a3b8,
    0x38bdf8, // sky blue
    0x60c8fa,
    0x7dd3fc, // bright day
    0xa5d8fd,
    0xbae6fd, // full day
];

/// Sky the fog blends toward once the journey is completed.
const COMPLETED_SKY: u32 = 0xbae6fd;

const SUN_SCALE_BASE: f32 = 20.0;
const SUN_SCALE_GAIN: f32 = 15.0;
/// Above this saturation the sun switches from a cold night disc to a warm day disc.
const SUN_WARM_THRESHOLD: f32 = 0.5;
const SUN_DAY: u32 = 0xfff9e6;
const SUN_NIGHT: u32 = 0x4a69bd;
const SUN_GLOW_DAY: u32 = 0xfcd34d;
const SUN_GLOW_NIGHT: u32 = 0x1e3799;

const AURA_INTENSITY_BASE: f32 = 3.0;
const AURA_INTENSITY_GAIN: f32 = 30.0;
const AURA_DISTANCE_BASE: f32 = 15.0;
const AURA_DISTANCE_GAIN: f32 = 80.0;

fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Rec. 709 relative luminance of an RGB colour.
pub fn luminance(color: Vec3) -> f32 {
    color.dot(Vec3::new(0.2126, 0.7152, 0.0722))
}

/// Normalised progress `step / total` in `[0, 1]`. An empty sequence counts as done.
pub fn progress(step: usize, total: usize) -> f32 {
    if total == 0 {
        return 1.0;
    }
    step.min(total) as f32 / total as f32
}

/// Concave-mapped progress driving perceived brightness.
pub fn saturation(step: usize, total: usize) -> f32 {
    progress(step, total).powf(SATURATION_EXPONENT)
}

/// Fog density, falling linearly from [`FOG_DENSITY_MAX`] to [`FOG_DENSITY_MIN`].
pub fn fog_density(step: usize, total: usize) -> f32 {
    FOG_DENSITY_MAX - (FOG_DENSITY_MAX - FOG_DENSITY_MIN) * progress(step, total)
}

/// Sky, fog and ambient-light colour for `step`.
///
/// Progress selects a pair of neighbouring palette entries and saturation blends
/// between them, so brightness never decreases as the step grows.
pub fn ambient_color(step: usize, total: usize) -> Vec3 {
    let last = SKY_TIMELINE.len() - 1;
    let position = progress(step, total) * last as f32;
    let lo = (position.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    rgb(SKY_TIMELINE[lo]).lerp(rgb(SKY_TIMELINE[hi]), saturation(step, total))
}

/// [`ambient_color`], except that a completed journey always blends toward the
/// completion sky.
pub fn sky_color(step: usize, total: usize, completed: bool) -> Vec3 {
    if !completed {
        return ambient_color(step, total);
    }
    let last = SKY_TIMELINE.len() - 1;
    let lo = ((progress(step, total) * last as f32).floor() as usize).min(last);
    rgb(SKY_TIMELINE[lo]).lerp(rgb(COMPLETED_SKY), saturation(step, total))
}

/// Every ambience value the renderer needs for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbienceSample {
    pub progress: f32,
    pub saturation: f32,
    pub ambient_color: Vec3,
    pub fog_density: f32,
    /// Distance at which fog fully obscures the scene.
    pub fog_far: f32,
    pub ambient_intensity: f32,
    pub sun_intensity: f32,
    /// Tone-mapping exposure.
    pub exposure: f32,
    pub particle_color: Vec3,
    /// Uniform scale of the sun disc.
    pub sun_scale: f32,
    pub sun_opacity: f32,
    pub sun_color: Vec3,
    pub sun_glow_color: Vec3,
    pub sun_glow_opacity: f32,
    /// Base intensity of the light around the goal, before any pulsing.
    pub aura_intensity: f32,
    /// Reach of the goal light.
    pub aura_distance: f32,
}

impl AmbienceSample {
    /// Sample the ambience at `step`. Once the journey is `completed` the fog is
    /// pushed out to the horizon and the sky settles on the completion colour.
    pub fn at(step: usize, total: usize, completed: bool) -> Self {
        let step = step.min(total);
        let sat = saturation(step, total);
        let warm = sat > SUN_WARM_THRESHOLD;
        let fog_far = if completed {
            FOG_FAR_COMPLETED
        } else {
            FOG_FAR_BASE + FOG_FAR_PER_STEP * step as f32
        };
        Self {
            progress: progress(step, total),
            saturation: sat,
            ambient_color: sky_color(step, total, completed),
            fog_density: fog_density(step, total),
            fog_far,
            ambient_intensity: 0.2 + 0.8 * sat,
            sun_intensity: 1.5 * sat,
            exposure: 1.0 + 1.2 * sat,
            particle_color: Vec3::new(0.4 + 0.6 * sat, 0.15 + 0.5 * sat, 0.5 + 0.3 * sat),
            sun_scale: SUN_SCALE_BASE + SUN_SCALE_GAIN * sat,
            sun_opacity: 0.3 + 0.7 * sat,
            sun_color: rgb(if warm { SUN_DAY } else { SUN_NIGHT }),
            sun_glow_color: rgb(if warm { SUN_GLOW_DAY } else { SUN_GLOW_NIGHT }),
            sun_glow_opacity: 0.3 * sat,
            aura_intensity: AURA_INTENSITY_BASE + AURA_INTENSITY_GAIN * sat,
            aura_distance: AURA_DISTANCE_BASE + AURA_DISTANCE_GAIN * sat,
        }
    }
}
