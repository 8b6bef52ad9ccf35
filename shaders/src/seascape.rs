//! Procedural ocean surface.
//!
//! The sea is a height field built from three octaves of distorted,
//! counter-propagating wave trains. Each fragment casts a ray from the camera
//! through its world position on the mesh, brackets the crossing with the
//! height field, and shades the hit with a sky reflection, a water body color,
//! a height tint and a specular glint.
//!
//! Wave and shading model after "Seascape" by Alexander Alekseev aka TDM
//! (<https://www.shadertoy.com/view/Ms2SD1>).

use shared::*;
use spirv_std::glam::{vec2, vec3, Mat2, Vec2, Vec3, Vec3Swizzles, Vec4};

// Note: This cfg is incorrect on its surface, it really should be "are we compiling with std", but
// we tie #[no_std] above to the same condition, so it's fine.
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

pub struct Inputs {
    pub resolution: Vec2,
    pub time: f32,
    pub camera_position: Vec3,
    pub light_direction: Vec3,
}

pub const NUM_STEPS: usize = 8;
pub const TRACE_FAR: f32 = 1000.0;
const PI: f32 = 3.1415;
const GAMMA: f32 = 0.8;
impl Inputs {
    pub fn epsilon_nrm(&self) -> f32 {
        0.1 / self.resolution.x
    }
}

// sea
const ITER_GEOMETRY: usize = 3;
pub const SEA_HEIGHT: f32 = 0.8;
const SEA_CHOPPY: f32 = 2.4;
const SEA_SPEED: f32 = 1.0;
const SEA_FREQ: f32 = 0.2;
const SEA_FREQ_GAIN: f32 = 1.9;
const SEA_AMP_GAIN: f32 = 0.22;
const SEA_CHOPPY_RELAX: f32 = 0.2;
const SEA_BASE: Vec3 = Vec3::new(0.11, 0.2, 0.27);
const SEA_WATER_COLOR: Vec3 = Vec3::new(0.8, 1.0, 0.6);
impl Inputs {
    pub fn sea_time(&self) -> f32 {
        self.time * SEA_SPEED
    }
}
const OCTAVE_M: Mat2 = Mat2::from_cols_array(&[1.6, 1.2, -1.2, 1.6]);

// math
fn hash(p: Vec2) -> f32 {
    let h: f32 = p.dot(vec2(127.1, 311.7));
    (h.sin() * 43758.5453123).gl_fract()
}

/// Value noise in `[-1, 1]`.
pub fn noise(p: Vec2) -> f32 {
    let i: Vec2 = p.floor();
    let f: Vec2 = p.gl_fract();
    let u: Vec2 = f * f * (Vec2::splat(3.0) - 2.0 * f);
    -1.0 + 2.0
        * mix(
            mix(hash(i + vec2(0.0, 0.0)), hash(i + vec2(1.0, 0.0)), u.x),
            mix(hash(i + vec2(0.0, 1.0)), hash(i + vec2(1.0, 1.0)), u.x),
            u.y,
        )
}

// lighting
fn diffuse(n: Vec3, l: Vec3, p: f32) -> f32 {
    (n.dot(l) * 0.4 + 0.6).powf(p)
}
fn specular(n: Vec3, l: Vec3, e: Vec3, s: f32) -> f32 {
    let nrm: f32 = (s + 8.0) / (PI * 8.0);
    (e.reflect(n).dot(l).max(0.0)).powf(s) * nrm
}

// sky
pub fn get_sky_color(mut e: Vec3) -> Vec3 {
    e.y = e.y.max(0.0);
    vec3((1.0 - e.y).powf(2.0), 1.0 - e.y, 0.6 + (1.0 - e.y) * 0.4)
}

// sea
pub fn sea_octave(mut uv: Vec2, choppy: f32) -> f32 {
    uv += Vec2::splat(noise(uv));
    let mut wv: Vec2 = Vec2::ONE - uv.sin().abs();
    let swv: Vec2 = uv.cos().abs();
    wv = mix(wv, swv, wv);
    (1.0 - (wv.x * wv.y).powf(0.65)).powf(choppy)
}

impl Inputs {
    /// Vertical distance from `p` to the sea surface below (or above) it.
    pub fn map(&self, p: Vec3) -> f32 {
        let mut freq: f32 = SEA_FREQ;
        let mut amp: f32 = SEA_HEIGHT;
        let mut choppy: f32 = SEA_CHOPPY;
        let mut uv: Vec2 = p.xz();
        uv.x *= 0.75;

        let sea_time = Vec2::splat(self.sea_time());
        let mut d: f32;
        let mut h: f32 = 0.0;

        let mut i = 0;
        while i < ITER_GEOMETRY {
            d = sea_octave((uv + sea_time) * freq, choppy);
            d += sea_octave((uv - sea_time) * freq, choppy);
            h += d * amp;
            let octave_m = OCTAVE_M;
            uv = octave_m.transpose() * uv;
            freq *= SEA_FREQ_GAIN;
            amp *= SEA_AMP_GAIN;
            choppy = mix(choppy, 1.0, SEA_CHOPPY_RELAX);
            i += 1;
        }
        p.y - h
    }
}

pub fn get_sea_color(p: Vec3, n: Vec3, l: Vec3, eye: Vec3, dist: Vec3) -> Vec3 {
    let mut fresnel: f32 = 1.0 - n.dot(-eye).max(0.0);
    fresnel = fresnel.powf(3.0) * 0.65;

    let reflected: Vec3 = get_sky_color(eye.reflect(n));
    let refracted: Vec3 = SEA_BASE + diffuse(n, l, 80.0) * SEA_WATER_COLOR * 0.12;

    let mut color: Vec3 = mix(refracted, reflected, fresnel);
    let atten: f32 = (1.0 - dist.dot(dist) * 0.001).max(0.0);
    color += SEA_WATER_COLOR * (p.y - SEA_HEIGHT) * 0.18 * atten;

    color += Vec3::splat(specular(n, l, eye, 60.0));
    color
}

/// Display gamma. Troughs can tint a channel slightly below zero, which
/// would turn into NaN under a fractional power.
pub fn gamma(color: Vec3) -> Vec3 {
    pow(color.max(Vec3::ZERO), GAMMA)
}

impl Inputs {
    // tracing
    pub fn get_normal(&self, p: Vec3, eps: f32) -> Vec3 {
        let mut n: Vec3 = Vec3::ZERO;
        n.y = self.map(p);
        n.x = self.map(vec3(p.x + eps, p.y, p.z)) - n.y;
        n.z = self.map(vec3(p.x, p.y, p.z + eps)) - n.y;
        n.y = eps;
        n.normalize()
    }

    /// Brackets the first crossing of the height field along `dir` and
    /// returns the ray parameter of the final estimate, writing the point to
    /// `p`. The ray origin is taken relative to the mesh height at
    /// `world_position`. A ray that is still above water at the far bound
    /// returns [`TRACE_FAR`] with `p` at the far point.
    pub fn height_map_tracing(
        &self,
        ori: Vec3,
        dir: Vec3,
        world_position: Vec3,
        p: &mut Vec3,
    ) -> f32 {
        let mut ori = ori;
        ori.y -= world_position.y - SEA_HEIGHT;

        let mut tm: f32 = 0.0;
        let mut tx: f32 = TRACE_FAR;
        let mut hx: f32 = self.map(ori + dir * tx);
        if hx > 0.0 {
            *p = ori + dir * tx;
            return tx;
        }
        let mut hm: f32 = self.map(ori + dir * tm);
        let mut tmid: f32 = 0.0;
        let mut i = 0;
        while i < NUM_STEPS {
            tmid = mix(tm, tx, hm / (hm - hx));
            *p = ori + dir * tmid;
            let hmid: f32 = self.map(*p);
            if hmid < 0.0 {
                tx = tmid;
                hx = hmid;
            } else {
                tm = tmid;
                hm = hmid;
            }
            i += 1;
        }
        tmid
    }

    // main
    pub fn main_image(&self, frag_color: &mut Vec4, world_position: Vec3) {
        let dir: Vec3 = (world_position - self.camera_position).normalize();
        let mut p: Vec3 = Vec3::ZERO;
        self.height_map_tracing(self.camera_position, dir, world_position, &mut p);
        let dist: Vec3 = world_position - self.camera_position;
        let n: Vec3 = self.get_normal(p, dist.dot(dist) * self.epsilon_nrm());
        let color: Vec3 = get_sea_color(p, n, self.light_direction, dir, dist);
        // post
        *frag_color = gamma(color).extend(1.0);
    }
}
