//! Classic 3D Perlin noise in the permutation-polynomial form.
//!
//! The hash is `mod289((34x + 1) * x)` and gradients are generated from the
//! hash instead of a lookup table, so the exact same arithmetic runs in the
//! WGSL water shader. Keep the two in sync when changing either.

use glam::{Vec3, Vec4};

#[inline]
fn mod289(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289((x * 34.0 + 1.0) * x)
}

#[inline]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    1.792_842_9 - 0.853_734_7 * r
}

#[inline]
fn fade(t: Vec3) -> Vec3 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// GLSL `fract`: always in [0, 1), also for negative input.
#[inline]
fn fract(x: Vec4) -> Vec4 {
    x - x.floor()
}

/// GLSL `step(edge, x)`: 0 where `x < edge`, else 1.
#[inline]
fn step(edge: Vec4, x: Vec4) -> Vec4 {
    let e = edge.to_array();
    let v = x.to_array();
    Vec4::from_array(std::array::from_fn(|i| if v[i] < e[i] { 0.0 } else { 1.0 }))
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Four gradient vectors (x, y, z lanes) for one z-slice of the lattice cell.
fn gradients(ixy: Vec4) -> [Vec3; 4] {
    let gx = ixy / 7.0;
    let gy = fract(gx.floor() / 7.0) - 0.5;
    let gx = fract(gx);
    let gz = Vec4::splat(0.5) - gx.abs() - gy.abs();
    let sz = step(gz, Vec4::ZERO);
    let gx = gx - sz * (step(Vec4::ZERO, gx) - 0.5);
    let gy = gy - sz * (step(Vec4::ZERO, gy) - 0.5);

    let g = [
        Vec3::new(gx.x, gy.x, gz.x),
        Vec3::new(gx.y, gy.y, gz.y),
        Vec3::new(gx.z, gy.z, gz.z),
        Vec3::new(gx.w, gy.w, gz.w),
    ];
    let norm = taylor_inv_sqrt(Vec4::new(
        g[0].dot(g[0]),
        g[1].dot(g[1]),
        g[2].dot(g[2]),
        g[3].dot(g[3]),
    ));
    [g[0] * norm.x, g[1] * norm.y, g[2] * norm.z, g[3] * norm.w]
}

/// Classic Perlin noise.
///
/// Zero on every integer lattice point, roughly within [-1, 1] elsewhere,
/// periodic with period 289 along each axis.
pub fn classic_noise(p: Vec3) -> f32 {
    let pi0 = mod289_3(p.floor());
    let pi1 = mod289_3(pi0 + Vec3::ONE);
    let pf0 = p - p.floor();
    let pf1 = pf0 - Vec3::ONE;

    let ix = Vec4::new(pi0.x, pi1.x, pi0.x, pi1.x);
    let iy = Vec4::new(pi0.y, pi0.y, pi1.y, pi1.y);
    let iz0 = Vec4::splat(pi0.z);
    let iz1 = Vec4::splat(pi1.z);

    let ixy = permute(permute(ix) + iy);
    // Lane order in each slice: (x0,y0) (x1,y0) (x0,y1) (x1,y1).
    let [g000, g100, g010, g110] = gradients(permute(ixy + iz0));
    let [g001, g101, g011, g111] = gradients(permute(ixy + iz1));

    let n000 = g000.dot(pf0);
    let n100 = g100.dot(Vec3::new(pf1.x, pf0.y, pf0.z));
    let n010 = g010.dot(Vec3::new(pf0.x, pf1.y, pf0.z));
    let n110 = g110.dot(Vec3::new(pf1.x, pf1.y, pf0.z));
    let n001 = g001.dot(Vec3::new(pf0.x, pf0.y, pf1.z));
    let n101 = g101.dot(Vec3::new(pf1.x, pf0.y, pf1.z));
    let n011 = g011.dot(Vec3::new(pf0.x, pf1.y, pf1.z));
    let n111 = g111.dot(pf1);

    let f = fade(pf0);
    let nz = [
        mix(n000, n001, f.z),
        mix(n100, n101, f.z),
        mix(n010, n011, f.z),
        mix(n110, n111, f.z),
    ];
    let ny = [mix(nz[0], nz[2], f.y), mix(nz[1], nz[3], f.y)];
    2.2 * mix(ny[0], ny[1], f.x)
}
