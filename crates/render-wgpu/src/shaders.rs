/// WGSL program for the water surface.
///
/// The vertex stage displaces the flat plane with the primary wave and the
/// ripple octaves; the fragment stage maps the interpolated elevation onto
/// the depth-to-surface gradient. Both follow `seascape_kernel::evaluator`
/// step for step, including the classic noise in `seascape_kernel::noise`.
pub const WATER_SHADER: &str = r#"
const MAX_RIPPLE_ITERATIONS: u32 = 8u;

struct WaterUniforms {
    view_proj: mat4x4<f32>,
    big_wave_frequency: vec2<f32>,
    big_wave_elevation: f32,
    big_wave_speed: f32,
    depth_color: vec3<f32>,
    small_wave_elevation: f32,
    surface_color: vec3<f32>,
    small_wave_frequency: f32,
    small_wave_time_speed: f32,
    small_wave_iterations: u32,
    color_offset: f32,
    color_multiplier: f32,
    time: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
};

@group(0) @binding(0)
var<uniform> u: WaterUniforms;

fn mod289_3(x: vec3<f32>) -> vec3<f32> {
    return x - floor(x * (1.0 / 289.0)) * 289.0;
}

fn mod289_4(x: vec4<f32>) -> vec4<f32> {
    return x - floor(x * (1.0 / 289.0)) * 289.0;
}

fn permute(x: vec4<f32>) -> vec4<f32> {
    return mod289_4((x * 34.0 + 1.0) * x);
}

fn taylor_inv_sqrt(r: vec4<f32>) -> vec4<f32> {
    return 1.7928429 - 0.8537347 * r;
}

fn fade(t: vec3<f32>) -> vec3<f32> {
    return t * t * t * (t * (t * 6.0 - 15.0) + 10.0);
}

struct Gradients {
    g0: vec3<f32>,
    g1: vec3<f32>,
    g2: vec3<f32>,
    g3: vec3<f32>,
};

fn gradients(ixy: vec4<f32>) -> Gradients {
    var gx = ixy / 7.0;
    var gy = fract(floor(gx) / 7.0) - 0.5;
    gx = fract(gx);
    let gz = vec4<f32>(0.5) - abs(gx) - abs(gy);
    let sz = step(gz, vec4<f32>(0.0));
    gx = gx - sz * (step(vec4<f32>(0.0), gx) - 0.5);
    gy = gy - sz * (step(vec4<f32>(0.0), gy) - 0.5);

    let g0 = vec3<f32>(gx.x, gy.x, gz.x);
    let g1 = vec3<f32>(gx.y, gy.y, gz.y);
    let g2 = vec3<f32>(gx.z, gy.z, gz.z);
    let g3 = vec3<f32>(gx.w, gy.w, gz.w);
    let norm = taylor_inv_sqrt(vec4<f32>(dot(g0, g0), dot(g1, g1), dot(g2, g2), dot(g3, g3)));
    return Gradients(g0 * norm.x, g1 * norm.y, g2 * norm.z, g3 * norm.w);
}

fn classic_noise(p: vec3<f32>) -> f32 {
    let pi0 = mod289_3(floor(p));
    let pi1 = mod289_3(pi0 + vec3<f32>(1.0));
    let pf0 = p - floor(p);
    let pf1 = pf0 - vec3<f32>(1.0);

    let ix = vec4<f32>(pi0.x, pi1.x, pi0.x, pi1.x);
    let iy = vec4<f32>(pi0.y, pi0.y, pi1.y, pi1.y);
    let ixy = permute(permute(ix) + iy);
    let s0 = gradients(permute(ixy + vec4<f32>(pi0.z)));
    let s1 = gradients(permute(ixy + vec4<f32>(pi1.z)));

    let n000 = dot(s0.g0, pf0);
    let n100 = dot(s0.g1, vec3<f32>(pf1.x, pf0.y, pf0.z));
    let n010 = dot(s0.g2, vec3<f32>(pf0.x, pf1.y, pf0.z));
    let n110 = dot(s0.g3, vec3<f32>(pf1.x, pf1.y, pf0.z));
    let n001 = dot(s1.g0, vec3<f32>(pf0.x, pf0.y, pf1.z));
    let n101 = dot(s1.g1, vec3<f32>(pf1.x, pf0.y, pf1.z));
    let n011 = dot(s1.g2, vec3<f32>(pf0.x, pf1.y, pf1.z));
    let n111 = dot(s1.g3, pf1);

    let f = fade(pf0);
    let nz = mix(vec4<f32>(n000, n100, n010, n110), vec4<f32>(n001, n101, n011, n111), f.z);
    let ny = mix(nz.xy, nz.zw, f.y);
    return 2.2 * mix(ny.x, ny.y, f.x);
}

fn primary_wave(p: vec2<f32>) -> f32 {
    let phase = u.time * u.big_wave_speed;
    return u.big_wave_elevation
        * sin(p.x * u.big_wave_frequency.x + phase)
        * sin(p.y * u.big_wave_frequency.y + phase);
}

fn ripple(p: vec2<f32>) -> f32 {
    let octaves = min(u.small_wave_iterations, MAX_RIPPLE_ITERATIONS);
    let drift = u.time * u.small_wave_time_speed;
    var height = 0.0;
    for (var i = 1u; i <= octaves; i = i + 1u) {
        let fi = f32(i);
        let scale = u.small_wave_frequency * fi;
        let n = classic_noise(vec3<f32>(p.x * scale, p.y * scale, drift));
        height = height - abs(n) * u.small_wave_elevation / fi;
    }
    return height;
}

// Matches the kernel: a NaN or infinite height is drawn flat.
fn finite_or_zero(v: f32) -> f32 {
    let finite = v == v && abs(v) <= 3.40282347e38;
    return select(0.0, v, finite);
}

struct VertexInput {
    // Plane coordinates (x, z).
    @location(0) position: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) elevation: f32,
};

@vertex
fn vs_water(vertex: VertexInput) -> VertexOutput {
    let p = vertex.position;
    let elevation = finite_or_zero(primary_wave(p) + ripple(p));

    var out: VertexOutput;
    out.clip_position = u.view_proj * vec4<f32>(p.x, elevation, p.y, 1.0);
    out.elevation = elevation;
    return out;
}

@fragment
fn fs_water(in: VertexOutput) -> @location(0) vec4<f32> {
    let m = clamp((in.elevation + u.color_offset) * u.color_multiplier, 0.0, 1.0);
    let color = mix(u.depth_color, u.surface_color, m);
    return vec4<f32>(color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use seascape_kernel::MAX_RIPPLE_ITERATIONS;

    fn validate(source: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(source).expect("WGSL parses");
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .expect("WGSL validates");
        module
    }

    #[test]
    fn water_shader_is_valid_wgsl() {
        let module = validate(WATER_SHADER);
        let entry_points: Vec<&str> = module
            .entry_points
            .iter()
            .map(|ep| ep.name.as_str())
            .collect();
        assert!(entry_points.contains(&"vs_water"));
        assert!(entry_points.contains(&"fs_water"));
    }

    #[test]
    fn vertex_height_is_guarded_like_the_kernel() {
        assert!(WATER_SHADER.contains("finite_or_zero(primary_wave(p) + ripple(p))"));
    }

    #[test]
    fn ripple_cap_matches_kernel() {
        let decl = format!("const MAX_RIPPLE_ITERATIONS: u32 = {MAX_RIPPLE_ITERATIONS}u;");
        assert!(WATER_SHADER.contains(&decl));
    }
}
