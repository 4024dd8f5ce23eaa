//! GLSL ES 3.00 sources for the menu's draw programs.

/// Shared vertex stage. `a_position` is in CSS pixels with y down.
pub const QUAD_VERT: &str = r#"#version 300 es
in vec2 a_position;
in vec2 a_uv;
uniform vec2 u_viewport;
out vec2 vTextureCoord;

void main() {
    vec2 clip = a_position / u_viewport * 2.0 - 1.0;
    gl_Position = vec4(clip.x, -clip.y, 0.0, 1.0);
    vTextureCoord = a_uv;
}
"#;

/// Plain sprite draw, texture is premultiplied.
pub const SPRITE_FRAG: &str = r#"#version 300 es
precision highp float;
in vec2 vTextureCoord;
uniform sampler2D u_sampler;
out vec4 fragColor;

void main() {
    fragColor = texture(u_sampler, vTextureCoord);
}
"#;

/// Flat fill used for the stage background.
pub const FILL_FRAG: &str = r#"#version 300 es
precision highp float;
uniform vec4 u_colour;
out vec4 fragColor;

void main() {
    fragColor = vec4(u_colour.rgb * u_colour.a, u_colour.a);
}
"#;

/// Noise shimmer clipped to the glyph alpha of the sprite underneath.
pub const HOVER_FRAG: &str = r#"#version 300 es
precision highp float;
in vec2 vTextureCoord;
uniform sampler2D u_sampler;
uniform vec2 u_input_size;
uniform float time;
out vec4 fragColor;

#define NUM_OCTAVES 3

float mod289(float x) { return x - floor(x * (1.0 / 289.0)) * 289.0; }
vec4 mod289(vec4 x) { return x - floor(x * (1.0 / 289.0)) * 289.0; }
vec4 perm(vec4 x) { return mod289(((x * 34.0) + 1.0) * x); }

float noise(vec3 p) {
    vec3 a = floor(p);
    vec3 d = p - a;
    d = d * d * (3.0 - 2.0 * d);

    vec4 b = a.xxyy + vec4(0.0, 1.0, 0.0, 1.0);
    vec4 k1 = perm(b.xyxy);
    vec4 k2 = perm(k1.xyxy + b.zzww);

    vec4 c = k2 + a.zzzz;
    vec4 k3 = perm(c);
    vec4 k4 = perm(c + 1.0);

    vec4 o1 = fract(k3 * (1.0 / 41.0));
    vec4 o2 = fract(k4 * (1.0 / 41.0));

    vec4 o3 = o2 * d.z + o1 * (1.0 - d.z);
    vec2 o4 = o3.yw * d.x + o3.xz * (1.0 - d.x);

    return o4.y * d.y + o4.x * (1.0 - d.y);
}

float fbm(vec3 x) {
    float v = 0.0;
    float a = 0.5;
    vec3 shift = vec3(100.0);
    for (int i = 0; i < NUM_OCTAVES; ++i) {
        v += a * noise(x);
        x = x * 2.0 + shift;
        a *= 0.5;
    }
    return v;
}

float warped_fbm(vec3 x) {
    float t = fbm(x);
    x.xy += (t - 0.5);
    t *= fbm(x);
    x.xy += (t - 0.5) * 0.6;
    return fbm(x);
}

vec4 pattern(vec2 uv) {
    float n = warped_fbm(vec3(uv * 4.0, time * 2.0));
    n *= n * 1.2;
    vec4 base = vec4(0.35, 0.43, 0.65, 1.0);
    return mix(base, vec4(1.0), smoothstep(0.0, 1.0, n));
}

void main() {
    // Anchored to the surface, not the sprite, so the strip slides over it.
    vec2 uv = (gl_FragCoord.xy - 0.5 * u_input_size) / min(u_input_size.x, u_input_size.y);
    vec4 tex = texture(u_sampler, vTextureCoord);
    fragColor = tex.a * pattern(uv);
}
"#;

/// Radial distortion around the pointer over the whole stage.
pub const SCREEN_FRAG: &str = r#"#version 300 es
precision highp float;
in vec2 vTextureCoord;
uniform sampler2D u_sampler;
uniform vec2 u_input_size;
uniform vec2 mouse;
uniform vec2 u_resolution;
uniform float ratio;
uniform float time;
out vec4 fragColor;

#define PI 3.14159265359

float rand(vec2 c) {
    return fract(sin(dot(c.xy, vec2(12.9898, 78.233))) * 43758.5453);
}

float noise(vec2 p, float freq) {
    float unit = u_input_size.x / freq;
    vec2 ij = floor(p / unit);
    vec2 xy = mod(p, unit) / unit;
    xy = 0.5 * (1.0 - cos(PI * xy));
    float a = rand(ij + vec2(0.0, 0.0));
    float b = rand(ij + vec2(1.0, 0.0));
    float c = rand(ij + vec2(0.0, 1.0));
    float d = rand(ij + vec2(1.0, 1.0));
    float x1 = mix(a, b, xy.x);
    float x2 = mix(c, d, xy.x);
    return mix(x1, x2, xy.y);
}

void main() {
    vec2 uv = (gl_FragCoord.xy - 0.5 * u_resolution.xy) / min(u_resolution.x, u_resolution.y);
    vec2 uvm = (uv - mouse) / ratio;

    vec2 tc = vTextureCoord - 0.5;
    vec2 polar = vec2(length(tc), atan(tc.y, tc.x));
    polar.y += smoothstep(0.1, 2.0, abs(uvm.x) * 2.0);
    tc = vec2(cos(polar.y) * polar.x, sin(polar.y) * polar.x);

    tc.y *= 1.0 - abs(uvm.x * 1.5) * 0.3;
    tc += noise(uv, 10000.0 + sin(time) * 5000.0) * smoothstep(0.15, 2.0, abs(uvm.x)) * 0.6;
    tc += 0.5;

    vec4 tex = texture(u_sampler, tc);
    fragColor = tex - smoothstep(0.5, 1.5, length(uvm) * 2.0);
}
"#;
