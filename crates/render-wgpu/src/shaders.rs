/// WGSL shader for the instanced wall boxes.
pub const WALL_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_wall(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    // Axis-aligned scale only, so the model matrix keeps normals axis-aligned.
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_wall(in: VertexOutput) -> @location(0) vec4<f32> {
    let light_dir = normalize(vec3<f32>(0.3, 1.0, 0.5));
    let ambient = 0.6;
    let diffuse = abs(dot(in.world_normal, light_dir));
    let lighting = ambient + diffuse * 0.4;
    return vec4<f32>(in.color.rgb * lighting, in.color.a);
}
"#;

/// WGSL shader for the checker floor. `uv` arrives pre-scaled by the repeat
/// count, so each integer cell is one tile.
pub const FLOOR_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct FloorVertex {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

struct FloorOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_floor(vertex: FloorVertex) -> FloorOutput {
    var out: FloorOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_floor(in: FloorOutput) -> @location(0) vec4<f32> {
    let cell = floor(in.uv);
    let parity = (i32(cell.x) + i32(cell.y)) & 1;
    let light = vec3<f32>(0.8, 0.8, 0.8);
    let dark = vec3<f32>(0.25, 0.25, 0.25);
    return vec4<f32>(select(light, dark, parity == 1), 1.0);
}
"#;
