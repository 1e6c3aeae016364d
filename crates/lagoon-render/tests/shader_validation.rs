//! Parse and validate every embedded WGSL module so shader typos fail in CI
//! instead of at device creation.

use naga::valid::{Capabilities, ValidationFlags, Validator};

fn validate(name: &str, source: &str) {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("{name}: parse error: {}", e.emit_to_string(source)));
    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .unwrap_or_else(|e| panic!("{name}: validation error: {e:?}"));
}

#[test]
fn sky_shader_is_valid() {
    validate("sky.wgsl", include_str!("../shaders/sky.wgsl"));
}

#[test]
fn terrain_shader_is_valid() {
    validate("terrain.wgsl", include_str!("../shaders/terrain.wgsl"));
}

#[test]
fn water_shader_is_valid() {
    validate("water.wgsl", include_str!("../shaders/water.wgsl"));
}

#[test]
fn terrain_shader_discards_by_clip_mode() {
    let source = include_str!("../shaders/terrain.wgsl");

    // Mode 1 culls terrain under the waterline (reflection pass), mode 2
    // terrain above it (refraction pass); mode 0 has no discard branch.
    let below = "globals.clip_mode == 1u && in.world_pos.y < globals.water_height";
    let above = "globals.clip_mode == 2u && in.world_pos.y > globals.water_height";
    for condition in [below, above] {
        let Some(at) = source.find(condition) else {
            panic!("terrain shader lost clip branch: {condition}");
        };
        let branch = &source[at..at + condition.len() + 32];
        assert!(branch.contains("discard"), "clip branch no longer discards: {condition}");
    }
    assert!(!source.contains("clip_mode == 0u"));
}

#[test]
fn shaders_declare_both_entry_points() {
    for source in [
        include_str!("../shaders/sky.wgsl"),
        include_str!("../shaders/terrain.wgsl"),
        include_str!("../shaders/water.wgsl"),
    ] {
        let module = naga::front::wgsl::parse_str(source).unwrap();
        let names: Vec<_> = module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
        assert!(names.contains(&"vs_main"));
        assert!(names.contains(&"fs_main"));
    }
}
