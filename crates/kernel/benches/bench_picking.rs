use std::hint::black_box;
use std::time::Instant;

use glam::Vec3;
use stereoscape_ecs::{GameObject, cube_vertices};
use stereoscape_kernel::{Player, Scene};

fn make_scene(object_count: usize, spacing: f32) -> Scene {
    let mut scene = Scene::new(Player::default());
    let vertices = cube_vertices();
    let side = (object_count as f32).sqrt().ceil() as usize;
    for i in 0..object_count {
        let mut object = GameObject::new(&vertices).expect("cube allocation");
        object.set_position(Vec3::new(
            (i % side) as f32 * spacing,
            0.0,
            (i / side) as f32 * spacing,
        ));
        scene.spawn(object);
    }
    scene
}

fn bench_closest(object_count: usize, iterations: usize) {
    let scene = make_scene(object_count, 2.0);
    let target = Vec3::new(5.0, 0.0, 5.0);

    let start = Instant::now();
    let mut hits = 0usize;
    for _ in 0..iterations {
        if black_box(&scene)
            .closest_object_to(black_box(target), 4.0)
            .is_some()
        {
            hits += 1;
        }
    }
    let elapsed = start.elapsed();
    let per_query = elapsed / iterations as u32;

    println!(
        "closest_object_to: {object_count} objects, {iterations} queries, {hits} hits, {per_query:?}/query"
    );
}

fn main() {
    println!("=== Picking Benchmarks ===\n");
    for count in [10, 50, 100, 500, 1000] {
        bench_closest(count, 10_000);
    }
}
