use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softscan::prelude::*;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_context() -> RenderContext {
    RenderContext::new(
        BUFFER_WIDTH,
        BUFFER_HEIGHT,
        DirectionalLight::new(Vec3::new(0.0, -0.5, 1.0)),
    )
}

fn triangle(scale: f32) -> [Vertex; 3] {
    let normal = Vec3::new(0.0, 0.0, -1.0);
    [
        Vertex::new(
            Vec4::new(-scale, -scale, 0.0, 1.0),
            Vec2::new(0.0, 0.0),
            normal,
        ),
        Vertex::new(Vec4::new(0.0, scale, 0.0, 1.0), Vec2::new(0.5, 1.0), normal),
        Vertex::new(
            Vec4::new(scale, -scale, 0.0, 1.0),
            Vec2::new(1.0, 0.0),
            normal,
        ),
    ]
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let context = create_context();
    let texture = Texture::checkerboard(64, 8, 0xFFFFFFFF, 0xFF202020);

    for (name, scale) in [("small", 0.05), ("medium", 0.3), ("large", 0.9)] {
        let tri = triangle(scale);
        group.bench_with_input(BenchmarkId::new("scanline", name), &tri, |b, tri| {
            b.iter(|| {
                context.clear_depth();
                context.draw_triangle(
                    black_box(&tri[0]),
                    black_box(&tri[1]),
                    black_box(&tri[2]),
                    &texture,
                );
            });
        });
    }

    group.finish();
}

fn benchmark_mesh_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_draw");

    let context = create_context();
    let texture = Texture::checkerboard(256, 8, 0xFFFFFFFF, 0xFF202020);
    let cube = Mesh::unit_cube();

    let mut model = Transform::new();
    model.set_position_xyz(0.0, 0.0, 3.5).rotate_axis(Vec3::UP, 0.6);
    let world = model.to_matrix();

    let projection = Projection::from_degrees(
        70.0,
        BUFFER_WIDTH as f32 / BUFFER_HEIGHT as f32,
        0.1,
        1000.0,
    );
    let view_projection = Camera::new(projection).view_projection();

    group.bench_function("cube_parallel", |b| {
        b.iter(|| {
            context.clear_depth();
            cube.draw(
                &context,
                black_box(&view_projection),
                black_box(&world),
                &texture,
            );
        });
    });

    group.bench_function("cube_serial", |b| {
        b.iter(|| {
            context.clear_depth();
            cube.draw_serial(
                &context,
                black_box(&view_projection),
                black_box(&world),
                &texture,
            );
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_mesh_draw);
criterion_main!(benches);
