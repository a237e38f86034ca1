use log::error;
use softscan::colors;
use softscan::prelude::*;

fn load_mesh() -> Result<Mesh, String> {
    match std::env::args().nth(1) {
        Some(path) => Mesh::from_file(&path).map_err(|e| format!("{path}: {e}")),
        None => Ok(Mesh::unit_cube()),
    }
}

fn make_context(width: u32, height: u32) -> RenderContext {
    RenderContext::new(width, height, DirectionalLight::new(Vec3::new(0.0, -0.5, 1.0)))
}

fn main() -> Result<(), String> {
    env_logger::init();

    let mut window = Window::new("softscan", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut context = make_context(window.width(), window.height());
    let mut frame = vec![0u8; (window.width() * window.height() * 4) as usize];

    let mesh = match load_mesh() {
        Ok(mesh) => mesh,
        Err(e) => {
            error!("failed to load mesh: {e}");
            return Err(e);
        }
    };
    let texture = Texture::checkerboard(256, 8, colors::WHITE, 0xFF405060);

    let mut model_transform = Transform::new();
    model_transform.set_position_xyz(0.0, 0.0, 3.5);

    let aspect = window.width() as f32 / window.height() as f32;
    let mut camera = Camera::new(Projection::from_degrees(70.0, aspect, 0.1, 1000.0));
    let controller = CameraController::default();

    let mut limiter = FrameLimiter::new(&window);
    let mut fps = FpsCounter::new();

    'running: loop {
        match window.poll_events() {
            WindowEvent::Quit => break 'running,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                context = make_context(w, h);
                frame.resize((w * h * 4) as usize, 0);
                camera.set_aspect_ratio(w as f32 / h as f32);
            }
            WindowEvent::None => {}
        }

        let delta_ms = limiter.wait_and_get_delta(&window);
        let delta = delta_ms as f32 / 1000.0;

        camera.update(window.input(), &controller, delta);
        model_transform.rotate_axis(Vec3::UP, delta);

        context.clear(180);
        context.clear_depth();
        mesh.draw(
            &context,
            &camera.view_projection(),
            &model_transform.to_matrix(),
            &texture,
        );

        context.framebuffer().write_to(&mut frame);
        window.present(&frame)?;
        fps.tick(delta_ms);
    }

    Ok(())
}
