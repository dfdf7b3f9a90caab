#[cfg(windows)]
fn main() {
	let event_loop = winit::event_loop::EventLoop::new();
	let window = winit::window::WindowBuilder::new()
		.with_resizable(true)
		.with_decorations(true)
		.with_inner_size(winit::dpi::PhysicalSize::new(800, 600))
		.build(&event_loop).unwrap();

	let tier = hwvibrancy::check_vibrancy_support();
	println!("backdrop support: {}", tier);

	let backdrop = match tier {
		hwvibrancy::Tier::Full => hwvibrancy::Backdrop::Acrylic,
		_ => hwvibrancy::Backdrop::Mica,
	};
	let mut vibrant = hwvibrancy::VibrantWindow::new(&window).unwrap();
	vibrant.set_visual_effect(backdrop, hwvibrancy::Theme::Auto).unwrap();
	hwvibrancy::set_corner(&window, hwvibrancy::Corner::Round).unwrap();
	hwvibrancy::set_border_color(&window, hwvibrancy::Color::rgb(0x60, 0x30, 0xc0)).unwrap();

	event_loop.run(move |event, _, flow| {
		*flow = winit::event_loop::ControlFlow::Wait;
		match event {
			winit::event::Event::WindowEvent { window_id, event }
			if window_id == window.id() => match event {

				winit::event::WindowEvent::CloseRequested =>
					*flow = winit::event_loop::ControlFlow::Exit,
				winit::event::WindowEvent::Resized(_) => {
					let _ = vibrant.reapply();
				},
				_ => {}
			},
			_ => {}
		}
	})
}

#[cfg(not(windows))]
fn main() {
	eprintln!("This demo needs the desktop window manager of Windows.");
}
