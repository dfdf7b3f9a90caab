use raw_window_handle::{HasRawWindowHandle, RawWindowHandle, Win32Handle};
use crate::dwm::{self, Compositor, Probe};
use crate::platform::{Session, System};
use crate::{Backdrop, Bounds, Color, Command, Corner, Error, Handle, HostValue, Theme, Tier};

/// Level of backdrop support offered by the running system.
pub fn check_vibrancy_support() -> Tier {
	dwm::query_backdrop_tier(&System)
}

/// Whether the user has picked the light theme for their apps. Defaults to
/// `false` when that can't be determined.
pub fn is_light_theme() -> bool {
	dwm::query_theme_is_light(&System)
}

/// Applies an effect to a window, given the arguments of a host call to
/// `submitDwmCommand(handle, effect, value)`.
pub fn submit_dwm_command(args: &[HostValue]) -> Result<(), Error> {
	dwm::submit_dwm_command(&System, Session::load, args)
}

/// Moves and resizes a window, given the arguments of a host call to
/// `redrawWindow(handle, x, y, width, height)`.
pub fn redraw_window(args: &[HostValue]) -> Result<(), Error> {
	dwm::redraw_window(Session::load, args)
}

/// Applies an effect to the window with the given handle.
pub fn apply(hwnd: Handle, command: Command) -> Result<(), Error> {
	let session = Session::load()?;
	dwm::apply_effect(&System, &session, hwnd, command)
}

/// Gets the handle of a Win32 window.
fn handle_of<H: HasRawWindowHandle>(window: &H) -> Result<Handle, Error> {
	match window.raw_window_handle() {
		RawWindowHandle::Win32(Win32Handle { hwnd, .. }) if !hwnd.is_null() =>
			Ok(hwnd as Handle),
		_ =>
			/* Only Win32 windows go through the desktop window manager. */
			Err(Error::NotSupported)
	}
}

/// Sets the backdrop of the given window, along with the color scheme of its
/// frame.
///
/// Fails with [`Error::UnsupportedMode`] if the backdrop is not available in
/// the running version of Windows, see [`check_vibrancy_support`].
pub fn set_backdrop<H: HasRawWindowHandle>(window: &H, backdrop: Backdrop, theme: Theme) -> Result<(), Error> {
	apply(handle_of(window)?, Command::Backdrop { backdrop, theme })
}

/// Sets the rounding of the corners of the given window.
pub fn set_corner<H: HasRawWindowHandle>(window: &H, corner: Corner) -> Result<(), Error> {
	apply(handle_of(window)?, Command::Corner(corner as i32))
}

/// Sets the color of the border of the given window.
pub fn set_border_color<H: HasRawWindowHandle>(window: &H, color: Color) -> Result<(), Error> {
	apply(handle_of(window)?, Command::BorderColor(color))
}

/// Sets the color of the caption of the given window.
pub fn set_caption_color<H: HasRawWindowHandle>(window: &H, color: Color) -> Result<(), Error> {
	apply(handle_of(window)?, Command::CaptionColor(color))
}

/// Sets the color of the caption text of the given window.
pub fn set_text_color<H: HasRawWindowHandle>(window: &H, color: Color) -> Result<(), Error> {
	apply(handle_of(window)?, Command::TextColor(color))
}

/// Moves and resizes the given window.
pub fn set_bounds<H: HasRawWindowHandle>(window: &H, bounds: Bounds) -> Result<(), Error> {
	let hwnd = handle_of(window)?;
	let session = Session::load()?;
	dwm::redraw(&session, hwnd, bounds)
}

/// Removes the native frame of the given window, then lays it out again at
/// the given bounds so the new frame is taken into account.
pub fn remove_frame<H: HasRawWindowHandle>(window: &H, bounds: Bounds) -> Result<(), Error> {
	VibrantWindow::new(window)?.remove_frame(bounds)
}

/// A window whose backdrop is kept track of.
///
/// Some hosts reset the attributes of their windows when they are shown or
/// resized. This remembers the last effect requested for a window so that it
/// can be submitted again whenever that happens.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VibrantWindow {
	hwnd: Handle,
	backdrop: Backdrop,
	theme: Theme,
}
impl VibrantWindow {
	/// Tracks the given window, starting from Mica with the automatic theme.
	pub fn new<H: HasRawWindowHandle>(window: &H) -> Result<Self, Error> {
		Ok(Self::from_handle(handle_of(window)?))
	}

	pub fn from_handle(hwnd: Handle) -> Self {
		Self {
			hwnd,
			backdrop: Backdrop::Mica,
			theme: Theme::Auto
		}
	}

	pub fn handle(&self) -> Handle {
		self.hwnd
	}

	/// The last backdrop that was successfully applied, or the initial one.
	pub fn backdrop(&self) -> Backdrop {
		self.backdrop
	}

	pub fn theme(&self) -> Theme {
		self.theme
	}

	/// Applies a backdrop and remembers it.
	pub fn set_visual_effect(&mut self, backdrop: Backdrop, theme: Theme) -> Result<(), Error> {
		let session = Session::load()?;
		self.set_visual_effect_with(&System, &session, backdrop, theme)
	}

	fn set_visual_effect_with<P, C>(
		&mut self,
		probe: &P,
		compositor: &C,
		backdrop: Backdrop,
		theme: Theme) -> Result<(), Error>
		where P: Probe,
			  C: Compositor {

		dwm::apply_effect(probe, compositor, self.hwnd, Command::Backdrop { backdrop, theme })?;
		self.backdrop = backdrop;
		self.theme = theme;
		Ok(())
	}

	/// Submits the remembered backdrop again.
	pub fn reapply(&self) -> Result<(), Error> {
		let session = Session::load()?;
		self.reapply_with(&System, &session)
	}

	fn reapply_with<P: Probe, C: Compositor>(&self, probe: &P, compositor: &C) -> Result<(), Error> {
		dwm::apply_effect(probe, compositor, self.hwnd, Command::Backdrop {
			backdrop: self.backdrop,
			theme: self.theme
		})
	}

	/// Removes the native frame and lays the window out again at the given
	/// bounds.
	pub fn remove_frame(&self, bounds: Bounds) -> Result<(), Error> {
		let session = Session::load()?;
		self.remove_frame_with(&System, &session, bounds)
	}

	fn remove_frame_with<P: Probe, C: Compositor>(&self, probe: &P, compositor: &C, bounds: Bounds) -> Result<(), Error> {
		dwm::apply_effect(probe, compositor, self.hwnd, Command::Frame(false))?;
		dwm::redraw(compositor, self.hwnd, bounds)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dwm::stub::{Call, Stub};
	use crate::{Attribute, FRAMELESS_STYLE, REDRAW_FLAGS, WINDOWS_11_21H2, WINDOWS_11_22H2};
	use raw_window_handle::WebHandle;

	struct Window(RawWindowHandle);
	unsafe impl HasRawWindowHandle for Window {
		fn raw_window_handle(&self) -> RawWindowHandle {
			self.0
		}
	}

	fn win32(hwnd: usize) -> Window {
		let mut handle = Win32Handle::empty();
		handle.hwnd = hwnd as *mut _;
		Window(RawWindowHandle::Win32(handle))
	}

	#[test]
	fn takes_handles_of_win32_windows() {
		assert_eq!(handle_of(&win32(0xbeef)).unwrap(), 0xbeef);
		assert!(matches!(handle_of(&win32(0)), Err(Error::NotSupported)));
		let web = Window(RawWindowHandle::Web(WebHandle::empty()));
		assert!(matches!(handle_of(&web), Err(Error::NotSupported)));
		assert!(matches!(VibrantWindow::new(&web), Err(Error::NotSupported)));
	}

	#[test]
	fn starts_with_automatic_mica() {
		let window = VibrantWindow::new(&win32(0x10)).unwrap();
		assert_eq!(window.handle(), 0x10);
		assert_eq!(window.backdrop(), Backdrop::Mica);
		assert_eq!(window.theme(), Theme::Auto);
	}

	#[test]
	fn remembers_applied_effects() {
		let stub = Stub::new(WINDOWS_11_22H2);
		let mut window = VibrantWindow::from_handle(0x10);
		window.set_visual_effect_with(&stub, &stub, Backdrop::Acrylic, Theme::Light).unwrap();
		assert_eq!((window.backdrop(), window.theme()), (Backdrop::Acrylic, Theme::Light));

		stub.calls.borrow_mut().clear();
		window.reapply_with(&stub, &stub).unwrap();
		assert_eq!(stub.calls().last(), Some(&Call::Attribute(0x10, Attribute::SystemBackdropType, 3)));
	}

	#[test]
	fn keeps_previous_effect_when_unsupported() {
		let stub = Stub::new(WINDOWS_11_21H2);
		let mut window = VibrantWindow::from_handle(0x10);
		let result = window.set_visual_effect_with(&stub, &stub, Backdrop::TabbedMica, Theme::Dark);
		assert!(matches!(result, Err(Error::UnsupportedMode(Backdrop::TabbedMica))));
		assert_eq!((window.backdrop(), window.theme()), (Backdrop::Mica, Theme::Auto));
	}

	#[test]
	fn removing_the_frame_redraws() {
		let stub = Stub::new(WINDOWS_11_22H2);
		let bounds = Bounds { x: 1, y: 2, width: 3, height: 4 };
		VibrantWindow::from_handle(0x10).remove_frame_with(&stub, &stub, bounds).unwrap();
		assert_eq!(stub.calls(), vec![
			Call::Style(0x10, FRAMELESS_STYLE),
			Call::Pos(0x10, bounds, REDRAW_FLAGS),
		]);
	}

	#[cfg(not(windows))]
	#[test]
	fn nothing_is_supported_elsewhere() {
		assert_eq!(check_vibrancy_support(), Tier::None);
		assert!(!is_light_theme());
		assert!(matches!(set_backdrop(&win32(0x10), Backdrop::Mica, Theme::Dark), Err(Error::NotSupported)));

		let args = [HostValue::Number(16.0), HostValue::Number(2.0), HostValue::Number(0.0)];
		assert!(matches!(submit_dwm_command(&args), Err(Error::NotSupported)));
		assert!(matches!(submit_dwm_command(&args[..2]), Err(Error::InvalidArgument(_))));
	}
}
