//! Translation of effect requests into window manager calls.
//!
//! The native side is split behind two traits. A [`Probe`] answers questions
//! about the running system and a [`Compositor`] carries out changes to a
//! window. The platform layer provides the real implementations; everything
//! in here only decides which calls to make, and in which order.
use crate::{
	args, Attribute, Backdrop, Bounds, Command, Error, Handle, HostValue, Margins, Tier,
	FRAMELESS_STYLE, REDRAW_FLAGS
};

/// Read-only queries about the running system.
pub trait Probe {
	/// The build number of the running Windows, or zero when unknown.
	fn build_number(&self) -> u32;

	/// Whether the user has picked the light theme for their apps.
	fn apps_use_light_theme(&self) -> Result<bool, Error>;
}

/// Calls that change how the window manager presents a window.
pub trait Compositor {
	/// `DwmExtendFrameIntoClientArea`
	fn extend_frame_into_client_area(&self, hwnd: Handle, margins: Margins) -> Result<(), Error>;

	/// `DwmSetWindowAttribute` with a 32-bit value.
	fn set_window_attribute(&self, hwnd: Handle, attribute: Attribute, value: i32) -> Result<(), Error>;

	/// `SetWindowLongA` on `GWL_STYLE`.
	fn set_window_style(&self, hwnd: Handle, style: u32) -> Result<(), Error>;

	/// `SetWindowPos` without an insertion target.
	fn set_window_pos(&self, hwnd: Handle, bounds: Bounds, flags: u32) -> Result<(), Error>;
}

impl<T: Probe + ?Sized> Probe for &T {
	fn build_number(&self) -> u32 {
		(**self).build_number()
	}

	fn apps_use_light_theme(&self) -> Result<bool, Error> {
		(**self).apps_use_light_theme()
	}
}

impl<T: Compositor + ?Sized> Compositor for &T {
	fn extend_frame_into_client_area(&self, hwnd: Handle, margins: Margins) -> Result<(), Error> {
		(**self).extend_frame_into_client_area(hwnd, margins)
	}

	fn set_window_attribute(&self, hwnd: Handle, attribute: Attribute, value: i32) -> Result<(), Error> {
		(**self).set_window_attribute(hwnd, attribute, value)
	}

	fn set_window_style(&self, hwnd: Handle, style: u32) -> Result<(), Error> {
		(**self).set_window_style(hwnd, style)
	}

	fn set_window_pos(&self, hwnd: Handle, bounds: Bounds, flags: u32) -> Result<(), Error> {
		(**self).set_window_pos(hwnd, bounds, flags)
	}
}

/// The backdrop tier of the system.
pub fn query_backdrop_tier<P: Probe>(probe: &P) -> Tier {
	Tier::from_build(probe.build_number())
}

/// Whether the system is in light theme. Failing to find out means dark.
pub fn query_theme_is_light<P: Probe>(probe: &P) -> bool {
	match probe.apps_use_light_theme() {
		Ok(light) => light,
		Err(what) => {
			log::debug!("Could not read the app theme, assuming dark: {}", what);
			false
		}
	}
}

/// Native call failures past argument checking don't abort an operation.
/// They are reported and the remaining calls still go through.
fn best_effort(result: Result<(), Error>) {
	if let Err(what) = result {
		log::warn!("{}", what);
	}
}

/// Applies a single command to the given window.
pub fn apply_effect<P, C>(probe: &P, compositor: &C, hwnd: Handle, command: Command) -> Result<(), Error>
	where P: Probe,
		  C: Compositor {

	log::debug!("Applying {:?} to window {:#x}", command, hwnd);
	match command {
		Command::Corner(value) =>
			best_effort(compositor.set_window_attribute(hwnd, Attribute::CornerPreference, value)),
		Command::BorderColor(color) =>
			best_effort(compositor.set_window_attribute(hwnd, Attribute::BorderColor, color.value())),
		Command::CaptionColor(color) =>
			best_effort(compositor.set_window_attribute(hwnd, Attribute::CaptionColor, color.value())),
		Command::TextColor(color) =>
			best_effort(compositor.set_window_attribute(hwnd, Attribute::TextColor, color.value())),
		Command::Frame(shown) =>
			if !shown {
				best_effort(compositor.set_window_style(hwnd, FRAMELESS_STYLE))
			},
		Command::Backdrop { backdrop, theme } => {
			let tier = query_backdrop_tier(probe);

			/* Check support before touching the window, so that an unsupported
			 * request leaves it exactly as it was. */
			if !backdrop.is_supported_on(tier) {
				return Err(Error::UnsupportedMode(backdrop))
			}

			best_effort(compositor.extend_frame_into_client_area(hwnd, Margins::SHEET_OF_GLASS));

			let dark = theme.is_dark(|| query_theme_is_light(probe));
			best_effort(compositor.set_window_attribute(
				hwnd,
				Attribute::ImmersiveDarkMode,
				dark as i32));

			set_backdrop(compositor, hwnd, tier, backdrop);
		}
	}
	Ok(())
}

/// Sets the backdrop attribute appropriate for the tier.
fn set_backdrop<C: Compositor>(compositor: &C, hwnd: Handle, tier: Tier, backdrop: Backdrop) {
	if tier == Tier::Full {
		/* The system backdrop attribute takes the same values as our codes. */
		best_effort(compositor.set_window_attribute(
			hwnd,
			Attribute::SystemBackdropType,
			backdrop.code()));
	} else if let Some(value) = backdrop.legacy_mica_value() {
		best_effort(compositor.set_window_attribute(hwnd, Attribute::MicaEffect, value));
	}
}

/// Moves and resizes a window without activating it or changing its z-order.
pub fn redraw<C: Compositor>(compositor: &C, hwnd: Handle, bounds: Bounds) -> Result<(), Error> {
	log::debug!("Moving window {:#x} to {:?}", hwnd, bounds);
	best_effort(compositor.set_window_pos(hwnd, bounds, REDRAW_FLAGS));
	Ok(())
}

/// Handles `submitDwmCommand(handle, effect, value)`.
///
/// Arguments are validated before the compositor is opened, so that invalid
/// calls never reach the system.
pub fn submit_dwm_command<P, C, F>(probe: &P, open: F, args: &[HostValue]) -> Result<(), Error>
	where P: Probe,
		  C: Compositor,
		  F: FnOnce() -> Result<C, Error> {

	let (hwnd, command) = args::dwm_command(args)?;
	let compositor = open()?;
	apply_effect(probe, &compositor, hwnd, command)
}

/// Handles `redrawWindow(handle, x, y, width, height)`.
pub fn redraw_window<C, F>(open: F, args: &[HostValue]) -> Result<(), Error>
	where C: Compositor,
		  F: FnOnce() -> Result<C, Error> {

	let (hwnd, bounds) = args::redraw(args)?;
	let compositor = open()?;
	redraw(&compositor, hwnd, bounds)
}
