use crate::Error;

/// Operating system handle of a top-level window.
///
/// This is the raw `HWND` value as a host would hand it over. Handles are
/// never created or destroyed by this crate; keeping them valid for the
/// duration of a call is up to the caller.
pub type Handle = isize;

/// First build of Windows 11 (21H2), which introduced the Mica effect.
pub const WINDOWS_11_21H2: u32 = 22000;

/// First build of Windows 11 22H2, which introduced the system backdrop
/// attribute covering Mica, Acrylic and tabbed Mica.
pub const WINDOWS_11_22H2: u32 = 22621;

/// Effect codes of the host contract. These values are stable.
pub mod code {
	pub const BACKDROP_AUTO: i32 = 0;
	pub const BACKDROP_NONE: i32 = 1;
	pub const BACKDROP_MICA: i32 = 2;
	pub const BACKDROP_ACRYLIC: i32 = 3;
	pub const BACKDROP_TABBED_MICA: i32 = 4;
	pub const CORNER: i32 = 5;
	pub const BORDER_COLOR: i32 = 6;
	pub const CAPTION_COLOR: i32 = 7;
	pub const TEXT_COLOR: i32 = 8;
	pub const FRAME: i32 = 9;
}

/// Level of backdrop support offered by the running system.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Tier {
	/// Every backdrop is available through the system backdrop attribute.
	Full,
	/// Only Mica is available, through the legacy Mica attribute.
	Basic,
	/// No backdrop is available.
	None,
}
impl Tier {
	/// Picks the tier for the given build number of Windows.
	pub fn from_build(build: u32) -> Self {
		if build >= WINDOWS_11_22H2 {
			Tier::Full
		} else if build >= WINDOWS_11_21H2 {
			Tier::Basic
		} else {
			Tier::None
		}
	}

	/// The name hosts receive for this tier.
	pub fn as_str(&self) -> &'static str {
		match self {
			Tier::Full => "full",
			Tier::Basic => "basic",
			Tier::None => "none",
		}
	}
}
impl std::fmt::Display for Tier {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Material drawn behind the window.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Backdrop {
	/// Let the window manager decide.
	Auto = code::BACKDROP_AUTO,
	/// No backdrop at all.
	None = code::BACKDROP_NONE,
	/// Mica, a tinted take on the desktop wallpaper.
	Mica = code::BACKDROP_MICA,
	/// Acrylic, a blur of whatever is behind the window.
	Acrylic = code::BACKDROP_ACRYLIC,
	/// Untinted and unblended Mica, i.e. heavily blurred wallpaper.
	TabbedMica = code::BACKDROP_TABBED_MICA,
}
impl Backdrop {
	pub fn from_code(code: i32) -> Option<Self> {
		Some(match code {
			code::BACKDROP_AUTO => Backdrop::Auto,
			code::BACKDROP_NONE => Backdrop::None,
			code::BACKDROP_MICA => Backdrop::Mica,
			code::BACKDROP_ACRYLIC => Backdrop::Acrylic,
			code::BACKDROP_TABBED_MICA => Backdrop::TabbedMica,
			_ => return None
		})
	}

	pub fn code(self) -> i32 {
		self as i32
	}

	/// Whether the backdrop can be requested on a system of the given tier.
	///
	/// Systems below the full tier only have the legacy Mica attribute, which
	/// can express automatic, disabled and Mica backdrops. The none tier is
	/// treated like the basic one: calls are attempted and simply have no
	/// effect on builds that predate Mica.
	pub fn is_supported_on(self, tier: Tier) -> bool {
		match tier {
			Tier::Full => true,
			Tier::Basic | Tier::None => self.code() <= code::BACKDROP_MICA,
		}
	}

	/// Value of the legacy `DWMWA_MICA_EFFECT` attribute for this backdrop.
	///
	/// Returns `None` for backdrops the legacy attribute cannot express.
	pub fn legacy_mica_value(self) -> Option<i32> {
		/* This permutation was observed on early Windows 11 builds rather than
		 * documented. Keep it as a literal table. */
		const LEGACY_MICA_VALUES: [i32; 3] = [0, 2, 1];
		LEGACY_MICA_VALUES.get(self.code() as usize).copied()
	}
}

/// Color scheme requested for the window chrome alongside a backdrop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Theme {
	/// Follow the theme of the user's apps.
	Auto,
	Dark,
	Light,
}
impl Theme {
	/// Interprets the value half of a backdrop command.
	///
	/// Anything other than automatic or dark is treated as light.
	pub fn from_value(value: i32) -> Self {
		match value {
			0 => Theme::Auto,
			1 => Theme::Dark,
			_ => Theme::Light,
		}
	}

	pub fn value(self) -> i32 {
		match self {
			Theme::Auto => 0,
			Theme::Dark => 1,
			Theme::Light => 2,
		}
	}

	/// Whether the immersive dark mode should be enabled, given whether the
	/// user currently has a light theme.
	pub fn is_dark(self, system_is_light: impl FnOnce() -> bool) -> bool {
		match self {
			Theme::Dark => true,
			Theme::Auto => !system_is_light(),
			Theme::Light => false,
		}
	}
}

/// Rounding of the window corners.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Corner {
	Default = 0,
	Square = 1,
	Round = 2,
	SlightlyRound = 3,
}

/// A `COLORREF` as the window manager understands it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color(pub u32);
impl Color {
	/// Restores the color the system would have used.
	pub const DEFAULT: Color = Color(0xFFFF_FFFF);
	/// Suppresses the element altogether. Only meaningful for borders.
	pub const NONE: Color = Color(0xFFFF_FFFE);

	pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
		Color(red as u32 | (green as u32) << 8 | (blue as u32) << 16)
	}

	/// The color as the signed value carried by a command.
	pub fn value(self) -> i32 {
		self.0 as i32
	}
}

/// Window manager attributes this crate knows how to set.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Attribute {
	/// `DWMWA_USE_IMMERSIVE_DARK_MODE`
	ImmersiveDarkMode = 20,
	/// `DWMWA_WINDOW_CORNER_PREFERENCE`
	CornerPreference = 33,
	/// `DWMWA_BORDER_COLOR`
	BorderColor = 34,
	/// `DWMWA_CAPTION_COLOR`
	CaptionColor = 35,
	/// `DWMWA_TEXT_COLOR`
	TextColor = 36,
	/// `DWMWA_SYSTEMBACKDROP_TYPE`
	SystemBackdropType = 38,
	/// `DWMWA_MICA_EFFECT`, undocumented and only honored by early builds of
	/// Windows 11.
	MicaEffect = 1029,
}

/// Style the window is given when its frame is removed.
///
/// `WS_DLGFRAME | WS_SYSMENU | WS_THICKFRAME | WS_MINIMIZEBOX | WS_MAXIMIZEBOX`,
/// which drops the caption but keeps the window resizable.
pub const FRAMELESS_STYLE: u32 = 0x004F_0000;

/// `SWP_NOZORDER`
pub const SWP_NOZORDER: u32 = 0x0004;
/// `SWP_NOACTIVATE`
pub const SWP_NOACTIVATE: u32 = 0x0010;
/// `SWP_FRAMECHANGED`
pub const SWP_FRAMECHANGED: u32 = 0x0020;

/// Flags used when moving a window: the frame is recomputed, but the window
/// is neither activated nor moved in the z-order.
pub const REDRAW_FLAGS: u32 = SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED;

/// Margins extended into the client area of a window.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Margins {
	pub left: i32,
	pub right: i32,
	pub top: i32,
	pub bottom: i32,
}
impl Margins {
	/// Negative margins make the frame cover the whole window.
	pub const SHEET_OF_GLASS: Margins = Margins { left: -1, right: -1, top: -1, bottom: -1 };
}

/// Position and size of a window, in screen coordinates.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Bounds {
	pub x: i32,
	pub y: i32,
	pub width: i32,
	pub height: i32,
}

/// A validated effect request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Command {
	/// Change the backdrop and the color scheme of the window chrome.
	Backdrop {
		backdrop: Backdrop,
		theme: Theme,
	},
	/// Set the corner preference. The value is handed over as is.
	Corner(i32),
	BorderColor(Color),
	CaptionColor(Color),
	TextColor(Color),
	/// Show or hide the native frame. Only removal does anything.
	Frame(bool),
}
impl Command {
	/// Builds a command from an effect code and its value.
	pub fn from_raw(effect: i32, value: i32) -> Result<Self, Error> {
		if let Some(backdrop) = Backdrop::from_code(effect) {
			return Ok(Command::Backdrop {
				backdrop,
				theme: Theme::from_value(value)
			})
		}

		Ok(match effect {
			code::CORNER => Command::Corner(value),
			code::BORDER_COLOR => Command::BorderColor(Color(value as u32)),
			code::CAPTION_COLOR => Command::CaptionColor(Color(value as u32)),
			code::TEXT_COLOR => Command::TextColor(Color(value as u32)),
			code::FRAME => Command::Frame(value != 0),
			_ => return Err(Error::InvalidArgument(format!("Unknown effect code {}", effect)))
		})
	}

	/// The effect code of this command.
	pub fn code(&self) -> i32 {
		match self {
			Command::Backdrop { backdrop, .. } => backdrop.code(),
			Command::Corner(_) => code::CORNER,
			Command::BorderColor(_) => code::BORDER_COLOR,
			Command::CaptionColor(_) => code::CAPTION_COLOR,
			Command::TextColor(_) => code::TEXT_COLOR,
			Command::Frame(_) => code::FRAME,
		}
	}

	/// The value carried alongside the effect code.
	pub fn value(&self) -> i32 {
		match *self {
			Command::Backdrop { theme, .. } => theme.value(),
			Command::Corner(value) => value,
			Command::BorderColor(color)
			| Command::CaptionColor(color)
			| Command::TextColor(color) => color.value(),
			Command::Frame(shown) => shown as i32,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tiers_follow_build_thresholds() {
		for build in [0, 7601, 19045, 21999] {
			assert_eq!(Tier::from_build(build), Tier::None, "build {}", build);
		}
		for build in [22000, 22001, 22620] {
			assert_eq!(Tier::from_build(build), Tier::Basic, "build {}", build);
		}
		for build in [22621, 22631, 26100, u32::MAX] {
			assert_eq!(Tier::from_build(build), Tier::Full, "build {}", build);
		}
	}

	#[test]
	fn tier_names() {
		assert_eq!(Tier::Full.to_string(), "full");
		assert_eq!(Tier::Basic.as_str(), "basic");
		assert_eq!(Tier::None.as_str(), "none");
	}

	#[test]
	fn legacy_mica_table() {
		assert_eq!(Backdrop::Auto.legacy_mica_value(), Some(0));
		assert_eq!(Backdrop::None.legacy_mica_value(), Some(2));
		assert_eq!(Backdrop::Mica.legacy_mica_value(), Some(1));
		assert_eq!(Backdrop::Acrylic.legacy_mica_value(), None);
		assert_eq!(Backdrop::TabbedMica.legacy_mica_value(), None);
	}

	#[test]
	fn lower_tiers_only_take_mica() {
		assert!(Backdrop::Mica.is_supported_on(Tier::Basic));
		assert!(Backdrop::None.is_supported_on(Tier::None));
		assert!(!Backdrop::Acrylic.is_supported_on(Tier::Basic));
		assert!(!Backdrop::TabbedMica.is_supported_on(Tier::None));
		assert!(Backdrop::TabbedMica.is_supported_on(Tier::Full));
	}

	#[test]
	fn dark_flag_follows_theme() {
		assert!(Theme::Dark.is_dark(|| true));
		assert!(!Theme::Light.is_dark(|| false));
		assert!(Theme::Auto.is_dark(|| false));
		assert!(!Theme::Auto.is_dark(|| true));
	}

	#[test]
	fn commands_from_raw_codes() {
		assert_eq!(
			Command::from_raw(2, 1).unwrap(),
			Command::Backdrop { backdrop: Backdrop::Mica, theme: Theme::Dark });
		assert_eq!(Command::from_raw(5, 2).unwrap(), Command::Corner(2));
		assert_eq!(
			Command::from_raw(6, -2).unwrap(),
			Command::BorderColor(Color::NONE));
		assert_eq!(Command::from_raw(9, 0).unwrap(), Command::Frame(false));
		assert!(matches!(Command::from_raw(10, 0), Err(Error::InvalidArgument(_))));
		assert!(matches!(Command::from_raw(-1, 0), Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn command_codes_and_values() {
		let command = Command::CaptionColor(Color::rgb(0x12, 0x34, 0x56));
		assert_eq!(command.code(), code::CAPTION_COLOR);
		assert_eq!(command.value(), 0x0056_3412);
		assert_eq!(Command::from_raw(command.code(), command.value()).unwrap(), command);

		let command = Command::Backdrop { backdrop: Backdrop::Acrylic, theme: Theme::Light };
		assert_eq!((command.code(), command.value()), (3, 2));
	}
}
