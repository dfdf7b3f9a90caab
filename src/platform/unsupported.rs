//! Stand-ins for systems without a desktop window manager to talk to.
use crate::dwm::{Compositor, Probe};
use crate::{Attribute, Bounds, Error, Handle, Margins};

/// Reports no version and no theme.
pub struct System;
impl Probe for System {
	fn build_number(&self) -> u32 {
		0
	}

	fn apps_use_light_theme(&self) -> Result<bool, Error> {
		Err(Error::NotSupported)
	}
}

/// Can never be opened.
pub enum Session {}
impl Session {
	pub fn load() -> Result<Self, Error> {
		Err(Error::NotSupported)
	}
}
impl Compositor for Session {
	fn extend_frame_into_client_area(&self, _: Handle, _: Margins) -> Result<(), Error> {
		match *self {}
	}

	fn set_window_attribute(&self, _: Handle, _: Attribute, _: i32) -> Result<(), Error> {
		match *self {}
	}

	fn set_window_style(&self, _: Handle, _: u32) -> Result<(), Error> {
		match *self {}
	}

	fn set_window_pos(&self, _: Handle, _: Bounds, _: u32) -> Result<(), Error> {
		match *self {}
	}
}
