use crate::engine::StrokeColor;

/// Buttons on the drawing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
	/// Opens the color picker.
	PickColor,
	/// One of the picker's swatches.
	SelectColor(StrokeColor),
	UndoLast,
	UndoAll,
	/// Not implemented; pressing it does nothing.
	ReadMode,
	/// Not implemented; pressing it does nothing.
	Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiElement {
	ColorPicker,
	SaveErrorLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiUpdate {
	pub element: UiElement,
	pub visible: bool,
}

impl UiUpdate {
	pub fn show(element: UiElement) -> Self {
		Self {
			element,
			visible: true,
		}
	}

	pub fn hide(element: UiElement) -> Self {
		Self {
			element,
			visible: false,
		}
	}
}

/// The updates that put the chrome into its start-up state.
pub fn hide_all() -> [UiUpdate; 2] {
	[
		UiUpdate::hide(UiElement::ColorPicker),
		UiUpdate::hide(UiElement::SaveErrorLabel),
	]
}
