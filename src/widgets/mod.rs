//! Concrete widgets built on [`Panel`](crate::panel::Panel)

pub mod button;
pub mod image;
pub mod input;
pub mod number;
pub mod tabs;
pub mod text;

pub use button::{ButtonField, ClickListener};
pub use image::{ImageField, BLANK_IMAGE};
pub use input::{ChangeListener, CheckboxField, EditListener, EditTextField};
pub use number::NumberField;
pub use tabs::{SelectionListener, TabSelector, TabSelectorItem};
pub use text::{ProgressBarField, TextField};
