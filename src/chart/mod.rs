//! Chart model: scales, the scene description, and tooltip interaction.
//!
//! Everything here is pure data transformation; drawing lives in the
//! `render`, `plot` and `tui` backends.

pub mod scale;
pub mod scene;
pub mod tooltip;

pub use scale::{LinearScale, Tick, TimeScale};
pub use scene::{Axis, AxisOrientation, Bar, ChartScales, LabelRole, Scene, TextAnchor, TextLabel};
pub use tooltip::{PointerEvent, Tooltip, Visibility};
