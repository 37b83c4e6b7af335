//! Plan annotation: one colored arrow per resolved item, from where the
//! detector saw it to its target in the assigned zone, labeled with the
//! item name.
//!
//! Rendering always works on a copy; the rectified canvas handed in is left
//! untouched so it can serve as the "before" image of a later comparison.

mod arrow;
mod color;
mod draw;

pub use arrow::{arrows_for_plan, render_arrows, ArrowSpec, ArrowStyle};
pub use color::{parse_hex_color, ColorParseError, ZoneColors};
pub use draw::{draw_arrow, draw_label, draw_thick_line};
