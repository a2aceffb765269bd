//! Value objects - immutable types that represent domain concepts

mod ids;
mod visibility;

pub use ids::{IdParseError, MessageId, UserId};
pub use visibility::{is_visible_to, MessageBox, VisibilityFilter};
