//! Roster business logic: building, manual reassignment, message rendering.

mod builder;
mod crossref;
mod message;
mod reassign;

pub use builder::build_roster;
pub use crossref::{cross_reference, RegistrantMatch};
pub use message::render_message;
pub use reassign::{move_down, move_player, move_up};
