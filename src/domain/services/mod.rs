pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
pub mod events;
mod greeting;
mod markup;
mod orchestrator;
mod scope_selector;
mod scroll;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use greeting::*;
pub use markup::*;
pub use orchestrator::*;
pub use scope_selector::*;
pub use scroll::*;
