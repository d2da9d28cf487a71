mod action;
mod backend;
mod event;
mod loading;
mod markup;
mod message;
mod quick_prompts;
mod scope;
mod session;
mod slash_commands;
mod textarea;

pub use action::*;
pub use backend::*;
pub use event::*;
pub use loading::*;
pub use markup::*;
pub use message::*;
pub use quick_prompts::*;
pub use scope::*;
pub use session::*;
pub use slash_commands::*;
pub use textarea::*;
