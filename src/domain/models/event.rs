use tui_textarea::Input;

use super::TurnOutcome;

pub enum Event {
    BackendReply(TurnOutcome),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardNewline(),
    KeyboardPaste(String),
    QuickPrompt(usize),
    ScopeNext(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
