use super::state::Focus;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    SetFocus(Focus),

    InputChar(char),
    Backspace,
    ClearInput,
    /// Enter in an input field: load the URL or save the key.
    Submit,

    /// Run the lyrics + trivia pipeline for the loaded video.
    Search,

    TogglePause,
    SeekForward,
    SeekBack,

    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
    PageUp,
    PageDown,

    Resize,
}
