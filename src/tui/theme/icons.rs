//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

#[derive(Debug, Clone)]
pub struct Icons {
    pub play: &'static str,
    pub pause: &'static str,

    pub link: &'static str,
    pub key: &'static str,
    pub search: &'static str,

    pub success: &'static str,
    pub error: &'static str,
    pub loading: &'static str,
    pub info: &'static str,

    pub music: &'static str,
    pub lyrics: &'static str,

    pub progress_full: &'static str,
    pub progress_empty: &'static str,
    pub progress_head: &'static str,
}

impl Icons {
    pub const fn nerd() -> Self {
        Self {
            play: "\u{f04b}",    // nf-fa-play
            pause: "\u{f04c}",   // nf-fa-pause

            link: "\u{f0c1}",    // nf-fa-link
            key: "\u{f084}",     // nf-fa-key
            search: "\u{f002}",  // nf-fa-search

            success: "\u{f00c}", // nf-fa-check
            error: "\u{f00d}",   // nf-fa-times
            loading: "\u{f110}", // nf-fa-spinner
            info: "\u{f05a}",    // nf-fa-info_circle

            music: "\u{f001}",   // nf-fa-music
            lyrics: "\u{f15c}",  // nf-fa-file_text_o

            progress_full: "━",
            progress_empty: "─",
            progress_head: "●",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}
