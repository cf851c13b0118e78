/// ANSI escape fragments used to wrap display lines.
///
/// Color capability is decided by the caller (terminal probe, `NO_COLOR`) and
/// injected as a value; the library never inspects its environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dim: &'static str,
    pub cyan: &'static str,
    pub reset: &'static str,
}

impl Palette {
    /// Dim/cyan escapes for ANSI-capable terminals.
    pub const fn ansi() -> Self {
        Self {
            dim: "\x1b[2m",
            cyan: "\x1b[36m",
            reset: "\x1b[0m",
        }
    }

    /// All fragments empty; lines pass through unstyled.
    pub const fn plain() -> Self {
        Self {
            dim: "",
            cyan: "",
            reset: "",
        }
    }

    /// Picks a palette from the caller's capability probe: color requires an
    /// interactive terminal and no suppression request.
    pub fn from_capability(stdout_is_terminal: bool, no_color: bool) -> Self {
        if stdout_is_terminal && !no_color {
            Self::ansi()
        } else {
            Self::plain()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::plain()
    }
}
