//! Single-line terminal display surface.
//!
//! The surface is created once at startup, rewritten in place as the track
//! changes, and disposed exactly once at shutdown. When stdout is not a
//! terminal each update becomes its own line instead of an in-place
//! rewrite, so the widget stays usable under pipes.

use std::io::{self, IsTerminal, Write};

/// A persistent one-line text label.
///
/// `set_track` short-circuits when the incoming text equals what is already
/// displayed, so repeated identical updates cost nothing visible.
pub struct StatusBar<W: Write> {
    out: W,
    current: Option<String>,
    in_place: bool,
    disposed: bool,
}

impl StatusBar<io::Stdout> {
    /// Create the surface on stdout, rewriting in place when attached to a
    /// terminal.
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let in_place = stdout.is_terminal();
        Self::new(stdout, in_place)
    }
}

impl<W: Write> StatusBar<W> {
    /// Create a surface over an arbitrary writer.
    pub fn new(out: W, in_place: bool) -> Self {
        Self {
            out,
            current: None,
            in_place,
            disposed: false,
        }
    }

    /// Show `track` on the surface unless it is already displayed.
    ///
    /// Write failures are swallowed; a label that fails to paint will be
    /// repainted by a later differing update anyway.
    pub fn set_track(&mut self, track: &str) {
        if self.disposed || self.current.as_deref() == Some(track) {
            return;
        }

        if self.in_place {
            // \r + erase-line keeps the label on one terminal row.
            let _ = write!(self.out, "\r\x1b[2K{track}");
        } else {
            let _ = writeln!(self.out, "{track}");
        }
        let _ = self.out.flush();

        self.current = Some(track.to_string());
    }

    /// Release the surface, clearing the label. Later calls are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        if self.in_place && self.current.is_some() {
            let _ = write!(self.out, "\r\x1b[2K");
            let _ = self.out.flush();
        }

        self.disposed = true;
    }
}

impl<W: Write> Drop for StatusBar<W> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line_surface() -> StatusBar<Vec<u8>> {
        StatusBar::new(Vec::new(), false)
    }

    #[test]
    fn repeated_identical_updates_write_once() {
        let mut bar = line_surface();

        bar.set_track("♫ Song A");
        bar.set_track("♫ Song A");

        assert_eq!(String::from_utf8(bar.out.clone()).unwrap(), "♫ Song A\n");
    }

    #[test]
    fn differing_updates_each_write() {
        let mut bar = line_surface();

        bar.set_track("♫ Song A");
        bar.set_track("Network Error");
        bar.set_track("♫ Song A");

        assert_eq!(
            String::from_utf8(bar.out.clone()).unwrap(),
            "♫ Song A\nNetwork Error\n♫ Song A\n"
        );
    }

    #[test]
    fn in_place_mode_rewrites_the_same_row() {
        let mut bar = StatusBar::new(Vec::new(), true);

        bar.set_track("♫ Song A");

        let painted = String::from_utf8(bar.out.clone()).unwrap();
        assert!(painted.starts_with("\r\x1b[2K"));
        assert!(painted.ends_with("♫ Song A"));
    }

    #[test]
    fn dispose_silences_later_updates() {
        let mut bar = line_surface();

        bar.set_track("♫ Song A");
        bar.dispose();
        bar.dispose();
        bar.set_track("♫ Song B");

        assert_eq!(String::from_utf8(bar.out.clone()).unwrap(), "♫ Song A\n");
    }
}
