//! Source location of the application's logging call
//!
//! Frames are not walked at runtime. Every function between a public entry
//! point and [`CallSite::locate`] carries `#[track_caller]`, so the location
//! reported is the one of the outermost non-annotated caller: the
//! application code. Adding a helper in that chain without the attribute
//! would make it report the helper instead.
use std::panic::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl<'a> CallSite<'a> {
    pub const fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// Renders `<dir>/<file>:<line>`.
    pub fn render(&self) -> String {
        render_location(self.file, self.line)
    }
}

impl CallSite<'static> {
    #[track_caller]
    #[inline]
    pub fn locate() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl<'a> From<&Location<'a>> for CallSite<'a> {
    fn from(location: &Location<'a>) -> Self {
        Self::new(location.file(), location.line())
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Keeps the two innermost path segments of `file` and appends the line.
/// A path without separator is kept whole. Backslashes are rendered as `/`.
pub fn render_location(file: &str, line: u32) -> String {
    let short = match file.rfind(is_separator) {
        None => file,
        Some(idx) => match file[..idx].rfind(is_separator) {
            None => file,
            Some(dir_idx) => &file[dir_idx + 1..],
        },
    };
    format!("{}:{line}", short.replace('\\', "/"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_render_trims_to_two_segments() {
        assert_eq!(render_location("/home/dev/svc/src/main.rs", 12), "src/main.rs:12");
        assert_eq!(render_location("src/main.rs", 3), "src/main.rs:3");
        assert_eq!(render_location("C:\\svc\\src\\lib.rs", 7), "src/lib.rs:7");
    }

    #[test]
    fn test_render_without_separator() {
        assert_eq!(render_location("main.rs", 1), "main.rs:1");
        assert_eq!(render_location("", 0), ":0");
    }

    #[test]
    fn test_locate_reports_own_line() {
        let expected_line = line!() + 1;
        let site = CallSite::locate();
        assert_eq!(site.file, file!());
        assert_eq!(site.line, expected_line);
        assert_eq!(site.render(), format!("src/caller.rs:{expected_line}"));
    }
}
