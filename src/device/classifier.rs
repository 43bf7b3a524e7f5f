/// Sub-command prefix that carries the interface description
pub const DESCRIPTION_PREFIX: &str = "description ";

pub fn is_description_line(line: &str) -> bool {
    line.starts_with(DESCRIPTION_PREFIX)
}

/// An "empty" loopback has no sub-commands other than an optional description.
///
/// Such a stanza can be rolled back by deleting the interface; anything else
/// is real configuration that must survive a rollback.
pub fn is_trivial<S: AsRef<str>>(sub_lines: &[S]) -> bool {
    sub_lines.iter().all(|line| {
        let line = line.as_ref();
        line.trim().is_empty() || is_description_line(line)
    })
}
