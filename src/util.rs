// util.rs

use std::io::{ErrorKind, Write};

/// Writes one line, treating a closed pipe as success so that
/// `calculator | head` does not abort the session.
pub fn writeln_ignore_broken_pipe<W: Write + ?Sized, S: AsRef<str>>(w: &mut W, s: S) -> std::io::Result<()> {
    match writeln!(w, "{}", s.as_ref()) {
        Err(ref e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

pub fn flush_ignore_broken_pipe<W: Write + ?Sized>(w: &mut W) -> std::io::Result<()> {
    match w.flush() {
        Err(ref e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn broken_pipe_is_not_an_error() {
        assert!(writeln_ignore_broken_pipe(&mut ClosedPipe, "x").is_ok());
        assert!(flush_ignore_broken_pipe(&mut ClosedPipe).is_ok());
    }

    #[test]
    fn writes_a_line() {
        let mut out = Vec::new();
        writeln_ignore_broken_pipe(&mut out, "hello").unwrap();
        assert_eq!(out, b"hello\n");
    }
}
