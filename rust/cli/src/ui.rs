//! Prefixed messages for stderr.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_messages() {
        let mut buf = Vec::new();
        write_error(&mut buf, "bad input").expect("write");
        display_warning(&mut buf, "careful").expect("write");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "Error: bad input\nWARNING: careful\n"
        );
    }
}
