use std::io::{self, Write};

pub const CONSOLE_HEADER: &str = "--- Content (printed to console instead) ---";
pub const CONSOLE_FOOTER: &str = "--------------------------------------------";

/// Writes `text` verbatim between the two delimiter lines.
pub fn print_to_console<W: Write + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{}", CONSOLE_HEADER)?;
    writeln!(out)?;
    writeln!(out, "{}", text)?;
    writeln!(out)?;
    writeln!(out, "{}", CONSOLE_FOOTER)?;
    out.flush()
}
