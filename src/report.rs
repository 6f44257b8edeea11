use std::io::{self, Write};

pub const HEADER: &str = "Generated Assignment Questions:";

pub fn write_questions<W: Write>(out: &mut W, questions: &[String]) -> io::Result<()> {
    writeln!(out, "{HEADER}")?;
    for (i, q) in questions.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, q)?;
    }
    Ok(())
}
