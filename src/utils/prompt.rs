//! Interactive yes/no confirmation.

use std::io::{self, BufRead, Write};

/// Ask "Proceed? (yes/no)" until the answer is exactly `yes` or `no`.
///
/// Returns `Ok(false)` when input ends before an answer is given, so a
/// closed stdin never approves a destructive action.
pub fn ask_approval<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    let mut answer = String::new();
    loop {
        write!(output, "Proceed? (yes/no): ")?;
        output.flush()?;

        answer.clear();
        if input.read_line(&mut answer)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }

        match answer.trim() {
            "yes" => return Ok(true),
            "no" => return Ok(false),
            _ => writeln!(output, "Please type 'yes' or 'no'.")?,
        }
    }
}
