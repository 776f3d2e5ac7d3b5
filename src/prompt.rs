use std::io::{self, BufRead, Write};

/// Name recorded when the player enters nothing.
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Longest name kept on the leaderboard, in characters.
pub const MAX_NAME_CHARS: usize = 24;

/// Asks for the player's name on `writer` and reads one line from `reader`.
///
/// Surrounding whitespace is trimmed, long names are cut to
/// [`MAX_NAME_CHARS`], and an empty answer (or end of input) becomes
/// [`DEFAULT_PLAYER_NAME`].
pub fn read_player_name<R, W>(reader: &mut R, writer: &mut W) -> io::Result<String>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(writer, "Enter your name: ")?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;

    let name: String = line.trim().chars().take(MAX_NAME_CHARS).collect();
    if name.is_empty() {
        return Ok(DEFAULT_PLAYER_NAME.to_owned());
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{DEFAULT_PLAYER_NAME, MAX_NAME_CHARS, read_player_name};

    fn ask(input: &str) -> (String, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut writer = Vec::new();
        let name = read_player_name(&mut reader, &mut writer).expect("prompt should succeed");
        (name, String::from_utf8(writer).expect("prompt is utf-8"))
    }

    #[test]
    fn reads_and_trims_one_line() {
        let (name, shown) = ask("  Grace Hopper \nsecond line\n");

        assert_eq!(name, "Grace Hopper");
        assert_eq!(shown, "Enter your name: ");
    }

    #[test]
    fn empty_answer_uses_default_name() {
        assert_eq!(ask("\n").0, DEFAULT_PLAYER_NAME);
        assert_eq!(ask("").0, DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn long_names_are_truncated() {
        let (name, _) = ask(&"x".repeat(100));

        assert_eq!(name.chars().count(), MAX_NAME_CHARS);
    }
}
