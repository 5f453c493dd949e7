//! Interactive command shell
//!
//! Line-oriented loop over a [`Session`]: charset edits, resolution
//! changes, image replacement and conversion. Every malformed or failing
//! command prints one message and mutates nothing; the shell always returns
//! to the prompt.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use ascii_mosaic::{AsciiOutput, ConsoleOutput, HtmlOutput, Session};
use log::warn;

const PROMPT: &str = ">>> ";
const BAD_ADD: &str = "Did not add due to incorrect format.";
const BAD_REMOVE: &str = "Did not remove due to incorrect format.";
const BAD_COMMAND: &str = "Did not execute due to incorrect command.";

/// What a charset edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// One character
    Single(char),
    /// The space character (spelled `space` on the command line)
    Space,
    /// All printable ASCII (32-126)
    All,
    /// An inclusive code-point range, bounds in either order
    Range(char, char),
}

/// One parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chars,
    Render,
    ResUp,
    ResDown,
    OutputConsole,
    OutputHtml,
    Add(EditTarget),
    Remove(EditTarget),
    Image(PathBuf),
    Exit,
}

/// Why a line failed to parse; each variant carries its user message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    BadAdd,
    BadRemove,
    BadCommand,
}

impl ParseError {
    fn message(self) -> &'static str {
        match self {
            ParseError::BadAdd => BAD_ADD,
            ParseError::BadRemove => BAD_REMOVE,
            ParseError::BadCommand => BAD_COMMAND,
        }
    }
}

/// Parse one input line into a command
pub fn parse(line: &str) -> Result<Command, ParseError> {
    match line.trim_end() {
        "chars" => return Ok(Command::Chars),
        "asciiArt" => return Ok(Command::Render),
        "res up" => return Ok(Command::ResUp),
        "res down" => return Ok(Command::ResDown),
        "output console" => return Ok(Command::OutputConsole),
        "output html" => return Ok(Command::OutputHtml),
        "exit" => return Ok(Command::Exit),
        _ => {}
    }
    let line = line.trim_end();

    if let Some(arg) = line.strip_prefix("add ") {
        return parse_target(arg).map(Command::Add).ok_or(ParseError::BadAdd);
    }
    if let Some(arg) = line.strip_prefix("remove ") {
        return parse_target(arg)
            .map(Command::Remove)
            .ok_or(ParseError::BadRemove);
    }
    if let Some(arg) = line.strip_prefix("image ") {
        return Ok(Command::Image(PathBuf::from(arg)));
    }
    Err(ParseError::BadCommand)
}

fn parse_target(arg: &str) -> Option<EditTarget> {
    match arg {
        "space" => return Some(EditTarget::Space),
        "all" => return Some(EditTarget::All),
        _ => {}
    }

    let chars: Vec<char> = arg.chars().collect();
    match chars.as_slice() {
        [c] => Some(EditTarget::Single(*c)),
        [low, '-', high] => Some(EditTarget::Range(*low, *high)),
        _ => None,
    }
}

/// Where conversion results go
enum Sink {
    Console,
    Html,
}

/// The shell itself: session state plus the selected output sink
pub struct Shell {
    session: Session,
    sink: Sink,
    html_path: PathBuf,
}

impl Shell {
    pub fn new(session: Session, html_path: PathBuf) -> Self {
        Self {
            session,
            sink: Sink::Console,
            html_path,
        }
    }

    /// Run until `exit` or end of input
    pub fn run(&mut self, input: &mut impl BufRead, output: &mut impl Write) {
        let mut line = String::new();
        loop {
            let _ = write!(output, "{PROMPT}");
            let _ = output.flush();

            line.clear();
            match input.read_line(&mut line) {
                Ok(0) | Err(_) => return,
                Ok(_) => {}
            }

            match parse(&line) {
                Ok(Command::Exit) => return,
                Ok(command) => self.execute(command, output),
                Err(err) => {
                    let _ = writeln!(output, "{}", err.message());
                }
            }
        }
    }

    fn execute(&mut self, command: Command, output: &mut impl Write) {
        match command {
            Command::Chars => {
                let listed: String = self
                    .session
                    .chars()
                    .iter()
                    .map(|&c| format!("{c} "))
                    .collect();
                let _ = writeln!(output, "{}", listed.trim_end());
            }
            Command::ResUp => match self.session.res_up() {
                Ok(resolution) => {
                    let _ = writeln!(output, "Resolution set to {resolution}.");
                }
                Err(err) => {
                    let _ = writeln!(output, "{err}");
                }
            },
            Command::ResDown => match self.session.res_down() {
                Ok(resolution) => {
                    let _ = writeln!(output, "Resolution set to {resolution}.");
                }
                Err(err) => {
                    let _ = writeln!(output, "{err}");
                }
            },
            Command::OutputConsole => self.sink = Sink::Console,
            Command::OutputHtml => self.sink = Sink::Html,
            Command::Image(path) => {
                if let Err(err) = self.session.set_image(&path) {
                    warn!("image replacement failed: {path:?}");
                    let _ = writeln!(output, "{err}");
                }
            }
            Command::Add(target) => self.apply_edit(target, true),
            Command::Remove(target) => self.apply_edit(target, false),
            Command::Render => self.render(output),
            // Handled in `run` before dispatch; unreachable here
            Command::Exit => {}
        }
    }

    fn apply_edit(&mut self, target: EditTarget, add: bool) {
        match (target, add) {
            (EditTarget::Single(c), true) => self.session.add_char(c),
            (EditTarget::Single(c), false) => self.session.remove_char(c),
            (EditTarget::Space, true) => self.session.add_char(' '),
            (EditTarget::Space, false) => self.session.remove_char(' '),
            (EditTarget::Range(low, high), true) => self.session.add_range(low, high),
            (EditTarget::Range(low, high), false) => self.session.remove_range(low, high),
            (EditTarget::All, true) => self.session.add_all(),
            // Removing everything replaces the matcher with an empty one
            (EditTarget::All, false) => self.session.clear_chars(),
        }
    }

    fn render(&mut self, output: &mut impl Write) {
        let grid = match self.session.convert() {
            Ok(grid) => grid,
            Err(err) => {
                let _ = writeln!(output, "{err}");
                return;
            }
        };
        let result = match self.sink {
            Sink::Console => ConsoleOutput::new().write(&grid),
            Sink::Html => HtmlOutput::new(&self.html_path, "Courier New").write(&grid),
        };
        if let Err(err) = result {
            let _ = writeln!(output, "{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascii_mosaic::session::DEFAULT_CHARSET;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_parse_fixed_commands() {
        assert_eq!(parse("chars\n"), Ok(Command::Chars));
        assert_eq!(parse("asciiArt"), Ok(Command::Render));
        assert_eq!(parse("res up"), Ok(Command::ResUp));
        assert_eq!(parse("res down"), Ok(Command::ResDown));
        assert_eq!(parse("output console"), Ok(Command::OutputConsole));
        assert_eq!(parse("output html"), Ok(Command::OutputHtml));
        assert_eq!(parse("exit"), Ok(Command::Exit));
    }

    #[test]
    fn test_parse_add_variants() {
        assert_eq!(parse("add a"), Ok(Command::Add(EditTarget::Single('a'))));
        assert_eq!(parse("add space"), Ok(Command::Add(EditTarget::Space)));
        assert_eq!(parse("add all"), Ok(Command::Add(EditTarget::All)));
        assert_eq!(
            parse("add a-z"),
            Ok(Command::Add(EditTarget::Range('a', 'z')))
        );
        assert_eq!(
            parse("add z-a"),
            Ok(Command::Add(EditTarget::Range('z', 'a')))
        );
    }

    #[test]
    fn test_parse_remove_variants() {
        assert_eq!(
            parse("remove m"),
            Ok(Command::Remove(EditTarget::Single('m')))
        );
        assert_eq!(parse("remove all"), Ok(Command::Remove(EditTarget::All)));
        assert_eq!(parse("remove ab"), Err(ParseError::BadRemove));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse("add abc"), Err(ParseError::BadAdd));
        assert_eq!(parse("add "), Err(ParseError::BadCommand));
        assert_eq!(parse("resup"), Err(ParseError::BadCommand));
        assert_eq!(parse("anything else"), Err(ParseError::BadCommand));
    }

    #[test]
    fn test_parse_image_path() {
        assert_eq!(
            parse("image cat.jpeg"),
            Ok(Command::Image(PathBuf::from("cat.jpeg")))
        );
    }

    fn test_shell() -> Shell {
        let image = RgbaImage::from_pixel(32, 32, Rgba([200, 200, 200, 255]));
        Shell::new(Session::with_image(image), PathBuf::from("out.html"))
    }

    #[test]
    fn test_run_exits_on_eof() {
        let mut shell = test_shell();
        let mut output = Vec::new();
        shell.run(&mut "chars\n".as_bytes(), &mut output);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("0 1 2 3 4 5 6 7 8 9"));
    }

    #[test]
    fn test_edit_commands_reach_session() {
        let mut shell = test_shell();
        let mut output = Vec::new();
        shell.run(
            &mut "remove all\nadd a-c\nremove b\nchars\nexit\n".as_bytes(),
            &mut output,
        );

        assert_eq!(shell.session.chars(), &['a', 'c']);
    }

    #[test]
    fn test_empty_charset_conversion_reports() {
        let mut shell = test_shell();
        let mut output = Vec::new();
        shell.run(&mut "remove all\nasciiArt\nexit\n".as_bytes(), &mut output);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Did not execute. Charset is empty."));
        // Prior state retained: still interactive, charset still empty
        assert!(shell.session.is_charset_empty());
    }

    #[test]
    fn test_bad_commands_leave_charset_alone() {
        let mut shell = test_shell();
        let mut output = Vec::new();
        shell.run(
            &mut "add abc\nremove xyz\nbogus\nexit\n".as_bytes(),
            &mut output,
        );

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Did not add due to incorrect format."));
        assert!(text.contains("Did not remove due to incorrect format."));
        assert!(text.contains("Did not execute due to incorrect command."));
        assert_eq!(shell.session.chars(), DEFAULT_CHARSET);
    }

    #[test]
    fn test_missing_image_reports_and_retains() {
        let mut shell = test_shell();
        let resolution = shell.session.resolution();
        let mut output = Vec::new();
        shell.run(&mut "image missing.png\nexit\n".as_bytes(), &mut output);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Did not execute due to problem with image file."));
        assert_eq!(shell.session.resolution(), resolution);
    }
}
