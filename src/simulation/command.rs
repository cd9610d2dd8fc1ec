/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::fmt;
use std::str::FromStr;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ButtonId;

/// Longest pause a script may ask for with `wait`.
pub const MAX_WAIT_SECONDS: f64 = 3600.0;

/***************************************/
/*       Public data structures        */
/***************************************/

/// One line of operator input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Direct floor select, bypassing the panel.
    Floor(i32),
    /// Tap the call key in the corridor.
    Call,
    /// Press a panel button by id.
    Press(ButtonId),
    /// Click the panel at screen coordinates.
    Click(f64, f64),
    /// Walk along the corridor, or one step toward the doorway when no distance is given.
    Walk(Option<f64>),
    Enter,
    Exit,
    /// Pause the input reader, used by scripts.
    Wait(f64),
    Status,
    /// Print the panel button rectangles, for scripting clicks.
    Layout,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseCommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidArgument(String),
}

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCommandError::Empty => write!(f, "empty command"),
            ParseCommandError::Unknown(word) => write!(f, "unknown command '{}'", word),
            ParseCommandError::MissingArgument(name) => write!(f, "missing argument <{}>", name),
            ParseCommandError::InvalidArgument(arg) => write!(f, "invalid argument '{}'", arg),
        }
    }
}

impl std::error::Error for ParseCommandError {}

/***************************************/
/*              Parsing                */
/***************************************/
fn argument<'a, T: FromStr>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<T, ParseCommandError> {
    let word = words.next().ok_or(ParseCommandError::MissingArgument(name))?;
    word.parse()
        .map_err(|_| ParseCommandError::InvalidArgument(word.to_string()))
}

fn parse_button(word: &str) -> Result<ButtonId, ParseCommandError> {
    match word.to_ascii_lowercase().as_str() {
        "open" => Ok(ButtonId::Open),
        "close" => Ok(ButtonId::Close),
        "stop" => Ok(ButtonId::Stop),
        "vent" | "ventilation" => Ok(ButtonId::Ventilation),
        other => other
            .parse::<u8>()
            .map(ButtonId::Floor)
            .map_err(|_| ParseCommandError::InvalidArgument(word.to_string())),
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Command, ParseCommandError> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or(ParseCommandError::Empty)?;

        match keyword.to_ascii_lowercase().as_str() {
            "floor" | "f" => Ok(Command::Floor(argument(&mut words, "floor")?)),
            "call" | "c" => Ok(Command::Call),
            "press" | "p" => {
                let word = words.next().ok_or(ParseCommandError::MissingArgument("button"))?;
                Ok(Command::Press(parse_button(word)?))
            }
            "click" => {
                let x = argument(&mut words, "x")?;
                let y = argument(&mut words, "y")?;
                Ok(Command::Click(x, y))
            }
            "walk" | "w" => match words.next() {
                Some(word) => word
                    .parse()
                    .map(|dx| Command::Walk(Some(dx)))
                    .map_err(|_| ParseCommandError::InvalidArgument(word.to_string())),
                None => Ok(Command::Walk(None)),
            },
            "enter" => Ok(Command::Enter),
            "exit" => Ok(Command::Exit),
            "wait" => {
                let seconds: f64 = argument(&mut words, "seconds")?;
                if !(0.0..=MAX_WAIT_SECONDS).contains(&seconds) {
                    return Err(ParseCommandError::InvalidArgument(seconds.to_string()));
                }
                Ok(Command::Wait(seconds))
            }
            "status" | "s" => Ok(Command::Status),
            "layout" => Ok(Command::Layout),
            "quit" | "q" => Ok(Command::Quit),
            _ => Err(ParseCommandError::Unknown(keyword.to_string())),
        }
    }
}
