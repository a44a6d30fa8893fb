use std::fmt;
use std::path::PathBuf;

use crate::lessons::{Lesson, LessonOptions, ParseLessonError};

pub const USAGE: &str = "\
usage: primer-lessons <lesson> [--image <path>] [--seed <n>] [--log <filter>]
       primer-lessons --list

<lesson> is a number (7, 07) or a slug (textures).";

/// What the command line asked for.
#[derive(Debug, Clone)]
pub enum Command {
    List,
    Help,
    Run { lesson: Lesson, options: LessonOptions },
}

#[derive(Debug, Clone)]
pub struct Args {
    pub command: Command,
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    MissingLesson,
    MissingValue(&'static str),
    UnknownFlag(String),
    UnexpectedArgument(String),
    InvalidSeed(String),
    Lesson(ParseLessonError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingLesson => write!(f, "no lesson given\n\n{USAGE}"),
            ArgsError::MissingValue(flag) => write!(f, "{flag} expects a value"),
            ArgsError::UnknownFlag(flag) => write!(f, "unknown flag {flag}\n\n{USAGE}"),
            ArgsError::UnexpectedArgument(arg) => write!(f, "unexpected argument {arg:?}"),
            ArgsError::InvalidSeed(value) => write!(f, "--seed expects an integer, got {value:?}"),
            ArgsError::Lesson(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ParseLessonError> for ArgsError {
    fn from(err: ParseLessonError) -> Self {
        ArgsError::Lesson(err)
    }
}

impl Args {
    pub fn from_env() -> Result<Self, ArgsError> {
        Self::parse(std::env::args().skip(1))
    }

    /// Parses arguments without the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let mut lesson = None;
        let mut list = false;
        let mut help = false;
        let mut log_filter = None;
        let mut options = LessonOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--list" | "-l" => list = true,
                "--help" | "-h" => help = true,
                "--image" => {
                    let value = args.next().ok_or(ArgsError::MissingValue("--image"))?;
                    options.image = Some(PathBuf::from(value));
                }
                "--seed" => {
                    let value = args.next().ok_or(ArgsError::MissingValue("--seed"))?;
                    let seed = value.parse().map_err(|_| ArgsError::InvalidSeed(value))?;
                    options.seed = Some(seed);
                }
                "--log" => {
                    log_filter = Some(args.next().ok_or(ArgsError::MissingValue("--log"))?);
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(ArgsError::UnknownFlag(arg));
                }
                _ if lesson.is_some() => return Err(ArgsError::UnexpectedArgument(arg)),
                _ => lesson = Some(arg.parse::<Lesson>()?),
            }
        }

        let command = if help {
            Command::Help
        } else if list {
            Command::List
        } else {
            let lesson = lesson.ok_or(ArgsError::MissingLesson)?;
            Command::Run { lesson, options }
        };

        Ok(Self {
            command,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().copied())
    }

    #[test]
    fn lesson_with_options() {
        let args = parse(&["10", "--image", "cat.png", "--log", "debug"]).unwrap();
        let Command::Run { lesson, options } = args.command else {
            panic!("expected a run command");
        };
        assert_eq!(lesson, Lesson::LoadingImages);
        assert_eq!(options.image, Some(PathBuf::from("cat.png")));
        assert_eq!(args.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn list_needs_no_lesson() {
        let args = parse(&["--list"]).unwrap();
        assert!(matches!(args.command, Command::List));
    }

    #[test]
    fn seed_is_parsed() {
        let args = parse(&["uniforms", "--seed", "42"]).unwrap();
        let Command::Run { options, .. } = args.command else {
            panic!("expected a run command");
        };
        assert_eq!(options.seed, Some(42));
        assert!(matches!(
            parse(&["uniforms", "--seed", "x"]),
            Err(ArgsError::InvalidSeed(_))
        ));
    }

    #[test]
    fn errors() {
        assert_eq!(parse(&[]).unwrap_err(), ArgsError::MissingLesson);
        assert_eq!(parse(&["1", "--image"]).unwrap_err(), ArgsError::MissingValue("--image"));
        assert_eq!(
            parse(&["1", "--fast"]).unwrap_err(),
            ArgsError::UnknownFlag("--fast".into())
        );
        assert_eq!(
            parse(&["1", "2"]).unwrap_err(),
            ArgsError::UnexpectedArgument("2".into())
        );
        assert!(matches!(parse(&["99"]), Err(ArgsError::Lesson(_))));
    }
}
