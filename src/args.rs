//! Command-line classification on top of the [`OPTIONS`] table.
//!
//! Tokens that start with [`OPTION_PREFIX`] are looked up in the table with
//! the prefix stripped. Everything else, unknown options included, is a
//! directory to scan.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::jig::{array_size, max_length, OptionTable};

pub const OPTION_PREFIX: &str = "--";

const OPTION_NAMES: [&str; 3] = ["help", "version", "directory"];

/// Recognized option names, in the order of [`OptionId`].
pub const OPTIONS: OptionTable<{ max_length(&OPTION_NAMES) }, { array_size(&OPTION_NAMES) }> =
    OptionTable::new(OPTION_NAMES);

const _: () = assert!(OPTIONS.len() == OptionId::ALL.len());
const _: () = assert!(OPTIONS.match_index(b"help").1 == OptionId::Help as usize);
const _: () = assert!(OPTIONS.match_index(b"version").1 == OptionId::Version as usize);
const _: () = assert!(OPTIONS.match_index(b"directory").1 == OptionId::Directory as usize);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgError {
    #[error("option '--{0}' requires a value")]
    MissingValue(&'static str),

    #[error("option '--{0}' does not take a value")]
    UnexpectedValue(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// A flag.
    Unary,
    /// Takes the following token (or an inline `=value`) as its value.
    Binomial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionId {
    Help = 0,
    Version = 1,
    Directory = 2,
}

impl OptionId {
    pub const ALL: [Self; 3] = [Self::Help, Self::Version, Self::Directory];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The option spelled exactly `name`.
    ///
    /// The table compares over an entry's length only, so a name that merely
    /// starts with an option is turned away here.
    pub fn lookup(name: &str) -> Option<Self> {
        OPTIONS
            .iter()
            .position(|entry| entry.len() == name.len() && entry.is_same(name.as_bytes()))
            .and_then(Self::from_index)
    }

    pub fn name(self) -> &'static str {
        OPTION_NAMES[self as usize]
    }

    pub fn kind(self) -> OptionKind {
        match self {
            Self::Help | Self::Version => OptionKind::Unary,
            Self::Directory => OptionKind::Binomial,
        }
    }
}

/// One classified command-line token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdArg {
    prefixed: bool,
    option: Option<OptionId>,
    key: String,
    value: Option<OsString>,
}

impl CmdArg {
    fn option(id: OptionId, value: Option<OsString>) -> Self {
        Self {
            prefixed: true,
            option: Some(id),
            key: id.name().to_owned(),
            value,
        }
    }

    fn positional(token: OsString) -> Self {
        let prefixed = token
            .to_str()
            .is_some_and(|token| token.starts_with(OPTION_PREFIX));
        Self {
            prefixed,
            option: None,
            key: String::new(),
            value: Some(token),
        }
    }

    /// Whether the token carried [`OPTION_PREFIX`].
    pub fn is_prefixed(&self) -> bool {
        self.prefixed
    }

    pub fn is_binomial(&self) -> bool {
        self.option
            .is_some_and(|id| id.kind() == OptionKind::Binomial)
    }

    pub fn is_positional(&self) -> bool {
        self.option.is_none()
    }

    pub fn option_id(&self) -> Option<OptionId> {
        self.option
    }

    /// Option name without the prefix, empty for positional tokens.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The option's value, or the token itself when positional.
    pub fn value(&self) -> Option<&OsStr> {
        self.value.as_deref()
    }
}

/// Classifies raw arguments, program name excluded.
///
/// `--name=value` attaches a value inline. A prefixed token that names no
/// option, or is not valid UTF-8, is kept whole as a path. After a lone `--`
/// every token is a path.
pub fn split_args<I, T>(args: I) -> Result<Vec<CmdArg>, ArgError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut out = Vec::new();

    while let Some(token) = args.next() {
        let Some(body) = token.to_str().and_then(|text| text.strip_prefix(OPTION_PREFIX)) else {
            out.push(CmdArg::positional(token));
            continue;
        };

        if body.is_empty() {
            out.extend(args.by_ref().map(CmdArg::positional));
            break;
        }

        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(OsString::from(value))),
            None => (body, None),
        };

        let Some(id) = OptionId::lookup(name) else {
            log::debug!("{:?} is not an option, taking it as a path", token);
            out.push(CmdArg::positional(token));
            continue;
        };

        let arg = match id.kind() {
            OptionKind::Unary => {
                if inline.is_some() {
                    return Err(ArgError::UnexpectedValue(id.name()));
                }
                CmdArg::option(id, None)
            }
            OptionKind::Binomial => {
                let value = inline
                    .or_else(|| args.next())
                    .ok_or(ArgError::MissingValue(id.name()))?;
                CmdArg::option(id, Some(value))
            }
        };
        log::trace!("classified {:?} as {:?}", token, arg);
        out.push(arg);
    }

    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTag {
    /// Named on the command line.
    Arg,
    /// Scanned because nothing was named.
    Implicit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathArg {
    pub path: PathBuf,
    pub tag: PathTag,
}

impl PathArg {
    pub fn new(path: impl Into<PathBuf>, tag: PathTag) -> Self {
        Self {
            path: path.into(),
            tag,
        }
    }
}

/// What the program was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub help: bool,
    pub version: bool,
    pub directories: Vec<PathArg>,
}

impl Options {
    pub fn parse<I, T>(args: I) -> Result<Self, ArgError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Ok(Self::from_cmd_args(split_args(args)?))
    }

    pub fn from_cmd_args(args: Vec<CmdArg>) -> Self {
        let mut options = Self {
            help: false,
            version: false,
            directories: Vec::new(),
        };

        for arg in args {
            match (arg.option, arg.value) {
                (Some(OptionId::Help), _) => options.help = true,
                (Some(OptionId::Version), _) => options.version = true,
                (Some(OptionId::Directory), Some(path)) | (None, Some(path)) => {
                    options.directories.push(PathArg::new(path, PathTag::Arg))
                }
                (_, None) => {}
            }
        }

        if options.directories.is_empty() {
            options
                .directories
                .push(PathArg::new(".", PathTag::Implicit));
        }

        options
    }
}

/// Describes the command line for help, usage and version text.
///
/// Parsing goes through [`split_args`]; this only renders.
pub fn command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print the most recently modified entry of the given directories")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new(OptionId::Help.name())
                .long(OptionId::Help.name())
                .help("Print help")
                .action(ArgAction::Help),
        )
        .arg(
            Arg::new(OptionId::Version.name())
                .long(OptionId::Version.name())
                .help("Print version")
                .action(ArgAction::Version),
        )
        .arg(
            Arg::new(OptionId::Directory.name())
                .long(OptionId::Directory.name())
                .value_name("PATH")
                .help("Directory to scan, may be repeated")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("paths")
                .value_name("DIR")
                .help("Directories to scan, the current directory if none are given")
                .num_args(0..)
                .action(ArgAction::Append),
        )
}
