use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::LevelFilter;

use crate::compression::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE};
use crate::error::{Error, Result};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Log level used by the terminal logger.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Compress or Decompress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// All user settable options that control program behavior.
#[derive(Debug, Clone)]
pub struct Options {
    /// Name of the file to read for input
    pub file: String,
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Code bytes as i8 values with a sign bit
    pub signed: bool,
    /// Rice-Golomb remainder width, 1..7
    pub log_base: u32,
    /// Maximum input block size in bytes
    pub block_size: usize,
    /// Verbosity of user information
    pub verbosity: Verbosity,
}

impl Options {
    pub fn new() -> Self {
        Self {
            file: String::new(),
            op_mode: Mode::Compress,
            output: Output::File,
            force_overwrite: false,
            signed: false,
            log_base: 3,
            block_size: DEFAULT_BLOCK_SIZE,
            verbosity: Verbosity::Warnings,
        }
    }

    /// Check the codec parameters before any I/O happens.
    pub fn validate(&self) -> Result<()> {
        if !(1..=7).contains(&self.log_base) {
            return Err(Error::InvalidLogBase(self.log_base));
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(Error::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Move-To-Front + Rice-Golomb file compressor",
    long_about = None)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Code bytes as signed values (better for data centered on 0)
    #[clap(short = 's', long = "signed")]
    signed: bool,

    /// Rice-Golomb parameter, 1..7
    #[clap(short = 'l', long = "log-base", default_value_t = 3)]
    log_base: u32,

    /// Block size in KiB
    #[clap(short = 'b', long = "block-size", default_value_t = DEFAULT_BLOCK_SIZE / 1024)]
    block_kib: usize,

    /// Suppress all messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Sets verbosity. -v shows progress, -vvv is chatty
    #[clap(short = 'v', parse(from_occurrences))]
    verbose: u64,
}

impl Args {
    /// Convert parsed arguments into validated Options.
    pub fn into_options(self) -> Result<Options> {
        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Warnings,
                1 => Verbosity::Info,
                2 => Verbosity::Debug,
                _ => Verbosity::Trace,
            }
        };
        let options = Options {
            file: self.filename,
            op_mode: if self.decompress {
                Mode::Decompress
            } else {
                Mode::Compress
            },
            output: if self.stdout {
                Output::Stdout
            } else {
                Output::File
            },
            force_overwrite: self.force,
            signed: self.signed,
            log_base: self.log_base,
            block_size: self.block_kib.saturating_mul(1024),
            verbosity,
        };
        options.validate()?;
        Ok(options)
    }
}

/// Read the command line into Options.
pub fn options_init() -> Result<Options> {
    Args::parse().into_options()
}
