//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::process::exit;

use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use mtfrice::compression::{compress::compress, decompress::decompress};
use mtfrice::tools::cli::{options_init, Mode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let options = match options_init() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("mtfrice: {}", e);
            exit(1);
        }
    };

    // Messages go to stderr so that -c output stays clean.
    if TermLogger::init(
        options.verbosity.level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("mtfrice: unable to start the logger");
    }

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Compress => compress(&options),
        Mode::Decompress => decompress(&options),
    };

    match result {
        Ok(()) => info!("Done."),
        Err(e) => {
            error!("{} failed on {}: {}", options.op_mode, options.file, e);
            exit(1);
        }
    }
}
