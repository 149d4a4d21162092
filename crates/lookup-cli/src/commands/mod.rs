//! Subcommand implementations for `lookuptool`.
//!
//! Each command prints to stdout and exits the process with status 1 on
//! failure.

pub mod config_ops;
pub mod query_ops;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub(crate) use die;
