//! Printing helpers: pretty JSON under `--json`, plain lines otherwise.

use serde::Serialize;

use crate::error::{CliError, CliResult};

pub fn print_list<T: Serialize>(json: bool, data: &[T], row: impl Fn(&T) -> String) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(json: bool, data: &T, text: impl FnOnce(&T) -> String) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        println!("{}", text(data));
    }
    Ok(())
}

/// Reports a failed command on stderr.
pub fn print_error(json: bool, err: &CliError) {
    if json {
        match serde_json::to_string(err) {
            Ok(text) => eprintln!("{text}"),
            Err(_) => eprintln!("{err}"),
        }
    } else {
        eprintln!("{err}");
    }
}
