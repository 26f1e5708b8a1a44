use std::ffi::OsStr;

use current_platform::CURRENT_PLATFORM;
use strum::VariantArray;

use crate::args::Arg;

pub fn maybe_print_help_and_exit(bin_name: &str) {
    match std::env::args_os().nth(1) {
        None => print_help_and_exit(bin_name),
        Some(arg) => {
            if arg.as_os_str() == OsStr::new("--help") || arg.as_os_str() == OsStr::new("-help") {
                print_help_and_exit(bin_name)
            }
        }
    }
}

fn print_help_and_exit(bin_name: &str) -> ! {
    print!("{}", help_text(bin_name));
    std::process::exit(0);
}

fn help_text(bin_name: &str) -> String {
    let mut text = format!("Version: {}\n", version_string());
    text += &format!("License: {}\n", env!("CARGO_PKG_LICENSE"));
    text += &format!("Usage: {bin_name} [options ...] input [options ...] output\n");
    text += "\n";
    text += "Use - as input or output for stdin/stdout, and a prefix such as png:- to pick the format.\n";
    text += "\n";
    text += "Blur Settings:\n";
    for arg in Arg::VARIANTS {
        let name: &'static str = arg.into();
        text += &format!("  -{name:19} {}\n", arg.help_text());
    }
    text += "\n";
    text += "Prefix an option with + instead of - to restore its default.\n";
    text
}

fn version_string() -> String {
    let cpu = CURRENT_PLATFORM.split('-').next().unwrap_or("unknown");
    let version = env!("CARGO_PKG_VERSION");
    let repo = env!("CARGO_PKG_REPOSITORY");

    format!("meanblur {version} {cpu} {repo}")
}
