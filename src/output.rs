//! User-facing status lines for the CLI paths that run outside tracing
//! (`--print-config`, `--init-config`, `--once`). Colors only on a TTY.

use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Info,
    Ok,
    Warn,
    Error,
}

impl Tone {
    fn label(self) -> &'static str {
        match self {
            Tone::Info => "info:",
            Tone::Ok => "ok:",
            Tone::Warn => "warn:",
            Tone::Error => "error:",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Tone::Warn | Tone::Error)
    }
}

fn is_tty(stderr: bool) -> bool {
    atty::is(if stderr { atty::Stream::Stderr } else { atty::Stream::Stdout })
}

fn render(tone: Tone, msg: &str, color: bool) -> String {
    let label = tone.label();
    if !color {
        return format!("{label} {msg}");
    }
    let label = match tone {
        Tone::Info => label.cyan().bold().to_string(),
        Tone::Ok => label.green().bold().to_string(),
        Tone::Warn => label.yellow().bold().to_string(),
        Tone::Error => label.red().bold().to_string(),
    };
    format!("{label} {msg}")
}

fn emit(tone: Tone, msg: &str) {
    let stderr = tone.to_stderr();
    let line = render(tone, msg, is_tty(stderr));
    if stderr {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn print_info(msg: &str) {
    emit(Tone::Info, msg);
}

pub fn print_success(msg: &str) {
    emit(Tone::Ok, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tone::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tone::Error, msg);
}

/// Pretty JSON on stdout, unprefixed so scripts can parse it.
pub fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{text}");
    Ok(())
}
