mod app;
mod editor;
mod help;
mod theme;
mod view;
use crate::app::App;
use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use photocal::{CalendarManager, CalendarOption};
use ratatui::DefaultTerminal;
use std::path::{Path, PathBuf};
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    date: Option<Date>,
    option: CalendarOption,
    show_week_number: bool,
    print: bool,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("locale") => {
                    opts.option = parser.value()?.parse()?;
                }
                Arg::Short('w') | Arg::Long("week-numbers") => opts.show_week_number = true,
                Arg::Short('p') | Arg::Long("print") => opts.print = true,
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let _logger = opts.log_file.as_deref().map(init_logging).transpose()?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let manager = CalendarManager::new(opts.option);
                let date = opts.date.unwrap_or(today);
                log::info!(
                    "Showing {} calendar starting at {date} (today is {today})",
                    opts.option
                );
                if opts.print {
                    let month = manager.month(date, opts.show_week_number);
                    print!("{}", view::plain_text(&month, today));
                    return Ok(());
                }
                let app = App::new(manager, today)
                    .start_date(date)
                    .show_week_number(opts.show_week_number);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(&mut terminal).context("error running calendar")
                })
            }
            Command::Help => {
                println!("Usage: photocal [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Show a month calendar in the terminal");
                println!();
                println!("Options:");
                println!("  -l, --locale <CODE>   Calendar locale: en, ru, de, or fr [default: en]");
                println!("  -w, --week-numbers    Show week numbers");
                println!("  -p, --print           Print the month and exit");
                println!("      --log-file <PATH> Write log messages to the given file");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

// Logs go to a file only, as anything written to stderr would garble the
// terminal UI
fn init_logging(path: &Path) -> anyhow::Result<LoggerHandle> {
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid log specification")?
        .log_to_file(FileSpec::try_from(path).context("invalid log file path")?)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
