use std::env;
use std::io::{self, Write};
use std::process::exit;

use tracing_subscriber::EnvFilter;

use info::{render, Config, Error, Output, Result};

static MAN_PAGE: &str = /* @MANSTART{info} */ r#"
NAME
    info - view an info page.

SYNOPSIS
    info [-h | --help] page

DESCRIPTION
    This utility finds a texinfo page on the info path, strips navigation, menus and license
    boilerplate, joins the parts of split manuals, and shows the text. On a terminal the text
    goes through a pager, otherwise it is written to standard output.

OPTIONS
    --help, -h
        Print this manual page.

ENVIRONMENT
    INFOPATH
        Colon-separated list of directories to search. Defaults to /usr/share/info/.

    MANPAGER, PAGER
        Pager command, tried in that order. Defaults to 'more -s'.

    INFO_LOG
        Diagnostic log filter, for example 'debug'. Defaults to 'warn'.

EXIT STATUS
    0 on success, 1 if the page is missing or cannot be read or shown.
"#; /* @MANEND */

fn init_logging() {
    let filter = EnvFilter::try_from_env("INFO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .init();
}

fn run(arg: Option<String>) -> Result<()> {
    let page = match arg {
        Some(page) => page,
        None => return Err(Error::Usage),
    };

    let config = Config::from_env();
    let text = render(&config, &page)?;

    Output::choose(termion::is_tty(&io::stdout()), &config.pager).show(&text)
}

fn main() {
    init_logging();

    let arg = env::args().nth(1);
    if let Some("--help") | Some("-h") = arg.as_deref() {
        print!("{}", MAN_PAGE);
        return;
    }

    if let Err(err) = run(arg) {
        let _ = writeln!(io::stderr(), "info: {}", err);
        exit(1);
    }
}
