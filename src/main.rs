use chrono::Local;
use clap::{Parser, Subcommand};
use persuasion_lens::report::{self, Summary};
use persuasion_lens::{
    Config, Error, HttpAnalysisClient, Immediate, RequestOrchestrator, ResultRenderer, SleepTicker,
    TerminalPage, Ticker, DEFAULT_ENDPOINT,
};
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "persuasion-lens")]
#[command(author, version, about = "See how hard a text is trying to persuade you")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Text to analyze ("-" reads stdin)
    text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Pick a text file with a GUI dialog
    #[arg(long)]
    gui: bool,

    /// Analysis endpoint
    #[arg(long, env = "PERSUASION_LENS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Output report file (.html, .json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for auto-generated reports
    #[arg(long, default_value = "persuasion-reports")]
    report_dir: PathBuf,

    /// Don't auto-generate an HTML report
    #[arg(long)]
    no_report: bool,

    /// Don't prompt to open report
    #[arg(long)]
    no_open: bool,

    /// Show final values without the count-up
    #[arg(long)]
    no_animate: bool,

    /// Count-up duration in milliseconds
    #[arg(long, default_value = "1500")]
    duration_ms: u64,

    /// Count-up tick interval in milliseconds
    #[arg(long, default_value = "20")]
    tick_ms: u64,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Only show summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start interactive web UI for analysis
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::default()
        .with_endpoint(args.endpoint.clone())
        .with_animation(args.duration_ms, args.tick_ms);

    if let Some(Command::Serve { port }) = args.command {
        if let Err(e) = persuasion_lens::serve::start(port, &config, !args.no_open) {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let (text, from_stdin) = match read_input(&args) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'persuasion-lens --help' for more options.");
            std::process::exit(1);
        }
    };

    let client = match HttpAnalysisClient::new(config.endpoint.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let stderr_tty = io::stderr().is_terminal();
    let animate = !args.no_animate && !args.quiet && stderr_tty;
    let out: Box<dyn Write> = if args.quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stderr())
    };
    let mut page = TerminalPage::new(out, animate, stderr_tty);
    let mut ticker: Box<dyn Ticker> = if animate {
        Box::new(SleepTicker)
    } else {
        Box::new(Immediate)
    };

    let mut orchestrator = RequestOrchestrator::new(client, ResultRenderer::new(config.render()));
    let result = match orchestrator.submit(&mut page, ticker.as_mut(), &text) {
        Ok(result) => result,
        Err(e) => {
            if args.quiet {
                eprintln!("{}", e);
            }
            let code = match e {
                Error::Validation(_) => 2,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    println!("{}", Summary::from_result(&result));

    let report_target = match report_path(&args) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Failed to create report directory {}: {}", args.report_dir.display(), e);
            std::process::exit(1);
        }
    };

    if let Some(ref output_path) = report_target {
        if let Err(e) = report::generate(output_path, text.trim(), &result, &config.render()) {
            eprintln!("Failed to write report: {}", e);
            std::process::exit(1);
        }
        if !args.quiet {
            eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", output_path.display());
        }

        // The answer comes from stdin, so only ask when it is still a live terminal
        let can_prompt = stderr_tty && io::stdin().is_terminal() && !from_stdin;
        if !args.no_open && !args.quiet && can_prompt {
            eprint!("\nOpen report in browser? [Y/n] ");
            io::stderr().flush().ok();

            let mut input = String::new();
            if let Ok(read) = io::stdin().read_line(&mut input) {
                if accepts_open(read, &input) {
                    if let Err(e) = open::that(output_path) {
                        eprintln!("Failed to open report: {}", e);
                    }
                }
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "persuasion_lens=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Explicit `--output`, else a timestamped file in `--report-dir` (created if
/// missing), else nothing when `--no-report` is set
fn report_path(args: &Args) -> io::Result<Option<PathBuf>> {
    if let Some(ref output) = args.output {
        return Ok(Some(output.clone()));
    }
    if args.no_report {
        return Ok(None);
    }

    std::fs::create_dir_all(&args.report_dir)?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    Ok(Some(report_file(&args.report_dir, &timestamp.to_string())))
}

fn report_file(dir: &Path, timestamp: &str) -> PathBuf {
    dir.join(format!("persuasion_report_{}.html", timestamp))
}

/// Empty answer means yes, but end of input (nothing read) means no
fn accepts_open(bytes_read: usize, answer: &str) -> bool {
    if bytes_read == 0 {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

/// Text from the argument, a file, a GUI picker, or piped stdin, in that
/// order. The flag is set when the text was read from stdin.
fn read_input(args: &Args) -> io::Result<(String, bool)> {
    if let Some(ref text) = args.text {
        if text == "-" {
            return Ok((read_stdin()?, true));
        }
        return Ok((text.clone(), false));
    }

    if let Some(ref path) = args.file {
        return Ok((std::fs::read_to_string(path)?, false));
    }

    if args.gui {
        #[cfg(feature = "gui")]
        {
            return match pick_file_gui() {
                Some(path) => Ok((std::fs::read_to_string(path)?, false)),
                None => Err(io::Error::new(io::ErrorKind::NotFound, "No file selected.")),
            };
        }

        #[cfg(not(feature = "gui"))]
        {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "GUI mode not available in this build.",
            ));
        }
    }

    if !io::stdin().is_terminal() {
        return Ok((read_stdin()?, true));
    }

    Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        "Usage: persuasion-lens <TEXT> | --file <PATH> | -",
    ))
}

fn read_stdin() -> io::Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(feature = "gui")]
fn pick_file_gui() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select text file to analyze")
        .add_filter("Text files", &["txt", "md", "html", "htm"])
        .pick_file()
}
