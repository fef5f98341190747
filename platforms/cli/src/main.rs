use anbncn::{Automaton, Snapshot, State, Step, Tape, Trace, Verdict};
use clap::Parser;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const SPACER: &str = "------------------------------------------";

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  anbncn-cli -i aabbcc
  anbncn-cli -d -p -i aaabbbccc
  echo abccba | anbncn-cli --json")]
struct Cli {
    /// The candidate string. Read from stdin when omitted.
    #[clap(short, long)]
    input: Option<String>,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Wait for Enter between steps (with --debug). Type `q` to stop.
    #[clap(short, long, requires = "debug")]
    pause: bool,

    /// Print the whole run as JSON
    #[clap(long, conflicts_with = "debug")]
    json: bool,

    /// Write debug logs to this file instead of warnings to stderr
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logger(&cli);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logger(cli: &Cli) {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();

    match cli.log_file.as_deref().and_then(open_log_file) {
        Some(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, config, file);
        }
        None => {
            let _ = TermLogger::init(
                LevelFilter::Warn,
                config,
                TerminalMode::Stderr,
                ColorChoice::Auto,
            );
        }
    }
}

/// Creates the log file, reporting on stderr when it cannot be created so the
/// caller can fall back to terminal logging.
fn open_log_file(path: &Path) -> Option<File> {
    match File::create(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!(
                "Failed to create log file {}: {}; logging warnings to stderr",
                path.display(),
                e
            );
            None
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn Error>> {
    let input = match &cli.input {
        Some(input) => input.clone(),
        None => read_input()?,
    };

    log::info!("Deciding input {:?}", input);

    if cli.json {
        let trace = Trace::record(&input)?;
        println!("{}", trace.to_json()?);
        return Ok(exit_code(&trace.verdict));
    }

    let mut machine = Automaton::new(Tape::new(&input));

    let step = if cli.debug {
        println!("Initial state:");
        if cli.pause {
            println!("Press [ENTER] to advance simulation, or type q to stop.");
        }
        print_state(&machine.snapshot(), machine.state(), 0);

        let stdin = io::stdin();
        let mut count = 0;
        let mut observer = |snapshot: &Snapshot, state: State| -> ControlFlow<()> {
            count += 1;
            print_state(snapshot, state, count);

            if cli.pause && !state.is_terminal() && !wait_for_enter(&stdin) {
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        };
        machine.run(Some(&mut observer))?
    } else {
        machine.run(None)?
    };

    match step {
        Step::Halt(verdict) => {
            println!("{}", verdict_message(machine.tape().input(), &verdict));
            Ok(exit_code(&verdict))
        }
        Step::Continue => {
            println!(
                "Simulation stopped after {} steps in state {}.",
                machine.step_count(),
                machine.state()
            );
            Ok(ExitCode::from(2))
        }
    }
}

/// Reads one line from stdin, prompting first when stdin is a terminal.
fn read_input() -> io::Result<String> {
    if atty::is(atty::Stream::Stdin) {
        println!("This program simulates a Turing Machine which accepts strings of the form a^n b^n c^n.");
        println!("NOTE: Underscores represent blanks, and the \"^\" below the tape is the head.");
        print!("Please enter an input string: ");
        io::stdout().flush()?;
    }

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// Returns `false` when the user asked to stop or stdin is closed.
fn wait_for_enter(stdin: &io::Stdin) -> bool {
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => !line.trim().eq_ignore_ascii_case("q"),
    }
}

fn print_state(snapshot: &Snapshot, state: State, step: usize) {
    println!("Step: {}, State: {}", step, state);
    println!("{}", snapshot);
    println!("{}", snapshot.pointer());
    println!("{}", SPACER);
}

fn verdict_message(input: &str, verdict: &Verdict) -> String {
    match verdict {
        Verdict::Accept => format!(
            "Result of execution: Accept\nYour original input: {}",
            input
        ),
        Verdict::Reject(rejection) => format!(
            "Result of execution: Reject\nYour original input: {}\nHalt on character: {} (index {})",
            input, rejection.symbol, rejection.index
        ),
    }
}

fn exit_code(verdict: &Verdict) -> ExitCode {
    if verdict.is_accept() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anbncn::{Rejection, Symbol};

    #[test]
    fn test_verdict_message_accept() {
        let message = verdict_message("abc", &Verdict::Accept);

        assert!(message.contains("Accept"));
        assert!(message.contains("Your original input: abc"));
    }

    #[test]
    fn test_verdict_message_reject() {
        let verdict = Verdict::Reject(Rejection {
            symbol: Symbol::Blank,
            index: 5,
        });
        let message = verdict_message("aabbc", &verdict);

        assert!(message.contains("Reject"));
        assert!(message.ends_with("Halt on character: _ (index 5)"));
    }

    #[test]
    fn test_open_log_file_reports_failure() {
        let path = std::env::temp_dir()
            .join("anbncn-missing-dir")
            .join("nested")
            .join("run.log");

        assert!(open_log_file(&path).is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["anbncn-cli", "-d", "-p", "-i", "abc"]).unwrap();
        assert!(cli.debug);
        assert!(cli.pause);
        assert_eq!(cli.input.as_deref(), Some("abc"));

        assert!(Cli::try_parse_from(["anbncn-cli", "--pause"]).is_err());
        assert!(Cli::try_parse_from(["anbncn-cli", "--json", "--debug"]).is_err());
    }
}
