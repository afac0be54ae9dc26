// icelang: drawing-script front end and inspector

use std::fs;
use std::io::{self, Read};
use std::process;

use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use icelang::parser::lexer::Lexer;
use icelang::parser::outline::{outline, render_outline};
use icelang::parser::ParseError;
use icelang::runtime::Session;
use icelang::symbols::SymbolIndex;
use icelang::ui::App;

#[derive(Parser)]
#[command(name = "icelang")]
#[command(about = "Parse, format and inspect drawing scripts", long_about = None)]
struct Cli {
    /// Suppress progress messages on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream with positions
    Tokens {
        /// Script file, or `-` for standard input
        path: String,
    },
    /// Print the AST outline
    Ast {
        /// Script file, or `-` for standard input
        path: String,
    },
    /// Print canonical source. Comments are not kept: `//` and `--` lines
    /// are dropped from the output
    Fmt {
        /// Script file, or `-` for standard input
        path: String,
        /// Exit with status 1 if the file is not already canonical
        #[arg(long)]
        check: bool,
    },
    /// Print every name with its uses
    Symbols {
        /// Script file, or `-` for standard input
        path: String,
    },
    /// Open the terminal inspector
    View {
        /// Script file, or `-` for standard input
        path: String,
    },
}

fn read_source(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(path)
    }
}

fn display_name(path: &str) -> &str {
    if path == "-" {
        "<stdin>"
    } else {
        path
    }
}

/// Print `path:line:column: message`, the offending line and a caret
fn report_error(name: &str, source: &str, line: usize, column: usize, message: &str) {
    eprintln!("{}:{}:{}: {}", name, line, column, message);

    if let Some(text) = source.lines().nth(line.saturating_sub(1)) {
        let pad: String = text
            .chars()
            .take(column.saturating_sub(1))
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        eprintln!("    {}", text);
        eprintln!("    {}^", pad);
    }
}

fn report_parse_error(name: &str, source: &str, err: &ParseError) {
    let location = err.location();
    let kind = if err.is_lexical() {
        "lexical error"
    } else {
        "syntax error"
    };
    report_error(
        name,
        source,
        location.line,
        location.column,
        &format!("{}: {}", kind, err.message()),
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let path = match &cli.command {
        Commands::Tokens { path }
        | Commands::Ast { path }
        | Commands::Fmt { path, .. }
        | Commands::Symbols { path }
        | Commands::View { path } => path.clone(),
    };
    let name = display_name(&path);

    let source = match read_source(&path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", name, e);
            process::exit(1);
        }
    };

    if let Commands::Tokens { .. } = cli.command {
        match Lexer::tokenize(&source) {
            Ok(tokens) => {
                for (token, location) in tokens {
                    println!("{}:{}\t{}", location.line, location.column, token);
                }
                return Ok(());
            }
            Err(e) => {
                let location = e.location();
                report_error(
                    name,
                    &source,
                    location.line,
                    location.column,
                    &format!("lexical error: {}", e.message()),
                );
                process::exit(1);
            }
        }
    }

    let mut session = Session::new(source);

    if let Commands::View { .. } = cli.command {
        return run_inspector(&mut session, name);
    }

    if !quiet {
        eprintln!("Parsing {}...", name);
    }

    let program = match session.parse() {
        Ok(program) => program,
        Err(e) => {
            if !quiet {
                if let Some(elapsed) = session.parse_time() {
                    eprintln!("Parse failed after {:.3} ms.", elapsed.as_secs_f64() * 1000.0);
                }
            }
            report_parse_error(name, session.source(), &e);
            process::exit(1);
        }
    };

    if !quiet {
        let elapsed = session.parse_time().unwrap_or_default();
        eprintln!(
            "Parsed successfully in {:.3} ms. Found {} top-level statements.",
            elapsed.as_secs_f64() * 1000.0,
            program.len()
        );
    }

    match cli.command {
        Commands::Ast { .. } => {
            print!("{}", render_outline(&outline(&program)));
        }
        Commands::Fmt { check, .. } => {
            let formatted = program.to_string();
            let comments = Lexer::count_comments(session.source())?;
            if comments > 0 {
                eprintln!(
                    "warning: {}: formatting drops {} comment(s)",
                    name, comments
                );
            }
            if check {
                if formatted != session.source() {
                    eprintln!("{}: not formatted", name);
                    process::exit(1);
                }
                if !quiet {
                    eprintln!("{}: already formatted", name);
                }
            } else {
                print!("{}", formatted);
            }
        }
        Commands::Symbols { .. } => {
            print!("{}", SymbolIndex::build(&program));
        }
        Commands::Tokens { .. } | Commands::View { .. } => {}
    }

    Ok(())
}

fn run_inspector(session: &mut Session, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(session, name);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
