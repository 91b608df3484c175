//! Interactive shell for the expert persona Q&A pipeline.
//!
//! A line-based front end over `experts-core`: pick or auto-generate a
//! specialist persona, ask a question, then optionally refine or evaluate
//! the answer. Errors are printed and the shell stays usable.
//!
//! ```bash
//! export GROQ_API_KEY=your_key_here
//! cargo run -p experts -- --model llama3-70b-8192 --temperature 0.5
//! ```

use experts_core::session::PERSONA_SENTINEL;
use experts_core::{models, NoticeKind, Session, SessionConfig};
use std::io::{self, BufRead, Write};

const DEFAULT_STORE: &str = "agents.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if std::env::var("GROQ_API_KEY").is_err() {
        eprintln!("Error: GROQ_API_KEY environment variable not set.");
        eprintln!("Please set it in .env file or with: export GROQ_API_KEY=your_key_here");
        std::process::exit(1);
    }

    let config = parse_config_from_args(&args);
    let mut session = Session::from_env(config)?;

    println!("Expert persona Q&A shell. Type 'help' for commands.");

    let stdin = io::stdin();
    let mut selection: Option<String> = None;

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_commands(),
            "personas" => {
                for choice in session.persona_choices().await {
                    let marker = if selection.as_deref() == Some(choice.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    println!("{marker} {choice}");
                }
            }
            "use" => {
                if rest.is_empty() {
                    println!("Usage: use <persona title>");
                } else {
                    selection = Some(rest.to_string());
                    println!("Selected specialist: {rest}");
                }
            }
            "auto" => {
                selection = None;
                println!("A specialist will be generated for the next question.");
            }
            "ask" => {
                if rest.is_empty() {
                    println!("Usage: ask <question>");
                } else {
                    let (title, answer) = session.fetch(rest, "", selection.as_deref()).await;
                    if !answer.is_empty() {
                        println!("\n[{title}]\n{answer}\n");
                    }
                }
            }
            "refine" => {
                let has_references = rest == "--with-references";
                let refined = session.refine(has_references).await;
                if !refined.is_empty() {
                    println!("\n[refined]\n{refined}\n");
                }
            }
            "evaluate" => {
                let evaluation = session.evaluate().await;
                if !evaluation.is_empty() {
                    println!("\n[evaluation]\n{evaluation}\n");
                }
            }
            "show" => {
                if let Some(answer) = session.answer() {
                    println!("\n[{}]\n{answer}\n", session.title());
                } else {
                    println!("Nothing fetched yet.");
                }
                if let Some(refined) = session.refined() {
                    println!("[refined]\n{refined}\n");
                }
                if let Some(evaluation) = session.evaluation() {
                    println!("[evaluation]\n{evaluation}\n");
                }
            }
            "reset" => {
                session.reset();
                selection = None;
                println!("Session cleared.");
            }
            _ => println!("Unknown command '{command}'. Type 'help' for commands."),
        }

        for notice in session.take_notices() {
            match notice.kind {
                NoticeKind::Error => eprintln!("error: {}", notice.message),
                NoticeKind::Warning => eprintln!("warning: {}", notice.message),
            }
        }
    }

    Ok(())
}

/// Build a session config from command line flags.
fn parse_config_from_args(args: &[String]) -> SessionConfig {
    let mut store = DEFAULT_STORE.to_string();
    let mut model = models::DEFAULT_MODEL.to_string();
    let mut temperature = 0.5;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--store" if i + 1 < args.len() => {
                store = args[i + 1].clone();
                i += 1;
            }
            "--model" if i + 1 < args.len() => {
                model = args[i + 1].clone();
                i += 1;
            }
            "--temperature" if i + 1 < args.len() => {
                match args[i + 1].parse::<f32>() {
                    Ok(t) => temperature = t.clamp(0.0, 1.0),
                    Err(_) => eprintln!(
                        "warning: ignoring unparsable --temperature '{}', using {temperature}",
                        args[i + 1]
                    ),
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }

    SessionConfig::new(store)
        .with_model(model)
        .with_temperature(temperature)
}

fn print_help() {
    println!("Expert persona Q&A shell");
    println!();
    println!("USAGE:");
    println!("    experts [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --store <path>         Persona store file (default: {DEFAULT_STORE})");
    println!("    --model <id>           Groq model identifier (default: {})", models::DEFAULT_MODEL);
    println!("    --temperature <t>      Sampling temperature 0.0-1.0 (default: 0.5)");
    println!("    -h, --help             Show this help");
    println!();
    println!("KNOWN MODELS:");
    for model in models::known_models() {
        println!("    {model}");
    }
    println!();
    println!("Requires GROQ_API_KEY (environment or .env file).");
}

fn print_commands() {
    println!("Commands:");
    println!("    personas               List stored specialists ('{PERSONA_SENTINEL}' first)");
    println!("    use <title>            Answer as a stored specialist");
    println!("    auto                   Generate a specialist for the next question");
    println!("    ask <question>         Fetch an answer");
    println!("    refine                 Critically revise the fetched answer");
    println!("    refine --with-references   Revision variant when references were supplied");
    println!("    evaluate               Structured critique of the fetched answer");
    println!("    show                   Print the current response chain");
    println!("    reset                  Clear the session");
    println!("    quit                   Exit");
}
