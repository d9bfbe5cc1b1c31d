//! Notaria Intent - CLI Interface
//!
//! Command-line interface for trying and checking the document assistant.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use notaria_intent::response::{render, render_reply};
use notaria_intent::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "notaria-intent")]
#[command(about = "Recommend notarial documents from free text", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to the built-in tables)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Log per-rule scores
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a single message
    Classify {
        /// Message text
        #[arg(required = true)]
        text: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Show every rule that scored above zero
        #[arg(long)]
        explain: bool,
    },

    /// Start an interactive conversation
    Repl {
        /// Load and save conversation history here
        #[arg(long, value_name = "PATH")]
        history: Option<PathBuf>,
    },

    /// Run the built-in sample phrases and report mismatches
    Check,

    /// Show assistant information
    Info,
}

/// Sample phrases and the intent (or fallback kind) they must produce
const SAMPLES: &[(&str, &str)] = &[
    ("Quiero vender mi casa", "vender_casa"),
    ("Quiero vender mi vivienda", "vender_casa"),
    ("Quiero vender mi auto", "vender_auto"),
    ("Busco comprar un departamento", "comprar_casa"),
    ("Voy a arrendar mi local", "arrendar"),
    ("Necesito un poder para cobrar en el banco", "poder"),
    ("Permiso de viaje para mi hijo", "autorizacion_viaje"),
    ("Necesito una declaración jurada de ingresos", "declaracion_jurada"),
    ("Me dieron el finiquito en el trabajo", "finiquito"),
    ("Quiero hacer mi testamento", "testamento"),
    ("Le hice un préstamo a mi hermano", "reconocimiento_deuda"),
    ("Contrato de trabajo para mi empleada", "contrato_trabajo"),
    ("algo para mi casa", "suggestion"),
    ("asdkjhasd", "unrecognized"),
    ("", "unrecognized"),
];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AssistantConfig::default(),
    };
    let assistant = Assistant::new(config).context("failed to build assistant")?;

    match cli.command {
        Commands::Classify { text, json, explain } => {
            classify_command(&assistant, &text.join(" "), json, explain)?
        }
        Commands::Repl { history } => {
            let history = history.or_else(|| assistant.config().history_path.clone());
            run_repl(&assistant, history)?
        }
        Commands::Check => run_check(&assistant)?,
        Commands::Info => show_info(&assistant),
    }

    Ok(())
}

/// Classify a single message
fn classify_command(assistant: &Assistant, input: &str, json: bool, explain: bool) -> anyhow::Result<()> {
    let result = assistant.classify(input);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Input: {}\n", input);
        println!("{}", render(&result));
        println!("\nConfidence: {:.2}", result.confidence());
    }

    if explain {
        println!("\nRule scores:");
        for detail in assistant.explain(input) {
            println!(
                "  {:<22} {:.3}  required={:?} context={:?}",
                detail.rule, detail.score, detail.matched_required, detail.matched_context
            );
        }
    }

    Ok(())
}

/// Run interactive conversation on stdin/stdout
fn run_repl(assistant: &Assistant, history: Option<PathBuf>) -> anyhow::Result<()> {
    println!("Asistente notarial (escribe 'salir' para terminar)\n");
    println!("{}\n", assistant.info());

    let stdin = io::stdin();
    repl_session(assistant, history.as_deref(), stdin.lock(), io::stdout())?;

    println!("¡Hasta luego!");
    Ok(())
}

/// Load the session, converse until input ends, and save it.
///
/// History is saved even when reading input fails; the read error is
/// returned afterwards.
fn repl_session<R: BufRead, W: Write>(
    assistant: &Assistant,
    history: Option<&Path>,
    input: R,
    out: W,
) -> anyhow::Result<()> {
    let mut session = match history {
        Some(path) if path.exists() => ConversationSession::load(path)?,
        _ => assistant.new_session(),
    };

    let outcome = converse(assistant, &mut session, input, out);

    if let Some(path) = history {
        session.save(path)?;
        log::debug!("Saved {} exchanges to {}", session.len(), path.display());
    }

    outcome.context("conversation interrupted")
}

fn converse<R: BufRead, W: Write>(
    assistant: &Assistant,
    session: &mut ConversationSession,
    input: R,
    mut out: W,
) -> io::Result<()> {
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let text = line.trim();

        match text {
            "salir" | "exit" | "quit" => break,
            "reiniciar" => {
                session.reset();
                writeln!(out, "Conversación reiniciada.\n")?;
                continue;
            }
            "historial" => {
                for exchange in session.history() {
                    writeln!(out, "  [{}] {}", exchange.at.format("%H:%M:%S"), exchange.user_text)?;
                }
                writeln!(out)?;
                continue;
            }
            _ => {}
        }

        let reply = assistant.respond(session, text);
        writeln!(out, "{}\n", render_reply(&reply))?;
    }

    Ok(())
}

/// Run the sample phrases
fn run_check(assistant: &Assistant) -> anyhow::Result<()> {
    println!("Running Intent Classification Checks\n");

    let mut passed = 0;
    let total = SAMPLES.len();

    for (i, (input, expected)) in SAMPLES.iter().enumerate() {
        let result = assistant.classify(input);
        let actual = match &result {
            ClassificationResult::Suggestion { .. } => "suggestion",
            ClassificationResult::Unrecognized { .. } => "unrecognized",
            other => other.intent().unwrap_or_default(),
        };

        if actual == *expected {
            println!("Check {}: \"{}\" ... ✓ PASS ({}, {:.2})", i + 1, input, actual, result.confidence());
            passed += 1;
        } else {
            println!("Check {}: \"{}\" ... ✗ FAIL (expected {}, got {})", i + 1, input, expected, actual);
        }
    }

    println!(
        "\nResults: {}/{} passed ({:.1}%)",
        passed,
        total,
        (passed as f32 / total as f32) * 100.0
    );

    if passed < total {
        anyhow::bail!("{} check(s) failed", total - passed);
    }
    Ok(())
}

/// Show assistant info
fn show_info(assistant: &Assistant) {
    println!("{}", assistant.info());
    println!();
    println!("Intents:");
    for rule in assistant.classifier().rules().iter() {
        println!("  {:<22} weight {:.2}", rule.name, rule.confidence_weight);
    }
}
