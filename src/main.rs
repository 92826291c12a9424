use chatstream::cli::{handle_version_command, parse_args, CliCommand, TranscriptPrinter};
use chatstream::client::ChatClient;
use chatstream::config::ClientConfig;
use chatstream::health_check::{display_health_check_results, run_health_check};
use chatstream::session::{SessionCommand, SessionController, SessionUpdate};

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to stderr so stdout carries only the conversation
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatstream=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_flush(text: &str) {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let args = parse_args(std::env::args());
    if args.command == CliCommand::Version {
        handle_version_command();
    }

    let mut config = ClientConfig::from_env();
    if let Some(url) = args.base_url {
        config = config.with_base_url(url);
    }
    tracing::info!(base_url = %config.base_url, "Starting chatstream");

    let client = ChatClient::from_config(&config)?;

    let health = run_health_check(&client).await;
    display_health_check_results(&health, &config.base_url);
    if args.command == CliCommand::Health {
        if health.service_healthy {
            return Ok(());
        }
        return Err(eyre!("chat service at {} is unavailable", config.base_url));
    }

    let mut session = SessionController::new(client).with_tail_policy(config.tail_policy);
    let mut updates = session.subscribe();
    let (commands, command_rx) = mpsc::unbounded_channel();
    let session_task = tokio::spawn(session.run(command_rx));

    println!("\nType a message and press Enter. Ctrl-C cancels a reply, /quit exits.");
    print_flush("\n> ");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printer = TranscriptPrinter::new();
    let mut loading = false;
    let mut stdin_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) if line.trim() == "/quit" => break,
                    Some(line) if line.trim().is_empty() => print_flush("> "),
                    Some(line) => {
                        if commands.send(SessionCommand::Submit(line)).is_err() {
                            break;
                        }
                        loading = true;
                    }
                    // EOF: let the reply in flight finish first
                    None => {
                        stdin_open = false;
                        if !loading {
                            break;
                        }
                    }
                }
            }
            update = updates.recv() => {
                let Some(update) = update else { break };
                if let SessionUpdate::Loading(value) = update {
                    loading = value;
                }
                if let Some(text) = printer.render(&update) {
                    print_flush(&text);
                }
                if let SessionUpdate::Phase(phase) = update {
                    if phase.is_terminal() && !stdin_open {
                        break;
                    }
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                if !loading {
                    break;
                }
                let _ = commands.send(SessionCommand::Cancel);
            }
        }
    }

    let _ = commands.send(SessionCommand::Shutdown);
    let session = session_task.await?;
    println!();
    tracing::info!(
        messages = session.transcript().len(),
        conversation_id = session.conversation_id().unwrap_or("-"),
        "Session ended"
    );

    Ok(())
}
