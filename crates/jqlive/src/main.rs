use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use jqlive::app::{prepare_session, run_session, DocumentSource};
use jqlive::cli::Args;
use jqlive::clipboard::{ClipboardStore, MemoryClipboardStore, SystemClipboard};
use jqlive::frontend::ScriptedFrontend;
use jqlive::highlight::JsonHighlighter;
use jqlive::tui::TuiFrontend;
use jqlive::{logging, CoreResult};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            eprintln!("jqlive: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(args: Args) -> CoreResult<()> {
    let config = args.load_config()?;
    if args.list_shorthands {
        for shorthand in config.shorthands.iter() {
            println!("{}\t{}", shorthand.name, shorthand.expression);
        }
        return Ok(());
    }

    let source = DocumentSource::from_arg(args.file.as_deref());
    let document = source.read()?;
    let session = prepare_session(&config, document, &source.label()).await?;
    let config = Arc::new(config);
    let highlighter = Arc::new(JsonHighlighter);

    let outcome = match args.query {
        Some(query) if args.print => {
            let mut store = MemoryClipboardStore::default();
            let mut frontend = ScriptedFrontend::single_query(query);
            let outcome =
                run_session(&mut frontend, session, config, highlighter, &mut store).await?;
            if let Some(entry) = store.latest() {
                print!("{}", entry.content);
                return Ok(());
            }
            outcome
        }
        Some(query) => {
            let mut store = SystemClipboard::from_preferences(&config.clipboard);
            let mut frontend = ScriptedFrontend::single_query(query);
            run_session(&mut frontend, session, config, highlighter, &mut store).await?
        }
        None => {
            let mut store = SystemClipboard::from_preferences(&config.clipboard);
            let mut frontend = TuiFrontend::new(config.shorthands.clone());
            run_session(&mut frontend, session, config, highlighter, &mut store).await?
        }
    };

    // The terminal is restored by now.
    if let Some(notice) = outcome.notice() {
        eprintln!("{notice}");
    }
    Ok(())
}
