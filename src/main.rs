//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use winsight::{
    cli::{Commands, Winsight},
    commands::{analyze::AnalyzeParams, handle_analyze, handle_correlate, handle_fetch},
    Result,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = Winsight::parse();

    match app.command {
        Commands::Fetch { common } => handle_fetch(common).await?,

        Commands::Correlate {
            common,
            top_k,
            out_dir,
        } => handle_correlate(common, top_k, &out_dir).await?,

        Commands::Analyze {
            common,
            top_k,
            out_dir,
            seed,
            train_fraction,
            features_config,
        } => {
            handle_analyze(AnalyzeParams {
                common,
                top_k,
                out_dir,
                seed,
                train_fraction,
                features_config,
            })
            .await?
        }
    }

    Ok(())
}
