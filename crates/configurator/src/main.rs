use std::path::PathBuf;

use clap::Parser;

use stage_configurator_lib::build::StageTemplate;
use stage_configurator_lib::command::execute_json_batch;
use stage_configurator_lib::export::{render_text, write_quotation};
use stage_configurator_lib::state::ConfiguratorState;

#[derive(Parser, Debug)]
#[command(name = "stage-configurator")]
#[command(about = "Build a stage scene, run commands against it and print the quotation")]
#[command(version)]
struct Cli {
    /// Scene document to load first
    #[arg(long)]
    scene: Option<PathBuf>,

    /// JSON array of commands to run
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Template to apply (proscenium, thrust, arena)
    #[arg(long, value_parser = parse_template)]
    template: Option<StageTemplate>,

    /// Write the quotation export JSON here
    #[arg(long)]
    quote_out: Option<PathBuf>,

    /// Save the final scene document here
    #[arg(long)]
    save: Option<PathBuf>,

    /// Quotation description text
    #[arg(long, default_value = "")]
    description: String,

    /// Quotation terms text
    #[arg(long, default_value = "")]
    terms: String,

    /// Also write the scene to the per-user autosave file
    #[arg(long)]
    autosave: bool,
}

fn parse_template(name: &str) -> Result<StageTemplate, String> {
    StageTemplate::from_name(name).ok_or_else(|| format!("Unknown template: {name}"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stage_configurator=info,stage_configurator_lib=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Cli) -> Result<(), String> {
    let mut state = ConfiguratorState::with_saved_settings();

    if let Some(path) = &args.scene {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene file {}: {e}", path.display()))?;
        let count = state
            .load_scene(&json)
            .map_err(|e| format!("Failed to load scene from {}: {e}", path.display()))?;
        tracing::info!("Loaded scene from {} ({count} objects)", path.display());
    }

    if let Some(template) = args.template {
        let ids = state.apply_template(template);
        tracing::info!("Applied template {} ({} objects)", template.name(), ids.len());
    }

    if let Some(path) = &args.commands {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read commands file {}: {e}", path.display()))?;
        let responses = execute_json_batch(&mut state, &json)?;
        for (i, resp) in responses.iter().enumerate() {
            if let Some(err) = &resp.error {
                tracing::warn!("Command {} failed: {err}", i + 1);
            }
        }
        tracing::info!("Executed {} commands", responses.len());
    }

    let export = state.export_quote(&args.description, &args.terms);
    print!("{}", render_text(&export));

    if let Some(path) = &args.quote_out {
        write_quotation(path, &export).map_err(|e| e.to_string())?;
    }

    if let Some(path) = &args.save {
        state.scene.save_to_path(path).map_err(|e| e.to_string())?;
        tracing::info!("Scene saved to {}", path.display());
    }

    if args.autosave {
        let path = state.scene.autosave().map_err(|e| e.to_string())?;
        tracing::info!("Autosaved to {}", path.display());
    }

    Ok(())
}
