use crate::{
    render, Cli, Commands, ExportArgs, GenerateArgs, HistoryArgs, HistoryCommands, ProviderArgs,
};
use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, Utc};
use repurpose::{
    export::{export_file_name, render_markdown},
    providers::factory::{build_ai_provider, AiProviderSettings},
    ErrorKind, FileHistoryStore, GenerationOptions, HistoryEntry, HistoryStore, RepurposePipeline,
    SourceRequest,
};
use repurpose_web::JinaReader;
use std::{fs, path::Path, time::Duration};
use tracing::info;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let store = FileHistoryStore::new(&cli.history_file);
    match cli.command {
        Commands::Generate(args) => handle_generate(args, &store).await,
        Commands::History(args) => handle_history(args, &store),
        Commands::Export(args) => handle_export(args, &store),
    }
}

fn build_pipeline(providers: &ProviderArgs, extended: bool) -> Result<RepurposePipeline> {
    let extractor = JinaReader::new(
        providers.jina_base_url.clone(),
        providers.jina_api_key.clone(),
        Some(Duration::from_secs(providers.extraction_timeout_secs)),
    )?;
    let ai_provider = build_ai_provider(&AiProviderSettings {
        provider: providers.ai_provider.clone(),
        api_url: providers.ai_api_url.clone(),
        api_key: providers.ai_api_key.clone(),
        model_name: providers.ai_model.clone(),
        timeout: Some(Duration::from_secs(providers.ai_timeout_secs)),
    })?;
    Ok(RepurposePipeline::new(
        Box::new(extractor),
        ai_provider,
        GenerationOptions {
            extended_assets: extended,
        },
    ))
}

async fn handle_generate(args: GenerateArgs, store: &dyn HistoryStore) -> Result<()> {
    let manual_text = match &args.manual_text_file {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?,
        ),
        None => None,
    };

    let pipeline = build_pipeline(&args.providers, args.extended)?;
    let mut request = SourceRequest::new(args.url.clone(), args.tone);
    request.manual_text = manual_text;

    info!(url = %request.url, tone = %request.tone, "Starting generation");
    let result = match pipeline.run(&request).await {
        Ok(result) => result,
        Err(e) => {
            let kind = e.kind();
            eprintln!("Error: {}", kind.message());
            if kind == ErrorKind::ExtractionFailed {
                eprintln!("Hint: paste the article into a file and pass it with --manual-text-file.");
            } else if kind.is_retryable() {
                eprintln!("You can try again.");
            }
            bail!("generation failed ({kind})");
        }
    };

    let now = Utc::now();
    store.save(HistoryEntry::from_result(
        request.url.clone(),
        request.tone,
        result.clone(),
        now.timestamp_millis(),
    ))?;

    let markdown = render_markdown(&result, &request.url, request.tone, &now.with_timezone(&Local));
    if let Some(path) = &args.export {
        write_export(path, &markdown)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{markdown}");
    }
    Ok(())
}

fn handle_history(args: HistoryArgs, store: &dyn HistoryStore) -> Result<()> {
    match args.command {
        HistoryCommands::List => {
            let entries = store.load()?;
            if entries.is_empty() {
                println!("No generations recorded yet.");
            }
            for (index, entry) in entries.iter().enumerate() {
                println!("{}", render::history_line(index, entry));
            }
        }
        HistoryCommands::Show { index } => {
            let entry = entry_at(store, index)?;
            println!("{}", render::entry_markdown(&entry));
        }
        HistoryCommands::Clear => {
            store.clear()?;
            println!("History cleared.");
        }
    }
    Ok(())
}

fn handle_export(args: ExportArgs, store: &dyn HistoryStore) -> Result<()> {
    let entry = entry_at(store, args.index)?;
    let path = args
        .output
        .unwrap_or_else(|| export_file_name(&Local::now()).into());
    write_export(&path, &render::entry_markdown(&entry))?;
    println!("Exported to {}", path.display());
    Ok(())
}

fn entry_at(store: &dyn HistoryStore, index: usize) -> Result<HistoryEntry> {
    let mut entries = store.load()?;
    if index >= entries.len() {
        return Err(anyhow!(
            "No history entry at position {index} ({} recorded)",
            entries.len()
        ));
    }
    Ok(entries.swap_remove(index))
}

fn write_export(path: &Path, markdown: &str) -> Result<()> {
    fs::write(path, markdown)
        .with_context(|| format!("Failed to write export to '{}'", path.display()))?;
    info!(path = %path.display(), "Export written");
    Ok(())
}
