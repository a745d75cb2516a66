use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use pika_core::Assignment;
use pika_ingest::{
    DocumentKind, SYLLABUS_EXAMPLE, build_assignments_prompt, extract_text,
    normalize_llm_assignments, parse_llm_assignments, parse_syllabus_text,
};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::LlmSection;
use crate::llm::{self, LlmReply, Provider};
use crate::state::Store;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Syllabus document (.pdf, .docx, .txt or .md)
    #[arg(long)]
    pub file: PathBuf,

    /// Extract with an LLM instead of the local parser. Without a value the
    /// provider from config.toml is used.
    #[arg(long, num_args = 0..=1, value_name = "PROVIDER")]
    pub llm: Option<Option<Provider>>,

    /// Replace the stored list instead of appending
    #[arg(long)]
    pub replace: bool,

    #[arg(long, value_parser = crate::clock::parse_now, hide = true)]
    pub now: Option<NaiveDateTime>,
}

pub async fn run(store: &Store, cfg: &LlmSection, args: ImportArgs) -> Result<()> {
    let now = crate::clock::resolve_now(args.now);
    let text = read_syllabus(&args.file)?;

    let imported = match args.llm {
        None => {
            let found = parse_syllabus_text(&text, now);
            if found.is_empty() {
                bail!(
                    "no assignments recognised in {}.\nUse one line per item, e.g.:\n\n{SYLLABUS_EXAMPLE}\n\nor retry with --llm",
                    args.file.display()
                );
            }
            found
        }
        Some(choice) => {
            let provider = match choice {
                Some(p) => p,
                None => Provider::from_config(&cfg.provider)?,
            };
            let prompt = build_assignments_prompt(&text);
            let reply = llm::complete(cfg, provider, &prompt).await?;
            from_reply(reply, now)
                .with_context(|| format!("{} reply rejected", provider.as_str()))?
        }
    };

    let count = imported.len();
    let existing = store.load_assignments()?;
    let merged = merge(existing, imported, args.replace);
    store.save_assignments(&merged)?;

    tracing::info!(count, replace = args.replace, "imported assignments");
    println!(
        "Imported {count} assignments from {} ({} total).",
        args.file.display(),
        merged.len()
    );
    Ok(())
}

/// Text of a syllabus document: PDF, DOCX or plain text.
pub fn read_syllabus(path: &Path) -> Result<String> {
    let kind = DocumentKind::from_path(path)?;
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    extract_text(kind, &bytes).with_context(|| format!("extract text from {}", path.display()))
}

fn from_reply(reply: LlmReply, now: NaiveDateTime) -> Result<Vec<Assignment>> {
    let out = match reply {
        LlmReply::Text(text) => parse_llm_assignments(&text, now)?,
        LlmReply::Json(value) => normalize_llm_assignments(value, now)?,
    };
    Ok(out)
}

pub fn merge(existing: Vec<Assignment>, imported: Vec<Assignment>, replace: bool) -> Vec<Assignment> {
    if replace {
        return imported;
    }
    let mut all = existing;
    all.extend(imported);
    all
}
