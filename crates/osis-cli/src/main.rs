use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use osis_renderer::{RenderParameters, render_named_osis};
use url::Url;

mod config;

#[derive(Parser)]
#[command(version, about = "Render OSIS Bible text to HTML", long_about = None)]
struct Cli {
    /// OSIS file to render, `-` for stdin
    input: PathBuf,

    /// Render parameters, as .toml or .json
    #[arg(short, long, env = "OSIS2HTML_CONFIG")]
    config: Option<PathBuf>,

    /// Where to write the HTML; stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the collected notes as JSON
    #[arg(long)]
    notes_json: Option<PathBuf>,

    /// Chapter the passage lies in
    #[arg(long)]
    chapter: Option<u32>,

    /// Base URL for relative figure paths
    #[arg(long)]
    module_base: Option<Url>,

    #[arg(long)]
    verse_numbers: bool,

    #[arg(long)]
    chapter_divider: bool,

    #[arg(long)]
    verse_per_line: bool,

    /// Link note references into the text
    #[arg(long)]
    notes: bool,

    #[arg(long)]
    red_letter: bool,

    /// Wrap the passage in a complete HTML document
    #[arg(long)]
    full_document: bool,
}

impl Cli {
    /// Flags only ever switch options on, so a config file sets the baseline.
    fn parameters(&self) -> Result<RenderParameters> {
        let mut params = match &self.config {
            Some(path) => config::load(path)?,
            None => RenderParameters::default(),
        };
        if self.chapter.is_some() {
            params.chapter = self.chapter;
        }
        if let Some(base) = &self.module_base {
            params.module_base_path = Some(base.clone());
        }
        params.show_verse_numbers |= self.verse_numbers;
        params.show_chapter_divider |= self.chapter_divider;
        params.verse_per_line |= self.verse_per_line;
        params.show_notes |= self.notes;
        params.red_letter |= self.red_letter;
        if self.full_document {
            params.as_fragment = false;
        }
        Ok(params)
    }

    fn read_input(&self) -> Result<(String, String)> {
        if self.input.as_os_str() == "-" {
            let mut xml = String::new();
            std::io::stdin()
                .read_to_string(&mut xml)
                .into_diagnostic()
                .wrap_err("couldn't read stdin")?;
            return Ok(("<stdin>".to_string(), xml));
        }
        let xml = std::fs::read_to_string(&self.input)
            .into_diagnostic()
            .wrap_err_with(|| format!("couldn't read {}", self.input.display()))?;
        Ok((self.input.display().to_string(), xml))
    }
}

fn main() -> Result<()> {
    init_miette()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let params = cli.parameters()?;
    let (source_name, xml) = cli.read_input()?;

    let passage = render_named_osis(&source_name, &xml, &params)?;
    tracing::debug!(
        bytes = passage.html.len(),
        notes = passage.notes.len(),
        "rendered {source_name}"
    );

    match &cli.output {
        Some(path) => std::fs::write(path, &passage.html)
            .into_diagnostic()
            .wrap_err_with(|| format!("couldn't write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(passage.html.as_bytes()).into_diagnostic()?;
            stdout.write_all(b"\n").into_diagnostic()?;
        }
    }

    if let Some(path) = &cli.notes_json {
        let json = serde_json::to_string_pretty(&passage.notes).into_diagnostic()?;
        std::fs::write(path, json)
            .into_diagnostic()
            .wrap_err_with(|| format!("couldn't write {}", path.display()))?;
    }

    Ok(())
}

fn init_miette() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .context_lines(3)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_defaults() {
        let cli = Cli::parse_from([
            "osis2html",
            "gen.xml",
            "--chapter",
            "2",
            "--verse-numbers",
            "--full-document",
            "--module-base",
            "file:///modules/kjv/",
        ]);
        let params = cli.parameters().unwrap();
        assert_eq!(params.chapter, Some(2));
        assert!(params.show_verse_numbers);
        assert!(!params.show_notes);
        assert!(!params.as_fragment);
        assert_eq!(
            params.module_base_path.as_ref().map(Url::as_str),
            Some("file:///modules/kjv/")
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
