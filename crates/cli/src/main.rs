//! CLI tool for laying out markdown-like text as slide decks.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use slidegen_core::{
    deck_stats, AdvanceWidthMeasurer, ClassifiedLine, Deck, DeckStats, DrawCommand, ImageSource,
    LoadedImage, Page, Settings, SlideEngine, SlideFormat, SlideImages,
};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Lay out markdown-like text as fixed-size slides.
#[derive(Parser, Debug)]
#[command(name = "slidegen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input text file(s). Use "-" to read from stdin.
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Settings JSON file (missing fields use defaults)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Title page heading
    #[arg(short, long)]
    title: Option<String>,

    /// Title page subtitle
    #[arg(long)]
    subtitle: Option<String>,

    /// Footer text drawn on every slide
    #[arg(long)]
    footer: Option<String>,

    /// Slide format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Background image size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_dimensions)]
    background: Option<(u32, u32)>,

    /// Author image size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_dimensions)]
    author: Option<(u32, u32)>,

    /// Emit draw commands as JSON instead of a text outline
    #[arg(short, long)]
    render: bool,

    /// Print word count, reading time and outline
    #[arg(long)]
    stats: bool,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Post,
    Story,
}

impl From<FormatArg> for SlideFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Post => SlideFormat::Post,
            FormatArg::Story => SlideFormat::Story,
        }
    }
}

/// Rendered slides as written with `--render`.
#[derive(Serialize)]
struct RenderedDeck<'a> {
    width: f32,
    height: f32,
    slides: &'a [Vec<DrawCommand>],
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let settings = load_settings(&args)?;
    let engine = SlideEngine::new().with_measurer(AdvanceWidthMeasurer::default());

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &engine, &settings) {
            Ok(output) => {
                if args.print || is_stdin(input_path) {
                    print!("{}", output);
                } else {
                    let output_path =
                        get_output_path(input_path, args.output.as_ref(), args.render)?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Read the settings file, if any, and apply command line overrides.
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings {}", path.display()))?;
            Settings::from_json(&json)
                .with_context(|| format!("Invalid settings in {}", path.display()))?
        }
        None => Settings::default(),
    };

    if let Some(title) = &args.title {
        settings.title_text = title.clone();
    }
    if let Some(subtitle) = &args.subtitle {
        settings.subtitle_text = subtitle.clone();
    }
    if let Some(footer) = &args.footer {
        settings.footer_text = footer.clone();
    }
    if let Some(format) = args.format {
        settings.format = format.into();
    }

    log::debug!("Using settings: {:?}", settings);
    Ok(settings)
}

/// Build and format the deck for a single input.
fn process_file(
    input_path: &Path,
    args: &Args,
    engine: &SlideEngine,
    settings: &Settings,
) -> Result<String> {
    let text = read_input(input_path)?;

    let deck = engine
        .build_deck(&text, settings)
        .with_context(|| format!("Failed to build deck from {}", input_path.display()))?;

    if args.verbose {
        eprintln!("  Built {} slides", deck.len());
    }

    let background = args.background.map(|(w, h)| LoadedImage::ready(w, h));
    let author = args.author.map(|(w, h)| LoadedImage::ready(w, h));
    let images = SlideImages {
        background: background.as_ref().map(|i| i as &dyn ImageSource),
        author: author.as_ref().map(|i| i as &dyn ImageSource),
    };

    if args.stats {
        let stats = deck_stats(&text, &deck, settings, images);
        eprint!("{}", format_stats(&stats));
    }

    if args.render {
        let slides = engine.render_deck(&deck, settings, images)?;
        let (width, height) = settings.slide_size();
        let rendered = RenderedDeck {
            width,
            height,
            slides: &slides,
        };
        let mut json = serde_json::to_string_pretty(&rendered)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(format_outline(&deck, settings))
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String> {
    let mut text = String::new();
    if is_stdin(path) {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }
    Ok(text)
}

/// Plain text outline of the deck, one block per slide.
fn format_outline(deck: &Deck, settings: &Settings) -> String {
    let mut out = String::new();
    for (index, page) in deck.iter().enumerate() {
        out.push_str(&format!("--- Slide {}/{} ---\n", index + 1, deck.len()));
        match page {
            Page::Title => {
                out.push_str(&format!("[title] {}\n", settings.title_text));
                if !settings.subtitle_text.is_empty() {
                    out.push_str(&format!("[subtitle] {}\n", settings.subtitle_text));
                }
            }
            Page::Content(lines) => {
                for line in lines {
                    if let Some(text) = outline_line(line, settings) {
                        out.push_str(&text);
                        out.push('\n');
                    }
                }
            }
        }
        out.push('\n');
    }
    out
}

fn outline_line(line: &ClassifiedLine, settings: &Settings) -> Option<String> {
    let bullet = if line.shows_bullet() {
        format!("{} ", settings.bullet_char)
    } else {
        String::new()
    };
    match line {
        ClassifiedLine::Heading { text, level } => {
            Some(format!("{} {}", "#".repeat(level.number() as usize), text))
        }
        ClassifiedLine::Quote { text } => Some(format!("> {}", text)),
        ClassifiedLine::ListItem { text, .. } | ClassifiedLine::Body { text, .. } => {
            Some(format!("{}{}", bullet, text))
        }
        ClassifiedLine::Spacer => None,
    }
}

fn format_stats(stats: &DeckStats) -> String {
    let mut out = format!(
        "  {} words, ~{} min read, {} slides\n",
        stats.word_count, stats.reading_time_minutes, stats.slide_count
    );
    for entry in &stats.outline {
        out.push_str(&format!(
            "  {}{}\n",
            "  ".repeat(entry.level.number() as usize - 1),
            entry.text
        ));
    }
    out
}

/// Parse `WIDTHxHEIGHT` into pixel dimensions.
fn parse_dimensions(s: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
    let h = h.trim().parse().map_err(|_| format!("invalid height '{}'", h))?;
    Ok((w, h))
}

/// Determine the output path for a processed file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    render: bool,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let extension = if render { "json" } else { "txt" };
    let output_filename = format!("{}.slides.{}", stem, extension);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => match input_path.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        },
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
