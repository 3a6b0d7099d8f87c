//! docbind CLI - documentation binding tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docbind::render::{to_json, FlowRenderer, StyleRegistry};
use docbind::{Docbind, JsonFormat, RenderChain, RenderJob, DEFAULT_SITE_URL};

#[derive(Parser)]
#[command(name = "docbind")]
#[command(version)]
#[command(about = "Bind a documentation tree into one Markdown file and a PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate the source tree and render it to PDF
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// Render with the built-in renderer only
        #[arg(long)]
        no_external: bool,

        /// Pandoc executable
        #[arg(long, env = "DOCBIND_PANDOC", default_value = "pandoc")]
        pandoc: String,
    },

    /// Aggregate the source tree into one Markdown file
    #[command(alias = "md")]
    Aggregate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Render a Markdown file to PDF
    Render {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF (input with a .pdf extension if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Render with the built-in renderer only
        #[arg(long)]
        no_external: bool,

        /// Pandoc executable
        #[arg(long, env = "DOCBIND_PANDOC", default_value = "pandoc")]
        pandoc: String,
    },

    /// Dump the parsed document tree as JSON
    Tree {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Dump the output flow instead of the document tree
        #[arg(long)]
        flow: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone)]
struct SourceArgs {
    /// Documentation source directory
    #[arg(
        long,
        env = "DOCBIND_SOURCE",
        value_name = "DIR",
        default_value = "third_party/esphome-docs/content"
    )]
    source: PathBuf,

    /// Directory receiving the generated files
    #[arg(short, long, env = "DOCBIND_OUTPUT_DIR", value_name = "DIR", default_value = "data")]
    output_dir: PathBuf,

    /// Output file stem
    #[arg(short, long, default_value = "esphome-all")]
    name: String,

    /// Base URL for root-relative links and images
    #[arg(long, env = "DOCBIND_SITE_URL", default_value = DEFAULT_SITE_URL)]
    site_url: String,

    /// Collection title placed before the first page
    #[arg(long)]
    title: Option<String>,

    /// Levels added to every heading
    #[arg(long, default_value = "1")]
    heading_shift: usize,
}

impl SourceArgs {
    fn to_builder(&self) -> Docbind {
        let mut builder = Docbind::new(&self.source)
            .with_output_dir(&self.output_dir)
            .with_name(&self.name)
            .with_site_url(&self.site_url)
            .with_heading_shift(self.heading_shift);

        if let Some(title) = &self.title {
            builder = builder.with_title(title);
        }
        builder
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            source,
            no_external,
            pandoc,
        }) => cmd_build(&source, no_external, &pandoc),
        Some(Commands::Aggregate { source }) => cmd_aggregate(&source),
        Some(Commands::Render {
            input,
            output,
            no_external,
            pandoc,
        }) => cmd_render(&input, output.as_deref(), no_external, &pandoc),
        Some(Commands::Tree {
            input,
            flow,
            compact,
            output,
        }) => cmd_tree(&input, flow, compact, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docbind <COMMAND>".yellow());
            println!("       docbind --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: &'static str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(pb)
}

fn chain_for(no_external: bool, pandoc: &str) -> RenderChain {
    if no_external {
        RenderChain::fallback_only()
    } else {
        RenderChain::with_pandoc(pandoc)
    }
}

fn default_pdf_path(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

fn cmd_build(
    source: &SourceArgs,
    no_external: bool,
    pandoc: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = source.to_builder().with_pandoc_program(pandoc);
    if no_external {
        builder = builder.without_external();
    }

    let pb = spinner("Aggregating and rendering...")?;
    let result = builder.build();
    pb.finish_and_clear();
    let report = result?;

    println!(
        "{} {} files via {}",
        "Bound".green().bold(),
        report.file_count,
        report.strategy.cyan()
    );
    println!("\n{}", "Output files:".green().bold());
    println!("  {} {}", "├─".dimmed(), report.markdown_path.display());
    println!("  {} {}", "└─".dimmed(), report.pdf_path.display());

    Ok(())
}

fn cmd_aggregate(source: &SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let output = source.to_builder().write_markdown()?;

    println!(
        "{} {} ({} files)",
        "Saved to".green(),
        output.path.display(),
        output.file_count
    );
    Ok(())
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    no_external: bool,
    pandoc: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_pdf_path(input));

    let chain = chain_for(no_external, pandoc);
    log::debug!("Render chain: {:?}", chain.strategy_names());

    let pb = spinner("Rendering PDF...")?;
    let result = chain.run(&RenderJob::new(input, &output));
    pb.finish_and_clear();
    let outcome = result?;

    println!("{} {}", "Saved to".green(), output.display());
    println!(
        "  {} {} {}",
        "└─".dimmed(),
        outcome.strategy.cyan(),
        outcome.detail.dimmed()
    );
    Ok(())
}

fn cmd_tree(
    input: &Path,
    flow: bool,
    compact: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if flow {
        let styles = StyleRegistry::new();
        let mut renderer = FlowRenderer::new(&styles);
        renderer.walk(&docbind::parse_markdown(&text))?;

        let stats = renderer.stats();
        log::info!(
            "{} headings, {} paragraphs, {} words",
            stats.heading_count,
            stats.paragraph_count,
            stats.word_count
        );
        let flow = renderer.flow().ok_or("walk produced no flow")?;
        to_json(flow, format)?
    } else {
        to_json(&docbind::parse_markdown(&text), format)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docbind".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Documentation binding tool");
    println!();
    println!("Library: docbind {}", docbind::VERSION.dimmed());
    println!("License: MIT");
}
