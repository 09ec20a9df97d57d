use article_catalog::render::{self, RenderFormat};
use article_catalog::{append_shared_footer, config, output, scan};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "article-catalog")]
#[command(about = "Catalog of tutorial articles with a shared author footer")]
#[command(long_about = "\
Catalog of tutorial articles with a shared author footer

The index file decides which articles exist and in what order. Every linked
article must exist; duplicates and dangling links fail the build.

Content structure:

  content/
  ├── catalog.toml        # Settings (optional)
  ├── index.md            # 1. [Tuples in Swift](article-6.md)
  ├── footer.md           # Author bio, appended to every article
  ├── article-5.md
  └── article-6.md

Run 'article-catalog gen-config' to print a documented catalog.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Html,
}

impl From<Format> for RenderFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Markdown => RenderFormat::Markdown,
            Format::Html => RenderFormat::Html,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// List articles in index order
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one article with the footer appended
    Show {
        /// Article identifier (file stem, e.g. article-6)
        id: String,
        /// Print the body only
        #[arg(long)]
        no_footer: bool,
    },
    /// Validate the catalog and report orphans and heading drift
    Check,
    /// Write every article, footer appended, to the output directory
    Render {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
    },
    /// Print a stock catalog.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::List { json } => {
            let catalog = scan::scan(&cli.source)?;
            if json {
                let json = serde_json::to_string_pretty(catalog.repository.list())?;
                println!("{}", json);
            } else {
                output::print_list_output(&catalog);
            }
        }
        Command::Show { id, no_footer } => {
            let catalog = scan::scan(&cli.source)?;
            let article = catalog.repository.find(&id)?;
            if no_footer {
                print!("{}", article.body);
            } else {
                println!("{}", append_shared_footer(article, &catalog.footer));
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let catalog = scan::scan(&cli.source)?;
            output::print_list_output(&catalog);
            let report = scan::check(&cli.source, &catalog);
            if report.is_clean() {
                println!("==> Catalog is valid");
            } else {
                println!();
                output::print_check_output(&report, &cli.source);
                println!("==> Catalog is valid, with warnings");
            }
        }
        Command::Render { output: out, format } => {
            let catalog = scan::scan(&cli.source)?;
            let report = render::render(&catalog, &out, format.into())?;
            output::print_render_output(&report, &out);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so command output stays pipeable.
/// `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
