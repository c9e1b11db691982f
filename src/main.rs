//! gtk-theme-template - GTK theme template generator

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use gtk_theme_template::extract::SkippedWidget;
use gtk_theme_template::{Config, Corpus, FailurePolicy, StyleClasses, Syntax, extract, generate};

#[derive(Parser)]
#[command(name = "gtk-theme-template")]
#[command(version, about = "Generate a GTK 3 theme template from gtk-doc HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    gtk-theme-template /usr/share/gtk-doc/html/gtk3
    gtk-theme-template docs -o MyTheme/gtk-3.0 -s snippets
    gtk-theme-template docs --dump > widgets.json")]
struct Cli {
    /// Directory of gtk-doc HTML reference pages
    #[arg(value_name = "DOCS")]
    docs: PathBuf,

    /// Template directory to write (its parent receives index.theme)
    #[arg(short, long, value_name = "DIR", default_value = gtk_theme_template::config::DEFAULT_OUTPUT_TEMPLATE_PATH)]
    output: PathBuf,

    /// Directory of header/footer snippets and index.theme
    #[arg(short, long, value_name = "DIR", default_value = gtk_theme_template::config::DEFAULT_SNIPPETS_PATH)]
    snippets: PathBuf,

    /// File name glob selecting widget pages
    #[arg(long, value_name = "GLOB", default_value = gtk_theme_template::config::DEFAULT_WIDGET_PATTERN)]
    pattern: String,

    /// File name of the style-context page
    #[arg(long, value_name = "FILE", default_value = gtk_theme_template::config::DEFAULT_STYLE_CONTEXT_DOCUMENT)]
    style_context: String,

    /// Markup syntax of the pages
    #[arg(long, value_enum, default_value_t = Syntax::Xml)]
    syntax: Syntax,

    /// Parse pages leniently as HTML (same as --syntax html)
    #[arg(long, conflicts_with = "syntax")]
    html: bool,

    /// Abort on the first malformed widget page instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Print the extracted data as JSON instead of writing templates
    #[arg(long)]
    dump: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,

    /// Show debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let syntax = if self.html { Syntax::Html } else { self.syntax };
        let policy = if self.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::SkipMalformed
        };

        Config::new(&self.docs)
            .with_output_template_path(&self.output)
            .with_snippets_path(&self.snippets)
            .with_widget_pattern(&self.pattern)
            .with_style_context_document(&self.style_context)
            .with_syntax(syntax)
            .with_failure_policy(policy)
    }
}

#[derive(serde::Serialize)]
struct Dump<'a> {
    widgets: &'a Corpus,
    style_classes: &'a StyleClasses,
    skipped: &'a [SkippedWidget],
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let result = if cli.dump {
        dump(&cli.config())
    } else {
        run(&cli.config(), cli.quiet)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("GTK_THEME_TEMPLATE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // A subscriber can only be missing if one is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(config: &Config, quiet: bool) -> Result<(), String> {
    let summary = generate(config).map_err(|e| e.to_string())?;

    if !quiet {
        println!(
            "Wrote {} widget templates and {} style classes to {}",
            summary.widgets,
            summary.classes,
            config.output_template_path.display()
        );
        if summary.skipped > 0 {
            println!("Skipped {} malformed widget pages", summary.skipped);
        }
    }

    Ok(())
}

fn dump(config: &Config) -> Result<(), String> {
    let extracted = extract(config).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&Dump {
        widgets: &extracted.corpus,
        style_classes: &extracted.classes,
        skipped: &extracted.skipped,
    })
    .map_err(|e| e.to_string())?;

    println!("{json}");
    Ok(())
}
