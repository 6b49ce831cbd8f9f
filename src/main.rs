use clap::{ArgAction, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tabled::{settings::Style as TableStyle, Table, Tabled};
use tracing::Level;

use invoice_pdf::config::{config_dir, load_config, resolve_output_dir, CONFIG_TEMPLATE};
use invoice_pdf::error::{InvoiceError, Result};
use invoice_pdf::invoice::{
    format_currency, format_number, format_percent, invoice_filename, normalize_str,
    InvoiceDocument,
};
use invoice_pdf::layout::{layout, DrawCommand};
use invoice_pdf::pdf::{render_document, write_pdf};

#[derive(Parser)]
#[command(name = "invoice-pdf")]
#[command(version, about = "Render invoice records to single-page PDFs", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.invoice-pdf)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Render invoice JSON files to PDF
    Render {
        /// Invoice JSON files ('-' reads stdin)
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output file path (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output directory (default: [output] dir from config.toml)
        #[arg(short = 'd', long)]
        out_dir: Option<PathBuf>,
    },

    /// Show how an invoice record is read
    Inspect {
        /// Invoice JSON file ('-' reads stdin)
        input: String,
    },

    /// List the draw commands for an invoice page
    Layout {
        /// Invoice JSON file ('-' reads stdin)
        input: String,

        /// Print the full layout as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the config location and effective style
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Render {
            inputs,
            output,
            out_dir,
        } => cmd_render(&cfg_dir, &inputs, output, out_dir),
        Commands::Inspect { input } => cmd_inspect(&cfg_dir, &input),
        Commands::Layout { input, json } => cmd_layout(&cfg_dir, &input, json),
        Commands::Config => cmd_config(&cfg_dir),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(InvoiceError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized invoice-pdf config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Adjust output and style:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Render an invoice:        invoice-pdf render invoice.json");

    Ok(())
}

/// Read one input (a path, or '-' for stdin) and normalize it.
fn read_document(input: &str) -> Result<InvoiceDocument> {
    let json = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    normalize_str(&json, input)
}

/// Render invoice JSON files to PDF
fn cmd_render(
    cfg_dir: &Path,
    inputs: &[String],
    output: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    if output.is_some() && inputs.len() > 1 {
        return Err(InvoiceError::OutputWithManyInputs(inputs.len()));
    }

    let config = load_config(cfg_dir)?;
    let output_dir = out_dir.unwrap_or_else(|| resolve_output_dir(&config.output.dir, cfg_dir));
    let symbol = &config.style.currency_symbol;

    for input in inputs {
        let doc = read_document(input)?;
        let rendered = render_document(&doc, &config.style)?;
        let pdf_path = output
            .clone()
            .unwrap_or_else(|| output_dir.join(&rendered.filename));

        write_pdf(&rendered, &pdf_path)?;

        println!("Rendered {}", rendered.filename);
        println!("  Items:  {}", doc.items.len());
        println!("  Total:  {}", format_currency(doc.total, symbol));
        println!("  Saved:  {}", pdf_path.display());
    }

    Ok(())
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "UNIT PRICE")]
    unit_price: String,
    #[tabled(rename = "TAX")]
    tax: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct CommandRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "OP")]
    op: &'static str,
    #[tabled(rename = "X")]
    x: String,
    #[tabled(rename = "Y")]
    y: String,
    #[tabled(rename = "DETAIL")]
    detail: String,
}

/// Show how an invoice record is read
fn cmd_inspect(cfg_dir: &Path, input: &str) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let style = &config.style;
    let symbol = &style.currency_symbol;
    let doc = read_document(input)?;

    println!("Invoice {}", doc.invoice_number);
    println!("{}", "-".repeat(50));
    println!("File:        {}", invoice_filename(&doc.invoice_number));
    println!("From:        {}", doc.company.name);
    match &doc.bill_to {
        Some(client) => println!("Bill to:     {}", client.name),
        None => println!("Bill to:     (no client information)"),
    }
    println!("Issue date:  {}", doc.issue_date.display(&style.date_format));
    println!("Due date:    {}", doc.due_date.display(&style.date_format));
    println!();

    if doc.items.is_empty() {
        println!("No items found.");
    } else {
        let rows: Vec<ItemRow> = doc
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| ItemRow {
                index: idx + 1,
                description: item.description.clone(),
                quantity: format_number(item.quantity),
                unit_price: format_currency(item.unit_price, symbol),
                tax: format_percent(item.tax_percent),
                amount: format_currency(item.amount, symbol),
            })
            .collect();
        let table = Table::new(rows).with(TableStyle::rounded()).to_string();
        println!("{table}");
    }

    println!();
    println!("Subtotal:    {}", format_currency(doc.subtotal, symbol));
    println!("Shipping:    {}", format_currency(doc.shipping, symbol));
    println!("Discount:    {}", format_percent(doc.discount_percent));
    println!("Total:       {}", format_currency(doc.total, symbol));

    Ok(())
}

fn describe(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Text { text, style, .. } => {
            format!("{text:?} {}pt {:?}", style.size, style.weight)
        }
        DrawCommand::FillRect {
            width,
            height,
            color,
            ..
        } => format!("{width:.1}x{height:.1} rgb({},{},{})", color.0, color.1, color.2),
        DrawCommand::StrokeRect { width, height, .. } => format!("{width:.1}x{height:.1}"),
        DrawCommand::Line { x2, y2, .. } => format!("to ({x2:.1}, {y2:.1})"),
    }
}

/// List the draw commands for an invoice page
fn cmd_layout(cfg_dir: &Path, input: &str, json: bool) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let doc = read_document(input)?;
    let page = layout(&doc, &config.style);

    if json {
        let out = serde_json::to_string_pretty(&page).map_err(|e| {
            InvoiceError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e.to_string(),
            ))
        })?;
        println!("{out}");
        return Ok(());
    }

    let rows: Vec<CommandRow> = page
        .commands
        .iter()
        .enumerate()
        .map(|(idx, command)| {
            let (x, y) = command.origin();
            CommandRow {
                index: idx + 1,
                op: command.op(),
                x: format!("{x:.1}"),
                y: format!("{y:.1}"),
                detail: describe(command),
            }
        })
        .collect();

    let table = Table::new(rows).with(TableStyle::rounded()).to_string();
    println!("{table}");
    println!();
    println!(
        "Page: {}x{} mm, {} commands, {} table rows, content ends at {:.1} mm",
        page.page_width,
        page.page_height,
        page.commands.len(),
        page.table.rows.len(),
        page.content_bottom
    );

    Ok(())
}

/// Show the config location and effective style
fn cmd_config(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let config_file = cfg_dir.join("config.toml");

    println!("Config directory: {}", cfg_dir.display());
    if config_file.exists() {
        println!("Config file:      {} (active)", config_file.display());
    } else {
        println!("Config file:      {} (not found, using defaults)", config_file.display());
    }
    println!(
        "Output directory: {}",
        resolve_output_dir(&config.output.dir, cfg_dir).display()
    );
    println!();

    let style = toml::to_string_pretty(&config.style).map_err(|e| {
        InvoiceError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    println!("[style]");
    print!("{style}");

    Ok(())
}
