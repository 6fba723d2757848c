use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use osreport::api::{fetch_sources, Needs};
use osreport::config::{
    config_dir, load_config, resolve_output_dir, session::DEMO_EMAIL, CONFIG_TEMPLATE,
};
use osreport::error::{ConsoleError, Result};
use osreport::logging::init_tracing;
use osreport::report::format::{format_brl, format_date, truncate};
use osreport::report::stats::distinct_statuses;
use osreport::report::variants::{ADDRESS_LIMIT, DESCRIPTION_LIMIT};
use osreport::report::{enrich_orders, generate_report, OrderFilter, ReportKind, ReportRequest, Stats};
use osreport::{ApiClient, Client, Config, Invoice, ProductService, ServiceOrder, Session, Technician};

#[derive(Parser)]
#[command(name = "osreport")]
#[command(version, about = "Service-order console and PDF report generator", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.osreport or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Start a session; API requests then carry its bearer token
    Login {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        password: Option<String>,

        /// Store a token issued by another system instead of checking credentials
        #[arg(long, conflicts_with = "password")]
        token: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show configuration, session and service endpoints
    Status,

    /// List clients
    Clients,

    /// List technicians
    Technicians,

    /// List products and services
    Products,

    /// List invoices
    Invoices,

    /// List service orders with client, technician and product names
    Orders {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show a single record
    Show {
        resource: ResourceArg,
        id: u64,
    },

    /// Change the status of a service order
    SetStatus {
        /// Service order id
        order: u64,

        /// New status (aberta, em andamento, fechada, cancelada)
        status: String,
    },

    /// Show collection totals and order status distribution
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Generate a PDF report (orders, clients, technicians, products)
    Report {
        /// Report kind: orders|os, clients|clientes, technicians|tecnicos, products|produtos
        kind: ReportKind,

        #[command(flatten)]
        filter: FilterArgs,

        /// Custom output file path (default: output_dir/relatorio-<kind>-YYYY-MM-DD.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Only orders with this status ("all" for every status)
    #[arg(long)]
    status: Option<String>,

    /// Orders opened on or after this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Orders opened on or before this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> Result<OrderFilter> {
        OrderFilter::parse(
            self.status.as_deref(),
            self.from.as_deref(),
            self.to.as_deref(),
        )
    }

    fn is_set(&self) -> bool {
        self.status.is_some() || self.from.is_some() || self.to.is_some()
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ResourceArg {
    Client,
    Technician,
    Product,
    Order,
    Invoice,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Login {
            email,
            password,
            token,
        } => cmd_login(&cfg_dir, email, password, token),
        Commands::Logout => cmd_logout(&cfg_dir),
        Commands::Status => cmd_status(&cfg_dir),
        Commands::Clients => cmd_clients(&cfg_dir),
        Commands::Technicians => cmd_technicians(&cfg_dir),
        Commands::Products => cmd_products(&cfg_dir),
        Commands::Invoices => cmd_invoices(&cfg_dir),
        Commands::Orders { filter } => cmd_orders(&cfg_dir, &filter),
        Commands::Show { resource, id } => cmd_show(&cfg_dir, resource, id),
        Commands::SetStatus { order, status } => cmd_set_status(&cfg_dir, order, &status),
        Commands::Stats { filter } => cmd_stats(&cfg_dir, &filter),
        Commands::Report {
            kind,
            filter,
            output,
            open,
        } => cmd_report(&cfg_dir, kind, &filter, output, open),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ConsoleError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized osreport config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point at your services:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Log in:                  osreport login --email <email> --password <password>");
    println!("  3. Generate a report:       osreport report orders --status aberta");

    Ok(())
}

fn require_init(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ConsoleError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    Ok(())
}

/// Load config and session and build the API client
fn connect(cfg_dir: &Path) -> Result<(Config, ApiClient)> {
    require_init(cfg_dir)?;
    let config = load_config(cfg_dir)?;
    let session = Session::load(cfg_dir)?;
    if !session.is_authenticated() {
        tracing::debug!("no session, sending requests without a token");
    }
    let api = ApiClient::new(&config.api, &session);
    Ok((config, api))
}

fn cmd_login(
    cfg_dir: &Path,
    email: Option<String>,
    password: Option<String>,
    token: Option<String>,
) -> Result<()> {
    require_init(cfg_dir)?;

    let session = match token {
        Some(token) => {
            let email = email.unwrap_or_else(|| DEMO_EMAIL.to_string());
            Session::store(cfg_dir, &email, &token)?
        }
        None => Session::login(
            cfg_dir,
            email.as_deref().unwrap_or_default(),
            password.as_deref().unwrap_or_default(),
        )?,
    };

    println!(
        "Logged in as {}",
        session.email.as_deref().unwrap_or("unknown")
    );
    Ok(())
}

fn cmd_logout(cfg_dir: &Path) -> Result<()> {
    require_init(cfg_dir)?;

    if Session::logout(cfg_dir)? {
        println!("Logged out");
    } else {
        println!("No active session");
    }
    Ok(())
}

fn cmd_status(cfg_dir: &Path) -> Result<()> {
    require_init(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let session = Session::load(cfg_dir)?;

    println!("osreport Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    match (&session.email, session.is_authenticated()) {
        (Some(email), true) => println!("Session:          {email}"),
        _ => println!("Session:          not logged in"),
    }
    println!("Clients API:      {}", config.api.clients_url);
    println!("Products API:     {}", config.api.products_url);
    println!("Orders API:       {}", config.api.orders_url);
    println!("Billing API:      {}", config.api.billing_url);
    println!(
        "Output directory: {}",
        resolve_output_dir(&config.report.output_dir, cfg_dir).display()
    );

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
    #[tabled(rename = "CPF/CNPJ")]
    tax_id: String,
    #[tabled(rename = "PHONE")]
    phone: String,
    #[tabled(rename = "ADDRESS")]
    address: String,
}

#[derive(Tabled)]
struct TechnicianRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
    #[tabled(rename = "ROLE")]
    role: String,
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "VALUE")]
    value: String,
    #[tabled(rename = "EST. TIME")]
    minutes: String,
}

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "TECHNICIAN")]
    technician: String,
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "OPENED")]
    opened: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
}

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "ISSUED")]
    issued: String,
    #[tabled(rename = "ORDER")]
    order: u64,
    #[tabled(rename = "TOTAL")]
    total: String,
}

fn print_table<R: Tabled>(rows: Vec<R>, empty: &str) {
    if rows.is_empty() {
        println!("{empty}");
        return;
    }
    let count = rows.len();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Total: {count}");
}

/// List clients
fn cmd_clients(cfg_dir: &Path) -> Result<()> {
    let (_, api) = connect(cfg_dir)?;
    let clients = api.get_all::<Client>()?;

    let rows: Vec<ClientRow> = clients
        .into_iter()
        .map(|c| ClientRow {
            id: c.id,
            name: c.name,
            email: c.email,
            tax_id: c.tax_id,
            phone: c.phone,
            address: truncate(&c.address, ADDRESS_LIMIT),
        })
        .collect();

    print_table(rows, "No clients found.");
    Ok(())
}

/// List technicians
fn cmd_technicians(cfg_dir: &Path) -> Result<()> {
    let (_, api) = connect(cfg_dir)?;
    let technicians = api.get_all::<Technician>()?;

    let rows: Vec<TechnicianRow> = technicians
        .into_iter()
        .map(|t| TechnicianRow {
            id: t.id,
            name: t.name,
            email: t.email,
            role: t.role,
        })
        .collect();

    print_table(rows, "No technicians found.");
    Ok(())
}

/// List products and services
fn cmd_products(cfg_dir: &Path) -> Result<()> {
    let (_, api) = connect(cfg_dir)?;
    let products = api.get_all::<ProductService>()?;

    let rows: Vec<ProductRow> = products
        .into_iter()
        .map(|p| ProductRow {
            id: p.id,
            code: p.code,
            name: p.name,
            value: format_brl(p.value),
            minutes: format!("{} min", p.estimated_minutes),
        })
        .collect();

    print_table(rows, "No products or services found.");
    Ok(())
}

/// List invoices
fn cmd_invoices(cfg_dir: &Path) -> Result<()> {
    let (_, api) = connect(cfg_dir)?;
    let invoices = api.get_all::<Invoice>()?;

    let rows: Vec<InvoiceRow> = invoices
        .into_iter()
        .map(|n| InvoiceRow {
            id: n.id,
            issued: format_date(n.issued_on),
            order: n.order_id,
            total: format_brl(n.total),
        })
        .collect();

    print_table(rows, "No invoices found.");
    Ok(())
}

/// List enriched service orders
fn cmd_orders(cfg_dir: &Path, filter_args: &FilterArgs) -> Result<()> {
    let filter = filter_args.to_filter()?;
    let (_, api) = connect(cfg_dir)?;
    let sources = fetch_sources(&api, Needs::all())?;

    let enriched = enrich_orders(
        &sources.orders,
        &sources.clients,
        &sources.technicians,
        &sources.products,
    );
    let selected = filter.apply(&enriched);

    let rows: Vec<OrderRow> = selected
        .into_iter()
        .map(|o| OrderRow {
            id: o.order.id,
            client: o.client_name,
            technician: o.technician_name,
            product: o.product_name,
            status: o.order.status,
            opened: format_date(o.order.opened_on),
            description: truncate(&o.order.description, DESCRIPTION_LIMIT),
        })
        .collect();

    print_table(rows, "No service orders match the given filters.");
    Ok(())
}

/// Show a single record as label/value lines
fn cmd_show(cfg_dir: &Path, resource: ResourceArg, id: u64) -> Result<()> {
    let (_, api) = connect(cfg_dir)?;

    let lines: Vec<(&str, String)> = match resource {
        ResourceArg::Client => {
            let c = api.get_by_id::<Client>(id)?;
            vec![
                ("ID", c.id.to_string()),
                ("Name", c.name),
                ("CPF/CNPJ", c.tax_id),
                ("Address", c.address),
                ("Phone", c.phone),
                ("Email", c.email),
            ]
        }
        ResourceArg::Technician => {
            let t = api.get_by_id::<Technician>(id)?;
            vec![
                ("ID", t.id.to_string()),
                ("Name", t.name),
                ("Role", t.role),
                ("Email", t.email),
            ]
        }
        ResourceArg::Product => {
            let p = api.get_by_id::<ProductService>(id)?;
            vec![
                ("ID", p.id.to_string()),
                ("Code", p.code),
                ("Name", p.name),
                ("Description", p.description),
                ("Value", format_brl(p.value)),
                ("Est. time", format!("{} min", p.estimated_minutes)),
            ]
        }
        ResourceArg::Order => {
            let o = api.get_by_id::<ServiceOrder>(id)?;
            vec![
                ("ID", o.id.to_string()),
                ("Client", o.client_id.to_string()),
                ("Technician", o.technician_id.to_string()),
                ("Product", o.product_id.to_string()),
                ("Opened", format_date(o.opened_on)),
                ("Status", o.status),
                ("Description", o.description),
            ]
        }
        ResourceArg::Invoice => {
            let n = api.get_by_id::<Invoice>(id)?;
            vec![
                ("ID", n.id.to_string()),
                ("Issued", format_date(n.issued_on)),
                ("Order", n.order_id.to_string()),
                ("Total", format_brl(n.total)),
            ]
        }
    };

    for (label, value) in lines {
        println!("{:<12} {}", format!("{label}:"), value);
    }
    Ok(())
}

/// Change a service order's status
fn cmd_set_status(cfg_dir: &Path, id: u64, status: &str) -> Result<()> {
    let (_, api) = connect(cfg_dir)?;

    let status = status.trim();
    if !osreport::report::KNOWN_STATUSES.contains(&status) {
        tracing::warn!(status, "status outside the known set");
    }

    let mut order = api.get_by_id::<ServiceOrder>(id)?;
    let previous = std::mem::replace(&mut order.status, status.to_string());
    api.update(id, &order)?;

    println!("Order {id}: {previous} -> {status}");
    Ok(())
}

/// Show totals and status distribution
fn cmd_stats(cfg_dir: &Path, filter_args: &FilterArgs) -> Result<()> {
    let filter = filter_args.to_filter()?;
    let (_, api) = connect(cfg_dir)?;
    let sources = fetch_sources(&api, Needs::all())?;

    let enriched = enrich_orders(
        &sources.orders,
        &sources.clients,
        &sources.technicians,
        &sources.products,
    );
    let selected = filter.apply(&enriched);
    let stats = Stats::compute(&sources, &selected);

    println!("Statistics");
    println!("{}", "-".repeat(50));
    println!("Service orders:    {}", stats.total_orders);
    println!("Clients:           {}", stats.total_clients);
    println!("Technicians:       {}", stats.total_technicians);
    println!("Products/services: {}", stats.total_products);

    if !stats.status_breakdown.is_empty() {
        println!();
        println!("Status breakdown:");
        for (status, count) in &stats.status_breakdown {
            println!("  {:<16} {}", status, count);
        }
    }

    let statuses = distinct_statuses(&enriched);
    if !statuses.is_empty() {
        println!();
        println!("Available statuses: {}", statuses.join(", "));
    }

    Ok(())
}

/// Generate a PDF report
fn cmd_report(
    cfg_dir: &Path,
    kind: ReportKind,
    filter_args: &FilterArgs,
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let filter = filter_args.to_filter()?;
    if kind != ReportKind::Orders && filter_args.is_set() {
        tracing::warn!(report = %kind, "--status/--from/--to only apply to the orders report");
    }

    let (config, api) = connect(cfg_dir)?;
    let request = ReportRequest {
        kind,
        filter,
        output,
    };
    let report = generate_report(&api, &config, cfg_dir, &request)?;

    println!("Generated {} report", kind);
    println!("  Records: {}", report.records);
    println!("  Saved:   {}", report.path.display());

    if open {
        open_path(&report.path)?;
    }

    Ok(())
}

fn open_path(pdf_path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .arg("/C")
            .arg("start")
            .arg("")
            .arg(pdf_path)
            .spawn()?;
    }
    Ok(())
}
