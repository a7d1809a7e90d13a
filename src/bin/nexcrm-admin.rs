use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use nexcrm_admin::campaigns::{Campaign, CampaignHealth};
use nexcrm_admin::data::{Customer, Order};
use nexcrm_admin::prelude::*;
use nexcrm_admin::segments::Segment;

#[derive(Parser)]
#[clap(name = "nexcrm-admin", version, about = "Command-line admin for the NexCRM service")]
struct Cli {
    /// API base URL
    #[clap(long, env = "NEXCRM_API_URL")]
    api_url: Option<String>,

    /// Session cookie, e.g. `connect.sid=s%3A...`
    #[clap(long, env = "NEXCRM_SESSION_COOKIE", hide_env_values = true)]
    cookie: Option<String>,

    /// Request timeout in seconds
    #[clap(long, env = "NEXCRM_TIMEOUT_SECS")]
    timeout: Option<u64>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the signed-in user
    Whoami,
    /// End the session
    Logout,
    /// Totals and revenue for the last six months
    Dashboard,
    /// List, import or export customers
    Customers {
        #[clap(long)]
        search: Option<String>,
        #[clap(subcommand)]
        action: Option<DataAction>,
    },
    /// List, import or export orders
    Orders {
        #[clap(long)]
        search: Option<String>,
        #[clap(subcommand)]
        action: Option<DataAction>,
    },
    /// List or create segments
    Segments {
        #[clap(long)]
        search: Option<String>,
        #[clap(subcommand)]
        action: Option<SegmentAction>,
    },
    /// List, create or get message ideas for campaigns
    Campaigns {
        #[clap(long)]
        search: Option<String>,
        #[clap(subcommand)]
        action: Option<CampaignAction>,
    },
    /// Show the profile or export any dataset
    Settings {
        #[clap(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand)]
enum DataAction {
    /// Upload a JSON file (admin only)
    Import { file: PathBuf },
    /// Save as CSV (admin only)
    Export {
        #[clap(long, short)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SegmentAction {
    /// Create a segment from a plain-language description
    Create {
        #[clap(long)]
        name: String,
        #[clap(long)]
        prompt: String,
    },
}

#[derive(Subcommand)]
enum CampaignAction {
    /// Start a campaign for a segment
    Create {
        #[clap(long)]
        segment: String,
        #[clap(long)]
        message: String,
    },
    /// Suggest message templates for a segment
    Suggest {
        #[clap(long)]
        segment: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Fetch and save a dataset as CSV (admin only)
    Export {
        #[clap(value_enum)]
        kind: Dataset,
        #[clap(long, short)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Dataset {
    Customers,
    Orders,
    Campaigns,
}

impl From<Dataset> for ExportKind {
    fn from(d: Dataset) -> Self {
        match d {
            Dataset::Customers => ExportKind::Customers,
            Dataset::Orders => ExportKind::Orders,
            Dataset::Campaigns => ExportKind::Campaigns,
        }
    }
}

fn print_notifications(notifier: &MemoryNotifier) -> bool {
    let mut ok = true;
    for n in notifier.drain() {
        let description = n.description.as_deref().unwrap_or("");
        match n.variant {
            nexcrm_admin::notify::Variant::Default => println!("{}: {}", n.title, description),
            nexcrm_admin::notify::Variant::Destructive => {
                ok = false;
                eprintln!("{}: {}", n.title, description);
            }
        }
    }
    ok
}

fn print_customers(customers: &[&Customer]) {
    println!("{:<12} {:<24} {:<28} {:<16} {:>10} {:>6}", "ID", "NAME", "EMAIL", "PHONE", "SPEND", "VISITS");
    for c in customers {
        println!(
            "{:<12} {:<24} {:<28} {:<16} {:>10.2} {:>6}",
            c.customer_id,
            c.name,
            c.email,
            c.phone.as_deref().unwrap_or("N/A"),
            c.total_spend.unwrap_or(0.0),
            c.visits.unwrap_or(0),
        );
    }
}

fn print_orders(orders: &[&Order]) {
    println!("{:<14} {:<14} {:<26} {:>10}", "ORDER", "CUSTOMER", "DATE", "AMOUNT");
    for o in orders {
        println!("{:<14} {:<14} {:<26} {:>10.2}", o.order_id, o.customer_id_external, o.date, o.amount);
    }
}

fn print_segments(segments: &[&Segment]) {
    println!("{:<26} {:<28} {:>9} {:<5} {:>10}", "ID", "NAME", "AUDIENCE", "LOGIC", "CONDITIONS");
    for s in segments {
        println!(
            "{:<26} {:<28} {:>9} {:<5} {:>10}",
            s.id,
            s.name,
            s.audience_size_snapshot,
            s.rules.logic,
            s.rules.conditions.len()
        );
    }
}

fn print_campaigns(campaigns: &[&Campaign]) {
    for c in campaigns {
        let health = match c.status_counts.health() {
            CampaignHealth::Pending => "pending",
            CampaignHealth::Failing => "failing",
            CampaignHealth::Delivered => "delivered",
        };
        println!("{} [{}] {}", c.segment_name, health, c.created_at);
        println!("  {}", c.message_template);
        println!(
            "  sent to {} customers: {} sent, {} failed, {} pending",
            c.audience_size, c.status_counts.sent, c.status_counts.failed, c.status_counts.pending
        );
    }
}

fn default_out(out: Option<PathBuf>, kind: ExportKind) -> PathBuf {
    out.unwrap_or_else(|| PathBuf::from(kind.file_name()))
}

async fn run(cli: Cli) -> Result<bool, Error> {
    let mut options = ClientOptions::default().with_session_cookie(cli.cookie);
    if let Some(url) = &cli.api_url {
        options = options.with_api_url(url);
    }
    if let Some(secs) = cli.timeout {
        options = options.with_request_timeout(Some(Duration::from_secs(secs)));
    }

    let crm = NexCrm::new_with_options(options)?;
    let inbox = MemoryNotifier::new();
    let notifier: Arc<dyn Notifier> = Arc::new(inbox.clone());

    if let Command::Logout = cli.command {
        let view = crm.auth().logout().await?;
        println!("Logged out successfully. Next: {}", view);
        return Ok(true);
    }

    if !crm.auth().ensure_authenticated().await {
        let n = Notification::from_error("Error", "", &Error::Unauthenticated);
        eprintln!("{}: {}", n.title, n.description.unwrap_or_default());
        return Ok(false);
    }

    match cli.command {
        Command::Logout => unreachable!("handled above"),
        Command::Whoami => {
            if let Some(user) = crm.auth().current_user() {
                println!("{} <{}> role={}", user.display_name, user.email, user.role);
            }
        }
        Command::Dashboard => {
            let mut page = DashboardPage::new(crm.clone(), notifier);
            if page.load().await {
                let stats = page.stats();
                println!("Customers:     {}", stats.customer_count);
                println!("Total visits:  {}", stats.total_visits);
                println!("Orders:        {}", stats.order_count);
                println!("Revenue:       {:.2}", stats.total_revenue);
                for month in &stats.chart {
                    println!("  {} {} {:>12.2}", month.key, month.label, month.value);
                }
            }
        }
        Command::Customers { search, action } => {
            let mut page: Page<Customer> = Page::new(crm.clone(), notifier);
            page.set_search(search.unwrap_or_default());
            page.mount().await;
            match action {
                None => print_customers(&page.filtered()),
                Some(DataAction::Import { file }) => {
                    page.import_file(file).await;
                }
                Some(DataAction::Export { out }) => {
                    page.export_csv(default_out(out, ExportKind::Customers));
                }
            }
        }
        Command::Orders { search, action } => {
            let mut page: Page<Order> = Page::new(crm.clone(), notifier);
            page.set_search(search.unwrap_or_default());
            page.mount().await;
            match action {
                None => print_orders(&page.filtered()),
                Some(DataAction::Import { file }) => {
                    page.import_file(file).await;
                }
                Some(DataAction::Export { out }) => {
                    page.export_csv(default_out(out, ExportKind::Orders));
                }
            }
        }
        Command::Segments { search, action } => {
            let mut page: Page<Segment> = Page::new(crm.clone(), notifier);
            page.set_search(search.unwrap_or_default());
            match action {
                None => {
                    page.mount().await;
                    print_segments(&page.filtered());
                }
                Some(SegmentAction::Create { name, prompt }) => {
                    page.create_with_ai(&name, &prompt).await;
                }
            }
        }
        Command::Campaigns { search, action } => {
            let mut page = CampaignsPage::new(crm.clone(), notifier);
            page.campaigns_mut().set_search(search.unwrap_or_default());
            page.mount().await;
            match action {
                None => print_campaigns(&page.campaigns().filtered()),
                Some(CampaignAction::Create { segment, message }) => {
                    page.create(&segment, &message).await;
                }
                Some(CampaignAction::Suggest { segment }) => {
                    for (i, suggestion) in page.message_suggestions(&segment).await.iter().enumerate() {
                        println!("{}. {}", i + 1, suggestion);
                    }
                }
            }
        }
        Command::Settings { action } => {
            let page = SettingsPage::new(crm.clone(), notifier);
            match action {
                None => {
                    if let Some(user) = page.profile() {
                        println!("Name:   {}", user.display_name);
                        println!("Email:  {}", user.email);
                        println!("Role:   {}", user.role);
                        println!("Joined: {}", user.created_at.as_deref().unwrap_or("unknown"));
                    }
                }
                Some(SettingsAction::Export { kind, out }) => {
                    let kind = ExportKind::from(kind);
                    page.export(kind, default_out(out, kind)).await;
                }
            }
        }
    }

    Ok(print_notifications(&inbox))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nexcrm_admin=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
