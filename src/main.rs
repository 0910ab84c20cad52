use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use futures_util::future;
use indicatif::ProgressBar;
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use cloudpc::models::{CreateInstanceRequest, Instance, InstanceStats, OsKind, User};
use cloudpc::utils::colorize_status;
use cloudpc::{api, config, ApiClient, ApiError, SessionStore};

#[derive(Parser)]
#[command(
    name = "cloudpc",
    author,
    version,
    about = "CloudPC command-line tool",
    long_about = r#"CloudPC — rent and control cloud desktops from your terminal.

This tool talks to a CloudPC backend: log in once and the session token is
kept in a local token file until you log out (or the backend rejects it).
Point it at your backend with the API_BASE_URL environment variable or an
--env-file.

Examples:
  1) Log in and list your machines:
      cloudpc auth login me@example.com secret
      cloudpc instances list
  2) Provision and start a machine:
      cloudpc instances create --name dev-box --cpu 4 --memory 8 --storage 100 --os Linux
      cloudpc instances start <id>
"#,
    after_help = "Use `cloudpc <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the session (login, register, whoami, logout)
    Auth {
        #[command(subcommand)]
        sub: AuthCommands,
    },
    /// Manage cloud PC instances via the configured API
    #[command(
        about = "Manage cloud PC instances (list, show, create, start, stop, delete, stats, connect)",
        long_about = "These commands map 1:1 onto the backend's /cloudpc endpoints and require a logged-in session. Commands that mutate state (delete, stop) take effect on the backend immediately. Use `--help` on a subcommand for detailed examples."
    )]
    Instances {
        #[command(subcommand)]
        sub: InstanceCommands,
    },
    /// Validate configuration (env vars / stored session)
    #[command(
        about = "Validate configuration and ensure API connectivity.",
        long_about = "Check that API_BASE_URL is configured, and when a session token is stored, validate it by fetching the current user from the backend."
    )]
    CheckConfig,
}

#[derive(Subcommand)]
enum AuthCommands {
    #[command(about = "Log in with email and password", long_about = "Authenticate against the backend. The returned token is written to the token file and attached to every later request.")]
    Login { email: String, password: String },
    #[command(about = "Create an account", long_about = "Register a new account. A successful registration also logs you in.")]
    Register {
        name: String,
        email: String,
        password: String,
    },
    #[command(about = "Show the logged-in account", long_about = "Fetch the account behind the stored session token from the backend.")]
    Whoami,
    #[command(about = "Log out", long_about = "Remove the stored session token. Purely local; no request is sent.")]
    Logout,
}

#[derive(Subcommand)]
enum InstanceCommands {
    /// List instances
    #[command(about = "List instances", long_about = "List every cloud PC owned by the logged-in account.")]
    List,
    /// Show instance details
    #[command(about = "Show instance details", long_about = "Show one instance. With `--stats` the usage snapshot is fetched in parallel and shown alongside.")]
    Show {
        instance_id: String,
        /// Also fetch and display the usage snapshot
        #[arg(long)]
        stats: bool,
    },
    /// Provision a new instance
    #[command(about = "Create an instance", long_about = "Provision a new cloud PC. The backend answers with the created machine, usually still starting up.")]
    Create {
        #[arg(long)]
        name: String,
        /// CPU core count
        #[arg(long)]
        cpu: u32,
        /// Memory in GB
        #[arg(long)]
        memory: u32,
        /// Storage in GB
        #[arg(long)]
        storage: u32,
        /// Operating system (Windows or Linux)
        #[arg(long)]
        os: String,
    },
    /// Start an instance
    #[command(about = "Start an instance", long_about = "Request a transition to running. The backend may complete the transition asynchronously; follow up with `show` to confirm.")]
    Start { instance_id: String },
    /// Stop an instance
    #[command(about = "Stop an instance", long_about = "Request a transition to stopped. Running sessions on the machine are terminated.")]
    Stop { instance_id: String },
    /// Delete an instance
    #[command(about = "Delete an instance", long_about = "Permanently delete an instance and its storage. Use with care.")]
    Delete { instance_id: String },
    /// Show a usage snapshot
    #[command(about = "Show instance usage", long_about = "Fetch a point-in-time CPU/memory/disk/network snapshot for an instance.")]
    Stats { instance_id: String },
    /// Obtain a remote-access handle
    #[command(about = "Connect to an instance", long_about = "Ask the backend for a remote-access URL and one-off connection ticket for the instance.")]
    Connect { instance_id: String },
}

fn build_client() -> ApiClient {
    let session = Arc::new(SessionStore::open(config::get_token_file()));
    ApiClient::new(config::get_api_base_url(), session)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn print_instances_table(instances: &[Instance]) {
    if instances.is_empty() {
        println!("(no instances)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Status", "CPU", "Memory", "Storage", "OS", "IP"]);
    for i in instances {
        table.add_row(vec![
            i.id.clone(),
            i.name.clone(),
            colorize_status(i.status),
            i.cpu.to_string(),
            format!("{} GB", i.memory),
            format!("{} GB", i.storage),
            i.os.to_string(),
            i.ip.clone(),
        ]);
    }
    println!("\n{table}\n");
}

fn print_instance_detail(instance: &Instance) {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["ID".to_string(), instance.id.clone()]);
    table.add_row(vec!["Name".to_string(), instance.name.clone()]);
    table.add_row(vec!["Status".to_string(), colorize_status(instance.status)]);
    table.add_row(vec!["CPU".to_string(), format!("{} cores", instance.cpu)]);
    table.add_row(vec!["Memory".to_string(), format!("{} GB", instance.memory)]);
    table.add_row(vec!["Storage".to_string(), format!("{} GB", instance.storage)]);
    table.add_row(vec!["OS".to_string(), instance.os.to_string()]);
    table.add_row(vec![
        "Address".to_string(),
        format!("{}:{}", instance.ip, instance.port),
    ]);
    table.add_row(vec![
        "Created".to_string(),
        instance.created_at.to_rfc3339(),
    ]);
    println!("\n{table}\n");
}

fn print_stats_table(stats: &InstanceStats) {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["CPU usage".to_string(), format!("{:.1} %", stats.cpu_usage)]);
    table.add_row(vec![
        "Memory usage".to_string(),
        format!("{:.1} %", stats.memory_usage),
    ]);
    table.add_row(vec![
        "Disk usage".to_string(),
        format!("{:.1} %", stats.disk_usage),
    ]);
    table.add_row(vec![
        "Network in".to_string(),
        format!("{:.1} MB", stats.network_in),
    ]);
    table.add_row(vec![
        "Network out".to_string(),
        format!("{:.1} MB", stats.network_out),
    ]);
    table.add_row(vec!["Uptime".to_string(), stats.uptime.clone()]);
    println!("\n{table}\n");
}

fn print_user(user: &User) {
    println!(
        "{} {} <{}>",
        yansi::Paint::new("Logged in as").green(),
        yansi::Paint::new(&user.name).bold(),
        user.email
    );
    println!("Account id: {}  (created {})", user.id, user.created_at.to_rfc3339());
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print an error and exit. A dead session gets a log-in hint instead of the
/// raw error text.
fn fail(e: ApiError) -> ! {
    match e {
        ApiError::SessionExpired => {
            eprintln!(
                "{}",
                yansi::Paint::new("Your session has expired or is invalid.").red()
            );
            eprintln!(
                "{}",
                yansi::Paint::new("Run `cloudpc auth login <email> <password>` to start a new one.").yellow()
            );
        }
        other => {
            eprintln!("{}: {}", yansi::Paint::new("Error").red(), other);
        }
    }
    process::exit(1);
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }
    if cli.silent {
        api::set_silent(true);
    }

    config::load_env_file(cli.env_file.as_deref());
    let client = build_client();

    match cli.command {
        Commands::Auth { sub } => match sub {
            AuthCommands::Login { email, password } => {
                match client.login(&email, &password).await {
                    Ok(auth) => print_user(&auth.user),
                    Err(e) => fail(e),
                }
            }
            AuthCommands::Register {
                name,
                email,
                password,
            } => match client.register(&name, &email, &password).await {
                Ok(auth) => {
                    println!("{}", yansi::Paint::new("Account created").green());
                    print_user(&auth.user);
                }
                Err(e) => fail(e),
            },
            AuthCommands::Whoami => {
                if !client.session().is_present() {
                    eprintln!("{}", yansi::Paint::new("Not logged in").yellow());
                    process::exit(1);
                }
                match client.current_user().await {
                    Ok(user) => print_user(&user),
                    Err(e) => fail(e),
                }
            }
            AuthCommands::Logout => match client.logout() {
                Ok(()) => println!("{}", yansi::Paint::new("Logged out").green()),
                Err(e) => fail(e),
            },
        },
        Commands::Instances { sub } => match sub {
            InstanceCommands::List => match client.list_instances().await {
                Ok(instances) => print_instances_table(&instances),
                Err(e) => fail(e),
            },
            InstanceCommands::Show { instance_id, stats } => {
                if stats {
                    // Independent requests; neither waits for the other.
                    let (instance, stats) = future::join(
                        client.get_instance(&instance_id),
                        client.instance_stats(&instance_id),
                    )
                    .await;
                    match instance {
                        Ok(i) => print_instance_detail(&i),
                        Err(e) => fail(e),
                    }
                    match stats {
                        Ok(s) => print_stats_table(&s),
                        Err(e) => eprintln!(
                            "{}: {}",
                            yansi::Paint::new("Stats unavailable").yellow(),
                            e
                        ),
                    }
                } else {
                    match client.get_instance(&instance_id).await {
                        Ok(i) => print_instance_detail(&i),
                        Err(e) => fail(e),
                    }
                }
            }
            InstanceCommands::Create {
                name,
                cpu,
                memory,
                storage,
                os,
            } => {
                let os = match OsKind::from_str(&os) {
                    Some(os) => os,
                    None => {
                        eprintln!(
                            "{}: '{}' (expected Windows or Linux)",
                            yansi::Paint::new("Unknown OS").red(),
                            os
                        );
                        process::exit(1);
                    }
                };
                let spec = CreateInstanceRequest {
                    name,
                    cpu,
                    memory,
                    storage,
                    os,
                };
                let pb = spinner("Provisioning instance...");
                let result = client.create_instance(&spec).await;
                pb.finish_and_clear();
                match result {
                    Ok(instance) => {
                        println!("{}", yansi::Paint::new("Instance created").green());
                        print_instance_detail(&instance);
                    }
                    Err(e) => fail(e),
                }
            }
            InstanceCommands::Start { instance_id } => {
                let pb = spinner("Starting instance...");
                let result = client.start_instance(&instance_id).await;
                pb.finish_and_clear();
                match result {
                    Ok(instance) => print_instance_detail(&instance),
                    Err(e) => fail(e),
                }
            }
            InstanceCommands::Stop { instance_id } => {
                let pb = spinner("Stopping instance...");
                let result = client.stop_instance(&instance_id).await;
                pb.finish_and_clear();
                match result {
                    Ok(instance) => print_instance_detail(&instance),
                    Err(e) => fail(e),
                }
            }
            InstanceCommands::Delete { instance_id } => {
                let pb = spinner("Deleting instance...");
                let result = client.delete_instance(&instance_id).await;
                pb.finish_and_clear();
                match result {
                    Ok(()) => println!(
                        "{} {}",
                        yansi::Paint::new("Deleted instance").green(),
                        instance_id
                    ),
                    Err(e) => fail(e),
                }
            }
            InstanceCommands::Stats { instance_id } => {
                match client.instance_stats(&instance_id).await {
                    Ok(stats) => print_stats_table(&stats),
                    Err(e) => fail(e),
                }
            }
            InstanceCommands::Connect { instance_id } => {
                let pb = spinner("Requesting connection...");
                let result = client.connect_instance(&instance_id).await;
                pb.finish_and_clear();
                match result {
                    Ok(conn) => {
                        println!(
                            "{} {}",
                            yansi::Paint::new("Connection URL:").green(),
                            yansi::Paint::new(&conn.connection_url).cyan().underline()
                        );
                        println!("Ticket: {}", conn.token);
                    }
                    Err(e) => fail(e),
                }
            }
        },
        Commands::CheckConfig => {
            let mut ok = true;
            if std::env::var("API_BASE_URL").unwrap_or_default().trim().is_empty() {
                eprintln!(
                    "{}",
                    yansi::Paint::new("API_BASE_URL is not configured (using localhost fallback)").yellow()
                );
                ok = false;
            }
            if !client.session().is_present() {
                println!("No stored session token; run `cloudpc auth login` to create one.");
                if ok {
                    println!("{}", yansi::Paint::new("Configuration looks valid").green());
                }
                process::exit(if ok { 0 } else { 1 });
            }
            match client.current_user().await {
                Ok(user) => {
                    println!(
                        "{}",
                        yansi::Paint::new("Configuration looks valid (session accepted)").green()
                    );
                    print_user(&user);
                    process::exit(0);
                }
                Err(e) => fail(e),
            }
        }
    }
}
