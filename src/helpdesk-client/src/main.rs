// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};

use helpdesk_app::{env_value, init_logging, ConfigFile};
use helpdesk_core::{
    require_auth, require_role, DynResult, FileTokenStore, GuardDecision, SessionState,
    UserIdentity, UserRole,
};
use helpdesk_protocol::tickets::{CreateTicket, NewTicketMessage, TicketFilter};
use helpdesk_protocol::users::{CreateUser, UpdateUser, UserFilter};
use helpdesk_protocol::{DateRange, Paginated, TicketCategory, TicketPriority, TicketStatus};

use helpdesk_client::config::{validate_base_url, BASE_URL_ENV};
use helpdesk_client::services::{analytics, auth, tickets, users};
use helpdesk_client::{ApiClient, ClientConfig, ReqwestTransport, SessionController};

const PKG_DESCRIPTION: &str = concat!(env!("CARGO_PKG_NAME"), " - helpdesk API client");
const PASSWORD_ENV: &str = "HELPDESK_PASSWORD";

#[derive(Debug, Parser)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = PKG_DESCRIPTION,
)]
struct Cli {
    /// Path to configuration file
    #[arg(long = "config", short = 'C', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print example configuration and exit
    #[arg(long = "print-config")]
    print_config: bool,
    /// API base URL (e.g. http://localhost:8000/api/v1)
    #[arg(short = 'u', long = "base-url")]
    base_url: Option<String>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log-level")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the session tokens
    Login {
        #[arg(long)]
        email: String,
        /// Password; read from HELPDESK_PASSWORD when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and forget the stored tokens
    Logout,
    /// Request a password reset link by email
    PasswordReset {
        #[arg(long)]
        email: String,
    },
    /// Show the signed-in user
    Whoami,
    /// Ticket operations
    #[command(subcommand)]
    Tickets(TicketCommand),
    /// User administration
    #[command(subcommand)]
    Users(UserCommand),
    /// Analytics reports
    Analytics {
        #[arg(value_enum)]
        report: Report,
        /// First day of the window (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day of the window (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}

#[derive(Debug, Subcommand)]
enum TicketCommand {
    /// List tickets visible to the current user
    List(TicketListArgs),
    /// Show one ticket
    Show { id: String },
    /// Open a new ticket
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "MEDIUM")]
        priority: TicketPriority,
        #[arg(long, default_value = "GENERAL")]
        category: TicketCategory,
    },
    /// Cancel a ticket
    Cancel { id: String },
    /// Show the ticket history
    Events { id: String },
    /// Show the ticket conversation
    Messages { id: String },
    /// Post a message on a ticket
    Reply {
        id: String,
        #[arg(long)]
        message: String,
        /// Staff-only note
        #[arg(long)]
        internal: bool,
    },
    /// Assign a ticket (omit --to to unassign)
    Assign {
        id: String,
        #[arg(long = "to")]
        assignee: Option<String>,
    },
    /// Change the ticket status
    Status { id: String, status: TicketStatus },
}

#[derive(Debug, Args)]
struct TicketListArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    status: Option<TicketStatus>,
    #[arg(long)]
    priority: Option<TicketPriority>,
    #[arg(long)]
    category: Option<TicketCategory>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    assigned_to: Option<String>,
    #[arg(long)]
    created_by: Option<String>,
    #[arg(long)]
    ordering: Option<String>,
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// List users
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        role: Option<UserRole>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Create a user account
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, default_value = "USER")]
        role: UserRole,
        /// Initial password; the backend generates an unusable one when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Change fields of a user account
    Update {
        id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        role: Option<UserRole>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Deactivate a user account
    Deactivate { id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Report {
    ByStatus,
    ByPeriod,
    ByModerator,
    ResponseTime,
    ResolutionTime,
}

/// Who may run a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    Authenticated,
    Roles(&'static [UserRole]),
}

impl Command {
    fn access(&self) -> Access {
        match self {
            Command::Login { .. } | Command::PasswordReset { .. } => Access::Public,
            Command::Logout | Command::Whoami => Access::Authenticated,
            Command::Tickets(TicketCommand::Assign { .. } | TicketCommand::Status { .. }) => {
                Access::Roles(UserRole::STAFF)
            }
            Command::Tickets(_) => Access::Authenticated,
            Command::Users(_) => Access::Roles(UserRole::ADMINS),
            Command::Analytics { .. } => Access::Roles(UserRole::STAFF),
        }
    }
}

fn check_access(access: Access, state: &SessionState) -> DynResult<()> {
    let decision = match access {
        Access::Public => GuardDecision::Allow,
        Access::Authenticated => require_auth(state),
        Access::Roles(roles) => require_role(state, roles),
    };
    match decision {
        GuardDecision::Allow => Ok(()),
        GuardDecision::Pending => Err("session is still being resolved".into()),
        GuardDecision::RedirectToLogin => Err("not signed in; run `helpdesk login`".into()),
        GuardDecision::Forbidden => Err("your role is not allowed to run this command".into()),
    }
}

fn print_json<T: Serialize>(value: &T) -> DynResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_page<T: Serialize>(page: &Paginated<T>, current: Option<u32>) -> DynResult<()> {
    print_json(page)?;
    if page.has_next() {
        info!(
            "{} results in total; use --page {} for more",
            page.count,
            current.unwrap_or(1) + 1
        );
    }
    Ok(())
}

/// `whoami` output: the identity plus what it unlocks.
#[derive(Debug, Serialize)]
struct WhoAmI {
    display_name: String,
    can_moderate: bool,
    is_admin: bool,
    user: UserIdentity,
}

impl WhoAmI {
    fn new(user: UserIdentity) -> Self {
        Self {
            display_name: user.display_name().to_string(),
            can_moderate: user.role.can_moderate(),
            is_admin: user.role.is_admin(),
            user,
        }
    }
}

fn main() -> DynResult<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", ClientConfig::example_toml());
        return Ok(());
    }

    let (cfg, config_path) = if let Some(ref path) = cli.config {
        (ClientConfig::load_from_file(path)?, Some(path.clone()))
    } else {
        <ClientConfig as ConfigFile>::load_from_default_paths()?
    };
    cfg.validate()
        .map_err(|e| format!("Invalid client configuration: {}", e))?;

    let log_level = cli.log_level.as_deref().or(cfg.general.log_level.as_deref());
    init_logging(log_level);

    if let Some(ref path) = config_path {
        info!("Loaded configuration from {}", path.display());
    }

    let Some(command) = cli.command else {
        return Err("no command given; see `helpdesk --help`".into());
    };

    let base_url = cfg.resolve_base_url(cli.base_url.as_deref(), env_value(BASE_URL_ENV));
    validate_base_url("base URL", &base_url)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(cfg, base_url, command))
}

async fn run(cfg: ClientConfig, base_url: String, command: Command) -> DynResult<()> {
    let token_path = cfg
        .storage
        .token_path
        .clone()
        .unwrap_or_else(FileTokenStore::default_path);
    debug!("Token store at {}", token_path.display());

    let transport = Arc::new(ReqwestTransport::new(&base_url, cfg.timeout())?);
    let tokens = Arc::new(FileTokenStore::open(&token_path));
    let session = SessionController::new(Arc::new(ApiClient::new(transport, tokens)));
    let api = session.api();

    let access = command.access();
    if access != Access::Public {
        session.initialize().await;
        check_access(access, &session.state())?;
    }

    match command {
        Command::Login { email, password } => {
            let password = password
                .or_else(|| env_value(PASSWORD_ENV))
                .ok_or_else(|| format!("no password given (use --password or {PASSWORD_ENV})"))?;
            let user = session.login(&email, &password).await?;
            info!("Signed in as {}", user.display_name());
            print_json(&WhoAmI::new(user))
        }
        Command::PasswordReset { email } => {
            print_json(&auth::request_password_reset(api, &email).await?)
        }
        Command::Logout => {
            session.logout().await;
            Ok(())
        }
        Command::Whoami => {
            let user = session.user().ok_or("not signed in")?;
            print_json(&WhoAmI::new(user))
        }
        Command::Tickets(cmd) => run_tickets(api, cmd).await,
        Command::Users(cmd) => run_users(api, cmd).await,
        Command::Analytics { report, start, end } => {
            let range = DateRange::new(start, end)?;
            match report {
                Report::ByStatus => print_json(&analytics::tickets_by_status(api, &range).await?),
                Report::ByPeriod => print_json(&analytics::tickets_by_period(api, &range).await?),
                Report::ByModerator => {
                    print_json(&analytics::tickets_by_moderator(api, &range).await?)
                }
                Report::ResponseTime => {
                    if !range.is_empty() {
                        debug!("response-time report ignores --start/--end");
                    }
                    print_json(&analytics::average_response_time(api).await?)
                }
                Report::ResolutionTime => {
                    print_json(&analytics::average_resolution_time(api, &range).await?)
                }
            }
        }
    }
}

async fn run_tickets(api: &ApiClient, cmd: TicketCommand) -> DynResult<()> {
    match cmd {
        TicketCommand::List(args) => {
            let filter = TicketFilter {
                page: args.page,
                status: args.status,
                priority: args.priority,
                category: args.category,
                assigned_to: args.assigned_to,
                created_by: args.created_by,
                search: args.search,
                ordering: args.ordering,
            };
            print_page(&tickets::list(api, &filter).await?, filter.page)
        }
        TicketCommand::Show { id } => print_json(&tickets::get(api, &id).await?),
        TicketCommand::Create {
            title,
            description,
            priority,
            category,
        } => {
            let ticket = CreateTicket {
                title,
                description,
                priority,
                category,
            };
            print_json(&tickets::create(api, &ticket).await?)
        }
        TicketCommand::Cancel { id } => print_json(&tickets::cancel(api, &id).await?),
        TicketCommand::Events { id } => print_json(&tickets::events(api, &id).await?),
        TicketCommand::Messages { id } => print_json(&tickets::messages(api, &id).await?),
        TicketCommand::Reply {
            id,
            message,
            internal,
        } => {
            let message = NewTicketMessage {
                ticket: id,
                message,
                is_internal: internal,
            };
            print_json(&tickets::add_message(api, &message).await?)
        }
        TicketCommand::Assign { id, assignee } => {
            print_json(&tickets::assign(api, &id, assignee.as_deref()).await?)
        }
        TicketCommand::Status { id, status } => {
            print_json(&tickets::change_status(api, &id, status).await?)
        }
    }
}

async fn run_users(api: &ApiClient, cmd: UserCommand) -> DynResult<()> {
    match cmd {
        UserCommand::List {
            page,
            search,
            role,
            active,
        } => {
            let filter = UserFilter {
                page,
                search,
                role,
                is_active: active,
            };
            print_page(&users::list(api, &filter).await?, page)
        }
        UserCommand::Create {
            email,
            first_name,
            last_name,
            role,
            password,
            active,
        } => {
            let new_user = CreateUser {
                email,
                first_name,
                last_name,
                role,
                password,
                is_active: active,
            };
            print_json(&users::create(api, &new_user).await?)
        }
        UserCommand::Update {
            id,
            first_name,
            last_name,
            role,
            password,
            active,
        } => {
            let changes = UpdateUser {
                first_name,
                last_name,
                role,
                password,
                is_active: active,
            };
            print_json(&users::update(api, &id, &changes).await?)
        }
        UserCommand::Deactivate { id } => {
            users::deactivate(api, &id).await?;
            info!("User {} deactivated", id);
            Ok(())
        }
    }
}
