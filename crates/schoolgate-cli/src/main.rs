use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use dotenvy::dotenv;
use schoolgate_authz::{Action, ResourceKind};
use schoolgate_cli::commands::{self, CheckRequest, Decision};
use schoolgate_config::AuthzConfig;
use schoolgate_db::PgPool;
use schoolgate_models::{Role, UserId};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "schoolgate-cli")]
#[command(about = "Schoolgate CLI - Role groups and access checks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the bundled database migrations
    Migrate,
    /// Create the four role groups and synchronise their capabilities
    SetupGroups,
    /// Move a user into exactly one role group
    AssignRole {
        /// User id
        #[arg(short = 'u', long)]
        user: Option<Uuid>,

        /// Role tag: admin, teacher, student or parent (prompted if not provided)
        #[arg(short = 'r', long)]
        role: Option<String>,
    },
    /// Evaluate an authorization decision and print ALLOW or DENY
    Check {
        /// User id
        #[arg(short = 'u', long)]
        user: Uuid,

        /// Resource kind, e.g. student, attendance, grade
        #[arg(long, value_parser = parse_resource)]
        resource: ResourceKind,

        /// read or write
        #[arg(short = 'a', long, value_parser = parse_action)]
        action: Action,

        /// Id of the target record; omit for the role-only check
        #[arg(long)]
        record: Option<Uuid>,

        /// Print the recorded decision counters afterwards
        #[arg(long)]
        show_metrics: bool,
    },
}

fn parse_resource(raw: &str) -> Result<ResourceKind, String> {
    raw.parse().map_err(|e: schoolgate_core::AppError| e.error.to_string())
}

fn parse_action(raw: &str) -> Result<Action, String> {
    raw.parse().map_err(|e: schoolgate_core::AppError| e.error.to_string())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    schoolgate_observability::init_tracing();

    let cli = Cli::parse();

    let pool = match schoolgate_db::init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::SetupGroups => handle_setup_groups(&pool).await,
        Commands::AssignRole { user, role } => handle_assign_role(&pool, user, role).await,
        Commands::Check {
            user,
            resource,
            action,
            record,
            show_metrics,
        } => {
            let request = CheckRequest {
                user: UserId::from(user),
                resource,
                action,
                record,
            };
            handle_check(&pool, request, show_metrics).await
        }
    }
}

async fn handle_migrate(pool: &PgPool) {
    match schoolgate_db::run_migrations(pool).await {
        Ok(_) => println!("✅ Migrations applied"),
        Err(e) => {
            eprintln!("\n❌ Error applying migrations: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_setup_groups(pool: &PgPool) {
    match commands::setup_groups(pool).await {
        Ok(summary) => {
            println!("✅ Role groups synchronised");
            for (role, grants) in summary {
                println!("   {} ({} capabilities)", role.group_name(), grants);
            }
        }
        Err(e) => {
            eprintln!("\n❌ Error setting up groups: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_assign_role(pool: &PgPool, user: Option<Uuid>, role: Option<String>) {
    let user = match user {
        Some(user) => user,
        None => match Input::<Uuid>::new().with_prompt("User id").interact_text() {
            Ok(user) => user,
            Err(e) => {
                eprintln!("❌ Failed to read user id: {}", e);
                std::process::exit(1);
            }
        },
    };

    let role = match role {
        Some(role) => role,
        None => {
            let tags: Vec<&str> = Role::ALL.iter().map(Role::tag).collect();
            match Select::new()
                .with_prompt("Role")
                .items(&tags)
                .default(0)
                .interact()
            {
                Ok(index) => tags[index].to_string(),
                Err(e) => {
                    eprintln!("❌ Failed to read role: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match commands::assign(pool, UserId::from(user), &role).await {
        Ok(_) => {
            println!("\n✅ Role assigned");
            println!("   User: {}", user);
            println!("   Role: {}", role);
        }
        Err(e) => {
            eprintln!("\n❌ Error assigning role: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_check(pool: &PgPool, request: CheckRequest, show_metrics: bool) {
    let handle = if show_metrics && schoolgate_observability::is_metrics_enabled() {
        schoolgate_observability::init_metrics().ok()
    } else {
        None
    };

    match commands::check(pool, &AuthzConfig::from_env(), request).await {
        Ok(decision) => {
            println!("{}", decision);
            if let Some(handle) = handle {
                println!("\n{}", handle.render());
            }
            if decision == Decision::Deny {
                std::process::exit(2);
            }
        }
        Err(e) => {
            eprintln!("\n❌ Error checking access: {}", e);
            std::process::exit(1);
        }
    }
}
