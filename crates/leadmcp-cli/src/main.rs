use clap::{Parser, Subcommand};
use leadmcp_leads::{LeadQuery, SupabaseClient, MAX_LEAD_LIMIT};
use leadmcp_router::{handlers::leads::render_leads, IncomingMessage};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "leadmcp-cli")]
#[command(about = "Route messages through the lead assistant from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Route a message end to end and print the reply
    Ask {
        /// The message, as a user would type it
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        /// Sender identifier passed through to logs
        #[arg(long)]
        user: Option<String>,
    },
    /// Print the normalized action for a message without running it
    Classify {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Query qualified leads directly, bypassing the classifier
    Leads {
        /// Partial company name
        #[arg(long)]
        company: Option<String>,
        /// Newest first
        #[arg(long)]
        latest: bool,
        /// Maximum rows (capped at 10)
        #[arg(long, default_value_t = MAX_LEAD_LIMIT)]
        limit: u32,
        /// Single day, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = leadmcp_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ask { message, user } => {
            let dispatcher =
                leadmcp_router::dispatcher_from_config(&config, CancellationToken::new())?;
            let incoming = IncomingMessage {
                user,
                message: message.join(" "),
                channel: Some("cli".to_owned()),
            };
            let reply = dispatcher.handle_message(&incoming).await?;
            println!("{reply}");
        }
        Commands::Classify { message } => {
            let dispatcher =
                leadmcp_router::dispatcher_from_config(&config, CancellationToken::new())?;
            let action = dispatcher.classify(&message.join(" ")).await?;
            println!("{}", serde_json::to_string_pretty(&action.to_descriptor())?);
        }
        Commands::Leads {
            company,
            latest,
            limit,
            date,
        } => {
            let store = SupabaseClient::new(
                &config.supabase_url,
                &config.supabase_anon_key,
                &config.supabase_leads_table,
                30,
            )?;
            let query = LeadQuery {
                limit: limit.clamp(1, MAX_LEAD_LIMIT),
                company,
                latest,
                date,
            };
            let leads = store.query_leads(&query).await?;
            println!("{}", render_leads(&leads));
        }
    }

    Ok(())
}
