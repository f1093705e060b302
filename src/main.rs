//! devnotes: Command-line interface for the dev-notes MCP server

use anyhow::Result;
use clap::{Parser, Subcommand};
use devnotes::config::{app_config::AppConfig, path_resolver};
use devnotes::store::NoteStore;
use devnotes::tools::{dispatch, ToolRequest, ToolResponse};
use rmcp::{
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tokio::io::{stdin, stdout};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// Configuration Loading
// ============================================================================

/// Load the effective config: file (if present), then env, then CLI override
fn load_config(notes_dir_override: Option<&str>) -> Result<AppConfig> {
    let config_path = path_resolver::get_default_config_path();
    let base = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    let mut config = base.merge_with(&AppConfig::from_env());
    if let Some(dir) = notes_dir_override {
        config = config.with_notes_dir(dir);
    }
    config.validate()?;
    Ok(config)
}

/// Build a note store from the effective config
fn open_store(notes_dir_override: Option<&str>) -> Result<NoteStore> {
    let config = load_config(notes_dir_override)?;
    let notes_dir = path_resolver::resolve_path(config.notes_dir())?;
    Ok(NoteStore::new(notes_dir, config.file_prefix()))
}

// ============================================================================
// MCP Server Implementation
// ============================================================================

/// MCP server exposing the note tools
#[derive(Clone)]
struct DevNotesServer {
    store: Arc<NoteStore>,
}

/// Request parameters for save_note tool
#[derive(Debug, Deserialize, JsonSchema)]
struct SaveNoteParams {
    /// The title of the note (slugified to create the filename)
    #[serde(default)]
    title: String,
    /// The markdown content of the note
    #[serde(default)]
    content: String,
}

/// Request parameters for read_note tool
#[derive(Debug, Deserialize, JsonSchema)]
struct ReadNoteParams {
    /// The title of the note to read
    #[serde(default)]
    title: String,
}

/// Convert a dispatcher response into an MCP call result
fn to_call_tool_result(response: ToolResponse) -> CallToolResult {
    let content = vec![Content::text(response.text)];
    if response.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

#[tool(tool_box)]
impl DevNotesServer {
    fn new(store: NoteStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Save a development note
    #[tool(description = "Save a development note as a markdown file")]
    fn save_note(
        &self,
        #[tool(aggr)] params: SaveNoteParams,
    ) -> Result<CallToolResult, rmcp::Error> {
        let response = dispatch(
            &self.store,
            ToolRequest::SaveNote {
                title: params.title,
                content: params.content,
            },
        );
        Ok(to_call_tool_result(response))
    }

    /// List all saved notes
    #[tool(description = "List all saved notes with their metadata")]
    fn list_notes(&self) -> Result<CallToolResult, rmcp::Error> {
        let response = dispatch(&self.store, ToolRequest::ListNotes);
        Ok(to_call_tool_result(response))
    }

    /// Read one note
    #[tool(description = "Read the content of a specific note")]
    fn read_note(
        &self,
        #[tool(aggr)] params: ReadNoteParams,
    ) -> Result<CallToolResult, rmcp::Error> {
        let response = dispatch(
            &self.store,
            ToolRequest::ReadNote {
                title: params.title,
            },
        );
        Ok(to_call_tool_result(response))
    }
}

#[tool(tool_box)]
impl ServerHandler for DevNotesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Dev-notes server: save, list, and read markdown notes stored on disk".into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// CLI Implementation
// ============================================================================

/// devnotes: MCP server for local markdown dev notes
#[derive(Parser)]
#[command(name = "devnotes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize devnotes configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Start the MCP server on stdio
    Serve {
        /// Directory where notes are stored (default: ~/dev-notes)
        #[arg(short, long)]
        notes_dir: Option<String>,
    },
    /// Save a note from the command line (for testing)
    Save {
        /// Title of the note
        title: String,

        /// Markdown content of the note
        #[arg(short, long)]
        content: String,

        /// Directory where notes are stored
        #[arg(long)]
        notes_dir: Option<String>,
    },
    /// List saved notes
    List {
        /// Directory where notes are stored
        #[arg(long)]
        notes_dir: Option<String>,
    },
    /// Print the content of a note
    Read {
        /// Title of the note to read
        title: String,

        /// Directory where notes are stored
        #[arg(long)]
        notes_dir: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (to stderr to not interfere with MCP stdio)
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Init { force } => {
            let config_dir = path_resolver::get_config_dir();
            let config_path = config_dir.join("config.toml");

            eprintln!("Initializing devnotes configuration...");
            eprintln!("Config directory: {}", config_dir.display());

            if !config_dir.exists() {
                std::fs::create_dir_all(&config_dir)?;
                eprintln!("Created config directory");
            }

            if config_path.exists() && !force {
                eprintln!("Configuration file already exists: {}", config_path.display());
                eprintln!("Use --force to overwrite");
                return Ok(());
            }

            let default_config = AppConfig::default();
            let toml_content = default_config.to_toml()?;
            std::fs::write(&config_path, &toml_content)?;

            eprintln!("Created configuration file: {}", config_path.display());
            eprintln!("Edit {} to customize settings.", config_path.display());

            Ok(())
        }
        Commands::Serve { notes_dir } => {
            let store = open_store(notes_dir.as_deref())?;
            tracing::info!(
                "Starting MCP server with notes directory: {}",
                store.notes_dir().display()
            );
            eprintln!(
                "devnotes MCP server starting... (notes_dir: {})",
                store.notes_dir().display()
            );

            let server = DevNotesServer::new(store);

            // Serve via stdio transport
            let transport = (stdin(), stdout());
            let service = server.serve(transport).await?;
            eprintln!("devnotes MCP server started and listening for requests...");

            // Wait for service to complete
            let _quit_reason = service.waiting().await?;
            Ok(())
        }
        Commands::Save {
            title,
            content,
            notes_dir,
        } => {
            let store = open_store(notes_dir.as_deref())?;
            let response = dispatch(&store, ToolRequest::SaveNote { title, content });
            println!("{}", response.text);
            Ok(())
        }
        Commands::List { notes_dir } => {
            let store = open_store(notes_dir.as_deref())?;
            let response = dispatch(&store, ToolRequest::ListNotes);
            println!("{}", response.text);
            Ok(())
        }
        Commands::Read { title, notes_dir } => {
            let store = open_store(notes_dir.as_deref())?;
            let response = dispatch(&store, ToolRequest::ReadNote { title });
            println!("{}", response.text);
            Ok(())
        }
    }
}
