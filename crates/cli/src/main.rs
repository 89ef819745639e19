//! `contentrepo`: expand and record node creation commands from the command line.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use contentrepo_core::{DimensionValues, EditingSessionId, NodeId, NodeName, NodeTypeName, StreamName};
use contentrepo_infra::{EventStore, InMemoryEventStore, RepositoryConfig, StoreEventPublisher};
use contentrepo_nodes::{CreateChildNodeWithVariant, EventSequenceBuilder, InMemoryNodeTypeRegistry, NodeCommandHandler};

#[derive(Debug, Parser)]
#[command(name = "contentrepo", version, about = "Node creation commands for an event-sourced content tree")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Print the events a creation command expands to, without recording them.
    Expand(CreateArgs),
    /// Handle a creation command against an in-memory store and print the resulting stream.
    Create(CreateArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// JSON file with node type declarations.
    #[arg(long, env = "CONTENTREPO_NODE_TYPES")]
    node_types: PathBuf,

    /// Type of the node to create.
    #[arg(long = "type")]
    node_type: NodeTypeName,

    /// Name of the node to create.
    #[arg(long)]
    name: NodeName,

    /// Parent node identifier (random if omitted).
    #[arg(long)]
    parent: Option<NodeId>,

    /// Identifier of the new node (random if omitted).
    #[arg(long)]
    node_id: Option<NodeId>,

    /// Editing session identifier (random if omitted).
    #[arg(long)]
    session: Option<EditingSessionId>,

    /// Dimension value as `name=value`; repeatable.
    #[arg(long = "dimension", value_parser = parse_dimension)]
    dimensions: Vec<(String, String)>,
}

impl CreateArgs {
    fn command(&self) -> CreateChildNodeWithVariant {
        CreateChildNodeWithVariant {
            editing_session_id: self.session.unwrap_or_default(),
            parent_node_id: self.parent.unwrap_or_default(),
            node_id: self.node_id.unwrap_or_default(),
            node_name: self.name.clone(),
            node_type_name: self.node_type.clone(),
            dimension_values: self.dimensions.iter().cloned().collect::<DimensionValues>(),
        }
    }

    fn registry(&self) -> Result<InMemoryNodeTypeRegistry> {
        InMemoryNodeTypeRegistry::from_json_file(&self.node_types)
            .with_context(|| format!("loading node types from {}", self.node_types.display()))
    }
}

fn parse_dimension(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `name=value`, got `{raw}`"))?;
    if name.trim().is_empty() {
        return Err("dimension name cannot be empty".to_string());
    }
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RepositoryConfig::from_env()?;
    contentrepo_observability::init(&config.log);

    run(cli.command, &config, &mut std::io::stdout().lock())
}

fn run(command: CliCommand, config: &RepositoryConfig, out: &mut impl Write) -> Result<()> {
    match command {
        CliCommand::Expand(args) => {
            let registry = args.registry()?;
            let events = EventSequenceBuilder::new(&registry)
                .with_max_depth(config.max_auto_create_depth)
                .expand(&args.command())?;
            serde_json::to_writer_pretty(&mut *out, &events)?;
        }
        CliCommand::Create(args) => {
            let store = Arc::new(InMemoryEventStore::new());
            let handler = NodeCommandHandler::new(args.registry()?, StoreEventPublisher::new(store.clone()))
                .with_max_auto_create_depth(config.max_auto_create_depth);

            let command = args.command();
            let stream = StreamName::for_editing_session(&command.editing_session_id);
            handler.handle_create_child_node_with_variant(command)?;

            let stored = store.load_stream(&stream)?;
            tracing::info!(stream = %stream, events = stored.len(), "stream written");
            serde_json::to_writer_pretty(&mut *out, &stored)?;
        }
    }
    writeln!(out)?;
    Ok(())
}
