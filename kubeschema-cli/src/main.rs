use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use kubeschema_catalog::{FsCatalog, SchemaCatalog, SelectionStore, select_version};
use kubeschema_cli::config::{self, CliOverrides, ConfigMerger, MergedConfig};
use kubeschema_cli::output::{
    ListFormat, ShowFormat, list_output, refs_output, show_output, versions_output,
};
use kubeschema_domain::ResolveOptions;
use kubeschema_types::SwaggerDocument;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "kubeschema",
    about = "Browse and search resolved Kubernetes swagger definitions."
)]
struct Cli {
    /// Directory holding `<version>/swagger.json` documents (default: apis/k8s).
    #[arg(long, global = true, env = "KUBESCHEMA_APIS_DIR")]
    apis_dir: Option<Utf8PathBuf>,

    /// Schema version to use instead of the saved selection.
    #[arg(long = "version", global = true, value_name = "VERSION")]
    schema_version: Option<String>,

    /// File where `use` stores the selected version (default: .kubeschema/state.json).
    #[arg(long, global = true)]
    state_file: Option<Utf8PathBuf>,

    /// Config file (default: ./kubeschema.toml if present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List available schema versions, marking the selected one.
    Versions,
    /// Remember a schema version for later commands.
    Use(UseArgs),
    /// List definition names (top-level by default).
    List(ListArgs),
    /// Show the resolved property tree of one definition.
    Show(ShowArgs),
    /// Show which definitions a definition references and is referenced by.
    Refs(RefsArgs),
}

#[derive(Debug, Parser)]
struct UseArgs {
    /// Version directory name, e.g. "1.29".
    version: String,
}

#[derive(Debug, Parser)]
struct ListArgs {
    /// Include every definition, not just top-level ones.
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Fuzzy filter applied to display names.
    #[arg(long)]
    search: Option<String>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: ListFormat,
}

#[derive(Debug, Parser)]
struct ShowArgs {
    /// Display name (core/v1/Pod) or raw definition key (io.k8s.api.core.v1.Pod).
    name: String,

    /// Keep only properties matching this fuzzy search, plus their ancestors.
    #[arg(long)]
    search: Option<String>,

    /// Maximum reference expansion depth.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Output format (text, json, markdown).
    #[arg(long, value_enum, default_value = "text")]
    format: ShowFormat,
}

#[derive(Debug, Parser)]
struct RefsArgs {
    /// Display name or raw definition key.
    name: String,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: ListFormat,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let max_depth = match &cli.cmd {
        Command::Show(args) => args.max_depth,
        _ => None,
    };
    let merged = load_merged_config(&cli, max_depth)?;
    debug!(?merged, "merged config");

    match cli.cmd {
        Command::Versions => cmd_versions(&merged),
        Command::Use(args) => cmd_use(&merged, args),
        Command::List(args) => cmd_list(&merged, args),
        Command::Show(args) => cmd_show(&merged, args),
        Command::Refs(args) => cmd_refs(&merged, args),
    }
}

fn load_merged_config(cli: &Cli, max_depth: Option<usize>) -> anyhow::Result<MergedConfig> {
    let file_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(&Utf8PathBuf::from("."))
            .context("load kubeschema.toml config")?,
    };
    Ok(ConfigMerger::new(file_config).merge(CliOverrides {
        apis_dir: cli.apis_dir.clone(),
        version: cli.schema_version.clone(),
        state_file: cli.state_file.clone(),
        max_depth,
    }))
}

fn cmd_versions(merged: &MergedConfig) -> anyhow::Result<()> {
    let catalog = FsCatalog::new(merged.apis_dir.clone());
    let available = catalog.available_versions()?;
    if available.is_empty() {
        anyhow::bail!("no schema versions found under {}", merged.apis_dir);
    }

    let saved = SelectionStore::new(merged.state_file.clone()).load();
    let selected = select_version(&available, saved.as_deref(), merged.version.as_deref()).ok();
    print!("{}", versions_output(&available, selected.as_deref()));
    Ok(())
}

fn cmd_use(merged: &MergedConfig, args: UseArgs) -> anyhow::Result<()> {
    let catalog = FsCatalog::new(merged.apis_dir.clone());
    let available = catalog.available_versions()?;
    let version = select_version(&available, None, Some(args.version.as_str()))?;

    SelectionStore::new(merged.state_file.clone())
        .save(&version)
        .with_context(|| format!("save selection to {}", merged.state_file))?;
    info!(version = %version, "selected schema version");
    println!("using version {}", version);
    Ok(())
}

fn cmd_list(merged: &MergedConfig, args: ListArgs) -> anyhow::Result<()> {
    let doc = load_selected(merged)?;
    print!(
        "{}",
        list_output(&doc.definitions, args.all, args.search.as_deref(), args.format)?
    );
    Ok(())
}

fn cmd_show(merged: &MergedConfig, args: ShowArgs) -> anyhow::Result<()> {
    let doc = load_selected(merged)?;
    let options = ResolveOptions {
        max_depth: merged.max_depth,
    };
    print!(
        "{}",
        show_output(
            &doc.definitions,
            &args.name,
            args.search.as_deref(),
            options,
            args.format
        )?
    );
    Ok(())
}

fn cmd_refs(merged: &MergedConfig, args: RefsArgs) -> anyhow::Result<()> {
    let doc = load_selected(merged)?;
    print!("{}", refs_output(&doc.definitions, &args.name, args.format)?);
    Ok(())
}

/// Load the document for the requested, saved, or newest version (in that order).
fn load_selected(merged: &MergedConfig) -> anyhow::Result<SwaggerDocument> {
    let catalog = FsCatalog::new(merged.apis_dir.clone());
    let available = catalog.available_versions()?;
    let saved = SelectionStore::new(merged.state_file.clone()).load();
    let version = select_version(&available, saved.as_deref(), merged.version.as_deref())
        .with_context(|| format!("select schema version under {}", merged.apis_dir))?;

    debug!(version = %version, "loading schema document");
    let doc = catalog
        .load_version(&version)
        .with_context(|| format!("load schema version {}", version))?;
    debug!(definitions = doc.definitions.len(), "loaded schema document");
    Ok(doc)
}
