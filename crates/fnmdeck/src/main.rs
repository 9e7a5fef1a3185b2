mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use fnmdeck_backend::{FnmBridge, NodeVersion};
use fnmdeck_fnm::{FnmCli, detect_fnm};
use fnmdeck_store::{MIRROR_PRESETS, SettingsStore, VersionSource, VersionStore};

#[derive(Parser)]
#[command(name = "fnmdeck", about = "Inspect and drive fnm from the command line")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List installed versions, newest first
    List {
        /// Only LTS versions
        #[arg(long)]
        lts: bool,
        /// Match against name, LTS codename, or alias
        #[arg(long)]
        keyword: Option<String>,
    },
    /// List versions available for install
    Remote {
        /// Only LTS versions
        #[arg(long)]
        lts: bool,
        /// Match against name or LTS codename
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Install a version
    Install { version: String },
    /// Uninstall a version
    Uninstall { version: String },
    /// Switch the active version
    Use { version: String },
    /// Set the system-wide default version
    Default { version: String },
    /// Open the installation directory of a version
    Open { version: String },
    /// Show the fnm environment snapshot
    Env,
    /// Report fnm detection diagnostics
    Doctor,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    log::debug!("fnmdeck {} starting", env!("CARGO_PKG_VERSION"));

    if run(cli.command).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(command: Command) -> bool {
    let detection = detect_fnm().await;

    if let Command::Doctor = command {
        return print_doctor(&detection).await;
    }

    let Some(path) = detection.path.clone() else {
        eprintln!(
            "fnm executable not found; install it from https://github.com/Schniz/fnm and retry"
        );
        return false;
    };

    let mut bridge = FnmCli::new(path);
    if let Some(dir) = detection.fnm_dir.clone() {
        bridge = bridge.with_fnm_dir(dir);
    }
    let bridge: Arc<dyn FnmBridge> = Arc::new(bridge);

    match command {
        Command::List { lts, keyword } => {
            let mut store = VersionStore::new(bridge);
            store.fetch_installed().await;
            if let Some(error) = store.error() {
                eprintln!("error: {error}");
                return false;
            }
            print_versions(
                &store.filtered(VersionSource::Installed, lts, keyword.as_deref()),
                false,
            );
            true
        }
        Command::Remote { lts, keyword } => {
            let mut store = VersionStore::new(bridge);
            // Installed first so the remote join can mark what is present.
            store.fetch_installed().await;
            store.fetch_remote(lts).await;
            if let Some(error) = store.error() {
                eprintln!("error: {error}");
                return false;
            }
            print_versions(
                &store.filtered(VersionSource::Remote, lts, keyword.as_deref()),
                true,
            );
            true
        }
        Command::Install { version } => {
            let mut store = VersionStore::new(bridge);
            report(store.install(&version).await, &store, "installed", &version)
        }
        Command::Uninstall { version } => {
            let mut store = VersionStore::new(bridge);
            report(
                store.uninstall(&version).await,
                &store,
                "uninstalled",
                &version,
            )
        }
        Command::Use { version } => {
            let mut store = VersionStore::new(bridge);
            report(
                store.use_version(&version).await,
                &store,
                "switched to",
                &version,
            )
        }
        Command::Default { version } => {
            let mut store = VersionStore::new(bridge);
            report(
                store.set_default(&version).await,
                &store,
                "set default to",
                &version,
            )
        }
        Command::Open { version } => {
            let mut store = VersionStore::new(bridge);
            report(
                store.open_version_directory(&version).await,
                &store,
                "opened directory of",
                &version,
            )
        }
        Command::Env => print_env(bridge).await,
        Command::Doctor => unreachable!("handled above"),
    }
}

fn report(ok: bool, store: &VersionStore, action: &str, version: &str) -> bool {
    if ok {
        println!("{action} {version}");
    } else if let Some(error) = store.error() {
        eprintln!("error: {error}");
    }
    ok
}

fn print_versions(versions: &[NodeVersion], mark_installed: bool) {
    for version in versions {
        let marker = if version.is_current { '*' } else { ' ' };
        let mut line = format!("{marker} {}", version.name);
        if version.is_default {
            line.push_str(" default");
        }
        if let Some(lts_name) = &version.lts_name {
            line.push_str(&format!(" ({lts_name})"));
        }
        for alias in &version.aliases {
            line.push(' ');
            line.push_str(alias);
        }
        if mark_installed && version.is_installed {
            line.push_str(" [installed]");
        }
        println!("{line}");
    }
}

async fn print_env(bridge: Arc<dyn FnmBridge>) -> bool {
    let mut store = SettingsStore::new(bridge);
    store.load().await;
    if let Some(error) = store.error() {
        eprintln!("error: {error}");
        return false;
    }

    let env = store.env();
    let mirror_label = MIRROR_PRESETS
        .iter()
        .find(|preset| preset.url == env.node_dist_mirror)
        .map(|preset| format!(" ({})", preset.label))
        .unwrap_or_default();

    println!("fnm dir:               {}", env.fnm_dir);
    println!(
        "node dist mirror:      {}{mirror_label}",
        env.node_dist_mirror
    );
    println!("version file strategy: {}", env.version_file_strategy);
    println!("corepack enabled:      {}", env.corepack_enabled);
    println!("resolve engines:       {}", env.resolve_engines);
    println!("arch:                  {}", env.arch);
    println!("log level:             {}", env.loglevel);
    true
}

async fn print_doctor(detection: &fnmdeck_fnm::FnmDetection) -> bool {
    println!("found:   {}", detection.found);
    if let Some(path) = &detection.path {
        println!("path:    {}", path.display());
    }
    if let Some(version) = &detection.version {
        println!("version: {version}");
    }
    println!("in PATH: {}", detection.in_path);
    if let Some(fnm_dir) = &detection.fnm_dir {
        println!("fnm dir: {}", fnm_dir.display());
    }

    if let Some(path) = detection.path.clone() {
        let bridge: Arc<dyn FnmBridge> = Arc::new(FnmCli::new(path));
        let store = SettingsStore::new(bridge);
        let dir = store.fnm_dir().await;
        if !dir.is_empty() {
            println!("env dir: {dir}");
        }
    }

    detection.found
}
