use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use bump_version::bumper::VersionBumper;
use bump_version::config;
use bump_version::git::Git2Repository;
use bump_version::ui;

#[derive(clap::Parser)]
#[command(
    name = "bump-version",
    about = "Bump the project patch version when source changes are staged"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Manifest path relative to the repository root")]
    manifest: Option<String>,

    #[arg(
        short,
        long = "source-prefix",
        help = "Staged path prefix that triggers a bump (repeatable)"
    )]
    source_prefix: Vec<String>,

    #[arg(long, help = "Rewrite the manifest without re-staging it")]
    no_stage: bool,

    #[arg(long, help = "Report what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("bump-version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let git_repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let root = match git_repo.workdir() {
        Some(dir) => dir.to_path_buf(),
        None => {
            ui::display_error("Repository has no working tree");
            std::process::exit(1);
        }
    };

    let config = match config::load_config(args.config.as_deref(), &root).and_then(|cfg| {
        cfg.with_overrides(args.manifest, args.source_prefix, args.no_stage)
    }) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let bumper = VersionBumper::new(git_repo, config, root).with_dry_run(args.dry_run);

    match bumper.run() {
        Ok(outcome) => {
            ui::display_outcome(&outcome);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
