mod scenario;

use anyhow::Context;
use buildprobe_driver::ToolCommand;
use buildprobe_manifest::{find_manifest, load_manifest};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use scenario::{load_scenario, materializer_for};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "buildprobe",
    version,
    about = "Materializes project fixtures and drives an external build tool against them."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a scenario's project tree to disk without building it.
    Materialize(MaterializeArgs),
    /// Materialize a scenario, run the build tool, and check expectations.
    Run(RunArgs),
    /// Verify a dependency manifest has a non-empty compile-libraries list.
    CheckManifest(CheckManifestArgs),
}

#[derive(Debug, Parser)]
struct MaterializeArgs {
    /// Scenario file (TOML).
    #[arg(long)]
    scenario: Utf8PathBuf,

    /// Directory to materialize into (default: ./fixtures).
    #[arg(long, default_value = "fixtures")]
    out: Utf8PathBuf,

    /// Materialize into a uuid-suffixed subdirectory so runs never collide.
    #[arg(long, default_value_t = false)]
    unique: bool,
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Scenario file (TOML).
    #[arg(long)]
    scenario: Utf8PathBuf,

    /// Directory to materialize into (default: ./fixtures).
    #[arg(long, default_value = "fixtures")]
    out: Utf8PathBuf,

    /// Materialize into a uuid-suffixed subdirectory so runs never collide.
    #[arg(long, default_value_t = false)]
    unique: bool,

    /// Path to the build tool binary. Always explicit, never discovered.
    #[arg(long)]
    tool: Utf8PathBuf,

    /// Extra arguments passed to the tool after the project directory.
    #[arg(long = "tool-arg")]
    tool_args: Vec<String>,

    /// Environment overrides for the tool, as NAME=VALUE.
    #[arg(long = "env")]
    envs: Vec<String>,

    /// Fail (exit 2) unless captured stdout contains this substring.
    #[arg(long = "expect-stdout")]
    expect_stdout: Vec<String>,

    /// Fail (exit 2) if captured stdout contains this substring.
    #[arg(long = "deny-stdout")]
    deny_stdout: Vec<String>,

    /// After a passing build, locate the dependency manifest under the
    /// entry project and require a non-empty compile-libraries list.
    #[arg(long, default_value_t = false)]
    check_manifest: bool,
}

#[derive(Debug, Parser)]
struct CheckManifestArgs {
    /// Manifest file to check. Mutually exclusive with --output-dir.
    #[arg(long, conflicts_with = "output_dir")]
    path: Option<Utf8PathBuf>,

    /// Build output directory to search for a *.deps.json manifest.
    #[arg(long)]
    output_dir: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Materialize(args) => cmd_materialize(args),
        Command::Run(args) => cmd_run(args),
        Command::CheckManifest(args) => cmd_check_manifest(args),
    }
}

fn cmd_materialize(args: MaterializeArgs) -> anyhow::Result<ExitCode> {
    let scenario = load_scenario(&args.scenario)?;
    let fixture = materializer_for(&scenario, args.out, args.unique)?
        .materialize(&scenario.fixture)
        .context("materialize fixture")?;

    info!(root = %fixture.root, "fixture materialized");
    println!("{}", fixture.root);
    for name in fixture.materialization_order() {
        debug!(project = %name, "materialized");
    }
    Ok(ExitCode::from(0))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<ExitCode> {
    let scenario = load_scenario(&args.scenario)?;
    let fixture = materializer_for(&scenario, args.out, args.unique)?
        .materialize(&scenario.fixture)
        .context("materialize fixture")?;

    let entry = scenario
        .fixture
        .entry_name()
        .context("scenario has no projects")?;
    let entry_dir = fixture
        .project_dir(entry)
        .context("entry project not materialized")?;

    let mut command = ToolCommand::new(args.tool, fixture.root.clone())
        .arg(entry_dir.as_str())
        .args(args.tool_args)
        .capture_stdout()
        .capture_stderr();
    for pair in &args.envs {
        let (name, value) = parse_env_override(pair)?;
        command = command.env(name, value);
    }

    let result = command.execute().context("launch build tool")?;

    if let Some(stdout) = &result.stdout {
        print!("{stdout}");
    }
    if let Some(stderr) = &result.stderr {
        eprint!("{stderr}");
    }

    if !result.success() {
        eprintln!("build failed with exit code {:?}", result.exit_code);
        return Ok(ExitCode::from(2));
    }

    for needle in &args.expect_stdout {
        if !result.stdout_contains(needle) {
            eprintln!("expected stdout to contain {needle:?}");
            return Ok(ExitCode::from(2));
        }
    }
    for needle in &args.deny_stdout {
        if !result.stdout_lacks(needle) {
            eprintln!("expected stdout not to contain {needle:?}");
            return Ok(ExitCode::from(2));
        }
    }

    if args.check_manifest {
        return check_manifest_under(entry_dir.to_path_buf());
    }

    Ok(ExitCode::from(0))
}

fn cmd_check_manifest(args: CheckManifestArgs) -> anyhow::Result<ExitCode> {
    let path = match (args.path, args.output_dir) {
        (Some(path), _) => path,
        (None, Some(dir)) => return check_manifest_under(dir),
        (None, None) => anyhow::bail!("one of --path or --output-dir is required"),
    };
    verdict_for(&path)
}

fn check_manifest_under(dir: Utf8PathBuf) -> anyhow::Result<ExitCode> {
    match find_manifest(&dir)? {
        Some(path) => verdict_for(&path),
        None => {
            eprintln!("no dependency manifest found under {dir}");
            Ok(ExitCode::from(2))
        }
    }
}

fn verdict_for(path: &Utf8Path) -> anyhow::Result<ExitCode> {
    let manifest = load_manifest(path).with_context(|| format!("load manifest {path}"))?;
    if manifest.compile_libraries.is_empty() {
        eprintln!("{path}: compile-libraries list is empty");
        return Ok(ExitCode::from(2));
    }
    println!(
        "{path}: {} compile-time libraries",
        manifest.compile_libraries.len()
    );
    Ok(ExitCode::from(0))
}

fn parse_env_override(pair: &str) -> anyhow::Result<(&str, &str)> {
    let (name, value) = pair
        .split_once('=')
        .with_context(|| format!("env override {pair:?}: missing '='"))?;
    if name.is_empty() {
        anyhow::bail!("env override {pair:?}: missing name");
    }
    Ok((name, value))
}
