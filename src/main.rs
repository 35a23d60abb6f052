//! Inspection tool for a shim installation
//!
//! Resolves the storage layout and resolution target the shim would use
//! for a given launch, without loading the engine.
//!
//! ```text
//! render-shim --version 1.21.0 [--install-path DIR] [--version-dir NAME]
//!             [--isolated] [--installed] [--settings FILE] [--display WxH]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use render_shim::config::{SettingsError, SettingsStore, ShimSettings};
use render_shim::domain::{
    InstallationContext, LaunchError, LaunchParams, Size, StorageKind, SurfaceTarget, TargetError,
};
use render_shim::domain::core::requires_enforcement;
use render_shim::logging;
use render_shim::platform::{DisplayError, DisplayMetrics, FixedDisplay, PathRedirector};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[cfg(not(windows))]
    #[error("--display WxH is required on this platform")]
    NoSystemDisplay,

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error(transparent)]
    Target(#[from] TargetError),
}

#[derive(Parser, Debug)]
#[command(about = "Inspect the storage layout and resolution target of a shim launch")]
struct Args {
    /// Installed version directory; the override root when isolated
    #[arg(long, value_name = "DIR")]
    install_path: Option<String>,

    /// Version identifier, e.g. 1.21.0
    #[arg(long = "version", value_name = "VERSION")]
    version_code: Option<String>,

    /// Name of the version directory in the launcher's store
    #[arg(long, value_name = "NAME")]
    version_dir: Option<String>,

    /// Enable per-version storage isolation
    #[arg(long)]
    isolated: bool,

    /// Treat the isolated version as fully installed
    #[arg(long)]
    installed: bool,

    /// Settings JSON file (defaults when omitted or missing)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Display size in real pixels, e.g. 1920x1080
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    display: Option<Size>,
}

impl Args {
    fn launch_params(&self) -> LaunchParams {
        LaunchParams {
            install_path: self.install_path.clone(),
            version_code: self.version_code.clone(),
            version_dir_name: self.version_dir.clone(),
            installed: self.installed,
            isolation: self.isolated,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let settings = match &args.settings {
        Some(path) => ShimSettings::load(path)?,
        None => ShimSettings::default(),
    };
    logging::init(settings.debug_logging);
    debug!("Settings: {:?}", settings);

    let context = InstallationContext::from_launch(&args.launch_params(), &settings.package_id)?;
    info!(
        "Version {} in {} (installed: {})",
        context.version_label(),
        context.version_dir(),
        context.installed()
    );

    let redirector = PathRedirector::new(context, settings.engine_namespace.as_str());
    println!("Storage:");
    for kind in [
        StorageKind::Files,
        StorageKind::Data,
        StorageKind::ExternalFiles(None),
        StorageKind::Database("<name>".to_string()),
        StorageKind::Cache,
    ] {
        match redirector.redirected(&kind) {
            Some(path) => println!("  {:<16} {}", kind, path.display()),
            None => println!("  {:<16} (host default)", kind),
        }
    }

    let scale = settings.render_scale();
    if !requires_enforcement(scale) {
        println!("Resolution: native (scale {scale})");
        return Ok(());
    }

    let display = display_for(args.display)?;
    let target = SurfaceTarget::compute(display.real_size()?, scale)?;
    println!(
        "Resolution: {} at scale {} (stretch {:.3})",
        target.size, scale, target.stretch
    );
    Ok(())
}

fn display_for(size: Option<Size>) -> Result<Box<dyn DisplayMetrics>, CliError> {
    if let Some(size) = size {
        return Ok(Box::new(FixedDisplay::new(size)));
    }
    system_display()
}

#[cfg(windows)]
fn system_display() -> Result<Box<dyn DisplayMetrics>, CliError> {
    Ok(Box::new(render_shim::platform::SystemDisplay::new()))
}

#[cfg(not(windows))]
fn system_display() -> Result<Box<dyn DisplayMetrics>, CliError> {
    Err(CliError::NoSystemDisplay)
}

fn parse_size(text: &str) -> Result<Size, String> {
    let invalid = || format!("invalid display size `{text}`, expected WxH");
    let (w, h) = text.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = w.trim().parse().map_err(|_| invalid())?;
    let height = h.trim().parse().map_err(|_| invalid())?;
    Ok(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "render-shim",
            "--install-path",
            "/data/versions/1.21",
            "--version",
            "1.21.0",
            "--isolated",
            "--display",
            "1920x1080",
        ])
        .unwrap();
        let params = args.launch_params();
        assert_eq!(params.install_path.as_deref(), Some("/data/versions/1.21"));
        assert_eq!(params.version_code.as_deref(), Some("1.21.0"));
        assert!(params.isolation);
        assert!(!params.installed);
        assert_eq!(args.display, Some(Size::new(1920, 1080)));
    }

    #[test]
    fn rejects_unknown_and_incomplete_flags() {
        assert!(Args::try_parse_from(["render-shim", "--bogus"]).is_err());
        assert!(Args::try_parse_from(["render-shim", "--version"]).is_err());
        assert!(Args::try_parse_from(["render-shim", "--display", "1920"]).is_err());
    }

    #[test]
    fn display_size_accepts_either_separator_case() {
        assert_eq!(parse_size("1280X720"), Ok(Size::new(1280, 720)));
        assert!(parse_size("wide").is_err());
    }
}
