use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use runfile_cli::Commands;
use runfile_cli::OutputFormat;
use runfile_cli::RunfileCli;
use runfile_core::ConversionResult;
use runfile_core::ConvertOptions;
use runfile_core::DirectiveDiagnostic;
use runfile_core::RunfileConfig;
use runfile_core::RunfileError;
use runfile_core::convert;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = RunfileCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Check { file, format }) => run_check(&args, file, *format),
		Some(Commands::Project { file, force }) => run_project(&args, file, *force),
		Some(Commands::Convert {
			file,
			output,
			force,
			dry_run,
		}) => run_convert(&args, file, output.as_deref(), *force, *dry_run),
		None => {
			eprintln!("No subcommand specified. Run `runfile --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<RunfileError>() {
			Ok(runfile_err) => {
				let report: miette::Report = (*runfile_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.without_time()
		.init();
}

/// A script read from disk together with the options to convert it with.
struct LoadedScript {
	source: String,
	display_name: String,
	options: ConvertOptions,
}

fn load_script(args: &RunfileCli, file: &Path) -> Result<LoadedScript, Box<dyn std::error::Error>> {
	if !file.is_file() {
		return Err(RunfileError::InvalidInputPath {
			path: file.display().to_string(),
		}
		.into());
	}

	let source = std::fs::read_to_string(file).map_err(RunfileError::from)?;
	let root = script_dir(file);
	let config = RunfileConfig::load(&root)?;
	let mut options = ConvertOptions::from_config(config.as_ref())?;
	options.collect_all = !args.fail_fast;

	tracing::debug!(
		path = %file.display(),
		bytes = source.len(),
		config = config.is_some(),
		"loaded script"
	);

	Ok(LoadedScript {
		source,
		display_name: file_name(file),
		options,
	})
}

fn script_dir(file: &Path) -> PathBuf {
	match file.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
		_ => PathBuf::from("."),
	}
}

fn file_name(file: &Path) -> String {
	file.file_name()
		.map_or_else(|| file.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn report_diagnostics(script: &LoadedScript, result: &ConversionResult) {
	for diag in &result.diagnostics {
		let report = diagnostic_to_report(diag, &script.display_name, &script.source);
		eprintln!("{report:?}");
	}
}

fn run_check(
	args: &RunfileCli,
	file: &Path,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let script = load_script(args, file)?;
	let result = convert(&script.source, &script.options);

	match format {
		OutputFormat::Json => {
			let output = serde_json::json!({
				"ok": result.is_ok(),
				"file": script.display_name,
				"diagnostics": result.diagnostics,
			});
			println!("{output}");
		}
		OutputFormat::Text => {
			if result.is_ok() {
				println!(
					"{} {} has no directive problems.",
					colored!("Check passed:", green),
					script.display_name
				);
				if args.verbose {
					println!(
						"  sdk: {}, properties: {}, packages: {}",
						result.model.root_sdk.name,
						result.model.properties.len(),
						result.model.packages.len()
					);
				}
			} else {
				report_diagnostics(&script, &result);
				eprintln!(
					"Check failed: {} directive problem(s) in {}.",
					result.diagnostics.len(),
					script.display_name
				);
			}
		}
	}

	if !result.is_ok() {
		process::exit(1);
	}

	Ok(())
}

fn run_project(
	args: &RunfileCli,
	file: &Path,
	force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let mut script = load_script(args, file)?;
	script.options.force = force;
	let result = convert(&script.source, &script.options);
	report_diagnostics(&script, &result);

	let Some(project) = result.project else {
		return Err(RunfileError::ConversionFailed {
			count: result.diagnostics.len(),
		}
		.into());
	};

	print!("{project}");

	Ok(())
}

fn run_convert(
	args: &RunfileCli,
	file: &Path,
	output: Option<&Path>,
	force: bool,
	dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let mut script = load_script(args, file)?;
	script.options.force = force;

	let stem = file
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.ok_or_else(|| {
			RunfileError::InvalidInputPath {
				path: file.display().to_string(),
			}
		})?;
	let output_dir = output.map_or_else(|| script_dir(file).join(&stem), Path::to_path_buf);

	if is_non_empty_dir(&output_dir)? {
		return Err(RunfileError::OutputExists {
			path: output_dir.display().to_string(),
		}
		.into());
	}

	let result = convert(&script.source, &script.options);
	report_diagnostics(&script, &result);

	let (Some(project), Some(source)) = (result.project, result.source) else {
		return Err(RunfileError::ConversionFailed {
			count: result.diagnostics.len(),
		}
		.into());
	};

	let project_path = output_dir.join(format!("{stem}.csproj"));
	let source_path = output_dir.join(&script.display_name);

	if dry_run {
		println!("{}", colored!(format!("Would write {}", project_path.display()), bold));
		print!("{project}");
		println!();
		println!("{}", colored!(format!("Would write {}", source_path.display()), bold));
		print!("{source}");
		return Ok(());
	}

	std::fs::create_dir_all(&output_dir).map_err(RunfileError::from)?;
	std::fs::write(&project_path, project).map_err(RunfileError::from)?;
	std::fs::write(&source_path, source).map_err(RunfileError::from)?;

	println!(
		"Converted {} into {}",
		script.display_name,
		output_dir.display()
	);

	Ok(())
}

fn is_non_empty_dir(path: &Path) -> Result<bool, RunfileError> {
	if !path.exists() {
		return Ok(false);
	}

	if !path.is_dir() {
		return Ok(true);
	}

	Ok(std::fs::read_dir(path)?.next().is_some())
}

/// Convert a `DirectiveDiagnostic` into a `miette::Report` pointing at the
/// directive in the script.
fn diagnostic_to_report(
	diag: &DirectiveDiagnostic,
	file_name: &str,
	source: &str,
) -> miette::Report {
	let location = format!("{file_name}:{}:{}", diag.line, diag.column);
	let message = format!("[{location}] {}", diag.message());

	let mut diag_value = miette::MietteDiagnostic::new(message)
		.with_code(diag.kind.code_str())
		.with_severity(miette::Severity::Error)
		.with_label(miette::LabeledSpan::at(
			diag.offset..diag.offset + diag.length,
			"this directive",
		));

	if let Some(help) = diag.kind.help_str() {
		diag_value = diag_value.with_help(help);
	}

	miette::Report::new(diag_value)
		.with_source_code(miette::NamedSource::new(file_name, source.to_string()))
}
