use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Turn single-file C# programs with `#:` directives into ordinary projects.",
	long_about = "runfile reads a single-file C# program, collects the `#:sdk`, `#:property` and \
	              `#:package` directives at the top of the file, and produces a project file \
	              together with the source stripped of those directives.\n\nQuick start:\n  \
	              runfile check app.cs     Report directive problems\n  runfile project app.cs   \
	              Print the generated project file\n  runfile convert app.cs   Write app/app.csproj \
	              and app/app.cs"
)]
pub struct RunfileCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Stop reporting after the first directive problem.
	#[arg(long, global = true, default_value_t = false)]
	pub fail_fast: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Check the directives of a single-file program.
	///
	/// Reports every malformed directive and every directive that appears
	/// after the first line of code. Exits with a non-zero status code when
	/// any problem is found.
	Check {
		/// Path to the `.cs` file.
		file: PathBuf,

		/// Output format for check results. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print the generated project file to stdout.
	Project {
		/// Path to the `.cs` file.
		file: PathBuf,

		/// Emit the project even when problems were found. Directives after
		/// the first line of code are dropped silently.
		#[arg(long, default_value_t = false)]
		force: bool,
	},
	/// Convert a single-file program into a project directory.
	///
	/// Writes `<stem>.csproj` and the source without its directives into the
	/// output directory, which defaults to a directory named after the file
	/// next to it.
	Convert {
		/// Path to the `.cs` file.
		file: PathBuf,

		/// Directory to write the project into.
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// Convert even when problems were found. Directives after the first
		/// line of code are left in the source and not converted.
		#[arg(long, default_value_t = false)]
		force: bool,

		/// Preview the files without writing them.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
