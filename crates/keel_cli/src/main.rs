use std::fmt::Display;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use keel::Namespace;
use keel_cli::GenerateOptions;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use owo_colors::Style;

#[derive(Parser, Debug)]
#[command(name = "keel", version, about = "Generate typed clients for keel programs")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Generate a Rust client from a program schema.
	Generate {
		/// Schema JSON file.
		#[arg(short, long, conflicts_with = "schema_dir", required_unless_present = "schema_dir")]
		schema: Option<PathBuf>,

		/// Directory of schema JSON files. Every `*.json` below it is
		/// generated.
		#[arg(long, requires = "output_dir")]
		schema_dir: Option<PathBuf>,

		/// Output file. Writes to stdout when omitted.
		#[arg(short, long, conflicts_with = "schema_dir")]
		output: Option<PathBuf>,

		/// Output directory used with `--schema-dir`.
		#[arg(long)]
		output_dir: Option<PathBuf>,

		/// Override the program name from the schema.
		#[arg(short, long)]
		name: Option<String>,

		/// Path through which the generated code reaches the keel runtime.
		#[arg(long, default_value = keel_cli::DEFAULT_RUNTIME_CRATE)]
		runtime_crate: String,

		/// Skip the `<Program>Client` facade.
		#[arg(long, default_value_t = false)]
		no_facade: bool,
	},
	/// Print the tag derived for a name.
	Tag {
		/// One of `instruction`, `account`, or `event`.
		namespace: Namespace,

		name: String,
	},
	/// List every tagged entity in a schema.
	Inspect {
		/// Schema JSON file.
		#[arg(short, long)]
		schema: PathBuf,
	},
}

fn main() {
	let cli = Cli::parse();

	match cli.command {
		Commands::Generate {
			schema,
			schema_dir,
			output,
			output_dir,
			name,
			runtime_crate,
			no_facade,
		} => {
			let options = GenerateOptions {
				runtime_crate,
				facade: !no_facade,
				name,
			};
			match (schema, schema_dir, output_dir) {
				(_, Some(schema_dir), Some(output_dir)) => {
					run_generate_directory(&schema_dir, &output_dir, &options);
				}
				(Some(schema), ..) => run_generate(&schema, output.as_deref(), &options),
				_ => fail("either --schema or --schema-dir with --output-dir is required"),
			}
		}
		Commands::Tag { namespace, name } => {
			println!("{}", keel::Tag::derive(namespace, &name));
		}
		Commands::Inspect { schema } => run_inspect(&schema),
	}
}

fn run_generate(schema: &Path, output: Option<&Path>, options: &GenerateOptions) {
	let source = keel_cli::generate_client(schema, options).unwrap_or_else(|e| fail(e));

	if let Some(output) = output {
		if let Err(e) = std::fs::write(output, &source) {
			fail(format_args!("failed to write {}: {e}", output.display()));
		}
		eprintln!(
			"{} {}",
			"wrote".if_supports_color(Stream::Stderr, |text| text.green()),
			output.display()
		);
	} else {
		print!("{source}");
	}
}

fn run_generate_directory(schema_dir: &Path, output_dir: &Path, options: &GenerateOptions) {
	let written = keel_cli::generate_directory(schema_dir, output_dir, options)
		.unwrap_or_else(|e| fail(e));

	for path in &written {
		eprintln!(
			"{} {}",
			"wrote".if_supports_color(Stream::Stderr, |text| text.green()),
			path.display()
		);
	}
	eprintln!("Generated {} client(s) into {}", written.len(), output_dir.display());
}

fn run_inspect(schema: &Path) {
	let program = keel_cli::load_program(schema, &GenerateOptions::default())
		.unwrap_or_else(|e| fail(e));

	println!(
		"{} {}",
		program.name.if_supports_color(Stream::Stdout, |name| name.bold()),
		program.address
	);
	println!("{}", keel_cli::tag_table(&program));
}

fn fail(message: impl Display) -> ! {
	eprintln!(
		"{} {message}",
		"error:".if_supports_color(Stream::Stderr, |text| text.style(Style::new().red().bold()))
	);
	std::process::exit(1);
}
