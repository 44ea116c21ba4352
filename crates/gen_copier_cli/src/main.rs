use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{ArgAction, Parser};
use gen_copier::{CopierOptions, options::DEFAULT_METHOD_NAME, write_copier};
use log::{LevelFilter, error, info};

/// Generate a method that copies the fields of one struct into another.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the source struct in FILE, e.g. `Person` or `models::Person`
    source: String,

    /// Path of the target struct in FILE
    target: String,

    /// Rust source file that declares both structs
    file: PathBuf,

    /// Where to write the generated code, defaults to `<FILE stem>_copier.rs` next to FILE
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Module qualifier to strip from the source struct when it's used as the receiver type
    #[arg(long)]
    strip_prefix: Option<String>,

    /// Name of the generated method
    #[arg(long, default_value = DEFAULT_METHOD_NAME)]
    method: String,

    /// Log progress, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Result<CopierOptions, String> {
        if syn::parse_str::<syn::Ident>(&self.method).is_err() {
            return Err(format!("{} is not a valid method name", self.method));
        }

        let mut options = CopierOptions::new().with_method_name(&self.method);
        if let Some(prefix) = self.strip_prefix.as_ref() {
            options = options.with_strip_prefix(prefix);
        }

        Ok(options)
    }

    fn output_path(&self) -> PathBuf {
        match self.output.as_ref() {
            Some(output) => output.clone(),
            None => default_output_path(&self.file),
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "generated".into());

    input.with_file_name(format!("{}_copier.rs", stem))
}

fn run(cli: &Cli) -> Result<(), String> {
    let options = cli.options()?;
    let output = cli.output_path();

    info!(
        "generating {} -> {} from {}",
        cli.source,
        cli.target,
        cli.file.display()
    );

    write_copier(&cli.file, &output, &cli.source, &cli.target, &options)
        .map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
