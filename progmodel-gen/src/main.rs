use clap::{Parser, Subcommand};
use miette::{Diagnostic, IntoDiagnostic, MietteHandlerOpts, NamedSource, Report, Result, WrapErr};
use progmodel_decls::{RecordSet, parse_records};
use progmodel_tablegen::{
    BuiltinRow, BuiltinTables, ConcreteType, GeneratorConfig, ReferenceContext, build_tables,
    expand_signature, generate,
};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(
    name = "progmodel-gen",
    version,
    about = "Builtin lookup table generator for programming-model front ends",
    long_about = "Reads builtin declarations and generates compact lookup tables, a name matcher and a type reconstructor as Rust source."
)]
struct Cli {
    /// Show debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the builtin tables as Rust source
    Generate {
        /// Declaration file (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the generated source here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Programming model family, used for the banner and module name
        #[arg(long, value_name = "NAME", default_value = "ProgModel")]
        family: String,

        /// Leave index and group comments out of the tables
        #[arg(long)]
        no_comments: bool,
    },

    /// Build the tables and print their sizes
    Check {
        /// Declaration files to check (use '-' to read from stdin)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Look up builtin names and print their expanded overloads
    Lookup {
        /// Declaration file (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Builtin names to look up
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Generate {
            file,
            output,
            family,
            no_comments,
        }) => handle_generate_command(&file, output.as_deref(), family, no_comments),
        Some(Commands::Check { files }) => handle_check_command(files),
        Some(Commands::Lookup { file, names }) => handle_lookup_command(&file, &names),
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["progmodel-gen", "--help"]);
            Ok(())
        }
    };

    if let Err(report) = result {
        eprintln!("{:?}", report);
        process::exit(1);
    }
}

/// Configure miette for error reporting with source snippets
fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// A declaration file and the name diagnostics refer to it by
struct Input {
    source: String,
    name: String,
}

impl Input {
    fn read(path: &Path) -> Result<Self> {
        if path.to_str() == Some("-") {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source).into_diagnostic()?;
            return Ok(Input {
                source,
                name: "<stdin>".to_string(),
            });
        }

        if !path.exists() {
            return Err(miette::miette!("File not found: {}", path.display()));
        }
        let source = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        Ok(Input {
            source,
            name: path.display().to_string(),
        })
    }

    /// Attach this input's text to a diagnostic so its labels render
    fn report<E>(&self, error: E) -> Report
    where
        E: Diagnostic + Send + Sync + 'static,
    {
        Report::new(error).with_source_code(NamedSource::new(&self.name, self.source.clone()))
    }

    fn records(&self) -> Result<RecordSet> {
        parse_records(&self.source, Some(self.name.clone())).map_err(|error| self.report(error))
    }

    fn tables(&self) -> Result<BuiltinTables> {
        let records = self.records()?;
        build_tables(&records).map_err(|error| self.report(error))
    }
}

fn handle_generate_command(
    file: &Path,
    output: Option<&Path>,
    family: String,
    no_comments: bool,
) -> Result<()> {
    let input = Input::read(file)?;
    let records = input.records()?;
    let config = GeneratorConfig::new(family).with_comments(!no_comments);

    // Nothing is written unless generation succeeded as a whole
    let source = generate(&records, &config).map_err(|error| input.report(error))?;

    match output {
        Some(path) => {
            fs::write(path, &source)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {} bytes to {}", source.len(), path.display());
        }
        None => print!("{}", source),
    }
    Ok(())
}

fn handle_check_command(files: Vec<PathBuf>) -> Result<()> {
    let mut failures = 0;

    for file in &files {
        let checked = Input::read(file).and_then(|input| {
            let tables = input.tables()?;
            Ok((input.name, tables))
        });

        match checked {
            Ok((name, tables)) => {
                let names = tables.groups.iter().map(|g| g.names.len()).sum::<usize>();
                println!(
                    "✅ {}: {} type rows ({} identifiers, {} generic), {} signature entries, {} builtin rows in {} groups for {} names",
                    name,
                    tables.types.len(),
                    tables.type_ids.len(),
                    tables.type_ids.len() - tables.non_generic_count,
                    tables.signatures.len(),
                    tables.builtins.len(),
                    tables.groups.len(),
                    names
                );
            }
            Err(report) => {
                eprintln!("{:?}", report);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(miette::miette!(
            "{} of {} files failed to check",
            failures,
            files.len()
        ));
    }
    Ok(())
}

fn handle_lookup_command(file: &Path, names: &[String]) -> Result<()> {
    let input = Input::read(file)?;
    let tables = input.tables()?;

    for name in names {
        let (first, count) = tables.is_builtin(name);
        if count == 0 {
            println!("{}: not a builtin", name);
            continue;
        }

        println!("{}: rows {}..{} ({} overloads)", name, first, first + count - 1, count);
        for (offset, row) in tables.overloads(name).iter().enumerate() {
            let expanded = expand_signature(&tables, &mut ReferenceContext, tables.signature(row))
                .map_err(|error| input.report(error))?;
            println!(
                "  {}: {}",
                first as usize + offset,
                format_overload(&tables, name, row, &expanded)
            );
        }
    }
    Ok(())
}

fn format_overload(
    tables: &BuiltinTables,
    name: &str,
    row: &BuiltinRow,
    expanded: &[Vec<ConcreteType>],
) -> String {
    let mut entries = expanded.iter().map(|types| format_alternatives(types));
    let return_type = entries.next().unwrap_or_default();
    let mut parameters: Vec<String> = entries.collect();
    if row.is_variadic {
        parameters.push("...".to_string());
    }

    let mut line = format!("{} {}({})", return_type, name, parameters.join(", "));

    let mut attributes = Vec::new();
    if row.is_pure {
        attributes.push("pure".to_string());
    }
    if row.is_const {
        attributes.push("const".to_string());
    }
    if row.is_convergent {
        attributes.push("convergent".to_string());
    }
    if let Some(extension) = tables.extensions.get(row.extension as usize) {
        if !extension.external_name.is_empty() {
            attributes.push(format!("ext = {}", extension.external_name));
        }
    }
    if row.min_version != 0 {
        attributes.push(format!("min = {}", row.min_version));
    }
    if row.max_version != 0 {
        attributes.push(format!("max = {}", row.max_version));
    }
    if !attributes.is_empty() {
        line.push_str(&format!(" [{}]", attributes.join(", ")));
    }
    line
}

/// Generic entries expand to several types; show them as `{a | b}`
fn format_alternatives(types: &[ConcreteType]) -> String {
    match types {
        [] => "<abstract>".to_string(),
        [single] => single.to_string(),
        _ => {
            let alternatives: Vec<String> = types.iter().map(ToString::to_string).collect();
            format!("{{{}}}", alternatives.join(" | "))
        }
    }
}
