//! FitCheck CLI - electrical product compatibility checks from the command line.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fitcheck::{
    CheckKind, CheckOptions, CheckReport, EnclosureRating, FitCheckCore, ParsedSpecs, ProductType,
    SizingResult, SpecPatch,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fitcheck")]
#[command(about = "Heuristic compatibility checks for electrical products", long_about = None)]
#[command(version)]
struct Cli {
    /// External rule table (JSON); the embedded table is used otherwise
    #[arg(long = "rules", global = true, env = "FITCHECK_RULES", value_name = "PATH")]
    rules_path: Option<PathBuf>,

    /// Fail instead of falling back when the rule table cannot be loaded
    #[arg(long, global = true)]
    strict_rules: bool,

    /// Debug logging on stderr; `rules` also shows families and ratings
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract structured specs from product text
    Extract {
        #[command(flatten)]
        input: InputArgs,

        /// Override an extracted field (field=value, repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Check two products against each other
    Pair {
        /// Text of product A
        #[arg(long, value_name = "TEXT", required_unless_present = "a_file", conflicts_with = "a_file")]
        a: Option<String>,

        /// Read product A from a file
        #[arg(long, value_name = "PATH")]
        a_file: Option<PathBuf>,

        /// Text of product B
        #[arg(long, value_name = "TEXT", required_unless_present = "b_file", conflicts_with = "b_file")]
        b: Option<String>,

        /// Read product B from a file
        #[arg(long, value_name = "PATH")]
        b_file: Option<PathBuf>,

        /// Override a field of A (field=value, repeatable)
        #[arg(long, value_name = "FIELD=VALUE")]
        set_a: Vec<String>,

        /// Override a field of B (field=value, repeatable)
        #[arg(long, value_name = "FIELD=VALUE")]
        set_b: Vec<String>,

        /// Which check to run; forced checks take A as the panel/plug side
        #[arg(long, value_enum, default_value = "auto")]
        check: CheckSelector,

        /// Also check A's enclosure against this NEMA rating (1, 3R, 4, 4X)
        #[arg(long, value_name = "RATING", value_parser = parse_rating)]
        require: Option<EnclosureRating>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with code 1 if any verdict is incompatible
        #[arg(long)]
        fail_on_incompatible: bool,
    },

    /// Check a product's NEMA enclosure rating against an environment
    Enclosure {
        #[command(flatten)]
        input: InputArgs,

        /// Required NEMA rating (1, 3R, 4, 4X)
        #[arg(long, value_name = "RATING", value_parser = parse_rating)]
        require: EnclosureRating,

        /// Override an extracted field (field=value, repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Size the branch breaker for an EV charger
    EvSize {
        /// Charger continuous output in amps
        #[arg(value_name = "AMPS", value_parser = clap::value_parser!(u32).range(1..=100))]
        amps: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List brands, series, and plug configurations in the rule table
    Rules,
}

/// Product text from an argument, a file, or stdin
#[derive(Args)]
struct InputArgs {
    /// Product text; read from stdin when neither TEXT nor --file is given
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    text: Option<String>,

    /// Read product text from a file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum CheckSelector {
    /// Pick the check from the detected product types
    Auto,
    PanelBreaker,
    PlugReceptacle,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stderr keeps JSON on stdout parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let options = CheckOptions {
        rules_path: cli.rules_path,
        strict_rules: cli.strict_rules,
    };
    let core = FitCheckCore::from_options(&options).context("Failed to load rule table")?;

    match cli.command {
        Commands::Extract { input, set, format } => handle_extract(&core, input, &set, &format),
        Commands::Pair {
            a,
            a_file,
            b,
            b_file,
            set_a,
            set_b,
            check,
            require,
            format,
            fail_on_incompatible,
        } => {
            let a = extract_with(&core, &read_input(a, a_file.as_deref())?, &set_a)?;
            let b = extract_with(&core, &read_input(b, b_file.as_deref())?, &set_b)?;
            let code = handle_pair(&core, &a, &b, check, require, &format)?;
            Ok(if fail_on_incompatible { code } else { 0 })
        }
        Commands::Enclosure {
            input,
            require,
            set,
            format,
        } => handle_enclosure(&core, input, require, &set, &format),
        Commands::EvSize { amps, format } => handle_ev_size(&core, amps, &format),
        Commands::Rules => {
            handle_rules(&core, cli.verbose);
            Ok(0)
        }
    }
}

fn parse_rating(s: &str) -> Result<EnclosureRating, String> {
    EnclosureRating::parse(s).ok_or_else(|| {
        let known: Vec<&str> = EnclosureRating::HIERARCHY.iter().map(|r| r.as_str()).collect();
        format!("unknown NEMA rating {:?} (expected one of {})", s, known.join(", "))
    })
}

fn read_input(text: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read product text from stdin")?;
    Ok(buffer)
}

fn extract_with(core: &FitCheckCore, text: &str, set: &[String]) -> anyhow::Result<ParsedSpecs> {
    let specs = core.extract(text);
    let patch = SpecPatch::from_assignments(set)?;
    if patch.is_empty() {
        return Ok(specs);
    }
    Ok(specs.apply(&patch)?)
}

fn handle_extract(
    core: &FitCheckCore,
    input: InputArgs,
    set: &[String],
    format: &OutputFormat,
) -> anyhow::Result<i32> {
    let text = read_input(input.text, input.file.as_deref())?;
    let specs = extract_with(core, &text, set)?;

    match format {
        OutputFormat::Human => {
            print_specs("Extracted specs", &specs);
            print_disclaimer(core);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&specs)?),
    }
    Ok(0)
}

/// Returns 1 when any verdict is incompatible
fn handle_pair(
    core: &FitCheckCore,
    a: &ParsedSpecs,
    b: &ParsedSpecs,
    check: CheckSelector,
    require: Option<EnclosureRating>,
    format: &OutputFormat,
) -> anyhow::Result<i32> {
    let report = match check {
        CheckSelector::Auto => core.check_pair(a, b),
        CheckSelector::PanelBreaker => core.check_pair_as(CheckKind::PanelBreaker, a, b),
        CheckSelector::PlugReceptacle => core.check_pair_as(CheckKind::PlugReceptacle, a, b),
    };
    let enclosure = require.map(|rating| core.check_enclosure(a, rating.as_str()));

    match format {
        OutputFormat::Human => {
            print_specs("Product A", a);
            println!();
            print_specs("Product B", b);

            match &report {
                Some(report) => {
                    print_report(report);
                    if report.kind == CheckKind::PanelBreaker && report.result.compatible {
                        print_accepted_families(core, a, b);
                    }
                }
                None => println!(
                    "\nNo pair check applies to {} + {}.",
                    a.product_type, b.product_type
                ),
            }
            if let Some(enclosure) = &enclosure {
                print_report(enclosure);
            }
            print_disclaimer(core);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "a": a,
                "b": b,
                "check": report,
                "enclosure": enclosure,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    let incompatible = report
        .iter()
        .chain(enclosure.iter())
        .any(|r| !r.result.compatible);
    Ok(i32::from(incompatible))
}

fn handle_enclosure(
    core: &FitCheckCore,
    input: InputArgs,
    require: EnclosureRating,
    set: &[String],
    format: &OutputFormat,
) -> anyhow::Result<i32> {
    let text = read_input(input.text, input.file.as_deref())?;
    let specs = extract_with(core, &text, set)?;
    let report = core.check_enclosure(&specs, require.as_str());

    match format {
        OutputFormat::Human => {
            print_specs("Product", &specs);
            print_report(&report);
            print_disclaimer(core);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(0)
}

fn handle_ev_size(core: &FitCheckCore, amps: u32, format: &OutputFormat) -> anyhow::Result<i32> {
    let sizing = core.size_evse(amps);

    match format {
        OutputFormat::Human => {
            print_sizing(&sizing);
            print_disclaimer(core);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sizing)?),
    }
    Ok(0)
}

fn handle_rules(core: &FitCheckCore, verbose: bool) {
    let rules = core.rules();
    println!("Brands (detection priority order):\n");

    for (brand, brand_rules) in &rules.brands {
        println!("  {}", brand);
        for (series, series_rules) in &brand_rules.series {
            if verbose {
                println!("    {:<10} {}", series, series_rules.breaker_families.join(", "));
            } else {
                println!("    {}", series);
            }
        }
    }

    println!("\nPlug/receptacle configurations:\n");
    for (config, rating) in &rules.plug_receptacle {
        if verbose {
            println!("  {:<12} {} / {}A", config, rating.voltage, rating.amps);
        } else {
            println!("  {}", config);
        }
    }

    if verbose {
        println!("\nPair checks:");
        for rule in core.engine().rules() {
            println!("  {:<16} {}", rule.id(), rule.name());
            println!("    {}", rule.description());
        }
        if !rules.ev_note().is_empty() {
            println!("\nEV charger note:\n  {}", rules.ev_note());
        }
        if !rules.routes.is_empty() {
            println!("\nRoutes:");
            for (category, url) in &rules.routes {
                println!("  {:<12} {}", category, url);
            }
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn print_specs(title: &str, specs: &ParsedSpecs) {
    let amps = specs.amps.map(|a| format!("{}A", a));
    let poles = specs.poles.map(|p| p.to_string());

    println!("{}:", title);
    println!("  Type:       {}", specs.product_type);
    println!("  Brand:      {}", or_dash(&specs.brand));
    println!("  Series:     {}", or_dash(&specs.series));
    println!("  Model:      {}", or_dash(&specs.model));
    println!("  Voltage:    {}", or_dash(&specs.voltage));
    println!("  Phase:      {}", or_dash(specs.phase.as_str()));
    println!("  Amps:       {}", amps.as_deref().unwrap_or("-"));
    println!("  Poles:      {}", poles.as_deref().unwrap_or("-"));
    println!("  NEMA encl.: {}", or_dash(&specs.nema_enclosure));
    println!("  Plug cfg:   {}", or_dash(&specs.plug_config));
}

fn print_report(report: &CheckReport) {
    let verdict = if report.result.compatible {
        "likely compatible"
    } else {
        "likely NOT compatible"
    };
    println!("\n{}: {}", report.kind.title(), verdict);

    if !report.result.reasons.is_empty() {
        println!("  Reasons:");
        for reason in &report.result.reasons {
            println!("    - {}", reason);
        }
    }
    if !report.result.suggestions.is_empty() {
        println!("  Suggestions:");
        for suggestion in &report.result.suggestions {
            println!("    - {}", suggestion);
        }
    }
}

fn print_accepted_families(core: &FitCheckCore, a: &ParsedSpecs, b: &ParsedSpecs) {
    let panel = if a.product_type == ProductType::Panel { a } else { b };
    let families = core.rules().breaker_families(&panel.brand, &panel.series);
    if !families.is_empty() {
        println!(
            "  Accepted breaker families for {} {}: {}",
            panel.brand,
            panel.series,
            families.join(", ")
        );
    }
}

fn print_sizing(sizing: &SizingResult) {
    println!("EV charger output:   {}A", sizing.evse_output_amps);
    println!("Continuous target:   {}A (125%)", sizing.target_amps);
    match sizing.recommended_breaker {
        Some(size) => println!("Recommended breaker: {}A", size),
        None => println!("Recommended breaker: no standard size covers this load"),
    }
    if !sizing.note.is_empty() {
        println!("\n{}", sizing.note);
    }
}

fn print_disclaimer(core: &FitCheckCore) {
    let disclaimer = &core.rules().disclaimer;
    if !disclaimer.is_empty() {
        println!("\n{}", disclaimer);
    }
}
