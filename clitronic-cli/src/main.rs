//! Clitronic CLI - electronics reference, calculators and AI chat from the command line.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clitronic::ai::stream::NO_RESPONSE;
use clitronic::ai::{
    AIError, ChatClient, ChatMessage, ChatSession, DecodedStream, ToolRegistry,
};
use clitronic::calc::{
    calculate_resistor, ohms_law, CalculationResult, OhmsInput, ResistorRequest,
    ResistorScenario,
};
use clitronic::command::{TerminalCommand, HELP_TEXT};
use clitronic::config::{ClientConfig, ENV_API_KEY};
use clitronic::{ClitronicCore, Component};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clitronic")]
#[command(about = "AI-powered hardware companion for electronics enthusiasts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Chat server base URL (overrides CLITRONIC_ENDPOINT)
    #[arg(long, value_name = "URL", global = true)]
    endpoint: Option<String>,

    /// Use a JSON component catalog instead of the built-in one
    #[arg(long, value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show details for an electronic component
    Info {
        /// Component name or id (e.g. led, "push button")
        #[arg(value_name = "COMPONENT", required = true, num_args = 1..)]
        component: Vec<String>,
    },

    /// List components, optionally by category
    List {
        /// passive, active, input or output
        #[arg(value_name = "CATEGORY")]
        category: Option<String>,
    },

    /// Run a circuit calculation
    Calc {
        #[command(subcommand)]
        calc: CalcCommand,
    },

    /// Show the tools available to the model, or call one
    Tools {
        /// Tool to execute
        #[arg(long, value_name = "NAME")]
        call: Option<String>,

        /// Tool arguments as a JSON object
        #[arg(long, value_name = "JSON", requires = "call")]
        args: Option<String>,
    },

    /// Ask a one-off electronics question
    Ask {
        #[arg(value_name = "QUESTION", required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Interactive chat session
    Chat,

    /// Identify an electronic component from an image
    Identify {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },
}

#[derive(Subcommand)]
enum CalcCommand {
    /// Series resistor for an LED
    Led {
        /// Supply voltage (V)
        #[arg(long, allow_negative_numbers = true)]
        supply: f64,
        /// LED forward voltage (V), default 2.0
        #[arg(long, allow_negative_numbers = true)]
        forward: Option<f64>,
        /// LED current (mA), default 20
        #[arg(long, allow_negative_numbers = true)]
        current: Option<f64>,
    },

    /// Voltage divider R2 for a given R1, or a suggested pair
    Divider {
        /// Input voltage (V)
        #[arg(long, allow_negative_numbers = true)]
        supply: f64,
        /// Desired output voltage (V), default half the supply
        #[arg(long, allow_negative_numbers = true)]
        output: Option<f64>,
        /// Known R1 (Ω)
        #[arg(long, allow_negative_numbers = true)]
        r1: Option<f64>,
    },

    /// Pull-up resistor advice
    Pullup {
        /// Logic supply voltage (V)
        #[arg(long, allow_negative_numbers = true)]
        supply: f64,
    },

    /// Ohm's law from any two of voltage, current and resistance
    Ohms {
        /// Voltage (V)
        #[arg(long, allow_negative_numbers = true)]
        voltage: Option<f64>,
        /// Current (mA)
        #[arg(long, allow_negative_numbers = true)]
        current: Option<f64>,
        /// Resistance (Ω)
        #[arg(long, allow_negative_numbers = true)]
        resistance: Option<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripts
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Info { component } => {
            handle_info(cli.catalog.as_deref(), &component.join(" "), cli.format)
        }
        Commands::List { category } => {
            handle_list(cli.catalog.as_deref(), category.as_deref(), cli.format)
        }
        Commands::Calc { calc } => handle_calc(calc, cli.format),
        Commands::Tools { call, args } => {
            handle_tools(cli.catalog.as_deref(), call.as_deref(), args.as_deref(), cli.format)
        }
        Commands::Ask { question } => {
            handle_ask(client_config(cli.endpoint), &question.join(" "))
        }
        Commands::Chat => handle_chat(client_config(cli.endpoint), cli.catalog.as_deref()),
        Commands::Identify { image } => handle_identify(client_config(cli.endpoint), &image),
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn client_config(endpoint: Option<String>) -> ClientConfig {
    let config = ClientConfig::from_env();
    match endpoint {
        Some(endpoint) => config.with_endpoint(endpoint),
        None => config,
    }
}

fn report(e: anyhow::Error) -> i32 {
    tracing::debug!("Command failed: {:?}", e);
    eprintln!("Error: {:#}", e);
    1
}

fn handle_info(catalog: Option<&Path>, query: &str, format: OutputFormat) -> i32 {
    let catalog = match ClitronicCore::load_catalog(catalog) {
        Ok(catalog) => catalog,
        Err(e) => return report(e.into()),
    };

    match (ClitronicCore::info(&catalog, query), format) {
        (Some(component), OutputFormat::Human) => output_component(component),
        (Some(component), OutputFormat::Json) => print_json(&serde_json::json!({
            "found": true,
            "component": component,
        })),
        (None, OutputFormat::Human) => {
            println!("\nComponent not found: \"{}\"", query);
            println!("Available: {}", catalog.ids().collect::<Vec<_>>().join(", "));
        }
        (None, OutputFormat::Json) => print_json(&serde_json::json!({
            "found": false,
            "query": query,
            "available": catalog.ids().collect::<Vec<_>>(),
        })),
    }
    0
}

fn output_component(component: &Component) {
    println!();
    println!("{}", component.name);
    println!("Category: {}", component.category);
    println!();
    println!("{}", component.description);
    println!();

    println!("Specifications:");
    for spec in &component.specs {
        println!("  {}: {}", spec.label, spec.value);
    }
    println!();

    println!("Circuit Example:");
    println!("  {}", component.circuit_example);

    if let Some(ref ds) = component.datasheet_info {
        println!();
        println!("Pinout:");
        println!("  {}", ds.pinout);

        if !ds.max_ratings.is_empty() {
            println!();
            println!("Maximum Ratings:");
            for rating in &ds.max_ratings {
                println!("  {}: {}", rating.parameter, rating.value);
            }
        }

        if !ds.characteristics.is_empty() {
            println!();
            println!("Characteristics (min / typ / max):");
            for c in &ds.characteristics {
                println!("  {}: {}", c.parameter, c.display_range());
            }
        }

        if !ds.part_numbers.is_empty() {
            println!();
            println!("Common Part Numbers:");
            println!("  {}", ds.part_numbers.join(", "));
        }

        println!();
        println!("Tips:");
        println!("  {}", ds.tips);
    }
    println!();
}

fn handle_list(catalog: Option<&Path>, category: Option<&str>, format: OutputFormat) -> i32 {
    let catalog = match ClitronicCore::load_catalog(catalog) {
        Ok(catalog) => catalog,
        Err(e) => return report(e.into()),
    };
    let components = match ClitronicCore::list(&catalog, category) {
        Ok(components) => components,
        Err(e) => return report(e.into()),
    };

    match format {
        OutputFormat::Human => output_list(category, &components),
        OutputFormat::Json => print_json(&serde_json::json!({
            "count": components.len(),
            "components": components.iter().map(|c| summary_json(c)).collect::<Vec<_>>(),
        })),
    }
    0
}

fn summary_json(component: &Component) -> serde_json::Value {
    serde_json::json!({
        "id": component.id,
        "name": component.name,
        "category": component.category,
        "description": component.description,
    })
}

fn output_list(category: Option<&str>, components: &[&Component]) {
    let category = category.map(str::trim).filter(|c| !c.is_empty());

    if components.is_empty() {
        println!(
            "\nNo components found for category: \"{}\"",
            category.unwrap_or_default()
        );
        return;
    }

    println!();
    match category {
        Some(category) => println!("{} Components:", category.to_uppercase()),
        None => println!("All Components:"),
    }
    println!();

    for (category, items) in ClitronicCore::group_by_category(components) {
        println!("  {}", category.as_str().to_uppercase());
        for item in items {
            let blurb: String = item.description.chars().take(60).collect();
            println!("    {:<22} {}...", item.name, blurb);
        }
        println!();
    }
}

fn handle_calc(calc: CalcCommand, format: OutputFormat) -> i32 {
    let result = match calc {
        CalcCommand::Led {
            supply,
            forward,
            current,
        } => calculate_resistor(&ResistorRequest {
            scenario: ResistorScenario::Led,
            supply_voltage: supply,
            forward_voltage: forward,
            desired_current_ma: current,
            output_voltage: None,
            r1_ohms: None,
        }),
        CalcCommand::Divider { supply, output, r1 } => calculate_resistor(&ResistorRequest {
            scenario: ResistorScenario::VoltageDivider,
            supply_voltage: supply,
            forward_voltage: None,
            desired_current_ma: None,
            output_voltage: output,
            r1_ohms: r1,
        }),
        CalcCommand::Pullup { supply } => calculate_resistor(&ResistorRequest {
            scenario: ResistorScenario::Pullup,
            supply_voltage: supply,
            forward_voltage: None,
            desired_current_ma: None,
            output_voltage: None,
            r1_ohms: None,
        }),
        CalcCommand::Ohms {
            voltage,
            current,
            resistance,
        } => ohms_law(&OhmsInput {
            voltage,
            current_ma: current,
            resistance,
        }),
    };

    output_calculation(&result, format);
    if result.is_needs_input() {
        1
    } else {
        0
    }
}

fn output_calculation(result: &CalculationResult, format: OutputFormat) {
    match format {
        OutputFormat::Human => println!("{}", result),
        OutputFormat::Json => print_json(&result.to_value()),
    }
}

fn handle_tools(
    catalog: Option<&Path>,
    call: Option<&str>,
    args: Option<&str>,
    format: OutputFormat,
) -> i32 {
    let catalog = match ClitronicCore::load_catalog(catalog) {
        Ok(catalog) => catalog,
        Err(e) => return report(e.into()),
    };
    let registry = ToolRegistry::new(&catalog);

    let Some(name) = call else {
        let definitions = registry.definitions();
        match format {
            OutputFormat::Human => {
                println!("Available tools:\n");
                for definition in &definitions {
                    println!("  {}", definition.name);
                    println!("    {}", definition.description);
                    println!();
                }
            }
            OutputFormat::Json => print_json(&definitions),
        }
        return 0;
    };

    let result = serde_json::from_str::<serde_json::Value>(args.unwrap_or("{}"))
        .context("Tool arguments must be a JSON object")
        .and_then(|args| registry.execute(name, args).map_err(anyhow::Error::from));

    match result {
        Ok(value) => {
            print_json(&value);
            0
        }
        Err(e) => report(e),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

fn print_streamed(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

/// Close off a streamed answer. Error frames replace the streamed text.
fn finish_answer(decoded: &DecodedStream) {
    match decoded.error {
        Some(ref error) => println!("\nError: {}", error),
        None if decoded.text.is_empty() => println!("{}", NO_RESPONSE),
        None => println!("\n"),
    }
}

fn handle_ask(config: ClientConfig, question: &str) -> i32 {
    let result = runtime().and_then(|rt| {
        rt.block_on(async {
            let client = ChatClient::new(config)?;
            println!();
            let decoded = client
                .stream_chat(&[ChatMessage::user_text(question)], print_streamed)
                .await?;
            finish_answer(&decoded);
            anyhow::Ok(())
        })
    });

    match result {
        Ok(()) => 0,
        Err(e) => report(e),
    }
}

fn handle_identify(config: ClientConfig, image: &Path) -> i32 {
    let result = runtime().and_then(|rt| {
        rt.block_on(async {
            let file = ClitronicCore::read_image(image)?;
            let client = ChatClient::new(config)?;
            eprintln!("\nAnalyzing image: {}\n", image.display());
            let decoded = client
                .identify(&file.bytes, file.media_type, print_streamed)
                .await?;
            finish_answer(&decoded);
            anyhow::Ok(())
        })
    });

    match result {
        Ok(()) => 0,
        Err(e) => report(e),
    }
}

fn handle_chat(config: ClientConfig, catalog: Option<&Path>) -> i32 {
    match run_chat(config, catalog) {
        Ok(()) => 0,
        Err(e) => report(e),
    }
}

fn run_chat(config: ClientConfig, catalog: Option<&Path>) -> anyhow::Result<()> {
    let catalog = ClitronicCore::load_catalog(catalog)?;
    let rt = runtime()?;
    let mut session = ChatSession::new(ChatClient::new(config)?);

    println!("\nClitronic Interactive Chat");
    println!("Type 'help' for commands or ask a question. Use Ctrl+D to exit.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line?;

        let command = match TerminalCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}\n", e);
                continue;
            }
        };

        match command {
            TerminalCommand::Help => println!("{}\n", HELP_TEXT),
            TerminalCommand::Clear => {
                session.clear();
                println!("Conversation cleared.\n");
            }
            TerminalCommand::Key => print_key_help(session.backend().config()),
            TerminalCommand::Info { component } => {
                match ClitronicCore::info(&catalog, &component) {
                    Some(found) => output_component(found),
                    None => println!(
                        "\nComponent not found: \"{}\"\nAvailable: {}\n",
                        component,
                        catalog.ids().collect::<Vec<_>>().join(", ")
                    ),
                }
            }
            TerminalCommand::List { category } => {
                match ClitronicCore::list(&catalog, category.as_deref()) {
                    Ok(components) => output_list(category.as_deref(), &components),
                    Err(e) => println!("{}\n", e),
                }
            }
            TerminalCommand::Identify { image: None } => {
                println!("Usage: identify <image-path>\n");
            }
            TerminalCommand::Identify { image: Some(path) } => {
                let outcome = rt.block_on(async {
                    let file = ClitronicCore::read_image(Path::new(&path))?;
                    print!("\nClitronic: ");
                    let decoded = session
                        .backend()
                        .identify(&file.bytes, file.media_type, print_streamed)
                        .await?;
                    finish_answer(&decoded);
                    anyhow::Ok(())
                });
                if let Err(e) = outcome {
                    println!("\nError: {:#}\n", e);
                }
            }
            ask @ TerminalCommand::Ask { .. } => {
                let Some(prompt) = ask.prompt() else { continue };
                print!("\nClitronic: ");
                let outcome =
                    rt.block_on(session.ask_with(&prompt, &mut |text: &str| print_streamed(text)));
                match outcome {
                    Ok(_) => println!("\n"),
                    Err(AIError::Upstream(message)) => println!("\nError: {}\n", message),
                    Err(AIError::EmptyResponse) => println!("{}\n", NO_RESPONSE),
                    Err(e) => println!("\nError: {}\n", e),
                }
            }
        }
    }
}

fn print_key_help(config: &ClientConfig) {
    if config.api_key.is_some() {
        println!("An API key is configured via {}.", ENV_API_KEY);
    } else {
        println!("No API key configured.");
    }
    println!("Get an API key from https://console.anthropic.com/ and set it in your environment:");
    println!("  export {}=your_key_here\n", ENV_API_KEY);
}
