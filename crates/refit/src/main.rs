mod catalog;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::info;

use refit_core::constants;
use refit_core::template::UpgradePath;
use refit_core::transformation::{
    TransformationConfig, TransformationRequest, TransformationResult, Transformer,
};

/// refit: structural transformation and upgrades for application source trees
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Configuration file (json, toml or yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the built-in templates and upgrade chains
    Templates,
    /// Run a single template against an application folder
    Run {
        /// The application folder to transform
        app_dir: PathBuf,
        /// The name of the built-in template to run
        #[arg(long, default_value = catalog::AUDIT_TEMPLATE)]
        template: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run a registered upgrade chain against an application folder
    Upgrade {
        /// The application folder to upgrade
        app_dir: PathBuf,
        /// The name of the registered upgrade chain
        #[arg(long)]
        chain: Option<String>,
        /// Target version; defaults to the chain's terminal version
        #[arg(long)]
        target: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Where the transformed copy lands (ignored with --in-place)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Transform the application folder directly instead of a copy
    #[arg(long)]
    in_place: bool,

    /// Hand the transformed application to zip packaging when done
    #[arg(long)]
    zip: bool,

    /// Write a JSON result report into the transformed application
    #[arg(long)]
    json_report: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG controls verbosity
    if let Err(e) = env_logger::try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    println!(
        "{} v{}: application transformation engine",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let args = CliArgs::parse();

    let base_config = match &args.config {
        Some(path) => match TransformationConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => TransformationConfig::default(),
    };

    match args.command {
        Commands::Templates => {
            println!("Built-in templates:");
            for name in catalog::template_names() {
                println!("  - {}", name);
            }
            let chains = catalog::upgrade_chains();
            if chains.is_empty() {
                println!("No upgrade chains registered in this build.");
                println!("Distributions embedding refit-core compile their version chains into the catalog.");
            } else {
                println!("Registered upgrade chains:");
                for (name, start) in &chains {
                    println!(
                        "  - {} ({} to {})",
                        name,
                        start.current_version(),
                        start.terminal_version()
                    );
                }
            }
            ExitCode::SUCCESS
        }

        Commands::Run {
            app_dir,
            template,
            output,
        } => {
            let template = match catalog::template(&template) {
                Some(Ok(t)) => t,
                Some(Err(e)) => {
                    eprintln!("Template '{}' failed to build: {}", template, e);
                    return ExitCode::FAILURE;
                }
                None => {
                    eprintln!(
                        "Unknown template '{}'. Use 'refit templates' to list what is available.",
                        template
                    );
                    return ExitCode::FAILURE;
                }
            };

            let config = apply_output_args(base_config, &output);
            let request = match TransformationRequest::for_template(app_dir, config, template) {
                Ok(request) => request,
                Err(e) => {
                    eprintln!("Invalid request: {}", e);
                    return ExitCode::FAILURE;
                }
            };

            execute(request, output.json_report).await
        }

        Commands::Upgrade {
            app_dir,
            chain,
            target,
            output,
        } => {
            let chains = catalog::upgrade_chains();
            let start = match &chain {
                Some(name) => chains
                    .iter()
                    .find(|(chain_name, _)| chain_name == name)
                    .map(|(_, start)| start.clone()),
                None => chains.first().map(|(_, start)| start.clone()),
            };
            let Some(start) = start else {
                eprintln!("No upgrade chain registered in this build.");
                eprintln!("Distributions embedding refit-core compile their version chains into the catalog.");
                return ExitCode::FAILURE;
            };

            let path = match UpgradePath::resolve(start, target.as_deref()) {
                Ok(path) => path,
                Err(e) => {
                    eprintln!("Cannot resolve upgrade path: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            info!(
                "Resolved upgrade path: {} to {} ({} step(s))",
                path.start_version(),
                path.target_version(),
                path.len()
            );

            let config = apply_output_args(base_config, &output);
            let request = match TransformationRequest::for_upgrade(app_dir, config, path) {
                Ok(request) => request,
                Err(e) => {
                    eprintln!("Invalid request: {}", e);
                    return ExitCode::FAILURE;
                }
            };

            execute(request, output.json_report).await
        }
    }
}

/// Command-line flags override the loaded configuration file
fn apply_output_args(mut config: TransformationConfig, output: &OutputArgs) -> TransformationConfig {
    if output.output.is_some() {
        config.output_dir = output.output.clone();
    }
    if output.in_place {
        config.in_place = true;
    }
    if output.zip {
        config.zip_output = true;
    }
    config
}

/// Run the request to completion and print the outcome
async fn execute(request: TransformationRequest, json_report: bool) -> ExitCode {
    let result = match Transformer::new().execute(request).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Transformation rejected: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print_summary(&result);

    if json_report {
        match result.write_json_report(&result.transformed_path) {
            Ok(path) => println!("Result report written to '{}'", path.display()),
            Err(e) => eprintln!("Failed to write result report: {}", e),
        }
    }

    if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_summary(result: &TransformationResult) {
    if result.success {
        println!(
            "Transformation succeeded: '{}'",
            result.transformed_path.display()
        );
    } else {
        println!(
            "Transformation failed: '{}'",
            result.transformed_path.display()
        );
    }

    for metrics in &result.metrics {
        let stats = &metrics.statistics;
        println!(
            "  {}: {} step(s), {} executed, {} skipped, {} error(s)",
            metrics.template,
            stats.total_steps(),
            stats.executed,
            stats.skipped_condition + stats.skipped_dependency,
            stats.errors + stats.utility_error + stats.operation_error,
        );
    }

    if let Some(abort) = &result.abort {
        println!(
            "Aborted by step '{}' in template '{}': {}",
            abort.step_id, abort.template, abort.message
        );
    }

    if result.manual_instructions.present {
        println!(
            "{} manual instruction(s) require follow-up:",
            result.manual_instructions.count
        );
        for document in &result.manual_instructions.documents {
            println!("  - {}", document.display());
        }
    }
}
