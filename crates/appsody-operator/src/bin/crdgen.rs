//! Prints the operator's CustomResourceDefinitions

use anyhow::Result;
use appsody_operator::{AppsodyApplication, Route};
use clap::{Parser, ValueEnum};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::CustomResourceExt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "crdgen", about = "Print the AppsodyApplication CRD")]
struct Cli {
    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,

    /// Also print the OpenShift Route CRD
    #[arg(long)]
    route: bool,
}

fn render(crd: &CustomResourceDefinition, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(crd)?,
        OutputFormat::Json => serde_json::to_string_pretty(crd)?,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut crds = vec![AppsodyApplication::crd()];
    if cli.route {
        crds.push(Route::crd());
    }

    for crd in &crds {
        info!("Generating CRD {}", crd.metadata.name.as_deref().unwrap_or_default());
        if cli.format == OutputFormat::Yaml {
            println!("---");
        }
        println!("{}", render(crd, cli.format)?);
    }

    Ok(())
}
