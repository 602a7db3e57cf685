//! Quote command implementation for the courier CLI.

use std::io::{BufReader, Write};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courier_core::{CostModel, EmptyLegPolicy, Optimizer, Order, Quote, Topology, TopologySpec};
use courier_solver_exhaustive::{EnumerationStrategy, ExhaustiveConfig, ExhaustiveOptimizer};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{ARG_EMPTY_LEG_POLICY, ARG_ORDER, ARG_STRATEGY, ARG_TOPOLOGY, CliError, ENV_ORDER};

/// CLI arguments for the `quote` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Quote the cheapest way to deliver an order. The order is a \
                 JSON object mapping item identifiers to quantities. The \
                 built-in reference network is used unless a topology file \
                 is given.",
    about = "Quote an order"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct QuoteArgs {
    /// Path to a JSON file containing the order.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) order_path: Option<Utf8PathBuf>,
    /// Path to a JSON topology file replacing the reference network.
    #[arg(long = ARG_TOPOLOGY, value_name = "path")]
    #[serde(default)]
    pub(crate) topology: Option<Utf8PathBuf>,
    /// Whether legs without cargo are charged (`charged`) or free (`free`).
    #[arg(long = ARG_EMPTY_LEG_POLICY, value_name = "policy")]
    #[serde(default)]
    pub(crate) empty_leg_policy: Option<String>,
    /// Route generator: `permutation-mask` or `recursive-insertion`.
    #[arg(long = ARG_STRATEGY, value_name = "strategy")]
    #[serde(default)]
    pub(crate) strategy: Option<String>,
}

impl QuoteArgs {
    pub(crate) fn into_config(self) -> Result<QuoteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QuoteConfig::try_from(merged)
    }
}

/// Resolved `quote` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QuoteConfig {
    /// Path to the JSON order file.
    pub(crate) order_path: Utf8PathBuf,
    /// Optional topology file.
    pub(crate) topology: Option<Utf8PathBuf>,
    /// How legs without cargo are priced.
    pub(crate) empty_leg_policy: EmptyLegPolicy,
    /// Route generator.
    pub(crate) strategy: EnumerationStrategy,
}

impl QuoteConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.order_path, ARG_ORDER)?;
        if let Some(topology) = &self.topology {
            require_existing(topology, ARG_TOPOLOGY)?;
        }
        Ok(())
    }

    fn optimizer_config(&self) -> ExhaustiveConfig {
        ExhaustiveConfig {
            cost_model: CostModel::default().with_empty_leg_policy(self.empty_leg_policy),
            strategy: self.strategy,
        }
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl TryFrom<QuoteArgs> for QuoteConfig {
    type Error = CliError;

    fn try_from(args: QuoteArgs) -> Result<Self, Self::Error> {
        let order_path = args.order_path.ok_or(CliError::MissingArgument {
            field: ARG_ORDER,
            env: ENV_ORDER,
        })?;
        let empty_leg_policy = args
            .empty_leg_policy
            .as_deref()
            .map(str::parse::<EmptyLegPolicy>)
            .transpose()?
            .unwrap_or_default();
        let strategy = args
            .strategy
            .as_deref()
            .map(str::parse::<EnumerationStrategy>)
            .transpose()?
            .unwrap_or_default();
        log::debug!(
            "quote configuration: {ARG_EMPTY_LEG_POLICY}={empty_leg_policy}, {ARG_STRATEGY}={strategy}"
        );
        Ok(Self {
            order_path,
            topology: args.topology,
            empty_leg_policy,
            strategy,
        })
    }
}

/// Builds the optimiser for the current quote invocation.
pub(crate) trait QuoteOptimizerBuilder {
    fn build(&self, config: &QuoteConfig, topology: Arc<Topology>) -> Box<dyn Optimizer>;
}

pub(crate) struct DefaultQuoteOptimizerBuilder;

impl QuoteOptimizerBuilder for DefaultQuoteOptimizerBuilder {
    fn build(&self, config: &QuoteConfig, topology: Arc<Topology>) -> Box<dyn Optimizer> {
        Box::new(ExhaustiveOptimizer::with_config(
            topology,
            config.optimizer_config(),
        ))
    }
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let config = args.into_config()?;
    run_quote_with(&config, &DefaultQuoteOptimizerBuilder, &mut stdout)
}

pub(crate) fn run_quote_with(
    config: &QuoteConfig,
    builder: &dyn QuoteOptimizerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let quote = execute_quote(config, builder)?;
    write_quote(writer, &quote)
}

fn execute_quote(
    config: &QuoteConfig,
    builder: &dyn QuoteOptimizerBuilder,
) -> Result<Quote, CliError> {
    config.validate_sources()?;
    let topology = match &config.topology {
        Some(path) => load_topology(path)?,
        None => Topology::reference(),
    };
    let order = load_order(&config.order_path)?;
    let optimizer = builder.build(config, Arc::new(topology));
    Ok(optimizer.optimize(&order))
}

/// Loads a JSON-encoded [`Order`] from disk.
pub(crate) fn load_order(path: &Utf8Path) -> Result<Order, CliError> {
    load_json(path, ARG_ORDER)
}

/// Loads and validates a JSON-encoded [`TopologySpec`] from disk.
pub(crate) fn load_topology(path: &Utf8Path) -> Result<Topology, CliError> {
    let spec: TopologySpec = load_json(path, ARG_TOPOLOGY)?;
    Topology::try_from(spec).map_err(|source| CliError::InvalidTopology {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json<T: DeserializeOwned>(path: &Utf8Path, field: &'static str) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

fn write_quote(writer: &mut dyn Write, quote: &Quote) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(quote).map_err(CliError::SerialiseQuote)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteQuoteOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteQuoteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<QuoteConfig, CliError> {
    let merged = QuoteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    QuoteConfig::try_from(merged)
}
