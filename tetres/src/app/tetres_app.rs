use super::{read_json, read_traffic_csv, write_csv, write_json, TetresCliError, TetresWorkHandler};
use crate::categorization::{CategorizationRow, CategorizationStore, InMemoryCategorizationStore};
use crate::condition::{ConditionCatalog, ConditionClass};
use crate::config::TetresConfiguration;
use crate::filter::{assemble_samples, FilterConfig, SampleFilter};
use crate::reliability::reliability_summary;
use crate::worker::{BatchId, TaskKind, TaskQueue, WorkUnit};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use kdam::tqdm;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tetres_core::algorithm::discretization::DiscretizedRoute;
use tetres_core::model::{Corridor, Period, Route, TrafficDataReader, TravelTimeSample};
use tetres_core::{
    compute_moe, compute_travel_time_with_moe, CorridorNetwork, MoeKind, MoeParameters,
};

/// Command line tool for travel time reliability analysis of freeway routes
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TetresApp {
    #[command(subcommand)]
    pub op: TetresOperation,
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| format!("expected 'YYYY-MM-DD HH:MM', found '{s}': {e}"))
}

/// the route, network and traffic data shared by every operation
#[derive(Args, Debug, Clone)]
pub struct RouteInputArgs {
    #[arg(long, help = "path to JSON file with the route")]
    pub route_file: String,
    #[arg(long, help = "path to JSON file with the corridors of the network")]
    pub network_file: String,
    #[arg(long, help = "path to CSV file with station_id,variable,time,value rows")]
    pub traffic_file: String,
    #[arg(long, value_parser = parse_datetime, help = "first day and start time of the daily window")]
    pub start: NaiveDateTime,
    #[arg(long, value_parser = parse_datetime, help = "last day and end time of the daily window")]
    pub end: NaiveDateTime,
    #[arg(long, default_value_t = 300, help = "sampling interval in seconds")]
    pub interval: u32,
    #[arg(long, help = "path to .toml or .json file with tetres parameters")]
    pub configuration_file: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum TetresOperation {
    /// compute travel times with route congestion measures for each day
    TravelTime {
        #[command(flatten)]
        input: RouteInputArgs,
        #[arg(long, help = "output CSV file of travel time samples")]
        output_file: String,
    },
    /// compute one congestion measure for every virtual node and timestamp
    Moe {
        #[command(flatten)]
        input: RouteInputArgs,
        #[arg(long, help = "one of vmt, vht, lvmt, uvmt, dvh, cm, cmh")]
        kind: MoeKind,
        #[arg(long, help = "output CSV file of measure values")]
        output_file: String,
    },
    /// compute travel times and categorize them against the operating conditions
    Categorize {
        #[command(flatten)]
        input: RouteInputArgs,
        #[arg(long, help = "path to JSON file with condition records")]
        conditions_file: String,
        #[arg(long, help = "output JSON file of travel time samples")]
        samples_file: String,
        #[arg(long, help = "output JSON file of categorization rows")]
        rows_file: String,
    },
    /// select categorized samples matching a filter
    Filter {
        #[arg(long, help = "JSON file of travel time samples written by categorize")]
        samples_file: String,
        #[arg(long, help = "JSON file of categorization rows written by categorize")]
        rows_file: String,
        #[arg(long, help = "path to JSON file with condition records")]
        conditions_file: String,
        #[arg(long, help = "path to JSON file with the filter description")]
        filter_file: String,
        #[arg(long, help = "path to .toml or .json file with tetres parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "output CSV file of matching samples")]
        output_file: String,
        #[arg(long, help = "path to JSON file with the route, required for reliability output")]
        route_file: Option<String>,
        #[arg(long, help = "output JSON file of reliability measures over the matching samples")]
        reliability_file: Option<String>,
    },
}

/// a travel time sample flattened for CSV output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelTimeRecord {
    pub route_id: u64,
    pub sample_id: u64,
    pub time: NaiveDateTime,
    pub travel_time: f64,
    pub vmt: Option<f64>,
    pub vht: Option<f64>,
    pub lvmt: Option<f64>,
    pub uvmt: Option<f64>,
    pub dvh: Option<f64>,
    pub cm: Option<f64>,
    pub cmh: Option<f64>,
}

impl From<&TravelTimeSample> for TravelTimeRecord {
    fn from(s: &TravelTimeSample) -> Self {
        TravelTimeRecord {
            route_id: s.route_id.0,
            sample_id: s.id.0,
            time: s.time,
            travel_time: s.travel_time,
            vmt: s.moe.map(|m| m.vmt),
            vht: s.moe.map(|m| m.vht),
            lvmt: s.moe.map(|m| m.lvmt),
            uvmt: s.moe.map(|m| m.uvmt),
            dvh: s.moe.map(|m| m.dvh),
            cm: s.moe.map(|m| m.cm),
            cmh: s.moe.map(|m| m.cmh),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoeRecord {
    pub time: NaiveDateTime,
    pub node: usize,
    pub mile_point: f64,
    pub value: f64,
}

fn read_configuration(f: &Option<String>) -> Result<TetresConfiguration, TetresCliError> {
    match f {
        None => Ok(TetresConfiguration::default()),
        Some(f) => {
            log::info!("reading tetres configuration from {f}");
            TetresConfiguration::try_from(f)
        }
    }
}

/// one record per virtual node and timestamp of `period`, placed at the
/// node's mile point along the route
pub fn moe_records<R: TrafficDataReader + ?Sized>(
    kind: MoeKind,
    route: &Route,
    period: &Period,
    reader: &R,
    params: &MoeParameters,
) -> Result<Vec<MoeRecord>, TetresCliError> {
    let discretized = DiscretizedRoute::new(route)?;
    let grid = compute_moe(kind, route, period, reader, params)?;
    let records = period
        .timeline()
        .enumerate()
        .flat_map(|(t, time)| {
            grid.column(t)
                .into_iter()
                .zip(discretized.nodes())
                .enumerate()
                .map(move |(node, (value, virtual_node))| MoeRecord {
                    time,
                    node,
                    mile_point: virtual_node.mile_point,
                    value,
                })
        })
        .collect_vec();
    Ok(records)
}

struct RouteInputs {
    route: Route,
    network: CorridorNetwork,
    periods: Vec<Period>,
    config: TetresConfiguration,
}

impl RouteInputArgs {
    fn load(&self) -> Result<RouteInputs, TetresCliError> {
        if self.end <= self.start {
            return Err(TetresCliError::InvalidArgument(format!(
                "end {} is not after start {}",
                self.end, self.start
            )));
        }
        let config = read_configuration(&self.configuration_file)?;
        let route: Route = read_json(&self.route_file)?;
        let corridors: Vec<Corridor> = read_json(&self.network_file)?;
        let network = CorridorNetwork::new(corridors)?;
        let periods = Period::new(self.start, self.end, self.interval).daily_periods();
        if periods.is_empty() {
            return Err(TetresCliError::InvalidArgument(String::from(
                "start and end do not span a daily window",
            )));
        }
        log::info!(
            "route '{}' with {} nodes over {} days",
            route.name,
            route.nodes.len(),
            periods.len()
        );
        Ok(RouteInputs {
            route,
            network,
            periods,
            config,
        })
    }
}

impl TetresOperation {
    pub fn run(self) -> Result<(), TetresCliError> {
        match self {
            TetresOperation::TravelTime { input, output_file } => {
                let inputs = input.load()?;
                let traffic = read_traffic_csv(&input.traffic_file)?;
                let mut samples = vec![];
                let period_iter = tqdm!(
                    inputs.periods.iter(),
                    total = inputs.periods.len(),
                    desc = "travel time"
                );
                for period in period_iter {
                    let day = compute_travel_time_with_moe(
                        &inputs.route,
                        period,
                        &traffic,
                        &inputs.config.travel_time,
                        &inputs.config.moe,
                    )?;
                    samples.extend(day);
                }
                eprintln!();
                let n = write_csv(&output_file, samples.iter().map(TravelTimeRecord::from))?;
                log::info!("wrote {n} travel time samples to {output_file}");
                Ok(())
            }
            TetresOperation::Moe {
                input,
                kind,
                output_file,
            } => {
                let inputs = input.load()?;
                let traffic = read_traffic_csv(&input.traffic_file)?;
                let records = inputs
                    .periods
                    .par_iter()
                    .map(|period| {
                        moe_records(kind, &inputs.route, period, &traffic, &inputs.config.moe)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let n = write_csv(&output_file, records.into_iter().flatten())?;
                log::info!("wrote {n} {kind} values to {output_file}");
                Ok(())
            }
            TetresOperation::Categorize {
                input,
                conditions_file,
                samples_file,
                rows_file,
            } => {
                let inputs = input.load()?;
                let traffic = read_traffic_csv(&input.traffic_file)?;
                let catalog = ConditionCatalog::from_json_file(&conditions_file)?;
                let store = Arc::new(InMemoryCategorizationStore::new());
                let n_workers = inputs.config.worker.n_workers;
                let route = Arc::new(inputs.route);
                let handler = Arc::new(TetresWorkHandler::new(
                    Arc::new(inputs.network),
                    Arc::new(traffic),
                    Arc::new(catalog),
                    store.clone(),
                    inputs.config,
                    inputs.periods.len(),
                ));

                let queue = TaskQueue::new(n_workers, handler.clone())?;
                let batch = BatchId::next();
                let units = WorkUnit::for_periods(
                    route.clone(),
                    &inputs.periods,
                    TaskKind::Categorization,
                    batch,
                );
                queue.submit_batch(units)?;
                queue.shutdown();
                if !handler.is_batch_complete(batch) {
                    log::warn!("batch {batch} did not report completion");
                }

                let samples = handler.take_samples();
                let n_failed = handler
                    .take_results()
                    .iter()
                    .filter(|(_, r)| r.has_error)
                    .count();
                if n_failed > 0 {
                    log::warn!("{n_failed} days have incomplete categorization");
                }
                let mut rows: Vec<CategorizationRow> = vec![];
                for class in ConditionClass::ALL {
                    rows.extend(store.rows(route.id, class, &input.start, &input.end)?);
                }
                write_json(&samples_file, &samples)?;
                write_json(&rows_file, &rows)?;
                log::info!(
                    "wrote {} samples to {samples_file} and {} categorization rows to {rows_file}",
                    samples.len(),
                    rows.len()
                );
                Ok(())
            }
            TetresOperation::Filter {
                samples_file,
                rows_file,
                conditions_file,
                filter_file,
                configuration_file,
                output_file,
                route_file,
                reliability_file,
            } => {
                let config = read_configuration(&configuration_file)?;
                let samples: Vec<TravelTimeSample> = read_json(&samples_file)?;
                let rows: Vec<CategorizationRow> = read_json(&rows_file)?;
                let catalog = ConditionCatalog::from_json_file(&conditions_file)?;
                let filter_config: FilterConfig = read_json(&filter_file)?;
                let filter = filter_config.build(&config.categorization)?;

                let categorized = assemble_samples(&samples, &rows, &catalog);
                let selected = categorized
                    .iter()
                    .zip(filter.select(&categorized))
                    .filter(|(_, selected)| *selected)
                    .map(|(s, _)| s)
                    .collect_vec();
                log::info!(
                    "filter '{}' kept {} of {} samples",
                    filter.name(),
                    selected.len(),
                    categorized.len()
                );
                if let Some(reliability_file) = reliability_file {
                    let route_file = route_file.ok_or_else(|| {
                        TetresCliError::InvalidArgument(String::from(
                            "--reliability-file requires --route-file",
                        ))
                    })?;
                    let route: Route = read_json(&route_file)?;
                    let summary = reliability_summary(&route, &selected, &config.reliability)?;
                    if summary.is_none() {
                        log::warn!("no determined travel times left for reliability measures");
                    }
                    write_json(&reliability_file, &summary)?;
                }
                write_csv(
                    &output_file,
                    selected.iter().map(|s| TravelTimeRecord::from(&s.sample)),
                )?;
                Ok(())
            }
        }
    }
}
