use chrono::{Duration, NaiveDateTime};
use itertools::Itertools;
use std::collections::HashSet;
use std::sync::Arc;
use tetres::app::TetresWorkHandler;
use tetres::categorization::{
    categorize, CategorizationContext, CategorizationParameters, CategorizationStore,
    InMemoryCategorizationStore, NoopLock, SharedLock, SuppliedConditions,
};
use tetres::condition::{
    ConditionCatalog, ConditionClass, Incident, SpecialEvent, WeatherReading, WeatherStation,
    WorkZone,
};
use tetres::config::TetresConfiguration;
use tetres::worker::{BatchId, TaskKind, TaskQueue, WorkUnit};
use tetres_core::model::{
    Corridor, CorridorId, InMemoryTrafficReader, Period, Route, RouteId, RouteNode,
    RouteNodeType, TrafficVariable, TravelTimeSample,
};
use tetres_core::{CorridorNetwork, TravelTimeParameters};

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("test invariant failed")
}

fn corridor_nodes() -> Vec<RouteNode> {
    (0..12)
        .map(|i| RouteNode {
            name: format!("rnd_{i}"),
            corridor: CorridorId::from("I-94 (EB)"),
            node_type: RouteNodeType::Station,
            station_id: Some(format!("S{i}")),
            lat: 44.90 + 0.01 * i as f64,
            lon: -93.10,
            lanes: 3,
            speed_limit: 60.0,
        })
        .collect_vec()
}

fn network() -> CorridorNetwork {
    let corridor = Corridor::new(CorridorId::from("I-94 (EB)"), corridor_nodes());
    CorridorNetwork::new(vec![corridor]).expect("test invariant failed")
}

fn route() -> Route {
    Route::new(RouteId(3), "94 EB", corridor_nodes()[3..=6].to_vec())
}

fn sub_route(id: u64, from: usize, to: usize) -> Route {
    Route::new(RouteId(id), "sub", corridor_nodes()[from..=to].to_vec())
}

fn period() -> Period {
    Period::new(dt("2024-03-12 16:00"), dt("2024-03-12 18:00"), 900)
}

fn samples(route: &Route, period: &Period) -> Vec<TravelTimeSample> {
    period
        .timeline()
        .map(|time| TravelTimeSample {
            id: TravelTimeSample::derive_id(route.id, &time),
            route_id: route.id,
            time,
            travel_time: 3.0,
            moe: None,
        })
        .collect_vec()
}

fn catalog() -> ConditionCatalog {
    let readings = (0..6)
        .map(|h| WeatherReading {
            id: 100 + h,
            station_id: String::from("KSTP"),
            time: dt("2024-03-12 14:00") + Duration::hours(h as i64),
            precip_type: 2,
            intensity: 1,
            precip: Some(0.05),
        })
        .collect_vec();
    ConditionCatalog {
        weather_stations: vec![WeatherStation {
            id: String::from("KSTP"),
            name: String::from("st paul downtown"),
            lat: 44.93,
            lon: -93.05,
            begin: None,
            end: None,
        }],
        weather_readings: readings,
        incidents: vec![Incident {
            id: 7,
            incident_type: String::from("crash"),
            classification: Some(String::from("property damage")),
            severity: Some(2),
            lat: 44.945,
            lon: -93.10,
            cdts: dt("2024-03-12 16:20"),
            udts: None,
            xdts: Some(dt("2024-03-12 17:05")),
        }],
        work_zones: vec![WorkZone {
            id: 9,
            start: dt("2024-03-01 00:00"),
            end: dt("2024-03-30 00:00"),
            route1: sub_route(90, 5, 7),
            route2: sub_route(91, 5, 7),
            features: vec![],
            lane_configs: vec![],
        }],
        special_events: vec![SpecialEvent {
            id: 11,
            name: String::from("hockey"),
            start: dt("2024-03-12 19:00"),
            end: dt("2024-03-12 21:30"),
            lat: 44.945,
            lon: -93.101,
            attendance: 17000,
        }],
        snow_managements: vec![],
    }
}

struct Inputs {
    route: Route,
    period: Period,
    samples: Vec<TravelTimeSample>,
    network: CorridorNetwork,
    catalog: ConditionCatalog,
    supplied: SuppliedConditions,
    params: CategorizationParameters,
}

impl Inputs {
    fn new() -> Inputs {
        let route = route();
        let period = period();
        let samples = samples(&route, &period);
        Inputs {
            route,
            period,
            samples,
            network: network(),
            catalog: catalog(),
            supplied: SuppliedConditions::default(),
            params: CategorizationParameters::default(),
        }
    }

    fn context(&self) -> CategorizationContext<'_> {
        CategorizationContext {
            route: &self.route,
            period: &self.period,
            samples: &self.samples,
            network: &self.network,
            source: &self.catalog,
            supplied: &self.supplied,
            params: &self.params,
        }
    }
}

fn all_rows(store: &InMemoryCategorizationStore) -> Vec<(ConditionClass, u64, u64)> {
    ConditionClass::ALL
        .into_iter()
        .flat_map(|class| store.table(class))
        .map(|r| (r.class, r.sample_id.0, r.condition_id))
        .sorted()
        .collect_vec()
}

#[test]
fn test_categorize_is_idempotent() {
    let inputs = Inputs::new();
    let store = InMemoryCategorizationStore::new();
    let first = categorize(&inputs.context(), &store, &NoopLock);
    let first_rows = all_rows(&store);
    let second = categorize(&inputs.context(), &store, &NoopLock);
    assert_eq!(first, second);
    assert_eq!(first_rows, all_rows(&store));
    assert!(!first.has_error);

    // 8 samples; weather on all of them, incident 16:30 to 17:00
    assert_eq!(first.count(ConditionClass::Weather), Some(8));
    assert_eq!(first.count(ConditionClass::Incident), Some(3));
    assert_eq!(first.count(ConditionClass::WorkZone), Some(8));
    // arrival window opens at 16:30
    assert_eq!(first.count(ConditionClass::SpecialEvent), Some(7));
    assert_eq!(first.count(ConditionClass::SnowManagement), Some(0));
}

#[test]
fn test_concurrent_categorization_never_duplicates_rows() {
    let inputs = Inputs::new();
    let store = InMemoryCategorizationStore::new();
    let lock = SharedLock::new();
    let expected = categorize(&inputs.context(), &store, &lock).total_inserted() as usize;

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let lock = lock.clone();
            let store = &store;
            let inputs = &inputs;
            scope.spawn(move || {
                for _ in 0..5 {
                    let result = categorize(&inputs.context(), store, &lock);
                    assert!(!result.has_error);
                }
            });
        }
    });

    let rows = all_rows(&store);
    let unique = rows.iter().collect::<HashSet<_>>();
    assert_eq!(rows.len(), expected);
    assert_eq!(unique.len(), rows.len());
}

#[test]
fn test_failing_class_leaves_other_classes_intact() {
    let inputs = Inputs::new();
    let store = InMemoryCategorizationStore::new();
    store.fail_inserts_for(ConditionClass::WorkZone);
    let result = categorize(&inputs.context(), &store, &NoopLock);
    assert!(result.has_error);
    assert_eq!(result.count(ConditionClass::WorkZone), Some(-1));
    assert_eq!(result.count(ConditionClass::Incident), Some(3));
    assert!(store.table(ConditionClass::WorkZone).is_empty());
    let rows = store
        .rows(
            inputs.route.id,
            ConditionClass::Weather,
            &inputs.period.start,
            &inputs.period.end,
        )
        .expect("test invariant failed");
    assert_eq!(rows.len(), 8);
}

#[test]
fn test_worker_pool_categorizes_each_day() {
    let route = Arc::new(route());
    let span = Period::new(dt("2024-03-11 16:00"), dt("2024-03-12 18:00"), 900);
    let periods = span.daily_periods();
    assert_eq!(periods.len(), 2);

    let extension = TravelTimeParameters::default().extension_hours;
    let mut traffic = InMemoryTrafficReader::new();
    for node in route.nodes.iter() {
        let station = node.station_id.clone().expect("test invariant failed");
        for period in periods.iter() {
            for time in period.extend_end_hours(extension).timeline() {
                traffic.insert(&station, TrafficVariable::Speed, time, 60.0);
                traffic.insert(&station, TrafficVariable::TotalFlow, time, 3000.0);
                traffic.insert(&station, TrafficVariable::Density, time, 16.7);
            }
        }
    }

    let store = Arc::new(InMemoryCategorizationStore::new());
    let mut config = TetresConfiguration::default();
    config.worker.n_workers = 2;
    let handler = Arc::new(TetresWorkHandler::new(
        Arc::new(network()),
        Arc::new(traffic),
        Arc::new(catalog()),
        store.clone(),
        config,
        periods.len(),
    ));
    let queue = TaskQueue::new(2, handler.clone()).expect("test invariant failed");
    let batch = BatchId::next();
    let units = WorkUnit::for_periods(route.clone(), &periods, TaskKind::Categorization, batch);
    queue.submit_batch(units).expect("test invariant failed");
    queue.shutdown();

    assert!(handler.is_batch_complete(batch));
    let samples = handler.take_samples();
    assert_eq!(samples.len(), 16);
    // one minute per mile at 60 mph, within one virtual node of the length
    assert!(samples
        .iter()
        .all(|s| (s.travel_time - route.length()).abs() < 0.2));
    assert!(samples.iter().all(|s| s.moe.is_some()));

    let results = handler.take_results();
    assert_eq!(results.len(), 2);
    // readings only exist on the second day
    assert!(results[0].1.has_error);
    assert!(!results[1].1.has_error);
    assert_eq!(store.table(ConditionClass::WorkZone).len(), 16);
}
