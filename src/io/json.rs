//! JSON request documents:
//! `{"base_requests": [...], "render_settings": {...}, "stat_requests": [...]}`.

use std::collections::BTreeMap;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::CatalogueError,
    io::Network,
    render::{primitive::Primitive, settings::RenderSettings, MapRenderer},
    stats::Curvature,
};

const NOT_FOUND: &str = "not found";

#[derive(Debug, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    #[serde(default)]
    pub render_settings: Option<RenderSettings>,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopRequest),
    Bus(BusRequest),
}

#[derive(Debug, Deserialize)]
pub struct StopRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub road_distances: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
pub struct BusRequest {
    pub name: String,
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Map { id: i64 },
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatResponse {
    Bus {
        request_id: i64,
        curvature: Curvature,
        route_length: u64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Stop {
        request_id: i64,
        buses: Vec<String>,
    },
    Map {
        request_id: i64,
        map: Vec<Primitive>,
    },
    NotFound {
        request_id: i64,
        error_message: &'static str,
    },
}

impl Document {
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        serde_json::from_str(input).context("Failed to parse request document")
    }
}

/// Registers every stop, then every road distance, then every bus, so base
/// requests may appear in any order.
pub fn load(requests: &[BaseRequest]) -> anyhow::Result<Network> {
    let mut network = Network::new();

    let stops = requests.iter().filter_map(|r| match r {
        BaseRequest::Stop(stop) => Some(stop),
        BaseRequest::Bus(_) => None,
    });
    let buses = requests.iter().filter_map(|r| match r {
        BaseRequest::Bus(bus) => Some(bus),
        BaseRequest::Stop(_) => None,
    });

    for stop in stops.clone() {
        network.add_stop(&stop.name, stop.latitude, stop.longitude)?;
    }

    for stop in stops {
        for (to, &distance) in &stop.road_distances {
            if !network.set_distance(&stop.name, to, distance) {
                warn!(from = %stop.name, to = %to, "skipping road distance to unknown stop");
            }
        }
    }

    for bus in buses {
        network.add_bus(&bus.name, &bus.stops, bus.is_roundtrip)?;
    }

    info!(
        stops = network.catalogue.stop_count(),
        buses = network.catalogue.bus_count(),
        distances = network.distances.len(),
        "loaded network"
    );
    Ok(network)
}

pub fn answer(
    network: &Network,
    renderer: Option<&MapRenderer>,
    request: &StatRequest,
) -> anyhow::Result<StatResponse> {
    debug!(?request, "answering stat request");

    let response = match request {
        StatRequest::Bus { id, name } => match network.stats().route_info(name) {
            Ok(stat) => StatResponse::Bus {
                request_id: *id,
                curvature: stat.curvature,
                route_length: stat.route_length,
                stop_count: stat.stops_count,
                unique_stop_count: stat.unique_stops_count,
            },
            Err(CatalogueError::RouteNotFound(_)) => not_found(*id),
            Err(e) => return Err(e.into()),
        },
        StatRequest::Stop { id, name } => match network.catalogue.buses_through_stop(name) {
            Ok(buses) => StatResponse::Stop {
                request_id: *id,
                buses: buses.iter().cloned().collect(),
            },
            Err(CatalogueError::StopNotFound(_)) => not_found(*id),
            Err(e) => return Err(e.into()),
        },
        StatRequest::Map { id } => {
            let renderer = renderer
                .ok_or_else(|| anyhow!("Map request {id} requires render_settings"))?;
            StatResponse::Map {
                request_id: *id,
                map: renderer.render(&network.catalogue),
            }
        }
    };

    Ok(response)
}

fn not_found(request_id: i64) -> StatResponse {
    StatResponse::NotFound {
        request_id,
        error_message: NOT_FOUND,
    }
}

/// Loads the base requests of `input` and answers its stat requests in order.
pub fn process(input: &str) -> anyhow::Result<Vec<StatResponse>> {
    let document = Document::parse(input)?;
    let network = load(&document.base_requests)?;

    let renderer = document
        .render_settings
        .map(|settings| MapRenderer::new(settings).context("Invalid render_settings"))
        .transpose()?;

    document
        .stat_requests
        .iter()
        .map(|request| answer(&network, renderer.as_ref(), request))
        .collect()
}
