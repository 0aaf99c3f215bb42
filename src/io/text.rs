//! Line-oriented command format.
//!
//! ```text
//! Stop Tolstopaltsevo: 55.611087, 37.20829, 3900m to Marushkino
//! Bus 256: Biryulyovo Zapadnoye > Biryusinka > Biryulyovo Zapadnoye
//! Bus 750: Tolstopaltsevo - Marushkino - Rasskazovka
//! Bus 256
//! Stop Marushkino
//! ```
//!
//! Lines with a colon describe the network, lines without one are queries.
//! `>` separates the stops of a roundtrip route, `-` those of an out-and-back
//! route.

use std::io::BufRead;

use anyhow::{anyhow, bail, Context};
use tracing::{debug, info, warn};

use crate::{io::Network, stats::Curvature};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Stop {
        name: String,
        lat: f64,
        lng: f64,
        distances: Vec<(String, u32)>,
    },
    Bus {
        number: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Bus(String),
    Stop(String),
}

#[derive(Debug, Default)]
pub struct Script {
    pub commands: Vec<Command>,
    pub queries: Vec<Query>,
}

pub fn parse<R: BufRead>(rdr: R) -> anyhow::Result<Script> {
    let mut script = Script::default();

    for (n, l) in rdr.lines().enumerate() {
        let line = l?;
        let line = line.trim();

        // Blank lines and the request counts of the original line protocol.
        if line.is_empty() || line.parse::<usize>().is_ok() {
            continue;
        }

        if line.contains(':') {
            let command = parse_command(line)
                .with_context(|| format!("Invalid command on line {}: {line}", n + 1))?;
            script.commands.push(command);
        } else {
            let query = parse_query(line)
                .with_context(|| format!("Invalid query on line {}: {line}", n + 1))?;
            script.queries.push(query);
        }
    }

    Ok(script)
}

fn parse_command(line: &str) -> anyhow::Result<Command> {
    let (head, body) = line.split_once(':').context("Expected ':'")?;
    let (kind, name) = head
        .trim()
        .split_once(' ')
        .context("Expected a command and a name")?;
    let name = name.trim();
    if name.is_empty() {
        bail!("Missing name");
    }

    match kind {
        "Stop" => parse_stop(name, body),
        "Bus" => Ok(parse_bus(name, body)),
        _ => Err(anyhow!("Unknown command {kind}")),
    }
}

fn parse_stop(name: &str, body: &str) -> anyhow::Result<Command> {
    let mut tokens = body.split(',').map(str::trim);

    let lat = tokens
        .next()
        .context("Missing latitude")?
        .parse::<f64>()
        .context("Failed to parse latitude")?;
    let lng = tokens
        .next()
        .context("Missing longitude")?
        .parse::<f64>()
        .context("Failed to parse longitude")?;

    let distances = tokens
        .map(|token| {
            let (meters, to) = token
                .split_once("m to ")
                .with_context(|| format!("Invalid distance: {token}"))?;
            let meters = meters
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Failed to parse distance: {token}"))?;
            Ok((to.trim().to_owned(), meters))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Command::Stop {
        name: name.to_owned(),
        lat,
        lng,
        distances,
    })
}

fn parse_bus(number: &str, body: &str) -> Command {
    let is_roundtrip = body.contains('>');
    let delimiter = if is_roundtrip { '>' } else { '-' };

    let stops = body
        .split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();

    Command::Bus {
        number: number.to_owned(),
        stops,
        is_roundtrip,
    }
}

fn parse_query(line: &str) -> anyhow::Result<Query> {
    let (kind, name) = line
        .split_once(' ')
        .context("Expected a query type and a name")?;
    let name = name.trim().to_owned();

    match kind {
        "Bus" => Ok(Query::Bus(name)),
        "Stop" => Ok(Query::Stop(name)),
        _ => Err(anyhow!("Unknown query {kind}")),
    }
}

pub fn load(commands: &[Command]) -> anyhow::Result<Network> {
    let mut network = Network::new();

    for command in commands {
        if let Command::Stop { name, lat, lng, .. } = command {
            network.add_stop(name, *lat, *lng)?;
        }
    }

    for command in commands {
        if let Command::Stop {
            name, distances, ..
        } = command
        {
            for (to, distance) in distances {
                if !network.set_distance(name, to, *distance) {
                    warn!(from = %name, to = %to, "skipping road distance to unknown stop");
                }
            }
        }
    }

    for command in commands {
        if let Command::Bus {
            number,
            stops,
            is_roundtrip,
        } = command
        {
            network.add_bus(number, stops, *is_roundtrip)?;
        }
    }

    info!(
        stops = network.catalogue.stop_count(),
        buses = network.catalogue.bus_count(),
        "loaded network"
    );
    Ok(network)
}

pub fn answer(network: &Network, query: &Query) -> String {
    debug!(?query, "answering query");

    match query {
        Query::Bus(number) => match network.stats().route_info(number) {
            Ok(stat) => format!(
                "Bus {number}: {} stops on route, {} unique stops, {} route length, {}",
                stat.stops_count,
                stat.unique_stops_count,
                stat.route_length,
                match stat.curvature {
                    Curvature::Ratio(ratio) => format!("{} curvature", significant(ratio, 6)),
                    Curvature::Undefined => "undefined curvature".to_owned(),
                }
            ),
            Err(_) => format!("Bus {number}: not found"),
        },
        Query::Stop(name) => match network.catalogue.buses_through_stop(name) {
            Ok(buses) if buses.is_empty() => format!("Stop {name}: no buses"),
            Ok(buses) => format!(
                "Stop {name}: buses {}",
                buses.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
            ),
            Err(_) => format!("Stop {name}: not found"),
        },
    }
}

pub fn process<R: BufRead>(rdr: R) -> anyhow::Result<Vec<String>> {
    let script = parse(rdr)?;
    let network = load(&script.commands)?;

    Ok(script
        .queries
        .iter()
        .map(|query| answer(&network, query))
        .collect())
}

/// Formats `value` like printf `%g` with `digits` significant digits:
/// fixed notation unless the decimal exponent is below -4 or at least
/// `digits`, trailing zeros dropped either way.
fn significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }

    let precision = digits.saturating_sub(1);
    let scientific = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();

    if exponent < -4 || exponent >= digits as i32 {
        return format!("{}e{exponent:+03}", trim_fraction(mantissa));
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_owned()
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
