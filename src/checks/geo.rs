// src/checks/geo.rs

//! # Geospatial
//!
//! Two named points are added to `sellers`, then:
//! - `GEODIST` in kilometres must equal 0.3543 once rounded to four places;
//! - `GEOSEARCH` within 5 km of a query point must return both names,
//!   nearest first.
//!
//! The store computes distances with the haversine formula on a sphere of
//! radius [`EARTH_RADIUS_M`]; [`great_circle_km`] mirrors it so the literal
//! can be reproduced offline.

use crate::conn::Probe;
use crate::error::{ProbeError, expect_eq};

const KEY: &str = "sellers";

/// Earth radius used by the store's geo commands, in metres.
pub const EARTH_RADIUS_M: f64 = 6372797.560856;

/// (name, longitude, latitude)
pub const TOKO_A: (&str, f64, f64) = ("Toko A", 106.822702, -6.177590);
pub const TOKO_B: (&str, f64, f64) = ("Toko B", 106.820889, -6.174964);

/// Query point for the radius search.
pub const QUERY: (f64, f64) = (106.819143, -6.180182);

pub const EXPECTED_DISTANCE_KM: f64 = 0.3543;
pub const SEARCH_RADIUS_KM: f64 = 5.0;

/// Great-circle distance between two lon/lat pairs, in kilometres.
pub fn great_circle_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lon1, lat1, lon2, lat2) = (
        lon1.to_radians(),
        lat1.to_radians(),
        lon2.to_radians(),
        lat2.to_radians(),
    );
    let u = ((lat2 - lat1) / 2.0).sin();
    let v = ((lon2 - lon1) / 2.0).sin();
    let a = u * u + lat1.cos() * lat2.cos() * v * v;
    2.0 * EARTH_RADIUS_M * a.sqrt().asin() / 1000.0
}

/// Rounds to four decimal places, the precision `GEODIST` replies with.
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

pub async fn run(probe: &mut Probe) -> Result<(), ProbeError> {
    probe.purge(&[KEY]).await?;
    let key = probe.key(KEY);

    for (name, lon, lat) in [TOKO_A, TOKO_B] {
        let added: i64 = redis::cmd("GEOADD")
            .arg(&key)
            .arg(lon)
            .arg(lat)
            .arg(name)
            .query_async(probe.conn())
            .await?;
        expect_eq("geoadd", 1, added)?;
    }

    let dist: Option<f64> = redis::cmd("GEODIST")
        .arg(&key)
        .arg(TOKO_A.0)
        .arg(TOKO_B.0)
        .arg("km")
        .query_async(probe.conn())
        .await?;
    expect_eq("geodist km", Some(EXPECTED_DISTANCE_KM), dist.map(round4))?;

    let found: Vec<String> = redis::cmd("GEOSEARCH")
        .arg(&key)
        .arg("FROMLONLAT")
        .arg(QUERY.0)
        .arg(QUERY.1)
        .arg("BYRADIUS")
        .arg(SEARCH_RADIUS_KM)
        .arg("km")
        .arg("ASC")
        .query_async(probe.conn())
        .await?;
    expect_eq("geosearch", vec![TOKO_A.0, TOKO_B.0], found.iter().map(String::as_str).collect())?;

    probe.purge(&[KEY]).await?;
    Ok(())
}
