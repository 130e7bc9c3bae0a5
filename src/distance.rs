// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Coordinate;

/// Mean radius of Earth, in meters.
/// Source: https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius
const EARTH_RADIUS: f64 = 6_371_008.8;

/// Mean diameter of Earth, in meters.
const EARTH_DIAMETER: f64 = EARTH_RADIUS + EARTH_RADIUS;

/// Approximate length of one degree of latitude (and of longitude at the equator), in meters.
///
/// Used to bring [planar_distance] into the same unit as edge lengths.
/// Away from the equator a degree of longitude is shorter by a factor of cos(latitude),
/// which this constant ignores; at town scale the error is tolerable.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Calculates the euclidean distance between two positions, treating
/// raw latitude and longitude degrees as planar coordinates.
/// Returns the result in degrees.
///
/// Only meaningful for comparing positions a few hundred meters apart.
pub fn planar_distance(a: Coordinate, b: Coordinate) -> f64 {
    (a.lat - b.lat).hypot(a.lng - b.lng)
}

/// Calculates the great-circle distance between two lat-lon positions
/// on Earth using the `haversine formula <https://en.wikipedia.org/wiki/Haversine_formula>`_.
/// Returns the result in meters.
pub fn earth_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lon1 = a.lng.to_radians();
    let lat2 = b.lat.to_radians();
    let lon2 = b.lng.to_radians();

    let sin_dlat_half = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon_half = ((lon2 - lon1) * 0.5).sin();

    let h = sin_dlat_half * sin_dlat_half + lat1.cos() * lat2.cos() * sin_dlon_half * sin_dlon_half;

    EARTH_DIAMETER * h.sqrt().asin()
}
