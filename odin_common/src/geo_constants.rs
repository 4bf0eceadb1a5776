/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

/// geodetic and kinematic constants that have to be consistent between all trajectory computations.
/// All values are in SI units (meters, seconds, radians)

use crate::PI;

/// meters per nautical mile (exact by definition)
pub const NM: f64 = 1852.0;

/// meters per foot
pub const FT: f64 = 0.3048;

/// m/s per knot
pub const KNOT: f64 = NM / 3600.0;

/// m/s per foot/minute
pub const FPM: f64 = FT / 60.0;

/// radius of the sphere on which one minute of arc is one nautical mile (~6366707m).
/// This is not the mean earth radius - it is what makes great circle distances consistent with NM based charts
pub const SPHERICAL_EARTH_RADIUS: f64 = NM * 180.0 * 60.0 / PI;

/// mean earth radius in meters
pub const MEAN_EARTH_RADIUS: f64 = 6371000.0;

/// semi major axis in meters
pub const EQATORIAL_EARTH_RADIUS: f64 = 6378137.0;

/// standard gravity in m/s²
pub const GRAVITY: f64 = 9.80665;

/// horizontal GPS accuracy limit (25ft) below which we consider positions to be identical
pub const GPS_LIMIT_HORIZONTAL: f64 = 25.0 * FT;

/// vertical GPS accuracy limit (25ft)
pub const GPS_LIMIT_VERTICAL: f64 = 25.0 * FT;

/// time horizon in seconds below which we consider times to be identical for trajectory purposes
pub const TIME_LIMIT_EPSILON: f64 = 1.0;

