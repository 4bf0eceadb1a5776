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
#![allow(unused)]

use std::fmt;
use serde::{Serialize,Deserialize};
use odin_common::PI;
use odin_common::angle::{to_pi, to_pi2_cont, clockwise, Latitude, Longitude};
use odin_common::geo_constants::{SPHERICAL_EARTH_RADIUS, FT};
use crate::great_circle;
use crate::velocity::Velocity;

/// a geodesic position with latitude and longitude in radians and altitude in meters.
/// Values are stored as given - use [`LatLonAlt::normalize`] to fold them into their canonical ranges
#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct LatLonAlt {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

impl LatLonAlt {
    pub const ZERO: LatLonAlt = LatLonAlt { lat: 0.0, lon: 0.0, alt: 0.0 };
    pub const INVALID: LatLonAlt = LatLonAlt { lat: f64::NAN, lon: f64::NAN, alt: f64::NAN };

    #[inline] pub const fn new (lat: f64, lon: f64, alt: f64)->Self { LatLonAlt{lat,lon,alt} }

    /// from degrees and meters
    pub fn from_degrees (lat_deg: f64, lon_deg: f64, alt_m: f64)->Self {
        LatLonAlt { lat: lat_deg.to_radians(), lon: lon_deg.to_radians(), alt: alt_m }
    }

    /// from degrees and feet
    pub fn from_degrees_ft (lat_deg: f64, lon_deg: f64, alt_ft: f64)->Self {
        LatLonAlt::from_degrees( lat_deg, lon_deg, alt_ft * FT)
    }

    pub fn from_angles (lat: Latitude, lon: Longitude, alt: f64)->Self {
        LatLonAlt { lat: lat.radians(), lon: lon.radians(), alt }
    }

    /// fold latitude over the poles (shifting the longitude by π when doing so) and wrap the longitude
    pub fn normalize (&self)->Self {
        let lat = to_pi( self.lat);
        let nlat = to_pi2_cont( lat);
        let nlon = if lat != nlat { self.lon + PI } else { self.lon };
        LatLonAlt { lat: nlat, lon: to_pi( nlon), alt: self.alt }
    }

    #[inline] pub fn lat (&self)->f64 { self.lat }
    #[inline] pub fn lon (&self)->f64 { self.lon }
    #[inline] pub fn alt (&self)->f64 { self.alt }

    #[inline] pub fn lat_deg (&self)->f64 { self.lat.to_degrees() }
    #[inline] pub fn lon_deg (&self)->f64 { self.lon.to_degrees() }

    #[inline] pub fn with_alt (&self, alt: f64)->Self { LatLonAlt { alt, ..*self } }
    #[inline] pub fn zero_alt (&self)->Self { self.with_alt( 0.0) }

    #[inline] pub fn is_invalid (&self)->bool { self.lat.is_nan() || self.lon.is_nan() || self.alt.is_nan() }

    pub fn antipode (&self)->Self {
        LatLonAlt { lat: -self.lat, lon: to_pi( self.lon + PI), alt: self.alt }
    }

    /// is `self` west of `other`
    #[inline] pub fn is_west (&self, other: &LatLonAlt)->bool { clockwise( other.lon, self.lon) }

    /// great circle surface distance in meters
    #[inline] pub fn distance_h (&self, other: &LatLonAlt)->f64 { great_circle::distance( self, other) }

    /// flat earth estimate for a position offset by `dn` meters north and `de` meters east. Not valid near the poles
    pub fn linear_est (&self, dn: f64, de: f64)->Self {
        let r = SPHERICAL_EARTH_RADIUS;
        LatLonAlt { lat: self.lat + dn/r, lon: self.lon + de/(r * self.lat.cos()), alt: self.alt }
    }

    /// flat earth estimate for the position after moving with velocity `v` for `t` seconds
    pub fn linear_est_vel (&self, v: &Velocity, t: f64)->Self {
        self.linear_est( v.y() * t, v.x() * t).with_alt( self.alt + v.z() * t)
    }
}

impl fmt::Display for LatLonAlt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}°, {:.6}°, {:.1}m)", self.lat.to_degrees(), self.lon.to_degrees(), self.alt)
    }
}
