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

//! the process wide "almost equal" thresholds used by geometric comparisons.
//! The tolerances are owned by the application, which can set them exactly once before they are
//! first used (e.g. from a RON config file). Library code only reads them through [`tolerances()`]

use std::{path::Path, sync::OnceLock};
use serde::{Serialize,Deserialize};
use crate::{sq, within_epsilon, within_epsilon0, PI};
use crate::geo_constants::NM;
use crate::errors::{Result, OdinCommonError, tolerance_error};
use crate::config::load_config;

#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
#[serde(default)]
pub struct Tolerances {
    /// horizontal distance in meters below which positions are equal
    pub horizontal: f64,
    /// vertical distance in meters below which altitudes are equal
    pub vertical: f64,
    /// time difference in seconds below which times are equal
    pub time: f64,
}

impl Tolerances {
    pub const DEFAULT: Tolerances = Tolerances { horizontal: 1.0e-7, vertical: 1.0e-7, time: 1.0e-7 };

    /// the horizontal accuracy expressed as an angle on the NM sphere
    #[inline] pub fn lat_lon (&self)->f64 { (self.horizontal / NM) * PI / (180.0 * 60.0) }

    pub fn check (self)->Result<Self> {
        if !(self.horizontal > 0.0) { return Err( tolerance_error(format!("horizontal accuracy not positive: {}", self.horizontal))) }
        if !(self.vertical > 0.0) { return Err( tolerance_error(format!("vertical accuracy not positive: {}", self.vertical))) }
        if !(self.time > 0.0) { return Err( tolerance_error(format!("time accuracy not positive: {}", self.time))) }
        Ok(self)
    }

    pub fn from_ron_file (path: impl AsRef<Path>)->Result<Self> {
        let tol: Tolerances = load_config( path)?;
        tol.check()
    }
}

impl Default for Tolerances {
    fn default()->Self { Tolerances::DEFAULT }
}

static TOLERANCES: OnceLock<Tolerances> = OnceLock::new();

/// set the process wide tolerances. This fails if they were already set or used
pub fn set_tolerances (tol: Tolerances)->Result<()> {
    let tol = tol.check()?;
    TOLERANCES.set( tol).map_err( |_| OdinCommonError::ToleranceInitError)
}

/// the process wide tolerances (defaults if they have not been set)
#[inline] pub fn tolerances ()->&'static Tolerances {
    TOLERANCES.get_or_init( Tolerances::default)
}

#[inline] pub fn almost_equals_time (t1: f64, t2: f64)->bool { within_epsilon( t1, t2, tolerances().time) }

#[inline] pub fn almost_equals_xy (x1: f64, y1: f64, x2: f64, y2: f64)->bool {
    within_epsilon0( sq(x1-x2) + sq(y1-y2), sq(tolerances().horizontal))
}

#[inline] pub fn almost_equals_distance (d: f64)->bool { within_epsilon0( d, tolerances().horizontal) }

#[inline] pub fn almost_equals_radian (a1: f64, a2: f64)->bool { within_epsilon( a1, a2, tolerances().lat_lon()) }

#[inline] pub fn almost_zero_radian (a: f64)->bool { within_epsilon0( a, tolerances().lat_lon()) }

#[inline] pub fn almost_equals_alt (a1: f64, a2: f64)->bool { within_epsilon( a1, a2, tolerances().vertical) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ron_tolerances() {
        let tol: Tolerances = ron::from_str("(horizontal: 0.001)").unwrap();
        assert_eq!( tol.horizontal, 0.001);
        assert_eq!( tol.vertical, 1.0e-7);

        let res = Tolerances { horizontal: -1.0, ..Tolerances::DEFAULT }.check();
        assert!( res.is_err());
    }
}
