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
use odin_common::vect::Vect3;
use odin_common::geo_constants::{NM, FT};
use crate::velocity::Velocity;

/// euclidean position and velocity at a given time
#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct StateVector {
    pub s: Vect3,
    pub v: Velocity,
    pub t: f64,
}

impl StateVector {
    pub const ZERO: StateVector = StateVector { s: Vect3::ZERO, v: Velocity::ZERO, t: 0.0 };

    #[inline] pub fn new (s: Vect3, v: Velocity, t: f64)->Self { StateVector{s,v,t} }

    #[inline] pub fn from_pair (sv: (Vect3,Velocity), t: f64)->Self { StateVector{ s: sv.0, v: sv.1, t } }

    /// from user units: position in NM/NM/ft, velocity in deg/knots/fpm
    pub fn from_user_units (x_nm: f64, y_nm: f64, z_ft: f64, trk_deg: f64, gs_kn: f64, vs_fpm: f64, t: f64)->Self {
        let s = Vect3::new( x_nm * NM, y_nm * NM, z_ft * FT);
        StateVector { s, v: Velocity::from_deg_knots_fpm( trk_deg, gs_kn, vs_fpm), t }
    }

    #[inline] pub fn pair (&self)->(Vect3,Velocity) { (self.s, self.v) }

    #[inline] pub fn s (&self)->Vect3 { self.s }
    #[inline] pub fn v (&self)->Velocity { self.v }
    #[inline] pub fn t (&self)->f64 { self.t }

    /// straight line extrapolation by `dt` seconds
    pub fn linear (&self, dt: f64)->Self {
        StateVector { s: self.s.linear( &self.v.vect3(), dt), v: self.v, t: self.t + dt }
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:.2}s", self.s, self.v, self.t)
    }
}
