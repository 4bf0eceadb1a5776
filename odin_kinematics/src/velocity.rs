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
use std::ops::Neg;
use serde::{Serialize,Deserialize};
use odin_common::{PI, HALF_PI, atan2_safe, sqrt_safe};
use odin_common::vect::{Vect2, Vect3};
use odin_common::angle::{to_pi, to_2pi, turn_delta};
use odin_common::numeric::almost_equals;
use odin_common::geo_constants::{KNOT, FPM};

/// a velocity with both a polar (track, ground speed, vertical speed) and a cartesian (vx,vy,vz) view.
/// Track is the compass angle in radians, clockwise from north. The track of a velocity with zero ground
/// speed is kept from whatever it was derived from (0 if constructed from cartesian components)
#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct Velocity {
    trk: f64,
    gs: f64,
    v: Vect3,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { trk: 0.0, gs: 0.0, v: Vect3::ZERO };
    pub const INVALID: Velocity = Velocity { trk: f64::NAN, gs: f64::NAN, v: Vect3::INVALID };

    #[inline] const fn from_parts (trk: f64, gs: f64, vx: f64, vy: f64, vz: f64)->Self {
        Velocity { trk, gs, v: Vect3::new(vx,vy,vz) }
    }

    pub fn from_xyz (vx: f64, vy: f64, vz: f64)->Self {
        Velocity { trk: atan2_safe(vx,vy), gs: sqrt_safe(vx*vx + vy*vy), v: Vect3::new(vx,vy,vz) }
    }

    #[inline] pub fn from_vect3 (v: Vect3)->Self { Velocity::from_xyz( v.x, v.y, v.z) }

    #[inline] pub fn from_vect2 (v: Vect2)->Self { Velocity::from_xyz( v.x, v.y, 0.0) }

    pub fn from_trk_gs_vs (trk: f64, gs: f64, vs: f64)->Self {
        Velocity::from_parts( trk, gs, gs * trk.sin(), gs * trk.cos(), vs)
    }

    /// from user units (degrees, knots, feet per minute)
    pub fn from_deg_knots_fpm (trk_deg: f64, gs_kn: f64, vs_fpm: f64)->Self {
        Velocity::from_trk_gs_vs( trk_deg.to_radians(), gs_kn * KNOT, vs_fpm * FPM)
    }

    /// velocity with given speed pointing from p1 to p2
    pub fn from_points_speed (p1: &Vect3, p2: &Vect3, speed: f64)->Self {
        Velocity::from_vect3( (*p2 - *p1).hat().scal(speed))
    }

    /// the velocity that moves from p1 to p2 in dt
    pub fn from_points (p1: &Vect3, p2: &Vect3, dt: f64)->Self {
        Velocity::from_vect3( (*p2 - *p1).scal( 1.0/dt))
    }

    /// k·(v1 - v2)
    pub fn diff_scal (v1: &Vect3, v2: &Vect3, k: f64)->Self {
        Velocity::from_xyz( k*(v1.x - v2.x), k*(v1.y - v2.y), k*(v1.z - v2.z))
    }

    /// track from p1 to p2
    #[inline] pub fn track (p1: &Vect3, p2: &Vect3)->f64 { atan2_safe( p2.x - p1.x, p2.y - p1.y) }

    #[inline] pub fn vect3 (&self)->Vect3 { self.v }
    #[inline] pub fn vect2 (&self)->Vect2 { self.v.vect2() }
    #[inline] pub fn x (&self)->f64 { self.v.x }
    #[inline] pub fn y (&self)->f64 { self.v.y }
    #[inline] pub fn z (&self)->f64 { self.v.z }

    #[inline] pub fn trk (&self)->f64 { self.trk }
    #[inline] pub fn gs (&self)->f64 { self.gs }
    #[inline] pub fn vs (&self)->f64 { self.v.z }

    /// track in [0,2π)
    #[inline] pub fn compass_angle (&self)->f64 { to_2pi( self.trk) }

    /// math angle (counter clockwise from east) in (-π,π]
    #[inline] pub fn angle (&self)->f64 { to_pi( HALF_PI - self.trk) }

    #[inline] pub fn is_zero (&self)->bool { self.v.is_zero() }
    #[inline] pub fn is_invalid (&self)->bool { self.v.is_invalid() }

    /// unit horizontal direction of the track (also defined for zero ground speed)
    #[inline] pub fn hat_2d (&self)->Vect2 { Vect2::new( self.trk.sin(), self.trk.cos()) }

    pub fn with_trk (&self, trk: f64)->Self { Velocity::from_trk_gs_vs( trk, self.gs, self.v.z) }

    /// same track and vertical speed with a new ground speed. Negative ground speeds are invalid
    pub fn with_gs (&self, gs: f64)->Self {
        if gs < 0.0 {
            Velocity::INVALID
        } else if self.gs > 0.0 {
            let k = gs / self.gs;
            Velocity::from_parts( self.trk, gs, self.v.x * k, self.v.y * k, self.v.z)
        } else {
            Velocity::from_trk_gs_vs( self.trk, gs, self.v.z)
        }
    }

    #[inline] pub fn with_vs (&self, vs: f64)->Self { Velocity::from_parts( self.trk, self.gs, self.v.x, self.v.y, vs) }

    /// rotate the horizontal component by `atrk` (clockwise)
    pub fn with_added_trk (&self, atrk: f64)->Self {
        let (s,c) = atrk.sin_cos();
        Velocity::from_parts( to_pi( self.trk + atrk), self.gs, self.v.x*c + self.v.y*s, -self.v.x*s + self.v.y*c, self.v.z)
    }

    pub fn zero_small_vs (&self, threshold: f64)->Self {
        if self.v.z.abs() < threshold.abs() { self.with_vs(0.0) } else { *self }
    }

    /// if the horizontal components cancel out we keep the track
    pub fn add (&self, v: &Vect3)->Self {
        if almost_equals( self.v.x, -v.x) && almost_equals( self.v.y, -v.y) {
            Velocity::from_parts( self.trk, 0.0, 0.0, 0.0, self.v.z + v.z)
        } else {
            Velocity::from_xyz( self.v.x + v.x, self.v.y + v.y, self.v.z + v.z)
        }
    }

    pub fn sub (&self, v: &Vect3)->Self {
        if almost_equals( self.v.x, v.x) && almost_equals( self.v.y, v.y) {
            Velocity::from_parts( self.trk, 0.0, 0.0, 0.0, self.v.z - v.z)
        } else {
            Velocity::from_xyz( self.v.x - v.x, self.v.y - v.y, self.v.z - v.z)
        }
    }

    /// polar comparison with individual bounds for track, ground speed and vertical speed
    pub fn compare (&self, v: &Velocity, max_trk: f64, max_gs: f64, max_vs: f64)->bool {
        turn_delta( v.trk, self.trk) <= max_trk && (v.gs - self.gs).abs() <= max_gs && (v.vs() - self.vs()).abs() <= max_vs
    }

    /// cartesian comparison with a horizontal and a vertical bound
    pub fn compare_hv (&self, v: &Velocity, horiz_delta: f64, vert_delta: f64)->bool {
        (self.v.z - v.z()).abs() <= vert_delta && (self.vect2() - v.vect2()).norm() <= horiz_delta
    }

    /// linear interpolation of the cartesian components
    pub fn interpolate (&self, v: &Velocity, f: f64)->Self {
        Velocity::from_vect3( self.v + (v.v - self.v).scal(f))
    }
}

impl Neg for Velocity {
    type Output = Self;
    fn neg (self)->Self {
        Velocity::from_parts( to_pi( self.trk + PI), self.gs, -self.v.x, -self.v.y, -self.v.z)
    }
}

impl From<Vect3> for Velocity {
    fn from (v: Vect3)->Self { Velocity::from_vect3(v) }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}°, {:.3}kn, {:.3}fpm)", self.compass_angle().to_degrees(), self.gs / KNOT, self.v.z / FPM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_cartesian() {
        let v = Velocity::from_trk_gs_vs( PI/2.0, 100.0, 5.0);
        assert!( (v.x() - 100.0).abs() < 1e-9);
        assert!( v.y().abs() < 1e-9);

        let w = Velocity::from_xyz( v.x(), v.y(), v.z());
        assert!( (w.trk() - PI/2.0).abs() < 1e-12);
        assert!( (w.gs() - 100.0).abs() < 1e-9);

        assert!( Velocity::ZERO.with_gs(-1.0).is_invalid());
        assert!( Velocity::INVALID != Velocity::INVALID);
    }
}
