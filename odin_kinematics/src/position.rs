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
use odin_common::{HALF_PI, error, warn};
use odin_common::vect::{Vect2, Vect3};
use odin_common::tolerance::{almost_equals_xy, almost_equals_alt};
use crate::lat_lon_alt::LatLonAlt;
use crate::velocity::Velocity;
use crate::great_circle;
use crate::vect_funs;
use crate::errors::{Result, OdinKinematicsError};

/// minimum distance for which we compute final courses in [`Position::linear_dist_2d_gs`]
pub const MIN_DIST: f64 = 1.0e-9;

/// horizon for [`Position::intersects_moving_segment`]
pub const MOVING_SEGMENT_HORIZON: f64 = 10.0 * 3600.0;

/// beyond this latitude flat earth estimates are replaced by great circle computations
const MAX_EST_LAT: f64 = 85.0 * std::f64::consts::PI / 180.0;

/// a position that is either geodesic (lat/lon/alt in radians and meters) or euclidean (x/y/z in meters).
///
/// Each variant has a view in the other frame (flat x is longitude, y is latitude) so that accessors are total,
/// but binary operations that need both arguments in the same frame return
/// [`OdinKinematicsError::InconsistentFrames`] if they are not
#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub enum Position {
    Geodesic(LatLonAlt),
    Flat(Vect3),
}

use Position::*;

impl Position {
    pub const ZERO_LL: Position = Geodesic( LatLonAlt::ZERO);
    pub const ZERO_XYZ: Position = Flat( Vect3::ZERO);
    pub const INVALID: Position = Flat( Vect3::INVALID);

    #[inline] pub fn from_lat_lon_alt (lat: f64, lon: f64, alt: f64)->Self { Geodesic( LatLonAlt::new( lat, lon, alt)) }
    #[inline] pub fn from_xyz (x: f64, y: f64, z: f64)->Self { Flat( Vect3::new( x, y, z)) }

    #[inline] pub fn is_lat_lon (&self)->bool { matches!( self, Geodesic(_)) }

    pub fn is_invalid (&self)->bool {
        match self {
            Geodesic(lla) => lla.is_invalid(),
            Flat(v) => v.is_invalid()
        }
    }

    /// euclidean view (x = lon, y = lat for geodesic positions)
    pub fn vect3 (&self)->Vect3 {
        match self {
            Geodesic(lla) => Vect3::new( lla.lon, lla.lat, lla.alt),
            Flat(v) => *v
        }
    }

    #[inline] pub fn vect2 (&self)->Vect2 { self.vect3().vect2() }

    /// geodesic view (lat = y, lon = x for flat positions)
    pub fn lla (&self)->LatLonAlt {
        match self {
            Geodesic(lla) => *lla,
            Flat(v) => LatLonAlt::new( v.y, v.x, v.z)
        }
    }

    #[inline] pub fn x (&self)->f64 { self.vect3().x }
    #[inline] pub fn y (&self)->f64 { self.vect3().y }
    #[inline] pub fn z (&self)->f64 { self.vect3().z }
    #[inline] pub fn lat (&self)->f64 { self.lla().lat }
    #[inline] pub fn lon (&self)->f64 { self.lla().lon }
    #[inline] pub fn alt (&self)->f64 { self.lla().alt }

    pub fn with_x (&self, x: f64)->Self {
        match self {
            Geodesic(lla) => Geodesic( LatLonAlt { lon: x, ..*lla }),
            Flat(v) => Flat( v.with_x(x))
        }
    }

    pub fn with_y (&self, y: f64)->Self {
        match self {
            Geodesic(lla) => Geodesic( LatLonAlt { lat: y, ..*lla }),
            Flat(v) => Flat( v.with_y(y))
        }
    }

    /// new position with the given altitude (z coordinate)
    pub fn with_z (&self, z: f64)->Self {
        match self {
            Geodesic(lla) => Geodesic( lla.with_alt(z)),
            Flat(v) => Flat( v.with_z(z))
        }
    }

    #[inline] pub fn with_alt (&self, alt: f64)->Self { self.with_z( alt) }
    #[inline] pub fn zero_alt (&self)->Self { self.with_z( 0.0) }

    /* #region comparison ****************************************************************************************/

    /// equality within the configured tolerances
    pub fn almost_equals (&self, p: &Position)->bool {
        match self {
            Geodesic(lla) => great_circle::almost_equals( lla, &p.lla()),
            Flat(v) => {
                let pv = p.vect3();
                almost_equals_xy( v.x, v.y, pv.x, pv.y) && almost_equals_alt( v.z, pv.z)
            }
        }
    }

    pub fn almost_equals_eps (&self, p: &Position, horiz_eps: f64, vert_eps: f64)->bool {
        match self {
            Geodesic(lla) => great_circle::almost_equals_eps( lla, &p.lla(), horiz_eps, vert_eps),
            Flat(v) => v.within_epsilon( &p.vect3(), vert_eps)
        }
    }

    pub fn almost_equals_2d (&self, p: &Position, horiz_eps: f64)->bool {
        match self {
            Geodesic(lla) => great_circle::almost_equals_2d( lla, &p.lla(), horiz_eps),
            Flat(v) => v.almost_equals_2d( &p.vect3(), horiz_eps)
        }
    }

    /* #endregion comparison */

    /* #region distances *****************************************************************************************/

    pub fn distance_h (&self, p: &Position)->f64 {
        match self {
            Geodesic(lla) => great_circle::distance( lla, &p.lla()),
            Flat(v) => (v.vect2() - p.vect2()).norm()
        }
    }

    #[inline] pub fn distance_v (&self, p: &Position)->f64 { (self.z() - p.z()).abs() }
    #[inline] pub fn signed_distance_v (&self, p: &Position)->f64 { self.z() - p.z() }

    /// loss of separation with horizontal distance `d` and vertical distance `h`. Invalid positions never
    /// lose separation
    pub fn los (&self, p2: &Position, d: f64, h: f64)->Result<bool> {
        if p2.is_invalid() { return Ok(false) }
        check_frames( "los", self, p2)?;
        Ok( self.distance_h(p2) < d && self.distance_v(p2) < h)
    }

    /* #endregion distances */

    /* #region linear motion *************************************************************************************/

    /// position after moving with `v` for `t` seconds (great circle for geodesic positions)
    pub fn linear (&self, v: &Velocity, t: f64)->Self {
        if t == 0.0 || v.is_zero() { return *self }

        match self {
            Geodesic(lla) => Geodesic( great_circle::linear_initial( lla, v, t)),
            Flat(s) => Flat( s.linear( &v.vect3(), t))
        }
    }

    /// offset by `dn` meters north and `de` meters east (flat earth estimate for geodesic positions)
    pub fn linear_est (&self, dn: f64, de: f64)->Self {
        match self {
            Geodesic(lla) => Geodesic( lla.linear_est( dn, de)),
            Flat(s) => Flat( Vect3::new( s.x + de, s.y + dn, s.z))
        }
    }

    /// estimated position after moving with `v` for `t` seconds. Near the poles this uses great circles
    pub fn linear_est_vel (&self, v: &Velocity, t: f64)->Self {
        match self {
            Geodesic(lla) => {
                if lla.lat.abs() > MAX_EST_LAT {
                    Geodesic( great_circle::linear_initial( lla, v, t))
                } else {
                    Geodesic( lla.linear_est_vel( v, t))
                }
            }
            Flat(_) => self.linear( v, t)
        }
    }

    /// horizontal move by distance `d` along `track`
    pub fn linear_dist_2d (&self, track: f64, d: f64)->Self {
        match self {
            Geodesic(lla) => Geodesic( great_circle::linear_initial_dist( lla, track, d)),
            Flat(s) => Flat( s.linear_by_dist_2d( track, d))
        }
    }

    /// horizontal move by distance `d` along `track`, returning the new position and the velocity at that point
    /// with ground speed `gs_at_d` (and the final course for geodesic positions)
    pub fn linear_dist_2d_gs (&self, track: f64, d: f64, gs_at_d: f64)->(Self,Velocity) {
        match self {
            Geodesic(lla) => {
                if d > MIN_DIST {
                    let p = great_circle::linear_initial_dist( lla, track, d);
                    let final_trk = great_circle::final_course( lla, &p);
                    (Geodesic(p), Velocity::from_trk_gs_vs( final_trk, gs_at_d, 0.0))
                } else {
                    (*self, Velocity::from_trk_gs_vs( track, gs_at_d, 0.0))
                }
            }
            Flat(s) => (Flat( s.linear_by_dist_2d( track, d)), Velocity::from_trk_gs_vs( track, gs_at_d, 0.0))
        }
    }

    pub fn mid_point (&self, p2: &Position)->Self { self.interpolate( p2, 0.5) }

    pub fn interpolate (&self, p2: &Position, f: f64)->Self {
        match self {
            Geodesic(lla) => Geodesic( great_circle::interpolate( lla, &p2.lla(), f)),
            Flat(s) => Flat( vect_funs::interpolate( s, &p2.vect3(), f))
        }
    }

    /* #endregion linear motion */

    /* #region courses and velocities ****************************************************************************/

    /// compass track from self to p (initial great circle course for geodesic positions)
    pub fn track (&self, p: &Position)->Result<f64> {
        match (self, p) {
            (Geodesic(a), Geodesic(b)) => Ok( great_circle::initial_course( a, b)),
            (Flat(a), Flat(b)) => Ok( (*b - *a).vect2().compass_angle()),
            _ => Err( inconsistent( "track"))
        }
    }

    /// track at the midpoint of self-p
    pub fn representative_track (&self, p: &Position)->Result<f64> {
        match (self, p) {
            (Geodesic(a), Geodesic(b)) => Ok( great_circle::representative_course( a, b)),
            (Flat(a), Flat(b)) => Ok( (*b - *a).vect2().compass_angle()),
            _ => Err( inconsistent( "representative_track"))
        }
    }

    /// velocity at self when moving to p in `dt` seconds. ZERO for non-positive `dt`
    pub fn initial_velocity (&self, p: &Position, dt: f64)->Velocity {
        if dt <= 0.0 { return Velocity::ZERO }
        match self {
            Geodesic(lla) => great_circle::velocity_initial( lla, &p.lla(), dt),
            Flat(s) => Velocity::from_points( s, &p.vect3(), dt)
        }
    }

    /// velocity when arriving at p after moving from self in `dt` seconds. ZERO for non-positive `dt`
    pub fn final_velocity (&self, p: &Position, dt: f64)->Velocity {
        if dt <= 0.0 { return Velocity::ZERO }
        match self {
            Geodesic(lla) => great_circle::velocity_final( lla, &p.lla(), dt),
            Flat(s) => Velocity::from_points( s, &p.vect3(), dt)
        }
    }

    /// velocity with the given speed at the midpoint between self and p2
    pub fn average_velocity (&self, p2: &Position, speed: f64)->Result<Velocity> {
        match (self, p2) {
            (Geodesic(a), Geodesic(b)) => Ok( great_circle::velocity_average_speed( a, b, speed)),
            (Flat(a), Flat(b)) => Ok( Velocity::from_points_speed( a, b, speed)),
            _ => Err( inconsistent( "average_velocity"))
        }
    }

    /// velocity at the midpoint when moving from self to p2 in `dt` seconds
    pub fn avg_velocity (&self, p2: &Position, dt: f64)->Result<Velocity> {
        match (self, p2) {
            (Geodesic(a), Geodesic(b)) => Ok( great_circle::velocity_average( a, b, dt)),
            (Flat(a), Flat(b)) => Ok( Velocity::from_points( a, b, dt)),
            _ => Err( inconsistent( "avg_velocity"))
        }
    }

    pub fn is_west (&self, a: &Position)->bool {
        match self {
            Geodesic(lla) => lla.is_west( &a.lla()),
            Flat(s) => s.x < a.x()
        }
    }

    /* #endregion courses and velocities */

    /* #region intersections *************************************************************************************/

    /// intersection of two straight (or great circle) tracks and the time it takes `so` to reach it
    pub fn intersection (so: &Position, vo: &Velocity, si: &Position, vi: &Velocity)->Result<Option<(Position,f64)>> {
        match (so, si) {
            (Geodesic(a), Geodesic(b)) => Ok( great_circle::intersection_velocity( a, vo, b, vi).map( |(p,t)| (Geodesic(p), t))),
            (Flat(a), Flat(b)) => Ok( vect_funs::intersection( a, vo, b, vi).map( |(p,t)| (Flat(p), t))),
            _ => Err( inconsistent( "intersection"))
        }
    }

    /// horizontal intersection of the lines so-so2 and si-si2 (at the altitude of so)
    pub fn intersection_2d (so: &Position, so2: &Position, si: &Position, si2: &Position)->Result<Option<Position>> {
        match (so, so2, si, si2) {
            (Geodesic(a), Geodesic(a2), Geodesic(b), Geodesic(b2)) => {
                Ok( great_circle::intersection( a, a2, b, b2).map( Geodesic))
            }
            (Flat(a), Flat(a2), Flat(b), Flat(b2)) => {
                Ok( vect_funs::intersection_2d_points( &a.vect2(), &a2.vect2(), 1.0, &b.vect2(), &b2.vect2())
                    .map( |(p,_)| Flat( Vect3::from_vect2( p, a.z))))
            }
            _ => Err( inconsistent( "intersection_2d"))
        }
    }

    /// intersection point of the segments so-so2 and si-si2, None if they do not intersect
    pub fn intersect_segments_2d (so: &Position, so2: &Position, si: &Position, si2: &Position)->Result<Option<Position>> {
        match (so, so2, si, si2) {
            (Geodesic(a), Geodesic(a2), Geodesic(b), Geodesic(b2)) => {
                Ok( great_circle::intersect_segments( a, a2, b, b2).map( Geodesic))
            }
            (Flat(a), Flat(a2), Flat(b), Flat(b2)) => {
                Ok( vect_funs::intersect_segments( &a.vect2(), &a2.vect2(), &b.vect2(), &b2.vect2())
                    .map( |(p,_)| Flat( Vect3::from_vect2( p, a.z))))
            }
            _ => Err( inconsistent( "intersect_segments_2d"))
        }
    }

    /// intersection of `so` moving with `vo` relative to the segment si-si2 that moves with `vi`, within `tt` seconds
    pub fn intersection_moving_segment (so: &Position, vo: &Velocity, si: &Position, si2: &Position, vi: &Velocity, tt: f64)->Result<Option<Position>> {
        if let Geodesic(lla) = so {
            let so2 = great_circle::linear_initial( lla, vo, tt);
            let d = great_circle::angular_distance( lla, &so2);
            if d > HALF_PI {
                warn!("moving segment horizon {}s too large (angular distance {:.1}°)", tt, d.to_degrees());
            }
        }

        let rel_vel = vo.sub( &vi.vect3());
        let so2 = so.linear( &rel_vel, tt);
        Position::intersect_segments_2d( so, &so2, si, si2)
    }

    pub fn intersects_moving_segment (so: &Position, vo: &Velocity, si: &Position, si2: &Position, vi: &Velocity)->Result<bool> {
        Ok( Position::intersection_moving_segment( so, vo, si, si2, vi, MOVING_SEGMENT_HORIZON)?.is_some())
    }

    /// intersection of the lines so-so2 (flown in `dto` seconds) and si-si2 with averaged altitude, plus the
    /// time relative to `so`
    pub fn intersection_avg (so: &Position, so2: &Position, dto: f64, si: &Position, si2: &Position)->Result<Option<(Position,f64)>> {
        match (so, so2, si, si2) {
            (Geodesic(a), Geodesic(a2), Geodesic(b), Geodesic(b2)) => {
                Ok( great_circle::intersection_avg_alt( a, a2, dto, b, b2).map( |(p,t)| (Geodesic(p), t)))
            }
            (Flat(a), Flat(a2), Flat(b), Flat(b2)) => {
                Ok( vect_funs::intersection_avg_z( a, a2, dto, b, b2).map( |(p,t)| (Flat(p), t)))
            }
            _ => Err( inconsistent( "intersection_avg"))
        }
    }

    /// unsigned distance of `off_circle` from the line (great circle) through p1 and p2
    pub fn perp_distance (p1: &Position, p2: &Position, off_circle: &Position)->Result<f64> {
        match (p1, p2) {
            (Geodesic(a), Geodesic(b)) => Ok( great_circle::cross_track_distance( a, b, &off_circle.lla()).abs()),
            (Flat(a), Flat(b)) => {
                let v = b.vect2() - a.vect2();
                Ok( vect_funs::dist_perp( &a.vect2(), &v, &off_circle.vect2()).1)
            }
            _ => Err( inconsistent( "perp_distance"))
        }
    }

    /* #endregion intersections */
}

fn inconsistent (op: &str)->OdinKinematicsError {
    error!("{} called with positions in different frames", op);
    OdinKinematicsError::InconsistentFrames
}

fn check_frames (op: &str, a: &Position, b: &Position)->Result<()> {
    if a.is_lat_lon() == b.is_lat_lon() { Ok(()) } else { Err( inconsistent( op)) }
}

impl From<LatLonAlt> for Position {
    fn from (lla: LatLonAlt)->Self { Geodesic(lla) }
}

impl From<Vect3> for Position {
    fn from (v: Vect3)->Self { Flat(v) }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geodesic(lla) => write!(f, "{}", lla),
            Flat(v) => write!(f, "{}", v)
        }
    }
}
