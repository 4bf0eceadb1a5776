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

//! great circle computations on a spherical earth with radius [`SPHERICAL_EARTH_RADIUS`], i.e. the
//! sphere on which one minute of arc is exactly one nautical mile.
//!
//! All angles are in radians, distances in meters. Functions that can fail return an `Option`
//! or [`Result`](crate::errors::Result) - there are no magic sentinel return values

use odin_common::{PI, HALF_PI, TWO_PI, sq, sqrt_safe, asin_safe, acos_safe, atan2_safe, sign, within_epsilon, within_epsilon0};
use odin_common::numeric::{almost_equals as almost_eq, almost_equals_prec, Precision};
use odin_common::angle::{to_pi, to_2pi, to_pi2_cont, turn_delta, turn_dir};
use odin_common::tolerance::{almost_zero_radian, almost_equals_radian, almost_equals_alt};
use odin_common::geo_constants::{SPHERICAL_EARTH_RADIUS, NM};
use odin_common::vect::{Vect3, rot_x, rot_y, rot_z};
use odin_common::debug;
use crate::lat_lon_alt::LatLonAlt;
use crate::velocity::Velocity;
use crate::errors::{Result, OdinKinematicsError};

/// about machine precision
const EPS: f64 = 1.0e-15;

/// minimum time difference for which we compute velocities
pub const MIN_DT: f64 = 1.0e-5;

/// max number of Newton-Raphson iterations in [`time_cpa`]
pub const MAX_CPA_ITERATIONS: usize = 50;

const R: f64 = SPHERICAL_EARTH_RADIUS;

/* #region distances *********************************************************************************************/

#[inline] fn angle_from_surface_distance (d: f64)->f64 { (d / NM) * PI / (180.0 * 60.0) }

/// the angular distance of a surface distance `d` that is measured at altitude `h`
#[inline] pub fn angle_from_distance (d: f64, h: f64)->f64 { angle_from_surface_distance( d * R / (R + h)) }

/// the distance at altitude `h` that corresponds to the angular distance `a`
#[inline] pub fn distance_from_angle (a: f64, h: f64)->f64 { (R + h) * a }

/// haversine based angular distance between two points. This is well conditioned for small distances
/// (where the law of cosines would need an acos of a value close to 1)
pub fn angular_distance_ll (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    2.0 * asin_safe( sqrt_safe( sq( ((lat1 - lat2)/2.0).sin()) + lat1.cos() * lat2.cos() * sq( ((lon1 - lon2)/2.0).sin())))
}

/// law of cosines version of the angular distance (only used for cross checks)
pub fn angular_distance_alt (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    acos_safe( (lat1 - lat2).cos() + ((lon1 - lon2).cos() - 1.0) * lat2.cos() * lat1.cos())
}

#[inline] pub fn angular_distance (p1: &LatLonAlt, p2: &LatLonAlt)->f64 { angular_distance_ll( p1.lat, p1.lon, p2.lat, p2.lon) }

/// surface (zero altitude) great circle distance in meters
#[inline] pub fn distance_ll (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    distance_from_angle( angular_distance_ll( lat1, lon1, lat2, lon2), 0.0)
}

#[inline] pub fn distance (p1: &LatLonAlt, p2: &LatLonAlt)->f64 { distance_ll( p1.lat, p1.lon, p2.lat, p2.lon) }

/// horizontal positions are within the configured angular tolerance and altitudes within the vertical tolerance
pub fn almost_equals (a: &LatLonAlt, b: &LatLonAlt)->bool {
    almost_zero_radian( angular_distance( a, b)) && almost_equals_alt( a.alt, b.alt)
}

pub fn almost_equals_2d (a: &LatLonAlt, b: &LatLonAlt, horiz_eps: f64)->bool {
    within_epsilon0( distance( a, b), horiz_eps)
}

pub fn almost_equals_eps (a: &LatLonAlt, b: &LatLonAlt, horiz_eps: f64, vert_eps: f64)->bool {
    almost_equals_2d( a, b, horiz_eps) && within_epsilon( a.alt, b.alt, vert_eps)
}

/* #endregion distances */

/* #region courses ***********************************************************************************************/

/// compass course at p1 of the great circle from p1 to p2, in [0,2π].
/// Starting from a pole all directions are south (π), or north (2π) respectively
pub fn initial_course (p1: &LatLonAlt, p2: &LatLonAlt)->f64 {
    let (lat1,lon1,lat2,lon2) = (p1.lat, p1.lon, p2.lat, p2.lon);

    if lat1.cos() < EPS {
        return if lat1 > 0.0 { PI } else { TWO_PI }
    }

    let dlon = lon2 - lon1;
    to_2pi( atan2_safe( dlon.sin() * lat2.cos(), lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos()))
}

pub fn initial_course_ll (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    initial_course( &LatLonAlt::new( lat1, lon1, 0.0), &LatLonAlt::new( lat2, lon2, 0.0))
}

/// course at p2 when arriving from p1 along the great circle (not normalized)
#[inline] pub fn final_course (p1: &LatLonAlt, p2: &LatLonAlt)->f64 { initial_course( p2, p1) + PI }

/// course at the midpoint of the great circle segment p1-p2
pub fn representative_course (p1: &LatLonAlt, p2: &LatLonAlt)->f64 {
    let a = p1.zero_alt();
    let b = p2.zero_alt();
    let d = angular_distance( &a, &b);
    let mid = interpolate_impl( &a, &b, d, 0.5, 0.0);
    initial_course( &mid, &b)
}

/// the maximum latitude reached by a great circle that passes lat1 with course trk
#[inline] pub fn max_latitude_gc_course (lat1: f64, trk: f64)->f64 { acos_safe( (trk.sin() * lat1.cos()).abs()) }

/// maximum latitude of the full great circle through p1 and p2
pub fn max_latitude_gc (p1: &LatLonAlt, p2: &LatLonAlt)->f64 {
    max_latitude_gc_course( p1.lat, initial_course( p1, p2))
}

pub fn min_latitude_gc (p1: &LatLonAlt, p2: &LatLonAlt)->f64 {
    -max_latitude_gc_course( p1.lat, initial_course( p1, p2))
}

/// longitude at which the great circle through (lat1,lon1) and (lat2,lon2) crosses latitude lat3
pub fn lon_cross (lat1: f64, lon1: f64, lat2: f64, lon2: f64, lat3: f64)->f64 {
    let tc = initial_course_ll( lat1, lon1, lat2, lon2);
    let nw = (tc > HALF_PI && tc <= PI) || tc >= 3.0*HALF_PI;
    let l12 = if nw { lon1 - lon2 } else { lon2 - lon1 };

    let a = lat1.sin() * lat2.cos() * lat3.cos() * l12.sin();
    let b = lat1.sin() * lat2.cos() * lat3.cos() * l12.cos() - lat1.cos() * lat2.sin() * lat3.cos();

    let mut lon = if nw { lon1 + atan2_safe(b,a) + PI } else { lon1 - atan2_safe(b,a) - PI };
    if lon >= TWO_PI { lon -= TWO_PI }
    lon = if nw { lon - PI } else { PI + lon };
    if lon < -PI { lon += TWO_PI }
    if lon > PI { lon -= TWO_PI }
    lon
}

/// minimum latitude along the great circle segment (not the full circle) between two points
pub fn min_latitude_ll (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    if lat1 >= 0.0 && lat2 >= 0.0 { return lat1.min(lat2) } // segment can at most curve north

    let dist = distance_ll( lat1, lon1, lat2, lon2);
    if sign(lat1) != sign(lat2) && dist < R * HALF_PI { return lat1.min(lat2) } // cannot reach the inflection point

    let min_lat = if dist < R * PI {
        if lat1 <= lat2 {
            let trk = initial_course_ll( lat1, lon1, lat2, lon2);
            if lat1 < 0.0 && (trk <= HALF_PI || trk >= 3.0*HALF_PI) { return lat1 }
            -max_latitude_gc_course( lat1, trk)
        } else {
            let trk = initial_course_ll( lat2, lon2, lat1, lon1);
            if lat2 < 0.0 && (trk <= HALF_PI || trk >= 3.0*HALF_PI) { return lat2 }
            -max_latitude_gc_course( lat2, trk)
        }
    } else {
        -max_latitude_gc_course( lat1, initial_course_ll( lat1, lon1, lat2, lon2))
    };

    // make sure the extremal point is within the segment
    let min_lon = lon_cross( lat1, lon1, lat2, lon2, min_lat);
    if distance_ll( lat1, lon1, min_lat, min_lon).max( distance_ll( lat2, lon2, min_lat, min_lon)) < dist {
        min_lat
    } else {
        lat1.min(lat2)
    }
}

#[inline] pub fn min_latitude (p1: &LatLonAlt, p2: &LatLonAlt)->f64 { min_latitude_ll( p1.lat, p1.lon, p2.lat, p2.lon) }

/// maximum latitude along the great circle segment (not the full circle) between two points
pub fn max_latitude_ll (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    if lat1 <= 0.0 && lat2 <= 0.0 { return lat1.max(lat2) } // segment can at most curve south

    let dist = distance_ll( lat1, lon1, lat2, lon2);
    if sign(lat1) != sign(lat2) && dist < R * HALF_PI { return lat1.max(lat2) }

    let max_lat = if dist < R * PI {
        if lat1 >= lat2 {
            let trk = initial_course_ll( lat1, lon1, lat2, lon2);
            if lat1 > 0.0 && (trk >= HALF_PI && trk <= 3.0*HALF_PI) { return lat1 }
            max_latitude_gc_course( lat1, trk)
        } else {
            let trk = initial_course_ll( lat2, lon2, lat1, lon1);
            if lat2 > 0.0 && (trk >= HALF_PI && trk <= 3.0*HALF_PI) { return lat2 }
            max_latitude_gc_course( lat2, trk)
        }
    } else {
        max_latitude_gc_course( lat1, initial_course_ll( lat1, lon1, lat2, lon2))
    };

    let max_lon = lon_cross( lat1, lon1, lat2, lon2, max_lat);
    if distance_ll( lat1, lon1, max_lat, max_lon).max( distance_ll( lat2, lon2, max_lat, max_lon)) < dist {
        max_lat
    } else {
        lat1.max(lat2)
    }
}

#[inline] pub fn max_latitude (p1: &LatLonAlt, p2: &LatLonAlt)->f64 { max_latitude_ll( p1.lat, p1.lon, p2.lat, p2.lon) }

/// estimated time until a great circle track with velocity `v` crosses latitude `lat`, None if it never does
pub fn latitude_cross_time_gs (lla: &LatLonAlt, v: &Velocity, lat: f64)->Option<f64> {
    let lla2 = linear_initial( lla, v, 100.0);
    let max_lat = max_latitude_gc( lla, &lla2); // estimate
    if max_lat < lat.abs() || v.gs() == 0.0 { return None } // never reaches that latitude

    if almost_eq( lat, 0.0) && almost_eq( lla.lat, 0.0) && (almost_eq( v.trk(), HALF_PI) || almost_eq( v.trk(), -HALF_PI)) {
        return Some(0.0) // on equator
    }

    let target_lon = lon_cross( lla.lat, lla.lon, lla2.lat, lla2.lon, lat);
    let target = LatLonAlt::new( lat, target_lon, 0.0);
    Some( distance( lla, &target) / v.gs())
}

/* #endregion courses */

/* #region interpolation *****************************************************************************************/

fn interpolate_impl (p1: &LatLonAlt, p2: &LatLonAlt, d: f64, f: f64, alt: f64)->LatLonAlt {
    if almost_zero_radian(d) {
        return p1.with_alt(alt)
    }

    let (lat1,lon1,lat2,lon2) = (p1.lat, p1.lon, p2.lat, p2.lon);
    let sind = d.sin();
    let a = ((1.0 - f) * d).sin() / sind;
    let b = (f * d).sin() / sind;

    let x = a * lat1.cos() * lon1.cos() + b * lat2.cos() * lon2.cos();
    let y = a * lat1.cos() * lon1.sin() + b * lat2.cos() * lon2.sin();
    let z = a * lat1.sin() + b * lat2.sin();

    LatLonAlt::new( atan2_safe( z, (x*x + y*y).sqrt()), atan2_safe( y, x), alt)
}

/// the point at fraction `f` along the great circle from p1 to p2. Values of `f` outside of [0,1] extrapolate.
/// The altitude is interpolated linearly
pub fn interpolate (p1: &LatLonAlt, p2: &LatLonAlt, f: f64)->LatLonAlt {
    let d = angular_distance( p1, p2);
    interpolate_impl( p1, p2, d, f, (p2.alt - p1.alt) * f + p1.alt)
}

/// linear interpolation in lat/lon space. Only valid for short distances away from the poles
pub fn interpolate_est (p1: &LatLonAlt, p2: &LatLonAlt, f: f64)->LatLonAlt {
    LatLonAlt::new( (p2.lat - p1.lat)*f + p1.lat, (p2.lon - p1.lon)*f + p1.lon, (p2.alt - p1.alt)*f + p1.alt)
}

/// velocity at fraction `f` of a great circle segment that is flown in `time` seconds
pub fn interpolate_velocity (p1: &LatLonAlt, p2: &LatLonAlt, time: f64, f: f64)->Velocity {
    let mid = interpolate( p1, p2, f);
    velocity_initial( &mid, p2, (1.0 - f) * time)
}

/* #endregion interpolation */

/* #region spherical triangles ***********************************************************************************/

// sides are lower case, opposite angles upper case. Returned triples are (angle,angle,side) or (side,angle,side)
// in the order documented for each function

fn gauss_check (a: f64, b: f64, c: f64, aa: f64, bb: f64, cc: f64)->bool {
    let (aa, bb, cc) = (to_pi(aa), to_pi(bb), to_pi(cc));
    let (a, b, c) = (to_2pi(a), to_2pi(b), to_2pi(c));

    if aa == 0.0 || aa == PI || bb == 0.0 || bb == PI || cc == 0.0 || cc == PI { return false }
    if a == 0.0 || b == 0.0 || c == 0.0 { return false }

    almost_equals_prec( (0.5*(aa+bb)).cos() * (0.5*c).cos(), (0.5*(a+b)).cos() * (0.5*cc).sin(), Precision::P13)
}

/// given two sides (b,a) and the angle A opposite of a, return (B,C,c) or None if the triangle is inconsistent.
/// There are two possible solutions, selected by `first_solution`
pub fn side_side_angle (b: f64, a: f64, aa: f64, first_solution: bool)->Option<(f64,f64,f64)> {
    let mut bb = asin_safe( b.sin() * aa.sin() / a.sin()); // [-π/2,π/2]
    if !first_solution { bb = PI - bb }

    let c = 2.0 * atan2_safe( (0.5*(a+b)).sin() * (0.5*(aa+bb)).cos(), (0.5*(a+b)).cos() * (0.5*(aa-bb)).cos());
    let cc = acos_safe( -aa.cos() * bb.cos() + aa.sin() * bb.sin() * c.cos());

    if gauss_check( a, b, c, aa, bb, cc) { Some( (to_pi(bb), cc, to_2pi(c))) } else { None }
}

/// given side a and the angles A (opposite of a) and B, return (b,C,c) or None if inconsistent
pub fn side_angle_angle (a: f64, aa: f64, bb: f64, first_solution: bool)->Option<(f64,f64,f64)> {
    let mut b = asin_safe( a.sin() * bb.sin() / aa.sin());
    if !first_solution { b = PI - b }

    let c = 2.0 * atan2_safe( (0.5*(a+b)).sin() * (0.5*(aa+bb)).cos(), (0.5*(a+b)).cos() * (0.5*(aa-bb)).cos());
    let cc = acos_safe( -aa.cos() * bb.cos() + aa.sin() * bb.sin() * c.cos());

    if gauss_check( a, b, c, aa, bb, cc) { Some( (to_2pi(b), to_2pi(cc), to_2pi(c))) } else { None }
}

/// given two sides and the included angle C, return (A,B,c)
pub fn side_angle_side (a: f64, cc: f64, b: f64)->(f64,f64,f64) {
    let c = acos_safe( a.cos() * b.cos() + a.sin() * b.sin() * cc.cos());
    let c_ratio = cc.sin() / c.sin();
    let aa = asin_safe( a.sin() * c_ratio);
    let bb = asin_safe( b.sin() * c_ratio);
    (aa, bb, c)
}

/* #endregion spherical triangles */

/* #region linear motion *****************************************************************************************/

fn linear_initial_impl (s: &LatLonAlt, track: f64, d: f64, vertical: f64)->LatLonAlt {
    let (sind, cosd) = d.sin_cos();
    let (sinslat, cosslat) = s.lat.sin_cos();

    let lat = asin_safe( sinslat * cosd + cosslat * sind * track.cos());
    let dlon = atan2_safe( track.sin() * sind * cosslat, cosd - sinslat * lat.sin());
    LatLonAlt::new( lat, to_pi( s.lon + dlon), s.alt + vertical)
}

/// position after moving along a great circle with initial course `track` for distance `dist`
pub fn linear_initial_dist (s: &LatLonAlt, track: f64, dist: f64)->LatLonAlt {
    linear_initial_impl( s, track, angle_from_distance( dist, 0.0), 0.0)
}

/// position after moving for `t` seconds along a great circle with initial velocity `v`
pub fn linear_initial (s: &LatLonAlt, v: &Velocity, t: f64)->LatLonAlt {
    linear_initial_impl( s, v.trk(), angle_from_distance( v.gs() * t, 0.0), v.z() * t)
}

/// position after `t` seconds on the great circle through p1 and p2 with the ground speed of `v`
pub fn linear_gcgs (p1: &LatLonAlt, p2: &LatLonAlt, v: &Velocity, t: f64)->LatLonAlt {
    let d = angular_distance( p1, p2);
    if almost_zero_radian(d) { return *p1 }

    let f = angle_from_distance( v.gs() * t, 0.0) / d;
    interpolate_impl( p1, p2, d, f, p1.alt + v.z() * t)
}

/// position at distance `d` from p1 on the great circle through p1 and p2
pub fn linear_gc (p1: &LatLonAlt, p2: &LatLonAlt, d: f64)->LatLonAlt {
    let dist = angular_distance( p1, p2);
    let f = angle_from_distance( d, 0.0) / dist;
    interpolate_impl( p1, p2, dist, f, (p2.alt - p1.alt)*f + p1.alt)
}

fn linear_rhumb_impl (s: &LatLonAlt, track: f64, d: f64, vertical: f64)->LatLonAlt {
    let eps = 1.0e-15;
    let s_lat = s.lat.min( HALF_PI - eps).max( -HALF_PI + eps);
    let lat = (s_lat + d * track.cos()).min( HALF_PI - eps).max( -HALF_PI + eps);

    let q = if almost_equals_radian( lat, s_lat) {
        s_lat.cos()
    } else {
        let dphi = ((lat/2.0 + PI/4.0).tan() / (s_lat/2.0 + PI/4.0).tan()).ln();
        (lat - s_lat) / dphi
    };

    let dlon = -d * track.sin() / q;
    LatLonAlt::new( lat, to_pi( s.lon - dlon), s.alt + vertical)
}

/// position after moving `t` seconds with velocity `v` along a rhumb line (constant course)
pub fn linear_rhumb_by_velocity (s: &LatLonAlt, v: &Velocity, t: f64)->LatLonAlt {
    linear_rhumb_impl( s, v.trk(), angle_from_distance( v.gs() * t, 0.0), v.z() * t)
}

/// position after moving distance `dist` along a rhumb line with the given track
pub fn linear_rhumb (s: &LatLonAlt, track: f64, dist: f64)->LatLonAlt {
    linear_rhumb_impl( s, track, angle_from_distance( dist, 0.0), 0.0)
}

/// position after `t` seconds along a great circle such that `v` is the *final* velocity. There can be
/// two solutions, `first_solution` selects between them if both exist
pub fn linear_final (s: &LatLonAlt, v: &Velocity, t: f64, first_solution: bool)->Option<LatLonAlt> {
    let c = angle_from_distance( v.gs() * t, 0.0);
    let trk = v.trk();
    let bb = if trk.abs() > HALF_PI && trk.abs() < PI { trk - PI } else { TWO_PI - trk };

    // use the pole of the hemisphere we are in
    let b = if s.lat > 0.0 { HALF_PI - s.lat } else { HALF_PI + s.lat };
    let alt = s.alt + v.vs() * t;

    let solution = |sol: Option<(f64,f64,f64)>| {
        sol.map( |(cc,_,a)| {
            let lat2 = if s.lat > 0.0 { to_pi2_cont( HALF_PI - a) } else { to_pi2_cont( a - HALF_PI) };
            LatLonAlt::new( lat2, to_pi( s.lon - cc), alt)
        })
    };

    let p1 = solution( side_side_angle( c, b, bb, true));
    let p2 = solution( side_side_angle( c, b, bb, false));

    match (p1, p2) {
        (Some(p1), Some(p2)) => Some( if first_solution { p1 } else { p2 }),
        (Some(p1), None) => Some(p1),
        (None, Some(p2)) => Some(p2),
        (None, None) => None
    }
}

/* #endregion linear motion */

/* #region cross track and closest points ************************************************************************/

/// signed distance of `off_circle` from the great circle through p1 and p2 (positive is right of the circle)
pub fn cross_track_distance (p1: &LatLonAlt, p2: &LatLonAlt, off_circle: &LatLonAlt)->f64 {
    let dist_p1oc = angular_distance( p1, off_circle);
    let trk_p1oc = initial_course( p1, off_circle);
    let trk_p1p2 = initial_course( p1, p2);
    distance_from_angle( asin_safe( dist_p1oc.sin() * (trk_p1oc - trk_p1p2).sin()), (p1.alt + p2.alt + off_circle.alt)/3.0)
}

pub fn collinear_eps (p1: &LatLonAlt, p2: &LatLonAlt, p3: &LatLonAlt, epsilon: f64)->bool {
    within_epsilon0( cross_track_distance( p1, p2, p3), epsilon)
}

/// are the three points on the same great circle (within 1e-7m)
pub fn collinear (p1: &LatLonAlt, p2: &LatLonAlt, p3: &LatLonAlt)->bool { collinear_eps( p1, p2, p3, 1.0e-7) }

/// is p2 on the great circle that starts at p1 with velocity v
pub fn collinear_velocity (p1: &LatLonAlt, v: &Velocity, p2: &LatLonAlt)->bool {
    let p3 = linear_initial( p1, v, 100.0);
    collinear( p1, p2, &p3)
}

/// the point on the great circle through p1 and p2 that is closest to x (at the altitude of x).
/// If p1 and p2 do not define a unique great circle (same or antipodal points) this returns x
pub fn closest_point_circle (p1: &LatLonAlt, p2: &LatLonAlt, x: &LatLonAlt)->LatLonAlt {
    if (almost_eq( p1.lat, p2.lat) && almost_eq( p1.lon, p2.lon)) ||
       (almost_eq( p1.lat, -p2.lat) && almost_eq( p1.lon, to_pi( p2.lon + PI))) {
        return *x
    }

    let a = spherical_to_xyz( p1.lat, p1.lon);
    let b = spherical_to_xyz( p2.lat, p2.lon);
    let c = a.cross(&b);
    let p = spherical_to_xyz( x.lat, x.lon);
    let g = p - c.scal( p.dot(&c) / c.sqv());
    let v = R / g.norm();
    xyz_to_spherical( &g.scal(v)).with_alt( x.alt)
}

/// closest point on the great circle segment p1-p2, which is either the orthogonal projection or one of the end points
pub fn closest_point_segment (p1: &LatLonAlt, p2: &LatLonAlt, x: &LatLonAlt)->LatLonAlt {
    let c = closest_point_circle( p1, p2, x);
    let d12 = distance( p1, p2);
    let d1c = distance( p1, &c);
    let d2c = distance( p2, &c);

    if d1c < d12 && d2c < d12 { c }
    else if d1c < d2c { *p1 }
    else { *p2 }
}

/// closest point on the great circle through p1 and p2, without the segment restriction but keeping the
/// altitude interpolated along p1-p2
pub fn closest_point_circle_ext (p1: &LatLonAlt, p2: &LatLonAlt, x: &LatLonAlt)->LatLonAlt {
    let c = closest_point_circle( p1, p2, x);
    let d12 = distance( p1, p2);
    if d12 > 0.0 {
        let f = distance( p1, &c) / d12;
        c.with_alt( p1.alt + f * (p2.alt - p1.alt))
    } else {
        c.with_alt( p1.alt)
    }
}

/// -1 if p is right of the great circle a->b, +1 if left, (on the circle counts as left)
pub fn right_of_line_points (a: &LatLonAlt, b: &LatLonAlt, p: &LatLonAlt)->i32 {
    let v1 = spherical_to_xyz( a.lat, a.lon);
    let v2 = spherical_to_xyz( b.lat, b.lon);
    let v3 = spherical_to_xyz( p.lat, p.lon);
    -sign( v3.dot( &v1.cross(&v2)))
}

/* #endregion cross track and closest points */

/* #region intersections *****************************************************************************************/

/// intersection of the great circles a1-a2 and b1-b2 (at the altitude of a1). Of the two antipodal solutions the
/// one closer to a1 is returned. None if the circles are (almost) identical
pub fn intersection (a1: &LatLonAlt, a2: &LatLonAlt, b1: &LatLonAlt, b2: &LatLonAlt)->Option<LatLonAlt> {
    let va = spherical_to_xyz( a1.lat, a1.lon).cross( &spherical_to_xyz( a2.lat, a2.lon));
    let vb = spherical_to_xyz( b1.lat, b1.lon).cross( &spherical_to_xyz( b2.lat, b2.lon));
    let vavb = va.cross(&vb);
    if vavb.almost_equals( &Vect3::ZERO) { return None }

    let n = vavb.norm();
    let x1 = xyz_to_spherical( &vavb.scal( R/n)).with_alt( a1.alt);
    let x2 = xyz_to_spherical( &vavb.scal( -R/n)).with_alt( a1.alt);

    if distance( a1, &x1) < distance( a1, &x2) { Some(x1) } else { Some(x2) }
}

/// intersection point of two great circle segments, None if the circles do not intersect within both segments
pub fn intersect_segments (so: &LatLonAlt, so2: &LatLonAlt, si: &LatLonAlt, si2: &LatLonAlt)->Option<LatLonAlt> {
    let x = intersection( so, so2, si, si2)?;

    let on_segment = |p1: &LatLonAlt, p2: &LatLonAlt| {
        let before = turn_delta( final_course( p1, p2), final_course( p1, &x)) > HALF_PI;
        !before && (distance( p1, &x) / distance( p1, p2)) <= 1.0
    };

    if on_segment( so, so2) && on_segment( si, si2) { Some(x) } else { None }
}

/// intersection of the track of a moving point (extended for T seconds) with the segment si-si2
pub fn intersection_segment (tt: f64, so: &LatLonAlt, vo: &Velocity, si: &LatLonAlt, si2: &LatLonAlt)->Option<LatLonAlt> {
    let so2 = linear_initial( so, vo, tt);
    intersect_segments( so, &so2, si, si2)
}

/// relative time of passing `x` when starting at `so` and flying the segment so-so2 in `dto` seconds,
/// negative if x lies behind so
fn segment_time (so: &LatLonAlt, so2: &LatLonAlt, dto: f64, x: &LatLonAlt)->f64 {
    let gso = distance( so, so2) / dto;
    let t = distance( so, x) / gso;
    if behind( x, so, &velocity_average( so, so2, 1.0)) { -t } else { t }
}

/// great circle intersection of two segments with the altitude averaged between the closest segment end points.
/// Returns the intersection and the time relative to `so` (flying so->so2 in dto)
pub fn intersection_avg_alt (so: &LatLonAlt, so2: &LatLonAlt, dto: f64, si: &LatLonAlt, si2: &LatLonAlt)->Option<(LatLonAlt,f64)> {
    let x = intersection( so, so2, si, si2)?;
    let t = segment_time( so, so2, dto, &x);

    let alt_o = if distance( so2, &x) < distance( so, &x) { so2.alt } else { so.alt };
    let alt_i = if distance( si2, &x) < distance( si, &x) { si2.alt } else { si.alt };

    Some( (x.with_alt( (alt_o + alt_i)/2.0), t))
}

/// same as [`intersection_avg_alt`] but with the altitude extrapolated along so-so2
pub fn intersection_extrap_alt (so: &LatLonAlt, so2: &LatLonAlt, dto: f64, si: &LatLonAlt, si2: &LatLonAlt)->Option<(LatLonAlt,f64)> {
    let x = intersection( so, so2, si, si2)?;
    let t = segment_time( so, so2, dto, &x);
    let vs = (so2.alt - so.alt) / dto;
    Some( (x.with_alt( so.alt + vs * t), t))
}

/// intersection of two great circle tracks given by position and velocity, plus the (signed) time it takes
/// `so` to get there. None if the tracks are collinear or the points are (nearly) the same
pub fn intersection_velocity (so: &LatLonAlt, vo: &Velocity, si: &LatLonAlt, vi: &Velocity)->Option<(LatLonAlt,f64)> {
    let so2 = linear_initial( so, vo, 1000.0);
    let si2 = linear_initial( si, vi, 1000.0);
    let x = intersection( so, &so2, si, &si2)?;

    let dt = distance( so, &x) / vo.gs();
    Some( (x, if behind( &x, so, vo) { -dt } else { dt }))
}

/// angle between the two great circles a1-a2 and b1-b2
pub fn angle_between_circles (a1: &LatLonAlt, a2: &LatLonAlt, b1: &LatLonAlt, b2: &LatLonAlt)->f64 {
    let va = spherical_to_xyz( a1.lat, a1.lon).cross( &spherical_to_xyz( a2.lat, a2.lon)).hat();
    let vb = spherical_to_xyz( b1.lat, b1.lon).cross( &spherical_to_xyz( b2.lat, b2.lon)).hat();
    acos_safe( va.dot(&vb))
}

/// angle at b between the great circle segments a-b and b-c, in [0,π]
#[inline] pub fn angle_between (a: &LatLonAlt, b: &LatLonAlt, c: &LatLonAlt)->f64 { angle_between_circles( b, a, b, c) }

/// angle at b between a-b and b-c in the given turn direction (+1 right, -1 left), in [0,2π)
pub fn angle_between_dir (a: &LatLonAlt, b: &LatLonAlt, c: &LatLonAlt, dir: i32)->f64 {
    let trk1 = final_course( a, b);
    let trk2 = initial_course( b, c);
    let theta = angle_between_circles( b, a, b, c);
    if dir == turn_dir( trk1, trk2) { theta } else { TWO_PI - theta }
}

/// is x behind a point at `ll` that moves with velocity v
pub fn behind (x: &LatLonAlt, ll: &LatLonAlt, v: &Velocity)->bool {
    let v2 = velocity_initial( ll, x, 100.0);
    turn_delta( v.trk(), v2.trk()) > HALF_PI
}

/// +1 if `so` passes in front of `si`, -1 if behind, 0 if the tracks do not intersect in the future
pub fn passing_direction (so: &LatLonAlt, vo: &Velocity, si: &LatLonAlt, vi: &Velocity)->i32 {
    match intersection_velocity( so, vo, si, vi) {
        Some((x,t)) if t >= 0.0 => {
            let si3 = linear_initial( si, vi, t); // intruder at time of intersection
            if behind( &x, &si3, vi) { -1 } else { 1 }
        }
        _ => 0
    }
}

/// turn direction for `so` to pass behind `si` (+1 right, -1 left), 0 if they do not cross in the future
pub fn dir_for_behind (so: &LatLonAlt, vo: &Velocity, si: &LatLonAlt, vi: &Velocity)->i32 {
    let so2 = linear_initial( so, vo, 1000.0);
    let si2 = linear_initial( si, vi, 1000.0);
    match intersection( so, &so2, si, &si2) {
        Some(x) if !behind( &x, so, vo) && !behind( &x, si, vi) => -sign( cross_track_distance( si, &si2, so)),
        _ => 0
    }
}

/* #endregion intersections */

/* #region velocities ********************************************************************************************/

/// initial velocity of a great circle flight from p1 to p2 that takes t seconds. Times smaller than
/// [`MIN_DT`] return ZERO
pub fn velocity_initial (p1: &LatLonAlt, p2: &LatLonAlt, t: f64)->Velocity {
    if t.abs() < MIN_DT || almost_equals_prec( t.abs() + MIN_DT, MIN_DT, Precision::P7) {
        return Velocity::ZERO
    }

    let d = angular_distance( p1, p2);
    if almost_zero_radian(d) {
        return if almost_equals_alt( p1.alt, p2.alt) {
            Velocity::ZERO
        } else {
            Velocity::ZERO.with_vs( (p2.alt - p1.alt) / t)
        }
    }

    let gs = distance_from_angle( d, 0.0) / t;
    let crs = initial_course( p1, p2);
    Velocity::from_trk_gs_vs( crs, gs, (p2.alt - p1.alt) / t)
}

/// velocity at the midpoint of a great circle flight from p1 to p2 that takes t seconds
pub fn velocity_average (p1: &LatLonAlt, p2: &LatLonAlt, t: f64)->Velocity {
    if t >= 0.0 {
        velocity_initial( &interpolate( p1, p2, 0.5), p2, t / 2.0)
    } else {
        velocity_average( p1, &interpolate( p1, p2, -1.0), -t)
    }
}

pub fn velocity_average_speed (s1: &LatLonAlt, s2: &LatLonAlt, speed: f64)->Velocity {
    let dt = distance( s1, s2) / speed;
    velocity_average( s1, s2, dt)
}

/// velocity when arriving at p2 after a great circle flight from p1 that takes t seconds
pub fn velocity_final (p1: &LatLonAlt, p2: &LatLonAlt, t: f64)->Velocity {
    if t >= 0.0 {
        velocity_initial( p2, p1, -t)
    } else {
        velocity_initial( &interpolate( p1, p2, -1.0), p1, t)
    }
}

/* #endregion velocities */

/* #region earth centered cartesian coordinates ******************************************************************/

/// earth centered cartesian coordinates on the surface of the sphere (altitude is ignored)
pub fn spherical_to_xyz (lat: f64, lon: f64)->Vect3 {
    unit_spherical_to_xyz( lat, lon).scal( R)
}

pub fn unit_spherical_to_xyz (lat: f64, lon: f64)->Vect3 {
    let theta = HALF_PI - lat;
    let phi = lon;
    Vect3::new( theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos())
}

/// inverse of [`spherical_to_xyz`] (zero altitude)
pub fn xyz_to_spherical (v: &Vect3)->LatLonAlt {
    let theta = acos_safe( v.z / R);
    let phi = atan2_safe( v.y, v.x);
    LatLonAlt::new( HALF_PI - theta, to_pi(phi), 0.0)
}

pub fn unit_xyz_to_spherical (v: &Vect3)->LatLonAlt {
    let theta = acos_safe( v.z);
    let phi = atan2_safe( v.y, v.x);
    LatLonAlt::new( HALF_PI - theta, to_pi(phi), 0.0)
}

/// earth centered cartesian coordinates including altitude
pub fn spherical_to_ecef (lla: &LatLonAlt)->Vect3 {
    unit_spherical_to_xyz( lla.lat, lla.lon).scal( R + lla.alt)
}

pub fn ecef_to_spherical (v: &Vect3)->LatLonAlt {
    let r = v.norm();
    unit_xyz_to_spherical( &v.scal( 1.0/r)).with_alt( r - R)
}

/// straight line distance through the sphere
pub fn chord_distance (p1: &LatLonAlt, p2: &LatLonAlt)->f64 {
    (spherical_to_xyz( p1.lat, p1.lon) - spherical_to_xyz( p2.lat, p2.lon)).norm()
}

/// chord length of a given surface distance
pub fn chord_distance_of (surface_dist: f64)->f64 {
    let theta = angle_from_distance( surface_dist, 0.0);
    2.0 * (theta/2.0).sin() * R
}

/// surface distance of a given chord length
pub fn surface_distance (chord_distance: f64)->f64 {
    let theta = 2.0 * asin_safe( chord_distance * 0.5 / R);
    distance_from_angle( theta, 0.0)
}

/// the (planar) radius of a small circle with the given chord radius
pub fn small_circle_radius (chord: f64)->f64 {
    sqrt_safe( chord*chord * (1.0 - (chord*chord / (4.0*R*R))))
}

/* #endregion earth centered cartesian coordinates */

/* #region tangents and small circles ****************************************************************************/

/// the point on a small circle around `center` with surface radius `r` at which the circle has the given `track`,
/// going clockwise if `right`. None if the center is at the north pole
pub fn tangent_to_circle (center: &LatLonAlt, r: f64, track: f64, right: bool)->Option<LatLonAlt> {
    let d = distance_from_angle( HALF_PI - center.lat, 0.0);
    if almost_eq( d, 0.0) { return None }

    let mut trk = to_2pi( track);
    if !right { trk = to_2pi( trk + PI) } // counterclockwise works with the opposite track

    let alpha = if trk >= 0.0 && trk < HALF_PI {
        trk + HALF_PI
    } else if trk >= HALF_PI && trk < 3.0*HALF_PI {
        3.0*HALF_PI - trk
    } else {
        -(3.0*HALF_PI - trk)
    };

    let theta = asin_safe( (PI - alpha).sin() * (r/R).sin() / (d/R).sin());
    let mut dist = 2.0 * R * ((0.5*(alpha + theta)).cos() * (0.5*(d + r)/R).tan() / (0.5*(alpha - theta)).cos()).atan();
    if almost_eq( trk, HALF_PI) {
        dist = d - r;
    } else if almost_eq( trk, 3.0*HALF_PI) {
        dist = d + r;
    }

    let lon = if right == (track >= HALF_PI && track <= 3.0*HALF_PI) {
        to_pi( center.lon + theta)
    } else {
        to_pi( center.lon - theta)
    };

    Some( linear_gc( &LatLonAlt::new( HALF_PI, lon, 0.0), &LatLonAlt::new( 0.0, lon, 0.0), dist))
}

/// the point on the great circle through lla1 and lla2 at which the circle has the given track.
/// None if both points have the same longitude
pub fn tangent (lla1: &LatLonAlt, lla2: &LatLonAlt, track: f64)->Option<LatLonAlt> {
    if almost_eq( lla1.lon, lla2.lon) { return None }

    let np = LatLonAlt::new( HALF_PI, 0.0, 0.0);
    let aa = angle_between( lla1, lla2, &np);
    let b = HALF_PI - lla2.lat; // distance from pole
    let bb = to_2pi( track);
    let a = b.sin() / (aa.sin() * bb.sin());
    let abdist = angular_distance( lla1, lla2);
    let c = 2.0 * ((0.5*(a+b) * (0.5*(aa+bb)).cos() / (0.5*(aa-bb)).cos()).tan()).atan();
    Some( interpolate( lla2, lla1, c/abdist))
}

/// rotate `so` around `center` by `angle` along a small circle
pub fn small_circle_rotation (so: &LatLonAlt, center: &LatLonAlt, angle: f64)->LatLonAlt {
    if almost_eq( angle, 0.0) { return *so }

    let r = angular_distance( so, center);
    let (aa, _, c) = side_angle_side( r, angle, r);
    let c = distance_from_angle( c, 0.0);
    let mut crs = initial_course( so, center);
    if crs > PI { crs -= TWO_PI }
    let trk = to_2pi( crs - aa);
    linear_initial_dist( so, trk, c)
}

/// arc length of a small circle with the given surface radius
pub fn small_circle_arc_length (radius: f64, arc_angle: f64)->f64 {
    let r2 = chord_distance_of( radius * 2.0) / 2.0;
    arc_angle * r2
}

pub fn small_circle_arc_angle (radius: f64, arc_length: f64)->f64 {
    let r2 = chord_distance_of( radius * 2.0) / 2.0;
    if r2 == 0.0 { 0.0 } else { arc_length / r2 }
}

/* #endregion tangents and small circles */

/* #region closest point of approach *****************************************************************************/

/// unit vector of the course direction at the given position
pub fn course_vector (lat: f64, lon: f64, trk: f64)->Vect3 {
    let m = rot_z( -lon) * rot_y( lat) * rot_x( trk);
    Vect3::new( m[(0,2)], m[(1,2)], m[(2,2)])
}

/// Newton-Raphson search for the root of the derivative of the squared chord distance between two points
/// moving on great circles with angular rates w1,w2. Gives up after [`MAX_CPA_ITERATIONS`]
pub fn spherical_newton_raphson (t_est: f64, epsilon: f64, w1: f64, w2: f64, c1: &Vect3, c2: &Vect3, x1: &Vect3, x2: &Vect3)->Result<f64> {
    let a = -(x1.scal(w1).dot(c2) + x2.scal(w2).dot(c1));
    let b = c1.scal(w1).dot(x2) + c2.scal(w2).dot(x1);
    let c = -(x1.scal(w1).dot(x2) - c2.scal(w2).dot(c1));
    let d = c1.scal(w1).dot(c2) - x2.scal(w2).dot(x1);

    let mut ti = t_est;
    let mut delta_t = f64::MAX;
    let mut i = 0;

    while delta_t.abs() > epsilon {
        let (s1,c1t) = (w1*ti).sin_cos();
        let (s2,c2t) = (w2*ti).sin_cos();

        let fi = a*s1*s2 + b*c1t*c2t + c*s1*c2t + d*c1t*s2;
        let fi_prime = -(c*w2 + d*w1)*s1*s2 + (d*w2 + c*w1)*c1t*c2t + (a*w2 - b*w1)*s1*c2t - (b*w2 - a*w1)*c1t*s2;

        delta_t = fi / fi_prime;
        ti -= delta_t;
        i += 1;
        if i > MAX_CPA_ITERATIONS {
            debug!("closest point of approach search did not converge after {} iterations", MAX_CPA_ITERATIONS);
            return Err( OdinKinematicsError::NoConvergence(MAX_CPA_ITERATIONS))
        }
    }
    Ok(ti)
}

/// time of closest approach of two points moving along great circles. Returns 0 if the points coincide, both
/// are (almost) stationary, or both move with the same velocity along the same great circle
pub fn time_cpa (lla1: &LatLonAlt, v1: &Velocity, lla2: &LatLonAlt, v2: &Velocity, t_estimate: f64, epsilon: f64)->Result<f64> {
    let gs1 = v1.gs();
    let gs2 = v2.gs();
    let w1 = gs1 / R;
    let w2 = gs2 / R;
    let gs_eps = 0.001;            // 1mm/sec
    let trk_eps = 0.001_f64.to_radians();

    if almost_zero_radian( angular_distance( lla1, lla2)) ||
       (within_epsilon0( gs1, gs_eps) && within_epsilon0( gs2, gs_eps)) ||
       (within_epsilon( gs2, gs1, gs_eps) && within_epsilon( v1.trk(), v2.trk(), trk_eps) && collinear_velocity( lla1, v1, lla2)) {
        return Ok(0.0)
    }

    let x1 = unit_spherical_to_xyz( lla1.lat, lla1.lon);
    let x2 = unit_spherical_to_xyz( lla2.lat, lla2.lon);
    let c1 = course_vector( lla1.lat, lla1.lon, v1.compass_angle());
    let c2 = course_vector( lla2.lat, lla2.lon, v2.compass_angle());

    spherical_newton_raphson( t_estimate, epsilon, w1, w2, &c1, &c2, &x1, &x2)
}

/* #endregion closest point of approach */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_vector_north() {
        // heading north on the equator at lon 0 points along +z
        let c = course_vector( 0.0, 0.0, 0.0);
        assert!( (c.z - 1.0).abs() < 1e-12, "{c}");

        // heading east points along +y
        let c = course_vector( 0.0, 0.0, HALF_PI);
        assert!( (c.y - 1.0).abs() < 1e-12, "{c}");
    }

    #[test]
    fn test_gauss_check_rejects_degenerate() {
        assert!( !gauss_check( 0.0, 1.0, 1.0, 1.0, 1.0, 1.0));
    }
}
