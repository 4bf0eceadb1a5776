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

use odin_common::{assert_within, PI, HALF_PI};
use odin_common::angle::turn_delta;
use odin_common::geo_constants::{SPHERICAL_EARTH_RADIUS, NM};
use odin_kinematics::{LatLonAlt, Velocity};
use odin_kinematics::great_circle::*;

// run with "cargo test test_quarter_circumference -- --nocapture"

#[test]
fn test_quarter_circumference() {
    let p1 = LatLonAlt::from_degrees( 0.0, 0.0, 0.0);
    let p2 = LatLonAlt::from_degrees( 0.0, 90.0, 0.0);

    let d = distance( &p1, &p2);
    let expected = HALF_PI * SPHERICAL_EARTH_RADIUS;
    println!("distance {} -> {} = {:.3}m (expected {:.3}m)", p1, p2, d, expected);
    assert!( ((d - expected) / expected).abs() < 1e-4);

    // 1 minute of arc is 1 NM on this sphere
    let p3 = LatLonAlt::from_degrees( 1.0/60.0, 0.0, 0.0);
    assert_within!( distance( &p1, &p3), NM, 1e-6);
}

#[test]
fn test_distance_symmetry() {
    let pts = [
        LatLonAlt::from_degrees( 37.62, -122.38, 0.0),
        LatLonAlt::from_degrees( 51.47, -0.45, 0.0),
        LatLonAlt::from_degrees( -33.94, 151.18, 0.0),
        LatLonAlt::from_degrees( 0.0, 179.999, 0.0),
        LatLonAlt::from_degrees( 0.0, -179.999, 0.0),
    ];

    for p1 in &pts {
        for p2 in &pts {
            let d12 = angular_distance( p1, p2);
            let d21 = angular_distance( p2, p1);
            assert_within!( d12, d21, 1e-12);
        }
    }

    // across the date line this is a short distance
    let d = distance( &pts[3], &pts[4]);
    println!("date line distance: {:.3}m", d);
    assert!( d < 300.0);
}

#[test]
fn test_initial_course() {
    let p = LatLonAlt::from_degrees( 10.0, 20.0, 0.0);

    let north = initial_course( &p, &LatLonAlt::from_degrees( 11.0, 20.0, 0.0));
    let east = initial_course( &LatLonAlt::from_degrees( 0.0, 20.0, 0.0), &LatLonAlt::from_degrees( 0.0, 21.0, 0.0));
    let south = initial_course( &p, &LatLonAlt::from_degrees( 9.0, 20.0, 0.0));
    println!("north: {:.6}°, east: {:.6}°, south: {:.6}°", north.to_degrees(), east.to_degrees(), south.to_degrees());

    assert_within!( north, 0.0, 1e-9);
    assert_within!( east, HALF_PI, 1e-9);
    assert_within!( south, PI, 1e-9);

    // coinciding points do not produce NaNs
    let c = initial_course( &p, &p);
    assert!( !c.is_nan());
}

#[test]
fn test_interpolation_endpoints() {
    let p1 = LatLonAlt::from_degrees( 37.62, -122.38, 100.0);
    let p2 = LatLonAlt::from_degrees( 40.64, -73.78, 3000.0);

    let i0 = interpolate( &p1, &p2, 0.0);
    let i1 = interpolate( &p1, &p2, 1.0);
    let im = interpolate( &p1, &p2, 0.5);
    println!("f=0: {}\nf=0.5: {}\nf=1: {}", i0, im, i1);

    assert!( almost_equals_eps( &i0, &p1, 1e-6, 1e-9));
    assert!( almost_equals_eps( &i1, &p2, 1e-6, 1e-9));
    assert_within!( im.alt, 1550.0, 1e-9);
    assert_within!( distance( &p1, &im), distance( &im, &p2), 1e-3);

    // degenerate segment keeps the position but interpolates altitude
    let p3 = p1.with_alt( 200.0);
    let id = interpolate( &p1, &p3, 0.5);
    assert_within!( id.lat, p1.lat, 1e-12);
    assert_within!( id.lon, p1.lon, 1e-12);
    assert_within!( id.alt, 150.0, 1e-9);
}

#[test]
fn test_linear_initial_inverse() {
    let p = LatLonAlt::from_degrees( 45.0, 10.0, 0.0);
    let trk = 60.0_f64.to_radians();
    let d = 250.0 * NM;

    let p2 = linear_initial_dist( &p, trk, d);
    println!("{} + {:.1}NM @ 60° -> {}", p, d/NM, p2);

    assert_within!( distance( &p, &p2), d, 1e-3);
    assert_within!( turn_delta( initial_course( &p, &p2), trk), 0.0, 1e-9);

    // the same with a velocity
    let v = Velocity::from_trk_gs_vs( trk, 200.0, 5.0);
    let p3 = linear_initial( &p, &v, 100.0);
    assert_within!( distance( &p, &p3), 20_000.0, 1e-3);
    assert_within!( p3.alt, 500.0, 1e-9);
}

#[test]
fn test_segment_latitude_extrema() {
    // a long east-west segment on the northern hemisphere bulges north of both end points
    let p1 = LatLonAlt::from_degrees( 40.0, -120.0, 0.0);
    let p2 = LatLonAlt::from_degrees( 40.0, 0.0, 0.0);

    let max_lat = max_latitude( &p1, &p2);
    let min_lat = min_latitude( &p1, &p2);
    println!("max lat: {:.4}°, min lat: {:.4}°", max_lat.to_degrees(), min_lat.to_degrees());

    assert!( max_lat > p1.lat);
    assert_within!( min_lat, p1.lat, 1e-9);
    assert_within!( max_lat, max_latitude_gc( &p1, &p2), 1e-9);

    // a short meridian segment just has its end points as extrema
    let q1 = LatLonAlt::from_degrees( 10.0, 5.0, 0.0);
    let q2 = LatLonAlt::from_degrees( 12.0, 5.0, 0.0);
    assert_within!( max_latitude( &q1, &q2), q2.lat, 1e-9);
    assert_within!( min_latitude( &q1, &q2), q1.lat, 1e-9);
}

#[test]
fn test_intersection() {
    // equator and the 30° meridian
    let a1 = LatLonAlt::from_degrees( 0.0, 10.0, 0.0);
    let a2 = LatLonAlt::from_degrees( 0.0, 50.0, 0.0);
    let b1 = LatLonAlt::from_degrees( 20.0, 30.0, 0.0);
    let b2 = LatLonAlt::from_degrees( 40.0, 30.0, 0.0);

    let x = intersection( &a1, &a2, &b1, &b2).unwrap();
    println!("intersection: {}", x);
    assert_within!( x.lat_deg(), 0.0, 1e-9);
    assert_within!( x.lon_deg(), 30.0, 1e-9);

    // the segments themselves do not reach the crossing
    assert!( intersect_segments( &a1, &a2, &b1, &b2).is_none());

    // identical circles have no unique intersection
    assert!( intersection( &a1, &a2, &a1, &a2).is_none());
}

#[test]
fn test_closest_point_segment() {
    let p1 = LatLonAlt::from_degrees( 0.0, 0.0, 0.0);
    let p2 = LatLonAlt::from_degrees( 0.0, 10.0, 0.0);

    let c = closest_point_segment( &p1, &p2, &LatLonAlt::from_degrees( 1.0, 4.0, 0.0));
    println!("closest point: {}", c);
    assert_within!( c.lat_deg(), 0.0, 1e-9);
    assert_within!( c.lon_deg(), 4.0, 1e-9);

    // beyond the end of the segment we get the end point
    let c = closest_point_segment( &p1, &p2, &LatLonAlt::from_degrees( 1.0, 12.0, 0.0));
    assert_within!( c.lon_deg(), 10.0, 1e-9);
}

#[test]
fn test_time_cpa() {
    // two aircraft on the equator flying towards each other, 20NM apart at 200m/s each
    let p1 = LatLonAlt::from_degrees( 0.0, 0.0, 0.0);
    let p2 = LatLonAlt::from_degrees( 0.0, 20.0/60.0, 0.0);
    let v1 = Velocity::from_trk_gs_vs( HALF_PI, 200.0, 0.0);
    let v2 = Velocity::from_trk_gs_vs( -HALF_PI, 200.0, 0.0);

    let t = time_cpa( &p1, &v1, &p2, &v2, 10.0, 1e-6).unwrap();
    println!("time of closest approach: {:.3}s", t);
    assert_within!( t, 20.0 * NM / 400.0, 1e-3);

    // same position
    assert_eq!( time_cpa( &p1, &v1, &p1, &v2, 10.0, 1e-6).unwrap(), 0.0);
}
