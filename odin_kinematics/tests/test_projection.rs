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
use odin_common::geo_constants::NM;
use odin_common::vect::Vect3;
use odin_kinematics::{AziEquiProjection, LatLonAlt, Position, Velocity};
use odin_kinematics::great_circle;
use odin_kinematics::kinematics;
use odin_kinematics::projected_kinematics as pk;

fn moffett ()->LatLonAlt { LatLonAlt::from_degrees( 37.4, -122.1, 1000.0) }

// run with "cargo test test_projection_round_trip -- --nocapture"

#[test]
fn test_projection_round_trip() {
    let ref_lla = moffett();
    let proj = AziEquiProjection::new( ref_lla);
    println!("{}", proj);
    assert!( format!("{}", proj).starts_with("AziEquiProjection(37.400000°,-122.100000°"));

    assert!( proj.project( &ref_lla).norm() < 1e-6);

    for (trk_deg, d_nm) in [(0.0f64, 10.0f64), (45.0, 100.0), (135.0, 250.0), (260.0, 400.0), (330.0, 5.0)] {
        let lla = great_circle::linear_initial_dist( &ref_lla, trk_deg.to_radians(), d_nm * NM).with_alt( 3000.0);
        let p = proj.project( &lla);
        let back = proj.inverse( &p);
        println!("{:5.1}° {:5.1}nm: {} -> {} -> {}", trk_deg, d_nm, lla, p, back);

        assert_within!( p.vect2().norm(), d_nm * NM, 1e-6 * d_nm * NM); // distances from the reference are kept
        assert_within!( p.z, 2000.0, 1e-9);
        assert!( turn_delta( p.vect2().compass_angle(), trk_deg.to_radians()) < 1e-9); // so are tracks
        assert!( great_circle::almost_equals_eps( &lla, &back, 1e-6 * d_nm * NM, 1e-9));
    }
}

#[test]
fn test_projection_axes() {
    let proj = AziEquiProjection::from_lat_lon_alt( 0.0, 0.0, 0.0);

    let east = proj.project( &LatLonAlt::from_degrees( 0.0, 1.0, 0.0));
    let north = proj.project( &LatLonAlt::from_degrees( 1.0, 0.0, 0.0));
    println!("east: {}, north: {}", east, north);

    assert!( east.x > 0.0 && east.y.abs() < 1e-6);
    assert!( north.y > 0.0 && north.x.abs() < 1e-6);
    assert_within!( east.x, 60.0 * NM, 1.0);
}

#[test]
fn test_velocity_projection() {
    let lla = moffett();
    let proj = AziEquiProjection::new( lla);
    let v = Velocity::from_trk_gs_vs( 45.0_f64.to_radians(), 200.0, 5.0);

    let (s3, v3) = proj.project_state( &lla, &v);
    println!("projected: {} {}", s3, v3);
    assert_within!( v3.gs(), v.gs(), 1e-6);
    assert_within!( v3.trk(), v.trk(), 1e-8);
    assert_within!( v3.vs(), v.vs(), 1e-9);

    let (p, vb) = proj.inverse_state( &s3, &v3, true);
    println!("inverse: {} {}", p, vb);
    assert!( p.almost_equals_eps( &Position::Geodesic(lla), 1e-6, 1e-6));
    assert_within!( vb.gs(), v.gs(), 1e-3);
    assert!( turn_delta( vb.trk(), v.trk()) < 1e-6);

    // flat states pass through
    let (p, vf) = proj.inverse_state( &s3, &v3, false);
    assert_eq!( p, Position::Flat( s3));
    assert_eq!( vf, v3);
}

// run with "cargo test test_projected_linear -- --nocapture"

#[test]
fn test_projected_linear() {
    let so = Position::Geodesic( moffett());
    let vo = Velocity::from_trk_gs_vs( 1.0, 200.0, -3.0);

    let (p, v) = pk::linear( &so, &vo, 60.0);
    let p_gc = so.linear( &vo, 60.0);
    println!("projected: {}, great circle: {}", p, p_gc);

    // straight lines through the projection center are great circles
    assert!( p.almost_equals_eps( &p_gc, 1e-3, 1e-6));
    assert_within!( p.alt(), 1000.0 - 180.0, 1e-6);
    assert_within!( v.gs(), 200.0, 1e-3);

    let so = Position::from_xyz( 100.0, 200.0, 300.0);
    let (p, _) = pk::linear( &so, &vo, 10.0);
    assert!( p.almost_equals_eps( &so.linear( &vo, 10.0), 1e-9, 1e-9));
}

// run with "cargo test test_projected_turn -- --nocapture"

#[test]
fn test_projected_turn() {
    let so = Position::Geodesic( moffett());
    let vo = Velocity::from_trk_gs_vs( 0.0, 100.0, 0.0);
    let bank = 25.0_f64.to_radians();
    let goal = HALF_PI;

    let (p, v) = pk::turn_until( &so, &vo, 100.0, goal, bank);
    let (s3, v3) = kinematics::turn_until( &Vect3::ZERO, &vo, 100.0, goal, bank);
    println!("geodesic: {} {}", p, v);
    println!("flat:     {} {}", s3, v3);

    assert!( p.is_lat_lon());
    assert_within!( so.distance_h( &p), s3.vect2().norm(), 1e-3);
    assert!( turn_delta( v.trk(), goal) < 1.0_f64.to_radians());
    assert_within!( v.gs(), 100.0, 0.1);

    let fo = Position::from_xyz( 0.0, 0.0, 1000.0);
    let (pf, vf) = pk::turn_until( &fo, &vo, 100.0, goal, bank);
    assert!( pf.vect3().almost_equals_2d( &s3, 1e-9));
    assert_within!( vf.trk(), goal, 1e-6);
}

#[test]
fn test_projected_level_out() {
    let so = Position::Geodesic( moffett());
    let vo = Velocity::from_trk_gs_vs( 0.5, 150.0, 0.0);

    let (p, v, t) = pk::vs_level_out_final( &so, &vo, 10.0, 2000.0, 2.0).unwrap();
    println!("level-out end after {:.1}s: {} {}", t, p, v);
    assert!( p.is_lat_lon());
    assert_within!( p.alt(), 2000.0, 1e-3);
    assert_within!( v.vs(), 0.0, 1e-3);
    assert!( t > 100.0);

    let t_lo = pk::vs_level_out_time( &so, &vo, 10.0, 2000.0, 2.0).unwrap();
    assert_within!( t_lo, t, 1e-6);

    let (pm, vm) = pk::vs_level_out( &so, &vo, t / 2.0, 10.0, 2000.0, 2.0, true).unwrap();
    assert!( pm.alt() > 1000.0 && pm.alt() < 2000.0);
    assert_within!( vm.vs(), 10.0, 1e-3);

    // negative acceleration magnitudes give the same maneuver
    let (pn, vn) = pk::vs_level_out( &so, &vo, t / 2.0, 10.0, 2000.0, -2.0, true).unwrap();
    assert_within!( pn.alt(), pm.alt(), 1e-9);
    assert_within!( vn.vs(), vm.vs(), 1e-9);
    let (pn, _, tn) = pk::vs_level_out_final( &so, &vo, 10.0, 2000.0, -2.0).unwrap();
    assert_within!( tn, t, 1e-9);
    assert_within!( pn.alt(), 2000.0, 1e-3);

    // no climb rate jumps to the target
    let (p0, v0, t0) = pk::vs_level_out_final( &so, &vo, 0.0, 2000.0, 2.0).unwrap();
    assert_eq!( t0, 0.0);
    assert_eq!( p0.alt(), 2000.0);
    assert_eq!( v0.vs(), 0.0);
}

// run with "cargo test test_projected_direct_to -- --nocapture"

#[test]
fn test_projected_direct_to() {
    let so_lla = LatLonAlt::from_degrees( 37.0, -122.0, 1500.0);
    let so = Position::Geodesic( so_lla);
    let vo = Velocity::from_trk_gs_vs( 0.0, 100.0, 0.0);
    let wp = Position::Geodesic( great_circle::linear_initial_dist( &so_lla, HALF_PI, 20_000.0).with_alt( 1500.0));

    let (eot, veot, t, dir) = pk::direct_to_point( &so, &vo, &wp, 2000.0).unwrap();
    println!("end of turn {} {} after {:.1}s (dir={})", eot, veot, t, dir);
    assert_eq!( dir, 1);
    assert!( t > 0.0);

    let trk_to_wp = eot.track( &wp).unwrap();
    assert!( turn_delta( trk_to_wp, veot.trk()) < 1.0_f64.to_radians());

    // waypoint within the turn circle
    let close = Position::Geodesic( great_circle::linear_initial_dist( &so_lla, HALF_PI, 1000.0));
    assert!( pk::direct_to_point( &so, &vo, &close, 2000.0).is_err());

    let vertices = pk::gen_direct_to_vertex_list( &so, &vo, &wp, 25.0_f64.to_radians(), 5.0, 5.0).unwrap();
    for (p,t) in &vertices { println!("  {:6.1}s {}", t, p) }
    assert!( vertices.len() >= 2);
    assert!( vertices.iter().all( |(p,_)| p.is_lat_lon()));
    assert!( vertices.windows(2).all( |w| w[0].1 <= w[1].1));
}

#[test]
fn test_projected_intersection() {
    let so = Position::from_lat_lon_alt( 0.0, 0.0, 0.0);
    let vo = Velocity::from_trk_gs_vs( HALF_PI, 100.0, 0.0);
    let si = Position::Geodesic( LatLonAlt::from_degrees( 0.1, 0.05, 0.0));
    let vi = Velocity::from_trk_gs_vs( PI, 100.0, 0.0);

    let (p, t) = pk::intersection( &so, &vo, &si, &vi).unwrap();
    println!("intersection at {} after {:.2}s", p, t);
    let expected = 0.05_f64.to_radians() * odin_common::geo_constants::SPHERICAL_EARTH_RADIUS / 100.0;
    assert_within!( t, expected, 0.5);
    assert!( p.lat().abs() < 1e-5);

    assert!( pk::intersection( &so, &vo, &si, &vo).is_none()); // parallel tracks
}
