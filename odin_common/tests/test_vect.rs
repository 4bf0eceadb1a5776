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

use odin_common::{assert_within, HALF_PI};
use odin_common::vect::*;

// run with "cargo test test_vect2 -- --nocapture"

#[test]
fn test_vect2() {
    let v = Vect2::from_trk_gs( HALF_PI, 10.0);
    println!("v = {}", v);
    assert_within!( v.x, 10.0, 1e-12);
    assert_within!( v.y, 0.0, 1e-12);
    assert_within!( v.compass_angle(), HALF_PI, 1e-12);

    let u = Vect2::new( 0.0, 5.0);
    assert_eq!( u.perp_r(), Vect2::new( 5.0, 0.0));
    assert_eq!( u.perp_l(), Vect2::new( -5.0, 0.0));
    assert_eq!( u.det( &Vect2::new( 1.0, 0.0)), -5.0);
    assert_eq!( u.dot( &Vect2::new( 1.0, 2.0)), 10.0);
    assert_eq!( u.hat(), Vect2::new( 0.0, 1.0));
    assert_eq!( Vect2::ZERO.hat(), Vect2::ZERO);
    assert_eq!( Vect2::new( 3.0, 4.0).distance( &Vect2::ZERO), 5.0);
    assert!( (u - u).is_zero());
}

#[test]
fn test_vect3() {
    let a = Vect3::new( 1.0, 0.0, 0.0);
    let b = Vect3::new( 0.0, 1.0, 0.0);
    assert_eq!( a.cross( &b), Vect3::new( 0.0, 0.0, 1.0));
    assert!( a.parallel( &a.scal( -3.0)));
    assert!( !a.parallel( &b));

    let p = Vect3::new( 3.0, 4.0, 100.0);
    assert_eq!( p.norm_2d(), 5.0);
    assert_eq!( p.distance_h( &Vect3::ZERO), 5.0);
    assert_eq!( p.distance_v( &Vect3::ZERO), 100.0);
    assert!( p.almost_equals_2d( &p.with_z( 0.0), 1e-12));
    assert!( p.within_epsilon( &(p + Vect3::new( 0.0, 0.0, 1e-3)), 1e-2));
    assert!( !p.within_epsilon( &(p + Vect3::new( 0.0, 0.0, 1e-1)), 1e-2));

    let q = p.linear_by_dist_2d( HALF_PI, 10.0);
    assert_within!( q.x, 13.0, 1e-12);
    assert_within!( q.y, 4.0, 1e-12);
    assert_eq!( q.z, 100.0);
}

// run with "cargo test test_cpa -- --nocapture"

#[test]
fn test_cpa() {
    // head-on, offset by 100m
    let so = Vect3::new( 0.0, 0.0, 0.0);
    let vo = Vect3::new( 100.0, 0.0, 0.0);
    let si = Vect3::new( 10_000.0, 100.0, 0.0);
    let vi = Vect3::new( -100.0, 0.0, 0.0);

    let t = Vect3::tcpa( &so, &vo, &si, &vi);
    let d = Vect3::dcpa( &so, &vo, &si, &vi);
    println!("tcpa = {}s, dcpa = {}m", t, d);
    assert_within!( t, 50.0, 1e-9);
    assert_within!( d, 100.0, 1e-9);

    // diverging
    assert_eq!( Vect3::tcpa( &so, &(-vo), &si, &(-vi)), 0.0);
}

#[test]
fn test_rotations() {
    let v = Vect3::new( 1.0, 0.0, 0.0);
    let r = Vect3::from_column( &(rot_z( HALF_PI) * v.to_column()));
    println!("rot_z(π/2) {} = {}", v, r);
    assert!( r.within_epsilon( &Vect3::new( 0.0, -1.0, 0.0), 1e-12));

    let r = Vect3::from_column( &(rot_y( HALF_PI) * v.to_column()));
    assert!( r.within_epsilon( &Vect3::new( 0.0, 0.0, 1.0), 1e-12));

    let w = Vect3::new( 0.0, 1.0, 0.0);
    let r = Vect3::from_column( &(rot_x( HALF_PI) * w.to_column()));
    assert!( r.within_epsilon( &Vect3::new( 0.0, 0.0, -1.0), 1e-12));
}
