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

use std::ops::{Add, Sub, Neg, Mul};
use std::fmt;
use nalgebra::{Matrix3, Vector3};
use serde::{Serialize,Deserialize};
use crate::{sq, atan2_safe, numeric::{almost_equals, almost_equals_prec, Precision}, angle::to_2pi};

// note that we do not use uom here since the same vectors are used for positions (m), velocities (m/s)
// and unit-less directions. For positions x is east, y is north and z is up

/* #region Vect2 *************************************************************************************************/

#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct Vect2 {
    pub x: f64,
    pub y: f64
}

impl Vect2 {
    pub const ZERO: Vect2 = Vect2 { x: 0.0, y: 0.0 };
    pub const INVALID: Vect2 = Vect2 { x: f64::NAN, y: f64::NAN };

    #[inline] pub const fn new (x: f64, y: f64)->Self { Vect2{x,y} }

    /// vector of given length pointing in direction of compass angle trk
    #[inline] pub fn from_trk_gs (trk: f64, gs: f64)->Self { Vect2{ x: gs*trk.sin(), y: gs*trk.cos() } }

    #[inline] pub fn is_zero (&self)->bool { self.x == 0.0 && self.y == 0.0 }
    #[inline] pub fn is_invalid (&self)->bool { self.x.is_nan() || self.y.is_nan() }

    #[inline] pub fn dot (&self, v: &Vect2)->f64 { self.x*v.x + self.y*v.y }
    #[inline] pub fn det (&self, v: &Vect2)->f64 { self.x*v.y - self.y*v.x }
    #[inline] pub fn sqv (&self)->f64 { self.dot(self) }
    #[inline] pub fn norm (&self)->f64 { self.sqv().sqrt() }

    /// unit vector - zero vectors stay zero
    pub fn hat (&self)->Self {
        let n = self.norm();
        if n == 0.0 { *self } else { Vect2{ x: self.x/n, y: self.y/n } }
    }

    #[inline] pub fn scal (&self, k: f64)->Self { Vect2{ x: k*self.x, y: k*self.y } }
    #[inline] pub fn add_scal (&self, k: f64, v: &Vect2)->Self { Vect2{ x: self.x + k*v.x, y: self.y + k*v.y } }
    #[inline] pub fn linear (&self, v: &Vect2, t: f64)->Self { self.add_scal( t, v) }

    /// right perpendicular (clockwise rotated by 90°)
    #[inline] pub fn perp_r (&self)->Self { Vect2{ x: self.y, y: -self.x } }

    /// left perpendicular (counter-clockwise rotated by 90°)
    #[inline] pub fn perp_l (&self)->Self { Vect2{ x: -self.y, y: self.x } }

    /// compass angle in (-π,π] of this vector interpreted as (east,north) components
    #[inline] pub fn trk (&self)->f64 { atan2_safe( self.x, self.y) }

    /// compass angle in [0,2π)
    #[inline] pub fn compass_angle (&self)->f64 { to_2pi( self.trk()) }

    #[inline] pub fn distance (&self, v: &Vect2)->f64 { (*self - *v).norm() }

    pub fn almost_equals (&self, v: &Vect2)->bool {
        almost_equals( self.x, v.x) && almost_equals( self.y, v.y)
    }

    pub fn within_epsilon (&self, v: &Vect2, eps: f64)->bool {
        (self.x - v.x).abs() <= eps && (self.y - v.y).abs() <= eps
    }
}

impl fmt::Display for Vect2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

impl Add for Vect2 {
    type Output = Self;
    fn add (self, rhs: Self)->Self { Vect2{ x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl Sub for Vect2 {
    type Output = Self;
    fn sub (self, rhs: Self)->Self { Vect2{ x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl Neg for Vect2 {
    type Output = Self;
    fn neg (self)->Self { Vect2{ x: -self.x, y: -self.y } }
}

impl Mul<f64> for Vect2 {
    type Output = Self;
    fn mul (self, k: f64)->Self { self.scal(k) }
}

/* #endregion Vect2 */

/* #region Vect3 *************************************************************************************************/

#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct Vect3 {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl Vect3 {
    pub const ZERO: Vect3 = Vect3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const INVALID: Vect3 = Vect3 { x: f64::NAN, y: f64::NAN, z: f64::NAN };

    #[inline] pub const fn new (x: f64, y: f64, z: f64)->Self { Vect3{x,y,z} }
    #[inline] pub fn from_vect2 (v: Vect2, z: f64)->Self { Vect3{ x: v.x, y: v.y, z } }

    pub fn from_column (m: &Vector3<f64>)->Self { Vect3{ x: m[0], y: m[1], z: m[2] } }
    pub fn to_column (&self)->Vector3<f64> { Vector3::new( self.x, self.y, self.z) }

    #[inline] pub fn with_x (&self, x: f64)->Self { Vect3{ x, ..*self } }
    #[inline] pub fn with_y (&self, y: f64)->Self { Vect3{ y, ..*self } }
    #[inline] pub fn with_z (&self, z: f64)->Self { Vect3{ z, ..*self } }

    #[inline] pub fn vect2 (&self)->Vect2 { Vect2{ x: self.x, y: self.y } }

    #[inline] pub fn is_zero (&self)->bool { self.x == 0.0 && self.y == 0.0 && self.z == 0.0 }
    #[inline] pub fn is_invalid (&self)->bool { self.x.is_nan() || self.y.is_nan() || self.z.is_nan() }

    #[inline] pub fn dot (&self, v: &Vect3)->f64 { self.x*v.x + self.y*v.y + self.z*v.z }
    #[inline] pub fn sqv (&self)->f64 { self.dot(self) }
    #[inline] pub fn norm (&self)->f64 { self.sqv().sqrt() }

    pub fn cross (&self, v: &Vect3)->Self {
        Vect3 {
            x: self.y*v.z - self.z*v.y,
            y: self.z*v.x - self.x*v.z,
            z: self.x*v.y - self.y*v.x
        }
    }

    /// unit vector - zero vectors stay zero
    pub fn hat (&self)->Self {
        let n = self.norm();
        if n == 0.0 { *self } else { Vect3{ x: self.x/n, y: self.y/n, z: self.z/n } }
    }

    #[inline] pub fn scal (&self, k: f64)->Self { Vect3{ x: k*self.x, y: k*self.y, z: k*self.z } }
    #[inline] pub fn add_scal (&self, k: f64, v: &Vect3)->Self { Vect3{ x: self.x + k*v.x, y: self.y + k*v.y, z: self.z + k*v.z } }
    #[inline] pub fn linear (&self, v: &Vect3, t: f64)->Self { self.add_scal( t, v) }

    /// move horizontally by distance d in direction of compass angle track
    #[inline] pub fn linear_by_dist_2d (&self, track: f64, d: f64)->Self {
        Vect3{ x: self.x + d*track.sin(), y: self.y + d*track.cos(), z: self.z }
    }

    #[inline] pub fn perp_r (&self)->Self { Vect3{ x: self.y, y: -self.x, z: 0.0 } }
    #[inline] pub fn perp_l (&self)->Self { Vect3{ x: -self.y, y: self.x, z: 0.0 } }

    #[inline] pub fn det_2d (&self, v: &Vect3)->f64 { self.x*v.y - self.y*v.x }
    #[inline] pub fn dot_2d (&self, v: &Vect3)->f64 { self.x*v.x + self.y*v.y }
    #[inline] pub fn norm_2d (&self)->f64 { (self.x*self.x + self.y*self.y).sqrt() }

    #[inline] pub fn distance_h (&self, v: &Vect3)->f64 { (self.vect2() - v.vect2()).norm() }
    #[inline] pub fn distance_v (&self, v: &Vect3)->f64 { self.z - v.z }

    pub fn parallel (&self, v: &Vect3)->bool { self.cross(v).almost_equals( &Vect3::ZERO) }

    pub fn almost_equals (&self, v: &Vect3)->bool {
        almost_equals( self.x, v.x) && almost_equals( self.y, v.y) && almost_equals( self.z, v.z)
    }

    pub fn almost_equals_prec (&self, v: &Vect3, prec: Precision)->bool {
        almost_equals_prec( self.x, v.x, prec) && almost_equals_prec( self.y, v.y, prec) && almost_equals_prec( self.z, v.z, prec)
    }

    pub fn almost_equals_2d (&self, v: &Vect3, horiz_eps: f64)->bool {
        (self.vect2() - v.vect2()).norm() < horiz_eps
    }

    pub fn within_epsilon (&self, v: &Vect3, eps: f64)->bool {
        (self.x - v.x).abs() <= eps && (self.y - v.y).abs() <= eps && (self.z - v.z).abs() <= eps
    }

    /// component-wise comparison with individual bounds
    pub fn compare (&self, v: &Vect3, max_x: f64, max_y: f64, max_z: f64)->bool {
        (v.x - self.x).abs() <= max_x && (v.y - self.y).abs() <= max_y && (v.z - self.z).abs() <= max_z
    }

    /// time of closest point of approach of two linearly moving points (clamped to the future)
    pub fn tcpa (so: &Vect3, vo: &Vect3, si: &Vect3, vi: &Vect3)->f64 {
        let s = *so - *si;
        let v = *vo - *vi;
        let nv = v.sqv();
        if nv > 0.0 { (-s.dot(&v) / nv).max(0.0) } else { 0.0 }
    }

    /// distance at closest point of approach of two linearly moving points
    pub fn dcpa (so: &Vect3, vo: &Vect3, si: &Vect3, vi: &Vect3)->f64 {
        let t = Vect3::tcpa( so, vo, si, vi);
        let s = *so - *si;
        let v = *vo - *vi;
        s.add_scal( t, &v).norm()
    }
}

impl fmt::Display for Vect3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

impl Add for Vect3 {
    type Output = Self;
    fn add (self, rhs: Self)->Self { Vect3{ x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z } }
}

impl Sub for Vect3 {
    type Output = Self;
    fn sub (self, rhs: Self)->Self { Vect3{ x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z } }
}

impl Neg for Vect3 {
    type Output = Self;
    fn neg (self)->Self { Vect3{ x: -self.x, y: -self.y, z: -self.z } }
}

impl Mul<f64> for Vect3 {
    type Output = Self;
    fn mul (self, k: f64)->Self { self.scal(k) }
}

/* #endregion Vect3 */

/* #region rotations *********************************************************************************************/

// frame (passive) rotation matrices about the principal axes, i.e. these rotate the coordinate system
// by the given angle, not the vector

pub fn rot_x (a: f64)->Matrix3<f64> {
    let (s,c) = a.sin_cos();
    Matrix3::new( 1.0, 0.0, 0.0,
                  0.0,   c,   s,
                  0.0,  -s,   c)
}

pub fn rot_y (a: f64)->Matrix3<f64> {
    let (s,c) = a.sin_cos();
    Matrix3::new(   c, 0.0,  -s,
                  0.0, 1.0, 0.0,
                    s, 0.0,   c)
}

pub fn rot_z (a: f64)->Matrix3<f64> {
    let (s,c) = a.sin_cos();
    Matrix3::new(   c,   s, 0.0,
                   -s,   c, 0.0,
                  0.0, 0.0, 1.0)
}

/* #endregion rotations */
