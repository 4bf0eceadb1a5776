/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
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

use std::{fmt,marker::PhantomData, ops, cmp};
use crate::{PI, HALF_PI, TWO_PI, sign_of, numeric::almost_equals, tolerance::almost_equals_radian};

/* #region scalar normalization *********************************************************************************/

/// floor based modulo that always returns a value in [0,m) - values that are almost m are snapped to 0
pub fn modulo (val: f64, m: f64)->f64 {
    let n = (val / m).floor();
    let r = val - n*m;
    if almost_equals(r,m) { 0.0 } else { r }
}

/// `modulo` that passes through val for non-positive modules
#[inline] pub fn safe_modulo (val: f64, m: f64)->f64 { if m > 0.0 { modulo(val,m) } else { val } }

/// radians in [0,2π)
#[inline] pub fn to_2pi (rad: f64)->f64 { modulo(rad, TWO_PI) }

/// radians in (-π,π]
#[inline] pub fn to_pi (rad: f64)->f64 {
    let r = to_2pi(rad);
    if r > PI { r - TWO_PI } else { r }
}

/// radians in [-π/2,π/2), with discontinuity at ±π/2
#[inline] pub fn to_pi2 (rad: f64)->f64 { to_pi(rad + HALF_PI) - HALF_PI }

/// radians in [-π/2,π/2], folding over (continuous) like a latitude crossing a pole
pub fn to_pi2_cont (rad: f64)->f64 {
    let r = to_pi(rad);
    if r < -HALF_PI { -PI - r }
    else if r < HALF_PI { r }
    else { PI - r }
}

#[inline] pub fn to_360 (deg: f64)->f64 { modulo(deg, 360.0) }

#[inline] pub fn to_180 (deg: f64)->f64 {
    let d = to_360(deg);
    if d > 180.0 { d - 360.0 } else { d }
}

#[inline]
pub fn normalize_90 (d:f64) -> f64 {
    let x = d % 360.0;

    if x < -90.0 { -180.0 - x }
    else if x > 90.0 { 180.0 - x }
    else { x }
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

/* #endregion scalar normalization */

/* #region track arithmetic **************************************************************************************/

// tracks are compass angles (clockwise from north) in radians

/// is the shortest turn from track alpha to track beta clockwise (a right turn)
pub fn clockwise (alpha: f64, beta: f64)->bool {
    let a = to_2pi(alpha);
    let b = to_2pi(beta);
    if (a - b).abs() <= PI { b >= a } else { a > b }
}

/// +1 for right turn, -1 for left turn
#[inline] pub fn turn_dir (init_track: f64, goal_track: f64)->i32 { sign_of( clockwise( init_track, goal_track)) }

/// unsigned angle of the shortest turn between two tracks, in [0,π]
pub fn turn_delta (alpha: f64, beta: f64)->f64 {
    let a = to_2pi(alpha);
    let b = to_2pi(beta);
    let delta = (a - b).abs();
    if delta <= PI { delta } else { TWO_PI - delta }
}

#[inline] pub fn signed_turn_delta (alpha: f64, beta: f64)->f64 { turn_dir(alpha,beta) as f64 * turn_delta(alpha,beta) }

/// unsigned turn angle from alpha to beta when turning in the given direction, in [0,2π)
pub fn turn_delta_dir (alpha: f64, beta: f64, turn_right: bool)->f64 {
    if almost_equals_radian(alpha,beta) { return 0.0 } // not 2π

    let d = turn_delta(alpha,beta);
    if turn_right != clockwise(alpha,beta) { TWO_PI - d } else { d }
}

#[inline] pub fn turn_delta_sgn (alpha: f64, beta: f64, dir: i32)->f64 { turn_delta_dir( alpha, beta, dir > 0) }

/// convert compass angle into math (counter clockwise from east) angle
#[inline] pub fn track_to_math (alpha: f64)->f64 { HALF_PI - alpha }

/* #endregion track arithmetic */

/* #region NormalizedAngle ****************************************************************************************/

// value types for user input/output of angles. These are stored in radians since that is what all
// computations use, but (de)serialized and displayed in degrees

pub trait AngleKind {
    fn normalize(rad: f64)->f64;
    fn name()->&'static str;
}

#[derive(Debug,Clone,Copy)]
pub struct LatitudeKind {}
impl AngleKind for LatitudeKind {
    fn normalize(rad: f64) -> f64 { to_pi2_cont(rad) }
    fn name()->&'static str { "Latitude" }
}

#[derive(Debug,Clone,Copy)]
pub struct LongitudeKind {}
impl AngleKind for LongitudeKind {
    fn normalize(rad: f64) -> f64 { to_pi(rad) }
    fn name()->&'static str { "Longitude" }
}

#[derive(Debug,Clone,Copy)]
pub struct TrackKind {}
impl AngleKind for TrackKind {
    fn normalize(rad: f64) -> f64 { to_2pi(rad) }
    fn name()->&'static str { "Track" }
}

#[derive(Debug,Clone,Copy)]
pub struct BankKind {}
impl AngleKind for BankKind {
    fn normalize(rad: f64) -> f64 { to_pi2(rad) }
    fn name()->&'static str { "Bank" }
}

#[derive(Copy, Clone)]
pub struct NormalizedAngle<K> where K: AngleKind {
    rad: f64,
    kind: PhantomData<K>,
}

impl<K> NormalizedAngle<K> where K: AngleKind {
    #[inline]
    pub fn from_radians(rad: f64) -> Self {
        NormalizedAngle { rad: K::normalize(rad), kind: PhantomData }
    }

    #[inline]
    pub fn from_degrees(deg: f64) -> Self {
        Self::from_radians( deg.to_radians())
    }

    #[inline] pub fn radians(&self)->f64 { self.rad }
    #[inline] pub fn degrees(&self)->f64 { self.rad.to_degrees() }

    #[inline] pub fn sin(&self)->f64 { self.rad.sin() }
    #[inline] pub fn cos(&self)->f64 { self.rad.cos() }
    #[inline] pub fn tan(&self)->f64 { self.rad.tan() }
}

impl <K> From<NormalizedAngle<K>> for f64 where K: AngleKind {
    fn from(a: NormalizedAngle<K>) -> Self { a.rad }
}

impl<K> fmt::Display for NormalizedAngle<K> where K: AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:.6}°", self.degrees()) }
}

impl<K> fmt::Debug for NormalizedAngle<K> where K: AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}({})", K::name(), self.degrees()) }
}

impl<K> cmp::PartialEq for NormalizedAngle<K> where K: AngleKind {
    fn eq(&self, other: &Self) -> bool { self.rad == other.rad }
}

impl<K> cmp::PartialOrd for NormalizedAngle<K> where K: AngleKind {
    fn partial_cmp(&self,other:&Self) -> Option<cmp::Ordering> { self.rad.partial_cmp(&other.rad) }
}

// addition and subtraction is only allowed with same kind of angle
impl<K> ops::Add<NormalizedAngle<K>> for NormalizedAngle<K> where K: AngleKind {
    type Output = Self;
    fn add (self,rhs:NormalizedAngle<K>) -> Self::Output { NormalizedAngle::from_radians( self.rad + rhs.rad) }
}
impl<K> ops::Sub<NormalizedAngle<K>> for NormalizedAngle<K> where K: AngleKind {
    type Output = Self;
    fn sub (self,rhs:NormalizedAngle<K>) -> Self::Output { NormalizedAngle::from_radians( self.rad - rhs.rad) }
}

pub type Latitude = NormalizedAngle<LatitudeKind>;
pub type Longitude = NormalizedAngle<LongitudeKind>;
pub type Track = NormalizedAngle<TrackKind>;
pub type Bank = NormalizedAngle<BankKind>;

//--- serde support (degrees on the outside)

use serde::ser::{Serialize as SerializeTrait, Serializer};
use serde::de::{self, Deserialize as DeserializeTrait, Deserializer, Visitor};

macro_rules! define_angle_deserializer {
    ($angle_type: ident, $min:literal, $max:literal) => {
        impl<'de> DeserializeTrait<'de> for $angle_type {
            fn deserialize<D>(deserializer: D) -> Result<$angle_type, D::Error> where D: Deserializer<'de> {
                struct AngleVisitor;

                impl<'de> Visitor<'de> for AngleVisitor {
                    type Value = $angle_type;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        write!( formatter, "floating point degrees between [{}..{}]", $min, $max)
                    }

                    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> where E: de::Error {
                        if value >= $min && value <= $max {
                            Ok($angle_type::from_degrees(value))
                        } else {
                            Err(E::custom(format!("degrees out of range: {}", value)))
                        }
                    }

                    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> where E: de::Error {
                        self.visit_f64( value as f64)
                    }

                    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> where E: de::Error {
                        self.visit_f64( value as f64)
                    }
                }

                deserializer.deserialize_f64( AngleVisitor)
            }
        }
    };
}

define_angle_deserializer!{ Latitude, -90.0, 90.0 }
define_angle_deserializer!{ Longitude, -180.0, 180.0 }
define_angle_deserializer!{ Track, 0.0, 360.0 }
define_angle_deserializer!{ Bank, -90.0, 90.0 }

impl<K> SerializeTrait for NormalizedAngle<K> where K: AngleKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_f64(self.degrees())
    }
}

/* #endregion NormalizedAngle */
